use serde::{Deserialize, Serialize};

use crate::error::{AxisLayoutError, AxisLayoutResult};

use super::{AxisLayout, AxisLayoutConfig};

pub const AXIS_LAYOUT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayoutJsonContractV1 {
    pub schema_version: u32,
    pub layout: AxisLayout,
}

impl AxisLayout {
    pub fn to_json_pretty(&self) -> AxisLayoutResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AxisLayoutError::InvalidData(format!("failed to serialize axis layout json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> AxisLayoutResult<String> {
        let payload = AxisLayoutJsonContractV1 {
            schema_version: AXIS_LAYOUT_JSON_SCHEMA_V1,
            layout: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            AxisLayoutError::InvalidData(format!(
                "failed to serialize axis layout contract v1: {e}"
            ))
        })
    }

    /// Accepts a bare layout or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> AxisLayoutResult<Self> {
        if let Ok(layout) = serde_json::from_str::<AxisLayout>(input) {
            return Ok(layout);
        }
        let payload: AxisLayoutJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            AxisLayoutError::InvalidData(format!("failed to parse axis layout json payload: {e}"))
        })?;
        if payload.schema_version != AXIS_LAYOUT_JSON_SCHEMA_V1 {
            return Err(AxisLayoutError::InvalidData(format!(
                "unsupported axis layout schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.layout)
    }
}

impl AxisLayoutConfig {
    /// Parses and validates a config; omitted fields take their defaults.
    pub fn from_json_str(input: &str) -> AxisLayoutResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            AxisLayoutError::InvalidConfig(format!("failed to parse axis layout config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> AxisLayoutResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AxisLayoutError::InvalidConfig(format!("failed to serialize axis layout config: {e}"))
        })
    }
}
