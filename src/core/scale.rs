use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AxisLayoutError, AxisLayoutResult};

use super::types::AxisValue;

/// Scale type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DomainKind {
    Discrete,
    Numeric,
    TimeSeries,
}

impl DomainKind {
    #[must_use]
    pub fn is_continuous(self) -> bool {
        !matches!(self, Self::Discrete)
    }

    /// Parses a scale type tag; unknown tags are a fatal configuration error.
    pub fn parse(tag: &str) -> AxisLayoutResult<Self> {
        match tag {
            "discrete" => Ok(Self::Discrete),
            "numeric" | "continuous" => Ok(Self::Numeric),
            "timeSeries" | "time-series" | "time" => Ok(Self::TimeSeries),
            other => Err(AxisLayoutError::InvalidDomainKind(other.to_owned())),
        }
    }
}

impl FromStr for DomainKind {
    type Err = AxisLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Discrete => "discrete",
            Self::Numeric => "numeric",
            Self::TimeSeries => "timeSeries",
        })
    }
}

/// One category of a discrete domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub key: String,
    /// Precomputed display label.
    pub label: String,
    /// Underlying value; `AxisValue::Time` marks date-typed categories.
    pub value: AxisValue,
}

impl CategoryItem {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            value: AxisValue::Key(key.clone()),
            key,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// A date-typed category (unix seconds).
    #[must_use]
    pub fn date(key: impl Into<String>, unix_seconds: f64) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            value: AxisValue::Time(unix_seconds),
        }
    }
}

/// Band scale over ordered categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteScale {
    items: Vec<CategoryItem>,
    #[serde(default)]
    reversed: bool,
    #[serde(skip)]
    range_length: Option<f64>,
    #[serde(skip)]
    tick_count: Option<usize>,
}

impl DiscreteScale {
    #[must_use]
    pub fn new(items: Vec<CategoryItem>) -> Self {
        Self {
            items,
            reversed: false,
            range_length: None,
            tick_count: None,
        }
    }

    #[must_use]
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(keys.into_iter().map(CategoryItem::new).collect())
    }

    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    #[must_use]
    pub fn items(&self) -> &[CategoryItem] {
        &self.items
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Items in scale (pixel) order.
    pub fn ordered_items(&self) -> impl Iterator<Item = &CategoryItem> {
        let forward = (!self.reversed).then(|| self.items.iter());
        let backward = self.reversed.then(|| self.items.iter().rev());
        forward
            .into_iter()
            .flatten()
            .chain(backward.into_iter().flatten())
    }

    /// Pixel distance between consecutive band centers.
    #[must_use]
    pub fn band_step(&self) -> f64 {
        let count = self.tick_count.unwrap_or(self.items.len());
        match self.range_length {
            Some(length) if count > 0 => length / count as f64,
            _ => 0.0,
        }
    }

    /// Band center of the item at scale-order `index`.
    #[must_use]
    pub fn index_to_pixel(&self, index: usize) -> f64 {
        (index as f64 + 0.5) * self.band_step()
    }
}

/// Linear scale over a numeric or time interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousScale {
    domain: Option<(f64, f64)>,
    #[serde(skip)]
    effective_domain: Option<(f64, f64)>,
    #[serde(skip)]
    range_length: Option<f64>,
    #[serde(skip)]
    ticks: Option<Vec<f64>>,
}

impl ContinuousScale {
    pub fn new(min: f64, max: f64) -> AxisLayoutResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(AxisLayoutError::InvalidData(
                "continuous scale domain must be finite".to_owned(),
            ));
        }
        let domain = if min <= max { (min, max) } else { (max, min) };
        Ok(Self {
            domain: Some(domain),
            effective_domain: None,
            range_length: None,
            ticks: None,
        })
    }

    /// A scale without data: layout of such an axis is empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            domain: None,
            effective_domain: None,
            range_length: None,
            ticks: None,
        }
    }

    /// Domain as configured, untouched by tick rounding.
    #[must_use]
    pub fn source_domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    /// Domain used for pixel mapping in the current pass.
    #[must_use]
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.effective_domain.or(self.domain)
    }

    #[must_use]
    pub fn ticks(&self) -> Option<&[f64]> {
        self.ticks.as_deref()
    }

    #[must_use]
    pub fn value_to_pixel(&self, value: f64) -> f64 {
        let (Some((min, max)), Some(length)) = (self.domain(), self.range_length) else {
            return 0.0;
        };
        let span = max - min;
        if span <= 0.0 {
            return length / 2.0;
        }
        (value - min) / span * length
    }
}

/// A scale of any supported domain kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisScale {
    Discrete(DiscreteScale),
    Numeric(ContinuousScale),
    TimeSeries(ContinuousScale),
}

impl AxisScale {
    #[must_use]
    pub fn kind(&self) -> DomainKind {
        match self {
            Self::Discrete(_) => DomainKind::Discrete,
            Self::Numeric(_) => DomainKind::Numeric,
            Self::TimeSeries(_) => DomainKind::TimeSeries,
        }
    }

    /// True when there is nothing to lay out.
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Self::Discrete(scale) => scale.items.is_empty(),
            Self::Numeric(scale) | Self::TimeSeries(scale) => scale.domain.is_none(),
        }
    }

    /// Clears per-pass state: range length, ticks and tick-rounded domain.
    pub fn begin_layout_pass(&mut self) {
        match self {
            Self::Discrete(scale) => {
                scale.range_length = None;
                scale.tick_count = None;
            }
            Self::Numeric(scale) | Self::TimeSeries(scale) => {
                scale.range_length = None;
                scale.ticks = None;
                scale.effective_domain = None;
            }
        }
    }

    pub fn set_scale_range(&mut self, length: f64) {
        let length = if length.is_finite() { length.max(0.0) } else { 0.0 };
        match self {
            Self::Discrete(scale) => scale.range_length = Some(length),
            Self::Numeric(scale) | Self::TimeSeries(scale) => scale.range_length = Some(length),
        }
    }

    #[must_use]
    pub fn range_length(&self) -> f64 {
        match self {
            Self::Discrete(scale) => scale.range_length.unwrap_or(0.0),
            Self::Numeric(scale) | Self::TimeSeries(scale) => scale.range_length.unwrap_or(0.0),
        }
    }

    /// Records the discrete tick count banding is based on.
    pub(crate) fn set_discrete_ticks(&mut self, tick_count: Option<usize>) {
        if let Self::Discrete(scale) = self {
            scale.tick_count = tick_count;
        }
    }

    /// Records continuous ticks; with `round_to_ticks` the effective domain
    /// is widened to the outermost ticks.
    pub(crate) fn set_continuous_ticks(&mut self, ticks: Option<Vec<f64>>, round_to_ticks: bool) {
        let (Self::Numeric(scale) | Self::TimeSeries(scale)) = self else {
            return;
        };
        scale.effective_domain = None;
        if round_to_ticks {
            if let (Some((min, max)), Some(values)) = (scale.domain, ticks.as_ref()) {
                if let (Some(first), Some(last)) = (values.first(), values.last()) {
                    scale.effective_domain = Some((min.min(*first), max.max(*last)));
                }
            }
        }
        scale.ticks = ticks;
    }

    /// Pixel position of a value measured from the axis begin side.
    #[must_use]
    pub fn value_to_pixel(&self, value: &AxisValue, index: usize) -> f64 {
        match (self, value) {
            (Self::Discrete(scale), _) => scale.index_to_pixel(index),
            (Self::Numeric(scale) | Self::TimeSeries(scale), value) => {
                value.as_f64().map_or(0.0, |v| scale.value_to_pixel(v))
            }
        }
    }
}

/// Serializable scale description keyed by a type tag, for JSON-driven setups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleSpec {
    #[serde(rename = "type")]
    pub scale_type: String,
    #[serde(default)]
    pub categories: Vec<CategoryItem>,
    #[serde(default)]
    pub domain: Option<(f64, f64)>,
    #[serde(default)]
    pub reversed: bool,
}

impl ScaleSpec {
    pub fn into_scale(self) -> AxisLayoutResult<AxisScale> {
        let continuous = |domain: Option<(f64, f64)>| match domain {
            Some((min, max)) => ContinuousScale::new(min, max),
            None => Ok(ContinuousScale::empty()),
        };
        Ok(match DomainKind::parse(&self.scale_type)? {
            DomainKind::Discrete => AxisScale::Discrete(
                DiscreteScale::new(self.categories).with_reversed(self.reversed),
            ),
            DomainKind::Numeric => AxisScale::Numeric(continuous(self.domain)?),
            DomainKind::TimeSeries => AxisScale::TimeSeries(continuous(self.domain)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisScale, DiscreteScale, DomainKind, ScaleSpec};
    use crate::error::AxisLayoutError;

    #[test]
    fn unknown_domain_kind_is_fatal() {
        let spec = ScaleSpec {
            scale_type: "radial".to_owned(),
            categories: Vec::new(),
            domain: None,
            reversed: false,
        };
        assert!(matches!(
            spec.into_scale(),
            Err(AxisLayoutError::InvalidDomainKind(tag)) if tag == "radial"
        ));
        assert_eq!(DomainKind::parse("timeSeries").ok(), Some(DomainKind::TimeSeries));
    }

    #[test]
    fn band_step_follows_tick_count() {
        let mut scale = AxisScale::Discrete(DiscreteScale::from_keys(["a", "b", "c", "d"]));
        scale.set_discrete_ticks(Some(4));
        scale.set_scale_range(200.0);
        let AxisScale::Discrete(discrete) = &scale else {
            unreachable!("constructed as discrete");
        };
        assert_eq!(discrete.band_step(), 50.0);
        assert_eq!(discrete.index_to_pixel(0), 25.0);
    }

    #[test]
    fn reversed_scale_orders_items_backwards() {
        let scale = DiscreteScale::from_keys(["a", "b", "c"]).with_reversed(true);
        let keys: Vec<&str> = scale.ordered_items().map(|item| item.key.as_str()).collect();
        assert_eq!(keys, vec!["c", "b", "a"]);
    }
}
