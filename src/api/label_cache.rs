use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{Font, TextMeasurer};

/// Runtime metrics exposed by the label width cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelWidthCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Measured label widths for one font, kept across layout passes.
#[derive(Debug, Default)]
pub(super) struct LabelWidthCache {
    font: Option<Font>,
    entries: HashMap<String, f64>,
    hits: u64,
    misses: u64,
}

impl LabelWidthCache {
    const MAX_ENTRIES: usize = 8192;

    pub(super) fn measure<M: TextMeasurer + ?Sized>(
        &mut self,
        measurer: &M,
        text: &str,
        font: &Font,
    ) -> f64 {
        if self.font.as_ref() != Some(font) {
            self.entries.clear();
            self.font = Some(font.clone());
        }
        if let Some(width) = self.entries.get(text) {
            self.hits = self.hits.saturating_add(1);
            return *width;
        }

        self.misses = self.misses.saturating_add(1);
        let width = sanitize_width(measurer.measure_width(text, font));
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.clear();
        }
        self.entries.insert(text.to_owned(), width);
        width
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
        self.font = None;
    }

    pub(super) fn stats(&self) -> LabelWidthCacheStats {
        LabelWidthCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}

fn sanitize_width(width: f64) -> f64 {
    if width.is_finite() { width.max(0.0) } else { 0.0 }
}
