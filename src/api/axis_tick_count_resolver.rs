use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::nice_ticks::MAX_GENERATED_TICKS;
use crate::core::tick_count_search::initial_desired_count;
use crate::core::{
    DomainKind, SearchTermination, TextMeasurer, TickCandidate, TickCountSearchParams,
    search_tick_count,
};
use crate::error::AxisLayoutResult;

use super::AxisLayoutEngine;

/// Desired count used to format the domain ends before the search starts.
const DOMAIN_LABEL_SAMPLE_COUNT: usize = 10;

/// How the continuous tick count of a pass was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCountSummary {
    pub desired_count: usize,
    /// Candidate evaluations; `1` when no search ran.
    pub iterations: usize,
    /// `None` when the count came from configuration or the vertical formula.
    pub termination: Option<SearchTermination>,
}

impl<M: TextMeasurer> AxisLayoutEngine<M> {
    pub(super) fn resolve_continuous_ticks(
        &self,
        kind: DomainKind,
        domain: (f64, f64),
        client_length: f64,
        text_height: f64,
    ) -> AxisLayoutResult<(TickCandidate, TickCountSummary)> {
        if let Some(desired_count) = self.config.desired_tick_count {
            let candidate = self.continuous_candidate(kind, domain, desired_count);
            return Ok((candidate, fixed_summary(desired_count)));
        }

        let spacing_em = self.config.label_spacing_min_for(kind);
        if !self.config.anchor.is_horizontal() {
            let desired_count = vertical_desired_count(client_length, text_height, spacing_em);
            let candidate = self.continuous_candidate(kind, domain, desired_count);
            return Ok((candidate, fixed_summary(desired_count)));
        }

        let spacing = text_height * spacing_em;
        let average_width = self.average_domain_label_width(kind, domain).max(text_height);
        let params = TickCountSearchParams {
            client_length,
            spacing,
            initial_desired_count: initial_desired_count(client_length, average_width, spacing),
            max_desired_count: max_desired_count(client_length),
        };
        let outcome = search_tick_count(params, |desired_count| {
            Ok(self.continuous_candidate(kind, domain, desired_count))
        })?;

        if outcome.termination == SearchTermination::Degenerate {
            warn!(
                client_length,
                tick_count = outcome.candidate.ticks.len(),
                "labels do not fit at a single desired tick"
            );
        }
        debug!(
            desired_count = outcome.desired_count,
            iterations = outcome.iterations,
            termination = ?outcome.termination,
            tick_count = outcome.candidate.ticks.len(),
            "tick count search finished"
        );

        let summary = TickCountSummary {
            desired_count: outcome.desired_count,
            iterations: outcome.iterations,
            termination: Some(outcome.termination),
        };
        Ok((outcome.candidate, summary))
    }

    fn average_domain_label_width(&self, kind: DomainKind, domain: (f64, f64)) -> f64 {
        let sample = self.generate_continuous_ticks(kind, domain, DOMAIN_LABEL_SAMPLE_COUNT);
        let min_text = self.format_continuous_tick(kind, domain.0, 0, &sample);
        let max_text = self.format_continuous_tick(kind, domain.1, sample.len(), &sample);
        (self.measure_text_width(&min_text) + self.measure_text_width(&max_text)) / 2.0
    }
}

/// Lines of text, with their spacing, that stack along a vertical axis.
#[must_use]
pub(super) fn vertical_desired_count(client_length: f64, text_height: f64, spacing_em: f64) -> usize {
    let line = text_height * (1.0 + spacing_em.max(0.0));
    if !client_length.is_finite() || !line.is_finite() || line <= 0.0 {
        return 1;
    }
    ((client_length / line).floor().max(1.0) as usize).min(MAX_GENERATED_TICKS)
}

fn max_desired_count(client_length: f64) -> usize {
    if !client_length.is_finite() {
        return 1;
    }
    (client_length.floor().max(1.0) as usize).min(MAX_GENERATED_TICKS)
}

fn fixed_summary(desired_count: usize) -> TickCountSummary {
    TickCountSummary {
        desired_count,
        iterations: 1,
        termination: None,
    }
}

#[cfg(test)]
mod tests {
    use super::vertical_desired_count;

    #[test]
    fn vertical_count_fits_spaced_lines() {
        // 12 * 1.25 = 15px per label
        assert_eq!(vertical_desired_count(300.0, 12.0, 0.25), 20);
        // 12 * 2.5 = 30px per label
        assert_eq!(vertical_desired_count(300.0, 12.0, 1.5), 10);
        assert_eq!(vertical_desired_count(10.0, 12.0, 0.25), 1);
        assert_eq!(vertical_desired_count(300.0, 0.0, 0.25), 1);
    }
}
