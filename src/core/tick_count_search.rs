//! Tick count search for horizontal continuous axes.
//!
//! The search walks the desired tick count in one direction only: up while
//! labels fit with more than [`ACCEPTABLE_SLACK_RATIO`] to spare, down while
//! they overflow. A step in the other direction never happens, which is what
//! bounds the walk between 1 and the configured maximum count.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::AxisLayoutResult;

use super::nice_ticks::{ContinuousTicks, ExponentOverflow};

/// Relative unused length at which a fitting tick set is accepted.
pub const ACCEPTABLE_SLACK_RATIO: f64 = 0.05;

/// Tick values with their formatted texts, as measured for one desired count.
#[derive(Debug, Clone, PartialEq)]
pub struct TickCandidate {
    pub ticks: ContinuousTicks,
    pub texts: Vec<String>,
    pub max_text_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickCountSearchParams {
    pub client_length: f64,
    /// Minimum gap between adjacent labels, in pixels.
    pub spacing: f64,
    pub initial_desired_count: usize,
    pub max_desired_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchTermination {
    /// Fits within the slack tolerance, or first fit while descending.
    Accepted,
    /// Overflowed after fitting; the last fitting set was restored.
    RevertedToFit,
    /// Did not fit even at a single desired tick.
    Degenerate,
    /// The generator could not honour the requested precision any further.
    ExponentSaturated,
    /// Reached the maximum desired count.
    CountBound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickCountSearchOutcome {
    pub candidate: TickCandidate,
    pub desired_count: usize,
    pub iterations: usize,
    pub termination: SearchTermination,
}

/// Length labels need when each one is assumed as wide as the widest.
///
/// Only half of the two outermost labels may overhang the axis ends.
#[must_use]
pub fn required_label_length(tick_count: usize, max_text_width: f64, spacing: f64) -> f64 {
    if tick_count == 0 {
        return 0.0;
    }
    let gaps = (tick_count - 1) as f64;
    max_text_width.max(gaps * (max_text_width + spacing))
}

/// First guess: as many ticks as average-width labels fit in the client length.
#[must_use]
pub fn initial_desired_count(client_length: f64, average_label_width: f64, spacing: f64) -> usize {
    let slot = average_label_width + spacing;
    if !client_length.is_finite() || !slot.is_finite() || slot <= 0.0 {
        return 1;
    }
    ((client_length / slot).floor().max(1.0)) as usize
}

/// Runs the search, calling `evaluate` with each desired count tried.
pub fn search_tick_count<F>(
    params: TickCountSearchParams,
    mut evaluate: F,
) -> AxisLayoutResult<TickCountSearchOutcome>
where
    F: FnMut(usize) -> AxisLayoutResult<TickCandidate>,
{
    let max_desired = params.max_desired_count.max(1);
    let mut desired = params.initial_desired_count.clamp(1, max_desired);
    let mut direction: Option<SearchDirection> = None;
    // Last measured set no longer than the client length.
    let mut last_fits: Option<(TickCandidate, usize)> = None;
    let mut iterations = 0;

    loop {
        iterations += 1;
        let candidate = evaluate(desired)?;

        let next = if let Some(overflow) = candidate.ticks.overflow {
            trace!(desired, ?overflow, ?direction, "tick search hit exponent bounds");
            match (direction, overflow) {
                (Some(SearchDirection::Up), ExponentOverflow::Below) => {
                    let (best, best_desired) = last_fits.take().unwrap_or((candidate, desired));
                    return Ok(outcome(
                        best,
                        best_desired,
                        iterations,
                        SearchTermination::ExponentSaturated,
                    ));
                }
                (Some(SearchDirection::Down), ExponentOverflow::Above) => {
                    return Ok(outcome(
                        candidate,
                        desired,
                        iterations,
                        SearchTermination::ExponentSaturated,
                    ));
                }
                (None | Some(SearchDirection::Down), ExponentOverflow::Below) => {
                    if desired == 1 {
                        return Ok(outcome(
                            candidate,
                            desired,
                            iterations,
                            SearchTermination::ExponentSaturated,
                        ));
                    }
                    SearchDirection::Down
                }
                (None | Some(SearchDirection::Up), ExponentOverflow::Above) => {
                    // The step is capped, so more desired ticks only add labels.
                    let (best, best_desired) = last_fits.take().unwrap_or((candidate, desired));
                    return Ok(outcome(
                        best,
                        best_desired,
                        iterations,
                        SearchTermination::ExponentSaturated,
                    ));
                }
            }
        } else {
            let length = required_label_length(
                candidate.ticks.len(),
                candidate.max_text_width,
                params.spacing,
            );
            let excess = length - params.client_length;
            let relative_error = if params.client_length > 0.0 {
                (excess / params.client_length).abs()
            } else {
                f64::INFINITY
            };
            trace!(
                desired,
                tick_count = candidate.ticks.len(),
                length,
                excess,
                ?direction,
                "tick count search step"
            );

            if excess > 0.0 {
                if desired == 1 {
                    let fixed = apply_degenerate_fix(candidate, relative_error);
                    return Ok(outcome(fixed, desired, iterations, SearchTermination::Degenerate));
                }
                if let Some((fit, fit_desired)) = last_fits.take() {
                    return Ok(outcome(
                        fit,
                        fit_desired,
                        iterations,
                        SearchTermination::RevertedToFit,
                    ));
                }
                SearchDirection::Down
            } else {
                if relative_error <= ACCEPTABLE_SLACK_RATIO
                    || direction == Some(SearchDirection::Down)
                {
                    return Ok(outcome(candidate, desired, iterations, SearchTermination::Accepted));
                }
                if desired >= max_desired {
                    return Ok(outcome(candidate, desired, iterations, SearchTermination::CountBound));
                }
                last_fits = Some((candidate, desired));
                SearchDirection::Up
            }
        };

        direction = Some(next);
        // Each branch above returns before stepping past 1 or `max_desired`.
        match next {
            SearchDirection::Down => desired -= 1,
            SearchDirection::Up => desired += 1,
        }
    }
}

fn outcome(
    candidate: TickCandidate,
    desired_count: usize,
    iterations: usize,
    termination: SearchTermination,
) -> TickCountSearchOutcome {
    TickCountSearchOutcome {
        candidate,
        desired_count,
        iterations,
        termination,
    }
}

/// Single-tick fallback: three ticks that overflow by at most 100% lose the
/// middle one (doubling the step); anything else keeps only the first tick.
fn apply_degenerate_fix(mut candidate: TickCandidate, relative_error: f64) -> TickCandidate {
    if candidate.ticks.len() == 3 && relative_error <= 1.0 {
        candidate.ticks.values.remove(1);
        if candidate.texts.len() == 3 {
            candidate.texts.remove(1);
        }
        candidate.ticks.step = candidate.ticks.step.map(|step| step * 2.0);
    } else {
        candidate.ticks.values.truncate(1);
        candidate.texts.truncate(1);
        candidate.ticks.step = None;
    }
    candidate
}
