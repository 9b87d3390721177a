/*!
 * Time management: total duration, distribution across the talk, pace.
 *
 * Items whose duration parses to 0.0 are unspecified, not zero-length, and
 * are left out of the distribution and pace checks.
 */

use log::warn;

use super::evaluator::{DimensionScorer, EvaluationInput};
use super::rubric::{IdealBand, ScoringCurves};
use super::scores::{Dimension, DimensionScore, Metric};

#[derive(Debug, Default, Clone, Copy)]
pub struct TimeManagementScorer;

impl DimensionScorer for TimeManagementScorer {
    fn dimension(&self) -> Dimension {
        Dimension::TimeManagement
    }

    fn score(&self, input: &EvaluationInput) -> DimensionScore {
        let curves = input.curves();
        let document = input.document;
        let timed = document.timed_durations();

        if !document.plan.is_empty() && timed.is_empty() {
            warn!("No plan item specifies a duration, time management is unscored");
        }

        DimensionScore::from_metrics(
            self.dimension(),
            [
                (
                    Metric::DurationAppropriateness,
                    duration_appropriateness(
                        document.total_minutes(),
                        document.plan.len(),
                        &curves.minutes_per_item,
                    ),
                ),
                (Metric::TimeDistribution, time_distribution(&timed, curves)),
                (Metric::PaceConsistency, pace_consistency(&timed, curves.pace_extreme_factor)),
            ],
        )
    }
}

/// Total minutes scored against the per-item band scaled by the item count.
pub fn duration_appropriateness(total_minutes: f64, items: usize, per_item: &IdealBand) -> f64 {
    per_item.scaled(items as f64).score(total_minutes)
}

/// Mean of: short opening, short close, substantial interior items.
pub fn time_distribution(timed: &[f64], curves: &ScoringCurves) -> f64 {
    if timed.len() < curves.min_timed_items.max(2) {
        return 1.0;
    }

    let (first, last) = (timed[0], timed[timed.len() - 1]);
    let interior = &timed[1..timed.len() - 1];

    let opening_ok = first <= curves.edge_item_max_minutes;
    let closing_ok = last <= curves.edge_item_max_minutes;
    let interior_ok = interior.iter().all(|d| *d >= curves.interior_item_min_minutes);

    [opening_ok, closing_ok, interior_ok]
        .iter()
        .map(|ok| if *ok { 1.0 } else { 0.0 })
        .sum::<f64>()
        / 3.0
}

/// Timed items more than `factor` times above or below the mean.
pub fn extreme_items(timed: &[f64], factor: f64) -> Vec<usize> {
    if timed.is_empty() {
        return Vec::new();
    }

    let mean = timed.iter().sum::<f64>() / timed.len() as f64;
    timed
        .iter()
        .enumerate()
        .filter(|(_, d)| **d > mean * factor || **d < mean / factor)
        .map(|(i, _)| i)
        .collect()
}

/// `1 - extreme / timed`; neutral without timed items.
pub fn pace_consistency(timed: &[f64], factor: f64) -> f64 {
    if timed.is_empty() {
        return 1.0;
    }

    let extreme = extreme_items(timed, factor).len();
    (1.0 - extreme as f64 / timed.len() as f64).max(0.0)
}
