/*!
 * Structure: slide order, time balance, transitions and overall shape.
 */

use std::collections::BTreeSet;

use super::evaluator::{DimensionScorer, EvaluationInput};
use super::scores::{Dimension, DimensionScore, Metric};
use super::speech::{PlanItem, ScriptItem};
use super::text;

#[derive(Debug, Default, Clone, Copy)]
pub struct StructureScorer;

impl DimensionScorer for StructureScorer {
    fn dimension(&self) -> Dimension {
        Dimension::Structure
    }

    fn score(&self, input: &EvaluationInput) -> DimensionScore {
        let document = input.document;
        let lexicon = input.lexicon();

        DimensionScore::from_metrics(
            self.dimension(),
            [
                (Metric::Coherence, coherence(&document.plan_slides(), &document.script_slides())),
                (
                    Metric::TimeBalance,
                    time_balance(&document.timed_durations(), input.curves().min_timed_items),
                ),
                (Metric::Transitions, transitions(&document.script, &lexicon.transition_phrases)),
                (
                    Metric::Organization,
                    organization(
                        &document.plan,
                        &lexicon.intro_title_markers,
                        &lexicon.conclusion_title_markers,
                    ),
                ),
            ],
        )
    }
}

/// Mean of: plan in slide order, script in slide order, share of plan slides the script covers.
pub fn coherence(plan_slides: &[i64], script_slides: &[i64]) -> f64 {
    let plan_set: BTreeSet<i64> = plan_slides.iter().copied().collect();
    let script_set: BTreeSet<i64> = script_slides.iter().copied().collect();

    let overlap = if plan_set.is_empty() {
        1.0
    } else {
        plan_set.intersection(&script_set).count() as f64 / plan_set.len() as f64
    };

    (flag(is_non_decreasing(plan_slides)) + flag(is_non_decreasing(script_slides)) + overlap) / 3.0
}

/// `1 - cv` of the timed durations; neutral below `min_items` samples.
pub fn time_balance(timed: &[f64], min_items: usize) -> f64 {
    if timed.is_empty() || timed.len() < min_items {
        return 1.0;
    }

    let n = timed.len() as f64;
    let mean = timed.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }

    let variance = timed.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    let cv = variance.sqrt() / mean;

    (1.0 - cv).clamp(0.0, 1.0)
}

/// Share of script items after the first whose leading clause opens with a transition.
pub fn transitions(script: &[ScriptItem], phrases: &[String]) -> f64 {
    if script.len() <= 1 {
        return 1.0;
    }

    let hits = script
        .iter()
        .skip(1)
        .filter(|item| {
            let lowered = item.text().to_lowercase();
            let clause = text::leading_clause(&lowered);
            contains_any(clause, phrases)
        })
        .count();

    hits as f64 / (script.len() - 1) as f64
}

/// Mean of: has an opening, has a close, has a body of three or more items.
///
/// The first and last items count as opening and close whatever their title.
pub fn organization(plan: &[PlanItem], intro_markers: &[String], conclusion_markers: &[String]) -> f64 {
    let last = plan.len().saturating_sub(1);

    let has_intro = plan
        .iter()
        .enumerate()
        .any(|(i, item)| i == 0 || contains_any(&item.title().to_lowercase(), intro_markers));

    let has_conclusion = plan
        .iter()
        .enumerate()
        .any(|(i, item)| i == last || contains_any(&item.title().to_lowercase(), conclusion_markers));

    let has_body = plan.len() >= 3;

    (flag(has_intro) + flag(has_conclusion) + flag(has_body)) / 3.0
}

/// Whether a lower-cased text contains any of the phrases (case-insensitive).
pub(crate) fn contains_any(lowered: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| lowered.contains(p.to_lowercase().as_str()))
}

fn is_non_decreasing(values: &[i64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}
