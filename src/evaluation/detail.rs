/*!
 * Detail richness: elaboration beyond the slides, examples, explanations and context.
 */

use super::evaluator::{DimensionScorer, EvaluationInput};
use super::rubric::IdealBand;
use super::scores::{Dimension, DimensionScore, Metric};
use super::text;

#[derive(Debug, Default, Clone, Copy)]
pub struct DetailRichnessScorer;

impl DimensionScorer for DetailRichnessScorer {
    fn dimension(&self) -> Dimension {
        Dimension::DetailRichness
    }

    fn score(&self, input: &EvaluationInput) -> DimensionScore {
        let curves = input.curves();
        let lexicon = input.lexicon();
        let items = input.document.script.len();

        DimensionScore::from_metrics(
            self.dimension(),
            [
                (
                    Metric::ExpansionRatio,
                    expansion_ratio(input.slides, &input.speech_text, &curves.expansion_ratio),
                ),
                (
                    Metric::ExampleUsage,
                    phrase_density(
                        &input.speech_lower,
                        &lexicon.example_indicators,
                        items,
                        curves.items_per_example,
                    ),
                ),
                (
                    Metric::ExplanationQuality,
                    phrase_density(
                        &input.speech_lower,
                        &lexicon.explanation_markers,
                        items,
                        curves.items_per_explanation,
                    ),
                ),
                (
                    Metric::ContextProvision,
                    context_provision(&input.speech_lower, &lexicon.context_keywords, curves.context_target),
                ),
            ],
        )
    }
}

/// Speech words per slide word scored against the ideal expansion band; 0 without slide words.
pub fn expansion_ratio(slides: &str, speech: &str, band: &IdealBand) -> f64 {
    let slide_words = text::word_count(slides);
    if slide_words == 0 {
        return 0.0;
    }

    band.score(text::word_count(speech) as f64 / slide_words as f64)
}

/// Phrase occurrences against one expected per `items_per_hit` script items.
///
/// The expectation never drops below one occurrence.
pub fn phrase_density(speech_lower: &str, phrases: &[String], items: usize, items_per_hit: f64) -> f64 {
    let hits: usize = phrases
        .iter()
        .map(|p| text::count_occurrences(speech_lower, &p.to_lowercase()))
        .sum();

    let expected = (items as f64 / items_per_hit).max(1.0);
    (hits as f64 / expected).min(1.0)
}

/// Distinct context keywords mentioned, saturating at `target`.
pub fn context_provision(speech_lower: &str, keywords: &[String], target: f64) -> f64 {
    let hits = keywords
        .iter()
        .filter(|k| speech_lower.contains(k.to_lowercase().as_str()))
        .count();

    (hits as f64 / target).min(1.0)
}
