/*!
 * Content consistency: how faithfully the speech carries the slides.
 */

use log::debug;

use super::evaluator::{DimensionScorer, EvaluationInput};
use super::scores::{Dimension, DimensionScore, Metric};
use super::speech::PlanItem;
use super::text::{self, KeywordCounts};

#[derive(Debug, Default, Clone, Copy)]
pub struct ContentConsistencyScorer;

impl DimensionScorer for ContentConsistencyScorer {
    fn dimension(&self) -> Dimension {
        Dimension::ContentConsistency
    }

    fn score(&self, input: &EvaluationInput) -> DimensionScore {
        let curves = input.curves();
        let slide_keywords = text::extract_keywords(input.slides);
        let speech_keywords = text::extract_keywords(&input.speech_text);

        let novelty = novelty_ratio(&slide_keywords, &speech_keywords);
        debug!(
            "Keyword novelty: {:.3} ({} slide / {} speech keywords)",
            novelty,
            slide_keywords.distinct(),
            speech_keywords.distinct()
        );

        DimensionScore::from_metrics(
            self.dimension(),
            [
                (Metric::KeywordCoverage, text::coverage(&slide_keywords, &speech_keywords)),
                (Metric::ConceptCoverage, concept_coverage(input.slides, &input.speech_text)),
                (
                    Metric::TitleCoverage,
                    title_coverage(
                        &input.document.plan,
                        &input.speech_lower,
                        curves.title_word_min_chars,
                        curves.title_match_fraction,
                    ),
                ),
                (Metric::FactAccuracy, fact_accuracy(input.slides, &input.speech_text)),
                (Metric::HallucinationRisk, hallucination_risk(novelty, curves.elaboration_allowance)),
            ],
        )
    }
}

/// Share of distinct slide concepts that reappear in the speech.
pub fn concept_coverage(slides: &str, speech: &str) -> f64 {
    text::coverage(&text::extract_concepts(slides), &text::extract_concepts(speech))
}

/// Share of non-empty plan titles whose significant words the speech mentions.
///
/// A title is covered when the words of at least `min_chars` characters found
/// in `speech_lower` make up `match_fraction` of all its words.
pub fn title_coverage(plan: &[PlanItem], speech_lower: &str, min_chars: usize, match_fraction: f64) -> f64 {
    let titles: Vec<&str> = plan.iter().map(PlanItem::title).filter(|t| !t.is_empty()).collect();
    if titles.is_empty() {
        return 1.0;
    }

    let covered = titles
        .iter()
        .filter(|title| {
            let words = text::title_words(title);
            let matches = words
                .iter()
                .filter(|w| w.chars().count() >= min_chars && speech_lower.contains(w.as_str()))
                .count();
            matches as f64 >= words.len() as f64 * match_fraction
        })
        .count();

    covered as f64 / titles.len() as f64
}

/// Share of slide facts (years, percentages, decimals, names) repeated verbatim.
pub fn fact_accuracy(slides: &str, speech: &str) -> f64 {
    let facts = text::extract_facts(slides);
    if facts.is_empty() {
        return 1.0;
    }

    let matched = facts.iter().filter(|fact| speech.contains(fact.as_str())).count();
    matched as f64 / facts.len() as f64
}

/// Share of distinct speech keywords that never occur on the slides.
pub fn novelty_ratio(slide_keywords: &KeywordCounts, speech_keywords: &KeywordCounts) -> f64 {
    if speech_keywords.is_empty() {
        return 0.0;
    }
    speech_keywords.novel_against(slide_keywords) as f64 / speech_keywords.distinct() as f64
}

/// Piecewise-linear remap of the novelty ratio.
///
/// `[0, allowance]` is acceptable elaboration and `(allowance, 1]` escalating
/// risk; both pieces meet at `allowance`.
pub fn hallucination_risk(novelty: f64, allowance: f64) -> f64 {
    if novelty <= allowance {
        novelty / allowance * allowance
    } else {
        allowance + (novelty - allowance) / (1.0 - allowance) * (1.0 - allowance)
    }
}
