/*!
 * Language quality: sentence length, spoken register, vocabulary and terminology.
 */

use std::collections::HashSet;

use super::evaluator::{DimensionScorer, EvaluationInput};
use super::rubric::IdealBand;
use super::scores::{Dimension, DimensionScore, Metric};
use super::structure::contains_any;
use super::text;

#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageQualityScorer;

impl DimensionScorer for LanguageQualityScorer {
    fn dimension(&self) -> Dimension {
        Dimension::LanguageQuality
    }

    fn score(&self, input: &EvaluationInput) -> DimensionScore {
        let curves = input.curves();
        let lexicon = input.lexicon();

        DimensionScore::from_metrics(
            self.dimension(),
            [
                (Metric::Clarity, clarity(&input.speech_text, &curves.sentence_length)),
                (
                    Metric::Conversational,
                    conversational(
                        &input.speech_lower,
                        &lexicon.conversational_markers,
                        &curves.conversational_rate,
                    ),
                ),
                (
                    Metric::VocabularyRichness,
                    vocabulary_richness(&input.speech_text, &curves.type_token_ratio),
                ),
                (
                    Metric::Professionalism,
                    professionalism(
                        &input.speech_lower,
                        &lexicon.domain_terms,
                        curves.professionalism_fraction,
                    ),
                ),
            ],
        )
    }
}

/// Mean words per sentence scored against the ideal sentence-length band.
pub fn clarity(speech: &str, band: &IdealBand) -> f64 {
    let sentences = text::split_sentences(speech);
    if sentences.is_empty() {
        return 0.0;
    }

    let words: usize = sentences.iter().map(|s| text::word_count(s)).sum();
    band.score(words as f64 / sentences.len() as f64)
}

/// Conversational markers per hundred words scored against the ideal rate.
///
/// A word counts when it contains any marker.
pub fn conversational(speech_lower: &str, markers: &[String], band: &IdealBand) -> f64 {
    let words: Vec<&str> = speech_lower.split_whitespace().collect();
    let rate = if words.is_empty() {
        0.0
    } else {
        let hits = words.iter().filter(|w| contains_any(w, markers)).count();
        hits as f64 / words.len() as f64 * 100.0
    };

    band.score(rate)
}

/// Type-token ratio scored against the ideal band.
pub fn vocabulary_richness(speech: &str, band: &IdealBand) -> f64 {
    let tokens = text::vocabulary_tokens(speech);
    if tokens.is_empty() {
        return 0.0;
    }

    let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    band.score(unique.len() as f64 / tokens.len() as f64)
}

/// Share of the domain-term list used, saturating at `fraction` of the list.
pub fn professionalism(speech_lower: &str, terms: &[String], fraction: f64) -> f64 {
    if terms.is_empty() {
        return 1.0;
    }

    let used = terms
        .iter()
        .filter(|t| speech_lower.contains(t.to_lowercase().as_str()))
        .count();

    (used as f64 / (terms.len() as f64 * fraction)).min(1.0)
}
