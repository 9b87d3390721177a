/*!
 * Text length analysis of a slide deck and its speech.
 *
 * Useful for spotting truncated slide extraction or a runaway script
 * before reading too much into the scores.
 */

use serde::{Deserialize, Serialize};

use super::speech::SpeechDocument;
use super::text;
use crate::errors::EvaluationError;

/// Size profile of one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextProfile {
    pub characters: usize,
    pub lines: usize,
    /// Whitespace-separated words
    pub words: usize,
    pub cjk_characters: usize,
    pub sentences: usize,
    pub distinct_keywords: usize,
}

impl TextProfile {
    pub fn of(content: &str) -> Self {
        Self {
            characters: content.chars().count(),
            lines: content.lines().count(),
            words: text::word_count(content),
            cjk_characters: text::cjk_char_count(content),
            sentences: text::split_sentences(content).len(),
            distinct_keywords: text::extract_keywords(content).distinct(),
        }
    }
}

/// Length comparison between slides and speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthAnalysis {
    pub slides: TextProfile,

    /// Profile of the joined script texts
    pub speech: TextProfile,

    /// Characters in the raw speech payload
    pub payload_characters: usize,

    pub plan_items: usize,

    /// Character count of every script item, in order
    pub script_item_characters: Vec<usize>,

    /// Speech words / slide words, absent when the slides have no words
    pub expansion_ratio: Option<f64>,
}

impl LengthAnalysis {
    /// Analyse a slide text and a raw speech payload.
    pub fn analyze(slides: &str, payload: &str) -> Result<Self, EvaluationError> {
        let document = SpeechDocument::parse(payload)?;
        Ok(Self::from_document(slides, &document, payload.chars().count()))
    }

    pub fn from_document(slides: &str, document: &SpeechDocument, payload_characters: usize) -> Self {
        let slides = TextProfile::of(slides);
        let speech = TextProfile::of(&document.speech_text());

        let expansion_ratio = if slides.words == 0 {
            None
        } else {
            Some(speech.words as f64 / slides.words as f64)
        };

        Self {
            slides,
            speech,
            payload_characters,
            plan_items: document.plan.len(),
            script_item_characters: document.script.iter().map(|s| s.text().chars().count()).collect(),
            expansion_ratio,
        }
    }

    /// Average words per script item.
    pub fn words_per_item(&self) -> f64 {
        let items = self.script_item_characters.len();
        if items == 0 {
            0.0
        } else {
            self.speech.words as f64 / items as f64
        }
    }

    /// Index and length of the longest script item.
    pub fn longest_item(&self) -> Option<(usize, usize)> {
        self.script_item_characters
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, len)| *len)
    }
}
