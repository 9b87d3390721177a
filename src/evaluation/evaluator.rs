/*!
 * Speech evaluator: runs the five dimension scorers and aggregates them.
 *
 * An evaluation is a pure function of the slide text, the speech payload
 * and the rubric. The evaluator holds no per-run state, so one instance
 * can be shared across threads.
 */

use log::{debug, info, warn};

use super::content::ContentConsistencyScorer;
use super::detail::DetailRichnessScorer;
use super::language::LanguageQualityScorer;
use super::lexicon::Lexicon;
use super::rubric::{Rubric, ScoringCurves};
use super::scores::{Dimension, DimensionScore, EvaluationResult};
use super::speech::SpeechDocument;
use super::structure::StructureScorer;
use super::timing::TimeManagementScorer;
use crate::errors::EvaluationError;

/// Everything a scorer may look at during one run.
pub struct EvaluationInput<'a> {
    /// Concatenated slide text
    pub slides: &'a str,

    /// Parsed plan and script
    pub document: &'a SpeechDocument,

    /// Script texts joined with spaces
    pub speech_text: String,

    /// Lower-cased `speech_text`
    pub speech_lower: String,

    pub rubric: &'a Rubric,
}

impl<'a> EvaluationInput<'a> {
    pub fn new(slides: &'a str, document: &'a SpeechDocument, rubric: &'a Rubric) -> Self {
        let speech_text = document.speech_text();
        let speech_lower = speech_text.to_lowercase();

        Self {
            slides,
            document,
            speech_text,
            speech_lower,
            rubric,
        }
    }

    pub fn curves(&self) -> &ScoringCurves {
        &self.rubric.curves
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.rubric.lexicon
    }
}

/// Scores one dimension of a speech.
pub trait DimensionScorer: Send + Sync {
    /// The dimension this scorer produces.
    fn dimension(&self) -> Dimension;

    /// Score the input; degenerate input yields neutral values, never an error.
    fn score(&self, input: &EvaluationInput) -> DimensionScore;
}

/// Rubric-driven speech evaluator.
pub struct SpeechEvaluator {
    rubric: Rubric,
    scorers: Vec<Box<dyn DimensionScorer>>,
}

impl SpeechEvaluator {
    /// Create an evaluator with the default rubric.
    pub fn new() -> Self {
        Self {
            rubric: Rubric::default(),
            scorers: default_scorers(),
        }
    }

    /// Create an evaluator with a custom rubric.
    pub fn with_rubric(rubric: Rubric) -> Result<Self, EvaluationError> {
        rubric.validate()?;
        Ok(Self {
            rubric,
            scorers: default_scorers(),
        })
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Parse a raw speech payload and evaluate it against the slide text.
    pub fn evaluate(&self, slides: &str, payload: &str) -> Result<EvaluationResult, EvaluationError> {
        let document = SpeechDocument::parse(payload)?;
        Ok(self.evaluate_document(slides, &document))
    }

    /// Evaluate an already-parsed speech.
    pub fn evaluate_document(&self, slides: &str, document: &SpeechDocument) -> EvaluationResult {
        if slides.trim().is_empty() {
            warn!("Slide text is empty, content metrics fall back to neutral values");
        }
        if document.script.is_empty() {
            warn!("Speech script is empty");
        }

        let input = EvaluationInput::new(slides, document, &self.rubric);

        let dimensions: Vec<DimensionScore> = self
            .scorers
            .iter()
            .map(|scorer| {
                let score = scorer.score(&input);
                debug!("{}: {:.3} {:?}", scorer.dimension(), score.overall_score, score.sub_metrics);
                score
            })
            .collect();

        let result = EvaluationResult::from_dimensions(
            dimensions,
            self.rubric.weights,
            document.total_minutes(),
            document.plan.len(),
            document.script.len(),
        );

        info!("{}", result.summary());
        result
    }
}

impl Default for SpeechEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn default_scorers() -> Vec<Box<dyn DimensionScorer>> {
    vec![
        Box::new(ContentConsistencyScorer),
        Box::new(StructureScorer),
        Box::new(LanguageQualityScorer),
        Box::new(DetailRichnessScorer),
        Box::new(TimeManagementScorer),
    ]
}
