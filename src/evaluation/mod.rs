/*!
 * Speech evaluation engine.
 *
 * Scores a speech plan and script against the slide text it was written for:
 * - **Text**: keyword/concept extraction, coverage, duration parsing
 * - **Scorers**: content consistency, structure, language quality,
 *   detail richness and time management
 * - **Rubric**: weights, scoring curves and feedback thresholds
 * - **Feedback**: prioritized suggestions and strengths
 * - **Batch**: concurrent comparison of candidate speeches
 * - **Report**: text, JSON and CSV rendering
 */

pub mod analysis;
pub mod batch;
pub mod content;
pub mod detail;
pub mod evaluator;
pub mod feedback;
pub mod language;
pub mod lexicon;
pub mod report;
pub mod rubric;
pub mod scores;
pub mod speech;
pub mod structure;
pub mod text;
pub mod timing;

// Re-export main types
pub use analysis::{LengthAnalysis, TextProfile};
pub use batch::{BatchEvaluator, Candidate, CandidateOutcome, Evaluated};
pub use evaluator::{DimensionScorer, EvaluationInput, SpeechEvaluator};
pub use feedback::{Feedback, FeedbackGenerator, Priority, Suggestion};
pub use lexicon::Lexicon;
pub use report::{ExportFormat, ReportOptions};
pub use rubric::{DimensionWeights, IdealBand, Rubric, ScoringCurves, Threshold};
pub use scores::{Dimension, DimensionScore, EvaluationResult, Grade, Metric};
pub use speech::{PlanItem, ScriptItem, SpeechDocument};
