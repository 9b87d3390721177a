/*!
 * # speecheval - Rubric-based speech script evaluation
 *
 * A Rust library for scoring a generated speech script against the slide
 * deck it was written for.
 *
 * ## Features
 *
 * - Five scored dimensions:
 *   - Content consistency (keywords, concepts, titles, facts, hallucination risk)
 *   - Structure (slide order, time balance, transitions, organization)
 *   - Language quality (clarity, conversational tone, vocabulary, terminology)
 *   - Detail richness (expansion, examples, explanations, context)
 *   - Time management (total duration, distribution, pace)
 * - Weighted overall score with letter grade
 * - Prioritized suggestions and strengths
 * - Text, JSON and CSV reports
 * - Concurrent comparison of several candidate speeches
 *
 * Scoring is purely lexical and statistical: deterministic, reproducible,
 * and free of any model calls.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `evaluation`: the scoring engine
 *   - `evaluation::text`: text analysis toolkit
 *   - `evaluation::rubric`: weights, curves and thresholds
 *   - `evaluation::evaluator`: runs the dimension scorers and aggregates
 *   - `evaluation::feedback`: suggestion and strength generation
 *   - `evaluation::batch`: concurrent candidate evaluation
 *   - `evaluation::report`: report rendering and export
 * - `app_config`: Configuration management
 * - `app_controller`: Command orchestration used by the CLI
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Add other lints you want to allow but not auto-fix

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod evaluation;
pub mod file_utils;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, EvaluationError};
pub use evaluation::{
    BatchEvaluator, Candidate, Dimension, EvaluationResult, Feedback, FeedbackGenerator, Grade, Metric,
    Rubric, SpeechDocument, SpeechEvaluator,
};
