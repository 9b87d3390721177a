/*!
 * Batch evaluation of candidate speeches.
 *
 * Several generated speeches for the same deck are scored concurrently and
 * ranked. Every run is independent: candidates share only the immutable
 * evaluator and slide text, and a failing candidate never aborts the batch.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::evaluator::SpeechEvaluator;
use super::feedback::{Feedback, FeedbackGenerator};
use super::scores::EvaluationResult;
use crate::errors::EvaluationError;

/// A named speech payload to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display name, usually the file stem
    pub name: String,

    /// Raw speech payload
    pub payload: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }
}

/// A successfully scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluated {
    pub result: EvaluationResult,
    pub feedback: Feedback,
}

/// Outcome of one candidate, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateOutcome {
    /// Position in the input
    pub index: usize,

    pub name: String,

    pub evaluation: Result<Evaluated, EvaluationError>,
}

impl CandidateOutcome {
    pub fn score(&self) -> Option<f64> {
        self.evaluation.as_ref().ok().map(|e| e.result.overall_score)
    }
}

/// Concurrent evaluator for multiple candidates against one deck.
#[derive(Clone)]
pub struct BatchEvaluator {
    evaluator: Arc<SpeechEvaluator>,
    feedback: FeedbackGenerator,
    max_concurrent_evaluations: usize,
}

impl BatchEvaluator {
    /// Create a batch evaluator; the concurrency limit is at least 1.
    pub fn new(evaluator: SpeechEvaluator, max_concurrent_evaluations: usize) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
            feedback: FeedbackGenerator::new(),
            max_concurrent_evaluations: max_concurrent_evaluations.max(1),
        }
    }

    pub fn max_concurrent_evaluations(&self) -> usize {
        self.max_concurrent_evaluations
    }

    /// Evaluate every candidate on the blocking pool.
    ///
    /// `progress_callback(done, total)` runs after each completion. Outcomes
    /// come back in input order whatever the completion order.
    pub async fn evaluate_all(
        &self,
        slides: &str,
        candidates: Vec<Candidate>,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Vec<CandidateOutcome> {
        let total = candidates.len();
        let slides: Arc<str> = Arc::from(slides);
        let completed = Arc::new(AtomicUsize::new(0));

        info!(
            "Evaluating {} candidates ({} at a time)",
            total, self.max_concurrent_evaluations
        );

        let mut outcomes = stream::iter(candidates.into_iter().enumerate())
            .map(|(index, candidate)| {
                let evaluator = Arc::clone(&self.evaluator);
                let feedback = self.feedback;
                let slides = Arc::clone(&slides);
                let completed = Arc::clone(&completed);
                let progress_callback = progress_callback.clone();

                async move {
                    let Candidate { name, payload } = candidate;

                    let joined = tokio::task::spawn_blocking(move || {
                        evaluator.evaluate(&slides, &payload).map(|result| Evaluated {
                            feedback: feedback.generate(&result),
                            result,
                        })
                    })
                    .await;

                    let evaluation = match joined {
                        Ok(evaluation) => evaluation,
                        Err(e) => Err(EvaluationError::Aborted(e.to_string())),
                    };

                    match &evaluation {
                        Ok(evaluated) => debug!(
                            "Candidate '{}' scored {:.3}",
                            name, evaluated.result.overall_score
                        ),
                        Err(e) => warn!("Candidate '{}' failed: {}", name, e),
                    }

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(done, total);

                    CandidateOutcome {
                        index,
                        name,
                        evaluation,
                    }
                }
            })
            .buffer_unordered(self.max_concurrent_evaluations)
            .collect::<Vec<_>>()
            .await;

        outcomes.sort_by_key(|o| o.index);
        outcomes
    }
}

/// Successful outcomes by descending overall score; ties keep input order.
pub fn ranked(outcomes: &[CandidateOutcome]) -> Vec<(&CandidateOutcome, &Evaluated)> {
    let mut ranked: Vec<(&CandidateOutcome, &Evaluated)> = outcomes
        .iter()
        .filter_map(|o| o.evaluation.as_ref().ok().map(|e| (o, e)))
        .collect();

    ranked.sort_by(|a, b| b.1.result.overall_score.total_cmp(&a.1.result.overall_score));
    ranked
}

/// Failed outcomes with their errors, in input order.
pub fn failures(outcomes: &[CandidateOutcome]) -> Vec<(&CandidateOutcome, &EvaluationError)> {
    outcomes
        .iter()
        .filter_map(|o| o.evaluation.as_ref().err().map(|e| (o, e)))
        .collect()
}
