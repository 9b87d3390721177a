/*!
 * Common test utilities for the speecheval test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Slide text of a short lecture deck
pub const SLIDES: &str = "Introduction to Fact-Checking
Large language models can produce fluent but unsupported claims.
In 2023, automated fact-checking reached 87% accuracy on the FEVER benchmark.

Retrieval Pipeline
Evidence retrieval ranks documents by relevance before claim verification.
The pipeline combines dense retrieval with cross-encoder reranking.

Conclusion and Summary
Reliable evaluation needs both accuracy and explainability.";

/// Well-formed speech payload for `SLIDES`
pub const SPEECH: &str = r#"```json
{
  "plan": [
    {"slide": 1, "title": "Introduction to Fact-Checking", "duration": "2 minutes", "content": "Motivation"},
    {"slide": 2, "title": "Retrieval Pipeline", "duration": "2.5 minutes", "content": "How evidence is found"},
    {"slide": 3, "title": "Conclusion and Summary", "duration": "90 seconds", "content": "Wrap up"}
  ],
  "script": [
    {"slide": 1, "text": "Welcome everyone, let's begin. Large language models can produce fluent but unsupported claims, so we need fact-checking. In 2023, automated fact-checking reached 87% accuracy on the FEVER benchmark. This means that most claims can be verified automatically."},
    {"slide": 2, "text": "Next, let's look at the retrieval pipeline. For example, evidence retrieval ranks documents by relevance before claim verification. In other words, we first find the evidence and then check the claim. The pipeline combines dense retrieval with cross-encoder reranking, because precision matters in practice."},
    {"slide": 3, "text": "In conclusion, reliable evaluation needs both accuracy and explainability. To summarize, you can think of fact-checking as retrieval plus reasoning. Thank you for listening."}
  ]
}
```"#;

/// Speech that ignores the slides entirely
pub const OFF_TOPIC_SPEECH: &str = r#"{
  "plan": [
    {"slide": 3, "title": "Cooking", "duration": "40 minutes"},
    {"slide": 1, "title": "Gardening", "duration": "1 minute"}
  ],
  "script": [
    {"slide": 3, "text": "Tomatoes grow quickly during warm summers."},
    {"slide": 1, "text": "Basil pairs wonderfully with fresh mozzarella cheese."}
  ]
}"#;

/// Initializes env_logger once for tests that want log output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Asserts two floats are equal within 1e-9
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}

/// Builds a result whose sub-metrics come from `value_of`
pub fn result_with(
    value_of: impl Fn(speecheval::Metric) -> f64,
    total_minutes: f64,
) -> speecheval::EvaluationResult {
    use speecheval::evaluation::{DimensionScore, DimensionWeights};

    let dimensions = speecheval::Dimension::ALL
        .iter()
        .map(|d| DimensionScore::from_metrics(*d, d.metrics().iter().map(|m| (*m, value_of(*m)))))
        .collect();

    speecheval::EvaluationResult::from_dimensions(dimensions, DimensionWeights::default(), total_minutes, 3, 3)
}
