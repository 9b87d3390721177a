/*!
 * End-to-end tests of the evaluator on realistic and degenerate payloads
 */

use speecheval::evaluation::{DimensionWeights, PlanItem, ScriptItem};
use speecheval::{Dimension, EvaluationError, Grade, Metric, Rubric, SpeechDocument, SpeechEvaluator};

use crate::common::{self, OFF_TOPIC_SPEECH, SLIDES, SPEECH};

fn assert_well_formed(result: &speecheval::EvaluationResult) {
    assert_eq!(result.dimensions.len(), 5);
    for dimension in Dimension::ALL {
        let score = result.dimension(dimension).unwrap();
        assert_eq!(score.sub_metrics.len(), dimension.metrics().len());
        for (metric, value) in &score.sub_metrics {
            assert!((0.0..=1.0).contains(value), "{} out of range: {}", metric, value);
        }
        assert!((0.0..=1.0).contains(&score.overall_score));
    }
    assert!((0.0..=1.0).contains(&result.overall_score));
}

/// Test a full evaluation of the fixture speech
#[test]
fn test_evaluate_withFixture_shouldProduceConsistentResult() {
    common::init_logging();
    let result = SpeechEvaluator::new().evaluate(SLIDES, SPEECH).unwrap();

    assert_well_formed(&result);

    let expected: f64 = result
        .weights
        .iter()
        .map(|(d, w)| w * result.dimension_score(d))
        .sum();
    common::assert_close(result.overall_score, expected);
    assert_eq!(result.grade, Grade::from_score(result.overall_score));

    assert_eq!(result.metric(Metric::Coherence), Some(1.0));
    assert_eq!(result.metric(Metric::Transitions), Some(1.0));
    assert_eq!(result.metric(Metric::Organization), Some(1.0));
    assert_eq!(result.total_minutes, 6.0);
    assert_eq!(result.metric(Metric::DurationAppropriateness), Some(1.0));
}

/// Test that a faithful speech outscores an off-topic one
#[test]
fn test_evaluate_onTopicVersusOffTopic_shouldRankFaithfulSpeechHigher() {
    let evaluator = SpeechEvaluator::new();
    let faithful = evaluator.evaluate(SLIDES, SPEECH).unwrap();
    let off_topic = evaluator.evaluate(SLIDES, OFF_TOPIC_SPEECH).unwrap();

    assert!(faithful.overall_score > off_topic.overall_score);
    assert!(
        faithful.dimension_score(Dimension::ContentConsistency)
            > off_topic.dimension_score(Dimension::ContentConsistency)
    );
    assert_eq!(off_topic.weakest_dimension(), Some(Dimension::ContentConsistency));
}

/// Empty slide text: coverage is not penalized, expansion has nothing to expand
#[test]
fn test_evaluate_withEmptySlides_shouldFallBackToNeutralCoverage() {
    let payload = r#"{"script": [{"slide": 1, "text": "A speech about retrieval pipelines."}]}"#;
    let result = SpeechEvaluator::new().evaluate("", payload).unwrap();

    assert_eq!(result.metric(Metric::KeywordCoverage), Some(1.0));
    assert_eq!(result.metric(Metric::ConceptCoverage), Some(1.0));
    assert_eq!(result.metric(Metric::FactAccuracy), Some(1.0));
    assert_eq!(result.metric(Metric::ExpansionRatio), Some(0.0));
    assert_well_formed(&result);
}

/// A transition phrase in the second paragraph's leading clause counts as a hit
#[test]
fn test_evaluate_withConclusionTransition_shouldScoreFullTransitions() {
    let payload = r#"{
        "plan": [
            {"slide": 1, "title": "Intro", "duration": "1 minute"},
            {"slide": 2, "title": "Conclusion", "duration": "1 minute"}
        ],
        "script": [
            {"slide": 1, "text": "Let's begin with the problem."},
            {"slide": 2, "text": "In conclusion, the method works. Thanks."}
        ]
    }"#;
    let result = SpeechEvaluator::new().evaluate(SLIDES, payload).unwrap();

    assert_eq!(result.metric(Metric::Transitions), Some(1.0));
    assert_eq!(result.metric(Metric::Coherence), Some(1.0));
}

/// Plan durations [0.5, 0.5, 10]: every item is more than twice away from the mean
#[test]
fn test_evaluate_withUnevenDurations_shouldFlagExtremeItems() {
    let document = SpeechDocument::new(
        vec![
            PlanItem::new(1, "Intro", "30 seconds", ""),
            PlanItem::new(2, "Body", "0.5 minutes", ""),
            PlanItem::new(3, "Summary", "10 minutes", ""),
        ],
        vec![ScriptItem::new(1, "Hello."), ScriptItem::new(2, "Next."), ScriptItem::new(3, "Bye.")],
    );
    let result = SpeechEvaluator::new().evaluate_document(SLIDES, &document);

    // mean 11/3: 10 is above twice the mean, both 0.5 items below half of it
    assert_eq!(result.metric(Metric::PaceConsistency), Some(0.0));
    assert!(result.metric(Metric::TimeBalance).unwrap() < 0.5);
}

/// Degenerate payloads never fail and stay in range
#[test]
fn test_evaluate_withDegeneratePayloads_shouldStayInRange() {
    let evaluator = SpeechEvaluator::new();
    let payloads = [
        r#"{"script": []}"#,
        r#"{"plan": [], "script": [{}]}"#,
        r#"{"plan": [{"slide": 1}], "script": [{"slide": 1, "text": ""}]}"#,
        r#"{"plan": [{"duration": "5 hours"}], "script": [{"text": "!!! ... ???"}]}"#,
        "```json\n{\"script\": [{\"slide\": \"2\", \"text\": \"大家好，今天我们讨论事实核查。\"}]}\n```",
    ];

    for payload in payloads {
        for slides in ["", SLIDES] {
            let result = evaluator.evaluate(slides, payload).unwrap();
            assert_well_formed(&result);
        }
    }
}

/// Evaluation is a pure function of its inputs
#[test]
fn test_evaluate_repeated_shouldBeBitIdentical() {
    let first = SpeechEvaluator::new().evaluate(SLIDES, SPEECH).unwrap();
    let second = SpeechEvaluator::new().evaluate(SLIDES, SPEECH).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.overall_score.to_bits(), second.overall_score.to_bits());
    for dimension in Dimension::ALL {
        assert_eq!(
            first.dimension_score(dimension).to_bits(),
            second.dimension_score(dimension).to_bits()
        );
    }
}

/// Malformed payloads fail with structural errors
#[test]
fn test_evaluate_withMalformedPayload_shouldReturnError() {
    let evaluator = SpeechEvaluator::new();

    assert!(matches!(
        evaluator.evaluate(SLIDES, "Here is your speech!"),
        Err(EvaluationError::Parse { .. })
    ));
    assert!(matches!(
        evaluator.evaluate(SLIDES, r#"{"plan": []}"#),
        Err(EvaluationError::MissingScript { .. })
    ));
}

/// Custom weights change the aggregation but not the dimension scores
#[test]
fn test_evaluate_withCustomWeights_shouldReweightOverallScore() {
    let mut rubric = Rubric::default();
    rubric.weights = DimensionWeights::new(1.0, 0.0, 0.0, 0.0, 0.0).unwrap();
    let evaluator = SpeechEvaluator::with_rubric(rubric).unwrap();

    let custom = evaluator.evaluate(SLIDES, OFF_TOPIC_SPEECH).unwrap();
    let default = SpeechEvaluator::new().evaluate(SLIDES, OFF_TOPIC_SPEECH).unwrap();

    assert_eq!(custom.dimensions, default.dimensions);
    common::assert_close(custom.overall_score, custom.dimension_score(Dimension::ContentConsistency));
    assert!(custom.overall_score < default.overall_score);
}

/// A tuned domain-term list changes professionalism only
#[test]
fn test_evaluate_withDomainTerms_shouldAffectProfessionalism() {
    let mut rubric = Rubric::default();
    rubric.lexicon = rubric.lexicon.with_domain_terms(["Tomatoes", "Basil"]);
    let evaluator = SpeechEvaluator::with_rubric(rubric).unwrap();

    let result = evaluator.evaluate(SLIDES, OFF_TOPIC_SPEECH).unwrap();
    assert_eq!(result.metric(Metric::Professionalism), Some(1.0));
}
