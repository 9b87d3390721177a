/*!
 * Tests for suggestion and strength generation
 */

use speecheval::evaluation::feedback::closing_remark;
use speecheval::evaluation::rubric::{
    ALL_TARGETS_MET_MESSAGE, NO_STRENGTHS_MESSAGE, STRENGTH_RULES, SUGGESTION_RULES, TOP_CLOSING_REMARK,
};
use speecheval::evaluation::Priority;
use speecheval::{FeedbackGenerator, Metric};

use crate::common::result_with;

fn perfect(metric: Metric) -> f64 {
    if metric == Metric::HallucinationRisk { 0.0 } else { 1.0 }
}

fn failing(metric: Metric) -> f64 {
    if metric == Metric::HallucinationRisk { 1.0 } else { 0.0 }
}

/// Test feedback for a perfect result
#[test]
fn test_generate_withPerfectResult_shouldMeetAllTargets() {
    let result = result_with(perfect, 6.0);
    let feedback = FeedbackGenerator::new().generate(&result);

    assert!(feedback.all_targets_met());
    assert_eq!(feedback.suggestions.len(), 1);
    assert_eq!(feedback.suggestions[0].message, ALL_TARGETS_MET_MESSAGE);
    assert_eq!(feedback.suggestions[0].to_string(), ALL_TARGETS_MET_MESSAGE);
    assert_eq!(feedback.closing_remark, TOP_CLOSING_REMARK);
    assert_eq!(feedback.strengths.len(), STRENGTH_RULES.len());
}

/// Test feedback for a result failing every metric
#[test]
fn test_generate_withFailingResult_shouldFireEveryRuleInOrder() {
    let result = result_with(failing, 0.0);
    let feedback = FeedbackGenerator::new().generate(&result);

    assert!(!feedback.all_targets_met());
    assert_eq!(feedback.suggestions.len(), SUGGESTION_RULES.len());

    let metrics: Vec<Option<Metric>> = feedback.suggestions.iter().map(|s| s.metric).collect();
    let expected: Vec<Option<Metric>> = SUGGESTION_RULES.iter().map(|r| Some(r.metric)).collect();
    assert_eq!(metrics, expected);

    assert_eq!(feedback.suggestions[0].priority, Priority::High);
    assert!(feedback.suggestions[0].to_string().starts_with("[High] Keyword coverage"));
    assert_eq!(feedback.by_priority(Priority::High).count(), 4);

    assert_eq!(feedback.strengths, vec![NO_STRENGTHS_MESSAGE.to_string()]);
    assert!(feedback.closing_remark.starts_with("Overall: focus on content consistency"));
}

/// Test the duration suggestion message substitution
#[test]
fn test_suggestions_withDurationProblem_shouldRenderMinutesAndSeconds() {
    let result = result_with(
        |m| match m {
            Metric::DurationAppropriateness => 0.4,
            other => perfect(other),
        },
        12.5,
    );
    let suggestions = FeedbackGenerator::new().suggestions(&result);

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].priority, Priority::MediumLow);
    assert!(suggestions[0].message.contains("currently 12.5 minutes (750 seconds)"));
    assert!(suggestions[0].to_string().starts_with("[Medium-low]"));
}

/// Test that a middling metric emits neither a suggestion nor a strength
#[test]
fn test_feedback_withMiddlingKeywordCoverage_shouldStaySilent() {
    let result = result_with(
        |m| match m {
            Metric::KeywordCoverage => 0.65,
            other => perfect(other),
        },
        6.0,
    );
    let generator = FeedbackGenerator::new();

    assert!(generator.suggestions(&result).iter().all(|s| s.metric.is_none()));
    assert!(
        !generator
            .strengths(&result)
            .iter()
            .any(|s| s.starts_with("Keyword coverage"))
    );
}

/// Test closing remark band boundaries
#[test]
fn test_closingRemark_atBoundaries_shouldPickUpperBand() {
    assert!(closing_remark(0.0).contains("foundation"));
    assert!(closing_remark(0.6999).contains("foundation"));
    assert!(closing_remark(0.70).contains("polish"));
    assert!(closing_remark(0.8499).contains("polish"));
    assert_eq!(closing_remark(0.85), TOP_CLOSING_REMARK);
}

/// Test the feedback summary line
#[test]
fn test_summary_shouldCountSuggestionsAndStrengths() {
    let feedback = FeedbackGenerator::new().generate(&result_with(perfect, 6.0));
    assert_eq!(
        feedback.summary(),
        format!("0 suggestions (0 high priority), {} strengths", STRENGTH_RULES.len())
    );
}
