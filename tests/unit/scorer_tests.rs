/*!
 * Tests for the individual dimension scorers
 */

use speecheval::evaluation::content::{ContentConsistencyScorer, title_coverage};
use speecheval::evaluation::detail::{context_provision, expansion_ratio, phrase_density};
use speecheval::evaluation::language::{clarity, conversational, professionalism, vocabulary_richness};
use speecheval::evaluation::lexicon::{CONVERSATIONAL_MARKERS, Lexicon};
use speecheval::evaluation::structure::{StructureScorer, coherence, organization};
use speecheval::evaluation::timing::TimeManagementScorer;
use speecheval::evaluation::{DimensionScorer, EvaluationInput, PlanItem};
use speecheval::{Dimension, Metric, Rubric, SpeechDocument};

use crate::common::{self, OFF_TOPIC_SPEECH, SLIDES};

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Test content scoring of a speech that ignores the slides
#[test]
fn test_contentScorer_withOffTopicSpeech_shouldFlagEverything() {
    let rubric = Rubric::default();
    let doc = SpeechDocument::parse(OFF_TOPIC_SPEECH).unwrap();
    let input = EvaluationInput::new(SLIDES, &doc, &rubric);

    let score = ContentConsistencyScorer.score(&input);

    assert_eq!(score.dimension, Dimension::ContentConsistency);
    assert_eq!(score.metric(Metric::KeywordCoverage), Some(0.0));
    assert_eq!(score.metric(Metric::TitleCoverage), Some(0.0));
    common::assert_close(score.metric(Metric::HallucinationRisk).unwrap(), 1.0);
    assert!(score.overall_score < 0.2);
}

/// Test structure scoring of an out-of-order plan
#[test]
fn test_structureScorer_withReversedPlan_shouldPenalizeCoherence() {
    let rubric = Rubric::default();
    let doc = SpeechDocument::parse(OFF_TOPIC_SPEECH).unwrap();
    let input = EvaluationInput::new(SLIDES, &doc, &rubric);

    let score = StructureScorer.score(&input);

    common::assert_close(score.metric(Metric::Coherence).unwrap(), 1.0 / 3.0);
    assert_eq!(score.metric(Metric::Transitions), Some(0.0));
    common::assert_close(score.metric(Metric::Organization).unwrap(), 2.0 / 3.0);
    // two timed items are too few to judge balance
    assert_eq!(score.metric(Metric::TimeBalance), Some(1.0));
}

/// Test time scoring of an overlong two-item plan
#[test]
fn test_timeScorer_withOverlongPlan_shouldHitTheFloor() {
    let rubric = Rubric::default();
    let doc = SpeechDocument::parse(OFF_TOPIC_SPEECH).unwrap();
    let input = EvaluationInput::new(SLIDES, &doc, &rubric);

    let score = TimeManagementScorer.score(&input);

    assert_eq!(score.metric(Metric::DurationAppropriateness), Some(0.4));
    assert_eq!(score.metric(Metric::TimeDistribution), Some(1.0));
    assert_eq!(score.metric(Metric::PaceConsistency), Some(0.5));
}

/// Test time scoring with no durations at all
#[test]
fn test_timeScorer_withUntimedPlan_shouldStayNeutralForPace() {
    common::init_logging();
    let rubric = Rubric::default();
    let doc = SpeechDocument::new(
        vec![PlanItem::new(1, "Intro", "", ""), PlanItem::new(2, "End", "soon", "")],
        vec![],
    );
    let input = EvaluationInput::new("", &doc, &rubric);

    let score = TimeManagementScorer.score(&input);

    assert_eq!(score.metric(Metric::TimeDistribution), Some(1.0));
    assert_eq!(score.metric(Metric::PaceConsistency), Some(1.0));
    // zero minutes for two items is below the band
    assert_eq!(score.metric(Metric::DurationAppropriateness), Some(0.0));
}

/// Test coherence and organization on small plans
#[test]
fn test_structureFunctions_withSmallPlans_shouldScoreShape() {
    assert_eq!(coherence(&[1, 2, 3], &[1, 2, 3]), 1.0);
    common::assert_close(coherence(&[1, 2, 3], &[1]), (1.0 + 1.0 + 1.0 / 3.0) / 3.0);
    assert_eq!(coherence(&[], &[]), 1.0);

    let lexicon = Lexicon::default();
    let plan = vec![
        PlanItem::new(1, "Introduction", "1 minute", ""),
        PlanItem::new(2, "Method", "2 minutes", ""),
        PlanItem::new(3, "Summary", "1 minute", ""),
    ];
    assert_eq!(
        organization(&plan, &lexicon.intro_title_markers, &lexicon.conclusion_title_markers),
        1.0
    );
    assert_eq!(
        organization(&[], &lexicon.intro_title_markers, &lexicon.conclusion_title_markers),
        0.0
    );
}

/// Test title coverage against the four-character floor
#[test]
fn test_titleCoverage_withShortWords_shouldRequireLongWordMatches() {
    let plan = vec![
        PlanItem::new(1, "Retrieval Pipeline", "", ""),
        PlanItem::new(2, "Q&A", "", ""),
        PlanItem::new(3, "", "", ""),
    ];
    let speech = "we discuss the retrieval pipeline and take questions";

    // "q&a" has no long word, so it can never be covered; the empty title is ignored
    common::assert_close(title_coverage(&plan, speech, 4, 0.5), 0.5);
    assert_eq!(title_coverage(&[], speech, 4, 0.5), 1.0);
}

/// Test language metrics on degenerate and typical text
#[test]
fn test_languageFunctions_shouldScoreAgainstBands() {
    let curves = Rubric::default().curves;
    let markers = owned(CONVERSATIONAL_MARKERS);

    assert_eq!(clarity("", &curves.sentence_length), 0.0);
    assert_eq!(
        clarity("one two three four five six seven eight nine ten eleven twelve.", &curves.sentence_length),
        1.0
    );
    assert_eq!(vocabulary_richness("", &curves.type_token_ratio), 0.0);

    // two marker words out of four is far above the ideal rate
    assert_eq!(conversational("let's go now together", &markers, &curves.conversational_rate), 0.5);
    assert_eq!(conversational("", &markers, &curves.conversational_rate), 0.0);
}

/// Test professionalism saturation
#[test]
fn test_professionalism_withCustomTerms_shouldSaturateAtFraction() {
    let terms = owned(&["retrieval", "reranking", "benchmark", "dense"]);
    assert_eq!(professionalism("dense retrieval", &terms, 0.5), 1.0);
    assert_eq!(professionalism("dense only", &terms, 0.5), 0.5);
    assert_eq!(professionalism("anything", &[], 0.5), 1.0);
}

/// Test detail metrics
#[test]
fn test_detailFunctions_shouldCountPhrases() {
    let curves = Rubric::default().curves;

    assert_eq!(expansion_ratio("", "a long speech", &curves.expansion_ratio), 0.0);
    assert_eq!(expansion_ratio("one two", "a b c d", &curves.expansion_ratio), 1.0);

    let phrases = owned(&["for example"]);
    // nine items expect two examples
    assert_eq!(phrase_density("for example here", &phrases, 9, 4.5), 0.5);
    assert_eq!(phrase_density("nothing", &phrases, 1, 4.5), 0.0);

    let keywords = owned(&["why", "goal"]);
    assert_eq!(context_provision("why and goal", &keywords, 4.0), 0.5);
}
