/*!
 * Tests for speech payload parsing
 */

use speecheval::evaluation::{PlanItem, ScriptItem};
use speecheval::{EvaluationError, SpeechDocument};

use crate::common::{OFF_TOPIC_SPEECH, SPEECH};

/// Test parsing the fenced fixture payload
#[test]
fn test_parse_withFencedFixture_shouldReadPlanAndScript() {
    let doc = SpeechDocument::parse(SPEECH).unwrap();

    assert_eq!(doc.plan.len(), 3);
    assert_eq!(doc.script.len(), 3);
    assert_eq!(doc.plan_slides(), vec![1, 2, 3]);
    assert_eq!(doc.script_slides(), vec![1, 2, 3]);
    assert_eq!(doc.durations(), vec![2.0, 2.5, 1.5]);
    assert_eq!(doc.total_minutes(), 6.0);
    assert_eq!(doc.plan[2].title(), "Conclusion and Summary");
}

/// Test that the joined speech text keeps script order
#[test]
fn test_speechText_shouldJoinScriptItemsInOrder() {
    let doc = SpeechDocument::parse(OFF_TOPIC_SPEECH).unwrap();
    assert_eq!(
        doc.speech_text(),
        "Tomatoes grow quickly during warm summers. Basil pairs wonderfully with fresh mozzarella cheese."
    );
    assert_eq!(doc.plan_slides(), vec![3, 1]);
}

/// Test that non-object entries degrade to default items
#[test]
fn test_parse_withNonObjectItems_shouldUseDefaultItems() {
    let doc = SpeechDocument::parse(r#"{"plan": [42, "x"], "script": [null, {"slide": 2, "text": "hi"}]}"#).unwrap();

    assert_eq!(doc.plan, vec![PlanItem::default(), PlanItem::default()]);
    assert_eq!(doc.script[0], ScriptItem::default());
    assert_eq!(doc.script[1].text(), "hi");
    assert_eq!(doc.total_minutes(), 0.0);
}

/// Test that an empty script is valid
#[test]
fn test_parse_withEmptyScript_shouldSucceed() {
    let doc = SpeechDocument::parse(r#"{"plan": [], "script": []}"#).unwrap();
    assert!(doc.script.is_empty());
    assert_eq!(doc.speech_text(), "");
}

/// Test error classification of malformed payloads
#[test]
fn test_parse_withMalformedPayloads_shouldClassifyErrors() {
    let truncated = SpeechDocument::parse(r#"{"script": [{"slide": 1"#).unwrap_err();
    assert!(matches!(truncated, EvaluationError::Parse { .. }));
    assert!(truncated.is_malformed_input());

    let wrong_shape = SpeechDocument::parse(r#"{"plan": [], "script": {"slide": 1}}"#).unwrap_err();
    assert!(matches!(wrong_shape, EvaluationError::MissingScript { .. }));
}

/// Test that a parsed document serializes back with the payload field names
#[test]
fn test_serialize_shouldUsePayloadFieldNames() {
    let doc = SpeechDocument::new(
        vec![PlanItem::new(1, "Intro", "1 minute", "")],
        vec![ScriptItem::new(1, "Hello")],
    );
    let json = serde_json::to_string(&doc).unwrap();
    assert!(json.contains(r#""slide":1"#));
    assert!(json.contains(r#""duration":"1 minute""#));

    assert_eq!(SpeechDocument::parse(&json).unwrap(), doc);
}
