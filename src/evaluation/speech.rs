/*!
 * Speech plan and script records.
 *
 * A speech payload is JSON with two arrays:
 *
 * ```json
 * {
 *   "plan":   [{"slide": 1, "title": "Intro", "duration": "90 seconds", "content": "..."}],
 *   "script": [{"slide": 1, "text": "Hello everyone..."}]
 * }
 * ```
 *
 * Generated payloads are often wrapped in a Markdown code fence and are
 * loosely typed, so every item field is optional and falls back to a
 * documented default instead of failing the parse.
 */

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::text::parse_duration;
use crate::errors::EvaluationError;

/// Duration assumed for plan items that carry none.
pub const DEFAULT_DURATION: &str = "0 minute";

/// One planned section of the talk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanItem {
    /// Slide this section covers
    #[serde(rename = "slide", deserialize_with = "lenient_index")]
    pub slide_index: i64,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    /// Free-form duration such as "90 seconds" or "1.5 minutes"
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    duration: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

impl PlanItem {
    pub fn new(slide_index: i64, title: &str, duration: &str, content: &str) -> Self {
        Self {
            slide_index,
            title: Some(title.to_string()),
            duration: Some(duration.to_string()),
            content: Some(content.to_string()),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn duration(&self) -> &str {
        self.duration.as_deref().unwrap_or(DEFAULT_DURATION)
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Parsed duration in minutes; 0.0 means unspecified.
    pub fn minutes(&self) -> f64 {
        parse_duration(self.duration())
    }
}

/// The spoken text for one slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptItem {
    #[serde(rename = "slide", deserialize_with = "lenient_index")]
    pub slide_index: i64,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl ScriptItem {
    pub fn new(slide_index: i64, text: &str) -> Self {
        Self {
            slide_index,
            text: Some(text.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// A parsed speech: the ordered plan and the ordered script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechDocument {
    pub plan: Vec<PlanItem>,
    pub script: Vec<ScriptItem>,
}

impl SpeechDocument {
    pub fn new(plan: Vec<PlanItem>, script: Vec<ScriptItem>) -> Self {
        Self { plan, script }
    }

    /// Parse a raw speech payload, tolerating a surrounding code fence.
    ///
    /// Fails with [`EvaluationError::Parse`] when the payload is not JSON and
    /// with [`EvaluationError::MissingScript`] when there is no `script` array.
    pub fn parse(payload: &str) -> Result<Self, EvaluationError> {
        let body = strip_code_fence(payload);

        let value: Value = serde_json::from_str(body)
            .map_err(|e| EvaluationError::parse(e.to_string(), payload))?;

        let Value::Object(mut root) = value else {
            return Err(EvaluationError::missing_script(payload));
        };

        let script = match root.remove("script") {
            Some(Value::Array(items)) => items.into_iter().map(item_from_value).collect(),
            _ => return Err(EvaluationError::missing_script(payload)),
        };

        let plan = match root.remove("plan") {
            Some(Value::Array(items)) => items.into_iter().map(item_from_value).collect(),
            _ => Vec::new(),
        };

        let document = Self { plan, script };
        debug!(
            "Parsed speech payload: {} plan items, {} script items",
            document.plan.len(),
            document.script.len()
        );

        Ok(document)
    }

    /// All script texts joined with single spaces.
    pub fn speech_text(&self) -> String {
        self.script
            .iter()
            .map(ScriptItem::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parsed duration of every plan item, in plan order.
    pub fn durations(&self) -> Vec<f64> {
        self.plan.iter().map(PlanItem::minutes).collect()
    }

    /// Durations of the items that specify one (> 0), in plan order.
    pub fn timed_durations(&self) -> Vec<f64> {
        self.durations().into_iter().filter(|d| *d > 0.0).collect()
    }

    /// Sum of all plan durations, in minutes.
    pub fn total_minutes(&self) -> f64 {
        self.durations().iter().sum()
    }

    pub fn plan_slides(&self) -> Vec<i64> {
        self.plan.iter().map(|p| p.slide_index).collect()
    }

    pub fn script_slides(&self) -> Vec<i64> {
        self.script.iter().map(|s| s.slide_index).collect()
    }
}

/// Remove a Markdown code fence (```json ... ``` or ``` ... ```) around a payload.
pub fn strip_code_fence(payload: &str) -> &str {
    let mut body = payload.trim();

    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    }
    if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

// Entries that are not objects become all-default items.
fn item_from_value<T>(value: Value) -> T
where
    T: Default + for<'de> Deserialize<'de>,
{
    serde_json::from_value(value).unwrap_or_default()
}

fn lenient_index<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(index_from_value(&value))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Slide index from an integer, a float or a numeric string; 0 otherwise.
fn index_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}
