/*!
 * Feedback generation from evaluation results.
 *
 * Feedback is fully deterministic: the deficiency and strength rule tables
 * of the rubric are walked in order and every rule whose threshold the
 * relevant metric crosses contributes its fixed message.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rubric::{
    ALL_TARGETS_MET_MESSAGE, CLOSING_REMARKS, FeedbackRule, NO_STRENGTHS_MESSAGE, STRENGTH_RULES,
    SUGGESTION_RULES, StrengthRule, TOP_CLOSING_REMARK,
};
use super::scores::{EvaluationResult, Metric};

/// Urgency of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    MediumLow,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::MediumLow => "Medium-low",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One improvement suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Urgency
    pub priority: Priority,

    /// Metric that triggered it; `None` for the all-targets-met message
    pub metric: Option<Metric>,

    pub message: String,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.metric {
            Some(_) => write!(f, "[{}] {}", self.priority, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Suggestions, closing remark and strengths for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Suggestions in rule order
    pub suggestions: Vec<Suggestion>,

    /// Remark keyed on the overall score
    pub closing_remark: String,

    /// Strength messages in rule order
    pub strengths: Vec<String>,
}

impl Feedback {
    /// Whether every metric met its deficiency threshold.
    pub fn all_targets_met(&self) -> bool {
        self.suggestions.iter().all(|s| s.metric.is_none())
    }

    /// Suggestions of a given priority.
    pub fn by_priority(&self, priority: Priority) -> impl Iterator<Item = &Suggestion> {
        self.suggestions
            .iter()
            .filter(move |s| s.metric.is_some() && s.priority == priority)
    }

    /// Get summary string.
    pub fn summary(&self) -> String {
        let high = self.by_priority(Priority::High).count();
        format!(
            "{} suggestions ({} high priority), {} strengths",
            self.suggestions.iter().filter(|s| s.metric.is_some()).count(),
            high,
            self.strengths.len()
        )
    }
}

/// Turns evaluation results into feedback.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackGenerator {
    suggestion_rules: &'static [FeedbackRule],
    strength_rules: &'static [StrengthRule],
}

impl FeedbackGenerator {
    pub fn new() -> Self {
        Self {
            suggestion_rules: SUGGESTION_RULES,
            strength_rules: STRENGTH_RULES,
        }
    }

    /// Generate the complete feedback for a result.
    pub fn generate(&self, result: &EvaluationResult) -> Feedback {
        Feedback {
            suggestions: self.suggestions(result),
            closing_remark: closing_remark(result.overall_score).to_string(),
            strengths: self.strengths(result),
        }
    }

    /// Deficiency suggestions; a single all-targets-met entry when none fire.
    pub fn suggestions(&self, result: &EvaluationResult) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = self
            .suggestion_rules
            .iter()
            .filter(|rule| fires(result, rule.metric, |v| rule.trigger.is_met(v)))
            .map(|rule| Suggestion {
                priority: rule.priority,
                metric: Some(rule.metric),
                message: render_message(rule.message, result.total_minutes),
            })
            .collect();

        if suggestions.is_empty() {
            suggestions.push(Suggestion {
                priority: Priority::Low,
                metric: None,
                message: ALL_TARGETS_MET_MESSAGE.to_string(),
            });
        }

        suggestions
    }

    /// Strength messages; a single keep-working entry when none fire.
    pub fn strengths(&self, result: &EvaluationResult) -> Vec<String> {
        let strengths: Vec<String> = self
            .strength_rules
            .iter()
            .filter(|rule| fires(result, rule.metric, |v| rule.trigger.is_met(v)))
            .map(|rule| rule.message.to_string())
            .collect();

        if strengths.is_empty() {
            vec![NO_STRENGTHS_MESSAGE.to_string()]
        } else {
            strengths
        }
    }
}

impl Default for FeedbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Closing remark for an overall score.
pub fn closing_remark(overall_score: f64) -> &'static str {
    CLOSING_REMARKS
        .iter()
        .find(|(upper, _)| overall_score < *upper)
        .map(|(_, remark)| *remark)
        .unwrap_or(TOP_CLOSING_REMARK)
}

fn fires(result: &EvaluationResult, metric: Metric, test: impl Fn(f64) -> bool) -> bool {
    result.metric(metric).is_some_and(test)
}

fn render_message(template: &str, total_minutes: f64) -> String {
    template
        .replace("{minutes}", &format!("{:.1}", total_minutes))
        .replace("{seconds}", &format!("{:.0}", total_minutes * 60.0))
}
