/*!
 * Report rendering and export.
 *
 * - Text report: dimension bars, per-metric pass/fail marks, suggestions, strengths
 * - Comparison report: ranked candidates from a batch run
 * - JSON and CSV exports of a single result
 * - Length analysis report
 */

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::analysis::{LengthAnalysis, TextProfile};
use super::batch::{CandidateOutcome, failures, ranked};
use super::feedback::Feedback;
use super::rubric::{TOTAL_MINUTES_TARGET, Threshold, report_target};
use super::scores::{Dimension, EvaluationResult};

const RULE_WIDTH: usize = 70;

/// Presentation options for the text report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Number of cells in a dimension bar
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    /// Whether to list strengths
    #[serde(default = "default_true")]
    pub show_strengths: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            show_strengths: default_true(),
        }
    }
}

fn default_bar_width() -> usize {
    40
}

fn default_true() -> bool {
    true
}

/// Output format of a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ExportFormat {
    /// File extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Render one evaluation in the requested format.
pub fn render(
    format: ExportFormat,
    result: &EvaluationResult,
    feedback: &Feedback,
    options: &ReportOptions,
) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(render_text(result, feedback, options)),
        ExportFormat::Json => render_json(result, feedback),
        ExportFormat::Csv => render_csv(result),
    }
}

/// A score bar of `width` cells.
pub fn render_bar(score: f64, width: usize) -> String {
    let filled = ((score.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", rule('='));
}

fn target_mark(value: f64, threshold: Threshold) -> String {
    let mark = if threshold.is_met(value) { "✓" } else { "✗" };
    format!("{} (target {} {})", mark, threshold.symbol(), percent(threshold.limit()))
}

/// The full text report.
pub fn render_text(result: &EvaluationResult, feedback: &Feedback, options: &ReportOptions) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "{:^width$}", "Speech Quality Evaluation Report", width = RULE_WIDTH);
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out);

    let _ = writeln!(out, "Overall score:  {}", percent(result.overall_score));
    let _ = writeln!(out, "Grade:          {} ({})", result.grade, result.grade.descriptor());
    let _ = writeln!(
        out,
        "Duration:       {:.1} minutes ({} seconds)",
        result.total_minutes,
        (result.total_minutes * 60.0) as u64
    );
    let _ = writeln!(out, "Plan items:     {}", result.plan_items);
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", rule('-'));
    let _ = writeln!(out, "Dimension overview");
    let _ = writeln!(out, "{}", rule('-'));
    for (dimension, weight) in result.weights.iter() {
        let score = result.dimension_score(dimension);
        let _ = writeln!(
            out,
            "{:<20} ({:>3.0}%) [{}] {}",
            dimension.label(),
            weight * 100.0,
            render_bar(score, options.bar_width),
            percent(score)
        );
    }
    let _ = writeln!(out);

    heading(&mut out, "Detailed analysis");
    let _ = writeln!(out);

    for (position, (dimension, weight)) in result.weights.iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}. {}] weight {:.0}%",
            position + 1,
            dimension.label(),
            weight * 100.0
        );
        let _ = writeln!(out, "{}", rule('-'));

        if dimension == Dimension::TimeManagement {
            let (low, high) = TOTAL_MINUTES_TARGET;
            let in_range = (low..=high).contains(&result.total_minutes);
            let _ = writeln!(
                out,
                "  {:<24} {:.1} minutes  {} (target {}-{} minutes)",
                "Total duration",
                result.total_minutes,
                if in_range { "✓" } else { "⚠" },
                low,
                high
            );
        }

        if let Some(score) = result.dimension(dimension) {
            for metric in dimension.metrics() {
                let Some(value) = score.metric(*metric) else {
                    continue;
                };
                let mark = report_target(*metric)
                    .map(|t| target_mark(value, t))
                    .unwrap_or_default();
                let _ = writeln!(out, "  {:<24} {:>6}  {}", metric.label(), percent(value), mark);
            }
            let _ = writeln!(out, "  {:<24} {:>6}", "Dimension score", percent(score.overall_score));
        }
        let _ = writeln!(out);
    }

    heading(&mut out, "Suggestions");
    for (i, suggestion) in feedback.suggestions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, suggestion);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", feedback.closing_remark);
    let _ = writeln!(out);

    if options.show_strengths {
        heading(&mut out, "Strengths");
        for strength in &feedback.strengths {
            let _ = writeln!(out, "  • {}", strength);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", rule('='));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    result: &'a EvaluationResult,
    feedback: &'a Feedback,
}

/// Pretty JSON of the result and its feedback.
pub fn render_json(result: &EvaluationResult, feedback: &Feedback) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport { result, feedback })
        .context("Failed to serialize evaluation result")
}

/// `dimension,metric,score` rows, one per sub-metric.
pub fn render_csv(result: &EvaluationResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["dimension", "metric", "score"])
        .context("Failed to write CSV header")?;

    for (dimension, score) in &result.dimensions {
        for (metric, value) in &score.sub_metrics {
            let value = format!("{:.4}", value);
            writer
                .write_record([dimension.key(), metric.key(), value.as_str()])
                .context("Failed to write CSV row")?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Ranking table of a batch run; failed candidates are listed after it.
pub fn render_comparison(outcomes: &[CandidateOutcome]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "{:^width$}", "Speech Comparison Report", width = RULE_WIDTH);
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>4} {:<20} {:>7} {:<5} {:>8} {:>9} {:>8} {:>7} {:>7}",
        "Rank", "Candidate", "Score", "Grade", "Content", "Structure", "Language", "Detail", "Time"
    );
    let _ = writeln!(out, "{}", rule('-'));

    for (rank, (outcome, evaluated)) in ranked(outcomes).into_iter().enumerate() {
        let result = &evaluated.result;
        let score = |d: Dimension| percent(result.dimension_score(d));
        let _ = writeln!(
            out,
            "{:>3}. {:<20} {:>7} {:<5} {:>8} {:>9} {:>8} {:>7} {:>7}",
            rank + 1,
            truncate(&outcome.name, 20),
            percent(result.overall_score),
            result.grade.label(),
            score(Dimension::ContentConsistency),
            score(Dimension::Structure),
            score(Dimension::LanguageQuality),
            score(Dimension::DetailRichness),
            score(Dimension::TimeManagement)
        );
    }

    let failed = failures(outcomes);
    if !failed.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Failed candidates:");
        for (outcome, error) in failed {
            let _ = writeln!(out, "  - {}: {}", outcome.name, error);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule('='));
    out
}

fn truncate(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        let head: String = name.chars().take(max_chars - 1).collect();
        format!("{}…", head)
    }
}

/// Text rendering of a length analysis.
pub fn render_analysis(analysis: &LengthAnalysis) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "{:^width$}", "Text Length Analysis", width = RULE_WIDTH);
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out);

    profile_section(&mut out, "Slides", &analysis.slides);
    profile_section(&mut out, "Speech", &analysis.speech);

    let _ = writeln!(out, "[Payload]");
    let _ = writeln!(out, "  Characters:          {}", analysis.payload_characters);
    let _ = writeln!(out, "  Plan items:          {}", analysis.plan_items);
    let _ = writeln!(out, "  Script items:        {}", analysis.script_item_characters.len());
    let _ = writeln!(out, "  Words per item:      {:.1}", analysis.words_per_item());
    match analysis.expansion_ratio {
        Some(ratio) => {
            let _ = writeln!(out, "  Expansion ratio:     {:.2}x", ratio);
        }
        None => {
            let _ = writeln!(out, "  Expansion ratio:     n/a (no slide words)");
        }
    }
    if let Some((index, chars)) = analysis.longest_item() {
        let _ = writeln!(out, "  Longest item:        #{} ({} characters)", index + 1, chars);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "[Script items]");
    for (i, chars) in analysis.script_item_characters.iter().enumerate() {
        let _ = writeln!(out, "  Script {:>3}: {} characters", i + 1, chars);
    }
    let _ = writeln!(out, "{}", rule('='));
    out
}

fn profile_section(out: &mut String, title: &str, profile: &TextProfile) {
    let _ = writeln!(out, "[{}]", title);
    let _ = writeln!(out, "  Characters:          {}", profile.characters);
    let _ = writeln!(out, "  Lines:               {}", profile.lines);
    let _ = writeln!(out, "  Words:               {}", profile.words);
    let _ = writeln!(out, "  CJK characters:      {}", profile.cjk_characters);
    let _ = writeln!(out, "  Sentences:           {}", profile.sentences);
    let _ = writeln!(out, "  Distinct keywords:   {}", profile.distinct_keywords);
    let _ = writeln!(out);
}
