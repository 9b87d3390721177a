/*!
 * Score types for speech evaluation.
 *
 * Provides the per-dimension breakdown and the aggregated verdict:
 * - Dimensions: content consistency, structure, language quality,
 *   detail richness, time management
 * - Metrics: the named sub-metrics each dimension averages
 * - Grades: strict-descending letter lookup on the weighted score
 */

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::rubric::DimensionWeights;

/// One of the five scored dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Fidelity of the speech to the slides
    ContentConsistency,
    /// Ordering, pacing balance, transitions, organization
    Structure,
    /// Sentence length, register, vocabulary, terminology
    LanguageQuality,
    /// Elaboration, examples, explanations, context
    DetailRichness,
    /// Total duration and its distribution
    TimeManagement,
}

impl Dimension {
    /// All dimensions in priority order.
    pub const ALL: [Dimension; 5] = [
        Dimension::ContentConsistency,
        Dimension::Structure,
        Dimension::LanguageQuality,
        Dimension::DetailRichness,
        Dimension::TimeManagement,
    ];

    /// Stable snake_case identifier.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::ContentConsistency => "content_consistency",
            Dimension::Structure => "structure",
            Dimension::LanguageQuality => "language_quality",
            Dimension::DetailRichness => "detail_richness",
            Dimension::TimeManagement => "time_management",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::ContentConsistency => "Content consistency",
            Dimension::Structure => "Structure",
            Dimension::LanguageQuality => "Language quality",
            Dimension::DetailRichness => "Detail richness",
            Dimension::TimeManagement => "Time management",
        }
    }

    /// The sub-metrics belonging to this dimension, in report order.
    pub fn metrics(&self) -> &'static [Metric] {
        match self {
            Dimension::ContentConsistency => &[
                Metric::KeywordCoverage,
                Metric::ConceptCoverage,
                Metric::TitleCoverage,
                Metric::FactAccuracy,
                Metric::HallucinationRisk,
            ],
            Dimension::Structure => &[
                Metric::Coherence,
                Metric::TimeBalance,
                Metric::Transitions,
                Metric::Organization,
            ],
            Dimension::LanguageQuality => &[
                Metric::Clarity,
                Metric::Conversational,
                Metric::VocabularyRichness,
                Metric::Professionalism,
            ],
            Dimension::DetailRichness => &[
                Metric::ExpansionRatio,
                Metric::ExampleUsage,
                Metric::ExplanationQuality,
                Metric::ContextProvision,
            ],
            Dimension::TimeManagement => &[
                Metric::DurationAppropriateness,
                Metric::TimeDistribution,
                Metric::PaceConsistency,
            ],
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A named sub-metric, always valued in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    KeywordCoverage,
    ConceptCoverage,
    TitleCoverage,
    FactAccuracy,
    HallucinationRisk,
    Coherence,
    TimeBalance,
    Transitions,
    Organization,
    Clarity,
    Conversational,
    VocabularyRichness,
    Professionalism,
    ExpansionRatio,
    ExampleUsage,
    ExplanationQuality,
    ContextProvision,
    DurationAppropriateness,
    TimeDistribution,
    PaceConsistency,
}

impl Metric {
    /// Stable snake_case identifier.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::KeywordCoverage => "keyword_coverage",
            Metric::ConceptCoverage => "concept_coverage",
            Metric::TitleCoverage => "title_coverage",
            Metric::FactAccuracy => "fact_accuracy",
            Metric::HallucinationRisk => "hallucination_risk",
            Metric::Coherence => "coherence",
            Metric::TimeBalance => "time_balance",
            Metric::Transitions => "transitions",
            Metric::Organization => "organization",
            Metric::Clarity => "clarity",
            Metric::Conversational => "conversational",
            Metric::VocabularyRichness => "vocabulary_richness",
            Metric::Professionalism => "professionalism",
            Metric::ExpansionRatio => "expansion_ratio",
            Metric::ExampleUsage => "example_usage",
            Metric::ExplanationQuality => "explanation_quality",
            Metric::ContextProvision => "context_provision",
            Metric::DurationAppropriateness => "duration_appropriateness",
            Metric::TimeDistribution => "time_distribution",
            Metric::PaceConsistency => "pace_consistency",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::KeywordCoverage => "Keyword coverage",
            Metric::ConceptCoverage => "Concept coverage",
            Metric::TitleCoverage => "Title coverage",
            Metric::FactAccuracy => "Fact accuracy",
            Metric::HallucinationRisk => "Hallucination risk",
            Metric::Coherence => "Coherence",
            Metric::TimeBalance => "Time balance",
            Metric::Transitions => "Transitions",
            Metric::Organization => "Organization",
            Metric::Clarity => "Clarity",
            Metric::Conversational => "Conversational tone",
            Metric::VocabularyRichness => "Vocabulary richness",
            Metric::Professionalism => "Professionalism",
            Metric::ExpansionRatio => "Expansion ratio",
            Metric::ExampleUsage => "Example usage",
            Metric::ExplanationQuality => "Explanation quality",
            Metric::ContextProvision => "Context provision",
            Metric::DurationAppropriateness => "Duration fit",
            Metric::TimeDistribution => "Time distribution",
            Metric::PaceConsistency => "Pace consistency",
        }
    }

    /// Dimension this metric feeds.
    pub fn dimension(&self) -> Dimension {
        match self {
            Metric::KeywordCoverage
            | Metric::ConceptCoverage
            | Metric::TitleCoverage
            | Metric::FactAccuracy
            | Metric::HallucinationRisk => Dimension::ContentConsistency,
            Metric::Coherence | Metric::TimeBalance | Metric::Transitions | Metric::Organization => {
                Dimension::Structure
            }
            Metric::Clarity
            | Metric::Conversational
            | Metric::VocabularyRichness
            | Metric::Professionalism => Dimension::LanguageQuality,
            Metric::ExpansionRatio
            | Metric::ExampleUsage
            | Metric::ExplanationQuality
            | Metric::ContextProvision => Dimension::DetailRichness,
            Metric::DurationAppropriateness | Metric::TimeDistribution | Metric::PaceConsistency => {
                Dimension::TimeManagement
            }
        }
    }

    /// Whether a lower value is the better one (risk metrics).
    pub fn lower_is_better(&self) -> bool {
        matches!(self, Metric::HallucinationRisk)
    }

    /// Contribution of a value to its dimension's mean.
    pub fn contribution(&self, value: f64) -> f64 {
        if self.lower_is_better() { 1.0 - value } else { value }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Score of a single dimension with its sub-metric breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Which dimension this is
    pub dimension: Dimension,

    /// Sub-metric values (0.0 - 1.0)
    pub sub_metrics: BTreeMap<Metric, f64>,

    /// Mean of the sub-metric contributions (0.0 - 1.0)
    pub overall_score: f64,
}

impl DimensionScore {
    /// Build a dimension score, clamping every sub-metric into [0, 1].
    pub fn from_metrics<I>(dimension: Dimension, metrics: I) -> Self
    where
        I: IntoIterator<Item = (Metric, f64)>,
    {
        let mut values: Vec<(Metric, f64)> = Vec::new();
        for (metric, value) in metrics {
            values.push((metric, unit_interval(value)));
        }

        let overall_score = if values.is_empty() {
            1.0
        } else {
            let sum: f64 = values.iter().map(|(m, v)| m.contribution(*v)).sum();
            unit_interval(sum / values.len() as f64)
        };

        Self {
            dimension,
            sub_metrics: values.into_iter().collect(),
            overall_score,
        }
    }

    /// Value of a sub-metric, if this dimension carries it.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.sub_metrics.get(&metric).copied()
    }

    /// Weighted contribution to the overall score.
    pub fn weighted(&self, weight: f64) -> f64 {
        self.overall_score * weight
    }
}

/// Letter grade on the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    /// Strict-descending threshold lookup.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.90 => Grade::APlus,
            s if s >= 0.85 => Grade::A,
            s if s >= 0.80 => Grade::BPlus,
            s if s >= 0.75 => Grade::B,
            s if s >= 0.70 => Grade::CPlus,
            s if s >= 0.65 => Grade::C,
            s if s >= 0.60 => Grade::D,
            _ => Grade::F,
        }
    }

    /// Ordinal rank, F = 0 up to A+ = 7.
    pub fn rank(&self) -> u8 {
        match self {
            Grade::F => 0,
            Grade::D => 1,
            Grade::C => 2,
            Grade::CPlus => 3,
            Grade::B => 4,
            Grade::BPlus => 5,
            Grade::A => 6,
            Grade::APlus => 7,
        }
    }

    /// Letter label ("A+", "B", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Verbal band of the grade.
    pub fn descriptor(&self) -> &'static str {
        match self {
            Grade::APlus | Grade::A => "Excellent",
            Grade::BPlus | Grade::B => "Good",
            Grade::CPlus | Grade::C => "Fair",
            Grade::D => "Pass",
            Grade::F => "Fail",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Per-dimension scores
    pub dimensions: BTreeMap<Dimension, DimensionScore>,

    /// Weighted overall score (0.0 - 1.0)
    pub overall_score: f64,

    /// Letter grade of the overall score
    pub grade: Grade,

    /// Weights used for aggregation
    pub weights: DimensionWeights,

    /// Sum of the parsed plan durations, in minutes
    pub total_minutes: f64,

    /// Number of plan items
    pub plan_items: usize,

    /// Number of script items
    pub script_items: usize,
}

impl EvaluationResult {
    /// Aggregate dimension scores into a result.
    pub fn from_dimensions(
        dimensions: Vec<DimensionScore>,
        weights: DimensionWeights,
        total_minutes: f64,
        plan_items: usize,
        script_items: usize,
    ) -> Self {
        let dimensions: BTreeMap<Dimension, DimensionScore> =
            dimensions.into_iter().map(|d| (d.dimension, d)).collect();

        let overall_score = aggregate(&dimensions, &weights);

        Self {
            dimensions,
            overall_score,
            grade: Grade::from_score(overall_score),
            weights,
            total_minutes,
            plan_items,
            script_items,
        }
    }

    /// Score breakdown of a dimension.
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions.get(&dimension)
    }

    /// Overall score of a dimension (0.0 when the dimension was not scored).
    pub fn dimension_score(&self, dimension: Dimension) -> f64 {
        self.dimension(dimension).map(|d| d.overall_score).unwrap_or(0.0)
    }

    /// Value of a sub-metric.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.dimension(metric.dimension()).and_then(|d| d.metric(metric))
    }

    /// Check if the overall score meets a minimum.
    pub fn meets_threshold(&self, threshold: f64) -> bool {
        self.overall_score >= threshold
    }

    /// Get the lowest scoring dimension.
    pub fn weakest_dimension(&self) -> Option<Dimension> {
        self.dimensions
            .values()
            .min_by(|a, b| a.overall_score.total_cmp(&b.overall_score))
            .map(|d| d.dimension)
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Speech quality: {:.1}% (Grade: {} {}) - {} plan items, {:.1} minutes",
            self.overall_score * 100.0,
            self.grade,
            self.grade.descriptor(),
            self.plan_items,
            self.total_minutes
        )
    }
}

/// Weighted sum of dimension scores; a missing dimension contributes nothing.
pub fn aggregate(dimensions: &BTreeMap<Dimension, DimensionScore>, weights: &DimensionWeights) -> f64 {
    Dimension::ALL
        .iter()
        .filter_map(|d| dimensions.get(d).map(|score| score.weighted(weights.get(*d))))
        .sum()
}

/// Clamp into [0, 1]; non-finite values count as 0.
fn unit_interval(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 }
}
