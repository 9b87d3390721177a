/*!
 * Scoring rubric: every tunable constant of the evaluator in one place.
 *
 * - Dimension weights (must sum to 1.0)
 * - Scoring curves: ideal bands with their below/above penalties
 * - Feedback thresholds: deficiency rules, strength rules, report targets
 *
 * The curves are empirically chosen and kept as data so they can be tuned
 * and tested independently of the scorers.
 */

use serde::{Deserialize, Serialize};

use super::feedback::Priority;
use super::lexicon::Lexicon;
use super::scores::{Dimension, Metric};
use crate::errors::EvaluationError;

/// Tolerance for the weight-sum invariant.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Aggregation weights of the five dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightTable")]
pub struct DimensionWeights {
    content_consistency: f64,
    structure: f64,
    language_quality: f64,
    detail_richness: f64,
    time_management: f64,
}

/// Unvalidated weights as they appear in a configuration file.
#[derive(Debug, Clone, Copy, Deserialize)]
struct WeightTable {
    content_consistency: f64,
    structure: f64,
    language_quality: f64,
    detail_richness: f64,
    time_management: f64,
}

impl TryFrom<WeightTable> for DimensionWeights {
    type Error = EvaluationError;

    fn try_from(table: WeightTable) -> Result<Self, Self::Error> {
        DimensionWeights::new(
            table.content_consistency,
            table.structure,
            table.language_quality,
            table.detail_richness,
            table.time_management,
        )
    }
}

impl DimensionWeights {
    /// Create weights, rejecting negative values and sums other than 1.0.
    pub fn new(
        content_consistency: f64,
        structure: f64,
        language_quality: f64,
        detail_richness: f64,
        time_management: f64,
    ) -> Result<Self, EvaluationError> {
        let weights = Self {
            content_consistency,
            structure,
            language_quality,
            detail_richness,
            time_management,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Weight of a dimension.
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::ContentConsistency => self.content_consistency,
            Dimension::Structure => self.structure,
            Dimension::LanguageQuality => self.language_quality,
            Dimension::DetailRichness => self.detail_richness,
            Dimension::TimeManagement => self.time_management,
        }
    }

    /// Sum of all weights, in dimension order.
    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// Weights paired with their dimension, in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }

    fn validate(&self) -> Result<(), EvaluationError> {
        if let Some((dimension, weight)) = self.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
            return Err(EvaluationError::InvalidRubric(format!(
                "weight for {} must be a non-negative number, got {}",
                dimension, weight
            )));
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EvaluationError::InvalidRubric(format!(
                "dimension weights must sum to 1.0, got {}",
                sum
            )));
        }

        Ok(())
    }
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            content_consistency: 0.30,
            structure: 0.25,
            language_quality: 0.20,
            detail_richness: 0.15,
            time_management: 0.10,
        }
    }
}

/// An ideal range for a raw measurement and the penalty curves around it.
///
/// Inside `[low, high]` the score is 1.0. Below, it rises linearly from
/// `below_floor` at zero to 1.0 at `low`. Above, it decays by
/// `(value - high) / above_span` and never drops under `above_floor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealBand {
    pub low: f64,
    pub high: f64,
    pub below_floor: f64,
    pub above_floor: f64,
    pub above_span: f64,
}

impl IdealBand {
    /// Score a raw measurement against the band.
    pub fn score(&self, value: f64) -> f64 {
        if value >= self.low && value <= self.high {
            1.0
        } else if value < self.low {
            if self.low <= 0.0 {
                return self.below_floor;
            }
            self.below_floor + (value / self.low) * (1.0 - self.below_floor)
        } else if self.above_span <= 0.0 {
            self.above_floor
        } else {
            (1.0 - (value - self.high) / self.above_span).max(self.above_floor)
        }
    }

    /// Multiply the band edges and the decay span by a factor.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            low: self.low * factor,
            high: self.high * factor,
            above_span: self.above_span * factor,
            ..*self
        }
    }

    fn validate(&self, name: &str) -> Result<(), EvaluationError> {
        let valid = self.low >= 0.0
            && self.low <= self.high
            && (0.0..=1.0).contains(&self.below_floor)
            && (0.0..=1.0).contains(&self.above_floor)
            && self.above_span > 0.0;

        if valid {
            Ok(())
        } else {
            Err(EvaluationError::InvalidRubric(format!("invalid band for {}: {:?}", name, self)))
        }
    }
}

/// Shape of every scoring curve used by the dimension scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringCurves {
    /// Words per sentence
    pub sentence_length: IdealBand,

    /// Conversational markers per hundred words
    pub conversational_rate: IdealBand,

    /// Unique words / total words
    pub type_token_ratio: IdealBand,

    /// Speech words / slide words
    pub expansion_ratio: IdealBand,

    /// Minutes per plan item; scaled by the item count
    pub minutes_per_item: IdealBand,

    /// Share of novel speech vocabulary treated as acceptable elaboration
    pub elaboration_allowance: f64,

    /// Script items per expected example
    pub items_per_example: f64,

    /// Script items per expected explanation
    pub items_per_explanation: f64,

    /// Distinct context keywords needed for a full score
    pub context_target: f64,

    /// Fraction of the domain-term list that already earns a full score
    pub professionalism_fraction: f64,

    /// Timed items needed before balance and distribution are judged
    pub min_timed_items: usize,

    /// Longest acceptable opening or closing item, in minutes
    pub edge_item_max_minutes: f64,

    /// Shortest acceptable interior item, in minutes
    pub interior_item_min_minutes: f64,

    /// An item is extreme when above `factor x mean` or below `mean / factor`
    pub pace_extreme_factor: f64,

    /// Title words shorter than this are ignored when matching
    pub title_word_min_chars: usize,

    /// Fraction of title words that must appear for a title to be covered
    pub title_match_fraction: f64,
}

impl Default for ScoringCurves {
    fn default() -> Self {
        Self {
            sentence_length: IdealBand {
                low: 12.0,
                high: 25.0,
                below_floor: 0.7,
                above_floor: 0.3,
                above_span: 25.0,
            },
            conversational_rate: IdealBand {
                low: 2.0,
                high: 6.0,
                below_floor: 0.0,
                above_floor: 0.5,
                above_span: 10.0,
            },
            type_token_ratio: IdealBand {
                low: 0.35,
                high: 0.65,
                below_floor: 0.0,
                above_floor: 0.6,
                above_span: 0.35,
            },
            expansion_ratio: IdealBand {
                low: 1.5,
                high: 3.0,
                below_floor: 0.0,
                above_floor: 0.5,
                above_span: 3.0,
            },
            minutes_per_item: IdealBand {
                low: 1.0,
                high: 2.5,
                below_floor: 0.0,
                above_floor: 0.4,
                above_span: 2.5,
            },
            elaboration_allowance: 0.3,
            items_per_example: 4.5,
            items_per_explanation: 3.0,
            context_target: 4.0,
            professionalism_fraction: 0.5,
            min_timed_items: 3,
            edge_item_max_minutes: 2.0,
            interior_item_min_minutes: 1.0,
            pace_extreme_factor: 2.0,
            title_word_min_chars: 4,
            title_match_fraction: 0.5,
        }
    }
}

impl ScoringCurves {
    fn validate(&self) -> Result<(), EvaluationError> {
        self.sentence_length.validate("sentence_length")?;
        self.conversational_rate.validate("conversational_rate")?;
        self.type_token_ratio.validate("type_token_ratio")?;
        self.expansion_ratio.validate("expansion_ratio")?;
        self.minutes_per_item.validate("minutes_per_item")?;

        let checks = [
            ("elaboration_allowance", self.elaboration_allowance > 0.0 && self.elaboration_allowance < 1.0),
            ("items_per_example", self.items_per_example > 0.0),
            ("items_per_explanation", self.items_per_explanation > 0.0),
            ("context_target", self.context_target > 0.0),
            ("professionalism_fraction", self.professionalism_fraction > 0.0 && self.professionalism_fraction <= 1.0),
            ("pace_extreme_factor", self.pace_extreme_factor > 1.0),
            ("title_match_fraction", (0.0..=1.0).contains(&self.title_match_fraction)),
        ];

        match checks.iter().find(|(_, ok)| !ok) {
            Some((name, _)) => Err(EvaluationError::InvalidRubric(format!("{} is out of range", name))),
            None => Ok(()),
        }
    }
}

/// Weights, curves and phrase lists driving one evaluator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rubric {
    pub weights: DimensionWeights,
    pub curves: ScoringCurves,
    pub lexicon: Lexicon,
}

impl Rubric {
    /// Check every invariant of the rubric.
    pub fn validate(&self) -> Result<(), EvaluationError> {
        self.weights.validate()?;
        self.curves.validate()
    }
}

/// Comparison a metric value is tested against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// value < limit
    Below(f64),
    /// value > limit
    Above(f64),
    /// value >= limit
    AtLeast(f64),
    /// value <= limit
    AtMost(f64),
}

impl Threshold {
    /// Whether the value satisfies the comparison.
    pub fn is_met(&self, value: f64) -> bool {
        match *self {
            Threshold::Below(limit) => value < limit,
            Threshold::Above(limit) => value > limit,
            Threshold::AtLeast(limit) => value >= limit,
            Threshold::AtMost(limit) => value <= limit,
        }
    }

    /// The limit being compared against.
    pub fn limit(&self) -> f64 {
        match *self {
            Threshold::Below(limit)
            | Threshold::Above(limit)
            | Threshold::AtLeast(limit)
            | Threshold::AtMost(limit) => limit,
        }
    }

    /// Comparison symbol for reports.
    pub fn symbol(&self) -> &'static str {
        match self {
            Threshold::Below(_) => "<",
            Threshold::Above(_) => ">",
            Threshold::AtLeast(_) => ">=",
            Threshold::AtMost(_) => "<=",
        }
    }
}

/// A deficiency rule: fires when the metric crosses its trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackRule {
    pub metric: Metric,
    pub trigger: Threshold,
    pub priority: Priority,
    /// `{minutes}` and `{seconds}` are replaced with the total plan duration
    pub message: &'static str,
}

/// A strength rule: fires when the metric clears its trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthRule {
    pub metric: Metric,
    pub trigger: Threshold,
    pub message: &'static str,
}

/// Deficiency rules in priority order.
pub const SUGGESTION_RULES: &[FeedbackRule] = &[
    FeedbackRule {
        metric: Metric::KeywordCoverage,
        trigger: Threshold::Below(0.6),
        priority: Priority::High,
        message: "Keyword coverage is low - make sure the key terms of every slide appear in the speech",
    },
    FeedbackRule {
        metric: Metric::TitleCoverage,
        trigger: Threshold::Below(0.7),
        priority: Priority::High,
        message: "Slide titles are not fully covered - mention the topic of each slide explicitly",
    },
    FeedbackRule {
        metric: Metric::HallucinationRisk,
        trigger: Threshold::Above(0.4),
        priority: Priority::High,
        message: "Hallucination risk is high - cut content that does not appear on the slides",
    },
    FeedbackRule {
        metric: Metric::FactAccuracy,
        trigger: Threshold::Below(0.7),
        priority: Priority::High,
        message: "Facts are not carried over - convey the numbers, dates and names from the slides verbatim",
    },
    FeedbackRule {
        metric: Metric::Coherence,
        trigger: Threshold::Below(0.7),
        priority: Priority::Medium,
        message: "Logical flow needs work - follow the slide order throughout the speech",
    },
    FeedbackRule {
        metric: Metric::Transitions,
        trigger: Threshold::Below(0.5),
        priority: Priority::Medium,
        message: "Transitions are missing - open paragraphs with phrases such as 'next' or 'let's look at'",
    },
    FeedbackRule {
        metric: Metric::TimeBalance,
        trigger: Threshold::Below(0.6),
        priority: Priority::Medium,
        message: "Time allocation is uneven - rebalance sections that run much longer or shorter than the rest",
    },
    FeedbackRule {
        metric: Metric::Conversational,
        trigger: Threshold::Below(0.5),
        priority: Priority::MediumLow,
        message: "The tone is not conversational enough - address the audience with 'we', 'let's' and 'you'",
    },
    FeedbackRule {
        metric: Metric::Clarity,
        trigger: Threshold::Below(0.6),
        priority: Priority::MediumLow,
        message: "Sentence length needs tuning - aim for 12 to 25 words per sentence",
    },
    FeedbackRule {
        metric: Metric::Professionalism,
        trigger: Threshold::Below(0.6),
        priority: Priority::MediumLow,
        message: "Terminology is thin - use the technical terms and concepts from the slides",
    },
    FeedbackRule {
        metric: Metric::ExampleUsage,
        trigger: Threshold::Below(0.4),
        priority: Priority::Low,
        message: "Examples are missing - illustrate abstract ideas with concrete cases",
    },
    FeedbackRule {
        metric: Metric::ExplanationQuality,
        trigger: Threshold::Below(0.4),
        priority: Priority::Low,
        message: "Explanations are thin - unpack technical terms and complex concepts",
    },
    FeedbackRule {
        metric: Metric::ExpansionRatio,
        trigger: Threshold::Below(0.5),
        priority: Priority::Low,
        message: "The speech barely expands on the slides - add detail and narrative",
    },
    FeedbackRule {
        metric: Metric::DurationAppropriateness,
        trigger: Threshold::Below(0.6),
        priority: Priority::MediumLow,
        message: "Total duration needs adjusting - currently {minutes} minutes ({seconds} seconds), match it to the occasion",
    },
];

/// Strength rules; each trigger is looser than, and disjoint from, the matching deficiency rule.
pub const STRENGTH_RULES: &[StrengthRule] = &[
    StrengthRule {
        metric: Metric::KeywordCoverage,
        trigger: Threshold::AtLeast(0.75),
        message: "Keyword coverage is thorough and conveys the core content of the slides",
    },
    StrengthRule {
        metric: Metric::FactAccuracy,
        trigger: Threshold::AtLeast(0.8),
        message: "Facts and figures are carried over accurately",
    },
    StrengthRule {
        metric: Metric::HallucinationRisk,
        trigger: Threshold::AtMost(0.25),
        message: "Content stays faithful to the source material",
    },
    StrengthRule {
        metric: Metric::Coherence,
        trigger: Threshold::AtLeast(0.8),
        message: "The logical structure is clear and the flow follows the deck",
    },
    StrengthRule {
        metric: Metric::Transitions,
        trigger: Threshold::AtLeast(0.65),
        message: "Transitions between paragraphs are smooth",
    },
    StrengthRule {
        metric: Metric::Organization,
        trigger: Threshold::AtLeast(0.8),
        message: "The talk has a complete shape with a clear opening and close",
    },
    StrengthRule {
        metric: Metric::Conversational,
        trigger: Threshold::AtLeast(0.6),
        message: "The conversational register suits a live audience",
    },
    StrengthRule {
        metric: Metric::Clarity,
        trigger: Threshold::AtLeast(0.75),
        message: "Sentences are clear and well sized",
    },
    StrengthRule {
        metric: Metric::Professionalism,
        trigger: Threshold::AtLeast(0.7),
        message: "Domain terminology is used with confidence",
    },
    StrengthRule {
        metric: Metric::ExampleUsage,
        trigger: Threshold::AtLeast(0.5),
        message: "Examples help the audience follow along",
    },
    StrengthRule {
        metric: Metric::ExplanationQuality,
        trigger: Threshold::AtLeast(0.5),
        message: "Technical concepts are explained well",
    },
    StrengthRule {
        metric: Metric::ContextProvision,
        trigger: Threshold::AtLeast(0.65),
        message: "Background and motivation are well covered",
    },
    StrengthRule {
        metric: Metric::DurationAppropriateness,
        trigger: Threshold::AtLeast(0.75),
        message: "Total duration fits the size of the deck",
    },
    StrengthRule {
        metric: Metric::TimeDistribution,
        trigger: Threshold::AtLeast(0.7),
        message: "Time is distributed sensibly across the talk",
    },
];

/// Emitted when no deficiency rule fires.
pub const ALL_TARGETS_MET_MESSAGE: &str =
    "Overall quality is excellent and every metric meets its target - keep it up";

/// Emitted when no strength rule fires.
pub const NO_STRENGTHS_MESSAGE: &str = "Keep working to lift every metric";

/// Closing remarks keyed on the overall score: the first band whose upper bound exceeds the score wins.
pub const CLOSING_REMARKS: &[(f64, &str)] = &[
    (0.70, "Overall: focus on content consistency and structure first, they are the foundation of the speech"),
    (0.85, "Overall: the speech is solid - polish the language and add richer detail"),
];

/// Closing remark for scores above every band.
pub const TOP_CLOSING_REMARK: &str = "Overall: the speech is ready to deliver";

/// Pass targets annotated next to each metric in the text report.
pub const REPORT_TARGETS: &[(Metric, Threshold)] = &[
    (Metric::KeywordCoverage, Threshold::AtLeast(0.7)),
    (Metric::ConceptCoverage, Threshold::AtLeast(0.7)),
    (Metric::TitleCoverage, Threshold::AtLeast(0.8)),
    (Metric::FactAccuracy, Threshold::AtLeast(0.8)),
    (Metric::HallucinationRisk, Threshold::AtMost(0.3)),
    (Metric::Coherence, Threshold::AtLeast(0.8)),
    (Metric::TimeBalance, Threshold::AtLeast(0.7)),
    (Metric::Transitions, Threshold::AtLeast(0.6)),
    (Metric::Organization, Threshold::AtLeast(0.8)),
    (Metric::Clarity, Threshold::AtLeast(0.7)),
    (Metric::Conversational, Threshold::AtLeast(0.6)),
    (Metric::VocabularyRichness, Threshold::AtLeast(0.5)),
    (Metric::Professionalism, Threshold::AtLeast(0.7)),
    (Metric::ExpansionRatio, Threshold::AtLeast(0.7)),
    (Metric::ExampleUsage, Threshold::AtLeast(0.5)),
    (Metric::ExplanationQuality, Threshold::AtLeast(0.5)),
    (Metric::ContextProvision, Threshold::AtLeast(0.6)),
    (Metric::DurationAppropriateness, Threshold::AtLeast(0.7)),
    (Metric::TimeDistribution, Threshold::AtLeast(0.6)),
    (Metric::PaceConsistency, Threshold::AtLeast(0.7)),
];

/// Comfortable total talk length in minutes, flagged in the report when outside.
pub const TOTAL_MINUTES_TARGET: (f64, f64) = (10.0, 30.0);

/// Report pass target of a metric.
pub fn report_target(metric: Metric) -> Option<Threshold> {
    REPORT_TARGETS
        .iter()
        .find(|(m, _)| *m == metric)
        .map(|(_, threshold)| *threshold)
}
