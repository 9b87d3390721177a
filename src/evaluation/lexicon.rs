/*!
 * Word lists used by the scoring heuristics.
 *
 * Every phrase list the scorers match against lives here. The stopword set
 * is fixed; the remaining lists seed a [`Lexicon`] which can be overridden
 * from the configuration file (the domain-term list in particular is
 * usually tuned per slide deck).
 */

use serde::{Deserialize, Serialize};

/// English function words and a handful of Chinese pronouns/conjunctions
/// dropped by keyword extraction.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "have", "has", "had", "this", "that",
    "these", "those", "will", "would", "这个", "那个", "可以", "我们", "他们", "什么", "怎么",
];

/// Phrases that open a paragraph with a transition.
pub const TRANSITION_PHRASES: &[&str] = &[
    "let's", "next", "now", "moving", "turn to", "consider", "however", "therefore",
    "furthermore", "additionally", "in conclusion", "to summarize", "brings us to", "接下来",
    "现在", "然后", "因此", "此外", "总之", "让我们", "下面", "首先", "其次", "最后",
];

/// First-person and direct-address markers of a spoken register.
pub const CONVERSATIONAL_MARKERS: &[&str] = &[
    "let's", "we'll", "i'm", "you'll", "we're", "i'll", "today", "now", "here", "our", "my",
    "your", "everyone", "thank you", "hello", "hi", "大家", "我们", "今天", "现在", "让我们",
    "你们", "咱们", "这里", "那么",
];

/// Domain vocabulary expected in a professional talk.
pub const DOMAIN_TERMS: &[&str] = &[
    "llm",
    "large language model",
    "fact-checking",
    "hallucination",
    "argumentation",
    "evidence",
    "verification",
    "benchmark",
    "algorithm",
    "dataset",
    "evaluation",
    "accuracy",
];

/// Phrases that introduce an example.
pub const EXAMPLE_INDICATORS: &[&str] = &[
    "example", "for instance", "such as", "like", "consider", "let's take", "case",
    "illustrate", "例如", "比如", "举例", "案例", "考虑",
];

/// Phrases that introduce an explanation.
pub const EXPLANATION_MARKERS: &[&str] = &[
    "this means", "in other words", "specifically", "that is", "namely", "essentially",
    "simply put", "也就是说", "换句话说", "具体来说", "简单来说",
];

/// Words that signal background, motivation or significance.
pub const CONTEXT_KEYWORDS: &[&str] = &[
    "background", "motivation", "why", "important", "challenge", "problem", "goal", "objective",
    "significance", "背景", "动机", "为什么", "重要", "挑战", "问题", "目标", "意义",
];

/// Title fragments marking an opening section.
pub const INTRO_TITLE_MARKERS: &[&str] = &["introduction", "intro"];

/// Title fragments marking a closing section.
pub const CONCLUSION_TITLE_MARKERS: &[&str] = &["conclusion", "summary", "q&a"];

/// Configurable phrase lists consumed by the dimension scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Transition phrases looked for in each paragraph's leading clause
    #[serde(default = "default_transition_phrases")]
    pub transition_phrases: Vec<String>,

    /// Markers of a conversational register
    #[serde(default = "default_conversational_markers")]
    pub conversational_markers: Vec<String>,

    /// Domain terms for the professionalism metric
    #[serde(default = "default_domain_terms")]
    pub domain_terms: Vec<String>,

    /// Example indicators
    #[serde(default = "default_example_indicators")]
    pub example_indicators: Vec<String>,

    /// Explanation markers
    #[serde(default = "default_explanation_markers")]
    pub explanation_markers: Vec<String>,

    /// Context keywords
    #[serde(default = "default_context_keywords")]
    pub context_keywords: Vec<String>,

    /// Introduction title markers
    #[serde(default = "default_intro_title_markers")]
    pub intro_title_markers: Vec<String>,

    /// Conclusion title markers
    #[serde(default = "default_conclusion_title_markers")]
    pub conclusion_title_markers: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            transition_phrases: default_transition_phrases(),
            conversational_markers: default_conversational_markers(),
            domain_terms: default_domain_terms(),
            example_indicators: default_example_indicators(),
            explanation_markers: default_explanation_markers(),
            context_keywords: default_context_keywords(),
            intro_title_markers: default_intro_title_markers(),
            conclusion_title_markers: default_conclusion_title_markers(),
        }
    }
}

impl Lexicon {
    /// Replace the domain-term list, lower-casing every entry.
    pub fn with_domain_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domain_terms = terms.into_iter().map(|t| t.as_ref().to_lowercase()).collect();
        self
    }
}

fn to_owned_list(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_transition_phrases() -> Vec<String> {
    to_owned_list(TRANSITION_PHRASES)
}

fn default_conversational_markers() -> Vec<String> {
    to_owned_list(CONVERSATIONAL_MARKERS)
}

fn default_domain_terms() -> Vec<String> {
    to_owned_list(DOMAIN_TERMS)
}

fn default_example_indicators() -> Vec<String> {
    to_owned_list(EXAMPLE_INDICATORS)
}

fn default_explanation_markers() -> Vec<String> {
    to_owned_list(EXPLANATION_MARKERS)
}

fn default_context_keywords() -> Vec<String> {
    to_owned_list(CONTEXT_KEYWORDS)
}

fn default_intro_title_markers() -> Vec<String> {
    to_owned_list(INTRO_TITLE_MARKERS)
}

fn default_conclusion_title_markers() -> Vec<String> {
    to_owned_list(CONCLUSION_TITLE_MARKERS)
}
