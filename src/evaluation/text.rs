/*!
 * Text analysis toolkit shared by the dimension scorers.
 *
 * Pure functions over plain strings:
 * - Keyword extraction into a token multiset
 * - Concept extraction (title-case phrases, hyphenated compounds, acronyms, CJK runs)
 * - Coverage ratios between term sets
 * - Free-form duration parsing
 * - Sentence splitting, fact extraction and phrase counting
 */

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexicon::STOPWORDS;

static ASCII_KEYWORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z]{4,}\b").expect("Invalid keyword regex"));

static CJK_KEYWORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{4e00}-\x{9fff}]{2,4}").expect("Invalid CJK keyword regex"));

static TITLE_CASE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("Invalid title-case regex")
});

static HYPHENATED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-z]+-[a-z]+(?:-[a-z]+)*\b").expect("Invalid hyphenated compound regex")
});

static ACRONYM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("Invalid acronym regex"));

static CJK_CONCEPT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{4e00}-\x{9fff}]{3,8}").expect("Invalid CJK concept regex"));

// Years, percentages and decimals, in that order of preference.
static NUMERIC_FACT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{4}\b|\b\d+%|\b\d+\.\d+\b").expect("Invalid numeric fact regex")
});

static PROPER_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b").expect("Invalid proper name regex")
});

static DURATION_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("Invalid duration regex"));

// Unit words must stand alone or follow the number directly ("2min", "1.5 hours").
static SECONDS_UNIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^a-z])(?:seconds?|secs?)\b").expect("Invalid seconds unit regex"));

static MINUTES_UNIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^a-z])(?:minutes?|mins?)\b").expect("Invalid minutes unit regex"));

static HOURS_UNIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^a-z])(?:hours?|hrs?|h)\b").expect("Invalid hours unit regex"));

static SENTENCE_BREAK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?。！？]+").expect("Invalid sentence regex"));

static ASCII_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z]+\b").expect("Invalid word regex"));

static CJK_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{4e00}-\x{9fff}]+").expect("Invalid CJK run regex"));

static TITLE_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("Invalid title word regex"));

static BLANK_LINES_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("Invalid blank line regex"));

static SPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("Invalid space run regex"));

static PAGE_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--- Page \d+ ---\n?").expect("Invalid page marker regex"));

static DASH_RULE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{3,}").expect("Invalid dash rule regex"));

static EQUALS_RULE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"={3,}").expect("Invalid equals rule regex"));

/// Characters that end a sentence.
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '。', '！', '？'];

/// A set of distinct terms that coverage can be computed over.
pub trait TermSet {
    /// Number of distinct terms.
    fn term_count(&self) -> usize;

    /// Whether the term is present.
    fn has_term(&self, term: &str) -> bool;

    /// Iterate over the distinct terms.
    fn term_iter(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

/// Keyword multiset: token -> number of occurrences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordCounts {
    counts: HashMap<String, usize>,
}

impl KeywordCounts {
    /// Occurrences of a keyword (0 when absent).
    pub fn count(&self, keyword: &str) -> usize {
        self.counts.get(keyword).copied().unwrap_or(0)
    }

    /// Number of distinct keywords.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total number of keyword occurrences.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Whether no keyword was extracted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct keywords absent from `reference`.
    pub fn novel_against(&self, reference: &KeywordCounts) -> usize {
        self.counts.keys().filter(|k| !reference.counts.contains_key(*k)).count()
    }

    /// The `n` most frequent keywords, ties broken alphabetically.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

impl FromIterator<String> for KeywordCounts {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut counts = HashMap::new();
        for token in iter {
            *counts.entry(token).or_insert(0) += 1;
        }
        Self { counts }
    }
}

impl TermSet for KeywordCounts {
    fn term_count(&self) -> usize {
        self.distinct()
    }

    fn has_term(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    fn term_iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.counts.keys().map(String::as_str))
    }
}

/// Set of key concepts (multi-word phrases, compounds, acronyms).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptSet {
    concepts: BTreeSet<String>,
}

impl ConceptSet {
    /// Number of concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Whether the concept is present (case-sensitive).
    pub fn contains(&self, concept: &str) -> bool {
        self.concepts.contains(concept)
    }

    /// Iterate over concepts in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.concepts.iter().map(String::as_str)
    }
}

impl FromIterator<String> for ConceptSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            concepts: iter.into_iter().collect(),
        }
    }
}

impl TermSet for ConceptSet {
    fn term_count(&self) -> usize {
        self.len()
    }

    fn has_term(&self, term: &str) -> bool {
        self.contains(term)
    }

    fn term_iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.iter())
    }
}

/// Extract the keyword multiset of a text.
///
/// The text is lower-cased; ASCII words of four or more letters and CJK runs
/// of two to four ideographs are kept unless they are stopwords.
pub fn extract_keywords(text: &str) -> KeywordCounts {
    let lowered = text.to_lowercase();

    ASCII_KEYWORD_REGEX
        .find_iter(&lowered)
        .chain(CJK_KEYWORD_REGEX.find_iter(&lowered))
        .map(|m| m.as_str())
        .filter(|token| !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Extract the key concepts of a text.
///
/// Union of title-case phrases, hyphenated lowercase compounds, CJK runs of
/// three to eight ideographs and all-caps acronyms, keeping strings of at
/// least three characters.
pub fn extract_concepts(text: &str) -> ConceptSet {
    TITLE_CASE_REGEX
        .find_iter(text)
        .chain(HYPHENATED_REGEX.find_iter(text))
        .chain(CJK_CONCEPT_REGEX.find_iter(text))
        .chain(ACRONYM_REGEX.find_iter(text))
        .map(|m| m.as_str())
        .filter(|concept| concept.chars().count() >= 3)
        .map(str::to_string)
        .collect()
}

/// Fraction of `source` terms that also appear in `target`.
///
/// An empty source is fully covered: missing source material is never a penalty.
pub fn coverage<S, T>(source: &S, target: &T) -> f64
where
    S: TermSet + ?Sized,
    T: TermSet + ?Sized,
{
    let total = source.term_count();
    if total == 0 {
        return 1.0;
    }

    let covered = source.term_iter().filter(|term| target.has_term(term)).count();
    covered as f64 / total as f64
}

/// Parse a free-form duration ("90 seconds", "1.5 minutes", "2h") into minutes.
///
/// Returns 0.0 when no number is present; callers treat that as "unspecified".
pub fn parse_duration(text: &str) -> f64 {
    let normalized = text.trim().to_lowercase();

    let Some(number) = DURATION_NUMBER_REGEX.find(&normalized) else {
        return 0.0;
    };
    let Ok(value) = number.as_str().trim_end_matches('.').parse::<f64>() else {
        return 0.0;
    };

    let has_minute = MINUTES_UNIT_REGEX.is_match(&normalized);
    let has_hour = HOURS_UNIT_REGEX.is_match(&normalized);

    if SECONDS_UNIT_REGEX.is_match(&normalized) || (normalized.ends_with('s') && !has_minute && !has_hour) {
        value / 60.0
    } else if has_hour || normalized.ends_with('h') {
        value * 60.0
    } else {
        value
    }
}

/// Normalise text extracted from a slide PDF.
///
/// Collapses blank-line and space runs, drops `--- Page N ---` markers and
/// shortens long `---`/`===` separator rules to three characters.
pub fn clean_slide_text(text: &str) -> String {
    let text = BLANK_LINES_REGEX.replace_all(text, "\n\n");
    let text = SPACE_RUN_REGEX.replace_all(&text, " ");
    let text = PAGE_MARKER_REGEX.replace_all(&text, "");
    let text = DASH_RULE_REGEX.replace_all(&text, "---");
    EQUALS_RULE_REGEX.replace_all(&text, "===").into_owned()
}

/// Split text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK_REGEX
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Text up to (not including) the first sentence terminator.
pub fn leading_clause(text: &str) -> &str {
    match text.find(SENTENCE_TERMINATORS) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lower-cased ASCII words followed by CJK runs, used for type-token ratios.
pub fn vocabulary_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    ASCII_WORD_REGEX
        .find_iter(&lowered)
        .chain(CJK_RUN_REGEX.find_iter(&lowered))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Literal facts of a text: years, percentages, decimals, then "Firstname Lastname" pairs.
///
/// Duplicates are kept; each occurrence is a fact to be conveyed.
pub fn extract_facts(text: &str) -> Vec<String> {
    NUMERIC_FACT_REGEX
        .find_iter(text)
        .chain(PROPER_NAME_REGEX.find_iter(text))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Lower-cased word tokens of a title.
pub fn title_words(title: &str) -> Vec<String> {
    let lowered = title.to_lowercase();
    TITLE_WORD_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Number of CJK ideographs in a text.
pub fn cjk_char_count(text: &str) -> usize {
    text.chars()
        .filter(|c| ('\u{4e00}'..='\u{9fff}').contains(c))
        .count()
}
