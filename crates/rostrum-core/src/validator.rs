//! Text validation gates for raw generated utterances
//!
//! Generation adapters emit noisy output: multi-paragraph ramble, wrapping
//! quotes, unfinished sentences, near-verbatim repeats. [`Validator::check`]
//! runs a fixed sequence of gates over a raw utterance and either produces
//! cleaned text or a [`RejectReason`]. Rejection is an expected, frequent
//! outcome and is modeled as an ordinary value, not an error.

use serde::{Deserialize, Serialize};

/// How aggressively the gates reject borderline text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationPolicy {
    /// Reject over-long text, unpunctuated text, and loosely similar arguments
    Strict,
    /// Repair what can be repaired; only reject near-exact duplicates
    Lenient,
}

/// Validator configuration, selectable per call site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Maximum words before the length gate triggers
    pub max_words: usize,
    /// Minimum words for an utterance to count as an argument
    pub min_words: usize,
    /// Jaccard similarity above which text counts as a duplicate
    pub similarity_threshold: f64,
    /// Strict or lenient gate behavior
    pub policy: ValidationPolicy,
}

impl ValidatorConfig {
    /// Strict gates: reject loosely similar arguments to force topical diversity
    pub fn strict() -> Self {
        Self {
            max_words: 80,
            min_words: 4,
            similarity_threshold: 0.75,
            policy: ValidationPolicy::Strict,
        }
    }

    /// Lenient gates: repair length/punctuation, reject only near-exact repeats
    pub fn lenient() -> Self {
        Self {
            max_words: 80,
            min_words: 4,
            similarity_threshold: 0.98,
            policy: ValidationPolicy::Lenient,
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::lenient()
    }
}

/// Why a gate rejected an utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Empty or whitespace-only input
    Empty,
    /// Word count above the maximum (strict mode only)
    TooLong { words: usize },
    /// Word count below the minimum
    TooShort { words: usize },
    /// Does not end in `.`, `!`, or `?` (strict mode only)
    MissingPunctuation,
    /// Normalized text exactly matches a previously seen utterance
    Duplicate,
    /// Token-set similarity to a previous utterance above the threshold
    TooSimilar { similarity: f64 },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Empty => write!(f, "empty or whitespace-only text"),
            RejectReason::TooLong { words } => write!(f, "too long ({words} words)"),
            RejectReason::TooShort { words } => write!(f, "too short ({words} words)"),
            RejectReason::MissingPunctuation => write!(f, "missing terminal punctuation"),
            RejectReason::Duplicate => write!(f, "exact duplicate of a previous utterance"),
            RejectReason::TooSimilar { similarity } => {
                write!(f, "too similar to a previous utterance ({similarity:.2})")
            }
        }
    }
}

/// Result of running the gates
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Cleaned, accepted text
    Accepted(String),
    /// Rejected with the first gate that fired
    Rejected(RejectReason),
}

impl Outcome {
    /// The accepted text, if any
    pub fn accepted(self) -> Option<String> {
        match self {
            Outcome::Accepted(text) => Some(text),
            Outcome::Rejected(_) => None,
        }
    }

    /// Whether the text passed all gates
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
}

/// The validation gate sequence
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Run all gates, in order, against `raw`
    ///
    /// `previous` is the set of utterances already committed this debate;
    /// the duplicate gate compares against every one of them.
    pub fn check(&self, raw: &str, previous: &[String]) -> Outcome {
        if raw.trim().is_empty() {
            return Outcome::Rejected(RejectReason::Empty);
        }

        // Only the first paragraph is authoritative
        let mut text = first_paragraph(raw);
        text = strip_wrapping(&text);
        if text.is_empty() {
            return Outcome::Rejected(RejectReason::Empty);
        }

        let words = text.split_whitespace().count();
        if words > self.config.max_words {
            match self.config.policy {
                ValidationPolicy::Strict => {
                    return Outcome::Rejected(RejectReason::TooLong { words });
                }
                ValidationPolicy::Lenient => {
                    text = text
                        .split_whitespace()
                        .take(self.config.max_words)
                        .collect::<Vec<_>>()
                        .join(" ");
                    text.push('.');
                }
            }
        }

        let words = text.split_whitespace().count();
        if words < self.config.min_words {
            return Outcome::Rejected(RejectReason::TooShort { words });
        }

        if !text.ends_with(['.', '!', '?']) {
            match self.config.policy {
                ValidationPolicy::Strict => {
                    return Outcome::Rejected(RejectReason::MissingPunctuation);
                }
                ValidationPolicy::Lenient if words >= 3 => text.push('.'),
                ValidationPolicy::Lenient => {
                    return Outcome::Rejected(RejectReason::MissingPunctuation);
                }
            }
        }

        let normalized = normalize(&text);
        for prev in previous {
            if normalize(prev) == normalized {
                return Outcome::Rejected(RejectReason::Duplicate);
            }
            let similarity = jaccard_similarity(&text, prev);
            if similarity > self.config.similarity_threshold {
                return Outcome::Rejected(RejectReason::TooSimilar { similarity });
            }
        }

        Outcome::Accepted(text)
    }
}

/// Take everything up to the first blank line
fn first_paragraph(text: &str) -> String {
    text.trim()
        .split("\n\n")
        .next()
        .unwrap_or("")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip surrounding quote/backtick characters and whitespace
fn strip_wrapping(text: &str) -> String {
    text.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
        .trim()
        .to_string()
}

/// Lowercased, trimmed form used for exact-duplicate comparison
fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Token-set Jaccard similarity over lowercased whitespace-split tokens
///
/// Returns 0.0 if either token set is empty. Symmetric, and 1.0 for any
/// non-empty text compared with itself.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    use std::collections::HashSet;

    let sa: HashSet<String> = a.to_lowercase().split_whitespace().map(String::from).collect();
    let sb: HashSet<String> = b.to_lowercase().split_whitespace().map(String::from).collect();
    if sa.is_empty() || sb.is_empty() {
        return 0.0;
    }
    let intersection = sa.intersection(&sb).count() as f64;
    let union = sa.union(&sb).count() as f64;
    intersection / union
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prev(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        let v = Validator::new(ValidatorConfig::lenient());
        assert_eq!(v.check("", &[]), Outcome::Rejected(RejectReason::Empty));
        assert_eq!(v.check("   \n\t", &[]), Outcome::Rejected(RejectReason::Empty));
    }

    #[test]
    fn test_accepts_novel_well_formed_text() {
        let v = Validator::new(ValidatorConfig::strict());
        let out = v.check("Regulation must rest on measurable evidence.", &[]);
        assert_eq!(
            out.accepted().unwrap(),
            "Regulation must rest on measurable evidence."
        );
    }

    #[test]
    fn test_takes_only_first_paragraph() {
        let v = Validator::new(ValidatorConfig::lenient());
        let raw = "The first paragraph is the argument.\n\nHere is unrelated rambling.";
        assert_eq!(
            v.check(raw, &[]).accepted().unwrap(),
            "The first paragraph is the argument."
        );
    }

    #[test]
    fn test_strips_wrapping_quotes() {
        let v = Validator::new(ValidatorConfig::lenient());
        let out = v.check("\"`Quoted output needs unwrapping first.`\"", &[]);
        assert_eq!(
            out.accepted().unwrap(),
            "Quoted output needs unwrapping first."
        );
    }

    #[test]
    fn test_length_gate_strict_rejects_lenient_truncates() {
        let mut cfg = ValidatorConfig::strict();
        cfg.max_words = 5;
        let long = "one two three four five six seven";
        assert!(matches!(
            Validator::new(cfg.clone()).check(long, &[]),
            Outcome::Rejected(RejectReason::TooLong { words: 7 })
        ));

        cfg.policy = ValidationPolicy::Lenient;
        let out = Validator::new(cfg).check(long, &[]).accepted().unwrap();
        assert_eq!(out, "one two three four five.");
    }

    #[test]
    fn test_min_word_gate() {
        let v = Validator::new(ValidatorConfig::lenient());
        assert!(matches!(
            v.check("Too short.", &[]),
            Outcome::Rejected(RejectReason::TooShort { words: 2 })
        ));
    }

    #[test]
    fn test_punctuation_gate() {
        let strict = Validator::new(ValidatorConfig::strict());
        assert_eq!(
            strict.check("This sentence never quite ends", &[]),
            Outcome::Rejected(RejectReason::MissingPunctuation)
        );

        let lenient = Validator::new(ValidatorConfig::lenient());
        assert_eq!(
            lenient.check("This sentence never quite ends", &[]).accepted().unwrap(),
            "This sentence never quite ends."
        );
    }

    #[test]
    fn test_duplicate_gate_normalized_exact() {
        let v = Validator::new(ValidatorConfig::lenient());
        let seen = prev(&["Safety protocols demand rigorous testing."]);
        assert_eq!(
            v.check("  SAFETY protocols demand rigorous testing. ", &seen),
            Outcome::Rejected(RejectReason::Duplicate)
        );
    }

    #[test]
    fn test_similarity_gate_strict_vs_lenient() {
        let seen = prev(&["We must weigh risk and safety with care today."]);
        // One token changed: high similarity but not exact
        let near = "We must weigh risk and safety with care tomorrow.";

        let strict = Validator::new(ValidatorConfig::strict());
        assert!(matches!(
            strict.check(near, &seen),
            Outcome::Rejected(RejectReason::TooSimilar { .. })
        ));

        let lenient = Validator::new(ValidatorConfig::lenient());
        assert!(lenient.check(near, &seen).is_accepted());
    }

    #[test]
    fn test_jaccard_properties() {
        let a = "risk and safety matter";
        let b = "autonomy and freedom matter";
        assert_eq!(jaccard_similarity(a, b), jaccard_similarity(b, a));
        assert_eq!(jaccard_similarity(a, a), 1.0);
        assert_eq!(jaccard_similarity("", a), 0.0);
        assert_eq!(jaccard_similarity(a, "   "), 0.0);
    }
}
