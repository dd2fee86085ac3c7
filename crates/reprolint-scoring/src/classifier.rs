//! Procedural Text Classifier
//!
//! Two lexical judgments over a span of step text, both case-insensitive:
//!
//! - [`ProceduralTextClassifier::is_non_procedural`] is strict: several
//!   descriptive phrases must match *and* no experimental verb may appear.
//!   Mixed text therefore stays procedural.
//! - [`ProceduralTextClassifier::seems_procedural`] is loose: any single
//!   procedural signal is enough. It is only consulted for actions the
//!   registry does not know.

use once_cell::sync::Lazy;
use regex::Regex;

/// Phrases typical of definitional, review, or analytical prose
pub const DESCRIPTIVE_PATTERNS: &[&str] = &[
    // Present tense descriptions
    "are the",
    "is the",
    "are a",
    "is a",
    "play an important role",
    "play a role",
    "have been",
    "has been",
    "are known to",
    "is known to",
    "are essential",
    "is essential",
    "are crucial",
    "is crucial",
    "are required",
    "is required",
    // Review language
    "studies have shown",
    "research has shown",
    "it has been demonstrated",
    "it has been shown",
    "previous studies",
    "recent studies",
    "in the literature",
    "as reviewed",
    // Definitions
    "which are",
    "that are",
    "this is",
    "these are",
    "such as",
    "for example",
    "in other words",
    "specifically",
    // Comparative and analytical language
    "in contrast",
    "however",
    "moreover",
    "furthermore",
    "additionally",
    "therefore",
    "consequently",
    "as a result",
    // Abstract concepts
    "the concept",
    "the idea",
    "the notion",
    "the principle",
    "the mechanism",
    // Existential statements
    "can be found",
    "are present",
    "are located",
    "are observed",
    "are seen",
    "exist",
];

/// Action verbs; matched as whole words, bare or in the past tense
/// ("wash", "washed", "incubated", "pipetted"), so that "fixatives" or
/// "staining" do not count as instructions
pub const ACTION_VERBS: &[&str] = &[
    "add",
    "remove",
    "wash",
    "incubate",
    "mix",
    "centrifuge",
    "pipet",
    "transfer",
    "dilute",
    "culture",
    "plate",
    "seed",
    "treat",
    "fix",
    "stain",
    "mount",
    "image",
];

/// Passive past-tense constructs reporting a performed action
pub const PASSIVE_CONSTRUCTS: &[&str] = &[
    "were added",
    "was added",
    "were mixed",
    "was mixed",
    "were incubated",
    "was incubated",
    "were treated",
    "was treated",
    "were washed",
    "was washed",
    "were centrifuged",
    "was centrifuged",
    "were cultured",
    "was cultured",
    "were prepared",
    "was prepared",
    "were fixed",
    "was fixed",
    "were stained",
    "was stained",
    "were seeded",
    "were plated",
    "were mounted",
    "were imaged",
];

/// Verb stems for the loose test; substring matches, so inflections count
const LOOSE_VERB_STEMS: &[&str] = &[
    "add",
    "remove",
    "wash",
    "incubate",
    "mix",
    "centrifuge",
    "pipet",
    "transfer",
    "dilute",
    "culture",
    "plate",
    "seed",
    "treat",
    "fix",
    "stain",
    "mount",
    "image",
    "prepare",
    "collect",
    "harvest",
    "extract",
    "purify",
];

/// Words naming an experimental quantity
const PARAMETER_WORDS: &[&str] = &["concentration", "volume", "temperature", "speed"];

/// Words that order one step after another
const SEQUENCE_WORDS: &[&str] = &[
    "then",
    "next",
    "subsequently",
    "after",
    "before",
    "following",
    "prior to",
    "until",
];

/// A number followed by a time, temperature, volume, mass, length,
/// concentration, or speed unit
static QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\d+(?:[.,]\d+)?\s*(?:°\s*c|ºc|℃|minutes?|mins?|hours?|hrs?|h|seconds?|secs?|s|days?|overnight|ml|µl|μl|ul|l|mg|µg|μg|ug|ng|g|mm|µm|μm|nm|mol|m|%|x\s*g|rpm)(?:[^\p{L}]|$)",
    )
    .expect("quantity pattern is valid")
});

/// Counts behind a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextAssessment {
    /// Distinct descriptive patterns found
    pub descriptive_matches: usize,
    /// Whether an action verb or passive construct was found
    pub has_action_verb: bool,
}

/// Lexical procedural/descriptive classifier
#[derive(Debug, Clone, Copy)]
pub struct ProceduralTextClassifier {
    min_descriptive_matches: usize,
}

impl Default for ProceduralTextClassifier {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MIN_DESCRIPTIVE_MATCHES)
    }
}

impl ProceduralTextClassifier {
    /// Create a classifier flagging text with at least `min_descriptive_matches` patterns
    pub fn new(min_descriptive_matches: usize) -> Self {
        Self {
            min_descriptive_matches,
        }
    }

    pub fn min_descriptive_matches(&self) -> usize {
        self.min_descriptive_matches
    }

    /// Evaluate every descriptive pattern and look for action verbs
    pub fn assess(&self, text: &str) -> TextAssessment {
        let lower = text.trim().to_lowercase();

        let descriptive_matches = DESCRIPTIVE_PATTERNS
            .iter()
            .filter(|pattern| lower.contains(*pattern))
            .count();

        let has_action_verb = words(&lower).any(is_action_word)
            || PASSIVE_CONSTRUCTS.iter().any(|c| lower.contains(c));

        TextAssessment {
            descriptive_matches,
            has_action_verb,
        }
    }

    /// Background or review prose: enough descriptive phrases and no action at all
    pub fn is_non_procedural(&self, text: &str) -> bool {
        let assessment = self.assess(text);
        assessment.descriptive_matches >= self.min_descriptive_matches && !assessment.has_action_verb
    }

    /// Any sign that the text describes something to do
    pub fn seems_procedural(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();

        LOOSE_VERB_STEMS.iter().any(|stem| lower.contains(stem))
            || PASSIVE_CONSTRUCTS.iter().any(|c| lower.contains(c))
            || PARAMETER_WORDS.iter().any(|w| lower.contains(w))
            || SEQUENCE_WORDS.iter().any(|w| lower.contains(w))
            || QUANTITY.is_match(&lower)
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

fn is_action_word(word: &str) -> bool {
    ACTION_VERBS
        .iter()
        .any(|verb| word == *verb || is_past_tense_of(word, verb))
}

/// Regular past tense: "washed", "incubated", and the doubled final
/// consonant of "pipetted" or "transferred"
fn is_past_tense_of(word: &str, verb: &str) -> bool {
    let Some(suffix) = word.strip_prefix(verb) else {
        return false;
    };
    match suffix {
        "ed" => true,
        "d" => verb.ends_with('e'),
        _ => {
            let mut chars = suffix.chars();
            matches!((chars.next(), chars.as_str()), (Some(c), "ed") if verb.ends_with(c))
        }
    }
}
