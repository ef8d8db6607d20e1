//! Valence-aware compound scoring of short review text.

use std::sync::Arc;

use crate::lexicon::Lexicon;

const BOOSTER_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;
const BUT_BEFORE_SCALAR: f64 = 0.5;
const BUT_AFTER_SCALAR: f64 = 1.5;
/// Normalization constant of `s / sqrt(s^2 + alpha)`.
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Booster influence at distance 1, 2 and 3 before the sentiment word.
const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];
const LOOKBACK: usize = 3;

const BOOSTERS: &[&str] = &[
    "absolutely",
    "amazingly",
    "completely",
    "considerably",
    "deeply",
    "especially",
    "exceptionally",
    "extremely",
    "fully",
    "greatly",
    "highly",
    "hugely",
    "incredibly",
    "most",
    "particularly",
    "really",
    "remarkably",
    "so",
    "substantially",
    "thoroughly",
    "totally",
    "tremendously",
    "truly",
    "unbelievably",
    "very",
];

const DAMPENERS: &[&str] = &[
    "almost",
    "barely",
    "hardly",
    "kinda",
    "less",
    "little",
    "marginally",
    "occasionally",
    "partly",
    "scarcely",
    "slightly",
    "somewhat",
    "sorta",
];

const NEGATORS: &[&str] = &[
    "aint", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hadnt", "hasnt", "havent",
    "isnt", "neither", "never", "no", "nobody", "none", "nor", "not", "nothing", "nowhere",
    "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
];

struct Token<'a> {
    raw: &'a str,
    lower: String,
}

impl Token<'_> {
    fn is_all_caps(&self) -> bool {
        self.raw.chars().any(char::is_alphabetic) && !self.raw.chars().any(char::is_lowercase)
    }

    fn is_negator(&self) -> bool {
        self.lower.ends_with("n't") || NEGATORS.contains(&self.lower.as_str())
    }

    fn booster_scalar(&self) -> Option<f64> {
        let word = self.lower.as_str();
        if BOOSTERS.contains(&word) {
            Some(BOOSTER_INCREMENT)
        } else if DAMPENERS.contains(&word) {
            Some(-BOOSTER_INCREMENT)
        } else {
            None
        }
    }
}

/// Scores text against a shared, read-only lexicon.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl SentimentAnalyzer {
    #[must_use]
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Arc::new(Lexicon::builtin()))
    }

    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Compound polarity of `text` in `[-1.0, 1.0]`.
    ///
    /// Sums per-word valences adjusted for boosters, negation,
    /// capitalization and a contrastive "but", adds punctuation emphasis, then
    /// squashes the sum with `s / sqrt(s^2 + 15)`. Text with no lexicon words
    /// scores `0.0`.
    #[must_use]
    pub fn compound(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let caps_emphasis = is_mixed_case(&tokens);
        let mut valences: Vec<f64> = (0..tokens.len())
            .map(|i| self.word_valence(&tokens, i, caps_emphasis))
            .collect();
        apply_contrast(&tokens, &mut valences);

        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += punctuation_emphasis(text);
        } else if sum < 0.0 {
            sum -= punctuation_emphasis(text);
        }

        squash(sum)
    }

    fn word_valence(&self, tokens: &[Token<'_>], i: usize, caps_emphasis: bool) -> f64 {
        let token = &tokens[i];
        let Some(mut valence) = self.lexicon.valence(&token.lower) else {
            return 0.0;
        };
        let direction = if valence < 0.0 { -1.0 } else { 1.0 };

        if caps_emphasis && token.is_all_caps() {
            valence += CAPS_INCREMENT * direction;
        }

        for (distance, decay) in (1..=LOOKBACK).zip(BOOSTER_DECAY) {
            if distance > i {
                break;
            }
            if let Some(scalar) = tokens[i - distance].booster_scalar() {
                valence += scalar * direction * decay;
            }
        }

        if (1..=LOOKBACK.min(i)).any(|d| tokens[i - d].is_negator()) {
            valence *= NEGATION_SCALAR;
        }

        valence
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::builtin()
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(|raw| Token {
            raw,
            lower: raw.to_lowercase(),
        })
        .collect()
}

/// Capitalization only signals emphasis when some, but not all, words are
/// shouted.
fn is_mixed_case(tokens: &[Token<'_>]) -> bool {
    let caps = tokens.iter().filter(|t| t.is_all_caps()).count();
    caps > 0 && caps < tokens.len()
}

fn apply_contrast(tokens: &[Token<'_>], valences: &mut [f64]) {
    let Some(pivot) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (i, v) in valences.iter_mut().enumerate() {
        if i < pivot {
            *v *= BUT_BEFORE_SCALAR;
        } else if i > pivot {
            *v *= BUT_AFTER_SCALAR;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    #[allow(clippy::cast_precision_loss)]
    let exclamation = exclamations as f64 * EXCLAMATION_INCREMENT;
    #[allow(clippy::cast_precision_loss)]
    let question = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => MAX_QUESTION_EMPHASIS,
    };

    exclamation + question
}

fn squash(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}
