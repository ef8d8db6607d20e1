//! Word valences for the sentiment analyzer.

use std::collections::HashMap;
use std::path::Path;

use crate::error::LexiconError;

/// Built-in product-review vocabulary.
///
/// Keys are lowercase single words; values are mean valences on the
/// `-4.0..=4.0` scale.
const BUILTIN: &[(&str, f64)] = &[
    // Positive signals
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("bargain", 1.6),
    ("brilliant", 2.8),
    ("comfortable", 1.5),
    ("comfy", 1.6),
    ("cool", 1.3),
    ("decent", 1.6),
    ("delighted", 2.8),
    ("durable", 1.4),
    ("easy", 1.9),
    ("elegant", 2.1),
    ("enjoy", 2.2),
    ("excellent", 2.7),
    ("fair", 1.3),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fine", 0.8),
    ("flawless", 2.3),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("ideal", 2.3),
    ("impressive", 2.3),
    ("like", 1.5),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("okay", 0.9),
    ("ok", 0.9),
    ("outstanding", 3.0),
    ("perfect", 2.7),
    ("perfectly", 2.7),
    ("pleased", 2.0),
    ("positive", 2.6),
    ("pretty", 2.2),
    ("quality", 1.1),
    ("recommend", 1.5),
    ("recommended", 1.5),
    ("reliable", 1.9),
    ("satisfied", 1.8),
    ("solid", 1.3),
    ("stylish", 1.7),
    ("sturdy", 1.2),
    ("super", 2.9),
    ("superb", 3.1),
    ("value", 1.4),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("worthy", 1.9),
    // Negative signals
    ("annoying", -1.9),
    ("awful", -2.0),
    ("bad", -2.5),
    ("broke", -1.8),
    ("broken", -2.1),
    ("cheap", -0.3),
    ("cheaply", -1.1),
    ("complaint", -1.5),
    ("defect", -1.4),
    ("defective", -1.9),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disappointment", -2.3),
    ("expensive", -0.9),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fake", -2.1),
    ("faulty", -1.8),
    ("flimsy", -1.4),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("issue", -0.6),
    ("issues", -0.8),
    ("junk", -1.9),
    ("mediocre", -1.0),
    ("overpriced", -1.6),
    ("poor", -2.1),
    ("poorly", -2.0),
    ("pricey", -0.4),
    ("problem", -1.7),
    ("problems", -1.7),
    ("refund", -0.5),
    ("regret", -1.8),
    ("return", -0.4),
    ("returned", -0.8),
    ("ripped", -1.5),
    ("scam", -2.9),
    ("terrible", -2.1),
    ("torn", -1.3),
    ("ugly", -2.3),
    ("uncomfortable", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("wasted", -2.2),
    ("worse", -2.1),
    ("worst", -3.1),
    ("worthless", -1.9),
    ("wrong", -2.1),
];

/// Word → valence map.
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            valences: BUILTIN
                .iter()
                .map(|&(word, valence)| (word.to_string(), valence))
                .collect(),
        }
    }

    /// Loads a lexicon in the tab-separated VADER format.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Lexicon::parse`].
    pub fn from_path(path: &Path) -> Result<Self, LexiconError> {
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::parse(&text)?;
        tracing::info!(path = %path.display(), words = lexicon.len(), "loaded sentiment lexicon");
        Ok(lexicon)
    }

    /// Parses `token<TAB>mean[<TAB>std<TAB>raw ratings]` lines.
    ///
    /// Blank lines are skipped. Only the token and mean are used. Tokens are
    /// lowercased; a later duplicate overrides an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Parse`] for a line without a numeric mean and
    /// [`LexiconError::Empty`] if no entries were found.
    pub fn parse(text: &str) -> Result<Self, LexiconError> {
        let mut valences = HashMap::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default().trim();
            if token.is_empty() {
                return Err(LexiconError::Parse {
                    line: idx + 1,
                    reason: "missing token".to_string(),
                });
            }

            let mean = fields
                .next()
                .ok_or_else(|| LexiconError::Parse {
                    line: idx + 1,
                    reason: format!("missing valence for {token:?}"),
                })?
                .trim();
            let valence: f64 = mean.parse().map_err(|_| LexiconError::Parse {
                line: idx + 1,
                reason: format!("valence {mean:?} is not a number"),
            })?;
            if !valence.is_finite() {
                return Err(LexiconError::Parse {
                    line: idx + 1,
                    reason: format!("valence {mean:?} is not finite"),
                });
            }

            valences.insert(token.to_lowercase(), valence);
        }

        if valences.is_empty() {
            return Err(LexiconError::Empty);
        }
        Ok(Self { valences })
    }

    /// Valence for an already-lowercased word.
    #[must_use]
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}
