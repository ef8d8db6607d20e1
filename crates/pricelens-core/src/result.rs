//! The payload assembled once per pipeline run.

use serde::{Deserialize, Serialize};

use crate::offer::Offer;

/// Mean compound sentiment over the sampled reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Mean compound score in `[-1.0, 1.0]`. `0.0` when nothing was sampled.
    pub score: f64,
    /// The review snippets that were scored, in sampling order.
    pub reviews: Vec<String>,
}

impl SentimentSummary {
    /// The summary for an empty sample.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            reviews: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub product: String,
    /// Offers in rank order.
    pub prices: Vec<Offer>,
    pub sentiment: SentimentSummary,
}

/// Title-cases a classifier label.
///
/// A letter at the start of the string or after any non-letter is
/// uppercased; every other letter is lowercased. `"running_shoe"` becomes
/// `"Running_Shoe"`.
#[must_use]
pub fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev_is_letter = false;
    for ch in label.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_handles_underscored_labels() {
        assert_eq!(title_case("running_shoe"), "Running_Shoe");
    }

    #[test]
    fn title_case_lowercases_inner_letters() {
        assert_eq!(title_case("jEAN jacket"), "Jean Jacket");
    }

    #[test]
    fn title_case_restarts_after_digits_and_apostrophes() {
        assert_eq!(title_case("4x4 truck"), "4X4 Truck");
        assert_eq!(title_case("o'neill"), "O'Neill");
    }

    #[test]
    fn title_case_empty() {
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn pipeline_result_serializes_expected_shape() {
        let result = PipelineResult {
            product: "Sunglasses".to_string(),
            prices: vec![Offer::new("Amazon", 19.999, 4.4).unwrap()],
            sentiment: SentimentSummary {
                score: 0.5,
                reviews: vec!["Good product".to_string()],
            },
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["product"], "Sunglasses");
        assert_eq!(json["prices"][0]["site"], "Amazon");
        assert_eq!(json["prices"][0]["price"], 20.0);
        assert_eq!(json["sentiment"]["reviews"][0], "Good product");
    }

    #[test]
    fn neutral_summary_is_zero_and_empty() {
        let s = SentimentSummary::neutral();
        assert!(s.score.abs() < f64::EPSILON);
        assert!(s.reviews.is_empty());
    }
}
