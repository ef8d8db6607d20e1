//! Extraction of price/rating pairs from an Amazon search results page.

use std::sync::LazyLock;

use pricelens_core::Offer;
use regex::Regex;

static PRICE_WHOLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span\b[^>]*\bclass\s*=\s*["'][^"']*\ba-price-whole\b[^"']*["'][^>]*>([^<]*)"#)
        .expect("valid regex")
});

static ICON_ALT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span\b[^>]*\bclass\s*=\s*["'][^"']*\ba-icon-alt\b[^"']*["'][^>]*>([^<]*)"#)
        .expect("valid regex")
});

/// Extracts up to `max_items` offers from a search results page.
///
/// Price elements (`span.a-price-whole`) and rating elements
/// (`span.a-icon-alt`) are collected separately and paired by position.
/// When either list is empty the page yields nothing. Pairs that fail to
/// parse are skipped one by one; the remaining pairs still produce offers.
#[must_use]
pub fn parse_search_results(html: &str, site: &str, max_items: usize) -> Vec<Offer> {
    let prices = capture_texts(&PRICE_WHOLE_RE, html);
    let ratings = capture_texts(&ICON_ALT_RE, html);

    if prices.is_empty() || ratings.is_empty() {
        tracing::debug!(
            site,
            prices = prices.len(),
            ratings = ratings.len(),
            "search page has no price/rating pairs"
        );
        return Vec::new();
    }

    prices
        .iter()
        .zip(ratings.iter())
        .take(max_items)
        .filter_map(|(price_text, rating_text)| {
            let offer = parse_price(price_text)
                .zip(parse_rating(rating_text))
                .and_then(|(price, rating)| Offer::new(site, price, rating).ok());
            if offer.is_none() {
                tracing::debug!(
                    site,
                    price_text = price_text.as_str(),
                    rating_text = rating_text.as_str(),
                    "skipping unparseable search result"
                );
            }
            offer
        })
        .collect()
}

fn capture_texts(re: &Regex, html: &str) -> Vec<String> {
    re.captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Parses a price by discarding every character other than digits and `.`.
///
/// `"1,299."` parses as `1299.0`.
pub(crate) fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Parses the leading number of a rating text such as `"4.5 out of 5 stars"`.
pub(crate) fn parse_rating(text: &str) -> Option<f64> {
    text.split_whitespace().next()?.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_block(price: &str, rating: &str) -> String {
        format!(
            r#"<div data-component-type="s-search-result">
  <span class="a-price" data-a-size="xl"><span class="a-offscreen">${price}</span>
    <span aria-hidden="true"><span class="a-price-symbol">$</span><span class="a-price-whole">{price}<span class="a-price-decimal">.</span></span><span class="a-price-fraction">99</span></span></span>
  <i class="a-icon a-icon-star-small a-star-small-4-5"><span class="a-icon-alt">{rating}</span></i>
</div>"#
        )
    }

    #[test]
    fn parses_pairs_in_page_order() {
        let html = [
            result_block("29", "4.5 out of 5 stars"),
            result_block("1,299", "4.1 out of 5 stars"),
        ]
        .concat();

        let offers = parse_search_results(&html, "Amazon", 3);
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].source(), "Amazon");
        assert!((offers[0].price() - 29.0).abs() < f64::EPSILON);
        assert!((offers[0].rating() - 4.5).abs() < f64::EPSILON);
        assert!((offers[1].price() - 1299.0).abs() < f64::EPSILON);
        assert!((offers[1].rating() - 4.1).abs() < f64::EPSILON);
    }

    #[test]
    fn takes_only_first_max_items_pairs() {
        let html: String = (1..=5)
            .map(|i| result_block(&format!("{}", 10 + i), "4.0 out of 5 stars"))
            .collect();
        let offers = parse_search_results(&html, "Amazon", 3);
        assert_eq!(offers.len(), 3);
        assert!((offers[2].price() - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn skips_bad_pair_but_keeps_the_rest() {
        let html = [
            result_block("29", "4.5 out of 5 stars"),
            result_block("19", "Previous page"),
            result_block("39", "4.9 out of 5 stars"),
        ]
        .concat();
        let offers = parse_search_results(&html, "Amazon", 3);
        assert_eq!(offers.len(), 2);
        assert!((offers[1].price() - 39.0).abs() < f64::EPSILON);
    }

    #[test]
    fn page_without_ratings_yields_nothing() {
        let html = r#"<span class="a-price-whole">29</span><span class="a-price-whole">31</span>"#;
        assert!(parse_search_results(html, "Amazon", 3).is_empty());
    }

    #[test]
    fn page_without_results_yields_nothing() {
        assert!(parse_search_results("<html><body>captcha</body></html>", "Amazon", 3).is_empty());
    }

    #[test]
    fn rating_outside_scale_is_rejected_by_offer_validation() {
        let html = result_block("29", "7.5 out of 5 stars");
        assert!(parse_search_results(&html, "Amazon", 3).is_empty());
    }

    #[test]
    fn parse_price_strips_currency_and_separators() {
        assert_eq!(parse_price("$1,299."), Some(1299.0));
        assert_eq!(parse_price("₹ 2,499"), Some(2499.0));
        assert_eq!(parse_price("free"), None);
    }

    #[test]
    fn parse_rating_reads_leading_token() {
        assert_eq!(parse_rating("4.7 out of 5 stars"), Some(4.7));
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("stars"), None);
    }
}
