//! Lenient parsing of numeric text found in documents.

use regex::Regex;
use std::sync::OnceLock;

fn leading_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)").unwrap())
}

/// Parse the number at the start of `text` (`"12px"` is 12).
///
/// Returns `None` when the text does not start with a number.
pub fn parse_number(text: &str) -> Option<f64> {
    leading_number_regex()
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Parse a number, substituting `default` when malformed.
pub fn number_or(text: &str, default: f64, what: &str) -> f64 {
    parse_number(text).unwrap_or_else(|| {
        log::debug!("Malformed {} value {:?}, using default {}", what, text, default);
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_number("0.5"), Some(0.5));
        assert_eq!(parse_number(" 12 "), Some(12.0));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number(".25"), Some(0.25));
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }

    #[test]
    fn test_leading_number_with_suffix() {
        assert_eq!(parse_number("12px"), Some(12.0));
        assert_eq!(parse_number("3.5 deg"), Some(3.5));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(number_or("wide", 1.0, "stroke-width"), 1.0);
    }
}
