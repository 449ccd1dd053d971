// ============================================================
// NAME NORMALIZER
// ============================================================
// Strip leading scheduling prefixes (date stamps, numeric run
// markers) from category labels

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::Cell;

// Applied in order against the progressively-shrinking string: date-like
// stamp first, then digit run with optional slash, then bare slash run.
// Both half-width and full-width slashes occur in source exports.
static PREFIX_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d+[/／]\d+[/／]").unwrap(),
        Regex::new(r"^\d+[/／]?").unwrap(),
        Regex::new(r"^[/／]+").unwrap(),
    ]
});

static LEADING_SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[/／]+").unwrap());

/// Normalize one category label. Total: missing values pass through
/// unchanged, and a value with no recognized prefix is returned as-is
/// (modulo whitespace trimming).
pub fn normalize(value: &Cell) -> Cell {
    match value.as_str() {
        Some(text) => Cell::text(normalize_text(text)),
        None => Cell::Missing,
    }
}

pub fn normalize_text(value: &str) -> String {
    let mut current = value.to_string();
    for rule in PREFIX_RULES.iter() {
        current = rule.replace(&current, "").into_owned();
    }
    let current = LEADING_SLASHES.replace(&current, "");
    current.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_slash_prefix_stripped() {
        assert_eq!(normalize_text("12/Spring Sale"), "Spring Sale");
    }

    #[test]
    fn test_fullwidth_date_stamp_stripped() {
        assert_eq!(normalize_text("03／03／Winter Promo"), "Winter Promo");
    }

    #[test]
    fn test_mixed_width_date_stamp_stripped() {
        assert_eq!(normalize_text("03/03／春のキャンペーン"), "春のキャンペーン");
    }

    #[test]
    fn test_bare_digit_run_stripped() {
        assert_eq!(normalize_text("2024 新春セール"), "新春セール");
    }

    #[test]
    fn test_leading_slash_run_stripped() {
        assert_eq!(normalize_text("//Autumn Deal"), "Autumn Deal");
    }

    #[test]
    fn test_unprefixed_value_unchanged() {
        assert_eq!(normalize_text("Spring Sale"), "Spring Sale");
    }

    #[test]
    fn test_missing_value_passes_through() {
        assert_eq!(normalize(&Cell::Missing), Cell::Missing);
    }

    #[test]
    fn test_empty_text_stays_empty_text() {
        assert_eq!(normalize(&Cell::text("")), Cell::text(""));
    }
}
