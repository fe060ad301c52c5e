//! Classification of cell number-format codes.
//!
//! Invoice sheets attach a display pattern to each cell independently of the
//! cell's value. Rendering and storage both key off a small set of attributes
//! inferred from that pattern, so the substring rules live here as one
//! ordered table instead of scattered conditionals.

/// Rendering attributes inferred from one number-format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatDecision {
    /// Fractional digits to show, 0 through 3.
    pub decimal_places: u32,
    /// Thousands grouping of the integer digits.
    pub grouped: bool,
    /// Negative values render as `(abs)` instead of `-abs`.
    pub parenthesized_negative: bool,
    /// Prefix values with a `$` literal.
    pub currency: bool,
    /// Render as value x 100 with a trailing `%`; takes exclusive precedence
    /// over grouping, currency, and parentheses.
    pub percentage: bool,
    /// The pattern carries at least one currency, digit, or percent marker.
    /// Bare patterns leave numeric values in their natural string form.
    pub explicit: bool,
}

/// Fractional-digit markers, most specific first. `.000` textually contains
/// `.00` and `.0`, so the scan order decides the precision.
const DECIMAL_MARKERS: [(&str, u32); 3] = [(".000", 3), (".00", 2), (".0", 1)];

/// Any of these makes a pattern apply to numbers at all.
const NUMERIC_MARKERS: [char; 4] = ['$', '0', '#', '%'];

/// Classify a format code. Total: an empty or unrecognized code yields the
/// all-default decision.
pub fn interpret(format: &str) -> FormatDecision {
    let decimal_places = DECIMAL_MARKERS
        .iter()
        .find(|(marker, _)| format.contains(marker))
        .map(|(_, places)| *places)
        .unwrap_or(0);

    FormatDecision {
        decimal_places,
        grouped: format.contains(',') || format.contains('#'),
        parenthesized_negative: format.contains('(') && format.contains(')'),
        currency: format.contains('$'),
        percentage: format.contains('%'),
        explicit: NUMERIC_MARKERS.iter().any(|&marker| format.contains(marker)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_digit_marker_wins_over_its_substrings() {
        assert_eq!(interpret("0.000").decimal_places, 3);
        assert_eq!(interpret("#,##0.000;(#,##0.000)").decimal_places, 3);
    }

    #[test]
    fn decimal_places_by_marker() {
        assert_eq!(interpret("0.00").decimal_places, 2);
        assert_eq!(interpret("#,##0.0").decimal_places, 1);
        assert_eq!(interpret("0").decimal_places, 0);
        assert_eq!(interpret("").decimal_places, 0);
    }

    #[test]
    fn grouping_from_comma_or_hash() {
        assert!(interpret("#,##0.00").grouped);
        assert!(interpret("#0").grouped);
        assert!(interpret("0,000").grouped);
        assert!(!interpret("0.00").grouped);
    }

    #[test]
    fn parentheses_require_both_sides() {
        assert!(interpret("#,##0.00;(#,##0.00)").parenthesized_negative);
        assert!(!interpret("(0.00").parenthesized_negative);
        assert!(!interpret("0.00)").parenthesized_negative);
    }

    #[test]
    fn currency_plain_and_bracketed_locale() {
        assert!(interpret("$#,##0.00").currency);
        assert!(interpret("[$MXN] #,##0.00").currency);
        assert!(!interpret("#,##0.00").currency);
    }

    #[test]
    fn percentage_detected_independently() {
        assert!(interpret("0.00%").percentage);
        assert!(interpret("#,##0.00%").percentage);
        assert!(!interpret("#,##0.00").percentage);
    }

    #[test]
    fn general_and_empty_yield_all_defaults() {
        assert_eq!(interpret("General"), FormatDecision::default());
        assert_eq!(interpret(""), FormatDecision::default());
    }

    #[test]
    fn bare_digit_pattern_is_explicit_but_text_pattern_is_not() {
        assert!(interpret("0").explicit);
        assert!(interpret("#").explicit);
        assert!(!interpret("General").explicit);
        assert!(!interpret("@").explicit);
    }
}
