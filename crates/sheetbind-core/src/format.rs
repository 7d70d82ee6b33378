//! Display formatting for bound values.

/// Placeholder rendered for missing or empty cells.
pub const NOT_AVAILABLE: &str = "N/A";

/// How a raw cell string becomes display text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatKind {
    Percent,
    Currency,
    Raw,
}

impl FormatKind {
    /// Map a format attribute value. Unknown names take the default
    /// (raw-equivalent) path rather than failing.
    pub fn from_attr(value: &str) -> Option<FormatKind> {
        match value.trim() {
            "percent" => Some(FormatKind::Percent),
            "currency" => Some(FormatKind::Currency),
            "raw" => Some(FormatKind::Raw),
            _ => None,
        }
    }
}

/// Where the currency symbol goes relative to the numeral.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymbolPosition {
    Before,
    #[default]
    After,
}

impl SymbolPosition {
    /// Anything other than "before" means after.
    pub fn from_attr(value: &str) -> SymbolPosition {
        if value.trim() == "before" {
            SymbolPosition::Before
        } else {
            SymbolPosition::After
        }
    }
}

/// Currency rendering options carried by a directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberOptions {
    pub symbol: String,
    pub position: SymbolPosition,
    pub locale: String,
    pub decimals: usize,
}

impl Default for NumberOptions {
    fn default() -> Self {
        NumberOptions {
            symbol: "€".to_string(),
            position: SymbolPosition::After,
            locale: "fr-FR".to_string(),
            decimals: 0,
        }
    }
}

/// Format a resolved cell value for display.
///
/// A missing or trim-empty value renders as `"N/A"` in every mode.
/// Percent keeps only the numeral characters and renders them with a
/// literal leading `+` regardless of sign; that is the display
/// convention, not a sign computation. Currency localizes the numeral
/// and attaches the symbol. Values that stop looking numeric after
/// stripping fall back to the trimmed raw text.
pub fn format_value(
    value: Option<&str>,
    kind: Option<FormatKind>,
    opts: &NumberOptions,
) -> String {
    let v = value.unwrap_or("").trim();
    let fallback = || {
        if v.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            v.to_string()
        }
    };

    match kind {
        None | Some(FormatKind::Raw) => fallback(),
        Some(FormatKind::Percent) => {
            let numeric = strip_numeric(v);
            if numeric.is_empty() {
                fallback()
            } else {
                format!("+{}%", numeric)
            }
        }
        Some(FormatKind::Currency) => {
            let numeric = strip_numeric(v);
            if numeric.is_empty() {
                return fallback();
            }
            let formatted = localize_numeral(&numeric, &opts.locale, opts.decimals);
            match opts.position {
                SymbolPosition::Before => format!("{}{}", opts.symbol, formatted),
                SymbolPosition::After => format!("{}{}", formatted, opts.symbol),
            }
        }
    }
}

/// Keep only the characters that can appear in a plain numeral.
fn strip_numeric(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Highest accepted fraction-digit count; larger requests render the
/// numeral unformatted.
const MAX_DECIMALS: usize = 20;

/// Render a numeral with the locale's digit grouping and decimal
/// separator, rounded to a fixed number of decimal places.
///
/// Numerals that do not parse, locales without a separator table
/// entry, and fraction-digit counts beyond `MAX_DECIMALS` all pass
/// the numeral through unchanged; localization never fails a dispatch.
fn localize_numeral(numeric: &str, locale: &str, decimals: usize) -> String {
    if decimals > MAX_DECIMALS {
        return numeric.to_string();
    }
    let Ok(n) = numeric.parse::<f64>() else {
        return numeric.to_string();
    };
    let Some((group, decimal)) = separators(locale) else {
        return numeric.to_string();
    };

    let rounded = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rounded.as_str(), None),
    };

    let mut out = String::new();
    if n < 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, group));
    if let Some(f) = frac_part {
        out.push(decimal);
        out.push_str(f);
    }
    out
}

/// Insert a group separator every three digits, counting from the right.
fn group_digits(digits: &str, sep: char) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(*b as char);
    }
    out
}

/// Grouping and decimal separators by primary language subtag.
fn separators(locale: &str) -> Option<(char, char)> {
    let primary = locale
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match primary.as_str() {
        "fr" => Some(('\u{a0}', ',')),
        "de" | "es" | "it" | "nl" => Some(('.', ',')),
        "en" => Some((',', '.')),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_is_not_available() {
        let opts = NumberOptions::default();
        assert_eq!(format_value(None, None, &opts), "N/A");
        assert_eq!(format_value(Some("   "), None, &opts), "N/A");
        assert_eq!(format_value(None, Some(FormatKind::Percent), &opts), "N/A");
        assert_eq!(format_value(None, Some(FormatKind::Currency), &opts), "N/A");
    }

    #[test]
    fn test_raw_passes_trimmed_value() {
        let opts = NumberOptions::default();
        assert_eq!(
            format_value(Some("  hello "), Some(FormatKind::Raw), &opts),
            "hello"
        );
        assert_eq!(format_value(Some(" 42 "), None, &opts), "42");
    }

    #[test]
    fn test_percent_keeps_literal_leading_plus() {
        let opts = NumberOptions::default();
        assert_eq!(
            format_value(Some("12"), Some(FormatKind::Percent), &opts),
            "+12%"
        );
        // The + is unconditional, even for negative input.
        assert_eq!(
            format_value(Some("-5.2"), Some(FormatKind::Percent), &opts),
            "+-5.2%"
        );
    }

    #[test]
    fn test_percent_strips_non_numeric_chars() {
        let opts = NumberOptions::default();
        assert_eq!(
            format_value(Some("env. 12 %"), Some(FormatKind::Percent), &opts),
            "+12%"
        );
    }

    #[test]
    fn test_percent_non_numeric_falls_back_to_raw() {
        let opts = NumberOptions::default();
        assert_eq!(
            format_value(Some(" croissance "), Some(FormatKind::Percent), &opts),
            "croissance"
        );
    }

    #[test]
    fn test_currency_default_locale_and_symbol() {
        let opts = NumberOptions::default();
        assert_eq!(
            format_value(Some("1234567"), Some(FormatKind::Currency), &opts),
            "1\u{a0}234\u{a0}567€"
        );
    }

    #[test]
    fn test_currency_symbol_before_with_decimals() {
        let opts = NumberOptions {
            symbol: "$".to_string(),
            position: SymbolPosition::Before,
            locale: "en-US".to_string(),
            decimals: 2,
        };
        assert_eq!(
            format_value(Some("1234.5"), Some(FormatKind::Currency), &opts),
            "$1,234.50"
        );
    }

    #[test]
    fn test_currency_rounds_to_decimal_count() {
        let opts = NumberOptions {
            locale: "en-US".to_string(),
            ..NumberOptions::default()
        };
        assert_eq!(
            format_value(Some("999.6"), Some(FormatKind::Currency), &opts),
            "1,000€"
        );
    }

    #[test]
    fn test_currency_unknown_locale_degrades_to_stripped_numeral() {
        let opts = NumberOptions {
            locale: "xx-XX".to_string(),
            ..NumberOptions::default()
        };
        assert_eq!(
            format_value(Some("1234"), Some(FormatKind::Currency), &opts),
            "1234€"
        );
    }

    #[test]
    fn test_currency_unparseable_numeral_degrades_unformatted() {
        let opts = NumberOptions::default();
        // Stripping "1.2.3" leaves something that is not a number.
        assert_eq!(
            format_value(Some("1.2.3"), Some(FormatKind::Currency), &opts),
            "1.2.3€"
        );
    }

    #[test]
    fn test_currency_oversized_decimals_degrades_unformatted() {
        let opts = NumberOptions {
            decimals: 100_000,
            ..NumberOptions::default()
        };
        assert_eq!(
            format_value(Some("12.5"), Some(FormatKind::Currency), &opts),
            "12.5€"
        );
    }

    #[test]
    fn test_currency_decimals_at_cap_still_localize() {
        let opts = NumberOptions {
            locale: "en-US".to_string(),
            decimals: MAX_DECIMALS,
            ..NumberOptions::default()
        };
        let out = format_value(Some("1.5"), Some(FormatKind::Currency), &opts);
        assert!(out.starts_with("1.5"));
        assert!(out.ends_with('€'));
    }

    #[test]
    fn test_currency_negative_value() {
        let opts = NumberOptions {
            locale: "en-US".to_string(),
            ..NumberOptions::default()
        };
        assert_eq!(
            format_value(Some("-1234"), Some(FormatKind::Currency), &opts),
            "-1,234€"
        );
    }

    #[test]
    fn test_unknown_format_attr_takes_default_path() {
        assert_eq!(FormatKind::from_attr("fancy"), None);
        assert_eq!(FormatKind::from_attr("percent"), Some(FormatKind::Percent));
    }

    #[test]
    fn test_symbol_position_from_attr() {
        assert_eq!(SymbolPosition::from_attr("before"), SymbolPosition::Before);
        assert_eq!(SymbolPosition::from_attr("after"), SymbolPosition::After);
        assert_eq!(SymbolPosition::from_attr(""), SymbolPosition::After);
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", ','), "1");
        assert_eq!(group_digits("123", ','), "123");
        assert_eq!(group_digits("1234", ','), "1,234");
        assert_eq!(group_digits("1234567", ','), "1,234,567");
    }
}
