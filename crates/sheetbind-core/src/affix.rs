//! Prefix/suffix application.

/// Apply an optional prefix and suffix to a formatted value.
///
/// A suffix whose first character is a plain space has it replaced
/// with a non-breaking space so the unit cannot wrap away from its
/// number. Application is idempotent: a string that already starts
/// with the prefix, or ends with either form of the suffix, is left
/// alone, so repeated dispatch passes never stack affixes.
pub fn apply_affixes(display: &str, prefix: Option<&str>, suffix: Option<&str>) -> String {
    let mut out = display.to_string();

    if let Some(prefix) = prefix.filter(|p| !p.is_empty())
        && !out.starts_with(prefix)
    {
        out = format!("{}{}", prefix, out);
    }

    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        let substituted = match suffix.strip_prefix(' ') {
            Some(rest) => format!("\u{a0}{}", rest),
            None => suffix.to_string(),
        };
        if !out.ends_with(&substituted) && !out.ends_with(suffix) {
            out.push_str(&substituted);
        }
    }

    out
}
