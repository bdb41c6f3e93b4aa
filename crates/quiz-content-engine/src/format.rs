//! Value formatting shared by the content renderer and the ledger grid.
//!
//! Both functions are total: anything they cannot interpret is handed back
//! verbatim (or trimmed), never rejected.

/// Formats a numeric string using the accounting convention for negatives.
///
/// `"-5"` becomes `"(5)"`. Positive numbers, zero, and anything that does not
/// parse as a finite number are returned unchanged.
pub fn format_signed_value(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value < 0.0 => format!("({})", value.abs()),
        _ => raw.to_string(),
    }
}

/// Cleans up a multi-part answer string for display.
///
/// - A JSON array of strings is joined with `", "` after trimming each part.
/// - A string containing `|` (including the joined form above) is split on
///   `|`, each segment trimmed, and the segments joined with newlines.
/// - Anything else is trimmed.
pub fn normalize_answer(raw: &str) -> String {
    let joined = match serde_json::from_str::<Vec<String>>(raw) {
        Ok(parts) => parts
            .iter()
            .map(|part| part.trim())
            .collect::<Vec<_>>()
            .join(", "),
        Err(_) => raw.to_string(),
    };

    if joined.contains('|') {
        joined
            .split('|')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        joined.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-5", "(5)")]
    #[case("5", "5")]
    #[case("abc", "abc")]
    #[case("-1250.50", "(1250.5)")]
    #[case("-0.25", "(0.25)")]
    #[case("0", "0")]
    #[case("-0", "-0")]
    #[case(" -7 ", "(7)")]
    #[case("", "")]
    #[case("-inf", "-inf")]
    #[case("NaN", "NaN")]
    #[case("-1,200", "-1,200")]
    fn formats_signed_values(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_signed_value(raw), expected);
    }

    #[rstest]
    #[case(r#"["A","B"]"#, "A, B")]
    #[case(r#"[" A ", "B  "]"#, "A, B")]
    #[case("A|B|C", "A\nB\nC")]
    #[case(" A | B ", "A\nB")]
    #[case("plain", "plain")]
    #[case("  padded  ", "padded")]
    #[case(r#"["A|B","C"]"#, "A\nB, C")]
    #[case("[1, 2]", "[1, 2]")]
    #[case("[unterminated", "[unterminated")]
    #[case("", "")]
    fn normalizes_answers(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_answer(raw), expected);
    }

    #[test]
    fn empty_json_array_normalizes_to_empty_string() {
        assert_eq!(normalize_answer("[]"), "");
    }
}
