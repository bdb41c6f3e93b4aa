use regex::Regex;
use std::sync::OnceLock;

/// Inline math delimited by single dollars, plus the macros authoring emits
/// around it.
pub struct Math;

/// A piece of text split on complete math spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathPiece<'a> {
    /// Text outside any complete span. May contain an unmatched `$`.
    Text(&'a str),
    /// A complete span including both delimiters.
    Math(&'a str),
}

impl Math {
    pub const DELIMITER: char = '$';
    pub const ESCAPED_DELIMITER: &'static str = "\\$";
    pub const NEWLINE_EQ_MACRO: &'static str = "\\newlineeq";
    pub const NEWLINE_MACRO: &'static str = "\\newline";

    fn span_regex() -> &'static Regex {
        static SPAN_REGEX: OnceLock<Regex> = OnceLock::new();
        SPAN_REGEX.get_or_init(|| Regex::new(r"\$[^$]+\$").expect("Invalid math span regex"))
    }

    pub fn contains_delimiter(text: &str) -> bool {
        text.contains(Self::DELIMITER)
    }

    /// Wraps a bare body in delimiters.
    pub fn wrap(body: &str) -> String {
        format!("{d}{body}{d}", d = Self::DELIMITER)
    }

    /// Literal cleanup applied to every math-bearing chunk before splitting.
    ///
    /// `\newlineeq` must be replaced before `\newline`, which is its prefix.
    pub fn clean(text: &str) -> String {
        text.replace(Self::ESCAPED_DELIMITER, "$")
            .replace("**", "")
            .replace(Self::NEWLINE_EQ_MACRO, "=")
            .replace(Self::NEWLINE_MACRO, " ")
    }

    /// Splits `text` into alternating text and complete-span pieces, in order.
    ///
    /// Empty text pieces are omitted.
    pub fn split(text: &str) -> Vec<MathPiece<'_>> {
        let mut pieces = vec![];
        let mut last = 0;
        for m in Self::span_regex().find_iter(text) {
            if m.start() > last {
                pieces.push(MathPiece::Text(&text[last..m.start()]));
            }
            pieces.push(MathPiece::Math(m.as_str()));
            last = m.end();
        }
        if last < text.len() {
            pieces.push(MathPiece::Text(&text[last..]));
        }
        pieces
    }

    /// The LaTeX body of a complete span, delimiters removed and trimmed.
    pub fn latex(span: &str) -> &str {
        span.strip_prefix(Self::DELIMITER)
            .and_then(|s| s.strip_suffix(Self::DELIMITER))
            .unwrap_or(span)
            .trim()
    }
}
