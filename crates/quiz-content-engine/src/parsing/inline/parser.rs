use super::{cursor::Cursor, kinds::Bold, types::InlineRun};

/// Splits `s` into plain and bold runs on complete `**...**` spans.
///
/// Text between bold spans is kept verbatim, including surrounding
/// whitespace. An opening marker with no matching close, or a pair enclosing
/// nothing, is left in the plain text.
pub fn parse_inline(s: &str) -> Vec<InlineRun> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = 0;

    fn flush_text(out: &mut Vec<InlineRun>, s: &str, start: usize, end: usize) {
        if end > start {
            out.push(InlineRun::PlainText(s[start..end].to_string()));
        }
    }

    while !cur.eof() {
        if let Some((start, inner, end)) = try_parse_bold(&mut cur) {
            flush_text(&mut out, s, text_start, start);
            out.push(InlineRun::Bold(inner.to_string()));
            text_start = end;
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, s, text_start, s.len());
    out
}

/// Attempts to parse a bold span at the cursor.
///
/// Returns `(start, inner, end)` byte offsets and leaves the cursor after the
/// closing marker. On failure the cursor is not moved.
fn try_parse_bold<'a>(cur: &mut Cursor<'a>) -> Option<(usize, &'a str, usize)> {
    if !cur.starts_with(Bold::MARKER.as_bytes()) {
        return None;
    }

    let start = cur.pos();
    let inner_start = start + Bold::MARKER.len();
    let mut probe = cur.clone();
    probe.seek(inner_start);
    let close = probe.find(Bold::MARKER)?;
    if close == inner_start {
        return None;
    }

    let s = cur.s;
    let end = close + Bold::MARKER.len();
    cur.seek(end);
    Some((start, &s[inner_start..close], end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(s: &str) -> InlineRun {
        InlineRun::PlainText(s.to_string())
    }

    fn bold(s: &str) -> InlineRun {
        InlineRun::Bold(s.to_string())
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(parse_inline("hello world"), vec![plain("hello world")]);
    }

    #[test]
    fn parse_bold_in_middle() {
        assert_eq!(
            parse_inline("net **income** total"),
            vec![plain("net "), bold("income"), plain(" total")]
        );
    }

    #[test]
    fn parse_bold_only() {
        assert_eq!(parse_inline("**Assets**"), vec![bold("Assets")]);
    }

    #[test]
    fn parse_adjacent_bold_spans() {
        assert_eq!(parse_inline("**a****b**"), vec![bold("a"), bold("b")]);
    }

    #[test]
    fn unclosed_bold_becomes_text() {
        assert_eq!(parse_inline("**unclosed"), vec![plain("**unclosed")]);
    }

    #[test]
    fn empty_bold_pair_stays_text() {
        assert_eq!(parse_inline("a **** b"), vec![plain("a **** b")]);
    }

    #[test]
    fn odd_marker_count_keeps_trailing_marker() {
        assert_eq!(
            parse_inline("**x** and **y"),
            vec![bold("x"), plain(" and **y")]
        );
    }

    #[test]
    fn multibyte_text_around_bold() {
        assert_eq!(
            parse_inline("café **crème** brûlée"),
            vec![plain("café "), bold("crème"), plain(" brûlée")]
        );
    }

    #[test]
    fn empty_input_has_no_runs() {
        assert!(parse_inline("").is_empty());
    }
}
