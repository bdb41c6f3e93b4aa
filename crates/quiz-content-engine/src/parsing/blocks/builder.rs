use crate::parsing::{
    inline::{InlineRun, parse_inline},
    segment::Chunk,
};

use super::{
    classify::{LineClass, classify_line},
    kinds::{Heading, Math, MathPiece, trim_trailing_colon},
    state::ParserState,
    types::{Block, BulletItem, Document},
};

/// Chunks shorter than this (in chars, after trimming) are candidates for the
/// dangling-delimiter rules.
const DANGLING_LIMIT: usize = 3;

/// Orphaned section colon left behind by upstream splitting.
const SECTION_COLON: char = ':';

/// Folds a chunk stream into a [`Document`].
///
/// Each pushed chunk goes through these rules, first match wins:
///
/// 1. A short chunk containing `$` while idle is a dangling opener: swallow
///    it and expect a math body next.
/// 2. While a body is expected, the chunk is wrapped as `$<text>$` and
///    emitted as math; a dangling closer is then expected.
/// 3. A short chunk containing `$` while a closer is expected is swallowed.
/// 4. A short chunk containing `:` is swallowed.
/// 5. A chunk containing `$` is cleaned and split into math blocks and plain
///    paragraphs (headings allowed, no bold parsing).
/// 6. Anything else is a plain chunk: heading, bullet list with paragraphs,
///    or a single paragraph, with bold parsing.
///
/// The parser never fails. Unmatched delimiters end up as plain text.
pub struct BlockParser {
    state: ParserState,
    out: Vec<Block>,
}

impl BlockParser {
    pub fn new() -> Self {
        Self::with_state(ParserState::default())
    }

    /// Resumes with a state carried over from an earlier run over the same
    /// document.
    pub fn with_state(state: ParserState) -> Self {
        Self { state, out: vec![] }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn push(&mut self, chunk: &Chunk) {
        let trimmed = chunk.trimmed();
        let dangling = trimmed.chars().count() < DANGLING_LIMIT;
        let has_math = Math::contains_delimiter(trimmed);

        if dangling && has_math && self.state.is_idle() {
            log::debug!("swallowing dangling math opener {trimmed:?}");
            self.state.open_math();
            return;
        }

        if self.state.pending_math_open() {
            self.state.take_body();
            self.push_math_bearing(&Math::wrap(trimmed));
            return;
        }

        if dangling && has_math && self.state.pending_math_close() {
            log::debug!("swallowing dangling math closer {trimmed:?}");
            self.state.close_math();
            return;
        }

        if dangling && trimmed.contains(SECTION_COLON) {
            log::debug!("swallowing stray section colon {trimmed:?}");
            return;
        }

        if has_math {
            self.push_math_bearing(&chunk.text);
        } else {
            self.push_plain(&chunk.text);
        }
    }

    /// Returns the document and the state to carry into a continuation of
    /// the same document, if any.
    pub fn finish(self) -> (Document, ParserState) {
        if !self.state.is_idle() {
            log::debug!("document ended with pending math state {:?}", self.state);
        }
        (Document::new(self.out), self.state)
    }

    fn push_math_bearing(&mut self, text: &str) {
        let cleaned = Math::clean(text);
        for piece in Math::split(&cleaned) {
            match piece {
                MathPiece::Math(span) => {
                    let latex = Math::latex(span);
                    if !latex.is_empty() {
                        self.out.push(Block::MathBlock {
                            latex: latex.to_string(),
                        });
                    }
                }
                MathPiece::Text(text) => self.push_math_adjacent(text),
            }
        }
    }

    /// Plain text next to math: heading or a single unparsed run.
    fn push_math_adjacent(&mut self, text: &str) {
        let text = trim_trailing_colon(text).trim();
        if text.is_empty() {
            return;
        }
        if let Some((level, text)) = Heading::parse(text) {
            self.out.push(Block::Heading { level, text });
            return;
        }
        self.out.push(Block::Paragraph {
            runs: vec![InlineRun::PlainText(text.to_string())],
        });
    }

    fn push_plain(&mut self, text: &str) {
        let text = trim_trailing_colon(text);
        if let Some((level, text)) = Heading::parse(text) {
            self.out.push(Block::Heading { level, text });
            return;
        }

        let lines: Vec<LineClass<'_>> = text.lines().map(classify_line).collect();
        if !lines.iter().any(|line| line.is_bullet()) {
            let body = text.trim();
            if !body.is_empty() {
                self.out.push(Block::Paragraph {
                    runs: parse_inline(body),
                });
            }
            return;
        }

        // One list per chunk, placed where its first item appears. Text
        // lines become paragraphs in their original order around it.
        let mut list_at = None;
        let mut items = vec![];
        for line in lines {
            match line {
                LineClass::Blank => {}
                LineClass::Bullet {
                    indent_level,
                    content,
                } => {
                    if list_at.is_none() {
                        list_at = Some(self.out.len());
                    }
                    items.push(BulletItem {
                        indent_level,
                        runs: parse_inline(content),
                    });
                }
                LineClass::Text(text) => self.out.push(Block::Paragraph {
                    runs: parse_inline(text),
                }),
            }
        }
        if let Some(at) = list_at {
            self.out.insert(at, Block::BulletList { items });
        }
    }
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(chunks: &[&str], state: ParserState) -> (Document, ParserState) {
        let mut parser = BlockParser::with_state(state);
        for text in chunks {
            parser.push(&Chunk::text(*text));
        }
        parser.finish()
    }

    fn math(latex: &str) -> Block {
        Block::MathBlock {
            latex: latex.to_string(),
        }
    }

    fn para(text: &str) -> Block {
        Block::Paragraph {
            runs: vec![InlineRun::PlainText(text.to_string())],
        }
    }

    #[test]
    fn dangling_delimiters_reassemble_math() {
        let (doc, state) = run(&["$", "x^2+1", "$"], ParserState::new());
        assert_eq!(doc.blocks, vec![math("x^2+1")]);
        assert!(state.is_idle());
    }

    #[test]
    fn state_is_observable_between_chunks() {
        let mut parser = BlockParser::new();
        parser.push(&Chunk::text("$"));
        assert!(parser.state().pending_math_open());
        parser.push(&Chunk::text("y"));
        assert!(parser.state().pending_math_close());
        parser.push(&Chunk::text(" $ "));
        assert!(parser.state().is_idle());
    }

    #[test]
    fn carried_state_resumes_continuation() {
        let (first, carried) = run(&["Intro", "$"], ParserState::new());
        assert_eq!(first.blocks, vec![para("Intro")]);
        assert!(carried.pending_math_open());

        let (second, state) = run(&["a+b", "$"], carried);
        assert_eq!(second.blocks, vec![math("a+b")]);
        assert!(state.is_idle());
    }

    #[test]
    fn missing_closer_keeps_close_pending() {
        let (doc, state) = run(&["$", "k", "Next paragraph"], ParserState::new());
        assert_eq!(doc.blocks, vec![math("k"), para("Next paragraph")]);
        assert!(state.pending_math_close());
    }

    #[test]
    fn stray_colon_chunks_are_dropped() {
        let (doc, _) = run(&[":", "Body", " :"], ParserState::new());
        assert_eq!(doc.blocks, vec![para("Body")]);
    }

    #[test]
    fn short_text_without_markers_is_kept() {
        let (doc, _) = run(&["ok"], ParserState::new());
        assert_eq!(doc.blocks, vec![para("ok")]);
    }

    #[test]
    fn math_bearing_chunk_splits_into_blocks() {
        let (doc, _) = run(
            &["Profit is: $R - C$ where **R** is revenue"],
            ParserState::new(),
        );
        assert_eq!(
            doc.blocks,
            vec![
                para("Profit is"),
                math("R - C"),
                para("where R is revenue")
            ]
        );
    }

    #[test]
    fn math_adjacent_heading() {
        let (doc, _) = run(&["## Formula: $E = mc^2$"], ParserState::new());
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 2,
                    text: "Formula".into()
                },
                math("E = mc^2")
            ]
        );
    }

    #[test]
    fn unmatched_dollar_degrades_to_text() {
        let (doc, state) = run(&["Costs $5 per unit"], ParserState::new());
        assert_eq!(doc.blocks, vec![para("Costs $5 per unit")]);
        assert!(state.is_idle());
    }

    #[test]
    fn bullet_chunk_keeps_text_lines_as_paragraphs() {
        let (doc, _) = run(
            &["Consider:\n- **Cash**: 100\n  - Petty cash\nEnd of list"],
            ParserState::new(),
        );
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph {
                    runs: vec![InlineRun::PlainText("Consider:".into())]
                },
                Block::BulletList {
                    items: vec![
                        BulletItem {
                            indent_level: 0,
                            runs: vec![
                                InlineRun::Bold("Cash".into()),
                                InlineRun::PlainText(": 100".into())
                            ],
                        },
                        BulletItem {
                            indent_level: 1,
                            runs: vec![InlineRun::PlainText("Petty cash".into())],
                        },
                    ]
                },
                Block::Paragraph {
                    runs: vec![InlineRun::PlainText("End of list".into())]
                },
            ]
        );
    }

    #[test]
    fn plain_chunk_trailing_colon_is_trimmed() {
        let (doc, _) = run(&["Journal entry:"], ParserState::new());
        assert_eq!(doc.blocks, vec![para("Journal entry")]);
    }

    #[test]
    fn whitespace_chunk_emits_nothing() {
        let (doc, state) = run(&["   \n  "], ParserState::new());
        assert!(doc.is_empty());
        assert!(state.is_idle());
    }
}
