//! Splits a raw content string into chunks for the block parser.
//!
//! The segmenter only cuts text; it never interprets headings, bullets or
//! bold markers.

use serde::Serialize;

use super::blocks::kinds::{Math, MathPiece};

/// The literal token authoring places between blocks.
pub const DEFAULT_BLOCK_SEPARATOR: &str = "~~~";

/// Segmenter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterOptions {
    /// Literal block separator. An empty separator disables block splitting.
    pub block_separator: String,
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self {
            block_separator: DEFAULT_BLOCK_SEPARATOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkKind {
    RawText,
    /// A complete `$...$` span, delimiters included.
    RawMath,
}

/// One atomic piece of segmented input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub kind: ChunkKind,
    /// Untrimmed text, so bullet indentation on the first line survives.
    pub text: String,
}

impl Chunk {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ChunkKind::RawText,
            text: text.into(),
        }
    }

    pub fn math(text: impl Into<String>) -> Self {
        Self {
            kind: ChunkKind::RawMath,
            text: text.into(),
        }
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn is_math(&self) -> bool {
        self.kind == ChunkKind::RawMath
    }
}

/// Splits `raw` into ordered chunks.
///
/// The input is first cut on the block separator. If the whole input
/// contains a `$` (math-aware mode) each piece is further split so that every
/// complete `$...$` span becomes its own [`ChunkKind::RawMath`] chunk between
/// the surrounding text chunks. Otherwise (plain mode) every piece is a
/// [`ChunkKind::RawText`] chunk. Chunks that are empty after trimming are
/// dropped.
pub fn segment(raw: &str, options: &SegmenterOptions) -> Vec<Chunk> {
    let math_aware = Math::contains_delimiter(raw);
    let mut chunks = vec![];

    for piece in split_blocks(raw, &options.block_separator) {
        if math_aware {
            chunks.extend(Math::split(piece).into_iter().map(|p| match p {
                MathPiece::Text(text) => Chunk::text(text),
                MathPiece::Math(span) => Chunk::math(span),
            }));
        } else {
            chunks.push(Chunk::text(piece));
        }
    }

    chunks.retain(|chunk| !chunk.trimmed().is_empty());
    chunks
}

fn split_blocks<'a>(raw: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return vec![raw];
    }
    raw.split(separator).collect()
}
