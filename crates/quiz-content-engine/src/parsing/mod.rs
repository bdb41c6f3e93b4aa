//! # Content Parsing
//!
//! Raw annotated string → [`segment`] → chunk list → [`BlockParser`] →
//! [`Document`].
//!
//! Each entry point below starts from a fresh [`ParserState`] unless the
//! caller supplies one. Never reuse a state across unrelated documents.

pub mod blocks;
pub mod inline;
pub mod segment;

#[cfg(test)]
mod tests;

pub use blocks::{Block, BlockParser, BulletItem, Document, ParserState};
pub use inline::InlineRun;
pub use segment::{Chunk, ChunkKind, DEFAULT_BLOCK_SEPARATOR, SegmenterOptions, segment};

/// Parses one content string with the default separator and fresh state.
pub fn parse_document(raw: &str) -> Document {
    parse_document_with(raw, &SegmenterOptions::default())
}

/// Parses one content string with the given segmenter options and fresh state.
pub fn parse_document_with(raw: &str, options: &SegmenterOptions) -> Document {
    let chunks = segment(raw, options);
    let (doc, _) = parse_chunks(&chunks, ParserState::default());
    doc
}

/// Folds `chunks` starting from `state`, returning the document and the
/// state after the last chunk.
pub fn parse_chunks(chunks: &[Chunk], state: ParserState) -> (Document, ParserState) {
    let mut parser = BlockParser::with_state(state);
    for chunk in chunks {
        parser.push(chunk);
    }
    parser.finish()
}
