pub mod format;
pub mod ledger;
pub mod parsing;

// Re-export key types for easier usage
pub use format::{format_signed_value, normalize_answer};
pub use ledger::{
    AnswerChecker, CellAddress, CheckOutcome, Column, FillableCell, FontScale, LedgerCell,
    LedgerError, LedgerRow, LedgerSession, LedgerTable, PendingCheck, RowStyle, SelectionOutcome,
    SelectionState,
};
pub use parsing::{
    Block, BlockParser, BulletItem, Chunk, ChunkKind, Document, InlineRun, ParserState,
    SegmenterOptions, parse_chunks, parse_document, parse_document_with, segment,
};
