//! # Inline Parsing
//!
//! Splits paragraph and bullet text into [`InlineRun`]s.
//!
//! The only inline construct is bold emphasis (`**text**`). Unclosed or empty
//! markers stay in the surrounding plain text. Math never reaches this stage:
//! math-bearing chunks are split into blocks before any inline parsing, and
//! their plain remainders are emitted without bold handling.
//!
//! ## Modules
//!
//! - **`types`**: `InlineRun` enum (PlainText, Bold)
//! - **`kinds`**: delimiter ownership (`Bold::MARKER`)
//! - **`cursor`**: byte cursor used by the parser
//! - **`parser`**: `parse_inline()` entry point

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::InlineRun;
