//! # Block Parsing
//!
//! Folds a segmented chunk stream into a [`Document`].
//!
//! ## Modules
//!
//! - **`types`**: `Document`, `Block`, `BulletItem`
//! - **`state`**: `ParserState`, the caller-owned math-continuation state
//! - **`kinds`**: marker ownership for headings, bullets and math
//! - **`classify`**: per-line classification of plain chunks
//! - **`builder`**: `BlockParser`, the per-chunk rule machine
//!
//! ## Key Invariants
//!
//! - No global state: everything that survives between chunks lives in
//!   `ParserState`, which the caller passes in and gets back
//! - Parsing is total and deterministic for a given chunk list and state

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod state;
pub mod types;

pub use builder::BlockParser;
pub use classify::{LineClass, classify_line};
pub use state::ParserState;
pub use types::{Block, BulletItem, Document};
