//! # Inline Kinds
//!
//! Inline-specific types that own their delimiters. The parser refers to
//! these constants and never hardcodes `**` itself.

pub mod bold;

pub use bold::Bold;
