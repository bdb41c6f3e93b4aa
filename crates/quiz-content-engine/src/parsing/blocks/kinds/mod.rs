//! # Block Kinds
//!
//! Block-specific types that own their syntax markers. Parser code calls
//! these helpers; it never hardcodes `#`, `-` or `$` itself.
//!
//! - **`Heading`**: `#` to `####` followed by a space
//! - **`Bullet`**: leading `-`, indent level from the dash offset
//! - **`Math`**: `$...$` spans plus the authoring macro cleanup

pub mod bullet;
pub mod heading;
pub mod math;

pub use bullet::Bullet;
pub use heading::Heading;
pub use math::{Math, MathPiece};

/// Drops a single trailing colon (after trailing whitespace) if present.
///
/// Section titles in authored content routinely end with `:`.
pub fn trim_trailing_colon(text: &str) -> &str {
    let text = text.trim_end();
    text.strip_suffix(':').unwrap_or(text)
}
