//! # Ledger Questions
//!
//! A ledger is a spreadsheet-like question: a grid of rows with up to four
//! columns (`A`..`D`) where each cell is a static label or a fillable
//! multiple-choice slot.
//!
//! ## Lifecycle
//!
//! 1. [`LedgerTable::from_json`] parses the authored grid and shuffles each
//!    slot's options exactly once.
//! 2. A [`LedgerSession`] drives selection: `select_cell` → `choose_option`
//!    (the cell goes pending) → `resolve` with the answer checker's result.
//! 3. The session reports table completion once, on the selection that fills
//!    the last slot.
//!
//! A slot accepts a single attempt. It is locked while its check is in flight
//! and rolled back only if the check itself fails.

pub mod cell;
pub mod error;
pub mod session;
pub mod styling;
pub mod table;

pub use cell::{CellAddress, Column, FillableCell, LedgerCell};
pub use error::LedgerError;
pub use session::{
    AnswerChecker, CheckOutcome, LedgerSession, PendingCheck, SelectionOutcome, SelectionState,
};
pub use styling::{FontScale, RowStyle, row_styles};
pub use table::{LedgerRow, LedgerTable};
