use super::cell::CellAddress;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid ledger table: {reason}")]
    InvalidTable { reason: String },
    #[error("No cell at {0}")]
    NoSuchCell(CellAddress),
    #[error("Cell {0} is a label")]
    NotFillable(CellAddress),
    #[error("Cell {0} has already been answered")]
    AlreadyAnswered(CellAddress),
    #[error("Cell {0} is waiting for its answer check")]
    CheckPending(CellAddress),
    #[error("No cell is selected")]
    NotSelecting,
    #[error("Cell {cell} does not offer option {option:?}")]
    UnknownOption { cell: CellAddress, option: String },
    #[error("Check for cell {0} no longer matches the cell")]
    StaleCheck(CellAddress),
    #[error("Answer check for cell {cell} failed: {reason}")]
    CheckFailed { cell: CellAddress, reason: String },
}
