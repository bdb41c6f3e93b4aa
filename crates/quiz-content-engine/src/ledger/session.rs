use std::fmt;

use super::{cell::CellAddress, error::LedgerError, table::LedgerTable};

/// The checker's verdict on one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub is_correct: bool,
    /// Authoritative correct value. Empty keeps the authored one.
    pub correct_value: String,
}

/// External collaborator that scores a selection and owns persistence.
pub trait AnswerChecker {
    type Error: fmt::Display;

    fn check(
        &mut self,
        selected_option: &str,
        cell_reference: &str,
    ) -> Result<CheckOutcome, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    /// Options of this cell are on offer.
    Selecting(CellAddress),
}

/// A chosen option whose check has not resolved yet.
///
/// The cell stays locked until this token is handed back to
/// [`LedgerSession::resolve`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending check locks its cell until resolved"]
pub struct PendingCheck {
    cell: CellAddress,
    reference: String,
    option: String,
}

impl PendingCheck {
    pub fn cell(&self) -> CellAddress {
        self.cell
    }

    /// Cell reference to pass to the checker, e.g. `"B2"`.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn option(&self) -> &str {
        &self.option
    }
}

/// Result of a resolved selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub cell: CellAddress,
    pub value: String,
    pub is_correct: bool,
    /// Set on exactly one outcome per table: the one that filled the last slot.
    pub table_complete: bool,
}

/// Drives the `Idle → Selecting(cell) → Idle` flow over one table.
#[derive(Debug)]
pub struct LedgerSession {
    table: LedgerTable,
    selection: SelectionState,
}

impl LedgerSession {
    pub fn new(table: LedgerTable) -> Self {
        Self {
            table,
            selection: SelectionState::Idle,
        }
    }

    pub fn table(&self) -> &LedgerTable {
        &self.table
    }

    pub fn into_table(self) -> LedgerTable {
        self.table
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Opens a slot for selection and returns its (frozen) options.
    ///
    /// Selecting while another cell is selected moves the selection.
    ///
    /// # Errors
    ///
    /// Fails for missing cells, labels, answered slots, and slots whose
    /// check is still in flight.
    pub fn select_cell(&mut self, cell: CellAddress) -> Result<&[String], LedgerError> {
        let slot = self
            .table
            .cell(cell)
            .ok_or(LedgerError::NoSuchCell(cell))?
            .as_fillable()
            .ok_or(LedgerError::NotFillable(cell))?;
        if slot.is_pending() {
            return Err(LedgerError::CheckPending(cell));
        }
        if !slot.is_selectable() {
            return Err(LedgerError::AlreadyAnswered(cell));
        }

        self.selection = SelectionState::Selecting(cell);
        Ok(slot.options())
    }

    pub fn cancel_selection(&mut self) {
        self.selection = SelectionState::Idle;
    }

    /// Chooses `option` for the selected cell and locks the cell.
    ///
    /// The session returns to `Idle`. Pass the returned token's option and
    /// reference to the checker, then hand it to [`LedgerSession::resolve`].
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotSelecting`] if no cell is selected,
    /// [`LedgerError::UnknownOption`] if the cell does not offer `option`.
    pub fn choose_option(&mut self, option: &str) -> Result<PendingCheck, LedgerError> {
        let SelectionState::Selecting(cell) = self.selection else {
            return Err(LedgerError::NotSelecting);
        };
        let slot = self
            .table
            .cell_mut(cell)
            .and_then(|c| c.as_fillable_mut())
            .ok_or(LedgerError::NoSuchCell(cell))?;
        if !slot.options().iter().any(|o| o == option) {
            return Err(LedgerError::UnknownOption {
                cell,
                option: option.to_string(),
            });
        }

        slot.mark_pending(option.to_string());
        self.selection = SelectionState::Idle;
        Ok(PendingCheck {
            cell,
            reference: cell.reference(),
            option: option.to_string(),
        })
    }

    /// Chooses the option at `index` in the cell's shuffled order.
    ///
    /// # Errors
    ///
    /// As [`LedgerSession::choose_option`]; an out-of-range index is
    /// [`LedgerError::UnknownOption`].
    pub fn choose_option_at(&mut self, index: usize) -> Result<PendingCheck, LedgerError> {
        let SelectionState::Selecting(cell) = self.selection else {
            return Err(LedgerError::NotSelecting);
        };
        let option = self
            .table
            .cell(cell)
            .and_then(|c| c.as_fillable())
            .and_then(|slot| slot.options().get(index))
            .cloned()
            .ok_or_else(|| LedgerError::UnknownOption {
                cell,
                option: format!("#{index}"),
            })?;
        self.choose_option(&option)
    }

    /// Folds a checker result back into the pending cell.
    ///
    /// On success the chosen option is committed whatever its correctness.
    /// On failure the cell is reopened so the user can retry.
    ///
    /// # Errors
    ///
    /// [`LedgerError::CheckFailed`] when `result` is an error (after the
    /// rollback), [`LedgerError::StaleCheck`] if the cell is no longer
    /// pending on this option.
    pub fn resolve<E: fmt::Display>(
        &mut self,
        pending: PendingCheck,
        result: Result<CheckOutcome, E>,
    ) -> Result<SelectionOutcome, LedgerError> {
        let cell = pending.cell;
        let slot = self
            .table
            .cell_mut(cell)
            .and_then(|c| c.as_fillable_mut())
            .ok_or(LedgerError::NoSuchCell(cell))?;
        if slot.pending_option() != Some(pending.option.as_str()) {
            return Err(LedgerError::StaleCheck(cell));
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Answer check for {cell} failed, reopening cell: {e}");
                slot.rollback();
                return Err(LedgerError::CheckFailed {
                    cell,
                    reason: e.to_string(),
                });
            }
        };

        let is_correct = outcome.is_correct;
        slot.commit(outcome);
        let table_complete = self.table.take_completion_signal();
        Ok(SelectionOutcome {
            cell,
            value: pending.option,
            is_correct,
            table_complete,
        })
    }

    /// Runs choose → check → resolve against a synchronous checker.
    ///
    /// # Errors
    ///
    /// Any error from [`LedgerSession::choose_option`] or
    /// [`LedgerSession::resolve`].
    pub fn answer<C: AnswerChecker>(
        &mut self,
        option: &str,
        checker: &mut C,
    ) -> Result<SelectionOutcome, LedgerError> {
        let pending = self.choose_option(option)?;
        let result = checker.check(pending.option(), pending.reference());
        self.resolve(pending, result)
    }
}
