use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::format::format_signed_value;

use super::session::CheckOutcome;

/// A ledger column. Tables have between two and four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Column {
    A,
    B,
    C,
    D,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::A, Column::B, Column::C, Column::D];

    pub fn letter(self) -> char {
        match self {
            Column::A => 'A',
            Column::B => 'B',
            Column::C => 'C',
            Column::D => 'D',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Column::A),
            'B' => Some(Column::B),
            'C' => Some(Column::C),
            'D' => Some(Column::D),
            _ => None,
        }
    }
}

/// Position of a cell. `row` is 0-based; the display form is 1-based, so row
/// 0 column A is `"A1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellAddress {
    pub row: usize,
    pub column: Column,
}

impl CellAddress {
    pub fn new(row: usize, column: Column) -> Self {
        Self { row, column }
    }

    /// The reference string sent to the answer checker.
    pub fn reference(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column.letter(), self.row + 1)
    }
}

impl FromStr for CellAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let column = chars
            .next()
            .and_then(Column::from_letter)
            .ok_or_else(|| format!("invalid column in cell reference {s:?}"))?;
        let row: usize = chars
            .as_str()
            .parse()
            .map_err(|_| format!("invalid row in cell reference {s:?}"))?;
        if row == 0 {
            return Err(format!("rows are numbered from 1 in {s:?}"));
        }
        Ok(Self::new(row - 1, column))
    }
}

/// A grid cell: either fixed text or a multiple-choice slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCell {
    Label { text: String },
    Fillable(FillableCell),
}

impl LedgerCell {
    pub fn label(text: impl Into<String>) -> Self {
        LedgerCell::Label { text: text.into() }
    }

    pub fn as_fillable(&self) -> Option<&FillableCell> {
        match self {
            LedgerCell::Fillable(cell) => Some(cell),
            LedgerCell::Label { .. } => None,
        }
    }

    pub(crate) fn as_fillable_mut(&mut self) -> Option<&mut FillableCell> {
        match self {
            LedgerCell::Fillable(cell) => Some(cell),
            LedgerCell::Label { .. } => None,
        }
    }

    /// What the grid shows for this cell, if anything yet.
    pub fn display_text(&self) -> Option<String> {
        match self {
            LedgerCell::Label { text } => Some(text.clone()),
            LedgerCell::Fillable(cell) => cell.display_value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SlotState {
    Open,
    /// An option was chosen and its check has not resolved.
    Pending { option: String },
    Answered { value: String, is_correct: bool },
}

/// A multiple-choice slot. Options are shuffled once when the table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillableCell {
    options: Vec<String>,
    correct_value: String,
    explanation: Option<String>,
    state: SlotState,
}

impl FillableCell {
    /// Builds an unanswered slot. `options` are used in the given order.
    pub fn new(options: Vec<String>, correct_value: String, explanation: Option<String>) -> Self {
        Self {
            options,
            correct_value,
            explanation,
            state: SlotState::Open,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_value(&self) -> &str {
        &self.correct_value
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// The chosen option, once its check has resolved.
    pub fn value(&self) -> Option<&str> {
        match &self.state {
            SlotState::Answered { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_correct(&self) -> Option<bool> {
        match self.state {
            SlotState::Answered { is_correct, .. } => Some(is_correct),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SlotState::Pending { .. })
    }

    /// Has a non-empty committed value.
    pub fn is_answered(&self) -> bool {
        self.value().is_some_and(|value| !value.is_empty())
    }

    /// Accepts a selection only while open.
    pub fn is_selectable(&self) -> bool {
        matches!(self.state, SlotState::Open)
    }

    /// The chosen value formatted for display, or the correct value if the
    /// choice was wrong.
    pub fn display_value(&self) -> Option<String> {
        match &self.state {
            SlotState::Answered {
                value,
                is_correct: true,
            } => Some(format_signed_value(value)),
            SlotState::Answered {
                is_correct: false, ..
            } => Some(format_signed_value(&self.correct_value)),
            _ => None,
        }
    }

    pub(crate) fn pending_option(&self) -> Option<&str> {
        match &self.state {
            SlotState::Pending { option } => Some(option),
            _ => None,
        }
    }

    pub(crate) fn mark_pending(&mut self, option: String) {
        self.state = SlotState::Pending { option };
    }

    pub(crate) fn commit(&mut self, outcome: CheckOutcome) {
        let SlotState::Pending { option } = &self.state else {
            return;
        };
        let option = option.clone();
        if !outcome.correct_value.is_empty() {
            self.correct_value = outcome.correct_value;
        }
        self.state = SlotState::Answered {
            value: option,
            is_correct: outcome.is_correct,
        };
    }

    pub(crate) fn rollback(&mut self) {
        if self.is_pending() {
            self.state = SlotState::Open;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn slot() -> FillableCell {
        FillableCell::new(
            vec!["-200".into(), "200".into()],
            "-200".into(),
            Some("Drawings reduce equity".into()),
        )
    }

    #[rstest]
    #[case(0, Column::A, "A1")]
    #[case(2, Column::B, "B3")]
    #[case(9, Column::D, "D10")]
    fn cell_reference_is_one_based(
        #[case] row: usize,
        #[case] column: Column,
        #[case] expected: &str,
    ) {
        let address = CellAddress::new(row, column);
        assert_eq!(address.reference(), expected);
        assert_eq!(expected.parse::<CellAddress>(), Ok(address));
    }

    #[rstest]
    #[case("")]
    #[case("E1")]
    #[case("A0")]
    #[case("Ax")]
    fn rejects_bad_references(#[case] input: &str) {
        assert!(input.parse::<CellAddress>().is_err());
    }

    #[test]
    fn lowercase_reference_parses() {
        assert_eq!("c2".parse::<CellAddress>(), Ok(CellAddress::new(1, Column::C)));
    }

    #[test]
    fn new_slot_is_open() {
        let cell = slot();
        assert!(cell.is_selectable());
        assert_eq!(cell.value(), None);
        assert_eq!(cell.is_correct(), None);
        assert_eq!(cell.display_value(), None);
        assert_eq!(cell.explanation(), Some("Drawings reduce equity"));
    }

    #[test]
    fn correct_answer_shows_chosen_value() {
        let mut cell = slot();
        cell.mark_pending("-200".into());
        assert!(cell.is_pending());
        assert!(!cell.is_selectable());

        cell.commit(CheckOutcome {
            is_correct: true,
            correct_value: "-200".into(),
        });
        assert_eq!(cell.value(), Some("-200"));
        assert_eq!(cell.is_correct(), Some(true));
        assert_eq!(cell.display_value().as_deref(), Some("(200)"));
    }

    #[test]
    fn wrong_answer_shows_correct_value() {
        let mut cell = slot();
        cell.mark_pending("200".into());
        cell.commit(CheckOutcome {
            is_correct: false,
            correct_value: String::new(),
        });
        assert_eq!(cell.value(), Some("200"));
        assert_eq!(cell.is_correct(), Some(false));
        assert_eq!(cell.display_value().as_deref(), Some("(200)"));
        assert_eq!(cell.correct_value(), "-200");
    }

    #[test]
    fn checker_correct_value_overrides_authored_one() {
        let mut cell = slot();
        cell.mark_pending("200".into());
        cell.commit(CheckOutcome {
            is_correct: false,
            correct_value: "-350".into(),
        });
        assert_eq!(cell.display_value().as_deref(), Some("(350)"));
    }

    #[test]
    fn rollback_reopens_pending_slot() {
        let mut cell = slot();
        cell.mark_pending("200".into());
        cell.rollback();
        assert!(cell.is_selectable());
        assert_eq!(cell.value(), None);
    }

    #[test]
    fn commit_without_pending_is_ignored() {
        let mut cell = slot();
        cell.commit(CheckOutcome {
            is_correct: true,
            correct_value: String::new(),
        });
        assert!(cell.is_selectable());

        cell.mark_pending("-200".into());
        cell.commit(CheckOutcome {
            is_correct: true,
            correct_value: String::new(),
        });
        cell.commit(CheckOutcome {
            is_correct: false,
            correct_value: "999".into(),
        });
        assert!(cell.is_answered());
        assert!(!cell.is_selectable());
        assert_eq!(cell.value(), Some("-200"));
        assert_eq!(cell.is_correct(), Some(true));
        assert_eq!(cell.correct_value(), "-200");
    }

    #[test]
    fn label_display_is_verbatim() {
        assert_eq!(
            LedgerCell::label("  Cash").display_text().as_deref(),
            Some("  Cash")
        );
    }
}
