use rand::{Rng, seq::SliceRandom};
use serde::Deserialize;

use super::{
    cell::{CellAddress, Column, FillableCell, LedgerCell},
    error::LedgerError,
    styling::{FontScale, RowStyle, row_styles},
};

/// One row of the grid. Missing columns are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRow {
    pub a: Option<LedgerCell>,
    pub b: Option<LedgerCell>,
    pub c: Option<LedgerCell>,
    pub d: Option<LedgerCell>,
}

impl LedgerRow {
    pub fn get(&self, column: Column) -> Option<&LedgerCell> {
        match column {
            Column::A => self.a.as_ref(),
            Column::B => self.b.as_ref(),
            Column::C => self.c.as_ref(),
            Column::D => self.d.as_ref(),
        }
    }

    pub(crate) fn get_mut(&mut self, column: Column) -> Option<&mut LedgerCell> {
        match column {
            Column::A => self.a.as_mut(),
            Column::B => self.b.as_mut(),
            Column::C => self.c.as_mut(),
            Column::D => self.d.as_mut(),
        }
    }

    fn set(&mut self, column: Column, cell: Option<LedgerCell>) {
        match column {
            Column::A => self.a = cell,
            Column::B => self.b = cell,
            Column::C => self.c = cell,
            Column::D => self.d = cell,
        }
    }

    /// Present cells in column order.
    pub fn cells(&self) -> impl Iterator<Item = (Column, &LedgerCell)> {
        Column::ALL
            .into_iter()
            .filter_map(|column| self.get(column).map(|cell| (column, cell)))
    }
}

/// A ledger question's grid, built once per question load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTable {
    rows: Vec<LedgerRow>,
    completion_signaled: bool,
}

impl LedgerTable {
    /// Builds a table from already-constructed rows. Options are used as given.
    pub fn new(rows: Vec<LedgerRow>) -> Self {
        Self {
            rows,
            completion_signaled: false,
        }
    }

    /// Parses the authored JSON grid, shuffling options with the thread RNG.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidTable`] if the payload is not a JSON
    /// array of row objects or a slot has no options. No partial table is
    /// ever returned.
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Self::from_json_with_rng(json, &mut rand::rng())
    }

    /// Like [`LedgerTable::from_json`] with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// See [`LedgerTable::from_json`].
    pub fn from_json_with_rng<R: Rng + ?Sized>(
        json: &str,
        rng: &mut R,
    ) -> Result<Self, LedgerError> {
        let raw_rows: Vec<RawRow> = serde_json::from_str(json).map_err(|e| {
            log::warn!("Rejecting ledger payload: {e}");
            LedgerError::InvalidTable {
                reason: e.to_string(),
            }
        })?;

        let mut rows = Vec::with_capacity(raw_rows.len());
        for (index, raw_row) in raw_rows.into_iter().enumerate() {
            let mut row = LedgerRow::default();
            for (column, raw_cell) in raw_row.into_columns() {
                let address = CellAddress::new(index, column);
                let cell = match raw_cell {
                    Some(raw_cell) => Some(raw_cell.into_cell(address, rng)?),
                    None => None,
                };
                row.set(column, cell);
            }
            rows.push(row);
        }

        let table = Self::new(rows);
        log::debug!(
            "Built ledger table with {} rows and {} fillable cells",
            table.len(),
            table.fillable_count()
        );
        Ok(table)
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&LedgerRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, address: CellAddress) -> Option<&LedgerCell> {
        self.rows.get(address.row)?.get(address.column)
    }

    pub(crate) fn cell_mut(&mut self, address: CellAddress) -> Option<&mut LedgerCell> {
        self.rows.get_mut(address.row)?.get_mut(address.column)
    }

    /// Every slot with its address, in row-major order.
    pub fn fillable_cells(&self) -> impl Iterator<Item = (CellAddress, &FillableCell)> {
        self.rows.iter().enumerate().flat_map(|(index, row)| {
            row.cells().filter_map(move |(column, cell)| {
                cell.as_fillable()
                    .map(|slot| (CellAddress::new(index, column), slot))
            })
        })
    }

    pub fn fillable_count(&self) -> usize {
        self.fillable_cells().count()
    }

    pub fn answered_count(&self) -> usize {
        self.fillable_cells()
            .filter(|(_, slot)| slot.is_answered())
            .count()
    }

    /// Every slot has a non-empty value.
    pub fn is_complete(&self) -> bool {
        self.fillable_cells().all(|(_, slot)| slot.is_answered())
    }

    pub fn row_styles(&self, scale: &FontScale) -> Vec<RowStyle> {
        row_styles(self, scale)
    }

    /// True the first time it is called on a complete table, false after.
    pub(crate) fn take_completion_signal(&mut self) -> bool {
        if self.completion_signaled || !self.is_complete() {
            return false;
        }
        self.completion_signaled = true;
        true
    }
}

#[derive(Deserialize)]
struct RawRow {
    #[serde(rename = "A", default)]
    a: Option<RawCell>,
    #[serde(rename = "B", default)]
    b: Option<RawCell>,
    #[serde(rename = "C", default)]
    c: Option<RawCell>,
    #[serde(rename = "D", default)]
    d: Option<RawCell>,
}

impl RawRow {
    fn into_columns(self) -> [(Column, Option<RawCell>); 4] {
        [
            (Column::A, self.a),
            (Column::B, self.b),
            (Column::C, self.c),
            (Column::D, self.d),
        ]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Scalar(RawScalar),
    Slot(RawSlot),
}

/// Authoring writes amounts both as strings and as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Number(serde_json::Number),
}

impl RawScalar {
    fn into_string(self) -> String {
        match self {
            RawScalar::Text(text) => text,
            RawScalar::Number(number) => number.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlot {
    #[serde(default = "default_editable")]
    is_editable: bool,
    #[serde(default)]
    options: Vec<RawScalar>,
    correct: RawScalar,
    #[serde(default)]
    explanation: Option<String>,
}

fn default_editable() -> bool {
    true
}

impl RawCell {
    fn into_cell<R: Rng + ?Sized>(
        self,
        address: CellAddress,
        rng: &mut R,
    ) -> Result<LedgerCell, LedgerError> {
        match self {
            RawCell::Scalar(scalar) => Ok(LedgerCell::label(scalar.into_string())),
            RawCell::Slot(slot) if !slot.is_editable => {
                Ok(LedgerCell::label(slot.correct.into_string()))
            }
            RawCell::Slot(slot) => {
                if slot.options.is_empty() {
                    log::warn!("Rejecting ledger payload: cell {address} has no options");
                    return Err(LedgerError::InvalidTable {
                        reason: format!("cell {address} has no options"),
                    });
                }
                let mut options: Vec<String> =
                    slot.options.into_iter().map(RawScalar::into_string).collect();
                if options.iter().any(|option| option.trim().is_empty()) {
                    log::warn!("Rejecting ledger payload: cell {address} has a blank option");
                    return Err(LedgerError::InvalidTable {
                        reason: format!("cell {address} has a blank option"),
                    });
                }
                options.shuffle(rng);
                Ok(LedgerCell::Fillable(FillableCell::new(
                    options,
                    slot.correct.into_string(),
                    slot.explanation,
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};

    const TRIAL_BALANCE: &str = r#"[
        {"A": "Assets", "B": "", "C": ""},
        {"A": "  Cash", "B": {"isEditable": true, "options": ["500", "-500", "0"], "correct": "500"}, "C": ""},
        {"A": "Drawings", "B": "", "C": {"isEditable": true, "options": [-200, 200], "correct": -200, "explanation": "Drawings reduce equity"}},
        {"A": "Total", "B": 500, "C": {"isEditable": false, "correct": "-200"}}
    ]"#;

    fn table() -> LedgerTable {
        LedgerTable::from_json_with_rng(TRIAL_BALANCE, &mut StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn parses_labels_and_slots() {
        let table = table();
        assert_eq!(table.len(), 4);
        assert_eq!(table.fillable_count(), 2);

        let total = table.row(3).unwrap();
        assert_eq!(total.get(Column::B), Some(&LedgerCell::label("500")));
        assert_eq!(total.get(Column::C), Some(&LedgerCell::label("-200")));
        assert_eq!(total.get(Column::D), None);

        let drawings = table
            .cell(CellAddress::new(2, Column::C))
            .and_then(LedgerCell::as_fillable)
            .unwrap();
        assert_eq!(drawings.correct_value(), "-200");
        assert_eq!(drawings.explanation(), Some("Drawings reduce equity"));
    }

    #[test]
    fn shuffled_options_are_a_permutation() {
        let table = table();
        for (_, slot) in table.fillable_cells() {
            let mut shuffled = slot.options().to_vec();
            shuffled.sort();
            let mut expected: Vec<String> = match slot.correct_value() {
                "500" => vec!["500".into(), "-500".into(), "0".into()],
                _ => vec!["-200".into(), "200".into()],
            };
            expected.sort();
            assert_eq!(shuffled, expected);
        }
    }

    #[test]
    fn fillable_cells_are_row_major() {
        let addresses: Vec<String> = table()
            .fillable_cells()
            .map(|(address, _)| address.reference())
            .collect();
        assert_eq!(addresses, vec!["B2", "C3"]);
    }

    #[test]
    fn malformed_json_is_invalid_table() {
        let err = LedgerTable::from_json("{not json").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidTable { .. }));
    }

    #[test]
    fn non_array_payload_is_invalid_table() {
        let err = LedgerTable::from_json(r#"{"A": "x"}"#).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidTable { .. }));
    }

    #[test]
    fn slot_with_blank_option_is_invalid_table() {
        let json = r#"[{"A": "Suspense", "B": {"options": ["", "100"], "correct": "100"}}]"#;
        let err = LedgerTable::from_json(json).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidTable {
                reason: "cell B1 has a blank option".into()
            }
        );
    }

    #[test]
    fn slot_without_options_is_invalid_table() {
        let json = r#"[{"A": {"isEditable": true, "options": [], "correct": "1"}}]"#;
        let err = LedgerTable::from_json(json).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidTable {
                reason: "cell A1 has no options".into()
            }
        );
    }

    #[test]
    fn empty_array_is_an_empty_complete_table() {
        let table = LedgerTable::from_json("[]").unwrap();
        assert!(table.is_empty());
        assert!(table.is_complete());
    }

    #[test]
    fn null_columns_are_absent() {
        let table = LedgerTable::from_json(r#"[{"A": "x", "B": null}]"#).unwrap();
        assert_eq!(table.row(0).unwrap().cells().count(), 1);
    }
}
