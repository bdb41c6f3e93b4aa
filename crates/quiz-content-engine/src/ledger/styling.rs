//! Advisory styling derived from the indentation of the label column.
//!
//! Authors indent sub-accounts in column `A` with leading spaces. Deeper rows
//! get a smaller font, down to a minimum. None of this affects answering.

use serde::Serialize;

use super::{
    cell::{Column, LedgerCell},
    table::LedgerTable,
};

/// Font size range for ledger rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale {
    pub base_size: f32,
    pub min_size: f32,
}

impl Default for FontScale {
    fn default() -> Self {
        Self {
            base_size: 16.0,
            min_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowStyle {
    /// Leading whitespace count of the column `A` label (0 for slots).
    pub indentation: usize,
    pub font_size: f32,
    /// False for rows at the table's deepest indentation.
    pub is_top_level: bool,
}

/// Leading whitespace count, in chars.
pub fn leading_indentation(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

/// One [`RowStyle`] per table row.
///
/// `font = base − indentation × (base − min) / max_indentation`, clamped at
/// `min`. A table with no indentation at all is rendered entirely at the
/// base size and every row counts as top-level.
pub fn row_styles(table: &LedgerTable, scale: &FontScale) -> Vec<RowStyle> {
    let indents: Vec<usize> = table
        .rows()
        .iter()
        .map(|row| match row.get(Column::A) {
            Some(LedgerCell::Label { text }) => leading_indentation(text),
            _ => 0,
        })
        .collect();
    let max_indentation = indents.iter().copied().max().unwrap_or(0);

    indents
        .into_iter()
        .map(|indentation| {
            if max_indentation == 0 {
                return RowStyle {
                    indentation,
                    font_size: scale.base_size,
                    is_top_level: true,
                };
            }
            let step = (scale.base_size - scale.min_size) / max_indentation as f32;
            let font_size = (scale.base_size - indentation as f32 * step).max(scale.min_size);
            RowStyle {
                indentation,
                font_size,
                is_top_level: indentation != max_indentation,
            }
        })
        .collect()
}
