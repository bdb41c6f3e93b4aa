//! UniFFI bindings for the quiz-content mobile client
//!
//! Exposes content parsing, the answer formatters, and an interactive ledger
//! handle. The host owns networking: it runs the answer check itself and
//! reports the verdict back through [`LedgerHandle::resolve_check`] or
//! [`LedgerHandle::fail_check`].

use quiz_content_engine::{
    Block, BulletItem, CellAddress, CheckOutcome, Document, FontScale, InlineRun, LedgerCell,
    LedgerError, LedgerSession, LedgerTable, PendingCheck, RowStyle, SegmenterOptions,
    SelectionOutcome, parse_document, parse_document_with,
};
use std::collections::HashMap;
use std::sync::Mutex;

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Fields are named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Invalid ledger: {reason}")]
    InvalidLedger { reason: String },
    #[error("Invalid cell reference: {reason}")]
    InvalidReference { reason: String },
    #[error("No check is pending for cell {reference}")]
    NoPendingCheck { reference: String },
    #[error("Ledger error: {reason}")]
    Ledger { reason: String },
}

impl From<LedgerError> for FfiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidTable { reason } => FfiError::InvalidLedger { reason },
            other => FfiError::Ledger {
                reason: other.to_string(),
            },
        }
    }
}

fn parse_reference(reference: &str) -> Result<CellAddress, FfiError> {
    reference
        .parse()
        .map_err(|reason| FfiError::InvalidReference { reason })
}

// ============ Content ============

/// Parse an annotated content string with the default block separator.
#[uniffi::export]
pub fn parse_content(text: String) -> DocumentDto {
    DocumentDto::from_engine(parse_document(&text))
}

/// Parse an annotated content string with a custom block separator.
#[uniffi::export]
pub fn parse_content_with_separator(text: String, block_separator: String) -> DocumentDto {
    let options = SegmenterOptions { block_separator };
    DocumentDto::from_engine(parse_document_with(&text, &options))
}

/// Negative numbers in accounting parentheses, anything else verbatim.
#[uniffi::export]
pub fn format_signed_value(raw: String) -> String {
    quiz_content_engine::format_signed_value(&raw)
}

/// Display form of a stored answer (JSON list or `|`-separated parts).
#[uniffi::export]
pub fn normalize_answer(raw: String) -> String {
    quiz_content_engine::normalize_answer(&raw)
}

/// UI-ready parsed content.
#[derive(uniffi::Record)]
pub struct DocumentDto {
    pub blocks: Vec<BlockDto>,
    /// Flattened text, for previews and accessibility.
    pub plain_text: String,
}

impl DocumentDto {
    fn from_engine(doc: Document) -> Self {
        let plain_text = doc.plain_text();
        Self {
            blocks: doc.blocks.into_iter().map(BlockDto::from_engine).collect(),
            plain_text,
        }
    }
}

/// A single renderable block.
#[derive(uniffi::Record)]
pub struct BlockDto {
    /// "heading", "paragraph", "bullet_list" or "math"
    pub kind: String,
    /// Heading level (1-4) if this is a heading, 0 otherwise
    pub heading_level: u8,
    /// Heading text or LaTeX source; empty for paragraphs and lists
    pub text: String,
    pub runs: Vec<InlineRunDto>,
    pub items: Vec<BulletItemDto>,
}

impl BlockDto {
    fn from_engine(block: Block) -> Self {
        let empty = |kind: &str| Self {
            kind: kind.to_string(),
            heading_level: 0,
            text: String::new(),
            runs: vec![],
            items: vec![],
        };
        match block {
            Block::Heading { level, text } => Self {
                heading_level: level,
                text,
                ..empty("heading")
            },
            Block::Paragraph { runs } => Self {
                runs: runs.into_iter().map(InlineRunDto::from_engine).collect(),
                ..empty("paragraph")
            },
            Block::BulletList { items } => Self {
                items: items.into_iter().map(BulletItemDto::from_engine).collect(),
                ..empty("bullet_list")
            },
            Block::MathBlock { latex } => Self {
                text: latex,
                ..empty("math")
            },
        }
    }
}

#[derive(uniffi::Record)]
pub struct BulletItemDto {
    pub indent_level: u32,
    pub runs: Vec<InlineRunDto>,
}

impl BulletItemDto {
    fn from_engine(item: BulletItem) -> Self {
        Self {
            indent_level: item.indent_level as u32,
            runs: item.runs.into_iter().map(InlineRunDto::from_engine).collect(),
        }
    }
}

#[derive(uniffi::Record)]
pub struct InlineRunDto {
    pub bold: bool,
    pub text: String,
}

impl InlineRunDto {
    fn from_engine(run: InlineRun) -> Self {
        match run {
            InlineRun::PlainText(text) => Self { bold: false, text },
            InlineRun::Bold(text) => Self { bold: true, text },
        }
    }
}

// ============ Ledger Handle ============

struct LedgerState {
    session: LedgerSession,
    /// In-flight checks keyed by cell reference.
    pending: HashMap<String, PendingCheck>,
}

/// A handle to one interactive ledger question.
#[derive(uniffi::Object)]
pub struct LedgerHandle {
    inner: Mutex<LedgerState>,
}

#[uniffi::export]
impl LedgerHandle {
    /// Build a ledger from its JSON grid. Options are shuffled here, once.
    #[uniffi::constructor]
    pub fn from_json(json: String) -> Result<Self, FfiError> {
        let table = LedgerTable::from_json(&json)?;
        Ok(Self::from_table(table))
    }

    pub fn rows(&self) -> Vec<LedgerRowDto> {
        let state = self.lock();
        state
            .session
            .table()
            .rows()
            .iter()
            .enumerate()
            .map(|(row, cells)| LedgerRowDto {
                cells: cells
                    .cells()
                    .map(|(column, cell)| {
                        LedgerCellDto::from_engine(CellAddress::new(row, column), cell)
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn row_styles(&self, base_font_size: f32, min_font_size: f32) -> Vec<RowStyleDto> {
        let scale = FontScale {
            base_size: base_font_size,
            min_size: min_font_size,
        };
        let state = self.lock();
        state
            .session
            .table()
            .row_styles(&scale)
            .into_iter()
            .map(RowStyleDto::from_engine)
            .collect()
    }

    /// Open a cell for selection and get its options in display order.
    pub fn select_cell(&self, reference: String) -> Result<Vec<String>, FfiError> {
        let cell = parse_reference(&reference)?;
        let mut state = self.lock();
        let options = state.session.select_cell(cell)?;
        Ok(options.to_vec())
    }

    pub fn cancel_selection(&self) {
        self.lock().session.cancel_selection();
    }

    /// Choose an option for the selected cell. The cell stays pending until
    /// the host reports the check result.
    pub fn choose_option(&self, option: String) -> Result<PendingCheckDto, FfiError> {
        let mut state = self.lock();
        let pending = state.session.choose_option(&option)?;
        let dto = PendingCheckDto {
            reference: pending.reference().to_string(),
            option: pending.option().to_string(),
        };
        state.pending.insert(dto.reference.clone(), pending);
        Ok(dto)
    }

    /// Commit the checker's verdict for a pending cell.
    pub fn resolve_check(
        &self,
        reference: String,
        is_correct: bool,
        correct_value: String,
    ) -> Result<SelectionOutcomeDto, FfiError> {
        let mut state = self.lock();
        let pending = state.take_pending(&reference)?;
        let outcome = CheckOutcome {
            is_correct,
            correct_value,
        };
        let outcome = state.session.resolve(pending, Ok::<_, String>(outcome))?;
        Ok(SelectionOutcomeDto::from_engine(outcome))
    }

    /// Report that the check never completed. The cell reopens for a retry.
    pub fn fail_check(&self, reference: String, reason: String) -> Result<(), FfiError> {
        let mut state = self.lock();
        let pending = state.take_pending(&reference)?;
        match state.session.resolve(pending, Err(reason)) {
            Err(LedgerError::CheckFailed { .. }) => Ok(()),
            Err(other) => Err(other.into()),
            Ok(_) => Ok(()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.lock().session.table().is_complete()
    }
}

impl LedgerHandle {
    fn from_table(table: LedgerTable) -> Self {
        Self {
            inner: Mutex::new(LedgerState {
                session: LedgerSession::new(table),
                pending: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LedgerState> {
        // Recover from poisoned mutex (another thread panicked while holding lock)
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LedgerState {
    fn take_pending(&mut self, reference: &str) -> Result<PendingCheck, FfiError> {
        let cell = parse_reference(reference)?;
        self.pending
            .remove(&cell.reference())
            .ok_or_else(|| {
                log::warn!("no pending check for {reference}");
                FfiError::NoPendingCheck {
                    reference: reference.to_string(),
                }
            })
    }
}

// ============ Ledger DTOs ============

#[derive(uniffi::Record)]
pub struct LedgerRowDto {
    /// Present cells only, in column order
    pub cells: Vec<LedgerCellDto>,
}

#[derive(uniffi::Record)]
pub struct LedgerCellDto {
    /// Cell reference such as "B3"
    pub reference: String,
    pub is_fillable: bool,
    /// Label text, or the formatted answer once a slot is answered
    pub text: Option<String>,
    pub is_pending: bool,
    pub is_answered: bool,
    pub is_correct: Option<bool>,
    /// Shown after an answer, if the author provided one
    pub explanation: Option<String>,
}

impl LedgerCellDto {
    fn from_engine(address: CellAddress, cell: &LedgerCell) -> Self {
        let slot = cell.as_fillable();
        Self {
            reference: address.reference(),
            is_fillable: slot.is_some(),
            text: cell.display_text(),
            is_pending: slot.is_some_and(|s| s.is_pending()),
            is_answered: slot.is_some_and(|s| s.is_answered()),
            is_correct: slot.and_then(|s| s.is_correct()),
            explanation: slot
                .filter(|s| s.is_answered())
                .and_then(|s| s.explanation())
                .map(str::to_string),
        }
    }
}

#[derive(uniffi::Record)]
pub struct RowStyleDto {
    pub indentation: u32,
    pub font_size: f32,
    pub is_top_level: bool,
}

impl RowStyleDto {
    fn from_engine(style: RowStyle) -> Self {
        Self {
            indentation: style.indentation as u32,
            font_size: style.font_size,
            is_top_level: style.is_top_level,
        }
    }
}

#[derive(uniffi::Record)]
pub struct PendingCheckDto {
    /// Send this with the option to the answer checker
    pub reference: String,
    pub option: String,
}

#[derive(Debug, uniffi::Record)]
pub struct SelectionOutcomeDto {
    pub reference: String,
    pub value: String,
    pub is_correct: bool,
    /// True exactly once per ledger, when the last slot is filled
    pub table_complete: bool,
}

impl SelectionOutcomeDto {
    fn from_engine(outcome: SelectionOutcome) -> Self {
        Self {
            reference: outcome.cell.reference(),
            value: outcome.value,
            is_correct: outcome.is_correct,
            table_complete: outcome.table_complete,
        }
    }
}
