use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quiz_content_config::Config;
use quiz_content_engine::{
    AnswerChecker, Block, CellAddress, CheckOutcome, Column, Document, InlineRun, LedgerCell,
    LedgerRow, LedgerSession, LedgerTable, RowStyle, SelectionState, parse_document_with,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block as Pane, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap,
    },
};
use std::{
    collections::HashMap,
    env, fs,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

/// Scores selections against the answers authored in the ledger itself.
struct LocalChecker {
    answers: HashMap<String, String>,
}

impl LocalChecker {
    fn from_table(table: &LedgerTable) -> Self {
        let answers = table
            .fillable_cells()
            .map(|(address, slot)| (address.reference(), slot.correct_value().to_string()))
            .collect();
        Self { answers }
    }
}

impl AnswerChecker for LocalChecker {
    type Error = String;

    fn check(
        &mut self,
        selected_option: &str,
        cell_reference: &str,
    ) -> Result<CheckOutcome, String> {
        let correct = self
            .answers
            .get(cell_reference)
            .ok_or_else(|| format!("no answer key for {cell_reference}"))?;
        Ok(CheckOutcome {
            is_correct: selected_option.trim() == correct.trim(),
            correct_value: correct.clone(),
        })
    }
}

struct LedgerView {
    session: LedgerSession,
    checker: LocalChecker,
    styles: Vec<RowStyle>,
    /// Fillable cells in row-major order; the cursor walks these.
    slots: Vec<CellAddress>,
    cursor: usize,
    options: Vec<String>,
    option_state: ListState,
}

impl LedgerView {
    fn new(table: LedgerTable, config: &Config) -> Self {
        let checker = LocalChecker::from_table(&table);
        let styles = table.row_styles(&config.font_scale());
        let slots = table.fillable_cells().map(|(address, _)| address).collect();
        Self {
            session: LedgerSession::new(table),
            checker,
            styles,
            slots,
            cursor: 0,
            options: Vec::new(),
            option_state: ListState::default(),
        }
    }

    fn current_slot(&self) -> Option<CellAddress> {
        self.slots.get(self.cursor).copied()
    }

    fn is_choosing(&self) -> bool {
        matches!(self.session.selection(), SelectionState::Selecting(_))
    }

    fn next_slot(&mut self) {
        if !self.slots.is_empty() {
            self.cursor = (self.cursor + 1) % self.slots.len();
        }
    }

    fn previous_slot(&mut self) {
        if !self.slots.is_empty() {
            self.cursor = (self.cursor + self.slots.len() - 1) % self.slots.len();
        }
    }

    fn next_option(&mut self) {
        let i = match self.option_state.selected() {
            Some(i) => (i + 1) % self.options.len().max(1),
            None => 0,
        };
        self.option_state.select(Some(i));
    }

    fn previous_option(&mut self) {
        let i = match self.option_state.selected() {
            Some(0) | None => self.options.len().saturating_sub(1),
            Some(i) => i - 1,
        };
        self.option_state.select(Some(i));
    }

    fn open_current(&mut self) -> Result<(), String> {
        let cell = self.current_slot().ok_or("this ledger has no answer cells")?;
        let options = self
            .session
            .select_cell(cell)
            .map_err(|e| e.to_string())?
            .to_vec();
        self.options = options;
        self.option_state.select(Some(0));
        Ok(())
    }

    fn cancel(&mut self) {
        self.session.cancel_selection();
        self.options.clear();
        self.option_state.select(None);
    }

    /// Submits the highlighted option and returns a status line.
    fn submit(&mut self) -> String {
        let Some(index) = self.option_state.selected() else {
            return "Pick an option first".to_string();
        };
        self.options.clear();
        self.option_state.select(None);

        let result = self
            .session
            .choose_option_at(index)
            .and_then(|pending| {
                let check = self.checker.check(pending.option(), pending.reference());
                self.session.resolve(pending, check)
            });
        match result {
            Ok(outcome) if outcome.table_complete => {
                format!("{}: {} - ledger complete!", outcome.cell, verdict(outcome.is_correct))
            }
            Ok(outcome) => format!("{}: {}", outcome.cell, verdict(outcome.is_correct)),
            Err(e) => {
                log::warn!("answer not recorded: {e}");
                e.to_string()
            }
        }
    }
}

fn verdict(is_correct: bool) -> &'static str {
    if is_correct { "correct" } else { "incorrect" }
}

struct App {
    title: String,
    content: Vec<Line<'static>>,
    ledger: Option<LedgerView>,
    status: String,
}

impl App {
    fn new(content_path: PathBuf, ledger_path: Option<PathBuf>, config: &Config) -> Result<Self> {
        let raw = fs::read_to_string(&content_path)
            .with_context(|| format!("reading content file {}", content_path.display()))?;
        let document = parse_document_with(&raw, &config.segmenter_options());
        log::debug!("parsed {} blocks from {}", document.len(), content_path.display());

        let ledger = match ledger_path {
            Some(path) => {
                let json = fs::read_to_string(&path)
                    .with_context(|| format!("reading ledger file {}", path.display()))?;
                let table = LedgerTable::from_json(&json)
                    .with_context(|| format!("loading ledger {}", path.display()))?;
                Some(LedgerView::new(table, config))
            }
            None => None,
        };

        Ok(Self {
            title: content_path.display().to_string(),
            content: render_document(&document),
            ledger,
            status: String::new(),
        })
    }
}

fn render_runs(runs: &[InlineRun]) -> Vec<Span<'static>> {
    runs.iter()
        .map(|run| match run {
            InlineRun::PlainText(text) => Span::raw(text.clone()),
            InlineRun::Bold(text) => {
                Span::styled(text.clone(), Style::default().add_modifier(Modifier::BOLD))
            }
        })
        .collect()
}

fn render_document(document: &Document) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for block in document {
        match block {
            Block::Heading { level, text } => {
                let prefix = "#".repeat(*level as usize);
                lines.push(Line::styled(
                    format!("{prefix} {text}"),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            Block::Paragraph { runs } => lines.push(Line::from(render_runs(runs))),
            Block::BulletList { items } => {
                for item in items {
                    let mut spans = vec![Span::raw(format!("{}• ", "  ".repeat(item.indent_level)))];
                    spans.extend(render_runs(&item.runs));
                    lines.push(Line::from(spans));
                }
            }
            Block::MathBlock { latex } => {
                lines.push(Line::styled(
                    format!("    {latex}"),
                    Style::default().fg(Color::Cyan),
                ));
            }
        }
        lines.push(Line::default());
    }

    lines
}

fn cell_text(cell: &LedgerCell) -> String {
    match cell {
        LedgerCell::Label { text } => text.clone(),
        LedgerCell::Fillable(slot) if slot.is_pending() => "…".to_string(),
        LedgerCell::Fillable(slot) => match (slot.display_value(), slot.is_correct()) {
            (Some(value), Some(true)) => format!("{value} ✓"),
            (Some(value), _) => format!("{value} ✗"),
            (None, _) => "[ ? ]".to_string(),
        },
    }
}

/// One text per column, empty where the row has no cell, so every value
/// stays under its own column.
fn row_texts(row: &LedgerRow) -> [String; 4] {
    Column::ALL.map(|column| row.get(column).map(cell_text).unwrap_or_default())
}

/// Popup height for `count` options plus borders.
fn options_height(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX).saturating_add(2)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().collect();
    if !(2..=3).contains(&args.len()) {
        eprintln!("Usage: {} <content-file> [ledger.json]", args[0]);
        process::exit(1);
    }

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    let content_path = config.resolve_content_path(&PathBuf::from(&args[1]));
    let ledger_path = args.get(2).map(|p| config.resolve_content_path(&PathBuf::from(p)));
    let mut app = App::new(content_path, ledger_path, &config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let Some(ledger) = app.ledger.as_mut() else {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(());
            }
            continue;
        };

        if ledger.is_choosing() {
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => ledger.next_option(),
                KeyCode::Up | KeyCode::Char('k') => ledger.previous_option(),
                KeyCode::Enter | KeyCode::Char(' ') => app.status = ledger.submit(),
                KeyCode::Esc => ledger.cancel(),
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Tab => {
                ledger.next_slot()
            }
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::BackTab => {
                ledger.previous_slot()
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.status = match ledger.open_current() {
                    Ok(()) => String::new(),
                    Err(e) => e,
                };
            }
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(f.area());

    let panes = if app.ledger.is_some() {
        Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(outer[0])
    } else {
        Layout::default()
            .margin(1)
            .constraints([Constraint::Percentage(100)])
            .split(outer[0])
    };

    let content = Paragraph::new(app.content.clone())
        .block(Pane::default().borders(Borders::ALL).title(app.title.as_str()))
        .wrap(Wrap { trim: false });
    f.render_widget(content, panes[0]);

    if let Some(ledger) = app.ledger.as_mut() {
        render_ledger(f, ledger, panes[1]);
    }

    let help = if app.ledger.as_ref().is_some_and(LedgerView::is_choosing) {
        "↑/↓: Option | Enter: Submit | Esc: Cancel"
    } else if app.ledger.is_some() {
        "q: Quit | ←/→/Tab: Move | Enter: Answer cell"
    } else {
        "q: Quit"
    };
    let footer = Paragraph::new(vec![
        Line::from(Span::styled(app.status.clone(), Style::default().fg(Color::Yellow))),
        Line::from(help),
    ]);
    f.render_widget(footer, outer[1]);
}

fn render_ledger(f: &mut Frame, ledger: &mut LedgerView, area: ratatui::layout::Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if ledger.is_choosing() {
            [Constraint::Min(0), Constraint::Length(options_height(ledger.options.len()))]
        } else {
            [Constraint::Min(0), Constraint::Length(0)]
        })
        .split(area);

    let focused = ledger.current_slot();
    let rows: Vec<Row> = ledger
        .session
        .table()
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let top_level = ledger.styles.get(index).is_none_or(|s| s.is_top_level);
            let cells: Vec<Cell> = Column::ALL
                .into_iter()
                .zip(row_texts(row))
                .map(|(column, text)| {
                    let mut style = Style::default();
                    if Some(CellAddress::new(index, column)) == focused {
                        style = style.bg(Color::Yellow).fg(Color::Black);
                    }
                    Cell::from(text).style(style)
                })
                .collect();
            let style = if top_level {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let answered = ledger.session.table().answered_count();
    let total = ledger.session.table().fillable_count();
    let table = Table::new(rows, [Constraint::Ratio(1, 4); 4]).block(
        Pane::default()
            .borders(Borders::ALL)
            .title(format!("Ledger {answered}/{total}")),
    );
    f.render_widget(table, parts[0]);

    if ledger.is_choosing() {
        let items: Vec<ListItem> = ledger
            .options
            .iter()
            .map(|option| ListItem::new(option.as_str()))
            .collect();
        let list = List::new(items)
            .block(Pane::default().borders(Borders::ALL).title("Options"))
            .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
        f.render_stateful_widget(list, parts[1], &mut ledger.option_state);
    }
}
