use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use numpick::{
    clamp_count, Code, Error, FilterCriteria, FilterReport, Labels, Language, Magnitude, Parity,
    Recommender, DEFAULT_GENERATE_COUNT,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Candidates,
    Filters,
    Selection,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Candidates => Page::Filters,
            Page::Filters => Page::Selection,
            Page::Selection => Page::Candidates,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Candidates => Page::Selection,
            Page::Filters => Page::Candidates,
            Page::Selection => Page::Filters,
        }
    }

    pub fn title(&self, labels: &Labels) -> &'static str {
        match self {
            Page::Candidates => labels.all_numbers,
            Page::Filters => labels.first_digit_filter,
            Page::Selection => labels.selection_title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

/// UI state. Filter choices live here; pool and history are re-read
/// through the recommender on every action.
pub struct App {
    recommender: Recommender,
    pub lang: Language,
    pub criteria: FilterCriteria,
    pub count: usize,
    pub report: FilterReport,
    pub selection: Vec<Code>,
    pub status: Option<Status>,
    pub state: TableState,
    pub current_page: Page,
}

impl App {
    /// Fails if the pool is unavailable or history unreadable
    pub fn new(recommender: Recommender, lang: Language) -> numpick::Result<Self> {
        let criteria = FilterCriteria::default();
        let report = recommender.evaluate(&criteria)?;

        let mut app = Self {
            recommender,
            lang,
            criteria,
            count: DEFAULT_GENERATE_COUNT,
            report,
            selection: Vec::new(),
            status: None,
            state: TableState::default(),
            current_page: Page::Candidates,
        };
        app.after_evaluate();

        Ok(app)
    }

    pub fn labels(&self) -> &'static Labels {
        self.lang.labels()
    }

    /// Re-run the pipeline with the current filter choices
    pub fn refresh(&mut self) {
        match self.recommender.evaluate(&self.criteria) {
            Ok(report) => {
                self.report = report;
                self.after_evaluate();
            }
            Err(err) => self.report_error(err),
        }
    }

    fn after_evaluate(&mut self) {
        self.count = clamp_count(self.count, self.report.candidates.len());

        if self.report.candidates.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }

        let outcome = self.report.ensure_candidates().err();
        if let Some(err) = outcome {
            self.report_error(err);
        }
    }

    fn report_error(&mut self, err: Error) {
        let labels = self.labels();
        self.status = Some(match labels.no_candidates(&err) {
            Some(message) => Status {
                kind: StatusKind::Warning,
                message: message.to_string(),
            },
            None => {
                warn!("Action failed: {}", err);
                Status {
                    kind: StatusKind::Error,
                    message: err.to_string(),
                }
            }
        });
    }

    fn info(&mut self, message: &str) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            message: message.to_string(),
        });
    }

    pub fn toggle_digit(&mut self, digit: u8) {
        self.status = None;
        self.criteria.toggle_digit(digit);
        self.refresh();
    }

    pub fn toggle_magnitude(&mut self, magnitude: Magnitude) {
        self.status = None;
        self.criteria.toggle_magnitude(magnitude);
        self.refresh();
    }

    pub fn toggle_parity(&mut self, parity: Parity) {
        self.status = None;
        self.criteria.toggle_parity(parity);
        self.refresh();
    }

    pub fn increase_count(&mut self) {
        self.count = clamp_count(self.count + 1, self.report.candidates.len());
    }

    pub fn decrease_count(&mut self) {
        self.count = clamp_count(self.count.saturating_sub(1), self.report.candidates.len());
    }

    pub fn generate(&mut self) {
        let mut rng = rand::thread_rng();
        match self.recommender.generate(&self.criteria, self.count, &mut rng) {
            Ok(generation) => {
                self.selection = generation.selection;
                self.current_page = Page::Selection;
                self.refresh();
                self.info(self.labels().history_saved);
            }
            Err(err) => self.report_error(err),
        }
    }

    pub fn clear_history(&mut self) {
        match self.recommender.clear_history() {
            Ok(()) => {
                self.selection.clear();
                self.refresh();
                self.info(self.labels().history_cleared);
            }
            Err(err) => self.report_error(err),
        }
    }

    pub fn next_language(&mut self) {
        self.lang = self.lang.next();
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next(&mut self) {
        let len = self.report.candidates.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.report.candidates.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.report.candidates.len();
        if len == 0 {
            return;
        }
        let i = self.state.selected().map_or(0, |i| (i + 20).min(len - 1));
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.report.candidates.is_empty() {
            return;
        }
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(20));
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Tab => app.next_page(),
            KeyCode::BackTab => app.previous_page(),
            KeyCode::Char(c @ '0'..='9') => app.toggle_digit(c as u8 - b'0'),
            KeyCode::Char('b') => app.toggle_magnitude(Magnitude::Large),
            KeyCode::Char('s') => app.toggle_magnitude(Magnitude::Small),
            KeyCode::Char('o') => app.toggle_parity(Parity::Odd),
            KeyCode::Char('e') => app.toggle_parity(Parity::Even),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => app.increase_count(),
            KeyCode::Char('-') | KeyCode::Left => app.decrease_count(),
            KeyCode::Char('g') | KeyCode::Enter => app.generate(),
            KeyCode::Char('x') => app.clear_history(),
            KeyCode::Char('l') => app.next_language(),
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::PageDown => app.page_down(),
            KeyCode::PageUp => app.page_up(),
            KeyCode::Home if !app.report.candidates.is_empty() => app.state.select(Some(0)),
            KeyCode::End if !app.report.candidates.is_empty() => {
                app.state.select(Some(app.report.candidates.len() - 1))
            }
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title, counts and page tabs
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Candidates => render_candidates(f, chunks[1], app),
        Page::Filters => render_filters(f, chunks[1], app),
        Page::Selection => render_selection(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let labels = app.labels();
    let report = &app.report;

    let mut tab_spans = vec![];
    for (i, page) in [Page::Candidates, Page::Filters, Page::Selection].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(labels), style));
    }

    let counts = vec![
        Span::styled(
            Labels::count(labels.pool_total, report.pool_total),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            Labels::count(labels.filtered_remaining, report.after_sequential),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  |  "),
        Span::styled(
            Labels::count(labels.filtered_count, report.after_attributes),
            Style::default().fg(Color::Green),
        ),
    ];

    let header = Paragraph::new(vec![Line::from(tab_spans), Line::from(counts)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} · {} ", labels.title, app.lang.name())),
    );

    f.render_widget(header, area);
}

fn code_rows(codes: &[Code]) -> Vec<Row<'static>> {
    codes
        .iter()
        .enumerate()
        .map(|(i, code)| {
            let color = match code.magnitude() {
                Magnitude::Large => Color::Yellow,
                Magnitude::Small => Color::Cyan,
            };

            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(code.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(code.leading_digit().to_string()),
                Cell::from(code.magnitude().to_string()).style(Style::default().fg(color)),
                Cell::from(code.parity().to_string()),
            ])
            .height(1)
        })
        .collect()
}

fn code_table(rows: Vec<Row<'static>>, title: String) -> Table<'static> {
    let header_cells = ["#", "Code", "Lead", "Size", "Parity"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ")
}

fn render_candidates(f: &mut Frame, area: Rect, app: &mut App) {
    let labels = app.labels();

    if let Err(err) = app.report.ensure_candidates() {
        let message = labels.no_candidates(&err).unwrap_or(labels.no_available);
        let empty = Paragraph::new(format!("\n  ⚠️  {}", message)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(" {} ", labels.all_numbers)),
        );
        f.render_widget(empty, area);
        return;
    }

    let table = code_table(
        code_rows(&app.report.candidates),
        format!(" {} ", labels.all_numbers),
    );
    f.render_stateful_widget(table, area, &mut app.state);
}

fn toggle_span(label: String, on: bool) -> Span<'static> {
    if on {
        Span::styled(
            format!("[x] {}", label),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("[ ] {}", label), Style::default().fg(Color::DarkGray))
    }
}

fn render_filters(f: &mut Frame, area: Rect, app: &App) {
    let labels = app.labels();
    let criteria = &app.criteria;
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut digit_spans = vec![Span::raw("  ")];
    for digit in 0..=9u8 {
        digit_spans.push(toggle_span(digit.to_string(), criteria.digits.contains(&digit)));
        digit_spans.push(Span::raw("  "));
    }

    let mut magnitude_spans = vec![Span::raw("  "), Span::styled(labels.big_small_label, heading), Span::raw(": ")];
    for (magnitude, key) in Magnitude::ALL.iter().zip(['b', 's']) {
        magnitude_spans.push(toggle_span(
            format!("{} ({})", magnitude, key),
            criteria.magnitudes.contains(magnitude),
        ));
        magnitude_spans.push(Span::raw("  "));
    }

    let mut parity_spans = vec![Span::raw("  "), Span::styled(labels.odd_even_label, heading), Span::raw(": ")];
    for (parity, key) in Parity::ALL.iter().zip(['o', 'e']) {
        parity_spans.push(toggle_span(
            format!("{} ({})", parity, key),
            criteria.parities.contains(parity),
        ));
        parity_spans.push(Span::raw("  "));
    }

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {}", labels.first_digit_filter_label), heading),
            Span::styled("  (0-9)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(digit_spans),
        Line::from(""),
        Line::from(vec![Span::styled(format!("  {}", labels.big_small_filter), heading)]),
        Line::from(magnitude_spans),
        Line::from(parity_spans),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {}: ", labels.generate_count_label), heading),
            Span::styled(
                format!("{}", app.count),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (+/-)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  g", Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}   ", labels.generate_button)),
            Span::styled("x", Style::default().fg(Color::Red)),
            Span::raw(format!(" {}", labels.clear_history)),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", labels.first_digit_filter)),
    );

    f.render_widget(paragraph, area);
}

fn render_selection(f: &mut Frame, area: Rect, app: &App) {
    let labels = app.labels();
    let table = code_table(code_rows(&app.selection), format!(" {} ", labels.selection_title));
    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => Color::Green,
            StatusKind::Warning => Color::Yellow,
            StatusKind::Error => Color::Red,
        };
        status_spans.push(Span::styled(format!(" {} ", status.message), Style::default().fg(color)));
        status_spans.push(Span::raw(" | "));
    }

    for (i, (key, action, color)) in [
        ("g", "Generate", Color::Yellow),
        ("0-9/b/s/o/e", "Filter", Color::Yellow),
        ("+/-", "Count", Color::Yellow),
        ("x", "Clear", Color::Yellow),
        ("l", "Lang", Color::Yellow),
        ("Tab", "Page", Color::Yellow),
        ("q", "Quit", Color::Red),
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            status_spans.push(Span::raw(" | "));
        }
        status_spans.push(Span::styled(key, Style::default().fg(color)));
        status_spans.push(Span::raw(format!(" {}", action)));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
