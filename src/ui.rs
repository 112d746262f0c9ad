//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table, TableState, Wrap},
};

use crate::app::{App, PromptKind};
use crate::config::UiSettings;
use crate::library::{
    MediaItem, SortKey, SortOrder, Totals, format_date, format_duration, format_size,
};

/// Table columns, left to right.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Name,
    Date,
    Size,
    Duration,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::Name, Column::Date, Column::Size, Column::Duration];

    fn title(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Date => "Date Modified",
            Column::Size => "Size",
            Column::Duration => "Duration",
        }
    }

    fn width(self) -> Constraint {
        match self {
            Column::Name => Constraint::Min(20),
            Column::Date => Constraint::Length(17),
            Column::Size => Constraint::Length(10),
            Column::Duration => Constraint::Length(11),
        }
    }

    /// The sort key bound to this column's header, if any.
    fn sort_key(self) -> Option<SortKey> {
        match self {
            Column::Name => Some(SortKey::Name),
            Column::Date => Some(SortKey::Date),
            Column::Size => Some(SortKey::Size),
            Column::Duration => None,
        }
    }

    /// Cell text for `item` in this column.
    pub fn render(self, item: &MediaItem, ui: &UiSettings) -> String {
        match self {
            Column::Name => format!("{} {}", item.icon.glyph(), item.name),
            Column::Date => format_date(item.modified, &ui.date_format),
            Column::Size => {
                if item.is_container {
                    "--".to_string()
                } else {
                    format_size(item.size)
                }
            }
            Column::Duration => item
                .duration
                .map(format_duration)
                .unwrap_or_else(|| "???".to_string()),
        }
    }

    fn header(self, sort: Option<(SortKey, SortOrder)>) -> String {
        match (self.sort_key(), sort) {
            (Some(k), Some((current, order))) if k == current => {
                format!("{} {}", self.title(), order.arrow())
            }
            _ => self.title().to_string(),
        }
    }
}

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("x", "mark"),
    ("A", "mark all"),
    ("J/K", "nudge down/up"),
    ("m", "drag"),
    ("d", "remove"),
    ("1/2/3", "sort name/date/size"),
    ("a", "add"),
    ("space", "preview"),
    ("c", "concatenate"),
    ("q", "quit"),
];

const DRAG_CONTROLS: &[(&str, &str)] = &[
    ("j/k", "move drop point"),
    ("gg/G", "top/end"),
    ("enter", "drop above cursor"),
    ("esc", "cancel"),
];

fn controls_text(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// `12.3 MB • 0:01:05`, with a `+` on the duration when some items had none.
fn totals_text(t: &Totals) -> String {
    let plus = if t.missing_duration > 0 { "+" } else { "" };
    format!(
        "{} • {}{}",
        format_size(t.size),
        format_duration(t.duration),
        plus
    )
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    let total = app.totals();
    let noun = if total.count == 1 { "movie" } else { "movies" };
    parts.push(format!(" {} {noun}", total.count));
    if total.count > 0 {
        parts.push(totals_text(&total));
    }

    if !app.selection.is_empty() {
        let sel = app.selection_totals();
        parts.push(format!("MARKED: {} ({})", sel.count, totals_text(&sel)));
    }

    if let Some((key, order)) = app.sort {
        let name = match key {
            SortKey::Name => "name",
            SortKey::Date => "date",
            SortKey::Size => "size",
        };
        parts.push(format!("SORT: {name} {}", order.arrow()));
    }

    if app.is_dragging() {
        parts.push("DRAGGING".to_string());
    }

    let mut line = parts.join(" • ");
    if let Some(msg) = &app.status {
        line.push('\n');
        line.push(' ');
        line.push_str(msg);
    }
    line
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" stitchee ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(app))
        .block(Block::bordered().title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Item table
    {
        let header_row = Row::new(
            Column::ALL
                .iter()
                .map(|c| Cell::from(c.header(app.sort))),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let mut rows: Vec<Row> = app
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let row = Row::new(Column::ALL.iter().map(|c| Cell::from(c.render(item, ui_settings))));
                if app.selection.contains(&i) {
                    row.style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan))
                } else {
                    row
                }
            })
            .collect();

        let dragging = app.is_dragging();
        if dragging {
            // Drop target past the last row.
            rows.push(Row::new([Cell::from("── end of list ──")]).dim());
        }

        let title = if dragging {
            " items: drop above the cursor row "
        } else {
            " items "
        };
        let table = Table::new(rows, Column::ALL.map(Column::width))
            .header(header_row)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(if dragging { "⇢ " } else { "> " });

        let mut state = TableState::default();
        if app.has_items() {
            state.select(Some(app.cursor));
        }
        frame.render_stateful_widget(table, chunks[2], &mut state);
    }

    // Footer: prompt input when asking for something, controls otherwise.
    let footer = match &app.prompt {
        Some(prompt) => {
            let (title, hint) = match prompt.kind {
                PromptKind::AddFiles => (" add files ", "paths or folders, space separated"),
                PromptKind::SaveAs => (" save as ", "output path, extension is added"),
            };
            Paragraph::new(vec![
                Line::from(format!("> {}█", prompt.input)),
                Line::from(format!("{hint} • [enter] ok • [esc] cancel")).dim(),
            ])
            .block(Block::default().borders(Borders::ALL).title(title))
        }
        None => {
            let text = if app.is_dragging() {
                controls_text(DRAG_CONTROLS)
            } else {
                controls_text(CONTROLS)
            };
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" controls ")
                        .padding(Padding {
                            left: 1,
                            right: 0,
                            top: 0,
                            bottom: 0,
                        }),
                )
                .wrap(Wrap { trim: true })
        }
    };
    frame.render_widget(footer, chunks[3]);
}
