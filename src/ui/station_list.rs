//! Station list screen rendering
//!
//! Renders the search box, the loading marker, the station table and the
//! status/help lines. The table is rebuilt from `App::stations` on every
//! frame, so each render fully replaces the previous rows.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Focus};
use crate::data::{Station, StationStatus};

/// Label of the per-row detail control
pub const DETAIL_CONTROL_LABEL: &str = "[Details]";

/// Width of the detail control column
pub const DETAIL_COLUMN_WIDTH: u16 = 9;

/// Height of the table header row
const HEADER_HEIGHT: u16 = 1;

/// One table row, derived from a station
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRow {
    pub name: String,
    pub ebike: u32,
    pub mechanical: u32,
    pub status: StationStatus,
}

impl StationRow {
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            ebike: station.ebike_count(),
            mechanical: station.mechanical_count(),
            status: station.status(),
        }
    }
}

/// Converts stations into table rows, one per station, in input order
pub fn station_rows(stations: &[Station]) -> Vec<StationRow> {
    stations.iter().map(StationRow::from_station).collect()
}

/// Color for station status
pub fn status_color(status: StationStatus) -> Color {
    match status {
        StationStatus::Active => Color::Green,
        StationStatus::Inactive => Color::Red,
    }
}

/// What a click on the table landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    /// Anywhere on a row outside the detail control
    Row(usize),
    /// The row's detail control; consumes the click
    DetailControl(usize),
}

impl RowTarget {
    /// Index of the station the click refers to
    pub fn index(self) -> usize {
        match self {
            RowTarget::Row(index) | RowTarget::DetailControl(index) => index,
        }
    }
}

/// Screen regions of the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLayout {
    pub search: Rect,
    pub loading: Rect,
    pub table: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Splits the screen into the list view regions
pub fn list_layout(area: Rect) -> ListLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(3),    // Station table
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(16)])
        .split(chunks[0]);

    ListLayout {
        search: header[0],
        loading: header[1],
        table: chunks[1],
        status: chunks[2],
        help: chunks[3],
    }
}

fn table_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Number of station rows that fit in the table area
pub fn visible_rows(table_area: Rect) -> usize {
    table_block()
        .inner(table_area)
        .height
        .saturating_sub(HEADER_HEIGHT) as usize
}

/// First row index to draw so that `selected` stays in view
pub fn table_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    selected.saturating_sub(visible - 1)
}

/// Maps a terminal cell to the table row under it.
///
/// # Arguments
/// * `area` - The full frame area the list was rendered into
/// * `app` - The application state the list was rendered from
/// * `column`, `row` - The clicked cell
pub fn hit_test(area: Rect, app: &App, column: u16, row: u16) -> Option<RowTarget> {
    let table_area = list_layout(area).table;
    let inner = table_block().inner(table_area);

    let first_row = inner.y + HEADER_HEIGHT;
    if row < first_row || row >= inner.bottom() || column < inner.x || column >= inner.right() {
        return None;
    }

    let offset = table_offset(app.selected_index, visible_rows(table_area));
    let index = offset + (row - first_row) as usize;
    if index >= app.stations.len() {
        return None;
    }

    if column >= inner.right().saturating_sub(DETAIL_COLUMN_WIDTH) {
        Some(RowTarget::DetailControl(index))
    } else {
        Some(RowTarget::Row(index))
    }
}

/// Renders the station list screen
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - The application state containing stations and selection
pub fn render_station_list(frame: &mut Frame, app: &App) {
    let layout = list_layout(frame.area());

    render_search_box(frame, app, layout.search);
    render_loading_marker(frame, app, layout.loading);
    render_table(frame, app, layout.table);
    render_status(frame, app, layout.status);
    render_help(frame, app, layout.help);
}

fn render_search_box(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };

    let content = if focused {
        Line::from(vec![
            Span::styled(app.search_input.clone(), Style::default().fg(Color::White)),
            Span::styled("\u{2588}", Style::default().fg(Color::Yellow)), // █
        ])
    } else if app.search_input.is_empty() {
        Line::from(Span::styled(
            "Press / to search stations by name",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            app.search_input.clone(),
            Style::default().fg(Color::Gray),
        ))
    };

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_loading_marker(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.loading.is_visible() {
        Line::from(Span::styled(
            " \u{27F3} Loading...", // ⟳
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from("")
    };

    // Skip the first row so the marker lines up with the search text.
    frame.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
}

fn table_title(stations: &[Station]) -> String {
    let ebikes: u64 = stations.iter().map(|s| u64::from(s.ebike_count())).sum();
    let mechanical: u64 = stations.iter().map(|s| u64::from(s.mechanical_count())).sum();
    format!(
        " Vélib' Stations ({}) \u{2502} {} e-bikes \u{2502} {} mechanical ",
        stations.len(),
        ebikes,
        mechanical
    )
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = table_block().title(table_title(&app.stations));

    if app.stations.is_empty() {
        let message = if app.loading.is_visible() {
            "Loading stations..."
        } else {
            "No stations to display"
        };
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let visible = visible_rows(area);
    let offset = table_offset(app.selected_index, visible);
    let table_focused = app.focus == Focus::Table;

    let rows: Vec<Row> = station_rows(&app.stations)
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, row)| {
            let is_selected = index == app.selected_index;
            let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸
            let name_style = if is_selected && table_focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::styled(cursor, Style::default().fg(Color::Cyan)),
                    Span::styled(row.name, name_style),
                ])),
                Cell::from(row.ebike.to_string()),
                Cell::from(row.mechanical.to_string()),
                Cell::from(Span::styled(
                    row.status.label(),
                    Style::default().fg(status_color(row.status)),
                )),
                Cell::from(Span::styled(
                    DETAIL_CONTROL_LABEL,
                    Style::default().fg(Color::Blue),
                )),
            ])
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("  Station Name"),
        Cell::from("E-Bikes"),
        Cell::from("Mechanical"),
        Cell::from("Status"),
        Cell::from(""),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(DETAIL_COLUMN_WIDTH),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = app.status_message.clone().unwrap_or_default();
    let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(Color::Gray)));
    frame.render_widget(paragraph, area);
}

/// Renders the help text at the bottom of the screen with data freshness
fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let mut help_spans = if app.focus == Focus::Search {
        vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Search  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" Back to list"),
        ]
    } else {
        vec![
            Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
            Span::raw(" Navigate  "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Details  "),
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(" Search  "),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(" Refresh  "),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::raw(" Help  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ]
    };

    if let Some(last_refresh) = app.last_refresh {
        let elapsed = Local::now() - last_refresh;
        let mins_ago = elapsed.num_minutes();
        let freshness_text = if mins_ago < 1 {
            " │ Data: just now".to_string()
        } else if mins_ago < 60 {
            format!(" │ Data: {}m ago", mins_ago)
        } else {
            format!(" │ Data: {}h ago", elapsed.num_hours())
        };
        help_spans.push(Span::styled(
            freshness_text,
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph =
        Paragraph::new(Line::from(help_spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
