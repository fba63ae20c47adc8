//! Station detail modal
//!
//! Renders one station as a centered overlay on top of the list: status, the
//! e-bike and mechanical bike lists side by side, capacity and location. It
//! works only from the record it is given and never fetches.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::data::{Bike, Station, StationStatus};
use crate::ui::centered_rect;
use crate::ui::station_list::status_color;

/// Color scheme for the detail modal
mod colors {
    use ratatui::style::Color;

    /// Modal border and section headers
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// E-bike list accent
    pub const EBIKE: Color = Color::LightBlue;
    /// Mechanical list accent
    pub const MECHANICAL: Color = Color::LightYellow;
}

const MODAL_WIDTH: u16 = 76;
const MODAL_HEIGHT: u16 = 24;

/// Everything the modal shows, derived from one station
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationDetails {
    pub name: String,
    pub station_code: Option<String>,
    pub status: StationStatus,
    pub flags: String,
    pub ebikes: Vec<String>,
    pub mechanical: Vec<String>,
    pub has_bike_records: bool,
    pub capacity_line: String,
    pub location_line: Option<String>,
}

/// "Bike #{number} - {status}"
pub fn bike_line(bike: &Bike) -> String {
    format!("Bike #{} - {}", bike.number, bike.status)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

impl StationDetails {
    pub fn from_station(station: &Station) -> Self {
        let partition = station.partition_bikes();

        // An absent returning flag reads as "No", like the other two.
        let flags = format!(
            "Installed: {}  Renting: {}  Returning: {}",
            yes_no(station.is_installed),
            yes_no(station.is_renting),
            yes_no(station.is_returning.unwrap_or(false))
        );

        Self {
            name: station.name.clone(),
            station_code: station.stationcode.clone(),
            status: station.status(),
            flags,
            ebikes: partition.ebikes.into_iter().map(bike_line).collect(),
            mechanical: partition.mechanical.into_iter().map(bike_line).collect(),
            has_bike_records: !station.bikes().is_empty(),
            capacity_line: format!(
                "{}/{} bikes",
                station.available_bikes(),
                station.capacity_or_zero()
            ),
            location_line: station.coordonnees_geo.map(|geo| geo.to_string()),
        }
    }

    pub fn ebike_heading(&self) -> String {
        format!("E-Bikes ({})", self.ebikes.len())
    }

    pub fn mechanical_heading(&self) -> String {
        format!("Mechanical Bikes ({})", self.mechanical.len())
    }
}

/// Renders the detail modal for `station`
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `station` - The station record to describe
/// * `scroll` - Vertical scroll offset applied to both bike lists
pub fn render(frame: &mut Frame, station: &Station, scroll: u16) {
    let details = StationDetails::from_station(station);
    let area = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Station Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let summary_height: u16 = 4 + u16::from(details.station_code.is_some());
    let footer_height: u16 = 2 + u16::from(details.location_line.is_some());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(summary_height),
            Constraint::Min(3),
            Constraint::Length(footer_height),
        ])
        .split(inner);

    render_summary(frame, &details, chunks[0]);
    render_bike_lists(frame, &details, chunks[1], scroll);
    render_footer(frame, &details, chunks[2]);
}

fn render_summary(frame: &mut Frame, details: &StationDetails, area: Rect) {
    let status_style = Style::default().fg(status_color(details.status));

    let mut lines = vec![Line::from(Span::styled(
        details.name.clone(),
        Style::default()
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD),
    ))];

    if let Some(code) = &details.station_code {
        lines.push(Line::from(Span::styled(
            format!("Station Code: {}", code),
            Style::default().fg(colors::SECONDARY),
        )));
    }

    lines.push(Line::from(vec![
        Span::styled("\u{25CF} ", status_style), // ●
        Span::raw("Status: "),
        Span::styled(details.status.label(), status_style),
    ]));

    lines.push(Line::from(Span::styled(
        details.flags.clone(),
        Style::default().fg(colors::SECONDARY),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

fn bike_list(heading: String, bikes: &[String], accent: Color, scroll: u16) -> Paragraph<'static> {
    let lines: Vec<Line> = bikes
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), Style::default().fg(colors::PRIMARY))))
        .collect();

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", heading),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    Paragraph::new(lines).block(block).scroll((scroll, 0))
}

fn render_bike_lists(frame: &mut Frame, details: &StationDetails, area: Rect, scroll: u16) {
    let hint_height = u16::from(!details.has_bike_records);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(hint_height)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    frame.render_widget(
        bike_list(details.ebike_heading(), &details.ebikes, colors::EBIKE, scroll),
        columns[0],
    );
    frame.render_widget(
        bike_list(
            details.mechanical_heading(),
            &details.mechanical,
            colors::MECHANICAL,
            scroll,
        ),
        columns[1],
    );

    // Both lists keep their zero headings; the hint sits underneath.
    if !details.has_bike_records {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No bike information available",
                Style::default().fg(colors::SECONDARY),
            )),
            rows[1],
        );
    }
}

fn render_footer(frame: &mut Frame, details: &StationDetails, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            "Total Capacity: ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(details.capacity_line.clone()),
    ])];

    if let Some(location) = &details.location_line {
        lines.push(Line::from(vec![
            Span::styled("Location: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(location.clone()),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" Close  ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::styled(" Scroll bikes", Style::default().fg(Color::DarkGray)),
    ]));

    frame.render_widget(Paragraph::new(lines), area);
}
