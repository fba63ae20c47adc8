//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame) {
    let overlay_area = centered_rect(52, 26, frame.area());

    frame.render_widget(Clear, overlay_area);

    let lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Stations"),
        help_line("↑/k, ↓/j", "Move selection up/down"),
        help_line("Enter, d", "Open station details"),
        help_line("Click", "Open details for a row"),
        help_line("r", "Refresh all stations"),
        help_line("q, Esc", "Quit application"),
        Line::from(""),
        section("Search"),
        help_line("/, s", "Focus the search box"),
        help_line("Enter", "Search (empty shows all)"),
        help_line("Esc", "Back to the table"),
        Line::from(""),
        section("Details"),
        help_line("↑/↓", "Scroll bike lists"),
        help_line("Esc, q", "Close details"),
        Line::from(""),
        section("Other"),
        help_line("?", "Toggle this help"),
        help_line("Ctrl+C", "Quit from anywhere"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Creates a help line with key and description
fn help_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(Color::Yellow)),
        Span::raw(description.to_string()),
    ])
}
