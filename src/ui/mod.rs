//! UI rendering module for Veloboard
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod help_overlay;
pub mod notification;
pub mod station_detail;
pub mod station_list;

pub use help_overlay::render as render_help_overlay;
pub use notification::render as render_notification;
pub use station_detail::render as render_station_detail;
pub use station_list::render_station_list;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::App;

/// Renders the whole screen: the station list, then any overlays on top
pub fn render_app(frame: &mut Frame, app: &App) {
    render_station_list(frame, app);

    if let Some(station) = &app.detail {
        render_station_detail(frame, station, app.detail_scroll);
    }

    if app.show_help {
        render_help_overlay(frame);
    }

    // The notification blocks everything else, so it is drawn last.
    if let Some(message) = app.notifications.front() {
        render_notification(frame, message);
    }
}

/// Creates a rect of at most `width` x `height` centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
