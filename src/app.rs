//! Application state management for Veloboard
//!
//! This module contains the main application state: the station list, the
//! search box, open overlays, and the plumbing that starts background fetches
//! and applies their results.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::data::{FetchRequest, Station, StationsClient};
use crate::fetch::{self, FetchMessage, FetchOutcome};
use crate::loading::LoadingIndicator;
use crate::ui::station_list::{hit_test, RowTarget};

/// Which part of the list screen receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Arrow keys move the table selection
    Table,
    /// Characters are typed into the search box
    Search,
}

/// Main application struct managing state and data
pub struct App {
    /// Stations currently shown in the table, in backend order
    pub stations: Vec<Station>,
    /// Index of the selected row
    pub selected_index: usize,
    /// Text typed into the search box
    pub search_input: String,
    /// Where keystrokes go
    pub focus: Focus,
    /// Station shown in the detail modal, if open
    pub detail: Option<Station>,
    /// Scroll offset of the bike lists in the detail modal
    pub detail_scroll: u16,
    /// Blocking error messages, one per failed fetch, oldest first
    pub notifications: VecDeque<String>,
    /// Outcome of the last fetch, shown under the table
    pub status_message: Option<String>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Time the table was last replaced by a successful fetch
    pub last_refresh: Option<DateTime<Local>>,
    /// Shared loading flag, also held by in-flight fetches
    pub loading: LoadingIndicator,
    client: StationsClient,
    tx: mpsc::Sender<FetchMessage>,
    rx: mpsc::Receiver<FetchMessage>,
}

impl App {
    /// Creates a new App with an empty table
    pub fn new(client: StationsClient) -> Self {
        let (tx, rx) = fetch::channel();
        Self {
            stations: Vec::new(),
            selected_index: 0,
            search_input: String::new(),
            focus: Focus::Table,
            detail: None,
            detail_scroll: 0,
            notifications: VecDeque::new(),
            status_message: None,
            show_help: false,
            should_quit: false,
            last_refresh: None,
            loading: LoadingIndicator::new(),
            client,
            tx,
            rx,
        }
    }

    /// Starts the first fetch: a search when `initial_query` is set,
    /// otherwise the full list.
    pub fn start(&mut self, initial_query: Option<String>) {
        match initial_query {
            Some(query) => {
                self.search_input = query;
                self.submit_search();
            }
            None => self.refresh(),
        }
    }

    /// Fetches the full station list in the background
    pub fn refresh(&mut self) {
        self.spawn(FetchRequest::All);
    }

    /// Runs the search box contents; blank input fetches everything
    pub fn submit_search(&mut self) {
        let request = FetchRequest::from_query(&self.search_input);
        self.focus = Focus::Table;
        self.spawn(request);
    }

    fn spawn(&mut self, request: FetchRequest) {
        tracing::debug!(?request, "Starting fetch");
        fetch::spawn_fetch(self.client.clone(), request, &self.loading, self.tx.clone());
    }

    /// Applies a finished fetch to the display.
    ///
    /// A success replaces the table. A failure leaves the table alone and
    /// queues a notification. The loading guard carried by the message is
    /// released afterwards.
    pub fn apply_fetch(&mut self, message: FetchMessage) {
        let FetchMessage {
            request,
            outcome,
            loading,
        } = message;

        match outcome {
            FetchOutcome::Loaded(stations) => {
                let now = Local::now();
                tracing::info!(count = stations.len(), ?request, "Station list updated");

                self.status_message = Some(match &request {
                    FetchRequest::All => format!("Data updated at {}", now.format("%H:%M:%S")),
                    FetchRequest::Search(_) => {
                        format!("Found {} matching stations", stations.len())
                    }
                });
                self.stations = stations;
                self.selected_index = 0;
                self.last_refresh = Some(now);
            }
            FetchOutcome::Failed(error) => {
                tracing::error!(%error, ?request, "{}", request.failure_message());
                self.notifications
                    .push_back(request.failure_message().to_string());
                self.status_message = Some("Error fetching data".to_string());
            }
        }

        drop(loading);
    }

    /// Applies every fetch result that has already arrived
    pub fn drain_fetches(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.apply_fetch(message);
        }
    }

    /// Waits for the next fetch result and applies it.
    ///
    /// # Returns
    /// `false` if no more results can arrive
    pub async fn wait_for_fetch(&mut self) -> bool {
        match self.rx.recv().await {
            Some(message) => {
                self.apply_fetch(message);
                true
            }
            None => false,
        }
    }

    /// Opens the detail modal for the station at `index`
    pub fn show_details(&mut self, index: usize) {
        if let Some(station) = self.stations.get(index) {
            self.selected_index = index;
            self.detail = Some(station.clone());
            self.detail_scroll = 0;
        }
    }

    pub fn close_details(&mut self) {
        self.detail = None;
        self.detail_scroll = 0;
    }

    /// Handles keyboard input
    ///
    /// Overlays take precedence, top-most first: notification, help, detail.
    /// Without an overlay, keys go to the search box or the table depending
    /// on focus.
    ///
    /// - `Ctrl+C`: Quit from anywhere
    /// - `q` or `Esc` (table): Quit the application
    /// - `Up`/`k`, `Down`/`j`: Move selection (table) or scroll (detail)
    /// - `Enter`/`d` (table): Open station details
    /// - `/` or `s` (table): Focus the search box
    /// - `Enter` (search): Run the search
    /// - `r` (table): Refresh all stations
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        if !self.notifications.is_empty() {
            if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
                self.notifications.pop_front();
            }
            return;
        }

        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        if self.detail.is_some() {
            match key_event.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.close_details(),
                KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
                KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
                KeyCode::Home => self.detail_scroll = 0,
                _ => {}
            }
            return;
        }

        match self.focus {
            Focus::Search => match key_event.code {
                KeyCode::Enter => self.submit_search(),
                KeyCode::Esc => self.focus = Focus::Table,
                KeyCode::Backspace => {
                    self.search_input.pop();
                }
                KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.search_input.push(c)
                }
                _ => {}
            },
            Focus::Table => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
                KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
                KeyCode::Enter | KeyCode::Char('d') => self.show_details(self.selected_index),
                KeyCode::Char('/') | KeyCode::Char('s') => self.focus = Focus::Search,
                KeyCode::Char('r') => self.refresh(),
                KeyCode::Char('?') => self.show_help = true,
                _ => {}
            },
        }
    }

    /// Handles a click that landed on the table
    pub fn handle_click(&mut self, target: RowTarget) {
        match target {
            RowTarget::Row(index) | RowTarget::DetailControl(index) => self.show_details(index),
        }
    }

    /// Handles mouse input against the last drawn frame area
    pub fn handle_mouse(&mut self, mouse_event: MouseEvent, area: Rect) {
        if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if !self.notifications.is_empty() || self.show_help || self.detail.is_some() {
            return;
        }

        if let Some(target) = hit_test(area, self, mouse_event.column, mouse_event.row) {
            self.focus = Focus::Table;
            self.handle_click(target);
        }
    }

    /// Moves the selection up in the list, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.stations.len();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the list, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.stations.len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    /// Scrolls the bike lists down, stopping at the last bike of the longer list
    fn scroll_down(&mut self) {
        let Some(station) = &self.detail else {
            return;
        };
        let partition = station.partition_bikes();
        let longest = partition.ebikes.len().max(partition.mechanical.len());
        let max_scroll = u16::try_from(longest.saturating_sub(1)).unwrap_or(u16::MAX);
        if self.detail_scroll < max_scroll {
            self.detail_scroll += 1;
        }
    }
}
