//! Veloboard - Vélib' station availability in your terminal
//!
//! A terminal UI application that lists bike-share stations from a station
//! backend, searches them by name, and shows per-station bike details.

use std::io;
use std::panic;
use std::process;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use veloboard::app::App;
use veloboard::cli::{Cli, StartupConfig};
use veloboard::data::StationsClient;
use veloboard::logging;
use veloboard::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    // Logging is optional; the dashboard runs without it.
    match logging::init_logging(config.log_file.as_deref()) {
        Ok(path) => tracing::info!(
            log_file = %path.display(),
            api_url = %config.api_url,
            "Starting veloboard"
        ),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(StationsClient::new(config.api_url));
    app.start(config.initial_query);

    // Main event loop
    loop {
        // Clicks are hit-tested against the area of the frame just drawn.
        let area = terminal.draw(|f| ui::render_app(f, &app))?.area;

        // Poll for input with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse, area),
                _ => {}
            }
        }

        app.drain_fetches();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("Exiting veloboard");
    Ok(())
}
