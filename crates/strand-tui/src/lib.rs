//! strand-tui: Terminal UI for strand timelines
//!
//! This crate provides the terminal front end for the strand engine:
//! - Layout pass mapping pixel extents and scroll offsets onto cells
//! - Timeline pane in horizontal, vertical and tree modes
//! - Previous/next control bar
//! - Event pump feeding keys, wheel and clicks to the engine

mod app;
mod event;
pub mod metrics;
mod theme;
#[cfg(test)]
pub mod test_utils;
pub mod timeline;

pub use app::App;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use strand_engine;
pub use theme::Theme;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::stdout;
use strand_engine::{Clock, Timeline};
use tracing::{debug, info};

/// Event pump tick rate. Must stay well under the debounce delay.
pub const TICK_RATE_MS: u64 = 16;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal on exit.
pub async fn run_tui<C: Clock>(timeline: Timeline<C>) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(
        mode = %timeline.mode(),
        items = timeline.items().len(),
        "starting timeline view"
    );
    let mut app = App::new(timeline);
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.draw(area, frame.buffer_mut());
        })?;

        match events.next().await {
            Some(event) => handle_event(app, event),
            None => break,
        }

        if app.should_quit {
            info!("quit requested");
            break;
        }
    }

    Ok(())
}

/// Apply one event to the app, then let the debounce timer fire.
pub fn handle_event<C: Clock>(app: &mut App<C>, event: Event) {
    match event {
        Event::Key(key) => {
            app.handle_key(key);
        }
        Event::Mouse(mouse) => app.handle_mouse(mouse),
        Event::Resize(width, height) => debug!(width, height, "resize"),
        Event::Tick => {}
    }

    if let Some(settled) = app.tick() {
        debug!(index = settled.index, offset = ?settled.offset, "settled");
    }
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
