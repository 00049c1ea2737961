//! Terminal User Interface (TUI) for coretemp-graph
//!
//! One chart per core, refreshed every tick, drawn with ratatui on a crossterm
//! backend. Keyboard input is only looked at between ticks.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, prelude::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

mod app;
mod ui;

pub use app::App;
pub use ui::grid_dimensions;

/// Run the TUI application until the user quits or a tick fails
pub fn run(app: &mut App) -> Result<()> {
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

    res
}

/// Main application loop
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_rate = app.monitor.refresh_interval();
    let mut last_tick = Instant::now();

    while app.monitor.is_running() {
        if let Err(e) = terminal.draw(|f| ui::draw(f, app)) {
            return Err(app.monitor.fail(Error::Io(e)));
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.monitor.request_stop(),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.monitor.request_stop()
                        }
                        KeyCode::Char('l') => app.toggle_legend(),
                        _ => {}
                    }
                }
            }
        }

        if app.monitor.is_running() && last_tick.elapsed() >= tick_rate {
            app.monitor.tick()?;
            last_tick = Instant::now();
        }
    }

    Ok(())
}
