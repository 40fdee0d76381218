//! Terminal lifecycle and the event loop.

use crate::app::{AppControl, DashboardApp};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Take over the terminal, run until quit, and restore it even if the loop fails.
pub fn run(mut app: DashboardApp) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = res {
        tracing::error!(error = %err, "dashboard loop failed");
    }
    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut DashboardApp,
) -> io::Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| app.draw(f))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key) == AppControl::Quit {
                    tracing::info!("dashboard closed");
                    return Ok(());
                }
            }
        }
    }
}
