pub mod app;
pub mod input;
pub mod results;

pub use app::App;
pub use input::QueryInput;
pub use results::ResultsView;

use crate::event::{Event, EventReader};
use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(120);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive search screen until the user quits
pub async fn run(mut app: App) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    let mut events = EventReader::new(TICK_RATE);

    while !app.should_quit() {
        terminal
            .draw(|frame| app.render(frame))
            .context("Failed to draw frame")?;

        tokio::select! {
            event = events.next() => app.handle_event(event?)?,
            alive = app.state_changed() => {
                if alive {
                    app.sync_state();
                } else {
                    app.handle_event(Event::Quit)?;
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
