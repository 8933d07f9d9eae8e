use crate::event::{Event, EventResult};
use crate::render::render_state;
use crate::search::{SearchController, SearchState};
use crate::tui::{QueryInput, ResultsView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tokio::sync::watch;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Main application state
pub struct App {
    /// Search controller shared with in-flight search tasks
    controller: SearchController,
    /// State-change notifications from the controller
    state_rx: watch::Receiver<SearchState>,
    /// Query box
    pub input: QueryInput,
    /// Result / error pane
    results: ResultsView,
    /// Where searches are sent, shown in the footer
    service_url: String,
    /// Mirrors the controller's pending flag; disables the search action
    is_loading: bool,
    /// Whether the application should quit
    should_quit: bool,
    /// Busy indicator frame
    spinner_frame: usize,
}

impl App {
    /// Create a new application instance
    pub fn new(controller: SearchController, service_url: impl Into<String>) -> Self {
        let state_rx = controller.subscribe();
        let input = QueryInput::new(&controller.query());

        let mut app = Self {
            controller,
            state_rx,
            input,
            results: ResultsView::new(),
            service_url: service_url.into(),
            is_loading: false,
            should_quit: false,
            spinner_frame: 0,
        };
        app.sync_state();
        app
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    /// Wait until the controller reports a change. Returns false if it is gone.
    pub async fn state_changed(&mut self) -> bool {
        self.state_rx.changed().await.is_ok()
    }

    /// Pull the latest controller state into the view
    pub fn sync_state(&mut self) {
        let state = self.state_rx.borrow_and_update().clone();

        if self.is_loading != state.is_loading() {
            self.is_loading = state.is_loading();
            self.input.set_busy(self.is_loading);
        }
        self.results.set_content(render_state(&state));
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: Event) -> EventResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => {
                if self.is_loading {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
                }
                Ok(())
            }
            Event::Quit => {
                self.quit();
                Ok(())
            }
            Event::Resize(..) => Ok(()),
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.quit();
            return Ok(());
        }

        match key.code {
            KeyCode::Enter => {
                self.submit_search();
                return Ok(());
            }
            KeyCode::Up => self.results.scroll_up(1),
            KeyCode::Down => self.results.scroll_down(1),
            KeyCode::PageUp => self.results.scroll_up(10),
            KeyCode::PageDown => self.results.scroll_down(10),
            KeyCode::Home => self.results.scroll_to_top(),
            _ => {
                if self.input.handle_key(key) {
                    self.controller.set_query(self.input.text());
                }
            }
        }
        Ok(())
    }

    /// Start a search in the background unless one is already running
    fn submit_search(&mut self) {
        if self.is_loading {
            return;
        }

        let controller = self.controller.clone();
        tokio::spawn(async move {
            controller.submit_search().await;
        });
    }

    fn quit(&mut self) {
        self.controller.teardown();
        self.should_quit = true;
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Query box
                Constraint::Length(3), // Search action
                Constraint::Min(3),    // Results
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        let title = Paragraph::new(Line::styled(
            "🛒 Compareason - Price Comparison",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        self.input.render(frame, chunks[1]);
        self.render_action(frame, chunks[2]);

        let spinner = SPINNER[self.spinner_frame];
        self.results.render(frame, chunks[3], spinner);

        self.render_hints(frame, chunks[4]);
    }

    fn render_action(&self, frame: &mut Frame, area: Rect) {
        let (label, color) = if self.is_loading {
            ("Searching...", Color::DarkGray)
        } else {
            ("Compare Prices", Color::LightBlue)
        };

        let action = Paragraph::new(Line::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );

        frame.render_widget(action, area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw("=compare │ "),
            Span::styled("↑↓ PgUp/PgDn Home", Style::default().fg(Color::Yellow)),
            Span::raw("=scroll │ "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw("=quit │ "),
            Span::styled(self.service_url.as_str(), Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(hints), area);
    }
}
