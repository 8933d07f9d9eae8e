use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
    Frame,
};
use tui_textarea::TextArea;

/// Single-line query box wrapper around tui-textarea
pub struct QueryInput {
    textarea: TextArea<'static>,
}

impl QueryInput {
    /// Create a query box pre-filled with `initial`
    pub fn new(initial: &str) -> Self {
        let mut textarea = TextArea::new(vec![initial.to_string()]);
        textarea.set_placeholder_text("Search for products...");
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(tui_textarea::CursorMove::End);

        let mut input = Self { textarea };
        input.set_busy(false);
        input
    }

    /// Handle keyboard input. Returns true when the text changed.
    ///
    /// Keys that would start a second line are swallowed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let newline = key.code == KeyCode::Enter
            || (key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')));
        if newline {
            return false;
        }
        self.textarea.input(key)
    }

    /// Current query text
    pub fn text(&self) -> String {
        self.textarea.lines().join(" ")
    }

    /// Dim the border while a search is running
    pub fn set_busy(&mut self, busy: bool) {
        let (title_color, border_color) = if busy {
            (Color::DarkGray, Color::DarkGray)
        } else {
            (Color::LightBlue, Color::Blue)
        };

        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(Span::styled(
                    " Search ",
                    Style::default().fg(title_color).add_modifier(Modifier::BOLD),
                ))
                .border_style(Style::default().fg(border_color)),
        );
    }

    /// Render the query box
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_starts_with_initial_text() {
        let input = QueryInput::new("Samsung Galaxy M14");
        assert_eq!(input.text(), "Samsung Galaxy M14");
    }

    #[test]
    fn test_typing_appends_at_end() {
        let mut input = QueryInput::new("M14");
        assert!(input.handle_key(key(KeyCode::Char('s'))));
        assert_eq!(input.text(), "M14s");

        assert!(input.handle_key(key(KeyCode::Backspace)));
        assert_eq!(input.text(), "M14");
    }

    #[test]
    fn test_enter_does_not_add_a_line() {
        let mut input = QueryInput::new("phone");
        assert!(!input.handle_key(key(KeyCode::Enter)));
        assert!(!input.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL)));
        assert_eq!(input.text(), "phone");
    }
}
