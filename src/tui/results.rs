use crate::render::Rendered;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use textwrap::wrap;

/// Scrollable pane showing the last search outcome
pub struct ResultsView {
    content: Rendered,
    scroll_offset: u16,
    viewport_height: u16,
    viewport_width: u16,
}

impl ResultsView {
    pub fn new() -> Self {
        Self {
            content: Rendered::Nothing,
            scroll_offset: 0,
            viewport_height: 0,
            viewport_width: 0,
        }
    }

    /// Replace the displayed outcome and jump back to the top
    pub fn set_content(&mut self, content: Rendered) {
        if self.content != content {
            self.content = content;
            self.scroll_offset = 0;
        }
    }

    pub fn content(&self) -> &Rendered {
        &self.content
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    /// Body lines wrapped to `width` (JSON keeps its indentation)
    fn wrapped_lines(&self, width: u16) -> Vec<String> {
        let body = match &self.content {
            Rendered::Payload(text) | Rendered::Error(text) => text.as_str(),
            Rendered::Nothing | Rendered::Busy => return Vec::new(),
        };

        let width = (width as usize).max(10);
        body.lines()
            .flat_map(|line| {
                if line.chars().count() <= width {
                    return vec![line.to_string()];
                }
                wrap(line, width)
                    .into_iter()
                    .map(|cow| cow.into_owned())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn max_scroll(&self) -> u16 {
        let lines = self.wrapped_lines(self.viewport_width.max(1)).len();
        let total = u16::try_from(lines).unwrap_or(u16::MAX);
        total.saturating_sub(self.viewport_height)
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Render the pane. `spinner` is the current busy indicator frame.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, spinner: &str) {
        let (title, border_color) = match &self.content {
            Rendered::Error(_) => (" Error ", Color::LightRed),
            Rendered::Payload(_) => (" Search Results ", Color::LightGreen),
            Rendered::Nothing | Rendered::Busy => (" Results ", Color::DarkGray),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(
                title,
                Style::default().fg(border_color).add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(area);
        self.viewport_height = inner.height;
        self.viewport_width = inner.width;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());

        let text = match &self.content {
            Rendered::Nothing => Text::from(Line::styled(
                "Type a product and press Enter to compare prices.",
                Style::default().fg(Color::DarkGray),
            )),
            Rendered::Busy => Text::from(Line::styled(
                format!("{spinner} Searching..."),
                Style::default().fg(Color::Yellow),
            )),
            Rendered::Error(_) => Text::from(
                self.wrapped_lines(inner.width)
                    .into_iter()
                    .map(|line| Line::styled(line, Style::default().fg(Color::Red)))
                    .collect::<Vec<_>>(),
            ),
            Rendered::Payload(_) => Text::from(
                self.wrapped_lines(inner.width)
                    .into_iter()
                    .map(Line::from)
                    .collect::<Vec<_>>(),
            ),
        };

        let paragraph = Paragraph::new(text)
            .block(block)
            .scroll((self.scroll_offset, 0));

        frame.render_widget(paragraph, area);
    }
}

impl Default for ResultsView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(lines: usize) -> Rendered {
        Rendered::Payload((0..lines).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n"))
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut view = ResultsView::new();
        view.viewport_height = 5;
        view.viewport_width = 40;
        view.set_content(payload(8));

        view.scroll_down(100);
        assert_eq!(view.scroll_offset(), 3);

        view.scroll_up(1);
        assert_eq!(view.scroll_offset(), 2);

        view.scroll_to_top();
        assert_eq!(view.scroll_offset(), 0);
    }

    #[test]
    fn test_new_content_resets_scroll() {
        let mut view = ResultsView::new();
        view.viewport_height = 2;
        view.viewport_width = 40;
        view.set_content(payload(10));
        view.scroll_down(4);

        view.set_content(Rendered::Error("Error: HTTP error! status: 500".to_string()));

        assert_eq!(view.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_reaches_bottom_of_huge_payload() {
        let mut view = ResultsView::new();
        view.viewport_height = 10;
        view.viewport_width = 40;
        view.set_content(payload(70_000));

        view.scroll_down(u16::MAX);

        assert_eq!(view.scroll_offset(), u16::MAX - 10);
    }

    #[test]
    fn test_long_lines_wrap() {
        let mut view = ResultsView::new();
        view.set_content(Rendered::Error("word ".repeat(10).trim_end().to_string()));
        assert!(view.wrapped_lines(10).len() > 1);
    }
}
