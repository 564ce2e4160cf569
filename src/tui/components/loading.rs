use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::tui::component::Component;

const DOTS: &str = "● ● ●";
const LABEL: &str = "Advisor is analyzing your question...";

/// Static "advisor is working" row, shown while a request is outstanding.
#[derive(Clone, Copy, Default)]
pub struct LoadingIndicator;

impl LoadingIndicator {
    pub const HEIGHT: u16 = 1;
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(DOTS, Style::default().fg(Color::Blue)),
            Span::raw("  "),
            Span::styled(
                LABEL,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
        .render(area, buf);
    }
}

impl Component for LoadingIndicator {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
