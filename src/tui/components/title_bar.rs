//! # TitleBar Component
//!
//! Top status bar showing application state and notifications.
//!
//! ## Responsibilities
//!
//! - Display the advisor endpoint in use
//! - Display the status message ("Thinking...", fallback notices)
//! - Show "↓ New" indicator when there's unseen content below scroll
//!
//! TitleBar is purely presentational: all three fields are props.
//! `endpoint` and `status_message` come from the core `App`,
//! `has_unseen_content` from the message list's scroll state.
//!
//! The text is truncated to the terminal width by display columns so the
//! bar never wraps.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

const APP_TITLE: &str = "AI Financial Advisor";

/// Top status bar component.
pub struct TitleBar {
    /// Endpoint the advisor client posts to
    pub endpoint: String,
    /// Transient status, empty when there's nothing to report
    pub status_message: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(endpoint: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            endpoint,
            status_message,
            has_unseen_content,
        }
    }

    /// The bar's plain text before truncation.
    pub fn text(&self) -> String {
        let mut text = format!("{APP_TITLE} ({})", self.endpoint);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            text.push_str(" | ↓ New");
        }
        text
    }
}

/// Cut `text` to at most `width` display columns.
fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = truncate_to_width(&self.text(), area.width as usize);
        let line = Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
