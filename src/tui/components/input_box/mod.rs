//! # InputBox Component
//!
//! The draft editor and send control.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Shift+Enter / Ctrl+J for newlines)
//! - Handle editing (backspace, delete, cursor and word movement)
//! - Handle submission: Enter, or a click on the `[ Send ]` button
//! - Refuse all of the above while `disabled`
//!
//! ## State Management
//!
//! The draft is internal state. `disabled` is a prop synced from
//! `App::is_loading` before every frame. Cursor position and scroll state
//! are encapsulated in `CursorState`.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, next_word_boundary,
    prev_char_boundary, prev_word_boundary, wrapped_lines,
};

const SEND_LABEL: &str = "[ Send ]";
const PLACEHOLDER: &str = "Ask about budgeting, saving, investing or taxes...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the trimmed, non-empty draft
    Submit(String),
    /// Draft or cursor changed
    ContentChanged,
}

/// Text input component with a send button.
///
/// # Props
///
/// - `disabled`: true while a request is outstanding
///
/// # State
///
/// - `buffer`: the current draft
/// - `cursor`: cursor position and internal scroll (see `CursorState`)
pub struct InputBox {
    /// Draft text (Internal State)
    pub buffer: String,
    /// Whether interaction is blocked (Prop)
    pub disabled: bool,
    cursor: CursorState,
    /// Area from the last render, used to hit-test the send button
    last_area: Rect,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            cursor: CursorState::new(),
            last_area: Rect::default(),
        }
    }

    /// Required height for the current draft, clamped to viewport limits.
    /// Returns a value in `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let rows = wrapped_lines(&self.buffer, inner_width(content_width)).len() as u16;
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Screen rectangle of the send button from the last render.
    fn send_button_area(&self) -> Rect {
        let area = self.last_area;
        let width = SEND_LABEL.len() as u16;
        if area.width < width + 2 || area.height == 0 {
            return Rect::default();
        }
        Rect::new(
            area.x + area.width - 1 - width,
            area.y + area.height - 1,
            width,
            1,
        )
    }

    /// Emits the trimmed draft and clears it, unless disabled or blank.
    fn try_submit(&mut self) -> Option<InputEvent> {
        if self.disabled {
            return None;
        }
        let text = self.buffer.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.buffer.clear();
        self.cursor.reset();
        Some(InputEvent::Submit(text))
    }

    fn insert_str(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }

    /// Moves the cursor to `target`, reporting a change only if it moved.
    fn move_to(&mut self, target: usize) -> Option<InputEvent> {
        (target != self.cursor.pos).then(|| {
            self.cursor.pos = target;
            InputEvent::ContentChanged
        })
    }

    fn visible_lines(&self, content_width: u16) -> Vec<Line<'static>> {
        if self.buffer.is_empty() {
            return vec![Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))];
        }
        wrapped_lines(&self.buffer, inner_width(content_width))
            .iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|row| Line::raw(row.text(&self.buffer).to_string()))
            .collect()
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let total = wrapped_lines(&self.buffer, inner_width(area.width)).len() as u16;
        if total <= MAX_VISIBLE_LINES {
            return;
        }

        // ScrollbarState content_length is the max scroll position, not total rows
        let mut state = ScrollbarState::default()
            .content_length(total.saturating_sub(MAX_VISIBLE_LINES) as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut state,
        );
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.last_area = area;
        self.cursor.last_content_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let (title, border_style, send_style) = if self.disabled {
            (
                "Waiting for the advisor...",
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (
                "Message (Enter to send, Shift+Enter for a new line)",
                Style::default().fg(Color::Green),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .title(title)
            .title_bottom(Line::from(Span::styled(SEND_LABEL, send_style)).right_aligned());

        let text_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let input = Paragraph::new(self.visible_lines(area.width))
            .block(block)
            .style(text_style);

        frame.render_widget(input, area);
        self.render_scrollbar(frame, area);

        if !self.disabled {
            let (x, y) = self.cursor.screen_pos(&self.buffer, area);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp))
            }
            TuiEvent::Newline => self.insert_str("\n"),
            TuiEvent::Paste(text) => {
                // Normalize CRLF from Windows clipboards
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert_str(&text)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.cursor.pos > 0 => {
                self.move_to(prev_char_boundary(&self.buffer, self.cursor.pos))
            }
            TuiEvent::CursorRight => {
                self.move_to(next_char_boundary(&self.buffer, self.cursor.pos))
            }
            TuiEvent::WordLeft => self.move_to(prev_word_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::WordRight => self.move_to(next_word_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.move_to(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                self.move_to(line_end)
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::Submit => self.try_submit(),
            TuiEvent::MouseClick(col, row)
                if self.send_button_area().contains(Position::new(*col, *row)) =>
            {
                self.try_submit()
            }
            _ => None,
        }
    }
}
