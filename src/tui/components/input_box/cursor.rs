//! Cursor position tracking and navigation for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the internal scroll offset.
//! Every method takes `buffer: &str` explicitly; the text itself is owned by
//! `InputBox`.

use super::text_wrap::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, display_width, inner_width, offset_at_column, row_of,
    wrapped_lines,
};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible row when the draft is taller than the viewport
    pub scroll_offset: u16,
    /// Content width from the last render (used for vertical movement)
    pub last_content_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Row index and display column of the cursor.
    fn row_and_column(&self, buffer: &str, content_width: u16) -> (usize, usize) {
        let rows = wrapped_lines(buffer, inner_width(content_width));
        let row = row_of(&rows, self.pos);
        let start = rows[row].start.min(self.pos);
        (row, display_width(&buffer[start..self.pos]))
    }

    /// Move one visual row up (`-1`) or down (`1`), keeping the column where
    /// possible. Returns `false` when already on the first/last row.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16) -> bool {
        let rows = wrapped_lines(buffer, inner_width(self.last_content_width));
        let (row, column) = self.row_and_column(buffer, self.last_content_width);

        let target = if direction < 0 {
            match row.checked_sub(1) {
                Some(t) => t,
                None => return false,
            }
        } else if row + 1 < rows.len() {
            row + 1
        } else {
            return false;
        };

        self.pos = offset_at_column(buffer, &rows[target], column);
        true
    }

    /// Keep the cursor row inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let total = wrapped_lines(buffer, inner_width(content_width)).len() as u16;
        if total <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (row, _) = self.row_and_column(buffer, content_width);
        let row = row as u16;
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
        self.scroll_offset = self.scroll_offset.min(total - MAX_VISIBLE_LINES);
    }

    /// Screen (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let (row, column) = self.row_and_column(buffer, area.width);
        let visible_row = (row as u16).saturating_sub(self.scroll_offset);
        let max_col = area.width.saturating_sub(CONTENT_OFFSET + 1);
        (
            area.x + CONTENT_OFFSET + (column as u16).min(max_col),
            area.y + 1 + visible_row,
        )
    }
}
