//! Pure text layout helpers and dimensional constants for the InputBox.
//!
//! The draft is laid out once into [`WrappedLine`] byte ranges; cursor
//! math, height and the visible window all read from that layout so they
//! can never disagree.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border + left padding)
pub(super) const CONTENT_OFFSET: u16 = 2;

/// Build textwrap options configured for the input box inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Calculate the inner content width after subtracting border/padding overhead.
/// Returns 0 if the area is too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// One visual row of the draft, as byte offsets into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct WrappedLine {
    /// First byte of the row.
    pub start: usize,
    /// End of the row's text. For the last row of a logical line this is the
    /// logical line's end (trailing spaces included).
    pub end: usize,
    /// Whether the next row continues the same logical line.
    pub continues: bool,
}

impl WrappedLine {
    pub fn text<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.start..self.end]
    }
}

/// Lay the buffer out into visual rows. Always returns at least one row,
/// and an empty logical line (including one after a trailing `\n`) gets a
/// row of its own.
pub(super) fn wrapped_lines(buffer: &str, width: u16) -> Vec<WrappedLine> {
    let mut rows = Vec::new();
    let mut logical_start = 0;

    for logical in buffer.split('\n') {
        let logical_end = logical_start + logical.len();

        if width == 0 || logical.is_empty() {
            rows.push(WrappedLine {
                start: logical_start,
                end: logical_end,
                continues: false,
            });
        } else {
            let segments = textwrap::wrap(logical, wrap_options(width));
            let mut search_from = 0;
            let count = segments.len();
            for (i, segment) in segments.iter().enumerate() {
                let local = logical[search_from..]
                    .find(segment.as_ref())
                    .map(|at| search_from + at)
                    .unwrap_or(search_from);
                let seg_end = local + segment.len();
                let last = i + 1 == count;
                rows.push(WrappedLine {
                    start: logical_start + local,
                    end: if last { logical_end } else { logical_start + seg_end },
                    continues: !last,
                });
                search_from = seg_end;
            }
            if count == 0 {
                rows.push(WrappedLine {
                    start: logical_start,
                    end: logical_end,
                    continues: false,
                });
            }
        }

        logical_start = logical_end + 1; // skip the '\n'
    }

    rows
}

/// Index of the row holding byte offset `pos`.
///
/// A position exactly at a wrap point belongs to the following row.
pub(super) fn row_of(rows: &[WrappedLine], pos: usize) -> usize {
    rows.partition_point(|row| row.start <= pos).saturating_sub(1)
}

/// Display width of `text` in terminal cells.
pub(super) fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Byte offset within `row` closest to display column `column`.
pub(super) fn offset_at_column(buffer: &str, row: &WrappedLine, column: usize) -> usize {
    let mut width = 0;
    for (i, c) in row.text(buffer).char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > column {
            return row.start + i;
        }
        width += w;
    }
    if row.continues && row.end > row.start {
        // Stay on this row: the row's end is the next row's start
        prev_char_boundary(buffer, row.end)
    } else {
        row.end
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word before `pos` (readline `backward-word`).
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut seen_word = false;
    for (i, c) in text[..pos].char_indices().rev() {
        if is_word_char(c) {
            seen_word = true;
        } else if seen_word {
            return i + c.len_utf8();
        }
    }
    0
}

/// End of the word after `pos` (readline `forward-word`).
pub(super) fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut seen_word = false;
    for (i, c) in text[pos..].char_indices() {
        if is_word_char(c) {
            seen_word = true;
        } else if seen_word {
            return pos + i;
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_texts<'a>(buffer: &'a str, width: u16) -> Vec<&'a str> {
        wrapped_lines(buffer, width)
            .iter()
            .map(|r| r.text(buffer))
            .collect()
    }

    // -- wrapped_lines ---------------------------------------------------

    #[test]
    fn empty_buffer_has_one_row() {
        assert_eq!(wrapped_lines("", 20).len(), 1);
    }

    #[test]
    fn zero_width_keeps_logical_lines() {
        assert_eq!(row_texts("ab\ncd", 0), vec!["ab", "cd"]);
    }

    #[test]
    fn explicit_newlines_make_rows() {
        assert_eq!(row_texts("a\nb\nc", 20), vec!["a", "b", "c"]);
    }

    #[test]
    fn trailing_newline_adds_empty_row() {
        assert_eq!(row_texts("save\n", 20), vec!["save", ""]);
    }

    #[test]
    fn long_words_are_broken() {
        assert_eq!(row_texts("aaaaaaaaaa", 5), vec!["aaaaa", "aaaaa"]);
    }

    #[test]
    fn words_wrap_at_spaces() {
        let rows = wrapped_lines("save more money", 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text("save more money"), "save more");
        assert!(rows[0].continues);
        assert_eq!(rows[1].text("save more money"), "money");
        assert!(!rows[1].continues);
    }

    #[test]
    fn row_offsets_are_absolute() {
        let buffer = "hi\nsave more money";
        let rows = wrapped_lines(buffer, 10);
        assert_eq!(rows[1].start, 3);
        assert_eq!(rows[2].start, buffer.find("money").unwrap());
    }

    // -- row_of ----------------------------------------------------------

    #[test]
    fn row_of_positions() {
        let buffer = "save more money";
        let rows = wrapped_lines(buffer, 10);
        assert_eq!(row_of(&rows, 0), 0);
        assert_eq!(row_of(&rows, 9), 0); // end of "save more"
        assert_eq!(row_of(&rows, buffer.len()), 1);
    }

    #[test]
    fn row_of_after_trailing_newline() {
        let buffer = "ab\n";
        let rows = wrapped_lines(buffer, 10);
        assert_eq!(row_of(&rows, 3), 1);
    }

    // -- offset_at_column ------------------------------------------------

    #[test]
    fn offset_at_column_clamps_to_row_end() {
        let buffer = "ab\nlonger";
        let rows = wrapped_lines(buffer, 20);
        assert_eq!(offset_at_column(buffer, &rows[0], 5), 2);
        assert_eq!(offset_at_column(buffer, &rows[1], 3), 6);
    }

    #[test]
    fn offset_at_column_stays_on_broken_row() {
        let buffer = "aaaaaaaaaa";
        let rows = wrapped_lines(buffer, 5);
        assert_eq!(offset_at_column(buffer, &rows[0], 9), 4);
    }

    #[test]
    fn display_width_counts_wide_chars() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("₹"), 1);
        assert_eq!(display_width("日本"), 4);
    }

    // -- char boundaries -------------------------------------------------

    #[test]
    fn char_boundaries_multibyte() {
        let s = "₹500";
        assert_eq!(next_char_boundary(s, 0), 3);
        assert_eq!(prev_char_boundary(s, 3), 0);
        assert_eq!(next_char_boundary(s, s.len()), s.len());
    }

    // -- word boundaries -------------------------------------------------

    #[test]
    fn prev_word_skips_spaces_then_word() {
        assert_eq!(prev_word_boundary("index funds", 11), 6);
        assert_eq!(prev_word_boundary("index funds", 6), 0);
        assert_eq!(prev_word_boundary("index   funds", 8), 0);
        assert_eq!(prev_word_boundary("", 0), 0);
    }

    #[test]
    fn prev_word_stops_at_punctuation() {
        assert_eq!(prev_word_boundary("tax.rate", 8), 4);
    }

    #[test]
    fn next_word_skips_spaces_then_word() {
        assert_eq!(next_word_boundary("index funds", 0), 5);
        assert_eq!(next_word_boundary("index funds", 5), 11);
        assert_eq!(next_word_boundary("index", 5), 5);
    }

    #[test]
    fn underscore_is_word_char() {
        assert_eq!(next_word_boundary("tax_saver plan", 0), 9);
    }
}
