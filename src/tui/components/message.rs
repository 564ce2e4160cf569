use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message, Sender};
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat message as a bubble.
///
/// # Design
///
/// `MessageBlock` is a **transient component**: it's created fresh each frame
/// with the message it renders and holds no state of its own.
///
/// # Styling
///
/// - **User** (green): title "You", right-aligned
/// - **Advisor** (blue): title "Advisor", left-aligned
///
/// Every paragraph of the content becomes its own line, with inline markdown
/// (bold, italic, code, links) applied. The send time sits in the bottom
/// border as `HH:MM`.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height with
/// `textwrap`, using options that match Ratatui's `Paragraph` wrapping, so the
/// parent `MessageList` can lay out scroll positions without rendering.
#[derive(Clone, Copy)]
pub struct MessageBlock<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBlock<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    fn color(sender: Sender) -> Color {
        match sender {
            Sender::User => Color::Green,
            Sender::Advisor => Color::Blue,
        }
    }

    fn title(sender: Sender) -> &'static str {
        match sender {
            Sender::User => "You",
            Sender::Advisor => "Advisor",
        }
    }

    /// One styled line per paragraph of the message content.
    pub fn lines(message: &Message) -> Vec<Line<'static>> {
        let color = Self::color(message.sender);
        message
            .paragraphs()
            .into_iter()
            .map(|p| markdown::render_paragraph(p, color))
            .collect()
    }

    /// Calculate the height required for this message given a width.
    ///
    /// Each paragraph takes at least one row, so blank paragraphs between
    /// blocks of text keep their spacing.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let rows: usize = Self::lines(message)
            .iter()
            .map(|line| {
                let text = markdown::plain_text(line);
                textwrap::wrap(text.trim(), &options).len().max(1)
            })
            .sum();

        u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

impl<'a> Widget for MessageBlock<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let sender = self.message.sender;
        let style = Style::default().fg(Self::color(sender));
        let title_style = style.add_modifier(Modifier::BOLD);

        let title = Line::styled(Self::title(sender), title_style);
        let title = match sender {
            Sender::User => title.right_aligned(),
            Sender::Advisor => title.left_aligned(),
        };
        let time = Line::styled(
            self.message.time_label(),
            Style::default().fg(Color::DarkGray),
        )
        .right_aligned();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(title)
            .title_bottom(time)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Self::lines(self.message))
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn render_to_buffer(message: &Message, width: u16) -> Buffer {
        let height = MessageBlock::calculate_height(message, width);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        MessageBlock::new(message).render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    // ==========================================================================
    // calculate_height tests
    // ==========================================================================

    #[test]
    fn calculate_height_single_line_fits() {
        let msg = Message::user("Hello");
        assert_eq!(MessageBlock::calculate_height(&msg, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_counts_each_paragraph() {
        let msg = Message::advisor("First.\n\nThird.");
        assert_eq!(MessageBlock::calculate_height(&msg, 80), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        // "Hello world" = 11 chars, width 9 → content_width = 5
        let msg = Message::user("Hello world");
        assert_eq!(MessageBlock::calculate_height(&msg, 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_ignores_markdown_markers() {
        // "**Demo Mode**: ok" renders as "Demo Mode: ok" (13 cols)
        let msg = Message::advisor("**Demo Mode**: ok");
        assert_eq!(
            MessageBlock::calculate_height(&msg, 13 + HORIZONTAL_OVERHEAD),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_saturates_for_huge_messages() {
        let msg = Message::advisor("\n".repeat(65534));
        assert_eq!(MessageBlock::calculate_height(&msg, 80), u16::MAX);

        let msg = Message::advisor("\n".repeat(70000));
        assert_eq!(MessageBlock::calculate_height(&msg, 80), u16::MAX);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let msg = Message::user("Hello world");
        assert_eq!(MessageBlock::calculate_height(&msg, HORIZONTAL_OVERHEAD), 1);
    }

    // ==========================================================================
    // Rendering tests
    // ==========================================================================

    #[test]
    fn user_message_titled_you_in_green() {
        let msg = Message::user("How do I save?");
        let buf = render_to_buffer(&msg, 40);
        let top = row_text(&buf, 0);
        assert!(top.contains("You"));
        assert!(top.trim_end().ends_with("You╮"));
        assert_eq!(buf[(0, 0)].fg, Color::Green);
    }

    #[test]
    fn advisor_message_titled_advisor_in_blue() {
        let msg = Message::advisor("Start with a budget.");
        let buf = render_to_buffer(&msg, 40);
        assert!(row_text(&buf, 0).starts_with("╭Advisor"));
        assert_eq!(buf[(0, 0)].fg, Color::Blue);
        assert!(row_text(&buf, 1).contains("Start with a budget."));
    }

    #[test]
    fn time_label_in_bottom_border() {
        let msg = Message::advisor("hi");
        let buf = render_to_buffer(&msg, 40);
        let bottom = row_text(&buf, buf.area.height - 1);
        assert!(bottom.contains(&msg.time_label()));
    }

    #[test]
    fn paragraphs_render_on_separate_rows() {
        let msg = Message::advisor("Save.\nInvest.");
        let buf = render_to_buffer(&msg, 40);
        assert!(row_text(&buf, 1).contains("Save."));
        assert!(row_text(&buf, 2).contains("Invest."));
    }

    #[test]
    fn rendering_twice_is_identical() {
        let msg = Message::advisor("**Demo Mode**: Diversify.");
        assert_eq!(render_to_buffer(&msg, 50), render_to_buffer(&msg, 50));
    }
}
