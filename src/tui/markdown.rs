//! Inline markdown → ratatui `Line` renderer.
//!
//! Thin wrapper around `pulldown_cmark`. Each chat paragraph is rendered on
//! its own, so only inline styling matters here: bold, italic,
//! strikethrough, inline code and links. Block markers that can start a
//! single line (headings, list bullets) are kept as visible prefixes.
//!
//! One paragraph in, exactly one `Line` out.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Render one paragraph (no `\n` inside) into a single styled line.
pub fn render_paragraph(paragraph: &str, base_fg: Color) -> Line<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(paragraph, opts) {
        w.handle(event);
    }
    w.line
}

/// Concatenated span text of a line (what ends up on screen).
pub fn plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    line: Line<'static>,
    base_fg: Color,
    /// Inline style stack. Styles compose via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            line: Line::default(),
            base_fg,
            styles: vec![],
            list_indices: vec![],
            link_url: None,
        }
    }

    /// Current effective style: top of stack, or base foreground color.
    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_span(&mut self, span: Span<'static>) {
        if !span.content.is_empty() {
            self.line.push_span(span);
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::Html(h) | Event::InlineHtml(h) => self.text(h),
            Event::SoftBreak | Event::HardBreak => self.push_span(Span::raw(" ")),
            Event::Rule => self.push_span(Span::styled(
                "─".repeat(20),
                Style::default().fg(Color::DarkGray),
            )),
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                let hs = Style::default()
                    .fg(self.base_fg)
                    .add_modifier(Modifier::BOLD);
                self.push_span(Span::styled(format!("{} ", "#".repeat(level as usize)), hs));
                self.push_style(hs);
            }
            Tag::List(start) => self.list_indices.push(start),
            Tag::Item => {
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => "- ".to_string(),
                        Some(n) => {
                            let s = format!("{}. ", n);
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                }
            }
            Tag::BlockQuote(_) => {
                self.push_span(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) | TagEnd::BlockQuote(_) => self.pop_style(),
            TagEnd::List(_) => {
                self.list_indices.pop();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(
                        url,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui renders \t as zero-width; indented code blocks end in \n
        let text = cow.replace('\t', "    ").replace('\n', " ");
        let style = self.style();
        self.push_span(Span::styled(text, style));
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }
}
