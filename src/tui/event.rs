use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use log::debug;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    ForceQuit,
    Submit,

    // TUI-local events (handled directly in TUI)
    Newline, // Shift/Alt+Enter or Ctrl+J
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    WordLeft,
    WordRight,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom,
    MouseClick(u16, u16),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            debug!("Event poll failed: {}", e);
            return None;
        }
    }
    let event = match event::read() {
        Ok(event) => event,
        Err(e) => {
            debug!("Event read failed: {}", e);
            return None;
        }
    };
    translate(event)
}

/// Maps a raw crossterm event to a `TuiEvent`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Keyboard enhancement reports releases too; only act on press/repeat
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code, key_event.modifiers
            );
            let m = key_event.modifiers;
            match key_event.code {
                KeyCode::Char('c') if m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::ForceQuit),
                // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
                KeyCode::Char('j') if m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::Newline),
                KeyCode::Char(_) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
                KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
                KeyCode::Enter if m.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
                    Some(TuiEvent::Newline)
                }
                KeyCode::Enter => Some(TuiEvent::Submit),
                KeyCode::Backspace => Some(TuiEvent::Backspace),
                KeyCode::Delete => Some(TuiEvent::Delete),
                KeyCode::Left if m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::WordLeft),
                KeyCode::Right if m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::WordRight),
                KeyCode::Left => Some(TuiEvent::CursorLeft),
                KeyCode::Right => Some(TuiEvent::CursorRight),
                KeyCode::Up => Some(TuiEvent::CursorUp),
                KeyCode::Down => Some(TuiEvent::CursorDown),
                KeyCode::Home => Some(TuiEvent::CursorHome),
                KeyCode::End if m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::ScrollToBottom),
                KeyCode::End => Some(TuiEvent::CursorEnd),
                KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
                KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
                KeyCode::Esc => Some(TuiEvent::Quit),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
