//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop redraws only when something changed:
//!
//! - **Waiting** (request outstanding): polls every ~100ms so the answer
//!   appears promptly once the background task reports back.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, perform_request, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::service::AdvisorClient;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const WAITING_POLL: Duration = Duration::from_millis(100);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }

    /// Route one terminal event, returning the action it produces for the core.
    ///
    /// Up/Down go to the input box first; at its top or bottom row they
    /// scroll the conversation instead.
    fn dispatch(&mut self, event: TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
            TuiEvent::Resize => None,
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown
            | TuiEvent::ScrollToBottom => {
                self.message_list.handle_event(&event);
                None
            }
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                if self.input_box.handle_event(&event).is_none() {
                    let scroll = if event == TuiEvent::CursorUp {
                        TuiEvent::ScrollUp
                    } else {
                        TuiEvent::ScrollDown
                    };
                    self.message_list.handle_event(&scroll);
                }
                None
            }
            _ => match self.input_box.handle_event(&event)? {
                InputEvent::Submit(text) => Some(Action::Submit(text)),
                InputEvent::ContentChanged => None,
            },
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter.
        // Terminals without it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Run the chat interface until the user quits.
///
/// Must be called from within a tokio runtime: requests run as spawned
/// tasks that report back over a channel.
pub fn run(config: &ResolvedConfig, client: Arc<dyn AdvisorClient>) -> std::io::Result<()> {
    let mut app = App::from_config(client, config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        // Sync InputBox props with App state
        tui.input_box.disabled = app.is_loading;

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading { WAITING_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = tui.dispatch(event) else {
                continue;
            };
            match update(&mut app, action) {
                Effect::Quit => break 'event_loop,
                Effect::SpawnRequest(query) => {
                    spawn_request(&app, query, tx.clone());
                    tui.input_box.disabled = true;
                    tui.message_list.scroll_to_bottom();
                }
                Effect::None => {}
            }
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                break 'event_loop;
            }
        }
    }

    info!("Exiting chat ({} messages)", app.conversation.len());
    ratatui::restore();
    Ok(())
}

fn spawn_request(app: &App, query: String, tx: mpsc::Sender<Action>) {
    info!("Spawning advisor request");
    let client = app.client.clone();
    tokio::spawn(async move {
        let action = perform_request(client, query).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver advisor response: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(tui: &mut TuiState, text: &str) {
        tui.dispatch(TuiEvent::Paste(text.to_string()));
    }

    #[test]
    fn enter_produces_submit_action() {
        let mut tui = TuiState::new();
        typed(&mut tui, "What is an SIP?");
        assert_eq!(
            tui.dispatch(TuiEvent::Submit),
            Some(Action::Submit("What is an SIP?".to_string()))
        );
    }

    #[test]
    fn quit_events_produce_quit_action() {
        let mut tui = TuiState::new();
        assert_eq!(tui.dispatch(TuiEvent::Quit), Some(Action::Quit));
        assert_eq!(tui.dispatch(TuiEvent::ForceQuit), Some(Action::Quit));
    }

    #[test]
    fn disabled_input_swallows_submit() {
        let mut tui = TuiState::new();
        typed(&mut tui, "second question");
        tui.input_box.disabled = true;
        assert_eq!(tui.dispatch(TuiEvent::Submit), None);
        assert_eq!(tui.input_box.buffer, "second question");
    }

    #[test]
    fn up_on_single_line_draft_scrolls_conversation() {
        let mut tui = TuiState::new();
        assert!(tui.message_list.stick_to_bottom);
        tui.dispatch(TuiEvent::CursorUp);
        assert!(!tui.message_list.stick_to_bottom);
    }

    #[test]
    fn up_within_multiline_draft_moves_cursor() {
        let mut tui = TuiState::new();
        typed(&mut tui, "line one\nline two");
        tui.dispatch(TuiEvent::CursorUp);
        assert!(tui.message_list.stick_to_bottom);
    }
}
