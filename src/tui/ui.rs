use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{LoadingIndicator, MessageList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Draw one frame: title bar, conversation, loading row, input box.
///
/// The loading row collapses to zero height when no request is outstanding.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let loading_height = if app.is_loading {
        LoadingIndicator::HEIGHT
    } else {
        0
    };

    let layout = Layout::vertical([
        Length(1),
        Min(0),
        Length(loading_height),
        Length(input_height),
    ]);
    let [title_area, main_area, loading_area, input_area] = layout.areas(frame.area());

    MessageList::new(&mut tui.message_list, app.conversation.messages()).render(frame, main_area);

    // Title bar reads scroll state, so it's drawn after the list updated it
    let mut title_bar = TitleBar::new(
        app.endpoint.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
    );
    title_bar.render(frame, title_area);

    if app.is_loading {
        LoadingIndicator.render(frame, loading_area);
    }

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn initial_screen_shows_greeting_and_input() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);

        assert!(text.contains("AI Financial Advisor"));
        assert!(text.contains("Hello! I'm your AI Financial Advisor."));
        assert!(text.contains("[ Send ]"));
        assert!(!text.contains("analyzing your question"));
    }

    #[test]
    fn loading_shows_indicator() {
        let mut app = test_app();
        update(&mut app, Action::Submit("Should I buy gold?".to_string()));
        let mut tui = TuiState::new();
        tui.input_box.disabled = app.is_loading;
        let text = draw(&app, &mut tui);

        assert!(text.contains("Should I buy gold?"));
        assert!(text.contains("Advisor is analyzing your question..."));
        assert!(text.contains("Waiting for the advisor"));
        assert!(text.contains("Thinking..."));
    }

    #[test]
    fn answer_replaces_indicator() {
        let mut app = test_app();
        update(&mut app, Action::Submit("Should I buy gold?".to_string()));
        update(&mut app, Action::AnswerReceived("Keep it under 10%.".to_string()));
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);

        assert!(text.contains("Keep it under 10%."));
        assert!(!text.contains("analyzing your question"));
    }
}
