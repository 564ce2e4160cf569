//! # Actions
//!
//! Everything that can happen in the chat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The service answers? That's `Action::AnswerReceived(answer)`.
//!
//! `update()` applies an action to the `App` and returns an `Effect`
//! describing the I/O the caller must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Request lifecycle:
//!
//! ```text
//! Idle ──Submit──▶ Sending (user message appended, loading = true)
//!                     │ Effect::SpawnRequest
//!                     ▼
//!                  Awaiting ──AnswerReceived──▶ advisor message ─┐
//!                     └─────RequestFailed────▶ demo message   ──┴─▶ Idle
//! ```

use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::message::Message;
use crate::core::state::{App, READY_STATUS};
use crate::service::fallback;
use crate::service::{AdvisorClient, AdvisorError};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The input box emitted a draft.
    Submit(String),
    /// The service answered with a usable `answer`.
    AnswerReceived(String),
    /// The request failed for any reason.
    RequestFailed(AdvisorError),
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Issue one request carrying this query.
    SpawnRequest(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if app.is_loading {
                debug!("Ignoring submit while a request is outstanding");
                return Effect::None;
            }
            let query = text.trim();
            if query.is_empty() {
                return Effect::None;
            }
            let query = query.to_string();

            app.conversation.push(Message::user(query.clone()));
            app.is_loading = true;
            app.status_message = String::from("Thinking...");
            info!("Submitted query ({} bytes)", query.len());
            Effect::SpawnRequest(query)
        }
        Action::AnswerReceived(answer) => {
            app.conversation.push(Message::advisor(answer));
            app.is_loading = false;
            app.status_message = String::from(READY_STATUS);
            Effect::None
        }
        Action::RequestFailed(err) => {
            warn!("Advisor request failed, using demo response: {}", err);
            let content = fallback::demo_response(&mut rand::thread_rng());
            app.conversation.push(Message::advisor(content));
            app.is_loading = false;
            app.status_message = String::from("Service unavailable, showing a demo answer");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Runs one request to completion and converts the outcome into the
/// action that settles it.
pub async fn perform_request(client: Arc<dyn AdvisorClient>, query: String) -> Action {
    info!("Request start via {} client", client.name());
    match client.ask(&query).await {
        Ok(answer) => Action::AnswerReceived(answer),
        Err(e) => Action::RequestFailed(e),
    }
}

/// The advisor's reply to a one-shot question.
#[derive(Debug)]
pub struct Answered<'a> {
    pub message: &'a Message,
    /// Why the service did not answer, when `message` is a Demo Mode reply.
    pub failure: Option<AdvisorError>,
}

/// Submit `question` and settle the request inline, without an event loop.
///
/// Returns `None` when the question was blank.
pub async fn ask_once(app: &mut App, question: String) -> Option<Answered<'_>> {
    let Effect::SpawnRequest(query) = update(app, Action::Submit(question)) else {
        return None;
    };
    let settled = perform_request(app.client.clone(), query).await;
    let failure = match &settled {
        Action::RequestFailed(err) => Some(err.clone()),
        _ => None,
    };
    update(app, settled);
    app.conversation
        .last()
        .map(|message| Answered { message, failure })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Sender;
    use crate::service::fallback::{CANNED_RESPONSES, DEMO_MODE_PREFIX};
    use crate::test_support::{ScriptedClient, test_app};

    #[test]
    fn submit_appends_user_message_and_requests() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("  How do I budget?  ".to_string()));

        assert_eq!(effect, Effect::SpawnRequest("How do I budget?".to_string()));
        assert!(app.is_loading);
        assert_eq!(app.conversation.len(), 2);
        let last = app.conversation.last().unwrap();
        assert_eq!(last.sender, Sender::User);
        assert_eq!(last.content, "How do I budget?");
    }

    #[test]
    fn submit_whitespace_is_noop() {
        let mut app = test_app();
        for text in ["", "   ", "\n\t "] {
            let effect = update(&mut app, Action::Submit(text.to_string()));
            assert_eq!(effect, Effect::None);
        }
        assert_eq!(app.conversation.len(), 1);
        assert!(!app.is_loading);
    }

    #[test]
    fn submit_while_loading_is_noop() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));
        let effect = update(&mut app, Action::Submit("second".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.conversation.len(), 2);
        assert_eq!(app.conversation.last().unwrap().content, "first");
    }

    #[test]
    fn answer_appends_advisor_message_and_clears_loading() {
        let mut app = test_app();
        update(&mut app, Action::Submit("q".to_string()));
        let effect = update(&mut app, Action::AnswerReceived("X".to_string()));

        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert_eq!(app.conversation.len(), 3);
        let last = app.conversation.last().unwrap();
        assert_eq!(last.sender, Sender::Advisor);
        assert_eq!(last.content, "X");
    }

    #[test]
    fn failure_appends_demo_message_and_clears_loading() {
        let failures = [
            AdvisorError::Network("connection refused".to_string()),
            AdvisorError::Api {
                status: 500,
                message: "boom".to_string(),
            },
            AdvisorError::Parse("expected value".to_string()),
            AdvisorError::MissingAnswer,
        ];

        for err in failures {
            let mut app = test_app();
            update(&mut app, Action::Submit("q".to_string()));
            update(&mut app, Action::RequestFailed(err));

            assert!(!app.is_loading);
            assert_eq!(app.conversation.len(), 3);
            let last = app.conversation.last().unwrap();
            assert_eq!(last.sender, Sender::Advisor);
            assert!(last.content.starts_with(DEMO_MODE_PREFIX));
            assert!(CANNED_RESPONSES.iter().any(|c| last.content.contains(c)));
        }
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn budget_question_with_network_failure() {
        let mut app = test_app();
        let greeting = app.conversation.messages()[0].content.clone();

        let effect = update(&mut app, Action::Submit("How do I budget?".to_string()));
        let Effect::SpawnRequest(query) = effect else {
            panic!("expected a request to be spawned");
        };

        let client = Arc::new(ScriptedClient::failing(AdvisorError::Network(
            "offline".to_string(),
        )));
        let settled = tokio_test::block_on(perform_request(client, query));
        update(&mut app, settled);

        let messages = app.conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, greeting);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].content, "How do I budget?");
        assert_eq!(messages[2].sender, Sender::Advisor);
        assert!(messages[2].content.starts_with(DEMO_MODE_PREFIX));
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn perform_request_maps_outcomes() {
        let ok = Arc::new(ScriptedClient::answering("Spend less than you earn."));
        assert_eq!(
            perform_request(ok, "q".to_string()).await,
            Action::AnswerReceived("Spend less than you earn.".to_string())
        );

        let failing = Arc::new(ScriptedClient::failing(AdvisorError::MissingAnswer));
        assert_eq!(
            perform_request(failing, "q".to_string()).await,
            Action::RequestFailed(AdvisorError::MissingAnswer)
        );
    }

    #[tokio::test]
    async fn perform_request_sends_the_query() {
        let client = Arc::new(ScriptedClient::answering("ok"));
        perform_request(client.clone(), "Should I buy index funds?".to_string()).await;
        assert_eq!(client.queries(), vec!["Should I buy index funds?".to_string()]);
    }

    #[tokio::test]
    async fn ask_once_returns_the_answer() {
        let mut app = test_app();
        let answered = ask_once(&mut app, "Anything?".to_string()).await.unwrap();
        assert_eq!(answered.message.sender, Sender::Advisor);
        assert_eq!(answered.message.content, "ok");
        assert!(answered.failure.is_none());
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn ask_once_reports_the_failure_behind_a_demo_reply() {
        let client = Arc::new(ScriptedClient::failing(AdvisorError::MissingAnswer));
        let mut app = App::new(client, "Hi", "http://localhost:8000/query".to_string());
        let answered = ask_once(&mut app, "Anything?".to_string()).await.unwrap();
        assert!(answered.message.content.starts_with(DEMO_MODE_PREFIX));
        assert_eq!(answered.failure, Some(AdvisorError::MissingAnswer));
    }

    #[tokio::test]
    async fn ask_once_service_answer_with_demo_marker_is_not_a_failure() {
        let client = Arc::new(ScriptedClient::answering("**Demo Mode**: a real answer"));
        let mut app = App::new(client, "Hi", "http://localhost:8000/query".to_string());
        let answered = ask_once(&mut app, "Anything?".to_string()).await.unwrap();
        assert_eq!(answered.message.content, "**Demo Mode**: a real answer");
        assert!(answered.failure.is_none());
    }

    #[tokio::test]
    async fn ask_once_blank_question_is_none() {
        let mut app = test_app();
        assert!(ask_once(&mut app, "  ".to_string()).await.is_none());
        assert_eq!(app.conversation.len(), 1);
    }
}
