//! # Application State
//!
//! Core business state for the advisor chat. Presentation state (scroll
//! offsets, the draft buffer) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── client: Arc<dyn AdvisorClient>  // remote query service
//! ├── conversation: Conversation      // append-only message sequence
//! ├── is_loading: bool                // one request outstanding
//! ├── status_message: String          // title bar text
//! └── endpoint: String                // shown in the title bar
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::message::Conversation;
use crate::service::AdvisorClient;

pub const READY_STATUS: &str = "Ask me anything about your finances";

pub struct App {
    pub client: Arc<dyn AdvisorClient>,
    pub conversation: Conversation,
    pub is_loading: bool,
    pub status_message: String,
    pub endpoint: String,
}

impl App {
    pub fn new(client: Arc<dyn AdvisorClient>, greeting: &str, endpoint: String) -> Self {
        Self {
            client,
            conversation: Conversation::new(greeting),
            is_loading: false,
            status_message: String::from(READY_STATUS),
            endpoint,
        }
    }

    pub fn from_config(client: Arc<dyn AdvisorClient>, config: &ResolvedConfig) -> Self {
        Self::new(client, &config.greeting, config.endpoint.clone())
    }
}
