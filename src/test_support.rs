//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::service::{AdvisorClient, AdvisorError};

/// A client that replays a fixed outcome and records every query it saw.
pub struct ScriptedClient {
    outcome: Result<String, AdvisorError>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn answering(answer: &str) -> Self {
        Self {
            outcome: Ok(answer.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: AdvisorError) -> Self {
        Self {
            outcome: Err(err),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdvisorClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn ask(&self, query: &str) -> Result<String, AdvisorError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.outcome.clone()
    }
}

/// Creates a test App whose client always answers "ok".
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(ScriptedClient::answering("ok")),
        "Hello! I'm your AI Financial Advisor.",
        "http://localhost:8000/query".to_string(),
    )
}
