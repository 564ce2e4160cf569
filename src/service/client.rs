use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while asking the advisor service.
///
/// The controller folds every variant into the same Demo Mode fallback;
/// the variants only exist so the log can tell them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisorError {
    /// Client misconfigured (unparseable endpoint, TLS setup failure).
    Config(String),
    /// Network-level failure (DNS, connection refused, timeout).
    Network(String),
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// The body was not the JSON we expected.
    Parse(String),
    /// Success status, but no string `answer` field in the body.
    MissingAnswer,
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorError::Config(msg) => write!(f, "config error: {msg}"),
            AdvisorError::Network(msg) => write!(f, "network error: {msg}"),
            AdvisorError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            AdvisorError::Parse(msg) => write!(f, "parse error: {msg}"),
            AdvisorError::MissingAnswer => write!(f, "response had no answer field"),
        }
    }
}

impl std::error::Error for AdvisorError {}

#[async_trait]
pub trait AdvisorClient: Send + Sync {
    /// Returns the name of the client, used in logs.
    fn name(&self) -> &str;

    /// Sends one query and resolves to the advisor's answer text.
    async fn ask(&self, query: &str) -> Result<String, AdvisorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_for_api_errors() {
        let err = AdvisorError::Api {
            status: 503,
            message: "busy".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 503): busy");
    }

    #[test]
    fn display_missing_answer() {
        assert_eq!(
            AdvisorError::MissingAnswer.to_string(),
            "response had no answer field"
        );
    }
}
