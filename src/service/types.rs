use serde::{Deserialize, Serialize};

/// Request body: `{"query": "<user text>"}`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

/// Response body: `{"answer": "<string>"}`.
///
/// `answer` is optional so that a body without it still parses; the client
/// turns a missing answer into an error instead of rendering nothing.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QueryResponse {
    #[serde(default)]
    pub answer: Option<String>,
}
