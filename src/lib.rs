//! AI Financial Advisor chat client.
//!
//! `core` holds the conversation state machine, `service` talks to the
//! remote query endpoint, and `tui` is the terminal front end.

pub mod core;
pub mod service;
pub mod tui;

#[cfg(test)]
pub mod test_support;
