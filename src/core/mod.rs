//! # Core Application Logic
//!
//! The advisor chat's business logic. It knows nothing about any specific
//! UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Message/Conversation │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │   --ask    │
//!           │  Adapter   │              │  one-shot  │
//!           │ (ratatui)  │              │   (stdout) │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message` and the append-only `Conversation`
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered configuration (file, env, CLI)

pub mod action;
pub mod config;
pub mod message;
pub mod state;
