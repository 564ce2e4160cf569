//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as fields:
//! - `TitleBar`: Top status bar showing endpoint and status
//! - `MessageBlock`: A single conversation bubble
//! - `LoadingIndicator`: The "advisor is analyzing" row
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: Draft editor with a send button
//! - `MessageList`: Scrollable conversation view with layout caching
//!
//! Components compose: `MessageList` renders one `MessageBlock` per message.
//! Each file holds the component's state, events, rendering, event handling
//! and tests.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message.rs       (Single message bubble)
//! ├── message_list.rs  (Scrollable message container)
//! ├── loading.rs       (Loading indicator)
//! └── input_box/       (Draft editor and send button)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub use input_box::{InputBox, InputEvent};
pub mod loading;
pub use loading::LoadingIndicator;
pub mod message;
pub use message::MessageBlock;
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
