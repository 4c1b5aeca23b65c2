#![deny(unsafe_code)]

//! Chat widget domain: conversation turns, view state and the reducer that drives them.
//!
//! Nothing here renders; the front-end feeds [`Action`]s in and runs the
//! [`Effect`]s that come back out.

/// Reducer inputs and the side effects it requests.
pub mod action;
pub mod controller;
/// Conversation turns and their content.
pub mod message;
pub mod state;

pub use action::{Action, Effect};
pub use controller::{PendingInference, WidgetController};
pub use message::{
    FALLBACK_FOLLOW_UP, FALLBACK_LINK_LABEL, FALLBACK_LINK_URL, FALLBACK_MESSAGE, Message,
    MessageText, RichNotice, Sender, fallback_notice,
};
pub use state::WidgetState;
