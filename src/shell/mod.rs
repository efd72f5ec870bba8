//! Navigation shell: page frame, sidebar and the history slot that carries
//! navigation state and alerts between requests.

pub mod history;
pub mod layout;

pub use history::{Alert, AlertKind, History, NavState, Page};
