//! Client-trusted sign-in and role gating.
//!
//! The role is a string derived from the identity's job title and kept in
//! the local session file. Nothing here is a security boundary: the
//! backend serves every collection to anyone who asks.

pub mod auth;
pub mod gate;
pub mod middleware;
pub mod session;

pub use auth::CurrentUser;
pub use session::{Session, SessionStore};
