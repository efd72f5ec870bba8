//! Server-rendered portal pages. Each module owns the handlers for one
//! sidebar entry plus the pure filtering rules behind them.

pub mod dashboard;
pub mod documents;
pub mod employees;
pub mod login;
pub mod reminders;
pub mod tasks;

pub use reminders::ReminderBoard;
