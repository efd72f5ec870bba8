pub mod document;
pub mod employee;
pub mod reminder;
pub mod role;
pub mod task;

pub use document::{Document, DocumentUpload};
pub use employee::{Employee, NewEmployee};
pub use reminder::Reminder;
pub use role::Role;
pub use task::{NewTask, Task, TaskStatus};
