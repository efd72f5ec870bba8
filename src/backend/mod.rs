//! Client side of the external HR REST collections.
//!
//! The portal never owns data: every list it renders is read from
//! `/employees`, `/tasks`, `/documents` and `/reminders`, and every write is
//! sent there once. Access rules live in the portal only; the backend does
//! not check roles.

mod error;
pub mod http;
pub mod memory;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::{BackendKind, Config};
use crate::model::{Document, DocumentUpload, Employee, NewEmployee, NewTask, Reminder, Task};

pub use error::BackendError;
pub use http::HttpBackend;
pub use memory::MemoryBackend;

#[async_trait]
pub trait HrBackend: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<Employee>, BackendError>;
    async fn get_employee(&self, id: &str) -> Result<Employee, BackendError>;
    async fn create_employee(&self, new: &NewEmployee) -> Result<Employee, BackendError>;
    async fn update_employee(&self, id: &str, employee: &Employee)
    -> Result<Employee, BackendError>;
    async fn delete_employee(&self, id: &str) -> Result<(), BackendError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, BackendError>;
    async fn get_task(&self, id: &str) -> Result<Task, BackendError>;
    async fn create_task(&self, new: &NewTask) -> Result<Task, BackendError>;
    async fn update_task(&self, id: &str, task: &Task) -> Result<Task, BackendError>;
    async fn delete_task(&self, id: &str) -> Result<(), BackendError>;

    async fn list_documents(&self) -> Result<Vec<Document>, BackendError>;
    async fn upload_document(&self, upload: DocumentUpload) -> Result<Document, BackendError>;
    async fn delete_document(&self, id: &str) -> Result<(), BackendError>;

    async fn list_reminders(&self) -> Result<Vec<Reminder>, BackendError>;
}

/// Builds the backend selected by configuration.
pub fn connect(config: &Config) -> Result<Arc<dyn HrBackend>> {
    match config.backend {
        BackendKind::Http => {
            let base_url = config
                .api_base_url
                .as_deref()
                .context("API_BASE_URL must be set for the http backend")?;
            let backend = HttpBackend::new(base_url, config.api_timeout)
                .context("Failed to build HTTP client")?;
            Ok(Arc::new(backend))
        }
        BackendKind::Memory => Ok(Arc::new(MemoryBackend::default())),
    }
}
