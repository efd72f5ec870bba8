use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::{BackendError, HrBackend};
use crate::model::{Document, DocumentUpload, Employee, NewEmployee, NewTask, Reminder, Task};

/// reqwest client for the HR REST API. One request per call: no retry,
/// no de-duplication.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, BackendError> {
        let resp = Self::dispatch(req).await?;
        resp.json::<T>().await.map_err(|e| {
            error!(error = %e, "API response could not be decoded");
            BackendError::Decode(e.to_string())
        })
    }

    async fn execute(&self, req: RequestBuilder) -> Result<(), BackendError> {
        Self::dispatch(req).await.map(|_| ())
    }

    /// Sends the request and turns non-2xx answers into errors, logging
    /// every failure with its status and body.
    async fn dispatch(req: RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let resp = req.send().await.map_err(|e| {
            error!(error = %e, "Network Error");
            BackendError::Network(e.to_string())
        })?;

        let status = resp.status();
        debug!(status = status.as_u16(), url = %resp.url(), "API response");

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        error!(status = status.as_u16(), body = %body, "API Error");
        Err(BackendError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl HrBackend for HttpBackend {
    async fn list_employees(&self) -> Result<Vec<Employee>, BackendError> {
        self.fetch(self.client.get(self.url("employees"))).await
    }

    async fn get_employee(&self, id: &str) -> Result<Employee, BackendError> {
        self.fetch(self.client.get(self.url(&format!("employees/{id}"))))
            .await
    }

    async fn create_employee(&self, new: &NewEmployee) -> Result<Employee, BackendError> {
        self.fetch(self.client.post(self.url("employees")).json(new))
            .await
    }

    async fn update_employee(
        &self,
        id: &str,
        employee: &Employee,
    ) -> Result<Employee, BackendError> {
        self.fetch(
            self.client
                .put(self.url(&format!("employees/{id}")))
                .json(employee),
        )
        .await
    }

    async fn delete_employee(&self, id: &str) -> Result<(), BackendError> {
        self.execute(self.client.delete(self.url(&format!("employees/{id}"))))
            .await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        self.fetch(self.client.get(self.url("tasks"))).await
    }

    async fn get_task(&self, id: &str) -> Result<Task, BackendError> {
        self.fetch(self.client.get(self.url(&format!("tasks/{id}"))))
            .await
    }

    async fn create_task(&self, new: &NewTask) -> Result<Task, BackendError> {
        self.fetch(self.client.post(self.url("tasks")).json(new)).await
    }

    async fn update_task(&self, id: &str, task: &Task) -> Result<Task, BackendError> {
        self.fetch(self.client.put(self.url(&format!("tasks/{id}"))).json(task))
            .await
    }

    async fn delete_task(&self, id: &str) -> Result<(), BackendError> {
        self.execute(self.client.delete(self.url(&format!("tasks/{id}"))))
            .await
    }

    async fn list_documents(&self) -> Result<Vec<Document>, BackendError> {
        self.fetch(self.client.get(self.url("documents"))).await
    }

    async fn upload_document(&self, upload: DocumentUpload) -> Result<Document, BackendError> {
        let file = Part::bytes(upload.bytes).file_name(upload.file_name);
        let form = Form::new()
            .text("title", upload.title)
            .text("description", upload.description)
            .text("task_id", upload.task_id)
            .text("task_name", upload.task_name)
            .text("employee_id", upload.employee_id)
            .text("employee_name", upload.employee_name)
            .part("file", file);

        self.fetch(self.client.post(self.url("documents")).multipart(form))
            .await
    }

    async fn delete_document(&self, id: &str) -> Result<(), BackendError> {
        self.execute(self.client.delete(self.url(&format!("documents/{id}"))))
            .await
    }

    async fn list_reminders(&self) -> Result<Vec<Reminder>, BackendError> {
        self.fetch(self.client.get(self.url("reminders"))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_double_slashes() {
        let backend = HttpBackend::new("http://localhost:7071/api/", Duration::from_secs(5))
            .unwrap();
        assert_eq!(backend.url("tasks"), "http://localhost:7071/api/tasks");
        assert_eq!(backend.url("/tasks/t1"), "http://localhost:7071/api/tasks/t1");
    }

    #[actix_web::test]
    async fn unreachable_backend_is_a_network_error() {
        // Port 9 (discard) on loopback is not expected to accept HTTP.
        let backend =
            HttpBackend::new("http://127.0.0.1:9/api", Duration::from_millis(500)).unwrap();
        let err = backend.list_tasks().await.unwrap_err();
        assert!(matches!(err, BackendError::Network(_)), "got {err:?}");
    }
}
