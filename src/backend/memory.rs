use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use super::{BackendError, HrBackend};
use crate::model::{Document, DocumentUpload, Employee, NewEmployee, NewTask, Reminder, Task};

/// In-process stand-in for the REST backend. Collections keep insertion
/// order, like the blob-backed JSON lists behind the real API.
#[derive(Default)]
pub struct MemoryBackend {
    employees: Mutex<Vec<Employee>>,
    tasks: Mutex<Vec<Task>>,
    documents: Mutex<Vec<Document>>,
    reminders: Mutex<Vec<Reminder>>,
    offline: AtomicBool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn remove_by_id<T>(
    items: &mut Vec<T>,
    id: &str,
    what: &str,
    key: impl Fn(&T) -> &str,
) -> Result<(), BackendError> {
    let idx = items
        .iter()
        .position(|item| key(item) == id)
        .ok_or_else(|| BackendError::not_found(what))?;
    items.remove(idx);
    Ok(())
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(self, employees: Vec<Employee>) -> Self {
        *lock(&self.employees) = employees;
        self
    }

    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        *lock(&self.tasks) = tasks;
        self
    }

    pub fn with_documents(self, documents: Vec<Document>) -> Self {
        *lock(&self.documents) = documents;
        self
    }

    pub fn with_reminders(self, reminders: Vec<Reminder>) -> Self {
        *lock(&self.reminders) = reminders;
        self
    }

    /// While offline every call fails with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn tasks(&self) -> Vec<Task> {
        lock(&self.tasks).clone()
    }

    pub fn employees(&self) -> Vec<Employee> {
        lock(&self.employees).clone()
    }

    pub fn documents(&self) -> Vec<Document> {
        lock(&self.documents).clone()
    }

    fn reachable(&self) -> Result<(), BackendError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(BackendError::Network("backend unreachable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl HrBackend for MemoryBackend {
    async fn list_employees(&self) -> Result<Vec<Employee>, BackendError> {
        self.reachable()?;
        Ok(self.employees())
    }

    async fn get_employee(&self, id: &str) -> Result<Employee, BackendError> {
        self.reachable()?;
        lock(&self.employees)
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("Employee"))
    }

    async fn create_employee(&self, new: &NewEmployee) -> Result<Employee, BackendError> {
        self.reachable()?;
        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            name: new.name.clone(),
            email: new.email.clone(),
            position: new.position.clone(),
            department: new.department.clone(),
        };
        lock(&self.employees).push(employee.clone());
        Ok(employee)
    }

    async fn update_employee(
        &self,
        id: &str,
        employee: &Employee,
    ) -> Result<Employee, BackendError> {
        self.reachable()?;
        let mut employees = lock(&self.employees);
        let slot = employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| BackendError::not_found("Employee"))?;
        *slot = Employee {
            id: id.to_string(),
            ..employee.clone()
        };
        Ok(slot.clone())
    }

    async fn delete_employee(&self, id: &str) -> Result<(), BackendError> {
        self.reachable()?;
        remove_by_id(&mut lock(&self.employees), id, "Employee", |e| e.id.as_str())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        self.reachable()?;
        Ok(self.tasks())
    }

    async fn get_task(&self, id: &str) -> Result<Task, BackendError> {
        self.reachable()?;
        lock(&self.tasks)
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("Task"))
    }

    async fn create_task(&self, new: &NewTask) -> Result<Task, BackendError> {
        self.reachable()?;
        if new.title.trim().is_empty() || new.employee_id.trim().is_empty() {
            return Err(BackendError::Status {
                status: 400,
                body: "title and employee_id are required".into(),
            });
        }
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: new.title.clone(),
            description: Some(new.description.clone()).filter(|d| !d.is_empty()),
            employee_id: new.employee_id.clone(),
            due_date: Some(new.due_date.clone()).filter(|d| !d.is_empty()),
            status: new.status,
        };
        lock(&self.tasks).push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &str, task: &Task) -> Result<Task, BackendError> {
        self.reachable()?;
        let mut tasks = lock(&self.tasks);
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BackendError::not_found("Task"))?;
        *slot = Task {
            id: id.to_string(),
            ..task.clone()
        };
        Ok(slot.clone())
    }

    async fn delete_task(&self, id: &str) -> Result<(), BackendError> {
        self.reachable()?;
        remove_by_id(&mut lock(&self.tasks), id, "Task", |t| t.id.as_str())
    }

    async fn list_documents(&self) -> Result<Vec<Document>, BackendError> {
        self.reachable()?;
        Ok(self.documents())
    }

    async fn upload_document(&self, upload: DocumentUpload) -> Result<Document, BackendError> {
        self.reachable()?;
        if upload.title.trim().is_empty() || upload.employee_id.trim().is_empty() {
            return Err(BackendError::Status {
                status: 400,
                body: "title and employee_id are required".into(),
            });
        }
        let id = Uuid::new_v4().to_string();
        let document = Document {
            file: Some(format!("memory://{}/{}/{}", upload.employee_id, id, upload.file_name)),
            id,
            title: upload.title,
            description: Some(upload.description).filter(|d| !d.is_empty()),
            task_id: Some(upload.task_id),
            task_name: Some(upload.task_name),
            employee_id: upload.employee_id,
            employee_name: Some(upload.employee_name),
        };
        lock(&self.documents).push(document.clone());
        Ok(document)
    }

    async fn delete_document(&self, id: &str) -> Result<(), BackendError> {
        self.reachable()?;
        remove_by_id(&mut lock(&self.documents), id, "Document", |d| d.id.as_str())
    }

    async fn list_reminders(&self) -> Result<Vec<Reminder>, BackendError> {
        self.reachable()?;
        Ok(lock(&self.reminders).clone())
    }
}
