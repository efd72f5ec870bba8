use std::path::Path;
use std::str::FromStr;

use actix_web::{Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, warn};

use crate::auth::{CurrentUser, Session};
use crate::backend::HrBackend;
use crate::model::{DocumentUpload, Employee, NewTask, Task, TaskStatus};
use crate::shell::{Alert, History, NavState, Page, layout};
use crate::utils::html::{escape, selected};

/// Management sees every task, employees only their own.
pub fn visible_tasks<'a>(session: &Session, tasks: &'a [Task]) -> Vec<&'a Task> {
    if session.is_management() {
        tasks.iter().collect()
    } else {
        tasks
            .iter()
            .filter(|t| t.is_assigned_to(session.id()))
            .collect()
    }
}

/// Only the assignee moves a task between statuses.
pub fn can_change_status(session: &Session, task: &Task) -> bool {
    task.is_assigned_to(session.id())
}

pub fn assignee_name<'a>(employees: &'a [Employee], employee_id: &str) -> &'a str {
    employees
        .iter()
        .find(|e| e.id == employee_id)
        .map(|e| e.name.as_str())
        .unwrap_or("Unknown Employee")
}

#[derive(Debug, Default, Deserialize)]
pub struct NewTaskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub due_date: String,
}

impl NewTaskForm {
    pub fn validate(self) -> Result<NewTask, &'static str> {
        if self.employee_id.trim().is_empty() {
            return Err("Please assign to an employee");
        }
        if self.title.trim().is_empty() {
            return Err("Please enter a task title");
        }
        let due_date = self.due_date.trim().to_string();
        if !due_date.is_empty() && NaiveDate::parse_from_str(&due_date, "%Y-%m-%d").is_err() {
            return Err("Due date must be YYYY-MM-DD");
        }

        Ok(NewTask {
            title: self.title.trim().to_string(),
            description: self.description,
            employee_id: self.employee_id,
            due_date,
            status: TaskStatus::Pending,
        })
    }
}

fn status_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "status-completed",
        TaskStatus::InProgress => "status-in-progress",
        TaskStatus::Pending => "status-pending",
    }
}

fn create_form(employees: &[Employee], assign_to: Option<&str>) -> String {
    let options: String = employees
        .iter()
        .map(|e| {
            format!(
                "<option value=\"{id}\"{sel}>{name} — {position}</option>",
                id = escape(&e.id),
                sel = selected(assign_to == Some(e.id.as_str())),
                name = escape(&e.name),
                position = escape(&e.position),
            )
        })
        .collect();

    format!(
        "<details class=\"card\"{open}><summary>New Task</summary>\
           <form method=\"post\" action=\"/tasks\">\
             <input name=\"title\" placeholder=\"Task title\" required>\
             <textarea name=\"description\" placeholder=\"Description\"></textarea>\
             <select name=\"employee_id\"><option value=\"\">Assign to...</option>{options}</select>\
             <input type=\"date\" name=\"due_date\">\
             <button type=\"submit\">Assign Task</button>\
           </form>\
         </details>",
        open = if assign_to.is_some() { " open" } else { "" },
    )
}

fn task_card(session: &Session, task: &Task, employees: &[Employee]) -> String {
    let id = escape(&task.id);
    let is_assignee = can_change_status(session, task);
    let disabled = if is_assignee { "" } else { " disabled" };

    let statuses: String = TaskStatus::ALL
        .iter()
        .map(|s| {
            format!(
                "<option value=\"{s}\"{sel}>{s}</option>",
                sel = selected(*s == task.status)
            )
        })
        .collect();

    let assignee = if session.is_management() {
        format!(
            "<span class=\"assignee\">{}</span>",
            escape(assignee_name(employees, &task.employee_id))
        )
    } else {
        String::new()
    };

    let delete = if session.role.can_delete_tasks() {
        format!(
            "<form method=\"post\" action=\"/tasks/{id}/delete\" \
             onsubmit=\"return confirm('Delete this task?')\">\
             <button class=\"icon-btn danger\" title=\"Delete Task\">Delete</button></form>"
        )
    } else {
        String::new()
    };

    format!(
        "<div class=\"task-card card\">\
           <h3 class=\"task-title\">{title}</h3>\
           <details><summary>Details</summary><p>{description}</p></details>\
           <span class=\"due\">{due}</span>{assignee}\
           <form method=\"post\" action=\"/tasks/{id}/status\">\
             <select name=\"status\" class=\"status-select {class}\"{disabled}>{statuses}</select>\
             <button{disabled}>Update</button>\
           </form>\
           <form method=\"post\" action=\"/tasks/{id}/documents\">\
             <input type=\"hidden\" name=\"title\" value=\"{title}\">\
             <button>Files</button>\
           </form>\
           <details><summary>Upload Document</summary>\
             <form method=\"post\" action=\"/tasks/{id}/upload\">\
               <input name=\"title\" placeholder=\"Title (defaults to file name)\">\
               <textarea name=\"description\" placeholder=\"Description\"></textarea>\
               <input name=\"file_path\" placeholder=\"Path to file\" required>\
               <button type=\"submit\">Upload File</button>\
             </form>\
           </details>\
           {delete}\
         </div>",
        title = escape(&task.title),
        description = escape(
            task.description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("No description provided.")
        ),
        due = escape(task.due_date.as_deref().unwrap_or("No Date")),
        class = status_class(task.status),
    )
}

fn render(
    session: &Session,
    tasks: &[Task],
    employees: &[Employee],
    assign_to: Option<&str>,
) -> String {
    let (heading, subtitle) = if session.is_management() {
        ("Team Assignments", "Track and manage team deliverables.")
    } else {
        ("My Tasks", "Prioritize your pending work.")
    };
    let mut out = format!(
        "<div class=\"page-header\"><h1>{heading}</h1>\
         <p class=\"text-secondary\">{subtitle}</p></div>"
    );

    if session.role.can_create_tasks() {
        out.push_str(&create_form(employees, assign_to));
    }

    let visible = visible_tasks(session, tasks);
    if visible.is_empty() {
        out.push_str("<p class=\"empty\">No tasks found.</p>");
    }
    for task in visible {
        out.push_str(&task_card(session, task, employees));
    }

    out
}

pub async fn tasks_page(
    user: CurrentUser,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    let assign_to = match history.enter(Page::Tasks) {
        Some(NavState::AssignTask { employee_id }) => Some(employee_id),
        _ => None,
    };

    let (tasks, employees) =
        match futures::try_join!(backend.list_tasks(), backend.list_employees()) {
            Ok(both) => both,
            Err(e) => {
                error!(error = %e, "Failed to load tasks");
                (Vec::new(), Vec::new())
            }
        };

    let content = render(&user, &tasks, &employees, assign_to.as_deref());
    layout::page(
        &user,
        Page::Tasks,
        layout::tasks_label(user.role),
        history.take_alert(),
        &content,
    )
}

pub async fn create_task(
    user: CurrentUser,
    form: web::Form<NewTaskForm>,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    if !user.role.can_create_tasks() {
        warn!(user = %user.name(), "Task creation attempted without management role");
        return layout::redirect("/tasks");
    }

    let new_task = match form.into_inner().validate() {
        Ok(task) => task,
        Err(msg) => {
            history.flash(Alert::validation(msg));
            return layout::redirect("/tasks");
        }
    };

    match backend.create_task(&new_task).await {
        Ok(_) => history.flash(Alert::success("Task assigned successfully!")),
        Err(e) => {
            error!(error = %e, "Failed to create task");
            history.flash(Alert::error("Failed to create task"));
        }
    }
    layout::redirect("/tasks")
}

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
}

pub async fn update_status(
    user: CurrentUser,
    path: web::Path<String>,
    form: web::Form<StatusForm>,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    let task_id = path.into_inner();

    let Ok(status) = TaskStatus::from_str(&form.status) else {
        history.flash(Alert::validation("Unknown task status"));
        return layout::redirect("/tasks");
    };

    let task = match backend.get_task(&task_id).await {
        Ok(task) => task,
        Err(e) => {
            error!(error = %e, task_id = %task_id, "Failed to load task for status change");
            history.flash(Alert::error("Failed to update status"));
            return layout::redirect("/tasks");
        }
    };

    if !can_change_status(&user, &task) {
        warn!(task_id = %task_id, user = %user.id(), "Status change by non-assignee ignored");
        return layout::redirect("/tasks");
    }

    let updated = Task { status, ..task };
    if let Err(e) = backend.update_task(&task_id, &updated).await {
        error!(error = %e, task_id = %task_id, "Failed to update status");
        history.flash(Alert::error("Failed to update status"));
    }
    layout::redirect("/tasks")
}

pub async fn delete_task(
    user: CurrentUser,
    path: web::Path<String>,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    let task_id = path.into_inner();

    if !user.role.can_delete_tasks() {
        warn!(task_id = %task_id, user = %user.id(), "Task deletion by non-admin ignored");
        return layout::redirect("/tasks");
    }

    if let Err(e) = backend.delete_task(&task_id).await {
        error!(error = %e, task_id = %task_id, "Failed to delete task");
        history.flash(Alert::error("Failed to delete"));
    }
    layout::redirect("/tasks")
}

#[derive(Deserialize)]
pub struct OpenDocumentsForm {
    #[serde(default)]
    pub title: String,
}

/// Opens the documents page scoped to this task.
pub async fn open_documents(
    _user: CurrentUser,
    path: web::Path<String>,
    form: web::Form<OpenDocumentsForm>,
    history: web::Data<History>,
) -> impl Responder {
    history.navigate(NavState::TaskDocuments {
        task_id: path.into_inner(),
        task_title: form.into_inner().title,
    });
    layout::redirect("/documents")
}

#[derive(Deserialize)]
pub struct UploadForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file_path: String,
}

pub async fn upload_document(
    user: CurrentUser,
    path: web::Path<String>,
    form: web::Form<UploadForm>,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    let task_id = path.into_inner();
    let form = form.into_inner();

    let file_path = form.file_path.trim();
    if file_path.is_empty() {
        history.flash(Alert::validation("Please choose a file to upload"));
        return layout::redirect("/tasks");
    }

    let result = async {
        let task = backend.get_task(&task_id).await?;
        let bytes = tokio::fs::read(file_path).await?;
        let file_name = Path::new(file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let upload = DocumentUpload {
            title: if form.title.trim().is_empty() {
                file_name.clone()
            } else {
                form.title.trim().to_string()
            },
            description: form.description.clone(),
            task_id: task.id,
            task_name: task.title,
            employee_id: user.id().to_string(),
            employee_name: user.name().to_string(),
            file_name,
            bytes,
        };
        backend.upload_document(upload).await?;
        Ok::<_, anyhow::Error>(())
    }
    .await;

    match result {
        Ok(()) => history.flash(Alert::success("Uploaded successfully!")),
        Err(e) => {
            error!(error = %e, task_id = %task_id, "Upload failed");
            history.flash(Alert::error("Upload failed"));
        }
    }
    layout::redirect("/tasks")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, position: &str) -> Session {
        Session::start(Employee {
            id: id.into(),
            position: position.into(),
            ..Employee::default()
        })
    }

    fn task(id: &str, owner: &str) -> Task {
        Task {
            id: id.into(),
            title: id.into(),
            employee_id: owner.into(),
            ..Task::default()
        }
    }

    #[test]
    fn employees_see_exactly_their_tasks() {
        let tasks = vec![task("a", "e1"), task("b", "e2"), task("c", "e1")];
        let ids: Vec<_> = visible_tasks(&session("e1", "Developer"), &tasks)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn management_sees_all_tasks() {
        let tasks = vec![task("a", "e1"), task("b", "e2")];
        assert_eq!(visible_tasks(&session("m1", "Project Manager"), &tasks).len(), 2);
        assert_eq!(visible_tasks(&session("a1", "Admin"), &tasks).len(), 2);
    }

    #[test]
    fn only_assignee_changes_status() {
        let t = task("a", "e1");
        assert!(can_change_status(&session("e1", "Developer"), &t));
        assert!(!can_change_status(&session("m1", "Project Manager"), &t));
        assert!(!can_change_status(&session("a1", "Admin"), &t));
    }

    #[test]
    fn unknown_assignee_name() {
        let employees = vec![Employee {
            id: "e1".into(),
            name: "Jane".into(),
            ..Employee::default()
        }];
        assert_eq!(assignee_name(&employees, "e1"), "Jane");
        assert_eq!(assignee_name(&employees, "zz"), "Unknown Employee");
    }

    #[test]
    fn new_task_needs_assignee() {
        let form = NewTaskForm {
            title: "Report".into(),
            ..NewTaskForm::default()
        };
        assert_eq!(form.validate().unwrap_err(), "Please assign to an employee");

        let form = NewTaskForm {
            title: "Report".into(),
            employee_id: "e1".into(),
            due_date: "31/12/2025".into(),
            ..NewTaskForm::default()
        };
        assert_eq!(form.validate().unwrap_err(), "Due date must be YYYY-MM-DD");

        let task = NewTaskForm {
            title: " Report ".into(),
            employee_id: "e1".into(),
            due_date: "2025-12-31".into(),
            ..NewTaskForm::default()
        }
        .validate()
        .unwrap();
        assert_eq!(task.title, "Report");
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn heading_depends_on_role() {
        let tasks = vec![task("a", "e1")];
        let manager = render(&session("m1", "Project Manager"), &tasks, &[], None);
        assert!(manager.contains("<h1>Team Assignments</h1>"));
        assert!(manager.contains("New Task"));

        let own = render(&session("e1", "Developer"), &tasks, &[], None);
        assert!(own.contains("<h1>My Tasks</h1>"));
        assert!(own.contains("Prioritize your pending work."));
        assert!(!own.contains("New Task"));
    }

    #[test]
    fn status_control_disabled_for_non_assignee() {
        let t = task("a", "e1");
        let manager_view = task_card(&session("m1", "Project Manager"), &t, &[]);
        assert!(manager_view.contains("status-select status-pending\" disabled"));
        assert!(manager_view.contains("Unknown Employee"));
        assert!(!manager_view.contains("/tasks/a/delete"));

        let admin_view = task_card(&session("a1", "Admin"), &t, &[]);
        assert!(admin_view.contains("/tasks/a/delete"));

        let own_view = task_card(&session("e1", "Developer"), &t, &[]);
        assert!(!own_view.contains(" disabled"));
        assert!(own_view.contains("No Date"));
    }
}
