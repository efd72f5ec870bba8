use actix_web::{Responder, web};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::auth::{CurrentUser, Session};
use crate::backend::HrBackend;
use crate::model::{Employee, NewEmployee};
use crate::shell::{Alert, History, NavState, Page, layout};
use crate::utils::html::escape;

/// Directory entries matching `term` on name, position or department.
pub fn search<'a>(employees: &'a [Employee], term: &str) -> Vec<&'a Employee> {
    employees.iter().filter(|e| e.matches(term)).collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewEmployeeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
}

impl NewEmployeeForm {
    pub fn validate(self) -> Result<NewEmployee, &'static str> {
        let new = NewEmployee {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            position: self.position.trim().to_string(),
            department: self.department.trim().to_string(),
        };
        if new.is_complete() {
            Ok(new)
        } else {
            Err("Please fill in all fields.")
        }
    }
}

fn create_form() -> &'static str {
    "<details class=\"card\"><summary>Add Employee</summary>\
       <form method=\"post\" action=\"/employees\">\
         <input name=\"name\" placeholder=\"Full name\" required>\
         <input type=\"email\" name=\"email\" placeholder=\"Email\" required>\
         <input name=\"position\" placeholder=\"Position\" required>\
         <input name=\"department\" placeholder=\"Department\" required>\
         <button type=\"submit\">Save Employee</button>\
       </form>\
     </details>"
}

fn employee_card(session: &Session, employee: &Employee) -> String {
    let id = escape(&employee.id);

    let action = if session.role.can_edit_directory() {
        format!(
            "<form method=\"post\" action=\"/employees/{id}/delete\" \
             onsubmit=\"return confirm('Are you sure you want to remove this employee?')\">\
             <button class=\"icon-btn danger\" title=\"Remove\">Remove</button></form>"
        )
    } else if session.role.can_assign_from_directory() {
        format!(
            "<form method=\"post\" action=\"/employees/{id}/assign\">\
             <button class=\"btn-secondary\">Assign task</button></form>"
        )
    } else {
        String::new()
    };

    format!(
        "<div class=\"card employee-card\">\
           <div class=\"avatar\">{initials}</div>\
           <h3>{name}</h3><p class=\"text-secondary\">{position}</p>\
           <span class=\"dept-tag\">{department}</span>\
           <a href=\"mailto:{email}\">{email}</a>\
           {action}\
         </div>",
        initials = escape(&employee.initials()),
        name = escape(&employee.name),
        position = escape(&employee.position),
        department = escape(&employee.department),
        email = escape(&employee.email),
    )
}

fn render(session: &Session, term: &str, employees: &[&Employee]) -> String {
    let subtitle = if session.role.can_edit_directory() {
        "Manage your organization's talent."
    } else {
        "View team members and assign work."
    };

    let mut out = format!(
        "<div class=\"page-header\"><h1>Team Directory</h1>\
         <p class=\"text-secondary\">{subtitle}</p></div>\
         <form method=\"get\" action=\"/employees\" class=\"search\">\
         <input name=\"q\" placeholder=\"Search by name, role, or department...\" value=\"{}\">\
         </form>",
        escape(term)
    );

    if session.role.can_edit_directory() {
        out.push_str(create_form());
    }

    if employees.is_empty() {
        out.push_str("<p class=\"empty\">No employees found.</p>");
    } else {
        out.push_str("<div class=\"employee-grid\">");
        for employee in employees {
            out.push_str(&employee_card(session, employee));
        }
        out.push_str("</div>");
    }
    out
}

pub async fn employees_page(
    user: CurrentUser,
    query: web::Query<DirectoryQuery>,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    history.enter(Page::Employees);

    let employees = backend.list_employees().await.unwrap_or_else(|e| {
        error!(error = %e, "Failed to load employees");
        Vec::new()
    });

    let matching = search(&employees, &query.q);
    let content = render(&user, &query.q, &matching);
    layout::page(
        &user,
        Page::Employees,
        "Team Directory",
        history.take_alert(),
        &content,
    )
}

pub async fn create_employee(
    user: CurrentUser,
    form: web::Form<NewEmployeeForm>,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    if !user.role.can_edit_directory() {
        warn!(user = %user.id(), "Employee creation by non-admin ignored");
        return layout::redirect("/employees");
    }

    let new = match form.into_inner().validate() {
        Ok(new) => new,
        Err(msg) => {
            history.flash(Alert::validation(msg));
            return layout::redirect("/employees");
        }
    };

    match backend.create_employee(&new).await {
        Ok(created) => {
            info!(employee_id = %created.id, "Employee added");
            history.flash(Alert::success("Employee added successfully!"));
        }
        Err(e) => {
            error!(error = %e, "Failed to add employee");
            history.flash(Alert::error("Failed to add employee."));
        }
    }
    layout::redirect("/employees")
}

pub async fn delete_employee(
    user: CurrentUser,
    path: web::Path<String>,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    let employee_id = path.into_inner();

    if !user.role.can_edit_directory() {
        warn!(employee_id = %employee_id, user = %user.id(), "Employee deletion by non-admin ignored");
        return layout::redirect("/employees");
    }

    if let Err(e) = backend.delete_employee(&employee_id).await {
        error!(error = %e, employee_id = %employee_id, "Failed to delete employee");
        history.flash(Alert::error("Failed to delete employee."));
    }
    layout::redirect("/employees")
}

/// Opens the tasks page with the create form prefilled for this employee.
pub async fn assign_task(
    user: CurrentUser,
    path: web::Path<String>,
    history: web::Data<History>,
) -> impl Responder {
    if !user.role.can_assign_from_directory() {
        warn!(user = %user.id(), "Assign from directory by non-manager ignored");
        return layout::redirect("/employees");
    }

    history.navigate(NavState::AssignTask {
        employee_id: path.into_inner(),
    });
    layout::redirect("/tasks")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(position: &str) -> Session {
        Session::start(Employee {
            id: "me".into(),
            position: position.into(),
            ..Employee::default()
        })
    }

    fn employee(id: &str, name: &str, position: &str, department: &str) -> Employee {
        Employee {
            id: id.into(),
            name: name.into(),
            email: format!("{id}@corp.test"),
            position: position.into(),
            department: department.into(),
        }
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let staff = vec![
            employee("e1", "Jane Smith", "Analyst", "Finance"),
            employee("e2", "Bob Stone", "Engineer", "Platform"),
        ];
        assert_eq!(search(&staff, "FIN").len(), 1);
        assert_eq!(search(&staff, "engineer")[0].id, "e2");
        assert_eq!(search(&staff, "").len(), 2);
        assert!(search(&staff, "legal").is_empty());
    }

    #[test]
    fn create_requires_all_fields() {
        let form = NewEmployeeForm {
            name: "Jane".into(),
            email: "jane@corp.test".into(),
            position: "Analyst".into(),
            ..NewEmployeeForm::default()
        };
        assert_eq!(form.validate().unwrap_err(), "Please fill in all fields.");

        let new = NewEmployeeForm {
            name: " Jane ".into(),
            email: "jane@corp.test".into(),
            position: "Analyst".into(),
            department: "Finance".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(new.name, "Jane");
    }

    #[test]
    fn card_actions_follow_role() {
        let e = employee("e1", "jane smith", "Analyst", "Finance");

        let admin = employee_card(&session("Admin"), &e);
        assert!(admin.contains("/employees/e1/delete"));
        assert!(!admin.contains("Assign task"));
        assert!(admin.contains(">JS<"));

        let manager = employee_card(&session("Project Manager"), &e);
        assert!(manager.contains("/employees/e1/assign"));
        assert!(!manager.contains("/delete"));
    }

    #[test]
    fn create_form_only_for_admin() {
        assert!(render(&session("Admin"), "", &[]).contains("Add Employee"));
        let manager = render(&session("Project Manager"), "", &[]);
        assert!(!manager.contains("Add Employee"));
        assert!(manager.contains("View team members and assign work."));
    }
}
