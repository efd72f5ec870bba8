use std::sync::{Mutex, PoisonError};

use actix_web::{Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::model::Reminder;
use crate::shell::{Alert, History, Page, layout};
use crate::utils::html::escape;

/// Reminders kept by the portal process itself. Nothing is sent to the
/// backend and the list is gone after a restart.
pub struct ReminderBoard {
    reminders: Mutex<Vec<Reminder>>,
}

impl ReminderBoard {
    pub fn new(reminders: Vec<Reminder>) -> Self {
        Self {
            reminders: Mutex::new(reminders),
        }
    }

    pub fn seeded() -> Self {
        let sample = |id: &str, text: &str, due_date: &str| Reminder {
            id: id.into(),
            text: text.into(),
            due_date: due_date.into(),
            employee_id: None,
        };
        Self::new(vec![
            sample("1", "Renew health insurance", "2025-12-31"),
            sample("2", "Check probation end dates", "2026-01-15"),
        ])
    }

    /// Newest first.
    pub fn list(&self) -> Vec<Reminder> {
        self.reminders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn add(&self, form: ReminderForm, owner: Option<&str>) -> Result<Reminder, &'static str> {
        let text = form.text.trim();
        let due_date = form.due_date.trim();
        if text.is_empty() || due_date.is_empty() {
            return Err("Please fill in all fields.");
        }
        if NaiveDate::parse_from_str(due_date, "%Y-%m-%d").is_err() {
            return Err("Due date must be YYYY-MM-DD");
        }

        let reminder = Reminder {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            due_date: due_date.to_string(),
            employee_id: owner.map(str::to_string),
        };
        self.reminders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, reminder.clone());
        Ok(reminder)
    }
}

impl Default for ReminderBoard {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReminderForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub due_date: String,
}

fn render(reminders: &[Reminder]) -> String {
    let list = if reminders.is_empty() {
        "<p class=\"text-secondary\">No reminders found.</p>".to_string()
    } else {
        let items: String = reminders
            .iter()
            .map(|r| {
                format!(
                    "<li class=\"list-item\"><span>{}</span><span class=\"badge\">{}</span></li>",
                    escape(&r.text),
                    escape(&r.due_date)
                )
            })
            .collect();
        format!("<ul class=\"list\">{items}</ul>")
    };

    format!(
        "<div class=\"page-header\"><h1>Reminders</h1>\
         <p class=\"text-secondary\">Set important reminders for HR events.</p></div>\
         <div class=\"card\"><h3>Add reminder</h3>\
           <form method=\"post\" action=\"/reminders\">\
             <input name=\"text\" placeholder=\"Reminder text\">\
             <input type=\"date\" name=\"due_date\">\
             <button type=\"submit\">Add</button>\
           </form>\
         </div>\
         <div class=\"card\"><h3>Reminders list</h3>{list}</div>"
    )
}

pub async fn reminders_page(
    user: CurrentUser,
    board: web::Data<ReminderBoard>,
    history: web::Data<History>,
) -> impl Responder {
    history.enter(Page::Reminders);
    let content = render(&board.list());
    layout::page(
        &user,
        Page::Reminders,
        "Reminders",
        history.take_alert(),
        &content,
    )
}

pub async fn add_reminder(
    user: CurrentUser,
    form: web::Form<ReminderForm>,
    board: web::Data<ReminderBoard>,
    history: web::Data<History>,
) -> impl Responder {
    match board.add(form.into_inner(), Some(user.id())) {
        Ok(reminder) => debug!(reminder_id = %reminder.id, "Reminder added"),
        Err(msg) => history.flash(Alert::error(msg)),
    }
    layout::redirect("/reminders")
}
