use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Anything not completed counts as open work.
    pub fn is_open(&self) -> bool {
        *self != TaskStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Assignee.
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    pub fn is_assigned_to(&self, employee_id: &str) -> bool {
        self.employee_id == employee_id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub employee_id: String,
    pub due_date: String,
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_wire_form_is_kebab_case() {
        assert_eq!(TaskStatus::InProgress.to_string(), "in-progress");
        assert_eq!(
            TaskStatus::from_str("in-progress").unwrap(),
            TaskStatus::InProgress
        );
        let task: Task =
            serde_json::from_str(r#"{"id":"t1","title":"Report","status":"in-progress"}"#)
                .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn missing_status_defaults_to_pending() {
        let task: Task = serde_json::from_str(r#"{"id":"t1","title":"Report"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.status.is_open());
        assert!(!TaskStatus::Completed.is_open());
    }
}
