use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "title")]
    pub text: String,
    #[serde(default, alias = "reminder_date")]
    pub due_date: String,
    #[serde(default)]
    pub employee_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_backend_field_names() {
        let r: Reminder = serde_json::from_str(
            r#"{"id":"r1","title":"Renew insurance","reminder_date":"2025-12-31","employee_id":"e1"}"#,
        )
        .unwrap();
        assert_eq!(r.text, "Renew insurance");
        assert_eq!(r.due_date, "2025-12-31");
        assert_eq!(r.employee_id.as_deref(), Some("e1"));
    }
}
