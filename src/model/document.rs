use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Absent on records uploaded before tasks were linked by id.
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub task_name: Option<String>,
    /// Uploader.
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Download location of the stored blob.
    #[serde(default, alias = "blob_url")]
    pub file: Option<String>,
}

/// Multipart upload linking a file to a task and its uploader.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub title: String,
    pub description: String,
    pub task_id: String,
    pub task_name: String,
    pub employee_id: String,
    pub employee_name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_backend_record() {
        let doc: Document = serde_json::from_str(
            r#"{
                "id": "d1",
                "title": "Q3 report",
                "description": null,
                "file_name": "q3.pdf",
                "blob_url": "https://blob.test/e1/d1.pdf",
                "employee_id": "e1",
                "employee_name": "Jane",
                "task_id": "t1",
                "task_name": "Report"
            }"#,
        )
        .unwrap();
        assert_eq!(doc.file.as_deref(), Some("https://blob.test/e1/d1.pdf"));
        assert_eq!(doc.task_id.as_deref(), Some("t1"));
    }

    #[test]
    fn older_records_lack_task_link() {
        let doc: Document =
            serde_json::from_str(r#"{"id":"d0","title":"Old","employee_id":"e1"}"#).unwrap();
        assert!(doc.task_id.is_none());
        assert!(doc.task_name.is_none());
    }
}
