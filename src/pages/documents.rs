use actix_web::{Responder, web};
use serde::Deserialize;
use tracing::{error, warn};

use crate::auth::{CurrentUser, Session};
use crate::backend::HrBackend;
use crate::model::Document;
use crate::shell::{Alert, History, NavState, Page, layout};
use crate::utils::html::escape;

/// The task a documents view is scoped to, carried from the tasks page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskScope {
    pub task_id: String,
    pub task_title: String,
}

impl TaskScope {
    /// Matches by id. Records that predate task ids match by task name.
    pub fn matches(&self, doc: &Document) -> bool {
        match doc.task_id.as_deref() {
            Some(id) => id == self.task_id,
            None => doc.task_name.as_deref() == Some(self.task_title.as_str()),
        }
    }
}

/// Documents shown to `session`.
///
/// In a task scope every document linked to that task is shown, whoever
/// uploaded it. Otherwise admins see everything and everyone else sees their
/// own uploads. `search` narrows by title in both modes.
pub fn visible_documents<'a>(
    session: &Session,
    scope: Option<&TaskScope>,
    search: &str,
    documents: &'a [Document],
) -> Vec<&'a Document> {
    let search = search.to_lowercase();

    documents
        .iter()
        .filter(|doc| doc.title.to_lowercase().contains(&search))
        .filter(|doc| match scope {
            Some(scope) => scope.matches(doc),
            None if session.role.sees_all_documents() => true,
            None => doc.employee_id == session.id(),
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentQuery {
    #[serde(default)]
    pub q: String,
}

fn document_row(session: &Session, doc: &Document, scoped: bool) -> String {
    let task_cell = if scoped {
        String::new()
    } else {
        format!(
            "<td><span class=\"task-tag\">{}</span></td>",
            escape(doc.task_name.as_deref().unwrap_or("Unlinked"))
        )
    };

    let download = match doc.file.as_deref() {
        Some(url) => format!(
            "<a href=\"{}\" title=\"Download\" target=\"_blank\">Download</a>",
            escape(url)
        ),
        None => String::new(),
    };

    let delete = if session.role.can_delete_documents() {
        format!(
            "<form method=\"post\" action=\"/documents/{id}/delete\" \
             onsubmit=\"return confirm('Permanently delete this file?')\">\
             <button title=\"Delete\">Delete</button></form>",
            id = escape(&doc.id)
        )
    } else {
        String::new()
    };

    format!(
        "<tr><td><strong>{title}</strong><div class=\"text-secondary\">{description}</div></td>\
         {task_cell}<td>{uploader}</td><td>{download}{delete}</td></tr>",
        title = escape(&doc.title),
        description = escape(doc.description.as_deref().unwrap_or("")),
        uploader = escape(doc.employee_name.as_deref().unwrap_or("")),
    )
}

fn render(session: &Session, scope: Option<&TaskScope>, search: &str, docs: &[&Document]) -> String {
    let mut out = String::new();

    match scope {
        Some(scope) => {
            out.push_str("<a href=\"/tasks\" class=\"back-link\">Back to Tasks</a>");
            out.push_str(&format!(
                "<div class=\"page-header\"><h1>Documents: {}</h1>\
                 <p class=\"text-secondary\">Manage files linked to this specific task.</p></div>",
                escape(&scope.task_title)
            ));
        }
        None => out.push_str(
            "<div class=\"page-header\"><h1>Document Repository</h1>\
             <p class=\"text-secondary\">Overview of all uploaded documents.</p></div>",
        ),
    }

    out.push_str(&format!(
        "<form method=\"get\" action=\"/documents\" class=\"search\">\
         <input name=\"q\" placeholder=\"Search files...\" value=\"{}\"></form>",
        escape(search)
    ));

    let task_header = if scope.is_some() { "" } else { "<th>TASK</th>" };
    let rows: String = if docs.is_empty() {
        "<tr><td colspan=\"4\">No documents found.</td></tr>".to_string()
    } else {
        docs.iter()
            .map(|doc| document_row(session, doc, scope.is_some()))
            .collect()
    };

    out.push_str(&format!(
        "<div class=\"card\"><table><thead><tr><th>DOCUMENT</th>{task_header}\
         <th>UPLOADED BY</th><th>ACTIONS</th></tr></thead><tbody>{rows}</tbody></table></div>"
    ));
    out
}

pub async fn documents_page(
    user: CurrentUser,
    query: web::Query<DocumentQuery>,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    let scope = match history.enter(Page::Documents) {
        Some(NavState::TaskDocuments {
            task_id,
            task_title,
        }) => Some(TaskScope {
            task_id,
            task_title,
        }),
        _ => None,
    };

    let documents = backend.list_documents().await.unwrap_or_else(|e| {
        error!(error = %e, "Error loading docs");
        Vec::new()
    });

    let visible = visible_documents(&user, scope.as_ref(), &query.q, &documents);
    let content = render(&user, scope.as_ref(), &query.q, &visible);
    layout::page(
        &user,
        Page::Documents,
        "Documents",
        history.take_alert(),
        &content,
    )
}

pub async fn delete_document(
    user: CurrentUser,
    path: web::Path<String>,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    let document_id = path.into_inner();

    if !user.role.can_delete_documents() {
        warn!(document_id = %document_id, user = %user.id(), "Document deletion by non-admin ignored");
        return layout::redirect("/documents");
    }

    if let Err(e) = backend.delete_document(&document_id).await {
        error!(error = %e, document_id = %document_id, "Delete failed");
        history.flash(Alert::error("Delete failed"));
    }
    layout::redirect("/documents")
}
