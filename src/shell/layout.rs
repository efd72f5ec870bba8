use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{ContentType, LOCATION};

use crate::auth::Session;
use crate::model::Role;
use crate::shell::history::{Alert, Page};
use crate::utils::html::escape;

const BRAND: &str = "Cloud Corp";

const STYLE: &str = "body{font-family:sans-serif;margin:0;background:#f9fafb;color:#101828}\
.app-layout{display:flex;min-height:100vh}\
.sidebar{width:240px;background:#fff;border-right:1px solid #eaecf0;display:flex;flex-direction:column}\
.sidebar-nav a{display:block;padding:10px 20px;color:#344054;text-decoration:none}\
.sidebar-nav a.active{background:#eff8ff;color:#155eef}\
main{flex:1;padding:32px}\
.card{background:#fff;border:1px solid #eaecf0;border-radius:12px;padding:20px;margin-bottom:16px}\
.stats-grid{display:grid;grid-template-columns:repeat(3,1fr);gap:16px}\
.value{font-size:32px;font-weight:600}\
.alert{padding:12px 16px;border-radius:8px;margin-bottom:16px}\
.alert.success{background:#ecfdf3;color:#027a48}\
.alert.error{background:#fef3f2;color:#b42318}\
.alert.validation{background:#fffaeb;color:#b54708}\
table{width:100%;border-collapse:collapse}\
th,td{text-align:left;padding:12px 0;border-bottom:1px solid #eaecf0}";

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title} · {BRAND}</title>\
         <style>{STYLE}</style></head><body>{body}</body></html>",
        title = escape(title),
    )
}

fn html(status: StatusCode, markup: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(markup)
}

pub fn alert_banner(alert: Option<&Alert>) -> String {
    match alert {
        Some(alert) => format!(
            "<div class=\"alert {kind}\" role=\"alert\">{message}</div>",
            kind = alert.kind,
            message = escape(&alert.message)
        ),
        None => String::new(),
    }
}

/// Label of the tasks link: employees only see their own.
pub fn tasks_label(role: Role) -> &'static str {
    if role == Role::Employee {
        "My Tasks"
    } else {
        "Team Tasks"
    }
}

pub fn sidebar(session: &Session, active: Page) -> String {
    let link = |page: Page, href: &str, label: &str| {
        let class = if page == active { " class=\"active\"" } else { "" };
        format!("<a href=\"{href}\"{class}>{label}</a>")
    };

    let mut nav = String::new();
    nav.push_str(&link(Page::Dashboard, "/dashboard", "Dashboard"));
    nav.push_str(&link(Page::Tasks, "/tasks", tasks_label(session.role)));
    nav.push_str(&link(Page::Documents, "/documents", "Documents"));
    if session.is_management() {
        nav.push_str(&link(Page::Employees, "/employees", "Team Directory"));
    }
    nav.push_str(&link(Page::Reminders, "/reminders", "Reminders"));

    let avatar: String = session.name().chars().take(1).collect();

    format!(
        "<div class=\"sidebar\">\
           <div class=\"sidebar-header\"><h2>{BRAND}</h2><span class=\"role-badge\">{role}</span></div>\
           <nav class=\"sidebar-nav\">{nav}</nav>\
           <div class=\"sidebar-footer\">\
             <div class=\"user-avatar\">{avatar}</div>\
             <div class=\"user-details\"><span class=\"user-name\">{name}</span>\
             <span class=\"user-email\">{email}</span></div>\
             <form method=\"post\" action=\"/logout\"><button class=\"logout-btn\">Log out</button></form>\
           </div>\
         </div>",
        role = session.role,
        avatar = escape(&avatar),
        name = escape(session.name()),
        email = escape(&session.identity.email),
    )
}

/// A full page inside the navigation shell.
pub fn page(
    session: &Session,
    active: Page,
    title: &str,
    alert: Option<Alert>,
    content: &str,
) -> HttpResponse {
    let body = format!(
        "<div class=\"app-layout\">{sidebar}<main>{alert}{content}</main></div>",
        sidebar = sidebar(session, active),
        alert = alert_banner(alert.as_ref()),
    );
    html(StatusCode::OK, document(title, &body))
}

/// A page outside the shell (login).
pub fn bare_page(title: &str, content: &str) -> HttpResponse {
    html(StatusCode::OK, document(title, content))
}

pub fn access_denied(role: Role) -> HttpResponse {
    let body = format!(
        "<div class=\"card\" style=\"margin:2rem auto;max-width:480px;text-align:center;color:#b42318\">\
           <h2>Access Denied</h2>\
           <p>You do not have permission to view this page.</p>\
           <p>Your Role: <strong>{role}</strong></p>\
         </div>"
    );
    html(StatusCode::FORBIDDEN, document("Access Denied", &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Employee;

    fn session(position: &str) -> Session {
        Session::start(Employee {
            id: "e1".into(),
            name: "jane <script>".into(),
            email: "jane@corp.test".into(),
            position: position.into(),
            department: "IT".into(),
        })
    }

    #[test]
    fn directory_link_only_for_management() {
        let employee = sidebar(&session("Software Developer"), Page::Dashboard);
        assert!(!employee.contains("Team Directory"));
        assert!(employee.contains("My Tasks"));

        let manager = sidebar(&session("Project Manager"), Page::Dashboard);
        assert!(manager.contains("Team Directory"));
        assert!(manager.contains("Team Tasks"));
    }

    #[test]
    fn sidebar_escapes_identity() {
        let markup = sidebar(&session("Developer"), Page::Tasks);
        assert!(markup.contains("jane &lt;script&gt;"));
        assert!(markup.contains("<a href=\"/tasks\" class=\"active\">"));
    }

    #[test]
    fn access_denied_is_forbidden() {
        assert_eq!(access_denied(Role::Employee).status(), 403);
        assert_eq!(redirect("/login").status(), 303);
    }
}
