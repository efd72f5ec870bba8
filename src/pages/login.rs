use actix_web::{HttpResponse, Responder, web};
use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::{error, info};

use crate::auth::SessionStore;
use crate::backend::HrBackend;
use crate::model::Employee;
use crate::shell::{Alert, History, layout};
use crate::utils::html::{escape, selected};

fn demo(id: &str, name: &str, position: &str, department: &str) -> Employee {
    Employee {
        id: id.into(),
        name: name.into(),
        email: String::new(),
        position: position.into(),
        department: department.into(),
    }
}

/// Always offered so there is an identity for each role.
pub static DEMO_USERS: Lazy<Vec<Employee>> = Lazy::new(|| {
    vec![
        demo("demo-admin-01", "Demo Admin", "System Administrator", "IT"),
        demo("demo-manager-01", "Demo Manager", "Project Manager", "Operations"),
        demo("demo-employee-01", "Demo Employee", "Software Developer", "Engineering"),
    ]
});

pub struct LoginOption {
    pub identity: Employee,
    pub is_demo: bool,
}

/// Directory entries first, then the demo identities. When the directory
/// cannot be read only the demo identities are offered.
pub async fn login_options(backend: &dyn HrBackend) -> Vec<LoginOption> {
    let real = match backend.list_employees().await {
        Ok(employees) => employees,
        Err(e) => {
            error!(error = %e, "Failed to load users");
            Vec::new()
        }
    };

    real.into_iter()
        .map(|identity| LoginOption {
            identity,
            is_demo: false,
        })
        .chain(DEMO_USERS.iter().cloned().map(|identity| LoginOption {
            identity,
            is_demo: true,
        }))
        .collect()
}

fn render(options: &[LoginOption], alert: Option<Alert>) -> HttpResponse {
    let choices: String = options
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            format!(
                "<option value=\"{id}\"{sel}>{name} — {position}{demo}</option>",
                id = escape(&opt.identity.id),
                sel = selected(i == 0),
                name = escape(&opt.identity.name),
                position = escape(&opt.identity.position),
                demo = if opt.is_demo { " (Demo)" } else { "" },
            )
        })
        .collect();

    let content = format!(
        "<div class=\"card\" style=\"max-width:450px;margin:10vh auto;text-align:center\">\
           <h2>Cloud Corp Portal</h2>\
           <p>Select a user profile to simulate login</p>\
           {alert}\
           <form method=\"post\" action=\"/login\" style=\"text-align:left\">\
             <label for=\"employee_id\">Login As:</label>\
             <select id=\"employee_id\" name=\"employee_id\" style=\"width:100%\">{choices}</select>\
             <button type=\"submit\" style=\"width:100%;margin-top:16px\">Enter Portal</button>\
           </form>\
         </div>",
        alert = layout::alert_banner(alert.as_ref()),
    );

    layout::bare_page("Login", &content)
}

pub async fn login_page(
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    let options = login_options(backend.get_ref()).await;
    render(&options, history.take_alert())
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub employee_id: String,
}

pub async fn login(
    form: web::Form<LoginForm>,
    backend: web::Data<dyn HrBackend>,
    store: web::Data<SessionStore>,
    history: web::Data<History>,
) -> impl Responder {
    let options = login_options(backend.get_ref()).await;

    match options
        .into_iter()
        .find(|opt| opt.identity.id == form.employee_id)
    {
        Some(opt) => {
            history.clear();
            store.login(opt.identity).await;
            layout::redirect("/")
        }
        None => {
            info!(employee_id = %form.employee_id, "Login with unknown identity");
            history.flash(Alert::validation("Please select a user to log in as"));
            layout::redirect("/login")
        }
    }
}

pub async fn logout(store: web::Data<SessionStore>, history: web::Data<History>) -> impl Responder {
    store.logout().await;
    history.clear();
    layout::redirect("/login")
}
