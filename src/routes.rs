use actix_web::{middleware::from_fn, web};

use crate::{
    auth::middleware::{require_any_role, require_management},
    pages::{dashboard, documents, employees, login, reminders, tasks},
    shell::layout,
};

async fn fallback() -> actix_web::HttpResponse {
    layout::redirect("/")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Public routes
    cfg.service(
        web::resource("/login")
            .route(web::get().to(login::login_page))
            .route(web::post().to(login::login)),
    )
    .service(web::resource("/logout").route(web::post().to(login::logout)));

    // Admin and manager only
    cfg.service(
        web::scope("/employees")
            .wrap(from_fn(require_management))
            // /employees
            .service(
                web::resource("")
                    .route(web::get().to(employees::employees_page))
                    .route(web::post().to(employees::create_employee)),
            )
            // /employees/{id}/delete
            .service(
                web::resource("/{id}/delete").route(web::post().to(employees::delete_employee)),
            )
            // /employees/{id}/assign
            .service(web::resource("/{id}/assign").route(web::post().to(employees::assign_task))),
    );

    // Every signed-in role
    cfg.service(
        web::scope("")
            .wrap(from_fn(require_any_role))
            .service(web::resource("/").route(web::get().to(dashboard::dashboard)))
            .service(web::resource("/dashboard").route(web::get().to(dashboard::dashboard)))
            .service(
                web::scope("/tasks")
                    // /tasks
                    .service(
                        web::resource("")
                            .route(web::get().to(tasks::tasks_page))
                            .route(web::post().to(tasks::create_task)),
                    )
                    // /tasks/{id}/...
                    .service(
                        web::resource("/{id}/status").route(web::post().to(tasks::update_status)),
                    )
                    .service(
                        web::resource("/{id}/delete").route(web::post().to(tasks::delete_task)),
                    )
                    .service(
                        web::resource("/{id}/documents")
                            .route(web::post().to(tasks::open_documents)),
                    )
                    .service(
                        web::resource("/{id}/upload").route(web::post().to(tasks::upload_document)),
                    ),
            )
            .service(
                web::scope("/documents")
                    .service(web::resource("").route(web::get().to(documents::documents_page)))
                    .service(
                        web::resource("/{id}/delete")
                            .route(web::post().to(documents::delete_document)),
                    ),
            )
            .service(
                web::resource("/reminders")
                    .route(web::get().to(reminders::reminders_page))
                    .route(web::post().to(reminders::add_reminder)),
            )
            .default_service(web::to(fallback)),
    );
}
