use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_appender::rolling;

use hr_portal::auth::SessionStore;
use hr_portal::backend;
use hr_portal::config::Config;
use hr_portal::pages::ReminderBoard;
use hr_portal::routes;
use hr_portal::shell::History;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "portal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(backend = %config.backend, addr = %config.server_addr, "Portal starting...");

    let backend = Data::from(backend::connect(&config)?);
    let sessions = Data::new(SessionStore::init(&config.session_file));
    let history = Data::new(History::default());
    let reminders = Data::new(ReminderBoard::seeded());

    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .app_data(backend.clone())
            .app_data(sessions.clone())
            .app_data(history.clone())
            .app_data(reminders.clone())
            .configure(routes::configure)
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await
    .context("Server error")
}
