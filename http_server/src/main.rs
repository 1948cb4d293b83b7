use crate::app_container::Application;
use crate::settings::Settings;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use notifications::push_relay::PushRelaySender;
use shared_kernel::tracing::{config_telemetry, shutdown_global_tracer_provider};
use sqlx_postgres::migrations::MigrationManager;
use sqlx_postgres::repository::Repository;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

mod app_container;
mod errors;
mod middleware;
mod routes;
mod settings;
#[cfg(test)]
mod test_utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse()?;
    config_telemetry(&settings.telemetry)?;

    let db_settings = sqlx_postgres::configuration::Settings::parse()?;
    let repository = Repository::new(&db_settings).await?;
    MigrationManager::for_repository(&repository).migrate().await?;

    let notifier = Arc::new(PushRelaySender::new(&settings.push));
    let application = web::Data::new(Application::from_repository(
        repository,
        notifier,
        &settings.push,
    ));

    let address = (settings.application.host.clone(), settings.application.port);
    tracing::info!("Server started on {}:{}", address.0, address.1);

    let result = HttpServer::new(move || {
        App::new()
            .wrap(middleware::cors())
            .wrap(middleware::allow_any_origin())
            .wrap(middleware::normalize_path())
            .wrap(TracingLogger::default())
            .configure(routes::config)
            .app_data(application.clone())
    })
    .bind(address)?
    .run()
    .await
    .context("Server failed to run");

    shutdown_global_tracer_provider();
    result
}
