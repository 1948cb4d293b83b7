use crate::configuration::Settings;
use anyhow::Context;
use sqlx::postgres::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repository {
    pg_pool: Arc<PgPool>,
}

impl Repository {
    pub fn pool(&self) -> &PgPool {
        self.pg_pool.as_ref()
    }

    pub(crate) fn shared_pool(&self) -> Arc<PgPool> {
        Arc::clone(&self.pg_pool)
    }

    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let pg_pool = settings
            .pool_options()
            .connect_with(settings.with_db())
            .await
            .context("Failed to connect to DB")
            .map(Arc::new)?;

        Ok(Self { pg_pool })
    }

    /// Creates a throwaway database named after a random uuid and migrates it.
    /// Returns `None` when no Postgres server is reachable with the workspace
    /// configuration, so database tests are skipped rather than failed.
    #[cfg(test)]
    pub async fn new_test_repo() -> Option<Self> {
        use crate::migrations::MigrationManager;
        use sqlx::{Connection, Executor, PgConnection};
        use uuid::Uuid;

        if std::env::var("APP_CONFIG_DIR").is_err() {
            std::env::set_var(
                "APP_CONFIG_DIR",
                concat!(env!("CARGO_MANIFEST_DIR"), "/../../configuration"),
            );
        }

        let settings = match Settings::parse() {
            Ok(settings) => settings,
            Err(err) => {
                eprintln!("Skipping database test, no settings: {err:?}");
                return None;
            }
        };
        let (connection_options, _) = settings.without_db();

        let mut connection = match PgConnection::connect_with(&connection_options).await {
            Ok(connection) => connection,
            Err(err) => {
                eprintln!("Skipping database test, Postgres is unreachable: {err}");
                return None;
            }
        };

        let db_name = Uuid::new_v4();
        connection
            .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_name))
            .await
            .expect("Failed to create database.");

        let connection_pool = settings
            .pool_options()
            .connect_with(connection_options.database(&db_name.to_string()))
            .await
            .map(Arc::new)
            .expect("Failed to connect to Postgres.");

        MigrationManager::new(Arc::clone(&connection_pool))
            .migrate()
            .await
            .expect("Failed to migrate the database");

        Some(Self {
            pg_pool: connection_pool,
        })
    }
}
