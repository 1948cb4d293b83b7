use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use shared_kernel::configuration::config;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Settings {
    database: DbSettings,
}

type DbName = String;
#[derive(Debug, Deserialize)]
pub struct DbSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    username: String,
    password: Secret<String>,
    database_name: DbName,
    require_ssl: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    max_connections: u32,
    /// Upper bound on waiting for a pooled connection. Every store call goes
    /// through the pool, so this bounds each of them.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    acquire_timeout_secs: u64,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Self> {
        config::<Settings>()
    }

    pub fn without_db(&self) -> (PgConnectOptions, DbName) {
        let config = &self.database;
        let ssl_mode = if config.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        (
            PgConnectOptions::new()
                .host(&config.host)
                .username(&config.username)
                .password(config.password.expose_secret())
                .port(config.port)
                .ssl_mode(ssl_mode),
            config.database_name.clone(),
        )
    }

    pub fn with_db(&self) -> PgConnectOptions {
        let (options, database_name) = self.without_db();
        options.database(&database_name)
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.database.max_connections)
            .acquire_timeout(Duration::from_secs(self.database.acquire_timeout_secs))
    }
}
