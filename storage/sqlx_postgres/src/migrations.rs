use crate::repository::Repository;
use anyhow::Context;
use sqlx::postgres::PgPool;
use std::sync::Arc;

/// Creates the `locations` and `pairs` tables when they are missing.
#[derive(Clone)]
pub struct MigrationManager {
    pg_pool: Arc<PgPool>,
}

impl MigrationManager {
    pub fn new(pg_pool: Arc<PgPool>) -> Self {
        Self { pg_pool }
    }

    pub fn for_repository(repository: &Repository) -> Self {
        Self::new(repository.shared_pool())
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!()
            .run(self.pg_pool.as_ref())
            .await
            .context("Failed to run migration")
    }
}
