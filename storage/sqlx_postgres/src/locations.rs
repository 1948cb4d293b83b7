use crate::repository::Repository;
use anyhow::Context;
use async_trait::async_trait;
use device_tracking::data::{LocationRecord, LocationUpdate};
use device_tracking::location_store::LocationRepo;
use device_tracking::Udid;
use itertools::Itertools;

#[derive(sqlx::FromRow)]
struct LocationRow {
    id: i64,
    username: Option<String>,
    udid: String,
    latitude: f64,
    longitude: f64,
}

impl From<LocationRow> for LocationRecord {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.id.into(),
            username: row.username,
            udid: row.udid.into(),
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[async_trait]
impl LocationRepo for Repository {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn all_locations(&self) -> anyhow::Result<Vec<LocationRecord>> {
        let rows = sqlx::query_as::<_, LocationRow>(
            "
            SELECT id, username, udid, latitude, longitude FROM public.locations
            ORDER BY username ASC NULLS LAST, id ASC
            ",
        )
        .fetch_all(self.pool())
        .await
        .context("Failed to fetch locations")?;

        Ok(rows.into_iter().map_into().collect_vec())
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_location(&self, udid: &Udid) -> anyhow::Result<Option<LocationRecord>> {
        let row = sqlx::query_as::<_, LocationRow>(
            "
            SELECT id, username, udid, latitude, longitude FROM public.locations WHERE udid = $1
            ",
        )
        .bind(udid.as_str())
        .fetch_optional(self.pool())
        .await
        .with_context(|| format!("Failed to fetch location for {udid}"))?;

        Ok(row.map(LocationRecord::from))
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn upsert_location(&self, update: LocationUpdate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO public.locations (username, udid, latitude, longitude)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (udid)
            DO UPDATE SET username = EXCLUDED.username, latitude = EXCLUDED.latitude, longitude = EXCLUDED.longitude
            "#,
        )
        .bind(update.username)
        .bind(update.udid.as_str())
        .bind(update.latitude)
        .bind(update.longitude)
        .execute(self.pool())
        .await
        .context("Failed to upsert location")
        .map(|_| ())
    }
}
