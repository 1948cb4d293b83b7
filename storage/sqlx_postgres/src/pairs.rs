use crate::repository::Repository;
use anyhow::Context;
use async_trait::async_trait;
use device_tracking::data::PairingEdge;
use device_tracking::pairing_graph::PairingRepo;
use device_tracking::Udid;
use itertools::Itertools;

#[derive(sqlx::FromRow)]
struct PairRow {
    id: i64,
    udid_1: String,
    udid_2: String,
    session_id: String,
}

impl From<PairRow> for PairingEdge {
    fn from(row: PairRow) -> Self {
        Self {
            id: row.id.into(),
            udid_1: row.udid_1.into(),
            udid_2: row.udid_2.into(),
            session_id: row.session_id,
        }
    }
}

#[async_trait]
impl PairingRepo for Repository {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_edge(&self, from: &Udid, to: &Udid) -> anyhow::Result<Option<PairingEdge>> {
        let row = sqlx::query_as::<_, PairRow>(
            "
            SELECT id, udid_1, udid_2, session_id FROM public.pairs WHERE udid_1 = $1 AND udid_2 = $2
            ",
        )
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(self.pool())
        .await
        .context("Failed to fetch pair")?;

        Ok(row.map(PairingEdge::from))
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn insert_edge(&self, from: &Udid, to: &Udid, session_id: &str) -> anyhow::Result<()> {
        sqlx::query(
            "
            INSERT INTO public.pairs (udid_1, udid_2, session_id)
            VALUES ($1, $2, $3) ON CONFLICT DO NOTHING
            ",
        )
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(session_id)
        .execute(self.pool())
        .await
        .context("Failed to insert pair")
        .map(|_| ())
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn delete_edge(&self, edge: &PairingEdge) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM public.pairs WHERE id = $1")
            .bind(edge.id.inner())
            .execute(self.pool())
            .await
            .context("Failed to delete pair")
            .map(|_| ())
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn neighbors(&self, udid: &Udid) -> anyhow::Result<Vec<Udid>> {
        let ids: Vec<String> = sqlx::query_scalar(
            "
            SELECT udid_2 FROM public.pairs WHERE udid_1 = $1 ORDER BY id ASC
            ",
        )
        .bind(udid.as_str())
        .fetch_all(self.pool())
        .await
        .context("Failed to fetch paired devices")?;

        Ok(ids.into_iter().map_into().collect_vec())
    }
}
