use crate::data::{LocationRecord, PairingEdge};
use crate::errors::PairingError;
use crate::location_store::LocationStore;
use crate::Udid;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PairingRepo: Send + Sync {
    async fn find_edge(&self, from: &Udid, to: &Udid) -> anyhow::Result<Option<PairingEdge>>;

    /// Writes the directed edge `from -> to`. Writing an edge that already
    /// exists must leave a single row behind.
    async fn insert_edge(&self, from: &Udid, to: &Udid, session_id: &str) -> anyhow::Result<()>;

    async fn delete_edge(&self, edge: &PairingEdge) -> anyhow::Result<()>;

    /// Targets of every edge leaving `udid`, in the order the edges were made.
    async fn neighbors(&self, udid: &Udid) -> anyhow::Result<Vec<Udid>>;
}

/// The symmetric pairing relation between devices.
///
/// A pairing is two directed edges. Neither creation nor removal is
/// transactional: a failure between the two writes leaves one edge behind,
/// which `create_pair` reports as [`PairingError::PartialPairing`] and
/// `remove_pair` as [`PairingError::PartialUnpairing`].
#[derive(Clone)]
pub struct PairingGraph {
    repo: Arc<dyn PairingRepo>,
    locations: LocationStore,
}

impl PairingGraph {
    pub fn new(repo: Arc<dyn PairingRepo>, locations: LocationStore) -> Self {
        Self { repo, locations }
    }

    /// Pairs `a` with `b`. Already paired devices are left untouched.
    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn create_pair(&self, a: &Udid, b: &Udid) -> Result<(), PairingError> {
        if self.repo.find_edge(a, b).await?.is_some() {
            tracing::debug!("{a} is already paired with {b}");
            return Ok(());
        }

        self.repo.insert_edge(a, b, "").await?;

        self.repo
            .insert_edge(b, a, "")
            .await
            .map_err(|source| PairingError::PartialPairing {
                from: a.clone(),
                to: b.clone(),
                source,
            })
    }

    /// Unpairs `a` and `b`. Nothing is removed unless the edge `a -> b`
    /// exists, even when a dangling `b -> a` is present.
    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn remove_pair(&self, a: &Udid, b: &Udid) -> Result<(), PairingError> {
        let forward = self.repo.find_edge(a, b).await?;
        let reverse = self.repo.find_edge(b, a).await?;

        let Some(forward) = forward else {
            tracing::debug!("{a} is not paired with {b}, nothing to remove");
            return Ok(());
        };

        self.repo.delete_edge(&forward).await?;

        if let Some(reverse) = reverse {
            self.repo
                .delete_edge(&reverse)
                .await
                .map_err(|source| PairingError::PartialUnpairing {
                    from: a.clone(),
                    to: b.clone(),
                    source,
                })?;
        }

        Ok(())
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn neighbors(&self, udid: &Udid) -> Result<Vec<Udid>, PairingError> {
        Ok(self.repo.neighbors(udid).await?)
    }

    /// Locations of every device paired with `udid`, in pairing order.
    /// Paired devices that never reported a location are skipped.
    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn visible_locations(&self, udid: &Udid) -> Result<Vec<LocationRecord>, PairingError> {
        let neighbors = self.neighbors(udid).await?;
        if neighbors.is_empty() {
            return Ok(vec![]);
        }

        Ok(self.locations.get_many(&neighbors).await?)
    }
}
