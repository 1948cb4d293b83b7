use crate::data::{LocationRecord, LocationUpdate};
use crate::errors::LocationStoreError;
use crate::Udid;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationRepo: Send + Sync {
    /// Every record, ordered by username with unnamed devices last.
    async fn all_locations(&self) -> anyhow::Result<Vec<LocationRecord>>;

    async fn find_location(&self, udid: &Udid) -> anyhow::Result<Option<LocationRecord>>;

    /// Must insert or overwrite in a single atomic write so that concurrent
    /// calls for the same udid never produce two rows.
    async fn upsert_location(&self, update: LocationUpdate) -> anyhow::Result<()>;
}

/// Owns the device -> location mapping. Every call goes to the backing store.
#[derive(Clone)]
pub struct LocationStore {
    repo: Arc<dyn LocationRepo>,
}

impl LocationStore {
    pub fn new(repo: Arc<dyn LocationRepo>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn get_all(&self) -> Result<Vec<LocationRecord>, LocationStoreError> {
        Ok(self.repo.all_locations().await?)
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn get(&self, udid: &Udid) -> Result<LocationRecord, LocationStoreError> {
        self.repo
            .find_location(udid)
            .await?
            .ok_or_else(|| LocationStoreError::NotFound(udid.clone()))
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn upsert(
        &self,
        udid: Udid,
        username: Option<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), LocationStoreError> {
        self.repo
            .upsert_location(LocationUpdate {
                udid,
                username,
                latitude,
                longitude,
            })
            .await?;
        Ok(())
    }

    /// Looks up each udid in order. Devices without a record are left out, so
    /// the result can be shorter than the input.
    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn get_many(&self, udids: &[Udid]) -> Result<Vec<LocationRecord>, LocationStoreError> {
        let mut locations = Vec::with_capacity(udids.len());
        for udid in udids {
            match self.get(udid).await {
                Ok(location) => locations.push(location),
                Err(LocationStoreError::NotFound(_)) => {
                    tracing::debug!("No location recorded for {udid}, skipping");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(locations)
    }
}
