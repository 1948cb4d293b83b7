//! In-process repository for tests. Not meant for serving traffic.

use crate::data::{EdgeId, LocationId, LocationRecord, LocationUpdate, PairingEdge};
use crate::location_store::LocationRepo;
use crate::pairing_graph::PairingRepo;
use crate::Udid;
use anyhow::anyhow;
use async_trait::async_trait;
use itertools::Itertools;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct State {
    next_id: i64,
    locations: HashMap<Udid, LocationRecord>,
    edges: Vec<PairingEdge>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryRepository {
    fn state(&self) -> anyhow::Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("In-memory repository lock poisoned"))
    }

    /// Snapshot of every stored edge, in creation order.
    pub fn edges(&self) -> Vec<PairingEdge> {
        self.state
            .lock()
            .map(|state| state.edges.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LocationRepo for InMemoryRepository {
    async fn all_locations(&self) -> anyhow::Result<Vec<LocationRecord>> {
        let state = self.state()?;
        let locations = state
            .locations
            .values()
            .cloned()
            .sorted_by(|a, b| {
                (a.username.is_none(), &a.username, a.id).cmp(&(
                    b.username.is_none(),
                    &b.username,
                    b.id,
                ))
            })
            .collect_vec();
        Ok(locations)
    }

    async fn find_location(&self, udid: &Udid) -> anyhow::Result<Option<LocationRecord>> {
        Ok(self.state()?.locations.get(udid).cloned())
    }

    async fn upsert_location(&self, update: LocationUpdate) -> anyhow::Result<()> {
        let mut state = self.state()?;
        let existing = state.locations.get(&update.udid).map(|location| location.id);
        let id = match existing {
            Some(id) => id,
            None => LocationId::from(state.next_id()),
        };
        state.locations.insert(
            update.udid.clone(),
            LocationRecord {
                id,
                username: update.username,
                udid: update.udid,
                latitude: update.latitude,
                longitude: update.longitude,
            },
        );
        Ok(())
    }
}

#[async_trait]
impl PairingRepo for InMemoryRepository {
    async fn find_edge(&self, from: &Udid, to: &Udid) -> anyhow::Result<Option<PairingEdge>> {
        Ok(self
            .state()?
            .edges
            .iter()
            .find(|edge| &edge.udid_1 == from && &edge.udid_2 == to)
            .cloned())
    }

    async fn insert_edge(&self, from: &Udid, to: &Udid, session_id: &str) -> anyhow::Result<()> {
        let mut state = self.state()?;
        let exists = state
            .edges
            .iter()
            .any(|edge| &edge.udid_1 == from && &edge.udid_2 == to);
        if !exists {
            let id = EdgeId::from(state.next_id());
            state.edges.push(PairingEdge {
                id,
                udid_1: from.clone(),
                udid_2: to.clone(),
                session_id: session_id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_edge(&self, edge: &PairingEdge) -> anyhow::Result<()> {
        self.state()?.edges.retain(|stored| stored.id != edge.id);
        Ok(())
    }

    async fn neighbors(&self, udid: &Udid) -> anyhow::Result<Vec<Udid>> {
        Ok(self
            .state()?
            .edges
            .iter()
            .filter(|edge| &edge.udid_1 == udid)
            .map(|edge| edge.udid_2.clone())
            .collect_vec())
    }
}
