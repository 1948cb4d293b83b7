use device_tracking::location_store::{LocationRepo, LocationStore};
use device_tracking::pairing_graph::{PairingGraph, PairingRepo};
use device_tracking::Repository;
use notifications::config::PushSettings;
use notifications::sender::NotificationSender;
use std::sync::Arc;

pub struct Application {
    pub locations: LocationStore,
    pub pairings: PairingGraph,
    pub notifier: Arc<dyn NotificationSender>,
    pub push_sound: String,
    pub push_badge: u32,
}

impl Application {
    pub fn new(
        location_repo: Arc<dyn LocationRepo>,
        pairing_repo: Arc<dyn PairingRepo>,
        notifier: Arc<dyn NotificationSender>,
        push: &PushSettings,
    ) -> Self {
        let locations = LocationStore::new(location_repo);
        let pairings = PairingGraph::new(pairing_repo, locations.clone());
        Application {
            locations,
            pairings,
            notifier,
            push_sound: push.sound.clone(),
            push_badge: push.badge,
        }
    }

    pub fn from_repository<R: Repository + 'static>(
        repo: R,
        notifier: Arc<dyn NotificationSender>,
        push: &PushSettings,
    ) -> Self {
        let repository = Arc::new(repo);
        Self::new(repository.clone(), repository, notifier, push)
    }
}
