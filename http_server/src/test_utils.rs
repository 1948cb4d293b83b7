use crate::app_container::Application;
use async_trait::async_trait;
use device_tracking::data::{LocationRecord, LocationUpdate, PairingEdge};
use device_tracking::location_store::LocationRepo;
use device_tracking::pairing_graph::PairingRepo;
use device_tracking::testing::InMemoryRepository;
use device_tracking::Udid;
use notifications::config::PushSettings;
use notifications::sender::{DeliveryReport, NotificationSender, PushNotification};
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Builds an initialised test service with the same middleware stack and
/// routes as the server.
#[macro_export]
macro_rules! init_test_service {
    ($application:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap($crate::middleware::cors())
                .wrap($crate::middleware::allow_any_origin())
                .wrap($crate::middleware::normalize_path())
                .configure($crate::routes::config)
                .app_data(actix_web::web::Data::new($application)),
        )
        .await
    };
}

#[derive(Default)]
pub struct RecordingSender {
    failure: Option<String>,
    sent: Mutex<Vec<PushNotification>>,
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send(&self, notification: &PushNotification) -> DeliveryReport {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification.clone());
        }
        match &self.failure {
            Some(error) => DeliveryReport::failed(error.clone()),
            None => DeliveryReport::delivered(),
        }
    }
}

/// Wraps the in-memory store and fails the edge writes whose call index
/// (counted from zero, per kind of write) falls in the given ranges.
pub struct FlakyPairingRepo {
    inner: InMemoryRepository,
    inserts: AtomicUsize,
    failing_inserts: Range<usize>,
    deletes: AtomicUsize,
    failing_deletes: Range<usize>,
}

impl FlakyPairingRepo {
    fn new(
        inner: InMemoryRepository,
        failing_inserts: Range<usize>,
        failing_deletes: Range<usize>,
    ) -> Self {
        Self {
            inner,
            inserts: AtomicUsize::new(0),
            failing_inserts,
            deletes: AtomicUsize::new(0),
            failing_deletes,
        }
    }
}

#[async_trait]
impl PairingRepo for FlakyPairingRepo {
    async fn find_edge(&self, from: &Udid, to: &Udid) -> anyhow::Result<Option<PairingEdge>> {
        self.inner.find_edge(from, to).await
    }

    async fn insert_edge(&self, from: &Udid, to: &Udid, session_id: &str) -> anyhow::Result<()> {
        let call = self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.failing_inserts.contains(&call) {
            anyhow::bail!("connection reset while inserting {from}->{to}");
        }
        self.inner.insert_edge(from, to, session_id).await
    }

    async fn delete_edge(&self, edge: &PairingEdge) -> anyhow::Result<()> {
        let call = self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.failing_deletes.contains(&call) {
            anyhow::bail!(
                "connection reset while deleting {}->{}",
                edge.udid_1,
                edge.udid_2
            );
        }
        self.inner.delete_edge(edge).await
    }

    async fn neighbors(&self, udid: &Udid) -> anyhow::Result<Vec<Udid>> {
        self.inner.neighbors(udid).await
    }
}

pub struct TestApplication {
    pub repository: InMemoryRepository,
    pairing_repo: Arc<dyn PairingRepo>,
    notifier: Arc<RecordingSender>,
}

impl Default for TestApplication {
    fn default() -> Self {
        let repository = InMemoryRepository::default();
        Self {
            pairing_repo: Arc::new(repository.clone()),
            repository,
            notifier: Arc::new(RecordingSender::default()),
        }
    }
}

impl TestApplication {
    fn with_flaky_pairings(failing_inserts: Range<usize>, failing_deletes: Range<usize>) -> Self {
        let repository = InMemoryRepository::default();
        Self {
            pairing_repo: Arc::new(FlakyPairingRepo::new(
                repository.clone(),
                failing_inserts,
                failing_deletes,
            )),
            repository,
            notifier: Arc::new(RecordingSender::default()),
        }
    }

    /// The second edge insert, the reverse half of the first pairing, fails.
    pub fn failing_reverse_edge() -> Self {
        Self::with_flaky_pairings(1..2, 0..0)
    }

    pub fn failing_deletes(failing: Range<usize>) -> Self {
        Self::with_flaky_pairings(0..0, failing)
    }

    pub fn with_failing_notifier(error: &str) -> Self {
        Self {
            notifier: Arc::new(RecordingSender {
                failure: Some(error.to_string()),
                sent: Mutex::default(),
            }),
            ..Self::default()
        }
    }

    pub fn application(&self) -> Application {
        let push = PushSettings {
            gateway_url: "http://localhost:9999/push"
                .parse()
                .expect("valid test gateway url"),
            sound: "bingbong.aiff".to_string(),
            badge: 0,
        };
        Application::new(
            Arc::new(self.repository.clone()),
            self.pairing_repo.clone(),
            self.notifier.clone(),
            &push,
        )
    }

    pub async fn seed_location(&self, udid: &str, username: &str, latitude: f64, longitude: f64) {
        self.repository
            .upsert_location(LocationUpdate {
                udid: udid.into(),
                username: Some(username.to_string()),
                latitude,
                longitude,
            })
            .await
            .expect("seeding the in-memory repository");
    }

    pub async fn stored_locations(&self) -> Vec<LocationRecord> {
        self.repository
            .all_locations()
            .await
            .expect("reading the in-memory repository")
    }

    /// Stored edges rendered as `from->to`, in creation order.
    pub fn edge_pairs(&self) -> Vec<String> {
        self.repository
            .edges()
            .into_iter()
            .map(|edge| format!("{}->{}", edge.udid_1, edge.udid_2))
            .collect()
    }

    pub fn sent_notifications(&self) -> Vec<PushNotification> {
        self.notifier
            .sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}
