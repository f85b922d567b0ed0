use super::fixtures::{sample_assignments, sample_route};
use crate::common::{DomainError, DomainResult};
use crate::domains::route::{Assignment, AssignmentsUpdate, Route, StorageService};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoredData {
    route: Option<Route>,
    assignments: Vec<Assignment>,
}

/// In-memory storage seeded with fixture data. Writes are kept, so a later
/// read observes them. Optional latency simulates a slow device store.
#[derive(Debug)]
pub struct MockStorageService {
    client_id: String,
    latency: Option<Duration>,
    unavailable: AtomicBool,
    data: RwLock<StoredData>,
}

impl MockStorageService {
    /// Seeded with the sample route and assignments.
    pub fn new(client_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self::with_data(client_id, Some(sample_route(now)), sample_assignments(now))
    }

    pub fn with_data(
        client_id: impl Into<String>,
        route: Option<Route>,
        assignments: Vec<Assignment>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            latency: None,
            unavailable: AtomicBool::new(false),
            data: RwLock::new(StoredData { route, assignments }),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = (!latency.is_zero()).then_some(latency);
        self
    }

    /// Make every subsequent call fail, to exercise error paths.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    async fn simulate_io(&self) -> DomainResult<()> {
        if let Some(base) = self.latency {
            let jitter_ms = rand::thread_rng().gen_range(0..=base.as_millis() as u64 / 2);
            tokio::time::sleep(base + Duration::from_millis(jitter_ms)).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::InfrastructureError(
                "storage unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    fn client_id(&self) -> &str {
        &self.client_id
    }

    async fn get_route(&self) -> DomainResult<Option<Route>> {
        self.simulate_io().await?;
        Ok(self.data.read().await.route.clone())
    }

    async fn get_assignments(&self) -> DomainResult<Vec<Assignment>> {
        self.simulate_io().await?;
        Ok(self.data.read().await.assignments.clone())
    }

    async fn put_assignments(&self, assignments: Vec<Assignment>) -> DomainResult<()> {
        self.simulate_io().await?;
        tracing::debug!("storing {} assignments", assignments.len());
        self.data.write().await.assignments = assignments;
        Ok(())
    }

    async fn update_assignments(&self, update: AssignmentsUpdate) -> DomainResult<bool> {
        self.simulate_io().await?;
        let mut data = self.data.write().await;
        let mut working = data.assignments.clone();
        let changed = update(&mut working);
        if changed {
            data.assignments = working;
        }
        Ok(changed)
    }
}
