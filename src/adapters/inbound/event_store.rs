use crate::common::{EventEnvelope, EventStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory journal of tracker events, keyed by tracker id.
/// Appends are rejected unless `expected_version` equals the stored count.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<String, Vec<EventEnvelope>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, aggregate_id: &str) -> usize {
        self.events
            .read()
            .await
            .get(aggregate_id)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append_events(
        &self,
        aggregate_id: &str,
        expected_version: u64,
        events: Vec<EventEnvelope>,
    ) -> Result<(), String> {
        let mut store = self.events.write().await;
        let stream = store.entry(aggregate_id.to_string()).or_default();

        let current_version = stream.len() as u64;
        if current_version != expected_version {
            return Err(format!(
                "Version mismatch for {}: expected {}, got {}",
                aggregate_id, expected_version, current_version
            ));
        }

        stream.extend(events);
        Ok(())
    }

    async fn load_events(
        &self,
        aggregate_id: &str,
        from_version: u64,
    ) -> Result<Vec<EventEnvelope>, String> {
        let store = self.events.read().await;
        Ok(store
            .get(aggregate_id)
            .map(|events| events.iter().skip(from_version as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn load_events_by_type(
        &self,
        event_type: &str,
        from_timestamp: Option<DateTime<Utc>>,
    ) -> Result<Vec<EventEnvelope>, String> {
        let store = self.events.read().await;
        let mut matching: Vec<EventEnvelope> = store
            .values()
            .flatten()
            .filter(|e| e.event_type == event_type)
            .filter(|e| from_timestamp.map_or(true, |ts| e.occurred_at >= ts))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at));
        Ok(matching)
    }
}
