use crate::adapters::inbound::InMemoryEventStore;
use crate::adapters::outbound::{MockRouteService, MockStorageService};
use crate::common::EventStore;
use crate::config::Config;
use crate::domains::logger::DynLogger;
use crate::domains::route::{RouteService, StorageService};
use std::sync::Arc;
use std::time::Duration;

/// Typed service wiring for one client. Every collaborator is a concrete
/// field, so a missing registration is a compile error.
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Config,
    pub logger: DynLogger,
    pub storage: Arc<dyn StorageService>,
    pub route_service: Arc<dyn RouteService>,
    pub event_store: Arc<dyn EventStore + Send + Sync>,
}

impl ServiceContainer {
    /// Wire the mock storage and route service for the configured client.
    pub fn initialize(config: Config, logger: DynLogger) -> Self {
        let storage = MockStorageService::new(config.client.client_id.clone())
            .with_latency(Duration::from_millis(config.storage.latency_ms));
        Self::with_storage(config, logger, Arc::new(storage))
    }

    /// Same wiring over a caller-supplied store.
    pub fn with_storage(config: Config, logger: DynLogger, storage: Arc<dyn StorageService>) -> Self {
        let route_service: Arc<dyn RouteService> =
            Arc::new(MockRouteService::new(storage.clone(), logger.clone()));
        logger.info(&format!(
            "Services initialized for client {}",
            storage.client_id()
        ));
        Self {
            config,
            logger,
            storage,
            route_service,
            event_store: Arc::new(InMemoryEventStore::new()),
        }
    }

    pub fn with_route_service(mut self, route_service: Arc<dyn RouteService>) -> Self {
        self.route_service = route_service;
        self
    }

    pub fn route_service(&self) -> Arc<dyn RouteService> {
        self.route_service.clone()
    }

    pub fn storage(&self) -> Arc<dyn StorageService> {
        self.storage.clone()
    }

    pub fn event_store(&self) -> Arc<dyn EventStore + Send + Sync> {
        self.event_store.clone()
    }
}
