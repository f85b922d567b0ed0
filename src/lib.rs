pub mod adapters;
pub mod application;
pub mod common;
pub mod config;
pub mod domains;

pub use config::Config;

pub use common::{
    load_from_history, AggregateRoot, ApplicationError, ApplicationResult, DomainError,
    DomainEvent, DomainResult, EventEnvelope, EventMetadata, EventStore,
};
pub use domains::logger::{DomainLogger, DynLogger};
pub use domains::route::{
    Assignment, FormData, FormField, FormFieldKind, Location, Route, RouteService, RouteTracker,
    RouteTrackerEvent, StorageService, Task, WorkStatus,
};
