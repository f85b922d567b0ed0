use super::types::{Assignment, FormData, Route};
use crate::common::DomainResult;
use async_trait::async_trait;

/// Read-modify-write step over the stored assignments. Returns whether
/// anything changed; `false` leaves the store as it was.
pub type AssignmentsUpdate = Box<dyn FnOnce(&mut Vec<Assignment>) -> bool + Send>;

/// Port for the device-local store the route service reads through.
/// Typed accessors replace lookups by string key.
#[async_trait]
pub trait StorageService: Send + Sync {
    fn client_id(&self) -> &str;
    async fn get_route(&self) -> DomainResult<Option<Route>>;
    async fn get_assignments(&self) -> DomainResult<Vec<Assignment>>;
    async fn put_assignments(&self, assignments: Vec<Assignment>) -> DomainResult<()>;
    /// Apply `update` atomically with respect to other writers.
    async fn update_assignments(&self, update: AssignmentsUpdate) -> DomainResult<bool>;
}

/// Port for loading a driver's route and reporting completed work.
/// Implementations swallow their own I/O failures and report them through
/// the empty/`false` results.
#[async_trait]
pub trait RouteService: Send + Sync {
    async fn get_current_route(&self) -> Option<Route>;
    async fn get_assignments(&self, route_id: &str) -> Vec<Assignment>;
    async fn complete_task(&self, assignment_id: &str, task_id: &str, form_data: FormData) -> bool;
    async fn upload_task_photo(
        &self,
        assignment_id: &str,
        task_id: &str,
        photo_uri: &str,
    ) -> Option<String>;
}
