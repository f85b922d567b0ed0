use crate::domains::logger::DynLogger;
use crate::domains::route::{
    Assignment, AssignmentsUpdate, FormData, Route, RouteService, StorageService,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Route service that reads and writes through a `StorageService` instead
/// of a remote API. Only assignments of the storage's client are visible.
pub struct MockRouteService {
    storage: Arc<dyn StorageService>,
    logger: DynLogger,
}

impl MockRouteService {
    pub fn new(storage: Arc<dyn StorageService>, logger: DynLogger) -> Self {
        Self { storage, logger }
    }
}

#[async_trait]
impl RouteService for MockRouteService {
    async fn get_current_route(&self) -> Option<Route> {
        match self.storage.get_route().await {
            Ok(route) => route,
            Err(e) => {
                self.logger.error(&format!("Error fetching current route: {}", e));
                None
            }
        }
    }

    async fn get_assignments(&self, route_id: &str) -> Vec<Assignment> {
        match self.storage.get_assignments().await {
            Ok(all) => {
                let client_id = self.storage.client_id();
                let visible: Vec<Assignment> =
                    all.into_iter().filter(|a| a.client_id == client_id).collect();
                self.logger.info(&format!(
                    "Loaded {} assignments for route {} (client {})",
                    visible.len(),
                    route_id,
                    client_id
                ));
                visible
            }
            Err(e) => {
                self.logger.error(&format!("Error fetching assignments: {}", e));
                Vec::new()
            }
        }
    }

    async fn complete_task(&self, assignment_id: &str, task_id: &str, form_data: FormData) -> bool {
        let target_assignment = assignment_id.to_string();
        let target_task = task_id.to_string();
        let update: AssignmentsUpdate = Box::new(move |assignments: &mut Vec<Assignment>| {
            assignments
                .iter_mut()
                .find(|a| a.id == target_assignment)
                .map(|a| a.complete_task(&target_task, form_data))
                .unwrap_or(false)
        });

        match self.storage.update_assignments(update).await {
            Ok(true) => true,
            Ok(false) => {
                self.logger.warn(&format!(
                    "Task {} not found in assignment {}",
                    task_id, assignment_id
                ));
                false
            }
            Err(e) => {
                self.logger.error(&format!("Error completing task: {}", e));
                false
            }
        }
    }

    async fn upload_task_photo(
        &self,
        assignment_id: &str,
        task_id: &str,
        photo_uri: &str,
    ) -> Option<String> {
        // No upload target yet; the local URI doubles as the stored reference.
        self.logger.info(&format!(
            "Photo for {}/{} kept locally at {}",
            assignment_id, task_id, photo_uri
        ));
        Some(photo_uri.to_string())
    }
}
