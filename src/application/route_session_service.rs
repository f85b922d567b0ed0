use super::container::ServiceContainer;
use crate::common::{
    load_from_history, AggregateRoot, ApplicationError, ApplicationResult, DomainError,
    EventEnvelope, EventMetadata, EventStore,
};
use crate::domains::logger::DynLogger;
use crate::domains::route::{
    list_assignments, validate_task_submission, AssignmentQuery, AssignmentSummary, FormData,
    RouteProgress, RouteService, RouteTracker, RouteTrackerEvent, WorkStatus,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const AGGREGATE_TYPE: &str = "RouteTracker";

/// Outcome of a successful form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSubmission {
    pub assignment_id: String,
    pub task_id: String,
    pub assignment_status: WorkStatus,
    pub route_finished: bool,
}

/// One driver's working session: owns the tracker, talks to the route
/// service and journals every tracker event.
pub struct RouteSessionService {
    tracker: RouteTracker,
    route_service: Arc<dyn RouteService>,
    event_store: Arc<dyn EventStore + Send + Sync>,
    logger: DynLogger,
    validate_submissions: bool,
    committed_version: u64,
    correlation_id: Uuid,
}

impl RouteSessionService {
    pub fn new(container: &ServiceContainer) -> Self {
        let tracker_id = format!("route-session:{}", container.config.client.driver_id);
        Self {
            tracker: RouteTracker::new(tracker_id),
            route_service: container.route_service(),
            event_store: container.event_store(),
            logger: container.logger.clone(),
            validate_submissions: container.config.forms.validate_submissions,
            committed_version: 0,
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Rebuild the session from the journal in the container's event store.
    pub async fn resume(container: &ServiceContainer) -> ApplicationResult<Self> {
        let mut session = Self::new(container);
        let envelopes = session
            .event_store
            .load_events(&session.tracker.id, 0)
            .await
            .map_err(ApplicationError::EventStore)?;
        let events = envelopes
            .iter()
            .map(EventEnvelope::decode::<RouteTrackerEvent>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DomainError::from)?;
        session.committed_version = events.len() as u64;
        session.tracker = load_from_history(session.tracker, events)?;
        session.logger.info(&format!(
            "Resumed {} from {} journaled events",
            session.tracker.id, session.committed_version
        ));
        Ok(session)
    }

    pub fn tracker(&self) -> &RouteTracker {
        &self.tracker
    }

    /// Fetch the current route and its assignments into the tracker.
    /// Returns false when the route service has no route for the driver.
    pub async fn load_current_route(&mut self) -> ApplicationResult<bool> {
        let Some(route) = self.route_service.get_current_route().await else {
            self.logger.warn("No current route available");
            return Ok(false);
        };
        let assignments = self.route_service.get_assignments(&route.id).await;
        self.logger.info(&format!(
            "Route {} loaded with {} assignments",
            route.id,
            assignments.len()
        ));
        self.tracker.set_route(route)?;
        self.tracker.set_assignments(assignments)?;
        self.commit().await?;
        Ok(true)
    }

    pub fn select_assignment(&mut self, assignment_id: &str) -> bool {
        let found = self.tracker.select_assignment(assignment_id);
        if !found {
            self.logger.warn(&format!("Assignment {} not found", assignment_id));
        }
        found
    }

    pub fn select_task(&mut self, task_id: &str) -> bool {
        let found = self.tracker.select_task(task_id);
        if !found {
            self.logger.warn(&format!("Task {} not selectable", task_id));
        }
        found
    }

    pub fn clear_selection(&mut self) {
        self.tracker.clear_selection();
    }

    /// Submit the form of the selected task: validate, complete locally,
    /// report to the route service, then clear the selection.
    ///
    /// When the route service rejects the completion the local state stays
    /// completed and the selection is kept so the caller can retry.
    pub async fn submit_task_form(&mut self, form_data: FormData) -> ApplicationResult<TaskSubmission> {
        let assignment = self
            .tracker
            .selected_assignment()
            .ok_or(DomainError::NoAssignmentSelected)?;
        let task = self
            .tracker
            .selected_task()
            .ok_or(DomainError::NoTaskSelected)?;
        let assignment_id = assignment.id.clone();
        let task_id = task.id.clone();

        if self.validate_submissions {
            validate_task_submission(task, &form_data).map_err(DomainError::FormValidation)?;
        }

        self.tracker.try_complete_task(&task_id, form_data.clone())?;

        let persisted = self
            .route_service
            .complete_task(&assignment_id, &task_id, form_data)
            .await;
        if !persisted {
            self.commit().await?;
            self.logger.error(&format!(
                "Remote completion of {}/{} failed",
                assignment_id, task_id
            ));
            return Err(ApplicationError::Remote {
                operation: format!("complete_task({}, {})", assignment_id, task_id),
            });
        }

        let assignment_status = self
            .tracker
            .assignment(&assignment_id)
            .map(|a| a.status)
            .unwrap_or_default();
        self.tracker.clear_selection();
        self.commit().await?;

        self.logger.info(&format!(
            "Task {} completed, assignment {} is {}",
            task_id, assignment_id, assignment_status
        ));
        Ok(TaskSubmission {
            assignment_id,
            task_id,
            assignment_status,
            route_finished: self.tracker.is_route_finished(),
        })
    }

    /// Upload a photo for the selected task; returns the stored reference.
    pub async fn upload_task_photo(&self, photo_uri: &str) -> ApplicationResult<String> {
        let assignment_id = self
            .tracker
            .selected_assignment_id()
            .ok_or(DomainError::NoAssignmentSelected)?;
        let task_id = self
            .tracker
            .selected_task()
            .map(|t| t.id.as_str())
            .ok_or(DomainError::NoTaskSelected)?;
        self.route_service
            .upload_task_photo(assignment_id, task_id, photo_uri)
            .await
            .ok_or_else(|| ApplicationError::Remote {
                operation: format!("upload_task_photo({}, {})", assignment_id, task_id),
            })
    }

    pub fn progress(&self) -> RouteProgress {
        RouteProgress::from_tracker(&self.tracker)
    }

    pub fn assignments(&self, query: &AssignmentQuery) -> Vec<AssignmentSummary> {
        list_assignments(&self.tracker, query, Utc::now())
    }

    /// Append the tracker's uncommitted events to the journal.
    pub async fn commit(&mut self) -> ApplicationResult<()> {
        let pending = self.tracker.uncommitted_events();
        if pending.is_empty() {
            return Ok(());
        }

        let metadata = EventMetadata {
            correlation_id: Some(self.correlation_id),
            user_id: Some(self.tracker.id.clone()),
            source: "RouteSessionService".to_string(),
        };
        let envelopes = pending
            .iter()
            .enumerate()
            .map(|(i, event)| {
                EventEnvelope::new(
                    event,
                    AGGREGATE_TYPE,
                    self.committed_version + i as u64 + 1,
                    metadata.clone(),
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(DomainError::from)?;
        let count = envelopes.len() as u64;

        self.event_store
            .append_events(&self.tracker.id, self.committed_version, envelopes)
            .await
            .map_err(ApplicationError::EventStore)?;

        self.committed_version += count;
        self.tracker.mark_events_as_committed();
        tracing::debug!(
            "committed {} events for {} (journal at {})",
            count,
            self.tracker.id,
            self.committed_version
        );
        Ok(())
    }
}
