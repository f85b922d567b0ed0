use super::events::RouteTrackerEvent;
use super::types::{Assignment, FormData, Route, Task, WorkStatus};
use crate::common::{AggregateRoot, DomainError, DomainResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// In-memory owner of the current route, its assignments and the transient
/// assignment/task selection used to scope a completion.
///
/// Selection is held by identifier and always resolved against the current
/// assignment collection. Lookups use first-match order, so callers are
/// expected to supply unique identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTracker {
    pub id: String,
    current_route: Option<Route>,
    assignments: Vec<Assignment>,
    selected_assignment_id: Option<String>,
    selected_task_id: Option<String>,
    pub version: u64,
    #[serde(skip)]
    uncommitted_events: Vec<RouteTrackerEvent>,
}

impl RouteTracker {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            current_route: None,
            assignments: Vec::new(),
            selected_assignment_id: None,
            selected_task_id: None,
            version: 0,
            uncommitted_events: Vec::new(),
        }
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.current_route.as_ref()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn assignment(&self, assignment_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == assignment_id)
    }

    pub fn selected_assignment_id(&self) -> Option<&str> {
        self.selected_assignment_id.as_deref()
    }

    pub fn selected_task_id(&self) -> Option<&str> {
        self.selected_task_id.as_deref()
    }

    pub fn selected_assignment(&self) -> Option<&Assignment> {
        self.selected_assignment_id
            .as_deref()
            .and_then(|id| self.assignment(id))
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let assignment = self.selected_assignment()?;
        self.selected_task_id
            .as_deref()
            .and_then(|id| assignment.task(id))
    }

    /// Replace the current route. Prior state is overwritten, never merged.
    pub fn set_route(&mut self, route: Route) -> DomainResult<()> {
        if route.id.trim().is_empty() {
            return Err(DomainError::InvalidCommand {
                reason: "Route identifier must not be empty".to_string(),
            });
        }
        self.record(RouteTrackerEvent::RouteLoaded {
            tracker_id: self.id.clone(),
            route,
            timestamp: Utc::now(),
        })
    }

    /// Replace the whole assignment collection.
    pub fn set_assignments(&mut self, assignments: Vec<Assignment>) -> DomainResult<()> {
        self.record(RouteTrackerEvent::AssignmentsLoaded {
            tracker_id: self.id.clone(),
            assignments,
            timestamp: Utc::now(),
        })
    }

    /// Select an assignment and drop any task selection. A miss leaves the
    /// selection empty. Returns whether the assignment was found.
    pub fn select_assignment(&mut self, assignment_id: &str) -> bool {
        self.try_select_assignment(assignment_id).is_ok()
    }

    pub fn try_select_assignment(&mut self, assignment_id: &str) -> DomainResult<()> {
        let found = self.assignment(assignment_id).map(|a| a.id.clone());
        self.record(RouteTrackerEvent::AssignmentSelected {
            tracker_id: self.id.clone(),
            assignment_id: found.clone(),
            timestamp: Utc::now(),
        })?;
        match found {
            Some(_) => Ok(()),
            None => Err(DomainError::AssignmentNotFound {
                id: assignment_id.to_string(),
            }),
        }
    }

    /// Select a task within the selected assignment. Without a selected
    /// assignment nothing changes; a miss clears the task selection.
    pub fn select_task(&mut self, task_id: &str) -> bool {
        self.try_select_task(task_id).is_ok()
    }

    pub fn try_select_task(&mut self, task_id: &str) -> DomainResult<()> {
        let assignment = self
            .selected_assignment()
            .ok_or(DomainError::NoAssignmentSelected)?;
        let found = assignment.task(task_id).map(|t| t.id.clone());
        self.record(RouteTrackerEvent::TaskSelected {
            tracker_id: self.id.clone(),
            task_id: found.clone(),
            timestamp: Utc::now(),
        })?;
        match found {
            Some(_) => Ok(()),
            None => Err(DomainError::TaskNotFound {
                id: task_id.to_string(),
            }),
        }
    }

    /// Complete a task of the selected assignment, storing `form_data`
    /// verbatim, then recompute assignment and route status.
    /// Returns false (and changes nothing) when there is no selected
    /// assignment or the task is not part of it.
    pub fn complete_task(&mut self, task_id: &str, form_data: FormData) -> bool {
        match self.try_complete_task(task_id, form_data) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("complete_task({}) ignored: {}", task_id, e);
                false
            }
        }
    }

    pub fn try_complete_task(&mut self, task_id: &str, form_data: FormData) -> DomainResult<()> {
        let assignment = self
            .selected_assignment()
            .ok_or(DomainError::NoAssignmentSelected)?;
        if assignment.task(task_id).is_none() {
            return Err(DomainError::TaskNotFound {
                id: task_id.to_string(),
            });
        }
        let assignment_id = assignment.id.clone();
        let old_status = assignment.status;

        self.record(RouteTrackerEvent::TaskCompleted {
            tracker_id: self.id.clone(),
            assignment_id: assignment_id.clone(),
            task_id: task_id.to_string(),
            form_data,
            timestamp: Utc::now(),
        })?;

        let new_status = self
            .assignment(&assignment_id)
            .map(Assignment::derive_status)
            .unwrap_or(old_status);
        if new_status != old_status {
            self.record(RouteTrackerEvent::AssignmentStatusChanged {
                tracker_id: self.id.clone(),
                assignment_id,
                old_status,
                new_status,
                timestamp: Utc::now(),
            })?;
        }

        self.refresh_route_status()
    }

    /// Clear both selections; data is untouched.
    pub fn clear_selection(&mut self) {
        if self.selected_assignment_id.is_none() && self.selected_task_id.is_none() {
            return;
        }
        let event = RouteTrackerEvent::SelectionCleared {
            tracker_id: self.id.clone(),
            timestamp: Utc::now(),
        };
        if let Err(e) = self.record(event) {
            tracing::debug!("clear_selection ignored: {}", e);
        }
    }

    fn refresh_route_status(&mut self) -> DomainResult<()> {
        let Some(route) = self.current_route.as_ref() else {
            return Ok(());
        };
        match route.derive_status(&self.assignments) {
            Some(new_status) if new_status != route.status => {
                let route_id = route.id.clone();
                self.record(RouteTrackerEvent::RouteStatusChanged {
                    tracker_id: self.id.clone(),
                    route_id,
                    new_status,
                    timestamp: Utc::now(),
                })
            }
            _ => Ok(()),
        }
    }

    /// True when every loaded assignment is completed.
    pub fn is_route_finished(&self) -> bool {
        !self.assignments.is_empty()
            && self
                .assignments
                .iter()
                .all(|a| a.status == WorkStatus::Completed)
    }
}

impl AggregateRoot for RouteTracker {
    type Event = RouteTrackerEvent;

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
        match event {
            RouteTrackerEvent::RouteLoaded { route, .. } => {
                self.current_route = Some(route.clone());
            }
            RouteTrackerEvent::AssignmentsLoaded { assignments, .. } => {
                self.assignments = assignments.clone();
            }
            RouteTrackerEvent::AssignmentSelected { assignment_id, .. } => {
                self.selected_assignment_id = assignment_id.clone();
                self.selected_task_id = None;
            }
            RouteTrackerEvent::TaskSelected { task_id, .. } => {
                self.selected_task_id = task_id.clone();
            }
            RouteTrackerEvent::TaskCompleted {
                assignment_id,
                task_id,
                form_data,
                ..
            } => {
                let task = self
                    .assignments
                    .iter_mut()
                    .find(|a| &a.id == assignment_id)
                    .ok_or_else(|| DomainError::AssignmentNotFound {
                        id: assignment_id.clone(),
                    })?
                    .task_mut(task_id)
                    .ok_or_else(|| DomainError::TaskNotFound { id: task_id.clone() })?;
                task.complete(form_data.clone());
            }
            RouteTrackerEvent::AssignmentStatusChanged {
                assignment_id,
                new_status,
                ..
            } => {
                if let Some(a) = self.assignments.iter_mut().find(|a| &a.id == assignment_id) {
                    a.status = *new_status;
                }
            }
            RouteTrackerEvent::RouteStatusChanged {
                route_id,
                new_status,
                ..
            } => {
                if let Some(route) = self.current_route.as_mut().filter(|r| &r.id == route_id) {
                    route.status = *new_status;
                }
            }
            RouteTrackerEvent::SelectionCleared { .. } => {
                self.selected_assignment_id = None;
                self.selected_task_id = None;
            }
        }
        self.version += 1;
        Ok(())
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn add_event(&mut self, event: Self::Event) {
        self.uncommitted_events.push(event);
    }
}
