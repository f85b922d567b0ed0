use super::types::{Assignment, FormData, Route, WorkStatus};
use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RouteTrackerEvent {
    RouteLoaded {
        tracker_id: String,
        route: Route,
        timestamp: DateTime<Utc>,
    },
    AssignmentsLoaded {
        tracker_id: String,
        assignments: Vec<Assignment>,
        timestamp: DateTime<Utc>,
    },
    AssignmentSelected {
        tracker_id: String,
        assignment_id: Option<String>,
        timestamp: DateTime<Utc>,
    },
    TaskSelected {
        tracker_id: String,
        task_id: Option<String>,
        timestamp: DateTime<Utc>,
    },
    TaskCompleted {
        tracker_id: String,
        assignment_id: String,
        task_id: String,
        form_data: FormData,
        timestamp: DateTime<Utc>,
    },
    AssignmentStatusChanged {
        tracker_id: String,
        assignment_id: String,
        old_status: WorkStatus,
        new_status: WorkStatus,
        timestamp: DateTime<Utc>,
    },
    RouteStatusChanged {
        tracker_id: String,
        route_id: String,
        new_status: WorkStatus,
        timestamp: DateTime<Utc>,
    },
    SelectionCleared {
        tracker_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for RouteTrackerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RouteTrackerEvent::RouteLoaded { .. } => "RouteLoaded",
            RouteTrackerEvent::AssignmentsLoaded { .. } => "AssignmentsLoaded",
            RouteTrackerEvent::AssignmentSelected { .. } => "AssignmentSelected",
            RouteTrackerEvent::TaskSelected { .. } => "TaskSelected",
            RouteTrackerEvent::TaskCompleted { .. } => "TaskCompleted",
            RouteTrackerEvent::AssignmentStatusChanged { .. } => "AssignmentStatusChanged",
            RouteTrackerEvent::RouteStatusChanged { .. } => "RouteStatusChanged",
            RouteTrackerEvent::SelectionCleared { .. } => "SelectionCleared",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            RouteTrackerEvent::RouteLoaded { tracker_id, .. }
            | RouteTrackerEvent::AssignmentsLoaded { tracker_id, .. }
            | RouteTrackerEvent::AssignmentSelected { tracker_id, .. }
            | RouteTrackerEvent::TaskSelected { tracker_id, .. }
            | RouteTrackerEvent::TaskCompleted { tracker_id, .. }
            | RouteTrackerEvent::AssignmentStatusChanged { tracker_id, .. }
            | RouteTrackerEvent::RouteStatusChanged { tracker_id, .. }
            | RouteTrackerEvent::SelectionCleared { tracker_id, .. } => tracker_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            RouteTrackerEvent::RouteLoaded { timestamp, .. }
            | RouteTrackerEvent::AssignmentsLoaded { timestamp, .. }
            | RouteTrackerEvent::AssignmentSelected { timestamp, .. }
            | RouteTrackerEvent::TaskSelected { timestamp, .. }
            | RouteTrackerEvent::TaskCompleted { timestamp, .. }
            | RouteTrackerEvent::AssignmentStatusChanged { timestamp, .. }
            | RouteTrackerEvent::RouteStatusChanged { timestamp, .. }
            | RouteTrackerEvent::SelectionCleared { timestamp, .. } => *timestamp,
        }
    }
}
