use super::aggregate::RouteTracker;
use super::schedule::{is_today, is_tomorrow, time_remaining};
use super::types::{Assignment, WorkStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress overview for the current route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteProgress {
    pub route_id: Option<String>,
    pub route_status: Option<WorkStatus>,
    pub total_assignments: usize,
    pub completed_assignments: usize,
    pub in_progress_assignments: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// First assignment, in route order, that is not completed yet.
    pub next_assignment_id: Option<String>,
}

impl RouteProgress {
    pub fn from_tracker(tracker: &RouteTracker) -> Self {
        let assignments = tracker.assignments();
        let route = tracker.current_route();

        let next_assignment_id = match route {
            Some(r) => r
                .assignments
                .iter()
                .filter_map(|id| tracker.assignment(id))
                .find(|a| a.status != WorkStatus::Completed)
                .map(|a| a.id.clone()),
            None => None,
        }
        .or_else(|| {
            assignments
                .iter()
                .find(|a| a.status != WorkStatus::Completed)
                .map(|a| a.id.clone())
        });

        Self {
            route_id: route.map(|r| r.id.clone()),
            route_status: route.map(|r| r.status),
            total_assignments: assignments.len(),
            completed_assignments: count_status(assignments, WorkStatus::Completed),
            in_progress_assignments: count_status(assignments, WorkStatus::InProgress),
            total_tasks: assignments.iter().map(|a| a.tasks.len()).sum(),
            completed_tasks: assignments.iter().map(Assignment::completed_tasks).sum(),
            next_assignment_id,
        }
    }

    pub fn percent_complete(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        self.completed_tasks as f64 * 100.0 / self.total_tasks as f64
    }
}

fn count_status(assignments: &[Assignment], status: WorkStatus) -> usize {
    assignments.iter().filter(|a| a.status == status).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Filter and sort options for the assignment list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentQuery {
    pub search: Option<String>,
    pub status: Option<WorkStatus>,
    /// Only assignments scheduled on the same calendar day as `now`.
    pub scheduled_today: bool,
    pub order: SortOrder,
}

impl AssignmentQuery {
    pub fn matches(&self, assignment: &Assignment, now: DateTime<Utc>) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                assignment.title.to_lowercase().contains(&q)
                    || assignment.description.to_lowercase().contains(&q)
            }
            _ => true,
        };
        let matches_status = self.status.map_or(true, |s| assignment.status == s);
        let matches_day = !self.scheduled_today || is_today(assignment.scheduled_time, now);
        matches_search && matches_status && matches_day
    }
}

/// One row of the assignment list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSummary {
    pub assignment_id: String,
    pub title: String,
    pub status: WorkStatus,
    pub scheduled_time: DateTime<Utc>,
    /// "Today", "Tomorrow" or the calendar date.
    pub day_label: String,
    pub time_remaining: String,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

impl AssignmentSummary {
    pub fn new(assignment: &Assignment, now: DateTime<Utc>) -> Self {
        Self {
            assignment_id: assignment.id.clone(),
            title: assignment.title.clone(),
            status: assignment.status,
            scheduled_time: assignment.scheduled_time,
            day_label: day_label(assignment.scheduled_time, now),
            time_remaining: time_remaining(assignment.scheduled_time, now),
            completed_tasks: assignment.completed_tasks(),
            total_tasks: assignment.tasks.len(),
        }
    }
}

fn day_label(scheduled: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if is_today(scheduled, now) {
        "Today".to_string()
    } else if is_tomorrow(scheduled, now) {
        "Tomorrow".to_string()
    } else {
        scheduled.format("%b %-d, %Y").to_string()
    }
}

/// Filtered assignment list sorted by scheduled time.
pub fn list_assignments(
    tracker: &RouteTracker,
    query: &AssignmentQuery,
    now: DateTime<Utc>,
) -> Vec<AssignmentSummary> {
    let mut rows: Vec<AssignmentSummary> = tracker
        .assignments()
        .iter()
        .filter(|a| query.matches(a, now))
        .map(|a| AssignmentSummary::new(a, now))
        .collect();
    rows.sort_by(|a, b| match query.order {
        SortOrder::Ascending => a.scheduled_time.cmp(&b.scheduled_time),
        SortOrder::Descending => b.scheduled_time.cmp(&a.scheduled_time),
    });
    rows
}
