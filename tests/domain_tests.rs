use chrono::{TimeZone, Utc};
use fieldroute::common::AggregateRoot;
use fieldroute::domains::route::*;
use serde_json::json;

fn form(value: serde_json::Value) -> FormData {
    value.as_object().cloned().unwrap()
}

fn assignment(id: &str, task_ids: &[&str]) -> Assignment {
    Assignment {
        id: id.to_string(),
        client_id: "client-a".to_string(),
        title: format!("Stop {}", id),
        description: format!("Work at stop {}", id),
        location: Location { latitude: 52.52, longitude: 13.40 },
        status: WorkStatus::Pending,
        scheduled_time: Utc::now(),
        tasks: task_ids.iter().map(|t| Task::new(t, t, "")).collect(),
    }
}

fn route(assignment_ids: &[&str]) -> Route {
    Route {
        id: "route-1".to_string(),
        driver_id: "driver-1".to_string(),
        date: Utc::now(),
        status: WorkStatus::Pending,
        assignments: assignment_ids.iter().map(|s| s.to_string()).collect(),
    }
}

fn loaded_tracker() -> RouteTracker {
    let mut tracker = RouteTracker::new("tracker-1");
    tracker.set_route(route(&["A1", "A2"])).unwrap();
    tracker
        .set_assignments(vec![assignment("A1", &["T1", "T2"]), assignment("A2", &["T3"])])
        .unwrap();
    tracker
}

#[test]
fn test_two_task_completion_scenario() {
    let mut tracker = loaded_tracker();

    assert!(tracker.select_assignment("A1"));
    assert_eq!(tracker.selected_assignment().unwrap().id, "A1");

    assert!(tracker.select_task("T1"));
    assert_eq!(tracker.selected_task().unwrap().id, "T1");

    assert!(tracker.complete_task("T1", form(json!({"note": "ok"}))));
    let a1 = tracker.assignment("A1").unwrap();
    assert_eq!(a1.task("T1").unwrap().status, WorkStatus::Completed);
    assert_eq!(a1.status, WorkStatus::InProgress);

    assert!(tracker.complete_task("T2", form(json!({"note": "done"}))));
    let a1 = tracker.assignment("A1").unwrap();
    assert_eq!(a1.task("T2").unwrap().status, WorkStatus::Completed);
    assert_eq!(a1.status, WorkStatus::Completed);
    assert_eq!(
        a1.task("T2").unwrap().form_data.as_ref().unwrap()["note"],
        json!("done")
    );
}

#[test]
fn test_completing_every_task_completes_assignment() {
    let mut tracker = RouteTracker::new("tracker-1");
    let ids = ["T1", "T2", "T3", "T4"];
    tracker.set_assignments(vec![assignment("A1", &ids)]).unwrap();
    tracker.select_assignment("A1");

    for (n, id) in ids.iter().enumerate() {
        assert_eq!(
            tracker.assignment("A1").unwrap().status,
            if n == 0 { WorkStatus::Pending } else { WorkStatus::InProgress }
        );
        tracker.complete_task(id, FormData::new());
    }
    assert_eq!(tracker.assignment("A1").unwrap().status, WorkStatus::Completed);
}

#[test]
fn test_untouched_assignment_stays_pending() {
    let mut tracker = loaded_tracker();
    tracker.select_assignment("A1");
    tracker.complete_task("T1", FormData::new());
    assert_eq!(tracker.assignment("A2").unwrap().status, WorkStatus::Pending);
    assert!(tracker.assignment("A2").unwrap().tasks[0].form_data.is_none());
}

#[test]
fn test_task_outside_selected_assignment_is_not_selectable() {
    let mut tracker = loaded_tracker();
    tracker.select_assignment("A1");
    assert!(!tracker.select_task("T3"));
    assert!(tracker.selected_task().is_none());
    assert!(matches!(
        tracker.try_select_task("T3"),
        Err(fieldroute::DomainError::TaskNotFound { .. })
    ));
}

#[test]
fn test_select_task_without_assignment_is_noop() {
    let mut tracker = loaded_tracker();
    let version = tracker.version();
    assert!(!tracker.select_task("T1"));
    assert!(tracker.selected_task_id().is_none());
    assert_eq!(tracker.version(), version);
}

#[test]
fn test_unknown_assignment_clears_selection() {
    let mut tracker = loaded_tracker();
    tracker.select_assignment("A1");
    tracker.select_task("T1");
    assert!(!tracker.select_assignment("missing"));
    assert!(tracker.selected_assignment().is_none());
    assert!(tracker.selected_task().is_none());
}

#[test]
fn test_selecting_assignment_resets_task_selection() {
    let mut tracker = loaded_tracker();
    tracker.select_assignment("A1");
    tracker.select_task("T1");
    tracker.select_assignment("A2");
    assert!(tracker.selected_task_id().is_none());
}

#[test]
fn test_complete_without_selection_leaves_collection_unchanged() {
    let mut tracker = loaded_tracker();
    let before = tracker.assignments().to_vec();
    assert!(!tracker.complete_task("T1", form(json!({"note": "ok"}))));
    assert_eq!(tracker.assignments(), before.as_slice());
}

#[test]
fn test_completing_twice_keeps_last_form_data() {
    let mut tracker = loaded_tracker();
    tracker.select_assignment("A1");
    tracker.complete_task("T1", form(json!({"note": "first"})));
    let status = tracker.assignment("A1").unwrap().status;

    tracker.complete_task("T1", form(json!({"note": "second"})));
    let a1 = tracker.assignment("A1").unwrap();
    assert_eq!(a1.status, status);
    assert_eq!(
        a1.task("T1").unwrap().form_data.as_ref().unwrap()["note"],
        json!("second")
    );
}

#[test]
fn test_clear_selection_keeps_data() {
    let mut tracker = loaded_tracker();
    tracker.select_assignment("A1");
    tracker.select_task("T1");
    tracker.complete_task("T1", FormData::new());
    tracker.clear_selection();

    assert!(tracker.selected_assignment().is_none());
    assert!(tracker.selected_task().is_none());
    assert_eq!(tracker.assignment("A1").unwrap().completed_tasks(), 1);

    let last = tracker.uncommitted_events().last().unwrap();
    assert_eq!(fieldroute::common::DomainEvent::event_type(last), "SelectionCleared");

    let replayed = fieldroute::common::load_from_history(
        RouteTracker::new("tracker-1"),
        tracker.uncommitted_events().to_vec(),
    )
    .unwrap();
    assert_eq!(replayed.version(), tracker.version());
    assert!(replayed.selected_assignment_id().is_none());
}

#[test]
fn test_clear_selection_without_selection_records_nothing() {
    let mut tracker = loaded_tracker();
    let version = tracker.version();
    tracker.clear_selection();
    assert_eq!(tracker.version(), version);
}

#[test]
fn test_duplicate_ids_resolve_to_first_match() {
    let mut tracker = RouteTracker::new("tracker-1");
    let mut second = assignment("A1", &["T9"]);
    second.title = "Duplicate".to_string();
    tracker
        .set_assignments(vec![assignment("A1", &["T1"]), second])
        .unwrap();
    tracker.select_assignment("A1");
    assert_eq!(tracker.selected_assignment().unwrap().title, "Stop A1");
    assert!(!tracker.select_task("T9"));
}

#[test]
fn test_route_status_follows_assignments() {
    let mut tracker = loaded_tracker();
    tracker.select_assignment("A1");
    tracker.complete_task("T1", FormData::new());
    assert_eq!(tracker.current_route().unwrap().status, WorkStatus::InProgress);

    tracker.complete_task("T2", FormData::new());
    tracker.select_assignment("A2");
    tracker.complete_task("T3", FormData::new());
    assert_eq!(tracker.current_route().unwrap().status, WorkStatus::Completed);
    assert!(tracker.is_route_finished());
}

#[test]
fn test_route_status_untouched_when_no_listed_assignment_loaded() {
    let mut tracker = RouteTracker::new("tracker-1");
    tracker.set_route(route(&["Z"])).unwrap();
    tracker.set_assignments(vec![assignment("A", &["T"])]).unwrap();
    tracker.mark_events_as_committed();

    assert!(tracker.select_assignment("A"));
    assert!(tracker.complete_task("T", FormData::new()));

    assert_eq!(tracker.assignment("A").unwrap().status, WorkStatus::Completed);
    assert_eq!(tracker.current_route().unwrap().status, WorkStatus::Pending);
    assert!(!tracker
        .uncommitted_events()
        .iter()
        .any(|e| fieldroute::common::DomainEvent::event_type(e) == "RouteStatusChanged"));
}

#[test]
fn test_set_assignments_replaces_collection() {
    let mut tracker = loaded_tracker();
    tracker.set_assignments(vec![assignment("B1", &["X"])]).unwrap();
    assert_eq!(tracker.assignments().len(), 1);
    assert!(tracker.assignment("A1").is_none());
}

#[test]
fn test_events_recorded_for_completion() {
    let mut tracker = loaded_tracker();
    tracker.mark_events_as_committed();
    tracker.select_assignment("A1");
    tracker.complete_task("T1", FormData::new());

    let kinds: Vec<&str> = tracker
        .uncommitted_events()
        .iter()
        .map(|e| fieldroute::common::DomainEvent::event_type(e))
        .collect();
    assert_eq!(
        kinds,
        vec![
            "AssignmentSelected",
            "TaskCompleted",
            "AssignmentStatusChanged",
            "RouteStatusChanged"
        ]
    );
}

#[test]
fn test_progress_projection() {
    let mut tracker = loaded_tracker();
    tracker.select_assignment("A1");
    tracker.complete_task("T1", FormData::new());
    tracker.complete_task("T2", FormData::new());

    let progress = RouteProgress::from_tracker(&tracker);
    assert_eq!(progress.route_id.as_deref(), Some("route-1"));
    assert_eq!(progress.total_assignments, 2);
    assert_eq!(progress.completed_assignments, 1);
    assert_eq!(progress.total_tasks, 3);
    assert_eq!(progress.completed_tasks, 2);
    assert_eq!(progress.next_assignment_id.as_deref(), Some("A2"));
}

#[test]
fn test_assignment_query_filters_and_sorts() {
    let mut tracker = RouteTracker::new("tracker-1");
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let mut early = assignment("A1", &["T1"]);
    early.title = "Pickup from Oak Ave".to_string();
    early.scheduled_time = now + chrono::Duration::hours(1);
    let mut late = assignment("A2", &["T2"]);
    late.title = "Delivery to Main St".to_string();
    late.scheduled_time = now + chrono::Duration::hours(3);
    let mut next_day = assignment("A3", &["T3"]);
    next_day.scheduled_time = now + chrono::Duration::days(1);
    tracker.set_assignments(vec![late, next_day, early]).unwrap();

    let all = list_assignments(&tracker, &AssignmentQuery::default(), now);
    let ids: Vec<&str> = all.iter().map(|r| r.assignment_id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "A2", "A3"]);
    assert_eq!(all[0].day_label, "Today");
    assert_eq!(all[2].day_label, "Tomorrow");

    let query = AssignmentQuery {
        order: SortOrder::Descending,
        ..Default::default()
    };
    let rows = list_assignments(&tracker, &query, now);
    let ids: Vec<&str> = rows.iter().map(|r| r.assignment_id.as_str()).collect();
    assert_eq!(ids, vec!["A3", "A2", "A1"]);

    let query = AssignmentQuery {
        search: Some("main".to_string()),
        ..Default::default()
    };
    let rows = list_assignments(&tracker, &query, now);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].assignment_id, "A2");

    let query = AssignmentQuery {
        scheduled_today: true,
        order: SortOrder::Descending,
        ..Default::default()
    };
    let rows = list_assignments(&tracker, &query, now);
    let ids: Vec<&str> = rows.iter().map(|r| r.assignment_id.as_str()).collect();
    assert_eq!(ids, vec!["A2", "A1"]);

    let query = AssignmentQuery {
        status: Some(WorkStatus::Completed),
        ..Default::default()
    };
    assert!(list_assignments(&tracker, &query, now).is_empty());
}
