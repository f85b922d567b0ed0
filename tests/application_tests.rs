use async_trait::async_trait;
use fieldroute::adapters::outbound::{init_noop_logger, MockStorageService};
use fieldroute::application::{RouteSessionService, ServiceContainer};
use fieldroute::common::{ApplicationError, DomainError};
use fieldroute::domains::route::*;
use fieldroute::Config;
use serde_json::json;
use std::sync::Arc;

fn form(value: serde_json::Value) -> FormData {
    value.as_object().cloned().unwrap()
}

fn container() -> ServiceContainer {
    ServiceContainer::initialize(Config::default(), init_noop_logger())
}

async fn loaded_session(container: &ServiceContainer) -> RouteSessionService {
    let mut session = RouteSessionService::new(container);
    assert!(session.load_current_route().await.unwrap());
    session
}

#[tokio::test]
async fn test_load_filters_by_client() {
    let container = container();
    let session = loaded_session(&container).await;

    let tracker = session.tracker();
    assert_eq!(tracker.current_route().unwrap().id, "route-1");
    let ids: Vec<&str> = tracker.assignments().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["assignment-1", "assignment-2"]);
}

#[tokio::test]
async fn test_submit_completes_and_persists() {
    let container = container();
    let mut session = loaded_session(&container).await;

    session.select_assignment("assignment-1");
    session.select_task("task-1-1");
    let done = session
        .submit_task_form(form(json!({"address": "123 Main St"})))
        .await
        .unwrap();

    assert_eq!(done.assignment_status, WorkStatus::InProgress);
    assert!(!done.route_finished);
    assert!(session.tracker().selected_assignment().is_none());

    let stored = container.storage().get_assignments().await.unwrap();
    let task = stored[0].task("task-1-1").unwrap();
    assert_eq!(task.status, WorkStatus::Completed);
    assert_eq!(task.form_data.as_ref().unwrap()["address"], json!("123 Main St"));
    assert_eq!(stored[0].status, WorkStatus::InProgress);
}

#[tokio::test]
async fn test_submit_requires_selection() {
    let container = container();
    let mut session = loaded_session(&container).await;

    let err = session.submit_task_form(FormData::new()).await.unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::NoAssignmentSelected)
    ));

    session.select_assignment("assignment-1");
    let err = session.submit_task_form(FormData::new()).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::NoTaskSelected)));
}

#[tokio::test]
async fn test_invalid_form_is_rejected_without_changes() {
    let container = container();
    let mut session = loaded_session(&container).await;

    session.select_assignment("assignment-2");
    session.select_task("task-2-1");
    let err = session
        .submit_task_form(form(json!({"sender": "Ann", "items": "many"})))
        .await
        .unwrap_err();
    match err {
        ApplicationError::Domain(DomainError::FormValidation(errors)) => {
            assert_eq!(errors.get("items"), Some("Must be a number"));
        }
        other => panic!("Expected validation error, got {:?}", other),
    }
    let task = session.tracker().selected_task().unwrap();
    assert_eq!(task.status, WorkStatus::Pending);
}

#[tokio::test]
async fn test_validation_can_be_disabled() {
    let mut config = Config::default();
    config.forms.validate_submissions = false;
    let container = ServiceContainer::initialize(config, init_noop_logger());
    let mut session = loaded_session(&container).await;

    session.select_assignment("assignment-2");
    session.select_task("task-2-2");
    let done = session.submit_task_form(FormData::new()).await.unwrap();
    assert_eq!(done.task_id, "task-2-2");
}

#[tokio::test]
async fn test_full_route_finishes() {
    let container = container();
    let mut session = loaded_session(&container).await;

    let submissions = [
        ("assignment-1", "task-1-1", json!({"address": "123 Main St"})),
        ("assignment-1", "task-1-2", json!({"photo": "file:///p.jpg"})),
        ("assignment-2", "task-2-1", json!({"sender": "Ann", "items": 2})),
        ("assignment-2", "task-2-2", json!({"secured": true, "photo": "file:///q.jpg"})),
    ];
    let mut last = None;
    for (assignment_id, task_id, data) in submissions {
        assert!(session.select_assignment(assignment_id));
        assert!(session.select_task(task_id));
        last = Some(session.submit_task_form(form(data)).await.unwrap());
    }

    let last = last.unwrap();
    assert_eq!(last.assignment_status, WorkStatus::Completed);
    assert!(last.route_finished);

    let progress = session.progress();
    assert_eq!(progress.completed_assignments, 2);
    assert_eq!(progress.completed_tasks, 4);
    assert!(progress.next_assignment_id.is_none());
    assert_eq!(progress.percent_complete(), 100.0);
}

#[tokio::test]
async fn test_journal_resume_restores_state() {
    let container = container();
    let mut session = loaded_session(&container).await;
    session.select_assignment("assignment-1");
    session.select_task("task-1-1");
    session
        .submit_task_form(form(json!({"address": "123 Main St"})))
        .await
        .unwrap();

    let journal = container
        .event_store()
        .load_events_by_type("TaskCompleted", None)
        .await
        .unwrap();
    assert_eq!(journal.len(), 1);

    let resumed = RouteSessionService::resume(&container).await.unwrap();
    assert_eq!(resumed.tracker().assignments(), session.tracker().assignments());
    assert_eq!(
        resumed.tracker().current_route(),
        session.tracker().current_route()
    );
}

#[tokio::test]
async fn test_no_route_returns_false() {
    let storage = Arc::new(MockStorageService::with_data("client-a", None, vec![]));
    let container = ServiceContainer::with_storage(Config::default(), init_noop_logger(), storage);
    let mut session = RouteSessionService::new(&container);
    assert!(!session.load_current_route().await.unwrap());
    assert!(session.tracker().current_route().is_none());
}

struct RejectingRouteService {
    inner: Arc<dyn RouteService>,
}

#[async_trait]
impl RouteService for RejectingRouteService {
    async fn get_current_route(&self) -> Option<Route> {
        self.inner.get_current_route().await
    }

    async fn get_assignments(&self, route_id: &str) -> Vec<Assignment> {
        self.inner.get_assignments(route_id).await
    }

    async fn complete_task(&self, _: &str, _: &str, _: FormData) -> bool {
        false
    }

    async fn upload_task_photo(&self, _: &str, _: &str, _: &str) -> Option<String> {
        None
    }
}

#[tokio::test]
async fn test_remote_rejection_keeps_selection() {
    let base = container();
    let rejecting = Arc::new(RejectingRouteService {
        inner: base.route_service(),
    });
    let container = base.with_route_service(rejecting);
    let mut session = loaded_session(&container).await;

    session.select_assignment("assignment-1");
    session.select_task("task-1-1");
    assert!(session.upload_task_photo("file:///x.jpg").await.is_err());

    let err = session
        .submit_task_form(form(json!({"address": "123 Main St"})))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Remote { .. }));
    assert_eq!(session.tracker().selected_task_id(), Some("task-1-1"));
    assert_eq!(
        session.tracker().selected_task().unwrap().status,
        WorkStatus::Completed
    );
}

#[tokio::test]
async fn test_upload_photo_returns_reference() {
    let container = container();
    let mut session = loaded_session(&container).await;
    session.select_assignment("assignment-1");
    session.select_task("task-1-2");
    let reference = session.upload_task_photo("file:///door.jpg").await.unwrap();
    assert_eq!(reference, "file:///door.jpg");
}
