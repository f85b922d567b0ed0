use fieldroute::adapters::outbound::init_combined_logger;
use fieldroute::application::{RouteSessionService, ServiceContainer};
use fieldroute::domains::route::{FormData, FormFieldKind, Task};
use fieldroute::Config;
use serde_json::Value;
use std::error::Error;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Fill every field of a task with a plausible value.
fn demo_form(task: &Task) -> FormData {
    task.form_fields
        .iter()
        .map(|field| {
            let value = match field.kind {
                FormFieldKind::Text => Value::from(format!("{} ok", field.label)),
                FormFieldKind::Number => Value::from(1),
                FormFieldKind::Select => field
                    .options
                    .as_ref()
                    .and_then(|o| o.first())
                    .map(|o| Value::from(o.as_str()))
                    .unwrap_or(Value::Null),
                FormFieldKind::Checkbox => Value::from(true),
                FormFieldKind::Photo => Value::from(format!("file:///demo/{}/{}.jpg", task.id, field.id)),
            };
            (field.id.clone(), value)
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("fieldroute.toml"));
    let config = Config::load(Some(&config_path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.filter.clone())),
        )
        .init();

    info!("Starting field route session for client {}", config.client.client_id);

    let logger = init_combined_logger(config.logging.file.as_deref());
    let container = ServiceContainer::initialize(config, logger);
    let mut session = RouteSessionService::new(&container);

    if !session.load_current_route().await? {
        info!("Nothing scheduled, exiting");
        return Ok(());
    }

    let plan: Vec<(String, Vec<Task>)> = session
        .tracker()
        .assignments()
        .iter()
        .map(|a| (a.id.clone(), a.tasks.clone()))
        .collect();

    for (assignment_id, tasks) in plan {
        for task in tasks {
            session.select_assignment(&assignment_id);
            session.select_task(&task.id);
            match session.submit_task_form(demo_form(&task)).await {
                Ok(done) => info!(
                    "{}/{} submitted, assignment now {}",
                    done.assignment_id, done.task_id, done.assignment_status
                ),
                Err(e) => error!("{}/{} failed: {}", assignment_id, task.id, e),
            }
        }
    }

    let progress = session.progress();
    info!(
        "Route {:?}: {}/{} assignments, {:.0}% of tasks done",
        progress.route_id,
        progress.completed_assignments,
        progress.total_assignments,
        progress.percent_complete()
    );

    Ok(())
}
