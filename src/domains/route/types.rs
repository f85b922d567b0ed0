use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque key/value payload produced by a form renderer (field id -> value).
pub type FormData = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::Pending => "pending",
            WorkStatus::InProgress => "in-progress",
            WorkStatus::Completed => "completed",
        }
    }

    /// Aggregate a set of child statuses: all completed => completed,
    /// any non-pending => in-progress, otherwise pending.
    /// An empty set is vacuously completed.
    pub fn aggregate<I>(statuses: I) -> WorkStatus
    where
        I: IntoIterator<Item = WorkStatus>,
    {
        let mut all_completed = true;
        let mut any_started = false;
        for status in statuses {
            if status != WorkStatus::Completed {
                all_completed = false;
            }
            if status != WorkStatus::Pending {
                any_started = true;
            }
        }
        if all_completed {
            WorkStatus::Completed
        } else if any_started {
            WorkStatus::InProgress
        } else {
            WorkStatus::Pending
        }
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldKind {
    Text,
    Number,
    Select,
    Checkbox,
    Photo,
}

/// Declarative description of one input needed to complete a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FormFieldKind,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FormField {
    pub fn new(id: &str, label: &str, kind: FormFieldKind, required: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            required,
            options: None,
        }
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|o| o.to_string()).collect());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: WorkStatus,
    pub required_photos: u32,
    pub form_fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<FormData>,
}

impl Task {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            status: WorkStatus::Pending,
            required_photos: 0,
            form_fields: Vec::new(),
            form_data: None,
        }
    }

    pub fn with_photos(mut self, required_photos: u32) -> Self {
        self.required_photos = required_photos;
        self
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.form_fields.push(field);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == WorkStatus::Completed
    }

    /// Mark the task completed and attach the submitted payload verbatim.
    pub fn complete(&mut self, form_data: FormData) {
        self.status = WorkStatus::Completed;
        self.form_data = Some(form_data);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub client_id: String,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub status: WorkStatus,
    pub scheduled_time: DateTime<Utc>,
    pub tasks: Vec<Task>,
}

impl Assignment {
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    pub fn derive_status(&self) -> WorkStatus {
        WorkStatus::aggregate(self.tasks.iter().map(|t| t.status))
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    /// Complete one task and recompute the aggregate status.
    /// Returns false when the task id is not part of this assignment.
    pub fn complete_task(&mut self, task_id: &str, form_data: FormData) -> bool {
        match self.task_mut(task_id) {
            Some(task) => {
                task.complete(form_data);
                self.status = self.derive_status();
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub driver_id: String,
    pub date: DateTime<Utc>,
    pub status: WorkStatus,
    /// Assignment ids in driving order.
    pub assignments: Vec<String>,
}

impl Route {
    /// Status derived from the listed assignments that are present in
    /// `loaded`. `None` when none of them are loaded.
    pub fn derive_status(&self, loaded: &[Assignment]) -> Option<WorkStatus> {
        let statuses: Vec<WorkStatus> = self
            .assignments
            .iter()
            .filter_map(|id| loaded.iter().find(|a| &a.id == id))
            .map(|a| a.status)
            .collect();
        if statuses.is_empty() {
            None
        } else {
            Some(WorkStatus::aggregate(statuses))
        }
    }
}
