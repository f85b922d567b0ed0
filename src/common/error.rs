use thiserror::Error;

use crate::domains::route::FormValidationErrors;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Assignment not found: {id}")]
    AssignmentNotFound { id: String },

    #[error("Task not found: {id}")]
    TaskNotFound { id: String },

    #[error("No assignment selected")]
    NoAssignmentSelected,

    #[error("No task selected")]
    NoTaskSelected,

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Form validation failed: {0}")]
    FormValidation(FormValidationErrors),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Event store error: {0}")]
    EventStore(String),

    #[error("Remote service rejected {operation}")]
    Remote { operation: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
