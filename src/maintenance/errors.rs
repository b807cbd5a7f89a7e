//! Maintenance request errors.

use thiserror::Error;

use crate::maintenance::Stage;

/// A stage change the actor is not allowed to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The target stage needs an assigned resource.
    #[error("Ingen resurs är tilldelad. Vänligen välj en resurs.")]
    NoResourceAssigned,

    /// External contractors cannot move a request out of this stage.
    #[error("Du har inte behörighet att flytta detta ärende från {0}")]
    CannotLeaveStage(Stage),

    /// External contractors cannot move a request into this stage.
    #[error("Du har inte behörighet att flytta detta ärende till {0}")]
    CannotEnterStage(Stage),
}

/// Errors raised by [`MaintenanceRequestService`](crate::maintenance::MaintenanceRequestService).
#[derive(Debug, Error)]
pub enum MaintenanceError {
    /// The request title is blank.
    #[error("a maintenance request needs a title")]
    MissingTitle,

    /// The stage change was rejected.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}
