//! Maintenance requests: drafting, promotion, workflow and notifications.

pub mod draft;
pub mod errors;
pub mod form;
pub mod models;
pub mod records;
pub mod service;
pub mod webhook;
pub mod workflow;

pub use draft::MaintenanceRequestDraft;
pub use errors::{MaintenanceError, WorkflowError};
pub use form::{FormFieldService, FormFields};
pub use models::*;
pub use records::*;
pub use service::MaintenanceRequestService;
pub use webhook::{
    DEFAULT_WEBHOOK_BASE_URL, ErrandNotifier, MockErrandNotifier, WebhookErrandNotifier,
};
pub use workflow::{ContractorAction, StageManager};
