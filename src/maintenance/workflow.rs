//! Stage transition rules.

use jiff::civil::Date;
use tracing::debug;

use crate::maintenance::{Actor, MaintenanceRequest, Stage, UserUuid, WorkflowError};

/// Stages an unassigned request may move to.
const UNASSIGNED_STAGES: [Stage; 2] = [Stage::WaitingForHandling, Stage::Closed];

/// Stages an external contractor may not move a request out of.
const RESTRICTED_STAGES: [Stage; 2] = [Stage::Done, Stage::Closed];

/// Something an external contractor may do with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractorAction {
    /// Open the request.
    View,
    /// Change request fields.
    Edit,
    /// Post comments.
    Comment,
    /// Attach files.
    AttachFiles,
}

/// Applies the stage workflow to maintenance requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageManager;

impl StageManager {
    /// Stateless manager.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Check that `actor` may move `request` to `new_stage` while it is
    /// assigned to `assignee`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::CannotLeaveStage`] or
    /// [`WorkflowError::CannotEnterStage`] for external contractors, and
    /// [`WorkflowError::NoResourceAssigned`] when nobody is assigned and the
    /// target stage needs a resource.
    pub fn validate_stage_change(
        &self,
        request: &MaintenanceRequest,
        new_stage: Stage,
        assignee: Option<UserUuid>,
        actor: &Actor,
    ) -> Result<(), WorkflowError> {
        if actor.is_external_contractor() {
            if RESTRICTED_STAGES.contains(&request.stage) {
                return Err(WorkflowError::CannotLeaveStage(request.stage));
            }

            if new_stage == Stage::Closed {
                return Err(WorkflowError::CannotEnterStage(new_stage));
            }
        }

        if assignee.is_none() && !UNASSIGNED_STAGES.contains(&new_stage) {
            return Err(WorkflowError::NoResourceAssigned);
        }

        Ok(())
    }

    /// Stage implied by assigning or unassigning a resource, if it changes.
    #[must_use]
    pub fn stage_for_assignment(
        &self,
        current: Stage,
        assignee: Option<UserUuid>,
    ) -> Option<Stage> {
        match (current, assignee) {
            (Stage::WaitingForHandling, Some(_)) => Some(Stage::ResourceAssigned),
            (Stage::ResourceAssigned, None) => Some(Stage::WaitingForHandling),
            _ => None,
        }
    }

    /// Stage of a newly created request.
    #[must_use]
    pub fn initial_stage(&self, assignee: Option<UserUuid>) -> Stage {
        self.stage_for_assignment(Stage::default(), assignee)
            .unwrap_or_default()
    }

    /// Set the close date on done requests and clear it on all others.
    pub fn sync_close_date(&self, request: &mut MaintenanceRequest, today: Date) {
        let close_date = request.stage.is_done().then_some(today);

        if request.close_date.is_some() != close_date.is_some() {
            debug!(uuid = %request.uuid, stage = %request.stage, ?close_date, "close date changed");
        }

        request.close_date = close_date.map(|date| request.close_date.unwrap_or(date));
    }

    /// Whether the request is locked for `actor`.
    #[must_use]
    pub fn is_restricted(&self, request: &MaintenanceRequest, actor: &Actor) -> bool {
        actor.is_external_contractor() && RESTRICTED_STAGES.contains(&request.stage)
    }

    /// Actions open to an external contractor, `None` for staff.
    #[must_use]
    pub fn allowed_actions(
        &self,
        request: &MaintenanceRequest,
        actor: &Actor,
    ) -> Option<Vec<ContractorAction>> {
        if !actor.is_external_contractor() {
            return None;
        }

        if self.is_restricted(request, actor) {
            Some(vec![ContractorAction::View, ContractorAction::Comment])
        } else {
            Some(vec![
                ContractorAction::Edit,
                ContractorAction::Comment,
                ContractorAction::AttachFiles,
            ])
        }
    }
}
