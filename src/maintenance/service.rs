//! Maintenance request service.

use std::{fmt, sync::Arc};

use jiff::{Timestamp, civil::Date};
use tracing::{info, instrument};

use crate::maintenance::{
    Actor, ErrandNotifier, MaintenanceError, MaintenanceRequest, MaintenanceRequestDraft,
    MaintenanceRequestUpdate, MaintenanceRequestUuid, RecordManagementService, Stage,
    StageManager,
};

/// Creates, updates and removes maintenance requests.
///
/// Persistence belongs to the caller: requests are owned values and dropping
/// one drops its related records with it.
#[derive(Clone)]
pub struct MaintenanceRequestService {
    notifier: Arc<dyn ErrandNotifier>,
    stages: StageManager,
    records: RecordManagementService,
}

impl MaintenanceRequestService {
    /// Service notifying `notifier` of every change.
    #[must_use]
    pub fn new(notifier: Arc<dyn ErrandNotifier>) -> Self {
        Self {
            notifier,
            stages: StageManager::new(),
            records: RecordManagementService::new(),
        }
    }

    /// Stage rules applied by this service.
    #[must_use]
    pub fn stages(&self) -> &StageManager {
        &self.stages
    }

    /// Turn a draft into a request, promoting its selected options to
    /// permanent records.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceError::MissingTitle`] when the draft has no title.
    #[instrument(skip_all, fields(owner = %actor.user))]
    pub async fn create(
        &self,
        draft: &MaintenanceRequestDraft,
        actor: &Actor,
        today: Date,
    ) -> Result<MaintenanceRequest, MaintenanceError> {
        if draft.title.trim().is_empty() {
            return Err(MaintenanceError::MissingTitle);
        }

        let mut request = MaintenanceRequest {
            uuid: MaintenanceRequestUuid::new(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            space_caption: draft.search.caption,
            priority: draft.priority,
            origin: draft.origin,
            stage: self.stages.initial_stage(draft.assignee),
            owner: actor.user,
            assignee: draft.assignee,
            close_date: None,
            archived: false,
            records: self.records.create_related_records(draft),
            created_at: Timestamp::now(),
        };

        self.stages.sync_close_date(&mut request, today);

        info!(uuid = %request.uuid, stage = %request.stage, "created maintenance request");

        self.notifier.errand_created(&request).await;

        Ok(request)
    }

    /// Apply `update`, moving the stage when the assignment changes.
    ///
    /// Nothing is changed when the update is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceError::MissingTitle`] for a blank title and
    /// [`MaintenanceError::Workflow`] when `actor` may not make the stage
    /// change.
    #[instrument(skip_all, fields(uuid = %request.uuid, actor = %actor.user))]
    pub async fn update(
        &self,
        request: &mut MaintenanceRequest,
        update: MaintenanceRequestUpdate,
        actor: &Actor,
        today: Date,
    ) -> Result<(), MaintenanceError> {
        if update.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(MaintenanceError::MissingTitle);
        }

        let assignee = update.assignee.unwrap_or(request.assignee);

        if let Some(stage) = update.stage {
            self.stages
                .validate_stage_change(request, stage, assignee, actor)?;
        }

        let previous_stage = request.stage;

        if let Some(title) = update.title {
            request.title = title;
        }

        if let Some(description) = update.description {
            request.description = Some(description);
        }

        if let Some(priority) = update.priority {
            request.priority = priority;
        }

        if assignee != request.assignee {
            if let Some(stage) = self.stages.stage_for_assignment(request.stage, assignee) {
                request.stage = stage;
            }

            request.assignee = assignee;
        }

        if let Some(stage) = update.stage {
            request.stage = stage;
        }

        if request.stage != previous_stage {
            self.stages.sync_close_date(request, today);

            info!(from = %previous_stage, to = %request.stage, "stage changed");
        }

        self.notifier.errand_updated(request).await;

        Ok(())
    }

    /// Remove a request together with its records.
    #[instrument(skip_all, fields(uuid = %request.uuid))]
    pub async fn delete(&self, request: MaintenanceRequest) {
        self.notifier.errand_deleted(&request).await;

        info!("deleted maintenance request");
    }

    /// Archive `request` and send an update.
    pub async fn archive(&self, request: &mut MaintenanceRequest) {
        request.archived = true;

        self.notifier.errand_updated(request).await;
    }

    /// Bring an archived request back to the first stage.
    pub async fn restore(&self, request: &mut MaintenanceRequest, today: Date) {
        request.archived = false;
        request.stage = Stage::default();

        self.stages.sync_close_date(request, today);
        self.notifier.errand_updated(request).await;
    }
}

impl fmt::Debug for MaintenanceRequestService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaintenanceRequestService")
            .field("stages", &self.stages)
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;
    use crate::{
        maintenance::{MockErrandNotifier, Priority, UserUuid, WorkflowError},
        search::{
            LeaseOption, LeasedObject, OptionId, OptionSet, RentalPropertyOption, SpaceCaption,
        },
        test_helpers::{maintenance_request, rented_maintenance_request},
    };

    const TODAY: Date = date(2026, 5, 4);

    fn quiet_notifier() -> MockErrandNotifier {
        let mut notifier = MockErrandNotifier::new();

        notifier.expect_errand_created().return_const(());
        notifier.expect_errand_updated().return_const(());
        notifier.expect_errand_deleted().return_const(());

        notifier
    }

    fn draft_with_rental_property(rental_id: &str) -> MaintenanceRequestDraft {
        let rental_property = RentalPropertyOption {
            id: OptionId::new(),
            name: rental_id.to_string(),
            address: None,
            code: None,
            property_type: None,
            area: None,
            entrance: None,
            floor: None,
            has_elevator: "Nej".to_string(),
            estate_code: None,
            estate: None,
            building_code: None,
            building: None,
        };

        let mut draft = MaintenanceRequestDraft::new("Stopp i avlopp");

        draft.search.caption = Some(SpaceCaption::Lagenhet);
        draft.session.selection.rental_property = Some(rental_property.id);
        draft.session.options = OptionSet {
            rental_properties: vec![rental_property],
            ..OptionSet::default()
        };

        draft
    }

    #[tokio::test]
    async fn create_promotes_records_and_notifies() -> TestResult {
        let mut notifier = MockErrandNotifier::new();

        notifier
            .expect_errand_created()
            .once()
            .withf(|request| request.rental_object_id() == Some("306-001-01-0101"))
            .return_const(());

        let service = MaintenanceRequestService::new(Arc::new(notifier));
        let actor = Actor::staff(UserUuid::new());
        let mut draft = draft_with_rental_property("306-001-01-0101");

        draft.priority = Priority::OneDay;

        let request = service.create(&draft, &actor, TODAY).await?;

        assert_eq!(request.stage, Stage::WaitingForHandling);
        assert_eq!(request.owner, actor.user);
        assert_eq!(request.priority, Priority::OneDay);
        assert_eq!(request.space_caption, Some(SpaceCaption::Lagenhet));
        assert_eq!(request.close_date, None);
        assert!(request.records.lease.is_none(), "nothing selected, nothing promoted");

        Ok(())
    }

    #[tokio::test]
    async fn create_with_assignee_starts_resource_assigned() -> TestResult {
        let service = MaintenanceRequestService::new(Arc::new(quiet_notifier()));
        let mut draft = MaintenanceRequestDraft::new("Trasig dörr");

        draft.assignee = Some(UserUuid::new());

        let request = service
            .create(&draft, &Actor::staff(UserUuid::new()), TODAY)
            .await?;

        assert_eq!(request.stage, Stage::ResourceAssigned);
        assert_eq!(request.assignee, draft.assignee);

        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let mut notifier = MockErrandNotifier::new();

        notifier.expect_errand_created().never();

        let service = MaintenanceRequestService::new(Arc::new(notifier));
        let result = service
            .create(
                &MaintenanceRequestDraft::new("  "),
                &Actor::staff(UserUuid::new()),
                TODAY,
            )
            .await;

        assert!(matches!(result, Err(MaintenanceError::MissingTitle)));
    }

    #[tokio::test]
    async fn assigning_moves_to_resource_assigned() -> TestResult {
        let service = MaintenanceRequestService::new(Arc::new(quiet_notifier()));
        let mut request = maintenance_request(Stage::WaitingForHandling);
        let assignee = UserUuid::new();

        service
            .update(
                &mut request,
                MaintenanceRequestUpdate {
                    assignee: Some(Some(assignee)),
                    ..MaintenanceRequestUpdate::default()
                },
                &Actor::staff(UserUuid::new()),
                TODAY,
            )
            .await?;

        assert_eq!(request.stage, Stage::ResourceAssigned);
        assert_eq!(request.assignee, Some(assignee));

        service
            .update(
                &mut request,
                MaintenanceRequestUpdate {
                    assignee: Some(None),
                    ..MaintenanceRequestUpdate::default()
                },
                &Actor::staff(UserUuid::new()),
                TODAY,
            )
            .await?;

        assert_eq!(request.stage, Stage::WaitingForHandling);
        assert_eq!(request.assignee, None);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_stage_change_leaves_request_untouched() {
        let mut notifier = MockErrandNotifier::new();

        notifier.expect_errand_updated().never();

        let service = MaintenanceRequestService::new(Arc::new(notifier));
        let mut request = maintenance_request(Stage::WaitingForHandling);
        let before = request.clone();

        let result = service
            .update(
                &mut request,
                MaintenanceRequestUpdate {
                    title: Some("Nytt namn".to_string()),
                    stage: Some(Stage::Started),
                    ..MaintenanceRequestUpdate::default()
                },
                &Actor::staff(UserUuid::new()),
                TODAY,
            )
            .await;

        assert!(matches!(
            result,
            Err(MaintenanceError::Workflow(WorkflowError::NoResourceAssigned))
        ));
        assert_eq!(request, before);
    }

    #[tokio::test]
    async fn closing_sets_close_date_and_reopening_clears_it() -> TestResult {
        let mut notifier = MockErrandNotifier::new();

        notifier
            .expect_errand_updated()
            .times(2)
            .return_const(());

        let service = MaintenanceRequestService::new(Arc::new(notifier));
        let staff = Actor::staff(UserUuid::new());
        let mut request = rented_maintenance_request(Stage::Done, "306-001-01-0101");

        request.assignee = Some(UserUuid::new());

        service
            .update(
                &mut request,
                MaintenanceRequestUpdate {
                    stage: Some(Stage::Closed),
                    ..MaintenanceRequestUpdate::default()
                },
                &staff,
                TODAY,
            )
            .await?;

        assert_eq!(request.close_date, Some(TODAY));

        service
            .update(
                &mut request,
                MaintenanceRequestUpdate {
                    stage: Some(Stage::Started),
                    ..MaintenanceRequestUpdate::default()
                },
                &staff,
                TODAY,
            )
            .await?;

        assert_eq!(request.close_date, None);

        Ok(())
    }

    #[tokio::test]
    async fn contractor_cannot_close_request() {
        let service = MaintenanceRequestService::new(Arc::new(quiet_notifier()));
        let mut request = maintenance_request(Stage::Started);

        request.assignee = Some(UserUuid::new());

        let result = service
            .update(
                &mut request,
                MaintenanceRequestUpdate {
                    stage: Some(Stage::Closed),
                    ..MaintenanceRequestUpdate::default()
                },
                &Actor::external_contractor(UserUuid::new()),
                TODAY,
            )
            .await;

        assert_eq!(
            result.map_err(|error| error.to_string()),
            Err("Du har inte behörighet att flytta detta ärende till Avslutad".to_string())
        );
        assert_eq!(request.stage, Stage::Started);
    }

    #[tokio::test]
    async fn delete_notifies_and_archive_restore_round_trip() {
        let mut notifier = MockErrandNotifier::new();

        notifier.expect_errand_deleted().once().return_const(());
        notifier.expect_errand_updated().times(2).return_const(());

        let service = MaintenanceRequestService::new(Arc::new(notifier));
        let mut request = rented_maintenance_request(Stage::Closed, "306-001-01-0101");

        request.close_date = Some(TODAY);

        service.archive(&mut request).await;
        assert!(request.archived);

        service.restore(&mut request, TODAY).await;
        assert!(!request.archived);
        assert_eq!(request.stage, Stage::WaitingForHandling);
        assert_eq!(request.close_date, None);

        service.delete(request).await;
    }

    #[tokio::test]
    async fn promoted_lease_is_owned_by_request() -> TestResult {
        let service = MaintenanceRequestService::new(Arc::new(quiet_notifier()));
        let mut draft = draft_with_rental_property("306-001-01-0101");
        let rental_property = draft
            .session
            .selection
            .rental_property
            .ok_or("no rental property selected")?;
        let lease = LeaseOption {
            id: OptionId::new(),
            name: "306-001-01-0101/01".to_string(),
            lease_number: None,
            lease_type: None,
            lease_start_date: None,
            lease_end_date: None,
            contract_date: None,
            approval_date: None,
            leased_object: LeasedObject::RentalProperty(rental_property),
        };

        draft.session.selection.lease = Some(lease.id);
        draft.session.options.leases.push(lease);

        let request = service
            .create(&draft, &Actor::staff(UserUuid::new()), TODAY)
            .await?;

        assert_eq!(
            request.records.lease.map(|lease| lease.lease_id),
            Some("306-001-01-0101/01".to_string())
        );

        Ok(())
    }
}
