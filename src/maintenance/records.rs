//! Permanent records promoted from selected options.
//!
//! Records are owned by [`RelatedRecords`] inside a single maintenance request
//! and go away with it.

use tracing::debug;

use crate::{
    maintenance::MaintenanceRequestDraft,
    search::{
        BuildingOption, FacilityOption, LeaseOption, MaintenanceUnitOption, ParkingSpaceOption,
        PropertyOption, RentalPropertyOption, StaircaseOption, TenantOption,
    },
    uuids::TypedUuid,
};

/// Id of a permanent record of type `T`.
pub type RecordUuid<T> = TypedUuid<T>;

/// Saved property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyRecord {
    /// Record id.
    pub uuid: RecordUuid<Self>,
    /// Registered property designation.
    pub designation: String,
    /// Property code.
    pub code: String,
}

impl From<&PropertyOption> for PropertyRecord {
    fn from(option: &PropertyOption) -> Self {
        Self {
            uuid: RecordUuid::new(),
            designation: option.designation.clone(),
            code: option.code.clone(),
        }
    }
}

/// Saved building.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingRecord {
    /// Record id.
    pub uuid: RecordUuid<Self>,
    /// Building name.
    pub name: String,
    /// Building code.
    pub code: String,
    /// Building type.
    pub building_type_name: Option<String>,
    /// Construction year.
    pub construction_year: Option<String>,
    /// Latest renovation year.
    pub renovation_year: Option<String>,
}

impl From<&BuildingOption> for BuildingRecord {
    fn from(option: &BuildingOption) -> Self {
        Self {
            uuid: RecordUuid::new(),
            name: option.name.clone(),
            code: option.code.clone(),
            building_type_name: option.building_type_name.clone(),
            construction_year: option.construction_year.clone(),
            renovation_year: option.renovation_year.clone(),
        }
    }
}

/// Saved staircase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaircaseRecord {
    /// Record id.
    pub uuid: RecordUuid<Self>,
    /// `OneCore` staircase id.
    pub staircase_id: Option<String>,
    /// Staircase name.
    pub name: String,
    /// Staircase code.
    pub code: Option<String>,
    /// Floor plan description.
    pub floor_plan: Option<String>,
    /// Reachable by elevator.
    pub accessible_by_elevator: bool,
}

impl From<&StaircaseOption> for StaircaseRecord {
    fn from(option: &StaircaseOption) -> Self {
        Self {
            uuid: RecordUuid::new(),
            staircase_id: option.staircase_id.clone(),
            name: option.name.clone(),
            code: option.code.clone(),
            floor_plan: option.floor_plan.clone(),
            accessible_by_elevator: option.accessible_by_elevator,
        }
    }
}

/// Saved rental property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalPropertyRecord {
    /// Record id.
    pub uuid: RecordUuid<Self>,

    /// Rental id, also sent to the errand webhook.
    pub name: String,

    /// Street address.
    pub address: Option<String>,
    /// Apartment code.
    pub code: Option<String>,
    /// Residence type.
    pub property_type: Option<String>,
    /// Living area.
    pub area: Option<String>,
    /// Entrance.
    pub entrance: Option<String>,
    /// Floor.
    pub floor: Option<String>,
    /// `Ja` or `Nej`.
    pub has_elevator: String,
    /// Property code.
    pub estate_code: Option<String>,
    /// Property name.
    pub estate: Option<String>,
    /// Building code.
    pub building_code: Option<String>,
    /// Building name.
    pub building: Option<String>,
}

impl From<&RentalPropertyOption> for RentalPropertyRecord {
    fn from(option: &RentalPropertyOption) -> Self {
        Self {
            uuid: RecordUuid::new(),
            name: option.name.clone(),
            address: option.address.clone(),
            code: option.code.clone(),
            property_type: option.property_type.clone(),
            area: option.area.clone(),
            entrance: option.entrance.clone(),
            floor: option.floor.clone(),
            has_elevator: option.has_elevator.clone(),
            estate_code: option.estate_code.clone(),
            estate: option.estate.clone(),
            building_code: option.building_code.clone(),
            building: option.building.clone(),
        }
    }
}

/// Saved shared space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceUnitRecord {
    /// Record id.
    pub uuid: RecordUuid<Self>,
    /// Display name.
    pub name: String,
    /// Space caption.
    pub caption: Option<String>,
    /// Unit type.
    pub unit_type: Option<String>,
    /// Unit code.
    pub code: Option<String>,
}

impl From<&MaintenanceUnitOption> for MaintenanceUnitRecord {
    fn from(option: &MaintenanceUnitOption) -> Self {
        Self {
            uuid: RecordUuid::new(),
            name: option.name.clone(),
            caption: option.caption.clone(),
            unit_type: option.unit_type.clone(),
            code: option.code.clone(),
        }
    }
}

/// Saved lease.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaseRecord {
    /// Record id.
    pub uuid: RecordUuid<Self>,
    /// Lease id.
    pub lease_id: String,
    /// Lease number.
    pub lease_number: Option<String>,
    /// Contract type.
    pub lease_type: Option<String>,
    /// First day of the lease.
    pub lease_start_date: Option<String>,
    /// Last debit date.
    pub lease_end_date: Option<String>,
    /// Day the contract was signed.
    pub contract_date: Option<String>,
    /// Day the lease was approved.
    pub approval_date: Option<String>,
}

impl From<&LeaseOption> for LeaseRecord {
    fn from(option: &LeaseOption) -> Self {
        Self {
            uuid: RecordUuid::new(),
            lease_id: option.name.clone(),
            lease_number: option.lease_number.clone(),
            lease_type: option.lease_type.clone(),
            lease_start_date: option.lease_start_date.clone(),
            lease_end_date: option.lease_end_date.clone(),
            contract_date: option.contract_date.clone(),
            approval_date: option.approval_date.clone(),
        }
    }
}

/// Saved tenant with the contact details used for the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantRecord {
    /// Record id.
    pub uuid: RecordUuid<Self>,
    /// Display name.
    pub name: String,
    /// `OneCore` contact code.
    pub contact_code: String,
    /// Internal contact key.
    pub contact_key: Option<String>,
    /// Personal identity number.
    pub national_registration_number: Option<String>,
    /// Email address, possibly edited on the form.
    pub email_address: Option<String>,
    /// Phone number, possibly edited on the form.
    pub phone_number: Option<String>,
    /// Tenant rather than another party.
    pub is_tenant: bool,
    /// Needs special attention when visited.
    pub special_attention: bool,
}

impl From<&TenantOption> for TenantRecord {
    fn from(option: &TenantOption) -> Self {
        Self {
            uuid: RecordUuid::new(),
            name: option.name.clone(),
            contact_code: option.contact_code.clone(),
            contact_key: option.contact_key.clone(),
            national_registration_number: option.national_registration_number.clone(),
            email_address: option.email_address.clone(),
            phone_number: option.phone_number.clone(),
            is_tenant: option.is_tenant,
            special_attention: option.special_attention,
        }
    }
}

/// Saved parking space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParkingSpaceRecord {
    /// Record id.
    pub uuid: RecordUuid<Self>,
    /// Display name.
    pub name: String,
    /// Parking space code.
    pub code: Option<String>,
    /// Parking space type name.
    pub type_name: Option<String>,
    /// Parking space type code.
    pub type_code: Option<String>,
    /// Parking number.
    pub number: Option<String>,
    /// Code of the owning property.
    pub property_code: Option<String>,
    /// Name of the owning property.
    pub property_name: Option<String>,
    /// Street address.
    pub address: String,
    /// Postal code.
    pub postal_code: Option<String>,
    /// City.
    pub city: Option<String>,
}

impl From<&ParkingSpaceOption> for ParkingSpaceRecord {
    fn from(option: &ParkingSpaceOption) -> Self {
        Self {
            uuid: RecordUuid::new(),
            name: option.name.clone(),
            code: option.code.clone(),
            type_name: option.type_name.clone(),
            type_code: option.type_code.clone(),
            number: option.number.clone(),
            property_code: option.property_code.clone(),
            property_name: option.property_name.clone(),
            address: option.address.clone(),
            postal_code: option.postal_code.clone(),
            city: option.city.clone(),
        }
    }
}

/// Saved commercial premises.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityRecord {
    /// Record id.
    pub uuid: RecordUuid<Self>,
    /// Display name.
    pub name: String,
    /// Facility code.
    pub code: Option<String>,
    /// Facility type name.
    pub type_name: Option<String>,
    /// Facility type code.
    pub type_code: Option<String>,
    /// Rental object type.
    pub rental_type: Option<String>,
    /// Area.
    pub area: String,
    /// Building code.
    pub building_code: Option<String>,
    /// Building name.
    pub building_name: Option<String>,
    /// Property code.
    pub property_code: Option<String>,
    /// Property name.
    pub property_name: Option<String>,
}

impl From<&FacilityOption> for FacilityRecord {
    fn from(option: &FacilityOption) -> Self {
        Self {
            uuid: RecordUuid::new(),
            name: option.name.clone(),
            code: option.code.clone(),
            type_name: option.type_name.clone(),
            type_code: option.type_code.clone(),
            rental_type: option.rental_type.clone(),
            area: option.area.clone(),
            building_code: option.building_code.clone(),
            building_name: option.building_name.clone(),
            property_code: option.property_code.clone(),
            property_name: option.property_name.clone(),
        }
    }
}

/// Records owned by one maintenance request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedRecords {
    /// Property the request concerns.
    pub property: Option<PropertyRecord>,
    /// Building the request concerns.
    pub building: Option<BuildingRecord>,
    /// Staircase the request concerns.
    pub staircase: Option<StaircaseRecord>,
    /// Rental property the request concerns.
    pub rental_property: Option<RentalPropertyRecord>,
    /// Shared space the request concerns.
    pub maintenance_unit: Option<MaintenanceUnitRecord>,
    /// Lease of the reporting tenant.
    pub lease: Option<LeaseRecord>,
    /// Reporting tenant.
    pub tenant: Option<TenantRecord>,
    /// Parking space the request concerns.
    pub parking_space: Option<ParkingSpaceRecord>,
    /// Facility the request concerns.
    pub facility: Option<FacilityRecord>,
}

/// Promotes the options selected on a draft into permanent records.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordManagementService;

impl RecordManagementService {
    /// Stateless promoter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Copy every selected option into a new record.
    ///
    /// Tenant phone number and e-mail address edited on the draft win over
    /// the values found in `OneCore`.
    #[must_use]
    pub fn create_related_records(&self, draft: &MaintenanceRequestDraft) -> RelatedRecords {
        let options = &draft.session.options;
        let selection = draft.session.selection;

        let tenant = options.tenant(selection.tenant).map(|option| {
            let mut tenant = TenantRecord::from(option);

            if let Some(phone_number) = &draft.phone_number {
                tenant.phone_number = Some(phone_number.clone());
            }

            if let Some(email_address) = &draft.email_address {
                tenant.email_address = Some(email_address.clone());
            }

            tenant
        });

        let records = RelatedRecords {
            property: options.property(selection.property).map(PropertyRecord::from),
            building: options.building(selection.building).map(BuildingRecord::from),
            staircase: options.staircase(selection.staircase).map(StaircaseRecord::from),
            rental_property: options
                .rental_property(selection.rental_property)
                .map(RentalPropertyRecord::from),
            maintenance_unit: options
                .maintenance_unit(selection.maintenance_unit)
                .map(MaintenanceUnitRecord::from),
            lease: options.lease(selection.lease).map(LeaseRecord::from),
            tenant,
            parking_space: options
                .parking_space(selection.parking_space)
                .map(ParkingSpaceRecord::from),
            facility: options.facility(selection.facility).map(FacilityRecord::from),
        };

        debug!(
            rental_property = records.rental_property.is_some(),
            lease = records.lease.is_some(),
            tenant = records.tenant.is_some(),
            "promoted selected options"
        );

        records
    }
}
