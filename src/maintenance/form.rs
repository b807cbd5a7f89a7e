//! Display fields mirrored from the selected options.
//!
//! Each `update_*_fields` call copies one option family onto the draft. A
//! family with nothing selected clears its group. Selecting a rental property
//! pulls in its lease, and selecting a lease pulls in the object it leases.

use crate::{
    maintenance::MaintenanceRequestDraft,
    search::{
        BuildingOption, FacilityOption, LeaseOption, MaintenanceUnitOption, ParkingSpaceOption,
        PropertyOption, RentalPropertyOption, SpaceCaption, StaircaseOption, TenantOption,
    },
};

/// Property fields shown on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFields {
    /// Property designation.
    pub designation: String,
    /// Property code.
    pub code: String,
}

impl From<&PropertyOption> for PropertyFields {
    fn from(option: &PropertyOption) -> Self {
        Self {
            designation: option.designation.clone(),
            code: option.code.clone(),
        }
    }
}

/// Building fields shown on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingFields {
    /// Building name.
    pub name: String,
    /// Building code.
    pub code: String,
    /// Building type.
    pub type_name: Option<String>,
    /// Construction year.
    pub construction_year: Option<String>,
    /// Latest renovation year.
    pub renovation_year: Option<String>,
}

impl From<&BuildingOption> for BuildingFields {
    fn from(option: &BuildingOption) -> Self {
        Self {
            name: option.name.clone(),
            code: option.code.clone(),
            type_name: option.building_type_name.clone(),
            construction_year: option.construction_year.clone(),
            renovation_year: option.renovation_year.clone(),
        }
    }
}

/// Staircase fields shown on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaircaseFields {
    /// Staircase name.
    pub name: String,
    /// Staircase code.
    pub code: Option<String>,
    /// Floor plan description.
    pub floor_plan: Option<String>,
    /// Reachable by elevator.
    pub accessible_by_elevator: bool,
}

impl From<&StaircaseOption> for StaircaseFields {
    fn from(option: &StaircaseOption) -> Self {
        Self {
            name: option.name.clone(),
            code: option.code.clone(),
            floor_plan: option.floor_plan.clone(),
            accessible_by_elevator: option.accessible_by_elevator,
        }
    }
}

/// Rental property fields shown on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalPropertyFields {
    /// Rental id.
    pub rental_property_id: String,
    /// Street address.
    pub address: Option<String>,
    /// Residence type.
    pub property_type: Option<String>,
    /// Apartment code.
    pub code: Option<String>,
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

impl From<&RentalPropertyOption> for RentalPropertyFields {
    fn from(option: &RentalPropertyOption) -> Self {
        Self {
            rental_property_id: option.name.clone(),
            address: option.address.clone(),
            property_type: option.property_type.clone(),
            code: option.code.clone(),
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

/// Shared space fields shown on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceUnitFields {
    /// Display name.
    pub name: String,
    /// Unit type.
    pub unit_type: Option<String>,
    /// Unit code.
    pub code: Option<String>,
    /// Space caption.
    pub caption: Option<String>,
}

impl From<&MaintenanceUnitOption> for MaintenanceUnitFields {
    fn from(option: &MaintenanceUnitOption) -> Self {
        Self {
            name: option.name.clone(),
            unit_type: option.unit_type.clone(),
            code: option.code.clone(),
            caption: option.caption.clone(),
        }
    }
}

/// Lease fields shown on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaseFields {
    /// Lease id.
    pub lease_id: String,
    /// Contract type.
    pub lease_type: Option<String>,
    /// Day the contract was signed.
    pub contract_date: Option<String>,
    /// First day of the lease.
    pub lease_start_date: Option<String>,
    /// Last debit date.
    pub lease_end_date: Option<String>,
}

impl From<&LeaseOption> for LeaseFields {
    fn from(option: &LeaseOption) -> Self {
        Self {
            lease_id: option.name.clone(),
            lease_type: option.lease_type.clone(),
            contract_date: option.contract_date.clone(),
            lease_start_date: option.lease_start_date.clone(),
            lease_end_date: option.lease_end_date.clone(),
        }
    }
}

/// Tenant fields shown on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantFields {
    /// Display name.
    pub name: String,
    /// `OneCore` contact code.
    pub contact_code: String,
    /// Personal identity number.
    pub national_registration_number: Option<String>,
    /// Main phone number.
    pub phone_number: Option<String>,
    /// Email address.
    pub email_address: Option<String>,
    /// Tenant rather than another party.
    pub is_tenant: bool,
    /// Needs special attention when visited.
    pub special_attention: bool,
}

impl From<&TenantOption> for TenantFields {
    fn from(option: &TenantOption) -> Self {
        Self {
            name: option.name.clone(),
            contact_code: option.contact_code.clone(),
            national_registration_number: option.national_registration_number.clone(),
            phone_number: option.phone_number.clone(),
            email_address: option.email_address.clone(),
            is_tenant: option.is_tenant,
            special_attention: option.special_attention,
        }
    }
}

/// Parking space fields shown on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParkingSpaceFields {
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

impl From<&ParkingSpaceOption> for ParkingSpaceFields {
    fn from(option: &ParkingSpaceOption) -> Self {
        Self {
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

/// Facility fields shown on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityFields {
    /// Display name.
    pub name: String,
    /// Facility code.
    pub code: Option<String>,
    /// Facility type name.
    pub type_name: Option<String>,
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

impl From<&FacilityOption> for FacilityFields {
    fn from(option: &FacilityOption) -> Self {
        Self {
            name: option.name.clone(),
            code: option.code.clone(),
            type_name: option.type_name.clone(),
            rental_type: option.rental_type.clone(),
            area: option.area.clone(),
            building_code: option.building_code.clone(),
            building_name: option.building_name.clone(),
            property_code: option.property_code.clone(),
            property_name: option.property_name.clone(),
        }
    }
}

/// Field groups shown on the request form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Selected property.
    pub property: Option<PropertyFields>,
    /// Selected building.
    pub building: Option<BuildingFields>,
    /// Selected staircase.
    pub staircase: Option<StaircaseFields>,
    /// Selected rental property.
    pub rental_property: Option<RentalPropertyFields>,
    /// Selected shared space.
    pub maintenance_unit: Option<MaintenanceUnitFields>,
    /// Selected lease.
    pub lease: Option<LeaseFields>,
    /// Selected tenant.
    pub tenant: Option<TenantFields>,
    /// Selected parking space.
    pub parking_space: Option<ParkingSpaceFields>,
    /// Selected facility.
    pub facility: Option<FacilityFields>,
}

/// Keeps [`FormFields`] in step with the draft's selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormFieldService;

impl FormFieldService {
    /// Stateless service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Mirror every selected option without cascading selections.
    pub fn refresh(&self, draft: &mut MaintenanceRequestDraft) {
        self.update_property_fields(draft);
        self.update_building_fields(draft);
        self.update_staircase_fields(draft);
        copy_rental_property(draft);
        self.update_maintenance_unit_fields(draft);
        copy_lease(draft);
        self.update_tenant_fields(draft);
        self.update_parking_space_fields(draft);
        self.update_facility_fields(draft);
    }

    /// Mirror the selected property.
    pub fn update_property_fields(&self, draft: &mut MaintenanceRequestDraft) {
        let options = &draft.session.options;

        draft.fields.property = options
            .property(draft.session.selection.property)
            .map(PropertyFields::from);
    }

    /// Mirror the selected building.
    pub fn update_building_fields(&self, draft: &mut MaintenanceRequestDraft) {
        let options = &draft.session.options;

        draft.fields.building = options
            .building(draft.session.selection.building)
            .map(BuildingFields::from);
    }

    /// Mirror the selected staircase.
    pub fn update_staircase_fields(&self, draft: &mut MaintenanceRequestDraft) {
        let options = &draft.session.options;

        draft.fields.staircase = options
            .staircase(draft.session.selection.staircase)
            .map(StaircaseFields::from);
    }

    /// Mirror the rental property and select its lease.
    pub fn update_rental_property_fields(&self, draft: &mut MaintenanceRequestDraft) {
        copy_rental_property(draft);

        let Some(rental_property) = draft.session.selection.rental_property else {
            return;
        };

        if let Some(lease) = draft.session.options.lease_for_rental_property(rental_property) {
            draft.session.selection.lease = Some(lease.id);
            copy_lease(draft);
        }
    }

    /// Mirror the selected maintenance unit.
    pub fn update_maintenance_unit_fields(&self, draft: &mut MaintenanceRequestDraft) {
        let options = &draft.session.options;

        draft.fields.maintenance_unit = options
            .maintenance_unit(draft.session.selection.maintenance_unit)
            .map(MaintenanceUnitFields::from);
    }

    /// Mirror the lease and select what it leases: the parking space when
    /// searching for `Bilplats`, the rental property otherwise.
    pub fn update_lease_fields(&self, draft: &mut MaintenanceRequestDraft) {
        copy_lease(draft);

        let Some(lease) = draft.session.options.lease(draft.session.selection.lease) else {
            return;
        };

        let parking_space = lease.parking_space();
        let rental_property = lease.rental_property();

        if draft.search.caption == Some(SpaceCaption::Bilplats) && parking_space.is_some() {
            draft.session.selection.parking_space = parking_space;
            self.update_parking_space_fields(draft);
        } else if rental_property.is_some() {
            draft.session.selection.rental_property = rental_property;
            copy_rental_property(draft);
        }
    }

    /// Mirror the selected tenant.
    pub fn update_tenant_fields(&self, draft: &mut MaintenanceRequestDraft) {
        let options = &draft.session.options;

        draft.fields.tenant = options
            .tenant(draft.session.selection.tenant)
            .map(TenantFields::from);
    }

    /// Mirror the selected parking space.
    pub fn update_parking_space_fields(&self, draft: &mut MaintenanceRequestDraft) {
        let options = &draft.session.options;

        draft.fields.parking_space = options
            .parking_space(draft.session.selection.parking_space)
            .map(ParkingSpaceFields::from);
    }

    /// Mirror the selected facility.
    pub fn update_facility_fields(&self, draft: &mut MaintenanceRequestDraft) {
        let options = &draft.session.options;

        draft.fields.facility = options
            .facility(draft.session.selection.facility)
            .map(FacilityFields::from);
    }
}

fn copy_rental_property(draft: &mut MaintenanceRequestDraft) {
    let options = &draft.session.options;

    draft.fields.rental_property = options
        .rental_property(draft.session.selection.rental_property)
        .map(RentalPropertyFields::from);
}

fn copy_lease(draft: &mut MaintenanceRequestDraft) {
    let options = &draft.session.options;

    draft.fields.lease = options
        .lease(draft.session.selection.lease)
        .map(LeaseFields::from);
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::search::{LeasedObject, OptionId, OptionSet, RentalPropertyOption};

    fn rental_property(name: &str) -> RentalPropertyOption {
        RentalPropertyOption {
            id: OptionId::new(),
            name: name.to_string(),
            address: Some("Testgatan 1".to_string()),
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
        }
    }

    fn lease(name: &str, leased_object: LeasedObject) -> LeaseOption {
        LeaseOption {
            id: OptionId::new(),
            name: name.to_string(),
            lease_number: None,
            lease_type: None,
            lease_start_date: None,
            lease_end_date: None,
            contract_date: None,
            approval_date: None,
            leased_object,
        }
    }

    fn parking_space() -> ParkingSpaceOption {
        ParkingSpaceOption {
            id: OptionId::new(),
            name: "Bilplats 12".to_string(),
            code: None,
            type_name: None,
            type_code: None,
            number: Some("12".to_string()),
            property_code: None,
            property_name: None,
            address: String::new(),
            postal_code: None,
            city: None,
        }
    }

    #[test]
    fn selecting_rental_property_selects_its_lease() -> TestResult {
        let first = rental_property("306-001-01-0101");
        let second = rental_property("306-001-01-0102");
        let second_lease = lease("306-001-01-0102/01", LeasedObject::RentalProperty(second.id));
        let mut draft = MaintenanceRequestDraft::new("Stopp i avlopp");

        draft.session.options = OptionSet {
            leases: vec![
                lease("306-001-01-0101/01", LeasedObject::RentalProperty(first.id)),
                second_lease.clone(),
            ],
            rental_properties: vec![first, second.clone()],
            ..OptionSet::default()
        };
        draft.session.selection.rental_property = Some(second.id);

        FormFieldService::new().update_rental_property_fields(&mut draft);

        assert_eq!(draft.session.selection.lease, Some(second_lease.id));
        assert_eq!(
            draft.fields.lease.as_ref().map(|l| l.lease_id.as_str()),
            Some("306-001-01-0102/01")
        );
        assert_eq!(
            draft
                .fields
                .rental_property
                .ok_or("rental property fields not mirrored")?
                .rental_property_id,
            "306-001-01-0102"
        );

        Ok(())
    }

    #[test]
    fn parking_lease_selects_parking_space_for_bilplats() {
        let space = parking_space();
        let parking_lease = lease("P-001/01", LeasedObject::ParkingSpace(space.id));
        let mut draft = MaintenanceRequestDraft::new("Trasig laddstolpe");

        draft.search.caption = Some(SpaceCaption::Bilplats);
        draft.session.selection.lease = Some(parking_lease.id);
        draft.session.options = OptionSet {
            parking_spaces: vec![space.clone()],
            leases: vec![parking_lease],
            ..OptionSet::default()
        };

        FormFieldService::new().update_lease_fields(&mut draft);

        assert_eq!(draft.session.selection.parking_space, Some(space.id));
        assert_eq!(
            draft.fields.parking_space.map(|fields| fields.name),
            Some("Bilplats 12".to_string())
        );
    }

    #[test]
    fn residential_lease_selects_rental_property() {
        let apartment = rental_property("306-001-01-0101");
        let residential = lease("306-001-01-0101/01", LeasedObject::RentalProperty(apartment.id));
        let mut draft = MaintenanceRequestDraft::new("Stopp i avlopp");

        draft.search.caption = Some(SpaceCaption::Lagenhet);
        draft.session.selection.lease = Some(residential.id);
        draft.session.options = OptionSet {
            rental_properties: vec![apartment.clone()],
            leases: vec![residential],
            ..OptionSet::default()
        };

        FormFieldService::new().update_lease_fields(&mut draft);

        assert_eq!(draft.session.selection.rental_property, Some(apartment.id));
        assert!(draft.fields.rental_property.is_some());
        assert!(draft.session.selection.parking_space.is_none());
    }

    #[test]
    fn refresh_clears_groups_without_selection() {
        let mut draft = MaintenanceRequestDraft::new("Stopp i avlopp");

        draft.fields.tenant = Some(TenantFields::default());

        FormFieldService::new().refresh(&mut draft);

        assert_eq!(draft.fields, FormFields::default());
    }
}
