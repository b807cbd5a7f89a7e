//! Session scoped option rows offered to the maintenance form.
//!
//! Each search replaces the whole [`OptionSet`]. Rows keep creation order and
//! refer to their parents through typed ids.

use crate::{
    api::models::{
        Building, Contact, Facility, Lease, MaintenanceUnit, ParkingSpace, Property, Residence,
        Staircase,
    },
    uuids::TypedUuid,
};

/// Id of an option row of type `T`.
pub type OptionId<T> = TypedUuid<T>;

/// Placeholder used when `OneCore` has no name for a parking space or facility.
pub const MISSING_NAME: &str = "Namn saknas";

/// A row that can be looked up by id.
pub trait OptionRecord: Sized {
    /// Id of this row.
    fn id(&self) -> OptionId<Self>;
}

fn find<T: OptionRecord>(rows: &[T], id: Option<OptionId<T>>) -> Option<&T> {
    let id = id?;

    rows.iter().find(|row| row.id() == id)
}

macro_rules! option_record {
    ($($row:ty),+ $(,)?) => {
        $(
            impl OptionRecord for $row {
                fn id(&self) -> OptionId<Self> {
                    self.id
                }
            }
        )+
    };
}

option_record!(
    PropertyOption,
    BuildingOption,
    StaircaseOption,
    RentalPropertyOption,
    MaintenanceUnitOption,
    LeaseOption,
    TenantOption,
    ParkingSpaceOption,
    FacilityOption,
);

/// A property (fastighet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyOption {
    /// Row id.
    pub id: OptionId<Self>,
    /// Registered property designation.
    pub designation: String,
    /// Property code.
    pub code: String,
}

impl PropertyOption {
    /// Row for a property from the property search.
    #[must_use]
    pub fn from_property(property: &Property) -> Self {
        Self {
            id: OptionId::new(),
            designation: property.designation.clone().unwrap_or_default(),
            code: property.code.clone().unwrap_or_default(),
        }
    }
}

/// A building on a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingOption {
    /// Row id.
    pub id: OptionId<Self>,
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
    /// Property row the building was found under.
    pub property: Option<OptionId<PropertyOption>>,
}

impl BuildingOption {
    /// Row for `building`, optionally under a property row.
    #[must_use]
    pub fn from_building(building: &Building, property: Option<OptionId<PropertyOption>>) -> Self {
        Self {
            id: OptionId::new(),
            name: building.name.clone().unwrap_or_default(),
            code: building.code.clone().unwrap_or_default(),
            building_type_name: building.type_name().map(str::to_string),
            construction_year: building.construction_year().map(str::to_string),
            renovation_year: building.renovation_year().map(str::to_string),
            property,
        }
    }
}

/// A staircase (uppgång) in a building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaircaseOption {
    /// Row id.
    pub id: OptionId<Self>,
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
    /// Building row the staircase belongs to.
    pub building: Option<OptionId<BuildingOption>>,
}

impl StaircaseOption {
    /// Row for `staircase`, optionally under a building row.
    #[must_use]
    pub fn from_staircase(staircase: &Staircase, building: Option<OptionId<BuildingOption>>) -> Self {
        let features = staircase.features.as_ref();

        Self {
            id: OptionId::new(),
            staircase_id: staircase.id.clone(),
            name: staircase
                .name
                .clone()
                .or_else(|| staircase.code.clone())
                .unwrap_or_default(),
            code: staircase.code.clone(),
            floor_plan: features.and_then(|f| f.floor_plan.clone()),
            accessible_by_elevator: features
                .and_then(|f| f.accessible_by_elevator)
                .unwrap_or(false),
            building,
        }
    }
}

/// An apartment or other residence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalPropertyOption {
    /// Row id.
    pub id: OptionId<Self>,

    /// Rental id, e.g. `306-001-01-0101`.
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

impl RentalPropertyOption {
    /// Row for a residence found through a lease.
    #[must_use]
    pub fn from_residence(residence: &Residence) -> Self {
        let property = residence.property.as_ref();
        let building = residence.building.as_ref();

        Self {
            id: OptionId::new(),
            name: residence.rental_id().unwrap_or_default().to_string(),
            address: residence.name.clone(),
            code: residence.code.clone(),
            property_type: residence
                .residence_type
                .as_ref()
                .and_then(|t| t.name.clone()),
            area: residence.area_size.clone(),
            entrance: residence.entrance.clone(),
            floor: residence.floor.clone(),
            has_elevator: if residence.has_elevator() { "Ja" } else { "Nej" }.to_string(),
            estate_code: property.and_then(|p| p.code.clone()),
            estate: property.and_then(|p| p.name.clone()),
            building_code: building.and_then(|b| b.code.clone()),
            building: building.and_then(|b| b.name.clone()),
        }
    }
}

/// Parent a maintenance unit row was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceUnitParent {
    /// Found by a property search.
    Property(OptionId<PropertyOption>),
    /// Found by a building search.
    Building(OptionId<BuildingOption>),
    /// Shared space of a leased residence.
    RentalProperty(OptionId<RentalPropertyOption>),
}

/// A shared space such as a laundry room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceUnitOption {
    /// Row id.
    pub id: OptionId<Self>,
    /// `OneCore` maintenance unit id.
    pub unit_id: Option<String>,
    /// Display name, the unit caption.
    pub name: String,
    /// Space caption.
    pub caption: Option<String>,
    /// Unit type.
    pub unit_type: Option<String>,
    /// Unit code.
    pub code: Option<String>,
    /// Row the unit was found under.
    pub parent: MaintenanceUnitParent,
}

impl MaintenanceUnitOption {
    /// Row for `unit` under `parent`.
    #[must_use]
    pub fn from_unit(unit: &MaintenanceUnit, parent: MaintenanceUnitParent) -> Self {
        Self {
            id: OptionId::new(),
            unit_id: unit.id.clone(),
            name: unit.caption.clone().unwrap_or_default(),
            caption: unit.caption.clone(),
            unit_type: unit.unit_type.clone(),
            code: unit.code.clone(),
            parent,
        }
    }
}

/// Object a lease row refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeasedObject {
    /// A residence.
    RentalProperty(OptionId<RentalPropertyOption>),
    /// A parking space.
    ParkingSpace(OptionId<ParkingSpaceOption>),
    /// Commercial premises.
    Facility(OptionId<FacilityOption>),
}

/// A lease on a rental property, parking space or facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseOption {
    /// Row id.
    pub id: OptionId<Self>,

    /// Lease id, e.g. `306-001-01-0101/03`.
    pub name: String,

    /// Lease number.
    pub lease_number: Option<String>,
    /// Contract type, trimmed.
    pub lease_type: Option<String>,
    /// First day of the lease.
    pub lease_start_date: Option<String>,
    /// Last debit date.
    pub lease_end_date: Option<String>,
    /// Day the contract was signed.
    pub contract_date: Option<String>,
    /// Day the lease was approved.
    pub approval_date: Option<String>,
    /// Row of the leased object.
    pub leased_object: LeasedObject,
}

impl LeaseOption {
    /// Row for `lease` pointing at `leased_object`.
    #[must_use]
    pub fn from_lease(lease: &Lease, leased_object: LeasedObject) -> Self {
        Self {
            id: OptionId::new(),
            name: lease.lease_id.clone().unwrap_or_default(),
            lease_number: lease.lease_number.clone(),
            lease_type: lease.lease_type.clone(),
            lease_start_date: lease.lease_start_date.clone(),
            lease_end_date: lease.last_debit_date.clone(),
            contract_date: lease.contract_date.clone(),
            approval_date: lease.approval_date.clone(),
            leased_object,
        }
    }

    /// Rental property row, when the lease is on one.
    #[must_use]
    pub fn rental_property(&self) -> Option<OptionId<RentalPropertyOption>> {
        match self.leased_object {
            LeasedObject::RentalProperty(id) => Some(id),
            LeasedObject::ParkingSpace(_) | LeasedObject::Facility(_) => None,
        }
    }

    /// Parking space row, when the lease is on one.
    #[must_use]
    pub fn parking_space(&self) -> Option<OptionId<ParkingSpaceOption>> {
        match self.leased_object {
            LeasedObject::ParkingSpace(id) => Some(id),
            LeasedObject::RentalProperty(_) | LeasedObject::Facility(_) => None,
        }
    }
}

/// A tenant or other contact on a lease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantOption {
    /// Row id.
    pub id: OptionId<Self>,
    /// Display name.
    pub name: String,
    /// `OneCore` contact code.
    pub contact_code: String,
    /// Internal contact key.
    pub contact_key: Option<String>,
    /// Personal identity number.
    pub national_registration_number: Option<String>,
    /// Email address.
    pub email_address: Option<String>,
    /// Main phone number.
    pub phone_number: Option<String>,
    /// Tenant rather than another party; unknown counts as tenant.
    pub is_tenant: bool,
    /// Needs special attention when visited.
    pub special_attention: bool,
}

impl TenantOption {
    /// Row for `contact`.
    #[must_use]
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id: OptionId::new(),
            name: contact.display_name(),
            contact_code: contact.contact_code.clone().unwrap_or_default(),
            contact_key: contact.contact_key.clone(),
            national_registration_number: contact.national_registration_number.clone(),
            email_address: contact.email_address.clone(),
            phone_number: contact.main_phone_number().map(str::to_string),
            is_tenant: contact.is_tenant.unwrap_or(true),
            special_attention: contact.special_attention.unwrap_or(false),
        }
    }
}

/// A parking space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSpaceOption {
    /// Row id.
    pub id: OptionId<Self>,
    /// Display name, or a placeholder.
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
    /// Street address, empty when unknown.
    pub address: String,
    /// Postal code.
    pub postal_code: Option<String>,
    /// City.
    pub city: Option<String>,
}

impl ParkingSpaceOption {
    /// Build a row from a parking space lookup; a missing lookup still gives a
    /// placeholder row so the lease can point at it.
    #[must_use]
    pub fn from_parking_space(parking_space: Option<&ParkingSpace>) -> Self {
        let info = parking_space.and_then(|p| p.parking_space.as_ref());
        let kind = info.and_then(|i| i.parking_space_type.as_ref());
        let address = parking_space.and_then(|p| p.address.as_ref());

        Self {
            id: OptionId::new(),
            name: info
                .and_then(|i| i.name.clone())
                .unwrap_or_else(|| MISSING_NAME.to_string()),
            code: info.and_then(|i| i.code.clone()),
            type_name: kind.and_then(|k| k.name.clone()),
            type_code: kind.and_then(|k| k.code.clone()),
            number: info.and_then(|i| i.parking_number.clone()),
            property_code: parking_space.and_then(|p| p.property_code.clone()),
            property_name: parking_space.and_then(|p| p.property_name.clone()),
            address: address
                .and_then(|a| a.street_address.clone())
                .unwrap_or_default(),
            postal_code: address.and_then(|a| a.postal_code.clone()),
            city: address.and_then(|a| a.city.clone()),
        }
    }
}

/// Commercial premises (lokal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityOption {
    /// Row id.
    pub id: OptionId<Self>,
    /// Display name, or a placeholder.
    pub name: String,
    /// Facility code.
    pub code: Option<String>,
    /// Facility type name.
    pub type_name: Option<String>,
    /// Facility type code.
    pub type_code: Option<String>,
    /// Area, empty when unknown.
    pub area: String,
    /// Building code.
    pub building_code: Option<String>,
    /// Building name.
    pub building_name: Option<String>,
    /// Property code.
    pub property_code: Option<String>,
    /// Property name.
    pub property_name: Option<String>,
    /// Rental object type.
    pub rental_type: Option<String>,
}

impl FacilityOption {
    /// Row for `facility`.
    #[must_use]
    pub fn from_facility(facility: &Facility) -> Self {
        let kind = facility.facility_type.as_ref();
        let building = facility.building.as_ref();
        let property = facility.property.as_ref();

        Self {
            id: OptionId::new(),
            name: facility
                .name
                .clone()
                .unwrap_or_else(|| MISSING_NAME.to_string()),
            code: facility.code.clone(),
            type_name: kind.and_then(|k| k.name.clone()),
            type_code: kind.and_then(|k| k.code.clone()),
            area: facility.area.clone().unwrap_or_default(),
            building_code: building.and_then(|b| b.code.clone()),
            building_name: building.and_then(|b| b.name.clone()),
            property_code: property.and_then(|p| p.code.clone()),
            property_name: property.and_then(|p| p.name.clone()),
            rental_type: facility
                .rental_information
                .as_ref()
                .and_then(|r| r.rental_type.as_ref())
                .and_then(|t| t.name.clone()),
        }
    }
}

/// All option rows produced by the latest search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    /// Property rows.
    pub properties: Vec<PropertyOption>,
    /// Building rows.
    pub buildings: Vec<BuildingOption>,
    /// Staircase rows.
    pub staircases: Vec<StaircaseOption>,
    /// Rental property rows.
    pub rental_properties: Vec<RentalPropertyOption>,
    /// Maintenance unit rows.
    pub maintenance_units: Vec<MaintenanceUnitOption>,
    /// Lease rows.
    pub leases: Vec<LeaseOption>,
    /// Tenant rows, one per contact code.
    pub tenants: Vec<TenantOption>,
    /// Parking space rows.
    pub parking_spaces: Vec<ParkingSpaceOption>,
    /// Facility rows.
    pub facilities: Vec<FacilityOption>,
}

impl OptionSet {
    /// No rows of any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.buildings.is_empty()
            && self.staircases.is_empty()
            && self.rental_properties.is_empty()
            && self.maintenance_units.is_empty()
            && self.leases.is_empty()
            && self.tenants.is_empty()
            && self.parking_spaces.is_empty()
            && self.facilities.is_empty()
    }

    /// Add tenant rows, skipping contact codes that are already present.
    pub fn add_tenants(&mut self, contacts: &[Contact]) {
        for contact in contacts {
            let tenant = TenantOption::from_contact(contact);

            if self
                .tenants
                .iter()
                .any(|existing| existing.contact_code == tenant.contact_code)
            {
                continue;
            }

            self.tenants.push(tenant);
        }
    }

    /// Property row with `id`.
    #[must_use]
    pub fn property(&self, id: Option<OptionId<PropertyOption>>) -> Option<&PropertyOption> {
        find(&self.properties, id)
    }

    /// Building row with `id`.
    #[must_use]
    pub fn building(&self, id: Option<OptionId<BuildingOption>>) -> Option<&BuildingOption> {
        find(&self.buildings, id)
    }

    /// Staircase row with `id`.
    #[must_use]
    pub fn staircase(&self, id: Option<OptionId<StaircaseOption>>) -> Option<&StaircaseOption> {
        find(&self.staircases, id)
    }

    /// Rental property row with `id`.
    #[must_use]
    pub fn rental_property(
        &self,
        id: Option<OptionId<RentalPropertyOption>>,
    ) -> Option<&RentalPropertyOption> {
        find(&self.rental_properties, id)
    }

    /// Maintenance unit row with `id`.
    #[must_use]
    pub fn maintenance_unit(
        &self,
        id: Option<OptionId<MaintenanceUnitOption>>,
    ) -> Option<&MaintenanceUnitOption> {
        find(&self.maintenance_units, id)
    }

    /// Lease row with `id`.
    #[must_use]
    pub fn lease(&self, id: Option<OptionId<LeaseOption>>) -> Option<&LeaseOption> {
        find(&self.leases, id)
    }

    /// Tenant row with `id`.
    #[must_use]
    pub fn tenant(&self, id: Option<OptionId<TenantOption>>) -> Option<&TenantOption> {
        find(&self.tenants, id)
    }

    /// Parking space row with `id`.
    #[must_use]
    pub fn parking_space(
        &self,
        id: Option<OptionId<ParkingSpaceOption>>,
    ) -> Option<&ParkingSpaceOption> {
        find(&self.parking_spaces, id)
    }

    /// Facility row with `id`.
    #[must_use]
    pub fn facility(&self, id: Option<OptionId<FacilityOption>>) -> Option<&FacilityOption> {
        find(&self.facilities, id)
    }

    /// First lease pointing at `rental_property`.
    #[must_use]
    pub fn lease_for_rental_property(
        &self,
        rental_property: OptionId<RentalPropertyOption>,
    ) -> Option<&LeaseOption> {
        self.leases
            .iter()
            .find(|lease| lease.rental_property() == Some(rental_property))
    }
}

/// Option rows currently chosen in the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionSelection {
    /// Chosen property.
    pub property: Option<OptionId<PropertyOption>>,
    /// Chosen building.
    pub building: Option<OptionId<BuildingOption>>,
    /// Chosen staircase.
    pub staircase: Option<OptionId<StaircaseOption>>,
    /// Chosen rental property.
    pub rental_property: Option<OptionId<RentalPropertyOption>>,
    /// Chosen maintenance unit.
    pub maintenance_unit: Option<OptionId<MaintenanceUnitOption>>,
    /// Chosen lease.
    pub lease: Option<OptionId<LeaseOption>>,
    /// Chosen tenant.
    pub tenant: Option<OptionId<TenantOption>>,
    /// Chosen parking space.
    pub parking_space: Option<OptionId<ParkingSpaceOption>>,
    /// Chosen facility.
    pub facility: Option<OptionId<FacilityOption>>,
}
