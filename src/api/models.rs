//! `OneCore` response models.
//!
//! Upstream payloads are loosely typed: most fields may be absent or `null`,
//! and codes, years and areas arrive as either strings or numbers. Every field
//! therefore deserializes leniently into an `Option`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) const BOSTADSKONTRAKT: &str = "Bostadskontrakt";
pub(crate) const KOOPERATIV_HYRESRATT: &str = "Kooperativ hyresrätt";
pub(crate) const P_PLATSKONTRAKT: &str = "P-Platskontrakt";
pub(crate) const LOKALKONTRAKT: &str = "Lokalkontrakt";

/// `{"content": ...}` wrapper around every successful response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub content: Option<T>,
}

/// Accept strings, numbers and booleans as text; `null` becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Accept `1`, `true` and `"1"` as a set flag.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_i64() == Some(1),
        Value::String(text) => text == "1",
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    })
}

/// Like [`lenient_flag`], but a missing or `null` flag stays unknown.
fn lenient_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(flag) => Some(flag),
        Value::Number(number) => Some(number.as_i64() == Some(1)),
        Value::String(text) => Some(text == "1" || text.eq_ignore_ascii_case("true")),
        Value::Array(_) | Value::Object(_) => None,
    })
}

/// Contract type of a lease, matched on the trimmed `type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseKind {
    /// `Bostadskontrakt`
    Residential,

    /// `Kooperativ hyresrätt`
    Cooperative,

    /// `P-Platskontrakt`
    ParkingSpace,

    /// `Lokalkontrakt`
    Facility,
}

impl LeaseKind {
    /// Classify a raw `type` string; unknown types have no kind.
    #[must_use]
    pub fn from_type(lease_type: &str) -> Option<Self> {
        match lease_type.trim() {
            BOSTADSKONTRAKT => Some(Self::Residential),
            KOOPERATIV_HYRESRATT => Some(Self::Cooperative),
            P_PLATSKONTRAKT => Some(Self::ParkingSpace),
            LOKALKONTRAKT => Some(Self::Facility),
            _ => None,
        }
    }

    /// Residential and cooperative leases both point at a residence.
    #[must_use]
    pub const fn is_residential(self) -> bool {
        matches!(self, Self::Residential | Self::Cooperative)
    }
}

/// A lease with its contacts, as returned by the lease endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lease {
    /// Lease id, usually `<rental id>/<lease number>`.
    #[serde(deserialize_with = "lenient_string")]
    pub lease_id: Option<String>,

    /// Sequence number of the lease on its rental object.
    #[serde(deserialize_with = "lenient_string")]
    pub lease_number: Option<String>,

    /// Raw contract type, possibly padded with whitespace.
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub lease_type: Option<String>,

    /// Rental id of the leased object.
    #[serde(deserialize_with = "lenient_string")]
    pub rental_property_id: Option<String>,

    /// First day of the lease.
    #[serde(deserialize_with = "lenient_string")]
    pub lease_start_date: Option<String>,

    /// Last debit date, shown as the lease end date.
    #[serde(deserialize_with = "lenient_string")]
    pub last_debit_date: Option<String>,

    /// Day the contract was signed.
    #[serde(deserialize_with = "lenient_string")]
    pub contract_date: Option<String>,

    /// Day the lease was approved.
    #[serde(deserialize_with = "lenient_string")]
    pub approval_date: Option<String>,

    /// Contacts on the lease; `null` becomes empty.
    #[serde(deserialize_with = "lenient_tenants")]
    pub tenants: Vec<Contact>,
}

impl Lease {
    /// Parsed contract type.
    #[must_use]
    pub fn kind(&self) -> Option<LeaseKind> {
        self.lease_type.as_deref().and_then(LeaseKind::from_type)
    }
}

fn lenient_tenants<'de, D>(deserializer: D) -> Result<Vec<Contact>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Contact>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A tenant or other contact attached to a lease.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    /// `OneCore` contact code, e.g. `P123456`.
    #[serde(deserialize_with = "lenient_string")]
    pub contact_code: Option<String>,

    /// Internal contact key.
    #[serde(deserialize_with = "lenient_string")]
    pub contact_key: Option<String>,

    /// Given name.
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: Option<String>,

    /// Family name.
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: Option<String>,

    /// Full name, used when first or last name is missing.
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: Option<String>,

    /// Swedish personal identity number.
    #[serde(deserialize_with = "lenient_string")]
    pub national_registration_number: Option<String>,

    /// Email address.
    #[serde(deserialize_with = "lenient_string")]
    pub email_address: Option<String>,

    /// Phone numbers; anything but a list is ignored.
    #[serde(deserialize_with = "lenient_phone_numbers")]
    pub phone_numbers: Option<Vec<PhoneNumber>>,

    /// Whether the contact is a tenant rather than another party.
    #[serde(deserialize_with = "lenient_optional_flag")]
    pub is_tenant: Option<bool>,

    /// Tenant needs special attention when visited.
    #[serde(deserialize_with = "lenient_optional_flag")]
    pub special_attention: Option<bool>,
}

/// Phone numbers as a list; anything else, and entries that are not
/// objects, are dropped.
fn lenient_phone_numbers<'de, D>(deserializer: D) -> Result<Option<Vec<PhoneNumber>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    Ok(Some(
        entries
            .into_iter()
            .filter_map(|entry| PhoneNumber::deserialize(entry).ok())
            .collect(),
    ))
}

impl Contact {
    /// First and last name when both are present, otherwise the full name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                format!("{first} {last}")
            }
            _ => self.full_name.clone().unwrap_or_default(),
        }
    }

    /// First phone number flagged as the main number.
    #[must_use]
    pub fn main_phone_number(&self) -> Option<&str> {
        self.phone_numbers
            .iter()
            .flatten()
            .find(|number| number.is_main_number)
            .and_then(|number| number.phone_number.as_deref())
    }
}

/// A contact phone number.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneNumber {
    /// Number as entered.
    #[serde(deserialize_with = "lenient_string")]
    pub phone_number: Option<String>,

    /// Set for the contact's main number.
    #[serde(deserialize_with = "lenient_flag")]
    pub is_main_number: bool,
}

/// `{code, name}` reference used for types, properties and buildings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CodeName {
    /// Short code.
    #[serde(deserialize_with = "lenient_string")]
    pub code: Option<String>,

    /// Display name.
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

/// Rental details shared by residences and facilities.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RentalInformation {
    /// Rental object id.
    #[serde(deserialize_with = "lenient_string")]
    pub rental_id: Option<String>,

    /// Rental object type.
    #[serde(rename = "type")]
    pub rental_type: Option<CodeName>,
}

/// Residence accessibility flags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Accessibility {
    /// Building has an elevator.
    pub elevator: Option<bool>,
}

/// A residence (apartment) looked up by rental id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Residence {
    /// Apartment code.
    #[serde(deserialize_with = "lenient_string")]
    pub code: Option<String>,

    /// Street address of the residence.
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Residence type, e.g. `2 rum och kök`.
    #[serde(rename = "type")]
    pub residence_type: Option<CodeName>,

    /// Living area in square metres.
    #[serde(deserialize_with = "lenient_string")]
    pub area_size: Option<String>,

    /// Entrance or stairwell letter.
    #[serde(deserialize_with = "lenient_string")]
    pub entrance: Option<String>,

    /// Floor.
    #[serde(deserialize_with = "lenient_string")]
    pub floor: Option<String>,

    /// Accessibility flags.
    pub accessibility: Option<Accessibility>,

    /// Rental object information.
    pub rental_information: Option<RentalInformation>,

    /// Property the residence belongs to.
    pub property: Option<CodeName>,

    /// Building the residence belongs to.
    pub building: Option<CodeName>,
}

impl Residence {
    /// Rental object id, when present.
    #[must_use]
    pub fn rental_id(&self) -> Option<&str> {
        self.rental_information
            .as_ref()
            .and_then(|info| info.rental_id.as_deref())
    }

    /// Code of the owning property.
    #[must_use]
    pub fn property_code(&self) -> Option<&str> {
        self.property.as_ref().and_then(|p| p.code.as_deref())
    }

    /// Whether the building has an elevator; unknown counts as no.
    #[must_use]
    pub fn has_elevator(&self) -> bool {
        self.accessibility
            .as_ref()
            .and_then(|a| a.elevator)
            .unwrap_or(false)
    }
}

/// Construction and renovation years of a building.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Construction {
    /// Year the building was built.
    #[serde(deserialize_with = "lenient_string")]
    pub construction_year: Option<String>,

    /// Year of the latest renovation.
    #[serde(deserialize_with = "lenient_string")]
    pub renovation_year: Option<String>,
}

/// A building from the building or property lookups.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Building {
    /// `OneCore` building id.
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,

    /// Building code, e.g. `705-011`.
    #[serde(deserialize_with = "lenient_string")]
    pub code: Option<String>,

    /// Building name.
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Building type.
    pub building_type: Option<CodeName>,

    /// Construction details.
    pub construction: Option<Construction>,
}

impl Building {
    /// Name of the building type.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.building_type.as_ref().and_then(|t| t.name.as_deref())
    }

    /// Construction year as text.
    #[must_use]
    pub fn construction_year(&self) -> Option<&str> {
        self.construction
            .as_ref()
            .and_then(|c| c.construction_year.as_deref())
    }

    /// Renovation year as text.
    #[must_use]
    pub fn renovation_year(&self) -> Option<&str> {
        self.construction
            .as_ref()
            .and_then(|c| c.renovation_year.as_deref())
    }
}

/// Floor plan and elevator access of a staircase.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaircaseFeatures {
    /// Floor plan description.
    #[serde(deserialize_with = "lenient_string")]
    pub floor_plan: Option<String>,

    /// Staircase is reachable by elevator.
    pub accessible_by_elevator: Option<bool>,
}

/// A staircase (uppgång) in a building.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Staircase {
    /// `OneCore` staircase id.
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,

    /// Staircase code.
    #[serde(deserialize_with = "lenient_string")]
    pub code: Option<String>,

    /// Staircase name.
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Floor plan and accessibility.
    pub features: Option<StaircaseFeatures>,
}

/// A property (fastighet) from the property search.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Property {
    /// `OneCore` property id.
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,

    /// Property code.
    #[serde(deserialize_with = "lenient_string")]
    pub code: Option<String>,

    /// Registered property designation.
    #[serde(deserialize_with = "lenient_string")]
    pub designation: Option<String>,
}

/// Shared space such as a laundry room or playground.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MaintenanceUnit {
    /// `OneCore` maintenance unit id.
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,

    /// Maintenance unit code.
    #[serde(deserialize_with = "lenient_string")]
    pub code: Option<String>,

    /// Space caption, e.g. `Tvättstuga`.
    #[serde(deserialize_with = "lenient_string")]
    pub caption: Option<String>,

    /// Unit type.
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub unit_type: Option<String>,
}

/// Parking space details nested in a parking lookup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingSpaceInfo {
    /// Parking space name.
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Parking space code.
    #[serde(deserialize_with = "lenient_string")]
    pub code: Option<String>,

    /// Parking space type.
    pub parking_space_type: Option<CodeName>,

    /// Parking number.
    #[serde(deserialize_with = "lenient_string")]
    pub parking_number: Option<String>,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Street and number.
    #[serde(deserialize_with = "lenient_string")]
    pub street_address: Option<String>,

    /// Postal code.
    #[serde(deserialize_with = "lenient_string")]
    pub postal_code: Option<String>,

    /// City.
    #[serde(deserialize_with = "lenient_string")]
    pub city: Option<String>,
}

/// A parking space looked up by rental id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingSpace {
    /// Rental object id.
    #[serde(deserialize_with = "lenient_string")]
    pub rental_id: Option<String>,

    /// Code of the owning property.
    #[serde(deserialize_with = "lenient_string")]
    pub property_code: Option<String>,

    /// Name of the owning property.
    #[serde(deserialize_with = "lenient_string")]
    pub property_name: Option<String>,

    /// Parking space details.
    pub parking_space: Option<ParkingSpaceInfo>,

    /// Postal address of the parking space.
    pub address: Option<Address>,
}

/// Commercial premises (lokal).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Facility {
    /// Facility code.
    #[serde(deserialize_with = "lenient_string")]
    pub code: Option<String>,

    /// Facility name.
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Facility type.
    #[serde(rename = "type")]
    pub facility_type: Option<CodeName>,

    /// Area in square metres.
    #[serde(deserialize_with = "lenient_string")]
    pub area: Option<String>,

    /// Building the facility is in.
    pub building: Option<CodeName>,

    /// Property the facility belongs to.
    pub property: Option<CodeName>,

    /// Rental object information.
    pub rental_information: Option<RentalInformation>,
}

/// Everything looked up for a single lease.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    /// The lease itself.
    pub lease: Lease,
    /// Residence for residential leases.
    pub rental_property: Option<Residence>,
    /// Parking space for parking leases.
    pub parking_space: Option<ParkingSpace>,
    /// Facility for commercial leases.
    pub facility: Option<Facility>,
    /// Shared spaces of the leased residence.
    pub maintenance_units: Vec<MaintenanceUnit>,
}

/// A property with either its buildings or its matching maintenance units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySearchResult {
    /// The matched property.
    pub property: Property,
    /// Buildings on the property.
    pub buildings: Vec<Building>,
    /// Maintenance units on the property matching the space caption.
    pub maintenance_units: Vec<MaintenanceUnit>,
}

/// A building with the children its space caption asks for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildingSearchResult {
    /// The matched building.
    pub building: Building,
    /// Maintenance units in the building matching the space caption.
    pub maintenance_units: Vec<MaintenanceUnit>,
    /// Staircases of the building.
    pub staircases: Vec<Staircase>,
}
