//! Search types, space captions and validated queries.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::search::ValidationError;

/// What the search value identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchType {
    /// Lease id, e.g. `306-001-01-0101/03`.
    #[serde(rename = "leaseId")]
    LeaseId,

    /// Rental object id, e.g. `306-001-01-0101`.
    #[serde(rename = "rentalObjectId")]
    RentalObjectId,

    /// `OneCore` contact code, e.g. `P123456`.
    #[serde(rename = "contactCode")]
    ContactCode,

    /// Swedish personal identity number, 12 digits.
    #[serde(rename = "pnr")]
    Pnr,

    /// Building code, e.g. `705-011`.
    #[serde(rename = "buildingCode")]
    BuildingCode,

    /// Property name, at least three characters.
    #[serde(rename = "propertyName")]
    PropertyName,
}

impl SearchType {
    /// Every search type, in form order.
    pub const ALL: [Self; 6] = [
        Self::LeaseId,
        Self::RentalObjectId,
        Self::ContactCode,
        Self::Pnr,
        Self::BuildingCode,
        Self::PropertyName,
    ];

    /// Search types answered through the lease endpoints.
    pub const LEASE_SEARCHES: [Self; 4] = [
        Self::Pnr,
        Self::ContactCode,
        Self::LeaseId,
        Self::RentalObjectId,
    ];

    /// Wire name used by the form and the `OneCore` API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeaseId => "leaseId",
            Self::RentalObjectId => "rentalObjectId",
            Self::ContactCode => "contactCode",
            Self::Pnr => "pnr",
            Self::BuildingCode => "buildingCode",
            Self::PropertyName => "propertyName",
        }
    }

    /// Label shown in the search form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LeaseId => "Kontraktsnummer",
            Self::RentalObjectId => "Hyresobjekt",
            Self::ContactCode => "Kundnummer",
            Self::Pnr => "Personnummer (12 siffror)",
            Self::BuildingCode => "Byggnadskod",
            Self::PropertyName => "Fastighetsnamn",
        }
    }

    /// Searches that go through the lease endpoints.
    #[must_use]
    pub const fn is_lease_search(self) -> bool {
        matches!(
            self,
            Self::Pnr | Self::ContactCode | Self::LeaseId | Self::RentalObjectId
        )
    }

    /// Format check applied to a raw value before any lookup. Lengths are
    /// counted in characters.
    #[must_use]
    pub fn validate(self, value: &str) -> bool {
        let length = value.chars().count();

        match self {
            Self::LeaseId | Self::RentalObjectId => length >= 8,
            Self::ContactCode | Self::BuildingCode => length >= 6,
            Self::Pnr => length == 12 && (value.starts_with("19") || value.starts_with("20")),
            Self::PropertyName => length >= 3,
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|search_type| search_type.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownSearchType(s.to_string()))
    }
}

/// Kind of physical space a maintenance request concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceCaption {
    /// A whole building.
    #[serde(rename = "Byggnad")]
    Byggnad,

    /// A whole property.
    #[serde(rename = "Fastighet")]
    Fastighet,

    /// An apartment.
    #[serde(rename = "Lägenhet")]
    Lagenhet,

    /// Laundry room.
    #[serde(rename = "Tvättstuga")]
    Tvattstuga,

    /// Staircase.
    #[serde(rename = "Uppgång")]
    Uppgang,

    /// Waste room.
    #[serde(rename = "Miljöbod")]
    Miljobod,

    /// Playground.
    #[serde(rename = "Lekplats")]
    Lekplats,

    /// Commercial premises.
    #[serde(rename = "Lokal")]
    Lokal,

    /// Parking space.
    #[serde(rename = "Bilplats")]
    Bilplats,

    /// Attic.
    #[serde(rename = "Vind")]
    Vind,

    /// Basement.
    #[serde(rename = "Källare")]
    Kallare,

    /// Bike storage.
    #[serde(rename = "Cykelförråd")]
    Cykelforrad,

    /// Anything else in a building.
    #[serde(rename = "Övrigt")]
    Ovrigt,

    /// Courtyard or other outdoor area.
    #[serde(rename = "Gården/Utomhus")]
    GardenUtomhus,
}

impl SpaceCaption {
    /// Every caption in form order.
    pub const ALL: [Self; 14] = [
        Self::Byggnad,
        Self::Fastighet,
        Self::Lagenhet,
        Self::Tvattstuga,
        Self::Uppgang,
        Self::Miljobod,
        Self::Lekplats,
        Self::Lokal,
        Self::Bilplats,
        Self::Vind,
        Self::Kallare,
        Self::Cykelforrad,
        Self::Ovrigt,
        Self::GardenUtomhus,
    ];

    /// Captions that map onto a building.
    pub const BUILDING: [Self; 7] = [
        Self::Byggnad,
        Self::Uppgang,
        Self::Vind,
        Self::Kallare,
        Self::Cykelforrad,
        Self::GardenUtomhus,
        Self::Ovrigt,
    ];

    /// Captions that map onto a `OneCore` maintenance unit.
    pub const MAINTENANCE_UNIT: [Self; 3] = [Self::Tvattstuga, Self::Miljobod, Self::Lekplats];

    /// Caption as shown and sent to `OneCore`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Byggnad => "Byggnad",
            Self::Fastighet => "Fastighet",
            Self::Lagenhet => "Lägenhet",
            Self::Tvattstuga => "Tvättstuga",
            Self::Uppgang => "Uppgång",
            Self::Miljobod => "Miljöbod",
            Self::Lekplats => "Lekplats",
            Self::Lokal => "Lokal",
            Self::Bilplats => "Bilplats",
            Self::Vind => "Vind",
            Self::Kallare => "Källare",
            Self::Cykelforrad => "Cykelförråd",
            Self::Ovrigt => "Övrigt",
            Self::GardenUtomhus => "Gården/Utomhus",
        }
    }

    /// Captions that map onto a maintenance unit.
    #[must_use]
    pub const fn is_maintenance_unit(self) -> bool {
        matches!(self, Self::Tvattstuga | Self::Miljobod | Self::Lekplats)
    }

    /// Captions that map onto a building.
    #[must_use]
    pub const fn is_building(self) -> bool {
        matches!(
            self,
            Self::Byggnad
                | Self::Uppgang
                | Self::Vind
                | Self::Kallare
                | Self::Cykelforrad
                | Self::GardenUtomhus
                | Self::Ovrigt
        )
    }
}

impl fmt::Display for SpaceCaption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpaceCaption {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|caption| caption.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownSpaceCaption(s.to_string()))
    }
}

/// A search that passed its format check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    search_type: SearchType,
    value: String,
    caption: SpaceCaption,
}

impl SearchQuery {
    /// Validate `value` for `search_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValue`] when the value fails the
    /// format check.
    pub fn new(
        search_type: SearchType,
        value: impl Into<String>,
        caption: SpaceCaption,
    ) -> Result<Self, ValidationError> {
        let value = value.into();

        if !search_type.validate(&value) {
            return Err(ValidationError::InvalidValue { search_type, value });
        }

        Ok(Self {
            search_type,
            value,
            caption,
        })
    }

    /// Validated search type.
    #[must_use]
    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    /// Trimmed search value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Space caption.
    #[must_use]
    pub fn caption(&self) -> SpaceCaption {
        self.caption
    }
}
