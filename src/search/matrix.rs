//! `(search type, space caption)` routing table.

use std::{fmt, sync::Arc};

use crate::{
    api::PropertyApi,
    search::{SearchHandler, SearchType, SpaceCaption},
};

/// Handler responsible for a supported search combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Property name and property-level lease searches.
    Property,
    /// Building code and building-level lease searches.
    Building,
    /// Lease searches for apartments and shared spaces.
    RentalProperty,
    /// Lease searches for parking spaces.
    ParkingSpace,
    /// Lease searches for commercial premises.
    Facility,
}

impl HandlerKind {
    /// Handler for `search_type` searched under `caption`, `None` when the
    /// combination is not offered.
    #[must_use]
    pub const fn resolve(search_type: SearchType, caption: SpaceCaption) -> Option<Self> {
        use SpaceCaption as C;

        match search_type {
            SearchType::PropertyName => match caption {
                C::Fastighet
                | C::Byggnad
                | C::Ovrigt
                | C::Tvattstuga
                | C::Miljobod
                | C::Lekplats
                | C::Lokal => Some(Self::Property),
                C::Lagenhet
                | C::Uppgang
                | C::Bilplats
                | C::Vind
                | C::Kallare
                | C::Cykelforrad
                | C::GardenUtomhus => None,
            },
            SearchType::BuildingCode => match caption {
                C::Byggnad
                | C::Uppgang
                | C::Vind
                | C::Kallare
                | C::Cykelforrad
                | C::GardenUtomhus
                | C::Ovrigt
                | C::Tvattstuga
                | C::Miljobod
                | C::Lekplats
                | C::Lokal => Some(Self::Building),
                C::Fastighet | C::Lagenhet | C::Bilplats => None,
            },
            SearchType::Pnr
            | SearchType::ContactCode
            | SearchType::LeaseId
            | SearchType::RentalObjectId => Some(match caption {
                C::Fastighet => Self::Property,
                C::Byggnad
                | C::Uppgang
                | C::Vind
                | C::Kallare
                | C::Cykelforrad
                | C::GardenUtomhus
                | C::Ovrigt => Self::Building,
                C::Lagenhet | C::Tvattstuga | C::Miljobod | C::Lekplats => Self::RentalProperty,
                C::Lokal => Self::Facility,
                C::Bilplats => Self::ParkingSpace,
            }),
        }
    }

    /// Whether the pair has a handler.
    #[must_use]
    pub const fn is_supported(search_type: SearchType, caption: SpaceCaption) -> bool {
        Self::resolve(search_type, caption).is_some()
    }

    /// Every supported combination with its handler, in form order.
    #[must_use]
    pub fn supported_combinations() -> Vec<(SearchType, SpaceCaption, Self)> {
        SearchType::ALL
            .into_iter()
            .flat_map(|search_type| {
                SpaceCaption::ALL.into_iter().filter_map(move |caption| {
                    Self::resolve(search_type, caption).map(|kind| (search_type, caption, kind))
                })
            })
            .collect()
    }

    /// Search types this handler implements.
    #[must_use]
    pub const fn accepts(self, search_type: SearchType) -> bool {
        match self {
            Self::Property => {
                search_type.is_lease_search() || matches!(search_type, SearchType::PropertyName)
            }
            Self::Building => {
                search_type.is_lease_search() || matches!(search_type, SearchType::BuildingCode)
            }
            Self::RentalProperty | Self::ParkingSpace | Self::Facility => {
                search_type.is_lease_search()
            }
        }
    }

    /// A handler of this kind using `api` for its lookups.
    #[must_use]
    pub fn bind(self, api: Arc<dyn PropertyApi>) -> SearchHandler {
        SearchHandler::new(self, api)
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Property => "Property",
            Self::Building => "Building",
            Self::RentalProperty => "RentalProperty",
            Self::ParkingSpace => "ParkingSpace",
            Self::Facility => "Facility",
        })
    }
}
