//! Post-fetch filters keyed by space caption.

use serde_json::Value;

use crate::api::models::{
    BOSTADSKONTRAKT, KOOPERATIV_HYRESRATT, LOKALKONTRAKT, MaintenanceUnit, P_PLATSKONTRAKT,
};

/// Keep the leases whose contract type fits `caption`, in their original order.
///
/// `Bilplats` keeps parking contracts and `Lokal` keeps commercial contracts.
/// Any other caption keeps residential contracts, falling back to cooperative
/// tenancies only when no residential contract is present. Entries that are
/// not objects or carry no usable `type` are dropped.
#[must_use]
pub fn filter_leases_on_location_type(leases: Vec<Value>, caption: &str) -> Vec<Value> {
    let typed: Vec<(String, Value)> = leases
        .into_iter()
        .filter_map(|entry| {
            let lease_type = entry.as_object()?.get("type")?.as_str()?.trim().to_string();

            (!lease_type.is_empty()).then_some((lease_type, entry))
        })
        .collect();

    let wanted = match caption {
        "Bilplats" => P_PLATSKONTRAKT,
        "Lokal" => LOKALKONTRAKT,
        _ if typed.iter().any(|(lease_type, _)| lease_type == BOSTADSKONTRAKT) => {
            BOSTADSKONTRAKT
        }
        _ => KOOPERATIV_HYRESRATT,
    };

    typed
        .into_iter()
        .filter(|(lease_type, _)| lease_type == wanted)
        .map(|(_, entry)| entry)
        .collect()
}

/// Keep the maintenance units whose `type` equals `caption` exactly.
#[must_use]
pub fn filter_maintenance_units(units: Vec<MaintenanceUnit>, caption: &str) -> Vec<MaintenanceUnit> {
    units
        .into_iter()
        .filter(|unit| unit.unit_type.as_deref() == Some(caption))
        .collect()
}
