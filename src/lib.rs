//! `OneCore` Maintenance
//!
//! Maintenance request integration with the `OneCore` property system: an
//! authenticating API client, the search handlers behind the request form,
//! promotion of search options to permanent records, the stage workflow and
//! the errand webhook.

pub mod api;
pub mod config;
pub mod maintenance;
pub mod observability;
pub mod report;
pub mod search;
pub mod settings;
pub mod uuids;

#[cfg(test)]
mod test_helpers;
