//! Read-only reference data: asset types, statuses, org units, locations.

use assetman_core::lifecycle::{resolve_state, AssetState, LifecycleError};
use assetman_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `asset_types` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetType {
    pub type_id: DbId,
    pub name: String,
    pub category: String,
}

/// A row from the `asset_status` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetStatus {
    pub status_id: DbId,
    pub name: String,
    pub is_active: bool,
}

impl AssetStatus {
    /// The lifecycle state this row names.
    pub fn state(&self) -> Result<AssetState, LifecycleError> {
        resolve_state(&self.name)
    }
}

/// A row from the `org_units` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrgUnit {
    pub org_unit_id: DbId,
    pub name: String,
    pub parent_org_unit_id: Option<DbId>,
}

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub location_id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub room: Option<String>,
    pub rack: Option<String>,
    pub rack_unit: Option<String>,
}

/// Response body for `GET /lookups`.
#[derive(Debug, Clone, Serialize)]
pub struct Lookups {
    pub types: Vec<AssetType>,
    pub statuses: Vec<AssetStatus>,
    pub org_units: Vec<OrgUnit>,
    pub locations: Vec<Location>,
}
