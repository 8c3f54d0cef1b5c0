//! Asset models and DTOs.

use assetman_core::error::CoreError;
use assetman_core::lifecycle::UpdatePayload;
use assetman_core::normalize::{normalize_asset_tag, normalize_currency};
use assetman_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::assignment::AssignmentWithNames;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub asset_id: DbId,
    pub asset_tag: String,
    pub type_id: DbId,
    pub status_id: DbId,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub currency: Option<String>,
    pub warranty_end: Option<NaiveDate>,
    pub owner_org_unit_id: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An asset with its lookup names resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub asset: Asset,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub type_name: String,
    #[sqlx(rename = "status")]
    #[serde(rename = "status")]
    pub status_name: String,
    pub owner_org_unit: Option<String>,
}

/// Response body for `GET /assets/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct AssetWithAssignment {
    #[serde(flatten)]
    pub detail: AssetDetail,
    pub open_assignment: Option<AssignmentWithNames>,
}

/// One row of the asset listing: the asset joined with at most one open
/// assignment. Assignment-derived fields are `None` when nothing is open.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetListItem {
    pub asset_id: DbId,
    pub asset_tag: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub type_name: String,
    #[sqlx(rename = "status")]
    #[serde(rename = "status")]
    pub status_name: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub owner_org_unit_id: Option<DbId>,
    pub owner_org_unit: Option<String>,
    pub updated_at: Timestamp,
    pub assigned: bool,
    pub assignment_id: Option<DbId>,
    pub assigned_from: Option<Timestamp>,
    pub assigned_to: Option<Timestamp>,
    pub person_id: Option<DbId>,
    pub person: Option<String>,
    pub person_email: Option<String>,
    pub location_id: Option<DbId>,
    pub location: Option<String>,
    pub location_room: Option<String>,
    pub location_rack: Option<String>,
    pub location_rack_unit: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating an asset. Any valid status may be chosen as the initial one.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 64))]
    pub asset_tag: String,
    pub type_id: DbId,
    pub status_id: DbId,
    #[validate(length(max = 255))]
    pub manufacturer: Option<String>,
    #[validate(length(max = 255))]
    pub model: Option<String>,
    #[validate(length(max = 255))]
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub currency: Option<String>,
    pub warranty_end: Option<NaiveDate>,
    pub owner_org_unit_id: Option<DbId>,
    pub notes: Option<String>,
}

impl CreateAsset {
    /// Trim the tag, uppercase the currency, and reject negative prices.
    pub fn normalized(mut self) -> Result<Self, CoreError> {
        self.asset_tag = normalize_asset_tag(&self.asset_tag)?;
        self.currency = self.currency.as_deref().map(normalize_currency).transpose()?;
        check_price(self.purchase_price)?;
        Ok(self)
    }
}

/// Partial update for an asset. Only populated fields are written; a field
/// cannot be cleared back to NULL through this payload.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AssetPatch {
    #[validate(length(min = 1, max = 64))]
    pub asset_tag: Option<String>,
    pub type_id: Option<DbId>,
    pub status_id: Option<DbId>,
    #[validate(length(max = 255))]
    pub manufacturer: Option<String>,
    #[validate(length(max = 255))]
    pub model: Option<String>,
    #[validate(length(max = 255))]
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub currency: Option<String>,
    pub warranty_end: Option<NaiveDate>,
    pub owner_org_unit_id: Option<DbId>,
    pub notes: Option<String>,
}

impl AssetPatch {
    pub fn normalized(mut self) -> Result<Self, CoreError> {
        self.asset_tag = self.asset_tag.as_deref().map(normalize_asset_tag).transpose()?;
        self.currency = self.currency.as_deref().map(normalize_currency).transpose()?;
        check_price(self.purchase_price)?;
        Ok(self)
    }
}

impl UpdatePayload for AssetPatch {
    fn is_empty(&self) -> bool {
        self.asset_tag.is_none()
            && self.type_id.is_none()
            && self.status_id.is_none()
            && self.manufacturer.is_none()
            && self.model.is_none()
            && self.serial_number.is_none()
            && self.description.is_none()
            && self.purchase_date.is_none()
            && self.purchase_price.is_none()
            && self.currency.is_none()
            && self.warranty_end.is_none()
            && self.owner_org_unit_id.is_none()
            && self.notes.is_none()
    }
}

fn check_price(price: Option<Decimal>) -> Result<(), CoreError> {
    match price {
        Some(p) if p < Decimal::ZERO => Err(CoreError::Validation(
            "purchase_price must not be negative".into(),
        )),
        _ => Ok(()),
    }
}
