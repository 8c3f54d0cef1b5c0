//! Small response bodies shared by the write endpoints.
//!
//! Listing and detail endpoints return their payloads directly without an
//! envelope; writes answer with the id of the affected record.

use assetman_core::types::DbId;
use serde::Serialize;

/// `{ "asset_id": N }`
#[derive(Debug, Serialize)]
pub struct AssetIdResponse {
    pub asset_id: DbId,
}

/// `{ "assignment_id": N }`
#[derive(Debug, Serialize)]
pub struct AssignmentIdResponse {
    pub assignment_id: DbId,
}
