//! Assignment models and DTOs.
//!
//! An assignment links an asset to a person and/or a location over
//! `[assigned_from, assigned_to)`. A row with `assigned_to = NULL` is open.

use assetman_core::lifecycle::{AssignmentRequest, UpdatePayload};
use assetman_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `asset_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub assignment_id: DbId,
    pub asset_id: DbId,
    pub person_id: Option<DbId>,
    pub location_id: Option<DbId>,
    pub assigned_from: Timestamp,
    pub assigned_to: Option<Timestamp>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Assignment {
    pub fn is_open(&self) -> bool {
        self.assigned_to.is_none()
    }
}

/// An assignment with the person and location names resolved, used by the
/// history endpoint and the asset detail view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentWithNames {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub assignment: Assignment,
    pub person: Option<String>,
    pub person_email: Option<String>,
    pub location: Option<String>,
}

/// DTO for creating an assignment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateAssignment {
    pub asset_id: DbId,
    pub person_id: Option<DbId>,
    pub location_id: Option<DbId>,
    /// Defaults to the commit time when omitted.
    pub assigned_from: Option<Timestamp>,
    pub assigned_to: Option<Timestamp>,
    #[validate(length(max = 500))]
    pub purpose: Option<String>,
    pub notes: Option<String>,
}

impl CreateAssignment {
    /// The subset of fields the lifecycle engine checks.
    pub fn as_request(&self) -> AssignmentRequest {
        AssignmentRequest {
            person_id: self.person_id,
            location_id: self.location_id,
            assigned_from: self.assigned_from,
            assigned_to: self.assigned_to,
        }
    }
}

/// Partial update for an assignment; setting `assigned_to` closes it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AssignmentPatch {
    pub assigned_to: Option<Timestamp>,
    #[validate(length(max = 500))]
    pub purpose: Option<String>,
    pub notes: Option<String>,
}

impl UpdatePayload for AssignmentPatch {
    fn is_empty(&self) -> bool {
        self.assigned_to.is_none() && self.purpose.is_none() && self.notes.is_none()
    }
}
