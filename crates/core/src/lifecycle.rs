//! Asset lifecycle engine.
//!
//! Holds the status transition table and the preconditions for creating and
//! updating assignments. The engine never touches storage: callers read the
//! current state through the repositories, resolve status ids to names once,
//! and hand the resulting [`AssetState`] values to the validators here.
//!
//! Transition rules:
//! - `in_stock` -> `in_use`, `repair`, `retired`
//! - `in_use`   -> `in_stock`, `repair`, `retired`
//! - `repair`   -> `in_use`, `retired`
//! - `retired`  -> (terminal)
//!
//! Setting a status to its current value is always accepted and does not
//! count as a transition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status names
// ---------------------------------------------------------------------------

pub const STATUS_IN_STOCK: &str = "in_stock";
pub const STATUS_IN_USE: &str = "in_use";
pub const STATUS_REPAIR: &str = "repair";
pub const STATUS_RETIRED: &str = "retired";

/// Lifecycle state of an asset, keyed by the status name stored in the
/// `asset_status` lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetState {
    InStock,
    InUse,
    Repair,
    Retired,
}

impl AssetState {
    pub const ALL: [AssetState; 4] = [
        AssetState::InStock,
        AssetState::InUse,
        AssetState::Repair,
        AssetState::Retired,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AssetState::InStock => STATUS_IN_STOCK,
            AssetState::InUse => STATUS_IN_USE,
            AssetState::Repair => STATUS_REPAIR,
            AssetState::Retired => STATUS_RETIRED,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// States reachable from `self` in one transition (excluding `self`).
    pub fn allowed_next(self) -> &'static [AssetState] {
        match self {
            AssetState::InStock => &[AssetState::InUse, AssetState::Repair, AssetState::Retired],
            AssetState::InUse => &[AssetState::InStock, AssetState::Repair, AssetState::Retired],
            AssetState::Repair => &[AssetState::InUse, AssetState::Retired],
            AssetState::Retired => &[],
        }
    }

    pub fn can_transition_to(self, next: AssetState) -> bool {
        next == self || self.allowed_next().contains(&next)
    }
}

impl fmt::Display for AssetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssetState {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| LifecycleError::UnknownStatus(format!("'{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Rejections produced by the lifecycle engine. Each one is terminal for the
/// request and its message is shown to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("Unknown status {0}")]
    UnknownStatus(String),

    #[error("Invalid status transition from '{from}' to '{to}'")]
    InvalidTransition { from: AssetState, to: AssetState },

    #[error("Asset is retired and cannot be assigned")]
    AssetRetired,

    #[error("Either person_id or location_id must be provided")]
    MissingTarget,

    #[error("assigned_to must be greater than assigned_from")]
    InvalidRange,

    #[error("No fields provided for update")]
    EmptyUpdate,
}

impl LifecycleError {
    /// Stable machine-readable code for the HTTP error body.
    pub fn code(&self) -> &'static str {
        match self {
            LifecycleError::UnknownStatus(_) => "UNKNOWN_STATUS",
            LifecycleError::InvalidTransition { .. } => "INVALID_TRANSITION",
            LifecycleError::AssetRetired => "ASSET_RETIRED",
            LifecycleError::MissingTarget => "MISSING_TARGET",
            LifecycleError::InvalidRange => "INVALID_RANGE",
            LifecycleError::EmptyUpdate => "EMPTY_UPDATE",
        }
    }
}

// ---------------------------------------------------------------------------
// Status changes
// ---------------------------------------------------------------------------

/// Resolve a status name read from the lookup table into an [`AssetState`].
pub fn resolve_state(name: &str) -> Result<AssetState, LifecycleError> {
    name.parse()
}

/// Validate that an asset in `current` may move to `requested`.
pub fn validate_status_change(
    current: AssetState,
    requested: AssetState,
) -> Result<(), LifecycleError> {
    if current.can_transition_to(requested) {
        Ok(())
    } else {
        Err(LifecycleError::InvalidTransition {
            from: current,
            to: requested,
        })
    }
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

/// The fields of an assignment-create payload the engine inspects.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentRequest {
    pub person_id: Option<DbId>,
    pub location_id: Option<DbId>,
    pub assigned_from: Option<Timestamp>,
    pub assigned_to: Option<Timestamp>,
}

/// Validate that a new assignment may be recorded for an asset in `current`.
///
/// Checks run in order: retired asset, missing target, inverted range. An
/// omitted `assigned_from` is filled in by the database at insert time, so
/// the range is only checked when both ends are supplied.
pub fn validate_assignment_create(
    current: AssetState,
    request: &AssignmentRequest,
) -> Result<(), LifecycleError> {
    if current == AssetState::Retired {
        return Err(LifecycleError::AssetRetired);
    }
    if request.person_id.is_none() && request.location_id.is_none() {
        return Err(LifecycleError::MissingTarget);
    }
    if let (Some(from), Some(to)) = (request.assigned_from, request.assigned_to) {
        validate_range(from, to)?;
    }
    Ok(())
}

/// An assignment interval must end strictly after it starts.
pub fn validate_range(from: Timestamp, to: Timestamp) -> Result<(), LifecycleError> {
    if to <= from {
        Err(LifecycleError::InvalidRange)
    } else {
        Ok(())
    }
}

/// A partial-update payload whose emptiness can be checked.
pub trait UpdatePayload {
    /// `true` when no field is set.
    fn is_empty(&self) -> bool;
}

/// Reject a patch that sets nothing.
pub fn ensure_non_empty<P: UpdatePayload + ?Sized>(patch: &P) -> Result<(), LifecycleError> {
    if patch.is_empty() {
        Err(LifecycleError::EmptyUpdate)
    } else {
        Ok(())
    }
}

/// Assignment updates carry no transition rules; only an empty patch is refused.
pub fn validate_assignment_update<P: UpdatePayload + ?Sized>(
    patch: &P,
) -> Result<(), LifecycleError> {
    ensure_non_empty(patch)
}
