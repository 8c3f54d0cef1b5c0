//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! a [`sqlx::PgExecutor`] as the first argument: `&PgPool` for standalone
//! reads, `&mut *tx` when the call is part of a request transaction.

pub mod asset_repo;
pub mod assignment_repo;
pub mod lookup_repo;

pub use asset_repo::AssetRepo;
pub use assignment_repo::AssignmentRepo;
pub use lookup_repo::LookupRepo;
