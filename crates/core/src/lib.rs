//! Domain logic for the asset management service.
//!
//! Everything in this crate is free of I/O: the lifecycle engine, the role
//! gate, and the listing query model are plain functions over plain types so
//! that the repository and HTTP layers can share them.

pub mod error;
pub mod lifecycle;
pub mod listing;
pub mod normalize;
pub mod roles;
pub mod types;
