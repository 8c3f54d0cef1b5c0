//! HTTP service for the IT asset registry.
//!
//! Exposes assets, their assignment history and lookup data over a JSON API
//! guarded by role-based bearer tokens.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
