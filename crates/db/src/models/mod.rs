//! Row structs and request DTOs.
//!
//! Entity structs derive `FromRow` + `Serialize`; request payloads derive
//! `Deserialize` and, where they carry free-form input, `Validate`.

pub mod asset;
pub mod assignment;
pub mod lookup;
