//! Domain logic for the medirec patient-records service.
//!
//! Everything here is pure: no database access and no HTTP types. The
//! `db` and `api` crates build on these types.

pub mod error;
pub mod pagination;
pub mod patient;
pub mod types;
