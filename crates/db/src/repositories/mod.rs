//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod blood_test_repo;
pub mod patient_repo;

pub use blood_test_repo::BloodTestRepo;
pub use patient_repo::PatientRepo;
