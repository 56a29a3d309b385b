//! # FieldSync Core
//!
//! Domain models for the FieldSync field-service platform: technician
//! availability (the half-day slot calendar and its toggle rules), scheduled
//! commitments, technicians, and notifications, together with the shared
//! error taxonomy.
//!
//! This crate is pure data and logic. It performs no I/O, so everything in
//! it can be exercised by plain unit tests.

pub mod errors;
pub mod models;
