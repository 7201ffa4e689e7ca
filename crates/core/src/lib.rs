//! # Pet Clinic Core
//!
//! Domain types and the pure scheduling rules of the clinic: the daily slot
//! catalog, slot availability, booking validation and duplicate-name checks.
//! Nothing in this crate performs I/O.

pub mod booking;
pub mod errors;
pub mod models;
pub mod person;
pub mod slots;
