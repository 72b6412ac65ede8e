//! Demo reference data
//!
//! Provides:
//! - The exhibition catalog, rebuilt on every store open
//! - Demo workshops seeded into an empty workshop collection

mod catalog;

pub use catalog::{demo_workshops, exhibition_catalog, DEMO_EXHIBITIONS, WORKSHOPS_PER_EXHIBITION};
