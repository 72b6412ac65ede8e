//! GreenWave Store - file-backed persistence for the ticketing engine
//!
//! Provides:
//! - One JSON snapshot file per entity collection, replaced atomically
//! - Load-on-open with demo seeding of the exhibition catalog and workshops
//! - Flush-on-mutation with in-memory rollback when a flush fails
//! - Read-only sales and occupancy aggregates

pub mod config;
pub mod errors;
pub mod persist;
pub mod reports;
pub mod seed;
pub mod store;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use persist::Collection;
pub use reports::WorkshopOccupancy;
pub use store::Store;
