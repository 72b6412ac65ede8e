//! GreenWave Engine - Orchestration layer
//!
//! Provides the ticketing and reservation commands that coordinate the core
//! domain model with the persistence store, plus application configuration.
//!
//! Mutating commands take `&mut Store`: the exclusive borrow makes every
//! check-then-write sequence a critical section. Embeddings that share a
//! store across threads wrap it in a `Mutex` and hold the guard for the
//! whole command.

pub mod commands;
pub mod config;

pub use commands::account::{authenticate, create_account, ensure_admin};
pub use commands::admin::{admin_upgrade_ticket, occupancy_report, sales_report};
pub use commands::reservation::{cancel_reservation, reserve_workshop};
pub use commands::ticket::{
    purchase_ticket, upgrade_ticket, Purchase, ALL_ACCESS_PRICE, EXHIBITION_PASS_PRICE,
    UPGRADE_PRICE,
};
pub use config::{AdminConfig, ConfigError, GreenWaveConfig, LoggingConfig};
