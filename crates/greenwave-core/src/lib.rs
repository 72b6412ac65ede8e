//! GreenWave Core - domain model for the ticketing and reservation engine
//!
//! This crate provides:
//! - Entity models (accounts, exhibitions, workshops, tickets, reservations,
//!   payments) with their local invariants
//! - The `CredentialVerifier` capability used for password digests
//! - The error facility (`GreenWaveError` domain errors, `ExError` envelope)
//! - The structured logging facility shared by the store and engine

pub mod credential;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use credential::{CredentialVerifier, Sha256CredentialVerifier};
pub use errors::{ExError, ExErrorKind, GreenWaveError, Result};
pub use model::{
    AccessScope, Account, Exhibition, Payment, Reservation, ReservationStatus, Role, Ticket,
    TicketKind, Workshop,
};
