//! Command orchestration layer.
//!
//! Each public command validates every precondition against the store before
//! its first write, then commits through the store's flush-on-mutation API.
//! Commands own the lifecycle logging (`start`, `end`, `end_error`); the
//! store below them only emits debug events.

pub mod account;
pub mod admin;
pub mod reservation;
pub mod ticket;

use greenwave_core::errors::{ExError, GreenWaveError};

/// Convert a domain error into the canonical envelope tagged with `op`
pub(crate) fn domain_error(op: &'static str) -> impl Fn(GreenWaveError) -> ExError {
    move |err| ExError::from(err).with_op(op)
}

/// Milliseconds since `start`, for the `duration_ms` log field
pub(crate) fn elapsed_ms(start: std::time::Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
