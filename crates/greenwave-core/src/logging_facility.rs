//! Structured logging facility for GreenWave
//!
//! - Single initialization point via `init(profile)`
//! - Boundary logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The engine layer owns operation lifecycle events; the store emits only
//! `tracing::debug!` details.
//!
//! # Usage
//!
//! ```rust
//! use greenwave_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
