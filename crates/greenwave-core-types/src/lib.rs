//! Core types shared across GreenWave facilities
//!
//! This crate provides foundational types used by the error, logging and
//! credential facilities:
//!
//! - **Sensitive data**: `Sensitive<T>` marker for automatic redaction
//! - **Schema constants**: Canonical event names

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
