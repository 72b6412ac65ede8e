//! Durable collection files
//!
//! Each entity collection lives in its own JSON file keyed by id. Files are
//! always replaced whole via temp→rename, so a reader sees either the previous
//! or the new snapshot, never a torn one.

mod atomic;
mod collection;

pub use atomic::atomic_write;
pub use collection::{read_collection, write_collection, Collection};
