use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::atomic::atomic_write;
use crate::errors::{io_error, serialization_error, Result};

/// Persisted entity collections
///
/// Exhibitions are not listed: they are rebuilt from the seed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Accounts,
    Workshops,
    Tickets,
    Payments,
    Reservations,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Accounts,
        Collection::Workshops,
        Collection::Tickets,
        Collection::Payments,
        Collection::Reservations,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Workshops => "workshops",
            Collection::Tickets => "tickets",
            Collection::Payments => "payments",
            Collection::Reservations => "reservations",
        }
    }

    /// Backing file for this collection under `data_dir`
    pub fn path_in(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(format!("{}.json", self.name()))
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Load a collection file; a missing file is an empty collection
///
/// A file that exists but does not parse is an error rather than an empty
/// collection, so a corrupt snapshot is never silently overwritten.
pub fn read_collection<T: DeserializeOwned>(
    collection: Collection,
    data_dir: &Path,
) -> Result<BTreeMap<String, T>> {
    let path = collection.path_in(data_dir);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(io_error("read_collection", e)),
    };
    serde_json::from_slice(&bytes).map_err(|e| serialization_error(collection.name(), e))
}

/// Write the entire collection as one atomic snapshot
pub fn write_collection<T: Serialize>(
    collection: Collection,
    data_dir: &Path,
    records: &BTreeMap<String, T>,
) -> Result<()> {
    let bytes =
        serde_json::to_vec_pretty(records).map_err(|e| serialization_error(collection.name(), e))?;
    atomic_write(&collection.path_in(data_dir), &bytes)?;
    tracing::debug!(
        collection = collection.name(),
        record_count = records.len(),
        "collection flushed"
    );
    Ok(())
}
