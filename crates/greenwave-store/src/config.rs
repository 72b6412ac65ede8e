//! Store configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Where the store keeps its collection files and whether to seed demo data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    /// Seed demo workshops when the workshop collection is empty
    pub seed_demo_data: bool,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Disable demo seeding
    pub fn without_seed(mut self) -> Self {
        self.seed_demo_data = false;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            seed_demo_data: true,
        }
    }
}
