//! Subcommand implementations
//!
//! Every subcommand opens the store from configuration, runs one engine
//! command and closes the store again.

pub mod account;
pub mod admin;
pub mod reservation;
pub mod ticket;
pub mod workshop;

use anyhow::{Context, Result};
use clap::Args;
use greenwave_core::credential::Sha256CredentialVerifier;
use greenwave_core::logging_facility;
use greenwave_core::model::Account;
use greenwave_core_types::Sensitive;
use greenwave_engine::{authenticate, ensure_admin, GreenWaveConfig};
use greenwave_store::Store;
use std::path::PathBuf;

/// Password hashing used by every command
pub const VERIFIER: Sha256CredentialVerifier = Sha256CredentialVerifier;

/// Options shared by all subcommands
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides configuration)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

/// Email and password identifying the caller
#[derive(Debug, Args)]
pub struct CredentialArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

impl CredentialArgs {
    pub fn password(&self) -> Sensitive<String> {
        Sensitive::from(self.password.as_str())
    }
}

/// Load configuration, start logging, open the store and provision the admin
pub fn open_store(global: &GlobalArgs) -> Result<Store> {
    let mut config =
        GreenWaveConfig::load(global.config.as_deref()).context("loading configuration")?;
    if let Some(data_dir) = &global.data_dir {
        config.store.data_dir = data_dir.clone();
    }

    logging_facility::init(config.logging.profile);

    let mut store = Store::open(&config.store)
        .with_context(|| format!("opening store at {}", config.store.data_dir.display()))?;
    ensure_admin(&mut store, &VERIFIER, &config.admin)?;
    Ok(store)
}

/// Authenticate the caller against the open store
pub fn login(store: &Store, credentials: &CredentialArgs) -> Result<Account> {
    let account = authenticate(
        store,
        &VERIFIER,
        &credentials.email,
        &credentials.password(),
    )?;
    Ok(account)
}
