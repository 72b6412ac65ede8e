// Shared fixtures for engine integration tests

#![allow(dead_code)]

use chrono::Utc;
use greenwave_core::credential::Sha256CredentialVerifier;
use greenwave_core::model::{Account, TicketKind, Workshop};
use greenwave_core_types::Sensitive;
use greenwave_engine::{create_account, purchase_ticket, Purchase};
use greenwave_store::{Store, StoreConfig};
use tempfile::TempDir;

pub const VERIFIER: Sha256CredentialVerifier = Sha256CredentialVerifier;

/// Store over a fresh directory with the demo workshops seeded
pub fn seeded_store() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let store = Store::open(&StoreConfig::new(dir.path())).unwrap();
    (dir, store)
}

/// Store over a fresh directory with no workshops
pub fn empty_store() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let store = Store::open(&StoreConfig::new(dir.path()).without_seed()).unwrap();
    (dir, store)
}

pub fn add_workshop(store: &mut Store, id: &str, exhibition_id: &str, capacity: u32) {
    let workshop = Workshop::new(
        id.to_string(),
        format!("Workshop {}", id),
        exhibition_id.to_string(),
        capacity,
        Utc::now(),
    )
    .unwrap();
    store.update_workshop(workshop).unwrap();
}

pub fn attendee(store: &mut Store, name: &str) -> Account {
    create_account(
        store,
        &VERIFIER,
        name,
        &format!("{}@example.com", name.to_lowercase()),
        &Sensitive::from("pw1"),
    )
    .unwrap()
}

pub fn exhibition_pass(store: &mut Store, account: &Account, exhibitions: &[&str]) -> Purchase {
    let ids: Vec<String> = exhibitions.iter().map(|s| s.to_string()).collect();
    purchase_ticket(store, &account.id, TicketKind::ExhibitionPass, &ids).unwrap()
}

pub fn all_access_pass(store: &mut Store, account: &Account) -> Purchase {
    purchase_ticket(store, &account.id, TicketKind::AllAccessPass, &[]).unwrap()
}
