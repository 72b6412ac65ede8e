use chrono::Utc;
use greenwave_core::errors::{ExError, ExErrorKind, GreenWaveError};
use greenwave_core::model::{Account, Exhibition, Payment, Reservation, Ticket, Workshop};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::errors::{duplicate_id, io_error, Result};
use crate::persist::{read_collection, write_collection, Collection};
use crate::seed;

/// Selects one in-memory collection of the store
type Slot<T> = fn(&mut Store) -> &mut BTreeMap<String, T>;

/// File-backed store for all GreenWave entities
///
/// Every collection lives in memory keyed by id and is mirrored to one JSON
/// file under `data_dir`. Mutations flush the affected collection before
/// returning; when the flush fails the in-memory change is undone, so memory
/// never runs ahead of disk.
///
/// Exhibitions are reference data: rebuilt from the seed catalog on every
/// open and linked to the loaded workshops, never written.
#[derive(Debug)]
pub struct Store {
    data_dir: PathBuf,
    accounts: BTreeMap<String, Account>,
    workshops: BTreeMap<String, Workshop>,
    tickets: BTreeMap<String, Ticket>,
    payments: BTreeMap<String, Payment>,
    reservations: BTreeMap<String, Reservation>,
    exhibitions: BTreeMap<String, Exhibition>,
}

impl Store {
    /// Open (or create) the store rooted at `config.data_dir`
    ///
    /// Seeds the demo workshops when the workshop collection is empty and
    /// seeding is enabled, and persists them before returning.
    ///
    /// # Errors
    /// * `Io` - The data directory cannot be created or a file cannot be read
    /// * `Serialization` - A collection file exists but is not valid
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let data_dir = config.data_dir.clone();
        fs::create_dir_all(&data_dir).map_err(|e| io_error("open_store", e))?;

        let mut store = Self {
            accounts: read_collection(Collection::Accounts, &data_dir)?,
            workshops: read_collection(Collection::Workshops, &data_dir)?,
            tickets: read_collection(Collection::Tickets, &data_dir)?,
            payments: read_collection(Collection::Payments, &data_dir)?,
            reservations: read_collection(Collection::Reservations, &data_dir)?,
            exhibitions: seed::exhibition_catalog(),
            data_dir,
        };

        if store.workshops.is_empty() && config.seed_demo_data {
            for workshop in seed::demo_workshops(Utc::now()).map_err(ExError::from)? {
                store.workshops.insert(workshop.id.clone(), workshop);
            }
            store.save(Collection::Workshops)?;
            tracing::debug!(
                record_count = store.workshops.len(),
                "seeded demo workshops"
            );
        }

        store.link_exhibitions();

        tracing::debug!(
            data_dir = %store.data_dir.display(),
            accounts = store.accounts.len(),
            workshops = store.workshops.len(),
            tickets = store.tickets.len(),
            reservations = store.reservations.len(),
            "store opened"
        );
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn link_exhibitions(&mut self) {
        for workshop in self.workshops.values() {
            if let Some(exhibition) = self.exhibitions.get_mut(&workshop.exhibition_id) {
                exhibition.add_workshop_id(workshop.id.clone());
            }
        }
    }

    // ===== Persistence =====

    /// Flush one collection as a single atomic snapshot
    ///
    /// # Errors
    /// * `Io` / `Serialization` - The snapshot could not be written; the
    ///   previous file is left intact
    pub fn save(&self, collection: Collection) -> Result<()> {
        let dir = &self.data_dir;
        match collection {
            Collection::Accounts => write_collection(collection, dir, &self.accounts),
            Collection::Workshops => write_collection(collection, dir, &self.workshops),
            Collection::Tickets => write_collection(collection, dir, &self.tickets),
            Collection::Payments => write_collection(collection, dir, &self.payments),
            Collection::Reservations => write_collection(collection, dir, &self.reservations),
        }
    }

    /// Flush every collection
    ///
    /// # Errors
    /// Stops at the first collection that fails to write.
    pub fn save_all(&self) -> Result<()> {
        for collection in Collection::ALL {
            self.save(collection)?;
        }
        Ok(())
    }

    /// Final flush on shutdown
    ///
    /// # Errors
    /// Same as [`Store::save_all`].
    pub fn close(self) -> Result<()> {
        self.save_all()?;
        tracing::debug!(data_dir = %self.data_dir.display(), "store closed");
        Ok(())
    }

    /// Insert or replace `record`, flush, and undo the change if the flush fails
    fn commit<T>(
        &mut self,
        collection: Collection,
        slot: Slot<T>,
        id: &str,
        record: T,
    ) -> Result<()> {
        let previous = slot(self).insert(id.to_string(), record);
        if let Err(err) = self.save(collection) {
            let records = slot(self);
            match previous {
                Some(prev) => {
                    records.insert(id.to_string(), prev);
                }
                None => {
                    records.remove(id);
                }
            }
            tracing::debug!(
                collection = collection.name(),
                id,
                "flush failed, in-memory change rolled back"
            );
            return Err(err);
        }
        Ok(())
    }

    fn insert_new<T>(
        &mut self,
        collection: Collection,
        slot: Slot<T>,
        id: &str,
        record: T,
    ) -> Result<()> {
        if slot(self).contains_key(id) {
            return Err(duplicate_id(collection.name(), id));
        }
        self.commit(collection, slot, id, record)
    }

    fn replace_existing<T>(
        &mut self,
        collection: Collection,
        slot: Slot<T>,
        id: &str,
        record: T,
    ) -> Result<()> {
        if !slot(self).contains_key(id) {
            return Err(ExError::new(ExErrorKind::NotFound)
                .with_op(format!("update_{}", collection.name()))
                .with_entity_id(id)
                .with_message(format!("{} has no record {}", collection.name(), id)));
        }
        self.commit(collection, slot, id, record)
    }

    /// Drop `id`, flush, and put the record back if the flush fails
    fn discard<T>(&mut self, collection: Collection, slot: Slot<T>, id: &str) -> Result<bool> {
        let Some(previous) = slot(self).remove(id) else {
            return Ok(false);
        };
        if let Err(err) = self.save(collection) {
            slot(self).insert(id.to_string(), previous);
            return Err(err);
        }
        Ok(true)
    }

    // ===== Mutations =====

    /// # Errors
    /// * `Persistence` - An account with this id already exists
    /// * `Io` / `Serialization` - Flush failed; nothing changed
    pub fn add_account(&mut self, account: Account) -> Result<()> {
        let id = account.id.clone();
        self.insert_new(Collection::Accounts, |s| &mut s.accounts, &id, account)
    }

    /// # Errors
    /// * `NotFound` - No account with this id
    /// * `Io` / `Serialization` - Flush failed; nothing changed
    pub fn update_account(&mut self, account: Account) -> Result<()> {
        let id = account.id.clone();
        self.replace_existing(Collection::Accounts, |s| &mut s.accounts, &id, account)
    }

    /// # Errors
    /// * `Persistence` - A ticket with this id already exists
    /// * `Io` / `Serialization` - Flush failed; nothing changed
    pub fn add_ticket(&mut self, ticket: Ticket) -> Result<()> {
        let id = ticket.id.clone();
        self.insert_new(Collection::Tickets, |s| &mut s.tickets, &id, ticket)
    }

    /// # Errors
    /// * `Persistence` - A payment with this id already exists
    /// * `Io` / `Serialization` - Flush failed; nothing changed
    pub fn add_payment(&mut self, payment: Payment) -> Result<()> {
        let id = payment.id.clone();
        self.insert_new(Collection::Payments, |s| &mut s.payments, &id, payment)
    }

    /// Remove a ticket that no account links to
    ///
    /// Returns `false` when the id is unknown.
    ///
    /// # Errors
    /// * `Io` / `Serialization` - Flush failed; the ticket is kept
    pub fn remove_ticket(&mut self, ticket_id: &str) -> Result<bool> {
        self.discard(Collection::Tickets, |s| &mut s.tickets, ticket_id)
    }

    /// Remove a payment that no account links to
    ///
    /// # Errors
    /// * `Io` / `Serialization` - Flush failed; the payment is kept
    pub fn remove_payment(&mut self, payment_id: &str) -> Result<bool> {
        self.discard(Collection::Payments, |s| &mut s.payments, payment_id)
    }

    /// # Errors
    /// * `Persistence` - A reservation with this id already exists
    /// * `Io` / `Serialization` - Flush failed; nothing changed
    pub fn add_reservation(&mut self, reservation: Reservation) -> Result<()> {
        let id = reservation.id.clone();
        self.insert_new(
            Collection::Reservations,
            |s| &mut s.reservations,
            &id,
            reservation,
        )
    }

    /// # Errors
    /// * `NotFound` - No reservation with this id
    /// * `Io` / `Serialization` - Flush failed; nothing changed
    pub fn update_reservation(&mut self, reservation: Reservation) -> Result<()> {
        let id = reservation.id.clone();
        self.replace_existing(
            Collection::Reservations,
            |s| &mut s.reservations,
            &id,
            reservation,
        )
    }

    /// Insert or replace a workshop and link it to its exhibition
    ///
    /// # Errors
    /// * `Io` / `Serialization` - Flush failed; nothing changed
    pub fn update_workshop(&mut self, workshop: Workshop) -> Result<()> {
        let id = workshop.id.clone();
        let exhibition_id = workshop.exhibition_id.clone();
        self.commit(Collection::Workshops, |s| &mut s.workshops, &id, workshop)?;
        if let Some(exhibition) = self.exhibitions.get_mut(&exhibition_id) {
            exhibition.add_workshop_id(id);
        }
        Ok(())
    }

    /// Extend a ticket's scope with `exhibition_id` for `extra_price`
    ///
    /// Idempotent: an exhibition already in scope (or a universal ticket)
    /// leaves the ticket untouched and nothing is written.
    ///
    /// # Returns
    /// * `Ok(true)` - Scope extended, price raised, tickets flushed
    /// * `Ok(false)` - Unknown ticket, or the exhibition is already covered
    ///
    /// # Errors
    /// * `InvalidRequest` - `extra_price` is negative or not finite
    /// * `Io` / `Serialization` - Flush failed; the ticket is unchanged
    pub fn upgrade_ticket(
        &mut self,
        ticket_id: &str,
        exhibition_id: &str,
        extra_price: f64,
    ) -> Result<bool> {
        if !extra_price.is_finite() || extra_price < 0.0 {
            return Err(ExError::from(GreenWaveError::invalid_request(format!(
                "Upgrade price must be a non-negative amount, got {}",
                extra_price
            )))
            .with_op("upgrade_ticket")
            .with_entity_id(ticket_id));
        }

        let Some(mut ticket) = self.tickets.get(ticket_id).cloned() else {
            return Ok(false);
        };
        if !ticket.grant_exhibition_access(exhibition_id, extra_price) {
            return Ok(false);
        }
        self.commit(Collection::Tickets, |s| &mut s.tickets, ticket_id, ticket)?;
        Ok(true)
    }

    // ===== Lookups =====

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn ticket(&self, id: &str) -> Option<&Ticket> {
        self.tickets.get(id)
    }

    pub fn workshop(&self, id: &str) -> Option<&Workshop> {
        self.workshops.get(id)
    }

    pub fn reservation(&self, id: &str) -> Option<&Reservation> {
        self.reservations.get(id)
    }

    pub fn payment(&self, id: &str) -> Option<&Payment> {
        self.payments.get(id)
    }

    pub fn exhibition(&self, id: &str) -> Option<&Exhibition> {
        self.exhibitions.get(id)
    }

    /// Get an account by ID
    ///
    /// # Errors
    /// * `AccountNotFound` - No account with this id
    pub fn get_account(&self, id: &str) -> greenwave_core::Result<&Account> {
        self.accounts
            .get(id)
            .ok_or_else(|| GreenWaveError::AccountNotFound {
                account_id: id.to_string(),
            })
    }

    /// # Errors
    /// * `TicketNotFound` - No ticket with this id
    pub fn get_ticket(&self, id: &str) -> greenwave_core::Result<&Ticket> {
        self.tickets
            .get(id)
            .ok_or_else(|| GreenWaveError::TicketNotFound {
                ticket_id: id.to_string(),
            })
    }

    /// # Errors
    /// * `WorkshopNotFound` - No workshop with this id
    pub fn get_workshop(&self, id: &str) -> greenwave_core::Result<&Workshop> {
        self.workshops
            .get(id)
            .ok_or_else(|| GreenWaveError::WorkshopNotFound {
                workshop_id: id.to_string(),
            })
    }

    /// # Errors
    /// * `ReservationNotFound` - No reservation with this id
    pub fn get_reservation(&self, id: &str) -> greenwave_core::Result<&Reservation> {
        self.reservations
            .get(id)
            .ok_or_else(|| GreenWaveError::ReservationNotFound {
                reservation_id: id.to_string(),
            })
    }

    /// # Errors
    /// * `ExhibitionNotFound` - Not in the catalog
    pub fn get_exhibition(&self, id: &str) -> greenwave_core::Result<&Exhibition> {
        self.exhibitions
            .get(id)
            .ok_or_else(|| GreenWaveError::ExhibitionNotFound {
                exhibition_id: id.to_string(),
            })
    }

    /// Case-insensitive email lookup
    pub fn find_account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.email_matches(email))
    }

    // ===== Enumerations (id order) =====

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.values()
    }

    pub fn workshops(&self) -> impl Iterator<Item = &Workshop> {
        self.workshops.values()
    }

    pub fn reservations(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.values()
    }

    pub fn payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments.values()
    }

    pub fn exhibitions(&self) -> impl Iterator<Item = &Exhibition> {
        self.exhibitions.values()
    }

    /// Workshops of one exhibition ordered by start time
    pub fn workshops_for_exhibition(&self, exhibition_id: &str) -> Vec<&Workshop> {
        let mut workshops: Vec<&Workshop> = self
            .workshops
            .values()
            .filter(|w| w.exhibition_id == exhibition_id)
            .collect();
        workshops.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
        workshops
    }

    /// Tickets owned by an account, in purchase order
    pub fn tickets_of(&self, account: &Account) -> Vec<&Ticket> {
        account
            .ticket_ids
            .iter()
            .filter_map(|id| self.tickets.get(id))
            .collect()
    }

    /// Reservations currently held by an account
    pub fn reservations_of(&self, account: &Account) -> Vec<&Reservation> {
        account
            .reservation_ids
            .iter()
            .filter_map(|id| self.reservations.get(id))
            .collect()
    }
}
