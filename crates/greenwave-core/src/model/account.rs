use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credential::CredentialVerifier;

/// Account role: the only access distinction the system makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Attendee,
    Admin,
}

/// Account - an attendee or an administrator
///
/// Attendees own tickets, reservations and a purchase history; admin accounts
/// keep those lists empty. Accounts are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier (`U` + UUID v7)
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address, unique across accounts ignoring case
    pub email: String,

    /// One-way digest produced by a `CredentialVerifier`
    pub password_digest: String,

    pub role: Role,

    /// Owned ticket IDs in purchase order
    #[serde(default)]
    pub ticket_ids: Vec<String>,

    /// Reservation IDs currently held by this account
    #[serde(default)]
    pub reservation_ids: Vec<String>,

    /// Payment IDs (purchase history)
    #[serde(default)]
    pub payment_ids: Vec<String>,

    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with empty ownership lists
    pub fn new(
        id: String,
        name: String,
        email: String,
        password_digest: String,
        role: Role,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_digest,
            role,
            ticket_ids: Vec::new(),
            reservation_ids: Vec::new(),
            payment_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Case-insensitive email comparison
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.trim().to_lowercase()
    }

    /// Check a candidate password against the stored digest
    pub fn check_credential(&self, verifier: &dyn CredentialVerifier, candidate: &str) -> bool {
        verifier.verify(candidate, &self.password_digest)
    }

    pub fn add_ticket_id(&mut self, ticket_id: String) {
        if !self.ticket_ids.contains(&ticket_id) {
            self.ticket_ids.push(ticket_id);
        }
    }

    pub fn add_reservation_id(&mut self, reservation_id: String) {
        if !self.reservation_ids.contains(&reservation_id) {
            self.reservation_ids.push(reservation_id);
        }
    }

    /// Remove a reservation ID; returns false if it was not present
    pub fn remove_reservation_id(&mut self, reservation_id: &str) -> bool {
        let before = self.reservation_ids.len();
        self.reservation_ids.retain(|id| id != reservation_id);
        self.reservation_ids.len() != before
    }

    pub fn add_payment_id(&mut self, payment_id: String) {
        if !self.payment_ids.contains(&payment_id) {
            self.payment_ids.push(payment_id);
        }
    }

    pub fn owns_ticket(&self, ticket_id: &str) -> bool {
        self.ticket_ids.iter().any(|id| id == ticket_id)
    }
}
