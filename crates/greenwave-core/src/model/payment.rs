use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Method tag used for simulated card payments
pub const PAYMENT_METHOD_CARD: &str = "Card";

/// Payment - immutable ledger entry for a ticket purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub ticket_id: String,
    /// Ticket price at the time of payment
    pub amount: f64,
    pub method: String,
    pub timestamp: DateTime<Utc>,
}

impl Payment {
    /// Record a payment made now
    pub fn new(id: String, ticket_id: String, amount: f64, method: String) -> Self {
        Self::at(id, ticket_id, amount, method, Utc::now())
    }

    /// Record a payment with an explicit timestamp
    pub fn at(
        id: String,
        ticket_id: String,
        amount: f64,
        method: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            ticket_id,
            amount,
            method,
            timestamp,
        }
    }

    /// Local calendar date of the payment as an ISO `YYYY-MM-DD` key
    pub fn date_key(&self) -> String {
        self.date_key_in(&Local)
    }

    /// Calendar date of the payment as seen in `tz`
    pub fn date_key_in<Tz: TimeZone>(&self, tz: &Tz) -> String {
        self.timestamp.with_timezone(tz).date_naive().to_string()
    }
}
