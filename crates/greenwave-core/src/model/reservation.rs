use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{GreenWaveError, Result};

/// Reservation lifecycle: CONFIRMED → CANCELLED (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Confirmed => f.write_str("CONFIRMED"),
            ReservationStatus::Cancelled => f.write_str("CANCELLED"),
        }
    }
}

/// Reservation - one seat in one workshop, booked with one ticket
///
/// Records are retained after cancellation as an audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub ticket_id: String,
    pub workshop_id: String,
    pub attendee_id: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Create a confirmed reservation
    pub fn new(id: String, ticket_id: String, workshop_id: String, attendee_id: String) -> Self {
        Self {
            id,
            ticket_id,
            workshop_id,
            attendee_id,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }

    /// Transition to CANCELLED
    ///
    /// # Errors
    /// * `AlreadyCancelled` - If the reservation is already cancelled
    pub fn cancel(&mut self) -> Result<()> {
        if self.status == ReservationStatus::Cancelled {
            return Err(GreenWaveError::AlreadyCancelled {
                reservation_id: self.id.clone(),
            });
        }
        self.status = ReservationStatus::Cancelled;
        Ok(())
    }
}
