use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{GreenWaveError, Result};

/// Workshop - a capacity-limited session belonging to one exhibition
///
/// Seat accounting is the `reservation_ids` list: each held reservation ID
/// occupies exactly one seat. The list never grows past `capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workshop {
    pub id: String,
    pub title: String,
    /// Owning exhibition ID
    pub exhibition_id: String,
    /// Seat capacity (always positive)
    pub capacity: u32,
    pub start_time: DateTime<Utc>,
    /// Reservation IDs currently holding a seat
    #[serde(default)]
    pub reservation_ids: Vec<String>,
}

impl Workshop {
    /// Create a workshop with no held seats
    ///
    /// # Errors
    /// * `InvalidRequest` - If capacity is zero
    pub fn new(
        id: String,
        title: String,
        exhibition_id: String,
        capacity: u32,
        start_time: DateTime<Utc>,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(GreenWaveError::invalid_request(format!(
                "Workshop {} must have a positive capacity",
                id
            )));
        }
        Ok(Self {
            id,
            title,
            exhibition_id,
            capacity,
            start_time,
            reservation_ids: Vec::new(),
        })
    }

    /// Seats still free: capacity minus held reservations, floored at zero
    pub fn available_seats(&self) -> u32 {
        let held = u32::try_from(self.reservation_ids.len()).unwrap_or(u32::MAX);
        self.capacity.saturating_sub(held)
    }

    pub fn is_full(&self) -> bool {
        self.available_seats() == 0
    }

    pub fn held_seats(&self) -> usize {
        self.reservation_ids.len()
    }

    pub fn has_reservation(&self, reservation_id: &str) -> bool {
        self.reservation_ids.iter().any(|id| id == reservation_id)
    }

    /// Occupy one seat with `reservation_id`
    ///
    /// # Errors
    /// * `CapacityExceeded` - If no seat is free; the list is left untouched
    pub fn hold_seat(&mut self, reservation_id: String) -> Result<()> {
        if self.is_full() {
            return Err(GreenWaveError::CapacityExceeded {
                workshop_id: self.id.clone(),
                capacity: self.capacity,
            });
        }
        if !self.has_reservation(&reservation_id) {
            self.reservation_ids.push(reservation_id);
        }
        Ok(())
    }

    /// Free the seat held by `reservation_id`; returns false if it held none
    pub fn release_seat(&mut self, reservation_id: &str) -> bool {
        let before = self.reservation_ids.len();
        self.reservation_ids.retain(|id| id != reservation_id);
        self.reservation_ids.len() != before
    }
}
