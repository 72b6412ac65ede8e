pub mod account;
pub mod exhibition;
pub mod payment;
pub mod reservation;
pub mod ticket;
pub mod workshop;

pub use account::{Account, Role};
pub use exhibition::Exhibition;
pub use payment::{Payment, PAYMENT_METHOD_CARD};
pub use reservation::{Reservation, ReservationStatus};
pub use ticket::{AccessScope, Ticket, TicketKind, ALL_EXHIBITIONS};
pub use workshop::Workshop;

use uuid::Uuid;

/// Generate a fresh entity identifier
///
/// The prefix letter tags the entity type (`U`, `T`, `R`, `P`); the rest is a
/// UUID v7 so ids sort by creation time and are never reused.
pub fn generate_id(prefix: char) -> String {
    format!("{}{}", prefix, Uuid::now_v7().simple())
}
