//! Workshop reservations and cancellations.

use std::time::Instant;

use greenwave_core::errors::GreenWaveError;
use greenwave_core::model::{generate_id, Reservation};
use greenwave_core::{log_op_end, log_op_error, log_op_start};
use greenwave_store::errors::Result;
use greenwave_store::Store;

use super::{domain_error, elapsed_ms};

const OP_RESERVE_WORKSHOP: &str = "reserve_workshop";
const OP_CANCEL_RESERVATION: &str = "cancel_reservation";

/// Book one seat in a workshop using one of the attendee's tickets
///
/// Checks run in a fixed order and nothing is written unless all pass:
/// existence, ticket ownership, free seats, then exhibition access.
///
/// # Errors
/// * `NotFound` - Unknown account, ticket or workshop
/// * `AccessDenied` - The ticket belongs to someone else, or its scope
///   excludes the workshop's exhibition
/// * `CapacityExceeded` - No seat left
/// * `Io` / `Serialization` - A collection could not be persisted
pub fn reserve_workshop(
    store: &mut Store,
    account_id: &str,
    ticket_id: &str,
    workshop_id: &str,
) -> Result<Reservation> {
    let start = Instant::now();
    log_op_start!(
        OP_RESERVE_WORKSHOP,
        account_id = account_id,
        ticket_id = ticket_id,
        workshop_id = workshop_id
    );

    let result = reserve_workshop_impl(store, account_id, ticket_id, workshop_id)
        .map_err(|e| e.with_op(OP_RESERVE_WORKSHOP));

    let duration_ms = elapsed_ms(start);
    match &result {
        Ok(reservation) => {
            log_op_end!(
                OP_RESERVE_WORKSHOP,
                duration_ms = duration_ms,
                reservation_id = reservation.id.as_str()
            );
        }
        Err(e) => log_op_error!(OP_RESERVE_WORKSHOP, e, duration_ms = duration_ms),
    }
    result
}

fn reserve_workshop_impl(
    store: &mut Store,
    account_id: &str,
    ticket_id: &str,
    workshop_id: &str,
) -> Result<Reservation> {
    let to_ex = domain_error(OP_RESERVE_WORKSHOP);

    let mut account = store.get_account(account_id).map_err(&to_ex)?.clone();
    let ticket = store.get_ticket(ticket_id).map_err(&to_ex)?.clone();
    let mut workshop = store.get_workshop(workshop_id).map_err(&to_ex)?.clone();

    if ticket.owner_id != account.id || !account.owns_ticket(&ticket.id) {
        return Err(to_ex(GreenWaveError::TicketNotOwned {
            ticket_id: ticket.id,
            account_id: account.id,
        }));
    }
    if workshop.is_full() {
        return Err(to_ex(GreenWaveError::CapacityExceeded {
            workshop_id: workshop.id,
            capacity: workshop.capacity,
        }));
    }
    if !ticket.grants_access_to(&workshop.exhibition_id) {
        return Err(to_ex(GreenWaveError::AccessDenied {
            ticket_id: ticket.id,
            exhibition_id: workshop.exhibition_id,
        }));
    }

    let reservation = Reservation::new(
        generate_id('R'),
        ticket.id.clone(),
        workshop.id.clone(),
        account.id.clone(),
    );
    workshop.hold_seat(reservation.id.clone()).map_err(&to_ex)?;
    account.add_reservation_id(reservation.id.clone());

    store.add_reservation(reservation.clone())?;
    store.update_workshop(workshop)?;
    store.update_account(account)?;

    tracing::debug!(
        reservation_id = reservation.id.as_str(),
        workshop_id,
        "seat held"
    );
    Ok(reservation)
}

/// Cancel a confirmed reservation and free its seat
///
/// The reservation record is kept with status `CANCELLED`. Missing links on
/// the workshop or account side are tolerated, which also lets a cancel that
/// failed midway be retried to completion.
///
/// # Errors
/// * `NotFound` - Unknown reservation
/// * `AlreadyCancelled` - The reservation was cancelled before
/// * `Io` / `Serialization` - A collection could not be persisted
pub fn cancel_reservation(store: &mut Store, reservation_id: &str) -> Result<Reservation> {
    let start = Instant::now();
    log_op_start!(OP_CANCEL_RESERVATION, reservation_id = reservation_id);

    let result = cancel_reservation_impl(store, reservation_id)
        .map_err(|e| e.with_op(OP_CANCEL_RESERVATION));

    let duration_ms = elapsed_ms(start);
    match &result {
        Ok(reservation) => {
            log_op_end!(
                OP_CANCEL_RESERVATION,
                duration_ms = duration_ms,
                workshop_id = reservation.workshop_id.as_str()
            );
        }
        Err(e) => log_op_error!(OP_CANCEL_RESERVATION, e, duration_ms = duration_ms),
    }
    result
}

fn cancel_reservation_impl(store: &mut Store, reservation_id: &str) -> Result<Reservation> {
    let to_ex = domain_error(OP_CANCEL_RESERVATION);

    let mut reservation = store.get_reservation(reservation_id).map_err(&to_ex)?.clone();
    reservation.cancel().map_err(&to_ex)?;

    // Status last: a retry after a failed write still finds it confirmed.
    if let Some(mut workshop) = store.workshop(&reservation.workshop_id).cloned() {
        if workshop.release_seat(&reservation.id) {
            store.update_workshop(workshop)?;
        }
    }
    if let Some(mut account) = store.account(&reservation.attendee_id).cloned() {
        if account.remove_reservation_id(&reservation.id) {
            store.update_account(account)?;
        }
    }
    store.update_reservation(reservation.clone())?;

    Ok(reservation)
}
