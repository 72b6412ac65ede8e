//! Ticket purchase and self-service upgrades.

use std::time::Instant;

use greenwave_core::errors::GreenWaveError;
use greenwave_core::model::{generate_id, Payment, Ticket, TicketKind, PAYMENT_METHOD_CARD};
use greenwave_core::{log_op_end, log_op_error, log_op_start};
use greenwave_store::errors::Result;
use greenwave_store::Store;

use super::{domain_error, elapsed_ms};

/// Price per exhibition on an exhibition pass
pub const EXHIBITION_PASS_PRICE: f64 = 50.0;

/// Flat price of an all-access pass
pub const ALL_ACCESS_PRICE: f64 = 150.0;

/// Extra charge when a holder adds an exhibition after purchase
pub const UPGRADE_PRICE: f64 = 40.0;

const OP_PURCHASE_TICKET: &str = "purchase_ticket";
const OP_UPGRADE_TICKET: &str = "upgrade_ticket";

/// A completed purchase: the issued ticket and its payment record
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub ticket: Ticket,
    pub payment: Payment,
}

/// Buy a ticket for an attendee and record a card payment
///
/// An exhibition pass covers every selected exhibition at
/// [`EXHIBITION_PASS_PRICE`] each; duplicates in the selection are charged
/// once. An all-access pass ignores the selection.
///
/// # Errors
/// * `NotFound` - Unknown account
/// * `InvalidRequest` - Admin buyer, empty selection for an exhibition
///   pass, or an exhibition id that is not in the catalog
/// * `Io` / `Serialization` - A collection could not be persisted
pub fn purchase_ticket(
    store: &mut Store,
    account_id: &str,
    kind: TicketKind,
    exhibition_ids: &[String],
) -> Result<Purchase> {
    let start = Instant::now();
    log_op_start!(
        OP_PURCHASE_TICKET,
        account_id = account_id,
        ticket_kind = kind.as_str()
    );

    let result = purchase_ticket_impl(store, account_id, kind, exhibition_ids)
        .map_err(|e| e.with_op(OP_PURCHASE_TICKET));

    let duration_ms = elapsed_ms(start);
    match &result {
        Ok(purchase) => {
            log_op_end!(
                OP_PURCHASE_TICKET,
                duration_ms = duration_ms,
                ticket_id = purchase.ticket.id.as_str(),
                payment_id = purchase.payment.id.as_str()
            );
        }
        Err(e) => log_op_error!(OP_PURCHASE_TICKET, e, duration_ms = duration_ms),
    }
    result
}

fn purchase_ticket_impl(
    store: &mut Store,
    account_id: &str,
    kind: TicketKind,
    exhibition_ids: &[String],
) -> Result<Purchase> {
    let mut account = store
        .get_account(account_id)
        .map_err(domain_error(OP_PURCHASE_TICKET))?
        .clone();
    if account.is_admin() {
        return Err(GreenWaveError::invalid_request(format!(
            "Admin account {} cannot buy tickets",
            account.id
        ))
        .into());
    }

    let ticket_id = generate_id('T');
    let ticket = match kind {
        TicketKind::AllAccessPass => {
            Ticket::all_access_pass(ticket_id, account.id.clone(), ALL_ACCESS_PRICE)
        }
        TicketKind::ExhibitionPass => {
            let Some((first, rest)) = exhibition_ids.split_first() else {
                return Err(GreenWaveError::invalid_request(
                    "An exhibition pass needs at least one exhibition",
                )
                .into());
            };
            if let Some(unknown) = exhibition_ids
                .iter()
                .find(|id| store.exhibition(id).is_none())
            {
                return Err(GreenWaveError::invalid_request(format!(
                    "Unknown exhibition: {}",
                    unknown
                ))
                .into());
            }

            let mut ticket = Ticket::exhibition_pass(
                ticket_id,
                account.id.clone(),
                first.clone(),
                EXHIBITION_PASS_PRICE,
            );
            for exhibition_id in rest {
                ticket.grant_exhibition_access(exhibition_id, EXHIBITION_PASS_PRICE);
            }
            ticket
        }
    };

    let payment = Payment::new(
        generate_id('P'),
        ticket.id.clone(),
        ticket.price,
        PAYMENT_METHOD_CARD.to_string(),
    );
    account.add_ticket_id(ticket.id.clone());
    account.add_payment_id(payment.id.clone());

    // Account written last: a failed link removes the ticket and payment.
    store.add_ticket(ticket.clone())?;
    let linked = store
        .add_payment(payment.clone())
        .and_then(|()| store.update_account(account));
    if let Err(err) = linked {
        discard_unlinked(store, &ticket.id, &payment.id);
        return Err(err);
    }

    Ok(Purchase { ticket, payment })
}

/// Best-effort removal of a ticket and payment whose account link failed
///
/// A record that cannot be removed stays on disk unlinked from any account
/// and is logged for manual cleanup. An orphaned payment still counts in
/// the daily sales report.
fn discard_unlinked(store: &mut Store, ticket_id: &str, payment_id: &str) {
    if let Err(err) = store.remove_payment(payment_id) {
        tracing::warn!(payment_id, err_code = err.code(), "orphaned payment left on disk");
    }
    if let Err(err) = store.remove_ticket(ticket_id) {
        tracing::warn!(ticket_id, err_code = err.code(), "orphaned ticket left on disk");
    }
}

/// Add an exhibition to an existing ticket
///
/// # Returns
/// * `true` - The exhibition was added and `extra_price` charged
/// * `false` - Already covered (including all-access tickets); nothing changed
///
/// # Errors
/// * `NotFound` - Unknown ticket or exhibition
/// * `InvalidRequest` - Negative or non-finite `extra_price`
/// * `Io` / `Serialization` - The ticket could not be persisted
pub fn upgrade_ticket(
    store: &mut Store,
    ticket_id: &str,
    exhibition_id: &str,
    extra_price: f64,
) -> Result<bool> {
    let start = Instant::now();
    log_op_start!(
        OP_UPGRADE_TICKET,
        ticket_id = ticket_id,
        exhibition_id = exhibition_id
    );

    let result = upgrade_ticket_impl(store, ticket_id, exhibition_id, extra_price)
        .map_err(|e| e.with_op(OP_UPGRADE_TICKET));

    let duration_ms = elapsed_ms(start);
    match &result {
        Ok(upgraded) => {
            log_op_end!(
                OP_UPGRADE_TICKET,
                duration_ms = duration_ms,
                upgraded = *upgraded
            );
        }
        Err(e) => log_op_error!(OP_UPGRADE_TICKET, e, duration_ms = duration_ms),
    }
    result
}

pub(crate) fn upgrade_ticket_impl(
    store: &mut Store,
    ticket_id: &str,
    exhibition_id: &str,
    extra_price: f64,
) -> Result<bool> {
    store
        .get_ticket(ticket_id)
        .map_err(domain_error(OP_UPGRADE_TICKET))?;
    store
        .get_exhibition(exhibition_id)
        .map_err(domain_error(OP_UPGRADE_TICKET))?;
    store.upgrade_ticket(ticket_id, exhibition_id, extra_price)
}
