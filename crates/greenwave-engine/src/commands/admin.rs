//! Administrator operations.
//!
//! Every command here first checks that the caller holds the admin role.

use std::collections::BTreeMap;
use std::time::Instant;

use greenwave_core::errors::GreenWaveError;
use greenwave_core::model::Account;
use greenwave_core::{log_op_end, log_op_error, log_op_start};
use greenwave_store::errors::Result;
use greenwave_store::{Store, WorkshopOccupancy};

use super::ticket::{upgrade_ticket_impl, UPGRADE_PRICE};
use super::{domain_error, elapsed_ms};

const OP_ADMIN_UPGRADE_TICKET: &str = "admin_upgrade_ticket";
const OP_SALES_REPORT: &str = "sales_report";
const OP_OCCUPANCY_REPORT: &str = "occupancy_report";

fn require_admin<'a>(store: &'a Store, admin_id: &str, op: &'static str) -> Result<&'a Account> {
    let account = store.get_account(admin_id).map_err(domain_error(op))?;
    if !account.is_admin() {
        return Err(domain_error(op)(GreenWaveError::Forbidden {
            account_id: account.id.clone(),
        }));
    }
    Ok(account)
}

/// Add an exhibition to an attendee's first ticket at [`UPGRADE_PRICE`]
///
/// # Returns
/// `false` when the ticket already covers the exhibition.
///
/// # Errors
/// * `Forbidden` - Caller is not an admin
/// * `NotFound` - Unknown caller, attendee email or exhibition
/// * `InvalidRequest` - The attendee owns no tickets
pub fn admin_upgrade_ticket(
    store: &mut Store,
    admin_id: &str,
    attendee_email: &str,
    exhibition_id: &str,
) -> Result<bool> {
    let start = Instant::now();
    log_op_start!(
        OP_ADMIN_UPGRADE_TICKET,
        account_id = admin_id,
        exhibition_id = exhibition_id
    );

    let result = admin_upgrade_ticket_impl(store, admin_id, attendee_email, exhibition_id)
        .map_err(|e| e.with_op(OP_ADMIN_UPGRADE_TICKET));

    let duration_ms = elapsed_ms(start);
    match &result {
        Ok(upgraded) => {
            log_op_end!(
                OP_ADMIN_UPGRADE_TICKET,
                duration_ms = duration_ms,
                upgraded = *upgraded
            );
        }
        Err(e) => log_op_error!(OP_ADMIN_UPGRADE_TICKET, e, duration_ms = duration_ms),
    }
    result
}

fn admin_upgrade_ticket_impl(
    store: &mut Store,
    admin_id: &str,
    attendee_email: &str,
    exhibition_id: &str,
) -> Result<bool> {
    require_admin(store, admin_id, OP_ADMIN_UPGRADE_TICKET)?;

    let attendee = store.find_account_by_email(attendee_email).ok_or_else(|| {
        domain_error(OP_ADMIN_UPGRADE_TICKET)(GreenWaveError::AccountNotFound {
            account_id: attendee_email.to_string(),
        })
    })?;
    let ticket_id = attendee.ticket_ids.first().cloned().ok_or_else(|| {
        domain_error(OP_ADMIN_UPGRADE_TICKET)(GreenWaveError::invalid_request(format!(
            "Attendee {} has no tickets",
            attendee.email
        )))
    })?;

    upgrade_ticket_impl(store, &ticket_id, exhibition_id, UPGRADE_PRICE)
}

/// Payment totals per day (`YYYY-MM-DD`)
///
/// # Errors
/// * `Forbidden` - Caller is not an admin
/// * `NotFound` - Unknown caller
pub fn sales_report(store: &Store, admin_id: &str) -> Result<BTreeMap<String, f64>> {
    let start = Instant::now();
    log_op_start!(OP_SALES_REPORT, account_id = admin_id);

    let result = require_admin(store, admin_id, OP_SALES_REPORT).map(|_| store.daily_sales());

    let duration_ms = elapsed_ms(start);
    match &result {
        Ok(sales) => {
            log_op_end!(OP_SALES_REPORT, duration_ms = duration_ms, days = sales.len());
        }
        Err(e) => log_op_error!(OP_SALES_REPORT, e, duration_ms = duration_ms),
    }
    result
}

/// Held seats against capacity for every workshop
///
/// # Errors
/// * `Forbidden` - Caller is not an admin
/// * `NotFound` - Unknown caller
pub fn occupancy_report(store: &Store, admin_id: &str) -> Result<Vec<WorkshopOccupancy>> {
    let start = Instant::now();
    log_op_start!(OP_OCCUPANCY_REPORT, account_id = admin_id);

    let result =
        require_admin(store, admin_id, OP_OCCUPANCY_REPORT).map(|_| store.workshop_occupancy());

    let duration_ms = elapsed_ms(start);
    match &result {
        Ok(rows) => {
            log_op_end!(
                OP_OCCUPANCY_REPORT,
                duration_ms = duration_ms,
                workshops = rows.len()
            );
        }
        Err(e) => log_op_error!(OP_OCCUPANCY_REPORT, e, duration_ms = duration_ms),
    }
    result
}
