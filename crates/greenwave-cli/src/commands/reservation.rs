//! Reservation commands
//!
//! Usage: greenwave reserve --email <EMAIL> --password <PW> --ticket <ID> --workshop <ID>
//!        greenwave cancel --email <EMAIL> --password <PW> --reservation <ID>

use anyhow::{bail, Result};
use clap::Args;
use greenwave_engine::{cancel_reservation, reserve_workshop};

use super::{login, open_store, CredentialArgs, GlobalArgs};

#[derive(Debug, Args)]
pub struct ReserveArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[arg(long)]
    pub ticket: String,

    #[arg(long)]
    pub workshop: String,
}

#[derive(Debug, Args)]
pub struct CancelArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[arg(long)]
    pub reservation: String,
}

/// Execute reserve command
pub fn execute_reserve(global: &GlobalArgs, args: ReserveArgs) -> Result<()> {
    let mut store = open_store(global)?;
    let account = login(&store, &args.credentials)?;

    let reservation = reserve_workshop(&mut store, &account.id, &args.ticket, &args.workshop)?;
    let seats = store
        .workshop(&reservation.workshop_id)
        .map(|w| w.available_seats())
        .unwrap_or_default();
    println!("Reserved {} ({} seats left)", reservation.workshop_id, seats);
    println!("reservation_id: {}", reservation.id);

    store.close()?;
    Ok(())
}

/// Execute cancel command
pub fn execute_cancel(global: &GlobalArgs, args: CancelArgs) -> Result<()> {
    let mut store = open_store(global)?;
    let account = login(&store, &args.credentials)?;

    if let Some(existing) = store.reservation(&args.reservation) {
        if existing.attendee_id != account.id && !account.is_admin() {
            bail!(
                "reservation {} does not belong to {}",
                args.reservation,
                account.email
            );
        }
    }

    let reservation = cancel_reservation(&mut store, &args.reservation)?;
    println!(
        "Cancelled {} for {} (status: {})",
        reservation.id, reservation.workshop_id, reservation.status
    );

    store.close()?;
    Ok(())
}
