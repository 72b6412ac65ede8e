//! Ticket commands
//!
//! Usage: greenwave ticket buy --email <EMAIL> --password <PW> --kind <KIND> [--exhibition <ID>]...
//!        greenwave ticket upgrade --email <EMAIL> --password <PW> --ticket <ID> --exhibition <ID>
//!        greenwave ticket list --email <EMAIL> --password <PW>

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use greenwave_core::model::TicketKind;
use greenwave_engine::{purchase_ticket, upgrade_ticket, UPGRADE_PRICE};

use super::{login, open_store, CredentialArgs, GlobalArgs};

#[derive(Debug, Args)]
pub struct TicketArgs {
    #[command(subcommand)]
    pub command: TicketCommand,
}

#[derive(Debug, Subcommand)]
pub enum TicketCommand {
    /// Buy a ticket and pay by card
    Buy(BuyArgs),
    /// Add an exhibition to one of your tickets
    Upgrade(UpgradeArgs),
    /// Show your tickets
    List(CredentialArgs),
}

#[derive(Debug, Args)]
pub struct BuyArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Ticket type: Exhibition or AllAccess
    #[arg(long)]
    pub kind: TicketKind,

    /// Exhibition to include (repeat for several)
    #[arg(long = "exhibition")]
    pub exhibitions: Vec<String>,
}

#[derive(Debug, Args)]
pub struct UpgradeArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[arg(long)]
    pub ticket: String,

    #[arg(long)]
    pub exhibition: String,

    /// Extra charge for the added exhibition
    #[arg(long, default_value_t = UPGRADE_PRICE)]
    pub price: f64,
}

/// Execute ticket command
pub fn execute(global: &GlobalArgs, args: TicketArgs) -> Result<()> {
    let mut store = open_store(global)?;

    match args.command {
        TicketCommand::Buy(buy) => {
            let account = login(&store, &buy.credentials)?;
            let purchase = purchase_ticket(&mut store, &account.id, buy.kind, &buy.exhibitions)?;
            println!(
                "Purchased {} for {:.2} (scope: {})",
                purchase.ticket.kind, purchase.ticket.price, purchase.ticket.scope
            );
            println!("ticket_id: {}", purchase.ticket.id);
            println!("payment_id: {}", purchase.payment.id);
        }
        TicketCommand::Upgrade(upgrade) => {
            let account = login(&store, &upgrade.credentials)?;
            if !account.owns_ticket(&upgrade.ticket) {
                bail!("ticket {} does not belong to {}", upgrade.ticket, account.email);
            }
            let upgraded =
                upgrade_ticket(&mut store, &upgrade.ticket, &upgrade.exhibition, upgrade.price)?;
            if upgraded {
                println!("Ticket upgraded with {}", upgrade.exhibition);
            } else {
                println!("Ticket already includes {}", upgrade.exhibition);
            }
        }
        TicketCommand::List(credentials) => {
            let account = login(&store, &credentials)?;
            for ticket in store.tickets_of(&account) {
                println!(
                    "{}  {}  {:.2}  {}",
                    ticket.id, ticket.kind, ticket.price, ticket.scope
                );
            }
        }
    }

    store.close()?;
    Ok(())
}
