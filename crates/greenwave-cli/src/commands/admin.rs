//! Administrator commands
//!
//! Usage: greenwave admin upgrade --email <EMAIL> --password <PW> --attendee <EMAIL> --exhibition <ID>
//!        greenwave admin sales --email <EMAIL> --password <PW>
//!        greenwave admin occupancy --email <EMAIL> --password <PW>

use anyhow::Result;
use clap::{Args, Subcommand};
use greenwave_engine::{admin_upgrade_ticket, occupancy_report, sales_report};

use super::{login, open_store, CredentialArgs, GlobalArgs};

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Add an exhibition to an attendee's first ticket
    Upgrade(AdminUpgradeArgs),
    /// Daily sales totals
    Sales(CredentialArgs),
    /// Seat usage per workshop
    Occupancy(CredentialArgs),
}

#[derive(Debug, Args)]
pub struct AdminUpgradeArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Attendee email
    #[arg(long)]
    pub attendee: String,

    #[arg(long)]
    pub exhibition: String,
}

/// Execute admin command
pub fn execute(global: &GlobalArgs, args: AdminArgs) -> Result<()> {
    let mut store = open_store(global)?;

    match args.command {
        AdminCommand::Upgrade(upgrade) => {
            let admin = login(&store, &upgrade.credentials)?;
            let upgraded = admin_upgrade_ticket(
                &mut store,
                &admin.id,
                &upgrade.attendee,
                &upgrade.exhibition,
            )?;
            if upgraded {
                println!("Upgraded {} with {}", upgrade.attendee, upgrade.exhibition);
            } else {
                println!(
                    "{} already has access to {}",
                    upgrade.attendee, upgrade.exhibition
                );
            }
        }
        AdminCommand::Sales(credentials) => {
            let admin = login(&store, &credentials)?;
            let sales = sales_report(&store, &admin.id)?;
            if sales.is_empty() {
                println!("No sales yet");
            }
            for (date, total) in sales {
                println!("{}  {:.2}", date, total);
            }
        }
        AdminCommand::Occupancy(credentials) => {
            let admin = login(&store, &credentials)?;
            for row in occupancy_report(&store, &admin.id)? {
                println!(
                    "{}  {}  {}/{}",
                    row.workshop_id, row.title, row.held, row.capacity
                );
            }
        }
    }

    store.close()?;
    Ok(())
}
