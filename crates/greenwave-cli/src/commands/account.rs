//! Account commands
//!
//! Usage: greenwave account create --name <NAME> --email <EMAIL> --password <PW>
//!        greenwave account login --email <EMAIL> --password <PW>

use anyhow::Result;
use clap::{Args, Subcommand};
use greenwave_core_types::Sensitive;
use greenwave_engine::create_account;

use super::{login, open_store, CredentialArgs, GlobalArgs, VERIFIER};

#[derive(Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Register a new attendee
    Create(CreateArgs),
    /// Check credentials and show the account
    Login(CredentialArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

/// Execute account command
pub fn execute(global: &GlobalArgs, args: AccountArgs) -> Result<()> {
    let mut store = open_store(global)?;

    match args.command {
        AccountCommand::Create(create) => {
            let account = create_account(
                &mut store,
                &VERIFIER,
                &create.name,
                &create.email,
                &Sensitive::from(create.password),
            )?;
            println!("Account created: {} <{}>", account.name, account.email);
            println!("account_id: {}", account.id);
        }
        AccountCommand::Login(credentials) => {
            let account = login(&store, &credentials)?;
            let role = if account.is_admin() { "admin" } else { "attendee" };
            println!("Logged in as {} ({})", account.name, role);
            println!("account_id: {}", account.id);
            println!("tickets: {}", account.ticket_ids.len());
            println!("reservations: {}", account.reservation_ids.len());
        }
    }

    store.close()?;
    Ok(())
}
