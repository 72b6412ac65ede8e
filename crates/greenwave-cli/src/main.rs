//! GreenWave CLI
//!
//! Command-line front end for the GreenWave ticketing engine

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "greenwave")]
#[command(about = "GreenWave - conference tickets and workshop reservations", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Account registration and login
    Account(commands::account::AccountArgs),
    /// Ticket purchase, upgrade and listing
    Ticket(commands::ticket::TicketArgs),
    /// List workshops with free seats
    Workshops(commands::workshop::WorkshopsArgs),
    /// Reserve a workshop seat
    Reserve(commands::reservation::ReserveArgs),
    /// Cancel a reservation
    Cancel(commands::reservation::CancelArgs),
    /// Administrator operations
    Admin(commands::admin::AdminArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Account(args) => commands::account::execute(&cli.global, args),
        Commands::Ticket(args) => commands::ticket::execute(&cli.global, args),
        Commands::Workshops(args) => commands::workshop::execute(&cli.global, args),
        Commands::Reserve(args) => commands::reservation::execute_reserve(&cli.global, args),
        Commands::Cancel(args) => commands::reservation::execute_cancel(&cli.global, args),
        Commands::Admin(args) => commands::admin::execute(&cli.global, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
