//! Workshop listing
//!
//! Usage: greenwave workshops [--exhibition <ID>]

use anyhow::Result;
use clap::Args;

use super::{open_store, GlobalArgs};

#[derive(Debug, Args)]
pub struct WorkshopsArgs {
    /// Only list workshops of this exhibition
    #[arg(long)]
    pub exhibition: Option<String>,
}

/// Execute workshops command
pub fn execute(global: &GlobalArgs, args: WorkshopsArgs) -> Result<()> {
    let store = open_store(global)?;

    for exhibition in store.exhibitions() {
        if args
            .exhibition
            .as_deref()
            .is_some_and(|wanted| wanted != exhibition.id)
        {
            continue;
        }
        println!("{} {}", exhibition.id, exhibition.title);
        for workshop in store.workshops_for_exhibition(&exhibition.id) {
            println!(
                "  {}  {}  {}  {}/{} seats free",
                workshop.id,
                workshop.title,
                workshop.start_time.format("%Y-%m-%d %H:%M"),
                workshop.available_seats(),
                workshop.capacity
            );
        }
    }

    store.close()?;
    Ok(())
}
