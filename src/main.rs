//! grimreg CLI - grimoire registry resolution and validation
//!
//! Usage: grimreg <COMMAND>
//!
//! Commands:
//!   check     Validate every entry in the registry (CI)
//!   validate  Validate a single entry
//!   list      List every entry address
//!   show      Display one entry's manifest and topics

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { strict_warnings } => {
            commands::cmd_check(&cli.root, strict_warnings, cli.json)
        }
        Commands::Validate {
            entry,
            strict_warnings,
        } => commands::cmd_validate(&cli.root, &entry, strict_warnings, cli.json),
        Commands::List => commands::cmd_list(&cli.root, cli.json),
        Commands::Show { entry } => commands::cmd_show(&cli.root, &entry, cli.json),
    }
}
