use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// grimreg - resolution and validation for the grimoire registry
#[derive(Parser, Debug)]
#[command(name = "grimreg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Registry root directory
    #[arg(long, default_value = "packages", global = true)]
    pub root: PathBuf,

    /// Output format for CI (NDJSON event stream)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate every entry in the registry (CI mode, exits non-zero on violations)
    Check {
        /// Fail on warnings too
        #[arg(long)]
        strict_warnings: bool,
    },

    /// Validate a single entry
    Validate {
        /// Entry address, e.g. effect-ts/effect or effect-ts/effect/sql
        entry: String,

        /// Fail on warnings too
        #[arg(long)]
        strict_warnings: bool,
    },

    /// List every entry address in the registry
    List,

    /// Display one entry's manifest and ordered topic set
    Show {
        /// Entry address, e.g. effect-ts/effect
        entry: String,
    },
}
