//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

pub mod graph;
pub mod init;

/// Polysync - relational → graph projection for a social-network dataset
#[derive(Parser)]
#[command(name = "polysync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (defaults to ./polysync.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the relational schema (and optionally seed demo data)
    Init {
        /// Insert a small demo dataset after migrating
        #[arg(long)]
        seed: bool,
    },

    /// Project the relational store into the graph store
    Sync {
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clear the projected subgraph (the relational store is untouched)
    Reset {
        /// Confirm the destructive operation
        #[arg(long)]
        confirm: bool,
    },

    /// Show row counts on both sides
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        match self.command {
            Commands::Init { seed } => init::execute(&config, seed),
            Commands::Sync { json } => graph::cmd_sync(&config, json).await,
            Commands::Reset { confirm } => graph::cmd_reset(&config, confirm).await,
            Commands::Status => graph::cmd_status(&config).await,
        }
    }
}
