//! Command-line interface

pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "datahub-gateway", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP gateway
    Serve,
}
