use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "verdant", about = "Entitlements and capability gating for verdant")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a single capability for a profile
    Can(commands::can::CanArgs),
    /// List the capability catalog
    Catalog(commands::catalog::CatalogArgs),
    /// Compile entitlements for a profile
    Compute(commands::compute::ComputeArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Run the verdant server
    Serve(commands::serve::ServeArgs),
    /// Issue a session token for local testing
    Token(commands::token::TokenArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Can(args) => return commands::can::run(args),
        Commands::Catalog(args) => commands::catalog::run(args)?,
        Commands::Compute(args) => commands::compute::run(args)?,
        Commands::Config(args) => commands::config::run(args)?,
        Commands::Serve(args) => commands::serve::run(args).await?,
        Commands::Token(args) => commands::token::run(args)?,
    }

    Ok(ExitCode::SUCCESS)
}
