mod adapters;
mod arn;
mod aws;
mod commands;
mod diff;
mod engine;
mod error;
mod model;
mod output;
mod template;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::adapters::AdaptersArgs;
use commands::scan::ScanArgs;
use commands::tag::TagArgs;
use commands::whoami::WhoamiArgs;
use commands::{AdaptersCommand, ScanCommand, TagCommand, WhoamiCommand};

#[derive(Parser)]
#[command(name = "tagsmith")]
#[command(about = "Render tag templates and reconcile them onto AWS resources", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the template and apply tags to the given resources
    Tag(TagArgs),

    /// Check every resource of a service for required tags
    Scan(ScanArgs),

    /// List the resource kinds this tool can tag
    Adapters(AdaptersArgs),

    /// Show the resolved AWS identity
    Whoami(WhoamiArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tag(args) => TagCommand::execute(args)?,
        Commands::Scan(args) => ScanCommand::execute(args)?,
        Commands::Adapters(args) => AdaptersCommand::execute(args)?,
        Commands::Whoami(args) => WhoamiCommand::execute(args)?,
    }

    Ok(())
}
