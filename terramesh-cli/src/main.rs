//! terramesh CLI - Command-line interface
//!
//! Generates terrain tile meshes from the command line for inspection and
//! batch testing.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::batch::BatchArgs;
use commands::config::ConfigCommands;
use commands::generate::GenerateArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "terramesh")]
#[command(version = terramesh::VERSION)]
#[command(about = "Terrain tile mesh synthesis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one tile mesh and print its summary
    Generate(GenerateArgs),

    /// Generate a block of tiles concurrently
    Batch(BatchArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result: Result<(), CliError> = match cli.command {
        Commands::Generate(args) => commands::generate::run(args).await,
        Commands::Batch(args) => commands::batch::run(args).await,
        Commands::Config(command) => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
