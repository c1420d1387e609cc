//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use std::path::PathBuf;

use clap::Subcommand;
use terramesh::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration
    Show {
        /// Config file (default: ~/.terramesh/config.ini)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a config file with default values
    Init {
        /// Destination (default: ~/.terramesh/config.ini)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            println!("{}", config_file_path().display());
            Ok(())
        }
        ConfigCommands::Show { config } => run_show(config),
        ConfigCommands::Init { config, force } => run_init(config, force),
    }
}

fn run_show(path: Option<PathBuf>) -> Result<(), CliError> {
    let path = path.unwrap_or_else(config_file_path);
    let config = ConfigFile::load_from(&path)?;
    let mapper = config.tile_mapper();
    let ellipsoid = config.ellipsoid();

    println!("Config: {}", path.display());
    if !path.exists() {
        println!("  (file not found, showing defaults)");
    }
    println!();
    println!("[mesh]");
    println!("  samples_per_side        = {}", config.mesh.samples_per_side);
    println!("  skirt_height            = {}", config.mesh.skirt_height);
    println!("  water_depth             = {}", config.mesh.water_depth);
    println!(
        "  max_concurrent_requests = {}",
        config.mesh.max_concurrent_requests
    );
    println!("[tiling]");
    println!("  scheme                  = {}", config.tiling.scheme);
    println!(
        "  level 0 grid            = {} x {} tiles of {} px",
        mapper.num_tiles_x(0),
        mapper.num_tiles_y(0),
        mapper.tile_pixel_width(0)
    );
    println!("  max_level               = {}", mapper.max_level());
    println!("[ellipsoid]");
    println!("  model                   = {}", config.ellipsoid.model);
    println!(
        "  radii                   = {} / {} m",
        ellipsoid.equatorial_radius(),
        ellipsoid.polar_radius()
    );
    println!("[logging]");
    println!(
        "  file                    = {}",
        config.logging.directory.join(&config.logging.file).display()
    );
    Ok(())
}

fn run_init(path: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = path.unwrap_or_else(config_file_path);
    if path.exists() && !force {
        println!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }

    ConfigFile::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
