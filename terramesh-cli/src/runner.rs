//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and mesh provider
//! creation so command handlers only deal with their own work.

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use terramesh::config::{config_file_path, ConfigFile};
use terramesh::logging::{init_from_settings, LoggingGuard};
use terramesh::provider::ConstantElevationProvider;
use terramesh::service::TileMeshProvider;

use crate::commands::common::MeshOverrides;
use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Keeps logging active while the runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load config from `config_path` (or the default location) and
    /// initialize logging.
    ///
    /// With `verbose` unset, log output only goes to the log file so the
    /// command's report stays readable.
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self, CliError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let logging_guard = init_from_settings(&config.logging, verbose)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        info!(
            version = terramesh::VERSION,
            config = %config_path.display(),
            log = %logging_guard.log_path().display(),
            "terramesh starting"
        );

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// The loaded config with CLI overrides applied.
    pub fn effective_config(&self, overrides: &MeshOverrides) -> ConfigFile {
        let mut config = self.config.clone();
        overrides.apply(&mut config);
        config
    }

    /// Build a mesh provider from the loaded config plus CLI overrides.
    ///
    /// Terrain comes from `--elevation` (default: sea level everywhere).
    pub fn create_provider(&self, overrides: &MeshOverrides) -> Result<TileMeshProvider, CliError> {
        let config = self.effective_config(overrides);

        let provider = TileMeshProvider::new(
            config.mesh_config(),
            config.tile_mapper(),
            config.ellipsoid(),
        )
        .map_err(CliError::ProviderCreation)?;

        let elevation = overrides.elevation.unwrap_or(0.0);
        Ok(provider.with_elevation_provider(Arc::new(ConstantElevationProvider::new(elevation))))
    }

    /// Cancellation token that fires on Ctrl-C.
    pub fn cancellation_on_ctrl_c(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    warn!("Interrupted - cancelling outstanding mesh requests");
                    child.cancel();
                }
                Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
            }
        });
        token
    }
}
