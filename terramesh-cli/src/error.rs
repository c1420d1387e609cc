//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use terramesh::config::ConfigFileError;
use terramesh::mesh::MeshError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded or saved
    Config(ConfigFileError),
    /// Invalid command-line argument
    InvalidArgument(String),
    /// Failed to create the mesh provider
    ProviderCreation(MeshError),
    /// A mesh request failed
    Mesh(MeshError),
    /// Some tiles in a batch failed
    BatchFailed { failed: usize, total: usize },
}

impl CliError {
    /// Exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgument(_) => 2,
            CliError::Mesh(e) if e.is_cancelled() => 130,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in your config file, or regenerate it with:");
                eprintln!("  terramesh config init --force");
            }
            CliError::ProviderCreation(MeshError::InvalidConfig(_)) => {
                eprintln!();
                eprintln!("Check the [mesh] section of your config file and any");
                eprintln!("--samples / --skirt / --water-depth overrides.");
            }
            _ => {}
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::ProviderCreation(e) => write!(f, "Failed to create mesh provider: {}", e),
            CliError::Mesh(e) => write!(f, "Mesh generation failed: {}", e),
            CliError::BatchFailed { failed, total } => {
                write!(f, "{} of {} tiles failed", failed, total)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::ProviderCreation(e) => Some(e),
            CliError::Mesh(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<MeshError> for CliError {
    fn from(e: MeshError) -> Self {
        CliError::Mesh(e)
    }
}
