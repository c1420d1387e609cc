//! Logging infrastructure for terramesh.
//!
//! Structured `tracing` output to a log file and, optionally, stdout:
//! - The log file is truncated at the start of each session
//! - Multi-line pretty format, no ANSI colours in the file
//! - Filter configurable via the `RUST_LOG` environment variable,
//!   defaulting to `info`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, DEFAULT_LOG_FILE};

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    log_path: PathBuf,
}

impl LoggingGuard {
    /// Path of the active log file.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Initialize the global subscriber.
///
/// Creates `log_dir` if needed, truncates `log_file` and installs a file
/// layer plus, when `console` is set, a stdout layer. Spans are reported
/// when they close, so `#[instrument]`ed requests log their duration.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the log file
/// cannot be truncated.
pub fn init_logging(
    log_dir: &Path,
    log_file: &str,
    console: bool,
) -> Result<LoggingGuard, io::Error> {
    let log_path = prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .pretty();

    let stdout_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .with_span_events(FmtSpan::CLOSE)
            .pretty()
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
        log_path,
    })
}

/// Initialize logging from the `[logging]` config section.
pub fn init_from_settings(
    settings: &LoggingSettings,
    console: bool,
) -> Result<LoggingGuard, io::Error> {
    init_logging(&settings.directory, &settings.file, console)
}

/// Creates the log directory and truncates the log file.
fn prepare_log_file(log_dir: &Path, log_file: &str) -> Result<PathBuf, io::Error> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(log_file);
    fs::write(&log_path, "")?;
    Ok(log_path)
}

/// Default log directory, relative to the working directory.
pub fn default_log_dir() -> &'static Path {
    Path::new("logs")
}

/// Default log file name.
pub fn default_log_file() -> &'static str {
    DEFAULT_LOG_FILE
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_log_dir(), Path::new("logs"));
        assert_eq!(default_log_file(), "terramesh.log");
    }

    #[test]
    fn test_prepare_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("deep").join("nested");

        let log_path = prepare_log_file(&log_dir, "mesh.log").unwrap();

        assert!(log_dir.exists());
        assert_eq!(log_path, log_dir.join("mesh.log"));
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn test_prepare_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("mesh.log");
        fs::write(&log_path, "previous session").unwrap();

        prepare_log_file(temp_dir.path(), "mesh.log").unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn test_prepare_fails_when_directory_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("logs");
        fs::write(&blocker, "not a directory").unwrap();

        assert!(prepare_log_file(&blocker, "mesh.log").is_err());
    }

    #[test]
    fn test_guard_reports_path() {
        use tracing_appender::non_blocking::NonBlocking;

        let (non_blocking, guard) = NonBlocking::new(std::io::sink());
        drop(non_blocking);

        let logging_guard = LoggingGuard {
            _file_guard: guard,
            log_path: PathBuf::from("logs/terramesh.log"),
        };
        assert_eq!(logging_guard.log_path(), Path::new("logs/terramesh.log"));
    }

    // The global subscriber can only be installed once per process, so
    // init_logging itself is exercised by the CLI rather than here.
}
