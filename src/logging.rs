use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::ShellError;

/// Sends `tracing` events to `path`, appending, one timestamped line per
/// event. `RUST_LOG` overrides the level chosen by `debug`.
pub fn init(path: &Path, debug: bool) -> Result<(), ShellError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(if debug { "debug" } else { "info" }),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| ShellError::Logging(e.to_string()))
}
