use std::io;

use thiserror::Error;

pub mod runner;
pub mod signal;

pub use runner::ProcessRunner;
pub use signal::InterruptFlag;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("command not found: {0}")]
    CommandNotFound(String),
    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("failed waiting for {command}: {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("signal error: {0}")]
    Signal(#[source] io::Error),
}
