use thiserror::Error;

use crate::core::config::ConfigError;
use crate::process::ProcessError;

/// Failures that end the program. Everything a single command can get wrong
/// is handled by the dispatcher instead.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("process error: {0}")]
    Process(#[from] ProcessError),
    #[error("flag error: {0}")]
    Flag(String),
    #[error("logging error: {0}")]
    Logging(String),
}
