use std::io::ErrorKind;
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, ExitStatus, Stdio};

use super::ProcessError;
use crate::core::context::ExecutionContext;

/// Runs programs that are not builtins, in the foreground.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Spawns `tokens[0]` with the rest as arguments and blocks until it exits.
    /// The child sees exactly the session environment, the shell's working
    /// directory and the shell's standard streams.
    pub fn run(&self, tokens: &[String], ctx: &ExecutionContext) -> Result<ExitStatus, ProcessError> {
        let (program, args) = tokens
            .split_first()
            .ok_or_else(|| ProcessError::CommandNotFound(String::new()))?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(ctx.vars());

        let mut child = command.spawn().map_err(|source| match source.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                ProcessError::CommandNotFound(program.clone())
            }
            _ => ProcessError::Spawn {
                command: program.clone(),
                source,
            },
        })?;

        let status = child.wait().map_err(|source| ProcessError::Wait {
            command: program.clone(),
            source,
        })?;

        if status.signal() == Some(libc::SIGINT) {
            // The terminal echoed ^C without a newline.
            println!();
        }

        Ok(status)
    }
}
