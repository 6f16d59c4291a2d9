use std::io::{self, Write};
use std::process::ExitStatus;

use thiserror::Error;
use tracing::{debug, error};

use super::commands::{Command, CommandError, CommandRegistry, Outcome};
use super::config::Config;
use super::context::ExecutionContext;
use super::parser::{tokenize, ParseError};
use crate::process::{ProcessError, ProcessRunner};

/// Where builtins and the dispatcher write. The shell uses stdio; tests
/// capture both.
pub struct Streams {
    pub out: Box<dyn Write>,
    pub err: Box<dyn Write>,
}

impl Streams {
    pub fn stdio() -> Self {
        Streams {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Process(#[from] ProcessError),
}

#[derive(Debug)]
pub enum DispatchResult {
    /// Nothing to run.
    Noop,
    /// A builtin finished.
    Completed,
    /// An external program ran to completion, successfully or not.
    External(ExitStatus),
    Terminate,
    ReplaceConfig(Config),
    /// The error has already been shown to the user and logged.
    Failed(DispatchError),
}

/// Routes a command to a builtin or to the process runner.
pub struct Dispatcher {
    registry: CommandRegistry,
    runner: ProcessRunner,
    quiet: bool,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, runner: ProcessRunner) -> Self {
        Self {
            registry,
            runner,
            quiet: false,
        }
    }

    /// Suppresses the notice printed when a program exits unsuccessfully.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn dispatch_line(
        &self,
        line: &str,
        config: &Config,
        ctx: &mut ExecutionContext,
        streams: &mut Streams,
    ) -> DispatchResult {
        match tokenize(line) {
            Ok(tokens) => self.dispatch(tokens, config, ctx, streams),
            Err(e) => self.report(None, e.into(), streams),
        }
    }

    /// Aliases are expanded once, then builtins win over anything on `PATH`.
    /// Errors never escape: they are printed, logged and returned as `Failed`.
    pub fn dispatch(
        &self,
        tokens: Vec<String>,
        config: &Config,
        ctx: &mut ExecutionContext,
        streams: &mut Streams,
    ) -> DispatchResult {
        let Some(name) = tokens.first().cloned() else {
            return DispatchResult::Noop;
        };

        match self.execute(tokens, config, ctx, streams) {
            Ok(result) => result,
            Err(e) => self.report(Some(&name), e, streams),
        }
    }

    fn execute(
        &self,
        tokens: Vec<String>,
        config: &Config,
        ctx: &mut ExecutionContext,
        streams: &mut Streams,
    ) -> Result<DispatchResult, DispatchError> {
        let tokens = config.aliases.resolve(tokens)?;
        let Some(name) = tokens.first() else {
            return Ok(DispatchResult::Noop);
        };

        if let Some(builtin) = self.registry.get(name) {
            debug!(command = %name, "running builtin");
            let outcome = builtin.execute(&tokens, ctx, streams.out.as_mut())?;
            let _ = streams.out.flush();
            return Ok(match outcome {
                Outcome::Continue => DispatchResult::Completed,
                Outcome::Exit => DispatchResult::Terminate,
                Outcome::Reload(config) => DispatchResult::ReplaceConfig(config),
            });
        }

        // Anything we printed must land before the child's output.
        let _ = streams.out.flush();
        debug!(command = %name, args = ?&tokens[1..], "spawning");
        let status = self.runner.run(&tokens, ctx)?;

        if !status.success() {
            debug!(command = %name, %status, "process exited unsuccessfully");
            if !self.quiet {
                let _ = writeln!(streams.err, "dsh: {}: exited with {}", name, status);
            }
        }
        Ok(DispatchResult::External(status))
    }

    fn report(&self, name: Option<&str>, e: DispatchError, streams: &mut Streams) -> DispatchResult {
        let command = name.unwrap_or_default();
        match &e {
            DispatchError::Parse(err) => {
                error!(command, error = %err, "could not parse command line");
                let _ = writeln!(streams.err, "dsh: parse error: {}", err);
            }
            DispatchError::Command(err @ CommandError::DirectoryChange { .. }) => {
                error!(command, error = %err, "directory change failed");
                let _ = writeln!(streams.err, "dsh: {}: {}", command, err);
            }
            DispatchError::Command(err) => {
                error!(command, error = %err, "builtin command failed");
                let _ = writeln!(streams.err, "dsh: {}: {}", command, err);
            }
            DispatchError::Process(err) => {
                error!(command, error = %err, "system command failed");
                let _ = writeln!(streams.err, "dsh: {}", err);
            }
        }
        let _ = streams.err.flush();
        DispatchResult::Failed(e)
    }
}
