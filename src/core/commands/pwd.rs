use std::env;
use std::io::Write;

use super::{Command, CommandError, Outcome};
use crate::core::context::ExecutionContext;

#[derive(Clone, Copy, Default)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn description(&self) -> &'static str {
        "Print the current directory."
    }

    fn usage(&self) -> &'static str {
        "pwd"
    }

    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut ExecutionContext,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        writeln!(out, "{}", env::current_dir()?.display())?;
        Ok(Outcome::Continue)
    }
}
