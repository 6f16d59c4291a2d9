use std::io::Write;

use super::{Command, CommandError, Outcome};
use crate::core::context::ExecutionContext;

#[derive(Clone, Copy, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Leave the shell."
    }

    fn usage(&self) -> &'static str {
        "exit"
    }

    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut ExecutionContext,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        // A closed stdout must not keep the session alive.
        let _ = writeln!(out, "Exiting...");
        Ok(Outcome::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_returns_exit_outcome() -> Result<(), CommandError> {
        let mut out = Vec::new();
        let outcome = ExitCommand.execute(&["exit".to_string()], &mut ExecutionContext::new(), &mut out)?;

        assert!(matches!(outcome, Outcome::Exit));
        assert_eq!(String::from_utf8_lossy(&out), "Exiting...\n");
        Ok(())
    }

    #[test]
    fn test_exit_ignores_arguments() -> Result<(), CommandError> {
        let args = ["exit".to_string(), "3".to_string()];
        let outcome = ExitCommand.execute(&args, &mut ExecutionContext::new(), &mut Vec::new())?;
        assert!(matches!(outcome, Outcome::Exit));
        Ok(())
    }
}
