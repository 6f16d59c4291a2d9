use std::io::Write;

use super::{Command, CommandError, Outcome};
use crate::core::context::ExecutionContext;

pub const NOT_SET: &str = "Variable not set.";

#[derive(Clone, Copy, Default)]
pub struct SetEnvCommand;

impl Command for SetEnvCommand {
    fn name(&self) -> &'static str {
        "setenv"
    }

    fn description(&self) -> &'static str {
        "Set an environment variable for this session."
    }

    fn usage(&self) -> &'static str {
        "setenv [variable] [value]"
    }

    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        self.require_args(args, 2)?;
        let (name, value) = (&args[1], &args[2]);

        ctx.set(name, value);
        writeln!(out, "Environment variable {} set to {}", name, value)?;
        Ok(Outcome::Continue)
    }
}

#[derive(Clone, Copy, Default)]
pub struct GetEnvCommand;

impl Command for GetEnvCommand {
    fn name(&self) -> &'static str {
        "getenv"
    }

    fn description(&self) -> &'static str {
        "Print the value of an environment variable."
    }

    fn usage(&self) -> &'static str {
        "getenv [variable]"
    }

    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        self.require_args(args, 1)?;
        writeln!(out, "{}", ctx.get(&args[1]).unwrap_or(NOT_SET))?;
        Ok(Outcome::Continue)
    }
}

#[derive(Clone, Copy, Default)]
pub struct EnvListCommand;

impl Command for EnvListCommand {
    fn name(&self) -> &'static str {
        "envlist"
    }

    fn description(&self) -> &'static str {
        "List all environment variables of this session."
    }

    fn usage(&self) -> &'static str {
        "envlist"
    }

    fn execute(
        &self,
        _args: &[String],
        ctx: &mut ExecutionContext,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let mut vars: Vec<_> = ctx.vars().collect();
        vars.sort_unstable();
        for (key, value) in vars {
            writeln!(out, "{}={}", key, value)?;
        }
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn run(cmd: &dyn Command, words: &[&str], ctx: &mut ExecutionContext) -> Result<String, CommandError> {
        let mut out = Vec::new();
        cmd.execute(&args(words), ctx, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_setenv_then_getenv() -> Result<(), CommandError> {
        let mut ctx = ExecutionContext::new();

        let printed = run(&SetEnvCommand, &["setenv", "FOO", "bar"], &mut ctx)?;
        assert_eq!(printed, "Environment variable FOO set to bar\n");
        assert_eq!(ctx.get("FOO"), Some("bar"));

        assert_eq!(run(&GetEnvCommand, &["getenv", "FOO"], &mut ctx)?, "bar\n");
        Ok(())
    }

    #[test]
    fn test_setenv_keeps_spaces_and_unicode() -> Result<(), CommandError> {
        let mut ctx = ExecutionContext::new();
        run(&SetEnvCommand, &["setenv", "GREETING", "값 🦀 value"], &mut ctx)?;
        assert_eq!(ctx.get("GREETING"), Some("값 🦀 value"));
        Ok(())
    }

    #[test]
    fn test_getenv_unset_prints_sentinel() -> Result<(), CommandError> {
        let mut ctx = ExecutionContext::new();
        let printed = run(&GetEnvCommand, &["getenv", "UNSET_VAR"], &mut ctx)?;
        assert_eq!(printed, format!("{}\n", NOT_SET));
        Ok(())
    }

    #[test]
    fn test_missing_arguments() {
        let mut ctx = ExecutionContext::new();

        for words in [&["setenv"][..], &["setenv", "ONLY_NAME"][..]] {
            assert!(matches!(
                run(&SetEnvCommand, words, &mut ctx),
                Err(CommandError::MissingArgument { .. })
            ));
        }
        assert!(matches!(
            run(&GetEnvCommand, &["getenv"], &mut ctx),
            Err(CommandError::MissingArgument { .. })
        ));
        assert_eq!(ctx.get("ONLY_NAME"), None);
    }

    #[test]
    fn test_envlist_is_sorted() -> Result<(), CommandError> {
        let mut ctx = ExecutionContext::new();
        ctx.set("B", "2");
        ctx.set("A", "1");

        assert_eq!(run(&EnvListCommand, &["envlist"], &mut ctx)?, "A=1\nB=2\n");
        Ok(())
    }
}
