use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

mod cd;
mod env;
mod exit;
mod help;
mod pwd;
mod reload;

pub use cd::CdCommand;
pub use env::{EnvListCommand, GetEnvCommand, SetEnvCommand};
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use pwd::PwdCommand;
pub use reload::ReloadConfigCommand;

use crate::core::config::{Config, ConfigError, ConfigStore};
use crate::core::context::ExecutionContext;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing argument. Usage: {usage}")]
    MissingArgument { usage: &'static str },
    #[error("cannot change directory to {}: {source}", path.display())]
    DirectoryChange {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("home directory not found")]
    HomeDirNotFound,
    #[error(transparent)]
    ConfigLoad(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// What the session should do after a builtin returns.
#[derive(Debug)]
pub enum Outcome {
    Continue,
    Exit,
    Reload(Config),
}

pub trait Command {
    fn name(&self) -> &'static str;
    /// One sentence shown by `help`.
    fn description(&self) -> &'static str;
    fn usage(&self) -> &'static str;

    /// `args[0]` is the command name as typed.
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError>;

    /// Fails with `MissingArgument` unless `args` holds `count` words after the name.
    fn require_args(&self, args: &[String], count: usize) -> Result<(), CommandError> {
        if args.len() <= count {
            return Err(CommandError::MissingArgument {
                usage: self.usage(),
            });
        }
        Ok(())
    }
}

#[derive(Clone)]
pub enum Builtin {
    SetEnv(SetEnvCommand),
    GetEnv(GetEnvCommand),
    EnvList(EnvListCommand),
    Cd(CdCommand),
    Pwd(PwdCommand),
    Help(HelpCommand),
    ReloadConfig(ReloadConfigCommand),
    Exit(ExitCommand),
}

impl Builtin {
    fn as_command(&self) -> &dyn Command {
        match self {
            Builtin::SetEnv(cmd) => cmd,
            Builtin::GetEnv(cmd) => cmd,
            Builtin::EnvList(cmd) => cmd,
            Builtin::Cd(cmd) => cmd,
            Builtin::Pwd(cmd) => cmd,
            Builtin::Help(cmd) => cmd,
            Builtin::ReloadConfig(cmd) => cmd,
            Builtin::Exit(cmd) => cmd,
        }
    }
}

impl Command for Builtin {
    fn name(&self) -> &'static str {
        self.as_command().name()
    }

    fn description(&self) -> &'static str {
        self.as_command().description()
    }

    fn usage(&self) -> &'static str {
        self.as_command().usage()
    }

    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        self.as_command().execute(args, ctx, out)
    }
}

/// Builtins by name. Filled once by [`RegistryBuilder`] and read-only afterwards.
#[derive(Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Builtin>,
}

impl CommandRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Every builtin the shell ships with.
    pub fn standard(store: ConfigStore) -> Self {
        Self::builder()
            .register(Builtin::SetEnv(SetEnvCommand))
            .register(Builtin::GetEnv(GetEnvCommand))
            .register(Builtin::EnvList(EnvListCommand))
            .register(Builtin::Cd(CdCommand))
            .register(Builtin::Pwd(PwdCommand))
            .register(Builtin::ReloadConfig(ReloadConfigCommand::new(store)))
            .register(Builtin::Exit(ExitCommand))
            .build()
    }

    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.commands.get(name)
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    commands: BTreeMap<&'static str, Builtin>,
}

impl RegistryBuilder {
    pub fn register(mut self, builtin: Builtin) -> Self {
        self.commands.insert(builtin.name(), builtin);
        self
    }

    /// Adds `help`, whose topics are every command registered so far plus itself.
    pub fn build(mut self) -> CommandRegistry {
        let mut topics: Vec<_> = self
            .commands
            .values()
            .map(|cmd| help::Topic::of(cmd))
            .collect();
        topics.push(help::Topic::of(&HelpCommand::default()));

        let help = HelpCommand::new(topics);
        self.commands.insert(help.name(), Builtin::Help(help));
        CommandRegistry {
            commands: self.commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CommandRegistry {
        CommandRegistry::standard(ConfigStore::new("/nonexistent/dsh.json"))
    }

    #[test]
    fn test_standard_builtins() {
        let registry = registry();
        for name in ["setenv", "getenv", "envlist", "cd", "pwd", "help", "reload_config", "exit"] {
            assert!(registry.is_builtin(name), "{name} should be registered");
        }
        assert!(!registry.is_builtin("ls"));
        assert!(!registry.is_builtin(""));
    }

    #[test]
    fn test_names_are_sorted() {
        let names: Vec<_> = registry().names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_missing_argument_message_has_usage() {
        let err = SetEnvCommand
            .require_args(&["setenv".to_string()], 2)
            .expect_err("one word is not enough");
        assert!(err.to_string().contains("setenv [variable] [value]"));
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::MissingArgument { usage: "cmd" },
            CommandError::HomeDirNotFound,
            CommandError::DirectoryChange {
                path: PathBuf::from("/x"),
                source: io::Error::new(io::ErrorKind::NotFound, "gone"),
            },
            CommandError::Io(io::Error::new(io::ErrorKind::Other, "io error")),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
