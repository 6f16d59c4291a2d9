use std::io::Write;

use super::{Command, CommandError, Outcome};
use crate::core::context::ExecutionContext;

#[derive(Clone, Debug)]
pub struct Topic {
    name: &'static str,
    description: &'static str,
    usage: &'static str,
}

impl Topic {
    pub fn of(cmd: &dyn Command) -> Self {
        Topic {
            name: cmd.name(),
            description: cmd.description(),
            usage: cmd.usage(),
        }
    }
}

#[derive(Clone, Default)]
pub struct HelpCommand {
    topics: Vec<Topic>,
}

impl HelpCommand {
    pub fn new(mut topics: Vec<Topic>) -> Self {
        topics.sort_by_key(|topic| topic.name);
        Self { topics }
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Display information about available commands."
    }

    fn usage(&self) -> &'static str {
        "help [command_name]"
    }

    fn execute(
        &self,
        args: &[String],
        _ctx: &mut ExecutionContext,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        match args.get(1) {
            Some(name) => match self.topics.iter().find(|topic| topic.name == name.as_str()) {
                Some(topic) => {
                    writeln!(out, "{}: {}", topic.name, topic.description)?;
                    writeln!(out, "Usage: {}", topic.usage)?;
                }
                None => writeln!(out, "No help available for {}", name)?,
            },
            None => {
                writeln!(out, "Available commands:")?;
                for topic in &self.topics {
                    writeln!(out, "{} - {}", topic.name, topic.description)?;
                }
            }
        }
        Ok(Outcome::Continue)
    }
}
