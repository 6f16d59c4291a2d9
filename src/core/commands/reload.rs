use std::io::Write;

use super::{Command, CommandError, Outcome};
use crate::core::config::ConfigStore;
use crate::core::context::ExecutionContext;

#[derive(Clone)]
pub struct ReloadConfigCommand {
    store: ConfigStore,
}

impl ReloadConfigCommand {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }
}

impl Command for ReloadConfigCommand {
    fn name(&self) -> &'static str {
        "reload_config"
    }

    fn description(&self) -> &'static str {
        "Reload aliases and settings from the configuration file."
    }

    fn usage(&self) -> &'static str {
        "reload_config"
    }

    /// The new configuration is handed back to the session; nothing is
    /// replaced if loading fails.
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut ExecutionContext,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let config = self.store.load()?;
        writeln!(out, "Configuration reloaded.")?;
        Ok(Outcome::Reload(config))
    }
}
