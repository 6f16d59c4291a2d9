use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;

use super::ShellHelper;
use crate::core::config::Config;
use crate::error::ShellError;

#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// ^C at the prompt; whatever was typed is gone.
    Interrupted,
    Eof,
}

/// Source of command lines for the prompt loop.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError>;

    /// Makes `line` available for recall.
    fn remember(&mut self, _line: &str) {}

    /// Picks up aliases and limits from a newly loaded configuration.
    fn refresh(&mut self, _config: &Config) {}

    /// Called when the session's `PATH` changes.
    fn set_search_path(&mut self, _search_path: Option<&str>) {}
}

pub type LineEditor = Editor<ShellHelper, FileHistory>;

impl LineReader for LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(e) = self.add_history_entry(line) {
            tracing::warn!(error = %e, "could not add line to editor history");
        }
    }

    fn refresh(&mut self, config: &Config) {
        if let Err(e) = self.set_max_history_size(config.history_length) {
            tracing::warn!(error = %e, "could not resize editor history");
        }
        if let Some(helper) = self.helper_mut() {
            helper.update_aliases(&config.aliases);
        }
    }

    fn set_search_path(&mut self, search_path: Option<&str>) {
        if let Some(helper) = self.helper_mut() {
            helper.refresh_executables(search_path);
        }
    }
}
