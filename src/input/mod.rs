mod completer;
pub mod history;
mod reader;

pub use completer::ShellHelper;
pub use history::{HistoryError, HistoryFile, HistoryStore};
pub use reader::{LineEditor, LineReader, ReadOutcome};
