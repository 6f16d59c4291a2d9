use std::{
    borrow::Cow,
    collections::BTreeSet,
    env, fs,
    path::{Path, PathBuf},
};

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use crate::core::config::AliasTable;
use crate::highlight::SyntaxHighlighter;

/// Completion and highlighting for the line editor: command names for the
/// first word, file names after it.
pub struct ShellHelper {
    builtins: BTreeSet<String>,
    executables: BTreeSet<String>,
    aliases: BTreeSet<String>,
    highlighter: SyntaxHighlighter,
}

impl ShellHelper {
    /// `search_path` is the session's `PATH`, the same one commands are
    /// spawned with.
    pub fn new<'a>(
        builtins: impl IntoIterator<Item = &'a str>,
        aliases: &AliasTable,
        search_path: Option<&str>,
    ) -> Self {
        let mut helper = ShellHelper {
            builtins: builtins.into_iter().map(str::to_string).collect(),
            executables: BTreeSet::new(),
            aliases: BTreeSet::new(),
            highlighter: SyntaxHighlighter::new(),
        };
        helper.refresh_executables(search_path);
        helper.update_aliases(aliases);
        helper
    }

    pub fn refresh_executables(&mut self, search_path: Option<&str>) {
        self.executables.clear();

        let Some(search_path) = search_path else {
            return;
        };
        for dir in env::split_paths(search_path) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_file = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                    self.executables.insert(name.to_string());
                }
            }
        }
    }

    pub fn update_aliases(&mut self, aliases: &AliasTable) {
        self.aliases = aliases.names().map(str::to_string).collect();
    }

    fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        let mut matches: Vec<Pair> = self
            .builtins
            .iter()
            .chain(&self.executables)
            .filter(|name| name.starts_with(prefix))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: format!("{} ", name),
            })
            .collect();

        matches.extend(
            self.aliases
                .iter()
                .filter(|alias| alias.starts_with(prefix))
                .map(|alias| Pair {
                    display: format!("{} (alias)", alias),
                    replacement: format!("{} ", alias),
                }),
        );
        matches
    }

    fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir, file_prefix) = split_path_input(incomplete);
        let search_dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir.as_path()
        };

        let Ok(entries) = fs::read_dir(search_dir) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(&file_prefix) || (name.starts_with('.') && !file_prefix.starts_with('.')) {
                    return None;
                }
                let shown = dir.join(&name).to_string_lossy().into_owned();
                Some(if entry.path().is_dir() {
                    Pair {
                        display: format!("{}/", name),
                        replacement: format!("{}/", shown),
                    }
                } else {
                    Pair {
                        display: name,
                        replacement: format!("{} ", shown),
                    }
                })
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

/// `"src/ma"` → (`src/`, `ma`), `"src/"` → (`src/`, ``), `"ma"` → (``, `ma`).
fn split_path_input(incomplete: &str) -> (PathBuf, String) {
    match incomplete.rfind('/') {
        Some(idx) => (
            PathBuf::from(&incomplete[..=idx]),
            incomplete[idx + 1..].to_string(),
        ),
        None => (PathBuf::new(), incomplete.to_string()),
    }
}

impl Helper for ShellHelper {}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let first = line.split_whitespace().next().unwrap_or_default();
        if self.builtins.contains(first) {
            Cow::Owned(self.highlighter.highlight_command(line, true))
        } else if self.aliases.contains(first) {
            Cow::Owned(self.highlighter.highlight_alias(line))
        } else {
            Cow::Owned(self.highlighter.highlight_command(line, false))
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before_cursor = &line[..pos];
        let start = before_cursor
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let word = &before_cursor[start..];
        let is_first_word = before_cursor[..start].trim().is_empty();

        let matches = if is_first_word {
            self.complete_command(word)
        } else {
            self.complete_path(word)
        };
        Ok((start, matches))
    }
}
