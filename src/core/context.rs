use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Environment shared by every command of one session. The working directory
/// is not stored here; it stays process state and only `cd` changes it.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    vars: HashMap<String, String>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the mapping from the shell's own environment. Variables whose
    /// name or value is not valid UTF-8 are left out.
    pub fn from_process() -> Self {
        let vars = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `HOME` from the session environment, falling back to the account's
    /// home directory.
    pub fn home_dir(&self) -> Option<PathBuf> {
        match self.get("HOME") {
            Some(home) if !home.is_empty() => Some(PathBuf::from(home)),
            _ => dirs::home_dir(),
        }
    }
}
