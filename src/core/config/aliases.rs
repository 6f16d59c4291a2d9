use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::parser::{tokenize, ParseError};

/// Shorthand names mapped to the command line they stand for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    aliases: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, command: &str) {
        self.aliases.insert(name.to_string(), command.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Expands the first word once. The expansion is not looked up again, so
    /// `foo -> foo -v` runs whatever `foo` is without the alias.
    pub fn resolve(&self, tokens: Vec<String>) -> Result<Vec<String>, ParseError> {
        let Some(replacement) = tokens.first().and_then(|first| self.get(first)) else {
            return Ok(tokens);
        };

        let mut resolved = tokenize(replacement)?;
        resolved.extend(tokens.into_iter().skip(1));
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_add_and_get_alias() {
        let mut table = AliasTable::new();
        table.add("ll", "ls -la");
        assert_eq!(table.get("ll"), Some("ls -la"));
        assert_eq!(table.get("gs"), None);
    }

    #[test]
    fn test_resolve_prepends_alias_tokens() -> Result<(), ParseError> {
        let mut table = AliasTable::new();
        table.add("ll", "ls -la");

        let resolved = table.resolve(tokens(&["ll", "/tmp"]))?;
        assert_eq!(resolved, ["ls", "-la", "/tmp"]);
        Ok(())
    }

    #[test]
    fn test_unknown_command_passes_through() -> Result<(), ParseError> {
        let table = AliasTable::new();
        let resolved = table.resolve(tokens(&["ls", "-l"]))?;
        assert_eq!(resolved, ["ls", "-l"]);
        Ok(())
    }

    #[test]
    fn test_quoted_replacement() -> Result<(), ParseError> {
        let mut table = AliasTable::new();
        table.add("greet", r#"echo "hello world""#);

        let resolved = table.resolve(tokens(&["greet", "again"]))?;
        assert_eq!(resolved, ["echo", "hello world", "again"]);
        Ok(())
    }

    #[test]
    fn test_resolution_is_single_pass() -> Result<(), ParseError> {
        let mut table = AliasTable::new();
        table.add("foo", "foo -v");
        table.add("a", "b");
        table.add("b", "c");

        assert_eq!(table.resolve(tokens(&["foo", "x"]))?, ["foo", "-v", "x"]);
        assert_eq!(table.resolve(tokens(&["a"]))?, ["b"]);
        Ok(())
    }

    #[test]
    fn test_only_first_word_is_expanded() -> Result<(), ParseError> {
        let mut table = AliasTable::new();
        table.add("ll", "ls -la");
        assert_eq!(table.resolve(tokens(&["echo", "ll"]))?, ["echo", "ll"]);
        Ok(())
    }

    #[test]
    fn test_malformed_replacement() {
        let mut table = AliasTable::new();
        table.add("bad", "echo 'oops");
        assert!(table.resolve(tokens(&["bad"])).is_err());
    }
}
