use std::path::{Path, PathBuf};

/// Tilde expansion against a known home directory.
#[derive(Debug, Clone)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl PathExpander {
    pub fn new(home: Option<PathBuf>) -> Self {
        Self { home }
    }

    /// `~` and `~/rest` expand to the home directory; `~user` and anything
    /// else are returned as written. Without a home directory nothing expands.
    pub fn expand(&self, path: &str) -> PathBuf {
        let Some(home) = &self.home else {
            return PathBuf::from(path);
        };

        if path == "~" {
            return home.clone();
        }

        match path.strip_prefix("~/") {
            Some(rest) => rest
                .split('/')
                .filter(|part| !part.is_empty())
                .fold(home.clone(), |acc, part| acc.join(part)),
            None => Path::new(path).to_path_buf(),
        }
    }

    pub fn is_home_path(&self, path: &str) -> bool {
        path == "~" || path.starts_with("~/")
    }
}
