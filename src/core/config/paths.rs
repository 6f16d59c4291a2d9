use std::path::{Path, PathBuf};

use super::ConfigError;

const CONFIG_FILE: &str = ".dsh_config.json";
const HISTORY_FILE: &str = ".dsh_history";
const LOG_FILE: &str = ".dsh_log.txt";

/// Where the shell keeps its files, all directly under the home directory.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_path: PathBuf,
    pub history_path: PathBuf,
    pub log_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::in_dir(&home))
    }

    pub fn in_dir(dir: &Path) -> Self {
        ConfigPaths {
            config_path: dir.join(CONFIG_FILE),
            history_path: dir.join(HISTORY_FILE),
            log_path: dir.join(LOG_FILE),
        }
    }

    pub fn with_config_override(mut self, path: Option<&str>) -> Self {
        if let Some(path) = path {
            self.config_path = PathBuf::from(path);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_in_dir() {
        let paths = ConfigPaths::in_dir(Path::new("/home/testuser"));

        assert_eq!(paths.config_path, PathBuf::from("/home/testuser/.dsh_config.json"));
        assert_eq!(paths.history_path, PathBuf::from("/home/testuser/.dsh_history"));
        assert_eq!(paths.log_path, PathBuf::from("/home/testuser/.dsh_log.txt"));
    }

    #[test]
    fn test_config_override() {
        let paths = ConfigPaths::in_dir(Path::new("/home/testuser"))
            .with_config_override(Some("/etc/dsh.json"));
        assert_eq!(paths.config_path, PathBuf::from("/etc/dsh.json"));

        let paths = ConfigPaths::in_dir(Path::new("/home/testuser")).with_config_override(None);
        assert_eq!(paths.config_path, PathBuf::from("/home/testuser/.dsh_config.json"));
    }
}
