use std::{
    collections::VecDeque,
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Submitted command lines that outlive the session.
pub trait HistoryStore {
    /// Lines kept from earlier sessions, oldest first.
    fn load(&mut self) -> Result<Vec<String>, HistoryError>;
    fn append(&mut self, line: &str);
    /// Persists everything; called once when the session ends.
    fn flush(&mut self) -> Result<(), HistoryError>;
    fn set_capacity(&mut self, capacity: usize);
}

/// One line per entry, trimmed to the newest `capacity` lines.
///
/// The file is only rewritten when its previous contents were read in full.
/// Otherwise `flush` appends this session's lines and leaves the rest alone.
pub struct HistoryFile {
    path: PathBuf,
    entries: VecDeque<String>,
    capacity: usize,
    loaded: bool,
}

impl HistoryFile {
    pub fn new(path: PathBuf, capacity: usize) -> Self {
        Self {
            path,
            entries: VecDeque::new(),
            capacity,
            loaded: false,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    fn trim(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    fn io_error(&self, source: io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HistoryStore for HistoryFile {
    fn load(&mut self) -> Result<Vec<String>, HistoryError> {
        self.entries.clear();
        self.loaded = false;

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.loaded = true;
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        // Undecodable bytes are replaced rather than failing the whole file.
        for raw in bytes.split(|&b| b == b'\n') {
            let line = String::from_utf8_lossy(raw);
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if !line.trim().is_empty() {
                self.entries.push_back(line.to_string());
            }
        }
        self.trim();
        self.loaded = true;

        Ok(self.entries.iter().cloned().collect())
    }

    fn append(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.entries.push_back(line.to_owned());
        self.trim();
    }

    fn flush(&mut self) -> Result<(), HistoryError> {
        let write = || -> io::Result<()> {
            let file = if self.loaded {
                fs::File::create(&self.path)?
            } else {
                OpenOptions::new().create(true).append(true).open(&self.path)?
            };
            let mut writer = BufWriter::new(file);
            for entry in &self.entries {
                writeln!(writer, "{}", entry)?;
            }
            writer.flush()
        };
        write().map_err(|e| self.io_error(e))
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.trim();
    }
}
