//! Persistent record of downloaded episode ids.
//!
//! The ledger is a plain text file with one id per line. It is read in full
//! once per run and only ever appended to, one line per completed download.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::episode::normalize_id;
use crate::error::{Error, Result};

/// Append-only set of downloaded ids backed by a file.
#[derive(Debug)]
pub struct IdLedger {
    path: PathBuf,
    ids: HashSet<String>,
}

impl IdLedger {
    /// Read the ledger at `path`. A missing file is an empty ledger.
    pub fn load(path: &Path) -> Result<Self> {
        let mut ids = HashSet::new();

        match File::open(path) {
            Ok(file) => {
                for line in BufReader::new(file).lines() {
                    let line = line?;
                    if let Some(id) = normalize_id(&line) {
                        ids.insert(id);
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::Io(e)),
        }

        tracing::debug!("Loaded {} ids from {}", ids.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            ids,
        })
    }

    /// Check if an id has been recorded.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of recorded ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no ids have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record an id durably. The file is opened, written, flushed and closed
    /// on every call.
    pub fn append(&mut self, id: &str) -> Result<()> {
        let id = normalize_id(id)
            .ok_or_else(|| Error::Extract(format!("Unstorable episode id: {:?}", id)))?;

        if self.ids.contains(&id) {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", id)?;
        file.sync_data()?;

        self.ids.insert(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = IdLedger::load(&dir.path().join("downloaded_ids.txt")).unwrap();
        assert!(ledger.is_empty());
        assert!(!ledger.contains("A"));
    }

    #[test]
    fn test_append_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("downloaded_ids.txt");

        let mut ledger = IdLedger::load(&path).unwrap();
        ledger.append("A").unwrap();
        ledger.append("https://cdn.example.com/b.mp3").unwrap();
        assert_eq!(ledger.len(), 2);

        let reloaded = IdLedger::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("A"));
        assert!(reloaded.contains("https://cdn.example.com/b.mp3"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "A\nhttps://cdn.example.com/b.mp3\n"
        );
    }

    #[test]
    fn test_appends_to_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("downloaded_ids.txt");
        std::fs::write(&path, "A\n\n  B  \n").unwrap();

        let mut ledger = IdLedger::load(&path).unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(ledger.contains("B"));

        ledger.append("C").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "A\n\n  B  \nC\n"
        );
    }

    #[test]
    fn test_duplicate_append_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("downloaded_ids.txt");

        let mut ledger = IdLedger::load(&path).unwrap();
        ledger.append("A").unwrap();
        ledger.append("A").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A\n");
    }

    #[test]
    fn test_rejects_multiline_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = IdLedger::load(&dir.path().join("ids.txt")).unwrap();
        assert!(ledger.append("a\nb").is_err());
        assert!(ledger.is_empty());
    }
}
