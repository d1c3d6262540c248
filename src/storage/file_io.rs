//! JSON files backing the ledger tables
//!
//! Every table is a single pretty-printed JSON document. Writes go to a
//! sibling `*.tmp` file which is synced and renamed over the target, so a
//! reader only ever sees a complete document.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LedgerError, LedgerResult};

fn storage_error(action: &str, path: &Path, err: impl Display) -> LedgerError {
    LedgerError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// One JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Read the document, or `T::default()` when the file does not exist yet
    pub fn read_or_default<T>(&self) -> LedgerResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(storage_error("open", &self.path, e)),
        };

        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| storage_error("parse", &self.path, e))
    }

    /// Replace the document with `data`
    pub fn write<T: Serialize>(&self, data: &T) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| storage_error("create", parent, e))?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = write_synced(&temp_path, data) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            storage_error("replace", &self.path, e)
        })
    }
}

fn write_synced<T: Serialize>(path: &Path, data: &T) -> LedgerResult<()> {
    let file = File::create(path).map_err(|e| storage_error("create", path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize", path, e))?;
    writer.flush().map_err(|e| storage_error("flush", path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize, Default)]
    struct Roster {
        names: Vec<String>,
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let file = JsonFile::new(temp_dir.path().join("people.json"));

        let roster: Roster = file.read_or_default().unwrap();
        assert!(roster.names.is_empty());
    }

    #[test]
    fn test_write_creates_parent_and_cleans_temp() {
        let temp_dir = TempDir::new().unwrap();
        let file = JsonFile::new(temp_dir.path().join("data").join("people.json"));

        let roster = Roster {
            names: vec!["Ana".into(), "Bruno".into()],
        };
        file.write(&roster).unwrap();

        assert_eq!(file.read_or_default::<Roster>().unwrap(), roster);
        assert!(!temp_dir.path().join("data").join("people.json.tmp").exists());
    }

    #[test]
    fn test_unparseable_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = JsonFile::new(temp_dir.path().join("people.json"));
        fs::write(file.path(), "{ not json").unwrap();

        let err = file.read_or_default::<Roster>().unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
        assert!(err.to_string().contains("Failed to parse"));
    }
}
