//! Destinations for generated program documents.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ersa_template::GeneratedDocument;

use crate::error::SinkError;

/// Receives finished documents. Implementations must tolerate concurrent
/// calls when generation runs on more than one worker.
pub trait OutputSink: Sync {
    /// Persists `doc` under `file_name` and returns where it went.
    fn write(&self, file_name: &str, doc: &GeneratedDocument) -> Result<PathBuf, SinkError>;
}

/// Writes one file per program into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates `dir` (and parents) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| SinkError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputSink for DirectorySink {
    fn write(&self, file_name: &str, doc: &GeneratedDocument) -> Result<PathBuf, SinkError> {
        let bytes = doc.to_bytes()?;
        let path = self.dir.join(file_name);
        if let Err(source) = write_file(&path, &bytes) {
            // Never leave a truncated program behind.
            let _ = fs::remove_file(&path);
            return Err(SinkError::Write { path, source });
        }
        Ok(path)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()
}

/// Keeps documents in memory, keyed by file name.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.files.lock().ok()?.get(file_name).cloned()
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files
            .lock()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn into_files(self) -> BTreeMap<String, Vec<u8>> {
        self.files.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl OutputSink for MemorySink {
    fn write(&self, file_name: &str, doc: &GeneratedDocument) -> Result<PathBuf, SinkError> {
        let bytes = doc.to_bytes()?;
        let mut files = self.files.lock().map_err(|_| SinkError::Poisoned)?;
        files.insert(file_name.to_string(), bytes);
        Ok(PathBuf::from(file_name))
    }
}

/// Serializes and discards. Backs `--dry-run`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn write(&self, file_name: &str, doc: &GeneratedDocument) -> Result<PathBuf, SinkError> {
        doc.write_to(io::sink())?;
        Ok(PathBuf::from(file_name))
    }
}

#[cfg(test)]
mod tests {
    use ersa_template::TemplateDocument;

    use super::*;

    fn doc() -> GeneratedDocument {
        TemplateDocument::parse("<Program><name>x</name></Program>")
            .unwrap()
            .instantiate()
    }

    #[test]
    fn directory_sink_creates_nested_dir_and_writes() {
        let temp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::create(temp.path().join("out/nested")).unwrap();
        let path = sink.write("A.xml", &doc()).unwrap();
        let written = fs::read(&path).unwrap();
        assert_eq!(written, doc().to_bytes().unwrap());
    }

    #[test]
    fn directory_sink_reports_unwritable_target() {
        let temp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::create(temp.path()).unwrap();
        fs::create_dir(temp.path().join("taken.xml")).unwrap();
        let err = sink.write("taken.xml", &doc()).unwrap_err();
        assert!(matches!(err, SinkError::Write { .. }));
    }

    #[test]
    fn directory_sink_fails_when_path_is_a_file() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let err = DirectorySink::create(blocker.join("out")).unwrap_err();
        assert!(matches!(err, SinkError::CreateDir { .. }));
    }

    #[test]
    fn memory_sink_keeps_bytes() {
        let sink = MemorySink::new();
        sink.write("B.xml", &doc()).unwrap();
        assert_eq!(sink.file_names(), vec!["B.xml".to_string()]);
        assert_eq!(sink.get("B.xml"), Some(doc().to_bytes().unwrap()));
    }
}
