use crate::error::EngineError;
use crate::record::{EntityKey, Record, format_record};
use ahash::AHashSet;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Receives merged records, one entity's records strictly in arrival order.
pub trait EntitySink {
    fn append(&mut self, record: &Record) -> Result<(), EngineError>;

    fn finish(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Keeps every entity's ordered log in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    logs: BTreeMap<EntityKey, Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(&self) -> &BTreeMap<EntityKey, Vec<Record>> {
        &self.logs
    }

    pub fn into_logs(self) -> BTreeMap<EntityKey, Vec<Record>> {
        self.logs
    }
}

impl EntitySink for MemorySink {
    fn append(&mut self, record: &Record) -> Result<(), EngineError> {
        self.logs
            .entry(record.entity.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }
}

/// Persists one `<entity>.log` file per entity under a directory.
///
/// Creating the sink clears every `*.log` file already in the directory, so the
/// directory only ever holds the entities of the current run.
pub struct FileSink {
    dir: PathBuf,
    touched: AHashSet<EntityKey>,
}

impl FileSink {
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| EngineError::sink_write(&dir, e))?;
        clear_entity_logs(&dir)?;
        Ok(Self {
            dir,
            touched: AHashSet::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn open(&mut self, entity: &EntityKey) -> Result<(PathBuf, File), EngineError> {
        let path = entity_log_path(&self.dir, entity);
        let file = if self.touched.insert(entity.clone()) {
            File::create(&path)
        } else {
            OpenOptions::new().append(true).open(&path)
        };
        let file = file.map_err(|e| EngineError::sink_write(&path, e))?;
        Ok((path, file))
    }
}

impl EntitySink for FileSink {
    fn append(&mut self, record: &Record) -> Result<(), EngineError> {
        let (path, mut file) = self.open(&record.entity)?;
        writeln!(file, "{}", format_record(record)).map_err(|e| EngineError::sink_write(path, e))
    }
}

/// Bytes escaped in entity log file names. `%` is included so distinct keys
/// never share a file.
const FILE_NAME: &AsciiSet = &CONTROLS.add(b'%').add(b'/').add(b'\\');

/// Location of an entity's persisted log. Path separators in the key are percent-encoded.
pub fn entity_log_path(dir: &Path, entity: &EntityKey) -> PathBuf {
    dir.join(format!("{}.log", utf8_percent_encode(entity.as_str(), FILE_NAME)))
}

pub(crate) fn is_entity_log_name(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
}

fn clear_entity_logs(dir: &Path) -> Result<(), EngineError> {
    let entries = fs::read_dir(dir).map_err(|e| EngineError::sink_write(dir, e))?;

    let mut removed = 0usize;
    for entry in entries {
        let path = entry.map_err(|e| EngineError::sink_write(dir, e))?.path();
        if is_entity_log_name(&path) && path.is_file() {
            fs::remove_file(&path).map_err(|e| EngineError::sink_write(&path, e))?;
            removed += 1;
        }
    }

    tracing::debug!(dir = %dir.display(), removed, "stale entity logs cleared");
    Ok(())
}
