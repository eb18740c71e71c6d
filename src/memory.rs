use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One day's design choice, as extracted from the generated page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignRecord {
    pub date: String,  // "YYYY-MM-DD"
    pub brief: String, // full text, truncated only for display
}

impl DesignRecord {
    pub fn new(date: impl Into<String>, brief: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            brief: brief.into(),
        }
    }
}

/// Rolling history of design records, oldest first.
///
/// Reads never fail: missing or corrupt history is the same as no history.
/// Write errors are returned to the caller.
pub trait DesignStore {
    fn load(&self) -> Vec<DesignRecord>;

    fn append(&self, record: DesignRecord) -> Result<()>;

    /// Last `n` records, most recent last.
    fn recent(&self, n: usize) -> Vec<DesignRecord> {
        let mut all = self.load();
        let skip = all.len().saturating_sub(n);
        all.drain(..skip);
        all
    }
}

/// Drop from the head until at most `window` records remain.
pub fn trim_to_window(records: &mut Vec<DesignRecord>, window: usize) {
    if records.len() > window {
        let excess = records.len() - window;
        records.drain(..excess);
    }
}

/// History kept as a pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    window: usize,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, window: usize) -> Self {
        Self {
            path: path.into(),
            window,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "design_memory.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn persist(&self, records: &[DesignRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create memory dir {}", parent.display()))?;
            }
        }
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.tmp_path();
        std::fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
        // rename is atomic on the same filesystem; readers see old or new, never half
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {} with {}", self.path.display(), tmp.display()))?;
        Ok(())
    }

    /// Raw file content; `None` when there is no history file yet.
    fn read_existing(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read design memory {}", self.path.display())),
        }
    }

    fn parse(&self, content: &str) -> Vec<DesignRecord> {
        match serde_json::from_str::<Vec<DesignRecord>>(content) {
            Ok(records) => {
                debug!("Design memory loaded - path={}, records={}", self.path.display(), records.len());
                records
            }
            Err(e) => {
                warn!("Design memory corrupt, starting fresh - path={}, error={}", self.path.display(), e);
                Vec::new()
            }
        }
    }
}

impl DesignStore for JsonFileStore {
    fn load(&self) -> Vec<DesignRecord> {
        match self.read_existing() {
            Ok(Some(content)) => self.parse(&content),
            Ok(None) => {
                debug!("No design memory yet - path={}", self.path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Design memory unreadable, starting fresh - path={}, error={:#}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// An existing file that cannot be read is an error here, so it is never overwritten.
    fn append(&self, record: DesignRecord) -> Result<()> {
        let mut records = match self.read_existing()? {
            Some(content) => self.parse(&content),
            None => Vec::new(),
        };
        records.push(record);
        let before = records.len();
        trim_to_window(&mut records, self.window);
        self.persist(&records)?;
        info!(
            "Design memory saved - path={}, records={}, evicted={}",
            self.path.display(),
            records.len(),
            before - records.len()
        );
        Ok(())
    }
}

/// Stand-in store that never touches disk.
#[cfg(test)]
#[derive(Debug)]
pub struct InMemoryStore {
    records: std::cell::RefCell<Vec<DesignRecord>>,
    window: usize,
}

#[cfg(test)]
impl InMemoryStore {
    pub fn with_records(records: Vec<DesignRecord>, window: usize) -> Self {
        Self {
            records: std::cell::RefCell::new(records),
            window,
        }
    }
}

#[cfg(test)]
impl DesignStore for InMemoryStore {
    fn load(&self) -> Vec<DesignRecord> {
        self.records.borrow().clone()
    }

    fn append(&self, record: DesignRecord) -> Result<()> {
        let mut records = self.records.borrow_mut();
        records.push(record);
        trim_to_window(&mut records, self.window);
        Ok(())
    }
}
