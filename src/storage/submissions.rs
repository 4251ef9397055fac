use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::AppError;

/// Append-only JSON array on disk.
///
/// Every append rewrites the whole file. Appends are serialised through
/// `write_lock`, so overlapping requests within this process cannot lose
/// each other's records.
pub struct SubmissionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SubmissionStore {
    /// Prepare the store file, creating it as `[]` when absent. Returns the
    /// store and the number of records already present.
    pub async fn open(path: impl Into<PathBuf>) -> Result<(Self, usize), AppError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, b"[]").await?;
            tracing::info!("Created empty submission store at {}", path.display());
        }

        let store = Self {
            path,
            write_lock: Mutex::new(()),
        };
        let count = store.records().await?.len();

        Ok((store, count))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current records. Unparseable content reads as empty.
    pub async fn records(&self) -> Result<Vec<Value>, AppError> {
        let raw = read_or_empty(&self.path).await?;
        Ok(parse_array(&raw).unwrap_or_default())
    }

    pub async fn append<T: Serialize>(&self, record: &T) -> Result<(), AppError> {
        let record = serde_json::to_value(record)?;

        let _guard = self.write_lock.lock().await;

        let raw = read_or_empty(&self.path).await?;
        let mut records = match parse_array(&raw) {
            Some(records) => records,
            None => {
                self.quarantine(&raw).await?;
                Vec::new()
            }
        };

        records.push(record);

        let body = serde_json::to_vec_pretty(&records)?;
        tokio::fs::write(&self.path, body).await?;

        tracing::debug!("Stored submission #{} in {}", records.len(), self.path.display());
        Ok(())
    }

    /// Keep a copy of content that is not a JSON array next to the store
    /// before it gets replaced.
    async fn quarantine(&self, raw: &[u8]) -> Result<(), AppError> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!("Submission store {} was empty, starting fresh", self.path.display());
            return Ok(());
        }

        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".corrupt-{}", chrono::Utc::now().timestamp_millis()));
        let target = PathBuf::from(name);

        tokio::fs::write(&target, raw).await?;
        tracing::warn!(
            "Submission store {} was not a JSON array, moved previous content to {}",
            self.path.display(),
            target.display()
        );
        Ok(())
    }
}

async fn read_or_empty(path: &Path) -> Result<Vec<u8>, AppError> {
    match tokio::fs::read(path).await {
        Ok(raw) => Ok(raw),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn parse_array(raw: &[u8]) -> Option<Vec<Value>> {
    serde_json::from_slice(raw).ok()
}
