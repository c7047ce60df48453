//! [`FileStore`] — the JSON-file implementation of [`LeadStore`].

use std::{io, path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use leadvault_core::{lead::LeadRecord, store::LeadStore};

use crate::{Error, Result};

// ─── On-disk container ───────────────────────────────────────────────────────

/// The persisted document. Owned exclusively by [`FileStore`]; nothing else
/// reads or writes the file directly.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeadsFile {
  leads:        Vec<LeadRecord>,
  /// Timestamp of the latest append.
  last_updated: Option<DateTime<Utc>>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lead store backed by a single JSON file under an application-local
/// `data` directory.
///
/// The file (and its containing directory) is created lazily on the first
/// append. A missing or unparseable file reads as "no prior data". Every
/// filesystem operation is bounded by `io_timeout`; exceeding it surfaces
/// as [`Error::Timeout`].
pub struct FileStore {
  path:       PathBuf,
  /// Serializes the read-modify-write append cycle. Two concurrent appends
  /// must never interleave their read and write phases.
  write_lock: Mutex<()>,
  io_timeout: Duration,
}

impl FileStore {
  pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path:       path.into(),
      write_lock: Mutex::new(()),
      io_timeout: Self::DEFAULT_IO_TIMEOUT,
    }
  }

  pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
    self.io_timeout = io_timeout;
    self
  }

  pub fn path(&self) -> &std::path::Path {
    &self.path
  }

  /// Run `fut` under the I/O timeout.
  async fn bounded<T>(
    &self,
    fut: impl Future<Output = io::Result<T>>,
  ) -> Result<io::Result<T>> {
    tokio::time::timeout(self.io_timeout, fut)
      .await
      .map_err(|_| Error::Timeout(self.io_timeout))
  }

  /// Read and parse the whole document. Missing file and corrupt contents
  /// both read as the empty document.
  async fn load(&self) -> Result<LeadsFile> {
    let bytes = match self.bounded(tokio::fs::read(&self.path)).await? {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Ok(LeadsFile::default());
      }
      Err(source) => {
        return Err(Error::Io { path: self.path.clone(), source });
      }
    };

    match serde_json::from_slice(&bytes) {
      Ok(file) => Ok(file),
      Err(e) => {
        tracing::warn!(
          path = %self.path.display(),
          error = %e,
          "lead store file is unparseable; treating as empty"
        );
        Ok(LeadsFile::default())
      }
    }
  }

  /// Rewrite the whole document. Writes go to a sibling temp file which is
  /// then renamed over the target, so readers never observe a half-written
  /// document.
  async fn persist(&self, file: &LeadsFile) -> Result<()> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      self
        .bounded(tokio::fs::create_dir_all(parent))
        .await?
        .map_err(|source| Error::Io { path: parent.to_path_buf(), source })?;
    }

    let json = serde_json::to_vec_pretty(file)?;
    let tmp = self.path.with_extension("json.tmp");

    self
      .bounded(tokio::fs::write(&tmp, &json))
      .await?
      .map_err(|source| Error::Io { path: tmp.clone(), source })?;
    self
      .bounded(tokio::fs::rename(&tmp, &self.path))
      .await?
      .map_err(|source| Error::Io { path: self.path.clone(), source })?;

    Ok(())
  }
}

// ─── LeadStore impl ──────────────────────────────────────────────────────────

impl LeadStore for FileStore {
  type Error = Error;

  async fn append(&self, record: LeadRecord) -> Result<()> {
    let _guard = self.write_lock.lock().await;

    let mut file = self.load().await?;
    file.leads.push(record);
    file.last_updated = Some(Utc::now());
    self.persist(&file).await
  }

  async fn read_all(&self) -> Result<Vec<LeadRecord>> {
    Ok(self.load().await?.leads)
  }
}
