//! Error types for `leadvault-store-file`.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store I/O failed at {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("store serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("store I/O timed out after {0:?}")]
  Timeout(Duration),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
