//! JSON-file backend for the leadvault store.
//!
//! Persists the whole collection as a single document
//! (`{"leads": [...], "lastUpdated": ...}`) that is rewritten in full on
//! every append. All appends serialize through one async mutex so the
//! read-modify-write cycle cannot interleave between concurrent writers.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::FileStore;
