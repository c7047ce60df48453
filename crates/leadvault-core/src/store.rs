//! The `LeadStore` trait, derived query views, and the in-memory backend.
//!
//! The trait is implemented by storage backends (e.g. `leadvault-store-file`).
//! Higher layers depend on this abstraction, not on any concrete backend,
//! which also lets tests substitute [`MemoryStore`].

use std::{
  future::Future,
  sync::{Arc, Mutex, PoisonError},
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::lead::{LeadRecord, LeadType};

// ─── Derived views ───────────────────────────────────────────────────────────

/// Per-type record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeBreakdown {
  pub quick:    usize,
  pub callback: usize,
  pub brief:    usize,
}

/// Aggregate view over the whole store; see [`LeadStore::stats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStats {
  pub total:   usize,
  pub by_type: TypeBreakdown,
  /// The most recently appended record, if any.
  pub latest:  Option<LeadRecord>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an append-only lead store backend.
///
/// Records are only ever added, never mutated or removed. Implementations
/// must serialize concurrent `append` calls so that no write is lost.
///
/// The query operations are derived read-only views over [`read_all`];
/// default implementations filter in memory, which is all this scale needs.
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
///
/// [`read_all`]: LeadStore::read_all
pub trait LeadStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one record, creating the backing store (and any containing
  /// directory) on first use.
  fn append(
    &self,
    record: LeadRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The full record sequence in arrival order. A store that does not yet
  /// exist, or whose contents are unreadable, reads as empty.
  fn read_all(
    &self,
  ) -> impl Future<Output = Result<Vec<LeadRecord>, Self::Error>> + Send + '_;

  /// All records of one lead type, in arrival order.
  fn query_by_type(
    &self,
    lead_type: LeadType,
  ) -> impl Future<Output = Result<Vec<LeadRecord>, Self::Error>> + Send + '_
  {
    async move {
      let mut leads = self.read_all().await?;
      leads.retain(|r| r.data.lead_type() == lead_type);
      Ok(leads)
    }
  }

  /// All records whose receipt time falls within `[start, end]`, inclusive
  /// on both bounds.
  fn query_by_date_range(
    &self,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<LeadRecord>, Self::Error>> + Send + '_
  {
    async move {
      let mut leads = self.read_all().await?;
      leads.retain(|r| r.received_at >= start && r.received_at <= end);
      Ok(leads)
    }
  }

  /// Count, per-type breakdown, and the most recent record.
  fn stats(
    &self,
  ) -> impl Future<Output = Result<LeadStats, Self::Error>> + Send + '_ {
    async move {
      let leads = self.read_all().await?;
      let mut by_type = TypeBreakdown::default();
      for record in &leads {
        match record.data.lead_type() {
          LeadType::Quick => by_type.quick += 1,
          LeadType::Callback => by_type.callback += 1,
          LeadType::Brief => by_type.brief += 1,
        }
      }
      Ok(LeadStats {
        total: leads.len(),
        by_type,
        latest: leads.into_iter().next_back(),
      })
    }
  }
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// An in-memory [`LeadStore`] for tests and ephemeral deployments.
///
/// Cloning is cheap — clones share the same underlying record list.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  leads: Arc<Mutex<Vec<LeadRecord>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl LeadStore for MemoryStore {
  type Error = std::convert::Infallible;

  async fn append(&self, record: LeadRecord) -> Result<(), Self::Error> {
    self
      .leads
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(record);
    Ok(())
  }

  async fn read_all(&self) -> Result<Vec<LeadRecord>, Self::Error> {
    Ok(
      self
        .leads
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone(),
    )
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::lead::LeadData;

  fn record(id: &str, data: LeadData) -> LeadRecord {
    LeadRecord {
      id: id.to_owned(),
      received_at: Utc::now(),
      source_page: "unknown".to_owned(),
      data,
    }
  }

  fn quick(id: &str) -> LeadRecord {
    record(id, LeadData::Quick {
      name:      None,
      phone:     Some("5551234567".to_owned()),
      email:     None,
      source:    None,
      timestamp: None,
    })
  }

  fn callback(id: &str) -> LeadRecord {
    record(id, LeadData::Callback {
      name:      None,
      phone:     "5551234567".to_owned(),
      source:    None,
      timestamp: None,
    })
  }

  #[tokio::test]
  async fn append_preserves_arrival_order() {
    let store = MemoryStore::new();
    store.append(quick("lead_1")).await.unwrap();
    store.append(quick("lead_2")).await.unwrap();

    let all = store.read_all().await.unwrap();
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["lead_1", "lead_2"]);
  }

  #[tokio::test]
  async fn query_by_type_filters() {
    let store = MemoryStore::new();
    store.append(quick("lead_1")).await.unwrap();
    store.append(callback("lead_2")).await.unwrap();
    store.append(quick("lead_3")).await.unwrap();

    let quicks = store.query_by_type(LeadType::Quick).await.unwrap();
    assert_eq!(quicks.len(), 2);
    let briefs = store.query_by_type(LeadType::Brief).await.unwrap();
    assert!(briefs.is_empty());
  }

  #[tokio::test]
  async fn date_range_is_inclusive_on_both_bounds() {
    let store = MemoryStore::new();
    for (id, day) in [("lead_1", 1), ("lead_2", 2), ("lead_3", 3)] {
      let mut r = quick(id);
      r.received_at = Utc.with_ymd_and_hms(2026, 8, day, 12, 0, 0).unwrap();
      store.append(r).await.unwrap();
    }

    let hits = store
      .query_by_date_range(
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 8, 2, 12, 0, 0).unwrap(),
      )
      .await
      .unwrap();
    let ids: Vec<&str> = hits.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["lead_1", "lead_2"]);
  }

  #[tokio::test]
  async fn stats_on_empty_store() {
    let store = MemoryStore::new();
    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.by_type, TypeBreakdown::default());
    assert!(stats.latest.is_none());
  }

  #[tokio::test]
  async fn stats_counts_and_latest() {
    let store = MemoryStore::new();
    store.append(quick("lead_1")).await.unwrap();
    store.append(callback("lead_2")).await.unwrap();
    store.append(quick("lead_3")).await.unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_type.quick, 2);
    assert_eq!(stats.by_type.callback, 1);
    assert_eq!(stats.by_type.brief, 0);
    assert_eq!(stats.latest.unwrap().id, "lead_3");
  }
}
