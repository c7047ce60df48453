//! The intake service — the single orchestration entry point.
//!
//! `submit` runs the whole pipeline as one linear transaction:
//! validate → assign identifier → build record → append → confirmation.
//! There is no state retained between requests.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::{
  id,
  lead::LeadRecord,
  store::LeadStore,
  validate::{FieldError, validate},
};

// ─── Policy ──────────────────────────────────────────────────────────────────

/// What a failed append means for the user-visible request.
///
/// `BestEffort` mirrors the historical behavior: the user still gets a
/// confirmation even if durable storage failed, at the risk of silent data
/// loss. `Strict` trades UX on transient storage errors for the stronger
/// durability guarantee. The tension is real; pick per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurabilityPolicy {
  #[default]
  BestEffort,
  Strict,
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// The result of a submission that did not hit an internal fault.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeOutcome {
  /// The lead was accepted; `message` is the variant-specific confirmation.
  Accepted { lead_id: String, message: String },
  /// The payload failed validation — a client error, not a system fault.
  Rejected { errors: Vec<FieldError> },
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Orchestrates validation, identifier assignment, persistence, and
/// response formatting over any [`LeadStore`].
pub struct IntakeService<S> {
  store:  Arc<S>,
  policy: DurabilityPolicy,
}

impl<S: LeadStore> IntakeService<S> {
  /// A service with the default [`DurabilityPolicy::BestEffort`] policy.
  pub fn new(store: Arc<S>) -> Self {
    Self::with_policy(store, DurabilityPolicy::default())
  }

  pub fn with_policy(store: Arc<S>, policy: DurabilityPolicy) -> Self {
    Self { store, policy }
  }

  /// Run one submission through the pipeline.
  ///
  /// Returns `Err` only when an append fails under
  /// [`DurabilityPolicy::Strict`]; under `BestEffort` a failed append is
  /// logged and the caller still receives a confirmation.
  pub async fn submit(
    &self,
    raw: Value,
  ) -> Result<IntakeOutcome, S::Error> {
    // Page path travels alongside the form fields; validators ignore it.
    let source_page = raw
      .get("sourcePage")
      .and_then(Value::as_str)
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(str::to_owned)
      .unwrap_or_else(|| "unknown".to_owned());

    let data = match validate(&raw) {
      Ok(data) => data,
      Err(errors) => return Ok(IntakeOutcome::Rejected { errors }),
    };

    let record = LeadRecord {
      id: id::generate(),
      received_at: Utc::now(),
      source_page,
      data,
    };
    let message = record.data.lead_type().confirmation_message().to_owned();

    // Advisory observability entry with the full record; must never block
    // or fail the request.
    tracing::info!(
      lead_id = %record.id,
      lead_type = %record.data.lead_type(),
      source_page = %record.source_page,
      record = ?record,
      "lead received"
    );

    if let Err(error) = self.store.append(record.clone()).await {
      match self.policy {
        DurabilityPolicy::Strict => return Err(error),
        DurabilityPolicy::BestEffort => {
          tracing::error!(
            lead_id = %record.id,
            error = %error,
            "lead persistence failed; confirming to the caller anyway"
          );
        }
      }
    }

    Ok(IntakeOutcome::Accepted { lead_id: record.id, message })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
