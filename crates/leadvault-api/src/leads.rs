//! Handlers for `/api/leads` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/leads` | Body: raw lead payload with a `type` tag; 201 on acceptance |
//! | `GET`  | `/api/leads` | Optional `?type=`, `?from=`, `?to=` filters |
//! | `GET`  | `/api/leads/stats` | Count, per-type breakdown, latest record |

use axum::{
  Json,
  extract::{Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leadvault_core::{
  intake::IntakeOutcome,
  lead::{LeadRecord, LeadType},
  store::{LeadStats, LeadStore},
};

use crate::{AppState, error::ApiError};

// ─── Submit ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
  pub success: bool,
  pub message: String,
  pub lead_id: String,
}

/// `POST /api/leads` — the lead intake endpoint.
///
/// An unparseable body is a generic 400; a parseable-but-invalid payload is
/// a 400 with the full field-error list; acceptance is a 201 with the
/// variant-specific confirmation and the generated identifier.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeadStore,
{
  let Json(raw) = payload.map_err(|_| ApiError::Malformed)?;

  let outcome =
    state.intake.submit(raw).await.map_err(ApiError::internal)?;

  match outcome {
    IntakeOutcome::Accepted { lead_id, message } => {
      if state.analytics_enabled {
        tracing::info!(target: "analytics", %lead_id, "lead_submitted");
      }
      Ok((
        StatusCode::CREATED,
        Json(SubmitResponse { success: true, message, lead_id }),
      ))
    }
    IntakeOutcome::Rejected { errors } => Err(ApiError::Validation(errors)),
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// Restrict to one lead type.
  #[serde(rename = "type")]
  pub lead_type: Option<LeadType>,
  /// Inclusive lower bound on `receivedAt`.
  pub from:      Option<DateTime<Utc>>,
  /// Inclusive upper bound on `receivedAt`.
  pub to:        Option<DateTime<Utc>>,
}

/// `GET /api/leads[?type=...][&from=...][&to=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<LeadRecord>>, ApiError>
where
  S: LeadStore,
{
  let mut leads = if params.from.is_some() || params.to.is_some() {
    let from = params.from.unwrap_or(DateTime::<Utc>::MIN_UTC);
    let to = params.to.unwrap_or(DateTime::<Utc>::MAX_UTC);
    state
      .store
      .query_by_date_range(from, to)
      .await
      .map_err(ApiError::internal)?
  } else {
    state.store.read_all().await.map_err(ApiError::internal)?
  };

  if let Some(lead_type) = params.lead_type {
    leads.retain(|r| r.data.lead_type() == lead_type);
  }

  Ok(Json(leads))
}

// ─── Stats ────────────────────────────────────────────────────────────────────

/// `GET /api/leads/stats`
pub async fn stats<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<LeadStats>, ApiError>
where
  S: LeadStore,
{
  let stats = state.store.stats().await.map_err(ApiError::internal)?;
  Ok(Json(stats))
}
