//! JSON HTTP API for leadvault.
//!
//! Exposes an axum [`Router`] backed by any
//! [`leadvault_core::store::LeadStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.

pub mod error;
pub mod leads;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
  Router,
  http::{Method, header},
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use leadvault_core::{
  intake::{DurabilityPolicy, IntakeService},
  store::LeadStore,
};

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` (with
/// `LEADVAULT_*` environment overrides).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  /// Path of the JSON lead store document.
  pub data_path:         PathBuf,
  /// What a failed append means for the user-visible request.
  #[serde(default)]
  pub durability:        DurabilityPolicy,
  /// When `true`, an `analytics`-target log event is emitted per accepted
  /// lead. Read once at startup; there is no runtime toggle.
  #[serde(default)]
  pub analytics_enabled: bool,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: LeadStore> {
  pub intake:            Arc<IntakeService<S>>,
  pub store:             Arc<S>,
  pub analytics_enabled: bool,
}

// Manual impl: `S` itself need not be `Clone`, only the `Arc` handles are.
impl<S: LeadStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      intake:            self.intake.clone(),
      store:             self.store.clone(),
      analytics_enabled: self.analytics_enabled,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the intake API.
///
/// The CORS layer answers preflight requests itself: any origin may `POST`
/// with a `Content-Type` header, cacheable for 24 hours.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: LeadStore + 'static,
{
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
    .allow_headers([header::CONTENT_TYPE])
    .max_age(Duration::from_secs(86_400));

  Router::new()
    .route("/api/leads", post(leads::submit::<S>).get(leads::list::<S>))
    .route("/api/leads/stats", get(leads::stats::<S>))
    .route("/health", get(health))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn health() -> &'static str {
  "ok"
}
