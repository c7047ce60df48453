//! Lead types — the three form variants captured by the marketing site.
//!
//! A lead is an immutable record of a prospective customer's submission.
//! Once persisted it is never updated or deleted; the store is append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── LeadType ────────────────────────────────────────────────────────────────

/// The closed set of lead variants. The variant determines which fields are
/// required and which confirmation copy the caller receives.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LeadType {
  /// A minimal "call me" form: name plus phone or email.
  Quick,
  /// A callback request: phone number is mandatory.
  Callback,
  /// A full project brief with site type, goal, and contact details.
  Brief,
}

impl LeadType {
  /// The discriminant string used as the wire `type` tag.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Quick => "quick",
      Self::Callback => "callback",
      Self::Brief => "brief",
    }
  }

  /// Variant-specific confirmation copy returned on a successful intake.
  pub fn confirmation_message(&self) -> &'static str {
    match self {
      Self::Quick => {
        "Thanks! We received your request and will be in touch shortly."
      }
      Self::Callback => {
        "Got it! We'll call you back within one business day."
      }
      Self::Brief => {
        "Your project brief has been received. We'll review it and reply \
         with an estimate."
      }
    }
  }
}

impl std::fmt::Display for LeadType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── LeadData ────────────────────────────────────────────────────────────────

/// The validated payload of a lead — a tagged union keyed by [`LeadType`].
///
/// Every variant carries an optional `source` (campaign or channel label)
/// and an optional client-supplied `timestamp`. The timestamp is advisory
/// only and stored verbatim; the authoritative receipt time lives on
/// [`LeadRecord::received_at`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LeadData {
  Quick {
    #[serde(skip_serializing_if = "Option::is_none")]
    name:      Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone:     Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email:     Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source:    Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
  },

  Callback {
    #[serde(skip_serializing_if = "Option::is_none")]
    name:      Option<String>,
    phone:     String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source:    Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
  },

  #[serde(rename_all = "camelCase")]
  Brief {
    site_type:  String,
    goal:       String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeline:   Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    budget:     Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    references: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    telegram:   Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment:    Option<String>,
    name:       String,
    email:      String,
    phone:      String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source:     Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp:  Option<String>,
  },
}

impl LeadData {
  /// The [`LeadType`] discriminant of this payload.
  pub fn lead_type(&self) -> LeadType {
    match self {
      Self::Quick { .. } => LeadType::Quick,
      Self::Callback { .. } => LeadType::Callback,
      Self::Brief { .. } => LeadType::Brief,
    }
  }
}

// ─── LeadRecord ──────────────────────────────────────────────────────────────

/// A persisted lead. Once written, no field is ever updated; the pipeline
/// only ever appends new records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
  /// Store-assigned identifier; see [`crate::id::generate`].
  pub id:          String,
  /// Server-assigned receipt time; authoritative, never client-supplied.
  pub received_at: DateTime<Utc>,
  /// Originating page path, `"unknown"` if the client sent none.
  pub source_page: String,
  /// The full validated payload.
  pub data:        LeadData,
}
