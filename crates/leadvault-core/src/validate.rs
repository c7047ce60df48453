//! Discriminated-union validation for raw lead payloads.
//!
//! Dispatch is on the `type` field; each variant has its own validator that
//! collects *all* violated rules before returning, so callers see every
//! problem in one response. Validators never panic and never return both a
//! payload and errors.
//!
//! Unknown extra fields are ignored (forward-compatible payloads are
//! tolerated). Empty or whitespace-only strings count as missing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lead::LeadData;

// ─── FieldError ──────────────────────────────────────────────────────────────

/// A single violated validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  /// Dotted path of the offending field, using the wire (camelCase) name.
  /// Empty for cross-field rules not attributable to one field.
  pub field:   String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self { field: field.into(), message: message.into() }
  }
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Validate a raw payload into a typed [`LeadData`], or the full ordered
/// list of violated rules.
pub fn validate(raw: &Value) -> Result<LeadData, Vec<FieldError>> {
  let Some(obj) = raw.as_object() else {
    return Err(vec![FieldError::new(
      "type",
      "payload must be a JSON object",
    )]);
  };

  match obj.get("type").and_then(Value::as_str) {
    Some("quick") => validate_quick(obj),
    Some("callback") => validate_callback(obj),
    Some("brief") => validate_brief(obj),
    Some(other) => Err(vec![FieldError::new(
      "type",
      format!("unknown lead type: {other}"),
    )]),
    None => Err(vec![FieldError::new(
      "type",
      "type is required and must be one of quick, callback, brief",
    )]),
  }
}

// ─── Per-variant validators ──────────────────────────────────────────────────

fn validate_quick(obj: &Map<String, Value>) -> Result<LeadData, Vec<FieldError>> {
  let mut errors = Vec::new();

  let name = optional_string(obj, "name");
  let phone = optional_string(obj, "phone");
  let email = optional_string(obj, "email");

  // Cross-field rule: a quick lead with no way to reach back is useless.
  if phone.is_none() && email.is_none() {
    errors.push(FieldError::new(
      "",
      "at least one of phone or email is required",
    ));
  }

  if !errors.is_empty() {
    return Err(errors);
  }

  Ok(LeadData::Quick {
    name,
    phone,
    email,
    source:    optional_string(obj, "source"),
    timestamp: optional_string(obj, "timestamp"),
  })
}

fn validate_callback(
  obj: &Map<String, Value>,
) -> Result<LeadData, Vec<FieldError>> {
  let mut errors = Vec::new();

  let phone = required_string(obj, "phone", &mut errors);
  if let Some(p) = &phone
    && p.chars().count() < 10
  {
    errors.push(FieldError::new(
      "phone",
      "phone must be at least 10 characters",
    ));
  }

  if !errors.is_empty() {
    return Err(errors);
  }

  Ok(LeadData::Callback {
    name:      optional_string(obj, "name"),
    // required_string pushed an error if this is None, so unwrap is
    // unreachable here; the fallback keeps the code panic-free anyway.
    phone:     phone.unwrap_or_default(),
    source:    optional_string(obj, "source"),
    timestamp: optional_string(obj, "timestamp"),
  })
}

fn validate_brief(obj: &Map<String, Value>) -> Result<LeadData, Vec<FieldError>> {
  let mut errors = Vec::new();

  let site_type = required_string(obj, "siteType", &mut errors);
  let goal = required_string(obj, "goal", &mut errors);

  let name = required_string(obj, "name", &mut errors);
  if let Some(n) = &name
    && n.chars().count() < 2
  {
    errors.push(FieldError::new(
      "name",
      "name must be at least 2 characters",
    ));
  }

  let email = required_string(obj, "email", &mut errors);
  if let Some(e) = &email
    && !is_valid_email(e)
  {
    errors.push(FieldError::new(
      "email",
      "email must be a valid email address",
    ));
  }

  let phone = required_string(obj, "phone", &mut errors);
  if let Some(p) = &phone
    && p.chars().count() < 10
  {
    errors.push(FieldError::new(
      "phone",
      "phone must be at least 10 characters",
    ));
  }

  if !errors.is_empty() {
    return Err(errors);
  }

  Ok(LeadData::Brief {
    site_type:  site_type.unwrap_or_default(),
    goal:       goal.unwrap_or_default(),
    timeline:   optional_string(obj, "timeline"),
    budget:     optional_string(obj, "budget"),
    references: optional_string(obj, "references"),
    telegram:   optional_string(obj, "telegram"),
    comment:    optional_string(obj, "comment"),
    name:       name.unwrap_or_default(),
    email:      email.unwrap_or_default(),
    phone:      phone.unwrap_or_default(),
    source:     optional_string(obj, "source"),
    timestamp:  optional_string(obj, "timestamp"),
  })
}

// ─── Field helpers ───────────────────────────────────────────────────────────

/// A string field that may be absent. Empty and whitespace-only values are
/// treated as absent. Non-string values are treated as absent rather than
/// rejected (unknown shapes are tolerated like unknown fields).
fn optional_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
  obj
    .get(key)
    .and_then(Value::as_str)
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

/// A string field that must be present and non-empty. Pushes an error on
/// violation and returns `None`.
fn required_string(
  obj: &Map<String, Value>,
  key: &str,
  errors: &mut Vec<FieldError>,
) -> Option<String> {
  let value = optional_string(obj, key);
  if value.is_none() {
    errors.push(FieldError::new(key, format!("{key} is required")));
  }
  value
}

/// Minimal syntactic email check: one `@`, non-empty local part, a dot in
/// the domain with characters on both sides, no whitespace.
fn is_valid_email(s: &str) -> bool {
  if s.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = s.split_once('@') else {
    return false;
  };
  if local.is_empty() || domain.contains('@') {
    return false;
  }
  match domain.rsplit_once('.') {
    Some((head, tld)) => !head.is_empty() && !tld.is_empty(),
    None => false,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::lead::LeadType;

  fn fields(errors: &[FieldError]) -> Vec<&str> {
    errors.iter().map(|e| e.field.as_str()).collect()
  }

  // ── Dispatch ──────────────────────────────────────────────────────────

  #[test]
  fn missing_type_is_reported_on_type_field() {
    let errors = validate(&json!({ "phone": "5551234567" })).unwrap_err();
    assert_eq!(fields(&errors), ["type"]);
  }

  #[test]
  fn unknown_type_is_reported_on_type_field() {
    let errors = validate(&json!({ "type": "unknown" })).unwrap_err();
    assert_eq!(fields(&errors), ["type"]);
    assert!(errors[0].message.contains("unknown"));
  }

  #[test]
  fn non_object_payload_is_rejected() {
    let errors = validate(&json!("just a string")).unwrap_err();
    assert_eq!(fields(&errors), ["type"]);
  }

  #[test]
  fn unknown_extra_fields_are_ignored() {
    let data = validate(&json!({
      "type": "quick",
      "phone": "5551234567",
      "utm_campaign": "spring",
      "hcaptcha": { "token": "x" },
    }))
    .unwrap();
    assert_eq!(data.lead_type(), LeadType::Quick);
  }

  // ── Quick ─────────────────────────────────────────────────────────────

  #[test]
  fn quick_with_phone_only_is_valid() {
    let data =
      validate(&json!({ "type": "quick", "phone": "5551234567" })).unwrap();
    assert_eq!(data.lead_type(), LeadType::Quick);
  }

  #[test]
  fn quick_with_email_only_is_valid() {
    let data =
      validate(&json!({ "type": "quick", "email": "a@example.com" })).unwrap();
    assert_eq!(data.lead_type(), LeadType::Quick);
  }

  #[test]
  fn quick_without_contact_fails_with_one_cross_field_error() {
    let errors =
      validate(&json!({ "type": "quick", "name": "Alice" })).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "");
  }

  #[test]
  fn quick_empty_strings_count_as_missing() {
    let errors =
      validate(&json!({ "type": "quick", "phone": "", "email": "  " }))
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "");
  }

  // ── Callback ──────────────────────────────────────────────────────────

  #[test]
  fn callback_requires_phone() {
    let errors =
      validate(&json!({ "type": "callback", "name": "Bob" })).unwrap_err();
    assert_eq!(fields(&errors), ["phone"]);
  }

  #[test]
  fn callback_short_phone_is_rejected() {
    let errors =
      validate(&json!({ "type": "callback", "phone": "555" })).unwrap_err();
    assert_eq!(fields(&errors), ["phone"]);
  }

  #[test]
  fn callback_ten_char_phone_is_accepted() {
    let data =
      validate(&json!({ "type": "callback", "phone": "5551234567" })).unwrap();
    assert_eq!(data.lead_type(), LeadType::Callback);
  }

  #[test]
  fn callback_phone_format_is_not_checked_beyond_length() {
    // Ten raw characters, formatting included.
    let data =
      validate(&json!({ "type": "callback", "phone": "+1 555-123" })).unwrap();
    assert_eq!(data.lead_type(), LeadType::Callback);
  }

  // ── Brief ─────────────────────────────────────────────────────────────

  fn full_brief() -> serde_json::Value {
    json!({
      "type": "brief",
      "siteType": "landing",
      "goal": "leads",
      "name": "Alice",
      "email": "alice@example.com",
      "phone": "5551234567",
    })
  }

  #[test]
  fn complete_brief_is_valid() {
    let data = validate(&full_brief()).unwrap();
    assert_eq!(data.lead_type(), LeadType::Brief);
  }

  #[test]
  fn brief_missing_everything_yields_one_error_per_field() {
    let errors = validate(&json!({ "type": "brief" })).unwrap_err();
    assert_eq!(fields(&errors), ["siteType", "goal", "name", "email", "phone"]);
  }

  #[test]
  fn brief_invalid_email_is_the_only_error() {
    let mut raw = full_brief();
    raw["email"] = json!("bad-email");
    let errors = validate(&raw).unwrap_err();
    assert_eq!(fields(&errors), ["email"]);
  }

  #[test]
  fn brief_one_char_name_is_rejected() {
    let mut raw = full_brief();
    raw["name"] = json!("A");
    let errors = validate(&raw).unwrap_err();
    assert_eq!(fields(&errors), ["name"]);
  }

  #[test]
  fn brief_collects_multiple_errors_at_once() {
    let errors = validate(&json!({
      "type": "brief",
      "siteType": "shop",
      "goal": "sales",
      "name": "B",
      "email": "no-at-sign",
      "phone": "123",
    }))
    .unwrap_err();
    assert_eq!(fields(&errors), ["name", "email", "phone"]);
  }

  #[test]
  fn brief_optional_fields_are_carried_through() {
    let mut raw = full_brief();
    raw["budget"] = json!("$5k");
    raw["telegram"] = json!("@alice");
    let data = validate(&raw).unwrap();
    let LeadData::Brief { budget, telegram, timeline, .. } = data else {
      panic!("expected brief");
    };
    assert_eq!(budget.as_deref(), Some("$5k"));
    assert_eq!(telegram.as_deref(), Some("@alice"));
    assert_eq!(timeline, None);
  }

  // ── Email syntax ──────────────────────────────────────────────────────

  #[test]
  fn email_syntax_checks() {
    for good in ["a@b.co", "first.last@sub.example.com", "x+tag@example.io"] {
      assert!(is_valid_email(good), "{good} should be valid");
    }
    for bad in
      ["bad-email", "@example.com", "a@b", "a@@b.co", "a b@c.co", "a@.com"]
    {
      assert!(!is_valid_email(bad), "{bad} should be invalid");
    }
  }
}
