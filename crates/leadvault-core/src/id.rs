//! Lead identifier generation.
//!
//! Identifiers are opaque to callers apart from the stable `lead_` prefix.
//! The embedded base-36 millisecond timestamp makes them monotonically
//! informative; the random suffix makes collisions across concurrent calls
//! operationally negligible. They are not security credentials.

use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};

const PREFIX: &str = "lead_";
const SUFFIX_LEN: usize = 8;

/// Generate a fresh lead identifier, e.g. `lead_mfs0t2kq_x7GpQ2aB`.
pub fn generate() -> String {
  let millis = Utc::now().timestamp_millis().max(0) as u64;
  let suffix: String = rand::rng()
    .sample_iter(Alphanumeric)
    .take(SUFFIX_LEN)
    .map(char::from)
    .collect();
  format!("{PREFIX}{}_{suffix}", base36(millis))
}

fn base36(mut n: u64) -> String {
  const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
  if n == 0 {
    return "0".to_owned();
  }
  // 13 base-36 digits cover the full u64 range.
  let mut buf = [0u8; 13];
  let mut i = buf.len();
  while n > 0 {
    i -= 1;
    buf[i] = DIGITS[(n % 36) as usize];
    n /= 36;
  }
  String::from_utf8_lossy(&buf[i..]).into_owned()
}
