//! Candidate profiles — the thin envelope the engine swipes over.
//!
//! A candidate is session-scoped and read-only from the engine's point of
//! view. Profile editing, media upload, and onboarding live elsewhere.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A profile eligible for swiping by some actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
  pub user_id:      Uuid,
  pub display_name: String,
  /// Age is always derived from this, never stored.
  pub birth_date:   NaiveDate,
  /// Reference into external object storage; the engine never dereferences it.
  pub photo_url:    Option<String>,
}

impl Candidate {
  /// Whole years between `birth_date` and `today`.
  pub fn age_on(&self, today: NaiveDate) -> u32 {
    today.years_since(self.birth_date).unwrap_or(0)
  }

  /// Whole years between `birth_date` and the current UTC date.
  pub fn age(&self) -> u32 { self.age_on(Utc::now().date_naive()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn age_counts_whole_years_only() {
    let c = Candidate {
      user_id:      Uuid::new_v4(),
      display_name: "Jo".into(),
      birth_date:   date(1995, 6, 15),
      photo_url:    None,
    };
    assert_eq!(c.age_on(date(2025, 6, 14)), 29);
    assert_eq!(c.age_on(date(2025, 6, 15)), 30);
  }

  #[test]
  fn age_before_birth_is_zero() {
    let c = Candidate {
      user_id:      Uuid::new_v4(),
      display_name: "Jo".into(),
      birth_date:   date(1995, 6, 15),
      photo_url:    None,
    };
    assert_eq!(c.age_on(date(1990, 1, 1)), 0);
  }
}
