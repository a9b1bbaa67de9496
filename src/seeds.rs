//! Built-in sample puzzle so the app is playable without a puzzle bank.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{DailyPuzzle, PuzzleObject};

fn object(id: &str, name: &str, attrs: [f64; 5]) -> PuzzleObject {
  let [oldest, largest, value, influence, special_value] = attrs;
  PuzzleObject { id: id.into(), name: name.into(), oldest, largest, value, influence, special_value }
}

/// "Tech Giants" puzzle for `date`; the special metric is head count.
/// `oldest` holds founding years, so the most recently founded company wins it.
pub fn tech_giants(date: NaiveDate) -> DailyPuzzle {
  DailyPuzzle {
    id: Uuid::new_v4().to_string(),
    date,
    theme: "Tech Giants".into(),
    special_label: "Employees".into(),
    special_hint: "Company with the most employees".into(),
    objects: vec![
      object("apple", "Apple", [1976.0, 220.0, 3000.0, 95.0, 164_000.0]),
      object("microsoft", "Microsoft", [1975.0, 230.0, 2800.0, 92.0, 221_000.0]),
      object("google", "Google", [1998.0, 180.0, 1900.0, 98.0, 190_000.0]),
      object("amazon", "Amazon", [1994.0, 200.0, 1600.0, 90.0, 1_500_000.0]),
      object("meta", "Meta", [2004.0, 120.0, 900.0, 88.0, 67_000.0]),
    ],
  }
}
