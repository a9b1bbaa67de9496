//! Date-keyed puzzle storage. One puzzle per calendar date, read-only after insert.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::domain::DailyPuzzle;
use crate::error::PuzzleError;

/// Number of objects every puzzle carries.
pub const OBJECTS_PER_PUZZLE: usize = 5;

/// Structural checks applied before a puzzle is stored.
pub fn validate_puzzle(p: &DailyPuzzle) -> Result<(), PuzzleError> {
    if p.objects.len() != OBJECTS_PER_PUZZLE {
        return Err(PuzzleError::InvalidPuzzle(format!(
            "puzzle for {} has {} objects, expected {OBJECTS_PER_PUZZLE}",
            p.date,
            p.objects.len()
        )));
    }

    let mut seen = HashSet::new();
    for o in &p.objects {
        if o.id.trim().is_empty() {
            return Err(PuzzleError::InvalidPuzzle(format!("object '{}' has an empty id", o.name)));
        }
        if !seen.insert(o.id.as_str()) {
            return Err(PuzzleError::InvalidPuzzle(format!("duplicate object id '{}'", o.id)));
        }
        let attrs = [o.oldest, o.largest, o.value, o.influence, o.special_value];
        if attrs.iter().any(|v| !v.is_finite()) {
            return Err(PuzzleError::InvalidPuzzle(format!("object '{}' has a non-finite attribute", o.id)));
        }
    }
    Ok(())
}

#[derive(Default)]
pub struct PuzzleStore {
    by_date: RwLock<HashMap<NaiveDate, DailyPuzzle>>,
}

impl PuzzleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a puzzle. Rejects malformed puzzles and a second puzzle for the same date.
    #[instrument(level = "debug", skip(self, puzzle), fields(date = %puzzle.date, id = %puzzle.id))]
    pub async fn insert(&self, puzzle: DailyPuzzle) -> Result<(), PuzzleError> {
        validate_puzzle(&puzzle)?;
        let mut by_date = self.by_date.write().await;
        if by_date.contains_key(&puzzle.date) {
            return Err(PuzzleError::DuplicateDate(puzzle.date));
        }
        info!(target: "puzzle", date = %puzzle.date, id = %puzzle.id, theme = %puzzle.theme, "Puzzle stored");
        by_date.insert(puzzle.date, puzzle);
        Ok(())
    }

    #[instrument(level = "debug", skip(self), fields(%date))]
    pub async fn fetch_by_date(&self, date: NaiveDate) -> Option<DailyPuzzle> {
        self.by_date.read().await.get(&date).cloned()
    }

    pub async fn contains_date(&self, date: NaiveDate) -> bool {
        self.by_date.read().await.contains_key(&date)
    }

    /// Stored dates, ascending.
    pub async fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.by_date.read().await.keys().copied().collect();
        dates.sort();
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::tech_giants;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).expect("date")
    }

    #[tokio::test]
    async fn one_puzzle_per_date() {
        let store = PuzzleStore::new();
        store.insert(tech_giants(day(16))).await.expect("first insert");
        let err = store.insert(tech_giants(day(16))).await.expect_err("duplicate");
        assert_eq!(err, PuzzleError::DuplicateDate(day(16)));

        store.insert(tech_giants(day(17))).await.expect("other day");
        assert_eq!(store.dates().await, vec![day(16), day(17)]);
    }

    #[tokio::test]
    async fn fetch_returns_only_exact_date() {
        let store = PuzzleStore::new();
        store.insert(tech_giants(day(16))).await.expect("insert");
        assert!(store.fetch_by_date(day(16)).await.is_some());
        assert!(store.fetch_by_date(day(15)).await.is_none());
    }

    #[test]
    fn malformed_puzzles_are_rejected() {
        let mut p = tech_giants(day(16));
        p.objects.pop();
        assert!(matches!(validate_puzzle(&p), Err(PuzzleError::InvalidPuzzle(_))));

        let mut p = tech_giants(day(16));
        p.objects[1].id = p.objects[0].id.clone();
        assert!(validate_puzzle(&p).is_err());

        let mut p = tech_giants(day(16));
        p.objects[2].value = f64::NAN;
        assert!(validate_puzzle(&p).is_err());

        assert!(validate_puzzle(&tech_giants(day(16))).is_ok());
    }
}
