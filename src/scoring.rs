//! Scoring: find the per-metric winner among the day's objects and compare
//! it against the submitted assignment.

use tracing::{debug, instrument};

use crate::domain::{Assignment, DailyPuzzle, MetricKey, MetricVerdict, PuzzleObject, ScoreResult};
use crate::error::PuzzleError;

/// Object holding the largest value for `key`. Ties go to the earliest object
/// in puzzle order. `None` only for an empty object list.
pub fn winner(objects: &[PuzzleObject], key: MetricKey) -> Option<&PuzzleObject> {
  let mut best: Option<&PuzzleObject> = None;
  for o in objects {
    match best {
      Some(b) if o.attribute(key) <= b.attribute(key) => {}
      _ => best = Some(o),
    }
  }
  best
}

/// Check that every key is filled with an object of this puzzle.
pub fn validate_assignment(puzzle: &DailyPuzzle, assignment: &Assignment) -> Result<(), PuzzleError> {
  for (key, slot) in assignment.iter() {
    let id = slot.ok_or_else(|| PuzzleError::InvalidAssignment(format!("missing object for '{key}'")))?;
    if !puzzle.contains_object(id) {
      return Err(PuzzleError::InvalidAssignment(format!("unknown object id '{id}' for '{key}'")));
    }
  }
  Ok(())
}

/// Score a filled assignment. Fails without partial output if any key is
/// unassigned or references a foreign object.
#[instrument(level = "info", skip_all, fields(puzzle_id = %puzzle.id))]
pub fn score(puzzle: &DailyPuzzle, assignment: &Assignment) -> Result<ScoreResult, PuzzleError> {
  validate_assignment(puzzle, assignment)?;

  let result: Vec<MetricVerdict> = MetricKey::ALL
    .into_iter()
    .map(|key| {
      let expected = winner(&puzzle.objects, key).map(|o| o.id.as_str());
      let is_correct = expected.is_some() && assignment.get(key) == expected;
      debug!(target: "puzzle", %key, is_correct, "Slot scored");
      MetricVerdict { key, is_correct }
    })
    .collect();

  let all_correct = result.iter().all(|v| v.is_correct);
  Ok(ScoreResult { all_correct, result })
}
