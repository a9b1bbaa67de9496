//! Domain models: metric keys and labels, puzzle objects, the daily puzzle,
//! the player's assignment and the scoring result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the five comparison axes a puzzle is ranked on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
  Oldest,
  Largest,
  Value,
  Influence,
  /// Theme-specific metric; label and hint come from the puzzle.
  SpecialValue,
}

impl MetricKey {
  /// All keys in display order.
  pub const ALL: [MetricKey; 5] = [
    MetricKey::Oldest,
    MetricKey::Largest,
    MetricKey::Value,
    MetricKey::Influence,
    MetricKey::SpecialValue,
  ];

  pub fn index(self) -> usize {
    match self {
      MetricKey::Oldest => 0,
      MetricKey::Largest => 1,
      MetricKey::Value => 2,
      MetricKey::Influence => 3,
      MetricKey::SpecialValue => 4,
    }
  }

  /// Wire name, as used in JSON bodies.
  pub fn as_str(self) -> &'static str {
    match self {
      MetricKey::Oldest => "oldest",
      MetricKey::Largest => "largest",
      MetricKey::Value => "value",
      MetricKey::Influence => "influence",
      MetricKey::SpecialValue => "specialValue",
    }
  }

  pub fn from_wire(s: &str) -> Option<MetricKey> {
    MetricKey::ALL.into_iter().find(|k| k.as_str() == s)
  }
}

impl std::fmt::Display for MetricKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A metric as shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Metric {
  pub key: MetricKey,
  pub label: String,
  pub hint: String,
}

const BASE_METRICS: [(MetricKey, &str, &str); 4] = [
  (MetricKey::Oldest, "Oldest", "Earliest year / origin"),
  (MetricKey::Largest, "Largest", "Biggest scale"),
  (MetricKey::Value, "Most valuable", "Highest worth"),
  (MetricKey::Influence, "Most influential", "Widest impact"),
];

/// The five metrics of a puzzle, built-ins first, then the special one.
/// Empty special label/hint fall back to generic text.
pub fn metrics_for_puzzle(puzzle: &DailyPuzzle) -> Vec<Metric> {
  let mut out: Vec<Metric> = BASE_METRICS
    .iter()
    .map(|(key, label, hint)| Metric { key: *key, label: (*label).into(), hint: (*hint).into() })
    .collect();

  let label = if puzzle.special_label.trim().is_empty() { "Special".to_string() } else { puzzle.special_label.clone() };
  let hint = if puzzle.special_hint.trim().is_empty() { "Daily special metric".to_string() } else { puzzle.special_hint.clone() };
  out.push(Metric { key: MetricKey::SpecialValue, label, hint });
  out
}

/// One of the five objects of a day. Attribute fields are named after the metric keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleObject {
  pub id: String,
  pub name: String,
  pub oldest: f64,
  pub largest: f64,
  pub value: f64,
  pub influence: f64,
  pub special_value: f64,
}

impl PuzzleObject {
  pub fn attribute(&self, key: MetricKey) -> f64 {
    match key {
      MetricKey::Oldest => self.oldest,
      MetricKey::Largest => self.largest,
      MetricKey::Value => self.value,
      MetricKey::Influence => self.influence,
      MetricKey::SpecialValue => self.special_value,
    }
  }
}

/// One puzzle per calendar date. Read-only once stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPuzzle {
  pub id: String,
  pub date: NaiveDate,
  pub theme: String,
  pub special_label: String,
  pub special_hint: String,
  pub objects: Vec<PuzzleObject>,
}

impl DailyPuzzle {
  pub fn object(&self, id: &str) -> Option<&PuzzleObject> {
    self.objects.iter().find(|o| o.id == id)
  }

  pub fn contains_object(&self, id: &str) -> bool {
    self.object(id).is_some()
  }
}

/// Metric -> object id table. An object id occupies at most one slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
  slots: [Option<String>; 5],
}

impl Assignment {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn get(&self, key: MetricKey) -> Option<&str> {
    self.slots[key.index()].as_deref()
  }

  /// Raw slot write. Callers that need the uniqueness invariant go through
  /// [`Assignment::apply_drop`].
  pub(crate) fn set(&mut self, key: MetricKey, object_id: Option<String>) {
    self.slots[key.index()] = object_id;
  }

  pub fn clear(&mut self) {
    self.slots = Default::default();
  }

  pub fn slot_of(&self, object_id: &str) -> Option<MetricKey> {
    MetricKey::ALL
      .into_iter()
      .find(|k| self.slots[k.index()].as_deref() == Some(object_id))
  }

  pub fn is_assigned(&self, object_id: &str) -> bool {
    self.slot_of(object_id).is_some()
  }

  pub fn is_filled(&self) -> bool {
    self.slots.iter().all(Option::is_some)
  }

  pub fn is_empty(&self) -> bool {
    self.slots.iter().all(Option::is_none)
  }

  pub fn iter(&self) -> impl Iterator<Item = (MetricKey, Option<&str>)> + '_ {
    MetricKey::ALL.into_iter().map(move |k| (k, self.get(k)))
  }

  /// Apply a drop of `object_id` onto `target`. Returns whether anything changed.
  ///
  /// Pool: clears the object's slot, if any. Slot: the object moves into the
  /// slot; an occupant is swapped into the object's previous slot, or returns
  /// to the pool when the object came from the pool.
  pub fn apply_drop(&mut self, object_id: &str, target: DropTarget) -> bool {
    let from_slot = self.slot_of(object_id);
    match target {
      DropTarget::Pool => match from_slot {
        Some(from) => {
          self.set(from, None);
          true
        }
        None => false,
      },
      DropTarget::Slot(slot) => {
        if from_slot == Some(slot) {
          return false;
        }
        if let Some(from) = from_slot {
          self.set(from, None);
        }
        let displaced = self.slots[slot.index()].replace(object_id.to_string());
        if let (Some(displaced), Some(from)) = (displaced, from_slot) {
          self.set(from, Some(displaced));
        }
        true
      }
    }
  }
}

/// Where a dragged object was released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
  Pool,
  Slot(MetricKey),
}

/// Correctness of a single metric slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricVerdict {
  pub key: MetricKey,
  pub is_correct: bool,
}

/// Outcome of scoring a filled assignment. Covers all five keys in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
  pub all_correct: bool,
  pub result: Vec<MetricVerdict>,
}

impl ScoreResult {
  pub fn is_correct(&self, key: MetricKey) -> Option<bool> {
    self.result.iter().find(|v| v.key == key).map(|v| v.is_correct)
  }
}
