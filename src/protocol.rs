//! Public protocol structs for HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Assignment, MetricKey};
use crate::error::PuzzleError;

/// `POST /check` body: metric key -> object id or null.
#[derive(Debug, Deserialize, Serialize)]
pub struct CheckIn {
    pub assignment: BTreeMap<String, Option<String>>,
}

impl CheckIn {
    pub fn from_assignment(a: &Assignment) -> Self {
        let assignment = a
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.map(str::to_string)))
            .collect();
        Self { assignment }
    }

    /// Convert the wire map into an `Assignment`. Unknown keys and missing keys are rejected;
    /// null slots survive as unassigned and are rejected later by scoring.
    pub fn into_assignment(self) -> Result<Assignment, PuzzleError> {
        let mut out = Assignment::empty();
        let mut seen = [false; 5];
        for (raw_key, object_id) in self.assignment {
            let key = MetricKey::from_wire(&raw_key)
                .ok_or_else(|| PuzzleError::InvalidAssignment(format!("unknown metric key '{raw_key}'")))?;
            seen[key.index()] = true;
            out.set(key, object_id);
        }
        if let Some(missing) = MetricKey::ALL.into_iter().find(|k| !seen[k.index()]) {
            return Err(PuzzleError::InvalidAssignment(format!("missing metric key '{missing}'")));
        }
        Ok(out)
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> CheckIn {
        serde_json::from_str(json).expect("json")
    }

    #[test]
    fn full_body_converts() {
        let a = body(
            r#"{"assignment":{"oldest":"a","largest":"b","value":"c","influence":"d","specialValue":"e"}}"#,
        )
        .into_assignment()
        .expect("valid");
        assert_eq!(a.get(MetricKey::SpecialValue), Some("e"));
        assert!(a.is_filled());
    }

    #[test]
    fn missing_and_unknown_keys_are_rejected() {
        let err = body(r#"{"assignment":{"oldest":"a","largest":"b","value":"c","influence":"d"}}"#)
            .into_assignment()
            .expect_err("missing");
        assert!(err.to_string().contains("specialValue"));

        let err = body(
            r#"{"assignment":{"oldest":"a","largest":"b","value":"c","influence":"d","specialValue":"e","age":"f"}}"#,
        )
        .into_assignment()
        .expect_err("unknown");
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn null_slots_stay_unassigned() {
        let a = body(
            r#"{"assignment":{"oldest":null,"largest":"b","value":"c","influence":"d","specialValue":"e"}}"#,
        )
        .into_assignment()
        .expect("keys present");
        assert_eq!(a.get(MetricKey::Oldest), None);
        assert!(!a.is_filled());
    }

    #[test]
    fn assignment_survives_the_wire() {
        let mut a = Assignment::empty();
        a.set(MetricKey::Value, Some("x".into()));
        let json = serde_json::to_string(&CheckIn::from_assignment(&a)).expect("ser");
        assert!(json.contains(r#""specialValue":null"#));
        let back = body(&json).into_assignment().expect("valid");
        assert_eq!(back, a);
    }
}
