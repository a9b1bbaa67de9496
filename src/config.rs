//! Loading server configuration (server settings + optional puzzle bank) from TOML.
//!
//! See `AppConfig`, `ServerCfg` and `PuzzleCfg` for the expected schema.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{DailyPuzzle, PuzzleObject};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub server: ServerCfg,
  #[serde(default)]
  pub puzzles: Vec<PuzzleCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerCfg {
  /// Directory served for non-API paths (SPA with index.html fallback).
  #[serde(default = "default_static_dir")]
  pub static_dir: String,
  /// Insert the built-in sample puzzle when today has none.
  #[serde(default = "default_true")]
  pub seed_today: bool,
}

impl Default for ServerCfg {
  fn default() -> Self {
    Self { static_dir: default_static_dir(), seed_today: true }
  }
}

fn default_static_dir() -> String { "./static".into() }
fn default_true() -> bool { true }

/// Puzzle entry accepted in the TOML bank. Ids are generated when omitted.
#[derive(Clone, Debug, Deserialize)]
pub struct PuzzleCfg {
  #[serde(default)] pub id: Option<String>,
  pub date: NaiveDate,
  pub theme: String,
  #[serde(default)] pub special_label: String,
  #[serde(default)] pub special_hint: String,
  pub objects: Vec<ObjectCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ObjectCfg {
  #[serde(default)] pub id: Option<String>,
  pub name: String,
  pub oldest: f64,
  pub largest: f64,
  pub value: f64,
  pub influence: f64,
  pub special_value: f64,
}

impl PuzzleCfg {
  pub fn into_puzzle(self) -> DailyPuzzle {
    DailyPuzzle {
      id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
      date: self.date,
      theme: self.theme,
      special_label: self.special_label,
      special_hint: self.special_hint,
      objects: self
        .objects
        .into_iter()
        .map(|o| PuzzleObject {
          id: o.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
          name: o.name,
          oldest: o.oldest,
          largest: o.largest,
          value: o.value,
          influence: o.influence,
          special_value: o.special_value,
        })
        .collect(),
    }
  }
}

pub fn parse_config(s: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(s)
}

/// Attempt to load `AppConfig` from MOSTLE_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("MOSTLE_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "mostle_backend", %path, puzzles = cfg.puzzles.len(), "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "mostle_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "mostle_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
