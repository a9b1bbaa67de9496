//! Application state: the puzzle store, the clock deciding what "today" is,
//! and the daily-puzzle lookup.
//!
//! Startup loads the TOML bank (if any) into the store, then seeds today's
//! sample puzzle when enabled and nothing is stored for today.

use chrono::{Local, NaiveDate};
use tracing::{error, info, instrument, warn};

use crate::config::{load_config_from_env, AppConfig};
use crate::domain::DailyPuzzle;
use crate::error::{AppError, AppResult};
use crate::seeds::tech_giants;
use crate::store::PuzzleStore;

/// Source of the current calendar date.
#[derive(Clone, Copy, Debug)]
pub enum Clock {
    /// Local midnight at request time.
    Local,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::Local => Local::now().date_naive(),
            Clock::Fixed(d) => *d,
        }
    }
}

pub struct AppState {
    pub store: PuzzleStore,
    pub clock: Clock,
    pub static_dir: String,
}

impl AppState {
    /// Build state from env: load config, fill the store, seed today if needed.
    #[instrument(level = "info", skip_all)]
    pub async fn from_env() -> Self {
        let cfg = load_config_from_env().unwrap_or_default();
        Self::from_config(cfg, Clock::Local).await
    }

    #[instrument(level = "info", skip_all)]
    pub async fn from_config(cfg: AppConfig, clock: Clock) -> Self {
        let state = Self {
            store: PuzzleStore::new(),
            clock,
            static_dir: cfg.server.static_dir.clone(),
        };

        for pc in cfg.puzzles {
            let date = pc.date;
            if let Err(e) = state.store.insert(pc.into_puzzle()).await {
                error!(target: "puzzle", %date, error = %e, "Skipping bank puzzle");
            }
        }

        if cfg.server.seed_today {
            state.seed_today().await;
        }

        let dates = state.store.dates().await;
        info!(target: "puzzle", count = dates.len(), first = ?dates.first(), last = ?dates.last(), "Startup puzzle inventory");
        state
    }

    /// Insert the sample puzzle for today unless one already exists.
    #[instrument(level = "info", skip(self))]
    pub async fn seed_today(&self) {
        let today = self.clock.today();
        if self.store.contains_date(today).await {
            info!(target: "puzzle", %today, "Seed skipped: today's puzzle already exists");
            return;
        }
        match self.store.insert(tech_giants(today)).await {
            Ok(()) => info!(target: "puzzle", %today, "Seeded: daily puzzle created"),
            Err(e) => warn!(target: "puzzle", %today, error = %e, "Seeding failed"),
        }
    }

    /// The puzzle for today, or NotFound. No fallback to other dates.
    #[instrument(level = "info", skip(self))]
    pub async fn today_puzzle(&self) -> AppResult<DailyPuzzle> {
        let today = self.clock.today();
        self.store.fetch_by_date(today).await.ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).expect("date")
    }

    #[tokio::test]
    async fn seeds_today_when_empty() {
        let state = AppState::from_config(AppConfig::default(), Clock::Fixed(day(16))).await;
        let p = state.today_puzzle().await.expect("seeded");
        assert_eq!(p.theme, "Tech Giants");
        assert_eq!(p.date, day(16));
    }

    #[tokio::test]
    async fn missing_today_is_not_found() {
        let mut cfg = AppConfig::default();
        cfg.server.seed_today = false;
        let state = AppState::from_config(cfg, Clock::Fixed(day(16))).await;
        assert!(matches!(state.today_puzzle().await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn bank_puzzle_wins_over_seed() {
        let mut toml = String::from("[[puzzles]]\ndate = \"2026-10-16\"\ntheme = \"Planets\"\n");
        for (i, name) in ["Mercury", "Venus", "Earth", "Mars", "Jupiter"].iter().enumerate() {
            toml.push_str(&format!(
                "[[puzzles.objects]]\nname = \"{name}\"\noldest = {i}\nlargest = {i}\nvalue = {i}\ninfluence = {i}\nspecial_value = {i}\n"
            ));
        }
        let cfg = parse_config(&toml).expect("parse");
        let state = AppState::from_config(cfg, Clock::Fixed(day(16))).await;
        let p = state.today_puzzle().await.expect("today");
        assert_eq!(p.theme, "Planets");
        assert_eq!(state.store.dates().await, vec![day(16)]);
    }
}
