//! HTTP client for the puzzle API, used by the board session.
//!
//! `PuzzleApi` is the seam the board drives; `HttpPuzzleApi` talks to a
//! running server with reqwest. Server error bodies are surfaced verbatim.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::{Assignment, DailyPuzzle, ScoreResult};
use crate::protocol::CheckIn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
  /// No puzzle for today (HTTP 404).
  #[error("{0}")]
  NotFound(String),
  /// Any other non-2xx answer; `body` is the server's message.
  #[error("{body}")]
  Status { status: u16, body: String },
  /// Connection, timeout or decoding failure.
  #[error("{0}")]
  Transport(String),
}

impl From<reqwest::Error> for ClientError {
  fn from(e: reqwest::Error) -> Self {
    ClientError::Transport(e.to_string())
  }
}

/// Requests the board issues. Implemented over HTTP and by test doubles.
pub trait PuzzleApi: Send + Sync {
  fn fetch_daily(&self) -> impl Future<Output = Result<DailyPuzzle, ClientError>> + Send;
  fn check(&self, assignment: &Assignment) -> impl Future<Output = Result<ScoreResult, ClientError>> + Send;
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Prefer the `{ "error": ... }` message; fall back to the raw body.
fn error_message(body: String) -> String {
  serde_json::from_str::<ErrorBody>(&body).map(|b| b.error).unwrap_or(body)
}

#[derive(Clone)]
pub struct HttpPuzzleApi {
  pub client: reqwest::Client,
  pub base_url: String,
}

impl HttpPuzzleApi {
  /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
  pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()?;
    Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_string() })
  }

  async fn read_error(res: reqwest::Response) -> ClientError {
    let status = res.status();
    let body = error_message(res.text().await.unwrap_or_default());
    if status == StatusCode::NOT_FOUND {
      ClientError::NotFound(body)
    } else {
      ClientError::Status { status: status.as_u16(), body }
    }
  }
}

impl PuzzleApi for HttpPuzzleApi {
  #[instrument(level = "info", skip(self), fields(base_url = %self.base_url))]
  async fn fetch_daily(&self) -> Result<DailyPuzzle, ClientError> {
    let res = self.client
      .get(format!("{}/daily", self.base_url))
      .header(USER_AGENT, "mostle-board/0.1")
      .send().await?;
    if !res.status().is_success() {
      return Err(Self::read_error(res).await);
    }
    let puzzle: DailyPuzzle = res.json().await?;
    info!(target: "mostle_backend", id = %puzzle.id, date = %puzzle.date, "Daily puzzle fetched");
    Ok(puzzle)
  }

  #[instrument(level = "info", skip(self, assignment), fields(base_url = %self.base_url))]
  async fn check(&self, assignment: &Assignment) -> Result<ScoreResult, ClientError> {
    let res = self.client
      .post(format!("{}/check", self.base_url))
      .header(USER_AGENT, "mostle-board/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&CheckIn::from_assignment(assignment))
      .send().await?;
    if !res.status().is_success() {
      return Err(Self::read_error(res).await);
    }
    let result: ScoreResult = res.json().await?;
    info!(target: "mostle_backend", all_correct = result.all_correct, "Assignment checked");
    Ok(result)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn error_bodies_are_unwrapped() {
    assert_eq!(error_message(r#"{"error":"No daily puzzle for today"}"#.into()), "No daily puzzle for today");
    assert_eq!(error_message("gateway timeout".into()), "gateway timeout");
  }

  #[test]
  fn display_is_the_message_itself() {
    let e = ClientError::Status { status: 400, body: "Invalid assignment: missing object for 'value'".into() };
    assert_eq!(e.to_string(), "Invalid assignment: missing object for 'value'");
  }
}
