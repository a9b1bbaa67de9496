//! Mostle: a daily ranking puzzle.
//!
//! Five objects, five metrics. The server hands out one puzzle per calendar
//! date and scores assignments; [`board::AssignmentBoard`] is the client-side
//! session state machine that drives drag-and-drop and submission.

pub mod board;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod routes;
pub mod scoring;
pub mod seeds;
pub mod state;
pub mod store;
pub mod telemetry;
