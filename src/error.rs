//! Error types
//!
//! Neither error ever crosses a tick boundary: persistence failures are
//! logged by the leaderboard store and tuning errors are raised before a
//! game is constructed.

use thiserror::Error;

/// Failure reading or writing saved high scores
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("saved scores are malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Rejected tuning data
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}
