//! Error types for the fallible edges of the engine
//!
//! The simulation itself is total; only data loading and host navigation
//! can fail.

use thiserror::Error;

/// Errors raised while decoding level data.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("force direction must be 1 or -1, got {0}")]
    InvalidDirection(i64),
    #[error("level pack is empty")]
    Empty,
}

/// Errors returned by a [`crate::platform::Navigator`].
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigation to {route} rejected: {reason}")]
    Rejected { route: String, reason: String },
}

/// Errors raised while decoding tuning overrides.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not read tuning file: {0}")]
    Io(#[from] std::io::Error),
}
