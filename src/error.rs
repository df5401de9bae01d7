//! Error handling for BagPilot
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::BagStamp;

/// Which topic selection an operation was refused over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionList {
    /// The play/filter topic selection
    Play,
    /// The record topic selection
    Record,
}

impl std::fmt::Display for SelectionList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionList::Play => write!(f, "play"),
            SelectionList::Record => write!(f, "record"),
        }
    }
}

/// Main error type for BagPilot operations
#[derive(Error, Debug)]
pub enum BagPilotError {
    /// The bag file could not be opened or indexed
    #[error("Failed to open bag {path:?}: {message}")]
    BagOpen { path: PathBuf, message: String },

    /// The bag's time bounds are inverted (begin after end)
    #[error("Invalid bag time range: begin {begin} is after end {end}")]
    InvalidTimeRange { begin: BagStamp, end: BagStamp },

    /// An action was requested with zero topics selected
    #[error("No {list} topics selected")]
    EmptySelection { list: SelectionList },

    /// A playback action was requested before any bag was opened
    #[error("No bag loaded")]
    NoBagLoaded,

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// Errors from the topic discovery feed
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<BagPilotError>,
    },
}

impl BagPilotError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        BagPilotError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for BagPilot operations
pub type Result<T> = std::result::Result<T, BagPilotError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BagPilotError::EmptySelection {
            list: SelectionList::Record,
        };
        assert_eq!(err.to_string(), "No record topics selected");
    }

    #[test]
    fn test_error_with_context() {
        let err = BagPilotError::NoBagLoaded;
        let with_ctx = err.with_context("Failed to start playback");
        assert!(with_ctx.to_string().contains("Failed to start playback"));
    }

    #[test]
    fn test_invalid_time_range_display() {
        let err = BagPilotError::InvalidTimeRange {
            begin: BagStamp::from_nanos(200),
            end: BagStamp::from_nanos(100),
        };
        assert!(err.to_string().contains("begin"));
        assert!(err.to_string().contains("after end"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(BagPilotError::Config("missing file".to_string()));
        let err = result.context("Loading app state").unwrap_err();
        assert!(err.to_string().contains("Loading app state"));
        assert!(err.to_string().contains("missing file"));
    }
}
