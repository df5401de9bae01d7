//! Mock bag reader for testing and demos
//!
//! This module provides a scripted [`BagReader`] so a front-end can be
//! driven without real bag files on disk. Summaries are registered per
//! path, with an optional fallback used for any other path; opens can be
//! forced to fail to exercise error paths.
//!
//! # Example
//!
//! ```ignore
//! use bagpilot::bag::{BagSummary, MockBagReader};
//! use bagpilot::types::{BagStamp, TopicInfo};
//!
//! let summary = BagSummary::new(
//!     "/data/demo.bag",
//!     BagStamp::from_secs(0),
//!     BagStamp::from_secs(60),
//!     vec![TopicInfo::new("/odom", "nav_msgs/Odometry")],
//! );
//! let mut reader = MockBagReader::new().with_bag("/data/demo.bag", summary);
//! let opened = reader.open(std::path::Path::new("/data/demo.bag"))?;
//! assert_eq!(opened.topic_count(), 1);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{BagPilotError, Result};

use super::{BagReader, BagSummary};

/// Scripted bag reader
#[derive(Debug, Default)]
pub struct MockBagReader {
    /// Summaries keyed by exact path
    bags: HashMap<PathBuf, BagSummary>,
    /// Summary returned for any unregistered path
    fallback: Option<BagSummary>,
    /// When set, every open fails with this message
    failure: Option<String>,
    /// Number of open calls made
    open_count: usize,
}

impl MockBagReader {
    /// Create an empty mock reader; opens fail until bags are registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a summary for a specific path
    pub fn with_bag(mut self, path: impl Into<PathBuf>, summary: BagSummary) -> Self {
        self.bags.insert(path.into(), summary);
        self
    }

    /// Use `summary` for any path without a registered entry
    pub fn with_fallback(mut self, summary: BagSummary) -> Self {
        self.fallback = Some(summary);
        self
    }

    /// Make every open fail with `message`
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of open calls made so far
    pub fn open_count(&self) -> usize {
        self.open_count
    }
}

impl BagReader for MockBagReader {
    fn open(&mut self, path: &Path) -> Result<BagSummary> {
        self.open_count += 1;

        if let Some(ref message) = self.failure {
            return Err(BagPilotError::BagOpen {
                path: path.to_path_buf(),
                message: message.clone(),
            });
        }

        let summary = self
            .bags
            .get(path)
            .or(self.fallback.as_ref())
            .ok_or_else(|| BagPilotError::BagOpen {
                path: path.to_path_buf(),
                message: "no such bag registered".to_string(),
            })?;

        // Report the summary under the requested path, as a real indexer would
        let mut summary = summary.clone();
        summary.path = path.to_path_buf();
        Ok(summary)
    }
}
