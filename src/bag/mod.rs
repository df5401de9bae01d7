//! Bag access seam
//!
//! This module provides the trait boundary between the session and
//! whatever library actually parses and indexes bag files. The session
//! never reads message data; all it needs from a bag is the time bounds
//! and the topic list, captured in a [`BagSummary`].
//!
//! # Components
//!
//! - [`BagReader`] - Trait implemented by real bag indexers and by mocks
//! - [`BagSummary`] - Time bounds and topic list of an opened bag
//! - [`MockBagReader`] - Scripted reader for running a front-end without
//!   real bag files (feature-gated)
//!
//! # Enabling the mock
//!
//! The mock reader is only available when the `mock-bag` feature is
//! enabled:
//!
//! ```bash
//! cargo run --features mock-bag
//! ```

#[cfg(feature = "mock-bag")]
pub mod mock;

#[cfg(feature = "mock-bag")]
pub use mock::MockBagReader;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::types::{BagStamp, TopicInfo};

/// Time bounds and topic list of an opened bag
///
/// Created by a successful [`BagReader::open`] and replaced wholesale by
/// the next open; the topic list is never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagSummary {
    /// Path the bag was opened from
    pub path: PathBuf,
    /// Timestamp of the earliest message
    pub begin: BagStamp,
    /// Timestamp of the latest message
    pub end: BagStamp,
    /// Topics present in the bag, in index order
    pub topics: Vec<TopicInfo>,
}

impl BagSummary {
    /// Create a summary from its parts
    pub fn new(
        path: impl Into<PathBuf>,
        begin: BagStamp,
        end: BagStamp,
        topics: Vec<TopicInfo>,
    ) -> Self {
        Self {
            path: path.into(),
            begin,
            end,
            topics,
        }
    }

    /// Total recorded span of the bag
    ///
    /// Zero when the bounds are inverted; [`crate::session::SessionState`]
    /// rejects such summaries before they are ever used.
    pub fn duration(&self) -> Duration {
        self.end.saturating_elapsed_since(self.begin)
    }

    /// Whether the time bounds are ordered (`begin <= end`)
    pub fn has_valid_bounds(&self) -> bool {
        self.begin <= self.end
    }

    /// Number of topics in the bag
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}

/// Unified interface to a bag indexer
///
/// Implementations wrap whatever library reads the container format; the
/// session only calls `open` and consumes the returned summary. `Send` so
/// a reader can be handed to a controller living on a worker thread.
pub trait BagReader: Send {
    /// Open and index the bag at `path`
    ///
    /// Returns [`crate::error::BagPilotError::BagOpen`] when the file is
    /// missing, unreadable, or not a bag.
    fn open(&mut self, path: &Path) -> Result<BagSummary>;
}
