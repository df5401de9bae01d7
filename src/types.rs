//! Core data types for BagPilot
//!
//! This module contains the fundamental data structures shared across the
//! crate: bag timestamps, topic descriptors, and the generated process-name
//! tokens used to target external processes for termination.
//!
//! # Main Types
//!
//! - [`BagStamp`] - An absolute timestamp inside a bag (nanosecond resolution)
//! - [`TopicInfo`] - A named, typed message channel in a bag or live system
//! - [`ProcessToken`] - Unique name assigned to a spawned external process
//!
//! # Time Handling
//!
//! Bags carry absolute timestamps; the session works in *elapsed* time
//! (a [`Duration`] since the bag's begin stamp). [`BagStamp`] provides the
//! conversion and keeps the two representations from mixing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An absolute timestamp inside a bag, in nanoseconds
///
/// Stamps are opaque points on the bag's own clock; only differences
/// between them are meaningful to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct BagStamp(u64);

impl BagStamp {
    /// Create a stamp from raw nanoseconds
    pub fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Create a stamp from whole seconds
    pub fn from_secs(secs: u64) -> Self {
        Self(secs * 1_000_000_000)
    }

    /// Raw nanosecond value
    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Stamp as fractional seconds
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1e9
    }

    /// Elapsed time since `begin`, zero if this stamp precedes it
    ///
    /// Clock ticks can arrive that predate the loaded bag (a stale
    /// publisher, a bag swap mid-tick); those clamp to zero rather than
    /// wrapping.
    pub fn saturating_elapsed_since(&self, begin: BagStamp) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(begin.0))
    }

    /// Offset a stamp forward by a duration
    pub fn advanced_by(&self, elapsed: Duration) -> BagStamp {
        BagStamp(self.0.saturating_add(elapsed.as_nanos() as u64))
    }
}

impl std::fmt::Display for BagStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:09}", self.0 / 1_000_000_000, self.0 % 1_000_000_000)
    }
}

/// A named, typed message channel
///
/// Topic names are the identity used everywhere in the session: selections
/// key on them, filter predicates quote them, and spawn argument lists
/// carry them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicInfo {
    /// Topic name (e.g., "/camera/image_raw")
    pub name: String,
    /// Message datatype (e.g., "sensor_msgs/Image")
    pub datatype: String,
}

impl TopicInfo {
    /// Create a new topic descriptor
    pub fn new(name: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
        }
    }
}

impl std::fmt::Display for TopicInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.datatype)
    }
}

/// Unique name assigned to a spawned external process
///
/// The token is passed to the process as its `__name:=` argument at spawn
/// time and is the only handle the session keeps: stopping means asking the
/// runtime to kill the node registered under this name. Uniqueness comes
/// from the wall clock at nanosecond resolution; two sessions generating
/// the same token would race each other's kill requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessToken(String);

impl ProcessToken {
    /// Wrap an existing token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generate a fresh token with the given prefix (e.g., "play", "record")
    pub fn generate(prefix: &str) -> Self {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| chrono::Utc::now().timestamp_micros().saturating_mul(1_000));
        Self(format!("{}_{}", prefix, nanos))
    }

    /// The bare token string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token as a kill target (leading slash, as node names resolve)
    pub fn kill_target(&self) -> String {
        format!("/{}", self.0)
    }
}

impl std::fmt::Display for ProcessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_elapsed() {
        let begin = BagStamp::from_secs(100);
        let later = BagStamp::from_nanos(101_500_000_000);
        assert_eq!(
            later.saturating_elapsed_since(begin),
            Duration::from_millis(1_500)
        );
    }

    #[test]
    fn test_stamp_elapsed_saturates() {
        let begin = BagStamp::from_secs(100);
        let earlier = BagStamp::from_secs(99);
        assert_eq!(earlier.saturating_elapsed_since(begin), Duration::ZERO);
    }

    #[test]
    fn test_stamp_display() {
        let stamp = BagStamp::from_nanos(12_000_000_500);
        assert_eq!(stamp.to_string(), "12.000000500");
    }

    #[test]
    fn test_token_generate_prefix_and_uniqueness() {
        let a = ProcessToken::generate("play");
        let b = ProcessToken::generate("play");
        assert!(a.as_str().starts_with("play_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_kill_target() {
        let token = ProcessToken::new("record_42");
        assert_eq!(token.kill_target(), "/record_42");
    }

    #[test]
    fn test_topic_display() {
        let topic = TopicInfo::new("/odom", "nav_msgs/Odometry");
        assert_eq!(topic.to_string(), "/odom [nav_msgs/Odometry]");
    }
}
