//! Session data model
//!
//! [`SessionState`] is the single place the session's facts live: the
//! summary of the loaded bag, the play and record topic selections, the
//! playback configuration, the scrub position, and the tokens of any live
//! external processes. It has accessors and bulk mutators only; the
//! decisions about *when* to mutate belong to
//! [`SessionController`](crate::session::SessionController).
//!
//! The playing/recording flags are not stored separately from the process
//! tokens: each side is an `Option<ProcessToken>`, so "playing implies a
//! token exists" holds by construction.

use std::time::Duration;

use crate::bag::BagSummary;
use crate::config::PlaybackConfig;
use crate::error::{BagPilotError, Result};
use crate::types::{ProcessToken, TopicInfo};

/// An ordered topic set with per-topic include flags
///
/// Insertion order is display order; names are unique (a later duplicate
/// is ignored). Freshly inserted topics default to included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicSelection {
    entries: Vec<(TopicInfo, bool)>,
}

impl TopicSelection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from topics, all included
    pub fn from_topics(topics: &[TopicInfo]) -> Self {
        let mut selection = Self::new();
        selection.replace(topics);
        selection
    }

    /// Replace the whole selection, marking every topic included
    pub fn replace(&mut self, topics: &[TopicInfo]) {
        self.entries.clear();
        for topic in topics {
            if !self.contains(&topic.name) {
                self.entries.push((topic.clone(), true));
            }
        }
    }

    /// Set every include flag at once
    pub fn set_all(&mut self, included: bool) {
        for (_, flag) in &mut self.entries {
            *flag = included;
        }
    }

    /// Set one topic's include flag; returns false if the name is unknown
    pub fn set(&mut self, name: &str, included: bool) -> bool {
        match self.entries.iter_mut().find(|(t, _)| t.name == name) {
            Some((_, flag)) => {
                *flag = included;
                true
            }
            None => false,
        }
    }

    /// Whether a topic with this name is present
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(t, _)| t.name == name)
    }

    /// A topic's include flag, if present
    pub fn is_included(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(t, _)| t.name == name)
            .map(|(_, flag)| *flag)
    }

    /// All entries in display order
    pub fn iter(&self) -> impl Iterator<Item = (&TopicInfo, bool)> {
        self.entries.iter().map(|(t, flag)| (t, *flag))
    }

    /// Names of the included topics, in display order
    pub fn included_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, flag)| *flag)
            .map(|(t, _)| t.name.as_str())
    }

    /// Number of included topics
    pub fn included_count(&self) -> usize {
        self.entries.iter().filter(|(_, flag)| *flag).count()
    }

    /// Total number of topics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the selection holds no topics
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The session's complete data model
#[derive(Debug, Default)]
pub struct SessionState {
    /// Currently loaded bag, if any
    bag: Option<BagSummary>,
    /// Topics to play back, populated from the loaded bag
    play_topics: TopicSelection,
    /// Topics to record, rebuilt from discovery snapshots
    record_topics: TopicSelection,
    /// Settings for the next play action
    playback: PlaybackConfig,
    /// Elapsed position within the loaded bag
    position: Duration,
    /// Token of the live play process
    play_token: Option<ProcessToken>,
    /// Token of the live record process
    record_token: Option<ProcessToken>,
}

impl SessionState {
    /// Create an empty session: no bag, nothing live
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Bag ====================

    /// The loaded bag, if any
    pub fn bag(&self) -> Option<&BagSummary> {
        self.bag.as_ref()
    }

    /// Whether a bag is loaded
    pub fn has_bag(&self) -> bool {
        self.bag.is_some()
    }

    /// Duration of the loaded bag, zero when none is loaded
    pub fn duration(&self) -> Duration {
        self.bag.as_ref().map(BagSummary::duration).unwrap_or_default()
    }

    /// Install a freshly opened bag
    ///
    /// Resets the play selection to the bag's topics (all included) and
    /// the position to zero. Fails with `InvalidTimeRange` when the
    /// summary's bounds are inverted, leaving the previous bag in place.
    pub fn replace_bag(&mut self, summary: BagSummary) -> Result<()> {
        if !summary.has_valid_bounds() {
            return Err(BagPilotError::InvalidTimeRange {
                begin: summary.begin,
                end: summary.end,
            });
        }

        self.play_topics.replace(&summary.topics);
        self.position = Duration::ZERO;
        self.bag = Some(summary);
        Ok(())
    }

    // ==================== Topic selections ====================

    /// The play topic selection
    pub fn play_topics(&self) -> &TopicSelection {
        &self.play_topics
    }

    /// The record topic selection
    pub fn record_topics(&self) -> &TopicSelection {
        &self.record_topics
    }

    /// Replace the record selection wholesale (all included)
    ///
    /// Always succeeds; an empty snapshot yields an empty selection.
    /// Callers own the policy of when a rebuild is warranted.
    pub fn replace_record_topics(&mut self, topics: &[TopicInfo]) {
        self.record_topics.replace(topics);
    }

    /// Bulk-set every play include flag
    pub fn set_all_play(&mut self, included: bool) {
        self.play_topics.set_all(included);
    }

    /// Bulk-set every record include flag
    pub fn set_all_record(&mut self, included: bool) {
        self.record_topics.set_all(included);
    }

    /// Set one play topic's include flag
    pub fn set_play_topic(&mut self, name: &str, included: bool) -> bool {
        self.play_topics.set(name, included)
    }

    /// Set one record topic's include flag
    pub fn set_record_topic(&mut self, name: &str, included: bool) -> bool {
        self.record_topics.set(name, included)
    }

    // ==================== Playback config ====================

    /// Settings the next play action will be built with
    pub fn playback(&self) -> &PlaybackConfig {
        &self.playback
    }

    /// Replace the playback settings wholesale
    pub fn set_playback(&mut self, config: PlaybackConfig) {
        self.playback = config;
    }

    // ==================== Position ====================

    /// Elapsed position within the loaded bag
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Set the position, clamped into `[0, duration]`
    pub fn set_position(&mut self, position: Duration) {
        self.position = position.min(self.duration());
    }

    // ==================== Runtime flags ====================

    /// Whether a play process is live
    pub fn is_playing(&self) -> bool {
        self.play_token.is_some()
    }

    /// Whether a record process is live
    pub fn is_recording(&self) -> bool {
        self.record_token.is_some()
    }

    /// Token of the live play process
    pub fn play_token(&self) -> Option<&ProcessToken> {
        self.play_token.as_ref()
    }

    /// Token of the live record process
    pub fn record_token(&self) -> Option<&ProcessToken> {
        self.record_token.as_ref()
    }

    /// Mark playback live under `token`
    pub fn begin_play(&mut self, token: ProcessToken) {
        self.play_token = Some(token);
    }

    /// Mark playback stopped, yielding the token to kill
    pub fn end_play(&mut self) -> Option<ProcessToken> {
        self.play_token.take()
    }

    /// Mark recording live under `token`
    pub fn begin_record(&mut self, token: ProcessToken) {
        self.record_token = Some(token);
    }

    /// Mark recording stopped, yielding the token to kill
    pub fn end_record(&mut self) -> Option<ProcessToken> {
        self.record_token.take()
    }
}
