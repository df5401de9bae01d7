//! Session controller
//!
//! [`SessionController`] is the single entry point a front-end drives.
//! Every user action (open, save, play, record, stop, config) and every
//! external stimulus (discovery snapshot, clock tick) is a synchronous
//! method call from one thread; the controller mutates [`SessionState`]
//! and appends the resulting OS-level requests to an outbox the caller
//! drains and forwards to a launcher after each call.
//!
//! Play and record are independent two-state machines. All process
//! control is optimistic: flags flip at request time, stop requests are
//! never confirmed, and exit codes are never observed.
//!
//! # Example
//!
//! ```ignore
//! let mut session = SessionController::new(Box::new(reader));
//! session.open("/data/run42.bag")?;
//! session.start_play(true)?;
//! launch_handle.dispatch_all(session.drain_actions());
//! ```

use std::path::Path;
use std::time::Duration;

use crate::bag::BagReader;
use crate::config::PlaybackConfig;
use crate::discovery::ClockTick;
use crate::error::{BagPilotError, Result, SelectionList};
use crate::launch::{command, ProcessAction};
use crate::types::{ProcessToken, TopicInfo};

use super::state::SessionState;
use super::timeline::{ScrubRange, TimelineMapper};

/// Orchestrates session transitions and emits process requests
pub struct SessionController {
    /// The session's data model; this controller is its only writer
    state: SessionState,
    /// Conversion between elapsed time and scrub ticks for the position control
    mapper: TimelineMapper,
    /// Collaborator that indexes bags on open
    reader: Box<dyn BagReader>,
    /// Topic count of the last discovery snapshot acted upon
    last_topic_count: usize,
    /// Emitted actions awaiting pickup by the caller
    outbox: Vec<ProcessAction>,
}

impl SessionController {
    /// Create an idle controller with no bag loaded
    pub fn new(reader: Box<dyn BagReader>) -> Self {
        Self {
            state: SessionState::new(),
            mapper: TimelineMapper::default(),
            reader,
            last_topic_count: 0,
            outbox: Vec::new(),
        }
    }

    /// Override the scrub tick range (default 0..=100)
    pub fn with_scrub_range(mut self, range: ScrubRange) -> Self {
        self.mapper = TimelineMapper::new(range);
        self
    }

    /// Seed the playback settings (e.g., from persisted defaults)
    pub fn with_playback(mut self, config: PlaybackConfig) -> Self {
        self.state.set_playback(config);
        self
    }

    // ==================== Outbox ====================

    /// Take every action emitted since the last drain, in order
    pub fn drain_actions(&mut self) -> Vec<ProcessAction> {
        std::mem::take(&mut self.outbox)
    }

    /// Actions emitted and not yet drained
    pub fn pending_actions(&self) -> &[ProcessAction] {
        &self.outbox
    }

    // ==================== Transitions ====================

    /// Open and index the bag at `path`
    ///
    /// A live playback is stopped first (its kill request lands in the
    /// outbox either way). On failure the previously loaded bag and its
    /// selection are untouched.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if self.state.is_playing() {
            self.stop_play();
        }

        let summary = self.reader.open(path)?;
        let topic_count = summary.topic_count();
        let duration = summary.duration();
        self.state.replace_bag(summary)?;

        tracing::info!(
            path = %path.display(),
            topics = topic_count,
            duration_secs = duration.as_secs_f64(),
            "opened bag"
        );
        Ok(())
    }

    /// Write the selected play topics into a new bag at `dst`
    ///
    /// Requires a loaded bag and at least one included play topic. When
    /// valid and currently playing, the play-kill request precedes the
    /// filter request in the outbox.
    pub fn save(&mut self, dst: impl AsRef<Path>) -> Result<()> {
        let dst = dst.as_ref();

        let topics: Vec<String> = self
            .state
            .play_topics()
            .included_names()
            .map(str::to_string)
            .collect();
        if topics.is_empty() {
            tracing::warn!("save refused: no play topics selected");
            return Err(BagPilotError::EmptySelection {
                list: SelectionList::Play,
            });
        }
        let src = self
            .state
            .bag()
            .map(|bag| bag.path.clone())
            .ok_or(BagPilotError::NoBagLoaded)?;

        if self.state.is_playing() {
            self.stop_play();
        }

        tracing::info!(src = %src.display(), dst = %dst.display(), topics = topics.len(), "filtering bag");
        self.outbox
            .push(ProcessAction::Spawn(command::filter_spawn(
                &src, dst, &topics,
            )));
        Ok(())
    }

    /// Start playback of the loaded bag
    ///
    /// With `from_beginning` the position rewinds to zero first;
    /// otherwise playback resumes from the current position. Refused
    /// (playing flag left false, nothing emitted) when no bag is loaded.
    /// An already-running play process is stopped before the new one is
    /// requested, so its kill precedes the spawn in the outbox.
    pub fn start_play(&mut self, from_beginning: bool) -> Result<()> {
        if !self.state.has_bag() {
            self.state.end_play();
            tracing::warn!("play refused: no bag loaded");
            return Err(BagPilotError::NoBagLoaded);
        }

        if self.state.is_playing() {
            self.stop_play();
        }

        if from_beginning {
            self.state.set_position(Duration::ZERO);
        }

        let topics: Vec<String> = self
            .state
            .play_topics()
            .included_names()
            .map(str::to_string)
            .collect();
        let token = ProcessToken::generate("play");
        let bag = self.state.bag().expect("checked above");
        let spec = command::play_spawn(
            &bag.path,
            self.state.playback(),
            self.state.position(),
            &topics,
            &token,
        );

        tracing::info!(%token, position_secs = self.state.position().as_secs_f64(), "starting playback");
        self.outbox.push(ProcessAction::Spawn(spec));
        self.state.begin_play(token);
        Ok(())
    }

    /// Stop playback; returns whether a kill request was emitted
    ///
    /// Optimistic: the playing flag clears immediately, without waiting
    /// for the process to exit.
    pub fn stop_play(&mut self) -> bool {
        match self.state.end_play() {
            Some(token) => {
                tracing::info!(%token, "stopping playback");
                self.outbox.push(ProcessAction::Kill { target: token });
                true
            }
            None => false,
        }
    }

    /// Start recording the selected record topics
    ///
    /// Refused (recording flag forced false, nothing emitted) when zero
    /// record topics are included. A no-op while already recording.
    pub fn start_record(&mut self) -> Result<()> {
        if self.state.is_recording() {
            tracing::debug!("record already running");
            return Ok(());
        }

        let topics: Vec<String> = self
            .state
            .record_topics()
            .included_names()
            .map(str::to_string)
            .collect();
        if topics.is_empty() {
            self.state.end_record();
            tracing::warn!("record refused: no record topics selected");
            return Err(BagPilotError::EmptySelection {
                list: SelectionList::Record,
            });
        }

        let token = ProcessToken::generate("record");
        let spec = command::record_spawn(&topics, &token);

        tracing::info!(%token, topics = topics.len(), "starting recording");
        self.outbox.push(ProcessAction::Spawn(spec));
        self.state.begin_record(token);
        Ok(())
    }

    /// Stop recording; returns whether a kill request was emitted
    pub fn stop_record(&mut self) -> bool {
        match self.state.end_record() {
            Some(token) => {
                tracing::info!(%token, "stopping recording");
                self.outbox.push(ProcessAction::Kill { target: token });
                true
            }
            None => false,
        }
    }

    /// Pause/resume convenience: stop if playing, else resume from the
    /// current position
    pub fn toggle_resume(&mut self) -> Result<()> {
        if self.state.is_playing() {
            self.stop_play();
            Ok(())
        } else {
            self.start_play(false)
        }
    }

    /// Stop recording and playback, in that order
    pub fn stop_all(&mut self) {
        self.stop_record();
        self.stop_play();
    }

    /// Replace the playback settings
    ///
    /// Takes effect on the next `start_play`; a running player is not
    /// reconfigured.
    pub fn apply_config(&mut self, config: PlaybackConfig) {
        self.state.set_playback(config);
    }

    // ==================== External feeds ====================

    /// Absorb a published clock tick
    ///
    /// Updates the position to the tick's offset from the bag's begin
    /// time, clamped into the bag's span, whether or not this session
    /// started the player. Ignored when no bag is loaded, and harmless
    /// after a stop.
    pub fn on_clock_tick(&mut self, tick: ClockTick) {
        let Some(bag) = self.state.bag() else {
            tracing::debug!("clock tick with no bag loaded");
            return;
        };

        let elapsed = tick.stamp.saturating_elapsed_since(bag.begin);
        self.state.set_position(elapsed);
    }

    /// Absorb a topic-discovery snapshot
    ///
    /// The record selection is rebuilt (all topics included) only when
    /// the snapshot size differs from the last one acted upon; equal-size
    /// snapshots are ignored even if the names changed.
    pub fn on_topic_snapshot(&mut self, topics: &[TopicInfo]) {
        if topics.len() == self.last_topic_count {
            return;
        }

        tracing::debug!(
            previous = self.last_topic_count,
            current = topics.len(),
            "live topic set changed"
        );
        self.last_topic_count = topics.len();
        self.state.replace_record_topics(topics);
    }

    // ==================== Selections ====================

    /// Bulk-set every play include flag
    pub fn set_all_play(&mut self, included: bool) {
        self.state.set_all_play(included);
    }

    /// Bulk-set every record include flag
    pub fn set_all_record(&mut self, included: bool) {
        self.state.set_all_record(included);
    }

    /// Set one play topic's include flag
    pub fn set_play_topic(&mut self, name: &str, included: bool) -> bool {
        self.state.set_play_topic(name, included)
    }

    /// Set one record topic's include flag
    pub fn set_record_topic(&mut self, name: &str, included: bool) -> bool {
        self.state.set_record_topic(name, included)
    }

    // ==================== Position & scrub surface ====================

    /// Duration of the loaded bag (zero when none)
    pub fn duration(&self) -> Duration {
        self.state.duration()
    }

    /// Current elapsed position
    pub fn position(&self) -> Duration {
        self.state.position()
    }

    /// Jump to an elapsed position (clamped into the bag's span)
    ///
    /// Only the stored position moves; a running player is unaffected
    /// until the next `start_play`.
    pub fn seek(&mut self, position: Duration) {
        self.state.set_position(position);
    }

    /// Current position as a scrub tick
    pub fn scrub_position(&self) -> i64 {
        self.mapper
            .to_scrub(self.state.position(), self.state.duration())
    }

    /// Jump to the position a scrub tick maps to
    pub fn seek_scrub(&mut self, value: i64) {
        let elapsed = self.mapper.to_elapsed(value, self.state.duration());
        self.state.set_position(elapsed);
    }

    /// The scrub tick range in use
    pub fn scrub_range(&self) -> ScrubRange {
        self.mapper.range()
    }

    // ==================== Accessors ====================

    /// The session's data model
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a play process is live
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Whether a record process is live
    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    /// Settings the next play action will be built with
    pub fn playback(&self) -> &PlaybackConfig {
        self.state.playback()
    }
}
