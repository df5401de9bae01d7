//! Playback settings
//!
//! The playback configuration mirrors the player's config form: rate
//! multiplier, looping, and whether the player process should publish the
//! simulated clock. It is replaced wholesale when the operator confirms
//! the form and is read the next time a play action is constructed; an
//! already-running player keeps the settings it was spawned with.

use serde::{Deserialize, Serialize};

/// Slowest accepted playback rate multiplier
pub const MIN_PLAYBACK_RATE: f64 = 0.01;

/// Fastest accepted playback rate multiplier
pub const MAX_PLAYBACK_RATE: f64 = 100.0;

/// Settings applied when a play process is spawned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Rate multiplier (1.0 = real time)
    #[serde(default = "default_rate")]
    pub rate: f64,

    /// Restart from the beginning when the end of the bag is reached
    #[serde(default)]
    pub loop_playback: bool,

    /// Have the player publish the simulated clock
    #[serde(default = "default_true")]
    pub publish_clock: bool,
}

fn default_rate() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            loop_playback: false,
            publish_clock: true,
        }
    }
}

impl PlaybackConfig {
    /// Create default playback settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rate multiplier, clamped into the accepted range
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE);
    }

    /// Builder-style rate override (clamped)
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.set_rate(rate);
        self
    }

    /// Builder-style loop override
    pub fn with_loop(mut self, loop_playback: bool) -> Self {
        self.loop_playback = loop_playback;
        self
    }

    /// Builder-style clock override
    pub fn with_clock(mut self, publish_clock: bool) -> Self {
        self.publish_clock = publish_clock;
        self
    }
}
