//! Session state and control
//!
//! This module holds the heart of the crate: the session's data model,
//! the pure time/scrub-position mapping, and the controller that turns
//! operator actions into external process requests.
//!
//! # Components
//!
//! - [`SessionState`] - Loaded bag, topic selections, playback config,
//!   and the playing/recording runtime flags
//! - [`TimelineMapper`] - Bidirectional elapsed-time to scrub-unit
//!   conversion for the position slider
//! - [`SessionController`] - Orchestrates open/save/play/record/stop and
//!   absorbs the discovery and clock feeds
//!
//! Play and record are independent: the controller is an orthogonal pair
//! of two-state machines, {Idle, Playing} × {Idle, Recording}, each side
//! carrying the process token of its live external process.

pub mod controller;
pub mod state;
pub mod timeline;

pub use controller::SessionController;
pub use state::{SessionState, TopicSelection};
pub use timeline::{ScrubRange, TimelineMapper};
