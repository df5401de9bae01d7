//! # BagPilot: session controller for bag playback and recording
//!
//! A GUI-agnostic controller for front-ends that browse, play back, and
//! record bag files (containers of timestamped, topic-grouped messages).
//! The architecture separates session bookkeeping from everything that
//! touches the outside world: bag indexing, live topic discovery, and the
//! external `rosbag`/`rosnode` processes are all reached through trait
//! seams, so a widget toolkit can sit on top without pulling any of them
//! into its event loop.
//!
//! ## Architecture
//!
//! - **Session**: [`SessionController`] owns the loaded bag's metadata,
//!   topic selections, and the playing/recording flags, and turns user
//!   actions into [`ProcessAction`] descriptors
//! - **Launch**: descriptors are executed fire-and-forget, either directly
//!   via [`DetachedLauncher`] or off-thread through a [`LaunchBridge`]
//! - **Feeds**: periodic topic discovery and the playback clock are pushed
//!   into the controller as plain method calls from the owning thread
//! - **Config**: persisted operator state (recent bags, playback defaults)
//!   lives in the platform data directory as JSON
//!
//! ## Example
//!
//! ```ignore
//! use bagpilot::{
//!     launch::{DetachedLauncher, LaunchBridge},
//!     session::SessionController,
//! };
//!
//! let (handle, worker) = LaunchBridge::new(Box::new(DetachedLauncher::new()));
//! std::thread::spawn(move || worker.run());
//!
//! let mut session = SessionController::new(Box::new(my_bag_reader));
//! session.open("/data/run42.bag")?;
//! session.start_play(true)?;
//! handle.dispatch_all(session.drain_actions());
//! ```
//!
//! The stop side is optimistic: `stop_play`/`stop_record` emit a kill
//! request targeting the generated process name and flip the session flag
//! immediately, without waiting for the process to exit.

pub mod bag;
pub mod config;
pub mod discovery;
pub mod error;
pub mod launch;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use bag::{BagReader, BagSummary};
pub use config::{AppState, PlaybackConfig};
pub use discovery::{ClockTick, FeedPump, TopicDiscovery};
pub use error::{BagPilotError, Result};
pub use launch::{DetachedLauncher, LaunchBridge, ProcessAction, ProcessLauncher};
pub use session::{ScrubRange, SessionController, SessionState, TimelineMapper};
pub use types::{BagStamp, ProcessToken, TopicInfo};
