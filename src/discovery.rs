//! External feeds: topic discovery and the playback clock
//!
//! The session learns about the outside world through two best-effort
//! feeds. A periodic poll asks the running system which topics exist
//! (feeding the record selection), and a published clock reports where
//! playback currently is (feeding the position display). Both are
//! delivered into [`SessionController`] as plain method calls on the
//! controller's own thread; neither is ordered with respect to user
//! actions, and the controller tolerates stale deliveries.
//!
//! [`FeedPump`] is the poll driver: it wraps a [`TopicDiscovery`]
//! implementation and forwards a snapshot at most once per interval,
//! however often the surrounding event loop calls it.

use std::time::{Duration, Instant};

use crate::config::DEFAULT_DISCOVERY_INTERVAL_MS;
use crate::error::Result;
use crate::session::SessionController;
use crate::types::{BagStamp, TopicInfo};

/// Source of live-topic snapshots
///
/// Implementations query whatever pub-sub runtime is present. Errors are
/// expected while the runtime is down; the pump logs and retries on the
/// next interval.
pub trait TopicDiscovery: Send {
    /// The set of topics currently known to the running system
    fn snapshot(&mut self) -> Result<Vec<TopicInfo>>;
}

/// One published clock event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    /// Absolute stamp on the bag's clock
    pub stamp: BagStamp,
}

impl ClockTick {
    /// Wrap a published stamp
    pub fn new(stamp: BagStamp) -> Self {
        Self { stamp }
    }
}

/// Interval-throttled discovery poll driver
///
/// Call [`FeedPump::pump`] from the event loop as often as convenient;
/// the underlying discovery is queried at most once per interval.
pub struct FeedPump {
    discovery: Box<dyn TopicDiscovery>,
    interval: Duration,
    last_poll: Option<Instant>,
}

impl FeedPump {
    /// Create a pump with the default poll interval
    pub fn new(discovery: Box<dyn TopicDiscovery>) -> Self {
        Self {
            discovery,
            interval: Duration::from_millis(DEFAULT_DISCOVERY_INTERVAL_MS),
            last_poll: None,
        }
    }

    /// Override the poll interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The configured poll interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll discovery if the interval has elapsed and forward the snapshot
    ///
    /// Returns whether a poll was made. Discovery failures are logged and
    /// count as a poll, so a down runtime is not hammered faster than the
    /// interval.
    pub fn pump(&mut self, controller: &mut SessionController) -> bool {
        let due = match self.last_poll {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        };
        if !due {
            return false;
        }

        self.pump_now(controller);
        true
    }

    /// Poll discovery immediately, ignoring the interval
    pub fn pump_now(&mut self, controller: &mut SessionController) {
        self.last_poll = Some(Instant::now());

        match self.discovery.snapshot() {
            Ok(topics) => controller.on_topic_snapshot(&topics),
            Err(e) => tracing::warn!(error = %e, "topic discovery failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag::{BagReader, BagSummary};
    use crate::error::BagPilotError;
    use std::path::Path;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Discovery stub counting snapshots and serving a fixed topic list
    struct StubDiscovery {
        topics: Vec<TopicInfo>,
        calls: Arc<AtomicUsize>,
    }

    impl TopicDiscovery for StubDiscovery {
        fn snapshot(&mut self) -> Result<Vec<TopicInfo>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.topics.clone())
        }
    }

    /// Reader that always fails; these tests never open a bag
    struct NoReader;

    impl BagReader for NoReader {
        fn open(&mut self, path: &Path) -> Result<BagSummary> {
            Err(BagPilotError::BagOpen {
                path: path.to_path_buf(),
                message: "unused".to_string(),
            })
        }
    }

    fn pump_with(topics: &[&str]) -> (FeedPump, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let discovery = StubDiscovery {
            topics: topics
                .iter()
                .map(|n| TopicInfo::new(*n, "std_msgs/String"))
                .collect(),
            calls: calls.clone(),
        };
        (
            FeedPump::new(Box::new(discovery)).with_interval(Duration::from_secs(3600)),
            calls,
        )
    }

    #[test]
    fn test_pump_polls_once_per_interval() {
        let (mut pump, calls) = pump_with(&["/a"]);
        let mut controller = SessionController::new(Box::new(NoReader));

        assert!(pump.pump(&mut controller));
        assert!(!pump.pump(&mut controller));
        assert!(!pump.pump(&mut controller));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(controller.state().record_topics().len(), 1);
    }

    #[test]
    fn test_pump_now_ignores_interval() {
        let (mut pump, calls) = pump_with(&["/a"]);
        let mut controller = SessionController::new(Box::new(NoReader));

        pump.pump_now(&mut controller);
        pump.pump_now(&mut controller);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_discovery_counts_as_poll() {
        struct FailingDiscovery;
        impl TopicDiscovery for FailingDiscovery {
            fn snapshot(&mut self) -> Result<Vec<TopicInfo>> {
                Err(BagPilotError::Discovery("master unreachable".to_string()))
            }
        }

        let mut pump = FeedPump::new(Box::new(FailingDiscovery))
            .with_interval(Duration::from_secs(3600));
        let mut controller = SessionController::new(Box::new(NoReader));

        assert!(pump.pump(&mut controller));
        assert!(!pump.pump(&mut controller));
        assert!(controller.state().record_topics().is_empty());
    }
}
