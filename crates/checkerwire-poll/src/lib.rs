//! Restartable repeating timer for checkerwire.
//!
//! The lobby player list is refreshed by asking the server for it on a
//! fixed period. [`PollScheduler`] owns that period: it can be started,
//! restarted, and stopped, and a running scheduler has exactly one pending
//! deadline, so restarting never leaves a duplicate timer behind.
//!
//! # Integration
//!
//! The scheduler is designed to sit inside the session's `tokio::select!`
//! loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         payload = conn.recv() => { /* handle frames */ }
//!         _ = poll.wait_for_poll() => {
//!             session.get_player_list().await?;
//!         }
//!     }
//! }
//! ```
//!
//! [`PollScheduler::wait_for_poll`] is cancel-safe: dropping the future
//! before it resolves leaves the schedule untouched.

use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the poll scheduler.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Time between polls. Default: 10 seconds.
    pub interval: Duration,
    /// Random delay (0–max) added to the *first* poll after a start, so
    /// many clients started together do not hit the server in lockstep.
    /// Default: none.
    pub initial_jitter: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            initial_jitter: Duration::ZERO,
        }
    }
}

impl PollConfig {
    /// The player-list refresh period.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    /// Shortest accepted interval.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

    /// Create a config for a specific interval with no jitter.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`PollScheduler::new`]. An interval below
    /// [`Self::MIN_INTERVAL`] is raised to it.
    pub fn validated(mut self) -> Self {
        if self.interval < Self::MIN_INTERVAL {
            warn!(
                interval_ms = self.interval.as_millis() as u64,
                min_ms = Self::MIN_INTERVAL.as_millis() as u64,
                "poll interval below minimum, clamping"
            );
            self.interval = Self::MIN_INTERVAL;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Poll info
// ---------------------------------------------------------------------------

/// Information about a fired poll, returned by
/// [`PollScheduler::wait_for_poll`].
#[derive(Debug, Clone)]
pub struct PollInfo {
    /// Polls fired since the last start (starts at 1).
    pub poll: u64,
    /// Whole intervals that elapsed without firing because the owner did
    /// not wait in time. Normally 0.
    pub missed: u64,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// A repeating timer with at most one pending deadline.
///
/// Created stopped. [`start`](Self::start) arms it, calling `start` again
/// re-arms it from now (replacing the previous schedule), and
/// [`stop`](Self::stop) disarms it.
#[derive(Debug)]
pub struct PollScheduler {
    config: PollConfig,
    /// When the next poll should fire; `None` while stopped.
    next_poll: Option<Instant>,
    poll_count: u64,
    total_polls: u64,
    starts: u64,
}

impl PollScheduler {
    /// Create a stopped scheduler from config.
    pub fn new(config: PollConfig) -> Self {
        let config = config.validated();
        debug!(interval_ms = config.interval.as_millis() as u64, "poll scheduler created");
        Self {
            config,
            next_poll: None,
            poll_count: 0,
            total_polls: 0,
            starts: 0,
        }
    }

    /// Create a stopped scheduler with the given interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self::new(PollConfig::with_interval(interval))
    }

    /// Arm the timer so it first fires one interval from now.
    ///
    /// If the timer is already running, its schedule is replaced; there is
    /// never more than one pending deadline.
    pub fn start(&mut self) {
        // Jitter is drawn in whole microseconds; anything shorter is none.
        let max_us = self.config.initial_jitter.as_micros() as u64;
        let jitter = if max_us > 0 {
            Duration::from_micros(rand::rng().random_range(0..max_us))
        } else {
            Duration::ZERO
        };

        let restarted = self.next_poll.is_some();
        self.next_poll = Some(Instant::now() + self.config.interval + jitter);
        self.poll_count = 0;
        self.starts += 1;

        debug!(
            restarted,
            interval_ms = self.config.interval.as_millis() as u64,
            "poll scheduler started"
        );
    }

    /// Disarm the timer. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if self.next_poll.take().is_some() {
            debug!(polls = self.poll_count, "poll scheduler stopped");
        }
    }

    /// Wait until the next poll is due.
    ///
    /// While stopped this future pends forever; it never resolves on its
    /// own, but `tokio::select!` keeps serving its other branches.
    pub async fn wait_for_poll(&mut self) -> PollInfo {
        let Some(next) = self.next_poll else {
            std::future::pending::<()>().await;
            unreachable!()
        };

        time::sleep_until(next).await;

        let now = Instant::now();
        let interval = self.config.interval;
        let late_by = now.saturating_duration_since(next);
        let missed = (late_by.as_nanos() / interval.as_nanos()) as u64;
        if missed > 0 {
            warn!(
                missed,
                late_ms = late_by.as_millis() as u64,
                "poll overrun, skipping ahead"
            );
        }

        // Always schedule from now, never from the missed deadline.
        self.next_poll = Some(now + interval);
        self.poll_count += 1;
        self.total_polls += 1;

        trace!(poll = self.poll_count, "poll fired");

        PollInfo {
            poll: self.poll_count,
            missed,
        }
    }

    /// Whether the timer is armed.
    pub fn is_active(&self) -> bool {
        self.next_poll.is_some()
    }

    /// Polls fired since the last start.
    pub fn poll_count(&self) -> u64 {
        self.poll_count
    }

    /// Polls fired over the scheduler's lifetime.
    pub fn total_polls(&self) -> u64 {
        self.total_polls
    }

    /// How many times [`start`](Self::start) has been called.
    pub fn starts(&self) -> u64 {
        self.starts
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    /// The pending deadline, if armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_poll
    }
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new(PollConfig::default())
    }
}
