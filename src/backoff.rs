//! # Poll Backoff
//!
//! Fibonacci-based backoff for the status poller's probe intervals.
//!
//! The sequence grows more slowly than exponential backoff, which suits
//! repeated visibility probes against an eventually-consistent service:
//! with a 1s floor and 15s cap the intervals run 1s, 1s, 2s, 3s, 5s, 8s,
//! 13s, 15s (max).

use std::time::Duration;

/// Fibonacci backoff over whole seconds, capped at a maximum.
///
/// Each interval is the sum of the previous two, starting from the floor.
#[derive(Debug, Clone)]
pub struct FibonacciBackoff {
    min_secs: u64,
    prev_secs: u64,
    current_secs: u64,
    max_secs: u64,
}

impl FibonacciBackoff {
    /// Backoff with the given floor and cap, both in whole seconds.
    #[must_use]
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs,
            prev_secs: 0,
            current_secs: min_secs,
            max_secs,
        }
    }

    /// Next interval, advancing the sequence. Capped at the maximum.
    #[must_use]
    pub fn next_backoff(&mut self) -> Duration {
        let result = Duration::from_secs(self.current_secs);

        let next_secs = self.prev_secs + self.current_secs;
        self.prev_secs = self.current_secs;
        self.current_secs = std::cmp::min(next_secs, self.max_secs);

        result
    }

    /// Restart the sequence from the floor.
    pub fn reset(&mut self) {
        self.prev_secs = 0;
        self.current_secs = self.min_secs;
    }
}
