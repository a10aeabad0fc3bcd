// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input-cadence speed estimation.
//!
//! Faster repeated taps should visibly speed the animation up, so the UI
//! keeps pace with input instead of queuing a growing backlog of slow
//! animations. [`SpeedEstimator`] maps recent inter-request intervals to a
//! speed factor in `1.0..=2.5`; durations scale inversely
//! (`effective = base / factor`, see
//! [`DurationMs::scaled_down`](crate::time::DurationMs::scaled_down)).
//!
//! Only rapid taps count: any interval of [`RESET_INTERVAL`] or more clears
//! the history and drops back to factor 1.0.

use crate::time::{DurationMs, TimeMs};

/// Intervals at or above this reset the cadence history.
pub const RESET_INTERVAL: DurationMs = DurationMs(500);

/// How many recent intervals inform the estimate.
pub const HISTORY_LEN: usize = 3;

/// Upper bound on the speed factor.
pub const MAX_FACTOR: f32 = 2.5;

/// Milliseconds of average-interval headroom per 1.0 of extra speed.
const FACTOR_SLOPE_MS: f32 = 200.0;

/// Bounded history of recent inter-request intervals.
#[derive(Clone, Copy, Debug, Default)]
struct ClickHistory {
    intervals_ms: [u64; HISTORY_LEN],
    len: usize,
    cursor: usize,
}

impl ClickHistory {
    /// Records an interval, evicting the oldest beyond [`HISTORY_LEN`].
    fn push(&mut self, interval: DurationMs) {
        self.intervals_ms[self.cursor] = interval.millis();
        self.cursor = (self.cursor + 1) % HISTORY_LEN;
        if self.len < HISTORY_LEN {
            self.len += 1;
        }
    }

    /// Mean of the recorded intervals. Zero when empty.
    fn mean_ms(&self) -> f32 {
        if self.len == 0 {
            return 0.0;
        }
        let sum: u64 = self.intervals_ms[..self.len].iter().sum();
        sum as f32 / self.len as f32
    }

    fn clear(&mut self) {
        self.len = 0;
        self.cursor = 0;
    }
}

/// Maps request cadence to an animation speed factor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpeedEstimator {
    last_request: Option<TimeMs>,
    history: ClickHistory,
}

impl SpeedEstimator {
    /// Creates an estimator with no recorded requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request at `now` and returns the speed factor for it.
    ///
    /// The first request, and any request [`RESET_INTERVAL`] or more after
    /// the previous one, clears the history and yields 1.0. Rapid requests
    /// average their last [`HISTORY_LEN`] intervals: a 500 ms cadence maps to
    /// 1.0 and a 100 ms cadence to 3.0 before clamping to [`MAX_FACTOR`].
    pub fn record_request(&mut self, now: TimeMs) -> f32 {
        let interval = match self.last_request {
            Some(last) => now.saturating_duration_since(last),
            None => RESET_INTERVAL,
        };
        self.last_request = Some(now);

        if interval >= RESET_INTERVAL {
            self.history.clear();
            return 1.0;
        }

        self.history.push(interval);
        let avg = self.history.mean_ms();
        let reset_ms = RESET_INTERVAL.millis() as f32;
        ((reset_ms - avg) / FACTOR_SLOPE_MS + 1.0).clamp(1.0, MAX_FACTOR)
    }

    /// Forgets all recorded cadence; used on teardown.
    pub fn reset(&mut self) {
        self.last_request = None;
        self.history.clear();
    }
}
