// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine facade owned by one counter session.
//!
//! [`CounterEngine`] wires the speed estimator, planner, and transition
//! queue behind the four-call surface a counter screen needs:
//!
//! ```rust,ignore
//! // On each tap:
//! if engine.request_change(new_value, now) == Activation::Started {
//!     presenter.apply(engine.active_frames(), engine.speed_factor());
//! }
//!
//! // From the render surface, when the primary frame finishes:
//! match engine.complete_active() {
//!     Completion::Activated(_) | Completion::Drained => {
//!         presenter.apply(engine.active_frames(), engine.speed_factor());
//!     }
//!     Completion::Ignored => {}
//! }
//!
//! // On screen teardown:
//! engine.reset();
//! ```
//!
//! All state is owned by the session and mutated single-threaded; the engine
//! performs no blocking work and holds no locks. Values are `u64`, so the
//! "negative value" error case is unrepresentable at the API.

use alloc::vec::Vec;

use crate::frame::DigitFrame;
use crate::planner::{FrameIds, plan, static_frames};
use crate::queue::{Completion, TransitionQueue, ValueTransition};
use crate::speed::SpeedEstimator;
use crate::time::TimeMs;

/// Outcome of [`CounterEngine::request_change`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// The engine was idle; the transition is active and should be rendered.
    Started,
    /// An animation is in flight; the transition waits its FIFO turn.
    Queued,
    /// The request matched the pending target value; nothing to do.
    Ignored,
}

/// Digit-transition engine for one counter session.
#[derive(Debug)]
pub struct CounterEngine {
    queue: TransitionQueue,
    estimator: SpeedEstimator,
    ids: FrameIds,
    /// Descriptors for the active transition, or the idle rendering.
    frames: Vec<DigitFrame>,
    speed: f32,
    /// The most recently requested target value (the displayed value once
    /// the queue drains).
    value: u64,
}

impl CounterEngine {
    /// Creates an idle engine displaying `initial`.
    #[must_use]
    pub fn new(initial: u64) -> Self {
        let mut ids = FrameIds::new();
        let frames = static_frames(initial, &mut ids);
        Self {
            queue: TransitionQueue::new(),
            estimator: SpeedEstimator::new(),
            ids,
            frames,
            speed: 1.0,
            value: initial,
        }
    }

    /// Requests a change to `to`, sampled at `now` for cadence estimation.
    ///
    /// The transition's `from` is the previously requested target — not the
    /// currently displayed value — so rapid requests chain without dropping
    /// intermediate states. Requests that match the pending target are
    /// ignored.
    pub fn request_change(&mut self, to: u64, now: TimeMs) -> Activation {
        let from = self.value;
        if to == from {
            return Activation::Ignored;
        }
        let speed = self.estimator.record_request(now);
        self.value = to;
        let transition = ValueTransition {
            from,
            to,
            speed,
            requested_at: now,
        };
        if self.queue.enqueue(transition) {
            self.activate(&transition);
            Activation::Started
        } else {
            Activation::Queued
        }
    }

    /// The render surface's completion signal for the active transition's
    /// primary frame. Expected exactly once per active transition.
    ///
    /// On [`Completion::Activated`] the next transition's descriptors are
    /// planned (at that transition's own recorded speed) and should be
    /// rendered; on [`Completion::Drained`] the idle rendering of the settled
    /// value replaces them. Signals with no active transition — late arrivals
    /// after [`reset`](Self::reset), or duplicates — are ignored and leave
    /// the current descriptors (and their identities) untouched.
    pub fn complete_active(&mut self) -> Completion {
        let outcome = self.queue.complete_active();
        match outcome {
            Completion::Activated(next) => self.activate(&next),
            Completion::Drained => {
                self.speed = 1.0;
                self.frames = static_frames(self.value, &mut self.ids);
            }
            Completion::Ignored => {}
        }
        outcome
    }

    /// Descriptors for the active transition, or the idle rendering when no
    /// transition is in flight. Most-significant digit first.
    #[must_use]
    pub fn active_frames(&self) -> &[DigitFrame] {
        &self.frames
    }

    /// Speed factor for the active transition (1.0 when idle).
    #[must_use]
    pub fn speed_factor(&self) -> f32 {
        self.speed
    }

    /// The most recently requested target value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The active transition, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ValueTransition> {
        self.queue.active()
    }

    /// The most recently requested transition still in the queue, if any.
    #[must_use]
    pub fn last_requested(&self) -> Option<&ValueTransition> {
        self.queue.tail()
    }

    /// Whether no transition is queued or animating.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of transitions queued, including the active one.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Screen-teardown hook: drops all queued transitions and cadence
    /// history. Completion signals from animations that were mid-flight are
    /// ignored from here on.
    pub fn reset(&mut self) {
        self.queue.reset();
        self.estimator.reset();
        self.speed = 1.0;
        self.frames = static_frames(self.value, &mut self.ids);
    }

    fn activate(&mut self, transition: &ValueTransition) {
        self.speed = transition.speed;
        self.frames = plan(transition.from, transition.to, &mut self.ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Digit, FrameKind};

    fn shown(engine: &CounterEngine) -> alloc::string::String {
        engine
            .active_frames()
            .iter()
            .filter_map(|f| f.current.map(Digit::as_char))
            .collect()
    }

    #[test]
    fn starts_idle_with_static_rendering() {
        let engine = CounterEngine::new(12);
        assert!(engine.is_idle());
        assert_eq!(shown(&engine), "12");
        assert!(
            engine.active_frames().iter().all(|f| f.kind == FrameKind::Static),
            "idle rendering must be static"
        );
    }

    #[test]
    fn request_matching_target_is_ignored() {
        let mut engine = CounterEngine::new(5);
        assert_eq!(engine.request_change(5, TimeMs(0)), Activation::Ignored);
        assert!(engine.is_idle());
    }

    #[test]
    fn first_request_starts_immediately() {
        let mut engine = CounterEngine::new(5);
        assert_eq!(engine.request_change(6, TimeMs(0)), Activation::Started);
        assert_eq!(engine.pending(), 1);
        let frames = engine.active_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].kind, FrameKind::Swap);
        assert_eq!(frames[0].previous.map(Digit::as_char), Some('5'));
        assert_eq!(frames[0].current.map(Digit::as_char), Some('6'));
    }

    #[test]
    fn rapid_requests_chain_from_the_pending_target() {
        let mut engine = CounterEngine::new(0);
        assert_eq!(engine.request_change(1, TimeMs(0)), Activation::Started);
        assert_eq!(engine.request_change(2, TimeMs(50)), Activation::Queued);
        assert_eq!(engine.request_change(3, TimeMs(100)), Activation::Queued);
        assert_eq!(engine.pending(), 3);
        assert_eq!(engine.value(), 3);

        // Still showing the first transition.
        let active = engine.active().unwrap();
        assert_eq!((active.from, active.to), (0, 1));

        // Each completion surfaces the next intermediate state in order.
        assert!(matches!(engine.complete_active(), Completion::Activated(t) if t.to == 2));
        assert_eq!(shown(&engine), "2");
        assert!(matches!(engine.complete_active(), Completion::Activated(t) if t.to == 3));
        assert_eq!(engine.complete_active(), Completion::Drained);
        assert!(engine.is_idle());
        assert_eq!(shown(&engine), "3");
        assert_eq!(engine.speed_factor(), 1.0);
    }

    #[test]
    fn activation_uses_the_transitions_own_speed() {
        let mut engine = CounterEngine::new(0);
        engine.request_change(1, TimeMs(0));
        assert_eq!(engine.speed_factor(), 1.0);
        // A 300ms interval maps to factor 2.0 for the queued transition.
        engine.request_change(2, TimeMs(300));
        assert_eq!(engine.speed_factor(), 1.0, "queued speed must not apply yet");

        engine.complete_active();
        assert!((engine.speed_factor() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn spurious_completion_preserves_frame_identities() {
        let mut engine = CounterEngine::new(7);
        let before: alloc::vec::Vec<_> = engine.active_frames().iter().map(|f| f.id).collect();
        assert_eq!(engine.complete_active(), Completion::Ignored);
        let after: alloc::vec::Vec<_> = engine.active_frames().iter().map(|f| f.id).collect();
        assert_eq!(before, after, "spurious signals must not re-mint identities");
    }

    #[test]
    fn reset_drops_queue_and_ignores_late_completions() {
        let mut engine = CounterEngine::new(0);
        engine.request_change(1, TimeMs(0));
        engine.request_change(2, TimeMs(50));
        engine.reset();
        assert!(engine.is_idle());
        assert_eq!(engine.complete_active(), Completion::Ignored);
        // Shows the last requested value, statically.
        assert_eq!(shown(&engine), "2");
    }

    #[test]
    fn nine_to_ten_round_trip() {
        let mut engine = CounterEngine::new(9);
        engine.request_change(10, TimeMs(0));
        assert_eq!(engine.active_frames().len(), 2);
        engine.complete_active();
        assert_eq!(shown(&engine), "10");

        engine.request_change(9, TimeMs(1000));
        let kinds: alloc::vec::Vec<_> =
            engine.active_frames().iter().map(|f| f.kind).collect();
        assert_eq!(kinds, alloc::vec![FrameKind::Disappearing, FrameKind::Swap]);
        engine.complete_active();
        assert_eq!(shown(&engine), "9");
    }
}
