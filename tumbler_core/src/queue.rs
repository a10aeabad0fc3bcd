// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition sequencing.
//!
//! [`TransitionQueue`] serializes value-change requests so rapid input never
//! corrupts an in-flight animation. Transitions are strictly FIFO: a later
//! request can never overtake or merge with an earlier one, so every
//! intermediate value is shown even under a burst of taps.
//!
//! At most one transition is *active* at a time, and it is always the head.
//! Forward progress suspends until the render surface reports completion of
//! the active transition's primary frame; there is no timeout, because the
//! render surface is a trusted, co-located collaborator.

use alloc::collections::VecDeque;

use crate::time::TimeMs;

/// One requested value change, immutable once enqueued.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueTransition {
    /// The value the display is leaving.
    pub from: u64,
    /// The value the display is heading to.
    pub to: u64,
    /// Speed factor recorded at request time (1.0–2.5).
    pub speed: f32,
    /// When the request arrived.
    pub requested_at: TimeMs,
}

/// Outcome of [`TransitionQueue::complete_active`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Completion {
    /// The head finished and a pending transition became the new active head.
    Activated(ValueTransition),
    /// The head finished and the queue is now empty; the engine is idle.
    Drained,
    /// There was no active transition. Completion signals that arrive after a
    /// [`reset`](TransitionQueue::reset), or duplicates, land here harmlessly.
    Ignored,
}

/// FIFO queue of pending transitions with a single active head.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    entries: VecDeque<ValueTransition>,
    animating: bool,
}

impl TransitionQueue {
    /// Creates an empty, idle queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transition at the tail.
    ///
    /// If the queue was idle, the new transition becomes active immediately
    /// and `true` is returned; the caller must emit it for rendering. This
    /// always succeeds.
    pub fn enqueue(&mut self, transition: ValueTransition) -> bool {
        self.entries.push_back(transition);
        if self.animating {
            false
        } else {
            self.animating = true;
            true
        }
    }

    /// Retires the active transition in response to the render surface's
    /// completion signal.
    ///
    /// Exactly one signal is expected per active transition. A signal with no
    /// active transition — after [`reset`](Self::reset), or a stray
    /// duplicate — returns [`Completion::Ignored`] and mutates nothing.
    pub fn complete_active(&mut self) -> Completion {
        if !self.animating || self.entries.is_empty() {
            return Completion::Ignored;
        }
        self.entries.pop_front();
        match self.entries.front() {
            Some(next) => Completion::Activated(*next),
            None => {
                self.animating = false;
                Completion::Drained
            }
        }
    }

    /// Returns the active transition, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ValueTransition> {
        if self.animating { self.entries.front() } else { None }
    }

    /// Returns the most recently enqueued transition, if any.
    #[must_use]
    pub fn tail(&self) -> Option<&ValueTransition> {
        self.entries.back()
    }

    /// Number of transitions still queued, including the active one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is queued or animating.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all entries; used on screen teardown.
    ///
    /// No partial-completion side effects fire afterwards — late completion
    /// signals from animations that were mid-flight are ignored.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.animating = false;
    }
}
