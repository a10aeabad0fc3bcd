// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the engine lifecycle.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! session instrumentation calls at each stage. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! [`SessionSummaryBuilder`] is a convenience helper that tallies a session's
//! requests and transitions and produces a [`SessionSummary`] at the end.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates the per-digit
//!   [`frame_details`](Tracer::frame_details) event and the corresponding
//!   `TraceSink` method.

use crate::time::TimeMs;

#[cfg(feature = "trace-rich")]
use crate::frame::DigitFrame;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the caller requests a value change.
#[derive(Clone, Copy, Debug)]
pub struct RequestEvent {
    /// The requested target value.
    pub value: u64,
    /// When the request arrived.
    pub at: TimeMs,
    /// Speed factor recorded for this request.
    pub speed: f32,
    /// Queue depth after enqueuing, including the active transition.
    pub queue_depth: u64,
}

/// Emitted when a transition becomes active and is handed to the surface.
#[derive(Clone, Copy, Debug)]
pub struct ActivateEvent {
    /// The value the display is leaving.
    pub from: u64,
    /// The value the display is heading to.
    pub to: u64,
    /// Speed factor the transition plays at.
    pub speed: f32,
    /// Number of digit frames planned.
    pub frame_count: u64,
    /// When activation happened, per the caller's clock.
    pub at: TimeMs,
}

/// Emitted when the render surface reports the primary frame finished.
#[derive(Clone, Copy, Debug)]
pub struct CompleteEvent {
    /// The value now settled (or next in flight).
    pub value: u64,
    /// Transitions still queued after dequeuing, including any new head.
    pub remaining: u64,
    /// When the signal arrived, per the caller's clock.
    pub at: TimeMs,
}

/// Emitted on session teardown.
#[derive(Clone, Copy, Debug)]
pub struct ResetEvent {
    /// Transitions dropped from the queue, including any active one.
    pub dropped: u64,
    /// When teardown happened, per the caller's clock.
    pub at: TimeMs,
}

/// Whole-session tally produced by [`SessionSummaryBuilder`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionSummary {
    /// Requests accepted (started or queued).
    pub requests: u64,
    /// Requests ignored (target already pending).
    pub ignored: u64,
    /// Transitions that completed.
    pub completed: u64,
    /// Deepest the queue ever got.
    pub peak_queue_depth: u64,
    /// Fastest speed factor any transition played at.
    pub max_speed: f32,
}

/// Collects [`SessionSummary`] tallies as events flow through a session.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionSummaryBuilder {
    summary: SessionSummary,
}

impl SessionSummaryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies an accepted request.
    pub fn request(&mut self, e: &RequestEvent) {
        self.summary.requests += 1;
        if e.queue_depth > self.summary.peak_queue_depth {
            self.summary.peak_queue_depth = e.queue_depth;
        }
        if e.speed > self.summary.max_speed {
            self.summary.max_speed = e.speed;
        }
    }

    /// Tallies an ignored request.
    pub fn ignored(&mut self) {
        self.summary.ignored += 1;
    }

    /// Tallies a completed transition.
    pub fn completed(&mut self) {
        self.summary.completed += 1;
    }

    /// Returns the finished summary.
    #[must_use]
    pub fn finish(self) -> SessionSummary {
        self.summary
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from an engine session.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a value change is requested.
    fn on_request(&mut self, e: &RequestEvent) {
        _ = e;
    }

    /// Called when a transition becomes active.
    fn on_activate(&mut self, e: &ActivateEvent) {
        _ = e;
    }

    /// Called when a completion signal retires the active transition.
    fn on_complete(&mut self, e: &CompleteEvent) {
        _ = e;
    }

    /// Called on session teardown.
    fn on_reset(&mut self, e: &ResetEvent) {
        _ = e;
    }

    /// Called with a whole-session tally.
    fn on_session_summary(&mut self, s: &SessionSummary) {
        _ = s;
    }

    /// Called with the planned digit frames of a newly-activated transition
    /// (requires the `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_frame_details(&mut self, transition_index: u64, frames: &[DigitFrame]) {
        _ = (transition_index, frames);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RequestEvent`].
    #[inline]
    pub fn request(&mut self, e: &RequestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_request(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ActivateEvent`].
    #[inline]
    pub fn activate(&mut self, e: &ActivateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_activate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CompleteEvent`].
    #[inline]
    pub fn complete(&mut self, e: &CompleteEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_complete(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResetEvent`].
    #[inline]
    pub fn reset(&mut self, e: &ResetEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reset(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SessionSummary`].
    #[inline]
    pub fn session_summary(&mut self, s: &SessionSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_session_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits planned frame details (requires the `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn frame_details(&mut self, transition_index: u64, frames: &[DigitFrame]) {
        if let Some(s) = &mut self.sink {
            s.on_frame_details(transition_index, frames);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "trace")]
    #[derive(Default)]
    struct CountingSink {
        requests: u32,
        activations: u32,
        completions: u32,
        resets: u32,
        summaries: u32,
    }

    #[cfg(feature = "trace")]
    impl TraceSink for CountingSink {
        fn on_request(&mut self, _e: &RequestEvent) {
            self.requests += 1;
        }
        fn on_activate(&mut self, _e: &ActivateEvent) {
            self.activations += 1;
        }
        fn on_complete(&mut self, _e: &CompleteEvent) {
            self.completions += 1;
        }
        fn on_reset(&mut self, _e: &ResetEvent) {
            self.resets += 1;
        }
        fn on_session_summary(&mut self, _s: &SessionSummary) {
            self.summaries += 1;
        }
    }

    #[test]
    #[cfg(feature = "trace")]
    fn tracer_dispatches_to_sink() {
        let mut sink = CountingSink::default();
        let mut tracer = Tracer::new(&mut sink);
        tracer.request(&RequestEvent {
            value: 1,
            at: TimeMs(0),
            speed: 1.0,
            queue_depth: 1,
        });
        tracer.activate(&ActivateEvent {
            from: 0,
            to: 1,
            speed: 1.0,
            frame_count: 1,
            at: TimeMs(0),
        });
        tracer.complete(&CompleteEvent {
            value: 1,
            remaining: 0,
            at: TimeMs(400),
        });
        tracer.reset(&ResetEvent {
            dropped: 0,
            at: TimeMs(500),
        });
        tracer.session_summary(&SessionSummary::default());

        assert_eq!(sink.requests, 1);
        assert_eq!(sink.activations, 1);
        assert_eq!(sink.completions, 1);
        assert_eq!(sink.resets, 1);
        assert_eq!(sink.summaries, 1);
    }

    #[test]
    fn none_tracer_is_inert() {
        let mut tracer = Tracer::none();
        tracer.complete(&CompleteEvent {
            value: 0,
            remaining: 0,
            at: TimeMs(0),
        });
    }

    #[test]
    fn summary_builder_tallies() {
        let mut builder = SessionSummaryBuilder::new();
        builder.request(&RequestEvent {
            value: 1,
            at: TimeMs(0),
            speed: 1.0,
            queue_depth: 1,
        });
        builder.request(&RequestEvent {
            value: 2,
            at: TimeMs(100),
            speed: 2.5,
            queue_depth: 2,
        });
        builder.ignored();
        builder.completed();
        builder.completed();

        let summary = builder.finish();
        assert_eq!(summary.requests, 2);
        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.peak_queue_depth, 2);
        assert!((summary.max_speed - 2.5).abs() < 1e-6);
    }
}
