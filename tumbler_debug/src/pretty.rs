// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use tumbler_core::frame::{Digit, DigitFrame, FrameKind};
use tumbler_core::trace::{
    ActivateEvent, CompleteEvent, RequestEvent, ResetEvent, SessionSummary, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn digit_or_dash(digit: Option<Digit>) -> char {
    digit.map_or('-', Digit::as_char)
}

fn kind_name(kind: FrameKind) -> &'static str {
    match kind {
        FrameKind::Swap => "swap",
        FrameKind::Appearing => "appear",
        FrameKind::Disappearing => "vanish",
        FrameKind::Static => "static",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_request(&mut self, e: &RequestEvent) {
        let _ = writeln!(
            self.writer,
            "[request] value={} at={}ms speed={:.2} depth={}",
            e.value,
            e.at.millis(),
            e.speed,
            e.queue_depth,
        );
    }

    fn on_activate(&mut self, e: &ActivateEvent) {
        let _ = writeln!(
            self.writer,
            "[activate] {}→{} speed={:.2} frames={} at={}ms",
            e.from,
            e.to,
            e.speed,
            e.frame_count,
            e.at.millis(),
        );
    }

    fn on_complete(&mut self, e: &CompleteEvent) {
        let _ = writeln!(
            self.writer,
            "[complete] value={} remaining={} at={}ms",
            e.value,
            e.remaining,
            e.at.millis(),
        );
    }

    fn on_reset(&mut self, e: &ResetEvent) {
        let _ = writeln!(
            self.writer,
            "[reset] dropped={} at={}ms",
            e.dropped,
            e.at.millis(),
        );
    }

    fn on_session_summary(&mut self, s: &SessionSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] requests={} ignored={} completed={} peak_depth={} max_speed={:.2}",
            s.requests, s.ignored, s.completed, s.peak_queue_depth, s.max_speed,
        );
    }

    fn on_frame_details(&mut self, transition_index: u64, frames: &[DigitFrame]) {
        let _ = writeln!(
            self.writer,
            "[frames] transition={transition_index} count={}",
            frames.len()
        );
        for frame in frames {
            let _ = writeln!(
                self.writer,
                "  {} {}→{} order={}",
                kind_name(frame.kind),
                digit_or_dash(frame.previous),
                digit_or_dash(frame.current),
                frame.stagger_order,
            );
        }
    }
}
