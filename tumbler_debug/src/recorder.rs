// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! The rich event ([`on_frame_details`](TraceSink::on_frame_details)) stores
//! only the frame count.

use tumbler_core::frame::DigitFrame;
use tumbler_core::time::TimeMs;
use tumbler_core::trace::{
    ActivateEvent, CompleteEvent, RequestEvent, ResetEvent, SessionSummary, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_REQUEST: u8 = 1;
const TAG_ACTIVATE: u8 = 2;
const TAG_COMPLETE: u8 = 3;
const TAG_RESET: u8 = 4;
const TAG_SESSION_SUMMARY: u8 = 5;
const TAG_FRAME_DETAILS_COUNT: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_bits().to_le_bytes());
    }
}

impl TraceSink for RecorderSink {
    fn on_request(&mut self, e: &RequestEvent) {
        self.write_u8(TAG_REQUEST);
        self.write_u64(e.value);
        self.write_u64(e.at.millis());
        self.write_f32(e.speed);
        self.write_u64(e.queue_depth);
    }

    fn on_activate(&mut self, e: &ActivateEvent) {
        self.write_u8(TAG_ACTIVATE);
        self.write_u64(e.from);
        self.write_u64(e.to);
        self.write_f32(e.speed);
        self.write_u64(e.frame_count);
        self.write_u64(e.at.millis());
    }

    fn on_complete(&mut self, e: &CompleteEvent) {
        self.write_u8(TAG_COMPLETE);
        self.write_u64(e.value);
        self.write_u64(e.remaining);
        self.write_u64(e.at.millis());
    }

    fn on_reset(&mut self, e: &ResetEvent) {
        self.write_u8(TAG_RESET);
        self.write_u64(e.dropped);
        self.write_u64(e.at.millis());
    }

    fn on_session_summary(&mut self, s: &SessionSummary) {
        self.write_u8(TAG_SESSION_SUMMARY);
        self.write_u64(s.requests);
        self.write_u64(s.ignored);
        self.write_u64(s.completed);
        self.write_u64(s.peak_queue_depth);
        self.write_f32(s.max_speed);
    }

    fn on_frame_details(&mut self, transition_index: u64, frames: &[DigitFrame]) {
        self.write_u8(TAG_FRAME_DETAILS_COUNT);
        self.write_u64(transition_index);
        self.write_u64(frames.len() as u64);
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A decoded trace record.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A value-change request.
    Request(RequestEvent),
    /// A transition activation.
    Activate(ActivateEvent),
    /// A completion signal.
    Complete(CompleteEvent),
    /// A session teardown.
    Reset(ResetEvent),
    /// A whole-session tally.
    SessionSummary(SessionSummary),
    /// Frame-detail record (count only).
    FrameDetailsCount {
        /// Which transition the frames belonged to.
        transition_index: u64,
        /// How many digit frames were planned.
        count: u64,
    },
}

/// Decodes recorded bytes back into events.
///
/// Stops at the first malformed or truncated record.
pub fn decode(bytes: &[u8]) -> impl Iterator<Item = RecordedEvent> + '_ {
    Decoder { bytes, pos: 0 }
}

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Decoder<'_> {
    fn read_u8(&mut self) -> Option<u8> {
        let v = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        let end = self.pos.checked_add(8)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(u64::from_le_bytes(slice.try_into().ok()?))
    }

    fn read_f32(&mut self) -> Option<f32> {
        let end = self.pos.checked_add(4)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(f32::from_bits(u32::from_le_bytes(slice.try_into().ok()?)))
    }
}

impl Iterator for Decoder<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<RecordedEvent> {
        match self.read_u8()? {
            TAG_REQUEST => Some(RecordedEvent::Request(RequestEvent {
                value: self.read_u64()?,
                at: TimeMs(self.read_u64()?),
                speed: self.read_f32()?,
                queue_depth: self.read_u64()?,
            })),
            TAG_ACTIVATE => Some(RecordedEvent::Activate(ActivateEvent {
                from: self.read_u64()?,
                to: self.read_u64()?,
                speed: self.read_f32()?,
                frame_count: self.read_u64()?,
                at: TimeMs(self.read_u64()?),
            })),
            TAG_COMPLETE => Some(RecordedEvent::Complete(CompleteEvent {
                value: self.read_u64()?,
                remaining: self.read_u64()?,
                at: TimeMs(self.read_u64()?),
            })),
            TAG_RESET => Some(RecordedEvent::Reset(ResetEvent {
                dropped: self.read_u64()?,
                at: TimeMs(self.read_u64()?),
            })),
            TAG_SESSION_SUMMARY => Some(RecordedEvent::SessionSummary(SessionSummary {
                requests: self.read_u64()?,
                ignored: self.read_u64()?,
                completed: self.read_u64()?,
                peak_queue_depth: self.read_u64()?,
                max_speed: self.read_f32()?,
            })),
            TAG_FRAME_DETAILS_COUNT => Some(RecordedEvent::FrameDetailsCount {
                transition_index: self.read_u64()?,
                count: self.read_u64()?,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_all_event_kinds() {
        let mut recorder = RecorderSink::new();
        recorder.on_request(&RequestEvent {
            value: 10,
            at: TimeMs(1234),
            speed: 2.5,
            queue_depth: 3,
        });
        recorder.on_activate(&ActivateEvent {
            from: 9,
            to: 10,
            speed: 2.5,
            frame_count: 2,
            at: TimeMs(1234),
        });
        recorder.on_complete(&CompleteEvent {
            value: 10,
            remaining: 2,
            at: TimeMs(1500),
        });
        recorder.on_reset(&ResetEvent {
            dropped: 2,
            at: TimeMs(1600),
        });
        recorder.on_session_summary(&SessionSummary {
            requests: 4,
            ignored: 1,
            completed: 3,
            peak_queue_depth: 3,
            max_speed: 2.5,
        });

        let events: Vec<_> = decode(recorder.as_bytes()).collect();
        assert_eq!(events.len(), 5);

        match &events[0] {
            RecordedEvent::Request(e) => {
                assert_eq!(e.value, 10);
                assert_eq!(e.at, TimeMs(1234));
                assert!((e.speed - 2.5).abs() < 1e-6);
                assert_eq!(e.queue_depth, 3);
            }
            other => panic!("expected Request, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::Activate(e) => {
                assert_eq!((e.from, e.to), (9, 10));
                assert_eq!(e.frame_count, 2);
            }
            other => panic!("expected Activate, got {other:?}"),
        }
        match &events[2] {
            RecordedEvent::Complete(e) => assert_eq!(e.remaining, 2),
            other => panic!("expected Complete, got {other:?}"),
        }
        match &events[3] {
            RecordedEvent::Reset(e) => assert_eq!(e.dropped, 2),
            other => panic!("expected Reset, got {other:?}"),
        }
        match &events[4] {
            RecordedEvent::SessionSummary(s) => assert_eq!(s.completed, 3),
            other => panic!("expected SessionSummary, got {other:?}"),
        }
    }

    #[test]
    fn frame_details_stores_count_only() {
        use tumbler_core::planner::{FrameIds, plan};

        let mut recorder = RecorderSink::new();
        let mut ids = FrameIds::new();
        let frames = plan(9, 10, &mut ids);
        recorder.on_frame_details(7, &frames);

        let events: Vec<_> = decode(recorder.as_bytes()).collect();
        match &events[0] {
            RecordedEvent::FrameDetailsCount {
                transition_index,
                count,
            } => {
                assert_eq!(*transition_index, 7);
                assert_eq!(*count, 2);
            }
            other => panic!("expected FrameDetailsCount, got {other:?}"),
        }
    }

    #[test]
    fn truncated_input_stops_cleanly() {
        let mut recorder = RecorderSink::new();
        recorder.on_complete(&CompleteEvent {
            value: 1,
            remaining: 0,
            at: TimeMs(100),
        });
        let bytes = recorder.as_bytes();
        // Chop the record mid-field.
        let events: Vec<_> = decode(&bytes[..bytes.len() - 3]).collect();
        assert!(events.is_empty());
    }
}
