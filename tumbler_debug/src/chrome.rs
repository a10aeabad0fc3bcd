// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes
//! [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Activations open a duration span that the matching completion closes, so
//! back-to-back transitions render as a lane of abutting blocks.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted from engine milliseconds to trace microseconds.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Request(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Request",
                    "cat": "Engine",
                    "ts": ms_to_us(e.at.millis()),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "value": e.value,
                        "speed": e.speed,
                        "queue_depth": e.queue_depth,
                    }
                }));
            }
            RecordedEvent::Activate(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Transition",
                    "cat": "Engine",
                    "ts": ms_to_us(e.at.millis()),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "from": e.from,
                        "to": e.to,
                        "speed": e.speed,
                        "frame_count": e.frame_count,
                    }
                }));
            }
            RecordedEvent::Complete(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Transition",
                    "cat": "Engine",
                    "ts": ms_to_us(e.at.millis()),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "value": e.value,
                        "remaining": e.remaining,
                    }
                }));
            }
            RecordedEvent::Reset(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Reset",
                    "cat": "Engine",
                    "ts": ms_to_us(e.at.millis()),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "dropped": e.dropped,
                    }
                }));
            }
            RecordedEvent::SessionSummary(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "SessionSummary",
                    "cat": "Engine",
                    "ts": 0,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "requests": s.requests,
                        "ignored": s.ignored,
                        "completed": s.completed,
                        "peak_queue_depth": s.peak_queue_depth,
                        "max_speed": s.max_speed,
                    }
                }));
            }
            RecordedEvent::FrameDetailsCount {
                transition_index,
                count,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Plan",
                    "cat": "Planner",
                    "ts": 0,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "transition_index": transition_index,
                        "frame_count": count,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(&mut *writer, &events)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writer.flush()
}

const fn ms_to_us(ms: u64) -> u64 {
    ms * 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use tumbler_core::time::TimeMs;
    use tumbler_core::trace::{ActivateEvent, CompleteEvent, TraceSink};

    #[test]
    fn export_produces_valid_span_json() {
        let mut recorder = RecorderSink::new();
        recorder.on_activate(&ActivateEvent {
            from: 0,
            to: 1,
            speed: 1.0,
            frame_count: 1,
            at: TimeMs(100),
        });
        recorder.on_complete(&CompleteEvent {
            value: 1,
            remaining: 0,
            at: TimeMs(500),
        });

        let mut out = Vec::new();
        export(recorder.as_bytes(), &mut out).unwrap();

        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["ts"], 100_000);
        assert_eq!(parsed[1]["ph"], "E");
        assert_eq!(parsed[1]["ts"], 500_000);
        assert_eq!(parsed[0]["args"]["to"], 1);
    }

    #[test]
    fn export_of_empty_recording_is_an_empty_array() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
