// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated tap session that exercises the engine and diagnostics pipeline.
//!
//! Runs a scripted session — a few leisurely taps, a rapid burst across the
//! 9→10 boundary, then a run of decrements back across it — against a text
//! presenter, recording events to both a
//! [`PrettyPrintSink`](tumbler_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](tumbler_debug::recorder::RecorderSink), then exports a
//! Chrome trace JSON file and prints a pace report.

use std::fs::File;
use std::io::BufWriter;

use tumbler_core::backend::Presenter;
use tumbler_core::config::AnimationConfig;
use tumbler_core::engine::{Activation, CounterEngine};
use tumbler_core::frame::{Digit, DigitFrame, FrameKind};
use tumbler_core::queue::Completion;
use tumbler_core::schedule::FrameSchedule;
use tumbler_core::time::{DurationMs, TimeMs};
use tumbler_core::trace::{
    ActivateEvent, CompleteEvent, RequestEvent, SessionSummaryBuilder, TraceSink,
};

use tumbler_debug::pretty::PrettyPrintSink;
use tumbler_debug::recorder::RecorderSink;

use tumbler_pace_harness::{PaceTracker, TapSample};

const TRACE_FILE: &str = "counter_sim_trace.json";

/// Prints each applied descriptor sequence as a row of digit slots.
struct TextPresenter;

impl Presenter for TextPresenter {
    fn apply(&mut self, frames: &[DigitFrame], speed: f32) {
        let mut row = String::new();
        for frame in frames {
            let shown = frame.current.map_or('·', Digit::as_char);
            match frame.kind {
                FrameKind::Static => row.push_str(&format!("[{shown}]")),
                FrameKind::Swap => {
                    let prev = frame.previous.map_or('·', Digit::as_char);
                    row.push_str(&format!("[{prev}>{shown}]"));
                }
                FrameKind::Appearing => row.push_str(&format!("[+{shown}]")),
                FrameKind::Disappearing => {
                    let prev = frame.previous.map_or('·', Digit::as_char);
                    row.push_str(&format!("[-{prev}]"));
                }
            }
        }
        println!("display {row} speed={speed:.2}");
    }
}

/// Scripted tap times and target values.
fn build_script() -> Vec<(TimeMs, u64)> {
    let mut taps = Vec::new();
    let mut value = 0_u64;
    let mut at = 1_000_u64;

    // Leisurely warm-up: each tap lands after the previous animation is long
    // done, so the queue never deepens.
    for _ in 0..5 {
        value += 1;
        taps.push((TimeMs(at), value));
        at += 600;
    }

    // Rapid burst across the 9→10 boundary; the estimator should push the
    // speed factor to its ceiling and the queue should absorb the backlog.
    for _ in 0..12 {
        value += 1;
        taps.push((TimeMs(at), value));
        at += 100;
    }

    // Decrement run back across 10→9.
    at += 800;
    for _ in 0..9 {
        value -= 1;
        taps.push((TimeMs(at), value));
        at += 150;
    }

    taps
}

fn primary_schedule(frames: &[DigitFrame], config: &AnimationConfig, speed: f32) -> FrameSchedule {
    frames
        .iter()
        .find(|f| f.is_primary())
        .map_or(FrameSchedule::IDLE, |f| {
            FrameSchedule::for_frame(f, config, speed)
        })
}

fn main() {
    let config = AnimationConfig::standard();
    let mut engine = CounterEngine::new(0);
    let mut presenter = TextPresenter;

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();
    let mut summary = SessionSummaryBuilder::new();
    let mut tracker = PaceTracker::<16>::new(600.0);

    let mut transition_ordinal = 0_u64;
    let mut completion_due: Option<TimeMs> = None;
    let mut last_tap: Option<TimeMs> = None;

    let taps = build_script();

    for (at, value) in taps {
        // Drain every completion that falls before this tap.
        while let Some(due) = completion_due {
            if due > at {
                break;
            }
            completion_due = drain_one(
                &mut engine,
                &mut presenter,
                &config,
                due,
                &mut transition_ordinal,
                &mut pretty,
                &mut recorder,
                &mut summary,
            );
        }

        let interval = last_tap.map_or(DurationMs(600), |prev| at - prev);
        last_tap = Some(at);

        match engine.request_change(value, at) {
            Activation::Ignored => summary.ignored(),
            activation => {
                let event = RequestEvent {
                    value,
                    at,
                    speed: engine.last_requested().map_or(1.0, |t| t.speed),
                    queue_depth: engine.pending() as u64,
                };
                pretty.on_request(&event);
                recorder.on_request(&event);
                summary.request(&event);

                if activation == Activation::Started {
                    emit_activation(
                        &engine,
                        &mut presenter,
                        at,
                        &mut transition_ordinal,
                        &mut pretty,
                        &mut recorder,
                    );
                    let schedule =
                        primary_schedule(engine.active_frames(), &config, engine.speed_factor());
                    completion_due = at.checked_add(schedule.primary_completion());
                }
            }
        }

        let schedule = primary_schedule(engine.active_frames(), &config, engine.speed_factor());
        let report = tracker.observe(TapSample {
            interval,
            speed: engine.speed_factor(),
            queue_depth: engine.pending() as u64,
            effective_translate: schedule.translate,
        });
        println!(
            "pace grade={} keepup={:.2} high_water={}",
            report.grade.as_str(),
            report.keepup_ratio,
            report.backlog_high_water,
        );
    }

    // Drain the backlog.
    while let Some(due) = completion_due {
        completion_due = drain_one(
            &mut engine,
            &mut presenter,
            &config,
            due,
            &mut transition_ordinal,
            &mut pretty,
            &mut recorder,
            &mut summary,
        );
    }

    let session = summary.finish();
    pretty.on_session_summary(&session);
    recorder.on_session_summary(&session);
    println!("cadence {}", tracker.sparkline_ascii(100.0, 600.0));

    // -- chrome trace export ----------------------------------------------
    let file = File::create(TRACE_FILE).expect("create trace file");
    let mut writer = BufWriter::new(file);
    tumbler_debug::chrome::export(recorder.as_bytes(), &mut writer).expect("export trace");
    println!("wrote {TRACE_FILE}");
}

/// Completes the active transition at `clock`, emits events, and returns the
/// next completion deadline if another transition activated.
fn drain_one(
    engine: &mut CounterEngine,
    presenter: &mut TextPresenter,
    config: &AnimationConfig,
    clock: TimeMs,
    transition_ordinal: &mut u64,
    pretty: &mut PrettyPrintSink,
    recorder: &mut RecorderSink,
    summary: &mut SessionSummaryBuilder,
) -> Option<TimeMs> {
    let outcome = engine.complete_active();
    if outcome == Completion::Ignored {
        return None;
    }
    summary.completed();

    let event = CompleteEvent {
        value: engine.active().map_or(engine.value(), |t| t.from),
        remaining: engine.pending() as u64,
        at: clock,
    };
    pretty.on_complete(&event);
    recorder.on_complete(&event);

    match outcome {
        Completion::Activated(_) => {
            emit_activation(engine, presenter, clock, transition_ordinal, pretty, recorder);
            let schedule = primary_schedule(engine.active_frames(), config, engine.speed_factor());
            clock.checked_add(schedule.primary_completion())
        }
        _ => {
            // Settled: show the idle rendering.
            presenter.apply(engine.active_frames(), engine.speed_factor());
            None
        }
    }
}

fn emit_activation(
    engine: &CounterEngine,
    presenter: &mut TextPresenter,
    at: TimeMs,
    transition_ordinal: &mut u64,
    pretty: &mut PrettyPrintSink,
    recorder: &mut RecorderSink,
) {
    let Some(active) = engine.active() else {
        return;
    };
    let event = ActivateEvent {
        from: active.from,
        to: active.to,
        speed: active.speed,
        frame_count: engine.active_frames().len() as u64,
        at,
    };
    pretty.on_activate(&event);
    recorder.on_activate(&event);
    pretty.on_frame_details(*transition_ordinal, engine.active_frames());
    recorder.on_frame_details(*transition_ordinal, engine.active_frames());
    *transition_ordinal += 1;

    presenter.apply(engine.active_frames(), engine.speed_factor());
}
