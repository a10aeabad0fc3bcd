// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Digit-transition planning and sequencing for animated counters.
//!
//! `tumbler_core` decides, per decimal digit position, what an animated
//! counter should visually do when its value changes: swap one digit for
//! another, grow a new slot, shrink a vanishing one, or hold still. It is
//! `no_std` compatible (with `alloc`) and emits plain-data descriptors, so
//! any render surface — native view tree, DOM, canvas, terminal — can
//! interpret them.
//!
//! # Architecture
//!
//! The crate is organized around a request/complete loop that serializes
//! value changes into one animation at a time:
//!
//! ```text
//!   Caller (tap handler)
//!       │ request_change(value, now)
//!       ▼
//!   SpeedEstimator ──► speed factor ──► TransitionQueue::enqueue()
//!                                            │ (head activates)
//!                                            ▼
//!   planner::plan() ──► [DigitFrame] ──► Presenter::apply()
//!                                            │
//!                            ┌───────────────┘
//!                            ▼
//!   primary frame finishes ──► complete_active() ──► next head (or idle)
//! ```
//!
//! **[`frame`]** — Per-digit [`DigitFrame`](frame::DigitFrame) descriptors
//! with opaque identity tokens for render continuity.
//!
//! **[`planner`]** — The digit diff algorithm: digit decomposition, the
//! general swap/appear/disappear rules, stagger ordering, and the 9↔10
//! boundary special cases.
//!
//! **[`queue`]** — FIFO transition sequencing with a single active head and
//! defensive completion handling.
//!
//! **[`speed`]** — Tap-cadence estimation mapping inter-request intervals to
//! a 1.0–2.5 speed factor.
//!
//! **[`config`]** — Explicit animation configuration: easing curves, base
//! durations, presets.
//!
//! **[`schedule`]** — Resolves descriptors + config + speed into concrete
//! delays and durations.
//!
//! **[`engine`]** — The [`CounterEngine`](engine::CounterEngine) facade one
//! counter session owns.
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) trait render
//! surfaces implement, and the descriptor-interpretation contract.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! session instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-digit
//!   frame-detail events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod engine;
pub mod frame;
pub mod planner;
pub mod queue;
pub mod schedule;
pub mod speed;
pub mod time;
pub mod trace;
