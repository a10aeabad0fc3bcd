// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-surface contract.
//!
//! Tumbler emits declarative [`DigitFrame`] descriptors; a *render surface*
//! (native view tree, DOM, canvas, terminal) interprets them. The engine
//! never polls the surface and the surface never inspects engine internals —
//! the whole boundary is the [`Presenter`] trait plus one completion signal
//! back into [`CounterEngine::complete_active`].
//!
//! # Interpreting frames
//!
//! For each frame, keyed by its [`id`](DigitFrame::id) for continuity across
//! re-renders, with timing from
//! [`FrameSchedule`](crate::schedule::FrameSchedule):
//!
//! - [`Static`](crate::frame::FrameKind::Static) — show `current` with no
//!   transition.
//! - [`Swap`](crate::frame::FrameKind::Swap) — cross-fade/slide `previous`
//!   out and `current` in. `direction` picks the slide sense: increasing
//!   digits move as if counting up, decreasing as if counting down. Starts
//!   after the frame's scheduled delay.
//! - [`Appearing`](crate::frame::FrameKind::Appearing) — grow the slot from
//!   zero width while sliding `current` in, after the scheduled delay.
//! - [`Disappearing`](crate::frame::FrameKind::Disappearing) — shrink the
//!   slot to zero width while sliding `previous` out, with no delay.
//!
//! # Completion
//!
//! The surface must call [`CounterEngine::complete_active`] **exactly once**
//! per applied transition, when the frame with `stagger_order == 0` finishes
//! its transition — or immediately (synchronously is fine) if that frame is
//! `Static` and has nothing to run. Duplicate or late signals are tolerated
//! and ignored, but they are a surface bug, not a feature.
//!
//! # Session loop pseudocode
//!
//! ```rust,ignore
//! fn on_tap(engine: &mut CounterEngine, surface: &mut impl Presenter, value: u64) {
//!     if engine.request_change(value, now()) == Activation::Started {
//!         surface.apply(engine.active_frames(), engine.speed_factor());
//!     }
//! }
//!
//! fn on_primary_frame_done(engine: &mut CounterEngine, surface: &mut impl Presenter) {
//!     if engine.complete_active() != Completion::Ignored {
//!         surface.apply(engine.active_frames(), engine.speed_factor());
//!     }
//! }
//! ```
//!
//! [`CounterEngine::complete_active`]: crate::engine::CounterEngine::complete_active
//! [`DigitFrame`]: crate::frame::DigitFrame

use crate::frame::DigitFrame;

/// Applies an emitted descriptor sequence to a concrete display.
///
/// Implementations receive the full ordered sequence (most-significant digit
/// first) each time a transition activates or the engine settles to idle.
pub trait Presenter {
    /// Applies `frames` at the given speed factor.
    fn apply(&mut self, frames: &[DigitFrame], speed: f32);
}
