// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concrete per-frame timing.
//!
//! Descriptors carry only ranks and kinds; [`FrameSchedule`] resolves them
//! against an [`AnimationConfig`] and a speed factor into the delays and
//! durations a render surface actually runs. Keeping this separate lets one
//! descriptor sequence replay at any speed.
//!
//! Rules:
//!
//! - every duration is `base / speed`;
//! - delay is `stagger_order × stagger_interval / speed`, except
//!   [`Disappearing`](FrameKind::Disappearing) frames, which start at once
//!   regardless of rank (slots must begin leaving before the others shift);
//! - [`Static`](FrameKind::Static) frames schedule nothing at all.

use crate::config::AnimationConfig;
use crate::frame::{DigitFrame, FrameKind};
use crate::time::DurationMs;

/// Resolved timing for one frame at one speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSchedule {
    /// Wait before any property starts animating.
    pub delay: DurationMs,
    /// Effective cross-fade duration.
    pub opacity: DurationMs,
    /// Effective slide duration.
    pub translate: DurationMs,
    /// Effective slot width grow/shrink duration.
    pub width: DurationMs,
}

impl FrameSchedule {
    /// A schedule that runs nothing.
    pub const IDLE: Self = Self {
        delay: DurationMs::ZERO,
        opacity: DurationMs::ZERO,
        translate: DurationMs::ZERO,
        width: DurationMs::ZERO,
    };

    /// Resolves `frame` against `config` at the given speed factor.
    #[must_use]
    pub fn for_frame(frame: &DigitFrame, config: &AnimationConfig, speed: f32) -> Self {
        if frame.kind == FrameKind::Static {
            return Self::IDLE;
        }

        let delay = if frame.kind == FrameKind::Disappearing {
            DurationMs::ZERO
        } else {
            DurationMs(config.stagger_interval.millis() * u64::from(frame.stagger_order))
                .scaled_down(speed)
        };

        Self {
            delay,
            opacity: config.durations.opacity.scaled_down(speed),
            translate: config.durations.translate.scaled_down(speed),
            width: config.durations.width.scaled_down(speed),
        }
    }

    /// When a primary frame's completion signal is due, measured from the
    /// transition's start: the slide is the property completion is timed off.
    #[must_use]
    pub const fn primary_completion(&self) -> DurationMs {
        DurationMs(self.delay.millis() + self.translate.millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Digit, Direction, FrameId};

    fn digit(d: u8) -> Digit {
        Digit::new(d).unwrap()
    }

    #[test]
    fn swap_scales_delay_and_durations() {
        let config = AnimationConfig::standard();
        let frame = DigitFrame::swap(FrameId(0), digit(1), digit(2), Direction::Increasing, 2);

        let unit = FrameSchedule::for_frame(&frame, &config, 1.0);
        assert_eq!(unit.delay, DurationMs(140));
        assert_eq!(unit.translate, DurationMs(400));

        let doubled = FrameSchedule::for_frame(&frame, &config, 2.0);
        assert_eq!(doubled.delay, DurationMs(70));
        assert_eq!(doubled.opacity, DurationMs(150));
        assert_eq!(doubled.translate, DurationMs(200));
        assert_eq!(doubled.width, DurationMs(200));
    }

    #[test]
    fn disappearing_takes_no_delay() {
        let config = AnimationConfig::standard();
        let frame = DigitFrame::disappearing(FrameId(0), digit(1), Direction::Decreasing, 3);
        let schedule = FrameSchedule::for_frame(&frame, &config, 1.0);
        assert_eq!(schedule.delay, DurationMs::ZERO);
        assert_eq!(schedule.width, DurationMs(400));
    }

    #[test]
    fn static_schedules_nothing() {
        let config = AnimationConfig::standard();
        let frame = DigitFrame::still(FrameId(0), digit(4), 0);
        assert_eq!(FrameSchedule::for_frame(&frame, &config, 1.0), FrameSchedule::IDLE);
        assert_eq!(FrameSchedule::IDLE.primary_completion(), DurationMs::ZERO);
    }

    #[test]
    fn primary_completion_is_delay_plus_translate() {
        let config = AnimationConfig::fast();
        let frame = DigitFrame::swap(FrameId(0), digit(9), digit(0), Direction::Increasing, 1);
        let schedule = FrameSchedule::for_frame(&frame, &config, 1.0);
        assert_eq!(schedule.primary_completion(), DurationMs(70 + 200));
    }
}
