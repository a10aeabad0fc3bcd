// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation configuration.
//!
//! [`AnimationConfig`] is an explicit value passed to the render surface —
//! never shared mutable global state. Preset constructors cover the stock
//! motion feels; callers are free to build their own.
//!
//! [`Easing`] describes the acceleration curve declaratively and can also
//! [evaluate](Easing::eval) it, so render surfaces without a native easing
//! engine (and tests) can sample the curve directly.

use kurbo::{CubicBez, ParamCurve, Point};

use crate::time::DurationMs;

/// An acceleration curve for digit motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// A CSS-style cubic bézier from (0,0) to (1,1) with the given control
    /// points. `x1`/`x2` must lie in `0..=1` for the curve to be a function
    /// of time.
    CubicBezier {
        /// First control point, x.
        x1: f64,
        /// First control point, y.
        y1: f64,
        /// Second control point, x.
        x2: f64,
        /// Second control point, y.
        y2: f64,
    },
    /// Bouncing settle at the end of the motion.
    BounceOut,
    /// Springy overshoot settling at the end of the motion.
    ElasticOut,
}

impl Easing {
    /// The stock curve used by the standard presets.
    pub const STANDARD: Self = Self::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    /// Evaluates the curve at `t` in `0..=1`.
    ///
    /// Inputs outside the unit interval are clamped. Bézier evaluation
    /// solves the x-coordinate by bisection (x is monotonic for in-range
    /// control points), then reads off y.
    #[must_use]
    pub fn eval(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::CubicBezier { x1, y1, x2, y2 } => {
                let curve = CubicBez::new(
                    Point::new(0.0, 0.0),
                    Point::new(x1, y1),
                    Point::new(x2, y2),
                    Point::new(1.0, 1.0),
                );
                let x = f64::from(t);
                let mut lo = 0.0_f64;
                let mut hi = 1.0_f64;
                // 32 halvings put the parameter well below f32 resolution.
                for _ in 0..32 {
                    let mid = (lo + hi) / 2.0;
                    if curve.eval(mid).x < x {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "easing outputs are order-1 values"
                )]
                let y = curve.eval((lo + hi) / 2.0).y as f32;
                y
            }
            Self::BounceOut => bounce_out(t),
            Self::ElasticOut => elastic_out(t),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984_375
    }
}

fn elastic_out(t: f32) -> f32 {
    const C4: f32 = core::f32::consts::TAU / 3.0;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        libm::powf(2.0, -10.0 * t) * libm::sinf((t * 10.0 - 0.75) * C4) + 1.0
    }
}

/// Base durations for the three animated properties, before speed scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseDurations {
    /// Cross-fade duration.
    pub opacity: DurationMs,
    /// Slide duration. Primary-frame completion is timed off this.
    pub translate: DurationMs,
    /// Slot width grow/shrink duration (appearing/disappearing frames).
    pub width: DurationMs,
}

/// Configuration handed to the render surface alongside frame descriptors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Acceleration curve for all animated properties.
    pub easing: Easing,
    /// Base durations, scaled down by the speed factor at render time.
    pub durations: BaseDurations,
    /// Per-stagger-rank delay, scaled down by the speed factor.
    pub stagger_interval: DurationMs,
    /// How far digits slide in, in render-surface units.
    pub slide_distance: f32,
    /// Width of one digit slot, in render-surface units.
    pub digit_width: f32,
}

impl AnimationConfig {
    /// The stock motion feel.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            easing: Easing::STANDARD,
            durations: BaseDurations {
                opacity: DurationMs(300),
                translate: DurationMs(400),
                width: DurationMs(400),
            },
            stagger_interval: DurationMs(70),
            slide_distance: 120.0,
            digit_width: 72.0,
        }
    }

    /// Bouncing settle; slower slide to leave room for the bounces.
    #[must_use]
    pub const fn bounce() -> Self {
        Self {
            easing: Easing::BounceOut,
            durations: BaseDurations {
                opacity: DurationMs(300),
                translate: DurationMs(600),
                width: DurationMs(400),
            },
            stagger_interval: DurationMs(70),
            slide_distance: 120.0,
            digit_width: 72.0,
        }
    }

    /// Springy overshoot; the slowest slide of the presets.
    #[must_use]
    pub const fn elastic() -> Self {
        Self {
            easing: Easing::ElasticOut,
            durations: BaseDurations {
                opacity: DurationMs(300),
                translate: DurationMs(800),
                width: DurationMs(400),
            },
            stagger_interval: DurationMs(70),
            slide_distance: 120.0,
            digit_width: 72.0,
        }
    }

    /// Deliberate, leisurely motion.
    #[must_use]
    pub const fn slow() -> Self {
        Self {
            easing: Easing::STANDARD,
            durations: BaseDurations {
                opacity: DurationMs(600),
                translate: DurationMs(800),
                width: DurationMs(800),
            },
            stagger_interval: DurationMs(70),
            slide_distance: 120.0,
            digit_width: 72.0,
        }
    }

    /// Snappy motion for dense interactions.
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            easing: Easing::STANDARD,
            durations: BaseDurations {
                opacity: DurationMs(150),
                translate: DurationMs(200),
                width: DurationMs(200),
            },
            stagger_interval: DurationMs(70),
            slide_distance: 120.0,
            digit_width: 72.0,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for easing in [Easing::STANDARD, Easing::BounceOut, Easing::ElasticOut] {
            assert!(easing.eval(0.0).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.eval(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn easing_clamps_out_of_range_input() {
        assert_eq!(Easing::BounceOut.eval(-0.5), 0.0);
        assert_eq!(Easing::BounceOut.eval(1.5), 1.0);
    }

    #[test]
    fn standard_bezier_is_increasing_and_eases_in_fast() {
        let e = Easing::STANDARD;
        let mut prev = 0.0;
        for i in 1..=10 {
            let y = e.eval(i as f32 / 10.0);
            assert!(y >= prev, "standard easing must be monotone");
            prev = y;
        }
        // The stock curve front-loads most of its motion.
        let mid = e.eval(0.5);
        assert!((0.6..1.0).contains(&mid), "midpoint {mid} out of range");
    }

    #[test]
    fn bounce_dips_before_settling() {
        // Between the last two bounces the curve sits below 1.
        let v = Easing::BounceOut.eval(0.8);
        assert!(v < 1.0, "bounce at 0.8 should be mid-bounce, got {v}");
    }

    #[test]
    fn elastic_overshoots_before_settling() {
        let mut overshot = false;
        for i in 1..20 {
            if Easing::ElasticOut.eval(i as f32 / 20.0) > 1.0 {
                overshot = true;
            }
        }
        assert!(overshot, "elastic-out must overshoot 1.0");
    }

    #[test]
    fn presets_differ_only_where_documented() {
        let standard = AnimationConfig::standard();
        for preset in [
            AnimationConfig::bounce(),
            AnimationConfig::elastic(),
            AnimationConfig::slow(),
            AnimationConfig::fast(),
        ] {
            assert_eq!(preset.stagger_interval, standard.stagger_interval);
            assert_eq!(preset.slide_distance, standard.slide_distance);
            assert_eq!(preset.digit_width, standard.digit_width);
        }
        assert_eq!(AnimationConfig::fast().durations.translate, DurationMs(200));
        assert_eq!(AnimationConfig::slow().durations.opacity, DurationMs(600));
        assert_eq!(AnimationConfig::bounce().easing, Easing::BounceOut);
    }
}
