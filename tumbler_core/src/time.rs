// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic millisecond time.
//!
//! [`TimeMs`] represents a point on the host's monotonic clock in whole
//! milliseconds. The engine never reads a clock itself; callers sample their
//! platform's monotonic source (e.g. `performance.now()`, `SystemClock`,
//! `Instant`) and pass timestamps in.
//!
//! [`DurationMs`] represents a span in the same units. Spans are unsigned:
//! negative intervals are unrepresentable, and subtraction saturates at zero.

use core::fmt;
use core::ops::{Add, Sub};

/// A point in time expressed as monotonic milliseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeMs(pub u64);

impl TimeMs {
    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Returns the span between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> DurationMs {
        DurationMs(self.0.saturating_sub(earlier.0))
    }

    /// Checked addition of a span.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, duration: DurationMs) -> Option<Self> {
        match self.0.checked_add(duration.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }
}

impl Add<DurationMs> for TimeMs {
    type Output = Self;

    #[inline]
    fn add(self, rhs: DurationMs) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeMs {
    type Output = DurationMs;

    #[inline]
    fn sub(self, rhs: Self) -> DurationMs {
        DurationMs(self.0 - rhs.0)
    }
}

impl fmt::Debug for TimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeMs({})", self.0)
    }
}

/// A span of time in milliseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DurationMs(pub u64);

impl DurationMs {
    /// A zero-length span.
    pub const ZERO: Self = Self(0);

    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Saturating addition.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Divides this span by a positive speed factor, rounding to the nearest
    /// millisecond.
    ///
    /// This is how speed multipliers apply to base durations: a factor of 2.0
    /// halves the effective duration. Factors at or below zero are treated as
    /// 1.0 rather than producing nonsense spans.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "millisecond spans are far below f32 integer range in practice"
    )]
    pub fn scaled_down(self, factor: f32) -> Self {
        if factor <= 0.0 {
            return self;
        }
        let scaled = self.0 as f32 / factor;
        Self(libm::roundf(scaled) as u64)
    }
}

impl Add for DurationMs {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for DurationMs {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Debug for DurationMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DurationMs({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_since_saturates() {
        let t = TimeMs(1000);
        assert_eq!(t.saturating_duration_since(TimeMs(400)), DurationMs(600));
        assert_eq!(t.saturating_duration_since(TimeMs(1500)), DurationMs::ZERO);
    }

    #[test]
    fn arithmetic() {
        let t = TimeMs(1000);
        let d = DurationMs(250);
        assert_eq!((t + d).millis(), 1250);
        assert_eq!(TimeMs(1250) - t, DurationMs(250));
        assert_eq!((d + DurationMs(50)).millis(), 300);
        assert_eq!(DurationMs(100).saturating_sub(DurationMs(300)), DurationMs::ZERO);
    }

    #[test]
    fn checked_add_overflow() {
        assert!(TimeMs(u64::MAX).checked_add(DurationMs(1)).is_none());
        assert_eq!(TimeMs(10).checked_add(DurationMs(5)), Some(TimeMs(15)));
    }

    #[test]
    fn scaled_down_divides_and_rounds() {
        assert_eq!(DurationMs(400).scaled_down(2.0), DurationMs(200));
        assert_eq!(DurationMs(400).scaled_down(2.5), DurationMs(160));
        // 400 / 3 = 133.33 → rounds to 133.
        assert_eq!(DurationMs(400).scaled_down(3.0), DurationMs(133));
        // Factor 1.0 is the identity.
        assert_eq!(DurationMs(70).scaled_down(1.0), DurationMs(70));
    }

    #[test]
    fn scaled_down_rejects_non_positive_factors() {
        assert_eq!(DurationMs(400).scaled_down(0.0), DurationMs(400));
        assert_eq!(DurationMs(400).scaled_down(-1.0), DurationMs(400));
    }
}
