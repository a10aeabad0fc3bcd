// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The digit diff planner.
//!
//! [`plan`] computes, for a `(from, to)` pair of non-negative integers, the
//! ordered [`DigitFrame`] sequence describing what every digit position does:
//! swap, appear, disappear, or hold still. It is a pure function of its
//! inputs apart from [`FrameIds`], the monotonic identity mint, which does
//! not affect descriptor semantics.
//!
//! # Stagger ordering
//!
//! Stagger orders count from the least-significant digit outward — the
//! rightmost digit animates first — with two exceptions:
//!
//! - Disappearing frames rank first (orders `0..n`, with 0 on the excess
//!   digit adjacent to the surviving positions); the surviving positions
//!   shift up by `n`. Slots must begin leaving before the others shift.
//! - The single-step 9↔10 boundary is special-cased, because the general
//!   digit-count-change path reads poorly at the "roll to two digits"
//!   moment: 9→10 leads with the appearing `1`; 10→9 leads with the `0`→`9`
//!   swap and lets the `1` leave last.
//!
//! Exactly one frame per plan has `stagger_order == 0`. That frame is the
//! *primary* frame; its completion signal drives queue progress.
//!
//! Frames are computed least-significant-first and reversed before returning,
//! so index 0 of the result is the most-significant position as rendered
//! left-to-right. Excess (appearing or disappearing) leading digits sit at
//! the front.

use alloc::vec::Vec;

use crate::frame::{Digit, DigitFrame, Direction, FrameId, FrameKind};

/// Mints [`FrameId`] identity tokens.
///
/// Ids are monotonic and never reused, so render surfaces can key animation
/// continuity on them across re-renders. One mint is owned per engine
/// session.
#[derive(Debug, Default)]
pub struct FrameIds {
    next: u64,
}

impl FrameIds {
    /// Creates a mint starting at id 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns a fresh, never-before-issued id.
    pub fn mint(&mut self) -> FrameId {
        let id = FrameId(self.next);
        self.next += 1;
        id
    }
}

/// Renders `value` as decimal digits, most-significant first.
///
/// Zero renders as the single digit `0`; there are never leading zeros.
#[must_use]
pub fn decimal_digits(mut value: u64) -> Vec<Digit> {
    let mut digits = Vec::new();
    loop {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a decimal remainder is always 0..=9"
        )]
        let d = (value % 10) as u8;
        digits.push(Digit(d));
        value /= 10;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

/// Computes the ordered frame sequence for a `from → to` transition.
///
/// The result has one frame per visible digit position, most-significant
/// first. `appearing` frames number `max(0, digits(to) - digits(from))` and
/// `disappearing` frames `max(0, digits(from) - digits(to))`, except at the
/// special-cased 9↔10 boundary (which moves the same digits with a friendlier
/// ordering).
///
/// Equal values are out of contract — the engine never enqueues them — but
/// degrade to an all-[`Static`](FrameKind::Static) rendering of `from` rather
/// than panicking.
#[must_use]
pub fn plan(from: u64, to: u64, ids: &mut FrameIds) -> Vec<DigitFrame> {
    if from == to {
        return static_frames(from, ids);
    }

    // The 9↔10 boundary rolls between one and two digits constantly under
    // repeated tapping; it gets an explicit, hand-ordered pair of frames.
    if from == 9 && to == 10 {
        return alloc::vec![
            DigitFrame::appearing(ids.mint(), Digit(1), Direction::Increasing, 0),
            DigitFrame::swap(ids.mint(), Digit(9), Digit(0), Direction::Increasing, 1),
        ];
    }
    if from == 10 && to == 9 {
        return alloc::vec![
            DigitFrame::disappearing(ids.mint(), Digit(1), Direction::Decreasing, 1),
            DigitFrame::swap(ids.mint(), Digit(0), Digit(9), Direction::Decreasing, 0),
        ];
    }

    let direction = if to > from {
        Direction::Increasing
    } else {
        Direction::Decreasing
    };

    let from_digits = decimal_digits(from);
    let to_digits = decimal_digits(to);
    let overlap = from_digits.len().min(to_digits.len());
    let vanishing = from_digits.len().saturating_sub(to_digits.len());

    let mut frames = Vec::with_capacity(from_digits.len().max(to_digits.len()));

    // Overlapping positions, aligned from the least-significant digit. When
    // slots are vanishing their orders come first, so these shift up.
    for i in 0..overlap {
        let cur = to_digits[to_digits.len() - 1 - i];
        let prev = from_digits[from_digits.len() - 1 - i];
        #[expect(
            clippy::cast_possible_truncation,
            reason = "digit positions of a u64 fit in u32"
        )]
        let order = (i + vanishing) as u32;
        if cur == prev {
            frames.push(DigitFrame::still(ids.mint(), cur, order));
        } else {
            frames.push(DigitFrame::swap(ids.mint(), prev, cur, direction, order));
        }
    }

    // Excess leading positions of the longer value: appearing digits keep
    // positional orders; disappearing digits rank 0..n from the boundary out.
    if to_digits.len() > from_digits.len() {
        for i in overlap..to_digits.len() {
            let cur = to_digits[to_digits.len() - 1 - i];
            #[expect(
                clippy::cast_possible_truncation,
                reason = "digit positions of a u64 fit in u32"
            )]
            let order = i as u32;
            frames.push(DigitFrame::appearing(ids.mint(), cur, direction, order));
        }
    } else {
        for i in overlap..from_digits.len() {
            let prev = from_digits[from_digits.len() - 1 - i];
            #[expect(
                clippy::cast_possible_truncation,
                reason = "digit positions of a u64 fit in u32"
            )]
            let order = (i - overlap) as u32;
            frames.push(DigitFrame::disappearing(ids.mint(), prev, direction, order));
        }
    }

    frames.reverse();
    frames
}

/// Builds the idle rendering of `value`: one static frame per digit.
#[must_use]
pub fn static_frames(value: u64, ids: &mut FrameIds) -> Vec<DigitFrame> {
    let digits = decimal_digits(value);
    let mut frames = Vec::with_capacity(digits.len());
    for (i, digit) in digits.iter().rev().enumerate() {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "digit positions of a u64 fit in u32"
        )]
        let order = i as u32;
        frames.push(DigitFrame::still(ids.mint(), *digit, order));
    }
    frames.reverse();
    frames
}
