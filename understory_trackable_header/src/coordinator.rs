// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The offset state machine.
//!
//! ## Usage
//!
//! 1) Measure the header's frame in the scroll coordinate space on every layout pass.
//! 2) Feed each frame, in order, to [`OffsetCoordinator::update`].
//! 3) Translate the header vertically by [`OffsetCoordinator::current_offset`].
//!
//! ## Minimal example
//!
//! ```
//! use understory_trackable_header::coordinator::OffsetCoordinator;
//! use understory_trackable_header::types::ScrollFrame;
//!
//! let mut c = OffsetCoordinator::new();
//! // Scroll down until the 100pt header is gone: it rides along with the content.
//! c.update(ScrollFrame::new(-20.0, 100.0), false);
//! c.update(ScrollFrame::new(-150.0, 100.0), false);
//! assert_eq!(c.current_offset(), 50.0);
//! // Scroll back up: the header reveals from its collapsed position instead of jumping.
//! c.update(ScrollFrame::new(-140.0, 100.0), false);
//! assert_eq!(c.current_offset(), 50.0);
//! c.update(ScrollFrame::new(-40.0, 100.0), false);
//! assert_eq!(c.current_offset(), 40.0);
//! ```

use crate::types::{OffsetUpdate, ScrollDirection, ScrollFrame, UpdateFlags};

/// Computes a header's vertical render offset from a stream of frames.
///
/// The offset is never stored: it is derived on read from the last frame, the
/// offset captured at the last direction reversal, and the disabled flag.
///
/// Rules, in order:
/// - Disabled: `-origin_y`, pinning the header to the top of the viewport.
/// - `origin_y >= 0`: `0`, the header sits at its natural position.
/// - Otherwise the reversal snapshot clamped to
///   `[-origin_y - height, -origin_y]`, i.e. somewhere between fully collapsed
///   and fully visible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OffsetCoordinator {
    previous_frame: ScrollFrame,
    was_scrolling_down: bool,
    offset_at_last_reversal: f64,
    disabled: bool,
}

impl OffsetCoordinator {
    /// Create a coordinator in its initial state (zero frame, not scrolling down, no snapshot).
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one measurement.
    ///
    /// Must be called once per measurement, in the order measurements occur.
    /// When the direction flips, the offset derived from the *old* state is
    /// captured first so the header stays continuous across the reversal.
    pub fn update(&mut self, new_frame: ScrollFrame, disabled: bool) -> OffsetUpdate {
        let previous = self.current_offset();
        let mut flags = UpdateFlags::empty();

        let is_scrolling_down =
            ScrollDirection::between(&self.previous_frame, &new_frame).is_down();
        if is_scrolling_down != self.was_scrolling_down {
            self.offset_at_last_reversal = previous;
            flags |= UpdateFlags::REVERSED;
            #[cfg(feature = "tracing")]
            tracing::trace!(
                origin_y = new_frame.origin_y,
                snapshot = previous,
                down = is_scrolling_down,
                "scroll direction reversed"
            );
        }
        if disabled != self.disabled {
            flags |= UpdateFlags::DISABLED_CHANGED;
            #[cfg(feature = "tracing")]
            tracing::trace!(disabled, "header tracking disabled flag toggled");
        }

        self.disabled = disabled;
        self.previous_frame = new_frame;
        self.was_scrolling_down = is_scrolling_down;

        let current = self.current_offset();
        if current != previous {
            flags |= UpdateFlags::OFFSET_CHANGED;
        }
        OffsetUpdate {
            previous,
            current,
            flags,
        }
    }

    /// The vertical translation to apply to the header right now.
    pub fn current_offset(&self) -> f64 {
        let frame = &self.previous_frame;
        if self.disabled {
            return -frame.origin_y;
        }
        if !frame.is_past_origin() {
            return 0.0;
        }
        // `max` then `min` rather than `f64::clamp`, which panics on inverted bounds.
        self.offset_at_last_reversal
            .max(self.min_offset())
            .min(self.max_offset())
    }

    /// Fully collapsed bound for the last frame: the header pushed up by its own height.
    #[inline]
    pub fn min_offset(&self) -> f64 {
        -self.previous_frame.origin_y - self.previous_frame.height
    }

    /// Fully expanded bound for the last frame: the header exactly cancels the scroll distance.
    #[inline]
    pub fn max_offset(&self) -> f64 {
        -self.previous_frame.origin_y
    }

    /// The last ingested frame (the zero rectangle before the first update).
    #[inline]
    pub fn previous_frame(&self) -> ScrollFrame {
        self.previous_frame
    }

    /// Direction observed by the last update.
    #[inline]
    pub fn direction(&self) -> ScrollDirection {
        ScrollDirection::from(self.was_scrolling_down)
    }

    /// Offset captured at the most recent direction reversal.
    #[inline]
    pub fn offset_at_last_reversal(&self) -> f64 {
        self.offset_at_last_reversal
    }

    /// Disabled flag supplied with the last update.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Return to the initial state, e.g. after the scroll view's content is replaced.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    const H: f64 = 100.0;

    fn feed(c: &mut OffsetCoordinator, ys: &[f64]) -> Vec<f64> {
        ys.iter()
            .map(|&y| c.update(ScrollFrame::new(y, H), false).current)
            .collect()
    }

    #[test]
    fn initial_state() {
        let c = OffsetCoordinator::new();
        assert_eq!(c.previous_frame(), ScrollFrame::ZERO);
        assert_eq!(c.direction(), ScrollDirection::Up);
        assert_eq!(c.offset_at_last_reversal(), 0.0);
        assert!(!c.is_disabled());
        assert_eq!(c.current_offset(), 0.0);
    }

    // Continuous downward scroll from rest: the snapshot taken at the first flip is 0,
    // so the header rides with the content while it is still partly visible.
    #[test]
    fn continuous_scroll_keeps_header_attached() {
        let mut c = OffsetCoordinator::new();
        assert_eq!(feed(&mut c, &[0.0, -20.0, -50.0]), [0.0, 0.0, 0.0]);
        assert_eq!(c.offset_at_last_reversal(), 0.0);
        assert_eq!(c.direction(), ScrollDirection::Down);
    }

    // Two frames only, starting from rest: the first flip snapshots 0 and the
    // second flip snapshots the still-zero offset, so the header never moves.
    #[test]
    fn short_reversal_from_rest_stays_at_zero() {
        let mut c = OffsetCoordinator::new();
        assert_eq!(feed(&mut c, &[-50.0, -30.0]), [0.0, 0.0]);
        assert_eq!(c.direction(), ScrollDirection::Up);
        assert_eq!(c.offset_at_last_reversal(), 0.0);
        assert_eq!((c.min_offset(), c.max_offset()), (-130.0, 30.0));
    }

    // Past its own height the lower bound takes over and the header stays just out of view.
    #[test]
    fn scroll_past_height_collapses() {
        let mut c = OffsetCoordinator::new();
        assert_eq!(feed(&mut c, &[-20.0, -150.0, -400.0]), [0.0, 50.0, 300.0]);
        let f = c.previous_frame();
        assert_eq!(f.origin_y + c.current_offset(), -H);
    }

    #[test]
    fn reversal_keeps_pre_flip_offset() {
        let mut c = OffsetCoordinator::new();
        feed(&mut c, &[-20.0, -150.0]);
        assert_eq!(c.current_offset(), 50.0);

        let u = c.update(ScrollFrame::new(-140.0, H), false);
        assert!(u.reversed());
        assert!(!u.changed());
        assert_eq!(c.offset_at_last_reversal(), 50.0);
        assert_eq!((c.min_offset(), c.max_offset()), (40.0, 140.0));
        assert_eq!(c.current_offset(), 50.0);
    }

    // After reversing, the header reveals until it is fully visible, then sticks.
    #[test]
    fn reveal_then_stick_while_scrolling_up() {
        let mut c = OffsetCoordinator::new();
        feed(&mut c, &[-20.0, -150.0]);
        assert_eq!(
            feed(&mut c, &[-140.0, -100.0, -60.0, -40.0, -10.0]),
            [50.0, 50.0, 50.0, 40.0, 10.0]
        );
        // Back at the top the header returns to its natural position.
        assert_eq!(feed(&mut c, &[0.0, 30.0]), [0.0, 0.0]);
    }

    // Reversing again from a pinned header collapses it smoothly from where it was.
    #[test]
    fn second_reversal_collapses_from_pinned() {
        let mut c = OffsetCoordinator::new();
        feed(&mut c, &[-20.0, -300.0, -200.0]);
        assert_eq!(c.current_offset(), 200.0);
        let u = c.update(ScrollFrame::new(-230.0, H), false);
        assert!(u.reversed());
        assert_eq!(u.current, 200.0);
        assert_eq!(feed(&mut c, &[-290.0, -350.0]), [200.0, 250.0]);
    }

    #[test]
    fn disabled_overrides_history() {
        let mut c = OffsetCoordinator::new();
        feed(&mut c, &[-20.0, -150.0, -140.0]);
        let u = c.update(ScrollFrame::new(-40.0, H), true);
        assert_eq!(u.current, 40.0);
        assert!(u.flags.contains(UpdateFlags::DISABLED_CHANGED));
        assert!(c.is_disabled());
        // Disabled pins even above the fold.
        c.update(ScrollFrame::new(25.0, H), true);
        assert_eq!(c.current_offset(), -25.0);
    }

    // Toggling disabled mid-scroll switches formula immediately, with no smoothing.
    #[test]
    fn enabling_again_is_abrupt() {
        let mut c = OffsetCoordinator::new();
        c.update(ScrollFrame::new(-300.0, H), true);
        assert_eq!(c.current_offset(), 300.0);
        let u = c.update(ScrollFrame::new(-310.0, H), false);
        assert!(u.flags.contains(UpdateFlags::DISABLED_CHANGED));
        assert!(!u.reversed());
        assert!(u.changed());
        // The snapshot is still 0 from the first flip, so the lower bound applies.
        assert_eq!(u.current, 210.0);
    }

    #[test]
    fn zero_height_header_is_pinned() {
        let mut c = OffsetCoordinator::new();
        c.update(ScrollFrame::new(-70.0, 0.0), false);
        assert_eq!(c.min_offset(), c.max_offset());
        assert_eq!(c.current_offset(), 70.0);
    }

    #[test]
    fn inverted_bounds_do_not_panic() {
        let mut c = OffsetCoordinator::new();
        c.update(ScrollFrame::new(-10.0, -50.0), false);
        assert!(c.min_offset() > c.max_offset());
        assert_eq!(c.current_offset(), 10.0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut c = OffsetCoordinator::new();
        feed(&mut c, &[-20.0, -150.0, -140.0]);
        c.reset();
        assert_eq!(c, OffsetCoordinator::new());
    }

    fn frame() -> impl Strategy<Value = ScrollFrame> {
        (-2000.0..2000.0_f64, 0.0..400.0_f64).prop_map(|(y, h)| ScrollFrame::new(y, h))
    }

    fn history() -> impl Strategy<Value = Vec<(ScrollFrame, bool)>> {
        prop::collection::vec((frame(), any::<bool>()), 0..24)
    }

    fn replay(steps: &[(ScrollFrame, bool)]) -> OffsetCoordinator {
        let mut c = OffsetCoordinator::new();
        for &(f, d) in steps {
            c.update(f, d);
        }
        c
    }

    proptest! {
        #[test]
        fn repeated_frame_is_idempotent(steps in history(), f in frame(), repeats in 1..6_usize) {
            let mut c = replay(&steps);
            c.update(f, false);
            let settled = c.current_offset();
            for _ in 0..repeats {
                let u = c.update(f, false);
                prop_assert!(!u.changed());
                prop_assert_eq!(c.current_offset(), settled);
            }
        }

        #[test]
        fn offset_stays_within_bounds(steps in history(), f in frame()) {
            let mut c = replay(&steps);
            c.update(f, false);
            let offset = c.current_offset();
            if f.origin_y < 0.0 {
                prop_assert!(offset >= -f.origin_y - f.height);
                prop_assert!(offset <= -f.origin_y);
            } else {
                prop_assert_eq!(offset, 0.0);
            }
        }

        #[test]
        fn disabled_pins_regardless_of_history(steps in history(), f in frame()) {
            let mut c = replay(&steps);
            c.update(f, true);
            prop_assert_eq!(c.current_offset(), -f.origin_y);
        }

        #[test]
        fn reversal_is_continuous(steps in history(), f in frame()) {
            let mut c = replay(&steps);
            let was_disabled = c.is_disabled();
            let u = c.update(f, was_disabled);
            if u.reversed() && !was_disabled && f.origin_y < 0.0 {
                let (lo, hi) = (c.min_offset(), c.max_offset());
                if (lo..=hi).contains(&u.previous) {
                    prop_assert_eq!(u.current, u.previous);
                }
            }
        }
    }
}
