// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: scroll frames, directions, coordinate spaces, and update results.
//!
//! ## Overview
//!
//! These types are the inputs and outputs of the
//! [`OffsetCoordinator`](crate::coordinator::OffsetCoordinator). Geometry is
//! expressed in the scroll container's coordinate space, with `y` growing
//! downward, so content that scrolls up has a decreasing `origin_y`.

use core::sync::atomic::{AtomicU32, Ordering};

use kurbo::Rect;

/// The header's bounding box in the scroll coordinate space at one point in time.
///
/// Only the vertical extent matters: horizontal tracking is not supported.
/// Inputs are assumed to be finite with a non-negative height.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollFrame {
    /// Top edge of the header; negative once it has scrolled past the top of the viewport.
    pub origin_y: f64,
    /// Height of the header.
    pub height: f64,
}

impl ScrollFrame {
    /// The zero rectangle; the coordinator's initial `previous_frame`.
    pub const ZERO: Self = Self {
        origin_y: 0.0,
        height: 0.0,
    };

    /// Create a frame from its top edge and height.
    #[inline]
    pub const fn new(origin_y: f64, height: f64) -> Self {
        Self { origin_y, height }
    }

    /// Take the vertical extent of a rectangle that is already expressed in
    /// the scroll coordinate space.
    #[inline]
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.y0, rect.height())
    }

    /// Whether the header has scrolled upward past its natural position.
    #[inline]
    pub fn is_past_origin(&self) -> bool {
        self.origin_y < 0.0
    }
}

impl From<Rect> for ScrollFrame {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

/// Scroll direction as observed between two consecutive frames.
///
/// `Down` means the content moves up under the viewport (the header's
/// `origin_y` decreases). Anything else, including no movement, counts as `Up`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Revealing earlier content, or not moving at all.
    #[default]
    Up,
    /// Advancing through the content.
    Down,
}

impl ScrollDirection {
    /// Direction implied by moving from `previous` to `next`.
    #[inline]
    pub fn between(previous: &ScrollFrame, next: &ScrollFrame) -> Self {
        if next.origin_y < previous.origin_y {
            Self::Down
        } else {
            Self::Up
        }
    }

    /// Returns `true` for [`ScrollDirection::Down`].
    #[inline]
    pub fn is_down(self) -> bool {
        matches!(self, Self::Down)
    }
}

impl From<bool> for ScrollDirection {
    /// `true` maps to `Down`, matching the coordinator's `was_scrolling_down` flag.
    fn from(down: bool) -> Self {
        if down { Self::Down } else { Self::Up }
    }
}

/// Identifier of the named coordinate space a scroll view establishes.
///
/// Every [`TrackableScrollView`](crate::scroll_view::TrackableScrollView) gets a
/// fresh identifier, so headers attached to one view never measure against
/// another view's origin. Identifiers are unique within a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinateSpaceId(u32);

// 32-bit so targets without 64-bit atomics stay supported.
static NEXT_SPACE: AtomicU32 = AtomicU32::new(1);

impl CoordinateSpaceId {
    /// Allocate a new, never before returned identifier.
    pub fn next() -> Self {
        Self(NEXT_SPACE.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, for logging or keying host-side maps.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

bitflags::bitflags! {
    /// What a single [`OffsetCoordinator::update`](crate::coordinator::OffsetCoordinator::update) changed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct UpdateFlags: u8 {
        /// Scroll direction flipped; the reversal snapshot was retaken.
        const REVERSED         = 0b0000_0001;
        /// The derived offset differs from the one before the update.
        const OFFSET_CHANGED   = 0b0000_0010;
        /// The disabled flag toggled.
        const DISABLED_CHANGED = 0b0000_0100;
    }
}

/// Result of ingesting one frame.
///
/// Mirrors the "state machine returns its transitions" shape: callers that
/// only need to know whether to re-render can check [`OffsetUpdate::changed`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OffsetUpdate {
    /// Offset derived from the state before the update.
    pub previous: f64,
    /// Offset derived from the state after the update.
    pub current: f64,
    /// Transitions that occurred during the update.
    pub flags: UpdateFlags,
}

impl OffsetUpdate {
    /// Whether the offset moved.
    #[inline]
    pub fn changed(&self) -> bool {
        self.flags.contains(UpdateFlags::OFFSET_CHANGED)
    }

    /// Whether the scroll direction flipped.
    #[inline]
    pub fn reversed(&self) -> bool {
        self.flags.contains(UpdateFlags::REVERSED)
    }
}
