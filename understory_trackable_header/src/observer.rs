// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame observer: turn host measurements into coordinator updates.
//!
//! The host reports where the header sits after each layout pass. The observer
//! expresses that rectangle in the scroll view's coordinate space, drops
//! samples identical to the previous one, and forwards the rest to the
//! coordinator. Working out where the coordinate space's origin lies is the
//! host's job.

use kurbo::{Affine, Point, Rect};

use crate::scroll_view::CoordinatorHandle;
use crate::types::{CoordinateSpaceId, OffsetUpdate, ScrollFrame};

/// Per-header sampler bound to one coordinate space.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameObserver {
    space: CoordinateSpaceId,
    last: Option<ScrollFrame>,
    // Coordinator reset generation `last` was recorded under.
    generation: u32,
}

impl FrameObserver {
    /// Create an observer measuring against `space`.
    pub fn new(space: CoordinateSpaceId) -> Self {
        Self {
            space,
            last: None,
            generation: 0,
        }
    }

    /// The coordinate space samples are expressed in.
    pub fn coordinate_space(&self) -> CoordinateSpaceId {
        self.space
    }

    /// Last sample that was accepted, if any.
    pub fn last_frame(&self) -> Option<ScrollFrame> {
        self.last
    }

    /// Express a header rectangle given in world space relative to the space's origin.
    pub fn measure(header_world: Rect, space_origin: Point) -> ScrollFrame {
        ScrollFrame::from_rect(header_world - space_origin.to_vec2())
    }

    /// Express a header rectangle through an arbitrary transform into the scroll space.
    ///
    /// Non-axis-aligned transforms use the bounding box of the transformed rectangle.
    pub fn measure_with(header_local: Rect, to_space: Affine) -> ScrollFrame {
        ScrollFrame::from_rect(to_space.transform_rect_bbox(header_local))
    }

    /// Record a sample. Returns it only if it differs from the previous one.
    pub fn observe(&mut self, frame: ScrollFrame) -> Option<ScrollFrame> {
        if self.last == Some(frame) {
            return None;
        }
        self.last = Some(frame);
        Some(frame)
    }

    /// Observe `frame` and, if it changed, push it into the coordinator.
    ///
    /// Returns `None` when the frame did not change, or when `handle` belongs
    /// to a different coordinate space than this observer (the sample would be
    /// measured against the wrong origin). A changed `disabled` flag alone does
    /// not trigger an update; it is applied with the next frame change.
    ///
    /// After [`CoordinatorHandle::reset`] the first frame is always forwarded.
    pub fn forward(
        &mut self,
        frame: ScrollFrame,
        disabled: bool,
        handle: &CoordinatorHandle,
    ) -> Option<OffsetUpdate> {
        if handle.coordinate_space() != self.space {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                observer = self.space.get(),
                coordinator = handle.coordinate_space().get(),
                "dropping header frame measured in a foreign coordinate space"
            );
            return None;
        }
        if handle.generation() != self.generation {
            self.generation = handle.generation();
            self.last = None;
        }
        let frame = self.observe(frame)?;
        Some(handle.update(frame, disabled))
    }

    /// Forget the last sample so the next one is always forwarded.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
