// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decorator that makes any header element trackable.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_trackable_header::scroll_view::TrackableScrollView;
//! use understory_trackable_header::trackable::Trackable;
//!
//! let view = TrackableScrollView::new();
//! let mut header = view.track("toolbar", false);
//!
//! // Host layout pass: header scrolled 150 above a scroll view placed at y=0.
//! header.on_frame_change(Rect::new(0.0, -20.0, 320.0, 80.0), Point::ZERO);
//! header.on_frame_change(Rect::new(0.0, -150.0, 320.0, -50.0), Point::ZERO);
//! assert_eq!(header.offset(), 50.0);
//!
//! // Outside a scroll view the decorator is inert.
//! let mut loose = Trackable::detached("toolbar");
//! loose.on_frame_change(Rect::new(0.0, -150.0, 320.0, -50.0), Point::ZERO);
//! assert_eq!(loose.offset(), 0.0);
//! ```

use kurbo::{Affine, Point, Rect, Vec2};

use crate::observer::FrameObserver;
use crate::scroll_view::CoordinatorHandle;
use crate::types::{OffsetUpdate, ScrollFrame};

/// Draw order of a tracked header relative to its siblings; it renders above the content.
pub const HEADER_Z_INDEX: i32 = 1;

/// A header element plus what it needs to follow its scroll view's coordinator.
#[derive(Debug)]
pub struct Trackable<H> {
    header: H,
    coordinator: Option<CoordinatorHandle>,
    observer: Option<FrameObserver>,
    disabled: bool,
    offset: f64,
}

impl<H> Trackable<H> {
    /// Wrap `header`. Without a coordinator the wrapper never moves the header.
    pub fn new(header: H, coordinator: Option<CoordinatorHandle>, disabled: bool) -> Self {
        let observer = coordinator
            .as_ref()
            .map(|c| FrameObserver::new(c.coordinate_space()));
        Self {
            header,
            coordinator,
            observer,
            disabled,
            offset: 0.0,
        }
    }

    /// Wrap `header` so it follows `coordinator`, with tracking enabled.
    pub fn attached(header: H, coordinator: CoordinatorHandle) -> Self {
        Self::new(header, Some(coordinator), false)
    }

    /// Wrap `header` outside any scroll view.
    pub fn detached(header: H) -> Self {
        Self::new(header, None, false)
    }

    /// Host callback for a layout pass: the header's world rectangle and the
    /// world position of the scroll view's coordinate-space origin.
    pub fn on_frame_change(
        &mut self,
        header_world: Rect,
        space_origin: Point,
    ) -> Option<OffsetUpdate> {
        self.on_frame(FrameObserver::measure(header_world, space_origin))
    }

    /// Same as [`Trackable::on_frame_change`] for a frame already in the scroll space.
    pub fn on_frame(&mut self, frame: ScrollFrame) -> Option<OffsetUpdate> {
        let (Some(coordinator), Some(observer)) = (&self.coordinator, &mut self.observer) else {
            return None;
        };
        let update = observer.forward(frame, self.disabled, coordinator)?;
        self.offset = coordinator.current_offset();
        Some(update)
    }

    /// Re-read the offset from the coordinator, e.g. from a subscription callback.
    pub fn sync(&mut self) -> f64 {
        if let Some(coordinator) = &self.coordinator {
            self.offset = coordinator.current_offset();
        }
        self.offset
    }

    /// Vertical offset applied to the header at render time.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Render transform for the header: a pure vertical translation.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(0.0, self.offset))
    }

    /// Draw order for the header; see [`HEADER_Z_INDEX`].
    pub fn z_index(&self) -> i32 {
        HEADER_Z_INDEX
    }

    /// Whether tracking is pinned (disabled).
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Change the disabled flag. Takes effect with the next frame change.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether a coordinator is attached.
    pub fn is_attached(&self) -> bool {
        self.coordinator.is_some()
    }

    /// The attached coordinator, if any.
    pub fn coordinator(&self) -> Option<&CoordinatorHandle> {
        self.coordinator.as_ref()
    }

    /// The wrapped header.
    pub fn header(&self) -> &H {
        &self.header
    }

    /// The wrapped header, mutably.
    pub fn header_mut(&mut self) -> &mut H {
        &mut self.header
    }

    /// Unwrap the header.
    pub fn into_inner(self) -> H {
        self.header
    }
}
