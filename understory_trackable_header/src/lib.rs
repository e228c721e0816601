// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Trackable Header: collapsing, sticky headers for scroll views.
//!
//! ## Overview
//!
//! As content scrolls, a tracked header translates vertically so it collapses
//! while the user advances and reveals again as soon as they scroll back, the
//! way mobile collapsing toolbars behave.
//! This crate computes that translation. It does not lay out, render, or
//! measure anything: feed it the header's frame in the scroll view's
//! coordinate space after every layout pass and apply the offset it returns.
//!
//! ## Offset rules
//!
//! For the most recent frame (`origin_y`, `height`):
//! - Disabled headers are pinned: the offset is `-origin_y`.
//! - While `origin_y >= 0` the header sits at its natural position: the offset is `0`.
//! - Otherwise the offset lies in `[-origin_y - height, -origin_y]`, from fully
//!   collapsed to fully visible. Its value is the offset captured at the last
//!   scroll-direction reversal, clamped to those bounds, so the header never
//!   jumps when the user changes direction mid-gesture.
//!
//! ## Pieces
//!
//! - [`OffsetCoordinator`](crate::coordinator::OffsetCoordinator): the state machine.
//! - [`FrameObserver`](crate::observer::FrameObserver): maps host rectangles into the
//!   scroll coordinate space and drops unchanged samples.
//! - [`TrackableScrollView`](crate::scroll_view::TrackableScrollView): owns one coordinator
//!   and one [`CoordinateSpaceId`](crate::types::CoordinateSpaceId), and hands out
//!   [`CoordinatorHandle`](crate::scroll_view::CoordinatorHandle)s with offset subscriptions.
//! - [`Trackable`](crate::trackable::Trackable): decorator wrapping any header element.
//!
//! ## Workflow
//!
//! 1) Create a [`TrackableScrollView`](crate::scroll_view::TrackableScrollView) with the
//!    host scroll view and establish its coordinate space in the host.
//! 2) Wrap the header with [`TrackableScrollView::track`](crate::scroll_view::TrackableScrollView::track).
//! 3) On every layout pass, call [`Trackable::on_frame_change`](crate::trackable::Trackable::on_frame_change)
//!    and draw the header with [`Trackable::transform`](crate::trackable::Trackable::transform).
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_trackable_header::scroll_view::TrackableScrollView;
//!
//! let view = TrackableScrollView::new();
//! let mut header = view.track((), false);
//! let origin = Point::ZERO;
//!
//! // Advance 150: the 100pt header has scrolled out of view with the content.
//! for y in [-20.0, -150.0] {
//!     header.on_frame_change(Rect::new(0.0, y, 320.0, y + 100.0), origin);
//! }
//! assert_eq!(header.offset() - 150.0, -100.0);
//!
//! // Back up by 60: the header slides in from the top as the content moves.
//! header.on_frame_change(Rect::new(0.0, -90.0, 320.0, 10.0), origin);
//! assert_eq!(header.offset() - 90.0, -40.0);
//! ```
//!
//! ## Threading
//!
//! Handles are `Rc`-based and meant for the single thread that runs layout.
//! [`OffsetCoordinator`](crate::coordinator::OffsetCoordinator) itself is plain
//! data; a multi-threaded host should guard `update` and `current_offset`
//! together behind one lock.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to Kurbo.
//! - `tracing`: emit `tracing` events on reversals, disabled toggles, and offset notifications.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod coordinator;
pub mod observer;
pub mod scroll_view;
pub mod trackable;
pub mod types;
