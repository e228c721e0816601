// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two scroll views stacked under a navigation bar, each with its own header.
//!
//! Headers are measured in window coordinates and converted into their own
//! view's coordinate space, so the navigation bar height does not leak into
//! the offsets and the two views never interfere.
//!
//! Run:
//! - `cargo run -p understory_trackable_header_demos --example navigation_header`

use kurbo::{Point, Rect};
use understory_trackable_header::scroll_view::TrackableScrollView;
use understory_trackable_header::trackable::Trackable;

const NAV_BAR_H: f64 = 96.0;
const HEADER_H: f64 = 100.0;

fn header_in_window(origin: Point, scrolled: f64) -> Rect {
    let top = origin.y - scrolled;
    Rect::new(0.0, top, 320.0, top + HEADER_H)
}

fn drive(label: &str, header: &mut Trackable<&str>, origin: Point, scroll: &[f64]) -> Vec<f64> {
    let mut offsets = Vec::new();
    for &s in scroll {
        header.on_frame_change(header_in_window(origin, s), origin);
        println!("  {label}: scroll {s:>5.1}  offset {:>5.1}", header.offset());
        offsets.push(header.offset());
    }
    offsets
}

fn main() {
    let top = TrackableScrollView::new();
    let bottom = TrackableScrollView::new();
    assert_ne!(top.coordinate_space(), bottom.coordinate_space());

    let mut top_header = top.track("top", false);
    let mut bottom_header = bottom.track("bottom", false);
    let top_origin = Point::new(0.0, NAV_BAR_H);
    let bottom_origin = Point::new(0.0, NAV_BAR_H + 400.0);

    let a = drive("top", &mut top_header, top_origin, &[0.0, 50.0, 180.0, 150.0]);
    let b = drive("bottom", &mut bottom_header, bottom_origin, &[0.0, 30.0]);

    assert_eq!(a, vec![0.0, 0.0, 80.0, 80.0]);
    assert_eq!(b, vec![0.0, 0.0]);
    assert_eq!(top.current_offset(), 80.0);
    assert_eq!(bottom.current_offset(), 0.0);
}
