// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 100pt header above a long list, driven through one scroll gesture.
//!
//! The header rides away with the content, stays collapsed while scrolling
//! further, then slides back in as soon as the user reverses.
//!
//! Run:
//! - `cargo run -p understory_trackable_header_demos --example simple_header`

use kurbo::{Point, Rect};
use understory_trackable_header::scroll_view::TrackableScrollView;

const HEADER_H: f64 = 100.0;
const WIDTH: f64 = 320.0;

fn main() {
    let view = TrackableScrollView::new();
    let mut header = view.track("red header", false);
    let origin = Point::ZERO;

    // Scroll positions of the content, one per layout pass.
    let scroll = [0.0, 20.0, 60.0, 140.0, 300.0, 290.0, 250.0, 200.0, 180.0, 220.0, 0.0];

    println!("== {} in space {:?} ==", header.header(), view.coordinate_space());
    let mut visible = Vec::new();
    for s in scroll {
        let y = -s;
        header.on_frame_change(Rect::new(0.0, y, WIDTH, y + HEADER_H), origin);
        let on_screen = y + header.offset();
        println!(
            "  scroll {s:>5.1}  offset {:>6.1}  header top {:>6.1}",
            header.offset(),
            on_screen
        );
        // The header is never below its resting place nor more than fully hidden.
        assert!((-HEADER_H..=0.0).contains(&on_screen));
        visible.push(on_screen);
    }

    assert_eq!(
        visible,
        vec![0.0, -20.0, -60.0, -100.0, -100.0, -90.0, -50.0, 0.0, 0.0, -40.0, 0.0]
    );
}
