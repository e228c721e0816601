// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A disabled (pinned) header re-rendered from an offset subscription.
//!
//! The header starts pinned, so it stays glued to the top of the viewport.
//! Halfway through, tracking is re-enabled and the offset switches rules on
//! the next frame without any smoothing.
//!
//! Run:
//! - `cargo run -p understory_trackable_header_demos --example pinned_header`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Affine;
use understory_trackable_header::scroll_view::TrackableScrollView;
use understory_trackable_header::types::ScrollFrame;

const HEADER_H: f64 = 64.0;

fn main() {
    let view = TrackableScrollView::new();
    let handle = view.coordinator();
    let mut header = view.track("pinned", true);

    // Stand-in for the host's render pass: remember the transform we were asked to apply.
    let rendered = Rc::new(RefCell::new(Vec::<Affine>::new()));
    let sink = rendered.clone();
    let sub = handle.subscribe(move |offset| {
        sink.borrow_mut().push(Affine::translate((0.0, offset)));
    });

    for y in [0.0, -30.0, -90.0, -90.0] {
        let update = header.on_frame(ScrollFrame::new(y, HEADER_H));
        println!("  pinned   y {y:>6.1}  offset {:>5.1}  {update:?}", header.offset());
        assert_eq!(header.offset(), -y);
    }

    header.set_disabled(false);
    for y in [-120.0, -100.0] {
        let update = header.on_frame(ScrollFrame::new(y, HEADER_H));
        println!("  tracking y {y:>6.1}  offset {:>5.1}  {update:?}", header.offset());
    }
    // Re-enabled at -120: no reversal, snapshot 0, so the header snaps to collapsed.
    // Scrolling back to -100 reverses and keeps that collapsed offset.
    assert_eq!(header.offset(), 56.0);

    assert!(handle.unsubscribe(sub));
    let rendered = rendered.borrow();
    println!("== {} transforms rendered ==", rendered.len());
    assert_eq!(rendered.len(), 3);
    assert_eq!(rendered[2], Affine::translate((0.0, 56.0)));
}
