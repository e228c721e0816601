// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll view container, coordinator handles, and offset subscriptions.
//!
//! A [`TrackableScrollView`] owns exactly one [`OffsetCoordinator`] and one
//! [`CoordinateSpaceId`]. It hands the coordinator to header elements
//! explicitly through cloneable [`CoordinatorHandle`]s; nothing is looked up
//! ambiently.
//!
//! Handles are single-threaded (`Rc` + `RefCell`). Updates, reads and
//! subscriber callbacks all happen on the thread that drives layout.
//!
//! ## Subscriptions
//!
//! [`CoordinatorHandle::subscribe`] registers a callback that receives the new
//! offset whenever an update changes it. Callbacks run with no borrow held, so
//! they may read the handle, subscribe, or unsubscribe (including
//! themselves). Subscriptions added during a notification first fire on the
//! next one. An `update` issued from a callback is applied, but does not
//! notify again.
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use understory_trackable_header::scroll_view::TrackableScrollView;
//! use understory_trackable_header::types::ScrollFrame;
//!
//! let view = TrackableScrollView::new();
//! let handle = view.coordinator();
//!
//! let seen = Rc::new(Cell::new(0.0));
//! let sink = seen.clone();
//! let _sub = handle.subscribe(move |offset| sink.set(offset));
//!
//! handle.update(ScrollFrame::new(-40.0, 100.0), true);
//! assert_eq!(seen.get(), 40.0);
//! ```

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, Ref, RefCell};
use core::fmt;
use core::mem;

use crate::coordinator::OffsetCoordinator;
use crate::trackable::Trackable;
use crate::types::{CoordinateSpaceId, OffsetUpdate, ScrollFrame};

/// Identifier returned by [`CoordinatorHandle::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Listener = Box<dyn FnMut(f64)>;

#[derive(Default)]
struct Listeners {
    next: u32,
    entries: Vec<(SubscriptionId, Listener)>,
    // While notifying, `entries` only holds subscriptions added mid-notification;
    // the ones being called are listed in `running`.
    notifying: bool,
    running: Vec<SubscriptionId>,
    removed: Vec<SubscriptionId>,
}

impl Listeners {
    fn len(&self) -> usize {
        self.entries.len() + self.running.len() - self.removed.len()
    }
}

struct Shared {
    space: CoordinateSpaceId,
    coordinator: RefCell<OffsetCoordinator>,
    listeners: RefCell<Listeners>,
    generation: Cell<u32>,
}

/// Shared, single-threaded capability to drive and read one scroll view's coordinator.
///
/// Clones refer to the same coordinator. Use [`CoordinatorHandle::downgrade`]
/// when a subscriber needs to reach back into the handle, otherwise the
/// callback keeps the coordinator alive forever.
#[derive(Clone)]
pub struct CoordinatorHandle {
    shared: Rc<Shared>,
}

impl fmt::Debug for CoordinatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinatorHandle")
            .field("space", &self.shared.space)
            .field("coordinator", &self.shared.coordinator)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl CoordinatorHandle {
    fn new() -> Self {
        Self {
            shared: Rc::new(Shared {
                space: CoordinateSpaceId::next(),
                coordinator: RefCell::new(OffsetCoordinator::new()),
                listeners: RefCell::new(Listeners::default()),
                generation: Cell::new(0),
            }),
        }
    }

    /// The coordinate space every header of this scroll view measures against.
    pub fn coordinate_space(&self) -> CoordinateSpaceId {
        self.shared.space
    }

    /// Ingest one frame and notify subscribers if the offset changed.
    ///
    /// See [`OffsetCoordinator::update`].
    pub fn update(&self, frame: ScrollFrame, disabled: bool) -> OffsetUpdate {
        let update = self.shared.coordinator.borrow_mut().update(frame, disabled);
        if update.changed() {
            self.notify(update.current);
        }
        update
    }

    /// The coordinator's current offset.
    pub fn current_offset(&self) -> f64 {
        self.shared.coordinator.borrow().current_offset()
    }

    /// Borrow the coordinator for inspection.
    pub fn coordinator(&self) -> Ref<'_, OffsetCoordinator> {
        self.shared.coordinator.borrow()
    }

    /// Return the coordinator to its initial state, notifying subscribers if the offset moved.
    ///
    /// Observers attached to this coordinator forget their last sample, so the
    /// next frame they see is forwarded even if it equals the one before the reset.
    pub fn reset(&self) {
        self.shared
            .generation
            .set(self.shared.generation.get().wrapping_add(1));
        let previous = {
            let mut c = self.shared.coordinator.borrow_mut();
            let previous = c.current_offset();
            c.reset();
            previous
        };
        if previous != 0.0 {
            self.notify(0.0);
        }
    }

    /// Register a callback receiving the new offset after every update that changes it.
    ///
    /// Callbacks run in subscription order.
    pub fn subscribe(&self, listener: impl FnMut(f64) + 'static) -> SubscriptionId {
        let mut listeners = self.shared.listeners.borrow_mut();
        let id = SubscriptionId(listeners.next);
        listeners.next = listeners.next.wrapping_add(1);
        listeners.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscription. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.shared.listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(sid, _)| *sid != id);
        if listeners.entries.len() != before {
            return true;
        }
        if listeners.running.contains(&id) && !listeners.removed.contains(&id) {
            listeners.removed.push(id);
            return true;
        }
        false
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }

    /// Whether two handles drive the same coordinator.
    pub fn same_coordinator(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    /// A non-owning handle, for use inside subscriber callbacks.
    pub fn downgrade(&self) -> WeakCoordinatorHandle {
        WeakCoordinatorHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Bumped by [`CoordinatorHandle::reset`].
    pub(crate) fn generation(&self) -> u32 {
        self.shared.generation.get()
    }

    fn notify(&self, offset: f64) {
        let mut entries = {
            let mut listeners = self.shared.listeners.borrow_mut();
            if listeners.notifying {
                return;
            }
            listeners.notifying = true;
            let entries = mem::take(&mut listeners.entries);
            listeners.running = entries.iter().map(|(id, _)| *id).collect();
            entries
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            space = self.shared.space.get(),
            offset,
            subscribers = entries.len(),
            "header offset changed"
        );
        for (id, listener) in entries.iter_mut() {
            if self.shared.listeners.borrow().removed.contains(id) {
                continue;
            }
            listener(offset);
        }

        let mut listeners = self.shared.listeners.borrow_mut();
        let removed = mem::take(&mut listeners.removed);
        entries.retain(|(id, _)| !removed.contains(id));
        let added = mem::replace(&mut listeners.entries, entries);
        listeners.entries.extend(added);
        listeners.running.clear();
        listeners.notifying = false;
    }
}

/// Non-owning counterpart of [`CoordinatorHandle`].
#[derive(Clone)]
pub struct WeakCoordinatorHandle {
    shared: Weak<Shared>,
}

impl fmt::Debug for WeakCoordinatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakCoordinatorHandle")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

impl WeakCoordinatorHandle {
    /// Recover a strong handle, or `None` once the scroll view is gone.
    pub fn upgrade(&self) -> Option<CoordinatorHandle> {
        self.shared.upgrade().map(|shared| CoordinatorHandle { shared })
    }
}

/// Container establishing one coordinate space and one coordinator per scroll view.
///
/// Create it alongside the host's scroll view and drop it with that view.
/// Headers get the coordinator through [`TrackableScrollView::track`] or an
/// explicit [`CoordinatorHandle`].
#[derive(Debug)]
pub struct TrackableScrollView {
    handle: CoordinatorHandle,
}

impl Default for TrackableScrollView {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackableScrollView {
    /// Create a scroll view with a fresh coordinate space and coordinator.
    pub fn new() -> Self {
        Self {
            handle: CoordinatorHandle::new(),
        }
    }

    /// The named coordinate space the host must establish for this view.
    pub fn coordinate_space(&self) -> CoordinateSpaceId {
        self.handle.coordinate_space()
    }

    /// A handle to this view's coordinator.
    pub fn coordinator(&self) -> CoordinatorHandle {
        self.handle.clone()
    }

    /// Wrap a header element so it tracks this view's coordinator.
    pub fn track<H>(&self, header: H, disabled: bool) -> Trackable<H> {
        Trackable::new(header, Some(self.coordinator()), disabled)
    }

    /// Current header offset.
    pub fn current_offset(&self) -> f64 {
        self.handle.current_offset()
    }
}
