// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout manager: mutation surface and derived reads.
//!
//! [`LayoutManager`] wraps a [`SectionStore`] together with the container
//! rectangle and the scroll axis. Mutations are total functions: any finite
//! rectangle is accepted, including zero-sized ones, and a stale section
//! handle is dropped rather than failing. Structural misuse is validated by
//! the [`scope`](crate::scope) protocol, not here.
//!
//! Reads go through [`layout`](LayoutManager::layout), which derives the
//! snapshot from the current state. Derivation is memoized against a state
//! generation counter, so repeated reads of unchanged state reuse the
//! previous snapshot; memoization is observationally invisible.
//!
//! Consumers can observe mutations two ways:
//!
//! - **Push** — [`subscribe`](LayoutManager::subscribe) registers a
//!   callback invoked synchronously, with the fresh snapshot, after every
//!   layout-affecting mutation.
//! - **Poll** — [`drain_changes`](LayoutManager::drain_changes) drains the
//!   dirty channels accumulated since the previous drain.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use kurbo::Rect;

use crate::axis::ScrollAxis;
use crate::dirty;
use crate::layout::{self, Layout, LayoutChanges};
use crate::section::{SectionId, SectionStore};

/// A handle to one registered layout subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// A disposer capability for one registered section.
///
/// Returned by [`LayoutManager::register`]; callers must pass it back to
/// [`dispose`](Self::dispose) on teardown so the section's entry is purged
/// and its slot released. Disposal consumes the capability, and a stale
/// release (for example after the id was already unregistered directly) is
/// a no-op.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "sections must be disposed on teardown to release their layout entry"]
pub struct Registration {
    id: SectionId,
}

impl Registration {
    /// Returns the registered section's identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> SectionId {
        self.id
    }

    /// Releases the registration, purging the section's entry.
    pub fn dispose(self, manager: &mut LayoutManager) {
        manager.unregister(self.id);
    }
}

type Callback = Box<dyn FnMut(&Layout)>;

/// Coordinates container and section geometry and derives the scroll bound.
///
/// Exactly one container owns one `LayoutManager`; it is created when the
/// container is instantiated and discarded with it, and is never shared
/// across two containers. The axis is fixed for the manager's lifetime.
pub struct LayoutManager {
    axis: ScrollAxis,
    container: Rect,
    store: SectionStore,
    container_dirty: bool,
    // State generation; bumped by every layout-affecting mutation and used
    // as the memo key for `layout()`.
    generation: u64,
    cache: RefCell<Option<(u64, Layout)>>,
    subscribers: Vec<(SubscriberId, Callback)>,
    next_subscriber: u64,
}

impl fmt::Debug for LayoutManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutManager")
            .field("axis", &self.axis)
            .field("container", &self.container)
            .field("store", &self.store)
            .field("generation", &self.generation)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl LayoutManager {
    /// Creates a manager for a container scrolling along `axis`.
    ///
    /// The container rectangle starts at [`Rect::ZERO`] ("not yet
    /// measured") and no sections are registered.
    #[must_use]
    pub fn new(axis: ScrollAxis) -> Self {
        Self {
            axis,
            container: Rect::ZERO,
            store: SectionStore::new(),
            container_dirty: false,
            generation: 0,
            cache: RefCell::new(None),
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Returns the scroll axis this manager sums extents along.
    #[inline]
    #[must_use]
    pub const fn axis(&self) -> ScrollAxis {
        self.axis
    }

    /// Returns the current container rectangle.
    #[inline]
    #[must_use]
    pub const fn container_rect(&self) -> Rect {
        self.container
    }

    /// Returns the section store for direct read access.
    #[must_use]
    pub fn sections(&self) -> &SectionStore {
        &self.store
    }

    // -- Registration API --

    /// Registers a new section, returning its disposer capability.
    ///
    /// The section contributes to the derived layout only once it has
    /// reported a measurement, so registration alone does not notify
    /// subscribers.
    pub fn register(&mut self) -> Registration {
        Registration {
            id: self.store.register(),
        }
    }

    /// Unregisters a section, purging its measurement entry.
    ///
    /// If the section had a measured entry the derived layout changes and
    /// subscribers are notified. Stale ids are a no-op, so releasing twice
    /// is harmless.
    pub fn unregister(&mut self, id: SectionId) {
        let measured = self.store.rect(id).is_some();
        if self.store.unregister(id) && measured {
            self.bump_and_notify();
        }
    }

    // -- Mutation API --

    /// Replaces the stored container rectangle unconditionally.
    ///
    /// No validation is applied: zero dimensions represent "not yet
    /// measured" or collapsed states and are accepted as-is.
    pub fn set_container_rect(&mut self, rect: Rect) {
        self.container = rect;
        self.container_dirty = true;
        self.bump_and_notify();
    }

    /// Records a measured rectangle for `id`, creating the section's entry
    /// on its first report and overwriting it thereafter.
    ///
    /// Calls for distinct ids commute: only the most recent rectangle per
    /// id matters. A stale id (a notification racing teardown) is dropped
    /// without effect.
    pub fn set_section_rect(&mut self, id: SectionId, rect: Rect) {
        if self.store.set_rect(id, rect) {
            self.bump_and_notify();
        }
    }

    // -- Derived reads --

    /// Returns the current derived layout snapshot.
    ///
    /// A single read always reflects a single state generation: the
    /// container rectangle, the section map, and the maximum scroll
    /// position all come from the same sequence of mutations. The read
    /// immediately following a mutation sees that mutation's effect.
    #[must_use]
    pub fn layout(&self) -> Layout {
        let mut cache = self.cache.borrow_mut();
        if let Some((generation, layout)) = cache.as_ref()
            && *generation == self.generation
        {
            return layout.clone();
        }
        let layout = layout::derive(self.axis, self.container, &self.store);
        *cache = Some((self.generation, layout.clone()));
        layout
    }

    /// Returns whether a section is ready to render.
    ///
    /// A section is ready once it has reported at least one measurement
    /// and the container has a non-degenerate (non-zero width and height)
    /// rectangle. Recomputed per read, never stored.
    #[must_use]
    pub fn is_ready(&self, id: SectionId) -> bool {
        self.store.rect(id).is_some()
            && self.container.width() != 0.0
            && self.container.height() != 0.0
    }

    // -- Subscriptions --

    /// Registers a callback invoked synchronously, with the fresh snapshot,
    /// after every layout-affecting mutation.
    ///
    /// Callbacks run in subscription order on the mutating call's stack;
    /// there is no background delivery.
    pub fn subscribe(&mut self, callback: impl FnMut(&Layout) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscriber. Removing one that is already gone is a no-op.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    // -- Change drains --

    /// Drains the changes accumulated since the previous drain.
    pub fn drain_changes(&mut self) -> LayoutChanges {
        let mut changes = LayoutChanges::default();
        self.drain_changes_into(&mut changes);
        changes
    }

    /// Like [`drain_changes`](Self::drain_changes), but reuses a
    /// caller-provided buffer to avoid allocation.
    pub fn drain_changes_into(&mut self, changes: &mut LayoutChanges) {
        changes.clear();
        changes.container_changed = core::mem::take(&mut self.container_dirty);

        changes.measured = self
            .store
            .dirty
            .drain(dirty::GEOMETRY)
            .deterministic()
            .run()
            .collect();

        // Drain MEMBERSHIP (just consume; the lifecycle lists carry the
        // affected slots).
        let _: Vec<u32> = self
            .store
            .dirty
            .drain(dirty::MEMBERSHIP)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.store.pending_added, &mut changes.added);
        core::mem::swap(&mut self.store.pending_removed, &mut changes.removed);
    }

    // -- Internal helpers --

    fn bump_and_notify(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.layout();
        for (_, callback) in &mut self.subscribers {
            callback(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;

    fn rect(width: f64, height: f64) -> Rect {
        Rect::new(0.0, 0.0, width, height)
    }

    #[test]
    fn max_scroll_position_sums_sections_minus_container() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        manager.set_container_rect(rect(300.0, 200.0));
        let a = manager.register();
        let b = manager.register();
        manager.set_section_rect(a.id(), rect(300.0, 150.0));
        manager.set_section_rect(b.id(), rect(300.0, 400.0));

        assert_eq!(manager.layout().max_scroll_position, 350.0);
    }

    #[test]
    fn remeasured_container_can_drive_bound_negative() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        manager.set_container_rect(rect(300.0, 200.0));
        let a = manager.register();
        let b = manager.register();
        manager.set_section_rect(a.id(), rect(300.0, 150.0));
        manager.set_section_rect(b.id(), rect(300.0, 400.0));

        manager.set_container_rect(rect(300.0, 600.0));
        // Not clamped: content is smaller than the viewport.
        assert_eq!(manager.layout().max_scroll_position, -50.0);
    }

    #[test]
    fn empty_manager_bound_is_negative_container_extent() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        manager.set_container_rect(rect(300.0, 200.0));
        assert_eq!(manager.layout().max_scroll_position, -200.0);
    }

    #[test]
    fn horizontal_axis_sums_widths() {
        let mut manager = LayoutManager::new(ScrollAxis::X);
        manager.set_container_rect(rect(300.0, 200.0));
        let a = manager.register();
        manager.set_section_rect(a.id(), rect(500.0, 200.0));

        assert_eq!(manager.layout().max_scroll_position, 200.0);
    }

    #[test]
    fn section_reports_commute_across_distinct_ids() {
        let build = |order: &[usize]| {
            let mut manager = LayoutManager::new(ScrollAxis::Y);
            manager.set_container_rect(rect(300.0, 200.0));
            let regs = [manager.register(), manager.register(), manager.register()];
            let rects = [rect(300.0, 100.0), rect(300.0, 250.0), rect(300.0, 75.0)];
            for &i in order {
                manager.set_section_rect(regs[i].id(), rects[i]);
            }
            manager.layout()
        };

        let forward = build(&[0, 1, 2]);
        let backward = build(&[2, 1, 0]);
        let mixed = build(&[1, 0, 2, 1, 1]);

        assert_eq!(forward.max_scroll_position, backward.max_scroll_position);
        assert_eq!(forward.max_scroll_position, mixed.max_scroll_position);
        assert_eq!(forward.sections.len(), backward.sections.len());
    }

    #[test]
    fn identical_container_rect_leaves_layout_unchanged() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let a = manager.register();
        manager.set_section_rect(a.id(), rect(300.0, 150.0));

        manager.set_container_rect(rect(300.0, 200.0));
        let first = manager.layout();
        manager.set_container_rect(rect(300.0, 200.0));
        assert_eq!(manager.layout(), first);
    }

    #[test]
    fn read_after_mutation_sees_the_mutation() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let a = manager.register();

        // Prime the memoized snapshot, then mutate.
        let before = manager.layout();
        manager.set_section_rect(a.id(), rect(300.0, 120.0));
        let after = manager.layout();

        assert!(before.is_empty());
        assert_eq!(after.len(), 1);
        assert_eq!(after.max_scroll_position, 120.0);
    }

    #[test]
    fn snapshot_is_internally_consistent() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        manager.set_container_rect(rect(300.0, 200.0));
        let a = manager.register();
        manager.set_section_rect(a.id(), rect(300.0, 500.0));

        let layout = manager.layout();
        let content: f64 = layout
            .sections
            .iter()
            .map(|(_, r)| ScrollAxis::Y.extent(*r))
            .sum();
        assert_eq!(
            layout.max_scroll_position,
            content - ScrollAxis::Y.extent(layout.container),
            "bound must be derived from the same snapshot's rects"
        );
    }

    #[test]
    fn readiness_requires_measurement_and_container() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let a = manager.register();

        assert!(!manager.is_ready(a.id()));

        // Section reports before the container has been measured.
        manager.set_section_rect(a.id(), rect(300.0, 150.0));
        assert!(!manager.is_ready(a.id()));

        // Ready flips exactly when the container gains real dimensions,
        // with no further action on the section.
        manager.set_container_rect(rect(300.0, 200.0));
        assert!(manager.is_ready(a.id()));
    }

    #[test]
    fn readiness_requires_both_container_dimensions() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let a = manager.register();
        manager.set_section_rect(a.id(), rect(300.0, 150.0));

        manager.set_container_rect(rect(0.0, 200.0));
        assert!(!manager.is_ready(a.id()));
        manager.set_container_rect(rect(300.0, 0.0));
        assert!(!manager.is_ready(a.id()));
        manager.set_container_rect(rect(300.0, 200.0));
        assert!(manager.is_ready(a.id()));
    }

    #[test]
    fn unregister_purges_entry_and_recomputes_bound() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        manager.set_container_rect(rect(300.0, 200.0));
        let a = manager.register();
        let b = manager.register();
        manager.set_section_rect(a.id(), rect(300.0, 150.0));
        manager.set_section_rect(b.id(), rect(300.0, 400.0));
        assert_eq!(manager.layout().max_scroll_position, 350.0);

        let id = a.id();
        a.dispose(&mut manager);
        let layout = manager.layout();
        assert_eq!(layout.section(id), None);
        assert_eq!(layout.max_scroll_position, 400.0 - 200.0);
    }

    #[test]
    fn subscribers_see_each_layout_affecting_mutation() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let seen: Rc<RefCell<Vec<f64>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let _sub = manager.subscribe(move |layout| {
            sink.borrow_mut().push(layout.max_scroll_position);
        });

        // Registration alone changes nothing observable.
        let a = manager.register();
        assert!(seen.borrow().is_empty());

        manager.set_container_rect(rect(300.0, 200.0));
        manager.set_section_rect(a.id(), rect(300.0, 500.0));
        assert_eq!(*seen.borrow(), [-200.0, 300.0]);
    }

    #[test]
    fn subscribers_run_in_subscription_order() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let log: Rc<RefCell<Vec<(u8, f64)>>> = Rc::default();

        let first = Rc::clone(&log);
        let _a = manager.subscribe(move |layout| {
            first.borrow_mut().push((1, layout.max_scroll_position));
        });
        let second = Rc::clone(&log);
        let _b = manager.subscribe(move |layout| {
            second.borrow_mut().push((2, layout.max_scroll_position));
        });

        manager.set_container_rect(rect(300.0, 200.0));
        manager.set_container_rect(rect(300.0, 500.0));

        // Both callbacks run per mutation, earliest subscription first.
        assert_eq!(
            *log.borrow(),
            [(1, -200.0), (2, -200.0), (1, -500.0), (2, -500.0)]
        );
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let seen: Rc<RefCell<Vec<f64>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let sub = manager.subscribe(move |layout| {
            sink.borrow_mut().push(layout.max_scroll_position);
        });

        manager.unsubscribe(sub);
        manager.unsubscribe(sub);
        manager.set_container_rect(rect(300.0, 200.0));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn stale_section_report_is_dropped_silently() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let a = manager.register();
        let id = a.id();
        a.dispose(&mut manager);

        let seen: Rc<RefCell<Vec<f64>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let _sub = manager.subscribe(move |layout| {
            sink.borrow_mut().push(layout.max_scroll_position);
        });

        manager.set_section_rect(id, rect(300.0, 150.0));
        assert!(seen.borrow().is_empty(), "stale report must not notify");
        assert!(manager.layout().is_empty());
    }

    #[test]
    fn drain_changes_reports_each_category_once() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let a = manager.register();
        manager.set_container_rect(rect(300.0, 200.0));
        manager.set_section_rect(a.id(), rect(300.0, 150.0));

        let changes = manager.drain_changes();
        assert!(changes.container_changed);
        assert_eq!(changes.measured, [a.id().index()]);
        assert_eq!(changes.added, [a.id().index()]);
        assert!(changes.removed.is_empty());

        // Nothing mutated since: the next drain is empty.
        assert!(manager.drain_changes().is_empty());

        let id = a.id();
        a.dispose(&mut manager);
        let changes = manager.drain_changes();
        assert_eq!(changes.removed, [id.index()]);
        assert!(!changes.container_changed);
    }

    #[test]
    fn drain_changes_into_reuses_buffer() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let a = manager.register();
        let mut changes = LayoutChanges::default();

        manager.drain_changes_into(&mut changes);
        assert_eq!(changes.added, [a.id().index()]);

        manager.set_section_rect(a.id(), rect(300.0, 10.0));
        manager.drain_changes_into(&mut changes);
        assert!(changes.added.is_empty(), "added should be cleared");
        assert_eq!(changes.measured, [a.id().index()]);
    }

    #[test]
    fn ids_are_distinct_while_concurrently_registered() {
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let regs: Vec<Registration> = (0..8).map(|_| manager.register()).collect();
        for (i, a) in regs.iter().enumerate() {
            for b in &regs[i + 1..] {
                assert_ne!(a.id(), b.id());
            }
        }
    }
}
