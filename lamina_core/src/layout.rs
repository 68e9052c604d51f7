// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The derived layout snapshot and change tracking.
//!
//! [`Layout`] is a read-only value derived from the manager's current
//! state: the container rectangle, the measured section rectangles, and
//! the maximum scroll position
//!
//! ```text
//! max_scroll_position = Σ extent(axis, section) − extent(axis, container)
//! ```
//!
//! The result is deliberately unclamped: content smaller than the
//! container yields a negative value, and consumers decide how to treat
//! it (clamping is a consumer responsibility).
//!
//! [`LayoutChanges`] is the drain output for polling consumers, using raw
//! slot indices like the store's internal tracking. Subscribers that want
//! push delivery use
//! [`LayoutManager::subscribe`](crate::manager::LayoutManager::subscribe)
//! instead.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::axis::ScrollAxis;
use crate::section::{SectionId, SectionStore};

/// A read-only snapshot of the coordinated layout state.
///
/// Every snapshot reflects a single state generation: the container
/// rectangle and the section map always come from the same sequence of
/// mutations, never an interleaving of two.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Current container geometry.
    pub container: Rect,
    /// Measured sections in ascending slot order (deterministic, not
    /// semantic).
    pub sections: Vec<(SectionId, Rect)>,
    /// Derived scroll bound along the container's axis; may be negative or
    /// zero, never clamped.
    pub max_scroll_position: f64,
}

impl Layout {
    /// Returns the measured rectangle for `id`, if present in this
    /// snapshot.
    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<Rect> {
        self.sections
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, rect)| *rect)
    }

    /// Returns the number of measured sections in this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns whether no section has reported a measurement yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Derives a [`Layout`] as a pure function of the current inputs.
pub(crate) fn derive(axis: ScrollAxis, container: Rect, store: &SectionStore) -> Layout {
    let sections: Vec<(SectionId, Rect)> = store.measured().collect();
    let content: f64 = sections.iter().map(|(_, rect)| axis.extent(*rect)).sum();
    Layout {
        container,
        sections,
        max_scroll_position: content - axis.extent(container),
    }
}

/// The set of changes produced by a single
/// [`LayoutManager::drain_changes`](crate::manager::LayoutManager::drain_changes)
/// call.
///
/// Section fields contain raw slot indices of the sections that changed in
/// the corresponding category since the previous drain.
#[derive(Clone, Debug, Default)]
pub struct LayoutChanges {
    /// Whether the container rectangle was replaced.
    pub container_changed: bool,
    /// Sections whose measured rectangle was replaced.
    pub measured: Vec<u32>,
    /// Sections registered since the last drain.
    pub added: Vec<u32>,
    /// Sections unregistered since the last drain.
    pub removed: Vec<u32>,
}

impl LayoutChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.container_changed = false;
        self.measured.clear();
        self.added.clear();
        self.removed.clear();
    }

    /// Returns whether this drain observed no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.container_changed
            && self.measured.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_sums_extents_along_axis() {
        let mut store = SectionStore::new();
        let a = store.register();
        let b = store.register();
        store.set_rect(a, Rect::new(0.0, 0.0, 300.0, 150.0));
        store.set_rect(b, Rect::new(0.0, 150.0, 300.0, 550.0));

        let container = Rect::new(0.0, 0.0, 300.0, 200.0);
        let layout = derive(ScrollAxis::Y, container, &store);
        assert_eq!(layout.max_scroll_position, 150.0 + 400.0 - 200.0);

        let layout = derive(ScrollAxis::X, container, &store);
        assert_eq!(layout.max_scroll_position, 300.0 + 300.0 - 300.0);
    }

    #[test]
    fn derive_with_no_sections_is_negative_container_extent() {
        let store = SectionStore::new();
        let container = Rect::new(0.0, 0.0, 300.0, 200.0);
        let layout = derive(ScrollAxis::Y, container, &store);
        assert!(layout.is_empty());
        assert_eq!(layout.max_scroll_position, -200.0);
    }

    #[test]
    fn section_lookup() {
        let mut store = SectionStore::new();
        let a = store.register();
        let b = store.register();
        let rect = Rect::new(0.0, 0.0, 10.0, 20.0);
        store.set_rect(a, rect);

        let layout = derive(ScrollAxis::Y, Rect::ZERO, &store);
        assert_eq!(layout.section(a), Some(rect));
        assert_eq!(layout.section(b), None);
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn changes_clear_resets_everything() {
        let mut changes = LayoutChanges {
            container_changed: true,
            ..Default::default()
        };
        changes.measured.push(3);
        changes.added.push(1);
        changes.removed.push(2);
        assert!(!changes.is_empty());

        changes.clear();
        assert!(changes.is_empty());
    }
}
