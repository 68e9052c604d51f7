// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot-based section storage with allocation and measurement management.

use alloc::vec::Vec;

use kurbo::Rect;
use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::SectionId;
use crate::axis::ScrollAxis;
use crate::dirty;

/// Storage for all registered sections of one container.
///
/// Sections are addressed by [`SectionId`] handles. Internally, each
/// section occupies a slot in parallel arrays. Unregistered sections are
/// recycled via a free list, and generation counters make stale handles
/// detectable: a late mutation through a stale handle is dropped rather
/// than resurrecting purged state.
#[derive(Debug)]
pub struct SectionStore {
    // -- Measurement state --
    //
    // `None` until the section's first report; the entry in the derived
    // layout exists exactly when this is `Some`.
    pub(crate) rect: Vec<Option<Rect>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for SectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionStore {
    /// Creates an empty section store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rect: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Registers a new section and returns its handle.
    ///
    /// The section starts with no recorded measurement; it contributes to
    /// the derived layout only after its first [`set_rect`](Self::set_rect).
    pub fn register(&mut self) -> SectionId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.rect[idx as usize] = None;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.rect.push(None);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::MEMBERSHIP);

        SectionId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Unregisters a section, purging its measurement entry and freeing its
    /// slot for reuse.
    ///
    /// Returns `false` without effect if the handle is stale, so releasing
    /// twice is a no-op.
    pub fn unregister(&mut self, id: SectionId) -> bool {
        if !self.is_registered(id) {
            return false;
        }
        let idx = id.idx;

        self.rect[idx as usize] = None;
        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately read as stale.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::MEMBERSHIP);
        true
    }

    /// Returns whether the given handle refers to a currently registered
    /// section.
    #[must_use]
    pub fn is_registered(&self, id: SectionId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of currently registered sections.
    #[must_use]
    pub fn registered_len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Measurement API --

    /// Records a measured rectangle for `id`, replacing any previous entry.
    ///
    /// The first report creates the section's entry in the derived layout.
    /// Returns `false` without effect if the handle is stale: a size-change
    /// notification that races section teardown is dropped.
    pub fn set_rect(&mut self, id: SectionId, rect: Rect) -> bool {
        if !self.is_registered(id) {
            return false;
        }
        self.rect[id.idx as usize] = Some(rect);
        self.dirty.mark(id.idx, dirty::GEOMETRY);
        true
    }

    /// Returns the most recently measured rectangle for `id`, or `None` if
    /// the section has not reported a measurement or the handle is stale.
    #[must_use]
    pub fn rect(&self, id: SectionId) -> Option<Rect> {
        if !self.is_registered(id) {
            return None;
        }
        self.rect[id.idx as usize]
    }

    /// Iterates over all measured sections in ascending slot order.
    ///
    /// The order is deterministic across reads of the same state; it is not
    /// a semantic ordering.
    pub fn measured(&self) -> impl Iterator<Item = (SectionId, Rect)> + '_ {
        (0..self.len).filter_map(move |idx| {
            if self.free_list.contains(&idx) {
                return None;
            }
            self.rect[idx as usize].map(|rect| {
                (
                    SectionId {
                        idx,
                        generation: self.generation[idx as usize],
                    },
                    rect,
                )
            })
        })
    }

    /// Sums the extents of all measured sections along `axis`.
    #[must_use]
    pub fn sum_extent(&self, axis: ScrollAxis) -> f64 {
        self.measured().map(|(_, rect)| axis.extent(rect)).sum()
    }
}
