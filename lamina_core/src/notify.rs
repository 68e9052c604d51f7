// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size-change notification contract for platform integrations.
//!
//! Lamina does not observe rendered sizes itself; platform glue does
//! (ResizeObserver on the web, layout callbacks in a UI toolkit, a
//! scripted notifier in tests). This module defines the boundary:
//!
//! - **Targets** — [`SurfaceTarget`] names one observed surface: the
//!   container itself or one section.
//! - **Events** — [`SizeEvent`] is a geometry report for one target.
//!   [`LayoutManager::apply`] routes it to the corresponding mutation.
//! - **[`SizeNotifier`]** — the trait platform glue implements. A `watch`
//!   must deliver the target's current geometry immediately and again on
//!   every change; `unwatch` releases the observation unconditionally and
//!   is idempotent (releasing twice, or releasing something never watched,
//!   is a no-op).
//!
//! # Lifecycle
//!
//! The container watches its own extent for its whole lifetime. Each
//! section's watch is acquired when the section mounts and must be
//! released unconditionally when it unmounts — on both the normal and the
//! error/teardown path. A notification that still arrives after teardown
//! carries a stale [`SectionId`](crate::section::SectionId) and is dropped
//! by the manager.

use kurbo::Rect;

use crate::manager::LayoutManager;
use crate::section::SectionId;

/// One observed surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceTarget {
    /// The container's own viewport extent.
    Container,
    /// One section's rendered extent.
    Section(SectionId),
}

/// A geometry report from the platform's size observation machinery.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeEvent {
    /// Which surface was measured.
    pub target: SurfaceTarget,
    /// Its current rectangle, replaced wholesale per report.
    pub rect: Rect,
}

/// Observes rendered surface sizes and reports geometry changes.
///
/// Implementations own the platform mechanism; the engine only expresses
/// which surfaces it cares about. Delivery of the resulting [`SizeEvent`]s
/// into [`LayoutManager::apply`] is wired by the integration layer, since
/// dispatch models (callbacks, queues, frame loops) differ per platform.
pub trait SizeNotifier {
    /// Starts observing `target`. The current geometry must be delivered
    /// immediately, then again on every change.
    fn watch(&mut self, target: SurfaceTarget);

    /// Stops observing `target`. Unconditional and idempotent.
    fn unwatch(&mut self, target: SurfaceTarget);
}

impl LayoutManager {
    /// Routes a size event to the corresponding mutation.
    pub fn apply(&mut self, event: &SizeEvent) {
        match event.target {
            SurfaceTarget::Container => self.set_container_rect(event.rect),
            SurfaceTarget::Section(id) => self.set_section_rect(id, event.rect),
        }
    }
}
