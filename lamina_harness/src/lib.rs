// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic test harness for lamina.
//!
//! Real hosts feed geometry into a [`LayoutManager`] from some platform
//! observer (a resize observer on the web, a window event loop natively).
//! Tests need the same data flow without a platform: [`ScriptedNotifier`]
//! plays the observer role with geometry the test scripts by hand, and
//! [`ScrollDriver`] wires a [`Container`] and its mounted sections to that
//! notifier so a test can mount, resize, and pump in a few lines.
//!
//! [`scroll_progress`] is the consumer-side companion: it turns a raw scroll
//! position plus the derived `max_scroll_position` into a normalized 0..=1
//! fraction, which is what animation timelines actually consume.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use lamina_core::axis::ScrollAxis;
use lamina_core::error::ScopeError;
use lamina_core::layout::Layout;
use lamina_core::notify::{SizeEvent, SizeNotifier, SurfaceTarget};
use lamina_core::scope::{Container, ScrollConfig, Section};
use lamina_core::section::SectionId;
use lamina_core::trace::{
    ContainerMeasureEvent, LayoutEvent, ReadinessEvent, SectionMeasureEvent,
    SectionRegisteredEvent, SectionUnregisteredEvent, Tracer,
};

/// One entry in a [`ScriptedNotifier`]'s observation history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchOp {
    /// The target's surface observation was acquired.
    Watch(SurfaceTarget),
    /// The target's surface observation was released.
    Unwatch(SurfaceTarget),
}

/// A [`SizeNotifier`] whose geometry is scripted by the test.
///
/// Scripting a rect for a target models the platform learning that surface's
/// size. If the target is watched, the new geometry is queued as a
/// [`SizeEvent`]; watching a target whose geometry is already known delivers
/// that geometry immediately, matching how resize observers report the
/// current size on observe. Events accumulate until [`take_events`] drains
/// them, which is what gives tests a deliberate "measurements have happened
/// but nothing was applied yet" window.
///
/// [`take_events`]: ScriptedNotifier::take_events
#[derive(Debug, Default)]
pub struct ScriptedNotifier {
    scripted: Vec<(SurfaceTarget, Rect)>,
    watched: Vec<SurfaceTarget>,
    pending: Vec<SizeEvent>,
    history: Vec<WatchOp>,
}

impl ScriptedNotifier {
    /// Creates a notifier with no scripted geometry and nothing watched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the current geometry for `target`.
    ///
    /// Queues a [`SizeEvent`] if the target is watched. Re-scripting the
    /// same rect still queues; the notifier does not deduplicate, the
    /// manager's change tracking is what tests dedup assertions against.
    pub fn script(&mut self, target: SurfaceTarget, rect: Rect) {
        match self.scripted.iter_mut().find(|(t, _)| *t == target) {
            Some((_, r)) => *r = rect,
            None => self.scripted.push((target, rect)),
        }
        if self.watched.contains(&target) {
            self.pending.push(SizeEvent { target, rect });
        }
    }

    /// Drains every queued event in arrival order.
    pub fn take_events(&mut self) -> Vec<SizeEvent> {
        core::mem::take(&mut self.pending)
    }

    /// Whether `target` is currently watched.
    #[must_use]
    pub fn is_watching(&self, target: SurfaceTarget) -> bool {
        self.watched.contains(&target)
    }

    /// Number of queued, undelivered events.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Every watch and unwatch this notifier has seen, in order.
    ///
    /// Redundant watches and unwatches are recorded too, so a test can
    /// assert the caller's acquire/release discipline, not just the net
    /// watch set.
    #[must_use]
    pub fn history(&self) -> &[WatchOp] {
        &self.history
    }
}

impl SizeNotifier for ScriptedNotifier {
    fn watch(&mut self, target: SurfaceTarget) {
        self.history.push(WatchOp::Watch(target));
        if self.watched.contains(&target) {
            return;
        }
        self.watched.push(target);
        // Initial delivery: a fresh observer reports the size it already has.
        if let Some((_, rect)) = self.scripted.iter().find(|(t, _)| *t == target) {
            self.pending.push(SizeEvent {
                target,
                rect: *rect,
            });
        }
    }

    fn unwatch(&mut self, target: SurfaceTarget) {
        self.history.push(WatchOp::Unwatch(target));
        self.watched.retain(|t| *t != target);
        // Nothing further is delivered for an unwatched target, including
        // events that were queued before the unwatch.
        self.pending.retain(|event| event.target != target);
    }
}

/// Drives a [`Container`] against a [`ScriptedNotifier`].
///
/// The driver owns the container, its mounted sections, and the notifier,
/// and keeps the watch set in sync with the mounted set: mounting a section
/// watches its surface, unmounting unwatches it, and the container surface
/// is watched for the driver's whole lifetime. [`pump`] is the single
/// delivery point, applying queued events and emitting trace events with a
/// monotonically increasing sequence number.
///
/// [`pump`]: ScrollDriver::pump
pub struct ScrollDriver {
    container: Container,
    // Mounted sections paired with the readiness last reported, so pump can
    // emit a readiness transition exactly once per flip.
    sections: Vec<(Section, bool)>,
    notifier: ScriptedNotifier,
    seq: u64,
}

impl ScrollDriver {
    /// Creates a driver for a container with the given config.
    #[must_use]
    pub fn new(config: ScrollConfig) -> Self {
        let mut notifier = ScriptedNotifier::new();
        notifier.watch(SurfaceTarget::Container);
        Self {
            container: Container::new(config),
            sections: Vec::new(),
            notifier,
            seq: 0,
        }
    }

    /// The driven container.
    #[must_use]
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Scripted notifier, for sizing surfaces from the test.
    pub fn notifier_mut(&mut self) -> &mut ScriptedNotifier {
        &mut self.notifier
    }

    /// Convenience for scripting a surface size.
    pub fn script(&mut self, target: SurfaceTarget, rect: Rect) {
        self.notifier.script(target, rect);
    }

    /// Mounts a new section in the container and watches its surface.
    ///
    /// # Errors
    ///
    /// Propagates [`ScopeError`] from [`Section::mount`]; with a live
    /// container and no enclosing section this does not occur.
    pub fn mount_section(&mut self, tracer: &mut Tracer<'_>) -> Result<SectionId, ScopeError> {
        let section = Section::mount(Some(&mut self.container), None)?;
        let id = section.id();
        self.notifier.watch(SurfaceTarget::Section(id));
        self.sections.push((section, false));
        let seq = self.next_seq();
        tracer.section_registered(&SectionRegisteredEvent { seq, id });
        Ok(id)
    }

    /// Unmounts a mounted section, unwatching its surface.
    ///
    /// Returns `false` if `id` does not name a section this driver mounted.
    pub fn unmount_section(&mut self, id: SectionId, tracer: &mut Tracer<'_>) -> bool {
        let Some(at) = self.sections.iter().position(|(s, _)| s.id() == id) else {
            return false;
        };
        let (section, _) = self.sections.remove(at);
        self.notifier.unwatch(SurfaceTarget::Section(id));
        section.unmount(&mut self.container);
        let seq = self.next_seq();
        tracer.section_unregistered(&SectionUnregisteredEvent { seq, id });
        true
    }

    /// Delivers every queued size event and returns the resulting layout.
    ///
    /// Emits one trace event per applied measurement, one readiness event
    /// per section whose readiness flipped, and a final layout event for
    /// the post-delivery state.
    pub fn pump(&mut self, tracer: &mut Tracer<'_>) -> Layout {
        for event in self.notifier.take_events() {
            let seq = self.next_seq();
            match event.target {
                SurfaceTarget::Container => {
                    tracer.container_measure(&ContainerMeasureEvent {
                        seq,
                        rect: event.rect,
                    });
                }
                SurfaceTarget::Section(id) => {
                    tracer.section_measure(&SectionMeasureEvent {
                        seq,
                        id,
                        rect: event.rect,
                    });
                }
            }
            self.container.manager_mut().apply(&event);
        }
        let mut flips: Vec<(SectionId, bool)> = Vec::new();
        for (section, last_ready) in &mut self.sections {
            let ready = section.is_ready(&self.container);
            if ready != *last_ready {
                *last_ready = ready;
                flips.push((section.id(), ready));
            }
        }
        for (id, ready) in flips {
            let seq = self.next_seq();
            tracer.readiness(&ReadinessEvent { seq, id, ready });
        }
        let layout = self.container.manager().layout();
        let seq = self.next_seq();
        tracer.layout(&LayoutEvent {
            seq,
            section_count: u32::try_from(layout.len()).expect("section slots are u32-indexed"),
            max_scroll_position: layout.max_scroll_position,
        });
        layout
    }

    /// Scroll axis of the driven container.
    #[must_use]
    pub fn axis(&self) -> ScrollAxis {
        self.container.axis()
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

impl core::fmt::Debug for ScrollDriver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollDriver")
            .field("sections", &self.sections.len())
            .field("pending", &self.notifier.pending_len())
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

/// Normalized scroll fraction for a position against a scroll range.
///
/// Returns `position / max_scroll_position` clamped to `0.0..=1.0`. A range
/// of zero or less means the content fits in the container, so every
/// position maps to `0.0`. Non-finite inputs also map to `0.0` rather than
/// poisoning downstream animation math.
#[must_use]
pub fn scroll_progress(position: f64, max_scroll_position: f64) -> f64 {
    if !(position.is_finite() && max_scroll_position.is_finite()) {
        return 0.0;
    }
    if max_scroll_position <= 0.0 {
        return 0.0;
    }
    (position / max_scroll_position).clamp(0.0, 1.0)
}
