// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the geometry event loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the driving layer (a notifier pump, a demo harness) calls as geometry
//! flows through the engine. All method bodies default to no-ops, so
//! implementing only the events you care about is fine. The engine's own
//! store never emits events; emission belongs to whoever owns the event
//! loop.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Events carry a caller-supplied sequence number (`seq`): the engine has
//! no clock, so ordering is expressed by whoever pumps the events.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates the per-section measurement
//!   and readiness events plus the corresponding `TraceSink` methods.

use kurbo::Rect;

use crate::section::SectionId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a section is registered with the layout manager.
#[derive(Clone, Copy, Debug)]
pub struct SectionRegisteredEvent {
    /// Caller-supplied event sequence number.
    pub seq: u64,
    /// The newly allocated identity.
    pub id: SectionId,
}

/// Emitted when a section's registration is released.
#[derive(Clone, Copy, Debug)]
pub struct SectionUnregisteredEvent {
    /// Caller-supplied event sequence number.
    pub seq: u64,
    /// The released identity (stale from this point on).
    pub id: SectionId,
}

/// Emitted when a container geometry report is applied.
#[derive(Clone, Copy, Debug)]
pub struct ContainerMeasureEvent {
    /// Caller-supplied event sequence number.
    pub seq: u64,
    /// The container's new rectangle.
    pub rect: Rect,
}

/// Emitted after a derived layout read, summarizing the snapshot.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEvent {
    /// Caller-supplied event sequence number.
    pub seq: u64,
    /// Number of measured sections in the snapshot.
    pub section_count: u32,
    /// The derived, unclamped scroll bound.
    pub max_scroll_position: f64,
}

/// Emitted when a section geometry report is applied (requires
/// `trace-rich`).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct SectionMeasureEvent {
    /// Caller-supplied event sequence number.
    pub seq: u64,
    /// The measured section.
    pub id: SectionId,
    /// Its new rectangle.
    pub rect: Rect,
}

/// Emitted when a section's readiness flips (requires `trace-rich`).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct ReadinessEvent {
    /// Caller-supplied event sequence number.
    pub seq: u64,
    /// The section whose readiness changed.
    pub id: SectionId,
    /// The new readiness state.
    pub ready: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the geometry event loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a section is registered.
    fn on_section_registered(&mut self, e: &SectionRegisteredEvent) {
        _ = e;
    }

    /// Called when a section's registration is released.
    fn on_section_unregistered(&mut self, e: &SectionUnregisteredEvent) {
        _ = e;
    }

    /// Called when a container geometry report is applied.
    fn on_container_measure(&mut self, e: &ContainerMeasureEvent) {
        _ = e;
    }

    /// Called after a derived layout read.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }

    /// Called when a section geometry report is applied (requires
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_section_measure(&mut self, e: &SectionMeasureEvent) {
        _ = e;
    }

    /// Called when a section's readiness flips (requires `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    fn on_readiness(&mut self, e: &ReadinessEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SectionRegisteredEvent`].
    #[inline]
    pub fn section_registered(&mut self, e: &SectionRegisteredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_section_registered(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SectionUnregisteredEvent`].
    #[inline]
    pub fn section_unregistered(&mut self, e: &SectionUnregisteredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_section_unregistered(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ContainerMeasureEvent`].
    #[inline]
    pub fn container_measure(&mut self, e: &ContainerMeasureEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_container_measure(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayoutEvent`].
    #[inline]
    pub fn layout(&mut self, e: &LayoutEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SectionMeasureEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn section_measure(&mut self, e: &SectionMeasureEvent) {
        if let Some(s) = &mut self.sink {
            s.on_section_measure(e);
        }
    }

    /// Emits a [`ReadinessEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn readiness(&mut self, e: &ReadinessEvent) {
        if let Some(s) = &mut self.sink {
            s.on_readiness(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_tracer_accepts_events() {
        let mut tracer = Tracer::none();
        tracer.layout(&LayoutEvent {
            seq: 0,
            section_count: 0,
            max_scroll_position: -200.0,
        });
    }
}
