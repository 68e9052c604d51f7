// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them
//! back as an iterator of [`RecordedEvent`].
//!
//! Section identities are stored as raw `(index, generation)` pairs, since
//! handles cannot be fabricated outside the engine.

use kurbo::Rect;
use lamina_core::trace::{
    ContainerMeasureEvent, LayoutEvent, ReadinessEvent, SectionMeasureEvent,
    SectionRegisteredEvent, SectionUnregisteredEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_REGISTERED: u8 = 1;
const TAG_UNREGISTERED: u8 = 2;
const TAG_CONTAINER_MEASURE: u8 = 3;
const TAG_LAYOUT: u8 = 4;
const TAG_SECTION_MEASURE: u8 = 5;
const TAG_READINESS: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_rect(&mut self, rect: Rect) {
        self.write_f64(rect.x0);
        self.write_f64(rect.y0);
        self.write_f64(rect.x1);
        self.write_f64(rect.y1);
    }
}

impl TraceSink for RecorderSink {
    fn on_section_registered(&mut self, e: &SectionRegisteredEvent) {
        self.write_u8(TAG_REGISTERED);
        self.write_u64(e.seq);
        self.write_u32(e.id.index());
        self.write_u32(e.id.generation());
    }

    fn on_section_unregistered(&mut self, e: &SectionUnregisteredEvent) {
        self.write_u8(TAG_UNREGISTERED);
        self.write_u64(e.seq);
        self.write_u32(e.id.index());
        self.write_u32(e.id.generation());
    }

    fn on_container_measure(&mut self, e: &ContainerMeasureEvent) {
        self.write_u8(TAG_CONTAINER_MEASURE);
        self.write_u64(e.seq);
        self.write_rect(e.rect);
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.write_u8(TAG_LAYOUT);
        self.write_u64(e.seq);
        self.write_u32(e.section_count);
        self.write_f64(e.max_scroll_position);
    }

    fn on_section_measure(&mut self, e: &SectionMeasureEvent) {
        self.write_u8(TAG_SECTION_MEASURE);
        self.write_u64(e.seq);
        self.write_u32(e.id.index());
        self.write_u32(e.id.generation());
        self.write_rect(e.rect);
    }

    fn on_readiness(&mut self, e: &ReadinessEvent) {
        self.write_u8(TAG_READINESS);
        self.write_u64(e.seq);
        self.write_u32(e.id.index());
        self.write_u32(e.id.generation());
        self.write_u8(u8::from(e.ready));
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A decoded event, with section identities as raw `(index, generation)`
/// pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A section was registered.
    Registered {
        /// Event sequence number.
        seq: u64,
        /// Raw slot index.
        index: u32,
        /// Slot generation at registration.
        generation: u32,
    },
    /// A section's registration was released.
    Unregistered {
        /// Event sequence number.
        seq: u64,
        /// Raw slot index.
        index: u32,
        /// Slot generation at release.
        generation: u32,
    },
    /// The container was measured.
    ContainerMeasure {
        /// Event sequence number.
        seq: u64,
        /// The container's rectangle.
        rect: Rect,
    },
    /// A layout snapshot was derived.
    Layout {
        /// Event sequence number.
        seq: u64,
        /// Measured section count in the snapshot.
        section_count: u32,
        /// The derived, unclamped scroll bound.
        max_scroll_position: f64,
    },
    /// A section was measured.
    SectionMeasure {
        /// Event sequence number.
        seq: u64,
        /// Raw slot index.
        index: u32,
        /// Slot generation.
        generation: u32,
        /// The section's rectangle.
        rect: Rect,
    },
    /// A section's readiness flipped.
    Readiness {
        /// Event sequence number.
        seq: u64,
        /// Raw slot index.
        index: u32,
        /// Slot generation.
        generation: u32,
        /// The new readiness state.
        ready: bool,
    },
}

/// Decodes recorded bytes back into events.
///
/// Decoding stops at the first truncated or unrecognized record.
pub fn decode(bytes: &[u8]) -> Decoder<'_> {
    Decoder { bytes, pos: 0 }
}

/// Iterator over [`RecordedEvent`]s in a recorded buffer.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Decoder<'_> {
    fn read_u8(&mut self) -> Option<u8> {
        let v = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        let slice = self.bytes.get(self.pos..self.pos + 4)?;
        self.pos += 4;
        Some(u32::from_le_bytes(slice.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        let slice = self.bytes.get(self.pos..self.pos + 8)?;
        self.pos += 8;
        Some(u64::from_le_bytes(slice.try_into().ok()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_rect(&mut self) -> Option<Rect> {
        let x0 = self.read_f64()?;
        let y0 = self.read_f64()?;
        let x1 = self.read_f64()?;
        let y1 = self.read_f64()?;
        Some(Rect::new(x0, y0, x1, y1))
    }
}

impl Iterator for Decoder<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<RecordedEvent> {
        match self.read_u8()? {
            TAG_REGISTERED => Some(RecordedEvent::Registered {
                seq: self.read_u64()?,
                index: self.read_u32()?,
                generation: self.read_u32()?,
            }),
            TAG_UNREGISTERED => Some(RecordedEvent::Unregistered {
                seq: self.read_u64()?,
                index: self.read_u32()?,
                generation: self.read_u32()?,
            }),
            TAG_CONTAINER_MEASURE => Some(RecordedEvent::ContainerMeasure {
                seq: self.read_u64()?,
                rect: self.read_rect()?,
            }),
            TAG_LAYOUT => Some(RecordedEvent::Layout {
                seq: self.read_u64()?,
                section_count: self.read_u32()?,
                max_scroll_position: self.read_f64()?,
            }),
            TAG_SECTION_MEASURE => Some(RecordedEvent::SectionMeasure {
                seq: self.read_u64()?,
                index: self.read_u32()?,
                generation: self.read_u32()?,
                rect: self.read_rect()?,
            }),
            TAG_READINESS => Some(RecordedEvent::Readiness {
                seq: self.read_u64()?,
                index: self.read_u32()?,
                generation: self.read_u32()?,
                ready: self.read_u8()? != 0,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use lamina_core::axis::ScrollAxis;
    use lamina_core::manager::LayoutManager;

    use super::*;

    #[test]
    fn record_and_decode_a_measurement_session() {
        // Use real ids from a manager so index/generation are honest.
        let mut manager = LayoutManager::new(ScrollAxis::Y);
        let reg = manager.register();

        let mut sink = RecorderSink::new();
        sink.on_section_registered(&SectionRegisteredEvent {
            seq: 0,
            id: reg.id(),
        });
        sink.on_container_measure(&ContainerMeasureEvent {
            seq: 1,
            rect: Rect::new(0.0, 0.0, 300.0, 200.0),
        });
        sink.on_layout(&LayoutEvent {
            seq: 2,
            section_count: 0,
            max_scroll_position: -200.0,
        });

        let events: Vec<RecordedEvent> = decode(sink.as_bytes()).collect();
        assert_eq!(
            events,
            [
                RecordedEvent::Registered {
                    seq: 0,
                    index: reg.id().index(),
                    generation: reg.id().generation(),
                },
                RecordedEvent::ContainerMeasure {
                    seq: 1,
                    rect: Rect::new(0.0, 0.0, 300.0, 200.0),
                },
                RecordedEvent::Layout {
                    seq: 2,
                    section_count: 0,
                    max_scroll_position: -200.0,
                },
            ]
        );
    }

    #[test]
    fn truncated_buffer_stops_cleanly() {
        let mut sink = RecorderSink::new();
        sink.on_layout(&LayoutEvent {
            seq: 7,
            section_count: 1,
            max_scroll_position: 42.0,
        });
        let bytes = sink.into_bytes();
        // Cut the record short; the decoder must stop without panicking.
        let truncated = &bytes[..bytes.len() - 3];
        assert_eq!(decode(truncated).count(), 0);
    }
}
