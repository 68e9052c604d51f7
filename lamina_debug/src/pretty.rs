// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use kurbo::Rect;
use lamina_core::trace::{
    ContainerMeasureEvent, LayoutEvent, ReadinessEvent, SectionMeasureEvent,
    SectionRegisteredEvent, SectionUnregisteredEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn fmt_rect(rect: Rect) -> String {
    format!(
        "{}x{}@({},{})",
        rect.width(),
        rect.height(),
        rect.x0,
        rect.y0
    )
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_section_registered(&mut self, e: &SectionRegisteredEvent) {
        let _ = writeln!(self.writer, "[register] seq={} id={:?}", e.seq, e.id);
    }

    fn on_section_unregistered(&mut self, e: &SectionUnregisteredEvent) {
        let _ = writeln!(self.writer, "[unregister] seq={} id={:?}", e.seq, e.id);
    }

    fn on_container_measure(&mut self, e: &ContainerMeasureEvent) {
        let _ = writeln!(
            self.writer,
            "[container] seq={} rect={}",
            e.seq,
            fmt_rect(e.rect),
        );
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] seq={} sections={} max_scroll={}",
            e.seq, e.section_count, e.max_scroll_position,
        );
    }

    fn on_section_measure(&mut self, e: &SectionMeasureEvent) {
        let _ = writeln!(
            self.writer,
            "[section] seq={} id={:?} rect={}",
            e.seq,
            e.id,
            fmt_rect(e.rect),
        );
    }

    fn on_readiness(&mut self, e: &ReadinessEvent) {
        let state = if e.ready { "ready" } else { "not-ready" };
        let _ = writeln!(self.writer, "[ready] seq={} id={:?} {state}", e.seq, e.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_layout() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_layout(&LayoutEvent {
            seq: 4,
            section_count: 2,
            max_scroll_position: 350.0,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[layout]"), "got: {output}");
        assert!(output.contains("max_scroll=350"), "got: {output}");
    }

    #[test]
    fn pretty_print_container_rect() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_container_measure(&ContainerMeasureEvent {
            seq: 1,
            rect: Rect::new(0.0, 0.0, 300.0, 200.0),
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("300x200"), "got: {output}");
    }
}
