// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes
//! [Chrome Trace Event Format][spec] JSON to the given writer. Layout
//! derivations become counter events (a `max_scroll_position` track and a
//! `sections` track), lifecycle and measurement records become instant
//! events. Event sequence numbers are used directly as microsecond
//! timestamps, so tracks line up in event order.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable
/// for loading into `chrome://tracing` or
/// [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Registered {
                seq,
                index,
                generation,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "SectionRegistered",
                    "cat": "Lifecycle",
                    "ts": seq,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "index": index,
                        "generation": generation,
                    }
                }));
            }
            RecordedEvent::Unregistered {
                seq,
                index,
                generation,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "SectionUnregistered",
                    "cat": "Lifecycle",
                    "ts": seq,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "index": index,
                        "generation": generation,
                    }
                }));
            }
            RecordedEvent::ContainerMeasure { seq, rect } => {
                events.push(json!({
                    "ph": "i",
                    "name": "ContainerMeasure",
                    "cat": "Geometry",
                    "ts": seq,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "width": rect.width(),
                        "height": rect.height(),
                    }
                }));
            }
            RecordedEvent::Layout {
                seq,
                section_count,
                max_scroll_position,
            } => {
                events.push(json!({
                    "ph": "C",
                    "name": "layout",
                    "cat": "Layout",
                    "ts": seq,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "max_scroll_position": max_scroll_position,
                        "sections": section_count,
                    }
                }));
            }
            RecordedEvent::SectionMeasure {
                seq, index, rect, ..
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "SectionMeasure",
                    "cat": "Geometry",
                    "ts": seq,
                    "pid": 0,
                    "tid": index,
                    "s": "t",
                    "args": {
                        "width": rect.width(),
                        "height": rect.height(),
                    }
                }));
            }
            RecordedEvent::Readiness {
                seq, index, ready, ..
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Readiness",
                    "cat": "Lifecycle",
                    "ts": seq,
                    "pid": 0,
                    "tid": index,
                    "s": "t",
                    "args": {
                        "ready": ready,
                    }
                }));
            }
        }
    }

    serde_json::to_writer(&mut *writer, &events)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writer.flush()
}
