// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll layout coordination for containers of axis-aligned sections.
//!
//! `lamina_core` tracks the geometry of one scrollable container and an
//! arbitrary number of non-overlapping content sections laid out end-to-end
//! along one axis, and derives the maximum scroll position from it. It is
//! `no_std` compatible (with `alloc`) and performs no scrolling, animation,
//! or rendering itself: it is a pure, synchronous derivation engine fed by
//! externally observed size changes.
//!
//! # Architecture
//!
//! Geometry flows from a platform size-change notifier into the manager,
//! and consumers read the derived snapshot back out:
//!
//! ```text
//!   SizeNotifier (platform resize observation)
//!       │
//!       ▼
//!   SizeEvent ──► LayoutManager::apply()
//!                      │
//!                      ├──► Layout (derived snapshot, memoized per generation)
//!                      ├──► subscribers (invoked synchronously per mutation)
//!                      └──► LayoutChanges (drained by polling consumers)
//! ```
//!
//! **[`manager`]** — [`LayoutManager`](manager::LayoutManager): the mutation
//! surface (`set_container_rect`, `set_section_rect`), explicit section
//! registration with disposer capabilities, the memoized [`layout`] read,
//! and the subscriber list.
//!
//! **[`section`]** — Slot-based section storage with generational
//! [`SectionId`](section::SectionId) handles. A section's rect entry exists
//! exactly when the section has reported at least one measurement.
//!
//! **[`scope`]** — The container/section coordination protocol: the
//! published configuration bundle, structural validation at mount time
//! (no enclosing container, illegal nesting), and readiness derivation.
//!
//! **[`layout`]** — The derived read-only snapshot and the change-drain
//! type for polling consumers.
//!
//! **[`dirty`]** — Dirty-tracking channels via `understory_dirty`.
//!
//! **[`notify`]** — The boundary contract platform glue implements to feed
//! size changes into the engine.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for instrumentation, with the zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-section
//!   measurement and readiness events.

#![no_std]

extern crate alloc;

pub mod axis;
pub mod dirty;
pub mod error;
pub mod layout;
pub mod manager;
pub mod notify;
pub mod scope;
pub mod section;
pub mod trace;
