// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Lamina uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! surface per-section changes to polling consumers. Sections form a flat
//! set with no hierarchy, so neither channel propagates: only the
//! explicitly marked slot appears in the drain output.
//!
//! - **[`GEOMETRY`]** — A section's measured rectangle was replaced.
//! - **[`MEMBERSHIP`]** — A section was registered or unregistered.
//!
//! The container rectangle is a single value rather than a keyed slot, so
//! it is tracked with a plain flag in the manager instead of a channel.
//!
//! Callers never need to query dirty state directly. Each
//! [`LayoutManager::drain_changes`](crate::manager::LayoutManager::drain_changes)
//! call drains both channels and surfaces the results as
//! [`LayoutChanges`](crate::layout::LayoutChanges).

use understory_dirty::Channel;

/// A section's measured rectangle changed — no propagation needed.
pub const GEOMETRY: Channel = Channel::new(0);

/// Section membership changed (register/unregister).
pub const MEMBERSHIP: Channel = Channel::new(1);
