// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section identity and measurement storage.
//!
//! A *section* is one non-overlapping content block arranged along the
//! container's scroll axis. Each section has:
//!
//! - An identity ([`SectionId`]) — a generational handle that becomes stale
//!   when the section is unregistered, so a recycled slot can never be
//!   confused with its previous occupant.
//! - At most one measured rectangle. The entry exists exactly when the
//!   section has reported at least one measurement since registration; the
//!   rectangle is replaced wholesale on every subsequent report, never
//!   mutated in place.
//!
//! Sections are stored slot-addressed with free-list recycling. Mutations
//! mark the corresponding dirty channel (see [`dirty`](crate::dirty)) so
//! polling consumers can drain per-slot changes.

mod id;
mod store;

pub use id::SectionId;
pub use store::SectionStore;
