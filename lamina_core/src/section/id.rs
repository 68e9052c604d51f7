// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section identity.

use core::fmt;

/// A handle to a section in a [`SectionStore`](super::SectionStore).
///
/// Contains both a slot index and a generation counter. The id is unique
/// for the lifetime of one registered section, stable across
/// re-measurements, and never reused while the section is registered; a
/// slot becomes eligible for reuse only after unregistration, at which
/// point the generation is bumped and the old handle is detectably stale.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter — must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl SectionId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({}@gen{})", self.idx, self.generation)
    }
}
