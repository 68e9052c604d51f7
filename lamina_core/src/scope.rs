// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The container/section coordination protocol.
//!
//! A [`Container`] is the single scrollable viewport. It owns exactly one
//! [`LayoutManager`] and publishes a [`ScrollConfig`] bundle (axis plus the
//! pass-through throttle amount) to its subtree. A [`Section`] must be
//! mounted with a container in scope and must not be nested inside another
//! section; both rules are checked once, synchronously, at mount time —
//! there is no recovery path short of restructuring the composition.
//!
//! Rather than locating the container ambiently through a surrounding
//! render tree, the context is an explicit argument: whoever mounts a
//! section passes the enclosing container (or `None`) and the enclosing
//! section (or `None`), and both failure modes surface as synchronous
//! [`ScopeError`]s.
//!
//! A section's lifecycle is `Unregistered → Registered(id) → Destroyed`:
//! mounting registers exactly once and records the id for the instance's
//! lifetime; [`Section::unmount`] releases the registration (purging the
//! layout entry) and consumes the section.

use crate::axis::ScrollAxis;
use crate::error::ScopeError;
use crate::manager::{LayoutManager, Registration};
use crate::section::SectionId;

/// The configuration bundle a container publishes to its subtree.
///
/// Both values are immutable for the container's lifetime once published;
/// if the source configuration changes, a new container (and bundle) is
/// created rather than mutating one that consumers may have captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollConfig {
    /// The axis along which sections are laid out end-to-end.
    pub axis: ScrollAxis,
    /// Pass-through throttle amount, in milliseconds, for consumers that
    /// rate-limit scroll-linked work. The engine carries but never
    /// interprets it.
    pub throttle_amount: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            axis: ScrollAxis::Y,
            throttle_amount: 90,
        }
    }
}

/// The single scrollable viewport owning one [`LayoutManager`].
///
/// A manager is never shared across two containers; it is created with the
/// container and discarded with it.
#[derive(Debug)]
pub struct Container {
    config: ScrollConfig,
    manager: LayoutManager,
}

impl Default for Container {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl Container {
    /// Creates a container with the given configuration.
    #[must_use]
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            manager: LayoutManager::new(config.axis),
        }
    }

    /// Returns the published configuration bundle.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> ScrollConfig {
        self.config
    }

    /// Returns the scroll axis.
    #[inline]
    #[must_use]
    pub const fn axis(&self) -> ScrollAxis {
        self.config.axis
    }

    /// Returns the pass-through throttle amount.
    #[inline]
    #[must_use]
    pub const fn throttle_amount(&self) -> u32 {
        self.config.throttle_amount
    }

    /// Returns the layout manager for derived reads.
    #[must_use]
    pub fn manager(&self) -> &LayoutManager {
        &self.manager
    }

    /// Returns the layout manager for mutations.
    pub fn manager_mut(&mut self) -> &mut LayoutManager {
        &mut self.manager
    }

    /// Mounts a section directly inside this container.
    ///
    /// `enclosing` is the section whose subtree the new section would live
    /// in, if any; passing `Some` fails with
    /// [`ScopeError::NestedSection`].
    ///
    /// # Errors
    ///
    /// See [`Section::mount`].
    pub fn mount_section(&mut self, enclosing: Option<&Section>) -> Result<Section, ScopeError> {
        Section::mount(Some(self), enclosing)
    }
}

/// One mounted content block of a container.
///
/// Holds the section's identity for the lifetime of the instance. The
/// measurement entry is created by the first geometry report (via
/// [`LayoutManager::set_section_rect`]), not by mounting.
#[derive(Debug)]
pub struct Section {
    registration: Registration,
}

impl Section {
    /// Mounts a section, validating the composition structurally.
    ///
    /// Validation happens once, before any geometry is reported, in the
    /// same order the checks apply compositionally: nesting first, then
    /// container presence.
    ///
    /// # Errors
    ///
    /// - [`ScopeError::NestedSection`] if `enclosing` is a section (a
    ///   section cannot live inside another section's subtree).
    /// - [`ScopeError::MissingContainer`] if no container is in scope.
    pub fn mount(
        container: Option<&mut Container>,
        enclosing: Option<&Self>,
    ) -> Result<Self, ScopeError> {
        if enclosing.is_some() {
            return Err(ScopeError::NestedSection);
        }
        let Some(container) = container else {
            return Err(ScopeError::MissingContainer);
        };
        Ok(Self {
            registration: container.manager.register(),
        })
    }

    /// Returns the section's identifier, stable across re-measurements.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> SectionId {
        self.registration.id()
    }

    /// Returns whether this section may safely render.
    ///
    /// Ready means the section has reported at least one measurement and
    /// the container has non-zero width and height, so descendants can be
    /// gated until real geometry exists instead of flashing at a
    /// degenerate zero-sized state.
    #[must_use]
    pub fn is_ready(&self, container: &Container) -> bool {
        container.manager.is_ready(self.id())
    }

    /// Unmounts the section, releasing its registration and purging its
    /// measurement entry from the container's layout.
    pub fn unmount(self, container: &mut Container) {
        self.registration.dispose(&mut container.manager);
    }
}
