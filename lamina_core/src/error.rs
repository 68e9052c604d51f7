// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural composition errors.
//!
//! These are the only error conditions in the engine. Geometry mutations
//! are total over their domain (any finite rectangle is accepted, including
//! zero-sized ones); only structural misuse at section mount time fails,
//! synchronously, at the point of violation. The engine performs no
//! logging, retry, or fallback — the caller must restructure the
//! composition.

use core::fmt;

/// A structural violation detected when mounting a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeError {
    /// The section was created with no enclosing container in scope.
    ///
    /// Non-recoverable at the point of use; the engine never degrades to a
    /// default container.
    MissingContainer,
    /// The section was created inside another section's subtree.
    NestedSection,
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContainer => f.write_str("Section can only be used within a Container"),
            Self::NestedSection => {
                f.write_str("Section cannot be nested within another Section")
            }
        }
    }
}

impl core::error::Error for ScopeError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn display_texts() {
        assert_eq!(
            ScopeError::MissingContainer.to_string(),
            "Section can only be used within a Container"
        );
        assert_eq!(
            ScopeError::NestedSection.to_string(),
            "Section cannot be nested within another Section"
        );
    }
}
