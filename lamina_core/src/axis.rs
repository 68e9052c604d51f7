// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll axis and extent selection.

use kurbo::Rect;

/// The single dimension along which a container scrolls.
///
/// Fixed per container instance for its lifetime. The axis determines which
/// rectangle dimension is summed when deriving the maximum scroll position,
/// and which overflow direction a consumer should enable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// Horizontal scrolling; extents are rectangle widths.
    X,
    /// Vertical scrolling; extents are rectangle heights.
    #[default]
    Y,
}

impl ScrollAxis {
    /// Returns the extent of `rect` along this axis.
    #[inline]
    #[must_use]
    pub fn extent(self, rect: Rect) -> f64 {
        match self {
            Self::X => rect.width(),
            Self::Y => rect.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_selects_axis_dimension() {
        let rect = Rect::new(0.0, 0.0, 300.0, 200.0);
        assert_eq!(ScrollAxis::X.extent(rect), 300.0);
        assert_eq!(ScrollAxis::Y.extent(rect), 200.0);
    }

    #[test]
    fn extent_of_zero_rect_is_zero() {
        assert_eq!(ScrollAxis::X.extent(Rect::ZERO), 0.0);
        assert_eq!(ScrollAxis::Y.extent(Rect::ZERO), 0.0);
    }

    #[test]
    fn default_axis_is_vertical() {
        assert_eq!(ScrollAxis::default(), ScrollAxis::Y);
    }
}
