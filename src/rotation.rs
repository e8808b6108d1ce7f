//! Coordinate rotation utilities
//!
//! This module provides the [`Rotation`] type shared by bitmap loading and text
//! layout, and the function mapping a source pixel to its rotated position.
//!
//! Rotations are clockwise. For a source image `w` pixels wide and `h` pixels tall:
//!
//! | Rotation  | Source `(x, y)` lands at | Result size |
//! |-----------|--------------------------|-------------|
//! | Rotate0   | `(x, y)`                 | `w x h`     |
//! | Rotate90  | `(h-1-y, x)`             | `h x w`     |
//! | Rotate180 | `(w-1-x, h-1-y)`         | `w x h`     |
//! | Rotate270 | `(y, w-1-x)`             | `h x w`     |
//!
//! ## Example
//!
//! ```
//! use ssd1322::{rotation::apply_rotation, Rotation};
//!
//! // Top-left corner of a 4x2 image ends up top-right after 90 degrees
//! assert_eq!(apply_rotation(0, 0, 4, 2, Rotation::Rotate90), (1, 0));
//!
//! // ...and bottom-left after 270 degrees
//! assert_eq!(apply_rotation(0, 0, 4, 2, Rotation::Rotate270), (0, 3));
//! ```

/// Rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

impl Rotation {
    /// Parse a rotation in degrees
    ///
    /// Any multiple of 90 is accepted, including negative ones; other values return `None`.
    ///
    /// ```
    /// use ssd1322::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(270), Some(Rotation::Rotate270));
    /// assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Rotate270));
    /// assert_eq!(Rotation::from_degrees(45), None);
    /// ```
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::Rotate0),
            90 => Some(Self::Rotate90),
            180 => Some(Self::Rotate180),
            270 => Some(Self::Rotate270),
            _ => None,
        }
    }

    /// Rotation in degrees
    pub fn degrees(self) -> u16 {
        match self {
            Self::Rotate0 => 0,
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
        }
    }

    /// Whether width and height trade places
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }

    /// Size of a `width x height` image after rotation
    pub fn rotated_size(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// Map a source pixel to its position in the rotated image
///
/// # Arguments
///
/// * `x` - Source column, 0 to width-1
/// * `y` - Source row, 0 to height-1
/// * `width` - Source width in pixels
/// * `height` - Source height in pixels
/// * `rotation` - Clockwise rotation
///
/// # Returns
///
/// `(x, y)` in the rotated image, whose size is
/// [`rotation.rotated_size(width, height)`](Rotation::rotated_size).
pub fn apply_rotation(x: u32, y: u32, width: u32, height: u32, rotation: Rotation) -> (u32, u32) {
    match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (height - 1 - y, x),
        Rotation::Rotate180 => (width - 1 - x, height - 1 - y),
        Rotation::Rotate270 => (y, width - 1 - x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate0() {
        assert_eq!(apply_rotation(0, 0, 8, 2, Rotation::Rotate0), (0, 0));
        assert_eq!(apply_rotation(7, 1, 8, 2, Rotation::Rotate0), (7, 1));
    }

    #[test]
    fn test_rotate90() {
        // Bottom-left of an 8x2 image becomes top-left of the 2x8 result
        assert_eq!(apply_rotation(0, 1, 8, 2, Rotation::Rotate90), (0, 0));
        assert_eq!(apply_rotation(7, 0, 8, 2, Rotation::Rotate90), (1, 7));
    }

    #[test]
    fn test_rotate180() {
        assert_eq!(apply_rotation(0, 0, 8, 2, Rotation::Rotate180), (7, 1));
        assert_eq!(apply_rotation(7, 1, 8, 2, Rotation::Rotate180), (0, 0));
    }

    #[test]
    fn test_rotate270() {
        assert_eq!(apply_rotation(7, 0, 8, 2, Rotation::Rotate270), (0, 0));
        assert_eq!(apply_rotation(0, 1, 8, 2, Rotation::Rotate270), (1, 7));
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let (mut w, mut h) = (5u32, 3u32);
        for x0 in 0..5 {
            for y0 in 0..3 {
                let (mut x, mut y) = (x0, y0);
                for _ in 0..4 {
                    (x, y) = apply_rotation(x, y, w, h, Rotation::Rotate90);
                    (w, h) = (h, w);
                }
                assert_eq!((x, y), (x0, y0));
            }
        }
    }

    #[test]
    fn test_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Some(Rotation::Rotate0));
        assert_eq!(Rotation::from_degrees(450), Some(Rotation::Rotate90));
        assert_eq!(Rotation::from_degrees(180), Some(Rotation::Rotate180));
        assert_eq!(Rotation::from_degrees(10), None);
    }

    #[test]
    fn test_rotated_size() {
        assert_eq!(Rotation::Rotate90.rotated_size(48, 36), (36, 48));
        assert_eq!(Rotation::Rotate180.rotated_size(48, 36), (48, 36));
    }
}
