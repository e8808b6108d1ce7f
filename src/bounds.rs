//! Bounds guard for drawing on the live display buffer
//!
//! Every drawing entry point of [`GraphicDisplay`](crate::GraphicDisplay) checks the
//! bounding box of what it is about to draw before touching the buffer. Anything
//! reaching outside `[0, cols) x [0, rows)` skips the whole call and is reported as
//! an [`OffGrid`] status; nothing is partially drawn.
//!
//! ## Example
//!
//! ```
//! use ssd1322::bounds::{Bounds, OffGrid};
//!
//! let bounds = Bounds::new(0, 0, 255, 63);
//! assert!(bounds.check(256, 64).is_ok());
//!
//! let bounds = Bounds::new(-1, 0, 10, 10);
//! assert_eq!(bounds.check(256, 64), Err(OffGrid::XBelowMin(-1)));
//! ```

/// Result of a bounds-guarded drawing call
///
/// `Ok(())` when the call drew, `Err(OffGrid)` when it was skipped.
pub type DrawResult = Result<(), OffGrid>;

/// Why a drawing call was skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffGrid {
    /// Minimum x coordinate is negative
    XBelowMin(i32),
    /// Minimum y coordinate is negative
    YBelowMin(i32),
    /// Maximum x coordinate is past the last column
    XAboveMax {
        /// Requested maximum x
        x: i32,
        /// Last valid column
        max: i32,
    },
    /// Maximum y coordinate is past the last row
    YAboveMax {
        /// Requested maximum y
        y: i32,
        /// Last valid row
        max: i32,
    },
}

impl core::fmt::Display for OffGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::XBelowMin(x) => write!(f, "x-coordinate: {x} below minimum of 0."),
            Self::YBelowMin(y) => write!(f, "y-coordinate: {y} below minimum of 0."),
            Self::XAboveMax { x, max } => {
                write!(f, "x-coordinate: {x} above maximum of {max}.")
            }
            Self::YAboveMax { y, max } => {
                write!(f, "y-coordinate: {y} above maximum of {max}.")
            }
        }
    }
}

impl core::error::Error for OffGrid {}

/// Inclusive pixel bounding box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// Minimum x
    pub xmin: i32,
    /// Minimum y
    pub ymin: i32,
    /// Maximum x (inclusive)
    pub xmax: i32,
    /// Maximum y (inclusive)
    pub ymax: i32,
}

impl Bounds {
    /// Create a bounding box from inclusive corners
    pub fn new(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Bounding box of a `w x h` area whose top-left pixel is `(x, y)`
    ///
    /// Edges saturate at the `i32` range, so any area too large to represent still
    /// fails [`check`](Self::check).
    pub fn from_area(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(
            x,
            y,
            x.saturating_add(w.saturating_sub(1)),
            y.saturating_add(h.saturating_sub(1)),
        )
    }

    /// Bounding box reaching `rx` columns and `ry` rows either side of `(x0, y0)`
    pub fn centered(x0: i32, y0: i32, rx: i32, ry: i32) -> Self {
        Self::new(
            x0.saturating_sub(rx),
            y0.saturating_sub(ry),
            x0.saturating_add(rx),
            y0.saturating_add(ry),
        )
    }

    /// Bounding box of a single point
    pub fn point(x: i32, y: i32) -> Self {
        Self::new(x, y, x, y)
    }

    /// Smallest box covering every point, `None` for an empty iterator
    pub fn enclosing<It>(points: It) -> Option<Self>
    where
        It: IntoIterator<Item = (i32, i32)>,
    {
        points.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => Self::point(x, y),
                Some(b) => b.union(Self::point(x, y)),
            })
        })
    }

    /// Smallest box covering both boxes
    pub fn union(self, other: Self) -> Self {
        Self::new(
            self.xmin.min(other.xmin),
            self.ymin.min(other.ymin),
            self.xmax.max(other.xmax),
            self.ymax.max(other.ymax),
        )
    }

    /// Check the box against a `width x height` grid
    ///
    /// Checks run in the order xmin, ymin, xmax, ymax and report the first failure.
    pub fn check(&self, width: u32, height: u32) -> DrawResult {
        if self.xmin < 0 {
            return Err(OffGrid::XBelowMin(self.xmin));
        }
        if self.ymin < 0 {
            return Err(OffGrid::YBelowMin(self.ymin));
        }
        let max_x = width as i32 - 1;
        if self.xmax > max_x {
            return Err(OffGrid::XAboveMax {
                x: self.xmax,
                max: max_x,
            });
        }
        let max_y = height as i32 - 1;
        if self.ymax > max_y {
            return Err(OffGrid::YAboveMax {
                y: self.ymax,
                max: max_y,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_full_grid() {
        assert!(Bounds::new(0, 0, 255, 63).check(256, 64).is_ok());
        assert!(Bounds::point(128, 32).check(256, 64).is_ok());
    }

    #[test]
    fn test_rejects_each_edge() {
        assert_eq!(
            Bounds::new(-1, 0, 0, 0).check(256, 64),
            Err(OffGrid::XBelowMin(-1))
        );
        assert_eq!(
            Bounds::new(0, -3, 0, 0).check(256, 64),
            Err(OffGrid::YBelowMin(-3))
        );
        assert_eq!(
            Bounds::new(0, 0, 256, 0).check(256, 64),
            Err(OffGrid::XAboveMax { x: 256, max: 255 })
        );
        assert_eq!(
            Bounds::new(0, 0, 0, 64).check(256, 64),
            Err(OffGrid::YAboveMax { y: 64, max: 63 })
        );
    }

    #[test]
    fn test_exhaustive_small_grid() {
        for xmin in -2..6 {
            for xmax in -2..6 {
                for ymin in -2..5 {
                    for ymax in -2..5 {
                        let expected_ok = xmin >= 0 && ymin >= 0 && xmax < 4 && ymax < 3;
                        let result = Bounds::new(xmin, ymin, xmax, ymax).check(4, 3);
                        assert_eq!(result.is_ok(), expected_ok);
                    }
                }
            }
        }
    }

    #[test]
    fn test_from_area_is_inclusive() {
        assert_eq!(Bounds::from_area(10, 2, 5, 5), Bounds::new(10, 2, 14, 6));
    }

    #[test]
    fn test_extreme_areas_saturate() {
        let b = Bounds::from_area(i32::MAX, 0, 2, 1);
        assert_eq!(b, Bounds::new(i32::MAX, 0, i32::MAX, 0));
        assert_eq!(
            b.check(256, 64),
            Err(OffGrid::XAboveMax {
                x: i32::MAX,
                max: 255
            })
        );

        let b = Bounds::centered(10, 10, i32::MAX, i32::MAX);
        assert_eq!(b, Bounds::new(10 - i32::MAX, 10 - i32::MAX, i32::MAX, i32::MAX));
        assert_eq!(b.check(256, 64), Err(OffGrid::XBelowMin(10 - i32::MAX)));

        let b = Bounds::centered(i32::MIN, 0, 5, 0);
        assert_eq!(b.xmin, i32::MIN);
        assert!(b.check(256, 64).is_err());
    }

    #[test]
    fn test_enclosing() {
        let b = Bounds::enclosing([(3, 4), (-1, 7), (5, 0)]);
        assert_eq!(b, Some(Bounds::new(-1, 0, 5, 7)));
        assert_eq!(Bounds::enclosing(core::iter::empty()), None);
    }

    #[test]
    fn test_diagnostic_text() {
        let text = alloc::format!("{}", OffGrid::XAboveMax { x: 300, max: 255 });
        assert_eq!(text, "x-coordinate: 300 above maximum of 255.");
    }
}
