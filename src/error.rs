//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! controller operations ([`Error`]) and bitmap loading ([`ImageError`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during controller operations
//! - [`ImageError`] - Rejected bitmaps and sprites
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! Drawing outside the visible buffer is not an error: drawing calls report it as
//! an [`OffGrid`](crate::bounds::OffGrid) status instead.
//!
//! ## Example
//!
//! ```
//! use ssd1322::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(64, 500); // Too wide
//! assert!(result.is_err());
//! ```

use crate::bounds::OffGrid;
use crate::interface::DisplayInterface;

/// Maximum common outputs (rows) supported by the SSD1322 controller
///
/// NOTE: Most modules wire 64 rows; configure [`crate::Dimensions`] accordingly.
pub const MAX_COM_OUTPUTS: u16 = 128;

/// Maximum segment outputs (columns) supported by the SSD1322 controller
///
/// NOTE: 256-pixel modules are centred in the 480 segments, see
/// [`Builder::segment_offset`](crate::config::Builder::segment_offset).
pub const MAX_SEGMENT_OUTPUTS: u16 = 480;

/// Errors that can occur when interacting with the controller
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    /// There is no retry path: the transfer that failed is lost.
    Interface(I::Error),
    /// Buffer is too small for the display
    ///
    /// The provided buffer must be at least `dimensions.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// Invalid gray scale table
    ///
    /// Entries must be non-decreasing and no larger than
    /// [`MAX_GRAY_SCALE_LEVEL`](crate::config::MAX_GRAY_SCALE_LEVEL).
    InvalidGrayScaleTable {
        /// Index of the first offending entry
        index: usize,
        /// Value of the first offending entry
        value: u8,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::InvalidGrayScaleTable { index, value } => {
                write!(f, "Invalid gray scale table entry GS{}: {value}", index + 1)
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u16,
        /// Number of columns (width) requested
        cols: u16,
    },
    /// The segment offset pushes the visible columns past the last segment
    InvalidSegmentOffset {
        /// Offset in 4-pixel column units
        offset: u8,
        /// Number of columns (width) configured
        cols: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (max {MAX_COM_OUTPUTS}x{MAX_SEGMENT_OUTPUTS}, cols must be multiple of 4)"
            ),
            Self::InvalidSegmentOffset { offset, cols } => write!(
                f,
                "Segment offset {offset} leaves no room for {cols} columns (max {MAX_SEGMENT_OUTPUTS})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors that can occur when loading or drawing a bitmap
#[derive(Debug)]
pub enum ImageError {
    /// Bitmap has more pixels than the configured ceiling
    ///
    /// Rejected before anything is allocated.
    TooLarge {
        /// Pixel count requested (`width * height`)
        pixels: usize,
        /// Maximum pixel count allowed
        limit: usize,
    },
    /// Bitmap data is shorter than its dimensions require
    Truncated {
        /// Bytes required by the format and dimensions
        expected: usize,
        /// Bytes provided
        provided: usize,
    },
    /// Bitmap would land outside the visible buffer
    OffGrid(OffGrid),
    /// Reading the bitmap file failed
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

impl From<OffGrid> for ImageError {
    fn from(value: OffGrid) -> Self {
        Self::OffGrid(value)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ImageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl core::fmt::Display for ImageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooLarge { pixels, limit } => {
                write!(f, "Bitmap too large: {pixels} pixels, limit {limit}")
            }
            Self::Truncated { expected, provided } => write!(
                f,
                "Bitmap truncated: expected {expected} bytes, provided {provided}"
            ),
            Self::OffGrid(off) => write!(f, "{off}"),
            #[cfg(feature = "std")]
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl core::error::Error for ImageError {}
