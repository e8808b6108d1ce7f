//! Display configuration types and builder
//!
//! [`Builder`] collects the panel geometry and every register value written by the
//! init sequence. The defaults are the usual values for 256x64 modules; most panels
//! only need [`Builder::dimensions`].

pub use crate::error::{BuilderError, MAX_COM_OUTPUTS, MAX_SEGMENT_OUTPUTS};

/// Largest entry allowed in a custom gray scale table
pub const MAX_GRAY_SCALE_LEVEL: u8 = 180;

/// Default ceiling on bitmap size in pixels (one full 256x64 frame)
///
/// This is eight times the 2048-pixel ceiling common in other SSD1322 drivers.
/// Set [`Builder::max_bitmap_pixels`] to 2048 to keep that limit:
///
/// ```
/// use ssd1322::config::MAX_BITMAP_PIXELS;
/// use ssd1322::image::check_size;
/// use ssd1322::{Builder, Dimensions};
///
/// assert!(check_size(64, 32, 2048).is_ok());
/// assert!(check_size(64, 33, 2048).is_err());
/// assert!(check_size(256, 64, MAX_BITMAP_PIXELS).is_ok());
///
/// let dims = match Dimensions::new(64, 256) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).max_bitmap_pixels(2048).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.max_bitmap_pixels, 2048);
/// ```
pub const MAX_BITMAP_PIXELS: usize = 16_384;

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of rows (height in pixels, corresponds to common outputs)
    pub rows: u16,
    /// Number of columns (width in pixels, corresponds to segment outputs)
    pub cols: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows is 0 or > MAX_COM_OUTPUTS
    /// - cols is 0 or > MAX_SEGMENT_OUTPUTS
    /// - cols % 4 != 0 (the controller addresses columns in groups of 4 pixels)
    pub fn new(rows: u16, cols: u16) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_COM_OUTPUTS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if cols == 0 || cols > MAX_SEGMENT_OUTPUTS || !cols.is_multiple_of(4) {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Calculate required buffer size in bytes (two pixels per byte)
    pub fn buffer_size(&self) -> usize {
        (self.cols as usize).div_ceil(2) * self.rows as usize
    }

    /// Number of 4-pixel column addresses covering the width
    pub fn column_units(&self) -> u8 {
        (self.cols / 4) as u8
    }
}

/// Gray scale pulse width table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrayScaleTable {
    /// Built-in linear table (command 0xB9)
    #[default]
    Linear,
    /// Custom pulse widths for levels GS1 to GS15 (command 0xB8)
    ///
    /// Entries must be non-decreasing and no larger than [`MAX_GRAY_SCALE_LEVEL`].
    Custom([u8; 15]),
}

impl GrayScaleTable {
    /// Check a custom table, returning the first offending `(index, value)`
    pub fn validate(&self) -> Result<(), (usize, u8)> {
        let Self::Custom(levels) = self else {
            return Ok(());
        };
        let mut previous = 0u8;
        for (index, &value) in levels.iter().enumerate() {
            if value > MAX_GRAY_SCALE_LEVEL || value < previous {
                return Err((index, value));
            }
            previous = value;
        }
        Ok(())
    }
}

/// Display configuration
///
/// This struct holds all configurable parameters for the SSD1322 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// First visible column address, in 4-pixel units
    pub segment_offset: u8,
    /// Front clock divider / oscillator frequency (command 0xB3)
    pub front_clock_divider: u8,
    /// Vertical display offset (command 0xA2)
    pub display_offset: u8,
    /// Display start line (command 0xA1)
    pub start_line: u8,
    /// Re-map and dual COM line mode (command 0xA0)
    pub remap: [u8; 2],
    /// GPIO configuration (command 0xB5)
    pub gpio: u8,
    /// Function selection, 0x01 selects the internal VDD regulator (command 0xAB)
    pub function_selection: u8,
    /// Display enhancement A (command 0xB4)
    pub enhancement_a: [u8; 2],
    /// Contrast current (command 0xC1)
    pub contrast: u8,
    /// Master contrast current control, 0x00 to 0x0F (command 0xC7)
    pub master_current: u8,
    /// Gray scale table
    pub gray_scale: GrayScaleTable,
    /// Phase 1 and 2 period lengths (command 0xB1)
    pub phase_length: u8,
    /// Display enhancement B (command 0xD1)
    pub enhancement_b: [u8; 2],
    /// Pre-charge voltage (command 0xBB)
    pub precharge_voltage: u8,
    /// Second pre-charge period (command 0xB6)
    pub second_precharge: u8,
    /// VCOMH deselect level (command 0xBE)
    pub vcomh: u8,
    /// Ceiling on bitmap size in pixels
    pub max_bitmap_pixels: usize,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use ssd1322::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(64, 256) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).contrast(0x7F).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.segment_offset, 28);
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Column offset, derived from the width when unset
    segment_offset: Option<u8>,
    front_clock_divider: u8,
    display_offset: u8,
    start_line: u8,
    remap: [u8; 2],
    gpio: u8,
    function_selection: u8,
    enhancement_a: [u8; 2],
    contrast: u8,
    master_current: u8,
    gray_scale: GrayScaleTable,
    phase_length: u8,
    enhancement_b: [u8; 2],
    precharge_voltage: u8,
    second_precharge: u8,
    vcomh: u8,
    max_bitmap_pixels: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            segment_offset: None,
            // Divide by 2, oscillator frequency 9
            front_clock_divider: 0x91,
            display_offset: 0x00,
            start_line: 0x00,
            // Horizontal increment, nibble remap, COM scan reversed, dual COM mode
            remap: [0x14, 0x11],
            // Both GPIO pins disabled
            gpio: 0x00,
            // Internal VDD regulator
            function_selection: 0x01,
            // External VSL, enhanced low gray scale quality
            enhancement_a: [0xA0, 0xFD],
            contrast: 0x9F,
            master_current: 0x0F,
            gray_scale: GrayScaleTable::Linear,
            phase_length: 0xE2,
            // Normal enhancement
            enhancement_b: [0xA2, 0x20],
            precharge_voltage: 0x1F,
            second_precharge: 0x08,
            vcomh: 0x07,
            max_bitmap_pixels: crate::config::MAX_BITMAP_PIXELS,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the first visible column address, in 4-pixel units
    ///
    /// Defaults to `(480 - cols) / 8`, centering the panel in the segment range
    /// (28 for a 256 pixel wide module).
    pub fn segment_offset(mut self, offset: u8) -> Self {
        self.segment_offset = Some(offset);
        self
    }

    /// Set front clock divider and oscillator frequency
    pub fn front_clock_divider(mut self, value: u8) -> Self {
        self.front_clock_divider = value;
        self
    }

    /// Set vertical display offset
    pub fn display_offset(mut self, value: u8) -> Self {
        self.display_offset = value;
        self
    }

    /// Set display start line
    pub fn start_line(mut self, value: u8) -> Self {
        self.start_line = value;
        self
    }

    /// Set re-map and dual COM line mode bytes
    pub fn remap(mut self, values: [u8; 2]) -> Self {
        self.remap = values;
        self
    }

    /// Set GPIO configuration
    pub fn gpio(mut self, value: u8) -> Self {
        self.gpio = value;
        self
    }

    /// Set function selection (internal or external VDD)
    pub fn function_selection(mut self, value: u8) -> Self {
        self.function_selection = value;
        self
    }

    /// Set display enhancement A bytes
    pub fn enhancement_a(mut self, values: [u8; 2]) -> Self {
        self.enhancement_a = values;
        self
    }

    /// Set contrast current
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = value;
        self
    }

    /// Set master contrast current control (low nibble)
    pub fn master_current(mut self, value: u8) -> Self {
        self.master_current = value & 0x0F;
        self
    }

    /// Set the gray scale table written at init
    pub fn gray_scale(mut self, table: GrayScaleTable) -> Self {
        self.gray_scale = table;
        self
    }

    /// Set phase 1 and 2 period lengths
    pub fn phase_length(mut self, value: u8) -> Self {
        self.phase_length = value;
        self
    }

    /// Set display enhancement B bytes
    pub fn enhancement_b(mut self, values: [u8; 2]) -> Self {
        self.enhancement_b = values;
        self
    }

    /// Set pre-charge voltage
    pub fn precharge_voltage(mut self, value: u8) -> Self {
        self.precharge_voltage = value;
        self
    }

    /// Set second pre-charge period
    pub fn second_precharge(mut self, value: u8) -> Self {
        self.second_precharge = value;
        self
    }

    /// Set VCOMH deselect level
    pub fn vcomh(mut self, value: u8) -> Self {
        self.vcomh = value;
        self
    }

    /// Set the bitmap size ceiling in pixels
    pub fn max_bitmap_pixels(mut self, value: usize) -> Self {
        self.max_bitmap_pixels = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set, and
    /// `BuilderError::InvalidSegmentOffset` if the visible columns would run past
    /// the last segment.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let segment_offset = match self.segment_offset {
            Some(offset) => {
                if u16::from(offset) * 4 + dimensions.cols > MAX_SEGMENT_OUTPUTS {
                    return Err(BuilderError::InvalidSegmentOffset {
                        offset,
                        cols: dimensions.cols,
                    });
                }
                offset
            }
            None => ((MAX_SEGMENT_OUTPUTS - dimensions.cols) / 8) as u8,
        };
        Ok(Config {
            dimensions,
            segment_offset,
            front_clock_divider: self.front_clock_divider,
            display_offset: self.display_offset,
            start_line: self.start_line,
            remap: self.remap,
            gpio: self.gpio,
            function_selection: self.function_selection,
            enhancement_a: self.enhancement_a,
            contrast: self.contrast,
            master_current: self.master_current,
            gray_scale: self.gray_scale,
            phase_length: self.phase_length,
            enhancement_b: self.enhancement_b,
            precharge_voltage: self.precharge_voltage,
            second_precharge: self.second_precharge,
            vcomh: self.vcomh,
            max_bitmap_pixels: self.max_bitmap_pixels,
        })
    }
}
