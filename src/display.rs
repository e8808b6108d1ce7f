//! Core display operations
//!
//! [`Display`] speaks the SSD1322 command protocol over a [`DisplayInterface`]: the
//! reset and register configuration sequence, the RAM address window, pushing a
//! packed 4-bit frame, and the runtime controls (sleep, contrast, gray scale table,
//! display mode, enhancement). It holds no pixel memory; see
//! [`GraphicDisplay`](crate::GraphicDisplay) for the buffered drawing layer.

use embedded_hal::delay::DelayNs;

use crate::command::{
    DISPLAY_ALL_OFF, DISPLAY_ALL_ON, DISPLAY_ENHANCEMENT_A, DISPLAY_ENHANCEMENT_B,
    DISPLAY_INVERSE, DISPLAY_NORMAL, DISPLAY_OFF, DISPLAY_ON, ENABLE_GRAY_SCALE_TABLE,
    ENABLE_PARTIAL_DISPLAY, ENHANCEMENT_B_ENHANCED, ENHANCEMENT_B_NORMAL, EXIT_PARTIAL_DISPLAY,
    FUNCTION_SELECTION, GRAY_QUALITY_ENHANCED, GRAY_QUALITY_NORMAL, MASTER_CURRENT_CONTROL,
    COMMAND_UNLOCK, SELECT_DEFAULT_GRAY_SCALE, SET_CLOCK_DIVIDER, SET_COLUMN_ADDRESS,
    SET_COMMAND_LOCK, SET_CONTRAST_CURRENT, SET_DISPLAY_OFFSET, SET_GPIO, SET_GRAY_SCALE_TABLE,
    SET_MUX_RATIO, SET_PHASE_LENGTH, SET_PRECHARGE_VOLTAGE, SET_REMAP, SET_ROW_ADDRESS,
    SET_SECOND_PRECHARGE, SET_START_LINE, SET_VCOMH, VSL_EXTERNAL, VSL_INTERNAL, WRITE_RAM,
};
use crate::config::{Config, Dimensions, GrayScaleTable};
use crate::error::Error;
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Rectangle of display RAM targeted by the next write
///
/// Columns are in controller units of 4 pixels with the segment offset already
/// applied; rows are in pixels. Both ranges are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressWindow {
    /// First column address
    pub col_start: u8,
    /// Last column address
    pub col_end: u8,
    /// First row
    pub row_start: u8,
    /// Last row
    pub row_end: u8,
}

impl AddressWindow {
    /// Window covering pixels `(x0, y0)` to `(x1, y1)` inclusive
    ///
    /// ```
    /// use ssd1322::AddressWindow;
    ///
    /// let window = AddressWindow::from_pixels(0, 0, 255, 63, 28);
    /// assert_eq!((window.col_start, window.col_end), (28, 91));
    /// assert_eq!((window.row_start, window.row_end), (0, 63));
    /// ```
    pub fn from_pixels(x0: u16, y0: u16, x1: u16, y1: u16, segment_offset: u8) -> Self {
        Self {
            col_start: (x0 / 4) as u8 + segment_offset,
            col_end: (x1 / 4) as u8 + segment_offset,
            row_start: y0 as u8,
            row_end: y1 as u8,
        }
    }

    /// Window covering a whole panel
    pub fn full(dimensions: &Dimensions, segment_offset: u8) -> Self {
        Self::from_pixels(
            0,
            0,
            dimensions.cols - 1,
            dimensions.rows - 1,
            segment_offset,
        )
    }
}

/// Lifecycle of the controller
///
/// Releasing the bus is expressed by ownership: [`Display::release`] consumes the
/// driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerState {
    /// Not yet reset and configured
    #[default]
    Uninitialized,
    /// Panel output enabled
    Awake,
    /// Panel output disabled, RAM retained
    Asleep,
}

/// What the panel shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum DisplayMode {
    /// Every pixel at gray level 0
    AllOff = DISPLAY_ALL_OFF,
    /// Every pixel at gray level 15
    AllOn = DISPLAY_ALL_ON,
    /// Display RAM as written
    #[default]
    Normal = DISPLAY_NORMAL,
    /// Display RAM with gray levels inverted
    Inverse = DISPLAY_INVERSE,
}

/// Segment low voltage source for display enhancement A
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VslSource {
    /// External VSL
    #[default]
    External,
    /// Internal VSL
    Internal,
}

/// Low gray scale display quality for display enhancement A
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrayQuality {
    /// Normal
    Normal,
    /// Enhanced low gray scale quality
    #[default]
    Enhanced,
}

/// Core display driver for SSD1322
///
/// This struct provides low-level operations for the SSD1322 controller.
/// For buffered drawing, use `GraphicDisplay`.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Controller lifecycle state
    state: ControllerState,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: ControllerState::Uninitialized,
        }
    }

    /// Pulse the reset line and write the full register configuration
    ///
    /// Leaves the panel on with whatever display RAM held before; clear and present a
    /// buffer afterwards to start from a known picture.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("ssd1322: reset");
        self.interface.reset(delay).map_err(Error::Interface)?;
        self.configure()?;
        self.state = ControllerState::Awake;
        log::debug!(
            "ssd1322: configured {}x{}",
            self.config.dimensions.cols,
            self.config.dimensions.rows
        );
        Ok(())
    }

    /// Register configuration sequence
    fn configure(&mut self) -> DisplayResult<I> {
        let config = self.config.clone();

        self.write_command(SET_COMMAND_LOCK, &[COMMAND_UNLOCK])?;
        self.write_command(DISPLAY_OFF, &[])?;
        self.write_command(SET_CLOCK_DIVIDER, &[config.front_clock_divider])?;
        self.write_command(SET_MUX_RATIO, &[(config.dimensions.rows - 1) as u8])?;
        self.write_command(SET_DISPLAY_OFFSET, &[config.display_offset])?;
        self.write_command(SET_START_LINE, &[config.start_line])?;
        self.write_command(SET_REMAP, &config.remap)?;
        self.write_command(SET_GPIO, &[config.gpio])?;
        self.write_command(FUNCTION_SELECTION, &[config.function_selection])?;
        self.write_command(DISPLAY_ENHANCEMENT_A, &config.enhancement_a)?;
        self.write_command(SET_CONTRAST_CURRENT, &[config.contrast])?;
        self.write_command(MASTER_CURRENT_CONTROL, &[config.master_current])?;
        self.write_gray_scale(&config.gray_scale)?;
        self.write_command(SET_PHASE_LENGTH, &[config.phase_length])?;
        self.write_command(DISPLAY_ENHANCEMENT_B, &config.enhancement_b)?;
        self.write_command(SET_PRECHARGE_VOLTAGE, &[config.precharge_voltage])?;
        self.write_command(SET_SECOND_PRECHARGE, &[config.second_precharge])?;
        self.write_command(SET_VCOMH, &[config.vcomh])?;
        self.write_command(DisplayMode::Normal as u8, &[])?;
        self.write_command(EXIT_PARTIAL_DISPLAY, &[])?;
        self.write_command(DISPLAY_ON, &[])?;

        Ok(())
    }

    /// Send a command byte followed by its parameters
    pub fn write_command(&mut self, command: u8, params: &[u8]) -> DisplayResult<I> {
        self.send_command(command)?;
        if !params.is_empty() {
            self.send_data(params)?;
        }
        Ok(())
    }

    /// Send raw data bytes
    pub fn write_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.send_data(data)
    }

    /// Target a RAM window and start a RAM write
    ///
    /// Data written afterwards fills the window row by row, four pixels per column
    /// address.
    pub fn set_address_window(&mut self, window: AddressWindow) -> DisplayResult<I> {
        log::trace!(
            "ssd1322: window cols {}..={} rows {}..={}",
            window.col_start,
            window.col_end,
            window.row_start,
            window.row_end
        );
        self.write_command(SET_COLUMN_ADDRESS, &[window.col_start, window.col_end])?;
        self.write_command(SET_ROW_ADDRESS, &[window.row_start, window.row_end])?;
        self.send_command(WRITE_RAM)
    }

    /// Push a full packed 4-bit frame to display RAM
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` is shorter than
    /// [`Dimensions::buffer_size`]. Only the first `buffer_size` bytes are sent.
    pub fn present(&mut self, buffer: &[u8]) -> DisplayResult<I> {
        let required = self.config.dimensions.buffer_size();
        if buffer.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.len(),
            });
        }
        log::trace!("ssd1322: present {required} bytes");
        let window = AddressWindow::full(&self.config.dimensions, self.config.segment_offset);
        self.set_address_window(window)?;
        self.send_data(&buffer[..required])
    }

    /// Fill display RAM with one gray level without a frame buffer
    pub fn fill_ram(&mut self, gray: u8) -> DisplayResult<I> {
        let gray = gray & 0x0F;
        let row = [(gray << 4) | gray; 240];
        let byte_width = self.config.dimensions.buffer_size() / self.config.dimensions.rows as usize;
        let window = AddressWindow::full(&self.config.dimensions, self.config.segment_offset);
        self.set_address_window(window)?;
        for _ in 0..self.config.dimensions.rows {
            self.send_data(&row[..byte_width])?;
        }
        Ok(())
    }

    /// Turn the panel off; display RAM is retained
    pub fn sleep(&mut self) -> DisplayResult<I> {
        self.write_command(DISPLAY_OFF, &[])?;
        self.state = ControllerState::Asleep;
        log::debug!("ssd1322: sleep");
        Ok(())
    }

    /// Turn the panel back on
    pub fn wake(&mut self) -> DisplayResult<I> {
        self.write_command(DISPLAY_ON, &[])?;
        self.state = ControllerState::Awake;
        log::debug!("ssd1322: wake");
        Ok(())
    }

    /// Set contrast current (0x00 to 0xFF)
    pub fn set_contrast(&mut self, contrast: u8) -> DisplayResult<I> {
        self.write_command(SET_CONTRAST_CURRENT, &[contrast])?;
        self.config.contrast = contrast;
        Ok(())
    }

    /// Set master contrast current (0x00 to 0x0F)
    pub fn set_master_current(&mut self, current: u8) -> DisplayResult<I> {
        let current = current & 0x0F;
        self.write_command(MASTER_CURRENT_CONTROL, &[current])?;
        self.config.master_current = current;
        Ok(())
    }

    /// Select normal, inverse, all-on or all-off display
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> DisplayResult<I> {
        self.write_command(mode as u8, &[])
    }

    /// Restrict output to rows `start..=end`
    pub fn set_partial_display(&mut self, start: u8, end: u8) -> DisplayResult<I> {
        self.write_command(ENABLE_PARTIAL_DISPLAY, &[start, end])
    }

    /// Show every row again
    pub fn exit_partial_display(&mut self) -> DisplayResult<I> {
        self.write_command(EXIT_PARTIAL_DISPLAY, &[])
    }

    /// Load a custom gray scale table for levels GS1 to GS15
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGrayScaleTable` for the first entry that is smaller than
    /// its predecessor or larger than
    /// [`MAX_GRAY_SCALE_LEVEL`](crate::config::MAX_GRAY_SCALE_LEVEL). Nothing is sent
    /// in that case.
    pub fn set_gray_scale_table(&mut self, levels: &[u8; 15]) -> DisplayResult<I> {
        let table = GrayScaleTable::Custom(*levels);
        if let Err((index, value)) = table.validate() {
            return Err(Error::InvalidGrayScaleTable { index, value });
        }
        self.write_gray_scale(&table)?;
        self.config.gray_scale = table;
        log::debug!("ssd1322: custom gray scale table");
        Ok(())
    }

    /// Switch back to the built-in linear gray scale table
    pub fn use_linear_gray_scale(&mut self) -> DisplayResult<I> {
        self.write_gray_scale(&GrayScaleTable::Linear)?;
        self.config.gray_scale = GrayScaleTable::Linear;
        log::debug!("ssd1322: linear gray scale table");
        Ok(())
    }

    fn write_gray_scale(&mut self, table: &GrayScaleTable) -> DisplayResult<I> {
        match table {
            GrayScaleTable::Linear => self.write_command(SELECT_DEFAULT_GRAY_SCALE, &[]),
            GrayScaleTable::Custom(levels) => {
                self.write_command(SET_GRAY_SCALE_TABLE, levels)?;
                self.write_command(ENABLE_GRAY_SCALE_TABLE, &[])
            }
        }
    }

    /// Set display enhancement A
    pub fn set_display_enhancement_a(
        &mut self,
        vsl: VslSource,
        quality: GrayQuality,
    ) -> DisplayResult<I> {
        let vsl = match vsl {
            VslSource::External => VSL_EXTERNAL,
            VslSource::Internal => VSL_INTERNAL,
        };
        let quality = match quality {
            GrayQuality::Normal => GRAY_QUALITY_NORMAL,
            GrayQuality::Enhanced => GRAY_QUALITY_ENHANCED,
        };
        let params = [0xA0 | vsl, 0x05 | quality];
        self.write_command(DISPLAY_ENHANCEMENT_A, &params)?;
        self.config.enhancement_a = params;
        Ok(())
    }

    /// Set display enhancement B
    pub fn set_display_enhancement_b(&mut self, enhanced: bool) -> DisplayResult<I> {
        let params = if enhanced {
            ENHANCEMENT_B_ENHANCED
        } else {
            ENHANCEMENT_B_NORMAL
        };
        self.write_command(DISPLAY_ENHANCEMENT_B, &params)?;
        self.config.enhancement_b = params;
        Ok(())
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the hardware interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Current lifecycle state
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Give back the interface
    pub fn release(self) -> I {
        log::debug!("ssd1322: release");
        self.interface
    }
}
