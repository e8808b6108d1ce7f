//! SSD1322 command definitions
//!
//! This module defines the command bytes used to control the SSD1322 OLED
//! controller. Commands are sent over SPI with the DC pin low for the opcode and
//! high for its parameter bytes.
//!
//! ## Command Structure
//!
//! All commands follow the pattern:
//! 1. Set DC low (command mode)
//! 2. Send command byte
//! 3. Set DC high (data mode)
//! 4. Send parameter bytes (if any)
//!
//! Chip select is asserted around each transfer by the
//! [`SpiDevice`](embedded_hal::spi::SpiDevice).
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1322::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//! # let pixel_data = [0xFFu8; 4];
//! // Unlock the command interface
//! let _ = interface.send_command(command::SET_COMMAND_LOCK);
//! let _ = interface.send_data(&[command::COMMAND_UNLOCK]);
//!
//! // Stream pixels into display RAM
//! let _ = interface.send_command(command::WRITE_RAM);
//! let _ = interface.send_data(&pixel_data);
//! ```

// Addressing

/// Enable write RAM command (0x5C)
///
/// Following data bytes are written to display RAM inside the current window.
pub const WRITE_RAM: u8 = 0x5C;

/// Set column address command (0x15)
///
/// Requires 2 bytes: [start, end], in 4-pixel column units (0x00 to 0x77).
pub const SET_COLUMN_ADDRESS: u8 = 0x15;

/// Set row address command (0x75)
///
/// Requires 2 bytes: [start, end] (0x00 to 0x7F).
pub const SET_ROW_ADDRESS: u8 = 0x75;

/// Set re-map and dual COM line mode command (0xA0)
///
/// Requires 2 bytes: address increment, nibble remap and COM scan direction,
/// then the dual COM line mode byte.
pub const SET_REMAP: u8 = 0xA0;

/// Set display start line command (0xA1)
///
/// Requires 1 byte.
pub const SET_START_LINE: u8 = 0xA1;

/// Set display offset command (0xA2)
///
/// Requires 1 byte: vertical scroll by COM.
pub const SET_DISPLAY_OFFSET: u8 = 0xA2;

// Display modes

/// Entire display off, all pixels at gray level 0 (0xA4)
pub const DISPLAY_ALL_OFF: u8 = 0xA4;

/// Entire display on, all pixels at gray level 15 (0xA5)
pub const DISPLAY_ALL_ON: u8 = 0xA5;

/// Normal display (0xA6)
pub const DISPLAY_NORMAL: u8 = 0xA6;

/// Inverse display (0xA7)
pub const DISPLAY_INVERSE: u8 = 0xA7;

/// Enable partial display command (0xA8)
///
/// Requires 2 bytes: [start row, end row].
pub const ENABLE_PARTIAL_DISPLAY: u8 = 0xA8;

/// Exit partial display command (0xA9)
pub const EXIT_PARTIAL_DISPLAY: u8 = 0xA9;

// Power and timing

/// Function selection command (0xAB)
///
/// Requires 1 byte: 0x00 = external VDD, 0x01 = internal VDD regulator.
pub const FUNCTION_SELECTION: u8 = 0xAB;

/// Sleep mode on, display off (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Sleep mode off, display on (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

/// Set phase length command (0xB1)
///
/// Requires 1 byte: phase 2 period in the high nibble, phase 1 in the low.
pub const SET_PHASE_LENGTH: u8 = 0xB1;

/// Set front clock divider / oscillator frequency command (0xB3)
///
/// Requires 1 byte.
pub const SET_CLOCK_DIVIDER: u8 = 0xB3;

/// Display enhancement A command (0xB4)
///
/// Requires 2 bytes: VSL selection, then low gray scale quality.
pub const DISPLAY_ENHANCEMENT_A: u8 = 0xB4;

/// Set GPIO command (0xB5)
///
/// Requires 1 byte.
pub const SET_GPIO: u8 = 0xB5;

/// Set second pre-charge period command (0xB6)
///
/// Requires 1 byte.
pub const SET_SECOND_PRECHARGE: u8 = 0xB6;

/// Set gray scale table command (0xB8)
///
/// Requires 15 bytes: pulse widths for GS1 to GS15, followed by
/// [`ENABLE_GRAY_SCALE_TABLE`].
pub const SET_GRAY_SCALE_TABLE: u8 = 0xB8;

/// Select default linear gray scale table command (0xB9)
pub const SELECT_DEFAULT_GRAY_SCALE: u8 = 0xB9;

/// Set pre-charge voltage command (0xBB)
///
/// Requires 1 byte.
pub const SET_PRECHARGE_VOLTAGE: u8 = 0xBB;

/// Set VCOMH voltage command (0xBE)
///
/// Requires 1 byte.
pub const SET_VCOMH: u8 = 0xBE;

/// Set contrast current command (0xC1)
///
/// Requires 1 byte.
pub const SET_CONTRAST_CURRENT: u8 = 0xC1;

/// Master contrast current control command (0xC7)
///
/// Requires 1 byte, 0x00 to 0x0F.
pub const MASTER_CURRENT_CONTROL: u8 = 0xC7;

/// Set multiplex ratio command (0xCA)
///
/// Requires 1 byte: number of rows minus one.
pub const SET_MUX_RATIO: u8 = 0xCA;

/// Display enhancement B command (0xD1)
///
/// Requires 2 bytes.
pub const DISPLAY_ENHANCEMENT_B: u8 = 0xD1;

/// Set command lock command (0xFD)
///
/// Requires 1 byte: [`COMMAND_UNLOCK`] or [`COMMAND_LOCK`].
pub const SET_COMMAND_LOCK: u8 = 0xFD;

// Parameter bytes

/// Unlock the command interface (parameter of [`SET_COMMAND_LOCK`])
pub const COMMAND_UNLOCK: u8 = 0x12;

/// Lock the command interface (parameter of [`SET_COMMAND_LOCK`])
pub const COMMAND_LOCK: u8 = 0x16;

/// Terminates a custom gray scale table
pub const ENABLE_GRAY_SCALE_TABLE: u8 = 0x00;

/// Enhancement A: external VSL
pub const VSL_EXTERNAL: u8 = 0x00;

/// Enhancement A: internal VSL
pub const VSL_INTERNAL: u8 = 0x02;

/// Enhancement A: normal low gray scale quality
pub const GRAY_QUALITY_NORMAL: u8 = 0xB0;

/// Enhancement A: enhanced low gray scale quality
pub const GRAY_QUALITY_ENHANCED: u8 = 0xF8;

/// Enhancement B: normal
pub const ENHANCEMENT_B_NORMAL: [u8; 2] = [0xA2, 0x20];

/// Enhancement B: enhanced driving scheme
pub const ENHANCEMENT_B_ENHANCED: [u8; 2] = [0x82, 0x20];
