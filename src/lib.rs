//! SSD1322 Grayscale OLED Display Driver
//!
//! A driver for the SSD1322 4-bit grayscale OLED controller, supporting panels up to
//! 480x128 pixels (most modules are 256x64).
//!
//! ## Features
//!
//! - `no_std` compatible (needs `alloc` for sprites and polygon fills)
//! - `embedded-hal` v1.0 support, 4-wire SPI
//! - Packed 4-bit frame buffer with bounds-guarded drawing: lines, rectangles,
//!   circles, ellipses, regular polygons
//! - Monochrome, 4-bit and 8-bit bitmaps with rotation and inversion
//! - Text from any [`GlyphProvider`](text::GlyphProvider)
//! - Custom gray scale tables
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Bitmap files (with `std` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1322::{Builder, Dimensions, Display, GraphicDisplay, Interface};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst);
//! let dims = match Dimensions::new(64, 256) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).contrast(0x7F).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let display = Display::new(interface, config);
//! let mut oled = match GraphicDisplay::new(display, [0u8; 8192]) {
//!     Ok(oled) => oled,
//!     Err(_) => return,
//! };
//! let _ = oled.init(&mut delay);
//! let _ = oled.draw_ellipse(128, 32, 60, 20, 10);
//! let _ = oled.present();
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Bounds guard for drawing calls
pub mod bounds;
/// Gray levels and the mono-to-gray palette
pub mod color;
/// SSD1322 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Packed pixel buffers
pub mod framebuffer;
/// Buffered drawing on top of the display
pub mod graphics;
/// Bitmap loading and transformation
pub mod image;
/// Hardware interface abstraction
pub mod interface;
/// Coordinate rotation utilities
pub mod rotation;
/// Circles, ellipses and regular polygons
pub mod shapes;
/// Text layout
pub mod text;

pub use bounds::{DrawResult, OffGrid};
pub use color::Palette;
pub use config::{
    Builder, Config, Dimensions, GrayScaleTable, MAX_COM_OUTPUTS, MAX_SEGMENT_OUTPUTS,
};
pub use display::{AddressWindow, ControllerState, Display, DisplayMode, GrayQuality, VslSource};
pub use error::{BuilderError, Error, ImageError};
pub use framebuffer::{FrameBuffer, PixelFormat};
pub use graphics::GraphicDisplay;
pub use image::{Bitmap, BitmapStyle, Sprite};
pub use interface::InterfaceError;
pub use interface::{DisplayInterface, Interface};
pub use rotation::Rotation;
pub use text::{Glyph, GlyphProvider, TextLayout, TextStyle};
