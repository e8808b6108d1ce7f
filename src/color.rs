//! Grayscale values and the mono-to-grayscale palette
//!
//! The SSD1322 drives each pixel with a 4-bit gray level: 0 is off (black) and 15 is
//! the brightest level of the active gray scale table.
//!
//! Monochrome sources (1-bit bitmaps, sprites, font glyphs) are drawn into the
//! grayscale buffer through a [`Palette`] which maps an unlit source pixel to the
//! background level and a lit one to the foreground level.
//!
//! ## Example
//!
//! ```
//! use ssd1322::color::{Palette, BLACK, WHITE};
//!
//! let mut palette = Palette::default();
//! assert_eq!(palette.map(0), BLACK);
//! assert_eq!(palette.map(1), WHITE);
//!
//! // Dim gray text on white
//! palette.set_foreground(4);
//! palette.set_background(WHITE);
//! assert_eq!(palette.map(1), 4);
//! assert_eq!(palette.map(0), 15);
//! ```

/// Gray level of an unlit pixel
pub const BLACK: u8 = 0;

/// Brightest gray level
pub const WHITE: u8 = 15;

/// Mask applied to every gray level before it reaches the buffer
pub const GRAY_MASK: u8 = 0x0F;

/// Mono to grayscale lookup
///
/// Used as a parameter object for blits; the driver keeps one and updates it
/// before each differently coloured blit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    background: u8,
    foreground: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: BLACK,
            foreground: WHITE,
        }
    }
}

impl Palette {
    /// Create a palette from background and foreground levels
    pub fn new(background: u8, foreground: u8) -> Self {
        Self {
            background: background & GRAY_MASK,
            foreground: foreground & GRAY_MASK,
        }
    }

    /// Palette for drawing `gray` on black, or black on `gray` when inverted
    pub fn for_gray(gray: u8, invert: bool) -> Self {
        if invert {
            Self::new(gray, BLACK)
        } else {
            Self::new(BLACK, gray)
        }
    }

    /// Set the level used for lit source pixels
    pub fn set_foreground(&mut self, gray: u8) {
        self.foreground = gray & GRAY_MASK;
    }

    /// Set the level used for unlit source pixels
    pub fn set_background(&mut self, gray: u8) {
        self.background = gray & GRAY_MASK;
    }

    /// Level used for lit source pixels
    pub fn foreground(&self) -> u8 {
        self.foreground
    }

    /// Level used for unlit source pixels
    pub fn background(&self) -> u8 {
        self.background
    }

    /// Translate a source pixel; any nonzero value counts as lit
    pub fn map(&self, value: u8) -> u8 {
        if value == 0 {
            self.background
        } else {
            self.foreground
        }
    }
}

#[cfg(feature = "graphics")]
mod gray4 {
    use embedded_graphics_core::pixelcolor::{Gray4, GrayColor};

    /// Gray level of an embedded-graphics [`Gray4`] color
    pub fn gray_level(color: Gray4) -> u8 {
        color.luma()
    }
}

#[cfg(feature = "graphics")]
pub use gray4::gray_level;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_white_on_black() {
        let palette = Palette::default();
        assert_eq!(palette.background(), BLACK);
        assert_eq!(palette.foreground(), WHITE);
    }

    #[test]
    fn test_for_gray_swaps_when_inverted() {
        assert_eq!(Palette::for_gray(9, false), Palette::new(0, 9));
        assert_eq!(Palette::for_gray(9, true), Palette::new(9, 0));
    }

    #[test]
    fn test_setters_mask_to_nibble() {
        let mut palette = Palette::default();
        palette.set_foreground(0x1A);
        palette.set_background(0xF3);
        assert_eq!(palette.foreground(), 0x0A);
        assert_eq!(palette.background(), 0x03);
    }

    #[test]
    fn test_map_treats_nonzero_as_lit() {
        let palette = Palette::new(2, 12);
        assert_eq!(palette.map(0), 2);
        assert_eq!(palette.map(1), 12);
        assert_eq!(palette.map(7), 12);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_gray_level_from_gray4() {
        use embedded_graphics_core::pixelcolor::{Gray4, GrayColor};
        assert_eq!(gray_level(Gray4::new(11)), 11);
        assert_eq!(gray_level(Gray4::WHITE), WHITE);
    }
}
