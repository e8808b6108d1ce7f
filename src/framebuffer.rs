//! Packed pixel buffers
//!
//! [`FrameBuffer`] wraps a byte buffer and gives it a pixel interface. Three packings
//! are supported:
//!
//! | Format | Pixels per byte | Layout |
//! |--------|-----------------|--------|
//! | [`PixelFormat::Gs4`]  | 2 | high nibble = even x, low nibble = odd x |
//! | [`PixelFormat::Mono`] | 8 | bit 0 = leftmost pixel, 1 = lit |
//! | [`PixelFormat::Gs8`]  | 1 | full 8-bit gray value |
//!
//! Rows are byte aligned: a row takes `ceil(width / pixels_per_byte)` bytes and there
//! is no other padding. `Gs4` is the SSD1322's native display RAM format, so the live
//! display buffer is always a `Gs4` frame buffer.
//!
//! Coordinates are signed. Writes outside the buffer are dropped and reads outside
//! return 0; checking that a drawing call is on screen is the job of
//! [`GraphicDisplay`](crate::GraphicDisplay), not of this type.
//!
//! ## Example
//!
//! ```
//! use ssd1322::framebuffer::{FrameBuffer, PixelFormat};
//!
//! let mut fb = match FrameBuffer::new([0u8; 4], 4, 2, PixelFormat::Gs4) {
//!     Ok(fb) => fb,
//!     Err(_) => return,
//! };
//! fb.set_pixel(0, 0, 0xA);
//! fb.set_pixel(1, 0, 0x5);
//! assert_eq!(fb.as_bytes()[0], 0xA5);
//! assert_eq!(fb.get_pixel(1, 0), 0x5);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::color::Palette;

/// Pixel packing of a [`FrameBuffer`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 4-bit grayscale, two pixels per byte, high nibble first (GS4_HMSB)
    Gs4,
    /// 1-bit monochrome, eight pixels per byte, bit 0 leftmost (MONO_HMSB)
    Mono,
    /// 8-bit grayscale, one pixel per byte
    Gs8,
}

impl PixelFormat {
    /// Bytes used by one row of `width` pixels
    pub fn byte_width(self, width: u32) -> usize {
        let width = width as usize;
        match self {
            Self::Gs4 => width.div_ceil(2),
            Self::Mono => width.div_ceil(8),
            Self::Gs8 => width,
        }
    }

    /// Bytes used by a `width x height` image
    pub fn buffer_size(self, width: u32, height: u32) -> usize {
        self.byte_width(width) * height as usize
    }

    /// Largest pixel value
    pub fn max_value(self) -> u8 {
        match self {
            Self::Gs4 => 0x0F,
            Self::Mono => 0x01,
            Self::Gs8 => 0xFF,
        }
    }

    /// Complement a pixel value within this format's range
    pub fn invert(self, value: u8) -> u8 {
        match self {
            Self::Gs4 => 0x0F - (value & 0x0F),
            Self::Mono => (value & 0x01) ^ 0x01,
            Self::Gs8 => value ^ 0xFF,
        }
    }

    /// Convert a pixel value of this format to `target`'s range
    ///
    /// Monochrome maps to off/full, 8-bit grayscale keeps its high nibble in 4-bit
    /// grayscale, and anything nonzero is lit in monochrome.
    pub fn convert(self, value: u8, target: Self) -> u8 {
        match (self, target) {
            (Self::Gs4, Self::Gs4) | (Self::Mono, Self::Mono) | (Self::Gs8, Self::Gs8) => value,
            (Self::Mono, _) => {
                if value & 0x01 != 0 {
                    target.max_value()
                } else {
                    0
                }
            }
            (_, Self::Mono) => u8::from(value != 0),
            (Self::Gs8, Self::Gs4) => value >> 4,
            (Self::Gs4, Self::Gs8) => (value & 0x0F) * 17,
        }
    }
}

/// Buffer shorter than its dimensions require
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferTooSmall {
    /// Required buffer size in bytes
    pub required: usize,
    /// Provided buffer size in bytes
    pub provided: usize,
}

impl core::fmt::Display for BufferTooSmall {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Buffer too small: required {} bytes, provided {}",
            self.required, self.provided
        )
    }
}

impl core::error::Error for BufferTooSmall {}

/// Pixel view over a packed byte buffer
///
/// `B` is any byte storage: `[u8; N]`, `&mut [u8]`, `Vec<u8>` for owned sprites, or
/// `&[u8]` for read-only sources such as bitmaps and glyphs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer<B> {
    buffer: B,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl FrameBuffer<Vec<u8>> {
    /// Owned buffer with every pixel at 0
    pub fn zeroed(format: PixelFormat, width: u32, height: u32) -> Self {
        Self {
            buffer: vec![0u8; format.buffer_size(width, height)],
            width,
            height,
            format,
        }
    }
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]>,
{
    /// Wrap `buffer` as a `width x height` image in `format`
    ///
    /// # Errors
    ///
    /// Returns [`BufferTooSmall`] if `buffer` holds fewer than
    /// `format.buffer_size(width, height)` bytes. Extra bytes are ignored.
    pub fn new(
        buffer: B,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, BufferTooSmall> {
        let required = format.buffer_size(width, height);
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(BufferTooSmall { required, provided });
        }
        Ok(Self {
            buffer,
            width,
            height,
            format,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel packing
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per row
    pub fn byte_width(&self) -> usize {
        self.format.byte_width(self.width)
    }

    /// The packed bytes covering the image
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.format.buffer_size(self.width, self.height)]
    }

    /// Give back the underlying storage
    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// Whether `(x, y)` lies inside the image
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Read a pixel; coordinates outside the image read as 0
    pub fn get_pixel(&self, x: i32, y: i32) -> u8 {
        if !self.contains(x, y) {
            return 0;
        }
        self.read(x as u32, y as u32)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        let row = y as usize * self.byte_width();
        match self.format {
            PixelFormat::Gs4 => row + x as usize / 2,
            PixelFormat::Mono => row + x as usize / 8,
            PixelFormat::Gs8 => row + x as usize,
        }
    }

    fn read(&self, x: u32, y: u32) -> u8 {
        let byte = self.buffer.as_ref()[self.index(x, y)];
        match self.format {
            PixelFormat::Gs4 => {
                if x % 2 == 0 {
                    byte >> 4
                } else {
                    byte & 0x0F
                }
            }
            PixelFormat::Mono => (byte >> (x % 8)) & 0x01,
            PixelFormat::Gs8 => byte,
        }
    }
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// The packed bytes covering the image, mutably
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.format.buffer_size(self.width, self.height);
        &mut self.buffer.as_mut()[..len]
    }

    /// Write a pixel, leaving the other pixels sharing its byte untouched
    ///
    /// The value is truncated to the format's depth (low nibble for `Gs4`, nonzero
    /// means lit for `Mono`). Coordinates outside the image are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, value: u8) {
        if !self.contains(x, y) {
            return;
        }
        self.write(x as u32, y as u32, value);
    }

    fn write(&mut self, x: u32, y: u32, value: u8) {
        let index = self.index(x, y);
        let format = self.format;
        let byte = &mut self.buffer.as_mut()[index];
        match format {
            PixelFormat::Gs4 => {
                let value = value & 0x0F;
                if x % 2 == 0 {
                    *byte = (*byte & 0x0F) | (value << 4);
                } else {
                    *byte = (*byte & 0xF0) | value;
                }
            }
            PixelFormat::Mono => {
                let bit = 1 << (x % 8);
                if value != 0 {
                    *byte |= bit;
                } else {
                    *byte &= !bit;
                }
            }
            PixelFormat::Gs8 => *byte = value,
        }
    }

    /// Set every pixel to `value`
    pub fn fill(&mut self, value: u8) {
        let byte = match self.format {
            PixelFormat::Gs4 => {
                let value = value & 0x0F;
                (value << 4) | value
            }
            PixelFormat::Mono => {
                if value != 0 {
                    0xFF
                } else {
                    0x00
                }
            }
            PixelFormat::Gs8 => value,
        };
        self.as_bytes_mut().fill(byte);
    }

    /// Fill a `w x h` rectangle whose top-left pixel is `(x, y)`
    ///
    /// The part of the rectangle outside the image is dropped.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, value: u8) {
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        for row in y0..y1 {
            for col in x0..x1 {
                self.write(col as u32, row as u32, value);
            }
        }
    }

    /// Horizontal run of `w` pixels starting at `(x, y)`
    pub fn hline(&mut self, x: i32, y: i32, w: i32, value: u8) {
        self.fill_rect(x, y, w, 1, value);
    }

    /// Vertical run of `h` pixels starting at `(x, y)`
    pub fn vline(&mut self, x: i32, y: i32, h: i32, value: u8) {
        self.fill_rect(x, y, 1, h, value);
    }

    /// Unfilled rectangle outline
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, value: u8) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.hline(x, y, w, value);
        self.hline(x, y + h - 1, w, value);
        self.vline(x, y, h, value);
        self.vline(x + w - 1, y, h, value);
    }

    /// Line between two points, both ends included
    ///
    /// Horizontal and vertical lines are filled as runs; everything else goes through
    /// [`walk_line`].
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, value: u8) {
        if y1 == y2 {
            self.hline(x1.min(x2), y1, (x2 - x1).abs() + 1, value);
        } else if x1 == x2 {
            self.vline(x1, y1.min(y2), (y2 - y1).abs() + 1, value);
        } else {
            walk_line(x1, y1, x2, y2, |x, y| self.set_pixel(x, y, value));
        }
    }

    /// Copy `source` into this buffer with its top-left pixel at `(x, y)`
    ///
    /// With a `palette`, each source value is translated through it (see
    /// [`Palette::map`]); without one, values are converted between formats with
    /// [`PixelFormat::convert`]. Pixels whose final value equals `key` are skipped,
    /// which makes `key` the transparent color. Source pixels landing outside this
    /// buffer are dropped.
    pub fn blit<S>(
        &mut self,
        source: &FrameBuffer<S>,
        x: i32,
        y: i32,
        key: Option<u8>,
        palette: Option<&Palette>,
    ) where
        S: AsRef<[u8]>,
    {
        for sy in 0..source.height {
            let dy = y + sy as i32;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..source.width {
                let dx = x + sx as i32;
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                let raw = source.read(sx, sy);
                let value = match palette {
                    Some(palette) => palette.map(raw),
                    None => source.format.convert(raw, self.format),
                };
                if key == Some(value) {
                    continue;
                }
                self.write(dx as u32, dy as u32, value);
            }
        }
    }
}

/// Visit every pixel of the line from `(x1, y1)` to `(x2, y2)` with integer Bresenham
/// stepping
///
/// Steep lines are transposed so the major axis is always the loop variable, and the
/// endpoints are ordered along it, so a segment visits the same pixels whichever end
/// it is given from. Both endpoints are visited.
pub fn walk_line<F>(x1: i32, y1: i32, x2: i32, y2: i32, mut plot: F)
where
    F: FnMut(i32, i32),
{
    let (mut x1, mut y1, mut x2, mut y2) = (x1, y1, x2, y2);
    let steep = (y2 - y1).abs() > (x2 - x1).abs();
    if steep {
        core::mem::swap(&mut x1, &mut y1);
        core::mem::swap(&mut x2, &mut y2);
    }
    if x1 > x2 {
        core::mem::swap(&mut x1, &mut x2);
        core::mem::swap(&mut y1, &mut y2);
    }
    let dx = x2 - x1;
    let dy = (y2 - y1).abs();
    let ystep = if y1 < y2 { 1 } else { -1 };
    let mut error = dx >> 1;
    let mut y = y1;
    for x in x1..=x2 {
        if steep {
            plot(y, x);
        } else {
            plot(x, y);
        }
        error -= dy;
        if error < 0 {
            y += ystep;
            error += dx;
        }
    }
}
