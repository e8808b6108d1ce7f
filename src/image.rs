//! Bitmap loading and transformation
//!
//! Bitmaps are headerless, row-major byte streams in one of three layouts, with the
//! dimensions supplied by the caller:
//!
//! | Format | Bytes |
//! |--------|-------|
//! | [`BitmapFormat::Gs4`]  | `ceil(w / 2) * h`, two pixels per byte, high nibble first |
//! | [`BitmapFormat::Mono`] | `ceil(w / 8) * h`, bit 0 leftmost, 1 = lit |
//! | [`BitmapFormat::Gs8`]  | `w * h`, one gray byte per pixel |
//!
//! [`Bitmap`] validates a byte slice against its dimensions and the pixel ceiling.
//! It can then be drawn with [`render`] (optionally rotated and inverted) or turned
//! into an owned [`Sprite`] for repeated drawing.
//!
//! ## Example
//!
//! ```
//! use ssd1322::image::{Bitmap, BitmapFormat};
//! use ssd1322::Rotation;
//!
//! // 8x2 monochrome arrow, one byte per row
//! let data = [0b0000_1111u8, 0b0000_0011];
//! let bitmap = match Bitmap::new(&data, 8, 2, BitmapFormat::Mono) {
//!     Ok(bitmap) => bitmap,
//!     Err(_) => return,
//! };
//! let sprite = bitmap.to_sprite(Rotation::Rotate90, false);
//! assert_eq!((sprite.width(), sprite.height()), (2, 8));
//! ```

use crate::color::Palette;
use crate::config::MAX_BITMAP_PIXELS;
use crate::error::ImageError;
use crate::framebuffer::FrameBuffer;
use crate::rotation::{Rotation, apply_rotation};

pub use crate::framebuffer::PixelFormat as BitmapFormat;

/// Owned, pre-transformed image for repeated drawing
pub type Sprite = FrameBuffer<alloc::vec::Vec<u8>>;

/// How a bitmap is drawn onto the display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapStyle {
    /// Gray level of lit pixels in monochrome bitmaps
    pub gray: u8,
    /// Complement every source pixel before drawing
    pub invert: bool,
    /// Clockwise rotation
    pub rotation: Rotation,
}

impl Default for BitmapStyle {
    fn default() -> Self {
        Self {
            gray: crate::color::WHITE,
            invert: false,
            rotation: Rotation::Rotate0,
        }
    }
}

impl BitmapStyle {
    /// Style with the given gray level, no inversion, no rotation
    pub fn gray(gray: u8) -> Self {
        Self {
            gray,
            ..Self::default()
        }
    }

    /// Set the inversion flag
    #[must_use]
    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set the rotation
    #[must_use]
    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Validated view of bitmap bytes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap<'a> {
    pixels: FrameBuffer<&'a [u8]>,
}

impl<'a> Bitmap<'a> {
    /// Wrap `data` as a `width x height` bitmap, limited to [`MAX_BITMAP_PIXELS`]
    ///
    /// # Errors
    ///
    /// See [`Bitmap::with_limit`].
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        format: BitmapFormat,
    ) -> Result<Self, ImageError> {
        Self::with_limit(data, width, height, format, MAX_BITMAP_PIXELS)
    }

    /// Wrap `data` as a `width x height` bitmap with a custom pixel ceiling
    ///
    /// # Errors
    ///
    /// Returns `ImageError::TooLarge` if `width * height` exceeds `limit`, and
    /// `ImageError::Truncated` if `data` is shorter than the format requires.
    pub fn with_limit(
        data: &'a [u8],
        width: u32,
        height: u32,
        format: BitmapFormat,
        limit: usize,
    ) -> Result<Self, ImageError> {
        check_size(width, height, limit)?;
        let pixels = FrameBuffer::new(data, width, height, format).map_err(|e| {
            ImageError::Truncated {
                expected: e.required,
                provided: e.provided,
            }
        })?;
        Ok(Self { pixels })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Byte layout
    pub fn format(&self) -> BitmapFormat {
        self.pixels.format()
    }

    /// Pixel view of the bytes
    pub fn pixels(&self) -> &FrameBuffer<&'a [u8]> {
        &self.pixels
    }

    /// Size after `rotation`
    pub fn rotated_size(&self, rotation: Rotation) -> (u32, u32) {
        rotation.rotated_size(self.width(), self.height())
    }

    /// Owned, transformed copy for repeated drawing
    ///
    /// Monochrome and 4-bit bitmaps keep their format; 8-bit ones are reduced to
    /// 4-bit by keeping the high nibble. Width and height swap for 90 and 270 degree
    /// rotations.
    pub fn to_sprite(&self, rotation: Rotation, invert: bool) -> Sprite {
        let source = self.format();
        let target = match source {
            BitmapFormat::Gs8 => BitmapFormat::Gs4,
            other => other,
        };
        transform(&self.pixels, rotation, invert, target, |v| {
            source.convert(v, target)
        })
    }
}

/// Reject oversize dimensions before anything is allocated
pub fn check_size(width: u32, height: u32, limit: usize) -> Result<(), ImageError> {
    let pixels = width as usize * height as usize;
    if pixels > limit {
        return Err(ImageError::TooLarge { pixels, limit });
    }
    Ok(())
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]>,
{
    /// Owned copy rotated clockwise and optionally inverted, in the same format
    ///
    /// ```
    /// use ssd1322::framebuffer::{FrameBuffer, PixelFormat};
    /// use ssd1322::Rotation;
    ///
    /// let fb = match FrameBuffer::new([0x12u8, 0x34], 2, 2, PixelFormat::Gs4) {
    ///     Ok(fb) => fb,
    ///     Err(_) => return,
    /// };
    /// let turned = fb.rotated(Rotation::Rotate180, false);
    /// assert_eq!(turned.as_bytes(), &[0x43, 0x21]);
    /// ```
    pub fn rotated(&self, rotation: Rotation, invert: bool) -> FrameBuffer<alloc::vec::Vec<u8>> {
        let format = self.format();
        transform(self, rotation, invert, format, |v| v)
    }
}

/// Rotate, invert and map every pixel of `source` into a new buffer of `target` format
fn transform<S, F>(
    source: &FrameBuffer<S>,
    rotation: Rotation,
    invert: bool,
    target: BitmapFormat,
    map: F,
) -> FrameBuffer<alloc::vec::Vec<u8>>
where
    S: AsRef<[u8]>,
    F: Fn(u8) -> u8,
{
    let (width, height) = rotation.rotated_size(source.width(), source.height());
    let mut out = FrameBuffer::zeroed(target, width, height);
    write_transformed(&mut out, source, 0, 0, rotation, invert, map);
    out
}

/// Per-pixel transform loop shared by sprites and on-screen drawing
fn write_transformed<D, S, F>(
    target: &mut FrameBuffer<D>,
    source: &FrameBuffer<S>,
    x: i32,
    y: i32,
    rotation: Rotation,
    invert: bool,
    map: F,
) where
    D: AsRef<[u8]> + AsMut<[u8]>,
    S: AsRef<[u8]>,
    F: Fn(u8) -> u8,
{
    let format = source.format();
    let (width, height) = (source.width(), source.height());
    for sy in 0..height {
        for sx in 0..width {
            let mut value = source.get_pixel(sx as i32, sy as i32);
            if invert {
                value = format.invert(value);
            }
            let (dx, dy) = apply_rotation(sx, sy, width, height, rotation);
            target.set_pixel(x + dx as i32, y + dy as i32, map(value));
        }
    }
}

/// Draw `source` into a 4-bit `target` with its top-left corner at `(x, y)`
///
/// Monochrome pixels are mapped through a palette of background 0 and foreground
/// `style.gray`; 4-bit pixels are copied; 8-bit pixels keep their high nibble.
/// Inversion is applied to the source value before any of that. The unrotated,
/// uninverted case is a plain blit.
pub fn render<D, S>(
    target: &mut FrameBuffer<D>,
    source: &FrameBuffer<S>,
    x: i32,
    y: i32,
    style: BitmapStyle,
) where
    D: AsRef<[u8]> + AsMut<[u8]>,
    S: AsRef<[u8]>,
{
    let format = source.format();
    let palette = match format {
        BitmapFormat::Mono => Some(Palette::for_gray(style.gray, false)),
        _ => None,
    };
    if style.rotation == Rotation::Rotate0 && !style.invert {
        target.blit(source, x, y, None, palette.as_ref());
        return;
    }
    let target_format = target.format();
    write_transformed(target, source, x, y, style.rotation, style.invert, |v| {
        match &palette {
            Some(palette) => palette.map(v),
            None => format.convert(v, target_format),
        }
    });
}

#[cfg(feature = "std")]
mod file {
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;
    use std::vec::Vec;

    use super::{Bitmap, BitmapFormat, Rotation, Sprite, check_size};
    use crate::error::ImageError;

    /// Read a headerless bitmap file of the given dimensions
    ///
    /// Exactly `format.buffer_size(width, height)` bytes are read; extra bytes in the
    /// file are ignored.
    ///
    /// # Errors
    ///
    /// `ImageError::TooLarge` before the file is opened if the dimensions exceed
    /// `limit`, `ImageError::Truncated` if the file is short, and `ImageError::Io`
    /// for read failures.
    pub fn read_bitmap_file<P: AsRef<Path>>(
        path: P,
        width: u32,
        height: u32,
        format: BitmapFormat,
        limit: usize,
    ) -> Result<Vec<u8>, ImageError> {
        check_size(width, height, limit)?;
        let expected = format.buffer_size(width, height);
        let mut data = Vec::with_capacity(expected);
        File::open(path)?
            .take(expected as u64)
            .read_to_end(&mut data)?;
        if data.len() < expected {
            return Err(ImageError::Truncated {
                expected,
                provided: data.len(),
            });
        }
        Ok(data)
    }

    /// Read a bitmap file straight into a sprite
    ///
    /// # Errors
    ///
    /// Same as [`read_bitmap_file`].
    pub fn load_sprite_file<P: AsRef<Path>>(
        path: P,
        width: u32,
        height: u32,
        format: BitmapFormat,
        rotation: Rotation,
        invert: bool,
    ) -> Result<Sprite, ImageError> {
        let limit = crate::config::MAX_BITMAP_PIXELS;
        let data = read_bitmap_file(path, width, height, format, limit)?;
        let bitmap = Bitmap::with_limit(&data, width, height, format, limit)?;
        Ok(bitmap.to_sprite(rotation, invert))
    }
}

#[cfg(feature = "std")]
pub use file::{load_sprite_file, read_bitmap_file};
