//! Text layout over an external glyph source
//!
//! The driver carries no fonts. A [`GlyphProvider`] hands out monochrome glyph
//! bitmaps, already rotated for the requested direction, and this module places them
//! one after another:
//!
//! | Rotation  | Text runs | Glyph drawn at |
//! |-----------|-----------|----------------|
//! | Rotate0   | left to right (+x) | cursor |
//! | Rotate90  | top to bottom (+y) | cursor |
//! | Rotate180 | right to left (-x) | cursor minus glyph width |
//! | Rotate270 | bottom to top (-y) | cursor minus glyph height |
//!
//! `spacing` pixels separate consecutive glyphs. The gap is painted with the
//! background so whatever was under it is overwritten. A glyph the provider does not
//! have ends the layout early; the returned [`TextLayout`] says how far it got.
//!
//! ## Example
//!
//! ```
//! use ssd1322::framebuffer::{FrameBuffer, PixelFormat};
//! use ssd1322::text::{render_text, Glyph, GlyphProvider, TextStyle};
//! use ssd1322::Rotation;
//!
//! struct Blocks;
//!
//! impl GlyphProvider for Blocks {
//!     fn glyph(&self, letter: char, _rotation: Rotation) -> Option<Glyph<'_>> {
//!         static SOLID: [u8; 8] = [0xFF; 8];
//!         letter.is_ascii_alphabetic().then_some(Glyph {
//!             data: &SOLID,
//!             width: 6,
//!             height: 8,
//!         })
//!     }
//! }
//!
//! let mut fb = match FrameBuffer::new([0u8; 256], 32, 16, PixelFormat::Gs4) {
//!     Ok(fb) => fb,
//!     Err(_) => return,
//! };
//! let layout = render_text(&mut fb, &Blocks, "Hi", 0, 0, &TextStyle::default());
//! assert_eq!(layout.glyphs, 2);
//! assert_eq!(layout.cursor, (13, 0));
//! assert!(layout.complete);
//! ```

use crate::bounds::Bounds;
use crate::color::{Palette, WHITE};
use crate::framebuffer::{FrameBuffer, PixelFormat};
use crate::rotation::Rotation;

/// One monochrome glyph bitmap
///
/// `data` uses the monochrome bitmap layout: `ceil(width / 8)` bytes per row, bit 0
/// leftmost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph<'a> {
    /// Packed monochrome pixels
    pub data: &'a [u8],
    /// Width in pixels after rotation
    pub width: u32,
    /// Height in pixels after rotation
    pub height: u32,
}

/// Source of glyph bitmaps
pub trait GlyphProvider {
    /// Bitmap for `letter`, rotated clockwise by `rotation`
    ///
    /// Returning `None`, or a glyph with zero width or height, marks the letter as
    /// unsupported.
    fn glyph(&self, letter: char, rotation: Rotation) -> Option<Glyph<'_>>;

    /// Width of `text` laid out left to right with `spacing` between glyphs
    ///
    /// Stops at the first unsupported letter.
    fn measure_text(&self, text: &str, spacing: u32) -> u32 {
        let mut width = 0;
        for (index, letter) in text.chars().enumerate() {
            let Some(glyph) = self.glyph(letter, Rotation::Rotate0) else {
                break;
            };
            if glyph.width == 0 || glyph.height == 0 {
                break;
            }
            if index > 0 {
                width += spacing;
            }
            width += glyph.width;
        }
        width
    }
}

/// How text is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Gray level of lit glyph pixels
    pub gray: u8,
    /// Draw background-colored glyphs on a `gray` block
    pub invert: bool,
    /// Text direction and glyph rotation
    pub rotation: Rotation,
    /// Pixels between glyphs
    pub spacing: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            gray: WHITE,
            invert: false,
            rotation: Rotation::Rotate0,
            spacing: 1,
        }
    }
}

impl TextStyle {
    /// Palette glyphs are drawn through
    pub fn palette(&self) -> Palette {
        Palette::for_gray(self.gray, self.invert)
    }
}

/// How far a layout got
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextLayout {
    /// Number of glyphs placed
    pub glyphs: usize,
    /// Cursor after the last placed glyph
    pub cursor: (i32, i32),
    /// Whether every letter was placed
    pub complete: bool,
}

/// One step of a layout walk
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placement<'a> {
    /// Glyph pixels with their top-left corner at `(x, y)`
    Glyph {
        /// Left edge
        x: i32,
        /// Top edge
        y: i32,
        /// Glyph bitmap
        pixels: FrameBuffer<&'a [u8]>,
    },
    /// Background-filled gap between two glyphs
    Gap {
        /// Left edge
        x: i32,
        /// Top edge
        y: i32,
        /// Width
        w: i32,
        /// Height
        h: i32,
    },
}

impl Placement<'_> {
    /// Pixels covered by this step
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Glyph { x, y, pixels } => {
                Bounds::from_area(*x, *y, pixels.width() as i32, pixels.height() as i32)
            }
            Self::Gap { x, y, w, h } => Bounds::from_area(*x, *y, *w, *h),
        }
    }
}

/// Walk `text` from `(x, y)`, handing each glyph and gap to `place`
pub fn layout<'a, P, F>(
    provider: &'a P,
    text: &str,
    x: i32,
    y: i32,
    style: &TextStyle,
    mut place: F,
) -> TextLayout
where
    P: GlyphProvider + ?Sized,
    F: FnMut(Placement<'a>),
{
    let spacing = style.spacing as i32;
    let (mut cx, mut cy) = (x, y);
    let mut previous: Option<(i32, i32)> = None;
    let mut glyphs = 0;

    for letter in text.chars() {
        let Some(glyph) = provider.glyph(letter, style.rotation) else {
            return TextLayout {
                glyphs,
                cursor: (cx, cy),
                complete: false,
            };
        };
        let pixels = match FrameBuffer::new(glyph.data, glyph.width, glyph.height, PixelFormat::Mono) {
            Ok(pixels) if glyph.width > 0 && glyph.height > 0 => pixels,
            _ => {
                return TextLayout {
                    glyphs,
                    cursor: (cx, cy),
                    complete: false,
                };
            }
        };
        let (w, h) = (glyph.width as i32, glyph.height as i32);

        if let Some((pw, ph)) = previous.filter(|_| spacing > 0) {
            let gap = match style.rotation {
                Rotation::Rotate0 => {
                    let gap = Placement::Gap { x: cx, y: cy, w: spacing, h: ph };
                    cx = cx.saturating_add(spacing);
                    gap
                }
                Rotation::Rotate90 => {
                    let gap = Placement::Gap { x: cx, y: cy, w: pw, h: spacing };
                    cy = cy.saturating_add(spacing);
                    gap
                }
                Rotation::Rotate180 => {
                    cx = cx.saturating_sub(spacing);
                    Placement::Gap { x: cx, y: cy, w: spacing, h: ph }
                }
                Rotation::Rotate270 => {
                    cy = cy.saturating_sub(spacing);
                    Placement::Gap { x: cx, y: cy, w: pw, h: spacing }
                }
            };
            place(gap);
        }

        let (gx, gy) = match style.rotation {
            Rotation::Rotate0 => {
                let at = (cx, cy);
                cx = cx.saturating_add(w);
                at
            }
            Rotation::Rotate90 => {
                let at = (cx, cy);
                cy = cy.saturating_add(h);
                at
            }
            Rotation::Rotate180 => {
                cx = cx.saturating_sub(w);
                (cx, cy)
            }
            Rotation::Rotate270 => {
                cy = cy.saturating_sub(h);
                (cx, cy)
            }
        };
        place(Placement::Glyph {
            x: gx,
            y: gy,
            pixels,
        });
        previous = Some((w, h));
        glyphs += 1;
    }

    TextLayout {
        glyphs,
        cursor: (cx, cy),
        complete: true,
    }
}

/// Bounding box of everything `text` would draw, `None` if nothing would be drawn
pub fn text_bounds<P>(
    provider: &P,
    text: &str,
    x: i32,
    y: i32,
    style: &TextStyle,
) -> (Option<Bounds>, TextLayout)
where
    P: GlyphProvider + ?Sized,
{
    let mut bounds: Option<Bounds> = None;
    let result = layout(provider, text, x, y, style, |placement| {
        let b = placement.bounds();
        bounds = Some(bounds.map_or(b, |acc| acc.union(b)));
    });
    (bounds, result)
}

/// Lay out and draw `text` into `target`
///
/// Glyphs go through [`TextStyle::palette`]; gaps are filled with its background.
/// Pixels outside `target` are dropped.
pub fn render_text<B, P>(
    target: &mut FrameBuffer<B>,
    provider: &P,
    text: &str,
    x: i32,
    y: i32,
    style: &TextStyle,
) -> TextLayout
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    P: GlyphProvider + ?Sized,
{
    let palette = style.palette();
    layout(provider, text, x, y, style, |placement| match placement {
        Placement::Glyph { x, y, pixels } => target.blit(&pixels, x, y, None, Some(&palette)),
        Placement::Gap { x, y, w, h } => target.fill_rect(x, y, w, h, palette.background()),
    })
}
