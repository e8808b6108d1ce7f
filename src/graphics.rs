//! Buffered drawing on top of [`Display`]
//!
//! [`GraphicDisplay`] owns the controller driver, a packed 4-bit frame buffer and the
//! palette used for monochrome sources. Drawing calls only touch the buffer;
//! [`present`](GraphicDisplay::present) pushes it to the panel.
//!
//! Every drawing method checks the bounding box of what it is about to draw first.
//! If any part of it falls outside the panel the whole call is skipped, a warning is
//! logged and an [`OffGrid`](crate::bounds::OffGrid) status is returned. With the `graphics` feature the
//! display is also an embedded-graphics [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget),
//! which clips per pixel instead.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1322::{Builder, Dimensions, Display, GraphicDisplay, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let dims = match Dimensions::new(64, 256) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let display = Display::new(Interface::new(MockSpi, MockPin, MockPin), config);
//! let mut oled = match GraphicDisplay::new(display, vec![0u8; dims.buffer_size()]) {
//!     Ok(oled) => oled,
//!     Err(_) => return,
//! };
//! let _ = oled.init(&mut delay);
//!
//! let _ = oled.draw_rectangle(0, 0, 256, 64, 8);
//! let _ = oled.fill_circle(128, 32, 20, 15);
//!
//! // Reaches past the right edge: nothing is drawn
//! assert!(oled.draw_line(200, 10, 300, 10, 15).is_err());
//!
//! let _ = oled.present();
//! ```

use embedded_hal::delay::DelayNs;

use crate::bounds::{Bounds, DrawResult};
use crate::color::Palette;
use crate::display::Display;
use crate::error::{Error, ImageError};
use crate::framebuffer::{FrameBuffer, PixelFormat};
use crate::image::{Bitmap, BitmapStyle, render};
use crate::interface::DisplayInterface;
use crate::shapes;
use crate::text::{GlyphProvider, TextLayout, TextStyle, render_text, text_bounds};

type GraphicsResult<I> = core::result::Result<(), Error<I>>;
type GraphicsNewResult<I, T> = core::result::Result<T, Error<I>>;

/// Display with a 4-bit frame buffer
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `B` - Frame buffer storage of at least `dimensions.buffer_size()` bytes
pub struct GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// The underlying display driver
    display: Display<I>,
    /// Packed 4-bit pixels, row-major
    framebuffer: FrameBuffer<B>,
    /// Mono to gray mapping for [`blit`](Self::blit)
    palette: Palette,
}

impl<I, B> GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap `display` with `buffer` as its frame buffer
    ///
    /// The buffer contents are kept; call [`clear_buffer`](Self::clear_buffer) or
    /// [`init`](Self::init) to start from black.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` is shorter than
    /// `dimensions.buffer_size()`.
    pub fn new(display: Display<I>, buffer: B) -> GraphicsNewResult<I, Self> {
        let dims = *display.dimensions();
        let framebuffer = FrameBuffer::new(
            buffer,
            dims.cols as u32,
            dims.rows as u32,
            PixelFormat::Gs4,
        )
        .map_err(|e| Error::BufferTooSmall {
            required: e.required,
            provided: e.provided,
        })?;
        Ok(Self {
            display,
            framebuffer,
            palette: Palette::default(),
        })
    }

    /// Reset and configure the controller, then show a black frame
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> GraphicsResult<I> {
        self.display.init(delay)?;
        self.clear_buffer(0);
        self.present()
    }

    /// Push the frame buffer to the panel
    pub fn present(&mut self) -> GraphicsResult<I> {
        self.display.present(self.framebuffer.as_bytes())
    }

    /// Set every pixel of the frame buffer to `gray`
    pub fn clear_buffer(&mut self, gray: u8) {
        self.framebuffer.fill(gray);
    }

    /// Clear the buffer and push the black frame
    pub fn clear(&mut self) -> GraphicsResult<I> {
        self.clear_buffer(0);
        self.present()
    }

    /// Blank the panel, put the controller to sleep and hand back the parts
    ///
    /// The interface and the frame buffer storage are returned so the bus and pins
    /// can be reused.
    pub fn cleanup(mut self) -> GraphicsNewResult<I, (I, B)> {
        self.clear()?;
        self.display.sleep()?;
        Ok((self.display.release(), self.framebuffer.into_inner()))
    }

    /// Access the underlying Display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Access the underlying Display mutably
    ///
    /// Use this for runtime controls such as contrast, sleep or the gray scale table.
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// The frame buffer
    pub fn framebuffer(&self) -> &FrameBuffer<B> {
        &self.framebuffer
    }

    /// The frame buffer, without the bounds guard
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer<B> {
        &mut self.framebuffer
    }

    /// Palette used by [`blit`](Self::blit) for monochrome sources
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette used by [`blit`](Self::blit), for changing colors between blits
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    /// Check an inclusive bounding box against the panel
    ///
    /// Logs a warning and returns the reason when any edge is off the panel.
    pub fn is_off_grid(&self, xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> DrawResult {
        self.guard(Bounds::new(xmin, ymin, xmax, ymax))
    }

    fn guard(&self, bounds: Bounds) -> DrawResult {
        bounds
            .check(self.width(), self.height())
            .inspect_err(|off| log::warn!("{off}"))
    }

    /// Set one pixel
    pub fn draw_pixel(&mut self, x: i32, y: i32, gray: u8) -> DrawResult {
        self.guard(Bounds::point(x, y))?;
        self.framebuffer.set_pixel(x, y, gray);
        Ok(())
    }

    /// Horizontal run of `w` pixels starting at `(x, y)`
    pub fn draw_hline(&mut self, x: i32, y: i32, w: i32, gray: u8) -> DrawResult {
        self.guard(Bounds::from_area(x, y, w, 1))?;
        self.framebuffer.hline(x, y, w, gray);
        Ok(())
    }

    /// Vertical run of `h` pixels starting at `(x, y)`
    pub fn draw_vline(&mut self, x: i32, y: i32, h: i32, gray: u8) -> DrawResult {
        self.guard(Bounds::from_area(x, y, 1, h))?;
        self.framebuffer.vline(x, y, h, gray);
        Ok(())
    }

    /// Line between two points, both included
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, gray: u8) -> DrawResult {
        self.guard(Bounds::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)))?;
        self.framebuffer.line(x1, y1, x2, y2, gray);
        Ok(())
    }

    /// Polyline through `points` in order
    pub fn draw_lines(&mut self, points: &[(i32, i32)], gray: u8) -> DrawResult {
        let Some(bounds) = Bounds::enclosing(points.iter().copied()) else {
            return Ok(());
        };
        self.guard(bounds)?;
        shapes::draw_lines(&mut self.framebuffer, points, gray);
        Ok(())
    }

    /// Rectangle outline
    pub fn draw_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, gray: u8) -> DrawResult {
        self.guard(Bounds::from_area(x, y, w, h))?;
        self.framebuffer.rect(x, y, w, h, gray);
        Ok(())
    }

    /// Filled rectangle
    pub fn fill_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, gray: u8) -> DrawResult {
        self.guard(Bounds::from_area(x, y, w, h))?;
        self.framebuffer.fill_rect(x, y, w, h, gray);
        Ok(())
    }

    /// Circle outline of radius `r`, `2r + 1` pixels across
    pub fn draw_circle(&mut self, x0: i32, y0: i32, r: i32, gray: u8) -> DrawResult {
        self.guard(Bounds::centered(x0, y0, r, r))?;
        shapes::draw_circle(&mut self.framebuffer, x0, y0, r, gray);
        Ok(())
    }

    /// Filled circle of radius `r`
    pub fn fill_circle(&mut self, x0: i32, y0: i32, r: i32, gray: u8) -> DrawResult {
        self.guard(Bounds::centered(x0, y0, r, r))?;
        shapes::fill_circle(&mut self.framebuffer, x0, y0, r, gray);
        Ok(())
    }

    /// Ellipse outline with horizontal radius `a` and vertical radius `b`
    pub fn draw_ellipse(&mut self, x0: i32, y0: i32, a: i32, b: i32, gray: u8) -> DrawResult {
        self.guard(Bounds::centered(x0, y0, a, b))?;
        shapes::draw_ellipse(&mut self.framebuffer, x0, y0, a, b, gray);
        Ok(())
    }

    /// Filled ellipse
    pub fn fill_ellipse(&mut self, x0: i32, y0: i32, a: i32, b: i32, gray: u8) -> DrawResult {
        self.guard(Bounds::centered(x0, y0, a, b))?;
        shapes::fill_ellipse(&mut self.framebuffer, x0, y0, a, b, gray);
        Ok(())
    }

    /// Regular polygon outline, first vertex at `rotate` degrees clockwise from +x
    pub fn draw_polygon(
        &mut self,
        sides: u32,
        x0: i32,
        y0: i32,
        r: i32,
        gray: u8,
        rotate: f64,
    ) -> DrawResult {
        let vertices = shapes::polygon_vertices(sides, x0, y0, r, rotate);
        let Some(bounds) = Bounds::enclosing(vertices.iter().copied()) else {
            return Ok(());
        };
        self.guard(bounds)?;
        shapes::draw_lines(&mut self.framebuffer, &vertices, gray);
        Ok(())
    }

    /// Filled regular polygon
    ///
    /// Rows are filled one pixel past the outline on the right, and that pixel
    /// counts toward the bounds check.
    pub fn fill_polygon(
        &mut self,
        sides: u32,
        x0: i32,
        y0: i32,
        r: i32,
        gray: u8,
        rotate: f64,
    ) -> DrawResult {
        let vertices = shapes::polygon_vertices(sides, x0, y0, r, rotate);
        let Some(bounds) = Bounds::enclosing(vertices.iter().copied()) else {
            return Ok(());
        };
        self.guard(Bounds {
            xmax: bounds.xmax.saturating_add(1),
            ..bounds
        })?;
        let spans = shapes::polygon_spans(&vertices);
        shapes::fill_spans(&mut self.framebuffer, &spans, gray);
        Ok(())
    }

    /// Draw a bitmap with its top-left corner at `(x, y)` after rotation
    ///
    /// # Errors
    ///
    /// `ImageError::OffGrid` if the rotated bitmap does not fit on the panel.
    pub fn draw_bitmap(
        &mut self,
        bitmap: &Bitmap<'_>,
        x: i32,
        y: i32,
        style: BitmapStyle,
    ) -> Result<(), ImageError> {
        let (w, h) = bitmap.rotated_size(style.rotation);
        self.guard(Bounds::from_area(x, y, w as i32, h as i32))?;
        render(&mut self.framebuffer, bitmap.pixels(), x, y, style);
        Ok(())
    }

    /// Read a headerless bitmap file and draw it
    ///
    /// The size ceiling is the configured `max_bitmap_pixels`. The bounds check
    /// happens before the file is opened.
    #[cfg(feature = "std")]
    #[allow(clippy::too_many_arguments)]
    pub fn draw_bitmap_file<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
        width: u32,
        height: u32,
        format: crate::image::BitmapFormat,
        x: i32,
        y: i32,
        style: BitmapStyle,
    ) -> Result<(), ImageError> {
        let limit = self.display.config().max_bitmap_pixels;
        crate::image::check_size(width, height, limit)?;
        let (w, h) = style.rotation.rotated_size(width, height);
        self.guard(Bounds::from_area(x, y, w as i32, h as i32))?;
        let data = crate::image::read_bitmap_file(path, width, height, format, limit)?;
        let bitmap = Bitmap::with_limit(&data, width, height, format, limit)?;
        render(&mut self.framebuffer, bitmap.pixels(), x, y, style);
        Ok(())
    }

    /// Draw a sprite unrotated
    ///
    /// Lit monochrome pixels take `gray` on black, or black on `gray` when
    /// `invert` is set. 4-bit sprites are copied, complemented when inverted.
    pub fn draw_sprite<S>(
        &mut self,
        sprite: &FrameBuffer<S>,
        x: i32,
        y: i32,
        gray: u8,
        invert: bool,
    ) -> DrawResult
    where
        S: AsRef<[u8]>,
    {
        self.guard(Bounds::from_area(
            x,
            y,
            sprite.width() as i32,
            sprite.height() as i32,
        ))?;
        let style = BitmapStyle::gray(gray).inverted(invert);
        render(&mut self.framebuffer, sprite, x, y, style);
        Ok(())
    }

    /// Copy `source` in, skipping pixels whose final value is `key`
    ///
    /// Monochrome sources go through the display's [`palette`](Self::palette_mut);
    /// other formats are converted to 4-bit.
    pub fn blit<S>(&mut self, source: &FrameBuffer<S>, x: i32, y: i32, key: Option<u8>) -> DrawResult
    where
        S: AsRef<[u8]>,
    {
        self.guard(Bounds::from_area(
            x,
            y,
            source.width() as i32,
            source.height() as i32,
        ))?;
        let palette = (source.format() == PixelFormat::Mono).then_some(self.palette);
        self.framebuffer.blit(source, x, y, key, palette.as_ref());
        Ok(())
    }

    /// Lay out and draw `text` starting at `(x, y)`
    ///
    /// The whole string is checked against the panel before anything is drawn. A
    /// letter the provider does not have ends the text early; the returned
    /// [`TextLayout`] tells how far it got.
    pub fn draw_text<P>(
        &mut self,
        provider: &P,
        text: &str,
        x: i32,
        y: i32,
        style: &TextStyle,
    ) -> Result<TextLayout, crate::bounds::OffGrid>
    where
        P: GlyphProvider + ?Sized,
    {
        let (bounds, layout) = text_bounds(provider, text, x, y, style);
        let Some(bounds) = bounds else {
            return Ok(layout);
        };
        self.guard(bounds)?;
        Ok(render_text(&mut self.framebuffer, provider, text, x, y, style))
    }

    /// Draw a single glyph
    pub fn draw_letter<P>(
        &mut self,
        provider: &P,
        letter: char,
        x: i32,
        y: i32,
        style: &TextStyle,
    ) -> Result<TextLayout, crate::bounds::OffGrid>
    where
        P: GlyphProvider + ?Sized,
    {
        let mut utf8 = [0u8; 4];
        self.draw_text(provider, letter.encode_utf8(&mut utf8), x, y, style)
    }
}

#[cfg(feature = "graphics")]
mod draw_target {
    use core::convert::Infallible;

    use embedded_graphics_core::{
        draw_target::DrawTarget,
        geometry::{OriginDimensions, Size},
        pixelcolor::Gray4,
        prelude::{Pixel, Point},
        primitives::Rectangle,
    };

    use super::GraphicDisplay;
    use crate::color::gray_level;
    use crate::interface::DisplayInterface;

    impl<I, B> DrawTarget for GraphicDisplay<I, B>
    where
        I: DisplayInterface,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        type Color = Gray4;
        type Error = Infallible;

        fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
        where
            Iter: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(Point { x, y }, color) in pixels {
                self.framebuffer.set_pixel(x, y, gray_level(color));
            }
            Ok(())
        }

        fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
            self.framebuffer.fill_rect(
                area.top_left.x,
                area.top_left.y,
                area.size.width as i32,
                area.size.height as i32,
                gray_level(color),
            );
            Ok(())
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            self.framebuffer.fill(gray_level(color));
            Ok(())
        }
    }

    impl<I, B> OriginDimensions for GraphicDisplay<I, B>
    where
        I: DisplayInterface,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        fn size(&self) -> Size {
            Size::new(self.width(), self.height())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::OffGrid;
    use crate::config::{Builder, Dimensions};
    use crate::display::tests::{MockDelay, MockInterface};
    use crate::image::BitmapFormat;
    use crate::rotation::Rotation;
    use crate::text::Glyph;
    use alloc::vec;
    use alloc::vec::Vec;

    const ROWS: u16 = 64;
    const COLS: u16 = 256;

    fn test_display() -> Display<MockInterface> {
        let config = Builder::new()
            .dimensions(Dimensions::new(ROWS, COLS).unwrap())
            .build()
            .unwrap();
        Display::new(MockInterface::new(), config)
    }

    fn test_graphic_display() -> GraphicDisplay<MockInterface, Vec<u8>> {
        let display = test_display();
        let size = display.dimensions().buffer_size();
        GraphicDisplay::new(display, vec![0u8; size]).unwrap()
    }

    fn lit_pixels(gd: &GraphicDisplay<MockInterface, Vec<u8>>) -> Vec<(i32, i32, u8)> {
        let fb = gd.framebuffer();
        let mut lit = Vec::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                let v = fb.get_pixel(x, y);
                if v != 0 {
                    lit.push((x, y, v));
                }
            }
        }
        lit
    }

    #[test]
    fn test_new_rejects_small_buffer() {
        let display = test_display();
        let required = display.dimensions().buffer_size();
        assert_eq!(required, 8192);
        let result = GraphicDisplay::new(display, vec![0u8; required - 1]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 8192,
                provided: 8191
            })
        ));
    }

    #[test]
    fn test_draw_line_sets_exactly_the_run() {
        let mut gd = test_graphic_display();
        assert_eq!(gd.draw_line(0, 0, 5, 0, 15), Ok(()));
        let expected: Vec<_> = (0..=5).map(|x| (x, 0, 15)).collect();
        assert_eq!(lit_pixels(&gd), expected);
    }

    #[test]
    fn test_off_grid_call_is_skipped_whole() {
        let mut gd = test_graphic_display();
        assert_eq!(
            gd.draw_line(-1, 0, 5, 0, 15),
            Err(OffGrid::XBelowMin(-1))
        );
        assert_eq!(
            gd.fill_rectangle(250, 60, 10, 2, 15),
            Err(OffGrid::XAboveMax { x: 259, max: 255 })
        );
        assert_eq!(
            gd.draw_circle(10, 62, 3, 15),
            Err(OffGrid::YAboveMax { y: 65, max: 63 })
        );
        assert!(lit_pixels(&gd).is_empty());
    }

    #[test]
    fn test_is_off_grid_edges() {
        let gd = test_graphic_display();
        assert_eq!(gd.is_off_grid(0, 0, 255, 63), Ok(()));
        assert!(gd.is_off_grid(0, -1, 10, 10).is_err());
        assert!(gd.is_off_grid(0, 0, 256, 10).is_err());
        assert!(gd.is_off_grid(0, 0, 10, 64).is_err());
    }

    #[test]
    fn test_shapes_at_panel_edges() {
        let mut gd = test_graphic_display();
        assert_eq!(gd.draw_circle(5, 5, 5, 15), Ok(()));
        assert_eq!(gd.fill_ellipse(200, 32, 55, 31, 3), Ok(()));
        assert_eq!(gd.fill_ellipse(200, 32, 56, 31, 3), Err(OffGrid::XAboveMax { x: 256, max: 255 }));
        assert_eq!(gd.framebuffer().get_pixel(0, 5), 15);
        assert_eq!(gd.framebuffer().get_pixel(255, 32), 3);
    }

    #[test]
    fn test_fill_polygon_bounds_include_overhang() {
        let mut gd = test_graphic_display();
        assert_eq!(gd.draw_polygon(4, 250, 30, 5, 15, 0.0), Ok(()));
        assert_eq!(
            gd.fill_polygon(4, 250, 30, 5, 15, 0.0),
            Err(OffGrid::XAboveMax { x: 256, max: 255 })
        );
        assert_eq!(gd.fill_polygon(4, 100, 30, 5, 9, 0.0), Ok(()));
        assert_eq!(gd.framebuffer().get_pixel(100, 30), 9);
        assert_eq!(gd.fill_polygon(0, 100, 30, 5, 9, 0.0), Ok(()));
    }

    #[test]
    fn test_huge_polygon_rejected_before_scanning() {
        let mut gd = test_graphic_display();
        assert_eq!(
            gd.fill_polygon(4, 100, 30, 1_000_000, 15, 0.0),
            Err(OffGrid::XBelowMin(-999_900))
        );
        assert!(gd.fill_polygon(4, 100, 30, i32::MAX, 15, 0.0).is_err());
        assert!(gd.draw_polygon(6, 100, 30, i32::MAX, 15, 0.0).is_err());
        assert!(lit_pixels(&gd).is_empty());
    }

    #[test]
    fn test_extreme_coordinates_are_off_grid() {
        let mut gd = test_graphic_display();
        assert_eq!(
            gd.draw_hline(i32::MAX, 0, 2, 15),
            Err(OffGrid::XAboveMax {
                x: i32::MAX,
                max: 255
            })
        );
        assert_eq!(
            gd.draw_circle(10, 10, i32::MAX, 15),
            Err(OffGrid::XBelowMin(10 - i32::MAX))
        );
        assert!(gd.fill_circle(i32::MIN, 10, 3, 15).is_err());
        assert!(gd.draw_ellipse(10, 10, 3, i32::MAX, 15).is_err());
        assert!(gd.fill_rectangle(0, i32::MAX, 4, 4, 15).is_err());
        assert!(gd.draw_vline(0, 0, i32::MAX, 15).is_err());
        assert!(lit_pixels(&gd).is_empty());
    }

    #[test]
    fn test_draw_lines() {
        let mut gd = test_graphic_display();
        assert_eq!(gd.draw_lines(&[(0, 0), (4, 0), (4, 4)], 7), Ok(()));
        assert_eq!(gd.framebuffer().get_pixel(4, 2), 7);
        assert_eq!(gd.draw_lines(&[], 7), Ok(()));
        assert!(gd.draw_lines(&[(0, 0), (0, 64)], 7).is_err());
    }

    #[test]
    fn test_draw_bitmap_checks_rotated_size() {
        let mut gd = test_graphic_display();
        // 16x2 monochrome, every pixel lit
        let data = [0xFFu8; 4];
        let bitmap = Bitmap::new(&data, 16, 2, BitmapFormat::Mono).unwrap();

        let upright = BitmapStyle::gray(6);
        assert!(gd.draw_bitmap(&bitmap, 0, 62, upright).is_ok());
        assert_eq!(gd.framebuffer().get_pixel(15, 63), 6);

        let turned = upright.rotated(Rotation::Rotate90);
        assert!(matches!(
            gd.draw_bitmap(&bitmap, 0, 62, turned),
            Err(ImageError::OffGrid(OffGrid::YAboveMax { y: 77, max: 63 }))
        ));
        assert!(gd.draw_bitmap(&bitmap, 254, 0, turned).is_ok());
        assert_eq!(gd.framebuffer().get_pixel(255, 15), 6);
    }

    #[test]
    fn test_draw_sprite_and_blit() {
        let mut gd = test_graphic_display();
        let mut sprite = FrameBuffer::zeroed(PixelFormat::Mono, 4, 1);
        sprite.set_pixel(1, 0, 1);

        assert_eq!(gd.draw_sprite(&sprite, 10, 10, 9, false), Ok(()));
        assert_eq!(gd.framebuffer().get_pixel(11, 10), 9);
        assert_eq!(gd.framebuffer().get_pixel(10, 10), 0);

        assert_eq!(gd.draw_sprite(&sprite, 10, 10, 9, true), Ok(()));
        assert_eq!(gd.framebuffer().get_pixel(11, 10), 0);
        assert_eq!(gd.framebuffer().get_pixel(10, 10), 9);

        gd.clear_buffer(4);
        gd.palette_mut().set_foreground(12);
        assert_eq!(gd.blit(&sprite, 10, 10, Some(0)), Ok(()));
        assert_eq!(gd.framebuffer().get_pixel(11, 10), 12);
        assert_eq!(gd.framebuffer().get_pixel(10, 10), 4);

        assert!(gd.draw_sprite(&sprite, 253, 0, 9, false).is_err());
    }

    struct FixedFont;

    impl GlyphProvider for FixedFont {
        fn glyph(&self, letter: char, rotation: Rotation) -> Option<Glyph<'_>> {
            static SOLID: [u8; 8] = [0xFF; 8];
            let (width, height) = rotation.rotated_size(6, 8);
            letter.is_ascii_alphanumeric().then_some(Glyph {
                data: &SOLID,
                width,
                height,
            })
        }
    }

    #[test]
    fn test_draw_text_guards_whole_string() {
        let mut gd = test_graphic_display();
        let style = TextStyle::default();

        let layout = gd.draw_text(&FixedFont, "abc", 0, 0, &style).unwrap();
        assert_eq!(layout.cursor, (20, 0));
        assert!(layout.complete);
        assert_eq!(gd.framebuffer().get_pixel(19, 7), 15);
        assert_eq!(gd.framebuffer().get_pixel(6, 0), 0);

        gd.clear_buffer(0);
        assert_eq!(
            gd.draw_text(&FixedFont, "abc", 240, 0, &style),
            Err(OffGrid::XAboveMax { x: 259, max: 255 })
        );
        assert!(gd.draw_text(&FixedFont, "abc", i32::MAX - 3, 0, &style).is_err());
        assert!(lit_pixels(&gd).is_empty());
    }

    #[test]
    fn test_draw_text_stops_at_unsupported_glyph() {
        let mut gd = test_graphic_display();
        let layout = gd
            .draw_text(&FixedFont, "a b", 0, 0, &TextStyle::default())
            .unwrap();
        assert_eq!(layout.glyphs, 1);
        assert!(!layout.complete);
        assert_eq!(gd.framebuffer().get_pixel(7, 0), 0);

        let layout = gd.draw_letter(&FixedFont, '?', 0, 0, &TextStyle::default());
        assert_eq!(layout.map(|l| l.glyphs), Ok(0));
    }

    #[test]
    fn test_present_sends_buffer_after_window() {
        let mut gd = test_graphic_display();
        gd.clear_buffer(0x0A);
        gd.present().unwrap();

        let calls = &gd.display().interface().command_data;
        let n = calls.len();
        assert_eq!(calls[n - 3], (0x15, vec![28, 91]));
        assert_eq!(calls[n - 2], (0x75, vec![0, 63]));
        assert_eq!(calls[n - 1].0, 0x5C);
        assert_eq!(calls[n - 1].1.len(), 8192);
        assert!(calls[n - 1].1.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_init_presents_black_frame() {
        let mut gd = test_graphic_display();
        gd.clear_buffer(15);
        gd.init(&mut MockDelay).unwrap();
        assert!(gd.framebuffer().as_bytes().iter().all(|&b| b == 0));
        let calls = &gd.display().interface().command_data;
        assert_eq!(calls.last().map(|(cmd, _)| *cmd), Some(0x5C));
    }

    #[test]
    fn test_cleanup_blanks_and_sleeps() {
        let mut gd = test_graphic_display();
        let _ = gd.fill_rectangle(0, 0, 10, 10, 15);
        let (interface, buffer) = gd.cleanup().unwrap();
        assert!(buffer.iter().all(|&b| b == 0));
        assert_eq!(interface.commands.last(), Some(&0xAE));
        assert!(interface.data.iter().any(|d| d.len() == 8192));
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_draw_target_clips_per_pixel() {
        use embedded_graphics::{
            pixelcolor::Gray4,
            prelude::*,
            primitives::{PrimitiveStyle, Rectangle},
        };

        let mut gd = test_graphic_display();
        assert_eq!(gd.size(), Size::new(256, 64));

        Rectangle::new(Point::new(250, 60), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(Gray4::new(7)))
            .draw(&mut gd)
            .unwrap();
        assert_eq!(gd.framebuffer().get_pixel(255, 63), 7);
        assert_eq!(gd.framebuffer().get_pixel(249, 63), 0);

        Pixel(Point::new(3, 4), Gray4::WHITE).draw(&mut gd).unwrap();
        Pixel(Point::new(-3, 4), Gray4::WHITE).draw(&mut gd).unwrap();
        assert_eq!(gd.framebuffer().get_pixel(3, 4), 15);

        DrawTarget::clear(&mut gd, Gray4::new(2)).unwrap();
        assert_eq!(gd.framebuffer().get_pixel(100, 30), 2);
    }
}
