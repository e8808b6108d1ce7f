//! Shape rasterization
//!
//! Integer midpoint circles and ellipses, and regular polygons, drawn into a
//! [`FrameBuffer`]. Nothing here clips or validates: pixels outside the buffer are
//! dropped by the buffer itself, and [`GraphicDisplay`](crate::GraphicDisplay)
//! checks the bounding box before calling in.
//!
//! The center of every shape sits on a pixel, so a radius `r` gives a pixel diameter
//! of `2r + 1`.
//!
//! ## Example
//!
//! ```
//! use ssd1322::framebuffer::{FrameBuffer, PixelFormat};
//! use ssd1322::shapes;
//!
//! let mut fb = match FrameBuffer::new([0u8; 128], 16, 16, PixelFormat::Gs4) {
//!     Ok(fb) => fb,
//!     Err(_) => return,
//! };
//! shapes::fill_circle(&mut fb, 8, 8, 3, 15);
//! assert_eq!(fb.get_pixel(8, 5), 15);
//! assert_eq!(fb.get_pixel(8, 4), 0);
//! ```

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::f64::consts::PI;

use crate::framebuffer::{FrameBuffer, walk_line};

/// Row to `(min x, max x)` table produced by a polygon scanline walk
pub type Spans = BTreeMap<i32, (i32, i32)>;

/// Midpoint circle stepper
///
/// Calls `visit(x, y)` for each step of the first octant after the starting point
/// `(0, r)`, until `x` reaches `y`.
fn circle_octant<F>(r: i32, mut visit: F)
where
    F: FnMut(i32, i32),
{
    let mut f = 1 - r;
    let mut dx = 1;
    let mut dy = -2 * r;
    let mut x = 0;
    let mut y = r;
    while x < y {
        if f >= 0 {
            y -= 1;
            dy += 2;
            f += dy;
        }
        x += 1;
        dx += 2;
        f += dx;
        visit(x, y);
    }
}

/// Circle outline centred on `(x0, y0)`
pub fn draw_circle<B>(fb: &mut FrameBuffer<B>, x0: i32, y0: i32, r: i32, value: u8)
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    if r < 0 {
        return;
    }
    fb.set_pixel(x0, y0 + r, value);
    fb.set_pixel(x0, y0 - r, value);
    fb.set_pixel(x0 + r, y0, value);
    fb.set_pixel(x0 - r, y0, value);
    circle_octant(r, |x, y| {
        fb.set_pixel(x0 + x, y0 + y, value);
        fb.set_pixel(x0 - x, y0 + y, value);
        fb.set_pixel(x0 + x, y0 - y, value);
        fb.set_pixel(x0 - x, y0 - y, value);
        fb.set_pixel(x0 + y, y0 + x, value);
        fb.set_pixel(x0 - y, y0 + x, value);
        fb.set_pixel(x0 + y, y0 - x, value);
        fb.set_pixel(x0 - y, y0 - x, value);
    });
}

/// Filled circle centred on `(x0, y0)`, emitted as vertical runs
pub fn fill_circle<B>(fb: &mut FrameBuffer<B>, x0: i32, y0: i32, r: i32, value: u8)
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    if r < 0 {
        return;
    }
    fb.vline(x0, y0 - r, 2 * r + 1, value);
    circle_octant(r, |x, y| {
        fb.vline(x0 + x, y0 - y, 2 * y + 1, value);
        fb.vline(x0 - x, y0 - y, 2 * y + 1, value);
        fb.vline(x0 - y, y0 - x, 2 * x + 1, value);
        fb.vline(x0 + y, y0 - x, 2 * x + 1, value);
    });
}

/// Two-region midpoint ellipse stepper
///
/// Calls `visit(x, y)` with the starting point `(0, b)` and then every step of the
/// first quadrant, ending on the horizontal axis. Decision terms are integer:
/// quarter-pixel seed terms only ever carry a fraction of 0 or 1/4, which rounds
/// away.
fn ellipse_quadrant<F>(a: i32, b: i32, mut visit: F)
where
    F: FnMut(i32, i32),
{
    let a2 = i64::from(a) * i64::from(a);
    let b2 = i64::from(b) * i64::from(b);
    let two_a2 = 2 * a2;
    let two_b2 = 2 * b2;
    let mut x = 0i64;
    let mut y = i64::from(b);
    let mut px = 0i64;
    let mut py = two_a2 * y;

    visit(x as i32, y as i32);

    // Region 1: slope shallower than -1
    let mut p = b2 - a2 * y + (a2 >> 2);
    while px < py {
        x += 1;
        px += two_b2;
        if p < 0 {
            p += b2 + px;
        } else {
            y -= 1;
            py -= two_a2;
            p += b2 + px - py;
        }
        visit(x as i32, y as i32);
    }

    // Region 2: on to the far vertex
    p = b2 * (x * x + x) + (b2 >> 2) + a2 * (y - 1) * (y - 1) - a2 * b2;
    while y > 0 {
        y -= 1;
        py -= two_a2;
        if p > 0 {
            p += a2 - py;
        } else {
            x += 1;
            px += two_b2;
            p += a2 - py + px;
        }
        visit(x as i32, y as i32);
    }
}

/// Ellipse outline centred on `(x0, y0)` with semi-axes `a` (horizontal) and `b`
/// (vertical)
pub fn draw_ellipse<B>(fb: &mut FrameBuffer<B>, x0: i32, y0: i32, a: i32, b: i32, value: u8)
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    if a < 0 || b < 0 {
        return;
    }
    ellipse_quadrant(a, b, |x, y| {
        fb.set_pixel(x0 + x, y0 + y, value);
        fb.set_pixel(x0 - x, y0 + y, value);
        fb.set_pixel(x0 + x, y0 - y, value);
        fb.set_pixel(x0 - x, y0 - y, value);
    });
}

/// Filled ellipse centred on `(x0, y0)`, emitted as vertical runs
pub fn fill_ellipse<B>(fb: &mut FrameBuffer<B>, x0: i32, y0: i32, a: i32, b: i32, value: u8)
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    if a < 0 || b < 0 {
        return;
    }
    ellipse_quadrant(a, b, |x, y| {
        fb.vline(x0 + x, y0 - y, 2 * y + 1, value);
        if x != 0 {
            fb.vline(x0 - x, y0 - y, 2 * y + 1, value);
        }
    });
}

/// Vertices of a regular polygon, closing vertex included
///
/// Vertex `s` sits at angle `2*pi*s/sides + rotate` (degrees converted to radians) on a
/// circle of radius `r`; coordinates are truncated toward zero. Returns `sides + 1`
/// points, the last one at angle `2*pi + rotate`, or nothing when `sides` is 0.
/// Truncation can put the closing vertex one pixel away from the first.
///
/// ```
/// use ssd1322::shapes::polygon_vertices;
///
/// let square = polygon_vertices(4, 10, 10, 5, 0.0);
/// assert_eq!(square.len(), 5);
/// assert_eq!(square[0], (15, 10));
/// assert_eq!(square[2], (5, 10));
/// ```
pub fn polygon_vertices(sides: u32, x0: i32, y0: i32, r: i32, rotate: f64) -> Vec<(i32, i32)> {
    if sides == 0 {
        return Vec::new();
    }
    let theta = rotate * PI / 180.0;
    let r = f64::from(r);
    (0..=sides)
        .map(|s| {
            let t = 2.0 * PI * f64::from(s) / f64::from(sides) + theta;
            (
                (r * libm::cos(t) + f64::from(x0)) as i32,
                (r * libm::sin(t) + f64::from(y0)) as i32,
            )
        })
        .collect()
}

/// Polyline through `points` in order
pub fn draw_lines<B>(fb: &mut FrameBuffer<B>, points: &[(i32, i32)], value: u8)
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    for pair in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        fb.line(x1, y1, x2, y2, value);
    }
}

/// Regular polygon outline
pub fn draw_polygon<B>(
    fb: &mut FrameBuffer<B>,
    sides: u32,
    x0: i32,
    y0: i32,
    r: i32,
    rotate: f64,
    value: u8,
) where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    draw_lines(fb, &polygon_vertices(sides, x0, y0, r, rotate), value);
}

/// Scanline table of a closed vertex list
///
/// Each edge is walked with the same stepper as [`FrameBuffer::line`], both ends
/// included, and every touched pixel widens its row's `(min, max)`; horizontal
/// edges widen their row directly.
pub fn polygon_spans(vertices: &[(i32, i32)]) -> Spans {
    let mut spans = Spans::new();
    let Some(&(x, y)) = vertices.first() else {
        return spans;
    };
    let mut touch = |x: i32, y: i32| {
        spans
            .entry(y)
            .and_modify(|(min, max)| {
                *min = (*min).min(x);
                *max = (*max).max(x);
            })
            .or_insert((x, x));
    };
    touch(x, y);
    for pair in vertices.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        if y1 == y2 {
            touch(x1.min(x2), y1);
            touch(x1.max(x2), y1);
        } else {
            walk_line(x1, y1, x2, y2, &mut touch);
        }
    }
    spans
}

/// Filled regular polygon
///
/// Each row is filled from its minimum x through one pixel past its maximum.
pub fn fill_polygon<B>(
    fb: &mut FrameBuffer<B>,
    sides: u32,
    x0: i32,
    y0: i32,
    r: i32,
    rotate: f64,
    value: u8,
) where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let vertices = polygon_vertices(sides, x0, y0, r, rotate);
    fill_spans(fb, &polygon_spans(&vertices), value);
}

/// Fill every row of a scanline table
pub fn fill_spans<B>(fb: &mut FrameBuffer<B>, spans: &Spans, value: u8)
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    for (&y, &(min, max)) in spans {
        fb.hline(min, y, max - min + 2, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::PixelFormat;
    use alloc::vec;

    fn canvas(size: u32) -> FrameBuffer<Vec<u8>> {
        let bytes = PixelFormat::Gs4.buffer_size(size, size);
        FrameBuffer::new(vec![0u8; bytes], size, size, PixelFormat::Gs4).unwrap()
    }

    fn lit(fb: &FrameBuffer<Vec<u8>>) -> Vec<(i32, i32)> {
        let mut points = Vec::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.get_pixel(x, y) != 0 {
                    points.push((x, y));
                }
            }
        }
        points
    }

    fn assert_symmetric(fb: &FrameBuffer<Vec<u8>>, cx: i32, cy: i32) {
        for (x, y) in lit(fb) {
            let mx = 2 * cx - x;
            let my = 2 * cy - y;
            assert_ne!(fb.get_pixel(mx, y), 0, "mirror of ({x},{y}) across x={cx}");
            assert_ne!(fb.get_pixel(x, my), 0, "mirror of ({x},{y}) across y={cy}");
        }
    }

    #[test]
    fn test_circle_outline_symmetric() {
        for r in 0..12 {
            let mut fb = canvas(32);
            draw_circle(&mut fb, 16, 16, r, 15);
            assert_symmetric(&fb, 16, 16);
            // Octant symmetry: swapping the axes maps the outline onto itself
            for (x, y) in lit(&fb) {
                assert_ne!(fb.get_pixel(16 + (y - 16), 16 + (x - 16)), 0);
            }
        }
    }

    #[test]
    fn test_circle_extent() {
        let mut fb = canvas(32);
        draw_circle(&mut fb, 16, 16, 7, 15);
        let points = lit(&fb);
        assert_eq!(points.iter().map(|p| p.0).min(), Some(9));
        assert_eq!(points.iter().map(|p| p.0).max(), Some(23));
        assert_eq!(points.iter().map(|p| p.1).min(), Some(9));
        assert_eq!(points.iter().map(|p| p.1).max(), Some(23));
    }

    #[test]
    fn test_fill_circle_symmetric_and_covers_outline() {
        for r in 0..12 {
            let mut outline = canvas(32);
            let mut filled = canvas(32);
            draw_circle(&mut outline, 16, 16, r, 15);
            fill_circle(&mut filled, 16, 16, r, 15);
            assert_symmetric(&filled, 16, 16);
            for (x, y) in lit(&filled) {
                let swapped = filled.get_pixel(16 + (y - 16), 16 + (x - 16));
                assert_ne!(swapped, 0, "r={r} ({x},{y})");
            }
            for (x, y) in lit(&outline) {
                assert_ne!(filled.get_pixel(x, y), 0, "r={r} ({x},{y})");
            }
        }
    }

    #[test]
    fn test_fill_circle_rows_are_contiguous() {
        let mut fb = canvas(32);
        fill_circle(&mut fb, 16, 16, 9, 15);
        for y in 0..32 {
            let xs: Vec<i32> = (0..32).filter(|&x| fb.get_pixel(x, y) != 0).collect();
            if let (Some(first), Some(last)) = (xs.first(), xs.last()) {
                assert_eq!(xs.len() as i32, last - first + 1, "row {y}");
            }
        }
    }

    #[test]
    fn test_ellipse_pixel_diameter() {
        let mut fb = canvas(48);
        draw_ellipse(&mut fb, 24, 24, 12, 5, 15);
        let points = lit(&fb);
        let xmin = points.iter().map(|p| p.0).min().unwrap();
        let xmax = points.iter().map(|p| p.0).max().unwrap();
        let ymin = points.iter().map(|p| p.1).min().unwrap();
        let ymax = points.iter().map(|p| p.1).max().unwrap();
        assert_eq!(xmax - xmin + 1, 25);
        assert_eq!(ymax - ymin + 1, 11);
        assert_symmetric(&fb, 24, 24);
    }

    #[test]
    fn test_ellipse_with_equal_axes_touches_axis_points() {
        let mut fb = canvas(32);
        draw_ellipse(&mut fb, 16, 16, 6, 6, 15);
        for (x, y) in [(22, 16), (10, 16), (16, 22), (16, 10)] {
            assert_ne!(fb.get_pixel(x, y), 0);
        }
    }

    #[test]
    fn test_fill_ellipse_covers_outline() {
        for (a, b) in [(1, 1), (3, 8), (10, 4), (15, 15), (0, 5)] {
            let mut outline = canvas(40);
            let mut filled = canvas(40);
            draw_ellipse(&mut outline, 20, 20, a, b, 15);
            fill_ellipse(&mut filled, 20, 20, a, b, 15);
            assert_symmetric(&filled, 20, 20);
            for (x, y) in lit(&outline) {
                assert_ne!(filled.get_pixel(x, y), 0, "a={a} b={b} ({x},{y})");
            }
        }
    }

    #[test]
    fn test_polygon_vertices_count() {
        let vertices = polygon_vertices(6, 30, 30, 10, 15.0);
        assert_eq!(vertices.len(), 7);
        let (first, last) = (vertices[0], vertices[6]);
        assert!((first.0 - last.0).abs() <= 1 && (first.1 - last.1).abs() <= 1);
        assert!(polygon_vertices(0, 0, 0, 5, 0.0).is_empty());
    }

    #[test]
    fn test_polygon_vertices_on_radius() {
        let vertices = polygon_vertices(3, 20, 20, 10, 0.0);
        assert_eq!(vertices[0], (30, 20));
        // sin(120deg) * 10 = 8.66 truncates to 8
        assert_eq!(vertices[1].1, 28);
        for (x, y) in vertices {
            let d2 = (x - 20) * (x - 20) + (y - 20) * (y - 20);
            assert!((81..=121).contains(&d2), "({x},{y})");
        }
    }

    #[test]
    fn test_polygon_outline_inside_fill() {
        for sides in 3..9 {
            for rotate in [0.0, 10.0, 45.0, 90.0] {
                let mut outline = canvas(48);
                let mut filled = canvas(48);
                draw_polygon(&mut outline, sides, 24, 24, 15, rotate, 15);
                fill_polygon(&mut filled, sides, 24, 24, 15, rotate, 15);
                for (x, y) in lit(&outline) {
                    assert_ne!(
                        filled.get_pixel(x, y),
                        0,
                        "sides={sides} rotate={rotate} ({x},{y})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_polygon_spans_keep_vertex_rows() {
        let vertices = polygon_vertices(5, 24, 24, 12, 0.0);
        let spans = polygon_spans(&vertices);
        for (x, y) in &vertices {
            let (min, max) = spans[y];
            assert!(min <= *x && *x <= max);
        }
        let rows: Vec<i32> = spans.keys().copied().collect();
        let (first, last) = (rows[0], rows[rows.len() - 1]);
        assert_eq!(rows, (first..=last).collect::<Vec<_>>());
    }

    #[test]
    fn test_fill_spans_extends_one_past_max() {
        let mut fb = canvas(8);
        let mut spans = Spans::new();
        spans.insert(2, (1, 3));
        fill_spans(&mut fb, &spans, 9);
        assert_eq!(lit(&fb), vec![(1, 2), (2, 2), (3, 2), (4, 2)]);
    }

    #[test]
    fn test_draw_lines_connects_points() {
        let mut fb = canvas(10);
        draw_lines(&mut fb, &[(0, 0), (4, 0), (4, 3)], 15);
        assert_eq!(lit(&fb).len(), 8);
    }
}
