//! Drawing decoded frames onto an image the way a galvo scanner would trace
//! them: the beam always sits somewhere, blanked points move it without
//! light, lit points leave a trail back to where it was.

use common::{Point, PointColor, Rgb, COORD_MAX, COORD_MIN};
use image::{GenericImage, GenericImageView, Rgba};

/// Width of the logical coordinate domain on both axes
const SPAN: i64 = 1 << 16;

/// Area of the destination surface a frame is scaled into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin covering a `width` x `height` surface
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// Map a laser point onto a pixel of `rect`.
///
/// ILDA X runs from -32768 on the left to 32767 on the right and Y from
/// -32768 at the bottom to 32767 at the top, while pixel rows grow downwards.
/// `rect` must not be empty.
pub fn normalize(point: &Point, rect: Rect) -> (i32, i32) {
    debug_assert!(
        rect.width > 0 && rect.height > 0,
        "cannot normalize into an empty rectangle"
    );

    let x = (point.x as i64 - COORD_MIN as i64) * rect.width as i64 / SPAN;
    let y = (COORD_MAX as i64 - point.y as i64) * rect.height as i64 / SPAN;

    (rect.x + x as i32, rect.y + y as i32)
}

/// Composite `background` over `rect` of `dst`, then trace `points` on top
/// starting with the pen on the first point.
pub fn draw_frame<'a, I, B>(
    points: &[Point],
    dst: &'a mut I,
    rect: Rect,
    background: &B,
    offset: (u32, u32),
) -> &'a mut I
where
    I: GenericImage<Pixel = Rgba<u8>>,
    B: GenericImageView<Pixel = Rgba<u8>>,
{
    Plotter::new().draw_frame(points, dst, rect, background, offset)
}

/// Overwrite `rect` of `dst` with `background`, reading the background from
/// `offset` onwards. Pixels missing on either side are left alone.
pub fn fill_background<I, B>(dst: &mut I, rect: Rect, background: &B, offset: (u32, u32))
where
    I: GenericImage<Pixel = Rgba<u8>>,
    B: GenericImageView<Pixel = Rgba<u8>>,
{
    let (bg_width, bg_height) = background.dimensions();

    for row in 0..rect.height {
        for col in 0..rect.width {
            let (src_x, src_y) = (offset.0 + col, offset.1 + row);
            if src_x >= bg_width || src_y >= bg_height {
                continue;
            }

            let x = rect.x as i64 + col as i64;
            let y = rect.y as i64 + row as i64;
            if let Some((x, y)) = inside(&*dst, x, y) {
                dst.put_pixel(x, y, background.get_pixel(src_x, src_y));
            }
        }
    }
}

fn inside<I: GenericImageView>(dst: &I, x: i64, y: i64) -> Option<(u32, u32)> {
    let (width, height) = dst.dimensions();
    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
        return None;
    }
    Some((x as u32, y as u32))
}

pub fn to_rgba(rgb: Rgb) -> Rgba<u8> {
    Rgba([rgb.r, rgb.g, rgb.b, 0xFF])
}

/// The beam position carried from one point, and one frame, to the next.
///
/// Frames drawn through the same plotter continue from wherever the previous
/// one left the pen, so they have to be drawn in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Plotter {
    pen: Option<(i32, i32)>,
}

impl Plotter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixel the beam currently sits on, `None` before the first point
    pub fn pen(&self) -> Option<(i32, i32)> {
        self.pen
    }

    pub fn move_to(&mut self, to: (i32, i32)) {
        self.pen = Some(to);
    }

    pub fn draw_frame<'a, I, B>(
        &mut self,
        points: &[Point],
        dst: &'a mut I,
        rect: Rect,
        background: &B,
        offset: (u32, u32),
    ) -> &'a mut I
    where
        I: GenericImage<Pixel = Rgba<u8>>,
        B: GenericImageView<Pixel = Rgba<u8>>,
    {
        fill_background(dst, rect, background, offset);
        self.draw_points(points, dst, rect);
        dst
    }

    /// Trace `points` without touching the background
    pub fn draw_points<I>(&mut self, points: &[Point], dst: &mut I, rect: Rect)
    where
        I: GenericImage<Pixel = Rgba<u8>>,
    {
        for point in points {
            let to = normalize(point, rect);
            match self.pen {
                None => self.move_to(to),
                Some(_) => self.line_to(dst, to, point.color),
            }
        }
    }

    /// Move the pen to `to` in pixel space, lighting every pixel on the way,
    /// the starting one included, unless `color` is invisible.
    pub fn line_to<I>(&mut self, dst: &mut I, to: (i32, i32), color: PointColor)
    where
        I: GenericImage<Pixel = Rgba<u8>>,
    {
        let (mut x, mut y) = self.pen.unwrap_or(to);
        let pixel = color.rgb().map(to_rgba);

        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if let Some(pixel) = pixel {
                if let Some((px, py)) = inside(&*dst, x as i64, y as i64) {
                    dst.put_pixel(px, py, pixel);
                }
            }
            if (x, y) == to {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }

        self.pen = Some(to);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use image::RgbaImage;

    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 0xFF]);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    fn point(x: i32, y: i32, color: PointColor) -> Point {
        Point { x, y, z: 0, color }
    }

    fn lit(img: &RgbaImage) -> HashSet<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, pixel)| **pixel != BLACK)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_normalize_corners() {
        let rect = Rect::from_size(640, 640);
        let invisible = PointColor::Invisible;

        assert_eq!((0, 639), normalize(&point(-32768, -32768, invisible), rect));
        assert_eq!((639, 0), normalize(&point(32767, 32767, invisible), rect));
        assert_eq!((320, 319), normalize(&point(0, 0, invisible), rect));
    }

    #[test]
    fn test_normalize_offset_rect() {
        let rect = Rect::new(10, 20, 100, 50);
        assert_eq!(
            (10, 69),
            normalize(&point(-32768, -32768, PointColor::Invisible), rect)
        );
        assert_eq!(
            (109, 20),
            normalize(&point(32767, 32767, PointColor::Invisible), rect)
        );
    }

    #[test]
    fn test_line_golden_pixels() {
        let mut img = RgbaImage::from_pixel(8, 8, BLACK);
        let mut plotter = Plotter::new();
        plotter.move_to((0, 0));
        plotter.line_to(&mut img, (3, 4), PointColor::Rgb(WHITE));

        let expected: HashSet<(u32, u32)> = [(0, 0), (1, 1), (2, 2), (2, 3), (3, 4)]
            .into_iter()
            .collect();
        assert_eq!(expected, lit(&img));
        assert_eq!(Some((3, 4)), plotter.pen());
    }

    #[test]
    fn test_line_is_symmetric() {
        let mut forward = RgbaImage::from_pixel(8, 8, BLACK);
        let mut plotter = Plotter::new();
        plotter.move_to((1, 6));
        plotter.line_to(&mut forward, (6, 1), PointColor::Rgb(WHITE));

        let mut backward = RgbaImage::from_pixel(8, 8, BLACK);
        let mut plotter = Plotter::new();
        plotter.move_to((6, 1));
        plotter.line_to(&mut backward, (1, 6), PointColor::Rgb(WHITE));

        assert_eq!(6, lit(&forward).len());
        assert_eq!(lit(&forward), lit(&backward));
    }

    #[test]
    fn test_invisible_line_moves_pen_only() {
        let mut img = RgbaImage::from_pixel(8, 8, BLACK);
        let mut plotter = Plotter::new();
        plotter.move_to((0, 0));
        plotter.line_to(&mut img, (7, 7), PointColor::Invisible);

        assert!(lit(&img).is_empty());
        assert_eq!(Some((7, 7)), plotter.pen());
    }

    #[test]
    fn test_line_clips_outside_surface() {
        let mut img = RgbaImage::from_pixel(4, 4, BLACK);
        let mut plotter = Plotter::new();
        plotter.move_to((-2, 0));
        plotter.line_to(&mut img, (5, 0), PointColor::Rgb(WHITE));

        let expected: HashSet<(u32, u32)> = (0..4).map(|x| (x, 0)).collect();
        assert_eq!(expected, lit(&img));
    }

    #[test]
    fn test_blanked_point_starts_next_segment() {
        // 64 x 64 keeps the mapping simple: every 1024 units is one pixel
        let rect = Rect::from_size(64, 64);
        let red = PointColor::Rgb(Rgb::new(255, 0, 0));
        let a = point(-32768, 32767, red); // (0, 0)
        let b = point(-32768 + 10 * 1024, 32767, PointColor::Invisible); // (10, 0)
        let c = point(-32768 + 10 * 1024, 32767 - 5 * 1024, red); // (10, 5)

        let mut img = RgbaImage::from_pixel(64, 64, BLACK);
        let background = RgbaImage::from_pixel(64, 64, BLACK);
        draw_frame(&[a, b, c], &mut img, rect, &background, (0, 0));

        let expected: HashSet<(u32, u32)> = (0..=5).map(|y| (10, y)).collect();
        assert_eq!(expected, lit(&img));
        assert_eq!(Rgba([255, 0, 0, 255]), *img.get_pixel(10, 3));
    }

    #[test]
    fn test_first_point_only_positions_pen() {
        let rect = Rect::from_size(64, 64);
        let mut img = RgbaImage::from_pixel(64, 64, BLACK);
        let background = RgbaImage::from_pixel(64, 64, BLACK);

        draw_frame(
            &[point(0, 0, PointColor::Rgb(WHITE))],
            &mut img,
            rect,
            &background,
            (0, 0),
        );
        assert!(lit(&img).is_empty());
    }

    #[test]
    fn test_plotter_continues_across_frames() {
        let rect = Rect::from_size(64, 64);
        let white = PointColor::Rgb(WHITE);
        let mut img = RgbaImage::from_pixel(64, 64, BLACK);
        let mut plotter = Plotter::new();

        plotter.draw_points(&[point(-32768, 32767, white)], &mut img, rect);
        assert_eq!(Some((0, 0)), plotter.pen());

        // The next frame's first point connects back to the previous pen
        plotter.draw_points(&[point(-32768 + 3 * 1024, 32767, white)], &mut img, rect);
        let expected: HashSet<(u32, u32)> = (0..=3).map(|x| (x, 0)).collect();
        assert_eq!(expected, lit(&img));
    }

    #[test]
    fn test_background_is_copied_with_offset() {
        let mut background = RgbaImage::from_pixel(8, 8, BLACK);
        background.put_pixel(3, 3, Rgba([1, 2, 3, 255]));

        let mut img = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        fill_background(&mut img, Rect::new(1, 1, 2, 2), &background, (2, 2));

        // Untouched outside the rectangle
        assert_eq!(Rgba([9, 9, 9, 255]), *img.get_pixel(0, 0));
        assert_eq!(Rgba([9, 9, 9, 255]), *img.get_pixel(3, 3));
        assert_eq!(BLACK, *img.get_pixel(1, 1));
        assert_eq!(Rgba([1, 2, 3, 255]), *img.get_pixel(2, 2));
    }
}
