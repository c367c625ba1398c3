use crate::models::{Point, Rect};
use image::{Rgba, RgbaImage};

const EDGE_EPSILON: f32 = 1e-3;

/// Square RGBA drawing surface. Pixel `(x, y)` is sampled at the integer
/// point `(x, y)`, and shapes include their boundary.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Creates a canvas where every pixel is `(0, 0, 0, 0)`.
    pub fn new_transparent(size: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0])),
        }
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    #[cfg(test)]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Replaces every pixel inside the polygon with `color`.
    pub fn fill_polygon(&mut self, points: &[Point], color: Rgba<u8>) {
        self.paint_where(points, color, |p| contains(points, p));
    }

    /// Paints a band of `width` pixels along the inner side of the polygon edges.
    pub fn stroke_polygon_inside(&mut self, points: &[Point], color: Rgba<u8>, width: f32) {
        self.paint_where(points, color, |p| {
            contains(points, p) && distance_to_outline(points, p) < width
        });
    }

    /// Replaces every pixel of the inclusive rectangle with `color`.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        let last = self.size().saturating_sub(1);
        for y in rect.top..=rect.bottom.min(last) {
            for x in rect.left..=rect.right.min(last) {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    /// Moves the pixel toward `color` by `coverage / 255`, alpha included.
    /// Coordinates outside the canvas are ignored.
    pub fn blend_coverage(&mut self, x: i32, y: i32, color: Rgba<u8>, coverage: u8) {
        if coverage == 0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }
        let pixel = self.image.get_pixel_mut(x, y);
        let t = coverage as f32 / 255.0;
        for (dst, ink) in pixel.0.iter_mut().zip(color.0) {
            let mixed = *dst as f32 + (ink as f32 - *dst as f32) * t;
            *dst = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }

    fn paint_where(&mut self, points: &[Point], color: Rgba<u8>, inside: impl Fn(Point) -> bool) {
        let Some((x0, y0, x1, y1)) = self.bounds_of(points) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                if inside(Point::new(x as f32, y as f32)) {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Pixel bounding box of `points`, clipped to the canvas.
    fn bounds_of(&self, points: &[Point]) -> Option<(u32, u32, u32, u32)> {
        if points.len() < 3 {
            return None;
        }
        let last = self.size().checked_sub(1)? as f32;
        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if max_x < 0.0 || max_y < 0.0 || min_x > last || min_y > last {
            return None;
        }
        Some((
            min_x.max(0.0).floor() as u32,
            min_y.max(0.0).floor() as u32,
            max_x.min(last).ceil() as u32,
            max_y.min(last).ceil() as u32,
        ))
    }
}

fn edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

/// Even-odd containment test that also accepts points lying on an edge.
fn contains(points: &[Point], p: Point) -> bool {
    if distance_to_outline(points, p) <= EDGE_EPSILON {
        return true;
    }
    let mut inside = false;
    for (a, b) in edges(points) {
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < cross_x {
                inside = !inside;
            }
        }
    }
    inside
}

fn distance_to_outline(points: &[Point], p: Point) -> f32 {
    edges(points)
        .map(|(a, b)| distance_to_segment(a, b, p))
        .fold(f32::MAX, f32::min)
}

fn distance_to_segment(a: Point, b: Point, p: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}
