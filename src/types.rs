// Core value types shared by the rasterizers, the shape store and the harness.

use serde::Deserialize;

/// Integer pixel coordinate in canvas space (origin top-left, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// 8-bit RGBA color. Plain value, no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque_alpha")]
    pub a: u8,
}

fn opaque_alpha() -> u8 {
    255
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Pack as 0x00RRGGBB, the layout minifb expects. Alpha is dropped.
    #[inline]
    pub const fn to_0rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// A committed line segment. `thickness` counts extra offset copies per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub a: Point,
    pub b: Point,
    pub color: Rgba,
    pub thickness: u32,
}

impl Line {
    pub const fn new(a: Point, b: Point, color: Rgba, thickness: u32) -> Self {
        Self { a, b, color, thickness }
    }
}

/// Largest semi-axis the ellipse rasterizers trace. Larger axes are drawn
/// clamped to this value; up to it every decision term fits in i64
/// (the region 2 seed stays below `12·a²·b²`, under 2^60).
pub const MAX_AXIS: u32 = 16_384;

/// Axis-aligned ellipse: `a` is the horizontal semi-axis, `b` the vertical one.
/// Either may be 0; the shape then collapses to a segment or a single point.
/// Axes above [`MAX_AXIS`] are accepted and drawn as `MAX_AXIS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ellipse {
    pub center: Point,
    pub a: u32,
    pub b: u32,
    pub color: Rgba,
}

impl Ellipse {
    pub const fn new(center: Point, a: u32, b: u32, color: Rgba) -> Self {
        Self { center, a, b, color }
    }

    /// Ellipse inscribed in the box spanned by two drag corners.
    /// Center is the midpoint, semi-axes are half the extents (both rounded down).
    pub fn from_corners(p0: Point, p1: Point, color: Rgba) -> Self {
        let (x0, y0) = (p0.x as i64, p0.y as i64);
        let (x1, y1) = (p1.x as i64, p1.y as i64);
        let center = Point::new(((x0 + x1) >> 1) as i32, ((y0 + y1) >> 1) as i32);
        let a = ((x1 - x0).abs() >> 1) as u32;
        let b = ((y1 - y0).abs() >> 1) as u32;
        Self { center, a, b, color }
    }
}

/// Everything the shape store can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Line(Line),
    Ellipse(Ellipse),
}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Shape::Line(line)
    }
}

impl From<Ellipse> for Shape {
    fn from(ellipse: Ellipse) -> Self {
        Shape::Ellipse(ellipse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_corners_uses_midpoint_and_half_extents() {
        let e = Ellipse::from_corners(Point::new(80, 55), Point::new(20, 45), Rgba::WHITE);
        assert_eq!(e.center, Point::new(50, 50));
        assert_eq!(e.a, 30);
        assert_eq!(e.b, 5);
    }

    #[test]
    fn from_corners_rounds_odd_extents_down() {
        let e = Ellipse::from_corners(Point::new(0, 0), Point::new(7, 3), Rgba::WHITE);
        assert_eq!(e.center, Point::new(3, 1));
        assert_eq!((e.a, e.b), (3, 1));
    }

    #[test]
    fn packs_rgb_for_the_window() {
        assert_eq!(Rgba::opaque(0x12, 0x34, 0x56).to_0rgb(), 0x0012_3456);
        assert_eq!(Rgba::TRANSPARENT.to_0rgb(), 0);
    }
}
