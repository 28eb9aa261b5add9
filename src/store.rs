// Committed shapes, replayed in insertion order every frame.

use crate::ellipse::{EllipseAlgorithm, draw_ellipse};
use crate::framebuffer::PixelSink;
use crate::line::{LineAlgorithm, draw_line};
use crate::types::{Ellipse, Line, Point, Rgba, Shape};

/// The algorithm pair a draw call uses. Built from the UI's single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Algorithms {
    pub line: LineAlgorithm,
    pub ellipse: EllipseAlgorithm,
}

impl Algorithms {
    /// `true` selects Bresenham + additive, `false` real-slope + quadratic.
    pub fn from_toggle(optimized: bool) -> Self {
        if optimized {
            Self {
                line: LineAlgorithm::Bresenham,
                ellipse: EllipseAlgorithm::Additive,
            }
        } else {
            Self {
                line: LineAlgorithm::RealSlope,
                ellipse: EllipseAlgorithm::Quadratic,
            }
        }
    }
}

impl Default for Algorithms {
    fn default() -> Self {
        Self::from_toggle(false)
    }
}

/// Draw one shape with the matching rasterizer.
pub fn draw_shape<S: PixelSink + ?Sized>(sink: &mut S, shape: &Shape, algorithms: Algorithms) {
    match shape {
        Shape::Line(line) => draw_line(sink, line, algorithms.line),
        Shape::Ellipse(ellipse) => {
            draw_ellipse(sink, ellipse, algorithms.ellipse);
        }
    }
}

/// Append-only list of shapes. Only `append`/`commit_*` and `clear` mutate it.
#[derive(Debug, Default, Clone)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    pub fn commit_line(&mut self, a: Point, b: Point, color: Rgba, thickness: u32) {
        self.append(Line::new(a, b, color, thickness));
    }

    pub fn commit_ellipse(&mut self, center: Point, a: u32, b: u32, color: Rgba) {
        self.append(Ellipse::new(center, a, b, color));
    }

    pub fn extend<I: IntoIterator<Item = Shape>>(&mut self, shapes: I) {
        self.shapes.extend(shapes);
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Replay every shape in insertion order; later shapes win shared pixels.
    pub fn render_all<S: PixelSink + ?Sized>(&self, sink: &mut S, algorithms: Algorithms) {
        for shape in &self.shapes {
            draw_shape(sink, shape, algorithms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;

    #[test]
    fn empty_store_leaves_a_cleared_buffer_transparent() {
        let mut fb = FrameBuffer::new(32, 32);
        fb.clear(Rgba::TRANSPARENT);
        ShapeStore::new().render_all(&mut fb, Algorithms::default());
        assert!(fb.pixels().iter().all(|&c| c == Rgba::TRANSPARENT));
    }

    #[test]
    fn later_shapes_draw_over_earlier_ones() {
        let red = Rgba::opaque(255, 0, 0);
        let blue = Rgba::opaque(0, 0, 255);
        let mut store = ShapeStore::new();
        store.commit_line(Point::new(0, 5), Point::new(9, 5), red, 0);
        store.commit_line(Point::new(5, 0), Point::new(5, 9), blue, 0);

        let mut fb = FrameBuffer::new(10, 10);
        store.render_all(&mut fb, Algorithms::from_toggle(true));
        assert_eq!(fb.get_pixel(5, 5), Some(blue));
        assert_eq!(fb.get_pixel(0, 5), Some(red));
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = ShapeStore::new();
        store.commit_ellipse(Point::new(5, 5), 3, 2, Rgba::WHITE);
        store.commit_line(Point::new(0, 0), Point::new(1, 1), Rgba::WHITE, 2);
        assert_eq!(store.len(), 2);
        assert!(matches!(store.shapes()[0], Shape::Ellipse(_)));
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_picks_both_algorithms() {
        let on = Algorithms::from_toggle(true);
        assert_eq!(on.line, LineAlgorithm::Bresenham);
        assert_eq!(on.ellipse, EllipseAlgorithm::Additive);
        let off = Algorithms::from_toggle(false);
        assert_eq!(off.line, LineAlgorithm::RealSlope);
        assert_eq!(off.ellipse, EllipseAlgorithm::Quadratic);
    }
}
