// Random shapes for the "random batch" key and the harness.
// Ellipses come from two uniform corner points on the canvas, the same way a
// drag would produce them, so sizes follow what users actually draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Ellipse, Point, Rgba};

pub struct ShapeGenerator {
    rng: StdRng,
    width: i32,
    height: i32,
}

impl ShapeGenerator {
    /// Seeded generators repeat the same sequence; `None` seeds from the OS.
    pub fn new(width: usize, height: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            width: width.min(i32::MAX as usize) as i32,
            height: height.min(i32::MAX as usize) as i32,
        }
    }

    /// Uniform point in `[0, width] x [0, height]` (inclusive, like the drag area).
    pub fn point(&mut self) -> Point {
        Point::new(
            self.rng.random_range(0..=self.width),
            self.rng.random_range(0..=self.height),
        )
    }

    /// Opaque color with uniform channels.
    pub fn color(&mut self) -> Rgba {
        Rgba::opaque(self.rng.random(), self.rng.random(), self.rng.random())
    }

    pub fn ellipse(&mut self, color: Rgba) -> Ellipse {
        let p0 = self.point();
        let p1 = self.point();
        Ellipse::from_corners(p0, p1, color)
    }

    pub fn ellipses(&mut self, count: usize, color: Rgba) -> Vec<Ellipse> {
        (0..count).map(|_| self.ellipse(color)).collect()
    }
}
