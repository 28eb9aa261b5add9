// The pixel grid every frame is composed into, and the write capability the
// rasterizers draw through. Rasterizers only ever see `PixelSink`, so the harness
// can swap the framebuffer for a point collector without touching them.

use std::path::Path;

use crate::error::Error;
use crate::types::{Point, Rgba};

/// Where rasterizers put their pixels.
/// Out-of-range coordinates must be accepted; what happens to them is up to the sink.
pub trait PixelSink {
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba);
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        (**self).set_pixel(x, y, color);
    }
}

/// Fixed-size, row-major grid of RGBA cells.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    /// New buffer, every cell transparent black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Overwrite every cell with `color`.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Pack into 0x00RRGGBB words for the window, reusing `out`'s allocation.
    pub fn write_0rgb(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.pixels.iter().map(|c| c.to_0rgb()));
    }

    /// Save the current contents as a PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), Error> {
        let img = image::RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = self.pixels[y as usize * self.width + x as usize];
            image::Rgba([c.r, c.g, c.b, c.a])
        });
        img.save(path).map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl PixelSink for FrameBuffer {
    /// Writes iff `0 <= x < width` and `0 <= y < height`; anything else is a no-op.
    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }
}

/// Records every write, in order, duplicates included. Color is ignored.
#[derive(Clone, Debug, Default)]
pub struct PointCollector {
    pub points: Vec<Point>,
}

impl PointCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PixelSink for PointCollector {
    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, _color: Rgba) {
        self.points.push(Point::new(x, y));
    }
}

/// Counts writes and drops them. Used for timing so the sink itself costs next to nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct PixelCounter {
    pub count: u64,
}

impl PixelSink for PixelCounter {
    #[inline]
    fn set_pixel(&mut self, _x: i32, _y: i32, _color: Rgba) {
        self.count += 1;
    }
}
