//! Interactive line/ellipse rasterization exercises.
//!
//! The rasterizers (`line`, `ellipse`) draw through the `PixelSink` trait and
//! nothing else, so the same code feeds the window framebuffer, the shape
//! store replay and the equivalence/benchmark harness.

pub mod app;
pub mod config;
pub mod draw;
pub mod ellipse;
pub mod error;
pub mod framebuffer;
pub mod harness;
pub mod line;
pub mod logging;
pub mod random;
pub mod store;
pub mod types;

pub use ellipse::{EllipseAlgorithm, EllipseTrace, draw_ellipse};
pub use error::Error;
pub use framebuffer::{FrameBuffer, PixelCounter, PixelSink, PointCollector};
pub use line::{LineAlgorithm, draw_line, draw_segment};
pub use store::{Algorithms, ShapeStore, draw_shape};
pub use types::{Ellipse, Line, MAX_AXIS, Point, Rgba, Shape};
