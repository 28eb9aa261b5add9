// Midpoint ellipse rasterization in two flavours that must agree pixel for pixel:
// the textbook quadratic decision variable, and an additive version that keeps
// running sums so the inner loops only add and subtract.
//
// Both trace the first quadrant from (0, b) clockwise and mirror each point into
// the other three. Region 1 steps x while the boundary is flatter than 45 degrees,
// region 2 steps y down to 0.
//
// All terms are i64. Semi-axes are clamped to `MAX_AXIS` first, which keeps
// every product in range.

use std::fmt;

use crate::framebuffer::PixelSink;
use crate::types::{Ellipse, MAX_AXIS, Point, Rgba};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EllipseAlgorithm {
    /// Decision terms recomputed with multiplications every step.
    #[default]
    Quadratic,
    /// Decision terms carried as running sums; add/subtract only.
    Additive,
}

impl EllipseAlgorithm {
    pub const ALL: [EllipseAlgorithm; 2] =
        [EllipseAlgorithm::Quadratic, EllipseAlgorithm::Additive];

    /// Name used in benchmark CSVs.
    pub fn label(self) -> &'static str {
        match self {
            EllipseAlgorithm::Quadratic => "vanilla",
            EllipseAlgorithm::Additive => "optimized",
        }
    }
}

impl fmt::Display for EllipseAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the tracer did, for tests and the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EllipseTrace {
    /// Region 1 ran out with y <= 0 and the center row was filled.
    pub flat_fill: bool,
    /// Iterations of the region 2 loop.
    pub region2_steps: u64,
}

/// Draw the outline of `ellipse`. Semi-axes above `MAX_AXIS` are clamped.
pub fn draw_ellipse<S: PixelSink + ?Sized>(
    sink: &mut S,
    ellipse: &Ellipse,
    algorithm: EllipseAlgorithm,
) -> EllipseTrace {
    match algorithm {
        EllipseAlgorithm::Quadratic => quadratic(sink, ellipse),
        EllipseAlgorithm::Additive => additive(sink, ellipse),
    }
}

fn quadratic<S: PixelSink + ?Sized>(sink: &mut S, e: &Ellipse) -> EllipseTrace {
    let (a, b) = axes(e);
    let (c, color) = (e.center, e.color);
    let mut trace = EllipseTrace::default();

    let mut x: i64 = 0;
    let mut y: i64 = b;
    let mut d: i64 = 4 * b * b - 4 * a * a * b + a * a;

    plot_symmetric(sink, c, x, y, color);
    while b * b * 2 * (x + 1) < a * a * (2 * y - 1) {
        if d < 0 {
            d += 4 * (b * b * (2 * x + 3));
        } else {
            d += 4 * b * b * (2 * x + 3) + 4 * a * a * (-2 * y + 2);
            y -= 1;
        }
        x += 1;
        plot_symmetric(sink, c, x, y, color);
    }

    if y <= 0 {
        fill_flat_row(sink, c, a, x, color);
        trace.flat_fill = true;
    }

    d = b * b * (4 * x * x + 4 * x + 1) + a * a * (4 * y * y - 8 * y + 4) - 4 * a * a * b * b;
    while y > 0 {
        if d < 0 {
            d += 4 * (b * b * (2 * x + 2) + a * a * (-2 * y + 3));
            x += 1;
        } else {
            d += 4 * a * a * (-2 * y + 3);
        }
        y -= 1;
        trace.region2_steps += 1;
        plot_symmetric(sink, c, x, y, color);
    }

    trace
}

fn additive<S: PixelSink + ?Sized>(sink: &mut S, e: &Ellipse) -> EllipseTrace {
    let (a, b) = axes(e);
    let (c, color) = (e.center, e.color);
    let mut trace = EllipseTrace::default();

    // per-call constants; nothing below multiplies inside a loop
    let a2 = a * a;
    let b2 = b * b;
    let step_mx = 8 * b2;
    let step_my = 8 * a2;
    let diag1 = 4 * b2 + 4 * a2;

    let mut x: i64 = 0;
    let mut y: i64 = b;
    let mut d = 4 * b2 - 4 * a2 * b + a2;
    // m_x = 4b²(2x+3), m_y = 4a²(2y-1) + 4b²
    let mut m_x = 12 * b2;
    let mut m_y = 8 * a2 * y - 4 * a2 + 4 * b2;

    plot_symmetric(sink, c, x, y, color);
    while m_x < m_y {
        if d < 0 {
            d += m_x;
        } else {
            d += m_x - m_y + diag1;
            y -= 1;
            m_y -= step_my;
        }
        x += 1;
        m_x += step_mx;
        plot_symmetric(sink, c, x, y, color);
    }

    if y <= 0 {
        fill_flat_row(sink, c, a, x, color);
        trace.flat_fill = true;
    }

    // rebase the sums onto region 2: m_x = 4b²(2x+2) - 8a², m_y = 4a²(2y-3)
    let rebase = 8 * a2 + 4 * b2;
    let diag2 = 8 * a2;
    d = b2 * (4 * x * x + 4 * x + 1) + a2 * (4 * y * y - 8 * y + 4) - 4 * a2 * b2;
    m_x -= rebase;
    m_y -= rebase;

    while y > 0 {
        if d < 0 {
            d += m_x - m_y + diag2;
            x += 1;
            m_x += step_mx;
        } else {
            d -= m_y;
        }
        y -= 1;
        m_y -= step_my;
        trace.region2_steps += 1;
        plot_symmetric(sink, c, x, y, color);
    }

    trace
}

#[inline]
fn axes(e: &Ellipse) -> (i64, i64) {
    (e.a.min(MAX_AXIS) as i64, e.b.min(MAX_AXIS) as i64)
}

/// Mirror a first-quadrant offset `(x, y)` into all four quadrants around `c`.
#[inline]
fn plot_symmetric<S: PixelSink + ?Sized>(sink: &mut S, c: Point, x: i64, y: i64, color: Rgba) {
    let (cx, cy) = (c.x as i64, c.y as i64);
    sink.set_pixel(coord(cx + x), coord(cy + y), color);
    sink.set_pixel(coord(cx - x), coord(cy + y), color);
    sink.set_pixel(coord(cx + x), coord(cy - y), color);
    sink.set_pixel(coord(cx - x), coord(cy - y), color);
}

/// Very flat ellipses reach y = 0 before the slope crosses 1, so region 2 never
/// runs and the center row is left with a gap between the last traced x and the
/// tips at ±a. Fill `[cx-a, cx-x)` and `(cx+x, cx+a]`.
fn fill_flat_row<S: PixelSink + ?Sized>(sink: &mut S, c: Point, a: i64, x_drawn: i64, color: Rgba) {
    let (cx, cy) = (c.x as i64, c.y);
    for px in (cx - a)..(cx - x_drawn) {
        sink.set_pixel(coord(px), cy, color);
    }
    for px in (cx + x_drawn + 1)..=(cx + a) {
        sink.set_pixel(coord(px), cy, color);
    }
}

#[inline]
fn coord(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::framebuffer::PointCollector;

    fn trace(e: &Ellipse, algorithm: EllipseAlgorithm) -> (Vec<Point>, EllipseTrace) {
        let mut sink = PointCollector::new();
        let t = draw_ellipse(&mut sink, e, algorithm);
        (sink.points, t)
    }

    fn ellipse(cx: i32, cy: i32, a: u32, b: u32) -> Ellipse {
        Ellipse::new(Point::new(cx, cy), a, b, Rgba::WHITE)
    }

    #[test]
    fn algorithms_emit_the_same_sequence() {
        for a in 0..40 {
            for b in 0..40 {
                let e = ellipse(0, 0, a, b);
                let (q, tq) = trace(&e, EllipseAlgorithm::Quadratic);
                let (p, tp) = trace(&e, EllipseAlgorithm::Additive);
                assert_eq!(q, p, "a={a} b={b}");
                assert_eq!(tq, tp, "a={a} b={b}");
            }
        }
    }

    #[test]
    fn flat_ellipse_gets_its_center_row_filled() {
        for algorithm in EllipseAlgorithm::ALL {
            let (pts, t) = trace(&ellipse(50, 50, 30, 3), algorithm);
            assert!(t.flat_fill);
            assert_eq!(t.region2_steps, 0);
            let row: BTreeSet<i32> = pts.iter().filter(|p| p.y == 50).map(|p| p.x).collect();
            assert_eq!(row.first(), Some(&20));
            assert_eq!(row.last(), Some(&80));
        }
    }

    #[test]
    fn round_enough_ellipse_skips_the_fill() {
        let (_, t) = trace(&ellipse(50, 50, 30, 5), EllipseAlgorithm::Additive);
        assert!(!t.flat_fill);
        assert_eq!(t.region2_steps, 1);

        let (_, t) = trace(&ellipse(0, 0, 20, 20), EllipseAlgorithm::Quadratic);
        assert!(!t.flat_fill);
        assert!(t.region2_steps > 0);
    }

    #[test]
    fn zero_height_is_a_horizontal_segment() {
        let (pts, t) = trace(&ellipse(10, 7, 5, 0), EllipseAlgorithm::Quadratic);
        assert!(t.flat_fill);
        let set: BTreeSet<Point> = pts.into_iter().collect();
        let expected: BTreeSet<Point> = (5..=15).map(|x| Point::new(x, 7)).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn zero_width_is_a_vertical_segment() {
        let (pts, t) = trace(&ellipse(10, 7, 0, 4), EllipseAlgorithm::Additive);
        assert!(!t.flat_fill);
        let set: BTreeSet<Point> = pts.into_iter().collect();
        let expected: BTreeSet<Point> = (3..=11).map(|y| Point::new(10, y)).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn zero_axes_is_the_center() {
        let (pts, _) = trace(&ellipse(3, 4, 0, 0), EllipseAlgorithm::Quadratic);
        assert!(pts.iter().all(|&p| p == Point::new(3, 4)));
        assert!(!pts.is_empty());
    }

    #[test]
    fn largest_axes_trace_identically() {
        for (a, b) in [(MAX_AXIS, MAX_AXIS), (MAX_AXIS, 1), (1, MAX_AXIS), (MAX_AXIS, 0)] {
            let e = ellipse(0, 0, a, b);
            assert_eq!(
                trace(&e, EllipseAlgorithm::Quadratic),
                trace(&e, EllipseAlgorithm::Additive),
                "a={a} b={b}"
            );
        }
    }

    #[test]
    fn oversized_axes_draw_as_the_largest_ellipse() {
        for algorithm in EllipseAlgorithm::ALL {
            let huge = trace(&ellipse(0, 0, 50_000, 50_000), algorithm);
            let clamped = trace(&ellipse(0, 0, MAX_AXIS, MAX_AXIS), algorithm);
            assert_eq!(huge, clamped);

            let (pts, _) = trace(&ellipse(0, 0, u32::MAX, 3), algorithm);
            assert!(pts.contains(&Point::new(MAX_AXIS as i32, 0)));
        }
    }

    #[test]
    fn outline_touches_all_four_extremes() {
        let (pts, _) = trace(&ellipse(0, 0, 17, 9), EllipseAlgorithm::Additive);
        for p in [(17, 0), (-17, 0), (0, 9), (0, -9)] {
            assert!(pts.contains(&p.into()), "missing {p:?}");
        }
    }
}
