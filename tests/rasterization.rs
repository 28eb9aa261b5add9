use std::collections::HashSet;

use rstest::rstest;

use raster_lab::random::ShapeGenerator;
use raster_lab::{
    Ellipse, EllipseAlgorithm, FrameBuffer, Line, LineAlgorithm, PixelSink, Point, PointCollector,
    Rgba, draw_ellipse, draw_line, draw_segment,
};

fn ellipse_points(e: &Ellipse, algorithm: EllipseAlgorithm) -> Vec<Point> {
    let mut sink = PointCollector::new();
    draw_ellipse(&mut sink, e, algorithm);
    sink.points
}

#[rstest]
#[case((0, 0), (10, 5))]
#[case((10, 5), (0, 0))]
#[case((-4, 7), (6, -30))]
#[case((3, 3), (3, 3))]
#[case((0, 0), (0, 12))]
#[case((12, 0), (0, 0))]
#[case((-9, -9), (9, 9))]
#[case((100, 40), (37, 41))]
fn line_endpoints_are_drawn(
    #[case] a: (i32, i32),
    #[case] b: (i32, i32),
    #[values(LineAlgorithm::Bresenham, LineAlgorithm::RealSlope)] algorithm: LineAlgorithm,
) {
    let mut sink = PointCollector::new();
    draw_segment(&mut sink, a.into(), b.into(), Rgba::WHITE, algorithm);
    assert!(sink.points.contains(&Point::from(a)), "{algorithm}: missing {a:?}");
    assert!(sink.points.contains(&Point::from(b)), "{algorithm}: missing {b:?}");
}

#[rstest]
fn lines_emit_one_pixel_per_major_step(
    #[values(LineAlgorithm::Bresenham, LineAlgorithm::RealSlope)] algorithm: LineAlgorithm,
) {
    let mut generator = ShapeGenerator::new(300, 300, Some(5));
    for _ in 0..500 {
        let (a, b) = (generator.point(), generator.point());
        let mut sink = PointCollector::new();
        draw_segment(&mut sink, a, b, Rgba::WHITE, algorithm);
        let major = (b.x - a.x).abs().max((b.y - a.y).abs()) as usize;
        assert_eq!(sink.points.len(), major + 1, "{algorithm} {a:?} -> {b:?}");
        let unique: HashSet<Point> = sink.points.iter().copied().collect();
        assert_eq!(unique.len(), sink.points.len());
    }
}

#[test]
fn bresenham_scenario_ten_by_five() {
    let mut sink = PointCollector::new();
    let line = Line::new(Point::new(0, 0), Point::new(10, 5), Rgba::WHITE, 0);
    draw_line(&mut sink, &line, LineAlgorithm::Bresenham);
    assert_eq!(sink.points.len(), 11);
    assert!(sink.points.contains(&Point::new(0, 0)));
    assert!(sink.points.contains(&Point::new(10, 5)));
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(30, 5)]
#[case(30, 2)]
#[case(5, 30)]
#[case(64, 63)]
#[case(200, 1)]
#[case(1, 200)]
fn ellipses_are_symmetric_about_their_center(
    #[case] a: u32,
    #[case] b: u32,
    #[values(EllipseAlgorithm::Quadratic, EllipseAlgorithm::Additive)] algorithm: EllipseAlgorithm,
) {
    let c = Point::new(300, 200);
    let set: HashSet<Point> = ellipse_points(&Ellipse::new(c, a, b, Rgba::WHITE), algorithm)
        .into_iter()
        .collect();
    for p in &set {
        let mirrored_x = Point::new(2 * c.x - p.x, p.y);
        let mirrored_y = Point::new(p.x, 2 * c.y - p.y);
        assert!(set.contains(&mirrored_x), "a={a} b={b}: {p:?} has no x-mirror");
        assert!(set.contains(&mirrored_y), "a={a} b={b}: {p:?} has no y-mirror");
    }
}

#[test]
fn algorithms_agree_on_large_random_ellipses() {
    // semi-axes up to 10 000
    let mut generator = ShapeGenerator::new(20_000, 20_000, Some(2024));
    for _ in 0..200 {
        let e = generator.ellipse(Rgba::WHITE);
        assert_eq!(
            ellipse_points(&e, EllipseAlgorithm::Quadratic),
            ellipse_points(&e, EllipseAlgorithm::Additive),
            "{e:?}"
        );
    }
}

#[test]
fn algorithms_agree_at_the_largest_axes() {
    let axes = [
        (10_000, 10_000),
        (10_000, 1),
        (1, 10_000),
        (10_000, 0),
        (0, 10_000),
        (9_999, 7_321),
    ];
    for (a, b) in axes {
        let e = Ellipse::new(Point::new(5_000, 5_000), a, b, Rgba::WHITE);
        assert_eq!(
            ellipse_points(&e, EllipseAlgorithm::Quadratic),
            ellipse_points(&e, EllipseAlgorithm::Additive),
            "a={a} b={b}"
        );
    }
}

#[rstest]
fn flat_ellipse_scenario_on_a_small_canvas(
    #[values(EllipseAlgorithm::Quadratic, EllipseAlgorithm::Additive)] algorithm: EllipseAlgorithm,
) {
    let mut fb = FrameBuffer::new(100, 100);
    let e = Ellipse::new(Point::new(50, 50), 30, 5, Rgba::WHITE);
    draw_ellipse(&mut fb, &e, algorithm);
    assert_eq!(fb.get_pixel(20, 50), Some(Rgba::WHITE));
    assert_eq!(fb.get_pixel(80, 50), Some(Rgba::WHITE));
    assert_eq!(fb.get_pixel(19, 50), Some(Rgba::TRANSPARENT));
    assert_eq!(fb.get_pixel(81, 50), Some(Rgba::TRANSPARENT));

    // with b = 0 the whole row is the shape
    let mut fb = FrameBuffer::new(100, 100);
    let flat = Ellipse::new(Point::new(50, 50), 30, 0, Rgba::WHITE);
    let trace = draw_ellipse(&mut fb, &flat, algorithm);
    assert!(trace.flat_fill);
    assert_eq!(trace.region2_steps, 0);
    for x in 0..100 {
        let expected = if (20..=80).contains(&x) {
            Rgba::WHITE
        } else {
            Rgba::TRANSPARENT
        };
        assert_eq!(fb.get_pixel(x, 50), Some(expected), "x={x}");
    }
}

#[test]
fn shapes_far_outside_the_canvas_are_harmless() {
    let mut fb = FrameBuffer::new(16, 16);
    let far = Ellipse::new(Point::new(-5_000, 9_000), 40, 70, Rgba::WHITE);
    draw_ellipse(&mut fb, &far, EllipseAlgorithm::Additive);
    let (p, q) = (Point::new(-1_000_000, 5), Point::new(-999_000, 7));
    draw_segment(&mut fb, p, q, Rgba::WHITE, LineAlgorithm::RealSlope);
    fb.set_pixel(i32::MAX, i32::MIN, Rgba::WHITE);
    assert!(fb.pixels().iter().all(|&c| c == Rgba::TRANSPARENT));
}

#[test]
fn partially_visible_ellipse_is_clipped_per_pixel() {
    let mut fb = FrameBuffer::new(20, 20);
    let e = Ellipse::new(Point::new(0, 10), 8, 6, Rgba::WHITE);
    draw_ellipse(&mut fb, &e, EllipseAlgorithm::Quadratic);
    assert_eq!(fb.get_pixel(8, 10), Some(Rgba::WHITE));
    assert_eq!(fb.get_pixel(0, 4), Some(Rgba::WHITE));
    assert_eq!(fb.get_pixel(0, 16), Some(Rgba::WHITE));
}
