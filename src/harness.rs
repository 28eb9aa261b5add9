// Out-of-band checks for the two ellipse algorithms.
//
// The comparison run draws the same random ellipse with both algorithms into
// point collectors and diffs the results. The benchmark run times both
// algorithms over one shared random batch per size and emits
// `num_shapes,time_seconds,algorithm` rows.

use std::collections::HashSet;
use std::fs::{self, File};
use std::hint::black_box;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::ellipse::{EllipseAlgorithm, draw_ellipse};
use crate::error::Error;
use crate::framebuffer::{PixelCounter, PointCollector};
use crate::random::ShapeGenerator;
use crate::types::{Ellipse, MAX_AXIS, Point, Rgba};

pub const CSV_HEADER: &str = "num_shapes,time_seconds,algorithm";

/// Widest/tallest canvas the harness accepts. Random ellipses on it have
/// semi-axes of at most half its extent, so they never exceed `MAX_AXIS`.
pub const MAX_CANVAS: usize = 2 * MAX_AXIS as usize;

/// Set equality: duplicates inside either list are ignored.
pub fn same_pixel_set(a: &[Point], b: &[Point]) -> bool {
    let a: HashSet<Point> = a.iter().copied().collect();
    let b: HashSet<Point> = b.iter().copied().collect();
    a == b
}

/// Multiset equality: every pixel must be emitted the same number of times.
pub fn same_pixel_multiset(a: &[Point], b: &[Point]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Both algorithms' raw output for one ellipse.
#[derive(Debug, Clone)]
pub struct EllipseComparison {
    pub ellipse: Ellipse,
    pub vanilla: Vec<Point>,
    pub optimized: Vec<Point>,
}

impl EllipseComparison {
    pub fn run(ellipse: Ellipse) -> Self {
        let mut vanilla = PointCollector::new();
        let mut optimized = PointCollector::new();
        draw_ellipse(&mut vanilla, &ellipse, EllipseAlgorithm::Quadratic);
        draw_ellipse(&mut optimized, &ellipse, EllipseAlgorithm::Additive);
        Self {
            ellipse,
            vanilla: vanilla.points,
            optimized: optimized.points,
        }
    }

    /// The verdict the comparison run uses (set semantics).
    pub fn matches(&self) -> bool {
        same_pixel_set(&self.vanilla, &self.optimized)
    }

    pub fn matches_with_multiplicity(&self) -> bool {
        same_pixel_multiset(&self.vanilla, &self.optimized)
    }

    /// Write `draw_ellipse_1.txt` (vanilla) and `draw_ellipse_2.txt` (optimized)
    /// into `dir`, one "x y" pair per line.
    pub fn dump(&self, dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        write_points(&dir.join("draw_ellipse_1.txt"), &self.vanilla)?;
        write_points(&dir.join("draw_ellipse_2.txt"), &self.optimized)
    }
}

fn write_points(path: &Path, points: &[Point]) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(file);
    for p in points {
        writeln!(out, "{} {}", p.x, p.y).map_err(|e| Error::io(path, e))?;
    }
    out.flush().map_err(|e| Error::io(path, e))
}

#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    pub width: usize,
    pub height: usize,
    pub trials: usize,
    pub seed: Option<u64>,
    /// Root for per-trial dumps; trials land in `<root>/<h>x<w>/test_<i>/`.
    pub dump_dir: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ComparisonReport {
    pub trials: usize,
    /// Ellipses whose pixel sets differ.
    pub mismatches: Vec<Ellipse>,
    /// Trials whose sets agree but whose emission counts differ.
    pub multiplicity_mismatches: usize,
    /// Dump failures; they do not stop the run.
    pub dump_errors: Vec<Error>,
}

impl ComparisonReport {
    pub fn success(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compare both algorithms over `config.trials` random ellipses.
pub fn run_comparison(config: &ComparisonConfig) -> Result<ComparisonReport, Error> {
    check_canvas(config.width, config.height)?;
    tracing::info!(
        width = config.width,
        height = config.height,
        trials = config.trials,
        "running comparison"
    );

    let mut generator = ShapeGenerator::new(config.width, config.height, config.seed);
    let dump_root = config
        .dump_dir
        .as_ref()
        .map(|d| d.join(format!("{}x{}", config.height, config.width)));

    let mut report = ComparisonReport {
        trials: config.trials,
        ..Default::default()
    };

    for i in 0..config.trials {
        let ellipse = generator.ellipse(Rgba::WHITE);
        let cmp = EllipseComparison::run(ellipse);

        if let Some(root) = &dump_root {
            if let Err(err) = cmp.dump(&root.join(format!("test_{i}"))) {
                tracing::warn!("trial {i}: {err}");
                report.dump_errors.push(err);
            }
        }

        if !cmp.matches() {
            tracing::warn!(?ellipse, "pixel sets differ");
            report.mismatches.push(ellipse);
        } else if !cmp.matches_with_multiplicity() {
            tracing::debug!(?ellipse, "same pixels, different emission counts");
            report.multiplicity_mismatches += 1;
        }
    }

    Ok(report)
}

#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub width: usize,
    pub height: usize,
    /// Batch sizes run `step, 2*step, ...` up to and including `max`.
    pub step: usize,
    pub max: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    pub num_shapes: usize,
    pub time_seconds: f64,
    pub algorithm: EllipseAlgorithm,
}

/// Time both algorithms over growing batches, writing CSV rows to `out` as they
/// are measured. Each batch is generated once and reused for both algorithms;
/// every timed pass is preceded by an untimed warm-up over the same batch.
pub fn run_benchmark<W: Write>(
    config: &BenchmarkConfig,
    mut out: W,
) -> Result<Vec<BenchmarkRow>, Error> {
    check_canvas(config.width, config.height)?;
    if config.step == 0 {
        return Err(Error::InvalidArgument("benchmark step must be > 0".into()));
    }
    tracing::info!(
        width = config.width,
        height = config.height,
        step = config.step,
        max = config.max,
        "running benchmark"
    );

    let csv_err = |e| Error::io("<benchmark csv>", e);
    writeln!(out, "{CSV_HEADER}").map_err(csv_err)?;

    let mut generator = ShapeGenerator::new(config.width, config.height, config.seed);
    let mut rows = Vec::new();

    for num_shapes in (config.step..=config.max).step_by(config.step) {
        let batch = generator.ellipses(num_shapes, Rgba::WHITE);

        for algorithm in [EllipseAlgorithm::Additive, EllipseAlgorithm::Quadratic] {
            draw_batch(&batch, algorithm);
            let start = Instant::now();
            draw_batch(&batch, algorithm);
            let time_seconds = start.elapsed().as_secs_f64();

            let row = BenchmarkRow { num_shapes, time_seconds, algorithm };
            writeln!(out, "{},{},{}", row.num_shapes, row.time_seconds, row.algorithm.label())
                .map_err(csv_err)?;
            rows.push(row);
        }

        if (num_shapes / config.step) % 100 == 0 {
            tracing::info!("benchmarked {num_shapes} ellipses");
        }
    }

    out.flush().map_err(csv_err)?;
    Ok(rows)
}

/// `run_benchmark` into a CSV file, creating parent directories.
pub fn write_benchmark_csv(
    config: &BenchmarkConfig,
    path: &Path,
) -> Result<Vec<BenchmarkRow>, Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let rows = run_benchmark(config, BufWriter::new(file)).map_err(|err| match err {
        Error::Io { source, .. } => Error::io(path, source),
        other => other,
    })?;
    tracing::info!("benchmark finished, results saved to {}", path.display());
    Ok(rows)
}

fn draw_batch(batch: &[Ellipse], algorithm: EllipseAlgorithm) -> u64 {
    let mut sink = PixelCounter::default();
    for e in batch {
        draw_ellipse(&mut sink, black_box(e), algorithm);
    }
    black_box(sink.count)
}

fn check_canvas(width: usize, height: usize) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidArgument(format!(
            "canvas must be non-empty, got {width}x{height}"
        )));
    }
    if width > MAX_CANVAS || height > MAX_CANVAS {
        return Err(Error::InvalidArgument(format!(
            "canvas {width}x{height} exceeds {MAX_CANVAS}x{MAX_CANVAS}"
        )));
    }
    Ok(())
}
