// What you SEE in `draw` mode (the default):
// • Drag with the left mouse button: a line or ellipse follows the cursor and is
//   committed on release.
// • L / E pick the tool, A flips the algorithm pair, Up/Down change line thickness,
//   1-8 pick a color, R adds a batch of random ellipses, C clears, S saves a PNG.
// • ESC quits.
//
// `compare`, `bench` and `render` run headless.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use raster_lab::app::Session;
use raster_lab::config::Config;
use raster_lab::draw::{Drawer, draw_crosshair, draw_text_5x7};
use raster_lab::harness::{self, BenchmarkConfig, ComparisonConfig};
use raster_lab::random::ShapeGenerator;
use raster_lab::{Algorithms, Error, FrameBuffer, Rgba, ShapeStore, logging};

#[derive(Parser)]
#[command(name = "raster-lab", version, about = "Line and ellipse rasterization exercises")]
struct Cli {
    /// Debug logging (RUST_LOG is honoured)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./raster-lab.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the drawing window
    Draw,
    /// Check that both ellipse algorithms emit the same pixels
    Compare {
        /// Canvas width; with --height, replaces the configured canvas sizes
        #[arg(long, requires = "height")]
        width: Option<usize>,
        #[arg(long, requires = "width")]
        height: Option<usize>,
        #[arg(long)]
        trials: Option<usize>,
        /// Dump every trial's points under this directory
        #[arg(long)]
        dump: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Time both ellipse algorithms over growing random batches
    Bench {
        #[arg(long)]
        width: Option<usize>,
        #[arg(long)]
        height: Option<usize>,
        #[arg(long)]
        step: Option<usize>,
        #[arg(long)]
        max: Option<usize>,
        /// CSV path (default: <bench_dir>/<h>x<w>.csv)
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Draw random ellipses headlessly and save a PNG
    Render {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 1000)]
        count: usize,
        #[arg(long)]
        width: Option<usize>,
        #[arg(long)]
        height: Option<usize>,
        /// Real-slope + quadratic instead of Bresenham + additive
        #[arg(long)]
        vanilla: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<ExitCode, Error> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Draw) {
        Command::Draw => run_window(&config).map(|()| ExitCode::SUCCESS),
        Command::Compare { width, height, trials, dump, seed } => {
            let sizes = match (width, height) {
                (Some(w), Some(h)) => vec![[h, w]],
                _ => config.harness.canvas_sizes.clone(),
            };
            let mut success = true;
            for [h, w] in sizes {
                let report = harness::run_comparison(&ComparisonConfig {
                    width: w,
                    height: h,
                    trials: trials.unwrap_or(config.harness.trials),
                    seed: seed.or(config.harness.seed),
                    dump_dir: dump.clone().or_else(|| config.harness.comparison_dir.clone()),
                })?;
                tracing::info!(
                    "{h}x{w}: {} trials, {} mismatches, {} multiplicity-only, {} dump errors",
                    report.trials,
                    report.mismatches.len(),
                    report.multiplicity_mismatches,
                    report.dump_errors.len()
                );
                success &= report.success();
            }
            if success {
                println!("SUCCESS");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("FAILURE");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Bench { width, height, step, max, out, seed } => {
            let h = &config.harness;
            let bench = BenchmarkConfig {
                width: width.unwrap_or(h.bench_width),
                height: height.unwrap_or(h.bench_height),
                step: step.unwrap_or(h.bench_step),
                max: max.unwrap_or(h.bench_max),
                seed: seed.or(h.seed),
            };
            let path = match out {
                Some(path) => path,
                None => h.bench_dir.join(format!("{}x{}.csv", bench.height, bench.width)),
            };
            let rows = harness::write_benchmark_csv(&bench, &path)?;
            println!("{} rows written to {}", rows.len(), path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Render { out, count, width, height, vanilla, seed } => {
            let (w, h) = (
                width.unwrap_or(config.window.width),
                height.unwrap_or(config.window.height),
            );
            let mut generator = ShapeGenerator::new(w, h, seed.or(config.harness.seed));
            let mut store = ShapeStore::new();
            for _ in 0..count {
                let color = generator.color();
                store.append(generator.ellipse(color));
            }
            let mut fb = FrameBuffer::new(w, h);
            fb.clear(Rgba::BLACK);
            store.render_all(&mut fb, Algorithms::from_toggle(!vanilla));
            fb.save_png(&out)?;
            tracing::info!("rendered {count} ellipses to {}", out.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_window(config: &Config) -> Result<(), Error> {
    /* --- Window + canvas setup ---
       Visual: an empty black window of the configured size. */
    let (w, h) = (config.window.width, config.window.height);
    let mut drawer = Drawer::new(&config.window.title, w, h)?;
    let mut screen = FrameBuffer::new(w, h);
    let mut session = Session::new(config, w, h);

    /* --- FPS ---
       Visual: window title and HUD show frames per second. */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut fps = 0.0_f32;

    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs: keys become actions, the pointer drives the drag. */
        for action in drawer.actions() {
            session.apply(action);
        }
        session.pointer(drawer.mouse_pos(), drawer.left_mouse_down());

        /* 2) Compose: clear, replay every committed shape, then the one being dragged. */
        session.render(&mut screen);

        if let Some(path) = session.take_snapshot_request() {
            // a failed snapshot should not close the window
            match screen.save_png(&path) {
                Ok(()) => tracing::info!("saved {}", path.display()),
                Err(err) => tracing::error!("{err}"),
            }
        }

        /* 3) Overlays: crosshair and HUD. */
        if let Some(p) = drawer.mouse_pos() {
            draw_crosshair(&mut screen, p.x, p.y, 12, Rgba::opaque(0xFF, 0xCC, 0x33));
        }
        draw_text_5x7(&mut screen, 8, 8, &session.hud_text(fps), Rgba::WHITE);

        /* 4) Present to the window. */
        drawer.present(&screen)?;

        /* 5) FPS counter, once per second. */
        frames_this_second += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(last_fps_time);
        if elapsed >= Duration::from_secs(1) {
            fps = frames_this_second as f32 / elapsed.as_secs_f32();
            drawer.set_title(&format!("{} | frames per second: {fps:.2}", config.window.title));
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
