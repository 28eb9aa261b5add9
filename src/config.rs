//! Settings read from `raster-lab.toml`.
//!
//! Every field has a default, so a partial file (or none at all) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::types::Rgba;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "raster-lab.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub drawing: DrawingConfig,
    pub harness: HarnessConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: String::from("raster-lab"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Color of new shapes until the palette is changed.
    pub color: Rgba,
    pub thickness: u32,
    pub max_thickness: u32,
    /// Start with Bresenham + additive instead of real-slope + quadratic.
    pub optimized: bool,
    /// Ellipses added by the random-batch key.
    pub random_batch: usize,
    /// Where PNG snapshots go.
    pub snapshot_dir: PathBuf,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            thickness: 0,
            max_thickness: 20,
            optimized: false,
            random_batch: 1000,
            snapshot_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Random ellipses per canvas size in a comparison run.
    pub trials: usize,
    /// `[height, width]` pairs the comparison run covers.
    pub canvas_sizes: Vec<[usize; 2]>,
    pub bench_width: usize,
    pub bench_height: usize,
    pub bench_step: usize,
    pub bench_max: usize,
    /// Benchmark CSVs are written here as `<h>x<w>.csv`.
    pub bench_dir: PathBuf,
    /// Per-trial point dumps; off unless set.
    pub comparison_dir: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            trials: 10_000,
            canvas_sizes: vec![[100, 100], [200, 200], [500, 500]],
            bench_width: 500,
            bench_height: 500,
            bench_step: 5_000,
            bench_max: 1_000_000,
            bench_dir: PathBuf::from("benchmark"),
            comparison_dir: None,
            seed: None,
        }
    }
}

impl Config {
    /// An explicit path must exist and parse. Without one, the default file is
    /// used when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Error> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::parse(&text, path)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML text; `origin` only labels errors.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, Error> {
        toml::from_str(text).map_err(|source| Error::Config {
            path: origin.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::parse("", Path::new("mem")).unwrap();
        assert_eq!(cfg.window.width, 640);
        assert_eq!(cfg.drawing.color, Rgba::WHITE);
        assert_eq!(cfg.harness.trials, 10_000);
        assert_eq!(cfg.harness.canvas_sizes.len(), 3);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let text = r#"
            [drawing]
            color = { r = 10, g = 20, b = 30 }
            optimized = true

            [harness]
            seed = 42
            canvas_sizes = [[50, 60]]
        "#;
        let cfg = Config::parse(text, Path::new("mem")).unwrap();
        assert_eq!(cfg.drawing.color, Rgba::opaque(10, 20, 30));
        assert!(cfg.drawing.optimized);
        assert_eq!(cfg.drawing.random_batch, 1000);
        assert_eq!(cfg.harness.seed, Some(42));
        assert_eq!(cfg.harness.canvas_sizes, vec![[50, 60]]);
        assert_eq!(cfg.window.height, 480);
    }

    #[test]
    fn bad_toml_names_the_file() {
        let err = Config::parse("[window]\nwidth = \"wide\"", Path::new("cfg.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("cfg.toml"));
    }
}
