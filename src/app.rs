// Interactive drawing session, kept free of any windowing types so it can be
// driven from tests. The window layer turns keys into `Action`s and feeds the
// pointer in once per frame; the session owns the shape store and every piece
// of "current" state (tool, color, thickness, algorithm toggle).

use std::fmt;
use std::path::PathBuf;

use crate::config::Config;
use crate::framebuffer::FrameBuffer;
use crate::random::ShapeGenerator;
use crate::store::{Algorithms, ShapeStore, draw_shape};
use crate::types::{Ellipse, Line, Point, Rgba, Shape};

pub const PALETTE: [Rgba; 8] = [
    Rgba::WHITE,
    Rgba::opaque(255, 64, 64),
    Rgba::opaque(64, 220, 64),
    Rgba::opaque(80, 140, 255),
    Rgba::opaque(255, 220, 40),
    Rgba::opaque(255, 80, 255),
    Rgba::opaque(40, 230, 230),
    Rgba::opaque(255, 150, 30),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Line,
    Ellipse,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Line => write!(f, "LINE"),
            Tool::Ellipse => write!(f, "ELLIPSE"),
        }
    }
}

/// One discrete user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectTool(Tool),
    ToggleAlgorithm,
    ThicknessUp,
    ThicknessDown,
    /// Index into `PALETTE`; out-of-range indices are ignored.
    Palette(usize),
    RandomBatch,
    Clear,
    Snapshot,
}

pub struct Session {
    store: ShapeStore,
    tool: Tool,
    color: Rgba,
    thickness: u32,
    max_thickness: u32,
    optimized: bool,
    random_batch: usize,
    generator: ShapeGenerator,
    drag: Option<(Point, Point)>,
    snapshot_dir: PathBuf,
    snapshots: u32,
    snapshot_requested: bool,
}

impl Session {
    pub fn new(config: &Config, width: usize, height: usize) -> Self {
        let drawing = &config.drawing;
        Self {
            store: ShapeStore::new(),
            tool: Tool::Ellipse,
            color: drawing.color,
            thickness: drawing.thickness.min(drawing.max_thickness),
            max_thickness: drawing.max_thickness,
            optimized: drawing.optimized,
            random_batch: drawing.random_batch,
            generator: ShapeGenerator::new(width, height, config.harness.seed),
            drag: None,
            snapshot_dir: drawing.snapshot_dir.clone(),
            snapshots: 0,
            snapshot_requested: false,
        }
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn algorithms(&self) -> Algorithms {
        Algorithms::from_toggle(self.optimized)
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SelectTool(tool) => self.tool = tool,
            Action::ToggleAlgorithm => {
                self.optimized = !self.optimized;
                tracing::debug!(algorithms = ?self.algorithms(), "algorithm toggled");
            }
            Action::ThicknessUp => self.thickness = (self.thickness + 1).min(self.max_thickness),
            Action::ThicknessDown => self.thickness = self.thickness.saturating_sub(1),
            Action::Palette(i) => {
                if let Some(&c) = PALETTE.get(i) {
                    self.color = c;
                }
            }
            Action::RandomBatch => {
                let batch = self.generator.ellipses(self.random_batch, self.color);
                self.store.extend(batch.into_iter().map(Shape::from));
                tracing::info!(
                    added = self.random_batch,
                    total = self.store.len(),
                    "random ellipses"
                );
            }
            Action::Clear => {
                tracing::info!(removed = self.store.len(), "cleared");
                self.store.clear();
            }
            Action::Snapshot => self.snapshot_requested = true,
        }
    }

    /// Feed the pointer once per frame. Press starts a drag, moves extend it,
    /// release commits the shape spanned by press and last position.
    pub fn pointer(&mut self, pos: Option<Point>, left_down: bool) {
        match (self.drag, left_down) {
            (None, true) => {
                if let Some(p) = pos {
                    self.drag = Some((p, p));
                }
            }
            (Some((start, _)), true) => {
                if let Some(p) = pos {
                    self.drag = Some((start, p));
                }
            }
            (Some(_), false) => {
                if let Some(shape) = self.preview() {
                    tracing::debug!(?shape, "commit");
                    self.store.append(shape);
                }
                self.drag = None;
            }
            (None, false) => {}
        }
    }

    /// The shape being dragged right now, if any.
    pub fn preview(&self) -> Option<Shape> {
        let (start, end) = self.drag?;
        Some(match self.tool {
            Tool::Line => Shape::Line(Line::new(start, end, self.color, self.thickness)),
            Tool::Ellipse => Shape::Ellipse(Ellipse::from_corners(start, end, self.color)),
        })
    }

    /// Compose one frame: clear, replay the store, then the in-progress shape.
    pub fn render(&self, fb: &mut FrameBuffer) {
        let algorithms = self.algorithms();
        fb.clear(Rgba::TRANSPARENT);
        self.store.render_all(fb, algorithms);
        if let Some(shape) = self.preview() {
            draw_shape(fb, &shape, algorithms);
        }
    }

    /// Path for the next snapshot, once per `Action::Snapshot`.
    pub fn take_snapshot_request(&mut self) -> Option<PathBuf> {
        if !std::mem::take(&mut self.snapshot_requested) {
            return None;
        }
        self.snapshots += 1;
        Some(self.snapshot_dir.join(format!("snapshot-{:03}.png", self.snapshots)))
    }

    pub fn hud_text(&self, fps: f32) -> String {
        let algorithms = self.algorithms();
        let algo = match self.tool {
            Tool::Line => algorithms.line.to_string(),
            Tool::Ellipse => algorithms.ellipse.to_string(),
        };
        format!(
            "{} | {} | T {} | {} SHAPES | FPS: {:.1}",
            self.tool,
            algo.to_uppercase(),
            self.thickness,
            self.store.len(),
            fps
        )
    }
}
