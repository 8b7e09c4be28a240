//! The drawing surface the interpreter talks to.
//!
//! The interpreter only ever positions a pen and draws straight lines to
//! absolute coordinates, so [`Canvas`] is just those two calls. Backends that
//! produce a file also implement [`Render`].

use std::path::Path;

pub mod raster;
pub mod svg;

pub use raster::RasterCanvas;
pub use svg::SvgCanvas;

/// Pen operations in the canvas frame (already translated to the origin).
pub trait Canvas {
    /// Reposition the pen without drawing.
    fn move_to(&mut self, x: f64, y: f64);

    /// Draw a straight segment from the pen to `(x, y)` and leave the pen there.
    fn line_to(&mut self, x: f64, y: f64);
}

/// A canvas that can be written out to a file.
pub trait Render: Canvas + Sized {
    fn init(config: &CanvasConfig) -> Result<Self, RenderError>;

    /// Rasterize or serialize everything drawn so far into `path`.
    /// Consumes the canvas whether or not writing succeeds.
    fn finish(self, path: &Path) -> Result<(), RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Shape of the stroke at open segment ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LineCap {
    #[default]
    #[value(name = "normal", alias = "butt")]
    Butt,
    Round,
    Square,
}

/// Shape of the stroke where two segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub origin_x: f64,
    pub origin_y: f64,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            origin_x: 400.0,
            origin_y: 300.0,
            line_width: 2.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }
}

/// One call made against a [`RecordingCanvas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenCall {
    MoveTo(f64, f64),
    LineTo(f64, f64),
}

/// Keeps every pen call in order. Useful for checking what a program draws
/// without producing an image.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<PenCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.calls.iter().filter_map(|c| match *c {
            PenCall::LineTo(x, y) => Some((x, y)),
            PenCall::MoveTo(..) => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(PenCall::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(PenCall::LineTo(x, y));
    }
}
