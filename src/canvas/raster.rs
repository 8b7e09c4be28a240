use std::path::Path;

use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::{Canvas, CanvasConfig, LineCap, LineJoin, Render, RenderError};

/// PNG output: black anti-aliased strokes on a white background.
pub struct RasterCanvas {
    pixmap: Pixmap,
    path: PathBuilder,
    stroke: Stroke,
    transform: Transform,
}

impl Canvas for RasterCanvas {
    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to(x as f32, y as f32);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to(x as f32, y as f32);
    }
}

impl Render for RasterCanvas {
    fn init(config: &CanvasConfig) -> Result<Self, RenderError> {
        let mut pixmap = Pixmap::new(config.width, config.height).ok_or(
            RenderError::InvalidSize {
                width: config.width,
                height: config.height,
            },
        )?;
        pixmap.fill(Color::WHITE);

        let stroke = Stroke {
            width: config.line_width as f32,
            line_cap: match config.line_cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match config.line_join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..Stroke::default()
        };

        let mut path = PathBuilder::new();
        path.move_to(0.0, 0.0);

        Ok(Self {
            pixmap,
            path,
            stroke,
            transform: Transform::from_translate(config.origin_x as f32, config.origin_y as f32),
        })
    }

    fn finish(mut self, path: &Path) -> Result<(), RenderError> {
        // A builder holding only move_to calls yields no path; the image is
        // then just the background.
        if let Some(outline) = self.path.finish() {
            let mut paint = Paint::default();
            paint.set_color(Color::BLACK);
            paint.anti_alias = true;
            self.pixmap
                .stroke_path(&outline, &paint, &self.stroke, self.transform, None);
        }
        self.pixmap
            .save_png(path)
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
}
