use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::{Canvas, CanvasConfig, LineCap, LineJoin, Render, RenderError};

/// SVG output. The path is kept as `d` attribute text and written out on finish.
pub struct SvgCanvas {
    config: CanvasConfig,
    data: String,
}

impl SvgCanvas {
    /// The full SVG document for everything drawn so far.
    pub fn document(&self) -> String {
        let cap = match self.config.line_cap {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        };
        let join = match self.config.line_join {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        };
        let CanvasConfig {
            width,
            height,
            origin_x,
            origin_y,
            line_width,
            ..
        } = self.config;

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
  <rect width="100%" height="100%" fill="white"/>
  <g transform="translate({origin_x} {origin_y})">
    <path d="{d}" fill="none" stroke="black" stroke-width="{line_width}" stroke-linecap="{cap}" stroke-linejoin="{join}"/>
  </g>
</svg>
"#,
            d = self.data.trim_end(),
        )
    }
}

impl Canvas for SvgCanvas {
    fn move_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.data, "M{x} {y} ");
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.data, "L{x} {y} ");
    }
}

impl Render for SvgCanvas {
    fn init(config: &CanvasConfig) -> Result<Self, RenderError> {
        if config.width == 0 || config.height == 0 {
            return Err(RenderError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }
        Ok(Self {
            config: config.clone(),
            data: String::from("M0 0 "),
        })
    }

    fn finish(self, path: &Path) -> Result<(), RenderError> {
        fs::write(path, self.document())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_data_follows_pen_calls() {
        let mut canvas = SvgCanvas::init(&CanvasConfig::default()).unwrap();
        canvas.line_to(0.0, -6.0);
        canvas.move_to(3.0, 0.5);
        canvas.line_to(4.0, 0.5);
        let doc = canvas.document();
        assert!(doc.contains(r#"d="M0 0 L0 -6 M3 0.5 L4 0.5""#));
    }

    #[test]
    fn stroke_attributes_come_from_config() {
        let config = CanvasConfig {
            width: 100,
            height: 50,
            origin_x: 10.0,
            origin_y: 20.0,
            line_width: 3.5,
            line_cap: LineCap::Round,
            line_join: LineJoin::Bevel,
        };
        let doc = SvgCanvas::init(&config).unwrap().document();
        assert!(doc.contains(r#"width="100" height="50""#));
        assert!(doc.contains("translate(10 20)"));
        assert!(doc.contains(r#"stroke-width="3.5""#));
        assert!(doc.contains(r#"stroke-linecap="round""#));
        assert!(doc.contains(r#"stroke-linejoin="bevel""#));
    }

    #[test]
    fn zero_height_is_rejected() {
        let config = CanvasConfig {
            height: 0,
            ..CanvasConfig::default()
        };
        assert!(SvgCanvas::init(&config).is_err());
    }
}
