use std::fmt::Write as _;
use std::path::Path;

use kurbo::BezPath;

use crate::{
    flash::outline::Outline,
    foundation::core::{Canvas, Rgb},
    foundation::error::{FlashError, FlashResult},
};

/// Stroke and fill attributes of one shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    pub stroke: Option<Rgb>,
    pub stroke_width: f64,
    pub fill: Option<Rgb>,
    pub fill_opacity: f64,
}

impl Style {
    /// 1px black stroke, no visible fill.
    pub fn line() -> Self {
        Self {
            stroke: Some(Rgb::BLACK),
            stroke_width: 1.0,
            fill: Some(Rgb::BLACK),
            fill_opacity: 0.0,
        }
    }

    /// Opaque fill with a matching hairline stroke.
    pub fn filled(color: Rgb) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: 1.0,
            fill: Some(color),
            fill_opacity: 1.0,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::line()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub path: BezPath,
    pub style: Style,
}

/// Vector frame under construction: an ordered list of styled paths over an optional
/// background, serialized as one SVG document.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgCanvas {
    canvas: Canvas,
    background: Option<Rgb>,
    shapes: Vec<Shape>,
}

impl SvgCanvas {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            background: None,
            shapes: Vec::new(),
        }
    }

    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn push(&mut self, path: BezPath, style: Style) {
        self.shapes.push(Shape { path, style });
    }

    /// Append a closed polygon.
    pub fn push_outline(&mut self, outline: &Outline, style: Style) {
        self.push(outline.to_bez_path(), style);
    }

    pub fn to_svg_string(&self) -> FlashResult<String> {
        let mut out = String::new();
        self.write_svg(&mut out)
            .map_err(|e| FlashError::render(format!("format svg: {e}")))?;
        Ok(out)
    }

    fn write_svg(&self, out: &mut String) -> std::fmt::Result {
        let Canvas { width, height } = self.canvas;
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        if let Some(bg) = self.background {
            writeln!(
                out,
                r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{}"/>"#,
                bg.to_hex()
            )?;
        }
        for shape in &self.shapes {
            let style = shape.style;
            let stroke = style.stroke.map_or_else(|| "none".to_string(), Rgb::to_hex);
            let fill = style.fill.map_or_else(|| "none".to_string(), Rgb::to_hex);
            writeln!(
                out,
                r#"<path d="{}" stroke="{stroke}" stroke-width="{}" fill="{fill}" fill-opacity="{}"/>"#,
                shape.path.to_svg(),
                style.stroke_width,
                style.fill_opacity
            )?;
        }
        writeln!(out, "</svg>")
    }

    /// Serialize and write to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> FlashResult<()> {
        use anyhow::Context as _;
        crate::encode::sink::ensure_parent_dir(path)?;
        let svg = self.to_svg_string()?;
        std::fs::write(path, svg).with_context(|| format!("write svg '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
