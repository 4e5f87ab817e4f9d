use std::f64::consts::PI;

use kurbo::BezPath;

use crate::{
    audio::energy::{BlockEnergy, spectrum},
    flash::field::{FieldConfig, FlashField},
    foundation::core::{Reflect, Rgb},
    foundation::error::FlashResult,
    render::canvas::{Style, SvgCanvas},
};

/// Visual strategy used to draw one block of samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotMode {
    /// Consecutive sample pairs plotted as `(x, y)` around the canvas center.
    #[default]
    Scatter,
    /// Oscilloscope trace from left to right.
    Osci,
    /// Sample value against spectrum magnitude.
    Cross,
    /// Audio-steered lightning bolts.
    Flash,
}

impl PlotMode {
    pub const ALL: [Self; 4] = [Self::Scatter, Self::Osci, Self::Cross, Self::Flash];

    /// Look a mode up by name (case-insensitive). Unknown names select [`PlotMode::Scatter`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Scatter => "scatter",
            Self::Osci => "osci",
            Self::Cross => "cross",
            Self::Flash => "flash",
        }
    }
}

impl std::fmt::Display for PlotMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One plotter per rendered channel. Stateless modes carry nothing; the flash mode owns the
/// field its bolts live in.
#[derive(Debug)]
pub enum Plotter {
    Scatter,
    Osci,
    Cross,
    Flash(Box<FlashField>),
}

impl Plotter {
    pub fn new(mode: PlotMode, field: &FieldConfig) -> FlashResult<Self> {
        Ok(match mode {
            PlotMode::Scatter => Self::Scatter,
            PlotMode::Osci => Self::Osci,
            PlotMode::Cross => Self::Cross,
            PlotMode::Flash => Self::Flash(Box::new(FlashField::new(field.clone())?)),
        })
    }

    pub fn mode(&self) -> PlotMode {
        match self {
            Self::Scatter => PlotMode::Scatter,
            Self::Osci => PlotMode::Osci,
            Self::Cross => PlotMode::Cross,
            Self::Flash(_) => PlotMode::Flash,
        }
    }

    /// Draw `block` onto `canvas`.
    pub fn plot(
        &mut self,
        canvas: &mut SvgCanvas,
        block: &[f32],
        energy: &BlockEnergy,
        reflect: Reflect,
    ) {
        let (w, h) = (canvas.canvas().width_f64(), canvas.canvas().height_f64());
        match self {
            Self::Scatter => canvas.push(scatter_path(block, w, h, reflect), Style::line()),
            Self::Osci => canvas.push(osci_path(block, w, h), Style::line()),
            Self::Cross => canvas.push(cross_path(block, w, h), Style::line()),
            Self::Flash(field) => {
                field.advance_frame(block, energy, reflect);
                for outline in field.outlines() {
                    canvas.push_outline(&outline, Style::filled(Rgb::BLACK));
                }
            }
        }
    }
}

fn scatter_path(block: &[f32], w: f64, h: f64, reflect: Reflect) -> BezPath {
    let (cx, cy) = (w * 0.5, h * 0.5);
    let mut path = BezPath::new();
    path.move_to((cx, cy));
    for pair in block.chunks_exact(2) {
        let (px, py) = (f64::from(pair[0]), f64::from(pair[1]));
        path.line_to((
            cx + w * px * 0.5 * reflect.sx(),
            cy + h * py * 0.5 * reflect.sy(),
        ));
    }
    path
}

fn osci_path(block: &[f32], w: f64, h: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, h * 0.5));
    let n = block.len() as f64;
    for (i, &s) in block.iter().enumerate() {
        path.line_to((i as f64 * w / n, h * f64::from(s) + h * 0.5));
    }
    path
}

fn cross_path(block: &[f32], w: f64, h: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((w * 0.5, h * 0.5));
    let magnitudes = spectrum(block, None);
    for (&s, m) in block.iter().zip(magnitudes) {
        let x = f64::from(s) * w * 0.5 + w * 0.5;
        let y = h * m * 0.5 * PI + h * 0.5;
        path.line_to((x, y));
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/plot.rs"]
mod tests;
