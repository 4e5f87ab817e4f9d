//! Audioflash grows procedural lightning bolts and draws audio as vector frames.
//!
//! The library is layered bottom-up:
//!
//! - [`Point`] and [`Vector`] geometry
//! - [`Flash`], a bolt grown node by node with a biased random walk, and its filled [`Outline`]
//! - [`FlashField`], which keeps a bolt growing from per-block audio energy and respawns it
//!   once it reaches its target
//! - [`Plotter`] modes drawing blocks of samples into an [`SvgCanvas`]
//! - [`render_audio_frames`], streaming one frame per audio block into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod audio;
/// Frame sinks and rasterization.
pub mod encode;
pub(crate) mod flash;
pub(crate) mod geometry;
pub(crate) mod pipeline;
pub(crate) mod render;

pub use crate::foundation::core::{Canvas, Reflect, Rgb};
pub use crate::foundation::error::{FlashError, FlashResult};

pub use crate::audio::energy::{BlockEnergy, EnergyProvider, FftEnergy, rms, spectrum};
pub use crate::audio::wav::{AudioClip, load_wav, load_wav_from_reader};
pub use crate::encode::raster::{rasterize_svg_to_rgba8, save_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig, SvgDirSink};
pub use crate::flash::bolt::{Flash, MAX_WALK_RETRIES, WalkStep};
pub use crate::flash::field::{FieldConfig, FieldStep, FlashField, SpawnTarget, StepPolicy};
pub use crate::flash::outline::Outline;
pub use crate::geometry::point::Point;
pub use crate::geometry::vector::Vector;
pub use crate::pipeline::{RenderOpts, RenderStats, render_audio_frames};
pub use crate::render::canvas::{Shape, Style, SvgCanvas};
pub use crate::render::plot::{PlotMode, Plotter};
