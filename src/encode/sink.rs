use std::path::{Path, PathBuf};

use crate::encode::raster;
use crate::foundation::error::{FlashError, FlashResult};
use crate::render::canvas::SvgCanvas;

/// Default file name prefix for frames written by [`SvgDirSink`].
pub const DEFAULT_PREFIX: &str = "audioflash";

/// Configuration provided to a [`FrameSink`] at the start of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: u32,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing index order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> FlashResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: u64, frame: &SvgCanvas) -> FlashResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> FlashResult<()>;
}

/// Writes each frame as `<prefix>_<idx:05>.svg` into a directory, optionally with a PNG next to it.
#[derive(Debug, Clone)]
pub struct SvgDirSink {
    outdir: PathBuf,
    prefix: String,
    png: bool,
    cfg: Option<SinkConfig>,
    last_idx: Option<u64>,
    written: u64,
}

impl SvgDirSink {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            png: false,
            cfg: None,
            last_idx: None,
            written: 0,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Also rasterize every frame to `<prefix>_<idx:05>.png`.
    pub fn with_png(mut self, png: bool) -> Self {
        self.png = png;
        self
    }

    /// Number of frames written since the last `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn frame_path(&self, idx: u64, ext: &str) -> PathBuf {
        self.outdir.join(format!("{}_{idx:05}.{ext}", self.prefix))
    }
}

impl FrameSink for SvgDirSink {
    fn begin(&mut self, cfg: SinkConfig) -> FlashResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(FlashError::validation(
                "svg sink width/height must be non-zero",
            ));
        }
        if cfg.fps == 0 {
            return Err(FlashError::validation("fps must be non-zero"));
        }
        if self.prefix.is_empty() {
            return Err(FlashError::validation("svg sink prefix must be non-empty"));
        }
        use anyhow::Context as _;
        std::fs::create_dir_all(&self.outdir).with_context(|| {
            format!("failed to create output directory '{}'", self.outdir.display())
        })?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &SvgCanvas) -> FlashResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(FlashError::render("svg sink: push_frame before begin"));
        };
        if self.last_idx.is_some_and(|last| idx <= last) {
            return Err(FlashError::render(format!(
                "svg sink: frame {idx} out of order"
            )));
        }
        let svg = frame.to_svg_string()?;
        let svg_path = self.frame_path(idx, "svg");
        {
            use anyhow::Context as _;
            std::fs::write(&svg_path, &svg)
                .with_context(|| format!("write svg '{}'", svg_path.display()))?;
        }
        if self.png {
            raster::save_png(&svg, cfg.width, cfg.height, &self.frame_path(idx, "png"))?;
        }
        self.last_idx = Some(idx);
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> FlashResult<()> {
        tracing::debug!(
            frames = self.written,
            outdir = %self.outdir.display(),
            "svg sink finished"
        );
        self.cfg = None;
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Serialized frames in timeline order.
    pub(crate) frames: Vec<(u64, String)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(u64, String)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FlashResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &SvgCanvas) -> FlashResult<()> {
        self.frames.push((idx, frame.to_svg_string()?));
        Ok(())
    }

    fn end(&mut self) -> FlashResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> FlashResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
