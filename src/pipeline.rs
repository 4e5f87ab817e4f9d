use crate::{
    audio::energy::{EnergyProvider, FftEnergy},
    audio::wav::AudioClip,
    encode::sink::{FrameSink, SinkConfig},
    flash::field::{FieldConfig, SpawnTarget},
    foundation::core::{Canvas, Reflect, Rgb},
    foundation::error::{FlashError, FlashResult},
    render::canvas::SvgCanvas,
    render::plot::{PlotMode, Plotter},
};

/// Frames between two progress events.
const PROGRESS_EVERY: u64 = 100;

/// Options for [`render_audio_frames`].
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Frames per second; one block of `sample_rate / fps` samples becomes one frame.
    pub fps: u32,
    pub canvas: Canvas,
    pub mode: PlotMode,
    /// Field settings for [`PlotMode::Flash`]. Width and height are taken from `canvas`.
    pub field: FieldConfig,
    /// Draw every channel into the same frame, each with its own reflection.
    pub multichannel: bool,
    pub background: Option<Rgb>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            fps: 25,
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            mode: PlotMode::Flash,
            field: FieldConfig::default(),
            multichannel: false,
            background: Some(Rgb::WHITE),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub channels_rendered: u16,
    pub block_size: usize,
    /// Bolts spawned across all flash plotters, including the active ones.
    pub bolts_spawned: u64,
}

struct ChannelTrack {
    channel: usize,
    reflect: Reflect,
    plotter: Plotter,
}

/// Render `clip` into `sink`, one frame per block of `sample_rate / fps` samples.
#[tracing::instrument(skip(clip, opts, sink), fields(mode = %opts.mode, fps = opts.fps))]
pub fn render_audio_frames(
    clip: &AudioClip,
    opts: &RenderOpts,
    sink: &mut dyn FrameSink,
) -> FlashResult<RenderStats> {
    if opts.fps == 0 {
        return Err(FlashError::validation("fps must be non-zero"));
    }
    let block_size = (clip.sample_rate / opts.fps) as usize;
    if block_size == 0 {
        return Err(FlashError::validation(format!(
            "fps {} exceeds sample rate {}",
            opts.fps, clip.sample_rate
        )));
    }
    if clip.channels == 0 {
        return Err(FlashError::audio("audio has no channels"));
    }

    let field = FieldConfig {
        width: opts.canvas.width_f64(),
        height: opts.canvas.height_f64(),
        ..opts.field.clone()
    };
    let bins = match field.spawn {
        SpawnTarget::Spectrum { bins } => Some(bins),
        SpawnTarget::Anchor => None,
    };
    if let Some(bins) = bins
        && bins > block_size / 2
    {
        return Err(FlashError::validation(format!(
            "{bins} spectrum bins need blocks of at least {} samples, got {block_size}",
            bins * 2
        )));
    }
    let mut energy = if bins.is_some() {
        FftEnergy::new(bins)
    } else {
        FftEnergy::rms_only()
    };

    let channel_count = if opts.multichannel {
        usize::from(clip.channels)
    } else {
        1
    };
    let mut tracks = (0..channel_count)
        .map(|channel| {
            let cfg = FieldConfig {
                seed: field.seed.wrapping_add(channel as u64),
                ..field.clone()
            };
            Ok(ChannelTrack {
                channel,
                reflect: if opts.multichannel {
                    Reflect::for_channel(channel)
                } else {
                    Reflect::IDENTITY
                },
                plotter: Plotter::new(opts.mode, &cfg)?,
            })
        })
        .collect::<FlashResult<Vec<_>>>()?;

    let blocks = tracks
        .iter()
        .map(|t| clip.blocks(t.channel, block_size))
        .collect::<FlashResult<Vec<_>>>()?;
    let frames = clip.block_count(block_size) as u64;

    sink.begin(SinkConfig {
        width: opts.canvas.width,
        height: opts.canvas.height,
        fps: opts.fps,
    })?;

    for idx in 0..frames {
        let mut canvas = SvgCanvas::new(opts.canvas);
        if let Some(bg) = opts.background {
            canvas = canvas.with_background(bg);
        }
        for (track, channel_blocks) in tracks.iter_mut().zip(&blocks) {
            let block = &channel_blocks[idx as usize];
            let e = energy.analyze(block);
            track.plotter.plot(&mut canvas, block, &e, track.reflect);
        }
        sink.push_frame(idx, &canvas)?;

        if (idx + 1) % PROGRESS_EVERY == 0 {
            tracing::info!(frame = idx + 1, total = frames, "rendered frames");
        }
    }
    sink.end()?;

    let bolts_spawned = tracks
        .iter()
        .map(|t| match &t.plotter {
            Plotter::Flash(field) => field.spawned(),
            _ => 0,
        })
        .sum();
    let stats = RenderStats {
        frames_total: frames,
        channels_rendered: channel_count as u16,
        block_size,
        bolts_spawned,
    };
    tracing::info!(
        frames = stats.frames_total,
        bolts = stats.bolts_spawned,
        "render finished"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
