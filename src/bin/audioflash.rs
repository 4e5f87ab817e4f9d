use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{SeedableRng as _, rngs::StdRng};

#[derive(Parser, Debug)]
#[command(name = "audioflash", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Grow a single bolt and write it as SVG.
    Bolt(BoltArgs),
    /// Render a WAV file into one SVG frame per audio block.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct BoltArgs {
    /// Random-walk steps to take.
    #[arg(long, default_value_t = 200)]
    nodes: usize,

    #[arg(long, default_value_t = 512)]
    width: u32,

    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Outline thickness.
    #[arg(long, default_value_t = 4.0)]
    thickness: f64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Also rasterize to this PNG path.
    #[arg(long)]
    png: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input WAV file.
    soundfile: PathBuf,

    /// Directory receiving the numbered frames.
    #[arg(long, default_value = "frames")]
    outdir: PathBuf,

    #[arg(long, default_value_t = 25)]
    fps: u32,

    #[arg(short = 'W', long, default_value_t = 1280)]
    width: u32,

    #[arg(short = 'H', long, default_value_t = 720)]
    height: u32,

    /// Outline thickness for flash mode (overrides the config file).
    #[arg(long)]
    thickness: Option<f64>,

    /// Plot mode: scatter, osci, cross or flash. Unknown names fall back to scatter.
    #[arg(long, default_value = "flash")]
    mode: String,

    /// Draw every channel, each mirrored into its own quadrant orientation.
    #[arg(long)]
    multichannel: bool,

    /// Flash field configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for flash mode (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Also write a PNG next to every SVG frame.
    #[arg(long)]
    png: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Bolt(args) => cmd_bolt(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_bolt(args: BoltArgs) -> anyhow::Result<()> {
    let canvas = audioflash::Canvas::new(args.width, args.height)?;
    if !args.thickness.is_finite() || args.thickness < 0.0 {
        anyhow::bail!("thickness must be finite and >= 0, got {}", args.thickness);
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut flash = audioflash::Flash::new(canvas.width_f64(), canvas.height_f64());
    let mut fallbacks = 0usize;
    for _ in 0..args.nodes {
        if flash.random_walk_default(&mut rng).jittered {
            fallbacks += 1;
        }
    }
    tracing::info!(nodes = flash.nodes().len(), fallbacks, "bolt grown");
    tracing::debug!(bolt = %flash, "bolt nodes");

    let mut frame = audioflash::SvgCanvas::new(canvas).with_background(audioflash::Rgb::WHITE);
    frame.push_outline(
        &flash.outline(args.thickness),
        audioflash::Style::filled(audioflash::Rgb::BLACK),
    );
    frame.save(&args.out)?;
    eprintln!("wrote {}", args.out.display());

    if let Some(png) = &args.png {
        let svg = frame.to_svg_string()?;
        audioflash::save_png(&svg, canvas.width, canvas.height, png)?;
        eprintln!("wrote {}", png.display());
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mode = audioflash::PlotMode::from_name(&args.mode);
    if !mode.name().eq_ignore_ascii_case(args.mode.trim()) {
        tracing::warn!(requested = %args.mode, "unknown plot mode, using {mode}");
    }

    let mut field = match &args.config {
        Some(path) => audioflash::FieldConfig::from_path(path)
            .with_context(|| format!("load field config '{}'", path.display()))?,
        None => audioflash::FieldConfig::default(),
    };
    if let Some(thickness) = args.thickness {
        field.thickness = thickness;
    }
    if let Some(seed) = args.seed {
        field.seed = seed;
    }

    let clip = audioflash::load_wav(&args.soundfile)
        .with_context(|| format!("load audio '{}'", args.soundfile.display()))?;
    tracing::info!(
        rate = clip.sample_rate,
        channels = clip.channels,
        seconds = clip.seconds(),
        "audio loaded"
    );

    let opts = audioflash::RenderOpts {
        fps: args.fps,
        canvas: audioflash::Canvas::new(args.width, args.height)?,
        mode,
        field,
        multichannel: args.multichannel,
        ..audioflash::RenderOpts::default()
    };
    let mut sink = audioflash::SvgDirSink::new(&args.outdir).with_png(args.png);
    let stats = audioflash::render_audio_frames(&clip, &opts, &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_total,
        args.outdir.display()
    );
    Ok(())
}
