use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use windowsill::encode::sink::{unpremultiply_rgba8, write_png};
use windowsill::{
    BackendKind, FontAsset, FrameRange, RenderSettings, RenderThreading, RenderToMp4Opts, Short,
    ShortConfig,
};

#[derive(Parser, Debug)]
#[command(name = "windowsill", version, about = "Render the Windowsill short headlessly")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame shown at one clock time as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a PNG sequence into a directory.
    Frames(FramesArgs),
    /// Print scene poses as JSON lines.
    Poses(PosesArgs),
}

#[derive(Args, Debug)]
struct ShortArgs {
    /// JSON config; absent fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file (TTF/OTF) for the credits, counter and title card. Overrides `font_path`.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// Clock time to start at, in seconds.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Clock time to stop before, in seconds. Defaults to the configured duration.
    #[arg(long)]
    to: Option<f64>,
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

impl ThreadingArgs {
    fn threading(&self) -> RenderThreading {
        RenderThreading {
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            threads: self.threads,
        }
    }
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    short: ShortArgs,

    /// Clock time in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    short: ShortArgs,

    #[command(flatten)]
    range: RangeArgs,

    #[command(flatten)]
    threading: ThreadingArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of overwriting an existing output.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    short: ShortArgs,

    #[command(flatten)]
    range: RangeArgs,

    #[command(flatten)]
    threading: ThreadingArgs,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct PosesArgs {
    /// JSON config; absent fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    range: RangeArgs,

    /// Seconds between dumped poses.
    #[arg(long, default_value_t = 0.5)]
    step: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Poses(args) => cmd_poses(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ShortConfig> {
    Ok(match path {
        Some(path) => ShortConfig::from_json_path(path)?,
        None => ShortConfig::default(),
    })
}

/// Load the short and the font every rendered frame needs.
fn load_short(args: &ShortArgs) -> anyhow::Result<(Short, RenderSettings)> {
    let mut cfg = load_config(args.config.as_ref())?;
    if let Some(font) = &args.font {
        cfg.font_path = Some(font.clone());
    }
    let font_path = cfg.font_path.clone().context(
        "a font is required to render frames: pass --font or set `font_path` in the config",
    )?;
    let font = FontAsset::from_path(&font_path)?;
    tracing::info!(font = %font_path.display(), family = font.family(), "font loaded");

    let short = Short::new(cfg)?;
    Ok((short, RenderSettings { font: Some(font) }))
}

fn time_range(short: &Short, range: &RangeArgs) -> anyhow::Result<FrameRange> {
    let cfg = short.config();
    let to = range.to.unwrap_or(cfg.duration_secs);
    Ok(cfg.frame_range(range.from, to)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (short, settings) = load_short(&args.short)?;
    let mut backend = windowsill::create_backend(BackendKind::Cpu, &settings)?;
    let frame = windowsill::render_frame_at(&short, args.time, backend.as_mut())?;

    if let Some(dir) = args.out.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output directory '{}'", dir.display()))?;
    }
    let mut straight = vec![0u8; frame.data.len()];
    unpremultiply_rgba8(&mut straight, &frame.data)?;
    write_png(&args.out, &straight, frame.width, frame.height)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (short, settings) = load_short(&args.short)?;
    let mut backend = windowsill::create_backend(BackendKind::Cpu, &settings)?;

    let opts = RenderToMp4Opts {
        range: time_range(&short, &args.range)?,
        background: [0, 0, 0],
        overwrite: !args.no_overwrite,
        threading: args.threading.threading(),
    };
    let stats = windowsill::render_to_mp4(&short, &args.out, opts, backend.as_mut())?;

    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames_total);
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (short, settings) = load_short(&args.short)?;
    let mut backend = windowsill::create_backend(BackendKind::Cpu, &settings)?;

    let range = time_range(&short, &args.range)?;
    let stats = windowsill::render_png_sequence(
        &short,
        &args.out_dir,
        range,
        backend.as_mut(),
        &args.threading.threading(),
    )?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_total,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_poses(args: PosesArgs) -> anyhow::Result<()> {
    if !args.step.is_finite() || args.step <= 0.0 {
        anyhow::bail!("--step must be finite and > 0");
    }
    let short = Short::new(load_config(args.config.as_ref())?)?;
    let to = args.range.to.unwrap_or(short.config().duration_secs);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for k in 0u64.. {
        let time = args.range.from + k as f64 * args.step;
        if time >= to {
            break;
        }
        let pose = short.pose_at(time)?;
        let line = serde_json::to_string(&pose).context("serialize scene pose")?;
        writeln!(out, "{line}").context("write pose line")?;
    }
    Ok(())
}
