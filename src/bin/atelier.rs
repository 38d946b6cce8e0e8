use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use atelier::{
    AdjustmentParams, AnimationMode, FfmpegSink, FfmpegSinkOpts, FrameSink, GifSink, GifSinkOpts,
    encode_frames, render, render_frames,
};
use atelier::style::runner::{self, StylizeConfig};

#[derive(Parser, Debug)]
#[command(name = "atelier", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the adjustment pipeline over a base/styled image pair.
    Adjust(AdjustArgs),
    /// Render a transition or before/after animation (GIF or MP4).
    Animate(AnimateArgs),
    /// Run the external style-transfer process for every style.
    Stylize(StylizeArgs),
}

#[derive(Parser, Debug)]
struct AdjustArgs {
    /// Base (original) image.
    #[arg(long)]
    base: PathBuf,

    /// Styled image of the same dimensions.
    #[arg(long)]
    styled: PathBuf,

    /// Adjustment parameters as JSON; defaults apply when omitted.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output image path (format by extension).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// The "before" image.
    #[arg(long = "from")]
    from_path: PathBuf,

    /// The "after" image, same dimensions.
    #[arg(long = "to")]
    to_path: PathBuf,

    /// Animation mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Transition)]
    mode: ModeArg,

    /// Number of frames to render.
    #[arg(long, default_value_t = atelier::DEFAULT_FRAME_COUNT)]
    frames: u32,

    /// Frame rate for video output.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Per-frame delay for GIF output, in milliseconds.
    #[arg(long, default_value_t = 100)]
    delay_ms: u32,

    /// Output path; `.gif` produces an animated GIF, `.mp4` a video
    /// (requires `ffmpeg` on PATH).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct StylizeArgs {
    /// Stylize configuration as JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Transition,
    BeforeAfter,
}

impl From<ModeArg> for AnimationMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Transition => AnimationMode::Transition,
            ModeArg::BeforeAfter => AnimationMode::BeforeAfter,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Adjust(args) => cmd_adjust(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Stylize(args) => cmd_stylize(args),
    }
}

fn load_rgb(path: &Path) -> anyhow::Result<image::RgbImage> {
    let img = image::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    Ok(img.to_rgb8())
}

fn cmd_adjust(args: AdjustArgs) -> anyhow::Result<()> {
    let base = load_rgb(&args.base)?;
    let styled = load_rgb(&args.styled)?;

    let params = match args.params {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            serde_json::from_str::<AdjustmentParams>(&text)
                .with_context(|| format!("failed to parse params '{}'", path.display()))?
        }
        None => AdjustmentParams::default(),
    };

    let out = render(&base, &styled, &params)?;
    out.save(&args.out)
        .with_context(|| format!("failed to save '{}'", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let from = load_rgb(&args.from_path)?;
    let to = load_rgb(&args.to_path)?;

    let frames = render_frames(&from, &to, args.mode.into(), args.frames)?;

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let mut sink: Box<dyn FrameSink> = match ext.as_str() {
        "gif" => {
            let mut opts = GifSinkOpts::new(&args.out);
            opts.frame_delay_ms = args.delay_ms;
            Box::new(GifSink::new(opts))
        }
        "mp4" => Box::new(FfmpegSink::new(FfmpegSinkOpts::new(&args.out))),
        other => anyhow::bail!("unsupported animation extension '{other}' (use .gif or .mp4)"),
    };

    encode_frames(&frames, sink.as_mut(), args.fps)?;
    println!("wrote {} ({} frames)", args.out.display(), frames.len());
    Ok(())
}

fn cmd_stylize(args: StylizeArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read '{}'", args.config.display()))?;
    let cfg: StylizeConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config '{}'", args.config.display()))?;

    runner::run_all(&cfg, |p| {
        println!("[{}/{}] {} done", p.completed, p.total, p.style.as_str());
    })?;
    Ok(())
}
