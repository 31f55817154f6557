use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "runeglyph", version)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a range of numbers as `num_NNNN.png` files.
    Frames(FramesArgs),
    /// Render a single number as a PNG.
    Frame(FrameArgs),
    /// Print the draw ops for a number as JSON.
    Scene(SceneArgs),
    /// Render counting rune strips to MP4 (requires `ffmpeg` on PATH) or to PNGs.
    Video(VideoArgs),
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// JSON config file; defaults apply for anything it leaves out.
    #[arg(long)]
    config: Option<PathBuf>,

    /// First number (overrides config).
    #[arg(long)]
    min: Option<u32>,

    /// Last number, inclusive (overrides config).
    #[arg(long)]
    max: Option<u32>,

    /// Output folder (overrides config).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pixel density (overrides config).
    #[arg(long)]
    density: Option<u32>,

    /// Render chunks of frames on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel (default: rayon's choice).
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Number to render, 0-9999.
    #[arg(long)]
    number: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Pixel density (overrides config).
    #[arg(long)]
    density: Option<u32>,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Number to describe, 0-9999.
    #[arg(long)]
    number: u32,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct VideoArgs {
    /// Frames per second.
    #[arg(long)]
    fps: u32,

    /// Duration in seconds; frames are numbered 1..=floor(fps * duration).
    #[arg(long)]
    duration: f64,

    /// Output MP4 path.
    #[arg(long, required_unless_present = "frames_dir", conflicts_with = "frames_dir")]
    out: Option<PathBuf>,

    /// Write `composite_NNNNN.png` strips to this folder instead of encoding.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// How values above 9999 split into runes.
    #[arg(long, value_enum, default_value_t = ModeChoice::Positional)]
    mode: ModeChoice,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Positional,
    Saturated,
}

impl From<ModeChoice> for runeglyph::StripMode {
    fn from(m: ModeChoice) -> Self {
        match m {
            ModeChoice::Positional => runeglyph::StripMode::Positional,
            ModeChoice::Saturated => runeglyph::StripMode::Saturated,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Scene(args) => cmd_scene(args),
        Command::Video(args) => cmd_video(args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::WARN,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<runeglyph::RuneConfig> {
    match path {
        Some(p) => runeglyph::RuneConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(runeglyph::RuneConfig::default()),
    }
}

fn make_backend(
    cfg: &runeglyph::RuneConfig,
) -> anyhow::Result<Box<dyn runeglyph::RenderBackend>> {
    Ok(runeglyph::create_backend(
        runeglyph::BackendKind::Cpu,
        &cfg.render_settings(),
    )?)
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(min) = args.min {
        cfg.min_number = min;
    }
    if let Some(max) = args.max {
        cfg.max_number = max;
    }
    if let Some(out) = args.out {
        cfg.export_folder = out;
    }
    if let Some(density) = args.density {
        cfg.pixel_density = density;
    }
    cfg.validate()?;

    let glyphs = runeglyph::GlyphRenderer::new(cfg.canvas);
    let mut backend = make_backend(&cfg)?;
    let mut sink = runeglyph::PngSequenceSink::runes(&cfg.export_folder);
    let threading = runeglyph::SequenceThreading {
        parallel: args.parallel,
        threads: args.threads,
        ..runeglyph::SequenceThreading::default()
    };

    let stats = runeglyph::render_sequence(
        &glyphs,
        cfg.range()?,
        cfg.fps,
        backend.as_mut(),
        &mut sink,
        &threading,
    )?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_exported,
        cfg.export_folder.display()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(density) = args.density {
        cfg.pixel_density = density;
    }
    cfg.validate()?;

    let glyphs = runeglyph::GlyphRenderer::new(cfg.canvas);
    let scene = glyphs.render_number(args.number)?;
    let mut backend = make_backend(&cfg)?;
    let frame = backend.render_scene(&scene)?;

    runeglyph::ensure_parent_dir(&args.out)?;
    runeglyph::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let glyphs = runeglyph::GlyphRenderer::new(cfg.canvas);
    let scene = glyphs.render_number(args.number)?;
    let json = serde_json::to_string_pretty(&scene).context("serialize scene")?;
    println!("{json}");
    Ok(())
}

fn cmd_video(args: VideoArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let glyphs = runeglyph::GlyphRenderer::new(cfg.canvas);
    let mut backend = make_backend(&cfg)?;
    let opts = runeglyph::StripVideoOpts {
        fps: args.fps,
        duration_secs: args.duration,
        mode: args.mode.into(),
    };

    let (mut sink, target): (Box<dyn runeglyph::FrameSink>, &Path) =
        match (args.out.as_deref(), args.frames_dir.as_deref()) {
            (_, Some(dir)) => {
                let sink: Box<dyn runeglyph::FrameSink> =
                    Box::new(runeglyph::PngSequenceSink::strips(dir));
                (sink, dir)
            }
            (Some(out), None) => {
                if !runeglyph::is_ffmpeg_on_path() {
                    anyhow::bail!("ffmpeg not found on PATH (use --frames-dir to write PNGs)");
                }
                let bg = glyphs.style.background;
                let sink: Box<dyn runeglyph::FrameSink> =
                    Box::new(runeglyph::Mp4Sink::new(out, [bg.r, bg.g, bg.b, bg.a]));
                (sink, out)
            }
            (None, None) => anyhow::bail!("one of --out or --frames-dir is required"),
        };

    let stats = runeglyph::render_strip_video(&glyphs, backend.as_mut(), sink.as_mut(), opts)?;

    eprintln!(
        "wrote {} strip frames ({} runes wide) to {}",
        stats.frames,
        stats.strip_width,
        target.display()
    );
    Ok(())
}
