use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ringscope", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the session at one instant as SVG or PNG (chosen by the output extension).
    Frame(FrameArgs),
    /// Render a numbered frame sequence of a simulated session.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Playground config JSON; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the container width.
    #[arg(long)]
    width: Option<f64>,

    /// Override the container height.
    #[arg(long)]
    height: Option<f64>,

    /// Start the simulation regardless of the config.
    #[arg(long)]
    start: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Session time to render, in milliseconds.
    #[arg(long, default_value_t = 0)]
    at_ms: u64,

    /// Output path (`.svg` or `.png`).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Length of the rendered session, in milliseconds.
    #[arg(long)]
    duration_ms: u64,

    /// Clock step between frames, in milliseconds.
    #[arg(long, default_value_t = 40)]
    step_ms: u64,

    /// Output directory for `frame_NNNNN.<format>` files.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Svg,
    Png,
}

impl Format {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("svg") => Ok(Self::Svg),
            Some(e) if e.eq_ignore_ascii_case("png") => Ok(Self::Png),
            _ => anyhow::bail!("output '{}' must end in .svg or .png", path.display()),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
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
    }
}

fn open_session(args: &SessionArgs) -> anyhow::Result<ringscope::Playground> {
    let mut cfg = match &args.config {
        Some(path) => ringscope::PlaygroundConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => ringscope::PlaygroundConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    cfg.start |= args.start;

    let size = cfg.size();
    let mut session = ringscope::Playground::new(cfg)?;
    session.resize(size)?;
    Ok(session)
}

struct FrameWriter {
    format: Format,
    rasterizer: Option<ringscope::Rasterizer>,
}

impl FrameWriter {
    fn new(format: Format) -> Self {
        let rasterizer = match format {
            Format::Svg => None,
            Format::Png => Some(ringscope::Rasterizer::new()),
        };
        Self { format, rasterizer }
    }

    fn write(&self, session: &ringscope::Playground, out: &Path) -> anyhow::Result<()> {
        let svg = session.render_svg()?;
        match (self.format, &self.rasterizer) {
            (Format::Png, Some(rasterizer)) => {
                let frame = rasterizer.rasterize(&svg)?;
                ringscope::write_png(out, &frame)?;
            }
            _ => {
                if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create output dir '{}'", parent.display()))?;
                }
                std::fs::write(out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
            }
        }
        Ok(())
    }
}

#[tracing::instrument(skip_all, fields(at_ms = args.at_ms))]
fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let format = Format::from_path(&args.out)?;
    let mut session = open_session(&args.session)?;
    session.advance_to(ringscope::TimeMs(args.at_ms))?;

    FrameWriter::new(format).write(&session, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

#[tracing::instrument(skip_all, fields(duration_ms = args.duration_ms, step_ms = args.step_ms))]
fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if args.step_ms == 0 {
        anyhow::bail!("--step-ms must be > 0");
    }
    let mut session = open_session(&args.session)?;
    let writer = FrameWriter::new(args.format);

    let mut count = 0usize;
    let mut t = 0u64;
    while t <= args.duration_ms {
        session.advance_to(ringscope::TimeMs(t))?;
        let out = args
            .out_dir
            .join(format!("frame_{count:05}.{}", args.format.extension()));
        writer.write(&session, &out)?;
        count += 1;
        t += args.step_ms;
    }

    let status = session.status();
    tracing::info!(frames = count, ticks = status.ticks, "render finished");
    eprintln!("wrote {count} frames to {}", args.out_dir.display());
    Ok(())
}
