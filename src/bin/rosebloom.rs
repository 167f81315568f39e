use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rosebloom", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the bouquet at one moment after the start as a PNG.
    Frame(FrameArgs),
    /// Render the whole animation as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Configuration JSON; defaults apply to anything it omits.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the layout seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Size the canvas for a viewport, e.g. `1280x800` (90% of the width up to 1000px,
    /// 70% of the height up to 600px). `--width`/`--height` still win.
    #[arg(long, value_name = "WxH", value_parser = parse_viewport)]
    viewport: Option<(f64, f64)>,

    /// Override canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Override canvas height.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Milliseconds since the animation started.
    #[arg(long, default_value_t = 4000.0)]
    at_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Override the animation length.
    #[arg(long)]
    duration_ms: Option<f64>,

    /// Override frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Config => cmd_config(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_config(args: &SceneArgs) -> anyhow::Result<rosebloom::BloomConfig> {
    let mut cfg = match &args.config {
        Some(path) => rosebloom::BloomConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => rosebloom::BloomConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some((w, h)) = args.viewport {
        cfg.canvas = rosebloom::Canvas::fit_viewport(w, h);
    }
    if let Some(w) = args.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = args.height {
        cfg.canvas.height = h;
    }
    Ok(cfg)
}

fn parse_viewport(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let side = |v: &str| match v.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(format!("invalid viewport side '{v}'")),
    };
    Ok((side(w)?, side(h)?))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let mut backend = rosebloom::create_backend(rosebloom::BackendKind::Cpu);
    let frame = rosebloom::render_still(&cfg, args.at_ms, backend.as_mut())?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.scene)?;
    if let Some(d) = args.duration_ms {
        cfg.duration_ms = d;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    let mut backend = rosebloom::create_backend(rosebloom::BackendKind::Cpu);
    let stats = rosebloom::render_to_mp4(&cfg, &args.out, !args.no_overwrite, backend.as_mut())?;
    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        stats.frames_rendered
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    println!("{}", rosebloom::BloomConfig::default().to_json_pretty()?);
    Ok(())
}

fn write_png(path: &Path, frame: &rosebloom::FrameRGBA) -> anyhow::Result<()> {
    rosebloom::ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
