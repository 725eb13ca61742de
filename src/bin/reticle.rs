use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reticle", version)]
struct Cli {
    /// Log debug output (cache hits, skipped elements) to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the computed rectangle layout as JSON.
    Layout(ViewArgs),
    /// Print the overlay draw list as JSON.
    Plan(ViewArgs),
    /// Render the overlay as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct ViewArgs {
    /// Input reticle config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport width in pixels.
    #[arg(long)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long)]
    height: u32,

    /// Optional dynamic-text context JSON (frame, show, shot, ...).
    #[arg(long)]
    context: Option<PathBuf>,

    /// Current frame; overrides the context file.
    #[arg(long)]
    frame: Option<f64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Draw over an opaque background instead of transparency.
    #[arg(long)]
    opaque: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<reticle::ReticleConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let config: reticle::ReticleConfig = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse config JSON '{}'", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn read_context(args: &ViewArgs) -> anyhow::Result<reticle::TextContext> {
    let mut ctx = match &args.context {
        Some(path) => {
            let f =
                File::open(path).with_context(|| format!("open context '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse context JSON '{}'", path.display()))?
        }
        None => reticle::TextContext::default(),
    };
    if let Some(frame) = args.frame {
        ctx.frame = frame;
    }
    Ok(ctx)
}

fn viewport(args: &ViewArgs) -> anyhow::Result<reticle::Viewport> {
    let vp = reticle::Viewport::new(args.width, args.height);
    if vp.is_empty() {
        anyhow::bail!("viewport must be at least 1x1, got {}x{}", args.width, args.height);
    }
    Ok(vp)
}

fn report(out: &reticle::FrameOutput) {
    if let Some(o) = &out.camera_override {
        let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_owned(), |v| format!("{v:.4}"));
        eprintln!(
            "camera override: {} horizontal={} vertical={}",
            o.camera,
            fmt(o.horizontal),
            fmt(o.vertical)
        );
    }
    for issue in &out.plan.issues {
        eprintln!("skipped {}: {}", issue.element, issue.message);
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("serialize output JSON")?;
    writeln!(stdout).context("write stdout")?;
    Ok(())
}

fn cmd_layout(args: ViewArgs) -> anyhow::Result<()> {
    let config = read_config_json(&args.in_path)?;
    let layout = reticle::compute_layout(&config, viewport(&args)?);
    for issue in &layout.issues {
        eprintln!("skipped {}: {}", issue.element, issue.message);
    }
    print_json(&layout)
}

fn cmd_plan(args: ViewArgs) -> anyhow::Result<()> {
    let config = read_config_json(&args.in_path)?;
    let ctx = read_context(&args)?;
    let out = reticle::ReticleSession::new().draw(&config, viewport(&args)?, &ctx);
    report(&out);
    print_json(&out.plan)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_config_json(&args.view.in_path)?;
    let ctx = read_context(&args.view)?;

    let settings = reticle::RenderSettings {
        clear_rgba: args.opaque.then_some([18, 20, 28, 255]),
    };
    let mut backend = reticle::CpuOverlayBackend::new(settings);
    let (out, frame) = reticle::ReticleSession::new().render(
        &config,
        viewport(&args.view)?,
        &ctx,
        &mut backend,
    )?;
    report(&out);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
