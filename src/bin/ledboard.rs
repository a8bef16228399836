use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ledboard::view::refresh::template_context;
use ledboard::{
    Board, BoardConfig, CompileCtx, Component, PngSequenceSink, View, ViewHandle, ViewRegistry,
    compile_markup, drive, expand,
};

#[derive(Parser, Debug)]
#[command(name = "ledboard", version)]
struct Cli {
    /// Board configuration JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List view types and their configuration schemas.
    Views,
    /// Compile a markup file and render one frame as a PNG.
    Compile(CompileArgs),
    /// Install a view and render its first frame as a PNG.
    Frame(FrameArgs),
    /// Run the animation pipeline and write a PNG sequence.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct ViewSelect {
    /// View type; defaults to the configured startup view.
    #[arg(long)]
    view: Option<String>,

    /// View configuration as `key=value`; repeatable.
    #[arg(long = "set", value_parser = parse_pair)]
    set: Vec<(String, String)>,
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Markup file (may contain template actions).
    #[arg(long)]
    markup: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    select: ViewSelect,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[command(flatten)]
    select: ViewSelect,

    /// Number of frames to pull.
    #[arg(long, default_value_t = 100)]
    frames: usize,

    /// Output directory for `frame_NNNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let k = k.trim();
    if k.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((k.to_owned(), v.to_owned()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(p) => BoardConfig::from_path(p)?,
        None => BoardConfig::default(),
    };
    match cli.cmd {
        Command::Views => cmd_views(),
        Command::Compile(args) => cmd_compile(&config, args),
        Command::Frame(args) => cmd_frame(&config, args),
        Command::Run(args) => cmd_run(&config, args),
    }
}

fn cmd_views() -> anyhow::Result<()> {
    let registry = ViewRegistry::builtin();
    for kind in registry.kinds() {
        let schema = serde_json::to_string_pretty(registry.schema(kind)?)?;
        println!("{kind}\n{schema}");
    }
    Ok(())
}

fn cmd_compile(config: &BoardConfig, args: CompileArgs) -> anyhow::Result<()> {
    let presentation = &config.presentation;
    let src = std::fs::read_to_string(&args.markup)
        .with_context(|| format!("read markup '{}'", args.markup.display()))?;
    let markup = expand(&src, &template_context(presentation, serde_json::Map::new()))?;
    let mut root = compile_markup(&markup, &CompileCtx::new(presentation))?;
    root.init(presentation.canvas.size())?;
    let img = root.render_at(Instant::now())?.fit_to(presentation.canvas.size());
    write_png(&img, &args.out)
}

fn build_view(config: &BoardConfig, select: &ViewSelect) -> anyhow::Result<Arc<dyn View>> {
    let registry = ViewRegistry::builtin();
    let presentation = &config.presentation;
    let view = match (&select.view, &config.view) {
        (Some(kind), _) => registry.create_from_pairs(kind, &select.set, presentation)?,
        (None, Some(startup)) => {
            registry.create(&startup.kind, startup.config.clone(), presentation)?
        }
        (None, None) => anyhow::bail!("no --view given and no startup view configured"),
    };
    Ok(view)
}

fn cmd_frame(config: &BoardConfig, args: FrameArgs) -> anyhow::Result<()> {
    let view = build_view(config, &args.select)?;
    let handle = ViewHandle::new(view, Arc::new(config.presentation.clone()));
    handle.init()?;
    let img = handle.render_frame(Instant::now())?;
    handle.stop();
    write_png(&img, &args.out)
}

fn cmd_run(config: &BoardConfig, args: RunArgs) -> anyhow::Result<()> {
    let board = Board::new(config);
    let view = build_view(config, &args.select)?;
    let generation = board.animation().install(view)?;
    tracing::info!(generation, frames = args.frames, "running");

    let mut sink = PngSequenceSink::new(&args.out_dir);
    drive(board.animation(), &mut sink, args.frames)?;
    board.animation().stop();
    eprintln!("wrote {} frames to {}", sink.written(), args.out_dir.display());
    Ok(())
}

fn write_png(img: &ledboard::Bitmap, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_png(out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
