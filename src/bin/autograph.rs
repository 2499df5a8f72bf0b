use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "autograph", version)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a signature and save it as a PNG.
    Sign(SignArgs),
    /// Pick a signature style and print it as JSON.
    Style(StyleArgs),
    /// List the font families found in a directory.
    Fonts(FontsArgs),
}

#[derive(Parser, Debug)]
struct SignArgs {
    /// Name to sign.
    #[arg(long)]
    name: String,

    /// Directory containing `.ttf` / `.otf` files (overrides the config).
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Output PNG path; defaults to `signature-<name>.png` in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Seed for style selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Wait out the animation timing instead of finishing instantly.
    #[arg(long)]
    realtime: bool,

    /// Also write every animation frame as `frame_NNNNN.png` into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Rasterize captured frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StyleArgs {
    /// Name to style.
    #[arg(long)]
    name: String,

    /// Seed for style selection.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FontsArgs {
    /// Directory containing `.ttf` / `.otf` files.
    #[arg(long)]
    fonts: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Sign(args) => cmd_sign(args),
        Command::Style(args) => cmd_style(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "autograph=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<autograph::SignatureConfig> {
    match path {
        Some(p) => autograph::SignatureConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(autograph::SignatureConfig::default()),
    }
}

fn load_fonts(dir: &Path, fallback: Option<&str>) -> anyhow::Result<autograph::FontBook> {
    let mut book = autograph::FontBook::load_dir(dir)
        .with_context(|| format!("load fonts from '{}'", dir.display()))?;
    if book.is_empty() {
        anyhow::bail!("no .ttf/.otf fonts found in '{}'", dir.display());
    }
    if let Some(f) = fallback {
        book = book.with_fallback(f);
    }
    Ok(book)
}

fn log_event(event: &autograph::RenderEvent) {
    match event {
        autograph::RenderEvent::Started { text, style, total } => tracing::info!(
            name = %text,
            font = %style.font,
            ink = %style.ink.hex(),
            total_ms = total.as_millis() as u64,
            "signing"
        ),
        autograph::RenderEvent::CharacterRevealed { index, ch, .. } => {
            tracing::debug!(index, %ch, "character revealed")
        }
        autograph::RenderEvent::Cancelled { elapsed } => {
            tracing::warn!(elapsed_ms = elapsed.as_millis() as u64, "signing cancelled")
        }
        _ => {}
    }
}

fn cmd_sign(args: SignArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(dir) = args.fonts {
        cfg.fonts_dir = Some(dir);
    }
    cfg.validate()?;

    let fonts_dir = cfg
        .fonts_dir
        .clone()
        .context("a font directory is required (--fonts or \"fonts_dir\" in the config)")?;
    let book = Arc::new(load_fonts(&fonts_dir, cfg.fallback_family.as_deref())?);

    let mut observer = autograph::FnObserver(log_event);
    let mut pad = autograph::SignaturePad::from_config(
        &cfg,
        autograph::TextShaper::new(book.clone()),
        make_rng(cfg.seed),
    )?;

    let style = match pad.generate(&args.name, &mut observer) {
        autograph::GenerateOutcome::Started(style) => style,
        autograph::GenerateOutcome::Rejected => anyhow::bail!("name must not be blank"),
        autograph::GenerateOutcome::Ignored => anyhow::bail!("a signature is already animating"),
    };

    if let Some(frames_dir) = &args.frames_dir {
        let request = pad
            .active()
            .map(|a| a.request().clone())
            .context("no active signature to capture")?;
        let mut animation =
            autograph::SignatureAnimation::new(request, style, cfg.timing, cfg.flourish);
        let capture = autograph::FrameCapture::new(cfg.canvas, book.clone()).with_threading(
            autograph::CaptureThreading {
                parallel: args.parallel,
                threads: args.threads,
            },
        );
        let mut sink = autograph::PngSequenceSink::new(frames_dir);
        let (_, stats) = capture
            .capture(&mut animation, &mut autograph::NoopObserver, &mut sink)
            .with_context(|| format!("capture frames into '{}'", frames_dir.display()))?;
        eprintln!(
            "wrote {} frames to {}",
            stats.frames_total,
            frames_dir.display()
        );
    }

    let summary = if args.realtime {
        pad.run(&mut autograph::SystemClock::new(), &mut observer)
    } else {
        pad.run(&mut autograph::VirtualClock::new(), &mut observer)
    }
    .context("signature animation did not start")?;
    tracing::debug!(?summary, "animation finished");

    let mut raster = autograph::CpuRasterizer::new(book);
    let out = match args.out {
        Some(path) => {
            pad.export_png_to(&mut raster, &path)?;
            path
        }
        None => pad.export_png(&mut raster, Path::new("."))?,
    };

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_style(args: StyleArgs) -> anyhow::Result<()> {
    let request = autograph::RenderRequest::new(&args.name).context("name must not be blank")?;
    let style = autograph::select_style(&request, &mut make_rng(args.seed));
    let json = serde_json::to_string_pretty(&style).context("serialize style")?;
    println!("{json}");
    Ok(())
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let book = autograph::FontBook::load_dir(&args.fonts)
        .with_context(|| format!("load fonts from '{}'", args.fonts.display()))?;
    if book.is_empty() {
        eprintln!("no fonts found in {}", args.fonts.display());
        return Ok(());
    }

    for face in book.faces() {
        println!("{}:", face.family());
        if let Some(src) = face.source() {
            println!("  source: {}", src.display());
        }
        println!("  sha256: {}", sha256_hex(face.bytes()));
        let known = autograph::SignatureFont::ALL
            .iter()
            .any(|f| f.family_name().eq_ignore_ascii_case(face.family()));
        println!("  palette: {}", if known { "yes" } else { "no" });
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
