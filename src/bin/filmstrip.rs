use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use filmstrip::{FrameSet, FsFrameFetcher, PixelSurface, ScrubPlayer};

#[derive(Parser, Debug)]
#[command(name = "filmstrip", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite the frame for one progress value as a PNG.
    Frame(FrameArgs),
    /// Sweep progress 0..=1 and write one PNG per step (a scrubbed sequence).
    Scrub(ScrubArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input sequence manifest JSON ({"count": N, "template": "frames/{frame}.jpg"}).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Progress value, conceptually in 0..=1 (out-of-range values clamp).
    #[arg(long)]
    progress: f64,

    /// Logical surface width.
    #[arg(long)]
    width: f64,

    /// Logical surface height.
    #[arg(long)]
    height: f64,

    /// Device pixel-density ratio.
    #[arg(long, default_value_t = 1.0)]
    ratio: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    /// Input sequence manifest JSON ({"count": N, "template": "frames/{frame}.jpg"}).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of progress steps across 0..=1.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Logical surface width.
    #[arg(long)]
    width: f64,

    /// Logical surface height.
    #[arg(long)]
    height: f64,

    /// Device pixel-density ratio.
    #[arg(long, default_value_t = 1.0)]
    ratio: f64,

    /// Output directory for step_<i>.png files.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Scrub(args) => cmd_scrub(args),
    }
}

fn read_frame_set(path: &Path) -> anyhow::Result<FrameSet> {
    let f = File::open(path).with_context(|| format!("open manifest '{}'", path.display()))?;
    let r = BufReader::new(f);
    let frames: FrameSet = serde_json::from_reader(r).with_context(|| "parse manifest JSON")?;
    Ok(frames)
}

fn loaded_player(
    manifest: &Path,
    width: f64,
    height: f64,
    ratio: f64,
) -> anyhow::Result<ScrubPlayer<PixelSurface>> {
    let frames = read_frame_set(manifest)?;
    let assets_root = manifest.parent().unwrap_or_else(|| Path::new("."));

    let mut player = ScrubPlayer::new(frames);
    player.mount(PixelSurface::new(), width, height, ratio);

    let mut fetcher = FsFrameFetcher::new(assets_root);
    player.start(&mut fetcher)?;
    // The fs fetcher settles synchronously; one tick consolidates readiness.
    player.on_tick();
    anyhow::ensure!(player.is_ready(), "sequence did not settle");
    Ok(player)
}

fn save_surface(player: &ScrubPlayer<PixelSurface>, out: &Path) -> anyhow::Result<()> {
    let surface = player
        .surface()
        .ok_or_else(|| anyhow::anyhow!("player has no mounted surface"))?;
    surface
        .to_rgba_image()
        .save(out)
        .with_context(|| format!("write PNG '{}'", out.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut player = loaded_player(&args.in_path, args.width, args.height, args.ratio)?;
    player.on_progress(args.progress);
    player.on_tick();
    save_surface(&player, &args.out)?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.steps >= 1, "--steps must be >= 1");
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create out dir '{}'", args.out_dir.display()))?;

    let mut player = loaded_player(&args.in_path, args.width, args.height, args.ratio)?;
    for step in 0..=args.steps {
        let progress = f64::from(step) / f64::from(args.steps);
        player.on_progress(progress);
        player.on_tick();
        let out = args.out_dir.join(format!("step_{step}.png"));
        save_surface(&player, &out)?;
    }
    println!(
        "wrote {} frames to {}",
        args.steps + 1,
        args.out_dir.display()
    );
    Ok(())
}
