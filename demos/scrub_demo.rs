use filmstrip::{FrameSet, FsFrameFetcher, PixelSurface, ScrubPlayer};
use image::{Rgba, RgbaImage};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let root = std::env::temp_dir().join("filmstrip_scrub_demo");
    std::fs::create_dir_all(&root)?;
    for i in 1..=6u32 {
        let shade = (i * 40) as u8;
        let img = RgbaImage::from_pixel(40, 30, Rgba([shade, 0, 255 - shade, 255]));
        img.save(root.join(format!("{i}.png")))?;
    }

    let frames = FrameSet::new(6, "{frame}.png")?;
    let mut player = ScrubPlayer::new(frames);
    player.mount(PixelSurface::new(), 80.0, 60.0, 1.0);

    let mut fetcher = FsFrameFetcher::new(&root);
    player.start(&mut fetcher)?;
    player.on_tick();
    anyhow::ensure!(player.is_ready(), "sequence did not settle");

    for step in 0..=10u32 {
        let progress = f64::from(step) / 10.0;
        player.on_progress(progress);
        player.on_tick();
        println!("progress {progress:.1}: frame {}", player.current_frame().0);
    }

    Ok(())
}
