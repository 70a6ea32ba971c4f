use std::path::PathBuf;

use eframe::egui;
use rayon::prelude::*;

use crate::config::Settings;
use crate::generator::LayoutGenerator;
use crate::render::raster::{rasterize_frame, save_image};
use crate::render::{CanvasLayout, frame_sprites};
use crate::session::Session;
use crate::theme::Theme;

/// File name of the `index`-th displayed frame of run `run`.
pub fn frame_file_name(run: usize, index: usize) -> String {
    format!("frame-{run:03}-{index:04}.png")
}

/// Write every playback frame of `runs` assembly runs as PNG images, in display order.
pub fn run(
    settings: &Settings,
    output_dir: PathBuf,
    seed: Option<u64>,
    runs: usize,
) -> anyhow::Result<()> {
    if runs == 0 {
        anyhow::bail!("Nothing to export: --runs must be at least 1.");
    }
    let generator = settings.build_generator()?;
    let display = &settings.display;
    let theme = Theme::from_name(&display.theme);
    let canvas = egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(display.width as f32, display.height as f32),
    );
    let layout = CanvasLayout::centered(canvas, generator.dimensions(), display.scale);
    let frames = settings.assembly.shuffle_frames;

    std::fs::create_dir_all(&output_dir)?;
    eprintln!(
        "Exporting {} run(s) of {} frames to {} ({}x{})",
        runs,
        frames,
        output_dir.display(),
        display.width,
        display.height,
    );

    let mut session = Session::new(generator, super::seeded_rng(seed), settings.assembly.clone());
    for run in 0..runs {
        if run > 0 {
            session.regenerate();
        }
        let apparatus = session.apparatus();
        tracing::debug!(run, parts = apparatus.len(), "rendering run");

        (0..frames).into_par_iter().try_for_each(|index| {
            // Playback runs from the last recorded frame back to the first.
            let frame = frames - index - 1;
            let sprites = frame_sprites(apparatus, frame, &layout, &theme);
            let image = rasterize_frame(display.width, display.height, &sprites, &theme);
            save_image(&image, &output_dir.join(frame_file_name(run, index)))
        })?;
        eprintln!("  Saved run {}", run + 1);
    }

    eprintln!("Export complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn small_settings() -> Settings {
        let mut config = Config::default();
        for (key, value) in [
            ("generator.xdim", "6"),
            ("generator.ydim", "5"),
            ("assembly.shuffle_frames", "6"),
            ("assembly.final_frame_duration", "2"),
            ("display.width", "64"),
            ("display.height", "48"),
            ("display.scale", "4"),
        ] {
            config.set(key, value).unwrap();
        }
        config.resolve().unwrap()
    }

    #[test]
    fn writes_every_frame_of_every_run() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frames");
        run(&small_settings(), out.clone(), Some(3), 2).unwrap();

        let mut names: Vec<String> = std::fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names.len(), 12);
        assert_eq!(names.first().unwrap(), &frame_file_name(0, 0));
        assert_eq!(names.last().unwrap(), &frame_file_name(1, 5));

        let image = image::open(out.join(frame_file_name(1, 3))).unwrap();
        assert_eq!((image.width(), image.height()), (64, 48));
    }

    #[test]
    fn zero_runs_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&small_settings(), dir.path().to_path_buf(), Some(1), 0).is_err());
    }
}
