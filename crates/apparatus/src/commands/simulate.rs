use colored::Colorize;
use serde::Serialize;

use crate::assembly::{Apparatus, Position, RunSummary, Scheduler};
use crate::config::Settings;
use crate::generator::LayoutGenerator;
use crate::theme::to_hex;

#[derive(Serialize)]
struct RunDump<'a> {
    seed: Option<u64>,
    xdim: i32,
    ydim: i32,
    shuffle_frames: usize,
    final_frame_duration: usize,
    summary: &'a RunSummary,
    /// Frame at which the run switched to asymmetric assembly, if it did.
    flipped_at: Option<usize>,
    parts: Vec<PartDump<'a>>,
}

#[derive(Serialize)]
struct PartDump<'a> {
    id: u32,
    w: i32,
    h: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    path: &'a [Position],
}

/// Assemble one apparatus without a window and report on it.
pub fn run(settings: &Settings, seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let generator = settings.build_generator()?;
    let mut rng = super::seeded_rng(seed);
    let parts = generator.generate(&mut rng);
    if parts.is_empty() {
        anyhow::bail!("The generator produced no parts. Raise initiate_chance or solidness.");
    }
    let mut apparatus = Apparatus::new(parts);
    let mut scheduler = Scheduler::start(settings.assembly.clone(), &mut apparatus, &mut rng);
    let summary = scheduler.run(&mut apparatus, &mut rng);
    let flipped_at = flip_frame(&scheduler);

    if json {
        let dump = RunDump {
            seed,
            xdim: settings.xdim,
            ydim: settings.ydim,
            shuffle_frames: settings.assembly.shuffle_frames,
            final_frame_duration: settings.assembly.final_frame_duration,
            summary: &summary,
            flipped_at,
            parts: apparatus
                .parts()
                .iter()
                .map(|p| PartDump {
                    id: p.id,
                    w: p.w,
                    h: p.h,
                    color: p.color.map(to_hex),
                    path: &p.path,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    print_summary(settings, seed, &apparatus, &summary, flipped_at);
    Ok(())
}

/// The midpoint, when a run that started symmetric ended asymmetric.
fn flip_frame(scheduler: &Scheduler) -> Option<usize> {
    let settings = scheduler.settings();
    if settings.symmetric && !scheduler.state().symmetric {
        settings.midpoint()
    } else {
        None
    }
}

fn print_summary(
    settings: &Settings,
    seed: Option<u64>,
    apparatus: &Apparatus,
    summary: &RunSummary,
    flipped_at: Option<usize>,
) {
    let seed = seed.map_or_else(|| "random".to_string(), |s| s.to_string());
    println!(
        "{} {}x{} {}",
        "Apparatus".bold(),
        settings.xdim,
        settings.ydim,
        format!("(seed {seed})").dimmed()
    );
    println!("  {:<16}{}", "parts", apparatus.len().to_string().cyan());
    println!(
        "  {:<16}{}",
        "mirrored pairs",
        apparatus.pair_count().to_string().cyan()
    );
    println!(
        "  {:<16}{} {}",
        "steps",
        summary.steps.to_string().cyan(),
        format!(
            "({} symmetric, {} asymmetric)",
            summary.symmetric_steps, summary.asymmetric_steps
        )
        .dimmed()
    );
    let mode = match flipped_at {
        Some(frame) => format!("asymmetric from frame {frame}"),
        None if settings.assembly.symmetric => "symmetric throughout".to_string(),
        None => "asymmetric throughout".to_string(),
    };
    println!("  {:<16}{}", "mode", mode.cyan());
    println!(
        "  {:<16}{}",
        "no-op steps",
        summary.noop_steps.to_string().yellow()
    );
    println!(
        "  {:<16}{}",
        "parts shifted",
        summary.shifted_parts.to_string().cyan()
    );
    println!(
        "  {:<16}{}",
        "frames",
        settings.assembly.shuffle_frames.to_string().cyan()
    );
}
