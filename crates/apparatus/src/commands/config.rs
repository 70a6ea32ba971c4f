use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{Config, Settings};
use crate::theme::to_hex;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let settings = config.resolve()?;
    match Config::path() {
        Ok(path) if path.exists() => println!("{} {}", "Config:".bold(), path.display()),
        Ok(path) => println!(
            "{} {} {}",
            "Config:".bold(),
            path.display(),
            "(not created, showing defaults)".dimmed()
        ),
        Err(e) => println!("{} {}", "Config:".bold(), e.to_string().yellow()),
    }
    print_settings(&settings);
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    // Reject combinations that only fail together, e.g. an idle window longer than the run.
    config.resolve()?;
    let path = config.save()?;
    println!(
        "{} {} = {} {}",
        "Set".green().bold(),
        key,
        value.cyan(),
        format!("({})", path.display()).dimmed()
    );
    Ok(())
}

fn print_settings(settings: &Settings) {
    let a = &settings.assembly;
    let g = &settings.generator;
    let d = &settings.display;
    let colors: Vec<String> = g.colors.iter().copied().map(to_hex).collect();

    println!("\n{}", "assembly".bold());
    row("shuffle_frames", a.shuffle_frames);
    row("final_frame_duration", a.final_frame_duration);
    row("movement_length", a.movement_length);
    row("symmetric", a.symmetric);

    println!("\n{}", "generator".bold());
    row("xdim", settings.xdim);
    row("ydim", settings.ydim);
    row("solidness", g.solidness);
    row("initiate_chance", g.initiate_chance);
    row("extension_chance", g.extension_chance);
    row("vertical_chance", g.vertical_chance);
    row("roundness", g.roundness);
    row("group_size", g.group_size);
    row("colors", colors.join(", "));

    println!("\n{}", "display".bold());
    row("scale", d.scale);
    row("frame_rate", d.frame_rate);
    row("width", d.width);
    row("height", d.height);
    row("theme", &d.theme);
}

fn row(key: &str, value: impl std::fmt::Display) {
    println!("  {:<22}{}", key, value.to_string().cyan());
}
