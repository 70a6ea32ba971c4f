use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::assembly::AssemblySettings;
use crate::generator::{ApparatusGenerator, GeneratorOptions};
use crate::theme::parse_hex_color;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "apparatus";

const VALID_KEYS: &str = "assembly.shuffle_frames, assembly.final_frame_duration, \
    assembly.movement_length, assembly.symmetric, generator.xdim, generator.ydim, \
    generator.solidness, generator.initiate_chance, generator.extension_chance, \
    generator.vertical_chance, generator.roundness, generator.group_size, generator.colors, \
    display.scale, display.frame_rate, display.width, display.height, display.theme";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly: Option<AssemblyConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_frames: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_frame_duration: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_length: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symmetric: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xdim: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ydim: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solidness: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiate_chance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_chance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_chance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roundness: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_size: Option<f64>,

    /// Hex colors, e.g. `#bf5c32`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Pixels per grid unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// Concrete values after applying defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub assembly: AssemblySettings,
    pub xdim: i32,
    pub ydim: i32,
    pub generator: GeneratorOptions,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub scale: f32,
    pub frame_rate: u32,
    pub width: u32,
    pub height: u32,
    pub theme: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            scale: 6.0,
            frame_rate: 30,
            width: 800,
            height: 800,
            theme: "paper".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assembly: AssemblySettings::default(),
            xdim: 26,
            ydim: 36,
            generator: GeneratorOptions::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `apparatus config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Apparatus configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Fill every unset value with its default and check the result.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(a) = &self.assembly {
            let s = &mut settings.assembly;
            s.shuffle_frames = a.shuffle_frames.unwrap_or(s.shuffle_frames);
            s.final_frame_duration = a.final_frame_duration.unwrap_or(s.final_frame_duration);
            s.movement_length = a.movement_length.unwrap_or(s.movement_length);
            s.symmetric = a.symmetric.unwrap_or(s.symmetric);
        }

        if let Some(g) = &self.generator {
            settings.xdim = g.xdim.unwrap_or(settings.xdim);
            settings.ydim = g.ydim.unwrap_or(settings.ydim);
            let o = &mut settings.generator;
            o.solidness = g.solidness.unwrap_or(o.solidness);
            o.initiate_chance = g.initiate_chance.unwrap_or(o.initiate_chance);
            o.extension_chance = g.extension_chance.unwrap_or(o.extension_chance);
            o.vertical_chance = g.vertical_chance.unwrap_or(o.vertical_chance);
            o.roundness = g.roundness.unwrap_or(o.roundness);
            o.group_size = g.group_size.unwrap_or(o.group_size);
            if let Some(colors) = &g.colors {
                o.colors = colors
                    .iter()
                    .map(|c| parse_hex_color(c))
                    .collect::<Result<_>>()?;
            }
        }

        if let Some(d) = &self.display {
            let s = &mut settings.display;
            s.scale = d.scale.unwrap_or(s.scale);
            s.frame_rate = d.frame_rate.unwrap_or(s.frame_rate);
            s.width = d.width.unwrap_or(s.width);
            s.height = d.height.unwrap_or(s.height);
            if let Some(theme) = &d.theme {
                s.theme = theme.clone();
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "assembly.shuffle_frames" => {
                self.assembly_mut().shuffle_frames = Some(parse_positive(key, value)?);
            }
            "assembly.final_frame_duration" => {
                self.assembly_mut().final_frame_duration = Some(parse_value(key, value)?);
            }
            "assembly.movement_length" => {
                self.assembly_mut().movement_length = Some(parse_probability(key, value)?);
            }
            "assembly.symmetric" => {
                self.assembly_mut().symmetric = Some(parse_value(key, value)?);
            }
            "generator.xdim" => self.generator_mut().xdim = Some(parse_positive(key, value)?),
            "generator.ydim" => self.generator_mut().ydim = Some(parse_positive(key, value)?),
            "generator.solidness" => {
                self.generator_mut().solidness = Some(parse_probability(key, value)?);
            }
            "generator.initiate_chance" => {
                self.generator_mut().initiate_chance = Some(parse_probability(key, value)?);
            }
            "generator.extension_chance" => {
                self.generator_mut().extension_chance = Some(parse_probability(key, value)?);
            }
            "generator.vertical_chance" => {
                self.generator_mut().vertical_chance = Some(parse_probability(key, value)?);
            }
            "generator.group_size" => {
                self.generator_mut().group_size = Some(parse_probability(key, value)?);
            }
            "generator.roundness" => {
                let roundness: f32 = parse_value(key, value)?;
                if roundness < 0.0 {
                    anyhow::bail!("Invalid {key}: {value}. Must not be negative.");
                }
                self.generator_mut().roundness = Some(roundness);
            }
            "generator.colors" => {
                let colors: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
                for color in &colors {
                    parse_hex_color(color)?;
                }
                self.generator_mut().colors = Some(colors);
            }
            "display.scale" => {
                let scale: f32 = parse_value(key, value)?;
                if scale <= 0.0 {
                    anyhow::bail!("Invalid {key}: {value}. Must be positive.");
                }
                self.display_mut().scale = Some(scale);
            }
            "display.frame_rate" => {
                self.display_mut().frame_rate = Some(parse_positive(key, value)?);
            }
            "display.width" => self.display_mut().width = Some(parse_positive(key, value)?),
            "display.height" => self.display_mut().height = Some(parse_positive(key, value)?),
            "display.theme" => {
                match value {
                    "paper" | "blueprint" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'paper' or 'blueprint'."),
                }
                self.display_mut().theme = Some(value.to_string());
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }

    fn assembly_mut(&mut self) -> &mut AssemblyConfig {
        self.assembly.get_or_insert_with(AssemblyConfig::default)
    }

    fn generator_mut(&mut self) -> &mut GeneratorConfig {
        self.generator.get_or_insert_with(GeneratorConfig::default)
    }

    fn display_mut(&mut self) -> &mut DisplayConfig {
        self.display.get_or_insert_with(DisplayConfig::default)
    }
}

impl Settings {
    pub fn build_generator(&self) -> Result<ApparatusGenerator> {
        ApparatusGenerator::new(self.xdim, self.ydim, self.generator.clone())
    }

    pub fn validate(&self) -> Result<()> {
        let a = &self.assembly;
        if a.shuffle_frames == 0 {
            anyhow::bail!("Invalid shuffle_frames: must be positive.");
        }
        if a.final_frame_duration > a.shuffle_frames {
            anyhow::bail!(
                "final_frame_duration ({}) must not exceed shuffle_frames ({}).",
                a.final_frame_duration,
                a.shuffle_frames
            );
        }
        if !(0.0..=1.0).contains(&a.movement_length) {
            anyhow::bail!(
                "Invalid movement_length: {}. Must be between 0 and 1.",
                a.movement_length
            );
        }
        if self.xdim <= 0 || self.ydim <= 0 {
            anyhow::bail!("Invalid grid size {}x{}.", self.xdim, self.ydim);
        }
        self.generator.validate()?;
        if self.display.scale <= 0.0 || self.display.frame_rate == 0 {
            anyhow::bail!("Display scale and frame rate must be positive.");
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .ok()
        .with_context(|| format!("Invalid {key}: {value}."))
}

fn parse_positive<T: FromStr + PartialOrd + Default>(key: &str, value: &str) -> Result<T> {
    let parsed: T = parse_value(key, value)?;
    if parsed <= T::default() {
        anyhow::bail!("Invalid {key}: {value}. Must be positive.");
    }
    Ok(parsed)
}

fn parse_probability(key: &str, value: &str) -> Result<f64> {
    let parsed: f64 = parse_value(key, value)?;
    if !(0.0..=1.0).contains(&parsed) {
        anyhow::bail!("Invalid {key}: {value}. Must be between 0 and 1.");
    }
    Ok(parsed)
}
