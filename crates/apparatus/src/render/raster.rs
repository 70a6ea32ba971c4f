use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui;
use image::{Rgba, RgbaImage};

use super::Sprite;
use crate::theme::Theme;

/// Software rendering of a frame, matching [`paint_frame`](super::paint_frame) with square
/// corners. Sprites are drawn in order; the outline straddles each edge.
pub fn rasterize_frame(width: u32, height: u32, sprites: &[Sprite], theme: &Theme) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, rgba(theme.background));
    let half = theme.stroke_weight / 2.0;
    let stroke = rgba(theme.stroke);

    for sprite in sprites {
        let outer = sprite.rect.expand(half);
        let inner = sprite.rect.shrink(half);
        let fill = rgba(sprite.fill);

        let x_range = pixel_span(outer.min.x, outer.max.x, width);
        let y_range = pixel_span(outer.min.y, outer.max.y, height);
        for py in y_range {
            for px in x_range.clone() {
                let center = egui::pos2(px as f32 + 0.5, py as f32 + 0.5);
                if !outer.contains(center) {
                    continue;
                }
                let color = if half > 0.0 && !inner.contains(center) {
                    stroke
                } else if sprite.rect.contains(center) {
                    fill
                } else {
                    continue;
                };
                image.put_pixel(px, py, color);
            }
        }
    }
    image
}

/// Pixel indices whose centers may fall inside `[min, max]`, clipped to the image.
fn pixel_span(min: f32, max: f32, limit: u32) -> std::ops::Range<u32> {
    let start = min.floor().max(0.0) as u32;
    let end = (max.ceil().max(0.0) as u32).min(limit);
    start.min(end)..end
}

fn rgba(color: egui::Color32) -> Rgba<u8> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba([r, g, b, a])
}

pub fn save_image(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))
}

/// Write an egui screenshot as PNG.
pub fn save_color_image(image: &egui::ColorImage, path: &Path) -> Result<()> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
        .collect();

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to save {}", path.display()))
}
