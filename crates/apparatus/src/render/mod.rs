pub mod raster;

use eframe::egui;

use crate::assembly::{Apparatus, Position};
use crate::theme::Theme;

/// Maps grid coordinates onto a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub scale: f32,
    /// Pixel position of grid point (0, 0).
    pub origin: egui::Pos2,
}

impl CanvasLayout {
    /// Center a `dims` grid plus a one-cell margin on every side inside `canvas`.
    pub fn centered(canvas: egui::Rect, dims: (i32, i32), scale: f32) -> Self {
        let (xdim, ydim) = dims;
        let offset_x = (canvas.width() - (xdim + 2) as f32 * scale) / 2.0;
        let offset_y = (canvas.height() - (ydim + 2) as f32 * scale) / 2.0;
        Self {
            scale,
            origin: egui::pos2(
                canvas.left() + offset_x + scale,
                canvas.top() + offset_y + scale,
            ),
        }
    }

    pub fn to_screen(&self, pos: Position, w: i32, h: i32) -> egui::Rect {
        egui::Rect::from_min_size(
            self.origin + egui::vec2(pos.x as f32 * self.scale, pos.y as f32 * self.scale),
            egui::vec2(w as f32 * self.scale, h as f32 * self.scale),
        )
    }
}

/// One part, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub rect: egui::Rect,
    pub fill: egui::Color32,
}

/// Screen rectangles of every part at `frame`. Parts whose history ends earlier are skipped.
pub fn frame_sprites(
    apparatus: &Apparatus,
    frame: usize,
    layout: &CanvasLayout,
    theme: &Theme,
) -> Vec<Sprite> {
    apparatus
        .parts()
        .iter()
        .filter_map(|part| {
            let pos = part.position_at(frame)?;
            Some(Sprite {
                rect: layout.to_screen(pos, part.w, part.h),
                fill: part.color.unwrap_or(theme.default_fill),
            })
        })
        .collect()
}

/// Draw a frame with egui: background first, then every part with an outline.
pub fn paint_frame(
    painter: &egui::Painter,
    canvas: egui::Rect,
    sprites: &[Sprite],
    theme: &Theme,
    corner_radius: f32,
) {
    painter.rect_filled(canvas, 0.0, theme.background);
    let stroke = egui::Stroke::new(theme.stroke_weight, theme.stroke);
    for sprite in sprites {
        painter.rect_filled(sprite.rect, corner_radius, sprite.fill);
        painter.rect_stroke(sprite.rect, corner_radius, stroke, egui::StrokeKind::Middle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::Part;

    fn canvas() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 800.0))
    }

    #[test]
    fn grid_is_centered_with_margin() {
        let layout = CanvasLayout::centered(canvas(), (26, 36), 6.0);
        // (800 - 28 * 6) / 2 + 6 = 322, (800 - 38 * 6) / 2 + 6 = 292
        assert_eq!(layout.origin, egui::pos2(322.0, 292.0));
        let far = layout.to_screen(Position::new(26, 36), 0, 0);
        assert_eq!(800.0 - far.min.x, layout.origin.x);
        assert_eq!(800.0 - far.min.y, layout.origin.y);
    }

    #[test]
    fn sprite_uses_recorded_position_and_size() {
        let mut part = Part::new(1, 2, 3, 4, 5, None);
        part.reset_path(2);
        part.path[1] = Position::new(7, 8);
        let apparatus = Apparatus::new(vec![part]);
        let layout = CanvasLayout {
            scale: 10.0,
            origin: egui::Pos2::ZERO,
        };
        let theme = Theme::paper();
        let sprites = frame_sprites(&apparatus, 1, &layout, &theme);
        assert_eq!(
            sprites,
            vec![Sprite {
                rect: egui::Rect::from_min_size(egui::pos2(70.0, 80.0), egui::vec2(40.0, 50.0)),
                fill: theme.default_fill,
            }]
        );
        assert!(frame_sprites(&apparatus, 2, &layout, &theme).is_empty());
    }

    #[test]
    fn sprite_prefers_part_color() {
        let color = egui::Color32::from_rgb(1, 2, 3);
        let mut part = Part::new(1, 0, 0, 1, 1, Some(color));
        part.reset_path(1);
        let apparatus = Apparatus::new(vec![part]);
        let layout = CanvasLayout::centered(canvas(), (1, 1), 6.0);
        let sprites = frame_sprites(&apparatus, 0, &layout, &Theme::paper());
        assert_eq!(sprites[0].fill, color);
    }
}
