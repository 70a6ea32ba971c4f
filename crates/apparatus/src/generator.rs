use anyhow::Result;
use eframe::egui::Color32;
use rand::Rng;
use tracing::debug;

use crate::assembly::{Bounds, Part};

/// Produces the starting layout of an assembly run.
pub trait LayoutGenerator {
    /// Grid size `(xdim, ydim)` the layout fits in.
    fn dimensions(&self) -> (i32, i32);

    /// A fresh set of non-overlapping parts. Mirrored pairs share an id.
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Part>;
}

/// Structural knobs of [`ApparatusGenerator`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Chance that a cell left empty by the growth pass is filled with a single-cell part.
    pub solidness: f64,
    /// Chance that a part is started at an empty cell.
    pub initiate_chance: f64,
    /// Chance of growing a part by one more row or column.
    pub extension_chance: f64,
    /// Chance that a part grows vertically first.
    pub vertical_chance: f64,
    /// Corner rounding, in grid units, applied when drawing.
    pub roundness: f32,
    /// Chance that a part takes the previous part's color.
    pub group_size: f64,
    pub colors: Vec<Color32>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            solidness: 0.5,
            initiate_chance: 0.9,
            extension_chance: 0.86,
            vertical_chance: 0.5,
            roundness: 0.0,
            group_size: 0.82,
            colors: crate::theme::default_palette(),
        }
    }
}

impl GeneratorOptions {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("solidness", self.solidness),
            ("initiate_chance", self.initiate_chance),
            ("extension_chance", self.extension_chance),
            ("vertical_chance", self.vertical_chance),
            ("group_size", self.group_size),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("Invalid {name}: {value}. Must be between 0 and 1.");
            }
        }
        if self.roundness < 0.0 {
            anyhow::bail!("Invalid roundness: {}. Must not be negative.", self.roundness);
        }
        Ok(())
    }
}

/// Mirror-symmetric rectangle layout grown on the left half of the grid.
#[derive(Debug, Clone)]
pub struct ApparatusGenerator {
    xdim: i32,
    ydim: i32,
    options: GeneratorOptions,
}

impl ApparatusGenerator {
    pub fn new(xdim: i32, ydim: i32, options: GeneratorOptions) -> Result<Self> {
        if xdim <= 0 || ydim <= 0 {
            anyhow::bail!("Invalid grid size {xdim}x{ydim}. Both dimensions must be positive.");
        }
        options.validate()?;
        Ok(Self {
            xdim,
            ydim,
            options,
        })
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Columns grown before mirroring. An odd width shares its middle column.
    fn half_width(&self) -> i32 {
        (self.xdim + 1) / 2
    }

    /// Grow rectangles on the half grid, returned in creation order.
    fn grow<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Bounds> {
        let mut grid = HalfGrid::new(self.half_width(), self.ydim);
        let mut rects = Vec::new();

        for y in 0..self.ydim {
            for x in 0..grid.width {
                if grid.is_taken(x, y) || rng.random::<f64>() >= self.options.initiate_chance {
                    continue;
                }
                let rect = self.extend(&grid, Bounds::new(x, y, x + 1, y + 1), rng);
                grid.claim(&rect);
                rects.push(rect);
            }
        }

        for y in 0..self.ydim {
            for x in 0..grid.width {
                if !grid.is_taken(x, y) && rng.random::<f64>() < self.options.solidness {
                    let rect = Bounds::new(x, y, x + 1, y + 1);
                    grid.claim(&rect);
                    rects.push(rect);
                }
            }
        }
        rects
    }

    fn extend<R: Rng + ?Sized>(&self, grid: &HalfGrid, mut rect: Bounds, rng: &mut R) -> Bounds {
        let vertical_first = rng.random::<f64>() < self.options.vertical_chance;
        for vertical in [vertical_first, !vertical_first] {
            loop {
                let grown = if vertical {
                    Bounds { y2: rect.y2 + 1, ..rect }
                } else {
                    Bounds { x2: rect.x2 + 1, ..rect }
                };
                if !grid.is_free(&grown, &rect)
                    || rng.random::<f64>() >= self.options.extension_chance
                {
                    break;
                }
                rect = grown;
            }
        }
        rect
    }

    fn pick_color<R: Rng + ?Sized>(&self, previous: Option<Color32>, rng: &mut R) -> Option<Color32> {
        let colors = &self.options.colors;
        if colors.is_empty() {
            return None;
        }
        match previous {
            Some(color) if rng.random::<f64>() < self.options.group_size => Some(color),
            _ => Some(colors[rng.random_range(0..colors.len())]),
        }
    }
}

impl LayoutGenerator for ApparatusGenerator {
    fn dimensions(&self) -> (i32, i32) {
        (self.xdim, self.ydim)
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Part> {
        let half = self.half_width();
        let mut parts = Vec::new();
        let mut color = None;

        for (idx, rect) in self.grow(rng).into_iter().enumerate() {
            let id = idx as u32;
            color = self.pick_color(color, rng);
            let (w, h) = (rect.width(), rect.height());
            if rect.x2 == half {
                // Touches the symmetry axis: merge with its mirror image.
                let merged_w = self.xdim - 2 * rect.x1;
                parts.push(Part::new(id, rect.x1, rect.y1, merged_w, h, color));
            } else {
                parts.push(Part::new(id, rect.x1, rect.y1, w, h, color));
                parts.push(Part::new(id, self.xdim - rect.x2, rect.y1, w, h, color));
            }
        }

        debug!(
            xdim = self.xdim,
            ydim = self.ydim,
            parts = parts.len(),
            "generated apparatus layout"
        );
        parts
    }
}

/// Occupancy of the half grid during growth.
struct HalfGrid {
    width: i32,
    height: i32,
    taken: Vec<bool>,
}

impl HalfGrid {
    fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            taken: vec![false; (width * height) as usize],
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    fn is_taken(&self, x: i32, y: i32) -> bool {
        self.taken[self.index(x, y)]
    }

    /// Whether every cell of `grown` outside `current` is in bounds and empty.
    fn is_free(&self, grown: &Bounds, current: &Bounds) -> bool {
        if grown.x2 > self.width || grown.y2 > self.height {
            return false;
        }
        (grown.y1..grown.y2).all(|y| {
            (grown.x1..grown.x2).all(|x| {
                (x < current.x2 && y < current.y2) || !self.is_taken(x, y)
            })
        })
    }

    fn claim(&mut self, rect: &Bounds) {
        for y in rect.y1..rect.y2 {
            for x in rect.x1..rect.x2 {
                let idx = self.index(x, y);
                self.taken[idx] = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn generate(xdim: i32, ydim: i32, seed: u64) -> Vec<Part> {
        ApparatusGenerator::new(xdim, ydim, GeneratorOptions::default())
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn parts_stay_inside_the_grid() {
        for seed in 0..20 {
            for p in generate(26, 36, seed) {
                assert!(p.bounds.x1 >= 0 && p.bounds.x2 <= 26, "{:?}", p.bounds);
                assert!(p.bounds.y1 >= 0 && p.bounds.y2 <= 36, "{:?}", p.bounds);
                assert!(p.w > 0 && p.h > 0);
            }
        }
    }

    #[test]
    fn parts_never_overlap() {
        for (xdim, seed) in [(26, 1), (25, 2), (7, 3), (1, 4)] {
            let parts = generate(xdim, 20, seed);
            for (i, a) in parts.iter().enumerate() {
                for b in &parts[i + 1..] {
                    assert!(!a.bounds.overlaps(&b.bounds), "{:?} vs {:?}", a.bounds, b.bounds);
                }
            }
        }
    }

    #[test]
    fn pairs_mirror_each_other() {
        let parts = generate(26, 36, 7);
        let mut by_id: HashMap<u32, Vec<&Part>> = HashMap::new();
        for p in &parts {
            by_id.entry(p.id).or_default().push(p);
        }
        for members in by_id.values() {
            match members.as_slice() {
                [single] => assert_eq!(single.bounds.x1 + single.bounds.x2, 26),
                [left, right] => {
                    assert_eq!(left.bounds.x1, 26 - right.bounds.x2);
                    assert_eq!(left.bounds.y1, right.bounds.y1);
                    assert_eq!((left.w, left.h), (right.w, right.h));
                    assert_eq!(left.color, right.color);
                    assert!(left.bounds.x2 <= 13);
                }
                other => panic!("id shared by {} parts", other.len()),
            }
        }
    }

    #[test]
    fn full_solidness_leaves_no_gaps() {
        let options = GeneratorOptions {
            solidness: 1.0,
            ..GeneratorOptions::default()
        };
        let generator = ApparatusGenerator::new(10, 8, options).unwrap();
        let parts = generator.generate(&mut StdRng::seed_from_u64(5));
        let area: i32 = parts.iter().map(|p| p.w * p.h).sum();
        assert_eq!(area, 80);
    }

    #[test]
    fn zero_chances_produce_nothing() {
        let options = GeneratorOptions {
            solidness: 0.0,
            initiate_chance: 0.0,
            ..GeneratorOptions::default()
        };
        let generator = ApparatusGenerator::new(10, 8, options).unwrap();
        assert!(generator.generate(&mut StdRng::seed_from_u64(5)).is_empty());
    }

    #[test]
    fn empty_palette_leaves_parts_uncolored() {
        let options = GeneratorOptions {
            colors: Vec::new(),
            ..GeneratorOptions::default()
        };
        let generator = ApparatusGenerator::new(8, 8, options).unwrap();
        let parts = generator.generate(&mut StdRng::seed_from_u64(5));
        assert!(parts.iter().all(|p| p.color.is_none()));
    }

    #[test]
    fn invalid_options_are_rejected() {
        assert!(ApparatusGenerator::new(0, 10, GeneratorOptions::default()).is_err());
        let options = GeneratorOptions {
            extension_chance: 1.5,
            ..GeneratorOptions::default()
        };
        let err = ApparatusGenerator::new(10, 10, options).unwrap_err();
        assert!(err.to_string().contains("extension_chance"));
    }
}
