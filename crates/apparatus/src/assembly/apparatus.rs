use std::collections::HashMap;

use rand::Rng;

use super::types::{Part, PartId};

/// Arena holding every part of one assembly run, with an index from shared id to members.
#[derive(Debug, Clone)]
pub struct Apparatus {
    parts: Vec<Part>,
    by_id: HashMap<u32, Vec<PartId>>,
}

impl Apparatus {
    /// Build the arena. Panics when an id is shared by more than two parts, since mirrored
    /// layouts only ever pair parts.
    pub fn new(parts: Vec<Part>) -> Self {
        let mut by_id: HashMap<u32, Vec<PartId>> = HashMap::new();
        for (idx, part) in parts.iter().enumerate() {
            by_id.entry(part.id).or_default().push(PartId(idx));
        }
        for (id, members) in &by_id {
            assert!(
                members.len() <= 2,
                "id {id} is shared by {} parts, at most a mirrored pair is allowed",
                members.len()
            );
        }
        Self { parts, by_id }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, id: PartId) -> &Part {
        &self.parts[id.0]
    }

    pub fn part_mut(&mut self, id: PartId) -> &mut Part {
        &mut self.parts[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = PartId> + '_ {
        (0..self.parts.len()).map(PartId)
    }

    pub fn parts_mut(&mut self) -> impl Iterator<Item = &mut Part> {
        self.parts.iter_mut()
    }

    /// Every part carrying `id`, in arena order.
    pub fn with_id(&self, id: u32) -> &[PartId] {
        self.by_id.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The mirrored pair `pivot` belongs to (just `pivot` when it has no partner).
    pub fn pair_of(&self, pivot: PartId) -> &[PartId] {
        self.with_id(self.part(pivot).id)
    }

    /// Number of ids shared by two parts.
    pub fn pair_count(&self) -> usize {
        self.by_id.values().filter(|m| m.len() == 2).count()
    }

    /// Reset every part's history to `frames` copies of its starting position.
    pub fn populate(&mut self, frames: usize) {
        for part in &mut self.parts {
            part.reset_path(frames);
        }
    }

    /// Uniformly random part. The arena must not be empty.
    pub fn random_pivot<R: Rng + ?Sized>(&self, rng: &mut R) -> PartId {
        assert!(!self.parts.is_empty(), "cannot pick a pivot from an empty apparatus");
        PartId(rng.random_range(0..self.parts.len()))
    }
}
