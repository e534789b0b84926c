//! Initial tag placement by rejection sampling
//!
//! Each tag draws candidate corners uniformly inside the container until one
//! clears every tag placed before it (with `padding` to spare). The try budget
//! is a hard ceiling: when it runs out the last candidate is kept and the tag
//! may overlap a neighbour.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Item;
use crate::geometry::{Aabb, Container, Size, overlaps_with_gap};
use crate::labels::PillMetrics;

/// Uniform random numbers for placement.
///
/// Implemented for every `rand::Rng`, so a seeded `Pcg32` makes layouts
/// reproducible.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[min, max)`
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_unit() * (max - min)
    }

    /// `1.0` or `-1.0` with equal probability
    fn sign(&mut self) -> f32 {
        if self.next_unit() < 0.5 { 1.0 } else { -1.0 }
    }
}

impl<R: rand::Rng> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Per-axis speed magnitude range for freshly placed tags
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A range that leaves every tag at rest
    pub const fn still() -> Self {
        Self { min: 0.0, max: 0.0 }
    }

    /// Velocity with independent magnitude and sign per axis
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let vx = rng.range(self.min, self.max) * rng.sign();
        let vy = rng.range(self.min, self.max) * rng.sign();
        Vec2::new(vx, vy)
    }
}

/// Place one tag per label inside `container`.
///
/// `size_of` is called once per label with its index. Always returns exactly
/// `labels.len()` items, ids numbered by position in `labels`. An empty label
/// list returns immediately without drawing from `rng`.
pub fn place<S, F, R>(
    labels: &[S],
    mut size_of: F,
    container: Container,
    padding: f32,
    max_tries_per_item: u32,
    speed: SpeedRange,
    rng: &mut R,
) -> Vec<Item>
where
    S: AsRef<str>,
    F: FnMut(usize, &str) -> Size,
    R: RandomSource + ?Sized,
{
    if labels.is_empty() {
        return Vec::new();
    }

    let container = container.normalized();
    // Zero would leave a tag without any candidate at all
    let tries = max_tries_per_item.max(1);
    let mut items: Vec<Item> = Vec::with_capacity(labels.len());
    let mut crowded = 0usize;

    for (index, label) in labels.iter().enumerate() {
        let label = label.as_ref();
        let size = size_of(index, label);
        let span = container.max_origin(size);

        let mut pos = Vec2::ZERO;
        let mut clear = false;
        for _ in 0..tries {
            pos = Vec2::new(rng.next_unit() * span.x, rng.next_unit() * span.y);
            let candidate = Aabb::from_origin_size(pos, size);
            if !items
                .iter()
                .any(|other| overlaps_with_gap(&candidate, &other.aabb(), padding))
            {
                clear = true;
                break;
            }
        }

        if !clear {
            crowded += 1;
            log::debug!(
                "No free spot for tag {} ({:?}) after {} tries, accepting overlap at ({:.1}, {:.1})",
                index,
                label,
                tries,
                pos.x,
                pos.y
            );
        }

        let vel = speed.sample(rng);
        items.push(Item::new(index as u32, label, pos, vel, size));
    }

    if crowded > 0 {
        log::debug!(
            "Placed {} tags in {}x{}, {} overlapping",
            items.len(),
            container.width,
            container.height,
            crowded
        );
    }

    items
}

/// [`place`] with one precomputed size per label.
///
/// Labels beyond the end of `sizes` reuse the last size. With no sizes at all
/// every label falls back to the default pill estimate, so the result still
/// has one item per label.
pub fn place_with_sizes<S, R>(
    labels: &[S],
    sizes: &[Size],
    container: Container,
    padding: f32,
    max_tries_per_item: u32,
    speed: SpeedRange,
    rng: &mut R,
) -> Vec<Item>
where
    S: AsRef<str>,
    R: RandomSource + ?Sized,
{
    let metrics = PillMetrics::default();
    place(
        labels,
        |index, label| {
            sizes
                .get(index)
                .or(sizes.last())
                .copied()
                .unwrap_or_else(|| metrics.estimate_size(label))
        },
        container,
        padding,
        max_tries_per_item,
        speed,
        rng,
    )
}
