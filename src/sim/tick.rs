//! Discrete simulation step
//!
//! One step moves every tag by its velocity (no time delta, speed is purely
//! the velocity magnitude), bounces it off the walls, then runs the pairwise
//! contact pass over the updated positions.

use super::collision::{exchange_on_contact, reflect_walls};
use super::state::Item;
use crate::geometry::Container;

/// What happened during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Velocity components negated by a wall
    pub wall_bounces: u32,
    /// Pairs that exchanged velocities
    pub swaps: u32,
}

/// Advance `items` by one step, returning the new state
pub fn step(items: &[Item], container: Container, collision_gap: f32) -> Vec<Item> {
    let mut next = items.to_vec();
    step_in_place(&mut next, container, collision_gap);
    next
}

/// In-place variant of [`step`]
pub fn step_in_place(items: &mut [Item], container: Container, collision_gap: f32) -> StepReport {
    let container = container.normalized();
    let mut report = StepReport::default();

    for item in items.iter_mut() {
        item.pos += item.vel;
        report.wall_bounces += reflect_walls(item, container).count();
    }

    // Contacts are tested only once every tag has moved
    report.swaps = exchange_on_contact(items, collision_gap);
    report
}
