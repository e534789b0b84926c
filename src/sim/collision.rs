//! Wall bounces and tag-to-tag contact
//!
//! Contact response is a plain velocity exchange: two touching tags trade
//! their whole velocity vectors. There is no normal, no mass and no
//! separation, so a pair that stays overlapping keeps trading every step.

use super::state::Item;
use crate::geometry::{Container, overlaps_with_gap};

/// Per-axis result of a wall check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallHit {
    pub x: bool,
    pub y: bool,
}

impl WallHit {
    pub fn count(&self) -> u32 {
        self.x as u32 + self.y as u32
    }
}

/// Reflect off any wall the tag has crossed and clamp it back inside.
///
/// A crossing negates that velocity component in the same step; the clamp
/// range collapses to zero when the tag is larger than the container.
pub fn reflect_walls(item: &mut Item, container: Container) -> WallHit {
    let hit = WallHit {
        x: item.pos.x < 0.0 || item.pos.x + item.size.width > container.width,
        y: item.pos.y < 0.0 || item.pos.y + item.size.height > container.height,
    };

    if hit.x {
        item.vel.x = -item.vel.x;
    }
    if hit.y {
        item.vel.y = -item.vel.y;
    }

    item.pos = container.clamp_origin(item.pos, item.size);
    hit
}

/// Whether two tags are in contact, allowing `gap` of clearance
#[inline]
pub fn in_contact(a: &Item, b: &Item, gap: f32) -> bool {
    overlaps_with_gap(&a.aabb(), &b.aabb(), gap)
}

/// Test every unordered pair in index order and swap velocities on contact.
///
/// Swaps are applied as they are found, so when three or more tags touch at
/// once the outcome depends on iteration order. Returns the number of swaps.
pub fn exchange_on_contact(items: &mut [Item], gap: f32) -> u32 {
    let mut swaps = 0;
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if in_contact(&items[i], &items[j], gap) {
                let (head, tail) = items.split_at_mut(j);
                std::mem::swap(&mut head[i].vel, &mut tail[0].vel);
                swaps += 1;
            }
        }
    }
    swaps
}
