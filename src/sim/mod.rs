//! Deterministic layout simulation
//!
//! All tag motion lives here. This module must be pure and deterministic:
//! - One unit of motion per step, no time delta
//! - Injected RNG only
//! - Stable iteration order (by index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{WallHit, exchange_on_contact, in_contact, reflect_walls};
pub use placement::{RandomSource, SpeedRange, place, place_with_sizes};
pub use state::{EnginePhase, Item, ItemView, TagField};
pub use tick::{StepReport, step, step_in_place};
