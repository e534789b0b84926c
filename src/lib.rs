//! Floating Tags - layout engine for drifting label pills
//!
//! Core modules:
//! - `geometry`: Sizes, containers and axis-aligned boxes
//! - `sim`: Deterministic placement and per-frame simulation
//! - `labels`: Tag vocabulary and pill size estimation
//! - `platform`: Frame scheduler, container provider and renderer seams
//! - `settings`: Data-driven tuning (padding, speeds, budgets)

pub mod geometry;
pub mod labels;
pub mod platform;
pub mod settings;
pub mod sim;

pub use geometry::{Aabb, Container, Size};
pub use settings::{ResizePolicy, Settings};
pub use sim::{Item, ItemView, RandomSource, StepReport, TagField, place, place_with_sizes, step};

/// Layout configuration constants
pub mod consts {
    /// Gap kept between tags when they are first placed
    pub const DEFAULT_PADDING: f32 = 8.0;
    /// Margin used when testing two moving tags for contact
    pub const DEFAULT_COLLISION_GAP: f32 = 4.0;
    /// Candidate positions tried per tag before accepting an overlap
    pub const DEFAULT_MAX_TRIES: u32 = 100;

    /// Per-axis speed range (pixels per step)
    pub const DEFAULT_MIN_SPEED: f32 = 0.5;
    pub const DEFAULT_MAX_SPEED: f32 = 1.0;

    /// Number of tags spawned from the vocabulary
    pub const DEFAULT_TAG_COUNT: usize = 8;
}
