//! Tag state and the field that owns it between frames
//!
//! `Item` is the per-tag kinematic record. `TagField` is what a frame
//! scheduler holds on to: the item list, the seeded RNG, settings and the
//! engine phase.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::placement::place;
use super::tick::{StepReport, step_in_place};
use crate::geometry::{Aabb, Container, Size};
use crate::labels::pick_labels;
use crate::settings::{ResizePolicy, Settings};

/// A floating tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub label: String,
    /// Top-left corner in container space
    pub pos: Vec2,
    /// Displacement per step
    pub vel: Vec2,
    pub size: Size,
}

impl Item {
    pub fn new(id: u32, label: impl Into<String>, pos: Vec2, vel: Vec2, size: Size) -> Self {
        Self {
            id,
            label: label.into(),
            pos,
            vel,
            size,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_origin_size(self.pos, self.size)
    }

    /// What a renderer needs to draw this tag
    pub fn view(&self) -> ItemView {
        ItemView {
            id: self.id,
            label: self.label.clone(),
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Read-only projection handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: u32,
    pub label: String,
    pub pos: Vec2,
    pub size: Size,
}

/// Whether the field has been laid out yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// No tags placed
    Uninitialized,
    /// Tags placed, stepping each frame
    Running,
}

/// Tag set plus everything needed to advance it frame by frame
#[derive(Debug, Clone)]
pub struct TagField {
    settings: Settings,
    /// Seed for reproducibility
    seed: u64,
    rng: Pcg32,
    phase: EnginePhase,
    items: Vec<Item>,
    /// Container seen by the last placement or step
    container: Container,
    tick_count: u64,
    /// Bumped every time the item set is replaced
    generation: u32,
}

impl TagField {
    /// Create an empty field; settings are sanitized on the way in
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings: settings.sanitized(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: EnginePhase::Uninitialized,
            items: Vec::new(),
            container: Container::default(),
            tick_count: 0,
            generation: 0,
        }
    }

    /// Lay out one tag per label, replacing any existing tags
    pub fn populate<S, F>(&mut self, labels: &[S], size_of: F, container: Container) -> &[Item]
    where
        S: AsRef<str>,
        F: FnMut(usize, &str) -> Size,
    {
        let container = container.normalized();
        self.items = place(
            labels,
            size_of,
            container,
            self.settings.padding,
            self.settings.max_tries_per_item,
            self.settings.speed_range(),
            &mut self.rng,
        );
        self.container = container;
        self.phase = EnginePhase::Running;
        self.tick_count = 0;
        self.generation = self.generation.wrapping_add(1);

        log::info!(
            "Placed {} tags in {}x{} (seed {})",
            self.items.len(),
            container.width,
            container.height,
            self.seed
        );
        &self.items
    }

    /// Draw `tag_count` labels from the vocabulary with the field's RNG
    pub fn pick_labels(&mut self) -> Vec<String> {
        pick_labels(
            &self.settings.vocabulary,
            self.settings.tag_count,
            &mut self.rng,
        )
    }

    /// Pick labels from the vocabulary and lay them out with estimated pill
    /// sizes
    pub fn populate_from_vocabulary(&mut self, container: Container) -> &[Item] {
        let labels = self.pick_labels();
        let metrics = self.settings.pill;
        self.populate(&labels, move |_, label| metrics.estimate_size(label), container)
    }

    /// Apply the resize policy, then advance every tag by one step.
    ///
    /// Does nothing before the first placement.
    pub fn advance(&mut self, container: Container) -> StepReport {
        if self.phase == EnginePhase::Uninitialized {
            return StepReport::default();
        }

        let container = container.normalized();
        self.resize(container);
        let report = step_in_place(&mut self.items, container, self.settings.collision_gap);
        self.tick_count += 1;

        if report.swaps > 0 {
            log::trace!(
                "Tick {}: {} wall bounces, {} velocity swaps",
                self.tick_count,
                report.wall_bounces,
                report.swaps
            );
        }
        report
    }

    /// Record a new container size.
    ///
    /// Under `ResizePolicy::Relayout` a shrink that strands any tag outside
    /// its valid range re-places the same labels and sizes. Returns true if
    /// the tags were replaced.
    pub fn resize(&mut self, container: Container) -> bool {
        let container = container.normalized();
        let previous = self.container;
        self.container = container;

        if self.phase == EnginePhase::Uninitialized
            || self.settings.resize_policy != ResizePolicy::Relayout
            || !container.shrunk_from(&previous)
        {
            return false;
        }

        let stranded = self
            .items
            .iter()
            .any(|item| !container.contains_origin(item.pos, item.size));
        if !stranded {
            return false;
        }

        log::info!(
            "Container shrank from {}x{} to {}x{}, re-placing tags",
            previous.width,
            previous.height,
            container.width,
            container.height
        );
        let labels: Vec<String> = self.items.iter().map(|i| i.label.clone()).collect();
        let sizes: Vec<Size> = self.items.iter().map(|i| i.size).collect();
        self.populate(&labels, |index, _| sizes[index], container);
        true
    }

    /// Drop all tags and return to the uninitialized phase
    pub fn teardown(&mut self) {
        if self.phase == EnginePhase::Running {
            log::info!("Tearing down {} tags", self.items.len());
        }
        self.items.clear();
        self.phase = EnginePhase::Uninitialized;
        self.tick_count = 0;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Mutable access for callers that seed or nudge tags directly
    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    pub fn views(&self) -> Vec<ItemView> {
        self.items.iter().map(Item::view).collect()
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == EnginePhase::Running
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn container(&self) -> Container {
        self.container
    }

    /// Steps taken since the last placement
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_size(_: usize, _: &str) -> Size {
        Size::new(50.0, 20.0)
    }

    #[test]
    fn test_advance_before_populate_is_noop() {
        let mut field = TagField::new(Settings::default(), 1);
        assert_eq!(field.phase(), EnginePhase::Uninitialized);
        let report = field.advance(Container::new(500.0, 300.0));
        assert_eq!(report, StepReport::default());
        assert_eq!(field.tick_count(), 0);
    }

    #[test]
    fn test_populate_from_vocabulary() {
        let mut field = TagField::new(Settings::default(), 77);
        let items = field.populate_from_vocabulary(Container::new(800.0, 500.0));
        assert_eq!(items.len(), Settings::default().tag_count);
        let vocabulary = Settings::default().vocabulary;
        for item in field.items() {
            assert!(vocabulary.contains(&item.label));
        }
        assert!(field.is_running());
        assert_eq!(field.generation(), 1);
    }

    #[test]
    fn test_pick_then_populate_matches_vocabulary_run() {
        let container = Container::new(800.0, 500.0);
        let mut a = TagField::new(Settings::default(), 31);
        a.populate_from_vocabulary(container);

        let mut b = TagField::new(Settings::default(), 31);
        let labels = b.pick_labels();
        let metrics = b.settings().pill;
        b.populate(&labels, |_, label| metrics.estimate_size(label), container);

        assert_eq!(a.items(), b.items());
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut field = TagField::new(Settings::default(), 2024);
            field.populate_from_vocabulary(Container::new(640.0, 480.0));
            for _ in 0..500 {
                field.advance(Container::new(640.0, 480.0));
            }
            field.items().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_clamp_policy_keeps_items_on_shrink() {
        let mut field = TagField::new(Settings::default(), 5);
        field.populate(&["Web", "Code", "Cloud"], fixed_size, Container::new(800.0, 600.0));
        let ids: Vec<u32> = field.items().iter().map(|i| i.id).collect();

        let small = Container::new(120.0, 60.0);
        field.advance(small);
        assert_eq!(field.generation(), 1);
        assert_eq!(ids, field.items().iter().map(|i| i.id).collect::<Vec<_>>());
        for item in field.items() {
            assert!(small.contains_origin(item.pos, item.size));
        }
    }

    #[test]
    fn test_relayout_policy_replaces_stranded_items() {
        let settings = Settings {
            resize_policy: ResizePolicy::Relayout,
            ..Settings::default()
        };
        let mut field = TagField::new(settings, 5);
        field.populate(&["Web", "Code", "Cloud"], fixed_size, Container::new(800.0, 600.0));
        field.items_mut()[0].pos = Vec2::new(700.0, 500.0);

        let small = Container::new(300.0, 200.0);
        assert!(field.resize(small));
        assert_eq!(field.generation(), 2);
        assert_eq!(field.items().len(), 3);
        assert_eq!(field.items()[0].label, "Web");
        for item in field.items() {
            assert!(small.contains_origin(item.pos, item.size));
        }
    }

    #[test]
    fn test_relayout_skipped_when_growing() {
        let settings = Settings {
            resize_policy: ResizePolicy::Relayout,
            ..Settings::default()
        };
        let mut field = TagField::new(settings, 5);
        field.populate(&["Web"], fixed_size, Container::new(300.0, 200.0));
        assert!(!field.resize(Container::new(600.0, 400.0)));
        assert_eq!(field.generation(), 1);
    }

    #[test]
    fn test_teardown() {
        let mut field = TagField::new(Settings::default(), 1);
        field.populate(&["Web"], fixed_size, Container::new(300.0, 200.0));
        field.advance(Container::new(300.0, 200.0));
        field.teardown();
        assert_eq!(field.phase(), EnginePhase::Uninitialized);
        assert!(field.items().is_empty());
        assert_eq!(field.tick_count(), 0);
    }
}
