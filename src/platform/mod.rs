//! Platform abstraction layer
//!
//! The simulation knows nothing about where it runs. The host supplies:
//! - Container size (resize observer, fixed bounds in tests)
//! - A renderer that creates, moves and removes tag representations
//! - The frame cadence, by calling [`Driver::frame`]

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{FixedContainer, LogRenderer, RecordingRenderer};

use crate::geometry::Container;
use crate::sim::{ItemView, StepReport, TagField};

/// Source of the current layout bounds
pub trait ContainerSizeProvider {
    fn container(&mut self) -> Container;
}

impl<F: FnMut() -> Container> ContainerSizeProvider for F {
    fn container(&mut self) -> Container {
        self()
    }
}

/// Draws tags; has no say over where they go
pub trait RendererAdapter {
    /// Create representations for a fresh tag set
    fn mount(&mut self, items: &[ItemView]);
    /// Move existing representations
    fn update(&mut self, items: &[ItemView]);
    /// Remove everything
    fn unmount(&mut self);
}

/// Frame scheduler glue: reads bounds, steps the field, forwards positions.
///
/// `frame` takes `&mut self`, so frames can never overlap.
pub struct Driver<P, R> {
    field: TagField,
    provider: P,
    renderer: R,
    running: bool,
    /// Field generation the renderer has mounted
    mounted_generation: Option<u32>,
    frames: u64,
}

impl<P: ContainerSizeProvider, R: RendererAdapter> Driver<P, R> {
    pub fn new(field: TagField, provider: P, renderer: R) -> Self {
        Self {
            field,
            provider,
            renderer,
            running: false,
            mounted_generation: None,
            frames: 0,
        }
    }

    /// Lay out tags (unless the field already has some) and mount them
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        if !self.field.is_running() {
            let container = self.provider.container();
            self.field.populate_from_vocabulary(container);
        }
        self.sync_mount();
        self.running = true;
        log::info!("Driver started with {} tags", self.field.items().len());
    }

    /// Run one frame. Returns `None` when stopped.
    pub fn frame(&mut self) -> Option<StepReport> {
        if !self.running {
            return None;
        }
        let container = self.provider.container();
        let report = self.field.advance(container);
        // A relayout replaces the tag set, so the renderer starts over
        if self.mounted_generation != Some(self.field.generation()) {
            self.sync_mount();
        } else {
            self.renderer.update(&self.field.views());
        }
        self.frames += 1;
        Some(report)
    }

    /// Run `frames` frames back to back, returning how many ran
    pub fn run(&mut self, frames: u32) -> u32 {
        let mut ran = 0;
        for _ in 0..frames {
            if self.frame().is_none() {
                break;
            }
            ran += 1;
        }
        ran
    }

    /// Stop driving, remove rendered tags and tear the field down
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.renderer.unmount();
        self.field.teardown();
        self.mounted_generation = None;
        self.running = false;
        log::info!("Driver stopped after {} frames", self.frames);
    }

    fn sync_mount(&mut self) {
        if self.mounted_generation.is_some() {
            self.renderer.unmount();
        }
        self.renderer.mount(&self.field.views());
        self.mounted_generation = Some(self.field.generation());
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &TagField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut TagField {
        &mut self.field
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (TagField, P, R) {
        (self.field, self.provider, self.renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::settings::{ResizePolicy, Settings};
    use glam::Vec2;

    fn driver(settings: Settings) -> Driver<FixedContainer, RecordingRenderer> {
        Driver::new(
            TagField::new(settings, 99),
            FixedContainer::new(Container::new(600.0, 400.0)),
            RecordingRenderer::default(),
        )
    }

    #[test]
    fn test_frame_before_start() {
        let mut d = driver(Settings::default());
        assert!(d.frame().is_none());
        assert!(d.renderer().frames.is_empty());
    }

    #[test]
    fn test_start_mounts_and_frames_update() {
        let mut d = driver(Settings::default());
        d.start();
        assert_eq!(d.renderer().mounts, 1);
        assert_eq!(d.run(10), 10);
        assert_eq!(d.renderer().frames.len(), 10);
        assert_eq!(d.frames(), 10);
        assert_eq!(d.renderer().mounts, 1);
    }

    #[test]
    fn test_stop_unmounts() {
        let mut d = driver(Settings::default());
        d.start();
        d.run(3);
        d.stop();
        assert!(!d.renderer().mounted);
        assert!(!d.field().is_running());
        assert_eq!(d.run(5), 0);
    }

    #[test]
    fn test_closure_provider() {
        let mut width = 600.0;
        let provider = move || {
            width -= 10.0;
            Container::new(width, 300.0)
        };
        let mut d = Driver::new(
            TagField::new(Settings::default(), 3),
            provider,
            RecordingRenderer::default(),
        );
        d.start();
        d.run(20);
        let last = d.field().container();
        assert_eq!(last.width, 390.0);
        for item in d.field().items() {
            assert!(last.contains_origin(item.pos, item.size));
        }
    }

    #[test]
    fn test_relayout_remounts() {
        let settings = Settings {
            resize_policy: ResizePolicy::Relayout,
            ..Settings::default()
        };
        let mut d = driver(settings);
        d.field_mut().populate(
            &["Web", "Cloud"],
            |_, _| Size::new(50.0, 20.0),
            Container::new(600.0, 400.0),
        );
        d.start();
        d.field_mut().items_mut()[1].pos = Vec2::new(550.0, 380.0);
        d.provider_mut().set(Container::new(200.0, 100.0));
        d.frame();
        assert_eq!(d.renderer().mounts, 2);
        assert_eq!(d.field().generation(), 2);
    }
}
