//! Headless collaborators for native runs and tests

use serde::Serialize;

use super::{ContainerSizeProvider, RendererAdapter};
use crate::geometry::Container;
use crate::sim::ItemView;

/// Container that only changes when told to
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedContainer {
    container: Container,
}

impl FixedContainer {
    pub fn new(container: Container) -> Self {
        Self { container }
    }

    pub fn set(&mut self, container: Container) {
        log::debug!("Container resized to {}x{}", container.width, container.height);
        self.container = container;
    }
}

impl ContainerSizeProvider for FixedContainer {
    fn container(&mut self) -> Container {
        self.container
    }
}

/// Keeps every frame it is given
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingRenderer {
    pub frames: Vec<Vec<ItemView>>,
    #[serde(skip)]
    pub mounted: bool,
    #[serde(skip)]
    pub mounts: u32,
}

impl RecordingRenderer {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.frames)
    }

    pub fn last_frame(&self) -> Option<&[ItemView]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl RendererAdapter for RecordingRenderer {
    fn mount(&mut self, items: &[ItemView]) {
        self.mounted = true;
        self.mounts += 1;
        self.frames.push(items.to_vec());
    }

    fn update(&mut self, items: &[ItemView]) {
        self.frames.push(items.to_vec());
    }

    fn unmount(&mut self) {
        self.mounted = false;
    }
}

/// Writes positions to the trace log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderer;

impl RendererAdapter for LogRenderer {
    fn mount(&mut self, items: &[ItemView]) {
        for item in items {
            log::debug!(
                "mount #{} {:?} {}x{}",
                item.id,
                item.label,
                item.size.width,
                item.size.height
            );
        }
    }

    fn update(&mut self, items: &[ItemView]) {
        for item in items {
            log::trace!("#{} at ({:.1}, {:.1})", item.id, item.pos.x, item.pos.y);
        }
    }

    fn unmount(&mut self) {
        log::debug!("unmount");
    }
}
