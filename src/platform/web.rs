//! Browser collaborators: DOM tags driven by requestAnimationFrame

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use super::{ContainerSizeProvider, Driver, RendererAdapter};
use crate::geometry::{Container, Size};
use crate::settings::Settings;
use crate::sim::{ItemView, TagField};

/// Classes applied to every tag element
const TAG_CLASSES: [&str; 11] = [
    "inline-flex",
    "items-center",
    "px-4",
    "py-1",
    "rounded-full",
    "text-sm",
    "font-medium",
    "text-gray-200",
    "bg-white/10",
    "backdrop-blur-sm",
    "floating-tag",
];

/// Reads bounds from a live element
pub struct ElementContainer {
    element: HtmlElement,
}

impl ElementContainer {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl ContainerSizeProvider for ElementContainer {
    fn container(&mut self) -> Container {
        Container::new(
            self.element.offset_width() as f32,
            self.element.offset_height() as f32,
        )
    }
}

/// One absolutely positioned `div` per tag inside the host element
pub struct DomRenderer {
    document: Document,
    host: HtmlElement,
    nodes: Vec<HtmlElement>,
}

impl DomRenderer {
    pub fn new(document: Document, host: HtmlElement) -> Self {
        Self {
            document,
            host,
            nodes: Vec::new(),
        }
    }

    fn create_tag(&self, label: &str) -> Result<HtmlElement, JsValue> {
        let shape: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        for class in TAG_CLASSES {
            shape.class_list().add_1(class)?;
        }
        let text = self.document.create_element("span")?;
        text.set_text_content(Some(label));
        shape.append_child(&text)?;
        self.host.append_child(&shape)?;
        Ok(shape)
    }

    /// Rendered size of a tag, from a throwaway element.
    ///
    /// `None` when the host is not laid out (e.g. hidden), which reports
    /// zero offsets.
    pub fn measure(&self, label: &str) -> Option<Size> {
        let node = self.create_tag(label).ok()?;
        let size = Size::new(node.offset_width() as f32, node.offset_height() as f32);
        node.remove();
        (size.width > 0.0 && size.height > 0.0).then_some(size)
    }

    fn position(node: &HtmlElement, item: &ItemView) {
        let transform = format!("translate({}px, {}px)", item.pos.x, item.pos.y);
        let _ = node.style().set_property("transform", &transform);
    }
}

impl RendererAdapter for DomRenderer {
    fn mount(&mut self, items: &[ItemView]) {
        for item in items {
            match self.create_tag(&item.label) {
                Ok(node) => {
                    Self::position(&node, item);
                    self.nodes.push(node);
                }
                Err(e) => log::warn!("Failed to create tag {}: {:?}", item.id, e),
            }
        }
    }

    fn update(&mut self, items: &[ItemView]) {
        for (node, item) in self.nodes.iter().zip(items) {
            Self::position(node, item);
        }
    }

    fn unmount(&mut self) {
        for node in self.nodes.drain(..) {
            node.remove();
        }
    }
}

type WebDriver = Driver<ElementContainer, DomRenderer>;

/// Handle to a running animation; dropping it leaves the loop running
pub struct FloatingTags {
    driver: Rc<RefCell<WebDriver>>,
}

impl FloatingTags {
    /// Stop the loop and remove the tags
    pub fn stop(&self) {
        self.driver.borrow_mut().stop();
    }
}

/// Start floating tags inside the element with id `host_id`
pub fn start(host_id: &str, settings: Settings) -> Option<FloatingTags> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let host: HtmlElement = match document.get_element_by_id(host_id)?.dyn_into() {
        Ok(el) => el,
        Err(_) => {
            log::error!("#{} is not an HTML element", host_id);
            return None;
        }
    };

    let seed = js_sys::Date::now() as u64;
    log::info!("Floating tags starting in #{} with seed {}", host_id, seed);

    let mut provider = ElementContainer::new(host.clone());
    let renderer = DomRenderer::new(document, host);

    // Lay out with measured sizes so collisions match what is on screen
    let mut field = TagField::new(settings, seed);
    let labels = field.pick_labels();
    let metrics = field.settings().pill;
    field.populate(
        &labels,
        |_, label| {
            renderer
                .measure(label)
                .unwrap_or_else(|| metrics.estimate_size(label))
        },
        provider.container(),
    );

    let mut driver = Driver::new(field, provider, renderer);
    driver.start();

    let driver = Rc::new(RefCell::new(driver));
    request_animation_frame(driver.clone());
    Some(FloatingTags { driver })
}

fn request_animation_frame(driver: Rc<RefCell<WebDriver>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| {
        frame_loop(driver);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn frame_loop(driver: Rc<RefCell<WebDriver>>) {
    let running = driver.borrow_mut().frame().is_some();
    if running {
        request_animation_frame(driver);
    }
}
