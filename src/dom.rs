use crate::config::Attrs;
use fx_core::{Rect, Size};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn query_all(root: &web::Document, selector: &str) -> anyhow::Result<Vec<web::Element>> {
    let list = root
        .query_selector_all(selector)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect())
}

pub fn query_all_in(root: &web::Element, selector: &str) -> Vec<web::Element> {
    match root.query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|n| n.dyn_into::<web::Element>().ok())
            .collect(),
        Err(e) => {
            log::error!("query {} failed: {:?}", selector, e);
            Vec::new()
        }
    }
}

pub fn create(document: &web::Document, tag: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

pub fn append(parent: &web::Node, child: &web::Node) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Move every child of `from` to the end of `to`.
pub fn adopt_children(from: &web::Node, to: &web::Node) -> anyhow::Result<()> {
    while let Some(child) = from.first_child() {
        append(to, &child)?;
    }
    Ok(())
}

/// Marks elements built by an effect so a re-mount reuses them.
pub const PART_ATTR: &str = "data-fx-part";

/// Direct child of `parent` tagged with `data-fx-part="{name}"`.
pub fn part(parent: &web::Element, name: &str) -> Option<web::HtmlElement> {
    let children = parent.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .find(|c| c.get_attribute(PART_ATTR).as_deref() == Some(name))
        .and_then(|c| c.dyn_into::<web::HtmlElement>().ok())
}

/// Create a `div` tagged as part `name`.
pub fn create_part(document: &web::Document, name: &str) -> anyhow::Result<web::HtmlElement> {
    let el = create(document, "div")?;
    el.set_attribute(PART_ATTR, name)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(el)
}

/// Append `extra` to the element's inline style.
pub fn extend_css(el: &web::HtmlElement, extra: &str) {
    let style = el.style();
    let current = style.css_text();
    style.set_css_text(&format!("{}{}", current, extra));
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

#[inline]
pub fn bounding_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

#[inline]
pub fn client_size(el: &web::Element) -> Size {
    Size::new(el.client_width() as f32, el.client_height() as f32)
}

/// `data-*` lookup on a live element.
pub struct ElementAttrs<'a>(pub &'a web::Element);

impl Attrs for ElementAttrs<'_> {
    fn attr(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

/// An attached DOM event listener. Detaching hands the closure back so the
/// caller can keep it alive until it is certainly not running.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Option<Closure<dyn FnMut(web::Event)>>,
}

impl EventListener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::error!("addEventListener({}) failed: {:?}", kind, e);
        }
        Self {
            target: target.clone(),
            kind,
            closure: Some(closure),
        }
    }

    pub fn detach(mut self) -> Option<Closure<dyn FnMut(web::Event)>> {
        let closure = self.closure.take()?;
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, closure.as_ref().unchecked_ref());
        Some(closure)
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Some(closure) = self.closure.take() {
            _ = self
                .target
                .remove_event_listener_with_callback(self.kind, closure.as_ref().unchecked_ref());
        }
    }
}
