use crate::config::{self, Attrs};
use crate::constants::MAGNET_WRAPPER_STYLE;
use crate::dom;
use crate::host::{ElementEvents, PointerScope, WebScheduler};
use crate::style;
use fx_core::{Magnet, MagnetSurface, Rect, Translation};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wrapper measured for the capture region, inner element translated.
pub struct MagnetElement {
    wrapper: web::HtmlElement,
    inner: web::HtmlElement,
}

impl MagnetSurface for MagnetElement {
    fn bounding_rect(&self) -> Rect {
        dom::bounding_rect(&self.wrapper)
    }

    fn apply(&self, translation: Translation, transition: &str) {
        dom::set_style(
            &self.inner,
            "transform",
            &style::translate3d(translation.dx, translation.dy),
        );
        dom::set_style(&self.inner, "transition", transition);
        dom::set_style(&self.inner, "will-change", "transform");
    }
}

pub fn mount(
    document: &web::Document,
    element: &web::Element,
    attrs: &impl Attrs,
    scheduler: &Rc<WebScheduler>,
) -> anyhow::Result<Magnet> {
    let config = config::magnet_config(attrs);
    let wrapper: web::HtmlElement = element
        .clone()
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let inner = match dom::part(element, "magnet-inner") {
        Some(inner) => inner,
        None => {
            dom::extend_css(&wrapper, MAGNET_WRAPPER_STYLE);
            let inner = dom::create_part(document, "magnet-inner")?;
            dom::adopt_children(&wrapper, &inner)?;
            dom::append(&wrapper, &inner)?;
            inner
        }
    };
    dom::set_style(&inner, "transform", &style::translate3d(0.0, 0.0));

    let surface = Rc::new(MagnetElement { wrapper, inner });
    let events = Rc::new(ElementEvents::new(element.clone(), PointerScope::Window));
    let magnet = Magnet::mount(config, surface, scheduler.clone(), events)?;
    Ok(magnet)
}
