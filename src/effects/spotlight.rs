use crate::config::{self, Attrs};
use crate::dom;
use crate::host::{ElementEvents, PointerScope};
use crate::style;
use fx_core::{Rect, Spotlight, SpotlightSurface};
use glam::Vec2;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct SpotlightElement {
    container: web::Element,
    glow: web::HtmlElement,
}

impl SpotlightSurface for SpotlightElement {
    fn bounding_rect(&self) -> Rect {
        dom::bounding_rect(&self.container)
    }

    fn place(&self, origin: Vec2) {
        dom::set_style(&self.glow, "left", &style::px(origin.x));
        dom::set_style(&self.glow, "top", &style::px(origin.y));
    }
}

pub fn mount(
    document: &web::Document,
    element: &web::Element,
    attrs: &impl Attrs,
) -> anyhow::Result<Spotlight> {
    let config = config::spotlight_config(attrs);
    let container: web::HtmlElement = element
        .clone()
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let glow = match dom::part(element, "spotlight-glow") {
        Some(glow) => glow,
        None => {
            dom::extend_css(&container, "position:relative;overflow:hidden;");
            let content = dom::create_part(document, "spotlight-content")?;
            content
                .style()
                .set_css_text("position:relative;z-index:10;");
            dom::adopt_children(&container, &content)?;
            let glow = dom::create_part(document, "spotlight-glow")?;
            dom::append(&container, &glow)?;
            dom::append(&container, &content)?;
            glow
        }
    };
    glow.style().set_css_text(&style::spotlight_style(
        config.radius,
        &config.glow_color,
        config.opacity,
    ));

    let surface = Rc::new(SpotlightElement {
        container: element.clone(),
        glow,
    });
    let events = Rc::new(ElementEvents::new(element.clone(), PointerScope::Element));
    let spotlight = Spotlight::mount(config, surface, events)?;
    Ok(spotlight)
}
