use crate::config::{self, Attrs};
use crate::constants::{BORDER_RADIUS, GLOW_LAYERS};
use crate::dom;
use crate::host::{ElementEvents, PointerScope};
use crate::style;
use fx_core::{BorderParams, ElectricBorder, FilterSurface, Size};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

thread_local! {
    static FILTER_SERIAL: Cell<u32> = const { Cell::new(0) };
}

fn next_filter_id() -> String {
    FILTER_SERIAL.with(|n| {
        let serial = n.get();
        n.set(serial.wrapping_add(1));
        style::filter_id(serial)
    })
}

/// Host container plus the hidden SVG filter it patches.
pub struct BorderElement {
    host: web::Element,
    svg: web::HtmlElement,
    stroke: web::HtmlElement,
    filter_id: String,
}

impl FilterSurface for BorderElement {
    fn measure(&self) -> Size {
        dom::client_size(&self.host)
    }

    fn apply(&self, params: &BorderParams) {
        for track in params.tracks() {
            let selector = format!(
                "feOffset > animate[attributeName=\"{}\"]",
                track.axis.attribute()
            );
            if let Some(anim) = dom::query_all_in(&self.svg, &selector).get(track.ordinal) {
                _ = anim.set_attribute("values", &style::keyframe_values(track.from, track.to));
            }
        }
        let dur = style::duration_secs(params.duration_secs);
        for anim in dom::query_all_in(&self.svg, "feOffset > animate") {
            _ = anim.set_attribute("dur", &dur);
        }
        if let Ok(Some(disp)) = self.svg.query_selector("feDisplacementMap") {
            _ = disp.set_attribute("scale", &style::num(params.displacement_scale));
        }
        dom::set_style(&self.stroke, "filter", &style::filter_url(&self.filter_id));
    }
}

fn build(
    document: &web::Document,
    host: &web::HtmlElement,
    color: &str,
    thickness: f32,
) -> anyhow::Result<(web::HtmlElement, web::HtmlElement, String)> {
    let filter_id = next_filter_id();
    dom::extend_css(
        host,
        &format!(
            "position:relative;overflow:visible;isolation:isolate;border-radius:{};",
            BORDER_RADIUS
        ),
    );

    let content = dom::create_part(document, "border-content")?;
    content.style().set_css_text(&format!(
        "position:relative;z-index:20;border-radius:{};",
        BORDER_RADIUS
    ));
    dom::adopt_children(host, &content)?;

    let svg = dom::create_part(document, "border-filter")?;
    svg.set_inner_html(&style::filter_markup(&filter_id));
    dom::append(host, &svg)?;

    let layers = dom::create_part(document, "border-layers")?;
    layers.style().set_css_text(&format!(
        "position:absolute;inset:0;pointer-events:none;z-index:10;border-radius:{};",
        BORDER_RADIUS
    ));
    let mut stroke = None;
    for (opacity, blur) in GLOW_LAYERS {
        let layer = dom::create(document, "div")?;
        layer
            .style()
            .set_css_text(&style::border_layer_style(color, thickness, opacity, blur));
        dom::append(&layers, &layer)?;
        if stroke.is_none() {
            stroke = Some(layer);
        }
    }
    dom::append(host, &layers)?;
    dom::append(host, &content)?;

    let stroke = stroke.ok_or_else(|| anyhow::anyhow!("no border layers"))?;
    Ok((svg, stroke, filter_id))
}

pub fn mount(
    document: &web::Document,
    element: &web::Element,
    attrs: &impl Attrs,
) -> anyhow::Result<ElectricBorder> {
    let config = config::border_config(attrs);
    let host: web::HtmlElement = element
        .clone()
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let existing = dom::part(element, "border-filter").zip(dom::part(element, "border-layers"));
    let (svg, stroke, filter_id) = match existing {
        Some((svg, layers)) => {
            let filter_id = svg
                .query_selector("filter")
                .ok()
                .flatten()
                .map(|f| f.id())
                .ok_or_else(|| anyhow::anyhow!("border filter missing"))?;
            let stroke = layers
                .first_element_child()
                .and_then(|s| s.dyn_into::<web::HtmlElement>().ok())
                .ok_or_else(|| anyhow::anyhow!("border stroke missing"))?;
            (svg, stroke, filter_id)
        }
        None => build(document, &host, &config.color, config.thickness)?,
    };

    let surface = Rc::new(BorderElement {
        host: element.clone(),
        svg,
        stroke,
        filter_id,
    });
    let events = Rc::new(ElementEvents::new(element.clone(), PointerScope::Element));
    let border = ElectricBorder::mount(config, surface, events)?;
    Ok(border)
}
