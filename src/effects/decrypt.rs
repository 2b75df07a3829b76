use crate::config::{self, Attrs, DecryptClasses};
use crate::constants::{ATTR_TEXT, DECRYPT_WRAPPER_STYLE, SR_ONLY_STYLE};
use crate::dom;
use crate::host::{ElementEvents, PointerScope, WebScheduler};
use fx_core::{DecryptedText, Glyph, TextSurface};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One span per character plus a visually hidden copy of the true text.
pub struct DecryptElement {
    hidden: web::HtmlElement,
    glyphs: Vec<web::HtmlElement>,
    classes: DecryptClasses,
}

impl TextSurface for DecryptElement {
    fn announce(&self, text: &str) {
        self.hidden.set_text_content(Some(text));
    }

    fn render(&self, glyphs: &[Glyph]) {
        let mut buf = [0u8; 4];
        for (span, glyph) in self.glyphs.iter().zip(glyphs) {
            span.set_text_content(Some(&*glyph.ch.encode_utf8(&mut buf)));
            span.set_class_name(if glyph.encrypted {
                &self.classes.encrypted
            } else {
                &self.classes.revealed
            });
        }
    }
}

pub fn mount(
    document: &web::Document,
    element: &web::Element,
    attrs: &impl Attrs,
    scheduler: &Rc<WebScheduler>,
) -> anyhow::Result<DecryptedText> {
    let config = config::scramble_config(attrs);
    let classes = config::decrypt_classes(attrs);
    // Source text survives a re-mount in data-text.
    let (text, first_mount) = match attrs.attr(ATTR_TEXT) {
        Some(text) => (text, false),
        None => {
            let text = element.text_content().unwrap_or_default();
            _ = element.set_attribute(ATTR_TEXT, &text);
            (text, true)
        }
    };

    let wrapper: web::HtmlElement = element
        .clone()
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    wrapper.set_inner_html("");
    if first_mount {
        dom::extend_css(&wrapper, DECRYPT_WRAPPER_STYLE);
    }

    let hidden = dom::create(document, "span")?;
    hidden.style().set_css_text(SR_ONLY_STYLE);
    dom::append(&wrapper, &hidden)?;

    let visible = dom::create(document, "span")?;
    _ = visible.set_attribute("aria-hidden", "true");
    let mut glyphs = Vec::with_capacity(text.chars().count());
    for _ in text.chars() {
        let span = dom::create(document, "span")?;
        dom::append(&visible, &span)?;
        glyphs.push(span);
    }
    dom::append(&wrapper, &visible)?;

    let surface = Rc::new(DecryptElement {
        hidden,
        glyphs,
        classes,
    });
    let events = Rc::new(ElementEvents::new(element.clone(), PointerScope::Element));
    let decrypted = DecryptedText::mount(
        &text,
        config,
        surface,
        scheduler.clone(),
        events.clone(),
        events,
    )?;
    Ok(decrypted)
}
