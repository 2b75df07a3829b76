pub mod border;
pub mod decrypt;
pub mod magnet;
pub mod spotlight;

use crate::config::EffectKind;
use crate::constants::FX_ATTR;
use crate::dom::ElementAttrs;
use crate::host::WebScheduler;
use fx_core::{DecryptedText, ElectricBorder, Magnet, Spotlight};
use std::rc::Rc;
use web_sys as web;

/// A live effect. Dropping it cancels every timer, frame loop, listener and
/// observer it registered.
pub enum Effect {
    Magnet(Magnet),
    Decrypt(DecryptedText),
    Border(ElectricBorder),
    Spotlight(Spotlight),
}

impl Effect {
    /// Registrations currently held by the effect.
    pub fn live_tasks(&self) -> usize {
        match self {
            Effect::Magnet(m) => m.live_tasks(),
            Effect::Decrypt(d) => d.live_tasks(),
            Effect::Border(b) => b.live_tasks(),
            Effect::Spotlight(s) => s.live_tasks(),
        }
    }
}

pub struct MountedEffect {
    pub element: web::Element,
    pub kind: EffectKind,
    pub effect: Effect,
}

/// Mount the effect named by the element's `data-fx` attribute.
/// Returns `Ok(None)` for unknown effect names.
pub fn mount(
    document: &web::Document,
    element: &web::Element,
    scheduler: &Rc<WebScheduler>,
) -> anyhow::Result<Option<MountedEffect>> {
    let Some(name) = element.get_attribute(FX_ATTR) else {
        return Ok(None);
    };
    let Some(kind) = EffectKind::parse(&name) else {
        log::warn!("[fx] unknown effect \"{}\"", name);
        return Ok(None);
    };
    let attrs = ElementAttrs(element);
    let effect = match kind {
        EffectKind::Magnet => Effect::Magnet(magnet::mount(document, element, &attrs, scheduler)?),
        EffectKind::Decrypt => {
            Effect::Decrypt(decrypt::mount(document, element, &attrs, scheduler)?)
        }
        EffectKind::Border => Effect::Border(border::mount(document, element, &attrs)?),
        EffectKind::Spotlight => Effect::Spotlight(spotlight::mount(document, element, &attrs)?),
    };
    Ok(Some(MountedEffect {
        element: element.clone(),
        kind,
        effect,
    }))
}
