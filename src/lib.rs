#![cfg(target_arch = "wasm32")]
use crate::constants::{FX_MOUNTED_ATTR, FX_SELECTOR};
use crate::effects::{Effect, MountedEffect};
use crate::host::WebScheduler;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod config;
mod constants;
mod dom;
mod effects;
mod events;
mod frame;
mod host;
mod style;

#[derive(Default)]
struct Registry {
    scheduler: Option<Rc<WebScheduler>>,
    mounted: Vec<MountedEffect>,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("landing-fx starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let mounted = mount_all()?;
    log::info!("[fx] mounted {} effect(s)", mounted);
    Ok(())
}

fn scheduler(window: &web::Window) -> Rc<WebScheduler> {
    REGISTRY.with(|r| {
        r.borrow_mut()
            .scheduler
            .get_or_insert_with(|| Rc::new(WebScheduler::new(window.clone())))
            .clone()
    })
}

/// Mount every `[data-fx]` element that is not mounted yet.
fn mount_all() -> anyhow::Result<u32> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let scheduler = scheduler(&window);

    let mut count = 0;
    for element in dom::query_all(&document, FX_SELECTOR)? {
        if element.has_attribute(FX_MOUNTED_ATTR) {
            continue;
        }
        match effects::mount(&document, &element, &scheduler) {
            Ok(Some(mounted)) => {
                _ = element.set_attribute(FX_MOUNTED_ATTR, "");
                log::debug!("[fx] mounted {:?}", mounted.kind);
                REGISTRY.with(|r| r.borrow_mut().mounted.push(mounted));
                count += 1;
            }
            Ok(None) => {}
            Err(e) => log::error!("[fx] mount failed: {:?}", e),
        }
    }
    Ok(count)
}

/// Mount effects added to the page after start-up. Returns how many were
/// newly mounted.
#[wasm_bindgen]
pub fn mount_effects() -> Result<u32, JsValue> {
    mount_all().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tear down every mounted effect: timers, frame loops, listeners and
/// observers are all released.
#[wasm_bindgen]
pub fn unmount_effects() {
    let mounted = REGISTRY.with(|r| std::mem::take(&mut r.borrow_mut().mounted));
    let live: usize = mounted.iter().map(|m| m.effect.live_tasks()).sum();
    for m in &mounted {
        _ = m.element.remove_attribute(FX_MOUNTED_ATTR);
    }
    let count = mounted.len();
    drop(mounted);
    let remaining = REGISTRY.with(|r| {
        r.borrow()
            .scheduler
            .as_ref()
            .map(|s| s.live_tasks())
            .unwrap_or(0)
    });
    log::info!(
        "[fx] unmounted {} effect(s), released {} registration(s), {} scheduler task(s) left",
        count,
        live,
        remaining
    );
}

/// Enable or disable every mounted magnet.
#[wasm_bindgen]
pub fn set_magnets_disabled(disabled: bool) {
    REGISTRY.with(|r| {
        for m in r.borrow_mut().mounted.iter_mut() {
            if let Effect::Magnet(magnet) = &mut m.effect {
                magnet.set_disabled(disabled);
            }
        }
    });
}

/// Retune the speed and chaos of every mounted border. Returns how many
/// borders took the new values.
#[wasm_bindgen]
pub fn set_border_tuning(speed: f32, chaos: f32) -> Result<u32, JsValue> {
    REGISTRY.with(|r| {
        let mut retuned = 0;
        for m in r.borrow_mut().mounted.iter_mut() {
            if let Effect::Border(border) = &mut m.effect {
                border
                    .retune(speed, chaos)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
                retuned += 1;
            }
        }
        log::info!("[fx] retuned {} border(s) speed={} chaos={}", retuned, speed, chaos);
        Ok(retuned)
    })
}
