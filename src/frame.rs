use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Self-rescheduling requestAnimationFrame loop that can be stopped.
pub struct FrameLoop {
    tick: TickSlot,
    raf_id: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn start(mut body: Box<dyn FnMut()>) -> Self {
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let raf_id = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(true));

        let tick_clone = tick.clone();
        let raf_id_tick = raf_id.clone();
        let running_tick = running.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !running_tick.get() {
                return;
            }
            body();
            // body may have stopped us
            if running_tick.get() {
                raf_id_tick.set(request_frame(&tick_clone));
            }
        }) as Box<dyn FnMut()>));
        raf_id.set(request_frame(&tick));

        Self {
            tick,
            raf_id,
            running,
        }
    }

    /// Cancel the pending frame. The returned closure may be the one that is
    /// currently executing, so the caller must not drop it synchronously.
    pub fn stop(&self) -> Option<Closure<dyn FnMut()>> {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take()
    }
}

fn request_frame(tick: &TickSlot) -> Option<i32> {
    let window = web::window()?;
    let slot = tick.borrow();
    let closure = slot.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}
