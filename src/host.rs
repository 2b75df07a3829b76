//! `fx_core` host capabilities backed by the browser.

use crate::constants::VIEW_THRESHOLD;
use crate::dom::{self, EventListener};
use crate::events::pointer::client_point;
use crate::frame::FrameLoop;
use fnv::FnvHashMap;
use fx_core::{
    Callback, Cancel, HoverNotifier, PointerNotifier, PointerSignal, ResizeNotifier, Scheduler,
    Size, TaskId, VisibilityNotifier,
};
use instant::Instant;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keeps detached closures alive until the next registration, so a callback
/// that cancels itself is never freed while it is still on the stack.
#[derive(Default)]
struct Graveyard(RefCell<Vec<Box<dyn Any>>>);

impl Graveyard {
    fn bury<T: 'static>(&self, item: T) {
        self.0.borrow_mut().push(Box::new(item));
    }

    fn sweep(&self) {
        self.0.borrow_mut().clear();
    }
}

enum Task {
    Frame(FrameLoop),
    Interval {
        handle: i32,
        closure: Closure<dyn FnMut()>,
    },
}

/// requestAnimationFrame / setInterval scheduler.
pub struct WebScheduler {
    window: web::Window,
    tasks: RefCell<FnvHashMap<TaskId, Task>>,
    graveyard: Graveyard,
}

impl WebScheduler {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            tasks: RefCell::new(FnvHashMap::default()),
            graveyard: Graveyard::default(),
        }
    }

    pub fn live_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Cancel for WebScheduler {
    fn cancel(&self, task: TaskId) {
        let removed = self.tasks.borrow_mut().remove(&task);
        match removed {
            Some(Task::Frame(frame)) => {
                if let Some(closure) = frame.stop() {
                    self.graveyard.bury(closure);
                }
            }
            Some(Task::Interval { handle, closure }) => {
                self.window.clear_interval_with_handle(handle);
                self.graveyard.bury(closure);
            }
            None => {}
        }
    }
}

impl Scheduler for WebScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn every_frame(&self, callback: Callback) -> TaskId {
        self.graveyard.sweep();
        let id = TaskId::next();
        self.tasks
            .borrow_mut()
            .insert(id, Task::Frame(FrameLoop::start(callback)));
        id
    }

    fn every(&self, period: Duration, mut callback: Callback) -> TaskId {
        self.graveyard.sweep();
        let id = TaskId::next();
        let closure = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
        let period_ms = period.as_millis().min(i32::MAX as u128) as i32;
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            ) {
            Ok(handle) => {
                self.tasks
                    .borrow_mut()
                    .insert(id, Task::Interval { handle, closure });
            }
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
        id
    }
}

/// Where pointer moves are listened for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerScope {
    /// Window-wide moves (so the capture region can extend past the element),
    /// leave on the element.
    Window,
    /// Moves and leave on the element only.
    Element,
}

enum Registration {
    Listeners(Vec<EventListener>),
    Intersection {
        observer: web::IntersectionObserver,
        closure: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
    },
    Resize {
        observer: web::ResizeObserver,
        closure: Closure<dyn FnMut(js_sys::Array, web::ResizeObserver)>,
    },
}

/// Pointer, hover, visibility and resize notifications for one element.
pub struct ElementEvents {
    element: web::Element,
    pointer_scope: PointerScope,
    registrations: RefCell<FnvHashMap<TaskId, Registration>>,
    graveyard: Graveyard,
}

impl ElementEvents {
    pub fn new(element: web::Element, pointer_scope: PointerScope) -> Self {
        Self {
            element,
            pointer_scope,
            registrations: RefCell::new(FnvHashMap::default()),
            graveyard: Graveyard::default(),
        }
    }

    fn register(&self, registration: Registration) -> TaskId {
        self.graveyard.sweep();
        let id = TaskId::next();
        self.registrations.borrow_mut().insert(id, registration);
        id
    }
}

impl Cancel for ElementEvents {
    fn cancel(&self, task: TaskId) {
        let removed = self.registrations.borrow_mut().remove(&task);
        match removed {
            Some(Registration::Listeners(listeners)) => {
                for listener in listeners {
                    if let Some(closure) = listener.detach() {
                        self.graveyard.bury(closure);
                    }
                }
            }
            Some(Registration::Intersection { observer, closure }) => {
                observer.disconnect();
                self.graveyard.bury(closure);
            }
            Some(Registration::Resize { observer, closure }) => {
                observer.disconnect();
                self.graveyard.bury(closure);
            }
            None => {}
        }
    }
}

impl PointerNotifier for ElementEvents {
    fn on_pointer(&self, callback: Box<dyn FnMut(PointerSignal)>) -> TaskId {
        let callback = Rc::new(RefCell::new(callback));
        let move_target: web::EventTarget = match self.pointer_scope {
            PointerScope::Window => match web::window() {
                Some(w) => w.into(),
                None => self.element.clone().into(),
            },
            PointerScope::Element => self.element.clone().into(),
        };
        let element_target: web::EventTarget = self.element.clone().into();

        let mut listeners = Vec::with_capacity(4);
        for kind in ["mousemove", "touchmove"] {
            let cb = callback.clone();
            listeners.push(EventListener::attach(&move_target, kind, move |ev| {
                if let Some(p) = client_point(&ev) {
                    (&mut *cb.borrow_mut())(PointerSignal::Move(p));
                }
            }));
        }
        if self.pointer_scope == PointerScope::Window {
            let cb = callback.clone();
            listeners.push(EventListener::attach(&element_target, "mouseenter", move |ev| {
                if let Some(p) = client_point(&ev) {
                    (&mut *cb.borrow_mut())(PointerSignal::Move(p));
                }
            }));
        }
        let cb = callback;
        listeners.push(EventListener::attach(&element_target, "mouseleave", move |_| {
            (&mut *cb.borrow_mut())(PointerSignal::Leave);
        }));
        self.register(Registration::Listeners(listeners))
    }
}

impl HoverNotifier for ElementEvents {
    fn on_hover(&self, callback: Box<dyn FnMut(bool)>) -> TaskId {
        let callback = Rc::new(RefCell::new(callback));
        let target: web::EventTarget = self.element.clone().into();
        let enter_cb = callback.clone();
        let listeners = vec![
            EventListener::attach(&target, "mouseenter", move |_| (&mut *enter_cb.borrow_mut())(true)),
            EventListener::attach(&target, "mouseleave", move |_| (&mut *callback.borrow_mut())(false)),
        ];
        self.register(Registration::Listeners(listeners))
    }
}

impl VisibilityNotifier for ElementEvents {
    fn on_enter_view(&self, mut callback: Callback) -> TaskId {
        let closure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
                let entered = entries.iter().any(|entry| {
                    entry
                        .dyn_into::<web::IntersectionObserverEntry>()
                        .map(|e| e.is_intersecting())
                        .unwrap_or(false)
                });
                if entered {
                    callback();
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);
        let options = web::IntersectionObserverInit::new();
        options.set_threshold(&wasm_bindgen::JsValue::from_f64(VIEW_THRESHOLD));
        match web::IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)
        {
            Ok(observer) => {
                observer.observe(&self.element);
                self.register(Registration::Intersection { observer, closure })
            }
            Err(e) => {
                log::error!("IntersectionObserver unavailable: {:?}", e);
                TaskId::next()
            }
        }
    }
}

impl ResizeNotifier for ElementEvents {
    fn on_resize(&self, mut callback: Box<dyn FnMut(Size)>) -> TaskId {
        let element = self.element.clone();
        let closure = Closure::wrap(Box::new(
            move |_entries: js_sys::Array, _observer: web::ResizeObserver| {
                callback(dom::client_size(&element));
            },
        ) as Box<dyn FnMut(js_sys::Array, web::ResizeObserver)>);
        match web::ResizeObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&self.element);
                self.register(Registration::Resize { observer, closure })
            }
            Err(e) => {
                log::error!("ResizeObserver unavailable: {:?}", e);
                TaskId::next()
            }
        }
    }
}
