// Deterministic stand-in for the browser: a manual clock, frame and interval
// queues that only advance when a test says so, and recording surfaces.

#![allow(dead_code)]

use fx_core::*;
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

type Slot<F> = Rc<RefCell<F>>;
type Registry<F> = RefCell<BTreeMap<TaskId, Slot<F>>>;

struct Interval {
    period: Duration,
    callback: Slot<Callback>,
}

pub struct FakeHost {
    base: Instant,
    elapsed: Cell<Duration>,
    frames: Registry<Callback>,
    intervals: RefCell<BTreeMap<TaskId, Interval>>,
    pointer: Registry<Box<dyn FnMut(PointerSignal)>>,
    hover: Registry<Box<dyn FnMut(bool)>>,
    view: Registry<Callback>,
    resize: Registry<Box<dyn FnMut(Size)>>,
}

/// Clone the live entries first so a callback may cancel itself (or others)
/// while running; entries cancelled mid-pass are skipped.
fn each_live<F: ?Sized>(registry: &Registry<Box<F>>, mut run: impl FnMut(&mut Box<F>)) {
    let snapshot: Vec<(TaskId, Slot<Box<F>>)> = registry
        .borrow()
        .iter()
        .map(|(id, slot)| (*id, slot.clone()))
        .collect();
    for (id, slot) in snapshot {
        if registry.borrow().contains_key(&id) {
            run(&mut slot.borrow_mut());
        }
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
            frames: RefCell::new(BTreeMap::new()),
            intervals: RefCell::new(BTreeMap::new()),
            pointer: RefCell::new(BTreeMap::new()),
            hover: RefCell::new(BTreeMap::new()),
            view: RefCell::new(BTreeMap::new()),
            resize: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    /// Run `n` display frames.
    pub fn frames(&self, n: usize) {
        for _ in 0..n {
            each_live(&self.frames, |cb| cb());
        }
    }

    /// Fire every live interval once, advancing the clock by the shortest period.
    pub fn fire_intervals(&self) {
        let snapshot: Vec<(TaskId, Duration, Slot<Callback>)> = self
            .intervals
            .borrow()
            .iter()
            .map(|(id, i)| (*id, i.period, i.callback.clone()))
            .collect();
        if let Some(step) = snapshot.iter().map(|(_, p, _)| *p).min() {
            self.advance(step);
        }
        for (id, _, slot) in snapshot {
            if self.intervals.borrow().contains_key(&id) {
                (&mut *slot.borrow_mut())();
            }
        }
    }

    pub fn pointer_move(&self, x: f32, y: f32) {
        each_live(&self.pointer, |cb| cb(PointerSignal::Move(Vec2::new(x, y))));
    }

    pub fn pointer_leave(&self) {
        each_live(&self.pointer, |cb| cb(PointerSignal::Leave));
    }

    pub fn hover(&self, entered: bool) {
        each_live(&self.hover, |cb| cb(entered));
    }

    pub fn enter_view(&self) {
        each_live(&self.view, |cb| cb());
    }

    pub fn resize(&self, size: Size) {
        each_live(&self.resize, |cb| cb(size));
    }

    pub fn interval_periods(&self) -> Vec<Duration> {
        self.intervals.borrow().values().map(|i| i.period).collect()
    }

    pub fn frame_tasks(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn interval_tasks(&self) -> usize {
        self.intervals.borrow().len()
    }

    pub fn view_tasks(&self) -> usize {
        self.view.borrow().len()
    }

    /// Every registration not yet cancelled.
    pub fn live_tasks(&self) -> usize {
        self.frames.borrow().len()
            + self.intervals.borrow().len()
            + self.pointer.borrow().len()
            + self.hover.borrow().len()
            + self.view.borrow().len()
            + self.resize.borrow().len()
    }
}

impl Cancel for FakeHost {
    fn cancel(&self, task: TaskId) {
        self.frames.borrow_mut().remove(&task);
        self.intervals.borrow_mut().remove(&task);
        self.pointer.borrow_mut().remove(&task);
        self.hover.borrow_mut().remove(&task);
        self.view.borrow_mut().remove(&task);
        self.resize.borrow_mut().remove(&task);
    }
}

impl Scheduler for FakeHost {
    fn now(&self) -> Instant {
        self.base + self.elapsed.get()
    }

    fn every_frame(&self, callback: Callback) -> TaskId {
        let id = TaskId::next();
        self.frames
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(callback)));
        id
    }

    fn every(&self, period: Duration, callback: Callback) -> TaskId {
        let id = TaskId::next();
        self.intervals.borrow_mut().insert(
            id,
            Interval {
                period,
                callback: Rc::new(RefCell::new(callback)),
            },
        );
        id
    }
}

impl PointerNotifier for FakeHost {
    fn on_pointer(&self, callback: Box<dyn FnMut(PointerSignal)>) -> TaskId {
        let id = TaskId::next();
        self.pointer
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(callback)));
        id
    }
}

impl HoverNotifier for FakeHost {
    fn on_hover(&self, callback: Box<dyn FnMut(bool)>) -> TaskId {
        let id = TaskId::next();
        self.hover
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(callback)));
        id
    }
}

impl VisibilityNotifier for FakeHost {
    fn on_enter_view(&self, callback: Callback) -> TaskId {
        let id = TaskId::next();
        self.view
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(callback)));
        id
    }
}

impl ResizeNotifier for FakeHost {
    fn on_resize(&self, callback: Box<dyn FnMut(Size)>) -> TaskId {
        let id = TaskId::next();
        self.resize
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(callback)));
        id
    }
}

// ---------------- Recording surfaces ----------------

pub struct MagnetProbe {
    pub rect: Cell<Rect>,
    pub applied: RefCell<Vec<(Translation, String)>>,
}

impl MagnetProbe {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect: Cell::new(rect),
            applied: RefCell::new(Vec::new()),
        }
    }

    pub fn last(&self) -> Option<(Translation, String)> {
        self.applied.borrow().last().cloned()
    }
}

impl MagnetSurface for MagnetProbe {
    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }

    fn apply(&self, translation: Translation, transition: &str) {
        self.applied
            .borrow_mut()
            .push((translation, transition.to_string()));
    }
}

#[derive(Default)]
pub struct TextProbe {
    pub announced: RefCell<Vec<String>>,
    pub frames: RefCell<Vec<Vec<Glyph>>>,
}

impl TextProbe {
    pub fn last_text(&self) -> String {
        self.frames
            .borrow()
            .last()
            .map(|g| g.iter().map(|g| g.ch).collect())
            .unwrap_or_default()
    }
}

impl TextSurface for TextProbe {
    fn announce(&self, text: &str) {
        self.announced.borrow_mut().push(text.to_string());
    }

    fn render(&self, glyphs: &[Glyph]) {
        self.frames.borrow_mut().push(glyphs.to_vec());
    }
}

pub struct FilterProbe {
    pub size: Cell<Size>,
    pub applied: RefCell<Vec<BorderParams>>,
}

impl FilterProbe {
    pub fn new(size: Size) -> Self {
        Self {
            size: Cell::new(size),
            applied: RefCell::new(Vec::new()),
        }
    }

    pub fn last(&self) -> Option<BorderParams> {
        self.applied.borrow().last().copied()
    }
}

impl FilterSurface for FilterProbe {
    fn measure(&self) -> Size {
        self.size.get()
    }

    fn apply(&self, params: &BorderParams) {
        self.applied.borrow_mut().push(*params);
    }
}

pub struct SpotlightProbe {
    pub rect: Cell<Rect>,
    pub placed: RefCell<Vec<Vec2>>,
}

impl SpotlightProbe {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect: Cell::new(rect),
            placed: RefCell::new(Vec::new()),
        }
    }

    pub fn last(&self) -> Option<Vec2> {
        self.placed.borrow().last().copied()
    }
}

impl SpotlightSurface for SpotlightProbe {
    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }

    fn place(&self, origin: Vec2) {
        self.placed.borrow_mut().push(origin);
    }
}

// ---------------- Deferred-drop notifier ----------------

/// Hover and visibility source that keeps cancelled callbacks until its next
/// registration, so a callback that cancels itself is never freed mid-call.
#[derive(Default)]
pub struct BuryingEvents {
    hover: Registry<Box<dyn FnMut(bool)>>,
    view: Registry<Callback>,
    graveyard: RefCell<Vec<Box<dyn std::any::Any>>>,
}

impl BuryingEvents {
    pub fn buried(&self) -> usize {
        self.graveyard.borrow().len()
    }

    pub fn live_tasks(&self) -> usize {
        self.hover.borrow().len() + self.view.borrow().len()
    }

    pub fn hover(&self, entered: bool) {
        each_live(&self.hover, |cb| cb(entered));
    }

    pub fn enter_view(&self) {
        each_live(&self.view, |cb| cb());
    }

    fn sweep(&self) {
        self.graveyard.borrow_mut().clear();
    }
}

impl Cancel for BuryingEvents {
    fn cancel(&self, task: TaskId) {
        let hover = self.hover.borrow_mut().remove(&task);
        let view = self.view.borrow_mut().remove(&task);
        let mut graveyard = self.graveyard.borrow_mut();
        if let Some(slot) = hover {
            graveyard.push(Box::new(slot));
        }
        if let Some(slot) = view {
            graveyard.push(Box::new(slot));
        }
    }
}

impl HoverNotifier for BuryingEvents {
    fn on_hover(&self, callback: Box<dyn FnMut(bool)>) -> TaskId {
        self.sweep();
        let id = TaskId::next();
        self.hover
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(callback)));
        id
    }
}

impl VisibilityNotifier for BuryingEvents {
    fn on_enter_view(&self, callback: Callback) -> TaskId {
        self.sweep();
        let id = TaskId::next();
        self.view
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(callback)));
        id
    }
}
