//! Mounted scramble-reveal text, driven by hover and/or first visibility.

use crate::error::ConfigError;
use crate::host::{HoverNotifier, Scheduler, Subscriptions, TaskId, VisibilityNotifier};
use crate::reveal::RevealSet;
use crate::scramble::{Glyph, ScrambleConfig, ScrambleText, TickOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub trait TextSurface {
    /// Publish the true text for assistive technology. Called once at mount.
    fn announce(&self, text: &str);
    fn render(&self, glyphs: &[Glyph]);
}

struct Run {
    text: ScrambleText<StdRng>,
    config: ScrambleConfig,
    /// Hovered, or triggered by visibility.
    active: bool,
    has_animated_on_view: bool,
    timer: Option<TaskId>,
}

#[derive(Clone)]
struct Driver {
    run: Rc<RefCell<Run>>,
    scheduler: Rc<dyn Scheduler>,
    surface: Rc<dyn TextSurface>,
}

impl Driver {
    fn begin(&self) {
        let period = {
            let mut run = self.run.borrow_mut();
            if run.active {
                return;
            }
            run.active = true;
            run.text.start();
            run.config.speed
        };
        let driver = self.clone();
        let timer = self.scheduler.every(period, Box::new(move || driver.tick()));
        self.run.borrow_mut().timer = Some(timer);
        log::debug!("[decrypt] start period={:?}", period);
    }

    fn tick(&self) {
        let (glyphs, finished_timer) = {
            let mut guard = self.run.borrow_mut();
            let run = &mut *guard;
            let outcome = run.text.tick(&run.config);
            let timer = match outcome {
                TickOutcome::Finished => run.timer.take(),
                TickOutcome::Continue => None,
            };
            (run.text.glyphs(), timer)
        };
        self.surface.render(&glyphs);
        if let Some(timer) = finished_timer {
            self.scheduler.cancel(timer);
            log::debug!("[decrypt] finished");
        }
    }

    fn end(&self) {
        let (glyphs, timer) = {
            let mut run = self.run.borrow_mut();
            run.active = false;
            run.text.stop();
            (run.text.glyphs(), run.timer.take())
        };
        if let Some(timer) = timer {
            self.scheduler.cancel(timer);
        }
        self.surface.render(&glyphs);
        log::debug!("[decrypt] reset");
    }

    fn enter_view(&self) -> bool {
        {
            let mut run = self.run.borrow_mut();
            if run.has_animated_on_view {
                return false;
            }
            run.has_animated_on_view = true;
        }
        self.begin();
        true
    }
}

/// A mounted scramble-reveal text. Dropping it cancels the tick timer and
/// every trigger subscription.
pub struct DecryptedText {
    driver: Driver,
    subscriptions: Subscriptions,
}

impl DecryptedText {
    pub fn mount(
        text: &str,
        config: ScrambleConfig,
        surface: Rc<dyn TextSurface>,
        scheduler: Rc<dyn Scheduler>,
        hover: Rc<dyn HoverNotifier>,
        visibility: Rc<dyn VisibilityNotifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let trigger = config.trigger;
        let scramble = ScrambleText::new(text, rng);
        surface.announce(&scramble.source());
        surface.render(&scramble.glyphs());

        let driver = Driver {
            run: Rc::new(RefCell::new(Run {
                text: scramble,
                config,
                active: false,
                has_animated_on_view: false,
                timer: None,
            })),
            scheduler,
            surface,
        };
        let mut subscriptions = Subscriptions::new();

        if trigger.on_hover() {
            let d = driver.clone();
            let task = hover.on_hover(Box::new(move |entered| {
                if entered {
                    d.begin();
                } else {
                    d.end();
                }
            }));
            subscriptions.track(&hover, task);
        }

        if trigger.on_view() {
            let d = driver.clone();
            let own_id: Rc<Cell<Option<TaskId>>> = Rc::new(Cell::new(None));
            let own_id_cb = own_id.clone();
            // Weak: the notifier owns this closure, even after cancelling it.
            let notifier = Rc::downgrade(&visibility);
            let task = visibility.on_enter_view(Box::new(move || {
                if d.enter_view() {
                    // Fires at most once per mount.
                    if let (Some(id), Some(notifier)) = (own_id_cb.take(), notifier.upgrade()) {
                        notifier.cancel(id);
                    }
                }
            }));
            own_id.set(Some(task));
            subscriptions.track(&visibility, task);
        }

        log::debug!(
            "[decrypt] mounted len={} trigger={:?}",
            driver.run.borrow().text.len(),
            trigger
        );
        Ok(Self {
            driver,
            subscriptions,
        })
    }

    pub fn display_text(&self) -> String {
        self.driver.run.borrow().text.display_text()
    }

    pub fn glyphs(&self) -> Vec<Glyph> {
        self.driver.run.borrow().text.glyphs()
    }

    pub fn revealed(&self) -> RevealSet {
        self.driver.run.borrow().text.revealed().clone()
    }

    pub fn is_scrambling(&self) -> bool {
        self.driver.run.borrow().text.is_scrambling()
    }

    pub fn is_ticking(&self) -> bool {
        self.driver.run.borrow().timer.is_some()
    }

    pub fn has_animated_on_view(&self) -> bool {
        self.driver.run.borrow().has_animated_on_view
    }

    pub fn live_tasks(&self) -> usize {
        self.subscriptions.len() + usize::from(self.is_ticking())
    }
}

impl Drop for DecryptedText {
    fn drop(&mut self) {
        let timer = self.driver.run.borrow_mut().timer.take();
        if let Some(timer) = timer {
            self.driver.scheduler.cancel(timer);
        }
        self.subscriptions.cancel_all();
    }
}
