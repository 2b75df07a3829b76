//! Pointer magnetism: pull an element toward the pointer while the pointer is
//! inside a padded capture region, and ease it back to rest afterwards.

use crate::constants::*;
use crate::easing::ease_toward;
use crate::error::{require_non_negative, require_positive, ConfigError};
use crate::geometry::Rect;
use crate::host::{PointerNotifier, PointerSignal, Scheduler, Subscriptions};
use crate::throttle::Throttle;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub struct MagnetConfig {
    pub padding: f32,
    /// Larger values give a weaker pull.
    pub magnet_strength: f32,
    pub disabled: bool,
    pub active_transition: String,
    pub inactive_transition: String,
    /// Log position/target once a second at debug level.
    pub debug: bool,
}

impl Default for MagnetConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_MAGNET_PADDING,
            magnet_strength: DEFAULT_MAGNET_STRENGTH,
            disabled: false,
            active_transition: DEFAULT_ACTIVE_TRANSITION.to_string(),
            inactive_transition: DEFAULT_INACTIVE_TRANSITION.to_string(),
            debug: false,
        }
    }
}

impl MagnetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("padding", self.padding)?;
        require_positive("magnet_strength", self.magnet_strength)
    }
}

/// Pointer-derived desired displacement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MagnetTarget {
    pub offset: Vec2,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MagnetState {
    /// Rendered displacement; only ever moved by [`MagnetState::step`].
    pub current: Vec2,
    pub target: MagnetTarget,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translation {
    pub dx: f32,
    pub dy: f32,
}

/// True when `pointer` lies strictly inside `rect` grown by `padding` on every side.
#[inline]
pub fn in_capture_region(rect: &Rect, pointer: Vec2, padding: f32) -> bool {
    let dist = (pointer - rect.center()).abs();
    let reach = rect.half_extents() + Vec2::splat(padding);
    dist.x < reach.x && dist.y < reach.y
}

impl MagnetState {
    /// Retarget from a pointer sample. Returns whether the pointer is captured.
    pub fn pointer_at(&mut self, rect: &Rect, pointer: Vec2, config: &MagnetConfig) -> bool {
        if in_capture_region(rect, pointer, config.padding) {
            self.target = MagnetTarget {
                offset: (pointer - rect.center()) / config.magnet_strength,
                active: true,
            };
        } else {
            self.release();
        }
        self.target.active
    }

    pub fn release(&mut self) {
        self.target = MagnetTarget::default();
    }

    /// Advance one frame of smoothing and return the new displacement.
    pub fn step(&mut self) -> Vec2 {
        self.current = ease_toward(self.current, self.target.offset, MAGNET_SMOOTHING);
        self.current
    }

    /// Drop straight to rest, bypassing the easing.
    pub fn reset(&mut self) {
        *self = MagnetState::default();
    }

    pub fn is_active(&self) -> bool {
        self.target.active
    }
}

#[inline]
pub fn compute_transform(state: &MagnetState) -> Translation {
    Translation {
        dx: state.current.x,
        dy: state.current.y,
    }
}

/// The element being displaced.
pub trait MagnetSurface {
    fn bounding_rect(&self) -> Rect;
    /// Write the displacement; `transition` is a motion hint for the renderer.
    fn apply(&self, translation: Translation, transition: &str);
}

/// A mounted magnet effect. Dropping it stops the frame loop and detaches
/// the pointer listener.
pub struct Magnet {
    config: MagnetConfig,
    state: Rc<RefCell<MagnetState>>,
    surface: Rc<dyn MagnetSurface>,
    scheduler: Rc<dyn Scheduler>,
    pointer: Rc<dyn PointerNotifier>,
    subscriptions: Subscriptions,
}

impl Magnet {
    pub fn mount(
        config: MagnetConfig,
        surface: Rc<dyn MagnetSurface>,
        scheduler: Rc<dyn Scheduler>,
        pointer: Rc<dyn PointerNotifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut magnet = Self {
            config,
            state: Rc::new(RefCell::new(MagnetState::default())),
            surface,
            scheduler,
            pointer,
            subscriptions: Subscriptions::new(),
        };
        if magnet.config.disabled {
            magnet.rest();
        } else {
            magnet.wire();
        }
        Ok(magnet)
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled == self.config.disabled {
            return;
        }
        self.config.disabled = disabled;
        if disabled {
            self.subscriptions.cancel_all();
            self.rest();
            log::debug!("[magnet] disabled");
        } else {
            self.wire();
            log::debug!("[magnet] enabled");
        }
    }

    pub fn state(&self) -> MagnetState {
        *self.state.borrow()
    }

    pub fn config(&self) -> &MagnetConfig {
        &self.config
    }

    pub fn live_tasks(&self) -> usize {
        self.subscriptions.len()
    }

    fn rest(&self) {
        self.state.borrow_mut().reset();
        self.surface
            .apply(Translation::default(), &self.config.inactive_transition);
    }

    fn wire(&mut self) {
        let frame_state = self.state.clone();
        let frame_surface = self.surface.clone();
        let active_transition = self.config.active_transition.clone();
        let inactive_transition = self.config.inactive_transition.clone();
        let frame = self.scheduler.every_frame(Box::new(move || {
            // Ease and read back under one borrow so a pointer update can't
            // interleave between the two.
            let (translation, active) = {
                let mut s = frame_state.borrow_mut();
                s.step();
                (compute_transform(&s), s.is_active())
            };
            let transition = if active {
                &active_transition
            } else {
                &inactive_transition
            };
            frame_surface.apply(translation, transition);
        }));
        self.subscriptions.track(&self.scheduler, frame);

        let pointer_state = self.state.clone();
        let pointer_surface = self.surface.clone();
        let clock = self.scheduler.clone();
        let config = self.config.clone();
        let mut throttle = Throttle::new(POINTER_THROTTLE);
        let listener = self.pointer.on_pointer(Box::new(move |signal| match signal {
            PointerSignal::Move(p) => {
                if !throttle.admit(clock.now()) {
                    return;
                }
                let rect = pointer_surface.bounding_rect();
                let mut s = pointer_state.borrow_mut();
                let was_active = s.is_active();
                if s.pointer_at(&rect, p, &config) != was_active {
                    log::debug!("[magnet] active={}", s.is_active());
                }
            }
            PointerSignal::Leave => pointer_state.borrow_mut().release(),
        }));
        self.subscriptions.track(&self.pointer, listener);

        if self.config.debug {
            let debug_state = self.state.clone();
            let ticker = self.scheduler.every(
                MAGNET_DEBUG_INTERVAL,
                Box::new(move || {
                    let s = debug_state.borrow();
                    log::debug!(
                        "[magnet] pos=({:.2},{:.2}) target=({:.2},{:.2}) active={}",
                        s.current.x,
                        s.current.y,
                        s.target.offset.x,
                        s.target.offset.y,
                        s.target.active
                    );
                }),
            );
            self.subscriptions.track(&self.scheduler, ticker);
        }
    }
}
