//! Soft glow that follows the pointer inside a container.

use crate::constants::*;
use crate::error::{require_non_negative, ConfigError};
use crate::geometry::Rect;
use crate::host::{PointerNotifier, PointerSignal, Subscriptions};
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub struct SpotlightConfig {
    /// Diameter of the glow disc in px.
    pub radius: f32,
    pub glow_color: String,
    pub opacity: f32,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_SPOTLIGHT_RADIUS,
            glow_color: DEFAULT_SPOTLIGHT_COLOR.to_string(),
            opacity: DEFAULT_SPOTLIGHT_OPACITY,
        }
    }
}

impl SpotlightConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("radius", self.radius)?;
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::OutOfRange {
                option: "opacity",
                value: self.opacity,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }
}

/// Container-local pointer position while the pointer is away.
pub const PARKED: Vec2 = Vec2::splat(SPOTLIGHT_PARKED);

/// Top-left corner of a glow disc centred on `local`.
#[inline]
pub fn glow_origin(local: Vec2, radius: f32) -> Vec2 {
    local - Vec2::splat(radius / 2.0)
}

pub trait SpotlightSurface {
    fn bounding_rect(&self) -> Rect;
    /// Move the glow's top-left corner to `origin` (container-local px).
    fn place(&self, origin: Vec2);
}

/// A mounted spotlight. Dropping it detaches the pointer listener.
pub struct Spotlight {
    config: SpotlightConfig,
    local: Rc<Cell<Vec2>>,
    subscriptions: Subscriptions,
}

impl Spotlight {
    pub fn mount(
        config: SpotlightConfig,
        surface: Rc<dyn SpotlightSurface>,
        pointer: Rc<dyn PointerNotifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let local = Rc::new(Cell::new(PARKED));
        surface.place(glow_origin(PARKED, config.radius));

        let radius = config.radius;
        let local_cb = local.clone();
        let task = pointer.on_pointer(Box::new(move |signal| {
            let p = match signal {
                PointerSignal::Move(client) => surface.bounding_rect().to_local(client),
                PointerSignal::Leave => PARKED,
            };
            local_cb.set(p);
            surface.place(glow_origin(p, radius));
        }));
        let mut subscriptions = Subscriptions::new();
        subscriptions.track(&pointer, task);
        Ok(Self {
            config,
            local,
            subscriptions,
        })
    }

    /// Last pointer position relative to the container.
    pub fn local_pointer(&self) -> Vec2 {
        self.local.get()
    }

    pub fn is_parked(&self) -> bool {
        self.local.get() == PARKED
    }

    pub fn config(&self) -> &SpotlightConfig {
        &self.config
    }

    pub fn live_tasks(&self) -> usize {
        self.subscriptions.len()
    }
}
