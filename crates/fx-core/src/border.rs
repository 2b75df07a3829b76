//! Parameters for the turbulence-displaced border glow.
//!
//! The noise layers scroll by exactly one container height (vertically) and
//! width (horizontally) per cycle, so the pattern wraps seamlessly at any size.

use crate::constants::*;
use crate::error::{require_non_negative, require_positive, ConfigError};
use crate::geometry::Size;
use crate::host::{ResizeNotifier, Subscriptions};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub struct BorderConfig {
    pub color: String,
    /// Animation-rate multiplier.
    pub speed: f32,
    /// Displacement-intensity multiplier.
    pub chaos: f32,
    /// Border width in px.
    pub thickness: f32,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_BORDER_COLOR.to_string(),
            speed: DEFAULT_BORDER_SPEED,
            chaos: DEFAULT_BORDER_CHAOS,
            thickness: DEFAULT_BORDER_THICKNESS,
        }
    }
}

impl BorderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("speed", self.speed)?;
        require_non_negative("chaos", self.chaos)?;
        require_non_negative("thickness", self.thickness)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetAxis {
    Dx,
    Dy,
}

impl OffsetAxis {
    pub fn attribute(self) -> &'static str {
        match self {
            OffsetAxis::Dx => "dx",
            OffsetAxis::Dy => "dy",
        }
    }
}

/// One `from; to` keyframe pair for an offset animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetTrack {
    pub axis: OffsetAxis,
    /// Position among tracks of the same axis, in document order.
    pub ordinal: usize,
    pub from: f32,
    pub to: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BorderParams {
    /// Horizontal travel per cycle (container width).
    pub travel_x: f32,
    /// Vertical travel per cycle (container height).
    pub travel_y: f32,
    pub duration_secs: f32,
    pub displacement_scale: f32,
}

impl BorderParams {
    /// Keyframes for the two offset layers: the first slides in from one
    /// full extent, the second slides out by one.
    pub fn tracks(&self) -> SmallVec<[OffsetTrack; 4]> {
        let mut tracks = SmallVec::new();
        for (axis, travel) in [(OffsetAxis::Dy, self.travel_y), (OffsetAxis::Dx, self.travel_x)] {
            tracks.push(OffsetTrack {
                axis,
                ordinal: 0,
                from: travel,
                to: 0.0,
            });
            tracks.push(OffsetTrack {
                axis,
                ordinal: 1,
                from: 0.0,
                to: -travel,
            });
        }
        tracks
    }
}

/// Derive filter parameters from the measured container size.
///
/// An unmeasured container gets zero travel, which leaves a static border
/// until a real size arrives.
pub fn compute_params(size: Size, speed: f32, chaos: f32) -> BorderParams {
    let (travel_x, travel_y) = if size.is_empty() {
        (0.0, 0.0)
    } else {
        (size.width, size.height)
    };
    let duration_secs = if speed.is_finite() && speed > 0.0 {
        BORDER_BASE_DURATION_SECS / speed
    } else {
        BORDER_BASE_DURATION_SECS
    };
    BorderParams {
        travel_x,
        travel_y,
        duration_secs,
        displacement_scale: BORDER_BASE_DISPLACEMENT * chaos.max(0.0),
    }
}

/// The filter definition and the container it decorates.
pub trait FilterSurface {
    /// Current container size (client width/height).
    fn measure(&self) -> Size;
    /// Patch the existing filter in place.
    fn apply(&self, params: &BorderParams);
}

/// A mounted border glow. Dropping it disconnects the resize observer.
pub struct ElectricBorder {
    config: BorderConfig,
    /// (speed, chaos) as seen by the resize callback.
    tuning: Rc<Cell<(f32, f32)>>,
    size: Rc<Cell<Size>>,
    last: Rc<RefCell<BorderParams>>,
    surface: Rc<dyn FilterSurface>,
    subscriptions: Subscriptions,
}

impl ElectricBorder {
    pub fn mount(
        config: BorderConfig,
        surface: Rc<dyn FilterSurface>,
        resize: Rc<dyn ResizeNotifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let size = Rc::new(Cell::new(surface.measure()));
        let last = Rc::new(RefCell::new(BorderParams::default()));
        let tuning = Rc::new(Cell::new((config.speed, config.chaos)));
        let mut border = Self {
            config,
            tuning,
            size,
            last,
            surface,
            subscriptions: Subscriptions::new(),
        };
        border.refresh();

        let size = border.size.clone();
        let last = border.last.clone();
        let surface = border.surface.clone();
        let tuning = border.tuning.clone();
        let task = resize.on_resize(Box::new(move |measured| {
            size.set(measured);
            let (speed, chaos) = tuning.get();
            let params = compute_params(measured, speed, chaos);
            surface.apply(&params);
            *last.borrow_mut() = params;
        }));
        border.subscriptions.track(&resize, task);
        Ok(border)
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<(), ConfigError> {
        require_positive("speed", speed)?;
        self.config.speed = speed;
        self.refresh();
        Ok(())
    }

    pub fn set_chaos(&mut self, chaos: f32) -> Result<(), ConfigError> {
        require_non_negative("chaos", chaos)?;
        self.config.chaos = chaos;
        self.refresh();
        Ok(())
    }

    /// Change speed and chaos together. Nothing is applied unless both are valid.
    pub fn retune(&mut self, speed: f32, chaos: f32) -> Result<(), ConfigError> {
        require_positive("speed", speed)?;
        require_non_negative("chaos", chaos)?;
        self.config.speed = speed;
        self.config.chaos = chaos;
        self.refresh();
        Ok(())
    }

    pub fn params(&self) -> BorderParams {
        *self.last.borrow()
    }

    pub fn size(&self) -> Size {
        self.size.get()
    }

    pub fn config(&self) -> &BorderConfig {
        &self.config
    }

    pub fn live_tasks(&self) -> usize {
        self.subscriptions.len()
    }

    fn refresh(&self) {
        self.tuning.set((self.config.speed, self.config.chaos));
        let params = compute_params(self.size.get(), self.config.speed, self.config.chaos);
        self.surface.apply(&params);
        *self.last.borrow_mut() = params;
    }
}
