//! Platform-independent state machines behind the landing page effects.
//!
//! Every effect is split into pure math (easing, reveal order, substitution,
//! filter parameters) and a thin mounted controller that talks to its host
//! through the capability traits in [`host`]. The web front-end implements
//! those traits on top of the DOM; tests implement them with fakes.

pub mod border;
pub mod constants;
pub mod decrypt;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod host;
pub mod magnet;
pub mod reveal;
pub mod scramble;
pub mod spotlight;
pub mod throttle;

pub use border::*;
pub use constants::*;
pub use decrypt::*;
pub use easing::*;
pub use error::*;
pub use geometry::*;
pub use host::*;
pub use magnet::*;
pub use reveal::*;
pub use scramble::*;
pub use spotlight::*;
pub use throttle::*;
