use std::time::Duration;

// Default tuning shared by the web front-end and tests.

// Pointer magnetism
pub const DEFAULT_MAGNET_PADDING: f32 = 120.0; // capture margin around the element, px
pub const DEFAULT_MAGNET_STRENGTH: f32 = 8.0; // divisor on the pointer-to-center delta
pub const MAGNET_SMOOTHING: f32 = 0.18; // per-frame lerp weight toward the target
pub const SNAP_EPSILON: f32 = 0.001; // |v| below this snaps to exactly zero
pub const POINTER_THROTTLE: Duration = Duration::from_millis(12);
pub const MAGNET_DEBUG_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_ACTIVE_TRANSITION: &str = "transform 0.18s cubic-bezier(.22,.9,.36,1)";
pub const DEFAULT_INACTIVE_TRANSITION: &str = "transform 0.45s cubic-bezier(.22,.9,.36,1)";

// Scramble-reveal text
pub const DEFAULT_SCRAMBLE_SPEED: Duration = Duration::from_millis(100);
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;
pub const DEFAULT_SCRAMBLE_CHARACTERS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+";

// Border glow
pub const BORDER_BASE_DURATION_SECS: f32 = 6.0; // one noise sweep at speed 1
pub const BORDER_BASE_DISPLACEMENT: f32 = 30.0; // displacement scale at chaos 1
pub const DEFAULT_BORDER_COLOR: &str = "#5227FF";
pub const DEFAULT_BORDER_SPEED: f32 = 1.0;
pub const DEFAULT_BORDER_CHAOS: f32 = 1.0;
pub const DEFAULT_BORDER_THICKNESS: f32 = 2.0; // px

// Spotlight
pub const DEFAULT_SPOTLIGHT_RADIUS: f32 = 200.0; // px, diameter of the glow disc
pub const DEFAULT_SPOTLIGHT_COLOR: &str = "rgba(0, 255, 200, 0.35)";
pub const DEFAULT_SPOTLIGHT_OPACITY: f32 = 0.45;
pub const SPOTLIGHT_PARKED: f32 = -9999.0; // local coordinate used while the pointer is away
