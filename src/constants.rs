/// DOM wiring and presentation constants for the web front-end.
///
/// Behavioural defaults (padding, speeds, multipliers) live in `fx_core`;
/// these only describe how the effects are found in and written to the page.
// Declarative mounting
pub const FX_ATTR: &str = "data-fx";
pub const FX_SELECTOR: &str = "[data-fx]";
pub const FX_MOUNTED_ATTR: &str = "data-fx-mounted";

// Magnet options
pub const ATTR_PADDING: &str = "data-padding";
pub const ATTR_STRENGTH: &str = "data-strength";
pub const ATTR_DISABLED: &str = "data-disabled";
pub const ATTR_ACTIVE_TRANSITION: &str = "data-active-transition";
pub const ATTR_INACTIVE_TRANSITION: &str = "data-inactive-transition";
pub const ATTR_DEBUG: &str = "data-debug";

// Decrypt options
pub const ATTR_TEXT: &str = "data-text";
pub const ATTR_SPEED: &str = "data-speed"; // ms for decrypt, multiplier for border
pub const ATTR_MAX_ITERATIONS: &str = "data-max-iterations";
pub const ATTR_SEQUENTIAL: &str = "data-sequential";
pub const ATTR_DIRECTION: &str = "data-direction";
pub const ATTR_ORIGINAL_CHARS: &str = "data-original-chars";
pub const ATTR_CHARACTERS: &str = "data-characters";
pub const ATTR_ANIMATE_ON: &str = "data-animate-on";
pub const ATTR_SEED: &str = "data-seed";
pub const ATTR_CLASS: &str = "data-class";
pub const ATTR_ENCRYPTED_CLASS: &str = "data-encrypted-class";

// Border options
pub const ATTR_COLOR: &str = "data-color";
pub const ATTR_CHAOS: &str = "data-chaos";
pub const ATTR_THICKNESS: &str = "data-thickness";

// Spotlight options
pub const ATTR_RADIUS: &str = "data-radius";
pub const ATTR_GLOW: &str = "data-glow";
pub const ATTR_OPACITY: &str = "data-opacity";

// Visibility trigger: fraction of the element that must be on screen
pub const VIEW_THRESHOLD: f64 = 0.1;

// Visually hidden but still read by screen readers
pub const SR_ONLY_STYLE: &str = "position:absolute;width:1px;height:1px;padding:0;margin:-1px;overflow:hidden;clip:rect(0,0,0,0);border:0;";
pub const DECRYPT_WRAPPER_STYLE: &str = "display:inline-block;white-space:pre-wrap;";

pub const MAGNET_WRAPPER_STYLE: &str = "position:relative;display:inline-block;touch-action:none;";

// Turbulence filter
pub const FILTER_ID_PREFIX: &str = "electric-border-";
pub const TURBULENCE_BASE_FREQUENCY: f32 = 0.02;
pub const TURBULENCE_OCTAVES: u32 = 10;
pub const FILTER_REGION_ORIGIN_PCT: i32 = -200; // x/y of the filter region
pub const FILTER_REGION_SIZE_PCT: i32 = 500; // width/height of the filter region
pub const BORDER_RADIUS: &str = "0.75rem";

// Glow layers: (opacity, blur px); the first is the crisp stroke carrying the filter
pub const GLOW_LAYERS: [(f32, f32); 3] = [(1.0, 0.0), (0.5, 4.0), (0.4, 24.0)];

pub const SPOTLIGHT_BLUR_PX: f32 = 80.0;
pub const SPOTLIGHT_FADE: &str = "opacity 0.25s ease";
