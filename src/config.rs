use crate::constants::*;
use fx_core::{
    BorderConfig, MagnetConfig, RevealDirection, ScrambleConfig, SpotlightConfig, Substitution,
    Trigger,
};
use std::str::FromStr;
use std::time::Duration;

// Effect configuration read from `data-*` attributes. Absent options take
// their defaults; unparsable or out-of-range values are logged and ignored.

/// Attribute lookup: returns the raw value of an attribute, if present.
pub trait Attrs {
    fn attr(&self, name: &str) -> Option<String>;
}

impl<F: Fn(&str) -> Option<String>> Attrs for F {
    fn attr(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Effect kind named by `data-fx`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Magnet,
    Decrypt,
    Border,
    Spotlight,
}

impl EffectKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "magnet" => Some(EffectKind::Magnet),
            "decrypt" | "decrypted-text" => Some(EffectKind::Decrypt),
            "border" | "electric-border" => Some(EffectKind::Border),
            "spotlight" | "target" => Some(EffectKind::Spotlight),
            _ => None,
        }
    }
}

/// CSS classes for revealed vs. still-scrambled characters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecryptClasses {
    pub revealed: String,
    pub encrypted: String,
}

fn parse_with<T, P>(attrs: &impl Attrs, name: &str, default: T, parse: P) -> T
where
    P: Fn(&str) -> Option<T>,
{
    match attrs.attr(name) {
        None => default,
        Some(raw) => match parse(raw.trim()) {
            Some(v) => v,
            None => {
                log::warn!("[config] ignoring {}=\"{}\"", name, raw);
                default
            }
        },
    }
}

fn number<T: FromStr>(attrs: &impl Attrs, name: &str, default: T, ok: impl Fn(&T) -> bool) -> T {
    parse_with(attrs, name, default, |s| s.parse::<T>().ok().filter(|v| ok(v)))
}

/// Present-but-empty counts as true, like an HTML boolean attribute.
fn flag(attrs: &impl Attrs, name: &str, default: bool) -> bool {
    parse_with(attrs, name, default, |s| match s.to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    })
}

fn text(attrs: &impl Attrs, name: &str, default: &str) -> String {
    attrs
        .attr(name)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[inline]
fn finite_non_negative(v: &f32) -> bool {
    v.is_finite() && *v >= 0.0
}

#[inline]
fn finite_positive(v: &f32) -> bool {
    v.is_finite() && *v > 0.0
}

pub fn magnet_config(attrs: &impl Attrs) -> MagnetConfig {
    let d = MagnetConfig::default();
    MagnetConfig {
        padding: number(attrs, ATTR_PADDING, d.padding, finite_non_negative),
        magnet_strength: number(attrs, ATTR_STRENGTH, d.magnet_strength, finite_positive),
        disabled: flag(attrs, ATTR_DISABLED, d.disabled),
        active_transition: text(attrs, ATTR_ACTIVE_TRANSITION, &d.active_transition),
        inactive_transition: text(attrs, ATTR_INACTIVE_TRANSITION, &d.inactive_transition),
        debug: flag(attrs, ATTR_DEBUG, d.debug),
    }
}

pub fn scramble_config(attrs: &impl Attrs) -> ScrambleConfig {
    let d = ScrambleConfig::default();
    let speed_ms = number(attrs, ATTR_SPEED, d.speed.as_millis() as u64, |ms| *ms > 0);
    let substitution = if flag(attrs, ATTR_ORIGINAL_CHARS, false) {
        Substitution::OriginalOnly
    } else {
        match attrs.attr(ATTR_CHARACTERS) {
            Some(chars) if !chars.is_empty() => Substitution::Alphabet(chars.chars().collect()),
            Some(_) => {
                log::warn!("[config] ignoring empty {}", ATTR_CHARACTERS);
                d.substitution
            }
            None => d.substitution,
        }
    };
    ScrambleConfig {
        speed: Duration::from_millis(speed_ms),
        max_iterations: number(attrs, ATTR_MAX_ITERATIONS, d.max_iterations, |_| true),
        sequential: flag(attrs, ATTR_SEQUENTIAL, d.sequential),
        direction: parse_with(attrs, ATTR_DIRECTION, d.direction, |s| {
            RevealDirection::from_str(s).ok()
        }),
        substitution,
        trigger: parse_with(attrs, ATTR_ANIMATE_ON, d.trigger, |s| Trigger::from_str(s).ok()),
        seed: attrs.attr(ATTR_SEED).and_then(|s| match s.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                log::warn!("[config] ignoring {}=\"{}\"", ATTR_SEED, s);
                None
            }
        }),
    }
}

pub fn decrypt_classes(attrs: &impl Attrs) -> DecryptClasses {
    DecryptClasses {
        revealed: attrs.attr(ATTR_CLASS).unwrap_or_default(),
        encrypted: attrs.attr(ATTR_ENCRYPTED_CLASS).unwrap_or_default(),
    }
}

pub fn border_config(attrs: &impl Attrs) -> BorderConfig {
    let d = BorderConfig::default();
    BorderConfig {
        color: text(attrs, ATTR_COLOR, &d.color),
        speed: number(attrs, ATTR_SPEED, d.speed, finite_positive),
        chaos: number(attrs, ATTR_CHAOS, d.chaos, finite_non_negative),
        thickness: number(attrs, ATTR_THICKNESS, d.thickness, finite_non_negative),
    }
}

pub fn spotlight_config(attrs: &impl Attrs) -> SpotlightConfig {
    let d = SpotlightConfig::default();
    SpotlightConfig {
        radius: number(attrs, ATTR_RADIUS, d.radius, finite_non_negative),
        glow_color: text(attrs, ATTR_GLOW, &d.glow_color),
        opacity: number(attrs, ATTR_OPACITY, d.opacity, |v| (0.0..=1.0).contains(v)),
    }
}
