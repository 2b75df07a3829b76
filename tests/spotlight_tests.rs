// Host-side tests for the pointer-following spotlight glow.

#![allow(dead_code)]
mod support;

use fx_core::*;
use glam::Vec2;
use std::rc::Rc;
use support::{FakeHost, SpotlightProbe};

const CONTAINER: Rect = Rect::new(100.0, 50.0, 400.0, 300.0);

fn mount(config: SpotlightConfig) -> (Rc<FakeHost>, Rc<SpotlightProbe>, Spotlight) {
    let host = Rc::new(FakeHost::new());
    let probe = Rc::new(SpotlightProbe::new(CONTAINER));
    let spotlight = Spotlight::mount(config, probe.clone(), host.clone()).unwrap();
    (host, probe, spotlight)
}

#[test]
fn starts_parked_off_screen() {
    let (_host, probe, spotlight) = mount(SpotlightConfig::default());
    assert!(spotlight.is_parked());
    let half = DEFAULT_SPOTLIGHT_RADIUS / 2.0;
    assert_eq!(
        probe.last(),
        Some(Vec2::splat(SPOTLIGHT_PARKED - half))
    );
}

#[test]
fn glow_is_centred_on_container_local_pointer() {
    let (host, probe, spotlight) = mount(SpotlightConfig {
        radius: 100.0,
        ..SpotlightConfig::default()
    });
    host.pointer_move(150.0, 80.0);
    assert_eq!(spotlight.local_pointer(), Vec2::new(50.0, 30.0));
    assert_eq!(probe.last(), Some(Vec2::new(0.0, -20.0)));
    assert!(!spotlight.is_parked());
}

#[test]
fn follows_the_container_when_it_moves() {
    let (host, probe, spotlight) = mount(SpotlightConfig::default());
    probe.rect.set(Rect::new(0.0, 0.0, 400.0, 300.0));
    host.pointer_move(150.0, 80.0);
    assert_eq!(spotlight.local_pointer(), Vec2::new(150.0, 80.0));
}

#[test]
fn leave_parks_the_glow() {
    let (host, probe, spotlight) = mount(SpotlightConfig::default());
    host.pointer_move(200.0, 200.0);
    host.pointer_leave();
    assert!(spotlight.is_parked());
    assert_eq!(spotlight.local_pointer(), PARKED);
    assert_eq!(probe.last(), Some(glow_origin(PARKED, DEFAULT_SPOTLIGHT_RADIUS)));
}

#[test]
fn glow_origin_offsets_by_half_the_diameter() {
    assert_eq!(glow_origin(Vec2::new(10.0, 10.0), 20.0), Vec2::ZERO);
    assert_eq!(glow_origin(Vec2::new(5.0, 7.0), 0.0), Vec2::new(5.0, 7.0));
}

#[test]
fn configuration_is_validated() {
    let over = SpotlightConfig {
        opacity: 1.5,
        ..SpotlightConfig::default()
    };
    assert_eq!(
        over.validate(),
        Err(ConfigError::OutOfRange {
            option: "opacity",
            value: 1.5,
            min: 0.0,
            max: 1.0
        })
    );
    let negative = SpotlightConfig {
        radius: -1.0,
        ..SpotlightConfig::default()
    };
    assert!(negative.validate().is_err());
    assert_eq!(SpotlightConfig::default().validate(), Ok(()));

    let host = Rc::new(FakeHost::new());
    let probe = Rc::new(SpotlightProbe::new(CONTAINER));
    assert!(Spotlight::mount(negative, probe, host.clone()).is_err());
    assert_eq!(host.live_tasks(), 0);
}
