//! Integration tests for clock metadata.

use ctfmeta_model::{Clock, ClockValue, UNIX_EPOCH};

#[test]
fn lttng_monotonic_clock_attributes() {
    let mut clock = Clock::new();
    clock.add_attribute("name", ClockValue::Text("monotonic".into()));
    clock.add_attribute("freq", ClockValue::Integer(1_000_000_000));
    clock.add_attribute("offset_s", ClockValue::Integer(1_326_476_837));
    clock.add_attribute("offset", ClockValue::Integer(897_235_420));
    clock.add_attribute("precision", ClockValue::Integer(1000));
    clock.add_attribute("absolute", ClockValue::Text("false".into()));

    assert_eq!(clock.name(), Some("monotonic"));
    assert_eq!(clock.frequency(), 1_000_000_000);
    assert_eq!(clock.offset_seconds(), 1_326_476_837);
    assert_eq!(clock.offset_cycles(), 897_235_420);
    assert_eq!(clock.precision(), 1000);
    assert!(!clock.is_absolute());
}

#[test]
fn unknown_attributes_are_preserved() {
    let mut clock = Clock::new();
    clock.add_attribute("vendor_ext", ClockValue::Integer(42));
    assert_eq!(clock.attribute("vendor_ext"), Some(&ClockValue::Integer(42)));
}

#[test]
fn unix_epoch_origin() {
    let mut clock = Clock::new();
    assert!(!clock.has_unix_epoch_origin());
    clock.add_attribute("origin", ClockValue::Text(UNIX_EPOCH.into()));
    assert!(clock.has_unix_epoch_origin());
}

#[test]
fn replacing_an_attribute_keeps_the_last_value() {
    let mut clock = Clock::new();
    clock.add_attribute("freq", ClockValue::Integer(1000));
    clock.add_attribute("freq", ClockValue::Integer(2000));
    assert_eq!(clock.frequency(), 2000);
}
