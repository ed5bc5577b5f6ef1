//! Integration tests for the SimulatedWheel

use mono_core::source::TelemetrySource;
use mono_wheels::{catalog, SimulatedWheel};

fn sherman() -> SimulatedWheel {
    let config = catalog::find("lk-sherman-l").expect("catalog wheel");
    SimulatedWheel::with_seed(config, 42)
}

#[test]
fn test_simulator_identity() {
    let wheel = sherman();
    assert_eq!(wheel.id(), "lk-sherman-l");
    assert_eq!(wheel.model(), "Sherman L");
}

#[test]
fn test_simulator_initially_disconnected() {
    let wheel = sherman();
    assert!(
        !wheel.is_connected(),
        "SimulatedWheel should be disconnected before connect()"
    );
}

#[test]
fn test_simulator_poll_when_disconnected_returns_none() {
    let mut wheel = sherman();
    let sample = wheel.poll().unwrap();
    assert!(
        sample.is_none(),
        "poll() should return None while disconnected"
    );
}

#[test]
fn test_simulator_connect_and_disconnect() {
    let mut wheel = sherman();

    wheel.connect().expect("connect() should succeed");
    assert!(wheel.is_connected(), "connected after connect()");

    wheel.disconnect().expect("disconnect() should succeed");
    assert!(!wheel.is_connected(), "disconnected after disconnect()");
}

#[test]
fn test_simulator_produces_valid_sample() {
    let mut wheel = sherman();
    let top_speed = wheel.config().top_speed.0;
    wheel.connect().expect("connect() should succeed");

    let sample = wheel
        .poll()
        .expect("poll() should not error")
        .expect("poll() should return Some after connect()");

    assert!(
        (0.0..=top_speed).contains(&sample.speed.0),
        "speed {} should stay within [0, {}]",
        sample.speed.0,
        top_speed
    );
    assert!(
        (0.0..=100.0).contains(&sample.pwm.0),
        "pwm {} should be a duty percent",
        sample.pwm.0
    );
    assert!(
        (0.0..=100.0).contains(&sample.battery.0),
        "battery {} should be a percent",
        sample.battery.0
    );
    assert!(sample.power.0 >= 0.0, "power should never be negative");
    assert!(sample.current.0 >= 0.0, "current should never be negative");
    assert!(
        sample.voltage.0 <= wheel.config().max_voltage.0,
        "voltage should not exceed the full-charge figure"
    );
    assert_eq!(sample.temperature.0, 28.0, "temperature is held constant");
}

#[test]
fn test_simulator_odometer_is_monotone() {
    let mut wheel = sherman();
    wheel.connect().unwrap();

    let mut last = 0.0;
    for _ in 0..50 {
        let sample = wheel.poll().unwrap().unwrap();
        assert!(
            sample.distance.0 >= last,
            "odometer must never run backwards ({} < {})",
            sample.distance.0,
            last
        );
        last = sample.distance.0;
    }
}

#[test]
fn test_simulator_battery_and_voltage_sag() {
    let mut wheel = sherman();
    wheel.connect().unwrap();

    let mut last_battery = 100.0;
    let mut last_voltage = f32::MAX;
    for _ in 0..50 {
        let sample = wheel.poll().unwrap().unwrap();
        assert!(
            sample.battery.0 <= last_battery,
            "battery should only discharge"
        );
        assert!(
            sample.voltage.0 <= last_voltage,
            "voltage should only sag as distance accrues"
        );
        last_battery = sample.battery.0;
        last_voltage = sample.voltage.0;
    }
}

#[test]
fn test_simulator_speed_never_exceeds_top_speed() {
    let mut wheel = sherman();
    let top_speed = wheel.config().top_speed.0;
    wheel.connect().unwrap();

    for _ in 0..200 {
        let sample = wheel.poll().unwrap().unwrap();
        assert!(
            sample.speed.0 <= top_speed,
            "speed {} broke the rated ceiling {}",
            sample.speed.0,
            top_speed
        );
    }
}

#[test]
fn test_simulator_is_deterministic_by_seed() {
    let config = catalog::find("ks-s22").unwrap();
    let mut a = SimulatedWheel::with_seed(config.clone(), 7);
    let mut b = SimulatedWheel::with_seed(config, 7);
    a.connect().unwrap();
    b.connect().unwrap();

    for _ in 0..10 {
        let sa = a.poll().unwrap().unwrap();
        let sb = b.poll().unwrap().unwrap();
        assert_eq!(sa.speed.0, sb.speed.0);
        assert_eq!(sa.power.0, sb.power.0);
        assert_eq!(sa.pwm.0, sb.pwm.0);
        assert_eq!(sa.distance.0, sb.distance.0);
    }
}

#[test]
fn test_simulator_seeds_diverge() {
    let config = catalog::find("ks-s22").unwrap();
    let mut a = SimulatedWheel::with_seed(config.clone(), 1);
    let mut b = SimulatedWheel::with_seed(config, 2);
    a.connect().unwrap();
    b.connect().unwrap();

    let speeds_a: Vec<f32> = (0..10).map(|_| a.poll().unwrap().unwrap().speed.0).collect();
    let speeds_b: Vec<f32> = (0..10).map(|_| b.poll().unwrap().unwrap().speed.0).collect();
    assert_ne!(speeds_a, speeds_b, "different seeds should walk differently");
}

#[test]
fn test_simulator_reconnect_resets_trip() {
    let mut wheel = sherman();
    wheel.connect().unwrap();

    for _ in 0..30 {
        wheel.poll().unwrap();
    }
    let before = wheel.poll().unwrap().unwrap();
    assert!(before.distance.0 > 0.0, "trip should have accrued distance");

    wheel.disconnect().unwrap();
    wheel.connect().unwrap();

    let after = wheel.poll().unwrap().unwrap();
    assert!(
        after.distance.0 < before.distance.0,
        "reconnecting should start a fresh trip"
    );
    assert!(after.battery.0 >= before.battery.0, "battery resets to full");
}

#[test]
fn test_simulator_sample_serializes_to_json() {
    let mut wheel = sherman();
    wheel.connect().unwrap();

    let sample = wheel.poll().unwrap().unwrap();
    let json = serde_json::to_string(&sample).expect("sample should serialize");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert!(parsed.get("speed").is_some());
    assert!(parsed.get("pwm").is_some());
    assert!(parsed.get("timestamp").is_some());
}
