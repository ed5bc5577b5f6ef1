//! Static wheel catalog
//!
//! Spec sheets for the wheels the app knows how to simulate. Figures are
//! the manufacturers' rated numbers (full-charge voltage, cutoff voltage,
//! series count, top speed, pack capacity).

use mono_core::model::{WheelBrand, WheelConfig};
use mono_core::units::{Kmh, Volts, WattHours};

fn wheel(
    id: &str,
    brand: WheelBrand,
    model: &str,
    max_voltage: f32,
    min_voltage: f32,
    series: u32,
    top_speed: f32,
    battery_capacity: f32,
) -> WheelConfig {
    WheelConfig {
        id: id.to_string(),
        brand,
        model: model.to_string(),
        max_voltage: Volts(max_voltage),
        min_voltage: Volts(min_voltage),
        series,
        top_speed: Kmh(top_speed),
        battery_capacity: WattHours(battery_capacity),
    }
}

/// Every wheel model the app can register
pub fn available_wheels() -> Vec<WheelConfig> {
    use WheelBrand::*;
    vec![
        wheel("lk-sherman-l", Leaperkim, "Sherman L", 151.2, 115.0, 36, 105.0, 3200.0),
        wheel("lk-lynx", Leaperkim, "Lynx", 151.2, 115.0, 36, 95.0, 2700.0),
        wheel("lk-sherman-s", Leaperkim, "Sherman S", 100.8, 72.0, 24, 75.0, 3600.0),
        wheel("in-v14", Inmotion, "V14 Adventure (50GB)", 134.4, 100.0, 32, 70.0, 2400.0),
        wheel("in-v13", Inmotion, "V13 Challenger", 126.0, 90.0, 30, 90.0, 3024.0),
        wheel("b-et-max", Begode, "ET-Max", 168.0, 120.0, 40, 110.0, 3000.0),
        wheel("b-master-pro", Begode, "Master Pro v3", 134.4, 102.4, 32, 95.0, 4800.0),
        wheel("b-blitz", Begode, "Blitz", 134.4, 102.4, 32, 85.0, 2400.0),
        wheel("b-master", Begode, "Master v4", 134.4, 102.4, 32, 85.0, 2400.0),
        wheel("ks-f22", Kingsong, "F22", 126.0, 90.0, 30, 80.0, 2400.0),
        wheel("ks-s22", Kingsong, "S22 Pro", 126.0, 90.0, 30, 70.0, 2220.0),
        wheel("nosfet-aero", Nosfet, "Aero", 151.2, 115.0, 36, 100.0, 2800.0),
        wheel("apex-custom", Apex, "Apex One", 134.4, 100.0, 32, 90.0, 2500.0),
        wheel("aeon-high", Aeon, "Aeon Pulse", 126.0, 90.0, 30, 85.0, 2400.0),
    ]
}

/// Look up a wheel by its catalog id
pub fn find(id: &str) -> Option<WheelConfig> {
    available_wheels().into_iter().find(|w| w.id == id)
}
