//! Built-in route presets offered when starting a guided ride

use mono_core::tour::{RouteDifficulty, RoutePreset};
use mono_core::units::Kilometers;

pub fn available_routes() -> Vec<RoutePreset> {
    vec![
        RoutePreset {
            id: "1".to_string(),
            name: "Coastal Trail".to_string(),
            distance_km: Kilometers(12.4),
            difficulty: RouteDifficulty::Moderate,
        },
        RoutePreset {
            id: "2".to_string(),
            name: "Mountain Loop".to_string(),
            distance_km: Kilometers(24.1),
            difficulty: RouteDifficulty::Hard,
        },
        RoutePreset {
            id: "3".to_string(),
            name: "City Sprint".to_string(),
            distance_km: Kilometers(5.2),
            difficulty: RouteDifficulty::Easy,
        },
    ]
}

pub fn find(id: &str) -> Option<RoutePreset> {
    available_routes().into_iter().find(|r| r.id == id)
}
