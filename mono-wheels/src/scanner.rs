//! Mock Bluetooth discovery
//!
//! There is no real radio anywhere: a scan is an artificial delay followed
//! by a fixed set of "nearby" wheels from the catalog. The delay itself is
//! the caller's job (the server sleeps for its configured scan time before
//! asking for results), which keeps this crate free of async plumbing.

use crate::catalog;
use mono_core::model::WheelConfig;
use std::time::Duration;

/// How long a simulated scan takes by default
pub const SCAN_DELAY: Duration = Duration::from_millis(2000);

/// Catalog ids a scan reports as discoverable
const NEARBY_IDS: [&str; 5] = [
    "lk-sherman-l",
    "in-v14",
    "b-master-pro",
    "ks-s22",
    "nosfet-aero",
];

/// The wheels a completed scan reports
pub fn discovered_wheels() -> Vec<WheelConfig> {
    NEARBY_IDS.iter().filter_map(|id| catalog::find(id)).collect()
}
