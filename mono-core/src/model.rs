//! Telemetry and device data model
//!
//! Defines the TelemetrySample structure produced by every telemetry source,
//! the bounded in-memory history window the dashboard reads, and the static
//! wheel profile a source is seeded from.

use crate::units::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// PWM duty above this is the overload alert band
pub const PWM_ALERT_THRESHOLD: f32 = 80.0;

/// Number of samples retained in the trailing history window
pub const HISTORY_CAPACITY: usize = 100;

/// One telemetry reading from a wheel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Ground speed in km/h
    pub speed: Kmh,

    /// Battery state of charge (0-100)
    pub battery: Percent,

    /// Controller temperature
    pub temperature: Celsius,

    /// Instantaneous power draw in watts
    pub power: Watts,

    /// Pack voltage
    pub voltage: Volts,

    /// Motor current in amps
    pub current: Amps,

    /// Motor PWM duty (0-100), the overload headroom proxy
    pub pwm: Percent,

    /// Cumulative trip distance in km since the wheel connected
    pub distance: Kilometers,

    /// When this sample was taken
    pub timestamp: DateTime<Utc>,
}

impl TelemetrySample {
    /// Whether the PWM duty is in the alert band
    pub fn pwm_alert(&self) -> bool {
        self.pwm.0 > PWM_ALERT_THRESHOLD
    }

    /// Remaining PWM headroom before full duty (0-100)
    pub fn pwm_headroom(&self) -> Percent {
        Percent::new(100.0 - self.pwm.0)
    }
}

/// Bounded trailing window of the most recent telemetry samples
///
/// Pushing past the capacity evicts the oldest sample. The window lives
/// in memory only and is never persisted.
#[derive(Debug, Clone)]
pub struct TelemetryHistory {
    samples: VecDeque<TelemetrySample>,
    capacity: usize,
}

impl TelemetryHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest when the window is full
    pub fn push(&mut self, sample: TelemetrySample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// The most recent sample, if any tick has happened yet
    pub fn latest(&self) -> Option<&TelemetrySample> {
        self.samples.back()
    }

    /// Oldest-first snapshot of the window
    pub fn samples(&self) -> Vec<TelemetrySample> {
        self.samples.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for TelemetryHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// EUC manufacturers present in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelBrand {
    Begode,
    Kingsong,
    Inmotion,
    Leaperkim,
    Nosfet,
    Apex,
    Aeon,
    #[serde(rename = "Extreme Bull")]
    ExtremeBull,
}

/// Static spec sheet for one wheel model
///
/// Defined at build time in the catalog; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    pub id: String,
    pub brand: WheelBrand,
    pub model: String,

    /// Pack voltage at full charge
    pub max_voltage: Volts,

    /// Cutoff voltage
    pub min_voltage: Volts,

    /// Cell series count (e.g. 30 for a 30S pack)
    pub series: u32,

    /// Rated top speed in km/h
    pub top_speed: Kmh,

    /// Rated battery capacity in Wh
    pub battery_capacity: WattHours,
}

/// Pedal stiffness mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RideMode {
    Soft,
    Medium,
    Hard,
}

impl Default for RideMode {
    fn default() -> Self {
        RideMode::Hard
    }
}
