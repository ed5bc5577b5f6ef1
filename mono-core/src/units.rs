//! Type-safe wrappers for physical units
//!
//! This module provides newtype wrappers around f32 to ensure
//! type safety and prevent unit confusion.
//!
//! All unit types serialize with 2 decimal places to keep JSON payloads
//! dashboard-friendly.

use serde::{Deserialize, Serialize};

/// Round f32 to 2 decimal places for compact JSON serialization
fn round2<S: serde::Serializer>(val: &f32, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f32((*val * 100.0).round() / 100.0)
}

/// Kilometers per hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kmh(#[serde(serialize_with = "round2")] pub f32);

/// Kilometers (odometer distances)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kilometers(#[serde(serialize_with = "round2")] pub f32);

/// Volts (pack voltage)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volts(#[serde(serialize_with = "round2")] pub f32);

/// Amps (motor current)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amps(#[serde(serialize_with = "round2")] pub f32);

/// Watts (instantaneous power draw)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Watts(#[serde(serialize_with = "round2")] pub f32);

/// Watt-hours (battery capacity, energy used)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WattHours(#[serde(serialize_with = "round2")] pub f32);

/// Celsius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Celsius(#[serde(serialize_with = "round2")] pub f32);

/// Percent (0.0 to 100.0), used for battery level and PWM duty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percent(#[serde(serialize_with = "round2")] pub f32);

impl Percent {
    /// Create a new percent value, clamping to [0.0, 100.0]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 100.0))
    }

    /// Get as a fraction (0.0 to 1.0)
    pub fn as_fraction(&self) -> f32 {
        self.0 / 100.0
    }
}
