//! Telemetry source trait definition

use crate::model::TelemetrySample;
use anyhow::Result;

/// Trait for wheel telemetry sources
///
/// Each source is responsible for:
/// - Establishing and tearing down the link to one wheel
/// - Producing telemetry samples while connected
/// - Reporting the identity of the wheel it speaks for
pub trait TelemetrySource: Send + Sync {
    /// Catalog id of the wheel this source speaks for (e.g. "lk-sherman-l")
    fn id(&self) -> &str;

    /// Human-readable model name (e.g. "Sherman L")
    fn model(&self) -> &str;

    /// Open the link and reset trip state
    ///
    /// Called when the rider selects this wheel. Reconnecting starts a
    /// fresh trip: odometer, speed and battery return to their initial
    /// values.
    fn connect(&mut self) -> Result<()>;

    /// Close the link
    fn disconnect(&mut self) -> Result<()>;

    /// Produce the next telemetry sample
    ///
    /// Returns:
    /// - `Ok(Some(sample))` if a new sample is available
    /// - `Ok(None)` if disconnected or no new data (non-blocking)
    /// - `Err(_)` if an error occurred
    fn poll(&mut self) -> Result<Option<TelemetrySample>>;

    /// Whether the link is currently open
    fn is_connected(&self) -> bool;
}
