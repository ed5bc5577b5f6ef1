//! Monobility Core Library
//!
//! This crate provides the telemetry data model, tour records and the
//! telemetry source trait shared by the wheel implementations and the server.

pub mod gpx;
pub mod model;
pub mod source;
pub mod tour;
pub mod units;

pub use model::{TelemetryHistory, TelemetrySample, WheelConfig};
pub use source::TelemetrySource;
pub use tour::{TourError, TourRecord};
