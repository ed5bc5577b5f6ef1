//! Wheel catalog, mock scanner and simulated telemetry source for Monobility

pub mod catalog;
pub mod scanner;
pub mod simulator;

pub use simulator::SimulatedWheel;
