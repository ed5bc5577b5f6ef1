//! Monobility Server Library
//!
//! Exposes server components for integration testing.

pub mod advisor;
pub mod api;
pub mod config;
pub mod manager;
pub mod presets;
pub mod recorder;
pub mod state;
pub mod store;
