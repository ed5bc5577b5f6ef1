//! Simulated wheel that generates synthetic telemetry
//!
//! Drives a bounded random walk seeded by the wheel's rated specs: speed
//! wanders upward-biased below the rated top speed, power and PWM follow
//! from it, voltage and battery sag with the odometer. Produces plausible
//! EUC telemetry at 1Hz without any hardware.

use anyhow::Result;
use chrono::Utc;
use mono_core::{model::TelemetrySample, source::TelemetrySource, units::*, WheelConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Controller temperature reported by the simulation (held constant)
const AMBIENT_TEMP_C: f32 = 28.0;

pub struct SimulatedWheel {
    config: WheelConfig,
    connected: bool,
    rng: StdRng,
    speed: f32,
    distance: f32,
}

impl SimulatedWheel {
    pub fn new(config: WheelConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Deterministic variant for tests
    pub fn with_seed(config: WheelConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: WheelConfig, rng: StdRng) -> Self {
        Self {
            config,
            connected: false,
            rng,
            speed: 0.0,
            distance: 0.0,
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    fn generate_sample(&mut self) -> TelemetrySample {
        let top_speed = self.config.top_speed.0;
        let max_voltage = self.config.max_voltage.0;

        // Upward-biased walk, clamped to the rated top speed
        let delta = (self.rng.gen::<f32>() - 0.4) * 6.0;
        self.speed = (self.speed + delta).clamp(0.0, top_speed);

        let power_multiplier = self.config.series as f32 * 12.0;
        let power = (self.speed * power_multiplier * self.rng.gen_range(0.8..1.3)).round();
        let pwm = (self.speed / top_speed * 85.0 + self.rng.gen_range(0.0..5.0)).min(100.0);

        // Voltage, battery and current sag with the odometer reading
        // before this tick advances it
        let voltage = max_voltage - self.distance * 0.25;
        let battery = (100.0 - self.distance * 1.1).max(0.0);
        let current = (power / (max_voltage - self.distance * 0.3)).max(0.0);

        // One second of travel at the new speed
        self.distance += self.speed / 3600.0;

        TelemetrySample {
            speed: Kmh(self.speed),
            battery: Percent::new(battery),
            temperature: Celsius(AMBIENT_TEMP_C),
            power: Watts(power),
            voltage: Volts(voltage),
            current: Amps(current),
            pwm: Percent::new(pwm),
            distance: Kilometers(self.distance),
            timestamp: Utc::now(),
        }
    }
}

impl TelemetrySource for SimulatedWheel {
    fn id(&self) -> &str {
        &self.config.id
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        self.speed = 0.0;
        self.distance = 0.0;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<TelemetrySample>> {
        if !self.connected {
            return Ok(None);
        }

        Ok(Some(self.generate_sample()))
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
