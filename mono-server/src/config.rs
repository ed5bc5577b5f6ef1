//! Server configuration
//!
//! Environment-driven with compiled defaults. Unset variables fall back
//! to the defaults below; unparseable values are logged and ignored.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

const DEFAULT_ADDR: &str = "0.0.0.0:9100";
const DEFAULT_TICK_MS: u64 = 1000;
const DEFAULT_SCAN_DELAY_MS: u64 = 2000;
const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (MONOBILITY_ADDR)
    pub addr: SocketAddr,

    /// Simulation tick period (MONOBILITY_TICK_MS)
    pub tick: Duration,

    /// How long a mock Bluetooth scan takes (MONOBILITY_SCAN_DELAY_MS)
    pub scan_delay: Duration,

    /// Where tours.json lives (MONOBILITY_DATA_DIR)
    pub data_dir: PathBuf,

    pub gemini: GeminiConfig,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// GEMINI_API_KEY; unset leaves the advisor disabled
    pub api_key: Option<String>,

    /// GEMINI_MODEL
    pub model: String,

    /// GEMINI_BASE_URL, overridable so tests can point at a local stub
    pub base_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let addr = parse_or(
            "MONOBILITY_ADDR",
            std::env::var("MONOBILITY_ADDR").ok(),
            DEFAULT_ADDR.parse().unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 9100))),
        );
        let tick_ms = parse_or(
            "MONOBILITY_TICK_MS",
            std::env::var("MONOBILITY_TICK_MS").ok(),
            DEFAULT_TICK_MS,
        );
        let scan_delay_ms = parse_or(
            "MONOBILITY_SCAN_DELAY_MS",
            std::env::var("MONOBILITY_SCAN_DELAY_MS").ok(),
            DEFAULT_SCAN_DELAY_MS,
        );
        let data_dir = std::env::var("MONOBILITY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        Self {
            addr,
            tick: Duration::from_millis(tick_ms),
            scan_delay: Duration::from_millis(scan_delay_ms),
            data_dir,
            gemini: GeminiConfig {
                api_key: std::env::var("GEMINI_API_KEY")
                    .ok()
                    .filter(|k| !k.is_empty()),
                model: std::env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: std::env::var("GEMINI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            },
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("monobility"))
        .unwrap_or_else(|| PathBuf::from(".monobility"))
}

fn parse_or<T: FromStr>(name: &str, value: Option<String>, default: T) -> T
where
    T::Err: Display,
{
    match value {
        Some(raw) => match raw.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Ignoring {}={}: {}", name, raw, e);
                default
            }
        },
        None => default,
    }
}
