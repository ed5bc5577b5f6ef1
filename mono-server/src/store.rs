//! Tour persistence
//!
//! Finished tours live in a single JSON document under the data directory
//! (`tours.json`), newest first. Loading is best effort: a missing file is
//! an empty log and a malformed one is logged and replaced on the next
//! write. Write failures propagate to the caller.

use anyhow::{Context, Result};
use mono_core::tour::TourRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const TOURS_FILE: &str = "tours.json";

pub struct TourStore {
    path: PathBuf,
    tours: Vec<TourRecord>,
}

impl TourStore {
    /// Open the tour log under `data_dir`, loading whatever is already there
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(TOURS_FILE);
        let tours = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(tours) => tours,
                Err(e) => {
                    warn!("Ignoring malformed tour log {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { path, tours }
    }

    /// All stored tours, newest first
    pub fn list(&self) -> &[TourRecord] {
        &self.tours
    }

    pub fn get(&self, id: &str) -> Option<&TourRecord> {
        self.tours.iter().find(|t| t.id == id)
    }

    /// Prepend a finished tour and write the log back out
    pub fn append(&mut self, tour: TourRecord) -> Result<()> {
        self.tours.insert(0, tour);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating data directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.tours)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing tour log {}", self.path.display()))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mono_core::tour::TrackPoint;
    use mono_core::units::{Kilometers, Kmh, WattHours};

    fn temp_data_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "monobility-store-{}-{}",
            std::process::id(),
            tag
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn tour(id: &str, name: &str) -> TourRecord {
        TourRecord {
            id: id.to_string(),
            name: name.to_string(),
            date: "2026-08-25".to_string(),
            duration_seconds: 120,
            distance: Kilometers(1.4),
            avg_speed: Kmh(21.0),
            max_speed: Kmh(38.5),
            energy_used: WattHours(42.0),
            wheel_model: "Sherman L".to_string(),
            points: vec![TrackPoint {
                lat: 37.7751,
                lon: -122.4190,
                speed: Kmh(21.0),
                timestamp: Utc::now(),
            }],
            media: Vec::new(),
        }
    }

    #[test]
    fn test_open_without_file_is_empty() {
        let dir = temp_data_dir("missing");
        let store = TourStore::open(&dir);
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_persists_newest_first() {
        let dir = temp_data_dir("append");
        let mut store = TourStore::open(&dir);
        store.append(tour("100", "Morning Loop")).unwrap();
        store.append(tour("200", "Evening Run")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].id, "200");
        assert_eq!(store.list()[1].id, "100");

        let reloaded = TourStore::open(&dir);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.list()[0].name, "Evening Run");
        assert_eq!(reloaded.list()[0].points.len(), 1);
    }

    #[test]
    fn test_get_by_id() {
        let dir = temp_data_dir("get");
        let mut store = TourStore::open(&dir);
        store.append(tour("7", "Coastal")).unwrap();

        assert_eq!(store.get("7").map(|t| t.name.as_str()), Some("Coastal"));
        assert!(store.get("8").is_none());
    }

    #[test]
    fn test_malformed_log_starts_empty_and_is_replaced() {
        let dir = temp_data_dir("malformed");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(TOURS_FILE), "{ not json").unwrap();

        let mut store = TourStore::open(&dir);
        assert!(store.is_empty());

        store.append(tour("1", "Fresh Start")).unwrap();
        let reloaded = TourStore::open(&dir);
        assert_eq!(reloaded.len(), 1);
    }
}
