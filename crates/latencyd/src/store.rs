//! Telemetry store: the dataset snapshot, loaded once and read-only afterwards.
//!
//! The store is built during startup and shared behind `Arc<AppState>`.
//! There is no reload path; handlers only see `records_for`.

use crate::error::StoreError;
use crate::types::TelemetryRecord;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub struct TelemetryStore {
    records: Vec<TelemetryRecord>,
    // region -> positions in `records`, ascending
    by_region: HashMap<String, Vec<usize>>,
}

impl TelemetryStore {
    /// Load the dataset file (a JSON array of records)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<TelemetryRecord> =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let store = Self::from_records(records);
        info!(
            "Loaded {} telemetry records across {} regions from {}",
            store.len(),
            store.region_count(),
            path.display()
        );
        Ok(store)
    }

    pub fn from_records(records: Vec<TelemetryRecord>) -> Self {
        let mut by_region: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_region.entry(record.region.clone()).or_default().push(idx);
        }
        Self { records, by_region }
    }

    /// Records for `region`, in file order. Empty if the region is unknown.
    pub fn records_for(&self, region: &str) -> Vec<&TelemetryRecord> {
        self.by_region
            .get(region)
            .map(|positions| positions.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn region_count(&self) -> usize {
        self.by_region.len()
    }
}
