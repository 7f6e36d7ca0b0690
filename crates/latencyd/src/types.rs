//! Wire and data types for latencyd.

use crate::error::ServiceError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys a stats request must carry (non-null)
pub const REQUIRED_FIELDS: [&str; 2] = ["regions", "threshold_ms"];

/// One telemetry observation from the dataset file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub region: String,
    pub latency_ms: f64,
    pub uptime: f64,
}

/// Aggregated statistics for one region
///
/// Numeric fields are `None` when no records matched the region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub avg_latency: Option<f64>,
    pub p95_latency: Option<f64>,
    pub avg_uptime: Option<f64>,
    pub breaches: u64,
}

impl RegionStats {
    /// Stats for a region with no matching records
    pub const fn empty() -> Self {
        Self {
            avg_latency: None,
            p95_latency: None,
            avg_uptime: None,
            breaches: 0,
        }
    }

    /// True if every present statistic is a finite number
    pub fn is_finite(&self) -> bool {
        [self.avg_latency, self.p95_latency, self.avg_uptime]
            .iter()
            .flatten()
            .all(|v| v.is_finite())
    }
}

/// Body of a stats request
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsRequest {
    pub regions: Vec<String>,
    pub threshold_ms: f64,
}

impl StatsRequest {
    /// Decode and validate a raw request body.
    ///
    /// Every missing (or null) required key is reported in one message.
    /// Types are checked strictly: `"180"` is not a number.
    pub fn decode(body: &[u8]) -> Result<Self, ServiceError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ServiceError::Validation(format!("Invalid JSON body: {}", e)))?;

        let object = value.as_object().ok_or_else(|| {
            ServiceError::Validation("Request body must be a JSON object".to_string())
        })?;

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|key| object.get(*key).map_or(true, Value::is_null))
            .collect();
        if !missing.is_empty() {
            return Err(ServiceError::Validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let request: StatsRequest = serde_json::from_value(value)
            .map_err(|e| ServiceError::Validation(format!("Invalid request: {}", e)))?;

        if request.regions.is_empty() {
            return Err(ServiceError::Validation(
                "Field 'regions' must not be empty".to_string(),
            ));
        }

        Ok(request)
    }
}

/// Stats keyed by region, in request order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsResponse(pub IndexMap<String, RegionStats>);

impl StatsResponse {
    pub fn get(&self, region: &str) -> Option<&RegionStats> {
        self.0.get(region)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Liveness report for GET /v1/health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub started_at: String,
    pub uptime_seconds: u64,
    pub records: usize,
    pub regions: usize,
}
