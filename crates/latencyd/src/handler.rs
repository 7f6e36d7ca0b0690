//! Stats request handling: decoded request in, per-region stats out.

use crate::aggregator;
use crate::error::ServiceError;
use crate::store::TelemetryStore;
use crate::types::{StatsRequest, StatsResponse};
use tracing::{debug, error};

/// Compute stats for every requested region.
///
/// Regions are answered in request order. A repeated region keeps its
/// first position since JSON object keys are unique.
pub fn handle(store: &TelemetryStore, request: &StatsRequest) -> Result<StatsResponse, ServiceError> {
    debug!(
        "Stats request: {} region(s), threshold {} ms",
        request.regions.len(),
        request.threshold_ms
    );

    let mut response = StatsResponse::default();
    for region in &request.regions {
        if response.0.contains_key(region) {
            continue;
        }

        let records = store.records_for(region);
        let stats = aggregator::compute(records.iter().copied(), request.threshold_ms);

        if !stats.is_finite() {
            error!("Non-finite statistics for region {}", region);
            return Err(ServiceError::Computation(format!(
                "Non-finite statistics computed for region '{}'",
                region
            )));
        }

        response.0.insert(region.clone(), stats);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RegionStats, TelemetryRecord};

    fn record(region: &str, latency_ms: f64, uptime: f64) -> TelemetryRecord {
        TelemetryRecord {
            region: region.to_string(),
            latency_ms,
            uptime,
        }
    }

    fn request(regions: &[&str], threshold_ms: f64) -> StatsRequest {
        StatsRequest {
            regions: regions.iter().map(|r| r.to_string()).collect(),
            threshold_ms,
        }
    }

    fn sample_store() -> TelemetryStore {
        TelemetryStore::from_records(vec![
            record("us-east", 100.0, 99.9),
            record("us-east", 300.0, 99.5),
            record("emea", 50.0, 100.0),
        ])
    }

    #[test]
    fn test_absent_and_present_regions_keep_request_order() {
        let store = sample_store();
        let response = handle(&store, &request(&["mars", "us-east"], 180.0)).unwrap();

        let keys: Vec<&str> = response.0.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["mars", "us-east"]);
        assert_eq!(response.get("mars"), Some(&RegionStats::empty()));

        let us_east = response.get("us-east").unwrap();
        assert_eq!(us_east.avg_latency, Some(200.0));
        assert_eq!(us_east.p95_latency, Some(290.0));
        assert_eq!(us_east.avg_uptime, Some(99.7));
        assert_eq!(us_east.breaches, 1);
    }

    #[test]
    fn test_repeated_region_appears_once() {
        let store = sample_store();
        let response = handle(&store, &request(&["emea", "us-east", "emea"], 180.0)).unwrap();
        assert_eq!(response.len(), 2);
        assert_eq!(response.0.get_index(0).unwrap().0, "emea");
    }

    #[test]
    fn test_regions_are_independent() {
        let store = sample_store();
        let alone = handle(&store, &request(&["emea"], 10.0)).unwrap();
        let together = handle(&store, &request(&["us-east", "emea"], 10.0)).unwrap();
        assert_eq!(alone.get("emea"), together.get("emea"));
    }

    #[test]
    fn test_huge_finite_latency_is_answered() {
        let store = TelemetryStore::from_records(vec![record("edge", 1e307, 99.0)]);
        let response = handle(&store, &request(&["edge"], 1.0)).unwrap();
        let edge = response.get("edge").unwrap();
        assert_eq!(edge.avg_latency, Some(1e307));
        assert_eq!(edge.p95_latency, Some(1e307));
        assert_eq!(edge.breaches, 1);
    }

    #[test]
    fn test_overflow_is_computation_error() {
        let store = TelemetryStore::from_records(vec![
            record("edge", f64::MAX, 99.0),
            record("edge", f64::MAX, 99.0),
        ]);
        let err = handle(&store, &request(&["edge"], 180.0)).unwrap_err();
        assert!(matches!(err, ServiceError::Computation(_)));
        assert!(err.to_string().contains("edge"));
    }
}
