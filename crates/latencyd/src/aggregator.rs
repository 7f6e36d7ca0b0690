//! Per-region statistics over a slice of telemetry records.
//!
//! Pure functions: no I/O, no shared state.

use crate::types::{RegionStats, TelemetryRecord};

/// Quantile reported as `p95_latency`
pub const P95: f64 = 0.95;

/// Compute stats for `records` against `threshold_ms`.
///
/// Means and the breach count come from a single pass; the percentile
/// needs one sort of the latency values. Empty input yields
/// [`RegionStats::empty`].
pub fn compute<'a, I>(records: I, threshold_ms: f64) -> RegionStats
where
    I: IntoIterator<Item = &'a TelemetryRecord>,
{
    let mut latencies = Vec::new();
    let mut latency_sum = 0.0;
    let mut uptime_sum = 0.0;
    let mut breaches = 0u64;

    for record in records {
        latency_sum += record.latency_ms;
        uptime_sum += record.uptime;
        if record.latency_ms > threshold_ms {
            breaches += 1;
        }
        latencies.push(record.latency_ms);
    }

    if latencies.is_empty() {
        return RegionStats::empty();
    }

    let n = latencies.len() as f64;
    latencies.sort_unstable_by(f64::total_cmp);

    RegionStats {
        avg_latency: Some(round2(latency_sum / n)),
        p95_latency: percentile(&latencies, P95).map(round2),
        avg_uptime: Some(round2(uptime_sum / n)),
        breaches,
    }
}

/// Linear interpolation between order statistics.
///
/// `sorted` must be ascending; `q` is clamped to [0, 1].
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - rank.floor();
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Round half away from zero to 2 decimal places.
///
/// Values too large to scale by 100 have no fractional cents and are
/// returned unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}
