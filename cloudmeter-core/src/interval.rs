//! Quantization of a requested sampling step to a supported `az` interval.

use std::time::Duration;

/// A sampling interval accepted by the metrics-query command.
#[derive(Debug, Clone, Copy)]
pub struct SupportedInterval {
    pub display: &'static str,
    pub duration_ms: u64,
}

const MINUTE_MS: u64 = 60 * 1000;
const HOUR_MS: u64 = 60 * MINUTE_MS;

/// The intervals the provider accepts, ascending.
pub const SUPPORTED_INTERVALS: [SupportedInterval; 8] = [
    SupportedInterval { display: "1m", duration_ms: MINUTE_MS },
    SupportedInterval { display: "5m", duration_ms: 5 * MINUTE_MS },
    SupportedInterval { display: "15m", duration_ms: 15 * MINUTE_MS },
    SupportedInterval { display: "30m", duration_ms: 30 * MINUTE_MS },
    SupportedInterval { display: "1h", duration_ms: HOUR_MS },
    SupportedInterval { display: "6h", duration_ms: 6 * HOUR_MS },
    SupportedInterval { display: "12h", duration_ms: 12 * HOUR_MS },
    SupportedInterval { display: "1d", duration_ms: 24 * HOUR_MS },
];

/// Snaps `step` to the supported interval with the smallest absolute distance.
///
/// This is a nearest-neighbor match, not a ceiling or floor: a step between
/// two supported intervals gets whichever is closer, and an exact midpoint
/// gets the smaller of the two (the catalog is scanned in ascending order and
/// only a strictly smaller distance displaces the current pick).
pub fn quantize_step(step: Duration) -> &'static str {
    let step_ms = step.as_millis();
    let mut best = &SUPPORTED_INTERVALS[0];
    for candidate in &SUPPORTED_INTERVALS[1..] {
        if (candidate.duration_ms as u128).abs_diff(step_ms)
            < (best.duration_ms as u128).abs_diff(step_ms)
        {
            best = candidate;
        }
    }
    best.display
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(n: u64) -> Duration {
        Duration::from_secs(n * 60)
    }

    #[test]
    fn exact_matches() {
        assert_eq!(quantize_step(minutes(1)), "1m");
        assert_eq!(quantize_step(minutes(30)), "30m");
        assert_eq!(quantize_step(minutes(24 * 60)), "1d");
    }

    #[test]
    fn snaps_to_nearest() {
        // 7 minutes is closer to 5m than to 15m
        assert_eq!(quantize_step(minutes(7)), "5m");
        // 50 minutes is closer to 1h than to 30m
        assert_eq!(quantize_step(minutes(50)), "1h");
    }

    #[test]
    fn midpoint_resolves_to_smaller_interval() {
        // 3m is equidistant from 1m and 5m
        assert_eq!(quantize_step(minutes(3)), "1m");
        // 45m is equidistant from 30m and 1h
        assert_eq!(quantize_step(minutes(45)), "30m");
    }

    #[test]
    fn clamps_to_catalog_bounds() {
        assert_eq!(quantize_step(Duration::from_millis(1)), "1m");
        assert_eq!(quantize_step(minutes(10_000)), "1d");
    }
}
