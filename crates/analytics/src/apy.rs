//! APY computation from consecutive TVL samples.
//!
//! The estimate is a linear extrapolation of the most recent growth
//! interval, not a rolling average: the data source offers a single TVL
//! reading and no history, so the design accepts noisiness in exchange for
//! simplicity. Callers may smooth at a higher layer if desired.

use serde::{Deserialize, Serialize};

/// Annualization constant: `365 * 24 * 3600` seconds.
pub const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 3600.0;

/// Persisted APY state for one session key.
///
/// Uninitialized until the first observation records a reading; primed
/// afterwards. `last_apy` carries the most recent estimate so that
/// non-advancing samples can echo it without recomputing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ApyState {
    /// TVL of the previous observation.
    pub last_tvl: Option<f64>,
    /// Timestamp of the previous observation, seconds since epoch.
    pub last_timestamp: Option<i64>,
    /// Most recently computed APY percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_apy: Option<f64>,
}

impl ApyState {
    /// True once a prior reading is recorded.
    #[must_use]
    pub fn is_primed(&self) -> bool {
        self.last_tvl.is_some() && self.last_timestamp.is_some()
    }
}

/// Result of one APY observation.
///
/// This is also the wire shape of the read endpoint, minus nothing: the
/// updated state travels separately through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApyEstimate {
    /// Annualized percentage yield.
    pub apy: f64,
    /// `apy` formatted for display, e.g. `"365.00%"`.
    pub readable: String,
    /// The TVL reading this estimate was computed from.
    pub tvl: f64,
    /// TVL delta against the previous sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<f64>,
    /// Seconds elapsed since the previous sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<i64>,
    /// Explanation when no growth rate was computable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Folds one TVL reading into the per-session state and returns the
/// resulting estimate.
///
/// Total by construction: every branch returns a usable (possibly zero)
/// result rather than an error, reflecting the estimator's role as a
/// best-effort display metric.
///
/// - First observation: records the reading, returns zero.
/// - `dt <= 0` (non-advancing or out-of-order sample): state untouched,
///   previous APY echoed. No division happens on this path.
/// - Previous TVL zero: rate undefined, returns zero, reading recorded.
/// - Otherwise: `apy = (growth / last_tvl) * (SECONDS_PER_YEAR / dt) * 100`,
///   reading and estimate recorded.
pub fn observe(current_tvl: f64, current_timestamp: i64, state: &mut ApyState) -> ApyEstimate {
    let (Some(last_tvl), Some(last_timestamp)) = (state.last_tvl, state.last_timestamp) else {
        state.last_tvl = Some(current_tvl);
        state.last_timestamp = Some(current_timestamp);
        state.last_apy = Some(0.0);
        return ApyEstimate {
            apy: 0.0,
            readable: "0%".to_string(),
            tvl: current_tvl,
            growth: None,
            dt: None,
            message: Some("first observation recorded; growth rate not yet computable".to_string()),
        };
    };

    let dt = current_timestamp - last_timestamp;
    let growth = current_tvl - last_tvl;

    if dt <= 0 {
        let apy = state.last_apy.unwrap_or(0.0);
        return ApyEstimate {
            apy,
            readable: format!("{apy:.2}%"),
            tvl: current_tvl,
            growth: Some(growth),
            dt: Some(dt),
            message: Some("no time has elapsed since the previous sample".to_string()),
        };
    }

    state.last_tvl = Some(current_tvl);
    state.last_timestamp = Some(current_timestamp);

    if last_tvl == 0.0 {
        state.last_apy = Some(0.0);
        return ApyEstimate {
            apy: 0.0,
            readable: "0%".to_string(),
            tvl: current_tvl,
            growth: Some(growth),
            dt: Some(dt),
            message: Some("previous TVL was zero; growth rate undefined".to_string()),
        };
    }

    let rate = growth / last_tvl;
    let apy = rate * (SECONDS_PER_YEAR / dt as f64) * 100.0;
    state.last_apy = Some(apy);

    ApyEstimate {
        apy,
        readable: format!("{apy:.2}%"),
        tvl: current_tvl,
        growth: Some(growth),
        dt: Some(dt),
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_primes_state() {
        let mut state = ApyState::default();
        let estimate = observe(1000.0, 1_700_000_000, &mut state);

        assert_eq!(estimate.apy, 0.0);
        assert_eq!(estimate.readable, "0%");
        assert_eq!(estimate.tvl, 1000.0);
        assert!(estimate.growth.is_none());
        assert!(estimate.message.is_some());

        assert!(state.is_primed());
        assert_eq!(state.last_tvl, Some(1000.0));
        assert_eq!(state.last_timestamp, Some(1_700_000_000));
    }

    #[test]
    fn test_one_day_growth_annualizes_to_365x() {
        // 1% growth over one day: 0.01 * (31_536_000 / 86_400) * 100 = 365%.
        let mut state = ApyState {
            last_tvl: Some(1000.0),
            last_timestamp: Some(0),
            last_apy: Some(0.0),
        };
        let estimate = observe(1010.0, 86_400, &mut state);

        assert_eq!(estimate.growth, Some(10.0));
        assert_eq!(estimate.dt, Some(86_400));
        assert!((estimate.apy - 365.0).abs() < 1e-9);
        assert_eq!(estimate.readable, "365.00%");
        assert!(estimate.message.is_none());

        assert_eq!(state.last_tvl, Some(1010.0));
        assert_eq!(state.last_timestamp, Some(86_400));
        assert_eq!(state.last_apy, Some(estimate.apy));
    }

    #[test]
    fn test_non_advancing_sample_leaves_state_unchanged() {
        let primed = ApyState {
            last_tvl: Some(1000.0),
            last_timestamp: Some(86_400),
            last_apy: Some(42.5),
        };

        for timestamp in [86_400, 80_000] {
            let mut state = primed;
            let estimate = observe(1010.0, timestamp, &mut state);
            assert_eq!(estimate.apy, 42.5);
            assert_eq!(estimate.readable, "42.50%");
            assert!(estimate.message.is_some());
            assert_eq!(state, primed);
        }
    }

    #[test]
    fn test_zero_previous_tvl_does_not_divide() {
        let mut state = ApyState {
            last_tvl: Some(0.0),
            last_timestamp: Some(0),
            last_apy: None,
        };
        let estimate = observe(500.0, 3600, &mut state);

        assert_eq!(estimate.apy, 0.0);
        assert_eq!(estimate.readable, "0%");
        assert!(estimate.message.is_some());
        // The reading is still recorded.
        assert_eq!(state.last_tvl, Some(500.0));
        assert_eq!(state.last_timestamp, Some(3600));
    }

    #[test]
    fn test_negative_growth_yields_negative_apy() {
        let mut state = ApyState {
            last_tvl: Some(1000.0),
            last_timestamp: Some(0),
            last_apy: None,
        };
        let estimate = observe(990.0, 86_400, &mut state);
        assert!((estimate.apy + 365.0).abs() < 1e-9);
        assert_eq!(estimate.readable, "-365.00%");
    }

    #[test]
    fn test_estimate_serializes_without_absent_fields() {
        let mut state = ApyState::default();
        let estimate = observe(1000.0, 0, &mut state);
        let json = serde_json::to_value(&estimate).unwrap();
        let map = json.as_object().unwrap();
        assert!(map.contains_key("apy"));
        assert!(map.contains_key("readable"));
        assert!(map.contains_key("tvl"));
        assert!(!map.contains_key("growth"));
        assert!(!map.contains_key("dt"));
    }
}
