//! Conviction voting threshold
//!
//! Implements the trigger formula that decides how much conviction a
//! proposal must accrue before it can pass:
//!
//! ```text
//! share   = requested / funds
//! trigger = rho * supply / ((1 - alpha) * (beta - share)^2)   if share < beta
//!         = infinity                                          otherwise
//! ```
//!
//! where `beta` is the largest share of the pool a single proposal may request.

/// Default conviction decay per round
pub const DEFAULT_ALPHA: f64 = 0.9;

/// Default weight scaling the threshold
pub const DEFAULT_RHO: f64 = 0.0025;

/// Parameters of the conviction voting formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvictionParams {
    /// Fraction of conviction retained each round, in [0.0, 1.0)
    pub alpha: f64,

    /// Weight scaling the threshold
    pub rho: f64,
}

impl Default for ConvictionParams {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            rho: DEFAULT_RHO,
        }
    }
}

/// Compute the conviction a proposal needs to pass
///
/// Returns `f64::INFINITY` when the request is at least `max_proposal_request`
/// of the pool (or the pool is empty): such a proposal can never pass.
///
/// # Examples
///
/// ```
/// use commons_domain::{trigger_threshold, ConvictionParams};
///
/// let params = ConvictionParams { alpha: 0.5, rho: 0.01 };
/// // share = 0.1, beta - share = 0.1
/// let trigger = trigger_threshold(100.0, 1000.0, 1000.0, 0.2, &params);
/// assert!((trigger - 2000.0).abs() < 1e-6);
///
/// assert!(trigger_threshold(500.0, 1000.0, 1000.0, 0.2, &params).is_infinite());
/// ```
pub fn trigger_threshold(
    requested: f64,
    funds: f64,
    supply: f64,
    max_proposal_request: f64,
    params: &ConvictionParams,
) -> f64 {
    if funds <= 0.0 {
        return f64::INFINITY;
    }

    let share = requested / funds;
    if share >= max_proposal_request {
        return f64::INFINITY;
    }

    let gap = max_proposal_request - share;
    params.rho * supply / ((1.0 - params.alpha) * gap * gap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_value() {
        let params = ConvictionParams { alpha: 0.5, rho: 0.01 };
        // share = 0.05, gap = 0.15
        let trigger = trigger_threshold(50.0, 1000.0, 4000.0, 0.2, &params);
        let expected = 0.01 * 4000.0 / (0.5 * 0.15 * 0.15);
        assert!((trigger - expected).abs() < 1e-9);
    }

    #[test]
    fn test_request_over_limit_is_infinite() {
        let params = ConvictionParams::default();
        assert!(trigger_threshold(200.0, 1000.0, 4e6, 0.2, &params).is_infinite());
        assert!(trigger_threshold(30_000.0, 3000.0, 4e6, 0.2, &params).is_infinite());
    }

    #[test]
    fn test_empty_pool_is_infinite() {
        let params = ConvictionParams::default();
        assert!(trigger_threshold(1.0, 0.0, 4e6, 0.2, &params).is_infinite());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Asking for more never lowers the threshold
        #[test]
        fn test_threshold_monotonic_in_request(
            a in 0.0f64..1000.0,
            b in 0.0f64..1000.0,
        ) {
            let params = ConvictionParams::default();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };

            let t_low = trigger_threshold(low, 10_000.0, 1e6, 0.2, &params);
            let t_high = trigger_threshold(high, 10_000.0, 1e6, 0.2, &params);

            prop_assert!(t_high >= t_low);
        }

        /// Property: Finite thresholds are positive
        #[test]
        fn test_threshold_positive(requested in 0.0f64..1999.0) {
            let params = ConvictionParams::default();
            let trigger = trigger_threshold(requested, 10_000.0, 1e6, 0.2, &params);
            prop_assert!(trigger > 0.0);
        }
    }
}
