//! Influence weighting between participants
//!
//! The weight of an influence edge is produced by an [`InfluencePolicy`]
//! from the two participants and one exponential draw. Edge builders take the
//! policy as a parameter so the weighting can be swapped without touching
//! graph construction.

use commons_domain::Participant;

/// Maps (source, target, exponential sample) to an influence weight
///
/// Implementations must be deterministic in their inputs and return a weight
/// in (0.0, 1.0].
pub trait InfluencePolicy {
    /// Weight of the influence `source` exerts on `target`
    fn influence(&self, source: &Participant, target: &Participant, sample: f64) -> f64;
}

/// Default policy: larger relative holdings carry more sway, damped by the draw
///
/// ```text
/// ratio  = h_source / (h_source + h_target)      (0.5 when both hold nothing)
/// weight = ((1 + ratio) / 2) / (1 + sample)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldingsInfluence;

impl InfluencePolicy for HoldingsInfluence {
    fn influence(&self, source: &Participant, target: &Participant, sample: f64) -> f64 {
        let held = source.token_amount();
        let total = held + target.token_amount();
        let ratio = if total > 0.0 { held / total } else { 0.5 };

        ((1.0 + ratio) / 2.0) / (1.0 + sample.max(0.0))
    }
}

/// Policy returning the same weight for every pair
#[derive(Debug, Clone, Copy)]
pub struct FixedInfluence(pub f64);

impl InfluencePolicy for FixedInfluence {
    fn influence(&self, _source: &Participant, _target: &Participant, _sample: f64) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commons_domain::TokenBatch;

    fn holder(amount: f64) -> Participant {
        Participant::new(TokenBatch::unvested(amount), 0.5)
    }

    #[test]
    fn test_larger_holder_has_more_influence() {
        let whale = holder(900.0);
        let minnow = holder(100.0);

        let down = HoldingsInfluence.influence(&whale, &minnow, 0.5);
        let up = HoldingsInfluence.influence(&minnow, &whale, 0.5);
        assert!(down > up);
    }

    #[test]
    fn test_zero_holdings_split_evenly() {
        let a = holder(0.0);
        let b = holder(0.0);

        // ratio 0.5, sample 0 -> 0.75
        assert_eq!(HoldingsInfluence.influence(&a, &b, 0.0), 0.75);
    }

    #[test]
    fn test_fixed_influence() {
        let a = holder(1.0);
        let b = holder(2.0);
        assert_eq!(FixedInfluence(0.5).influence(&a, &b, 123.0), 0.5);
    }
}
