//! Participant module - token holders in the commons

use crate::TokenBatch;

/// A token holder taking part in governance
///
/// The network engine only reads `holdings` (to weight influence) and
/// `sentiment` (to report the average mood). The simulation driver mutates
/// `sentiment` between rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// Tokens held by the participant
    pub holdings: TokenBatch,

    /// Current attitude toward the commons, nominally in [0.0, 1.0]
    pub sentiment: f64,
}

impl Participant {
    /// Create a new participant
    pub fn new(holdings: TokenBatch, sentiment: f64) -> Self {
        Self {
            holdings,
            sentiment,
        }
    }

    /// Create a participant whose initial sentiment is drawn from a sampler
    ///
    /// Consumes exactly one value from `sentiment_fn`.
    pub fn sampled<F>(holdings: TokenBatch, sentiment_fn: &mut F) -> Self
    where
        F: FnMut() -> f64,
    {
        Self::new(holdings, sentiment_fn())
    }

    /// Number of tokens held, vested or not
    pub fn token_amount(&self) -> f64 {
        self.holdings.amount
    }
}
