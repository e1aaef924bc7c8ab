//! Token holdings and their vesting terms

/// Vesting terms attached to a batch of tokens
///
/// Only the terms are modelled here; how tokens are released over time is
/// decided by the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VestingOptions {
    /// Days before any vested tokens can be spent
    pub cliff_days: u32,

    /// Half-life of the release curve after the cliff, in days
    pub halflife_days: u32,
}

impl VestingOptions {
    /// Create vesting terms
    pub fn new(cliff_days: u32, halflife_days: u32) -> Self {
        Self {
            cliff_days,
            halflife_days,
        }
    }

    /// Terms for tokens that are spendable immediately
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether these terms actually restrict spending
    pub fn is_vesting(&self) -> bool {
        self.cliff_days > 0 || self.halflife_days > 0
    }
}

/// A batch of tokens held by one participant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenBatch {
    /// Number of tokens in the batch
    pub amount: f64,

    /// Vesting terms for the batch
    pub vesting: VestingOptions,
}

impl TokenBatch {
    /// Create a new token batch
    ///
    /// # Panics
    /// Panics if `amount` is negative or not finite
    pub fn new(amount: f64, vesting: VestingOptions) -> Self {
        assert!(
            amount.is_finite() && amount >= 0.0,
            "Token amount must be finite and non-negative"
        );

        Self { amount, vesting }
    }

    /// Create a batch with no vesting terms
    pub fn unvested(amount: f64) -> Self {
        Self::new(amount, VestingOptions::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unvested_batch() {
        let batch = TokenBatch::unvested(250.0);
        assert_eq!(batch.amount, 250.0);
        assert!(!batch.vesting.is_vesting());
    }

    #[test]
    fn test_vesting_batch() {
        let batch = TokenBatch::new(1000.0, VestingOptions::new(10, 30));
        assert_eq!(batch.vesting.cliff_days, 10);
        assert_eq!(batch.vesting.halflife_days, 30);
        assert!(batch.vesting.is_vesting());
    }

    #[test]
    #[should_panic]
    fn test_negative_amount() {
        TokenBatch::unvested(-1.0);
    }
}
