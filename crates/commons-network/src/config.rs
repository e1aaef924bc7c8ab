//! Configuration for network construction
//!
//! Defines the hatch parameters used to price the initial proposal, the
//! conviction formula constants, and the default conflict rate.

use crate::error::{NetworkError, Result};
use commons_domain::conviction::{DEFAULT_ALPHA, DEFAULT_RHO};
use commons_domain::ConvictionParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Probability that two proposals conflict when no rate is given
pub const DEFAULT_CONFLICT_RATE: f64 = 0.25;

/// Parameters of the commons at hatch time
///
/// Used to derive the trigger of the initial proposal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HatchParams {
    /// Funds available in the pool
    pub funding_pool: f64,

    /// Total token supply
    pub token_supply: f64,

    /// Largest share of the pool one proposal may request, in (0.0, 1.0]
    pub max_proposal_request: f64,
}

impl Default for HatchParams {
    fn default() -> Self {
        Self {
            funding_pool: 3_000.0,
            token_supply: 4e6,
            max_proposal_request: 0.2,
        }
    }
}

/// Conviction formula constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvictionConfig {
    /// Fraction of conviction retained each round
    pub alpha: f64,

    /// Weight scaling the trigger threshold
    pub rho: f64,
}

impl Default for ConvictionConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            rho: DEFAULT_RHO,
        }
    }
}

impl ConvictionConfig {
    /// Domain parameters for the trigger formula
    pub fn params(&self) -> ConvictionParams {
        ConvictionParams {
            alpha: self.alpha,
            rho: self.rho,
        }
    }
}

/// Configuration for building and growing the network
///
/// # Examples
///
/// ```
/// use commons_network::NetworkConfig;
///
/// let config = NetworkConfig::default();
/// assert_eq!(config.conflict_rate, 0.25);
///
/// let config = NetworkConfig::contentious();
/// assert!(config.conflict_rate > NetworkConfig::default().conflict_rate);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Probability that a new proposal conflicts with each existing one
    #[serde(default = "default_conflict_rate")]
    pub conflict_rate: f64,

    /// Hatch parameters
    #[serde(default)]
    pub hatch: HatchParams,

    /// Conviction formula constants
    #[serde(default)]
    pub conviction: ConvictionConfig,
}

fn default_conflict_rate() -> f64 {
    DEFAULT_CONFLICT_RATE
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            conflict_rate: DEFAULT_CONFLICT_RATE,
            hatch: HatchParams::default(),
            conviction: ConvictionConfig::default(),
        }
    }
}

impl NetworkConfig {
    /// Proposals frequently exclude one another
    pub fn contentious() -> Self {
        Self {
            conflict_rate: 0.5,
            ..Self::default()
        }
    }

    /// Proposals rarely exclude one another
    pub fn harmonious() -> Self {
        Self {
            conflict_rate: 0.05,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.conflict_rate) {
            return Err(NetworkError::Config(format!(
                "conflict_rate must be in [0, 1], got {}",
                self.conflict_rate
            )));
        }
        if !(self.hatch.funding_pool > 0.0) {
            return Err(NetworkError::Config(
                "hatch.funding_pool must be greater than 0".to_string(),
            ));
        }
        if !(self.hatch.token_supply > 0.0) {
            return Err(NetworkError::Config(
                "hatch.token_supply must be greater than 0".to_string(),
            ));
        }
        if !(self.hatch.max_proposal_request > 0.0 && self.hatch.max_proposal_request <= 1.0) {
            return Err(NetworkError::Config(
                "hatch.max_proposal_request must be in (0, 1]".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.conviction.alpha) {
            return Err(NetworkError::Config(
                "conviction.alpha must be in [0, 1)".to_string(),
            ));
        }
        if !(self.conviction.rho > 0.0) {
            return Err(NetworkError::Config(
                "conviction.rho must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| NetworkError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| NetworkError::Config(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}
