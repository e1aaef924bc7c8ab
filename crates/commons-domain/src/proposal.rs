//! Proposal module - funding requests competing for conviction

use std::fmt;

/// Lifecycle status of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProposalStatus {
    /// Submitted but not yet open for conviction
    #[default]
    Idle,

    /// Accruing conviction
    Active,

    /// Passed its trigger and was funded
    Completed,

    /// Closed without passing
    Failed,

    /// Withdrawn by its author
    Cancelled,
}

impl ProposalStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Idle => "idle",
            ProposalStatus::Active => "active",
            ProposalStatus::Completed => "completed",
            ProposalStatus::Failed => "failed",
            ProposalStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "idle" => Some(ProposalStatus::Idle),
            "active" => Some(ProposalStatus::Active),
            "completed" => Some(ProposalStatus::Completed),
            "failed" => Some(ProposalStatus::Failed),
            "cancelled" => Some(ProposalStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::str::FromStr for ProposalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid proposal status: {}", s))
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for funds from the commons
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    /// Funds requested from the pool
    pub funds_requested: f64,

    /// Conviction required for the proposal to pass
    pub trigger: f64,

    /// Current lifecycle status
    pub status: ProposalStatus,

    /// Conviction accrued by the proposal itself
    pub conviction: f64,
}

impl Proposal {
    /// Create a new idle proposal
    pub fn new(funds_requested: f64, trigger: f64) -> Self {
        Self {
            funds_requested,
            trigger,
            status: ProposalStatus::Idle,
            conviction: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_proposal_is_idle() {
        let proposal = Proposal::new(10.0, 5.0);
        assert_eq!(proposal.status, ProposalStatus::Idle);
        assert_eq!(proposal.conviction, 0.0);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Active".parse::<ProposalStatus>(), Ok(ProposalStatus::Active));
        assert_eq!(ProposalStatus::parse("cancelled"), Some(ProposalStatus::Cancelled));
        assert!("funded".parse::<ProposalStatus>().is_err());
    }

    #[test]
    fn test_status_display_matches_parse() {
        for status in [
            ProposalStatus::Idle,
            ProposalStatus::Active,
            ProposalStatus::Completed,
            ProposalStatus::Failed,
            ProposalStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<ProposalStatus>(), Ok(status));
        }
    }
}
