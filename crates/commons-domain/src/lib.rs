//! Commons Domain Layer
//!
//! The entity model of the commons governance network. It has ZERO external
//! dependencies and defines the values that the network engine places on its
//! nodes.
//!
//! ## Key Concepts
//!
//! - **Participant**: A token holder with a sentiment toward the commons
//! - **Proposal**: A funding request, accruing conviction until it passes its trigger
//! - **Token Batch**: The tokens a participant holds plus their vesting terms
//! - **Trigger Threshold**: The conviction a proposal needs, from the conviction voting formula
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure value types and formulas only
//! - Sentiment update rules and vesting release live with the simulation driver

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod conviction;
pub mod participant;
pub mod proposal;
pub mod token;

// Re-exports for convenience
pub use conviction::{trigger_threshold, ConvictionParams};
pub use participant::Participant;
pub use proposal::{Proposal, ProposalStatus};
pub use token::{TokenBatch, VestingOptions};
