//! Commons Network Engine
//!
//! A typed directed graph of participants and proposals, the builders that
//! wire it together, and the aggregate metrics a governance simulation reads
//! from it every step.
//!
//! ## Key Concepts
//!
//! - **Network**: The owned graph store; node ids are assigned in insertion order
//! - **Support**: participant -> proposal, carrying affinity and accumulated conviction
//! - **Conflict**: proposal -> proposal, rolled once per pair at a configurable rate
//! - **Influence**: participant -> participant, weighted by an [`InfluencePolicy`]
//!
//! ## Randomness
//!
//! Nothing in this crate owns a random number generator. Every builder takes
//! the sampler it needs as a `FnMut() -> f64`, so a caller that supplies
//! seeded samplers gets a reproducible graph.
//!
//! ## Example
//!
//! ```
//! use commons_network::{add_proposal, bootstrap_network, HatchParams};
//! use commons_domain::{Proposal, TokenBatch};
//!
//! let batches = vec![TokenBatch::unvested(1000.0); 4];
//! let mut network = bootstrap_network(
//!     &batches,
//!     &HatchParams::default(),
//!     &mut || 0.5,
//!     &mut || 0.5,
//!     &mut || 500.0,
//!     &mut || 1.0,
//! )
//! .unwrap();
//!
//! add_proposal(&mut network, Proposal::new(250.0, 1e6), &mut || 0.5).unwrap();
//! assert_eq!(network.summary().proposals, 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bootstrap;
pub mod builders;
pub mod config;
pub mod error;
pub mod graph;
pub mod influence;
pub mod metrics;
pub mod query;

// Re-exports for convenience
pub use bootstrap::{
    add_participant, add_proposal, add_proposal_with_config, add_proposal_with_rate,
    bootstrap_network, bootstrap_network_with_config,
};
pub use builders::{
    setup_conflict_edges, setup_influence_edges_bulk, setup_influence_edges_bulk_with,
    setup_influence_edges_single, setup_influence_edges_single_with, setup_support_edges,
};
pub use config::{ConvictionConfig, HatchParams, NetworkConfig, DEFAULT_CONFLICT_RATE};
pub use error::{NetworkError, Result};
pub use graph::{Edge, EdgeKind, Item, Network, NetworkSummary, NodeId, Support};
pub use influence::{FixedInfluence, HoldingsInfluence, InfluencePolicy};
pub use metrics::{
    calc_avg_sentiment, calc_median_affinity, calc_total_affinity, calc_total_conviction,
    calc_total_funds_requested, get_proposals_conviction_list,
};
pub use query::{
    find_in_edges_of_type_for_proposal, get_edges_by_participant_and_type, get_edges_by_type,
    get_participants, get_proposals,
};
