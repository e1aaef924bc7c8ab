//! Network bootstrap and incremental growth
//!
//! These entry points compose the edge builders so that a network built at
//! hatch time and a network grown one node at a time end up wired the same
//! way: every participant supports every proposal, participants influence one
//! another, and proposals may conflict.

use crate::builders::{
    setup_conflict_edges, setup_influence_edges_bulk, setup_influence_edges_single,
    setup_support_edges,
};
use crate::config::{HatchParams, NetworkConfig, DEFAULT_CONFLICT_RATE};
use crate::error::Result;
use crate::graph::{Network, NodeId};
use commons_domain::{trigger_threshold, ConvictionParams, Participant, Proposal, TokenBatch};

/// Build the network at hatch time
///
/// Creates one participant per token batch (initial sentiment drawn from
/// `probability_fn`), then the single hatch proposal, whose funds requested
/// come from `gamma_fn` and whose trigger follows from `hatch`. Every
/// participant is wired to the proposal with a support edge (affinity from
/// `random_fn`) and participants are wired to each other with influence
/// edges (draws from `exponential_fn`).
pub fn bootstrap_network<P, R, G, E>(
    token_batches: &[TokenBatch],
    hatch: &HatchParams,
    probability_fn: &mut P,
    random_fn: &mut R,
    gamma_fn: &mut G,
    exponential_fn: &mut E,
) -> Result<Network>
where
    P: FnMut() -> f64,
    R: FnMut() -> f64,
    G: FnMut() -> f64,
    E: FnMut() -> f64,
{
    hatch_network(
        token_batches,
        hatch,
        &ConvictionParams::default(),
        probability_fn,
        random_fn,
        gamma_fn,
        exponential_fn,
    )
}

/// [`bootstrap_network`] with hatch and conviction parameters from a config
///
/// The config is validated first.
pub fn bootstrap_network_with_config<P, R, G, E>(
    token_batches: &[TokenBatch],
    config: &NetworkConfig,
    probability_fn: &mut P,
    random_fn: &mut R,
    gamma_fn: &mut G,
    exponential_fn: &mut E,
) -> Result<Network>
where
    P: FnMut() -> f64,
    R: FnMut() -> f64,
    G: FnMut() -> f64,
    E: FnMut() -> f64,
{
    config.validate()?;
    hatch_network(
        token_batches,
        &config.hatch,
        &config.conviction.params(),
        probability_fn,
        random_fn,
        gamma_fn,
        exponential_fn,
    )
}

fn hatch_network<P, R, G, E>(
    token_batches: &[TokenBatch],
    hatch: &HatchParams,
    conviction: &ConvictionParams,
    probability_fn: &mut P,
    random_fn: &mut R,
    gamma_fn: &mut G,
    exponential_fn: &mut E,
) -> Result<Network>
where
    P: FnMut() -> f64,
    R: FnMut() -> f64,
    G: FnMut() -> f64,
    E: FnMut() -> f64,
{
    let mut network = Network::new();

    for batch in token_batches {
        network.add_node(Participant::sampled(*batch, probability_fn));
    }

    let funds_requested = gamma_fn();
    let trigger = trigger_threshold(
        funds_requested,
        hatch.funding_pool,
        hatch.token_supply,
        hatch.max_proposal_request,
        conviction,
    );
    let hatch_proposal = network.add_node(Proposal::new(funds_requested, trigger));

    setup_support_edges(&mut network, random_fn, None)?;
    setup_influence_edges_bulk(&mut network, exponential_fn)?;

    tracing::info!(
        "Bootstrapped network with {} participants and hatch proposal {} (requested {:.2}, trigger {:.2})",
        token_batches.len(),
        hatch_proposal,
        funds_requested,
        trigger
    );

    Ok(network)
}

/// Add a proposal and wire it into the network
///
/// The new proposal may conflict with each existing proposal at
/// [`DEFAULT_CONFLICT_RATE`], and every existing participant gains a support
/// edge to it. Returns the new node's id.
pub fn add_proposal<R>(network: &mut Network, proposal: Proposal, random_fn: &mut R) -> Result<NodeId>
where
    R: FnMut() -> f64,
{
    add_proposal_with_rate(network, proposal, random_fn, DEFAULT_CONFLICT_RATE)
}

/// [`add_proposal`] with an explicit conflict rate
pub fn add_proposal_with_rate<R>(
    network: &mut Network,
    proposal: Proposal,
    random_fn: &mut R,
    conflict_rate: f64,
) -> Result<NodeId>
where
    R: FnMut() -> f64,
{
    let id = network.add_node(proposal);
    let conflicts = setup_conflict_edges(network, random_fn, Some(id), conflict_rate)?;
    let supporters = setup_support_edges(network, random_fn, Some(id))?;

    tracing::debug!(
        "Added proposal {} ({} conflicts, {} supporters)",
        id,
        conflicts,
        supporters
    );
    Ok(id)
}

/// [`add_proposal`] with the conflict rate taken from a config
///
/// The config is validated first.
pub fn add_proposal_with_config<R>(
    network: &mut Network,
    proposal: Proposal,
    random_fn: &mut R,
    config: &NetworkConfig,
) -> Result<NodeId>
where
    R: FnMut() -> f64,
{
    config.validate()?;
    add_proposal_with_rate(network, proposal, random_fn, config.conflict_rate)
}

/// Add a participant and wire it into the network
///
/// The newcomer gains influence edges to and from every existing participant
/// and a support edge to every existing proposal. Returns the new node's id.
pub fn add_participant<E, R>(
    network: &mut Network,
    participant: Participant,
    exponential_fn: &mut E,
    random_fn: &mut R,
) -> Result<NodeId>
where
    E: FnMut() -> f64,
    R: FnMut() -> f64,
{
    let id = network.add_node(participant);
    let influences = setup_influence_edges_single(network, id, exponential_fn)?;
    let supports = setup_support_edges(network, random_fn, Some(id))?;

    tracing::debug!(
        "Added participant {} ({} influence edges, {} supports)",
        id,
        influences,
        supports
    );
    Ok(id)
}
