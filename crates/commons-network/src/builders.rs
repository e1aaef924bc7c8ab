//! Edge builders
//!
//! Each builder checks whether an edge exists before drawing from its sampler,
//! so an existing edge is never resampled or overwritten and repeated calls
//! are no-ops. Every builder returns the number of edges it created.
//!
//! Draws per call:
//! - support: one `random_fn` value per edge created (the affinity)
//! - conflict: one `random_fn` value per pair rolled, whether or not it conflicts
//! - influence: one `exponential_fn` value per edge created

use crate::error::{NetworkError, Result};
use crate::graph::{Edge, EdgeKind, Item, Network, NodeId, Support};
use crate::influence::{HoldingsInfluence, InfluencePolicy};

fn participant_ids(network: &Network) -> Vec<NodeId> {
    network
        .nodes()
        .filter(|(_, item)| matches!(item, Item::Participant(_)))
        .map(|(id, _)| id)
        .collect()
}

fn proposal_ids(network: &Network) -> Vec<NodeId> {
    network
        .nodes()
        .filter(|(_, item)| matches!(item, Item::Proposal(_)))
        .map(|(id, _)| id)
        .collect()
}

/// Insert an edge the caller has just checked is absent
fn insert_absent(network: &mut Network, from: NodeId, to: NodeId, edge: Edge) -> Result<()> {
    let result = network.add_edge(from, to, edge);
    debug_assert!(
        !matches!(result, Err(NetworkError::DuplicateEdge { .. })),
        "edge builder tried to overwrite {} edge {} -> {}",
        edge.kind(),
        from,
        to
    );
    result
}

/// Create support edges from participants to proposals
///
/// With `node == None` every participant gains support for every proposal.
/// A participant `node` gains support for every proposal; a proposal `node`
/// gains support from every participant. Pairs that already have a support
/// edge are left untouched.
pub fn setup_support_edges<F>(
    network: &mut Network,
    random_fn: &mut F,
    node: Option<NodeId>,
) -> Result<usize>
where
    F: FnMut() -> f64,
{
    let (sources, targets) = match node {
        None => (participant_ids(network), proposal_ids(network)),
        Some(id) => match network.item(id) {
            Some(Item::Participant(_)) => (vec![id], proposal_ids(network)),
            Some(Item::Proposal(_)) => (participant_ids(network), vec![id]),
            None => {
                return Err(NetworkError::InvalidNodeReference {
                    node: id,
                    expected: "participant or proposal",
                })
            }
        },
    };

    let mut created = 0;
    for &from in &sources {
        for &to in &targets {
            if network.has_edge(from, to, EdgeKind::Support) {
                continue;
            }
            let affinity = random_fn();
            insert_absent(network, from, to, Edge::Support(Support::new(affinity)))?;
            created += 1;
        }
    }

    tracing::debug!("Created {} support edges (scope: {:?})", created, node);
    Ok(created)
}

/// Create conflict edges between proposals
///
/// Without `node`, every ordered pair of distinct proposals is rolled once:
/// a draw below `rate` creates the edge. Pairs already joined or rolled in
/// either direction before the call are skipped. With a proposal `node`, each
/// other proposal is paired with it under the same rule, and a hit creates
/// `node -> other`.
///
/// A `rate` of 1.0 or more always conflicts and a `rate` of 0.0 or less never
/// does, whatever `random_fn` returns. A draw is still taken per rolled pair.
///
/// A pair is rolled at most once over the network's lifetime, so calling
/// again with a different `rate` only affects pairs not yet seen.
pub fn setup_conflict_edges<F>(
    network: &mut Network,
    random_fn: &mut F,
    node: Option<NodeId>,
    rate: f64,
) -> Result<usize>
where
    F: FnMut() -> f64,
{
    let proposals = proposal_ids(network);

    let pairs: Vec<(NodeId, NodeId)> = match node {
        None => proposals
            .iter()
            .flat_map(|&a| proposals.iter().map(move |&b| (a, b)))
            .filter(|&(a, b)| a != b && !decided(network, a, b) && !decided(network, b, a))
            .collect(),
        Some(id) => {
            network.require_proposal(id)?;
            proposals
                .iter()
                .filter(|&&other| other != id)
                .filter(|&&other| !decided(network, id, other) && !decided(network, other, id))
                .map(|&other| (id, other))
                .collect()
        }
    };

    let mut created = 0;
    for (from, to) in pairs {
        let roll = random_fn();
        network.record_conflict_roll(from, to);
        if conflicts(roll, rate) {
            insert_absent(network, from, to, Edge::Conflict)?;
            created += 1;
        }
    }

    tracing::debug!(
        "Created {} conflict edges at rate {} (scope: {:?})",
        created,
        rate,
        node
    );
    Ok(created)
}

fn conflicts(roll: f64, rate: f64) -> bool {
    rate >= 1.0 || (rate > 0.0 && roll < rate)
}

fn decided(network: &Network, from: NodeId, to: NodeId) -> bool {
    network.has_edge(from, to, EdgeKind::Conflict) || network.conflict_rolled(from, to)
}

/// Create influence edges between every ordered pair of distinct participants
pub fn setup_influence_edges_bulk<F>(network: &mut Network, exponential_fn: &mut F) -> Result<usize>
where
    F: FnMut() -> f64,
{
    setup_influence_edges_bulk_with(network, exponential_fn, &HoldingsInfluence)
}

/// [`setup_influence_edges_bulk`] with an explicit influence policy
pub fn setup_influence_edges_bulk_with<F, P>(
    network: &mut Network,
    exponential_fn: &mut F,
    policy: &P,
) -> Result<usize>
where
    F: FnMut() -> f64,
    P: InfluencePolicy + ?Sized,
{
    let participants = participant_ids(network);

    let mut created = 0;
    for &from in &participants {
        for &to in &participants {
            if from == to {
                continue;
            }
            if add_influence(network, from, to, exponential_fn, policy)? {
                created += 1;
            }
        }
    }

    tracing::debug!("Created {} influence edges in bulk", created);
    Ok(created)
}

/// Create influence edges in both directions between `node` and every other participant
///
/// For each other participant, in id order, the outgoing edge is considered
/// before the incoming one.
pub fn setup_influence_edges_single<F>(
    network: &mut Network,
    node: NodeId,
    exponential_fn: &mut F,
) -> Result<usize>
where
    F: FnMut() -> f64,
{
    setup_influence_edges_single_with(network, node, exponential_fn, &HoldingsInfluence)
}

/// [`setup_influence_edges_single`] with an explicit influence policy
pub fn setup_influence_edges_single_with<F, P>(
    network: &mut Network,
    node: NodeId,
    exponential_fn: &mut F,
    policy: &P,
) -> Result<usize>
where
    F: FnMut() -> f64,
    P: InfluencePolicy + ?Sized,
{
    network.require_participant(node)?;

    let mut created = 0;
    for other in participant_ids(network) {
        if other == node {
            continue;
        }
        if add_influence(network, node, other, exponential_fn, policy)? {
            created += 1;
        }
        if add_influence(network, other, node, exponential_fn, policy)? {
            created += 1;
        }
    }

    tracing::debug!("Created {} influence edges for participant {}", created, node);
    Ok(created)
}

/// Add one influence edge unless it exists; true if created
fn add_influence<F, P>(
    network: &mut Network,
    from: NodeId,
    to: NodeId,
    exponential_fn: &mut F,
    policy: &P,
) -> Result<bool>
where
    F: FnMut() -> f64,
    P: InfluencePolicy + ?Sized,
{
    if network.has_edge(from, to, EdgeKind::Influence) {
        return Ok(false);
    }

    let sample = exponential_fn();
    let weight = policy.influence(
        network.require_participant(from)?,
        network.require_participant(to)?,
        sample,
    );
    insert_absent(network, from, to, Edge::Influence(weight))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::influence::FixedInfluence;
    use crate::query::get_edges_by_type;
    use commons_domain::{Participant, Proposal, TokenBatch};

    fn alternating_network() -> Network {
        let mut network = Network::new();
        for _ in 0..5 {
            network.add_node(Participant::new(TokenBatch::unvested(0.0), 0.5));
            network.add_node(Proposal::new(10.0, 5.0));
        }
        network
    }

    #[test]
    fn test_support_draws_once_per_edge() {
        let mut network = alternating_network();
        let mut draws = 0;
        let mut random_fn = || {
            draws += 1;
            0.5
        };

        let created = setup_support_edges(&mut network, &mut random_fn, None).unwrap();
        assert_eq!(created, 25);

        let again = setup_support_edges(&mut network, &mut random_fn, None).unwrap();
        assert_eq!(again, 0);
        assert_eq!(draws, 25);
    }

    #[test]
    fn test_support_unknown_node() {
        let mut network = alternating_network();
        let err = setup_support_edges(&mut network, &mut || 0.5, Some(77)).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidNodeReference { node: 77, .. }));
    }

    #[test]
    fn test_conflict_rolls_each_pair_once() {
        let mut network = alternating_network();
        let mut draws = 0;
        let mut random_fn = || {
            draws += 1;
            0.9
        };

        // Nothing below the rate: no edges, but every ordered pair is rolled
        let created = setup_conflict_edges(&mut network, &mut random_fn, None, 0.25).unwrap();
        assert_eq!(created, 0);
        assert_eq!(draws, 20);

        // A later call with a certain rate finds every pair already decided
        let created = setup_conflict_edges(&mut network, &mut || 0.0, None, 1.0).unwrap();
        assert_eq!(created, 0);
        assert!(get_edges_by_type(&network, EdgeKind::Conflict).is_empty());
    }

    #[test]
    fn test_conflict_single_skips_either_direction() {
        let mut network = alternating_network();
        network.add_edge(3, 1, Edge::Conflict).unwrap();

        let created = setup_conflict_edges(&mut network, &mut || 0.0, Some(1), 1.0).unwrap();

        // 1 already conflicts with 3 (as 3 -> 1), so only 5, 7, 9 are new
        assert_eq!(created, 3);
        assert!(!network.has_edge(1, 3, EdgeKind::Conflict));
        for other in [5, 7, 9] {
            assert!(network.has_edge(1, other, EdgeKind::Conflict));
        }
    }

    #[test]
    fn test_conflict_rate_bounds_ignore_draw_range() {
        let mut network = alternating_network();
        let none = setup_conflict_edges(&mut network, &mut || -0.25, None, 0.0).unwrap();
        assert_eq!(none, 0);

        let mut network = alternating_network();
        let mut draws = 0;
        let mut high = || {
            draws += 1;
            1.0
        };
        let all = setup_conflict_edges(&mut network, &mut high, None, 1.0).unwrap();
        assert_eq!(all, 20);
        assert_eq!(draws, 20);
    }

    #[test]
    fn test_conflict_scoped_then_bulk_keeps_one_direction() {
        let mut network = alternating_network();
        setup_conflict_edges(&mut network, &mut || 0.0, Some(1), 1.0).unwrap();

        let created = setup_conflict_edges(&mut network, &mut || 0.0, None, 1.0).unwrap();

        // Pairs involving 1 were decided as 1 -> other; the 6 pairs among 3, 5, 7, 9 go both ways
        assert_eq!(created, 12);
        for other in [3, 5, 7, 9] {
            assert!(network.has_edge(1, other, EdgeKind::Conflict));
            assert!(!network.has_edge(other, 1, EdgeKind::Conflict));
        }
    }

    #[test]
    fn test_conflict_requires_proposal_scope() {
        let mut network = alternating_network();
        assert!(setup_conflict_edges(&mut network, &mut || 0.0, Some(0), 1.0).is_err());
    }

    #[test]
    fn test_influence_draws_once_per_edge() {
        let mut network = alternating_network();
        let mut draws = 0;
        let mut exponential_fn = || {
            draws += 1;
            1.0
        };

        let created =
            setup_influence_edges_bulk_with(&mut network, &mut exponential_fn, &FixedInfluence(0.5))
                .unwrap();
        assert_eq!(created, 20);
        assert_eq!(draws, 20);
    }

    #[test]
    fn test_influence_single_requires_participant() {
        let mut network = alternating_network();
        let err = setup_influence_edges_single(&mut network, 1, &mut || 1.0).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidNodeReference { node: 1, .. }));
    }
}
