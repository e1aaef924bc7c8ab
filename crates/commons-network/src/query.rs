//! Read-only accessors over the network store

use crate::error::{NetworkError, Result};
use crate::graph::{Edge, EdgeKind, Item, Network, NodeId};
use commons_domain::{Participant, Proposal, ProposalStatus};
use std::collections::BTreeMap;

/// All participant nodes, in node order
pub fn get_participants(network: &Network) -> BTreeMap<NodeId, &Participant> {
    network
        .nodes()
        .filter_map(|(id, item)| item.as_participant().map(|p| (id, p)))
        .collect()
}

/// All proposal nodes, optionally only those with the given status
pub fn get_proposals(
    network: &Network,
    status: Option<ProposalStatus>,
) -> BTreeMap<NodeId, &Proposal> {
    network
        .nodes()
        .filter_map(|(id, item)| item.as_proposal().map(|p| (id, p)))
        .filter(|(_, p)| status.map_or(true, |s| p.status == s))
        .collect()
}

/// Every (source, target) pair joined by an edge of `kind`
pub fn get_edges_by_type(network: &Network, kind: EdgeKind) -> Vec<(NodeId, NodeId)> {
    network
        .edges()
        .filter(|(_, _, edge)| edge.kind() == kind)
        .map(|(from, to, _)| (from, to))
        .collect()
}

/// Outgoing edges of `kind` from `node`, keyed by target
///
/// Fails with `InvalidNodeReference` when `node` is absent or cannot be the
/// source of such an edge (support and influence start at a participant,
/// conflict at a proposal).
pub fn get_edges_by_participant_and_type(
    network: &Network,
    node: NodeId,
    kind: EdgeKind,
) -> Result<BTreeMap<NodeId, &Edge>> {
    let expected = match kind {
        EdgeKind::Support | EdgeKind::Influence => "participant",
        EdgeKind::Conflict => "proposal",
    };
    let fits = match (network.item(node), kind) {
        (Some(Item::Participant(_)), EdgeKind::Support | EdgeKind::Influence) => true,
        (Some(Item::Proposal(_)), EdgeKind::Conflict) => true,
        _ => false,
    };
    if !fits {
        return Err(NetworkError::InvalidNodeReference { node, expected });
    }

    Ok(network
        .out_edges(node)
        .filter(|(_, edge)| edge.kind() == kind)
        .collect())
}

/// Incoming edges of `kind` for a proposal, ordered by source ascending
pub fn find_in_edges_of_type_for_proposal(
    network: &Network,
    proposal: NodeId,
    kind: EdgeKind,
) -> Result<Vec<(NodeId, NodeId, EdgeKind)>> {
    network.require_proposal(proposal)?;

    Ok(network
        .in_edges(proposal)
        .filter(|(_, edge)| edge.kind() == kind)
        .map(|(from, _)| (from, proposal, kind))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Support;
    use commons_domain::TokenBatch;

    /// Participants on even ids, proposals on odd ids: 0..10
    fn alternating_network() -> Network {
        let mut network = Network::new();
        for _ in 0..5 {
            network.add_node(Participant::new(TokenBatch::unvested(0.0), 0.5));
            network.add_node(Proposal::new(10.0, 5.0));
        }
        network
    }

    #[test]
    fn test_get_participants() {
        let network = alternating_network();
        let participants = get_participants(&network);
        assert_eq!(participants.len(), 5);
        assert_eq!(participants.keys().copied().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_get_proposals_by_status() {
        let mut network = alternating_network();
        assert_eq!(get_proposals(&network, None).len(), 5);

        let mut active = Proposal::new(10.0, 5.0);
        active.status = ProposalStatus::Active;
        let id = network.add_node(active);

        let found = get_proposals(&network, Some(ProposalStatus::Active));
        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&id));
        assert_eq!(get_proposals(&network, Some(ProposalStatus::Idle)).len(), 5);
    }

    #[test]
    fn test_get_edges_by_type() {
        let mut network = alternating_network();
        assert!(get_edges_by_type(&network, EdgeKind::Support).is_empty());

        network.add_edge(0, 1, Edge::Support(Support::new(0.4))).unwrap();
        network.add_edge(0, 2, Edge::Influence(0.4)).unwrap();

        assert_eq!(get_edges_by_type(&network, EdgeKind::Support), vec![(0, 1)]);
        assert_eq!(get_edges_by_type(&network, EdgeKind::Influence), vec![(0, 2)]);
    }

    #[test]
    fn test_edges_by_participant_rejects_wrong_role() {
        let network = alternating_network();

        let err = get_edges_by_participant_and_type(&network, 1, EdgeKind::Support).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidNodeReference { node: 1, .. }));

        assert!(get_edges_by_participant_and_type(&network, 99, EdgeKind::Influence).is_err());
        assert!(get_edges_by_participant_and_type(&network, 1, EdgeKind::Conflict).is_ok());
    }

    #[test]
    fn test_in_edges_for_non_proposal() {
        let network = alternating_network();
        assert!(find_in_edges_of_type_for_proposal(&network, 0, EdgeKind::Support).is_err());
    }
}
