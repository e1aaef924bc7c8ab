//! Aggregation queries over the current network state
//!
//! Nothing here is cached: every call walks the graph as it is now, so a
//! mutation between two calls is always reflected in the second.

use crate::error::{NetworkError, Result};
use crate::graph::{Edge, Item, Network, NodeId, Support};

fn support_edges(network: &Network) -> impl Iterator<Item = &Support> {
    network.edges().filter_map(|(_, _, edge)| edge.as_support())
}

/// Sum of funds requested by every proposal, whatever its status
pub fn calc_total_funds_requested(network: &Network) -> f64 {
    network
        .nodes()
        .filter_map(|(_, item)| item.as_proposal())
        .map(|p| p.funds_requested)
        .sum()
}

/// Sum of conviction over the support edges into `proposal`
///
/// Zero when nobody supports it yet.
pub fn calc_total_conviction(network: &Network, proposal: NodeId) -> Result<f64> {
    network.require_proposal(proposal)?;

    Ok(network
        .in_edges(proposal)
        .filter_map(|(_, edge)| match edge {
            Edge::Support(s) => Some(s.conviction),
            _ => None,
        })
        .sum())
}

/// Sum of affinity over every support edge
pub fn calc_total_affinity(network: &Network) -> f64 {
    support_edges(network).map(|s| s.affinity).sum()
}

/// Median affinity over every support edge
///
/// An even number of edges yields the mean of the two middle values.
pub fn calc_median_affinity(network: &Network) -> Result<f64> {
    let mut affinities: Vec<f64> = support_edges(network).map(|s| s.affinity).collect();
    if affinities.is_empty() {
        return Err(NetworkError::EmptyNetwork("support edges".to_string()));
    }

    affinities.sort_by(|a, b| a.total_cmp(b));
    let mid = affinities.len() / 2;
    let median = if affinities.len() % 2 == 0 {
        (affinities[mid - 1] + affinities[mid]) / 2.0
    } else {
        affinities[mid]
    };
    Ok(median)
}

/// Mean sentiment over every participant
pub fn calc_avg_sentiment(network: &Network) -> Result<f64> {
    let (sum, count) = network
        .nodes()
        .filter_map(|(_, item)| item.as_participant())
        .fold((0.0, 0usize), |(sum, count), p| (sum + p.sentiment, count + 1));

    if count == 0 {
        return Err(NetworkError::EmptyNetwork("participants".to_string()));
    }
    Ok(sum / count as f64)
}

/// Total conviction of every proposal, in node order
pub fn get_proposals_conviction_list(network: &Network) -> Vec<f64> {
    network
        .nodes()
        .filter(|(_, item)| matches!(item, Item::Proposal(_)))
        .map(|(id, _)| {
            network
                .in_edges(id)
                .filter_map(|(_, edge)| edge.as_support())
                .map(|s| s.conviction)
                .sum::<f64>()
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use commons_domain::{Participant, Proposal, TokenBatch};
    use proptest::prelude::*;

    proptest! {
        /// Property: the median lies between the smallest and largest affinity
        #[test]
        fn test_median_within_bounds(
            affinities in proptest::collection::vec(0.0f64..1.0, 1..20),
        ) {
            let mut network = Network::new();
            let proposal = network.add_node(Proposal::new(10.0, 5.0));
            for &affinity in &affinities {
                let p = network.add_node(Participant::new(TokenBatch::unvested(1.0), 0.5));
                network.add_edge(p, proposal, Edge::Support(Support::new(affinity))).unwrap();
            }

            let median = calc_median_affinity(&network).unwrap();
            let min = affinities.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = affinities.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

            prop_assert!(median >= min && median <= max);
        }

        /// Property: the conviction list sums to the total conviction of all proposals
        #[test]
        fn test_conviction_list_matches_totals(
            convictions in proptest::collection::vec(0.0f64..100.0, 1..10),
        ) {
            let mut network = Network::new();
            let a = network.add_node(Proposal::new(10.0, 5.0));
            let b = network.add_node(Proposal::new(10.0, 5.0));
            for (i, &conviction) in convictions.iter().enumerate() {
                let p = network.add_node(Participant::new(TokenBatch::unvested(1.0), 0.5));
                let target = if i % 2 == 0 { a } else { b };
                network.add_edge(p, target, Edge::Support(Support { affinity: 0.5, conviction })).unwrap();
            }

            let list = get_proposals_conviction_list(&network);
            prop_assert_eq!(list.len(), 2);
            prop_assert_eq!(list[0], calc_total_conviction(&network, a).unwrap());
            prop_assert_eq!(list[1], calc_total_conviction(&network, b).unwrap());
        }
    }
}
