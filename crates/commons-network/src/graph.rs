//! Network store: an owned directed graph of participants and proposals
//!
//! Nodes live in a table indexed by [`NodeId`]; ids are handed out in
//! insertion order and never reused. Edges are kept in an adjacency map keyed
//! by the ordered node pair, each pair holding at most one edge per
//! [`EdgeKind`]. A reverse index answers in-edge queries without scanning.

use crate::error::{NetworkError, Result};
use commons_domain::{Participant, Proposal};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Index of a node within its network
pub type NodeId = usize;

/// The entity carried by a node
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A token holder
    Participant(Participant),

    /// A funding request
    Proposal(Proposal),
}

impl Item {
    /// The participant, if this node holds one
    pub fn as_participant(&self) -> Option<&Participant> {
        match self {
            Item::Participant(p) => Some(p),
            Item::Proposal(_) => None,
        }
    }

    /// The proposal, if this node holds one
    pub fn as_proposal(&self) -> Option<&Proposal> {
        match self {
            Item::Proposal(p) => Some(p),
            Item::Participant(_) => None,
        }
    }

    fn role(&self) -> &'static str {
        match self {
            Item::Participant(_) => "participant",
            Item::Proposal(_) => "proposal",
        }
    }
}

impl From<Participant> for Item {
    fn from(participant: Participant) -> Self {
        Item::Participant(participant)
    }
}

impl From<Proposal> for Item {
    fn from(proposal: Proposal) -> Self {
        Item::Proposal(proposal)
    }
}

/// Type tag of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    /// Participant backs a proposal
    Support,

    /// Two proposals cannot both succeed
    Conflict,

    /// One participant's sentiment sways another's
    Influence,
}

impl EdgeKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Support => "support",
            EdgeKind::Conflict => "conflict",
            EdgeKind::Influence => "influence",
        }
    }

    /// Roles the (source, target) endpoints must play
    fn endpoint_roles(&self) -> (&'static str, &'static str) {
        match self {
            EdgeKind::Support => ("participant", "proposal"),
            EdgeKind::Conflict => ("proposal", "proposal"),
            EdgeKind::Influence => ("participant", "participant"),
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a support edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    /// Baseline alignment with the proposal, fixed at creation
    pub affinity: f64,

    /// Conviction accumulated behind the proposal
    pub conviction: f64,
}

impl Support {
    /// Fresh support with no conviction yet
    pub fn new(affinity: f64) -> Self {
        Self {
            affinity,
            conviction: 0.0,
        }
    }
}

/// A typed edge with its payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    /// Participant → proposal
    Support(Support),

    /// Proposal → proposal
    Conflict,

    /// Participant → participant, with its weight
    Influence(f64),
}

impl Edge {
    /// The type tag of this edge
    pub fn kind(&self) -> EdgeKind {
        match self {
            Edge::Support(_) => EdgeKind::Support,
            Edge::Conflict => EdgeKind::Conflict,
            Edge::Influence(_) => EdgeKind::Influence,
        }
    }

    /// Support payload, if this is a support edge
    pub fn as_support(&self) -> Option<&Support> {
        match self {
            Edge::Support(s) => Some(s),
            _ => None,
        }
    }

    /// Influence weight, if this is an influence edge
    pub fn influence(&self) -> Option<f64> {
        match self {
            Edge::Influence(w) => Some(*w),
            _ => None,
        }
    }
}

/// Edges joining one ordered node pair, at most one per kind
pub type TypedEdges = BTreeMap<EdgeKind, Edge>;

/// The governance network
///
/// # Examples
///
/// ```
/// use commons_domain::{Participant, Proposal, TokenBatch};
/// use commons_network::{Edge, EdgeKind, Network, Support};
///
/// let mut network = Network::new();
/// let alice = network.add_node(Participant::new(TokenBatch::unvested(100.0), 0.5));
/// let grant = network.add_node(Proposal::new(500.0, 10.0));
///
/// network.add_edge(alice, grant, Edge::Support(Support::new(0.7))).unwrap();
/// assert!(network.has_edge(alice, grant, EdgeKind::Support));
/// assert!(network.add_edge(alice, grant, Edge::Support(Support::new(0.1))).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Item>,
    outgoing: Vec<BTreeMap<NodeId, TypedEdges>>,
    incoming: Vec<BTreeSet<NodeId>>,
    conflict_rolls: BTreeSet<(NodeId, NodeId)>,
    edge_count: usize,
}

impl Network {
    /// Create an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node and return its id
    pub fn add_node(&mut self, item: impl Into<Item>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(item.into());
        self.outgoing.push(BTreeMap::new());
        self.incoming.push(BTreeSet::new());
        id
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges across all kinds
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `id` names a node in this network
    pub fn contains(&self, id: NodeId) -> bool {
        id < self.nodes.len()
    }

    /// The item stored at `id`
    pub fn item(&self, id: NodeId) -> Option<&Item> {
        self.nodes.get(id)
    }

    /// Mutable access to the item stored at `id`
    pub fn item_mut(&mut self, id: NodeId) -> Option<&mut Item> {
        self.nodes.get_mut(id)
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Item)> {
        self.nodes.iter().enumerate()
    }

    /// The participant at `id`, if that node is one
    pub fn participant(&self, id: NodeId) -> Option<&Participant> {
        self.item(id).and_then(Item::as_participant)
    }

    /// Mutable access to the participant at `id`
    pub fn participant_mut(&mut self, id: NodeId) -> Option<&mut Participant> {
        match self.nodes.get_mut(id) {
            Some(Item::Participant(p)) => Some(p),
            _ => None,
        }
    }

    /// The proposal at `id`, if that node is one
    pub fn proposal(&self, id: NodeId) -> Option<&Proposal> {
        self.item(id).and_then(Item::as_proposal)
    }

    /// Mutable access to the proposal at `id`
    pub fn proposal_mut(&mut self, id: NodeId) -> Option<&mut Proposal> {
        match self.nodes.get_mut(id) {
            Some(Item::Proposal(p)) => Some(p),
            _ => None,
        }
    }

    /// The participant at `id`, or `InvalidNodeReference`
    pub fn require_participant(&self, id: NodeId) -> Result<&Participant> {
        self.participant(id).ok_or(NetworkError::InvalidNodeReference {
            node: id,
            expected: "participant",
        })
    }

    /// The proposal at `id`, or `InvalidNodeReference`
    pub fn require_proposal(&self, id: NodeId) -> Result<&Proposal> {
        self.proposal(id).ok_or(NetworkError::InvalidNodeReference {
            node: id,
            expected: "proposal",
        })
    }

    /// Whether an edge of `kind` runs from `from` to `to`
    pub fn has_edge(&self, from: NodeId, to: NodeId, kind: EdgeKind) -> bool {
        self.edge(from, to, kind).is_some()
    }

    /// The edge of `kind` from `from` to `to`
    pub fn edge(&self, from: NodeId, to: NodeId, kind: EdgeKind) -> Option<&Edge> {
        self.outgoing.get(from)?.get(&to)?.get(&kind)
    }

    /// Mutable access to the edge of `kind` from `from` to `to`
    ///
    /// The kind of the edge must not be changed through this reference.
    pub fn edge_mut(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) -> Option<&mut Edge> {
        self.outgoing.get_mut(from)?.get_mut(&to)?.get_mut(&kind)
    }

    /// Mutable access to the support payload from `participant` to `proposal`
    pub fn support_mut(&mut self, participant: NodeId, proposal: NodeId) -> Option<&mut Support> {
        match self.edge_mut(participant, proposal, EdgeKind::Support)? {
            Edge::Support(s) => Some(s),
            _ => None,
        }
    }

    /// Insert a new edge
    ///
    /// Never overwrites: an existing edge of the same kind between the same
    /// ordered pair is rejected with `DuplicateEdge`. Unknown endpoints,
    /// self-loops, and endpoints whose roles do not fit the edge kind are
    /// rejected with `InvalidNodeReference`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, edge: Edge) -> Result<()> {
        let kind = edge.kind();
        let (from_role, to_role) = kind.endpoint_roles();
        self.check_role(from, from_role)?;
        self.check_role(to, to_role)?;

        if from == to {
            return Err(NetworkError::InvalidNodeReference {
                node: to,
                expected: "a node other than the source",
            });
        }

        let typed = self.outgoing[from].entry(to).or_default();
        if typed.contains_key(&kind) {
            return Err(NetworkError::DuplicateEdge {
                from_node: from,
                to_node: to,
                kind,
            });
        }

        typed.insert(kind, edge);
        self.incoming[to].insert(from);
        self.edge_count += 1;
        Ok(())
    }

    fn check_role(&self, id: NodeId, role: &'static str) -> Result<()> {
        match self.item(id) {
            Some(item) if item.role() == role => Ok(()),
            _ => Err(NetworkError::InvalidNodeReference {
                node: id,
                expected: role,
            }),
        }
    }

    /// All edges ordered by (source, target, kind)
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &Edge)> {
        self.outgoing.iter().enumerate().flat_map(|(from, targets)| {
            targets
                .iter()
                .flat_map(move |(&to, typed)| typed.values().map(move |edge| (from, to, edge)))
        })
    }

    /// Outgoing edges of `node`, ordered by target
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Edge)> {
        self.outgoing
            .get(node)
            .into_iter()
            .flat_map(|targets| {
                targets
                    .iter()
                    .flat_map(|(&to, typed)| typed.values().map(move |edge| (to, edge)))
            })
    }

    /// Incoming edges of `node`, ordered by source
    pub fn in_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Edge)> {
        self.incoming
            .get(node)
            .into_iter()
            .flat_map(move |sources| {
                sources.iter().flat_map(move |&from| {
                    self.outgoing[from]
                        .get(&node)
                        .into_iter()
                        .flat_map(move |typed| typed.values().map(move |edge| (from, edge)))
                })
            })
    }

    /// Whether the conflict between `from` and `to` has already been rolled
    pub(crate) fn conflict_rolled(&self, from: NodeId, to: NodeId) -> bool {
        self.conflict_rolls.contains(&(from, to))
    }

    /// Remember that the conflict between `from` and `to` has been rolled
    pub(crate) fn record_conflict_roll(&mut self, from: NodeId, to: NodeId) {
        self.conflict_rolls.insert((from, to));
    }

    /// Snapshot of node and edge counts
    pub fn summary(&self) -> NetworkSummary {
        let mut summary = NetworkSummary::default();
        for item in &self.nodes {
            match item {
                Item::Participant(_) => summary.participants += 1,
                Item::Proposal(_) => summary.proposals += 1,
            }
        }
        for (_, _, edge) in self.edges() {
            *summary.edges.entry(edge.kind()).or_insert(0) += 1;
        }
        summary
    }
}

/// Node and edge counts of a network at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSummary {
    /// Participant nodes
    pub participants: usize,

    /// Proposal nodes
    pub proposals: usize,

    /// Edges per kind
    pub edges: BTreeMap<EdgeKind, usize>,
}

impl NetworkSummary {
    /// Edges of one kind
    pub fn edges_of(&self, kind: EdgeKind) -> usize {
        self.edges.get(&kind).copied().unwrap_or(0)
    }

    /// Edges across all kinds
    pub fn total_edges(&self) -> usize {
        self.edges.values().sum()
    }
}

impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network Summary")?;
        writeln!(f, "===============")?;
        writeln!(f, "Participants: {}", self.participants)?;
        writeln!(f, "Proposals: {}", self.proposals)?;
        for (kind, count) in &self.edges {
            writeln!(f, "  {}: {}", kind, count)?;
        }
        write!(f, "Total edges: {}", self.total_edges())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use commons_domain::TokenBatch;
    use proptest::prelude::*;

    proptest! {
        /// Property: edge_count always matches the edges actually stored,
        /// whatever mix of valid and invalid insertions is attempted
        #[test]
        fn test_edge_count_consistent(
            pairs in proptest::collection::vec((0usize..6, 0usize..6), 0..40),
        ) {
            let mut network = Network::new();
            for _ in 0..6 {
                network.add_node(Participant::new(TokenBatch::unvested(1.0), 0.5));
            }

            for (from, to) in pairs {
                let _ = network.add_edge(from, to, Edge::Influence(0.5));
            }

            prop_assert_eq!(network.edges().count(), network.edge_count());
            prop_assert!(network.edges().all(|(from, to, _)| from != to));
        }
    }
}
