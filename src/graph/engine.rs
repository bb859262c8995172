//! The family graph index.
//!
//! Uses petgraph to hold parent and spouse links for one snapshot and
//! answers the adjacency questions every analysis pass asks. An index is
//! built per call, read-only once built, and dropped with the call.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use super::types::*;

/// Adjacency over one `(members, links)` snapshot.
pub struct FamilyGraph<'a> {
    /// Directed graph: PARENT edges point parent -> child, SPOUSE edges
    /// keep the orientation they were stored with. Self-parent edges are
    /// stored but never reported as parent/child adjacency.
    graph: DiGraph<MemberId, LinkKind>,
    /// Index: member id -> node index. Covers ids named only by links.
    node_index: HashMap<MemberId, NodeIndex>,
    /// Index: member id -> spouse id. Last SPOUSE link wins per endpoint.
    spouse_of: HashMap<MemberId, MemberId>,
    /// Index: member id -> member record.
    members: HashMap<&'a MemberId, &'a Member>,
}

impl<'a> FamilyGraph<'a> {
    /// Build the index from a member list and a link list.
    pub fn build(members: &'a [Member], links: &[Link]) -> Self {
        let mut family = Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
            spouse_of: HashMap::new(),
            members: HashMap::with_capacity(members.len()),
        };

        for member in members {
            family.add_member(member.id.clone());
            family.members.insert(&member.id, member);
        }

        for link in links {
            let from = family.add_member(link.from_user_id.clone());
            let to = family.add_member(link.to_user_id.clone());

            match link.relation_type {
                LinkKind::Parent if from == to => {
                    debug!(member = %link.from_user_id, "self-parent link kept out of adjacency");
                }
                LinkKind::Parent => {}
                LinkKind::Spouse => {
                    family.record_spouse(&link.from_user_id, &link.to_user_id);
                    family.record_spouse(&link.to_user_id, &link.from_user_id);
                }
            }
            family.graph.add_edge(from, to, link.relation_type);
        }

        debug!(
            members = members.len(),
            nodes = family.graph.node_count(),
            edges = family.graph.edge_count(),
            "family graph built"
        );
        family
    }

    fn add_member(&mut self, id: MemberId) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_index.insert(id, idx);
        idx
    }

    fn record_spouse(&mut self, member: &MemberId, spouse: &MemberId) {
        if let Some(previous) = self.spouse_of.insert(member.clone(), spouse.clone()) {
            if &previous != spouse {
                debug!(
                    member = %member,
                    previous = %previous,
                    spouse = %spouse,
                    "spouse link overwritten by a later link"
                );
            }
        }
    }

    // ─── Lookups ────────────────────────────────────────────────

    /// Member record for an id, if the snapshot carries one.
    pub fn member(&self, id: &MemberId) -> Option<&'a Member> {
        self.members.get(id).copied()
    }

    /// Recorded gender, `Unknown` when the member record is missing.
    pub fn gender(&self, id: &MemberId) -> Gender {
        self.member(id).map(|m| m.gender).unwrap_or_default()
    }

    /// Every id in the graph, sorted.
    pub fn ids(&self) -> BTreeSet<&MemberId> {
        self.node_index.keys().collect()
    }

    // ─── Adjacency ──────────────────────────────────────────────

    /// Children of a member (PARENT out-edges), deduplicated and sorted.
    pub fn children(&self, id: &MemberId) -> BTreeSet<&MemberId> {
        self.neighbors(id, Direction::Outgoing, LinkKind::Parent)
    }

    /// Parents of a member (PARENT in-edges), deduplicated and sorted.
    pub fn parents(&self, id: &MemberId) -> BTreeSet<&MemberId> {
        self.neighbors(id, Direction::Incoming, LinkKind::Parent)
    }

    pub fn spouse(&self, id: &MemberId) -> Option<&MemberId> {
        self.spouse_of.get(id)
    }

    /// Members with at least one child, sorted.
    pub fn parents_with_children(&self) -> BTreeSet<&MemberId> {
        self.graph
            .edge_references()
            .filter(|e| *e.weight() == LinkKind::Parent && e.source() != e.target())
            .map(|e| &self.graph[e.source()])
            .collect()
    }

    /// True if any link joins `a` and `b`, in either direction and of
    /// either kind.
    pub fn has_direct_edge(&self, a: &MemberId, b: &MemberId) -> bool {
        match (self.node_index.get(a), self.node_index.get(b)) {
            (Some(&ia), Some(&ib)) => {
                self.graph.contains_edge(ia, ib) || self.graph.contains_edge(ib, ia)
            }
            _ => false,
        }
    }

    /// Ids that are an endpoint of at least one link.
    pub fn linked_ids(&self) -> BTreeSet<&MemberId> {
        self.graph
            .edge_references()
            .flat_map(|e| [&self.graph[e.source()], &self.graph[e.target()]])
            .collect()
    }

    pub fn is_linked(&self, id: &MemberId) -> bool {
        self.node_index.get(id).is_some_and(|&idx| {
            self.graph
                .edges_directed(idx, Direction::Outgoing)
                .next()
                .is_some()
                || self
                    .graph
                    .edges_directed(idx, Direction::Incoming)
                    .next()
                    .is_some()
        })
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbors(&self, id: &MemberId, dir: Direction, kind: LinkKind) -> BTreeSet<&MemberId> {
        let Some(&idx) = self.node_index.get(id) else {
            return BTreeSet::new();
        };
        self.graph
            .edges_directed(idx, dir)
            .filter(|e| *e.weight() == kind && e.source() != e.target())
            .map(|e| match dir {
                Direction::Outgoing => &self.graph[e.target()],
                Direction::Incoming => &self.graph[e.source()],
            })
            .collect()
    }
}
