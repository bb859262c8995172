//! Query API: one-call entry points and response types for hosts and the CLI.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EngineConfig;
use crate::graph::{Link, Member, MemberId};
use crate::inference::{infer_relations, relations_for_member, InferredRelation, MemberRelation};
use crate::stats::{compute_stats, TreeStats};
use crate::suggestions::{suggest_links, LinkSuggestion};

/// Everything the engine derives from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeReport {
    pub relations: Vec<InferredRelation>,
    pub suggestions: Vec<LinkSuggestion>,
    pub stats: TreeStats,
}

/// Relatives of a single member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRelationsResponse {
    /// False when the id is not in the member list.
    pub found: bool,
    pub member_id: MemberId,
    pub display_name: Option<String>,
    pub relations: Vec<MemberRelation>,
}

/// Run inference, suggestions and statistics over one snapshot.
pub fn analyze(members: &[Member], links: &[Link], config: &EngineConfig) -> TreeReport {
    let relations = infer_relations(members, links);
    let suggestions = suggest_links(members, links, &config.suggestions);
    let stats = compute_stats(members, links, &relations, &suggestions);

    info!(
        members = members.len(),
        links = links.len(),
        relations = relations.len(),
        suggestions = suggestions.len(),
        generations = stats.generation_count,
        "tree analysis complete"
    );

    TreeReport {
        relations,
        suggestions,
        stats,
    }
}

/// Project an inferred relation list onto one member.
pub fn member_relations(
    members: &[Member],
    relations: &[InferredRelation],
    id: &MemberId,
) -> MemberRelationsResponse {
    let member = members.iter().find(|m| &m.id == id);
    MemberRelationsResponse {
        found: member.is_some(),
        member_id: id.clone(),
        display_name: member.map(Member::display_name),
        relations: relations_for_member(id, relations),
    }
}
