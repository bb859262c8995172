//! Tree statistics: aggregate counts over a family snapshot.
//!
//! Builds its own [`FamilyGraph`] and folds in the sizes of the inference
//! and suggestion outputs.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use tracing::debug;

use crate::graph::{FamilyGraph, Gender, Link, LinkKind, Member, MemberId};
use crate::inference::InferredRelation;
use crate::suggestions::LinkSuggestion;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderDistribution {
    pub male: usize,
    pub female: usize,
    pub other: usize,
    pub unknown: usize,
}

impl GenderDistribution {
    fn record(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
            Gender::Other => self.other += 1,
            Gender::Unknown => self.unknown += 1,
        }
    }
}

/// Statistics about a family tree snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub total_members: usize,
    pub virtual_members: usize,
    pub total_links: usize,
    pub parent_links: usize,
    pub spouse_links: usize,
    /// Members with no recorded parent.
    pub root_count: usize,
    /// 1 + deepest generation reached from the roots, 0 without links.
    pub generation_count: usize,
    /// Ids layered at each generation, index 0 being the roots.
    pub members_per_generation: Vec<usize>,
    /// Mean number of children over members with at least one child.
    pub average_family_size: f64,
    pub largest_branch: Option<String>,
    pub largest_branch_size: usize,
    pub gender_distribution: GenderDistribution,
    pub orphan_count: usize,
    /// Always empty: members carry no residence country.
    pub countries_represented: Vec<String>,
    pub inferred_relations: usize,
    pub suggestions: usize,
}

/// Compute statistics for a snapshot, given the relations and suggestions
/// already derived from it.
pub fn compute_stats(
    members: &[Member],
    links: &[Link],
    relations: &[InferredRelation],
    suggestions: &[LinkSuggestion],
) -> TreeStats {
    let family = FamilyGraph::build(members, links);

    let mut seen = HashSet::new();
    let unique: Vec<&Member> = members.iter().filter(|m| seen.insert(&m.id)).collect();

    let mut stats = TreeStats {
        total_members: unique.len(),
        total_links: links.len(),
        inferred_relations: relations.len(),
        suggestions: suggestions.len(),
        ..TreeStats::default()
    };

    for link in links {
        match link.relation_type {
            LinkKind::Parent => stats.parent_links += 1,
            LinkKind::Spouse => stats.spouse_links += 1,
        }
    }

    for member in &unique {
        stats.gender_distribution.record(member.gender);
        if member.is_virtual {
            stats.virtual_members += 1;
        }
        if !family.is_linked(&member.id) {
            stats.orphan_count += 1;
        }
    }

    let roots = roots_of(&family, members);
    stats.root_count = roots.len();

    if !links.is_empty() {
        let generations = layer_generations(&family, &roots);
        if let Some(&deepest) = generations.values().max() {
            stats.generation_count = deepest + 1;
            stats.members_per_generation = vec![0; deepest + 1];
            for &generation in generations.values() {
                stats.members_per_generation[generation] += 1;
            }
        }
    }

    stats.average_family_size = average_family_size(&family);
    if let Some((branch, size)) = largest_branch(&unique) {
        stats.largest_branch = Some(branch);
        stats.largest_branch_size = size;
    }

    debug!(
        members = stats.total_members,
        generations = stats.generation_count,
        orphans = stats.orphan_count,
        "tree statistics complete"
    );
    stats
}

/// Generation of every member reachable from a root, roots being 0.
///
/// Members caught in a parent cycle with no root above them are absent.
pub fn member_generations(members: &[Member], links: &[Link]) -> BTreeMap<MemberId, usize> {
    let family = FamilyGraph::build(members, links);
    let roots = roots_of(&family, members);
    let generations = layer_generations(&family, &roots);
    generations
        .into_iter()
        .map(|(id, generation)| (id.clone(), generation))
        .collect()
}

fn roots_of<'m>(family: &FamilyGraph<'_>, members: &'m [Member]) -> Vec<&'m MemberId> {
    let mut seen = HashSet::new();
    members
        .iter()
        .map(|m| &m.id)
        .filter(|id| seen.insert(*id) && family.parents(id).is_empty())
        .collect()
}

/// Multi-source BFS from every root at once. A member's generation is fixed
/// by whichever parent discovers it first.
fn layer_generations<'g>(
    family: &'g FamilyGraph<'_>,
    roots: &[&'g MemberId],
) -> HashMap<&'g MemberId, usize> {
    let mut generation: HashMap<&MemberId, usize> = HashMap::new();
    let mut queue: VecDeque<&MemberId> = VecDeque::new();

    for &root in roots {
        if generation.insert(root, 0).is_none() {
            queue.push_back(root);
        }
    }

    while let Some(id) = queue.pop_front() {
        let next = generation[id] + 1;
        for child in family.children(id) {
            if !generation.contains_key(child) {
                generation.insert(child, next);
                queue.push_back(child);
            }
        }
    }

    generation
}

fn average_family_size(family: &FamilyGraph<'_>) -> f64 {
    let parents = family.parents_with_children();
    if parents.is_empty() {
        return 0.0;
    }
    let children: usize = parents.iter().map(|p| family.children(p).len()).sum();
    children as f64 / parents.len() as f64
}

/// The branch label carried by the most members. Ties go to the label that
/// sorts first.
fn largest_branch(members: &[&Member]) -> Option<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for member in members {
        if let Some(branch) = member.family_branch.as_deref().map(str::trim) {
            if !branch.is_empty() {
                *counts.entry(branch).or_default() += 1;
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (branch, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((branch, count));
        }
    }
    best.map(|(branch, count)| (branch.to_string(), count))
}
