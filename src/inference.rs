//! Relation inference: derives secondary kinship from parent links.
//!
//! Siblings, grandparents, uncles/aunts and cousins are all read off the
//! PARENT adjacency of a fresh [`FamilyGraph`]. Every relation carries the
//! chain of member ids that proves it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::graph::{FamilyGraph, Gender, Link, Member, MemberId};

pub const FULL_SIBLING: &str = "full sibling";
pub const HALF_SIBLING: &str = "half sibling";

/// The kind of an inferred relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    Sibling,
    /// `from` is a grandparent of `to`.
    Grandparent,
    /// `from` is a grandchild of `to`.
    Grandchild,
    /// `from` is an uncle or aunt of `to`.
    UncleAunt,
    /// `from` is a nephew or niece of `to`.
    NephewNiece,
    Cousin,
}

impl RelationKind {
    /// Symmetric kinds describe both members the same way.
    pub fn is_symmetric(self) -> bool {
        match self {
            RelationKind::Sibling | RelationKind::Cousin => true,
            RelationKind::Grandparent
            | RelationKind::Grandchild
            | RelationKind::UncleAunt
            | RelationKind::NephewNiece => false,
        }
    }

    /// Human label for a member of the given gender holding this role.
    pub fn label(self, gender: Gender) -> &'static str {
        use Gender::*;
        use RelationKind::*;
        match (self, gender) {
            (Sibling, _) => "sibling",
            (Cousin, _) => "cousin",
            (Grandparent, Male) => "grandfather",
            (Grandparent, Female) => "grandmother",
            (Grandparent, Other | Unknown) => "grandparent",
            (Grandchild, Male) => "grandson",
            (Grandchild, Female) => "granddaughter",
            (Grandchild, Other | Unknown) => "grandchild",
            (UncleAunt, Male) => "uncle",
            (UncleAunt, Female) => "aunt",
            (UncleAunt, Other | Unknown) => "parent's sibling",
            (NephewNiece, Male) => "nephew",
            (NephewNiece, Female) => "niece",
            (NephewNiece, Other | Unknown) => "sibling's child",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Sibling => write!(f, "sibling"),
            RelationKind::Grandparent => write!(f, "grandparent"),
            RelationKind::Grandchild => write!(f, "grandchild"),
            RelationKind::UncleAunt => write!(f, "uncle_aunt"),
            RelationKind::NephewNiece => write!(f, "nephew_niece"),
            RelationKind::Cousin => write!(f, "cousin"),
        }
    }
}

/// A relation derived from the primitive links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferredRelation {
    pub from_id: MemberId,
    pub to_id: MemberId,
    #[serde(rename = "relation")]
    pub kind: RelationKind,
    /// Role of `from_id` relative to `to_id`.
    pub label: String,
    /// Member ids from `from_id` to `to_id` proving the relation.
    pub path: Vec<MemberId>,
}

/// One relative as seen from a queried member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRelation {
    pub kind: RelationKind,
    pub label: String,
    pub other_id: MemberId,
}

/// Collects relations, dropping self-relations and repeated
/// (unordered pair, kind) keys. First writer wins.
#[derive(Default)]
struct RelationSet {
    seen: HashSet<(MemberId, MemberId, RelationKind)>,
    relations: Vec<InferredRelation>,
}

impl RelationSet {
    fn push(
        &mut self,
        from: &MemberId,
        to: &MemberId,
        kind: RelationKind,
        label: &str,
        path: &[&MemberId],
    ) {
        if from == to {
            return;
        }
        let key = if from < to {
            (from.clone(), to.clone(), kind)
        } else {
            (to.clone(), from.clone(), kind)
        };
        if !self.seen.insert(key) {
            return;
        }
        self.relations.push(InferredRelation {
            from_id: from.clone(),
            to_id: to.clone(),
            kind,
            label: label.to_string(),
            path: path.iter().map(|&id| id.clone()).collect(),
        });
    }
}

/// Derive sibling, grandparent, uncle/aunt and cousin relations.
///
/// The result holds no self-relations and at most one entry per unordered
/// pair and kind. Asymmetric kinds are emitted in both directions
/// (grandparent and grandchild, uncle/aunt and nephew/niece).
pub fn infer_relations(members: &[Member], links: &[Link]) -> Vec<InferredRelation> {
    let family = FamilyGraph::build(members, links);
    let mut set = RelationSet::default();

    infer_siblings(&family, &mut set);
    infer_grandparents(&family, &mut set);
    infer_collateral(&family, &mut set);

    debug!(
        members = members.len(),
        links = links.len(),
        relations = set.relations.len(),
        "relation inference complete"
    );
    set.relations
}

fn infer_siblings(family: &FamilyGraph<'_>, set: &mut RelationSet) {
    for parent in family.parents_with_children() {
        let children: Vec<&MemberId> = family.children(parent).into_iter().collect();
        if children.len() < 2 {
            continue;
        }
        for (i, &a) in children.iter().enumerate() {
            let parents_a = family.parents(a);
            for &b in &children[i + 1..] {
                let shared = parents_a.intersection(&family.parents(b)).count();
                let label = if shared >= 2 { FULL_SIBLING } else { HALF_SIBLING };
                set.push(a, b, RelationKind::Sibling, label, &[a, parent, b]);
            }
        }
    }
}

fn infer_grandparents(family: &FamilyGraph<'_>, set: &mut RelationSet) {
    for grandparent in family.parents_with_children() {
        let gp_label = RelationKind::Grandparent.label(family.gender(grandparent));
        for parent in family.children(grandparent) {
            for child in family.children(parent) {
                set.push(
                    grandparent,
                    child,
                    RelationKind::Grandparent,
                    gp_label,
                    &[grandparent, parent, child],
                );
                set.push(
                    child,
                    grandparent,
                    RelationKind::Grandchild,
                    RelationKind::Grandchild.label(family.gender(child)),
                    &[child, parent, grandparent],
                );
            }
        }
    }
}

/// Uncles/aunts, nephews/nieces and first cousins, walking up two
/// generations from each member and back down the other branches.
fn infer_collateral(family: &FamilyGraph<'_>, set: &mut RelationSet) {
    for member in family.ids() {
        let nephew_label = RelationKind::NephewNiece.label(family.gender(member));
        for parent in family.parents(member) {
            for grandparent in family.parents(parent) {
                for uncle in family.children(grandparent) {
                    if uncle == parent || uncle == member {
                        continue;
                    }
                    set.push(
                        uncle,
                        member,
                        RelationKind::UncleAunt,
                        RelationKind::UncleAunt.label(family.gender(uncle)),
                        &[uncle, grandparent, parent, member],
                    );
                    set.push(
                        member,
                        uncle,
                        RelationKind::NephewNiece,
                        nephew_label,
                        &[member, parent, grandparent, uncle],
                    );
                    for cousin in family.children(uncle) {
                        set.push(
                            cousin,
                            member,
                            RelationKind::Cousin,
                            RelationKind::Cousin.label(Gender::Unknown),
                            &[cousin, uncle, grandparent, parent, member],
                        );
                    }
                }
            }
        }
    }
}

/// Relatives of one member, read from a full inferred list.
///
/// Symmetric relations are returned from whichever side the member is on.
/// Directed relations exist in both directions, so only the entry where the
/// member is the `to` side is kept: the label then names the other member's
/// role towards the queried one.
pub fn relations_for_member(id: &MemberId, relations: &[InferredRelation]) -> Vec<MemberRelation> {
    relations
        .iter()
        .filter_map(|r| {
            let other = if &r.to_id == id {
                &r.from_id
            } else if &r.from_id == id && r.kind.is_symmetric() {
                &r.to_id
            } else {
                return None;
            };
            Some(MemberRelation {
                kind: r.kind,
                label: r.label.clone(),
                other_id: other.clone(),
            })
        })
        .collect()
}
