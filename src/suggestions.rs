//! Link suggestions for structurally suspicious family data.
//!
//! Runs standalone over its own [`FamilyGraph`]. Nothing here mutates the
//! snapshot: a suggestion may carry a proposed link that the host can store
//! if a user accepts it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::debug;

use crate::config::SuggestionConfig;
use crate::graph::{FamilyGraph, Link, LinkKind, Member, MemberId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionKind {
    /// Member with no link at all.
    Orphan,
    /// Two co-parents with no spouse link.
    SpouseMissing,
    /// Same surname, no direct link.
    SameNameUnlinked,
    /// Implausible parent/child birth date gap.
    AgeInconsistency,
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionKind::Orphan => write!(f, "orphan"),
            SuggestionKind::SpouseMissing => write!(f, "spouse_missing"),
            SuggestionKind::SameNameUnlinked => write!(f, "same_name_unlinked"),
            SuggestionKind::AgeInconsistency => write!(f, "age_inconsistency"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A link the host may create if the suggestion is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedLink {
    pub from_id: MemberId,
    pub to_id: MemberId,
    pub relation_type: LinkKind,
}

impl ProposedLink {
    pub fn into_link(self) -> Link {
        Link::new(self.from_id, self.to_id, self.relation_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSuggestion {
    pub kind: SuggestionKind,
    pub severity: Severity,
    pub message: String,
    pub member_ids: Vec<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_link: Option<ProposedLink>,
}

impl LinkSuggestion {
    fn new(kind: SuggestionKind, severity: Severity, message: String, member_ids: Vec<MemberId>) -> Self {
        Self {
            kind,
            severity,
            message,
            member_ids,
            proposed_link: None,
        }
    }
}

/// Run every suggestion heuristic over a snapshot.
///
/// Output order: orphans, missing spouses, same-surname pairs, age gaps.
pub fn suggest_links(
    members: &[Member],
    links: &[Link],
    config: &SuggestionConfig,
) -> Vec<LinkSuggestion> {
    let family = FamilyGraph::build(members, links);
    let mut suggestions = Vec::new();

    suggest_orphans(&family, members, &mut suggestions);
    suggest_missing_spouses(&family, &mut suggestions);
    suggest_same_name(&family, members, config, &mut suggestions);
    suggest_age_inconsistencies(&family, links, config, &mut suggestions);

    debug!(
        members = members.len(),
        links = links.len(),
        suggestions = suggestions.len(),
        "link suggestions complete"
    );
    suggestions
}

fn name_of(family: &FamilyGraph<'_>, id: &MemberId) -> String {
    family
        .member(id)
        .map(Member::display_name)
        .unwrap_or_else(|| id.to_string())
}

fn suggest_orphans(family: &FamilyGraph<'_>, members: &[Member], out: &mut Vec<LinkSuggestion>) {
    let mut seen = HashSet::new();
    for member in members {
        if family.is_linked(&member.id) || !seen.insert(&member.id) {
            continue;
        }
        out.push(LinkSuggestion::new(
            SuggestionKind::Orphan,
            Severity::Info,
            format!("{} is not linked to anyone in the family tree", member.display_name()),
            vec![member.id.clone()],
        ));
    }
}

/// Two parents of the same child, neither with a recorded spouse, are
/// proposed as spouses. Nothing is proposed when either side already has
/// a spouse.
fn suggest_missing_spouses(family: &FamilyGraph<'_>, out: &mut Vec<LinkSuggestion>) {
    let mut proposed: HashSet<(&MemberId, &MemberId)> = HashSet::new();

    for parent in family.parents_with_children() {
        if family.spouse(parent).is_some() {
            continue;
        }
        for child in family.children(parent) {
            for other in family.parents(child) {
                if other == parent || family.spouse(other).is_some() {
                    continue;
                }
                let key = if parent < other { (parent, other) } else { (other, parent) };
                if !proposed.insert(key) {
                    continue;
                }
                let mut suggestion = LinkSuggestion::new(
                    SuggestionKind::SpouseMissing,
                    Severity::Warning,
                    format!(
                        "{} and {} are both parents of {} but are not linked as spouses",
                        name_of(family, parent),
                        name_of(family, other),
                        name_of(family, child),
                    ),
                    vec![parent.clone(), other.clone()],
                );
                suggestion.proposed_link = Some(ProposedLink {
                    from_id: parent.clone(),
                    to_id: other.clone(),
                    relation_type: LinkKind::Spouse,
                });
                out.push(suggestion);
            }
        }
    }
}

/// Members sharing a surname with no direct link between them. Groups with
/// more unlinked pairs than the configured limit collapse into one summary.
fn suggest_same_name(
    family: &FamilyGraph<'_>,
    members: &[Member],
    config: &SuggestionConfig,
    out: &mut Vec<LinkSuggestion>,
) {
    let mut groups: BTreeMap<String, Vec<&Member>> = BTreeMap::new();
    for member in members {
        let surname = member.last_name.trim().to_lowercase();
        if surname.is_empty() {
            continue;
        }
        let group = groups.entry(surname).or_default();
        if group.iter().all(|m| m.id != member.id) {
            group.push(member);
        }
    }

    for group in groups.values().filter(|g| g.len() >= 2) {
        let mut pairs = Vec::new();
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                if !family.has_direct_edge(&a.id, &b.id) {
                    pairs.push((*a, *b));
                }
            }
        }
        if pairs.is_empty() {
            continue;
        }

        let surname = group[0].last_name.trim();
        if pairs.len() <= config.same_name_pair_limit {
            for (a, b) in pairs {
                out.push(LinkSuggestion::new(
                    SuggestionKind::SameNameUnlinked,
                    Severity::Info,
                    format!(
                        "{} and {} share the surname {} but are not directly linked",
                        a.display_name(),
                        b.display_name(),
                        surname,
                    ),
                    vec![a.id.clone(), b.id.clone()],
                ));
            }
        } else {
            debug!(surname, pairs = pairs.len(), "collapsing same-surname group");
            out.push(LinkSuggestion::new(
                SuggestionKind::SameNameUnlinked,
                Severity::Info,
                format!(
                    "{} members share the surname {} with {} unlinked pairs; review how they are related",
                    group.len(),
                    surname,
                    pairs.len(),
                ),
                group.iter().map(|m| m.id.clone()).collect(),
            ));
        }
    }
}

/// Parent/child birth date gaps below the configured minimum. A child born
/// on or before its parent is an error whatever the thresholds; a small
/// positive gap is a warning.
fn suggest_age_inconsistencies(
    family: &FamilyGraph<'_>,
    links: &[Link],
    config: &SuggestionConfig,
    out: &mut Vec<LinkSuggestion>,
) {
    let mut checked = HashSet::new();

    for link in links.iter().filter(|l| l.relation_type == LinkKind::Parent) {
        if link.from_user_id == link.to_user_id
            || !checked.insert((&link.from_user_id, &link.to_user_id))
        {
            continue;
        }
        let (Some(parent), Some(child)) = (
            family.member(&link.from_user_id),
            family.member(&link.to_user_id),
        ) else {
            continue;
        };
        let (Some(parent_born), Some(child_born)) = (parent.birth_date, child.birth_date) else {
            continue;
        };

        let gap_days = (child_born - parent_born).num_days();
        let gap_years = gap_days as f64 / config.days_per_year;

        let (severity, message) = if gap_days <= 0 {
            (
                Severity::Error,
                format!(
                    "{} is older than or the same age as their parent {}",
                    child.display_name(),
                    parent.display_name(),
                ),
            )
        } else if gap_years < config.min_parent_age_gap_years {
            (
                Severity::Warning,
                format!(
                    "{} and their child {} are only {} years apart",
                    parent.display_name(),
                    child.display_name(),
                    gap_years.floor() as i64,
                ),
            )
        } else {
            continue;
        };
        out.push(LinkSuggestion::new(
            SuggestionKind::AgeInconsistency,
            severity,
            message,
            vec![parent.id.clone(), child.id.clone()],
        ));
    }
}
