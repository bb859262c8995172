//! Property tests over randomly generated family snapshots.
//!
//! Snapshots are small (up to 12 members) with arbitrary parent and spouse
//! links, including cycles, duplicates and self-links, so every property
//! has to hold on messy data too.

use std::collections::{BTreeSet, HashSet};

use kinship::{
    infer_relations, member_generations, relations_for_member, suggest_links, Link, LinkKind,
    Member, MemberId, RelationKind, SuggestionConfig, SuggestionKind,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn snapshot() -> impl Strategy<Value = (Vec<Member>, Vec<Link>)> {
    (1usize..12).prop_flat_map(|n| {
        let link = (0..n, 0..n, any::<bool>());
        (Just(n), prop::collection::vec(link, 0..24))
    })
    .prop_map(|(n, raw_links)| {
        let members: Vec<Member> = (0..n)
            .map(|i| {
                let surname = if i % 2 == 0 { "Even" } else { "Odd" };
                Member::new(format!("m{}", i).as_str(), "Test", surname)
            })
            .collect();
        let links: Vec<Link> = raw_links
            .into_iter()
            .map(|(from, to, parent)| {
                let from = format!("m{}", from);
                let to = format!("m{}", to);
                if parent {
                    Link::parent(from.as_str(), to.as_str())
                } else {
                    Link::spouse(from.as_str(), to.as_str())
                }
            })
            .collect();
        (members, links)
    })
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn no_self_relations((members, links) in snapshot()) {
        for r in infer_relations(&members, &links) {
            prop_assert_ne!(r.from_id, r.to_id);
        }
    }

    #[test]
    fn one_entry_per_pair_and_kind((members, links) in snapshot()) {
        let mut keys = HashSet::new();
        for r in infer_relations(&members, &links) {
            let pair = if r.from_id < r.to_id {
                (r.from_id.clone(), r.to_id.clone())
            } else {
                (r.to_id.clone(), r.from_id.clone())
            };
            prop_assert!(keys.insert((pair, r.kind)));
        }
    }

    #[test]
    fn derivation_paths_start_and_end_at_the_pair((members, links) in snapshot()) {
        for r in infer_relations(&members, &links) {
            prop_assert_eq!(r.path.first(), Some(&r.from_id));
            prop_assert_eq!(r.path.last(), Some(&r.to_id));
        }
    }

    #[test]
    fn siblings_visible_from_both_sides((members, links) in snapshot()) {
        let relations = infer_relations(&members, &links);
        for r in relations.iter().filter(|r| r.kind == RelationKind::Sibling) {
            let from_view = relations_for_member(&r.from_id, &relations);
            let to_view = relations_for_member(&r.to_id, &relations);
            prop_assert!(from_view
                .iter()
                .any(|m| m.kind == RelationKind::Sibling && m.other_id == r.to_id));
            prop_assert!(to_view
                .iter()
                .any(|m| m.kind == RelationKind::Sibling && m.other_id == r.from_id));
        }
    }

    #[test]
    fn orphans_are_exactly_the_unlinked((members, links) in snapshot()) {
        let suggestions = suggest_links(&members, &links, &SuggestionConfig::default());
        let orphans: BTreeSet<MemberId> = suggestions
            .iter()
            .filter(|s| s.kind == SuggestionKind::Orphan)
            .flat_map(|s| s.member_ids.iter().cloned())
            .collect();

        let linked: HashSet<&MemberId> = links
            .iter()
            .flat_map(|l| [&l.from_user_id, &l.to_user_id])
            .collect();
        let expected: BTreeSet<MemberId> = members
            .iter()
            .filter(|m| !linked.contains(&m.id))
            .map(|m| m.id.clone())
            .collect();

        prop_assert_eq!(orphans, expected);
    }

    #[test]
    fn children_at_most_one_generation_below((members, links) in snapshot()) {
        let generations = member_generations(&members, &links);
        for link in links.iter().filter(|l| l.relation_type == LinkKind::Parent) {
            if link.from_user_id == link.to_user_id {
                continue;
            }
            if let (Some(&parent), Some(&child)) = (
                generations.get(&link.from_user_id),
                generations.get(&link.to_user_id),
            ) {
                prop_assert!(child <= parent + 1);
            }
        }
    }

    #[test]
    fn suggestions_never_propose_self_links((members, links) in snapshot()) {
        let suggestions = suggest_links(&members, &links, &SuggestionConfig::default());
        for proposed in suggestions.iter().filter_map(|s| s.proposed_link.as_ref()) {
            prop_assert_ne!(&proposed.from_id, &proposed.to_id);
        }
    }
}
