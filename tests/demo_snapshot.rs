//! End-to-end run over the bundled demo snapshot.

use std::path::PathBuf;

use kinship::{
    analyze, member_relations, EngineConfig, LinkKind, MemberId, RelationKind, Severity,
    Snapshot, SuggestionKind,
};

fn demo() -> Snapshot {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/family.yaml");
    Snapshot::load(&path).unwrap()
}

#[test]
fn demo_relations() {
    let snapshot = demo();
    let report = analyze(&snapshot.members, &snapshot.links, &EngineConfig::default());

    let cousins: Vec<_> = report
        .relations
        .iter()
        .filter(|r| r.kind == RelationKind::Cousin)
        .collect();
    // eric is a cousin of both of marthe's children
    assert_eq!(cousins.len(), 2);

    let eric = member_relations(&snapshot.members, &report.relations, &MemberId::from("eric"));
    assert!(eric.found);
    let labels: Vec<&str> = eric.relations.iter().map(|r| r.label.as_str()).collect();
    assert!(labels.contains(&"grandfather"));
    assert!(labels.contains(&"grandmother"));
    assert!(labels.contains(&"aunt"));
    assert!(labels.contains(&"cousin"));

    let sandrine =
        member_relations(&snapshot.members, &report.relations, &MemberId::from("sandrine"));
    assert!(sandrine
        .relations
        .iter()
        .any(|r| r.label == "half sibling" && r.other_id == MemberId::from("kevin")));
}

#[test]
fn demo_suggestions() {
    let snapshot = demo();
    let report = analyze(&snapshot.members, &snapshot.links, &EngineConfig::default());

    let orphans: Vec<_> = report
        .suggestions
        .iter()
        .filter(|s| s.kind == SuggestionKind::Orphan)
        .collect();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].member_ids, vec![MemberId::from("lucie")]);

    let spouse = report
        .suggestions
        .iter()
        .find(|s| s.kind == SuggestionKind::SpouseMissing)
        .unwrap();
    let proposed = spouse.proposed_link.as_ref().unwrap();
    assert_eq!(proposed.from_id, MemberId::from("paul"));
    assert_eq!(proposed.to_id, MemberId::from("rose"));
    assert_eq!(proposed.relation_type, LinkKind::Spouse);

    // marthe was 7 when kevin was born
    let age: Vec<_> = report
        .suggestions
        .iter()
        .filter(|s| s.kind == SuggestionKind::AgeInconsistency)
        .collect();
    assert_eq!(age.len(), 1);
    assert_eq!(age[0].severity, Severity::Warning);

    // 7 Nounga members, 21 pairs, 8 linked directly: 13 left, collapsed
    let same: Vec<_> = report
        .suggestions
        .iter()
        .filter(|s| s.kind == SuggestionKind::SameNameUnlinked)
        .collect();
    assert_eq!(same.len(), 1);
    assert_eq!(same[0].member_ids.len(), 7);
}

#[test]
fn demo_stats() {
    let snapshot = demo();
    let report = analyze(&snapshot.members, &snapshot.links, &EngineConfig::default());
    let stats = &report.stats;

    assert_eq!(stats.total_members, 9);
    assert_eq!(stats.virtual_members, 2);
    assert_eq!(stats.parent_links, 8);
    assert_eq!(stats.spouse_links, 1);
    assert_eq!(stats.generation_count, 3);
    assert_eq!(stats.largest_branch.as_deref(), Some("Douala"));
    assert_eq!(stats.largest_branch_size, 4);
    assert_eq!(stats.orphan_count, 1);
    assert_eq!(stats.gender_distribution.male, 4);
    assert_eq!(stats.gender_distribution.female, 4);
    assert_eq!(stats.gender_distribution.unknown, 1);
    assert_eq!(stats.inferred_relations, report.relations.len());
    assert_eq!(stats.suggestions, report.suggestions.len());
}
