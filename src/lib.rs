//! # Kinship
//!
//! Family-tree relation inference for membership systems.
//!
//! Given a snapshot of members and primitive PARENT/SPOUSE links, kinship
//! derives secondary relations, flags suspicious data and aggregates tree
//! statistics. Every call is a pure function of its input: the engine keeps
//! no state between calls and never mutates the snapshot.
//!
//! ## Key Features
//!
//! - **Inference**: siblings (full/half), grandparents, uncles/aunts, cousins
//! - **Suggestions**: orphans, missing spouse links, same-surname clusters,
//!   implausible parent/child age gaps
//! - **Statistics**: generation depth, family size, branches, genders
//!
//! ## Quick Start
//!
//! ```rust
//! use kinship::{analyze, EngineConfig, Link, Member};
//!
//! let members = vec![
//!     Member::new("alice", "Alice", "Nounga"),
//!     Member::new("bob", "Bob", "Nounga"),
//!     Member::new("carol", "Carol", "Nounga"),
//!     Member::new("dave", "Dave", "Nounga"),
//! ];
//! let links = vec![
//!     Link::parent("alice", "carol"),
//!     Link::parent("bob", "carol"),
//!     Link::parent("alice", "dave"),
//!     Link::parent("bob", "dave"),
//! ];
//!
//! let report = analyze(&members, &links, &EngineConfig::default());
//! assert_eq!(report.stats.generation_count, 2);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod inference;
pub mod query;
pub mod snapshot;
pub mod stats;
pub mod suggestions;

// Re-exports for convenience
pub use config::{EngineConfig, SuggestionConfig};
pub use error::{KinshipError, Result};

pub use graph::{FamilyGraph, Gender, Link, LinkId, LinkKind, Member, MemberId};
pub use inference::{
    infer_relations, relations_for_member, InferredRelation, MemberRelation, RelationKind,
};
pub use query::{analyze, member_relations, MemberRelationsResponse, TreeReport};
pub use snapshot::Snapshot;
pub use stats::{compute_stats, member_generations, GenderDistribution, TreeStats};
pub use suggestions::{suggest_links, LinkSuggestion, ProposedLink, Severity, SuggestionKind};
