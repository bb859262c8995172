//! Family graph module, the structural backbone of kinship.
//!
//! Provides the member/link data model and the per-call adjacency index
//! that the inference, suggestion and statistics passes build on.

pub mod engine;
pub mod types;

pub use engine::FamilyGraph;
pub use types::{Gender, Link, LinkId, LinkKind, Member, MemberId};
