//! CLI module for kinship.
//!
//! Commands:
//! - Inference: relations, member
//! - Data quality: suggestions
//! - Aggregates: stats, report

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::inference::RelationKind;

#[derive(Parser, Debug)]
#[command(name = "kinship")]
#[command(about = "Family-tree relation inference", long_about = None)]
pub struct Cli {
    /// Snapshot file with members and links (.json, .yaml, .yml)
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Engine config (default: ./kinship.toml, if present)
    #[arg(short, long, default_value = "kinship.toml")]
    pub config: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every inferred relation
    Relations {
        /// Only show relations of this kind
        #[arg(short, long, value_enum, ignore_case = true)]
        kind: Option<RelationFilter>,
    },

    /// Show the relatives of one member
    Member {
        /// Member id
        id: String,
    },

    /// List link suggestions
    Suggestions {
        /// Minimum severity to show: info, warning, error
        #[arg(short, long, default_value = "info")]
        min_severity: String,
    },

    /// Show tree statistics
    Stats,

    /// Relations, suggestions and statistics in one go
    Report,
}

/// Relation kinds accepted by `relations --kind`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationFilter {
    Sibling,
    Grandparent,
    Grandchild,
    #[value(alias = "uncle_aunt")]
    UncleAunt,
    #[value(alias = "nephew_niece")]
    NephewNiece,
    Cousin,
}

impl From<RelationFilter> for RelationKind {
    fn from(filter: RelationFilter) -> Self {
        match filter {
            RelationFilter::Sibling => RelationKind::Sibling,
            RelationFilter::Grandparent => RelationKind::Grandparent,
            RelationFilter::Grandchild => RelationKind::Grandchild,
            RelationFilter::UncleAunt => RelationKind::UncleAunt,
            RelationFilter::NephewNiece => RelationKind::NephewNiece,
            RelationFilter::Cousin => RelationKind::Cousin,
        }
    }
}
