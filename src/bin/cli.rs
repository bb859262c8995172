//! kinship CLI - family-tree relation inference over a snapshot file.
//!
//! Usage:
//!   kinship -s tree.json relations            # All inferred relations
//!   kinship -s tree.json member <id>          # Relatives of one member
//!   kinship -s tree.json suggestions          # Data-quality suggestions
//!   kinship -s tree.json stats                # Tree statistics
//!   kinship -s tree.json report --json        # Everything, as JSON

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;

use kinship::cli::{Cli, Commands};
use kinship::{
    analyze, infer_relations, member_relations, suggest_links, EngineConfig, LinkSuggestion,
    Member, MemberId, RelationKind, Severity, Snapshot, TreeStats,
};

fn main() {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = EngineConfig::load(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    let snapshot = Snapshot::load(&cli.snapshot)
        .with_context(|| format!("failed to load snapshot {}", cli.snapshot.display()))?;
    let members = &snapshot.members;
    let links = &snapshot.links;

    match cli.command {
        Commands::Relations { kind } => {
            let kind = kind.map(RelationKind::from);
            let relations: Vec<_> = infer_relations(members, links)
                .into_iter()
                .filter(|r| kind.map_or(true, |k| r.kind == k))
                .collect();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&relations)?);
                return Ok(());
            }
            if relations.is_empty() {
                println!("No relations inferred");
                return Ok(());
            }

            let names = name_index(members);
            println!("Relations ({})", relations.len());
            println!();
            for r in &relations {
                println!(
                    "  {} is {} of {}",
                    name(&names, &r.from_id),
                    r.label,
                    name(&names, &r.to_id)
                );
            }
        }

        Commands::Member { id } => {
            let id = MemberId(id);
            let relations = infer_relations(members, links);
            let response = member_relations(members, &relations, &id);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }
            if !response.found {
                println!("No member with id '{}'", id);
                return Ok(());
            }

            let names = name_index(members);
            println!(
                "{} ({})",
                response.display_name.as_deref().unwrap_or_default(),
                id
            );
            println!();
            if response.relations.is_empty() {
                println!("  No inferred relatives");
            }
            for r in &response.relations {
                println!("  {:<16} {}", r.label, name(&names, &r.other_id));
            }
        }

        Commands::Suggestions { min_severity } => {
            let min = parse_severity(&min_severity)?;
            let suggestions: Vec<_> = suggest_links(members, links, &config.suggestions)
                .into_iter()
                .filter(|s| s.severity >= min)
                .collect();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
                return Ok(());
            }
            print_suggestions(&suggestions);
        }

        Commands::Stats => {
            let report = analyze(members, links, &config);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report.stats)?);
                return Ok(());
            }
            print_stats(&report.stats);
        }

        Commands::Report => {
            let report = analyze(members, links, &config);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            print_stats(&report.stats);
            println!();
            print_suggestions(&report.suggestions);
        }
    }

    Ok(())
}

fn parse_severity(raw: &str) -> Result<Severity> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity '{}' (expected info, warning or error)", other),
    }
}

fn name_index(members: &[Member]) -> HashMap<&MemberId, String> {
    members.iter().map(|m| (&m.id, m.display_name())).collect()
}

fn name(names: &HashMap<&MemberId, String>, id: &MemberId) -> String {
    names.get(id).cloned().unwrap_or_else(|| id.to_string())
}

fn print_suggestions(suggestions: &[LinkSuggestion]) {
    if suggestions.is_empty() {
        println!("No suggestions");
        return;
    }
    println!("Suggestions ({})", suggestions.len());
    println!();
    for s in suggestions {
        println!(
            "  [{:<7}] {:<18} {}",
            s.severity.to_string(),
            s.kind.to_string(),
            s.message
        );
        if let Some(link) = &s.proposed_link {
            println!(
                "            propose: {} --[{}]--> {}",
                link.from_id,
                link.relation_type,
                link.to_id
            );
        }
    }
}

fn print_stats(stats: &TreeStats) {
    println!("Family Tree Statistics");
    println!("══════════════════════");
    println!();
    println!("Members:      {} ({} virtual)", stats.total_members, stats.virtual_members);
    println!(
        "Links:        {} ({} parent, {} spouse)",
        stats.total_links, stats.parent_links, stats.spouse_links
    );
    println!("Generations:  {}", stats.generation_count);
    println!("Roots:        {}", stats.root_count);
    println!("Family size:  {:.2}", stats.average_family_size);
    match &stats.largest_branch {
        Some(branch) => println!("Branch:       {} ({} members)", branch, stats.largest_branch_size),
        None => println!("Branch:       -"),
    }
    let g = &stats.gender_distribution;
    println!(
        "Genders:      {} male, {} female, {} other, {} unknown",
        g.male, g.female, g.other, g.unknown
    );
    println!("Orphans:      {}", stats.orphan_count);
    println!("Relations:    {}", stats.inferred_relations);
    println!("Suggestions:  {}", stats.suggestions);
}
