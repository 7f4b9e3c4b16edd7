//! Sync, reset and status commands.

use anyhow::{bail, Result};
use colored::Colorize;
use polysync_core::SyncReport;
use polysync_db::{queries, SourcePool};
use polysync_graph::{schema, GraphClient, GraphStore};

use crate::config::Config;

/// Run a full relational → graph sync.
pub async fn cmd_sync(config: &Config, json: bool) -> Result<()> {
    let pool = SourcePool::open(&config.source.path)?;
    let client = GraphClient::connect(&config.graph).await?;

    schema::initialize_schema(&client).await?;

    if config.sync.wipe_before_sync {
        let removed = polysync_graph::run_reset(&client).await?;
        println!("{} {} nodes removed", "Wiped projected subgraph:".yellow(), removed);
    }

    if !json {
        println!("{}", "Syncing to graph store...".bold());
    }
    let report = polysync_graph::run_sync(&pool, &client).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Clear the projected subgraph.
pub async fn cmd_reset(config: &Config, confirm: bool) -> Result<()> {
    if !confirm {
        bail!("reset deletes every projected node; re-run with --confirm");
    }

    let client = GraphClient::connect(&config.graph).await?;
    let removed = polysync_graph::run_reset(&client).await?;

    println!(
        "{} {} nodes removed (unrelated graph content untouched)",
        "Reset complete:".green().bold(),
        removed
    );
    Ok(())
}

/// Show counts on both sides.
pub async fn cmd_status(config: &Config) -> Result<()> {
    let pool = SourcePool::open(&config.source.path)?;

    println!("{}", "Relational store".bold());
    println!("  Users:                {}", queries::users::count_users(&pool)?.to_string().cyan());
    println!("  Posts:                {}", queries::posts::count_posts(&pool)?.to_string().cyan());
    println!(
        "  Accepted friendships: {}",
        queries::friendships::count_accepted(&pool)?.to_string().cyan()
    );

    let client = GraphClient::connect(&config.graph).await?;
    let (nodes, edges) = client.marked_counts().await?;

    println!("{}", "Graph store (projected subgraph)".bold());
    println!("  Nodes: {}", nodes.to_string().cyan());
    println!("  Edges: {}", edges.to_string().cyan());

    Ok(())
}

fn print_report(report: &SyncReport) {
    println!("\n{}", "Sync complete:".green().bold());
    println!("  Nodes created: {}", report.nodes_created);
    println!("  Nodes updated: {}", report.nodes_updated);
    println!("  Edges created: {}", report.edges_created);
    println!("  Edges skipped: {}", report.edges_skipped);

    if report.issues.is_empty() {
        println!("  {}", "No issues.".dimmed());
    } else {
        println!("  {}", format!("{} issue(s):", report.issues.len()).yellow().bold());
        for issue in &report.issues {
            println!(
                "    {} [{:?}] {} {}: {}",
                "!".yellow(),
                issue.kind,
                issue.entity,
                issue.source_id,
                issue.reason.dimmed()
            );
        }
    }
}
