//! Sync sweep runner: crawl configured domains and verify their records.
//!
//! The pipeline itself never decides which domains exist; the list comes
//! entirely from the command line (arguments and/or a domains file).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use registry_sync::{DomainTarget, HttpDomainFetcher, SyncPipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run one sync sweep over registered domains.
#[derive(Parser, Debug)]
#[command(name = "sync_records")]
struct Args {
    /// Domains to sync (e.g. stonespizza.com)
    domains: Vec<String>,

    /// File with one domain per line; `#` starts a comment
    #[arg(long)]
    domains_file: Option<PathBuf>,
}

fn load_targets(args: &Args) -> Result<Vec<DomainTarget>> {
    let mut targets: Vec<DomainTarget> = args
        .domains
        .iter()
        .map(|domain| DomainTarget::new(domain.as_str()))
        .collect();

    if let Some(path) = &args.domains_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read domains file {}", path.display()))?;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            targets.push(DomainTarget::new(line));
        }
    }

    if targets.is_empty() {
        bail!("No domains given; pass domains as arguments or via --domains-file");
    }

    Ok(targets)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,registry_sync=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let targets = load_targets(&args)?;

    tracing::info!(domains = targets.len(), "starting sync sweep");

    let pipeline = SyncPipeline::new(Arc::new(HttpDomainFetcher::new()));
    let reports = pipeline.sync_all(&targets).await;

    for report in &reports {
        tracing::info!(domain = %report.domain, outcome = report.outcome.label(), "sweep outcome");
    }

    let accepted = SyncPipeline::accepted(&reports);
    tracing::info!(
        accepted = accepted.len(),
        total = reports.len(),
        "sweep complete"
    );

    // Accepted records go to stdout for the caller to ingest
    for record in accepted {
        println!("{}", serde_json::to_string_pretty(record)?);
    }

    Ok(())
}
