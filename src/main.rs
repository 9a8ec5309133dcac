//! # k8s-cleanup Binary
//!
//! One-shot cleanup pass: load the options document and the run registry
//! state, wire the engine to the live `kubectl`/`helm` clients, reconcile,
//! and report what was removed.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use k8s_cleanup::cleanup::{CleanupEngine, CleanupOptions};
use k8s_cleanup::cluster::LiveCluster;
use k8s_cleanup::registry::RunRegistry;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "k8s_cleanup=info".into()),
        )
        .init();

    let options_doc = tokio::fs::read_to_string(&cli.options)
        .await
        .with_context(|| format!("Failed to read options file {}", cli.options.display()))?;
    let mut options: CleanupOptions =
        serde_yaml::from_str(&options_doc).context("Failed to parse cleanup options document")?;

    if cli.dry_run {
        options.dry_run = true;
    }

    let registry = match &cli.state {
        Some(path) => {
            let state = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read state file {}", path.display()))?;
            serde_json::from_str::<RunRegistry>(&state)
                .context("Failed to parse run registry state")?
        }
        None => RunRegistry::new(),
    };

    info!(
        "Starting cleanup pass in namespace \"{}\" (dry run: {})",
        options.namespace, options.dry_run
    );

    let cluster = Arc::new(LiveCluster::new()?);
    let query: Arc<dyn k8s_cleanup::cleanup::ClusterQuery> = Arc::clone(&cluster) as Arc<_>;
    let remover: Arc<dyn k8s_cleanup::cleanup::ResourceRemover> = Arc::clone(&cluster) as Arc<_>;
    let expander: Arc<dyn k8s_cleanup::cleanup::ReleaseObjectExpander> = cluster as Arc<_>;
    let engine = CleanupEngine::new(query, remover, expander);

    let summary = engine.cleanup(&options, &registry).await?;

    info!(
        "Cleanup pass complete: {} removed, {} failed",
        summary.removed.len(),
        summary.failed.len()
    );

    Ok(())
}
