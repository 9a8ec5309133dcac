//! # CLI Definition
//!
//! Arguments for the `k8s-cleanup` binary: an options document, an optional
//! registry state file from the pipeline run, and a dry-run override.

use clap::Parser;
use std::path::PathBuf;

/// Remove cluster resources and Helm releases orphaned by an automation run.
#[derive(Debug, Parser)]
#[command(name = "k8s-cleanup")]
#[command(
    about = "Reconciles live cluster state against pipeline-tracked resources and removes orphans",
    after_help = "\
Examples:
  k8s-cleanup --options cleanup.yaml --state run-registry.json
  k8s-cleanup --options cleanup.yaml --dry-run
"
)]
pub struct Cli {
    /// Path to the cleanup options document (YAML)
    #[arg(long, value_name = "FILE")]
    pub options: PathBuf,

    /// Path to the run registry state file (JSON); without it every
    /// untracked resource in scope is an orphan candidate
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Report orphans without removing anything, regardless of the options
    /// document
    #[arg(long)]
    pub dry_run: bool,
}
