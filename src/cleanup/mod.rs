//! # Cleanup
//!
//! The reconciliation core: orphan computation over cluster state, the run
//! registry and release-owned objects, allow-list filtering, and
//! failure-tolerant concurrent removal with a dry-run reporting mode.

pub mod engine;
pub mod error;
pub mod filter;
pub mod options;
mod report;
pub mod traits;

pub use engine::{CleanupEngine, CleanupSummary, ResourceId};
pub use error::CleanupError;
pub use filter::is_allowed;
pub use options::{CleanupOptions, DEFAULT_KINDS, HELM_ALLOW_KEY};
pub use traits::{ClusterQuery, ReleaseObjectExpander, ResourceRemover};
