//! # Allow-List Filter
//!
//! Glob matching of bare resource names against configured allow patterns.
//! A match protects the resource from orphan removal.

use glob::Pattern;
use tracing::warn;

/// True iff at least one pattern matches the name. Patterns are tried in
/// listed order and the first match wins; an empty list allows nothing.
/// Matching is against the bare name, never the namespace.
#[must_use]
pub fn is_allowed(name: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| match Pattern::new(pattern) {
        Ok(glob) => glob.matches(name),
        Err(e) => {
            // Options validation rejects these up front; direct callers can
            // still pass arbitrary strings
            warn!("Skipping invalid allow pattern \"{}\": {}", pattern, e);
            false
        }
    })
}
