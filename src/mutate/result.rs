//! Mutation result with statistics.

use serde::{Deserialize, Serialize};

/// Result of applying properties to a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResult {
    /// The rewritten document
    pub document: String,

    /// What the mutation touched
    pub stats: MutationStats,
}

impl ApplyResult {
    /// Create a new apply result.
    pub fn new(document: String, stats: MutationStats) -> Self {
        Self { document, stats }
    }

    /// A document returned as it was received.
    pub fn unchanged(document: &str) -> Self {
        Self {
            document: document.to_string(),
            stats: MutationStats::default(),
        }
    }
}

/// Statistics collected while mutating a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationStats {
    /// Existing parameters whose value was kept or rewritten
    pub parameters_written: u32,

    /// Parameters created because none matched
    pub parameters_inserted: u32,

    /// Parameters deleted for empty values
    pub parameters_removed: u32,

    /// Structural elements created (holders, graphics, label rule)
    pub elements_inserted: u32,

    /// Structural elements removed (old graphics, label rules)
    pub elements_removed: u32,

    /// Scopes a write was aimed at but the document does not have
    pub scope_misses: Vec<String>,
}

impl MutationStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scope that could not be found.
    pub fn miss(&mut self, scope: &[&str]) {
        let scope = scope.join("/");
        log::debug!("Scope {} not found, skipping", scope);
        if !self.scope_misses.contains(&scope) {
            self.scope_misses.push(scope);
        }
    }

    /// Total number of parameter nodes touched.
    pub fn parameters_touched(&self) -> u32 {
        self.parameters_written + self.parameters_inserted + self.parameters_removed
    }
}
