//! Engine configuration.

use serde::{Deserialize, Serialize};
use trellis_mutation::DuplicatePolicy;

use crate::error::SessionResult;

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// What an insert does when the identity is already taken
    pub duplicate_policy: DuplicatePolicy,
    /// Relationship levels expanded when no selection is given
    pub default_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            default_depth: 1,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_default_depth(mut self, depth: usize) -> Self {
        self.default_depth = depth;
        self
    }

    /// Accept duplicate identities, as a plain list-backed store would.
    pub fn lenient() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Accept,
            default_depth: 1,
        }
    }

    /// Never expand relationships unless they are selected.
    pub fn flat() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            default_depth: 0,
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SessionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
