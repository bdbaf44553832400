mod defaults;

use std::path::PathBuf;

use defaults::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Secret;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LockoutConfig {
    /// Fail the caller when a principal's policy reference resolves to
    /// zero or several policies, instead of treating it as "no policy"
    #[serde(default = "_default_false")]
    pub strict_policy_resolution: bool,

    /// Panic on audit-ordering bugs in debug builds instead of returning
    /// an error
    #[serde(default = "_default_false")]
    pub panic_on_invariant_violation: bool,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            strict_policy_resolution: false,
            panic_on_invariant_violation: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LockgateConfigStore {
    #[serde(default = "_default_database_url")]
    pub database_url: Secret<String>,

    #[serde(default)]
    pub lockout: LockoutConfig,
}

impl Default for LockgateConfigStore {
    fn default() -> Self {
        Self {
            database_url: _default_database_url(),
            lockout: <_>::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LockgateConfig {
    pub store: LockgateConfigStore,
    pub paths_relative_to: PathBuf,
}

impl LockgateConfig {
    pub fn validate(&self) {
        if self.store.lockout.panic_on_invariant_violation && !cfg!(debug_assertions) {
            warn!("`lockout.panic_on_invariant_violation` has no effect in release builds");
        }
        if self.store.database_url.expose_secret().is_empty() {
            warn!("`database_url` is empty, the default SQLite location will not be used");
        }
    }
}
