mod db;
mod memory;

use async_trait::async_trait;
pub use db::DatabasePrincipalStore;
use lockgate_common::{PolicyParams, PrincipalPatch, PrincipalRecord, StoreError, Timestamp};
pub use memory::MemoryPrincipalStore;

/// Persistence boundary of the lockout engine.
///
/// Implementations are not expected to be transactional across calls. The
/// auditor reads, decides, and then writes through `update_locked_time` and
/// `apply_patch`; only `increment_fail_count` has to be atomic.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn get_locked_time(&self, principal: &str) -> Result<Option<Timestamp>, StoreError>;

    async fn fetch_principal(&self, principal: &str) -> Result<PrincipalRecord, StoreError>;

    /// `Ok(None)` when no policy is attached. A reference that does not
    /// resolve to exactly one policy is reported as [`StoreError::AmbiguousPolicy`].
    async fn resolve_policy(&self, principal: &str) -> Result<Option<PolicyParams>, StoreError>;

    async fn update_locked_time(
        &self,
        principal: &str,
        locked_time: Option<Timestamp>,
    ) -> Result<(), StoreError>;

    /// Masked partial update: writes only the fields in [`PrincipalPatch::write_mask`]
    async fn apply_patch(&self, principal: &str, patch: &PrincipalPatch)
        -> Result<(), StoreError>;

    /// Atomically bumps the failure counter and returns the new value
    async fn increment_fail_count(&self, principal: &str) -> Result<u32, StoreError>;
}
