use std::sync::Arc;

use lockgate_common::{
    AuthStatus, LockState, LockoutConfig, LockoutError, PolicyParams, PrincipalPatch,
    PrincipalRecord, Timestamp,
};
use serde::Serialize;
use tracing::*;

use super::{audit, check_locked, resolve_policy, LockoutOptions};
use crate::PrincipalStore;

/// Lock report for a single principal
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalLockStatus {
    pub record: PrincipalRecord,
    pub policy: PolicyParams,
    pub state: LockState,
    /// Whether an authentication attempt would be rejected right now
    pub locked_out: bool,
}

/// Lockout checks and bookkeeping on top of a [`PrincipalStore`]
pub struct LockoutService {
    options: LockoutOptions,
    store: Arc<dyn PrincipalStore>,
}

impl LockoutService {
    pub fn new(config: &LockoutConfig, store: Arc<dyn PrincipalStore>) -> Self {
        Self {
            options: config.into(),
            store,
        }
    }

    /// Call before verifying credentials
    pub async fn check_locked(&self, principal: &str, now: Timestamp) -> Result<(), LockoutError> {
        check_locked(&*self.store, principal, now, self.options).await
    }

    /// Call with the outcome once the credential exchange is over
    pub async fn audit(
        &self,
        principal: &str,
        now: Timestamp,
        status: AuthStatus,
    ) -> Result<(), LockoutError> {
        audit(&*self.store, principal, now, status, self.options).await
    }

    pub async fn status(
        &self,
        principal: &str,
        now: Timestamp,
    ) -> Result<PrincipalLockStatus, LockoutError> {
        let record = self.store.fetch_principal(principal).await?;
        let policy = resolve_policy(&*self.store, principal, self.options.policy_resolution).await?;
        let state = policy.lock_state(record.locked_time);
        Ok(PrincipalLockStatus {
            locked_out: state.is_locked_at(now),
            record,
            policy,
            state,
        })
    }

    /// Clears the lock and the failure counter regardless of policy
    pub async fn unlock(&self, principal: &str) -> Result<(), LockoutError> {
        let record = self.store.fetch_principal(principal).await?;

        let mut patch = PrincipalPatch::new();
        patch.set_locked_time(None);
        patch.set_fail_auth_count(0);

        self.store.update_locked_time(principal, None).await?;
        self.store.apply_patch(principal, &patch).await?;

        info!(
            principal = %principal,
            locked_time = ?record.locked_time,
            fail_auth_count = record.fail_auth_count,
            "Principal unlocked"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lockgate_common::StoreError;

    use super::*;
    use crate::testing::{ts, RecordingStore};

    async fn service_with(
        record: PrincipalRecord,
        params: Option<PolicyParams>,
        config: LockoutConfig,
    ) -> (LockoutService, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::with_principal(record, params).await);
        (LockoutService::new(&config, store.clone()), store)
    }

    #[tokio::test]
    async fn test_lock_and_unlock() {
        let mut record = PrincipalRecord::new("alice");
        record.requires_preauth = true;
        let params = PolicyParams {
            max_fail: 2,
            failcnt_interval: 0,
            lockout_duration: 0,
        };
        let (service, store) = service_with(record, Some(params), Default::default()).await;

        for t in [10, 11] {
            service.check_locked("alice", ts(t)).await.unwrap();
            service
                .audit("alice", ts(t), AuthStatus::PreauthFailed)
                .await
                .unwrap();
        }

        let status = service.status("alice", ts(1_000)).await.unwrap();
        assert_eq!(status.state, LockState::PermanentlyLocked);
        assert!(status.locked_out);
        assert_eq!(status.record.fail_auth_count, 2);
        assert!(service
            .check_locked("alice", ts(1_000))
            .await
            .unwrap_err()
            .is_client_revoked());

        service.unlock("alice").await.unwrap();
        let record = store.record("alice").await;
        assert_eq!(record.locked_time, None);
        assert_eq!(record.fail_auth_count, 0);
        assert_eq!(record.last_failed, Some(ts(11)));
        service.check_locked("alice", ts(1_000)).await.unwrap();
    }

    #[tokio::test]
    async fn test_status_of_expired_lock() {
        let mut record = PrincipalRecord::new("bob");
        record.locked_time = Some(ts(100));
        let params = PolicyParams {
            lockout_duration: 60,
            ..Default::default()
        };
        let (service, _) = service_with(record, Some(params), Default::default()).await;

        let status = service.status("bob", ts(160)).await.unwrap();
        assert_eq!(status.state, LockState::LockedUntil(ts(160)));
        assert!(!status.locked_out);
        assert_eq!(status.policy, params);
    }

    #[tokio::test]
    async fn test_strict_config() {
        let mut record = PrincipalRecord::new("carol");
        record.policy = Some("missing".into());
        let config = LockoutConfig {
            strict_policy_resolution: true,
            ..Default::default()
        };
        let (service, _) = service_with(record, None, config).await;

        assert!(matches!(
            service.status("carol", ts(0)).await,
            Err(LockoutError::Store(StoreError::AmbiguousPolicy { count: 0, .. }))
        ));
    }

    #[tokio::test]
    async fn test_unlock_unknown_principal() {
        let (service, store) =
            service_with(PrincipalRecord::new("alice"), None, Default::default()).await;
        assert!(matches!(
            service.unlock("ghost").await,
            Err(LockoutError::Store(StoreError::PrincipalNotFound(_)))
        ));
        assert!(store.calls().iter().all(|c| !c.is_write()));
    }
}
