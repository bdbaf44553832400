use lockgate_common::{LockoutError, Timestamp};
use tracing::*;

use super::{resolve_policy, LockoutOptions};
use crate::PrincipalStore;

/// Rejects an authentication attempt while the principal's lock is in effect.
///
/// Never writes to the store, not even to clear an expired lock.
pub async fn check_locked(
    store: &dyn PrincipalStore,
    principal: &str,
    now: Timestamp,
    options: LockoutOptions,
) -> Result<(), LockoutError> {
    let Some(locked_time) = store
        .get_locked_time(principal)
        .await?
        .and_then(Timestamp::non_zero)
    else {
        return Ok(());
    };

    let params = resolve_policy(store, principal, options.policy_resolution).await?;
    let state = params.lock_state(Some(locked_time));
    if state.is_locked_at(now) {
        debug!(principal = %principal, ?state, %now, "Principal is locked out");
        return Err(LockoutError::ClientRevoked);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use lockgate_common::{PolicyParams, PrincipalRecord, StoreError};

    use super::*;
    use crate::testing::{ts, RecordingStore, StoreCall};

    async fn locked_at(locked_time: Option<i64>, params: PolicyParams) -> RecordingStore {
        let mut record = PrincipalRecord::new("alice");
        record.locked_time = locked_time.map(ts);
        RecordingStore::with_principal(record, Some(params)).await
    }

    #[tokio::test]
    async fn test_unlocked_skips_policy_lookup() {
        let store = locked_at(None, PolicyParams::default()).await;
        store.fail_resolve_policy.store(true, Ordering::SeqCst);

        for now in [0, 100, i64::MAX] {
            check_locked(&store, "alice", ts(now), LockoutOptions::default())
                .await
                .unwrap();
        }
        assert!(store.calls().iter().all(|c| *c == StoreCall::GetLockedTime));
    }

    #[tokio::test]
    async fn test_lock_window() {
        let params = PolicyParams {
            lockout_duration: 60,
            ..Default::default()
        };
        let store = locked_at(Some(100), params).await;

        let err = check_locked(&store, "alice", ts(159), LockoutOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_client_revoked());
        check_locked(&store, "alice", ts(160), LockoutOptions::default())
            .await
            .unwrap();
        assert!(store.calls().iter().all(|c| !c.is_write()));
    }

    #[tokio::test]
    async fn test_permanent_lock() {
        let store = locked_at(Some(100), PolicyParams::default()).await;
        for now in [0, 160, 1_000_000_000] {
            assert!(
                check_locked(&store, "alice", ts(now), LockoutOptions::default())
                    .await
                    .unwrap_err()
                    .is_client_revoked()
            );
        }
    }

    #[tokio::test]
    async fn test_policy_error_propagates() {
        let store = locked_at(Some(100), PolicyParams::default()).await;
        store.fail_resolve_policy.store(true, Ordering::SeqCst);
        assert!(matches!(
            check_locked(&store, "alice", ts(100), LockoutOptions::default()).await,
            Err(LockoutError::Store(StoreError::Other(_)))
        ));
    }

    #[tokio::test]
    async fn test_unknown_principal() {
        let store = RecordingStore::default();
        assert!(matches!(
            check_locked(&store, "ghost", ts(0), LockoutOptions::default()).await,
            Err(LockoutError::Store(StoreError::PrincipalNotFound(_)))
        ));
    }
}
