use lockgate_common::{PolicyParams, StoreError};
use tracing::*;

use crate::PrincipalStore;

/// What to do when a policy reference does not resolve to exactly one policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyResolution {
    /// Treat it as "no policy" and log a warning
    #[default]
    Lenient,
    /// Report [`StoreError::AmbiguousPolicy`] to the caller
    Strict,
}

/// Resolves the lockout parameters attached to `principal`.
///
/// A principal without a policy gets all-zero parameters: no threshold, no
/// stale-streak window, and permanent locks.
pub async fn resolve_policy(
    store: &dyn PrincipalStore,
    principal: &str,
    resolution: PolicyResolution,
) -> Result<PolicyParams, StoreError> {
    match store.resolve_policy(principal).await {
        Ok(params) => Ok(params.unwrap_or_default()),
        Err(StoreError::AmbiguousPolicy { policy, count })
            if resolution == PolicyResolution::Lenient =>
        {
            warn!(
                principal = %principal,
                policy = %policy,
                count,
                "Policy reference is ambiguous, ignoring it"
            );
            Ok(PolicyParams::default())
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use lockgate_common::PrincipalRecord;

    use super::*;
    use crate::testing::RecordingStore;

    #[tokio::test]
    async fn test_no_policy_gives_zero_params() {
        let store = RecordingStore::with_principal(PrincipalRecord::new("alice"), None).await;
        let params = resolve_policy(&store, "alice", PolicyResolution::Strict)
            .await
            .unwrap();
        assert_eq!(params, PolicyParams::default());
    }

    #[tokio::test]
    async fn test_attached_policy() {
        let params = PolicyParams {
            max_fail: 3,
            failcnt_interval: 30,
            lockout_duration: 60,
        };
        let store =
            RecordingStore::with_principal(PrincipalRecord::new("alice"), Some(params)).await;
        assert_eq!(
            resolve_policy(&store, "alice", PolicyResolution::Lenient)
                .await
                .unwrap(),
            params
        );
    }

    #[tokio::test]
    async fn test_ambiguous_policy() {
        let store = RecordingStore::with_principal(
            PrincipalRecord::new("alice"),
            Some(PolicyParams::default()),
        )
        .await;
        store
            .inner
            .add_policy(
                "default",
                PolicyParams {
                    max_fail: 1,
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(
            resolve_policy(&store, "alice", PolicyResolution::Lenient)
                .await
                .unwrap(),
            PolicyParams::default()
        );
        assert!(matches!(
            resolve_policy(&store, "alice", PolicyResolution::Strict).await,
            Err(StoreError::AmbiguousPolicy { count: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = RecordingStore::with_principal(PrincipalRecord::new("alice"), None).await;
        store.fail_resolve_policy.store(true, Ordering::SeqCst);
        assert!(matches!(
            resolve_policy(&store, "alice", PolicyResolution::Lenient).await,
            Err(StoreError::Other(_))
        ));
    }
}
