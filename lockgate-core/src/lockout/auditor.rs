use lockgate_common::{
    AuthStatus, LockoutError, PolicyParams, PrincipalPatch, PrincipalRecord, Timestamp,
};
use tracing::*;

use super::{resolve_policy, LockoutOptions};
use crate::PrincipalStore;

/// Records the outcome of an authentication attempt.
///
/// Successes reset the failure counter and clear the lock, but only for
/// principals that require preauthentication. Failures bump the counter,
/// restarting it when the previous streak went stale, and lock the principal
/// once the policy threshold is reached.
///
/// The caller is expected to have passed [`super::check_locked`] first. An
/// audit inside an active lock window is reported as
/// [`LockoutError::InvariantViolation`].
pub async fn audit(
    store: &dyn PrincipalStore,
    principal: &str,
    now: Timestamp,
    status: AuthStatus,
    options: LockoutOptions,
) -> Result<(), LockoutError> {
    if !status.affects_lockout() {
        return Ok(());
    }

    let record = store.fetch_principal(principal).await?;
    let locked_time = match store.get_locked_time(principal).await {
        Ok(locked_time) => locked_time.and_then(Timestamp::non_zero),
        Err(error) => {
            warn!(principal = %principal, %error, "Failed to read lock time, assuming unlocked");
            None
        }
    };
    let params = resolve_policy(store, principal, options.policy_resolution).await?;

    if let Some(locked_time) = locked_time {
        if params.is_locked(Some(locked_time), now) {
            return Err(invariant_violation(principal, locked_time, now, options));
        }
    }

    let mut patch = PrincipalPatch::new();
    if status.is_failure() {
        record_failure(store, &record, &params, now, &mut patch).await?;
    } else {
        record_success(&record, locked_time, now, &mut patch);
    }

    if let Some(locked_time) = patch.locked_time() {
        store.update_locked_time(principal, locked_time).await?;
    }
    if !patch.write_mask().is_empty() {
        store.apply_patch(principal, &patch).await?;
    }

    debug!(principal = %principal, ?status, mask = ?patch.mask(), "Audit recorded");
    Ok(())
}

fn record_success(
    record: &PrincipalRecord,
    locked_time: Option<Timestamp>,
    now: Timestamp,
    patch: &mut PrincipalPatch,
) {
    if !record.requires_preauth {
        return;
    }

    patch.set_fail_auth_count(0);
    if locked_time.is_some() {
        patch.set_locked_time(None);
        info!(principal = %record.name, "Lock cleared by successful preauthentication");
    }
    patch.set_last_success(now);
}

async fn record_failure(
    store: &dyn PrincipalStore,
    record: &PrincipalRecord,
    params: &PolicyParams,
    now: Timestamp,
    patch: &mut PrincipalPatch,
) -> Result<(), LockoutError> {
    let fail_auth_count = if params.failure_streak_is_stale(record.last_failed, now) {
        debug!(principal = %record.name, "Failure streak is stale, restarting count");
        patch.set_locked_time(None);
        patch.set_fail_auth_count(1);
        1
    } else {
        let count = store.increment_fail_count(&record.name).await?;
        patch.mark_fail_auth_count_incremented();
        count
    };
    patch.set_last_failed(now);

    if params.is_threshold_reached(fail_auth_count) {
        patch.set_locked_time(Some(now));
        info!(
            principal = %record.name,
            fail_auth_count,
            state = ?params.lock_state(Some(now)),
            "Principal locked out"
        );
    }
    Ok(())
}

fn invariant_violation(
    principal: &str,
    locked_time: Timestamp,
    now: Timestamp,
    options: LockoutOptions,
) -> LockoutError {
    error!(
        principal = %principal,
        %locked_time,
        %now,
        "Audit reached a principal inside its lockout window"
    );
    if cfg!(debug_assertions) && options.panic_on_invariant_violation {
        panic!("audit of {principal} inside its lockout window (locked at {locked_time}, now {now})");
    }
    LockoutError::InvariantViolation {
        principal: principal.to_owned(),
        locked_time,
        now,
    }
}
