use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Lock and failure bookkeeping of a principal, as read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalRecord {
    pub name: String,
    pub locked_time: Option<Timestamp>,
    pub fail_auth_count: u32,
    pub last_failed: Option<Timestamp>,
    pub last_success: Option<Timestamp>,
    pub requires_preauth: bool,
    /// Name of the password policy attached to this principal
    pub policy: Option<String>,
}

impl PrincipalRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locked_time: None,
            fail_auth_count: 0,
            last_failed: None,
            last_success: None,
            requires_preauth: false,
            policy: None,
        }
    }
}

/// Lockout parameters of a password policy. All-zero means "no policy".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyParams {
    /// Failures before the account locks, 0 = never
    pub max_fail: u32,
    /// Seconds after which a failure streak is considered stale, 0 = never
    pub failcnt_interval: u32,
    /// Seconds a lock lasts, 0 = until explicitly unlocked
    pub lockout_duration: u32,
}

impl PolicyParams {
    pub fn lock_state(&self, locked_time: Option<Timestamp>) -> LockState {
        match locked_time.and_then(Timestamp::non_zero) {
            None => LockState::Unlocked,
            Some(_) if self.lockout_duration == 0 => LockState::PermanentlyLocked,
            Some(t) => LockState::LockedUntil(t.saturating_add_secs(self.lockout_duration)),
        }
    }

    pub fn is_locked(&self, locked_time: Option<Timestamp>, now: Timestamp) -> bool {
        self.lock_state(locked_time).is_locked_at(now)
    }

    /// Whether the last failure is old enough to restart the count.
    /// A principal that never failed counts as having failed at the epoch.
    pub fn failure_streak_is_stale(&self, last_failed: Option<Timestamp>, now: Timestamp) -> bool {
        if self.failcnt_interval == 0 {
            return false;
        }
        let last_failed = last_failed.unwrap_or(Timestamp::EPOCH);
        now > last_failed.saturating_add_secs(self.failcnt_interval)
    }

    pub fn is_threshold_reached(&self, fail_auth_count: u32) -> bool {
        self.max_fail != 0 && fail_auth_count >= self.max_fail
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "until", rename_all = "snake_case")]
pub enum LockState {
    Unlocked,
    LockedUntil(Timestamp),
    PermanentlyLocked,
}

impl LockState {
    pub fn is_locked_at(&self, now: Timestamp) -> bool {
        match self {
            Self::Unlocked => false,
            Self::PermanentlyLocked => true,
            Self::LockedUntil(until) => now < *until,
        }
    }
}

/// Outcome of an authentication exchange, as far as lockout is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Success,
    PreauthFailed,
    BadIntegrity,
    /// Anything not attributable to a credential guess
    Other,
}

impl AuthStatus {
    pub fn affects_lockout(&self) -> bool {
        !matches!(self, Self::Other)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::PreauthFailed | Self::BadIntegrity)
    }
}
