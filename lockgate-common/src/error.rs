use std::error::Error;

use crate::Timestamp;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),
    #[error("principal {0} not found")]
    PrincipalNotFound(String),
    #[error("policy {policy} resolved to {count} objects")]
    AmbiguousPolicy { policy: String, count: usize },
    #[error("timestamp {0:?} cannot be stored")]
    TimestampOutOfRange(Timestamp),
    #[error(transparent)]
    Other(Box<dyn Error + Send + Sync>),
}

impl StoreError {
    pub fn other<E: Error + Send + Sync + 'static>(err: E) -> Self {
        Self::Other(Box::new(err))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LockoutError {
    #[error("client's credentials have been revoked")]
    ClientRevoked,
    #[error(transparent)]
    Store(#[from] StoreError),
    /// `audit` was reached for a principal that `check_locked` should have rejected
    #[error("principal {principal} audited inside its lockout window (locked at {locked_time}, now {now})")]
    InvariantViolation {
        principal: String,
        locked_time: Timestamp,
        now: Timestamp,
    },
}

impl LockoutError {
    pub fn is_client_revoked(&self) -> bool {
        matches!(self, Self::ClientRevoked)
    }
}
