pub mod db;
pub mod lockout;
pub mod store;
#[cfg(test)]
pub(crate) mod testing;

pub use lockout::{
    audit, check_locked, resolve_policy, LockoutOptions, LockoutService, PolicyResolution,
    PrincipalLockStatus,
};
pub use store::{DatabasePrincipalStore, MemoryPrincipalStore, PrincipalStore};
