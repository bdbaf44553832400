mod auditor;
mod evaluator;
mod policy;
mod service;

pub use auditor::audit;
pub use evaluator::check_locked;
use lockgate_common::LockoutConfig;
pub use policy::{resolve_policy, PolicyResolution};
pub use service::{LockoutService, PrincipalLockStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockoutOptions {
    pub policy_resolution: PolicyResolution,
    /// Only honored in builds with debug assertions
    pub panic_on_invariant_violation: bool,
}

impl From<&LockoutConfig> for LockoutOptions {
    fn from(config: &LockoutConfig) -> Self {
        Self {
            policy_resolution: if config.strict_policy_resolution {
                PolicyResolution::Strict
            } else {
                PolicyResolution::Lenient
            },
            panic_on_invariant_violation: config.panic_on_invariant_violation,
        }
    }
}
