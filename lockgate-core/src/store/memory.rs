use std::collections::HashMap;

use async_trait::async_trait;
use lockgate_common::{PolicyParams, PrincipalPatch, PrincipalRecord, StoreError, Timestamp};
use tokio::sync::Mutex;

use super::PrincipalStore;

#[derive(Default)]
struct MemoryState {
    principals: HashMap<String, PrincipalRecord>,
    /// Several entries under one name make the reference ambiguous
    policies: HashMap<String, Vec<PolicyParams>>,
}

/// Principal store kept entirely in process memory
#[derive(Default)]
pub struct MemoryPrincipalStore {
    state: Mutex<MemoryState>,
}

impl MemoryPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_principal(&self, record: PrincipalRecord) {
        let mut state = self.state.lock().await;
        state.principals.insert(record.name.clone(), record);
    }

    pub async fn add_policy(&self, name: impl Into<String>, params: PolicyParams) {
        let mut state = self.state.lock().await;
        state.policies.entry(name.into()).or_default().push(params);
    }

    pub async fn principal(&self, name: &str) -> Option<PrincipalRecord> {
        self.state.lock().await.principals.get(name).cloned()
    }
}

impl MemoryState {
    fn principal_mut(&mut self, name: &str) -> Result<&mut PrincipalRecord, StoreError> {
        self.principals
            .get_mut(name)
            .ok_or_else(|| StoreError::PrincipalNotFound(name.to_owned()))
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    async fn get_locked_time(&self, principal: &str) -> Result<Option<Timestamp>, StoreError> {
        let mut state = self.state.lock().await;
        Ok(state
            .principal_mut(principal)?
            .locked_time
            .and_then(Timestamp::non_zero))
    }

    async fn fetch_principal(&self, principal: &str) -> Result<PrincipalRecord, StoreError> {
        let mut state = self.state.lock().await;
        state.principal_mut(principal).map(|r| r.clone())
    }

    async fn resolve_policy(&self, principal: &str) -> Result<Option<PolicyParams>, StoreError> {
        let mut state = self.state.lock().await;
        let Some(policy) = state.principal_mut(principal)?.policy.clone() else {
            return Ok(None);
        };
        match state.policies.get(&policy).map(Vec::as_slice) {
            Some([params]) => Ok(Some(*params)),
            other => Err(StoreError::AmbiguousPolicy {
                policy,
                count: other.map(<[_]>::len).unwrap_or(0),
            }),
        }
    }

    async fn update_locked_time(
        &self,
        principal: &str,
        locked_time: Option<Timestamp>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.principal_mut(principal)?.locked_time = locked_time;
        Ok(())
    }

    async fn apply_patch(
        &self,
        principal: &str,
        patch: &PrincipalPatch,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        patch.apply_to(state.principal_mut(principal)?);
        Ok(())
    }

    async fn increment_fail_count(&self, principal: &str) -> Result<u32, StoreError> {
        let mut state = self.state.lock().await;
        let record = state.principal_mut(principal)?;
        record.fail_auth_count = record.fail_auth_count.saturating_add(1);
        Ok(record.fail_auth_count)
    }
}
