use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use lockgate_common::{PolicyParams, PrincipalPatch, PrincipalRecord, StoreError, Timestamp};

use crate::{MemoryPrincipalStore, PrincipalStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    GetLockedTime,
    FetchPrincipal,
    ResolvePolicy,
    UpdateLockedTime(Option<Timestamp>),
    ApplyPatch(PrincipalPatch),
    IncrementFailCount,
}

impl StoreCall {
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::UpdateLockedTime(_) | Self::ApplyPatch(_) | Self::IncrementFailCount
        )
    }
}

/// Memory store that logs every call and can be told to fail some of them
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryPrincipalStore,
    calls: Mutex<Vec<StoreCall>>,
    pub fail_get_locked_time: AtomicBool,
    pub fail_resolve_policy: AtomicBool,
    pub fail_update_locked_time: AtomicBool,
    pub fail_apply_patch: AtomicBool,
}

pub fn ts(secs: i64) -> Timestamp {
    Timestamp::from_secs(secs)
}

impl RecordingStore {
    /// A store holding one principal, with `params` attached as its policy
    pub async fn with_principal(record: PrincipalRecord, params: Option<PolicyParams>) -> Self {
        let store = Self::default();
        let mut record = record;
        if let Some(params) = params {
            record.policy = Some("default".into());
            store.inner.add_policy("default", params).await;
        }
        store.inner.insert_principal(record).await;
        store
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub async fn record(&self, name: &str) -> PrincipalRecord {
        self.inner.principal(name).await.unwrap()
    }

    fn log(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn fault(flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::other(std::io::Error::other("injected fault")));
        }
        Ok(())
    }
}

#[async_trait]
impl PrincipalStore for RecordingStore {
    async fn get_locked_time(&self, principal: &str) -> Result<Option<Timestamp>, StoreError> {
        self.log(StoreCall::GetLockedTime);
        Self::fault(&self.fail_get_locked_time)?;
        self.inner.get_locked_time(principal).await
    }

    async fn fetch_principal(&self, principal: &str) -> Result<PrincipalRecord, StoreError> {
        self.log(StoreCall::FetchPrincipal);
        self.inner.fetch_principal(principal).await
    }

    async fn resolve_policy(&self, principal: &str) -> Result<Option<PolicyParams>, StoreError> {
        self.log(StoreCall::ResolvePolicy);
        Self::fault(&self.fail_resolve_policy)?;
        self.inner.resolve_policy(principal).await
    }

    async fn update_locked_time(
        &self,
        principal: &str,
        locked_time: Option<Timestamp>,
    ) -> Result<(), StoreError> {
        self.log(StoreCall::UpdateLockedTime(locked_time));
        Self::fault(&self.fail_update_locked_time)?;
        self.inner.update_locked_time(principal, locked_time).await
    }

    async fn apply_patch(
        &self,
        principal: &str,
        patch: &PrincipalPatch,
    ) -> Result<(), StoreError> {
        self.log(StoreCall::ApplyPatch(patch.clone()));
        Self::fault(&self.fail_apply_patch)?;
        self.inner.apply_patch(principal, patch).await
    }

    async fn increment_fail_count(&self, principal: &str) -> Result<u32, StoreError> {
        self.log(StoreCall::IncrementFailCount);
        self.inner.increment_fail_count(principal).await
    }
}
