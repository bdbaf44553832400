use bitflags::bitflags;

use crate::{PrincipalRecord, Timestamp};

bitflags! {
    /// Fields touched during one audit call
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldMask: u32 {
        const LOCKED_TIME = 1 << 0;
        const FAIL_AUTH_COUNT = 1 << 1;
        /// The counter was bumped through `PrincipalStore::increment_fail_count`
        const FAIL_AUTH_COUNT_INCREMENT = 1 << 2;
        const LAST_FAILED = 1 << 3;
        const LAST_SUCCESS = 1 << 4;
    }
}

/// Change set accumulated by the auditor and flushed with one masked write.
///
/// `LOCKED_TIME` and `FAIL_AUTH_COUNT_INCREMENT` are recorded in the mask, but
/// they are persisted through their dedicated store calls; `apply_patch`
/// implementations only write the value fields listed in [`PrincipalPatch::write_mask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalPatch {
    mask: FieldMask,
    locked_time: Option<Timestamp>,
    fail_auth_count: u32,
    last_failed: Option<Timestamp>,
    last_success: Option<Timestamp>,
}

impl Default for PrincipalPatch {
    fn default() -> Self {
        Self::new()
    }
}

impl PrincipalPatch {
    pub fn new() -> Self {
        Self {
            mask: FieldMask::empty(),
            locked_time: None,
            fail_auth_count: 0,
            last_failed: None,
            last_success: None,
        }
    }

    pub fn mask(&self) -> FieldMask {
        self.mask
    }

    /// Fields that a masked partial update has to write
    pub fn write_mask(&self) -> FieldMask {
        self.mask - FieldMask::LOCKED_TIME - FieldMask::FAIL_AUTH_COUNT_INCREMENT
    }

    pub fn set_locked_time(&mut self, locked_time: Option<Timestamp>) {
        self.locked_time = locked_time;
        self.mask |= FieldMask::LOCKED_TIME;
    }

    pub fn set_fail_auth_count(&mut self, count: u32) {
        self.fail_auth_count = count;
        self.mask |= FieldMask::FAIL_AUTH_COUNT;
    }

    pub fn mark_fail_auth_count_incremented(&mut self) {
        self.mask |= FieldMask::FAIL_AUTH_COUNT_INCREMENT;
    }

    pub fn set_last_failed(&mut self, stamp: Timestamp) {
        self.last_failed = Some(stamp);
        self.mask |= FieldMask::LAST_FAILED;
    }

    pub fn set_last_success(&mut self, stamp: Timestamp) {
        self.last_success = Some(stamp);
        self.mask |= FieldMask::LAST_SUCCESS;
    }

    /// New lock time, if it was touched
    pub fn locked_time(&self) -> Option<Option<Timestamp>> {
        self.mask
            .contains(FieldMask::LOCKED_TIME)
            .then_some(self.locked_time)
    }

    pub fn fail_auth_count(&self) -> Option<u32> {
        self.mask
            .contains(FieldMask::FAIL_AUTH_COUNT)
            .then_some(self.fail_auth_count)
    }

    pub fn last_failed(&self) -> Option<Timestamp> {
        self.mask
            .contains(FieldMask::LAST_FAILED)
            .then_some(self.last_failed)
            .flatten()
    }

    pub fn last_success(&self) -> Option<Timestamp> {
        self.mask
            .contains(FieldMask::LAST_SUCCESS)
            .then_some(self.last_success)
            .flatten()
    }

    /// Applies the fields in [`PrincipalPatch::write_mask`] to an in-memory record
    pub fn apply_to(&self, record: &mut PrincipalRecord) {
        if let Some(count) = self.fail_auth_count() {
            record.fail_auth_count = count;
        }
        if let Some(stamp) = self.last_failed() {
            record.last_failed = Some(stamp);
        }
        if let Some(stamp) = self.last_success() {
            record.last_success = Some(stamp);
        }
    }
}
