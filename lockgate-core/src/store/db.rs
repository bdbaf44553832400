use std::sync::Arc;

use async_trait::async_trait;
use lockgate_common::{
    FieldMask, PolicyParams, PrincipalPatch, PrincipalRecord, StoreError, Timestamp,
};
use lockgate_db_entities::{PasswordPolicy, Principal};
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};
use tokio::sync::Mutex;
use tracing::*;
use uuid::Uuid;

use super::PrincipalStore;

/// Principal store backed by the `principals` and `password_policies` tables
pub struct DatabasePrincipalStore {
    db: Arc<Mutex<DatabaseConnection>>,
}

impl DatabasePrincipalStore {
    pub fn new(db: Arc<Mutex<DatabaseConnection>>) -> Self {
        Self { db }
    }

    /// Creates the named policy, or updates it if exactly one exists
    pub async fn upsert_policy(&self, name: &str, params: PolicyParams) -> Result<(), StoreError> {
        let db = self.db.lock().await;
        let existing = PasswordPolicy::Entity::find()
            .filter(PasswordPolicy::Column::Name.eq(name))
            .all(&*db)
            .await?;

        let values = PasswordPolicy::ActiveModel {
            name: Set(name.to_owned()),
            max_fail: Set(to_db_int(params.max_fail)),
            failcnt_interval: Set(to_db_int(params.failcnt_interval)),
            lockout_duration: Set(to_db_int(params.lockout_duration)),
            ..Default::default()
        };

        match existing.as_slice() {
            [] => {
                PasswordPolicy::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    ..values
                }
                .insert(&*db)
                .await?;
                info!(policy = %name, ?params, "Password policy created");
            }
            [policy] => {
                PasswordPolicy::ActiveModel {
                    id: Set(policy.id),
                    ..values
                }
                .update(&*db)
                .await?;
                info!(policy = %name, ?params, "Password policy updated");
            }
            several => {
                return Err(StoreError::AmbiguousPolicy {
                    policy: name.to_owned(),
                    count: several.len(),
                })
            }
        }
        Ok(())
    }
}

fn to_db_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn to_db_timestamp(
    value: Option<Timestamp>,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, StoreError> {
    value
        .and_then(Timestamp::non_zero)
        .map(|stamp| {
            stamp
                .to_datetime()
                .ok_or(StoreError::TimestampOutOfRange(stamp))
        })
        .transpose()
}

async fn find_principal<C: ConnectionTrait>(
    db: &C,
    principal: &str,
) -> Result<Principal::Model, StoreError> {
    Principal::Entity::find()
        .filter(Principal::Column::Name.eq(principal))
        .one(db)
        .await?
        .ok_or_else(|| StoreError::PrincipalNotFound(principal.to_owned()))
}

#[async_trait]
impl PrincipalStore for DatabasePrincipalStore {
    async fn get_locked_time(&self, principal: &str) -> Result<Option<Timestamp>, StoreError> {
        let db = self.db.lock().await;
        Ok(find_principal(&*db, principal).await?.locked_time())
    }

    async fn fetch_principal(&self, principal: &str) -> Result<PrincipalRecord, StoreError> {
        let db = self.db.lock().await;
        Ok(find_principal(&*db, principal).await?.into())
    }

    async fn resolve_policy(&self, principal: &str) -> Result<Option<PolicyParams>, StoreError> {
        let db = self.db.lock().await;
        let record: PrincipalRecord = find_principal(&*db, principal).await?.into();
        let Some(policy) = record.policy else {
            return Ok(None);
        };

        let policies = PasswordPolicy::Entity::find()
            .filter(PasswordPolicy::Column::Name.eq(&policy))
            .all(&*db)
            .await?;

        match policies.as_slice() {
            [model] => Ok(Some(model.into())),
            other => Err(StoreError::AmbiguousPolicy {
                policy,
                count: other.len(),
            }),
        }
    }

    async fn update_locked_time(
        &self,
        principal: &str,
        locked_time: Option<Timestamp>,
    ) -> Result<(), StoreError> {
        let locked_time = to_db_timestamp(locked_time)?;
        let db = self.db.lock().await;
        let result = Principal::Entity::update_many()
            .col_expr(Principal::Column::LockedTime, Expr::value(locked_time))
            .filter(Principal::Column::Name.eq(principal))
            .exec(&*db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::PrincipalNotFound(principal.to_owned()));
        }
        Ok(())
    }

    async fn apply_patch(
        &self,
        principal: &str,
        patch: &PrincipalPatch,
    ) -> Result<(), StoreError> {
        let mask = patch.write_mask();
        if mask.is_empty() {
            return Ok(());
        }

        let mut values = <Principal::ActiveModel as Default>::default();
        if let Some(count) = patch.fail_auth_count() {
            values.fail_auth_count = Set(to_db_int(count));
        }
        if mask.contains(FieldMask::LAST_FAILED) {
            values.last_failed = Set(to_db_timestamp(patch.last_failed())?);
        }
        if mask.contains(FieldMask::LAST_SUCCESS) {
            values.last_success = Set(to_db_timestamp(patch.last_success())?);
        }

        let db = self.db.lock().await;
        let result = Principal::Entity::update_many()
            .set(values)
            .filter(Principal::Column::Name.eq(principal))
            .exec(&*db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::PrincipalNotFound(principal.to_owned()));
        }
        debug!(principal = %principal, ?mask, "Applied principal patch");
        Ok(())
    }

    async fn increment_fail_count(&self, principal: &str) -> Result<u32, StoreError> {
        let db = self.db.lock().await;
        let txn = db.begin().await?;

        Principal::Entity::update_many()
            .col_expr(
                Principal::Column::FailAuthCount,
                Expr::col(Principal::Column::FailAuthCount).add(1),
            )
            .filter(Principal::Column::Name.eq(principal))
            .exec(&txn)
            .await?;
        let model = find_principal(&txn, principal).await?;

        txn.commit().await?;
        Ok(u32::try_from(model.fail_auth_count).unwrap_or(0))
    }
}
