use lockgate_common::PolicyParams;
use sea_orm::entity::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// Policy names are not unique at the schema level; a reference that matches
/// several rows is reported as ambiguous by the store.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "password_policies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub max_fail: i32,
    /// Seconds
    pub failcnt_interval: i32,
    /// Seconds
    pub lockout_duration: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Model> for PolicyParams {
    fn from(model: &Model) -> Self {
        PolicyParams {
            max_fail: u32::try_from(model.max_fail).unwrap_or(0),
            failcnt_interval: u32::try_from(model.failcnt_interval).unwrap_or(0),
            lockout_duration: u32::try_from(model.lockout_duration).unwrap_or(0),
        }
    }
}
