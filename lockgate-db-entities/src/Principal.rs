use chrono::{DateTime, Utc};
use lockgate_common::{PrincipalRecord, Timestamp};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "principals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,

    /// When the account was locked (None = not locked)
    pub locked_time: Option<DateTime<Utc>>,
    pub fail_auth_count: i32,
    pub last_failed: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    pub requires_preauth: bool,

    /// Name of the attached password policy
    pub policy: Option<String>,

    /// Serialized key material, owned by the key management side
    #[sea_orm(column_type = "Text", nullable)]
    #[serde(skip)]
    pub key_data: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn to_timestamp(value: Option<DateTime<Utc>>) -> Option<Timestamp> {
    value.map(Timestamp::from).and_then(Timestamp::non_zero)
}

impl From<Model> for PrincipalRecord {
    fn from(model: Model) -> Self {
        PrincipalRecord {
            name: model.name,
            locked_time: to_timestamp(model.locked_time),
            fail_auth_count: u32::try_from(model.fail_auth_count).unwrap_or(0),
            last_failed: to_timestamp(model.last_failed),
            last_success: to_timestamp(model.last_success),
            requires_preauth: model.requires_preauth,
            policy: model.policy.filter(|p| !p.is_empty()),
        }
    }
}

impl Model {
    pub fn locked_time(&self) -> Option<Timestamp> {
        to_timestamp(self.locked_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model {
            id: Uuid::new_v4(),
            name: "alice@EXAMPLE.COM".into(),
            locked_time: None,
            fail_auth_count: 2,
            last_failed: DateTime::from_timestamp(100, 0),
            last_success: None,
            requires_preauth: true,
            policy: Some("default".into()),
            key_data: Some("opaque".into()),
        }
    }

    #[test]
    fn test_into_record() {
        let record: PrincipalRecord = model().into();
        assert_eq!(record.name, "alice@EXAMPLE.COM");
        assert_eq!(record.fail_auth_count, 2);
        assert_eq!(record.last_failed, Some(Timestamp::from_secs(100)));
        assert_eq!(record.policy.as_deref(), Some("default"));
        assert!(record.requires_preauth);
    }

    #[test]
    fn test_zero_and_empty_values_mean_absent() {
        let mut model = model();
        model.locked_time = DateTime::from_timestamp(0, 0);
        model.policy = Some(String::new());
        model.fail_auth_count = -1;

        let record: PrincipalRecord = model.into();
        assert_eq!(record.locked_time, None);
        assert_eq!(record.policy, None);
        assert_eq!(record.fail_auth_count, 0);
    }
}
