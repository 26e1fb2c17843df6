use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ConnectionTrait,
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::core::{CRUDResource, MergeIntoActiveModel};
use crate::validation::{Validatable, ValidationErrors, validators::validate_required};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "agents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub ip: String,
    pub filesurvey: String,
    pub role: String,
    pub status: String,
    pub created: DateTimeUtc,
    pub updated: DateTimeUtc,
}

pub type Agent = Model;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if insert {
            self.created = Set(now);
        }
        self.updated = Set(now);
        Ok(self)
    }
}

/// Create and update payload. Missing fields default to empty strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AgentInput {
    pub name: String,
    pub ip: String,
    pub filesurvey: String,
    pub role: String,
    pub status: String,
}

impl Validatable for AgentInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_required("name", &self.name));
        errors.check(validate_required("ip", &self.ip));
        errors.result()
    }
}

impl From<AgentInput> for ActiveModel {
    fn from(input: AgentInput) -> Self {
        Self {
            id: NotSet,
            name: Set(input.name),
            ip: Set(input.ip),
            filesurvey: Set(input.filesurvey),
            role: Set(input.role),
            status: Set(input.status),
            created: NotSet,
            updated: NotSet,
        }
    }
}

impl MergeIntoActiveModel<ActiveModel> for AgentInput {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> ActiveModel {
        existing.name = Set(self.name);
        existing.ip = Set(self.ip);
        existing.filesurvey = Set(self.filesurvey);
        existing.role = Set(self.role);
        existing.status = Set(self.status);
        existing
    }
}

#[async_trait]
impl CRUDResource for Model {
    type EntityType = Entity;
    type ColumnType = Column;
    type ActiveModelType = ActiveModel;
    type InputModel = AgentInput;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "agent";
    const RESOURCE_NAME_PLURAL: &'static str = "agents";
    const TABLE_NAME: &'static str = "agents";

    fn list_columns() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "ip",
            "filesurvey",
            "role",
            "status",
            "created",
            "updated",
        ]
    }
}
