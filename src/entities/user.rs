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
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[serde(rename = "mail")]
    pub email: String,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    /// Stored as received, never returned.
    #[serde(skip_serializing)]
    pub pass: String,
    pub created: DateTimeUtc,
    pub updated: DateTimeUtc,
}

pub type User = Model;

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

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserInput {
    pub name: String,
    #[serde(rename = "mail")]
    pub email: String,
    pub status: String,
    pub comment: String,
    pub pass: String,
}

impl Validatable for UserInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_required("name", &self.name));
        errors.result()
    }
}

impl From<UserInput> for ActiveModel {
    fn from(input: UserInput) -> Self {
        Self {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email),
            status: Set(input.status),
            comment: Set(input.comment),
            pass: Set(input.pass),
            created: NotSet,
            updated: NotSet,
        }
    }
}

impl MergeIntoActiveModel<ActiveModel> for UserInput {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> ActiveModel {
        existing.name = Set(self.name);
        existing.email = Set(self.email);
        existing.status = Set(self.status);
        existing.comment = Set(self.comment);
        existing.pass = Set(self.pass);
        existing
    }
}

#[async_trait]
impl CRUDResource for Model {
    type EntityType = Entity;
    type ColumnType = Column;
    type ActiveModelType = ActiveModel;
    type InputModel = UserInput;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "user";
    const RESOURCE_NAME_PLURAL: &'static str = "users";
    const TABLE_NAME: &'static str = "users";

    // `pass` is writable but never searchable.
    fn list_columns() -> &'static [&'static str] {
        &[
            "id", "name", "email", "status", "comment", "created", "updated",
        ]
    }
}
