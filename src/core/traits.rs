use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, IntoActiveModel, QueryFilter, Statement,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::errors::ApiError;
use crate::filtering::{ColumnAllowList, QueryFragment};
use crate::validation::Validatable;

/// Explicit field mapping applied by an update: every mutable column of the
/// existing row is overwritten from the payload.
pub trait MergeIntoActiveModel<ActiveModelType> {
    #[must_use]
    fn merge_into_activemodel(self, existing: ActiveModelType) -> ActiveModelType;
}

/// A table exposed through the generic CRUD handlers.
///
/// Implemented on the Sea-ORM `Model`, which doubles as the JSON representation.
/// The same input struct is used for create and update payloads.
#[async_trait]
pub trait CRUDResource: FromQueryResult + Sized + Send + Sync + Serialize + 'static {
    type EntityType: EntityTrait<Model = Self> + Sync;
    type ColumnType: ColumnTrait + Send + Sync;
    type ActiveModelType: ActiveModelTrait<Entity = Self::EntityType>
        + ActiveModelBehavior
        + Send
        + Sync;
    type InputModel: DeserializeOwned
        + Validatable
        + Into<Self::ActiveModelType>
        + MergeIntoActiveModel<Self::ActiveModelType>
        + Send
        + Sync
        + 'static;

    const ID_COLUMN: Self::ColumnType;
    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;
    const TABLE_NAME: &'static str;

    /// Columns that list requests may filter and sort on.
    fn list_columns() -> &'static [&'static str];

    /// Columns storing textual timestamps, compared as dates when sorting.
    #[must_use]
    fn timestamp_columns() -> &'static [&'static str] {
        &["created", "updated"]
    }

    #[must_use]
    fn column_allow_list() -> ColumnAllowList {
        ColumnAllowList::new(Self::list_columns().iter().copied())
            .with_normalized(Self::timestamp_columns().iter().copied())
    }

    /// Run a statement built by [`QueryFragment::select_statement`].
    async fn get_all(db: &DatabaseConnection, statement: Statement) -> Result<Vec<Self>, ApiError> {
        Self::EntityType::find()
            .from_raw_sql(statement)
            .all(db)
            .await
            .map_err(ApiError::database)
    }

    /// Number of rows matching the fragment's filters, ignoring pagination.
    async fn total_count(db: &DatabaseConnection, fragment: &QueryFragment) -> Result<u64, ApiError> {
        let statement = fragment.count_statement(Self::TABLE_NAME, db.get_database_backend());
        let row = db
            .query_one(statement)
            .await
            .map_err(ApiError::database)?
            .ok_or_else(|| ApiError::internal("Failed to count rows", None))?;
        let total: i64 = row.try_get("", "total").map_err(ApiError::database)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn get_one(db: &DatabaseConnection, id: i64) -> Result<Self, ApiError> {
        Self::EntityType::find()
            .filter(Self::ID_COLUMN.eq(id))
            .one(db)
            .await
            .map_err(ApiError::database)?
            .ok_or_else(|| ApiError::not_found(Self::RESOURCE_NAME_SINGULAR, Some(id.to_string())))
    }

    async fn create(db: &DatabaseConnection, input: Self::InputModel) -> Result<Self, ApiError>
    where
        Self: IntoActiveModel<Self::ActiveModelType>,
    {
        input.validate()?;
        let active_model: Self::ActiveModelType = input.into();
        active_model.insert(db).await.map_err(ApiError::database)
    }

    /// Overwrite every mutable field of an existing row.
    ///
    /// A missing row is reported before the payload is validated.
    async fn update(
        db: &DatabaseConnection,
        id: i64,
        input: Self::InputModel,
    ) -> Result<Self, ApiError>
    where
        Self: IntoActiveModel<Self::ActiveModelType>,
    {
        let existing = Self::get_one(db, id).await?;
        input.validate()?;
        let merged = input.merge_into_activemodel(existing.into_active_model());
        merged.update(db).await.map_err(ApiError::database)
    }

    async fn delete(db: &DatabaseConnection, id: i64) -> Result<i64, ApiError> {
        let res = Self::EntityType::delete_many()
            .filter(Self::ID_COLUMN.eq(id))
            .exec(db)
            .await
            .map_err(ApiError::database)?;
        match res.rows_affected {
            0 => Err(ApiError::not_found(
                Self::RESOURCE_NAME_SINGULAR,
                Some(id.to_string()),
            )),
            _ => Ok(id),
        }
    }
}
