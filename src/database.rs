//! Connection and schema bootstrap.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::entities::{agent, user};

/// # Errors
///
/// Returns the driver error when the URL is invalid or the server unreachable.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    tracing::debug!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}

/// Create the `agents` and `users` tables when they do not exist yet.
///
/// # Errors
///
/// Returns the first failing `CREATE TABLE`.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, agent::Entity).await?;
    create_table(db, user::Entity).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let db = connect("sqlite::memory:").await.unwrap();
        init_schema(&db).await.unwrap();
        init_schema(&db).await.unwrap();

        assert_eq!(agent::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(user::Entity::find().count(&db).await.unwrap(), 0);
    }
}
