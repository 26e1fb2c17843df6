//! # Generic CRUD Handlers
//!
//! One set of axum handlers serves every [`CRUDResource`]. [`crud_router`]
//! mounts them under the resource's plural name:
//!
//! | Method   | Path              | Handler                |
//! |----------|-------------------|------------------------|
//! | `GET`    | `/{plural}`       | [`get_all_handler`]    |
//! | `POST`   | `/{plural}`       | [`create_one_handler`] |
//! | `GET`    | `/{plural}/{id}`  | [`get_one_handler`]    |
//! | `PUT`    | `/{plural}/{id}`  | [`update_one_handler`] |
//! | `DELETE` | `/{plural}/{id}`  | [`delete_one_handler`] |

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, IntoActiveModel, Statement};
use serde_json::{Map, Value};

use crate::core::CRUDResource;
use crate::errors::ApiError;
use crate::filtering::{total_count_headers, translate};
use crate::models::{ListParams, ListQuery};

/// Runtime switches shared by every handler.
#[derive(Clone, Copy, Debug, Default)]
pub struct HandlerOptions {
    /// Log generated list statements at `info` instead of `debug`.
    pub verbose: bool,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub options: HandlerOptions,
}

impl AppState {
    #[must_use]
    pub fn new(db: DatabaseConnection, options: HandlerOptions) -> Self {
        Self { db, options }
    }
}

fn log_statement<T: CRUDResource>(options: HandlerOptions, statement: &Statement) {
    if options.verbose {
        tracing::info!(resource = T::RESOURCE_NAME_PLURAL, sql = %statement.sql, values = ?statement.values, "list query");
    } else {
        tracing::debug!(resource = T::RESOURCE_NAME_PLURAL, sql = %statement.sql, values = ?statement.values, "list query");
    }
}

/// List rows matching the request's filters, one page at a time.
///
/// The `X-Total-Count` header carries the number of rows matching the
/// filters, regardless of pagination.
///
/// # Errors
///
/// Returns a 500 when either the page or the count query fails.
pub async fn get_all_handler<T>(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<(HeaderMap, Json<Vec<T>>), ApiError>
where
    T: CRUDResource,
{
    let query = ListQuery::from(&params);
    let fragment = translate(&query, &T::column_allow_list());
    let select = fragment.select_statement(T::TABLE_NAME, state.db.get_database_backend());
    log_statement::<T>(state.options, &select);

    let items = T::get_all(&state.db, select).await?;
    let total = T::total_count(&state.db, &fragment).await?;
    Ok((total_count_headers(total), Json(items)))
}

/// # Errors
///
/// Returns a 404 when no row has the given id.
pub async fn get_one_handler<T>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<T>, ApiError>
where
    T: CRUDResource,
{
    T::get_one(&state.db, id).await.map(Json)
}

/// # Errors
///
/// Returns a 400 when a mandatory field is empty.
pub async fn create_one_handler<T>(
    State(state): State<AppState>,
    Json(payload): Json<T::InputModel>,
) -> Result<(StatusCode, Json<T>), ApiError>
where
    T: CRUDResource + IntoActiveModel<T::ActiveModelType>,
{
    let created = T::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// # Errors
///
/// Returns a 404 for an unknown id, then a 400 when a mandatory field is empty.
pub async fn update_one_handler<T>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<T::InputModel>,
) -> Result<Json<T>, ApiError>
where
    T: CRUDResource + IntoActiveModel<T::ActiveModelType>,
{
    T::update(&state.db, id, payload).await.map(Json)
}

/// Responds with `{"id #<id>": "deleted"}`.
///
/// # Errors
///
/// Returns a 404 when no row has the given id.
pub async fn delete_one_handler<T>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError>
where
    T: CRUDResource,
{
    let deleted = T::delete(&state.db, id).await?;
    let mut body = Map::new();
    body.insert(format!("id #{deleted}"), Value::from("deleted"));
    Ok(Json(Value::Object(body)))
}

/// Routes for one resource, relative to the API prefix.
pub fn crud_router<T>() -> Router<AppState>
where
    T: CRUDResource + IntoActiveModel<T::ActiveModelType>,
{
    let collection = format!("/{}", T::RESOURCE_NAME_PLURAL);
    let item = format!("/{}/{{id}}", T::RESOURCE_NAME_PLURAL);
    Router::new()
        .route(
            &collection,
            get(get_all_handler::<T>).post(create_one_handler::<T>),
        )
        .route(
            &item,
            get(get_one_handler::<T>)
                .put(update_one_handler::<T>)
                .delete(delete_one_handler::<T>),
        )
}
