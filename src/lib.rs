//! # restcrud
//!
//! REST endpoints for agents and users on Axum and Sea-ORM. List requests
//! accept substring filters, sorting and pagination which are translated into
//! parameterized SQL by [`filtering`].

pub mod config;
pub mod core;
pub mod database;
pub mod entities;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod operations;
pub mod server;
pub mod validation;

pub use crate::core::{CRUDResource, MergeIntoActiveModel};
pub use errors::ApiError;
pub use models::{ListParams, ListQuery};
pub use operations::{AppState, HandlerOptions, crud_router};
pub use validation::{Validatable, ValidationError, ValidationErrors};
