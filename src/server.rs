//! Router assembly: resource routes under `/api/v1`, CORS and request tracing.

use std::time::Duration;

use axum::{
    Router,
    http::{
        HeaderName, HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_RANGE, CONTENT_TYPE, InvalidHeaderValue, ORIGIN},
    },
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::entities::{Agent, User};
use crate::filtering::TOTAL_COUNT_HEADER;
use crate::operations::{AppState, crud_router};

pub const API_PREFIX: &str = "/api/v1";

const CORS_MAX_AGE: Duration = Duration::from_secs(50);

/// Routes of every resource, without prefix or middleware.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(crud_router::<Agent>())
        .merge(crud_router::<User>())
}

/// CORS policy for browser admin front-ends.
///
/// Credentials are allowed, so a `*` origin is answered by echoing the
/// request's `Origin` back.
///
/// # Errors
///
/// Fails when `origin` is not a valid header value.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let allow_origin = if origin == "*" {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::exact(HeaderValue::from_str(origin)?)
    };
    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers([ORIGIN, AUTHORIZATION, CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(TOTAL_COUNT_HEADER), CONTENT_RANGE])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE))
}

/// The complete application.
///
/// # Errors
///
/// Fails when the configured CORS origin is not a valid header value.
pub fn build_app(state: AppState, config: &AppConfig) -> Result<Router, InvalidHeaderValue> {
    let app = Router::new()
        .nest(API_PREFIX, api_router())
        .layer(cors_layer(&config.cors_origin)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    Ok(app)
}
