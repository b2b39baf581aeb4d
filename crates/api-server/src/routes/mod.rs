//! Route handlers

pub mod health;
pub mod index;
pub mod todo;

use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError, Router};
use tower::ServiceBuilder;

use crate::state::AppState;
use self::todo::{route_error, RouteError};

async fn handle_middleware_error(err: BoxError) -> RouteError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request exceeded its time limit");
        route_error(StatusCode::SERVICE_UNAVAILABLE, "Request timed out")
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        route_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

/// All routes, bound to `state`, each request capped at `request_timeout`.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(index::router())
        .merge(health::router())
        .merge(todo::router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
}
