//! HTTP REST API routes

mod place_routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Place routes
        .route("/api/places", post(place_routes::create_place))
        .route("/api/places/{id}", get(place_routes::get_place))
        .route("/api/places/{id}", put(place_routes::update_place))
        .route("/api/places/{id}", delete(place_routes::destroy_place))
        // Place class routes
        .route(
            "/api/place-classes",
            get(place_routes::list_place_classes),
        )
        .route(
            "/api/place-classes",
            post(place_routes::create_place_class),
        )
        .route(
            "/api/place-classes/{code}",
            get(place_routes::get_place_class),
        )
}
