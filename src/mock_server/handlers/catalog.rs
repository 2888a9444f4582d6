//! Component, product and release endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use super::auth_failure;
use crate::mock_server::state::MockState;

#[derive(Debug, Deserialize)]
pub struct AddComponentRequest {
    pub user: String,
    pub password: String,
    pub name: String,
    pub description: String,
    pub product_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub user: String,
    pub password: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct AddReleaseRequest {
    pub user: String,
    pub password: String,
    pub name: String,
}

/// GET /components/{product_id}/ — name -> (id, name, description).
pub async fn list_components(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(product_id): Path<u64>,
) -> Response {
    let state = state.read().await;
    Json(state.components_of(product_id)).into_response()
}

/// POST /component/ — the id field doubles as the error channel.
pub async fn add_component(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(req): Json<AddComponentRequest>,
) -> Response {
    let mut state = state.write().await;

    if !state.authenticate(&req.user, &req.password) {
        return auth_failure();
    }

    match state.add_component(req.name.clone(), req.description.clone(), req.product_id) {
        Some(component) => Json(json!({
            "id": component.id,
            "name": component.name,
            "description": component.description,
        }))
        .into_response(),
        None => Json(json!({
            "id": "No such product.",
            "name": req.name,
            "description": req.description,
        }))
        .into_response(),
    }
}

/// POST /product/ — answers with the product record.
pub async fn add_product(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(req): Json<AddProductRequest>,
) -> Response {
    let mut state = state.write().await;

    if !state.authenticate(&req.user, &req.password) {
        return auth_failure();
    }

    let product = state.add_product(req.name, req.description);
    Json(json!({
        "id": product.id,
        "name": product.name,
        "description": product.description,
    }))
    .into_response()
}

/// GET /releases/ — array of release names.
pub async fn list_releases(State(state): State<Arc<RwLock<MockState>>>) -> Response {
    let state = state.read().await;
    Json(state.releases.clone()).into_response()
}

/// POST /releases/ — answers "Success".
pub async fn add_release(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(req): Json<AddReleaseRequest>,
) -> Response {
    let mut state = state.write().await;

    if !state.authenticate(&req.user, &req.password) {
        return auth_failure();
    }

    state.add_release(req.name);
    Json("Success").into_response()
}
