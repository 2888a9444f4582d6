//! Bug endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::auth_failure;
use crate::mock_server::state::MockState;

#[derive(Debug, Deserialize)]
pub struct CreateBugRequest {
    pub user: String,
    pub password: String,
    pub summary: String,
    pub description: String,
    pub component_id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub user: String,
    pub password: String,
    pub bug_id: u64,
    pub desc: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBugRequest {
    pub user: String,
    pub password: String,
    pub bug_id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct CcRequest {
    pub user: String,
    pub password: String,
    pub bug_id: u64,
    pub emails: Vec<String>,
    pub action: String,
}

/// POST /bug/ — answers with the new bug id as bare text.
pub async fn create_bug(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(req): Json<CreateBugRequest>,
) -> Response {
    let mut state = state.write().await;

    if !state.authenticate(&req.user, &req.password) {
        return auth_failure();
    }

    let id = state.create_bug(req.summary, req.description, req.component_id, req.fields);
    id.to_string().into_response()
}

/// POST /comment/ — answers with the new comment id as bare text.
pub async fn add_comment(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(req): Json<CommentRequest>,
) -> Response {
    let mut state = state.write().await;

    if !state.authenticate(&req.user, &req.password) {
        return auth_failure();
    }

    match state.add_comment(req.bug_id, req.desc) {
        Some(id) => id.to_string().into_response(),
        None => Json("Wrong input").into_response(),
    }
}

/// POST /updatebug/ — answers "Success" on an overwrite-merge.
pub async fn update_bug(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(req): Json<UpdateBugRequest>,
) -> Response {
    let mut state = state.write().await;

    if !state.authenticate(&req.user, &req.password) {
        return auth_failure();
    }

    if state.update_bug(req.bug_id, req.fields) {
        Json("Success").into_response()
    } else {
        Json("Wrong input").into_response()
    }
}

/// POST /bug/cc — answers with an empty body on success.
pub async fn bug_cc(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(req): Json<CcRequest>,
) -> Response {
    let mut state = state.write().await;

    if !state.authenticate(&req.user, &req.password) {
        return auth_failure();
    }

    if state.change_cc(req.bug_id, &req.action, &req.emails) {
        "".into_response()
    } else {
        Json("Wrong input").into_response()
    }
}

/// GET /latestcreated/ — array of JSON-encoded summary strings.
pub async fn latest_created(State(state): State<Arc<RwLock<MockState>>>) -> Response {
    let state = state.read().await;
    Json(state.latest_created()).into_response()
}

/// GET /latestupdated/ — array of JSON-encoded summary strings.
pub async fn latest_updated(State(state): State<Arc<RwLock<MockState>>>) -> Response {
    let state = state.read().await;
    Json(state.latest_updated()).into_response()
}
