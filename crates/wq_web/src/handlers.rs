use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use wq_core::{QuizHistory, QuizResponse};
use wq_quiz::DEFAULT_HISTORY_LIMIT;

use crate::error::ApiError;
use crate::AppState;

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

pub async fn root() -> impl IntoResponse {
    Json(json!({ "status": "healthy", "message": "Wiki Quiz API is running" }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": API_VERSION,
        "endpoints": {
            "generate_quiz": "POST /api/quiz/generate",
            "get_history": "GET /api/quiz/history",
            "get_quiz": "GET /api/quiz/{quiz_id}",
            "delete_quiz": "DELETE /api/quiz/{quiz_id}"
        }
    }))
}

pub async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<QuizResponse>), ApiError> {
    let Json(request) = payload?;
    info!("📝 Quiz requested for {}", request.url.trim());
    let quiz = state.service.generate(&request.url).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

pub async fn quiz_history(
    State(state): State<Arc<AppState>>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<QuizHistory>, ApiError> {
    let Query(params) = params?;
    let history = state.service.history(params.skip, params.limit).await?;
    Ok(Json(history))
}

pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.service.get(id).await?))
}

pub async fn delete_quiz(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
