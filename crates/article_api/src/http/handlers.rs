use crate::http::response::{ApiError, ApiResponse, ApiResult};
use crate::http::state::AppState;
use article_core::{
    Article, ArticleId, ArticleUpdatePayload, BulkCreateOutcome, CreateArticleBody, CreateOutcome,
};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

/// Bulk create payload of a `201` response.
#[derive(Debug, Serialize)]
pub struct BulkCreateResponse {
    pub created_articles: Vec<Article>,
    pub total_created: usize,
    pub total_failed: usize,
    pub errors: Vec<String>,
}

impl From<BulkCreateOutcome> for BulkCreateResponse {
    fn from(value: BulkCreateOutcome) -> Self {
        Self {
            total_created: value.created.len(),
            total_failed: value.errors.len(),
            created_articles: value.created,
            errors: value.errors,
        }
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Article CRUD API",
        "endpoints": {
            "health": "/api/v1/health",
            "articles": {
                "get_all": "GET /api/v1/articles",
                "create": "POST /api/v1/articles",
                "get_by_id": "GET /api/v1/articles/:id",
                "update": "PUT /api/v1/articles/:id",
                "delete": "DELETE /api/v1/articles/:id",
            }
        }
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "success",
        message: "Article CRUD API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn list_articles(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<Article>>>> {
    let articles = state.run(|service| service.list()).await?;
    Ok(Json(ApiResponse::ok("articles retrieved", articles)))
}

pub async fn create_article(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let value: Value = serde_json::from_slice(&body)
        .map_err(|err| ApiError::Validation(format!("invalid request body: {err}")))?;
    let body = CreateArticleBody::from_value(value).map_err(ApiError::Validation)?;

    let response = match state.run(move |service| service.create(body)).await? {
        CreateOutcome::Single(article) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok("article created", article)),
        )
            .into_response(),
        CreateOutcome::Bulk(outcome) => {
            let mut message = format!("created {} articles", outcome.created.len());
            if !outcome.errors.is_empty() {
                message.push_str(&format!(", {} failed", outcome.errors.len()));
            }
            (
                StatusCode::CREATED,
                Json(ApiResponse::ok(message, BulkCreateResponse::from(outcome))),
            )
                .into_response()
        }
    };
    Ok(response)
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Article>>> {
    let id = parse_id(&raw_id)?;
    let article = state.run(move |service| service.get(id)).await?;
    Ok(Json(ApiResponse::ok("article retrieved", article)))
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<Article>>> {
    let id = parse_id(&raw_id)?;
    let payload: ArticleUpdatePayload = serde_json::from_slice(&body)
        .map_err(|err| ApiError::Validation(format!("invalid request body: {err}")))?;

    let article = state
        .run(move |service| service.update(id, payload))
        .await?;
    Ok(Json(ApiResponse::ok("article updated", article)))
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let id = parse_id(&raw_id)?;
    state.run(move |service| service.delete(id)).await?;
    Ok(Json(ApiResponse::message("article deleted")))
}

pub async fn fallback() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}

fn parse_id(raw: &str) -> ApiResult<ArticleId> {
    raw.parse::<ArticleId>()
        .map_err(|_| ApiError::Validation("invalid article id".to_string()))
}
