use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use ns_core::{ArticleSummary, PdfSummary, Summary};
use ns_scrapers::scrapers::{stage_pdf, web::DEFAULT_MAX_ARTICLES};
use ns_scrapers::PdfMode;
use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct HomepageRequest {
    pub url: String,
    pub max_articles: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PdfQuery {
    pub mode: Option<PdfMode>,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.manager.model_name(),
    }))
}

pub async fn summarize_url(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UrlRequest>,
) -> ApiResult<Summary> {
    info!("🌐 Summarize URL {}", request.url);
    Ok(Json(state.manager.summarize_url(&request.url).await?))
}

pub async fn summarize_homepage(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HomepageRequest>,
) -> ApiResult<Vec<ArticleSummary>> {
    let max_articles = request.max_articles.unwrap_or(DEFAULT_MAX_ARTICLES);
    info!("🌐 Summarize homepage {} (max {})", request.url, max_articles);
    Ok(Json(
        state
            .manager
            .summarize_homepage(&request.url, max_articles)
            .await?,
    ))
}

pub async fn summarize_pdf(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PdfQuery>,
    mut multipart: Multipart,
) -> ApiResult<PdfSummary> {
    let mode = query.mode.unwrap_or_default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("file field has no file name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("malformed upload: {}", e)))?;

        let path = stage_pdf(&state.pdf_dir, &file_name, &bytes).await?;
        info!("🌐 Summarize PDF {} ({} mode)", path.display(), mode);
        return Ok(Json(state.manager.summarize_pdf(&path, mode).await?));
    }

    Err(ApiError::BadRequest("missing 'file' field".to_string()))
}
