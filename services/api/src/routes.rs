use crate::infra::{AppState, ScoringState};
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use nutri::config::BulkConfig;
use nutri::error::AppError;
use nutri::ingest::{BulkImportError, BulkProductImporter, InputError, ProductRequest};
use nutri::nutriscore::{NutriscoreError, NutriscoreGrade, ScoreResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::{info, warn};

const UPLOAD_FIELD: &str = "file";

/// Outcome of scoring one CSV row; failed rows carry `error` instead of a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkRowResult {
    pub row: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<NutriscoreGrade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkScoreResponse {
    pub total: usize,
    pub failed: usize,
    pub results: Vec<BulkRowResult>,
}

impl BulkScoreResponse {
    pub fn from_results(results: Vec<Result<ScoreResult, NutriscoreError>>) -> Self {
        let results: Vec<BulkRowResult> = results
            .into_iter()
            .enumerate()
            .map(|(index, outcome)| match outcome {
                Ok(ScoreResult { score, grade }) => BulkRowResult {
                    row: index + 1,
                    score: Some(score),
                    grade: Some(grade),
                    error: None,
                },
                Err(err) => BulkRowResult {
                    row: index + 1,
                    score: None,
                    grade: None,
                    error: Some(err.to_string()),
                },
            })
            .collect();

        Self {
            total: results.len(),
            failed: results.iter().filter(|row| row.error.is_some()).count(),
            results,
        }
    }
}

/// Scoring endpoints; the upload limit also caps JSON bodies.
pub fn nutriscore_router(bulk: BulkConfig) -> Router {
    Router::new()
        .route("/nutriscore", post(score_endpoint))
        .route("/nutriscore/bulk", post(bulk_score_endpoint))
        .layer(DefaultBodyLimit::max(bulk.max_upload_bytes))
        .with_state(ScoringState::default())
}

pub(crate) fn with_service_routes(bulk: BulkConfig) -> Router {
    nutriscore_router(bulk)
        .route("/", get(welcome))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn welcome() -> &'static str {
    "Welcome to the Nutri-Score API."
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    State(state): State<ScoringState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ScoreResult>, AppError> {
    let Json(payload) = payload.map_err(|rejection| InputError::Undecodable {
        reason: rejection.body_text(),
    })?;
    let product = payload.into_product()?;
    match state.engine.calculate(&product) {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            warn!(category = %product.category, "rejected product: {err}");
            Err(err.into())
        }
    }
}

pub(crate) async fn bulk_score_endpoint(
    State(state): State<ScoringState>,
    mut multipart: Multipart,
) -> Result<Json<BulkScoreResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    BulkProductImporter::ensure_tabular(
        upload.file_name.as_deref(),
        upload.content_type.as_deref(),
    )?;

    let products = BulkProductImporter::from_reader(Cursor::new(upload.bytes))?;
    let response = BulkScoreResponse::from_results(state.engine.calculate_bulk(&products));

    info!(
        file = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        total = response.total,
        failed = response.failed,
        "bulk scoring completed"
    );

    Ok(Json(response))
}

struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, BulkImportError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(upload_error)?;

        return Ok(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(BulkImportError::Upload {
        reason: format!("multipart form has no '{UPLOAD_FIELD}' part"),
    })
}

fn upload_error(err: MultipartError) -> BulkImportError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        BulkImportError::UploadTooLarge {
            reason: err.body_text(),
        }
    } else {
        BulkImportError::Upload {
            reason: err.body_text(),
        }
    }
}
