//! Axum route handlers for the Screening API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::batch::batch_screen;
use crate::screening::models::{CandidateInput, CandidateScore, JobRequirements, ScreeningResult};
use crate::screening::report::{generate_screening_report, ScreeningReport};
use crate::screening::tables::ScreeningTables;
use crate::screening::validation::{
    ensure_valid, validate_batch_request, validate_screen_request,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub resume_text: String,
    pub requirements: JobRequirements,
}

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub score: CandidateScore,
    pub backend: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct BatchScreenRequest {
    pub candidates: Vec<CandidateInput>,
    pub requirements: JobRequirements,
}

#[derive(Debug, Serialize)]
pub struct BatchScreenResponse {
    pub results: Vec<ScreeningResult>,
    pub report: ScreeningReport,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub results: Vec<ScreeningResult>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub report: ScreeningReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/screening/tables
///
/// Returns the keyword and pattern tables the engine was built with.
pub async fn handle_get_tables(State(state): State<AppState>) -> Json<ScreeningTables> {
    Json(state.tables.as_ref().clone())
}

/// POST /api/v1/screening/screen
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreenResponse>, AppError> {
    ensure_valid(validate_screen_request(&request.resume_text, &request.requirements))?;

    let score = state.screener.screen(&request.resume_text, &request.requirements);

    Ok(Json(ScreenResponse {
        score,
        backend: state.screener.backend(),
    }))
}

/// POST /api/v1/screening/batch
///
/// Scores and ranks a candidate pool, and attaches the aggregate report.
/// Scoring is CPU-bound, so it runs off the async executor.
pub async fn handle_batch_screen(
    State(state): State<AppState>,
    Json(request): Json<BatchScreenRequest>,
) -> Result<Json<BatchScreenResponse>, AppError> {
    ensure_valid(validate_batch_request(
        &request.candidates,
        &request.requirements,
        state.config.max_batch_size,
    ))?;

    let screener = state.screener.clone();
    let (results, report) = tokio::task::spawn_blocking(move || {
        let results = batch_screen(screener.as_ref(), &request.candidates, &request.requirements);
        let report = generate_screening_report(&results);
        (results, report)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Batch screening task failed: {e}")))?;

    info!(
        candidates = report.summary.total_candidates,
        recommended = report.summary.recommended(),
        "Batch screened"
    );

    Ok(Json(BatchScreenResponse { results, report }))
}

/// POST /api/v1/screening/report
///
/// Builds a report from previously ranked results (e.g. persisted by the caller).
pub async fn handle_report(Json(request): Json<ReportRequest>) -> Json<ReportResponse> {
    let report = generate_screening_report(&request.results);
    let report_id = Uuid::new_v4();

    info!(%report_id, candidates = report.summary.total_candidates, "Screening report generated");

    Json(ReportResponse {
        report_id,
        generated_at: Utc::now(),
        report,
    })
}
