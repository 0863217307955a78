//! Axum route handlers for screening and candidate management.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::csv_report::{generate_report, report_filename};
use crate::extraction::UploadedFile;
use crate::models::candidate::{Candidate, CandidateStats};
use crate::screening::pipeline::SkippedFile;
use crate::screening::stats::compute_stats;
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUMES_FIELD: &str = "resumes";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub processed: usize,
    pub message: String,
    pub candidates: Vec<Candidate>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CandidateStats,
    pub shortlist_threshold: f64,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub deleted: u64,
}

/// Form contents of a screening upload.
#[derive(Debug, Default)]
struct ScreeningForm {
    job_description: String,
    resumes: Vec<UploadedFile>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Multipart form: a `job_description` text field and one or more `resumes`
/// file fields. Returns the batch ranked by score.
pub async fn handle_screen(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let form = read_screening_form(multipart).await?;
    info!("Received screening request with {} resume files", form.resumes.len());

    let outcome = state
        .pipeline
        .run(&form.job_description, &form.resumes)
        .await?;

    let message = if outcome.is_empty() {
        "No candidates could be processed. Please check that the PDF files are valid \
         and contain readable text."
            .to_string()
    } else {
        format!("Successfully processed {} resumes", outcome.candidates.len())
    };

    Ok(Json(ScreeningResponse {
        processed: outcome.candidates.len(),
        message,
        candidates: outcome.candidates,
        skipped: outcome.skipped,
    }))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    Ok(Json(state.store.find_all_ordered_by_score_desc().await?))
}

/// GET /api/v1/candidates/qualified
pub async fn handle_qualified_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let threshold = state.config.shortlist_threshold;
    Ok(Json(state.store.find_by_score_at_least(threshold).await?))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Candidate>, AppError> {
    state
        .store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}

/// DELETE /api/v1/candidates
pub async fn handle_clear_candidates(
    State(state): State<AppState>,
) -> Result<Json<ClearResponse>, AppError> {
    let deleted = state.store.delete_all().await?;
    info!("All candidate data cleared ({deleted} rows)");
    Ok(Json(ClearResponse { deleted }))
}

/// GET /api/v1/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let threshold = state.config.shortlist_threshold;
    let all = state.store.find_all().await?;
    Ok(Json(StatsResponse {
        stats: compute_stats(&all, threshold),
        shortlist_threshold: threshold,
    }))
}

/// GET /api/v1/candidates/export
///
/// CSV attachment of every candidate, ranked, with a summary block on top.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let ranked = state.store.find_all_ordered_by_score_desc().await?;
    if ranked.is_empty() {
        return Err(AppError::Validation("No candidates to export".to_string()));
    }

    let threshold = state.config.shortlist_threshold;
    let stats = compute_stats(&ranked, threshold);
    let now = Utc::now();
    let csv = generate_report(&ranked, &stats, threshold, now)?;
    let filename = report_filename(now);
    info!("CSV export requested: {filename}");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart parsing
// ────────────────────────────────────────────────────────────────────────────

async fn read_screening_form(mut multipart: Multipart) -> Result<ScreeningForm, AppError> {
    let mut form = ScreeningForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => {
                form.job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable job description: {e}")))?;
            }
            Some(RESUMES_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable upload: {e}")))?;

                // browsers send an empty, unnamed part when no file was chosen
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }

                form.resumes.push(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    Ok(form)
}
