//! Screening pipeline: orchestrates one batch of résumés against one JD.
//!
//! Flow: extract JD skills (once) → per file: validate → extract text →
//!       extract fields → match skills → persist → notify all → rank.
//!
//! Every file resolves to a `FileOutcome`. Per-file failures become
//! `FileOutcome::Skipped` and never abort the batch; only invalid input, a
//! failed JD skill extraction, or a store failure end the run early.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::extraction::validation::validate_pdf;
use crate::extraction::{TextExtractor, UploadedFile};
use crate::models::candidate::{Candidate, NewCandidate};
use crate::notify::Notifier;
use crate::screening::field_extractor::FieldExtractor;
use crate::screening::matcher::match_skills;
use crate::store::{CandidateStore, StoreError};

#[derive(Debug, Error)]
pub enum ScreeningError {
    /// The batch itself is invalid; nothing was attempted.
    #[error("Invalid input: {0}")]
    Input(String),

    /// JD skill extraction failed, so no candidate can be scored.
    #[error("External service failure: {0}")]
    ExternalService(String),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

/// Why a single file was left out of the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    EmptyFile,
    InvalidFile(String),
    ExtractionFailed(String),
    NoText,
    FieldExtractionFailed(String),
    MissingIdentity,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyFile => write!(f, "empty file"),
            SkipReason::InvalidFile(msg) => write!(f, "invalid file: {msg}"),
            SkipReason::ExtractionFailed(msg) => write!(f, "text extraction failed: {msg}"),
            SkipReason::NoText => write!(f, "no text could be extracted"),
            SkipReason::FieldExtractionFailed(msg) => write!(f, "field extraction failed: {msg}"),
            SkipReason::MissingIdentity => write!(f, "could not extract name and email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Processed(Candidate),
    Skipped(SkippedFile),
}

/// Result of a completed batch. An empty `candidates` list means every file
/// was skipped, which is not an error.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// Descending by match score; ties keep upload order.
    pub candidates: Vec<Candidate>,
    pub skipped: Vec<SkippedFile>,
}

impl BatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    pub shortlist_threshold: f64,
    pub max_upload_bytes: usize,
}

/// The screening orchestrator. All collaborators are injected so tests can
/// substitute fakes.
pub struct ScreeningPipeline {
    text_extractor: Arc<dyn TextExtractor>,
    field_extractor: Arc<dyn FieldExtractor>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn CandidateStore>,
    settings: PipelineSettings,
}

impl ScreeningPipeline {
    pub fn new(
        text_extractor: Arc<dyn TextExtractor>,
        field_extractor: Arc<dyn FieldExtractor>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn CandidateStore>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            text_extractor,
            field_extractor,
            notifier,
            store,
            settings,
        }
    }

    pub fn shortlist_threshold(&self) -> f64 {
        self.settings.shortlist_threshold
    }

    /// Screens every file against the job description and returns the ranked batch.
    pub async fn run(
        &self,
        job_description: &str,
        files: &[UploadedFile],
    ) -> Result<BatchOutcome, ScreeningError> {
        if job_description.trim().is_empty() {
            return Err(ScreeningError::Input(
                "Job description is required".to_string(),
            ));
        }
        if files.is_empty() {
            return Err(ScreeningError::Input(
                "At least one resume file is required".to_string(),
            ));
        }

        info!("Starting screening batch with {} files", files.len());

        let required_skills = self
            .field_extractor
            .extract_required_skills(job_description)
            .await
            .map_err(|e| ScreeningError::ExternalService(format!("JD skill extraction failed: {e}")))?;
        info!(
            "Extracted {} skills from job description: {:?}",
            required_skills.len(),
            required_skills
        );

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            outcomes.push(self.process_file(&required_skills, file).await?);
        }
        let (mut candidates, skipped) = partition_outcomes(outcomes);

        self.notify_all(&mut candidates).await?;
        rank(&mut candidates);

        info!(
            "Finished screening batch: {} candidates, {} skipped",
            candidates.len(),
            skipped.len()
        );

        Ok(BatchOutcome {
            candidates,
            skipped,
        })
    }

    /// Screens one file and persists the candidate. Only a store failure is
    /// returned as an error; everything else becomes `FileOutcome::Skipped`.
    async fn process_file(
        &self,
        required_skills: &[String],
        file: &UploadedFile,
    ) -> Result<FileOutcome, ScreeningError> {
        match self.screen_file(required_skills, file).await {
            Ok(new_candidate) => {
                let candidate = self.store.save(new_candidate).await?;
                info!(
                    "Processed candidate: {} - Score: {:.1}%",
                    candidate.name, candidate.match_score
                );
                Ok(FileOutcome::Processed(candidate))
            }
            Err(reason) => {
                warn!("Skipping {}: {reason}", file.file_name);
                Ok(FileOutcome::Skipped(SkippedFile {
                    file_name: file.file_name.clone(),
                    reason,
                }))
            }
        }
    }

    async fn screen_file(
        &self,
        required_skills: &[String],
        file: &UploadedFile,
    ) -> Result<NewCandidate, SkipReason> {
        if file.is_empty() {
            return Err(SkipReason::EmptyFile);
        }

        info!(
            "Processing resume: {} ({} bytes, {})",
            file.file_name,
            file.size(),
            file.content_type.as_deref().unwrap_or("unknown type")
        );

        validate_pdf(file, self.settings.max_upload_bytes)
            .map_err(|e| SkipReason::InvalidFile(e.to_string()))?;

        let text = self
            .text_extractor
            .extract(file)
            .await
            .map_err(|e| SkipReason::ExtractionFailed(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(SkipReason::NoText);
        }

        let fields = self
            .field_extractor
            .extract_candidate_fields(&text)
            .await
            .map_err(|e| SkipReason::FieldExtractionFailed(e.to_string()))?;
        if !fields.has_identity() {
            return Err(SkipReason::MissingIdentity);
        }

        let skill_match = match_skills(required_skills, &fields.skills);

        Ok(NewCandidate {
            name: fields.name.trim().to_string(),
            email: fields.email.trim().to_string(),
            skills: fields.skills.join(", "),
            matched_skills: skill_match.matched_display(),
            match_score: skill_match.score,
            processed_at: Utc::now(),
        })
    }

    /// Sends one notification per candidate in upload order and records the
    /// delivery result. Skipped entirely when the notifier is not configured.
    async fn notify_all(&self, candidates: &mut [Candidate]) -> Result<(), ScreeningError> {
        if candidates.is_empty() {
            info!("No candidates to notify");
            return Ok(());
        }
        if !self.notifier.is_configured() {
            warn!("Email is not configured, skipping notifications");
            return Ok(());
        }

        info!("Sending notifications to {} candidates", candidates.len());

        let threshold = self.settings.shortlist_threshold;
        for candidate in candidates.iter_mut() {
            let sent = self.notifier.notify(candidate, threshold).await;
            self.store.set_email_sent(candidate.id, sent).await?;
            candidate.email_sent = sent;
        }
        Ok(())
    }
}

/// Splits per-file outcomes into persisted candidates and skipped files,
/// preserving upload order in both.
pub fn partition_outcomes(outcomes: Vec<FileOutcome>) -> (Vec<Candidate>, Vec<SkippedFile>) {
    outcomes.into_iter().fold(
        (Vec::new(), Vec::new()),
        |(mut candidates, mut skipped), outcome| {
            match outcome {
                FileOutcome::Processed(c) => candidates.push(c),
                FileOutcome::Skipped(s) => skipped.push(s),
            }
            (candidates, skipped)
        },
    )
}

/// Descending by score. `sort_by` is stable, so ties keep upload order.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
}
