//! CSV ranking report: a summary block, a blank row, then one row per
//! candidate in ranked order.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::models::candidate::{Candidate, CandidateStats};

const HEADER: [&str; 8] = [
    "Rank",
    "Name",
    "Email",
    "Match Score (%)",
    "Skills",
    "Matched Skills",
    "Email Sent",
    "Processed Date",
];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// Builds the full report. `candidates` must already be ranked.
pub fn generate_report(
    candidates: &[Candidate],
    stats: &CandidateStats,
    threshold: f64,
    generated_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    // summary rows are narrower than candidate rows
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(["RESUME SCREENING SUMMARY"])?;
    writer.write_record(["Total Candidates".to_string(), stats.total_candidates.to_string()])?;
    writer.write_record([
        format!("Qualified Candidates (>={threshold:.1}%)"),
        stats.qualified_candidates.to_string(),
    ])?;
    writer.write_record(["Emails Sent".to_string(), stats.emails_sent.to_string()])?;
    writer.write_record([
        "Average Score".to_string(),
        format!("{:.1}%", stats.average_score),
    ])?;
    writer.write_record([
        "Generated On".to_string(),
        generated_at.format(DATE_FORMAT).to_string(),
    ])?;
    writer.write_record([""])?;

    writer.write_record(HEADER)?;
    for (idx, candidate) in candidates.iter().enumerate() {
        writer.write_record(candidate_row(idx + 1, candidate))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    let content = String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))?;

    info!("Generated CSV report for {} candidates", candidates.len());
    Ok(content)
}

/// Download name, e.g. `candidate_rankings_20261018_142501.csv`.
pub fn report_filename(generated_at: DateTime<Utc>) -> String {
    format!(
        "candidate_rankings_{}.csv",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

fn candidate_row(rank: usize, candidate: &Candidate) -> [String; 8] {
    [
        rank.to_string(),
        candidate.name.clone(),
        candidate.email.clone(),
        format!("{:.1}", candidate.match_score),
        candidate.skills.clone(),
        candidate.matched_skills.clone(),
        if candidate.email_sent { "Yes" } else { "No" }.to_string(),
        candidate.processed_at.format(DATE_FORMAT).to_string(),
    ]
}
