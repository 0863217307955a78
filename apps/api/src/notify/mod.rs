//! Notifier: tells each candidate whether they were shortlisted.

pub mod smtp;
pub mod templates;

use async_trait::async_trait;

use crate::models::candidate::Candidate;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// False when no transport or sender address is set up; the pipeline then
    /// skips notification entirely.
    fn is_configured(&self) -> bool;

    /// Sends a shortlist message when `match_score >= threshold`, a rejection
    /// otherwise. Returns whether delivery succeeded; never errors.
    async fn notify(&self, candidate: &Candidate, threshold: f64) -> bool;
}

/// Used when SMTP settings are absent.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    fn is_configured(&self) -> bool {
        false
    }

    async fn notify(&self, _candidate: &Candidate, _threshold: f64) -> bool {
        false
    }
}
