use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One résumé's screening outcome, as persisted in `candidates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Extracted skills joined with ", " in résumé order.
    pub skills: String,
    /// Lowercased JD skills found on the résumé, sorted and joined with ", ".
    pub matched_skills: String,
    pub match_score: f64,
    pub processed_at: DateTime<Utc>,
    pub email_sent: bool,
}

/// A candidate built by the pipeline that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub skills: String,
    pub matched_skills: String,
    pub match_score: f64,
    pub processed_at: DateTime<Utc>,
}

impl NewCandidate {
    /// Attaches a freshly assigned id. `email_sent` always starts out false.
    pub fn into_candidate(self, id: Uuid) -> Candidate {
        Candidate {
            id,
            name: self.name,
            email: self.email,
            skills: self.skills,
            matched_skills: self.matched_skills,
            match_score: self.match_score,
            processed_at: self.processed_at,
            email_sent: false,
        }
    }
}

/// Aggregate over every persisted candidate. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateStats {
    pub total_candidates: u64,
    pub qualified_candidates: u64,
    pub emails_sent: u64,
    pub average_score: f64,
}
