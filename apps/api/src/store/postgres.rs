use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::candidate::{Candidate, NewCandidate};
use crate::store::{CandidateStore, StoreError};

const CANDIDATE_COLUMNS: &str =
    "id, name, email, skills, matched_skills, match_score, processed_at, email_sent";

#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn save(&self, candidate: NewCandidate) -> Result<Candidate, StoreError> {
        let id = Uuid::new_v4();
        let saved = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            INSERT INTO candidates
                (id, name, email, skills, matched_skills, match_score, processed_at, email_sent)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(&candidate.skills)
        .bind(&candidate.matched_skills)
        .bind(candidate.match_score)
        .bind(candidate.processed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn set_email_sent(&self, id: Uuid, sent: bool) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE candidates SET email_sent = $1 WHERE id = $2")
            .bind(sent)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn find_all_ordered_by_score_desc(&self) -> Result<Vec<Candidate>, StoreError> {
        let rows = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY match_score DESC, seq ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_score_at_least(&self, threshold: f64) -> Result<Vec<Candidate>, StoreError> {
        let rows = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE match_score >= $1 \
             ORDER BY match_score DESC, seq ASC"
        ))
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, StoreError> {
        let row = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<Candidate>, StoreError> {
        let rows = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY seq ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM candidates")
            .execute(&self.pool)
            .await?;
        info!("Cleared {} candidates", result.rows_affected());
        Ok(result.rows_affected())
    }
}
