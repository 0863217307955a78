//! Candidate persistence.
//!
//! `PgCandidateStore` backs the service; tests use `MemoryCandidateStore`.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::candidate::{Candidate, NewCandidate};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Candidate {0} not found")]
    NotFound(Uuid),
}

/// Ranked reads break score ties by insertion order.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Persists a new candidate and returns it with its id assigned.
    async fn save(&self, candidate: NewCandidate) -> Result<Candidate, StoreError>;

    async fn set_email_sent(&self, id: Uuid, sent: bool) -> Result<(), StoreError>;

    async fn find_all_ordered_by_score_desc(&self) -> Result<Vec<Candidate>, StoreError>;

    async fn find_by_score_at_least(&self, threshold: f64) -> Result<Vec<Candidate>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, StoreError>;

    /// Insertion order.
    async fn find_all(&self) -> Result<Vec<Candidate>, StoreError>;

    /// Returns the number of rows removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;
}
