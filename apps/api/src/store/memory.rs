use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::candidate::{Candidate, NewCandidate};
use crate::store::{CandidateStore, StoreError};

/// Vec-backed store for tests. Optionally fails every write to exercise
/// persistence-error paths.
#[derive(Default)]
pub struct MemoryCandidateStore {
    rows: Mutex<Vec<Candidate>>,
    fail_writes: bool,
}

impl MemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            rows: Mutex::default(),
            fail_writes: true,
        }
    }

    fn write_guard(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }

    fn snapshot(&self) -> Vec<Candidate> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn save(&self, candidate: NewCandidate) -> Result<Candidate, StoreError> {
        self.write_guard()?;
        let saved = candidate.into_candidate(Uuid::new_v4());
        self.rows.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn set_email_sent(&self, id: Uuid, sent: bool) -> Result<(), StoreError> {
        self.write_guard()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;
        row.email_sent = sent;
        Ok(())
    }

    async fn find_all_ordered_by_score_desc(&self) -> Result<Vec<Candidate>, StoreError> {
        let mut rows = self.snapshot();
        // stable sort keeps insertion order for ties
        rows.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        Ok(rows)
    }

    async fn find_by_score_at_least(&self, threshold: f64) -> Result<Vec<Candidate>, StoreError> {
        let ranked = self.find_all_ordered_by_score_desc().await?;
        Ok(ranked
            .into_iter()
            .filter(|c| c.match_score >= threshold)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, StoreError> {
        Ok(self.snapshot().into_iter().find(|c| c.id == id))
    }

    async fn find_all(&self) -> Result<Vec<Candidate>, StoreError> {
        Ok(self.snapshot())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        self.write_guard()?;
        let mut rows = self.rows.lock().unwrap();
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_candidate(name: &str, score: f64) -> NewCandidate {
        NewCandidate {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            skills: "Rust, SQL".to_string(),
            matched_skills: "rust".to_string(),
            match_score: score,
            processed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_then_ranked_read_preserves_fields() {
        let store = MemoryCandidateStore::new();
        let input = new_candidate("Ada", 42.5);
        let saved = store.save(input.clone()).await.unwrap();

        let all = store.find_all_ordered_by_score_desc().await.unwrap();
        assert_eq!(all.len(), 1);
        let read = &all[0];
        assert_eq!(read.id, saved.id);
        assert_eq!(read.name, input.name);
        assert_eq!(read.email, input.email);
        assert_eq!(read.skills, input.skills);
        assert_eq!(read.matched_skills, input.matched_skills);
        assert_eq!(read.match_score, input.match_score);
        assert_eq!(read.processed_at, input.processed_at);
        assert!(!read.email_sent);
    }

    #[tokio::test]
    async fn test_ranked_read_is_descending_with_stable_ties() {
        let store = MemoryCandidateStore::new();
        let first = store.save(new_candidate("A", 50.0)).await.unwrap();
        store.save(new_candidate("B", 90.0)).await.unwrap();
        let third = store.save(new_candidate("C", 50.0)).await.unwrap();

        let ranked = store.find_all_ordered_by_score_desc().await.unwrap();
        let names: Vec<_> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(ranked[1].id, first.id);
        assert_eq!(ranked[2].id, third.id);
    }

    #[tokio::test]
    async fn test_threshold_filter_is_inclusive() {
        let store = MemoryCandidateStore::new();
        store.save(new_candidate("A", 19.9)).await.unwrap();
        store.save(new_candidate("B", 20.0)).await.unwrap();
        let qualified = store.find_by_score_at_least(20.0).await.unwrap();
        assert_eq!(qualified.len(), 1);
        assert_eq!(qualified[0].name, "B");
    }

    #[tokio::test]
    async fn test_set_email_sent_and_unknown_id() {
        let store = MemoryCandidateStore::new();
        let saved = store.save(new_candidate("A", 10.0)).await.unwrap();
        store.set_email_sent(saved.id, true).await.unwrap();
        assert!(store.find_by_id(saved.id).await.unwrap().unwrap().email_sent);
        assert!(matches!(
            store.set_email_sent(Uuid::new_v4(), true).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_all_reports_count() {
        let store = MemoryCandidateStore::new();
        store.save(new_candidate("A", 10.0)).await.unwrap();
        store.save(new_candidate("B", 20.0)).await.unwrap();
        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
