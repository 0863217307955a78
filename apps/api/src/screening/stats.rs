use crate::models::candidate::{Candidate, CandidateStats};

/// Folds the full persisted candidate set into summary counts.
/// Called on every request; nothing is cached because uploads and clears
/// change the set between calls.
pub fn compute_stats(candidates: &[Candidate], threshold: f64) -> CandidateStats {
    let total = candidates.len() as u64;
    let qualified = candidates
        .iter()
        .filter(|c| c.match_score >= threshold)
        .count() as u64;
    let emails_sent = candidates.iter().filter(|c| c.email_sent).count() as u64;
    let average_score = if candidates.is_empty() {
        0.0
    } else {
        candidates.iter().map(|c| c.match_score).sum::<f64>() / total as f64
    };

    CandidateStats {
        total_candidates: total,
        qualified_candidates: qualified,
        emails_sent,
        average_score,
    }
}
