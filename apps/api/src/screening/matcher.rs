//! Skill Matcher: case-insensitive overlap between JD skills and résumé skills.
//!
//! Score is relative to the distinct required skills only: extra skills on the
//! résumé neither raise nor lower it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Result of matching one résumé against the JD skill list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// Normalized (trimmed, lowercased) skills present in both lists.
    pub matched: BTreeSet<String>,
    /// 0.0 – 100.0
    pub score: f64,
}

impl SkillMatch {
    /// Human-readable form stored on the candidate record.
    pub fn matched_display(&self) -> String {
        self.matched
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Computes the matched set and percentage score.
///
/// Both lists are deduplicated after normalization, so repeated entries never
/// count twice. An empty required list scores 0.0.
pub fn match_skills<R, C>(required: &[R], candidate: &[C]) -> SkillMatch
where
    R: AsRef<str>,
    C: AsRef<str>,
{
    let required = normalize(required);
    let candidate = normalize(candidate);

    let matched: BTreeSet<String> = required.intersection(&candidate).cloned().collect();

    let score = if required.is_empty() {
        0.0
    } else {
        matched.len() as f64 / required.len() as f64 * 100.0
    };

    SkillMatch { matched, score }
}

fn normalize<S: AsRef<str>>(skills: &[S]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
