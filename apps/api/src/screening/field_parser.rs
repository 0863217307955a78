//! Parsers for the plain-text LLM response contract.
//!
//! Candidate responses look like:
//!
//! ```text
//! Name: Jane Doe
//! Email: jane@example.com
//! Skills: Rust, PostgreSQL, Kubernetes
//! ```
//!
//! Models occasionally wrap labels or values in markdown emphasis, prefix lines
//! with bullets, or add a heading. All of that is stripped before parsing.

use serde::{Deserialize, Serialize};

/// Structured fields pulled from one résumé.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFields {
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
}

impl CandidateFields {
    /// Name and email are both required to build a candidate record.
    pub fn has_identity(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

/// Parses a candidate response into name, email and skills.
/// Missing labels produce empty values; callers decide whether that is fatal.
pub fn parse_candidate_fields(response: &str) -> CandidateFields {
    let cleaned = strip_markdown(response);

    let name = labeled_value(&cleaned, "name").unwrap_or_default();
    let email = labeled_value(&cleaned, "email").unwrap_or_default();
    let skills = skills_value(&cleaned);

    CandidateFields {
        name,
        email,
        skills,
    }
}

/// Parses a JD skills response: a comma-separated list, optionally preceded by
/// a label such as `Required skills:`.
pub fn parse_skill_list(response: &str) -> Vec<String> {
    let cleaned = strip_markdown(response);
    let list = match cleaned.rfind(':') {
        Some(idx) => &cleaned[idx + 1..],
        None => cleaned.as_str(),
    };
    split_skills(list)
}

/// Removes emphasis markers, heading hashes and leading bullets line by line.
pub fn strip_markdown(text: &str) -> String {
    text.lines()
        .map(|line| {
            let line = line.replace(&['*', '`'][..], "").replace("__", "");
            line.trim()
                .trim_start_matches('#')
                .trim_start()
                .trim_start_matches(|c| c == '-' || c == '•')
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finds the first line whose label (text before the first ':') equals
/// `label`, case-insensitively, and returns the trimmed value after it.
fn labeled_value(text: &str, label: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim().eq_ignore_ascii_case(label) {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

/// Value of the `Skills:` line. A bare label takes the lines below it, up to
/// the next labeled line. No label means no skills.
fn skills_value(text: &str) -> Vec<String> {
    let mut lines = text.lines();
    let Some(value) = lines.by_ref().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim().eq_ignore_ascii_case("skills").then(|| value.trim())
    }) else {
        return Vec::new();
    };

    if !value.is_empty() {
        return split_skills(value);
    }
    let block: Vec<&str> = lines.take_while(|line| !line.contains(':')).collect();
    split_skills(&block.join("\n"))
}

fn split_skills(list: &str) -> Vec<String> {
    list.split(|c| c == ',' || c == '\n')
        .map(|s| s.trim().trim_end_matches('.').trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
