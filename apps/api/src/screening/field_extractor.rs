//! Field Extractor: LLM-backed structuring of free text.
//!
//! `ScreeningPipeline` holds an `Arc<dyn FieldExtractor>`; tests swap in fakes.

use async_trait::async_trait;
use tracing::debug;

use crate::llm_client::{LlmClient, LlmError};
use crate::screening::field_parser::{parse_candidate_fields, parse_skill_list, CandidateFields};
use crate::screening::prompts::{
    JD_SKILLS_PROMPT_TEMPLATE, JD_SKILLS_SYSTEM, RESUME_FIELDS_PROMPT_TEMPLATE,
    RESUME_FIELDS_SYSTEM,
};

#[async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Required skills listed in a job description.
    async fn extract_required_skills(&self, job_description: &str)
        -> Result<Vec<String>, LlmError>;

    /// Name, email and skills from résumé text.
    async fn extract_candidate_fields(&self, resume_text: &str)
        -> Result<CandidateFields, LlmError>;
}

pub struct LlmFieldExtractor {
    llm: LlmClient,
}

impl LlmFieldExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl FieldExtractor for LlmFieldExtractor {
    async fn extract_required_skills(
        &self,
        job_description: &str,
    ) -> Result<Vec<String>, LlmError> {
        let prompt = JD_SKILLS_PROMPT_TEMPLATE.replace("{jd_text}", job_description);
        let response = self.llm.complete(&prompt, JD_SKILLS_SYSTEM).await?;
        debug!("JD skills response: {response}");
        Ok(parse_skill_list(&response))
    }

    async fn extract_candidate_fields(
        &self,
        resume_text: &str,
    ) -> Result<CandidateFields, LlmError> {
        let prompt = RESUME_FIELDS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let response = self.llm.complete(&prompt, RESUME_FIELDS_SYSTEM).await?;
        debug!("Candidate fields response: {response}");
        Ok(parse_candidate_fields(&response))
    }
}
