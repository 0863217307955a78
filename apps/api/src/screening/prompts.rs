// LLM prompt constants for the screening module.
// Responses are plain labeled text, parsed by `field_parser`.

use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;

/// System prompt for JD skill extraction.
pub const JD_SKILLS_SYSTEM: &str = PLAIN_TEXT_SYSTEM;

/// JD skill extraction prompt. Replace `{jd_text}` before sending.
pub const JD_SKILLS_PROMPT_TEMPLATE: &str = "\
Extract only the list of required skills from the following job description:

{jd_text}

Return skills as a comma-separated list.";

/// System prompt for résumé field extraction.
pub const RESUME_FIELDS_SYSTEM: &str = PLAIN_TEXT_SYSTEM;

/// Résumé field extraction prompt. Replace `{resume_text}` before sending.
pub const RESUME_FIELDS_PROMPT_TEMPLATE: &str = "\
Extract the following from the resume text below in plain text only, \
without adding asterisks, bullet points, or markdown formatting. \
Return exactly in this format:
Name: <full name>
Email: <email address>
Skills: <comma-separated skills>

Resume:
{resume_text}";
