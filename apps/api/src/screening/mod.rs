// Résumé screening: JD skill extraction, per-file structuring, skill matching,
// ranking, notification and statistics.
// All LLM calls go through llm_client via field_extractor.

pub mod field_extractor;
pub mod field_parser;
pub mod handlers;
pub mod matcher;
pub mod pipeline;
pub mod prompts;
pub mod stats;
