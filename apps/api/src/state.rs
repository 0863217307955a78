use std::sync::Arc;

use crate::config::Config;
use crate::screening::pipeline::ScreeningPipeline;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CandidateStore>,
    /// Holds its own handle to the same store.
    pub pipeline: Arc<ScreeningPipeline>,
    pub config: Config,
}
