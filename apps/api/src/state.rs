use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::tailoring::Tailor;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Outbound HTTP client for non-LLM providers (billing checkout).
    pub http: reqwest::Client,
    /// Pluggable tailoring backend. Production wires `LlmTailor`.
    pub tailor: Arc<dyn Tailor>,
    pub config: Config,
}
