use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Generation gateway. Provider chosen once at startup from `LLM_PROVIDER`;
    /// handlers and services depend on the trait only.
    pub llm: Arc<dyn LlmBackend>,
    /// Plain HTTP client for the Perplexity research call.
    pub http: reqwest::Client,
    pub config: Config,
}
