pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::company::handlers as company_handlers;
use crate::interview::handlers as interview_handlers;
use crate::resume::handlers as resume_handlers;
use crate::sessions::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview core
        .route(
            "/api/interview/greeting",
            post(interview_handlers::handle_greeting),
        )
        .route("/api/interview/chat", post(interview_handlers::handle_chat))
        .route(
            "/api/interview/verdict",
            post(interview_handlers::handle_verdict),
        )
        // Collaborators
        .route("/api/resume/analyze", post(resume_handlers::handle_analyze))
        .route(
            "/api/company/research",
            post(company_handlers::handle_research),
        )
        .route(
            "/api/sessions",
            post(session_handlers::handle_create).get(session_handlers::handle_list),
        )
        .route("/api/sessions/:id", get(session_handlers::handle_get))
        .with_state(state)
}
