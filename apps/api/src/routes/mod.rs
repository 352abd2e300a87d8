pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::auth;
use crate::billing;
use crate::document;
use crate::enrichment::handlers as enrichment;
use crate::render;
use crate::state::AppState;
use crate::store::handlers as store;
use crate::tailoring;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route("/api/v1/me", get(auth::handle_me))
        // Document reducer
        .route(
            "/api/v1/documents/patch",
            post(document::handlers::handle_apply_patches),
        )
        // Enrichment
        .route("/api/v1/resumes/build", post(enrichment::handle_build_resume))
        .route("/api/v1/resumes/import", post(enrichment::handle_import_resume))
        .route("/api/v1/resumes/refine", post(enrichment::handle_refine_resume))
        .route("/api/v1/sections/improve", post(enrichment::handle_improve_section))
        .route("/api/v1/sections/bullets", post(enrichment::handle_suggest_bullets))
        .route("/api/v1/cover-letter", post(enrichment::handle_cover_letter))
        .route(
            "/api/v1/cover-letter/from-job",
            post(enrichment::handle_cover_letter_from_job),
        )
        // Tailoring
        .route("/api/v1/resumes/tailor", post(tailoring::handle_tailor))
        // Persistence
        .route("/api/v1/resumes/save", post(store::handle_save_resume))
        .route("/api/v1/resumes", get(store::handle_list_resumes))
        .route("/api/v1/resumes", delete(store::handle_delete_all_resumes))
        .route("/api/v1/resumes/:id", get(store::handle_get_resume))
        // Application tracker
        .route("/api/v1/applications", post(store::handle_create_application))
        .route("/api/v1/applications", get(store::handle_list_applications))
        .route(
            "/api/v1/applications/:id/status",
            patch(store::handle_update_application_status),
        )
        // Export
        .route("/api/v1/export", post(render::handle_export))
        // Billing
        .route("/api/v1/billing/checkout", post(billing::handle_checkout))
        .route("/api/v1/billing/webhook", post(billing::handle_webhook))
        .with_state(state)
}
