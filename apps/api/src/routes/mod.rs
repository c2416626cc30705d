pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::bookings::handlers as bookings;
use crate::catalog::handlers as catalog;
use crate::profiles::handlers as profiles;
use crate::reviews::handlers as reviews;
use crate::state::AppState;
use crate::uploads::handlers as uploads;
use crate::uploads::validation::MAX_IMAGE_BYTES;

/// Image cap plus room for multipart framing.
const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/consultants", get(catalog::handle_list_consultants))
        .route("/api/v1/consultants/top", get(catalog::handle_top_consultants))
        .route("/api/v1/consultants/:id", get(catalog::handle_get_consultant))
        .route("/api/v1/filters/options", get(catalog::handle_filter_options))
        // Reviews
        .route("/api/v1/reviews", post(reviews::handle_submit_review))
        .route(
            "/api/v1/reviews/:id/approve",
            patch(reviews::handle_approve_review),
        )
        .route("/api/v1/admin/reviews", get(reviews::handle_pending_reviews))
        // Bookings & dashboard
        .route(
            "/api/v1/consultants/:id/bookings",
            post(bookings::handle_create_booking),
        )
        .route(
            "/api/v1/consultants/:id/bookings/scheduler",
            post(bookings::handle_scheduler_booking),
        )
        .route(
            "/api/v1/dashboard/:consultant_id/consultations",
            get(bookings::handle_dashboard),
        )
        .route(
            "/api/v1/consultations/:id/status/toggle",
            patch(bookings::handle_toggle_status),
        )
        // Profile editing
        .route(
            "/api/v1/consultants/:id/profile",
            put(profiles::handle_update_profile),
        )
        .route(
            "/api/v1/uploads",
            post(uploads::handle_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(state)
}
