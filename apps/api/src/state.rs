use std::sync::Arc;

use crate::store::ConsultantStore;
use crate::uploads::storage::ImageStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Consultants, reviews and consultations. Postgres in production.
    pub store: Arc<dyn ConsultantStore>,
    /// Profile image storage (S3 / MinIO).
    pub images: Arc<dyn ImageStore>,
}
