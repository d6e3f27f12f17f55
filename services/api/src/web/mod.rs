pub mod rest;
pub mod state;

pub use rest::{
    admission_inquiry_handler, chat_handler, contact_handler, list_courses_handler,
    verify_certificate_handler,
};

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;

/// Builds the `/api` routes. Cross-cutting layers are added by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/verify-certificate", post(verify_certificate_handler))
        .route("/api/contact", post(contact_handler))
        .route("/api/admission-inquiry", post(admission_inquiry_handler))
        .route("/api/courses", get(list_courses_handler))
        .with_state(app_state)
}
