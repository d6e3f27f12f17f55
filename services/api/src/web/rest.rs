//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.
//!
//! Every POST body is taken as untyped JSON and run through the matching schema in
//! `institute_core::validation` before anything else happens.

use crate::error::{ApiError, CERTIFICATE_NOT_FOUND};
use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use chrono::Utc;
use institute_core::{
    catalog::Course,
    domain::{Certificate, ChatMessage, ChatRole, InquiryType},
    ports::PortError,
    validation,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

pub const CONTACT_RECEIVED: &str =
    "Thank you for contacting us. We'll get back to you within 24 hours.";
pub const ADMISSION_RECEIVED: &str =
    "Application submitted successfully! Our team will contact you within 24 hours.";
pub const DEMO_BOOKED: &str =
    "Demo class booked successfully! We'll contact you shortly with the schedule.";

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        chat_handler,
        verify_certificate_handler,
        contact_handler,
        admission_inquiry_handler,
        list_courses_handler,
    ),
    components(
        schemas(ChatMessageResponse, CertificateResponse, SubmissionResponse)
    ),
    tags(
        (name = "Institute API", description = "Form intake, certificate verification and the course advisor chat.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// An assistant turn returned by the course advisor.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatMessageResponse {
    pub id: String,
    /// Always `assistant`.
    pub role: String,
    pub content: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(msg: ChatMessage) -> Self {
        let role = match msg.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        };
        Self {
            id: msg.id,
            role: role.to_string(),
            content: msg.content,
            timestamp: msg.timestamp,
        }
    }
}

/// A verified certificate.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResponse {
    pub id: Uuid,
    pub certificate_number: String,
    pub student_name: String,
    pub course_name: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub issue_date: String,
    pub grade: String,
}

impl From<Certificate> for CertificateResponse {
    fn from(cert: Certificate) -> Self {
        Self {
            id: cert.id,
            certificate_number: cert.certificate_number,
            student_name: cert.student_name,
            course_name: cert.course_name.to_string(),
            issue_date: cert.issue_date.format("%Y-%m-%d").to_string(),
            grade: cert.grade,
        }
    }
}

/// Acknowledgement of a form submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
}

impl SubmissionResponse {
    fn accepted(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Unwraps the JSON extractor, turning unreadable bodies into a 400.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Ask the course advisor a question.
///
/// The server keeps no conversation state; clients resend the full history each call.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body(content_type = "application/json", description = "`{message, conversationHistory?}`"),
    responses(
        (status = 200, description = "Assistant reply", body = ChatMessageResponse),
        (status = 400, description = "Malformed request or advisor unavailable")
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    let send = validation::parse_chat_send(json_body(body)?)?;

    let timeout = state.config.advisor_timeout;
    let reply = tokio::time::timeout(timeout, state.advisor.recommend(&send.message, &send.history))
        .await
        .map_err(|_| PortError::Upstream(format!("no reply within {:?}", timeout)))??;

    let message = ChatMessage::assistant_reply(reply, Utc::now().timestamp_millis());
    Ok(Json(message.into()))
}

/// Verify a certificate by number, student name and course.
#[utoipa::path(
    post,
    path = "/api/verify-certificate",
    request_body(content_type = "application/json", description = "`{certificateNumber, studentName, courseType}`"),
    responses(
        (status = 200, description = "Certificate found", body = CertificateResponse),
        (status = 400, description = "Malformed request"),
        (status = 404, description = "No matching certificate")
    )
)]
pub async fn verify_certificate_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CertificateResponse>, ApiError> {
    let query = validation::parse_certificate_query(json_body(body)?)?;

    let certificate = state
        .store
        .find_certificate(&query)
        .await?
        .ok_or_else(|| PortError::NotFound(CERTIFICATE_NOT_FOUND.to_string()))?;

    Ok(Json(certificate.into()))
}

/// Submit the contact form.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body(content_type = "application/json", description = "`{name, email, phone, courseInterest?, message}`"),
    responses(
        (status = 200, description = "Submission received", body = SubmissionResponse),
        (status = 400, description = "Malformed request")
    )
)]
pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let submission = validation::parse_contact(json_body(body)?)?;

    let position = state.store.append_contact(submission).await?;
    info!(position, "Contact form saved");

    Ok(Json(SubmissionResponse::accepted(CONTACT_RECEIVED)))
}

/// Apply for admission or book a free demo class.
#[utoipa::path(
    post,
    path = "/api/admission-inquiry",
    request_body(content_type = "application/json", description = "`{name, email, phone, courseInterested, preferredBatch, inquiryType}`"),
    responses(
        (status = 200, description = "Inquiry received", body = SubmissionResponse),
        (status = 400, description = "Malformed request")
    )
)]
pub async fn admission_inquiry_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let inquiry = validation::parse_admission_inquiry(json_body(body)?)?;
    let inquiry_type = inquiry.inquiry_type;

    let position = state.store.append_admission_inquiry(inquiry).await?;
    info!(position, %inquiry_type, "Admission inquiry saved");

    let message = match inquiry_type {
        InquiryType::Admission => ADMISSION_RECEIVED,
        InquiryType::Demo => DEMO_BOOKED,
    };
    Ok(Json(SubmissionResponse::accepted(message)))
}

/// List the course catalogue.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Every course the institute offers")
    )
)]
pub async fn list_courses_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Course>> {
    Json(state.catalog.courses.clone())
}
