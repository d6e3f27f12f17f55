//! crates/institute_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, so the web layer
//! never depends on a concrete store or text-generation provider.

use async_trait::async_trait;
use crate::domain::{AdmissionInquiry, Certificate, CertificateQuery, ChatMessage, ContactSubmission};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The external recommendation provider failed or timed out. The payload is for logs only.
    #[error("Recommendation unavailable: {0}")]
    Upstream(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait RecordStore: Send + Sync {
    // --- Certificates ---

    /// Looks up a certificate by exact number, case-insensitive student name and course.
    ///
    /// A miss, including a course mismatch on an existing certificate, is `Ok(None)`.
    async fn find_certificate(&self, query: &CertificateQuery) -> PortResult<Option<Certificate>>;

    // --- Submission Logs ---

    /// Appends a contact submission and returns its 1-based position in the log.
    async fn append_contact(&self, submission: ContactSubmission) -> PortResult<usize>;

    /// Appends an admission inquiry and returns its 1-based position in the log.
    async fn append_admission_inquiry(&self, inquiry: AdmissionInquiry) -> PortResult<usize>;
}

#[async_trait]
pub trait CourseAdvisorService: Send + Sync {
    /// Produces one assistant reply for `message`, given prior turns oldest first.
    async fn recommend(&self, message: &str, history: &[ChatMessage]) -> PortResult<String>;
}
