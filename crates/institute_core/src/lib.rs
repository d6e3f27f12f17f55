pub mod catalog;
pub mod domain;
pub mod ports;
pub mod validation;

pub use catalog::{Catalog, Course, Institute};
pub use domain::{
    AdmissionInquiry, Certificate, CertificateQuery, ChatMessage, ChatRole, ContactSubmission,
    CourseType, InquiryType, PreferredBatch,
};
pub use ports::{CourseAdvisorService, PortError, PortResult, RecordStore};
pub use validation::{FieldIssue, ValidationError};
