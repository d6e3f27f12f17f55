//! crates/institute_core/src/validation.rs
//!
//! Declarative request schemas for every payload that crosses the network boundary.
//!
//! Each schema is a raw, all-string payload struct annotated with `validator` rules.
//! Decoding an untyped JSON value runs the rules and, on success, converts the raw
//! payload into its strongly-typed domain value. Missing fields decode to their empty
//! value so they are reported by the same rule as an empty string would be.

use crate::domain::{
    AdmissionInquiry, CertificateQuery, ChatMessage, ContactSubmission, CourseType, InquiryType,
    PreferredBatch,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use validator::Validate;

/// Field path used when a failure cannot be pinned to a single field.
const ROOT_PATH: &str = "body";

//=========================================================================================
// Error Types
//=========================================================================================

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A rejected payload, with every violated field listed in field-path order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new(mut issues: Vec<FieldIssue>) -> Self {
        issues.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        Self { issues }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldIssue::new(field, message)])
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// True when some issue is attributed to `field`.
    pub fn cites(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let issues = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    FieldIssue::new(wire_name(field), message)
                })
            })
            .collect();
        Self::new(issues)
    }
}

/// Converts a Rust field name into its camelCase wire spelling.
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

//=========================================================================================
// Custom Rules
//=========================================================================================

fn one_of(code: &'static str, allowed: &[&str]) -> validator::ValidationError {
    let mut err = validator::ValidationError::new(code);
    err.message = Some(Cow::Owned(format!("must be one of {}", allowed.join(", "))));
    err
}

fn validate_preferred_batch(value: &str) -> Result<(), validator::ValidationError> {
    match PreferredBatch::parse(value) {
        Some(_) => Ok(()),
        None => Err(one_of(
            "preferred_batch",
            &PreferredBatch::ALL.map(|b| b.as_str()),
        )),
    }
}

fn validate_inquiry_type(value: &str) -> Result<(), validator::ValidationError> {
    match InquiryType::parse(value) {
        Some(_) => Ok(()),
        None => Err(one_of("inquiry_type", &InquiryType::ALL.map(|t| t.as_str()))),
    }
}

fn validate_course_type(value: &str) -> Result<(), validator::ValidationError> {
    match CourseType::parse(value) {
        Some(_) => Ok(()),
        None => Err(one_of("course_type", &CourseType::ALL.map(|c| c.as_str()))),
    }
}

//=========================================================================================
// Raw Payload Schemas
//=========================================================================================

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
struct ContactPayload {
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    name: String,
    #[validate(email(message = "invalid email address"))]
    email: String,
    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    phone: String,
    course_interest: Option<String>,
    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    message: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
struct AdmissionPayload {
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    name: String,
    #[validate(email(message = "invalid email address"))]
    email: String,
    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    phone: String,
    #[validate(length(min = 1, message = "please select a course"))]
    course_interested: String,
    #[validate(custom = "validate_preferred_batch")]
    preferred_batch: String,
    #[validate(custom = "validate_inquiry_type")]
    inquiry_type: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
struct VerifyCertificatePayload {
    #[validate(length(min = 1, message = "certificate number is required"))]
    certificate_number: String,
    #[validate(length(min = 1, message = "student name is required"))]
    student_name: String,
    #[validate(custom = "validate_course_type")]
    course_type: String,
}

/// History entries stay untyped here so each one can be reported by index.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
struct ChatSendPayload {
    #[validate(length(min = 1, message = "message cannot be empty"))]
    message: String,
    conversation_history: Option<Vec<Value>>,
}

/// A validated chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSend {
    pub message: String,
    /// Prior turns, oldest first, in the order the client sent them.
    pub history: Vec<ChatMessage>,
}

//=========================================================================================
// Decoding Entry Points
//=========================================================================================

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ValidationError> {
    serde_json::from_value(body).map_err(|e| ValidationError::single(ROOT_PATH, e.to_string()))
}

fn decode_validated<T: DeserializeOwned + Validate>(body: Value) -> Result<T, ValidationError> {
    let payload: T = decode(body)?;
    payload.validate()?;
    Ok(payload)
}

fn enum_field<E>(field: &str, parsed: Option<E>) -> Result<E, ValidationError> {
    parsed.ok_or_else(|| ValidationError::single(field, "unrecognised value"))
}

pub fn parse_contact(body: Value) -> Result<ContactSubmission, ValidationError> {
    let p: ContactPayload = decode_validated(body)?;
    Ok(ContactSubmission {
        name: p.name,
        email: p.email,
        phone: p.phone,
        course_interest: p.course_interest,
        message: p.message,
    })
}

pub fn parse_admission_inquiry(body: Value) -> Result<AdmissionInquiry, ValidationError> {
    let p: AdmissionPayload = decode_validated(body)?;
    Ok(AdmissionInquiry {
        preferred_batch: enum_field("preferredBatch", PreferredBatch::parse(&p.preferred_batch))?,
        inquiry_type: enum_field("inquiryType", InquiryType::parse(&p.inquiry_type))?,
        name: p.name,
        email: p.email,
        phone: p.phone,
        course_interested: p.course_interested,
    })
}

pub fn parse_certificate_query(body: Value) -> Result<CertificateQuery, ValidationError> {
    let p: VerifyCertificatePayload = decode_validated(body)?;
    Ok(CertificateQuery {
        course_type: enum_field("courseType", CourseType::parse(&p.course_type))?,
        certificate_number: p.certificate_number,
        student_name: p.student_name,
    })
}

/// Validates a chat request. Issues on the message and on every history entry are
/// reported together.
pub fn parse_chat_send(body: Value) -> Result<ChatSend, ValidationError> {
    let p: ChatSendPayload = decode(body)?;

    let mut issues = match p.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => ValidationError::from(errors).issues,
    };

    let entries = p.conversation_history.unwrap_or_default();
    let mut history = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ChatMessage>(entry) {
            Ok(turn) => history.push(turn),
            Err(e) => issues.push(FieldIssue::new(
                format!("conversationHistory[{idx}]"),
                e.to_string(),
            )),
        }
    }

    if !issues.is_empty() {
        return Err(ValidationError::new(issues));
    }
    Ok(ChatSend {
        message: p.message,
        history,
    })
}
