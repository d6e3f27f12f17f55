//! crates/institute_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! Only `ChatMessage` carries serde derives, because the client sends the
//! conversation history back verbatim on every call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//=========================================================================================
// Closed Enumerations
//=========================================================================================

/// The certificate-bearing courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseType {
    Adca,
    Dca,
}

impl CourseType {
    pub const ALL: [CourseType; 2] = [CourseType::Adca, CourseType::Dca];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseType::Adca => "ADCA",
            CourseType::Dca => "DCA",
        }
    }

    /// Exact, case-sensitive match against the wire spelling.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredBatch {
    Morning,
    Afternoon,
    Evening,
    Weekend,
}

impl PreferredBatch {
    pub const ALL: [PreferredBatch; 4] = [
        PreferredBatch::Morning,
        PreferredBatch::Afternoon,
        PreferredBatch::Evening,
        PreferredBatch::Weekend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredBatch::Morning => "Morning",
            PreferredBatch::Afternoon => "Afternoon",
            PreferredBatch::Evening => "Evening",
            PreferredBatch::Weekend => "Weekend",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryType {
    Admission,
    Demo,
}

impl InquiryType {
    pub const ALL: [InquiryType; 2] = [InquiryType::Admission, InquiryType::Demo];

    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::Admission => "Admission",
            InquiryType::Demo => "Demo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(CourseType, PreferredBatch, InquiryType);

//=========================================================================================
// Records
//=========================================================================================

/// An issued credential. Immutable once seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub id: Uuid,
    pub certificate_number: String,
    pub student_name: String,
    pub course_name: CourseType,
    pub issue_date: NaiveDate,
    pub grade: String,
}

/// A validated certificate-verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateQuery {
    pub certificate_number: String,
    pub student_name: String,
    pub course_type: CourseType,
}

/// A validated contact-form message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course_interest: Option<String>,
    pub message: String,
}

/// A validated admission or demo-booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course_interested: String,
    pub preferred_batch: PreferredBatch,
    pub inquiry_type: InquiryType,
}

//=========================================================================================
// Chat
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of an advisor conversation. Lives only in the client's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl ChatMessage {
    /// Builds an assistant reply stamped with `now_millis`, which also serves as its id.
    pub fn assistant_reply(content: String, now_millis: i64) -> Self {
        Self {
            id: now_millis.to_string(),
            role: ChatRole::Assistant,
            content,
            timestamp: now_millis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerations_parse_only_exact_spelling() {
        assert_eq!(CourseType::parse("ADCA"), Some(CourseType::Adca));
        assert_eq!(CourseType::parse("adca"), None);
        assert_eq!(PreferredBatch::parse("Weekend"), Some(PreferredBatch::Weekend));
        assert_eq!(PreferredBatch::parse("Night"), None);
        assert_eq!(InquiryType::parse("Demo"), Some(InquiryType::Demo));
        assert_eq!(InquiryType::parse(""), None);
    }

    #[test]
    fn chat_message_uses_lowercase_roles_on_the_wire() {
        let msg = ChatMessage::assistant_reply("Hi".to_string(), 1_718_000_000_000);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["id"], "1718000000000");
        assert_eq!(json["timestamp"], 1_718_000_000_000i64);
    }
}
