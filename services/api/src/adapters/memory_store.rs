//! services/api/src/adapters/memory_store.rs
//!
//! This module contains the in-memory record store, the concrete implementation
//! of the `RecordStore` port used until a durable backend exists. Everything it
//! holds is lost when the process exits.

use async_trait::async_trait;
use chrono::NaiveDate;
use institute_core::domain::{
    AdmissionInquiry, Certificate, CertificateQuery, ContactSubmission, CourseType,
};
use institute_core::ports::{PortError, PortResult, RecordStore};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};
use uuid::Uuid;

/// The certificates issued so far: number, student, course, issue date, grade.
const SEED_CERTIFICATES: [(&str, &str, CourseType, &str, &str); 4] = [
    ("ADCA/2024/001", "Rahul Kumar", CourseType::Adca, "2024-06-15", "A+"),
    ("ADCA/2024/002", "Priya Sharma", CourseType::Adca, "2024-06-15", "A"),
    ("DCA/2024/001", "Amit Singh", CourseType::Dca, "2024-07-20", "A+"),
    ("DCA/2024/002", "Anjali Verma", CourseType::Dca, "2024-07-20", "B+"),
];

//=========================================================================================
// Composite Key
//=========================================================================================

/// Certificate number (exact) plus lower-cased student name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CertificateKey {
    number: String,
    student: String,
}

impl CertificateKey {
    fn new(number: &str, student_name: &str) -> Self {
        Self {
            number: number.to_string(),
            student: student_name.to_lowercase(),
        }
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A process-lifetime store implementing the `RecordStore` port.
///
/// The certificate map is filled in the constructor and never written again, so reads
/// take no lock. Each submission log sits behind its own mutex, held only for the push.
#[derive(Debug)]
pub struct MemoryStore {
    certificates: HashMap<CertificateKey, Certificate>,
    contacts: Mutex<Vec<ContactSubmission>>,
    inquiries: Mutex<Vec<AdmissionInquiry>>,
}

impl MemoryStore {
    /// Creates a store holding exactly `certificates`.
    ///
    /// Fails if two certificates share a composite key.
    pub fn with_certificates(certificates: Vec<Certificate>) -> PortResult<Self> {
        let mut map = HashMap::with_capacity(certificates.len());
        for cert in certificates {
            let key = CertificateKey::new(&cert.certificate_number, &cert.student_name);
            if map.contains_key(&key) {
                return Err(PortError::Unexpected(format!(
                    "duplicate certificate {} for {}",
                    cert.certificate_number, cert.student_name
                )));
            }
            map.insert(key, cert);
        }
        Ok(Self {
            certificates: map,
            contacts: Mutex::new(Vec::new()),
            inquiries: Mutex::new(Vec::new()),
        })
    }

    /// Creates a store holding the institute's fixed seed certificates.
    pub fn seeded() -> PortResult<Self> {
        let certificates = SEED_CERTIFICATES
            .iter()
            .map(|(number, student, course, issued, grade)| -> PortResult<Certificate> {
                let issue_date = NaiveDate::parse_from_str(issued, "%Y-%m-%d")
                    .map_err(|e| PortError::Unexpected(format!("bad seed date {issued}: {e}")))?;
                Ok(Certificate {
                    id: Uuid::new_v4(),
                    certificate_number: number.to_string(),
                    student_name: student.to_string(),
                    course_name: *course,
                    issue_date,
                    grade: grade.to_string(),
                })
            })
            .collect::<PortResult<Vec<_>>>()?;
        let store = Self::with_certificates(certificates)?;
        info!(certificates = store.certificates.len(), "Seeded certificate store");
        Ok(store)
    }

    pub fn certificate_count(&self) -> usize {
        self.certificates.len()
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn inquiry_count(&self) -> usize {
        self.inquiries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

//=========================================================================================
// `RecordStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_certificate(&self, query: &CertificateQuery) -> PortResult<Option<Certificate>> {
        let key = CertificateKey::new(&query.certificate_number, &query.student_name);
        let found = self
            .certificates
            .get(&key)
            .filter(|cert| cert.course_name == query.course_type)
            .cloned();
        info!(
            certificate_number = %query.certificate_number,
            course_type = %query.course_type,
            found = found.is_some(),
            "Certificate lookup"
        );
        Ok(found)
    }

    async fn append_contact(&self, submission: ContactSubmission) -> PortResult<usize> {
        debug!(?submission, "Saving contact submission");
        // A poisoned lock still guards a valid Vec; appends must not fail.
        let mut log = self.contacts.lock().unwrap_or_else(PoisonError::into_inner);
        log.push(submission);
        Ok(log.len())
    }

    async fn append_admission_inquiry(&self, inquiry: AdmissionInquiry) -> PortResult<usize> {
        debug!(?inquiry, "Saving admission inquiry");
        let mut log = self.inquiries.lock().unwrap_or_else(PoisonError::into_inner);
        log.push(inquiry);
        Ok(log.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use institute_core::domain::{InquiryType, PreferredBatch};
    use std::sync::Arc;

    fn query(number: &str, student: &str, course: CourseType) -> CertificateQuery {
        CertificateQuery {
            certificate_number: number.to_string(),
            student_name: student.to_string(),
            course_type: course,
        }
    }

    fn contact(n: usize) -> ContactSubmission {
        ContactSubmission {
            name: format!("Visitor {n}"),
            email: format!("visitor{n}@example.com"),
            phone: "9876543210".to_string(),
            course_interest: None,
            message: "Please share the batch timings.".to_string(),
        }
    }

    fn inquiry(kind: InquiryType) -> AdmissionInquiry {
        AdmissionInquiry {
            name: "Amit Singh".to_string(),
            email: "amit@example.com".to_string(),
            phone: "9123456780".to_string(),
            course_interested: "ADCA".to_string(),
            preferred_batch: PreferredBatch::Weekend,
            inquiry_type: kind,
        }
    }

    #[tokio::test]
    async fn seeded_lookup_ignores_name_case() {
        let store = MemoryStore::seeded().unwrap();
        let cert = store
            .find_certificate(&query("ADCA/2024/001", "rahul kumar", CourseType::Adca))
            .await
            .unwrap()
            .expect("seeded certificate");
        assert_eq!(cert.student_name, "Rahul Kumar");
        assert_eq!(cert.grade, "A+");
        assert_eq!(cert.issue_date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[tokio::test]
    async fn every_seed_is_found_under_any_name_case() {
        let store = MemoryStore::seeded().unwrap();
        assert_eq!(store.certificate_count(), SEED_CERTIFICATES.len());
        for (number, student, course, _, _) in SEED_CERTIFICATES {
            for name in [student.to_string(), student.to_uppercase(), student.to_lowercase()] {
                let found = store.find_certificate(&query(number, &name, course)).await.unwrap();
                assert!(found.is_some(), "{number} / {name}");
            }
        }
    }

    #[tokio::test]
    async fn course_mismatch_is_not_found() {
        let store = MemoryStore::seeded().unwrap();
        for (number, student, course, _, _) in SEED_CERTIFICATES {
            let other = CourseType::ALL.into_iter().find(|c| *c != course).unwrap();
            let found = store.find_certificate(&query(number, student, other)).await.unwrap();
            assert!(found.is_none(), "{number} must not match {other}");
        }
    }

    #[tokio::test]
    async fn unknown_numbers_are_not_found() {
        let store = MemoryStore::seeded().unwrap();
        for number in ["ADCA/2024/003", "adca/2024/001", "ADCA/2024/001 ", ""] {
            for course in CourseType::ALL {
                let found = store
                    .find_certificate(&query(number, "Rahul Kumar", course))
                    .await
                    .unwrap();
                assert!(found.is_none(), "{number:?}");
            }
        }
    }

    #[tokio::test]
    async fn name_must_match_the_number() {
        let store = MemoryStore::seeded().unwrap();
        let found = store
            .find_certificate(&query("ADCA/2024/001", "Priya Sharma", CourseType::Adca))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn duplicate_composite_keys_are_rejected() {
        let cert = |name: &str| Certificate {
            id: Uuid::new_v4(),
            certificate_number: "DCA/2024/009".to_string(),
            student_name: name.to_string(),
            course_name: CourseType::Dca,
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            grade: "B".to_string(),
        };
        let result = MemoryStore::with_certificates(vec![cert("Ravi Das"), cert("RAVI DAS")]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn each_append_grows_its_log_by_one() {
        let store = MemoryStore::seeded().unwrap();
        for n in 1..=3 {
            assert_eq!(store.append_contact(contact(n)).await.unwrap(), n);
            assert_eq!(store.contact_count(), n);
        }
        assert_eq!(store.append_admission_inquiry(inquiry(InquiryType::Demo)).await.unwrap(), 1);
        assert_eq!(
            store.append_admission_inquiry(inquiry(InquiryType::Admission)).await.unwrap(),
            2
        );
        assert_eq!(store.inquiry_count(), 2);
        assert_eq!(store.contact_count(), 3);
    }

    #[tokio::test]
    async fn identical_submissions_are_all_kept() {
        let store = MemoryStore::seeded().unwrap();
        store.append_contact(contact(1)).await.unwrap();
        store.append_contact(contact(1)).await.unwrap();
        assert_eq!(store.contact_count(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_are_not_lost() {
        let store = Arc::new(MemoryStore::seeded().unwrap());
        let tasks: Vec<_> = (0..64)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.append_contact(contact(n)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(store.contact_count(), 64);
    }
}
