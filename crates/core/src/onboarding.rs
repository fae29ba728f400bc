//! Onboarding lifecycle rules: statuses, the mandatory-document policy,
//! and the preconditions of each workflow action.
//!
//! Lifecycle: `pending` -> `approved` | `rejected`. Documents may be
//! replaced in any status; the offer letter only once approved.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::document::{self, DocumentDescriptor, DocumentSource, ValidatedDocument};
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Submitted and awaiting a decision.
pub const STATUS_PENDING: &str = "pending";
/// Approved; an offer letter may be issued.
pub const STATUS_APPROVED: &str = "approved";
/// Rejected with a reason.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

// ---------------------------------------------------------------------------
// Document policy
// ---------------------------------------------------------------------------

/// Secondary school certificate.
pub const DOC_SSC: &str = "ssc";
/// Higher secondary certificate.
pub const DOC_HSC: &str = "hsc";
/// Undergraduate degree.
pub const DOC_UG: &str = "ug";

/// Documents every submission must carry, checked in this order.
pub const MANDATORY_DOCUMENTS: &[&str] = &[DOC_SSC, DOC_HSC, DOC_UG];

/// Tag an offer-letter upload must declare.
pub const OFFER_LETTER_DOC_TYPE: &str = "offerLetter";

/// Maximum length of a caller-supplied document type.
pub const MAX_DOCUMENT_TYPE_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Status enum
// ---------------------------------------------------------------------------

/// Onboarding record status with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeStatus {
    Pending,
    Approved,
    Rejected,
}

impl EmployeeStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown employee status: '{other}'. Valid statuses: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Whether an offer letter may be created or replaced in this status.
    pub fn allows_offer_letter(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

// ---------------------------------------------------------------------------
// Submission input
// ---------------------------------------------------------------------------

/// A document as it appears inside a JSON submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedDocument {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
    pub data: Option<String>,
    pub upload_date: Option<Timestamp>,
}

/// Prior work experience as it appears inside a JSON submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedPreviousEmployment {
    pub company: Option<String>,
    pub role: Option<String>,
    pub experience: Option<String>,
    pub relieving_letter: Option<SubmittedDocument>,
}

/// Request body for a candidate submission.
///
/// Every field is optional at the wire level so that missing fields are
/// reported by [`validate_submission`] rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub referral_id: Option<String>,
    pub role: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub address: Option<String>,
    /// Entries that are `null` or not shaped like a document deserialize to
    /// `None` so they are reported by [`validate_submission`].
    #[serde(default, deserialize_with = "lenient_documents")]
    pub documents: BTreeMap<String, Option<SubmittedDocument>>,
    pub previous_employment: Option<SubmittedPreviousEmployment>,
    /// Accepted for compatibility; new records always start as `pending`.
    pub status: Option<String>,
    pub submission_date: Option<Timestamp>,
}

/// A `documents` map where `null` means empty and malformed entries become
/// `None`.
fn lenient_documents<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Option<SubmittedDocument>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Document(SubmittedDocument),
        Malformed(IgnoredAny),
    }

    let raw: Option<BTreeMap<String, Entry>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(doc_type, entry)| match entry {
            Entry::Document(doc) => (doc_type, Some(doc)),
            Entry::Malformed(_) => (doc_type, None),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Validated submission
// ---------------------------------------------------------------------------

/// Candidate fields of a submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub referral_id: String,
    pub role: String,
    pub position: String,
    pub location: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub address: String,
    pub submission_date: Timestamp,
}

/// Prior employment that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPreviousEmployment {
    pub company: String,
    pub role: Option<String>,
    pub experience: Option<String>,
    pub relieving_letter: ValidatedDocument,
}

/// Everything a submission will write, checked up front.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub employee: NewEmployee,
    /// Document slots to store, keyed by document type.
    pub documents: Vec<(String, ValidatedDocument)>,
    pub previous_employment: Option<NewPreviousEmployment>,
    /// Supplementary document types dropped because their payload was invalid.
    pub skipped_documents: Vec<String>,
}

/// Validate a submission in full before anything is written.
///
/// Checks, in order: the ten candidate fields, the mandatory documents
/// (`ssc`, `hsc`, `ug`), then the relieving letter when a prior company is
/// declared. Supplementary documents with invalid payloads are skipped, not
/// rejected.
pub fn validate_submission(input: &Submission) -> Result<ValidatedSubmission, CoreError> {
    let employee = validate_candidate_fields(input)?;

    for doc_type in MANDATORY_DOCUMENTS {
        let valid = input
            .documents
            .get(*doc_type)
            .and_then(Option::as_ref)
            .is_some_and(|doc| validate_submitted_document(doc).is_ok());
        if !valid {
            return Err(CoreError::Validation(format!(
                "{} document is invalid or missing",
                doc_type.to_uppercase()
            )));
        }
    }

    let previous_employment = match &input.previous_employment {
        Some(prev) => match non_blank(prev.company.as_deref()) {
            Some(company) => {
                let relieving_letter = prev
                    .relieving_letter
                    .as_ref()
                    .and_then(|doc| validate_submitted_document(doc).ok())
                    .ok_or_else(|| {
                        CoreError::Validation(
                            "Relieving letter is required for experienced employees".to_string(),
                        )
                    })?;
                Some(NewPreviousEmployment {
                    company: company.to_string(),
                    role: prev.role.clone(),
                    experience: prev.experience.clone(),
                    relieving_letter,
                })
            }
            None => None,
        },
        None => None,
    };

    let mut documents = Vec::with_capacity(input.documents.len());
    let mut skipped_documents = Vec::new();
    for (doc_type, doc) in &input.documents {
        match doc.as_ref().map(validate_submitted_document) {
            Some(Ok(validated)) => documents.push((doc_type.clone(), validated)),
            _ => skipped_documents.push(doc_type.clone()),
        }
    }

    Ok(ValidatedSubmission {
        employee,
        documents,
        previous_employment,
        skipped_documents,
    })
}

fn validate_candidate_fields(input: &Submission) -> Result<NewEmployee, CoreError> {
    let required = |value: &Option<String>| {
        non_blank(value.as_deref())
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::Validation("All required fields must be provided".to_string())
            })
    };

    Ok(NewEmployee {
        referral_id: required(&input.referral_id)?,
        role: required(&input.role)?,
        position: required(&input.position)?,
        location: required(&input.location)?,
        name: required(&input.name)?,
        email: required(&input.email)?,
        phone: required(&input.phone)?,
        guardian_name: required(&input.guardian_name)?,
        guardian_phone: required(&input.guardian_phone)?,
        address: required(&input.address)?,
        submission_date: input.submission_date.unwrap_or_else(chrono::Utc::now),
    })
}

/// Run a JSON-submitted document through the codec.
pub fn validate_submitted_document(
    doc: &SubmittedDocument,
) -> Result<ValidatedDocument, document::DocumentError> {
    document::validate(DocumentDescriptor {
        file_name: doc.name.as_deref(),
        mime_type: doc.mime_type.as_deref(),
        source: DocumentSource::DataUrl(doc.data.as_deref().unwrap_or_default()),
        upload_date: doc.upload_date,
    })
}

// ---------------------------------------------------------------------------
// Action preconditions
// ---------------------------------------------------------------------------

/// A rejection must carry a non-empty reason.
pub fn validate_rejection_reason(reason: Option<&str>) -> Result<String, CoreError> {
    non_blank(reason)
        .map(str::to_string)
        .ok_or_else(|| CoreError::Validation("Rejection reason is required".to_string()))
}

/// A document upload must name the slot it targets.
pub fn validate_document_type(doc_type: Option<&str>) -> Result<String, CoreError> {
    let doc_type = non_blank(doc_type)
        .ok_or_else(|| CoreError::Validation("Document type is required".to_string()))?;
    if doc_type.len() > MAX_DOCUMENT_TYPE_LEN {
        return Err(CoreError::Validation(format!(
            "Document type must be at most {MAX_DOCUMENT_TYPE_LEN} characters"
        )));
    }
    Ok(doc_type.to_string())
}

/// An offer-letter upload must be tagged `offerLetter`.
pub fn validate_offer_letter_tag(doc_type: Option<&str>) -> Result<(), CoreError> {
    if doc_type == Some(OFFER_LETTER_DOC_TYPE) {
        Ok(())
    } else {
        Err(CoreError::Validation("Invalid document type".to_string()))
    }
}

/// Offer letters may only be issued to approved employees.
pub fn ensure_offer_letter_allowed(status: EmployeeStatus) -> Result<(), CoreError> {
    if status.allows_offer_letter() {
        Ok(())
    } else {
        Err(CoreError::NotApproved(
            "Employee must be approved before uploading an offer letter".to_string(),
        ))
    }
}

/// Candidates may only retrieve their letter once approved.
pub fn ensure_candidate_approved(status: EmployeeStatus) -> Result<(), CoreError> {
    if status.allows_offer_letter() {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Employee is not approved".to_string()))
    }
}

/// The three identifying fields of a candidate offer-letter lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLookup {
    pub email: String,
    pub name: String,
    pub referral_id: String,
}

/// All three lookup fields are required. Values are matched exactly, so
/// they are not trimmed here.
pub fn validate_candidate_lookup(
    email: Option<&str>,
    name: Option<&str>,
    referral_id: Option<&str>,
) -> Result<CandidateLookup, CoreError> {
    match (email, name, referral_id) {
        (Some(email), Some(name), Some(referral_id))
            if !email.is_empty() && !name.is_empty() && !referral_id.is_empty() =>
        {
            Ok(CandidateLookup {
                email: email.to_string(),
                name: name.to_string(),
                referral_id: referral_id.to_string(),
            })
        }
        _ => Err(CoreError::Validation(
            "Email, name, and referral ID are required".to_string(),
        )),
    }
}

/// A bulk delete must name at least one id.
pub fn validate_delete_ids(ids: &[DbId]) -> Result<(), CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation(
            "No employee IDs provided".to_string(),
        ));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::document::{frame_data_url, MIME_PDF};

    fn pdf_doc(name: &str) -> SubmittedDocument {
        SubmittedDocument {
            name: Some(format!("{name}.pdf")),
            mime_type: Some(MIME_PDF.to_string()),
            data: Some(frame_data_url(MIME_PDF, name.as_bytes())),
            upload_date: None,
        }
    }

    fn valid_submission() -> Submission {
        let mut documents = BTreeMap::new();
        for doc_type in MANDATORY_DOCUMENTS {
            documents.insert(doc_type.to_string(), Some(pdf_doc(doc_type)));
        }
        Submission {
            referral_id: Some("R1".into()),
            role: Some("Engineer".into()),
            position: Some("Backend".into()),
            location: Some("Chennai".into()),
            name: Some("Alice".into()),
            email: Some("alice@x.com".into()),
            phone: Some("9999999999".into()),
            guardian_name: Some("Bob".into()),
            guardian_phone: Some("8888888888".into()),
            address: Some("1 Main St".into()),
            documents,
            ..Default::default()
        }
    }

    fn validation_message(result: Result<ValidatedSubmission, CoreError>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn status_round_trips_through_strings() {
        for s in VALID_STATUSES {
            assert_eq!(EmployeeStatus::from_str(s).unwrap().as_str(), *s);
        }
        assert!(EmployeeStatus::from_str("archived").is_err());
    }

    #[test]
    fn only_approved_allows_offer_letter() {
        assert!(EmployeeStatus::Approved.allows_offer_letter());
        assert!(!EmployeeStatus::Pending.allows_offer_letter());
        assert!(!EmployeeStatus::Rejected.allows_offer_letter());
    }

    #[test]
    fn valid_submission_passes() {
        let validated = validate_submission(&valid_submission()).unwrap();
        assert_eq!(validated.employee.referral_id, "R1");
        assert_eq!(validated.documents.len(), 3);
        assert!(validated.previous_employment.is_none());
        assert!(validated.skipped_documents.is_empty());
    }

    #[test]
    fn each_missing_mandatory_document_is_rejected() {
        for doc_type in MANDATORY_DOCUMENTS {
            let mut input = valid_submission();
            input.documents.remove(*doc_type);
            let msg = validation_message(validate_submission(&input));
            assert_eq!(
                msg,
                format!("{} document is invalid or missing", doc_type.to_uppercase())
            );
        }
    }

    #[test]
    fn null_or_malformed_mandatory_document_is_rejected() {
        let mut input = valid_submission();
        input.documents.insert(DOC_HSC.into(), None);
        assert!(validation_message(validate_submission(&input)).starts_with("HSC"));

        let mut input = valid_submission();
        input.documents.insert(
            DOC_UG.into(),
            Some(SubmittedDocument {
                data: Some("plain text".into()),
                ..Default::default()
            }),
        );
        assert!(validation_message(validate_submission(&input)).starts_with("UG"));
    }

    #[test]
    fn each_missing_candidate_field_is_rejected() {
        let blankers: [fn(&mut Submission); 10] = [
            |s| s.referral_id = None,
            |s| s.role = None,
            |s| s.position = Some(String::new()),
            |s| s.location = None,
            |s| s.name = Some("   ".into()),
            |s| s.email = None,
            |s| s.phone = None,
            |s| s.guardian_name = None,
            |s| s.guardian_phone = None,
            |s| s.address = None,
        ];
        for blank in blankers {
            let mut input = valid_submission();
            blank(&mut input);
            assert_eq!(
                validation_message(validate_submission(&input)),
                "All required fields must be provided"
            );
        }
    }

    #[test]
    fn company_without_relieving_letter_is_rejected() {
        let mut input = valid_submission();
        input.previous_employment = Some(SubmittedPreviousEmployment {
            company: Some("Acme".into()),
            ..Default::default()
        });
        assert_eq!(
            validation_message(validate_submission(&input)),
            "Relieving letter is required for experienced employees"
        );
    }

    #[test]
    fn company_with_relieving_letter_is_kept() {
        let mut input = valid_submission();
        input.previous_employment = Some(SubmittedPreviousEmployment {
            company: Some("Acme".into()),
            role: Some("Intern".into()),
            experience: Some("2 years".into()),
            relieving_letter: Some(pdf_doc("relieving")),
        });
        let prev = validate_submission(&input).unwrap().previous_employment.unwrap();
        assert_eq!(prev.company, "Acme");
        assert_eq!(prev.experience.as_deref(), Some("2 years"));
        assert_eq!(prev.relieving_letter.file_name.as_deref(), Some("relieving.pdf"));
    }

    #[test]
    fn previous_employment_without_company_is_ignored() {
        let mut input = valid_submission();
        input.previous_employment = Some(SubmittedPreviousEmployment {
            company: Some(String::new()),
            role: Some("Intern".into()),
            ..Default::default()
        });
        assert!(validate_submission(&input).unwrap().previous_employment.is_none());
    }

    #[test]
    fn invalid_supplementary_documents_are_skipped() {
        let mut input = valid_submission();
        input.documents.insert("pan".into(), Some(pdf_doc("pan")));
        input.documents.insert(
            "aadhaar".into(),
            Some(SubmittedDocument {
                data: Some("garbage".into()),
                ..Default::default()
            }),
        );
        let validated = validate_submission(&input).unwrap();
        assert_eq!(validated.documents.len(), 4);
        assert_eq!(validated.skipped_documents, vec!["aadhaar".to_string()]);
    }

    #[test]
    fn submission_date_defaults_to_now_when_absent() {
        let before = chrono::Utc::now();
        let validated = validate_submission(&valid_submission()).unwrap();
        assert!(validated.employee.submission_date >= before);
    }

    #[test]
    fn rejection_reason_is_required() {
        assert_matches!(validate_rejection_reason(None), Err(CoreError::Validation(_)));
        assert_matches!(validate_rejection_reason(Some("")), Err(CoreError::Validation(_)));
        assert_eq!(validate_rejection_reason(Some("No docs")).unwrap(), "No docs");
    }

    #[test]
    fn document_type_is_required_and_bounded() {
        assert!(validate_document_type(None).is_err());
        assert!(validate_document_type(Some(" ")).is_err());
        let long = "x".repeat(MAX_DOCUMENT_TYPE_LEN + 1);
        assert!(validate_document_type(Some(&long)).is_err());
        assert_eq!(validate_document_type(Some("pan")).unwrap(), "pan");
    }

    #[test]
    fn offer_letter_tag_must_match_exactly() {
        assert!(validate_offer_letter_tag(Some("offerLetter")).is_ok());
        assert!(validate_offer_letter_tag(Some("offerletter")).is_err());
        assert!(validate_offer_letter_tag(Some("ssc")).is_err());
        assert!(validate_offer_letter_tag(None).is_err());
    }

    #[test]
    fn offer_letter_gate_reports_not_approved() {
        assert!(ensure_offer_letter_allowed(EmployeeStatus::Approved).is_ok());
        assert_matches!(
            ensure_offer_letter_allowed(EmployeeStatus::Pending),
            Err(CoreError::NotApproved(_))
        );
        assert_matches!(
            ensure_offer_letter_allowed(EmployeeStatus::Rejected),
            Err(CoreError::NotApproved(_))
        );
    }

    #[test]
    fn candidate_gate_reports_forbidden() {
        assert!(ensure_candidate_approved(EmployeeStatus::Approved).is_ok());
        assert_matches!(
            ensure_candidate_approved(EmployeeStatus::Pending),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn candidate_lookup_requires_all_fields() {
        assert!(validate_candidate_lookup(Some("a@x.com"), Some("A"), Some("R1")).is_ok());
        assert!(validate_candidate_lookup(None, Some("A"), Some("R1")).is_err());
        assert!(validate_candidate_lookup(Some("a@x.com"), Some(""), Some("R1")).is_err());
        assert!(validate_candidate_lookup(Some("a@x.com"), Some("A"), None).is_err());
    }

    #[test]
    fn empty_delete_set_is_rejected() {
        assert!(validate_delete_ids(&[]).is_err());
        assert!(validate_delete_ids(&[1, 2]).is_ok());
    }

    #[test]
    fn null_documents_deserialize_as_empty() {
        let input: Submission = serde_json::from_str(r#"{"documents": null}"#).unwrap();
        assert!(input.documents.is_empty());
    }

    #[test]
    fn malformed_document_entries_are_reported_as_missing() {
        let mut input = valid_submission();
        let parsed: Submission = serde_json::from_value(serde_json::json!({
            "documents": { "ssc": "oops", "hsc": 5, "ug": null }
        }))
        .unwrap();
        assert_eq!(parsed.documents.len(), 3);
        assert!(parsed.documents.values().all(Option::is_none));

        input.documents = parsed.documents;
        assert_eq!(
            validation_message(validate_submission(&input)),
            "SSC document is invalid or missing"
        );
    }

    #[test]
    fn well_formed_document_entries_deserialize() {
        let input: Submission = serde_json::from_value(serde_json::json!({
            "documents": {
                "ssc": { "name": "ssc.pdf", "type": "application/pdf", "data": "data:application/pdf;base64,QUJD" }
            }
        }))
        .unwrap();
        let ssc = input.documents["ssc"].as_ref().unwrap();
        assert_eq!(ssc.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(ssc.name.as_deref(), Some("ssc.pdf"));
    }
}
