//! Read-side projection of onboarding records.
//!
//! Reshapes storage rows into the nested shape returned to callers:
//!
//! ```text
//! { ...employee fields,
//!   documents:          { <type>: { name, type, data, uploadDate } },
//!   previousEmployment: null | { company, role, experience, relievingLetter },
//!   offerLetter:        null | { name, type, data, uploadDate } }
//! ```
//!
//! Everything here is a pure transform; the queries live in
//! [`EmployeeRepo`](crate::repositories::EmployeeRepo).

use std::collections::{BTreeMap, HashMap};

use onboard_core::types::{DbId, Timestamp};
use serde::Serialize;

use crate::models::document::Document;
use crate::models::employee::{CandidateOfferLetter, EmployeeWithRelations};
use crate::models::offer_letter::OfferLetter;

/// A stored file in its wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
    pub data: String,
    pub upload_date: Option<Timestamp>,
}

/// Prior employment in its wire shape. Present only when a company is on
/// file; the relieving letter is `None` unless its payload is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousEmploymentView {
    pub company: String,
    pub role: Option<String>,
    pub experience: Option<String>,
    pub relieving_letter: Option<DocumentView>,
}

/// A fully hydrated onboarding record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub id: DbId,
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
    pub status: String,
    pub submission_date: Timestamp,
    pub approval_date: Option<Timestamp>,
    pub rejection_date: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub documents: BTreeMap<String, DocumentView>,
    pub previous_employment: Option<PreviousEmploymentView>,
    pub offer_letter: Option<DocumentView>,
}

/// Build a [`DocumentView`] from nullable joined columns. `None` unless the
/// payload is on file.
fn file_view(
    name: Option<String>,
    mime_type: Option<String>,
    data: Option<String>,
    upload_date: Option<Timestamp>,
) -> Option<DocumentView> {
    data.map(|data| DocumentView {
        name,
        mime_type,
        data,
        upload_date,
    })
}

impl From<Document> for DocumentView {
    fn from(doc: Document) -> Self {
        Self {
            name: doc.file_name,
            mime_type: Some(doc.file_type),
            data: doc.file_data,
            upload_date: Some(doc.upload_date),
        }
    }
}

impl From<OfferLetter> for DocumentView {
    fn from(letter: OfferLetter) -> Self {
        Self {
            name: letter.file_name,
            mime_type: Some(letter.file_type),
            data: letter.file_data,
            upload_date: Some(letter.upload_date),
        }
    }
}

/// Collapse document rows into a `document_type -> view` map.
pub fn document_map(rows: Vec<Document>) -> BTreeMap<String, DocumentView> {
    rows.into_iter()
        .map(|doc| (doc.document_type.clone(), DocumentView::from(doc)))
        .collect()
}

/// Group document rows from many employees by `employee_id`.
pub fn group_documents(rows: Vec<Document>) -> HashMap<DbId, BTreeMap<String, DocumentView>> {
    let mut grouped: HashMap<DbId, BTreeMap<String, DocumentView>> = HashMap::new();
    for doc in rows {
        grouped
            .entry(doc.employee_id)
            .or_default()
            .insert(doc.document_type.clone(), DocumentView::from(doc));
    }
    grouped
}

/// Compose an employee row with its documents into the hydrated view.
///
/// `previousEmployment` is `None` unless a company is on file; `offerLetter`
/// is `None` unless offer-letter data is on file.
pub fn hydrate(row: EmployeeWithRelations, documents: BTreeMap<String, DocumentView>) -> EmployeeView {
    let previous_employment = row.company.map(|company| PreviousEmploymentView {
        company,
        role: row.prev_role,
        experience: row.prev_experience,
        relieving_letter: file_view(
            row.relieving_letter_name,
            row.relieving_letter_type,
            row.relieving_letter_data,
            row.relieving_letter_upload_date,
        ),
    });

    let offer_letter = file_view(
        row.offer_letter_name,
        row.offer_letter_type,
        row.offer_letter_data,
        row.offer_letter_upload_date,
    );

    EmployeeView {
        id: row.id,
        referral_id: row.referral_id,
        role: row.role,
        position: row.position,
        location: row.location,
        name: row.name,
        email: row.email,
        phone: row.phone,
        guardian_name: row.guardian_name,
        guardian_phone: row.guardian_phone,
        address: row.address,
        status: row.status,
        submission_date: row.submission_date,
        approval_date: row.approval_date,
        rejection_date: row.rejection_date,
        rejection_reason: row.rejection_reason,
        documents,
        previous_employment,
        offer_letter,
    }
}

/// Hydrate many employees, attaching each one's documents. Employees with
/// no stored documents get an empty map.
pub fn hydrate_all(rows: Vec<EmployeeWithRelations>, documents: Vec<Document>) -> Vec<EmployeeView> {
    let mut grouped = group_documents(documents);
    rows.into_iter()
        .map(|row| {
            let docs = grouped.remove(&row.id).unwrap_or_default();
            hydrate(row, docs)
        })
        .collect()
}

/// The offer letter from a candidate lookup row, if one is on file.
pub fn candidate_offer_letter(row: CandidateOfferLetter) -> Option<DocumentView> {
    file_view(row.file_name, row.file_type, row.file_data, row.upload_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> Timestamp {
        chrono::DateTime::parse_from_rfc3339("2024-05-01T09:30:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc)
    }

    fn bare_row(id: DbId) -> EmployeeWithRelations {
        EmployeeWithRelations {
            id,
            referral_id: "R1".into(),
            role: "Engineer".into(),
            position: "Backend".into(),
            location: "Pune".into(),
            name: "Alice".into(),
            email: "alice@x.com".into(),
            phone: "1".into(),
            guardian_name: "G".into(),
            guardian_phone: "2".into(),
            address: "A".into(),
            status: "pending".into(),
            submission_date: ts(),
            approval_date: None,
            rejection_date: None,
            rejection_reason: None,
            company: None,
            prev_role: None,
            prev_experience: None,
            relieving_letter_name: None,
            relieving_letter_type: None,
            relieving_letter_data: None,
            relieving_letter_upload_date: None,
            offer_letter_name: None,
            offer_letter_type: None,
            offer_letter_data: None,
            offer_letter_upload_date: None,
        }
    }

    fn doc_row(employee_id: DbId, doc_type: &str) -> Document {
        Document {
            id: 1,
            employee_id,
            document_type: doc_type.into(),
            file_name: Some(format!("{doc_type}.pdf")),
            file_type: "application/pdf".into(),
            file_data: "data:application/pdf;base64,QUJD".into(),
            upload_date: ts(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    #[test]
    fn bare_record_has_null_relations() {
        let view = hydrate(bare_row(1), BTreeMap::new());
        assert!(view.previous_employment.is_none());
        assert!(view.offer_letter.is_none());
        assert!(view.documents.is_empty());
    }

    #[test]
    fn previous_employment_requires_company() {
        let mut row = bare_row(1);
        row.prev_role = Some("Intern".into());
        assert!(hydrate(row, BTreeMap::new()).previous_employment.is_none());

        let mut row = bare_row(1);
        row.company = Some("Acme".into());
        row.relieving_letter_type = Some("application/pdf".into());
        row.relieving_letter_data = Some("data:application/pdf;base64,QUJD".into());
        let prev = hydrate(row, BTreeMap::new()).previous_employment.unwrap();
        assert_eq!(prev.company, "Acme");
        assert_eq!(
            prev.relieving_letter.unwrap().data,
            "data:application/pdf;base64,QUJD"
        );
    }

    #[test]
    fn offer_letter_requires_data() {
        let mut row = bare_row(1);
        row.offer_letter_name = Some("offer.pdf".into());
        assert!(hydrate(row, BTreeMap::new()).offer_letter.is_none());

        let mut row = bare_row(1);
        row.offer_letter_data = Some("data:application/pdf;base64,QUJD".into());
        assert!(hydrate(row, BTreeMap::new()).offer_letter.is_some());
    }

    #[test]
    fn documents_are_grouped_per_employee() {
        let views = hydrate_all(
            vec![bare_row(1), bare_row(2), bare_row(3)],
            vec![doc_row(1, "ssc"), doc_row(1, "ug"), doc_row(2, "hsc")],
        );
        assert_eq!(views[0].documents.len(), 2);
        assert!(views[0].documents.contains_key("ug"));
        assert_eq!(views[1].documents.len(), 1);
        assert!(views[2].documents.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut docs = BTreeMap::new();
        docs.insert("ssc".to_string(), DocumentView::from(doc_row(1, "ssc")));
        let json = serde_json::to_value(hydrate(bare_row(7), docs)).unwrap();
        assert_eq!(json["referralId"], "R1");
        assert_eq!(json["guardianName"], "G");
        assert!(json["previousEmployment"].is_null());
        assert!(json["offerLetter"].is_null());
        assert!(json["approvalDate"].is_null());
        assert_eq!(json["documents"]["ssc"]["name"], "ssc.pdf");
        assert_eq!(json["documents"]["ssc"]["type"], "application/pdf");
        assert!(json["documents"]["ssc"]["uploadDate"].is_string());
    }
}
