//! Case record data model
//!
//! `RawCaseRecord` is what the case source hands over, decoded straight from
//! a store document. `NormalizedCase` is the same case after the field
//! rewrites in [`crate::normalizer`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// One support-case document as stored upstream.
///
/// Every field is optional on the wire and decodes to an empty string when
/// absent. Non-string values are rejected by the decoder. The identifier is
/// read from `_id`, falling back to a plain `id` key only when `_id` is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CaseDocument")]
pub struct RawCaseRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub case_origin: String,
    pub country: String,
    /// `"<prefix> - <level>"`, e.g. `"2 - High"`
    pub severity: String,
    /// Rich-text product label, e.g. `"<span>Filr</span>"`
    pub product: String,
    pub subject: String,
    pub log_time: String,
    pub date_time_opened: String,
    /// Last modification date
    pub case_date: String,
    pub status: String,
    pub contact_region: String,
    pub account_name: String,
}

/// Wire shape of a case document, before the identifier keys are merged.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CaseDocument {
    #[serde(rename = "_id")]
    store_id: Option<String>,
    id: Option<String>,
    case_origin: String,
    country: String,
    severity: String,
    product: String,
    subject: String,
    log_time: String,
    date_time_opened: String,
    case_date: String,
    status: String,
    contact_region: String,
    account_name: String,
}

impl From<CaseDocument> for RawCaseRecord {
    fn from(doc: CaseDocument) -> Self {
        Self {
            id: doc.store_id.or(doc.id).unwrap_or_default(),
            case_origin: doc.case_origin,
            country: doc.country,
            severity: doc.severity,
            product: doc.product,
            subject: doc.subject,
            log_time: doc.log_time,
            date_time_opened: doc.date_time_opened,
            case_date: doc.case_date,
            status: doc.status,
            contact_region: doc.contact_region,
            account_name: doc.account_name,
        }
    }
}

/// A case record after origin/country abbreviation, severity extraction and
/// product resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCase {
    pub id: String,
    pub case_origin: String,
    pub country: String,
    pub severity: String,
    pub product: String,
    pub subject: String,
    pub log_time: String,
    pub date_time_opened: String,
    pub case_date: String,
    pub status: String,
    pub contact_region: String,
    pub account_name: String,
}

/// Names a case field in errors and log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseField {
    Id,
    CaseOrigin,
    Country,
    Severity,
    Product,
    Subject,
    LogTime,
    DateTimeOpened,
    CaseDate,
    Status,
    ContactRegion,
    AccountName,
}

impl CaseField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseField::Id => "id",
            CaseField::CaseOrigin => "caseOrigin",
            CaseField::Country => "country",
            CaseField::Severity => "severity",
            CaseField::Product => "product",
            CaseField::Subject => "subject",
            CaseField::LogTime => "logTime",
            CaseField::DateTimeOpened => "dateTimeOpened",
            CaseField::CaseDate => "caseDate",
            CaseField::Status => "status",
            CaseField::ContactRegion => "contactRegion",
            CaseField::AccountName => "accountName",
        }
    }
}

impl fmt::Display for CaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
