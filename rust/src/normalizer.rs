//! Record normalization
//!
//! Cleans up the inconsistent values the upstream case store produces and
//! resolves the product a case belongs to. Rules run in a fixed order:
//!
//! 1. `caseOrigin` `"Salesforce"` → `"SF"`
//! 2. `country` `"United States of America"` → `"USA"`
//! 3. `severity` `"<prefix> - <level>"` → `"<level>"`
//! 4. `product` markup unwrapped to its inner text
//! 5. blank product → `"NULL"`
//! 6. subject prefix routed through the [`RoutingTable`], overriding the product
//!
//! Normalization is pure; the only side effect is trace-level logging.

use tracing::trace;

use crate::error::MalformedRecordError;
use crate::models::{CaseField, NormalizedCase, RawCaseRecord};
use crate::routing::RoutingTable;

pub const SALESFORCE_ORIGIN: &str = "Salesforce";
pub const SALESFORCE_ABBREVIATION: &str = "SF";
pub const USA_COUNTRY: &str = "United States of America";
pub const USA_ABBREVIATION: &str = "USA";
pub const SEVERITY_SEPARATOR: &str = " - ";
pub const SUBJECT_SEPARATOR: char = ':';
/// Product value used when the markup wraps nothing
pub const NULL_PRODUCT: &str = "NULL";

/// Normalize one raw case record.
pub fn normalize(
    raw: RawCaseRecord,
    routing: &RoutingTable,
) -> Result<NormalizedCase, MalformedRecordError> {
    let RawCaseRecord {
        id,
        mut case_origin,
        mut country,
        severity,
        product,
        subject,
        log_time,
        date_time_opened,
        case_date,
        status,
        contact_region,
        account_name,
    } = raw;

    trace!(case_id = %id, "Processing case");

    if case_origin == SALESFORCE_ORIGIN {
        case_origin = SALESFORCE_ABBREVIATION.to_string();
        trace!(case_id = %id, "caseOrigin set to \"{}\"", case_origin);
    }

    if country == USA_COUNTRY {
        country = USA_ABBREVIATION.to_string();
        trace!(case_id = %id, "country set to \"{}\"", country);
    }

    let severity = extract_severity_level(&severity)
        .ok_or_else(|| {
            MalformedRecordError::new(
                &id,
                CaseField::Severity,
                format!("has no '{SEVERITY_SEPARATOR}' separator"),
            )
        })?
        .to_string();
    trace!(case_id = %id, "severity set to \"{}\"", severity);

    let product = unwrap_product_markup(&product)
        .map_err(|reason| MalformedRecordError::new(&id, CaseField::Product, reason))?;
    trace!(case_id = %id, "product set to \"{}\"", product);

    let mut product = coerce_blank_product(product, &id);

    let subject_prefix = subject_prefix(&subject).ok_or_else(|| {
        MalformedRecordError::new(
            &id,
            CaseField::Subject,
            format!("has no '{SUBJECT_SEPARATOR}' separator"),
        )
    })?;
    if let Some(routed) = routing.resolve(subject_prefix) {
        product = routed.to_string();
        trace!(case_id = %id, "product set to \"{}\"", product);
    }

    Ok(NormalizedCase {
        id,
        case_origin,
        country,
        severity,
        product,
        subject,
        log_time,
        date_time_opened,
        case_date,
        status,
        contact_region,
        account_name,
    })
}

/// Level component of a `"<prefix> - <level>"` severity.
///
/// Returns the segment between the first separator and the next one (or the
/// end of the string), so the result never contains the separator itself.
pub fn extract_severity_level(severity: &str) -> Option<&str> {
    let mut segments = severity.split(SEVERITY_SEPARATOR);
    segments.next();
    segments.next()
}

/// Inner text of a single-level markup wrapper such as `<span>Filr</span>`.
///
/// The text starts after the first `>` and runs up to the next `<` (or an
/// earlier stray `>`). Input without a `>`, or with no `<` after it, is
/// malformed.
pub fn unwrap_product_markup(product: &str) -> Result<&str, &'static str> {
    let open = product.find('>').ok_or("has no '>' delimiter")?;
    let rest = &product[open + 1..];
    if !rest.contains('<') {
        return Err("has no '<' delimiter after '>'");
    }
    let end = rest.find(['<', '>']).unwrap_or(rest.len());
    Ok(&rest[..end])
}

/// Routing key of a subject: everything before the first `:`.
pub fn subject_prefix(subject: &str) -> Option<&str> {
    subject
        .split_once(SUBJECT_SEPARATOR)
        .map(|(prefix, _)| prefix)
}

fn coerce_blank_product(product: &str, id: &str) -> String {
    let product = if product == " " {
        trace!(case_id = %id, "product set to empty string");
        ""
    } else {
        product
    };
    if product.is_empty() {
        trace!(case_id = %id, "product set to \"{}\"", NULL_PRODUCT);
        NULL_PRODUCT.to_string()
    } else {
        product.to_string()
    }
}
