//! Report line synthesis
//!
//! Lays a normalized case out as one fixed-column, `|`-delimited line.
//! Downstream consumers parse columns by position, so the number and place
//! of the empty placeholder columns is part of the report format.

use crate::models::NormalizedCase;

pub const COLUMN_SEPARATOR: &str = "|";
/// Line terminator; the report is embedded in an HTML page
pub const LINE_BREAK: &str = "<br>";
/// Columns per line, placeholders included
pub const COLUMN_COUNT: usize = 27;

/// Render one normalized case as a report line, `<br>` included.
pub fn report_line(case: &NormalizedCase) -> String {
    let columns: [&str; COLUMN_COUNT] = [
        &case.log_time,
        &case.id,
        &case.product,
        &case.severity,
        "",
        &case.case_origin,
        "",
        &case.date_time_opened,
        &case.case_date,
        &case.status,
        "",
        "",
        "",
        "",
        &case.contact_region,
        &case.country,
        "",
        "",
        "",
        &case.account_name,
        "",
        "",
        "",
        "",
        "",
        "",
        &case.subject,
    ];

    let mut line = columns.join(COLUMN_SEPARATOR);
    line.push_str(LINE_BREAK);
    line
}
