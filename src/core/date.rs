// PhotoDex - core/date.rs
//
// Folder-name date parsing.
// Core layer: pure logic, no I/O.

use chrono::NaiveDate;

/// Parse a folder name into a calendar date.
///
/// Accepted shapes are year-month-day with `-`, `.` or `/` as the
/// separator (`2024-01-15`, `2024.01.15`, `2024/01/15`); the separators are
/// normalised to `-` before splitting. Returns `None` unless the name has
/// exactly three numeric components forming a valid calendar date.
///
/// Failure is not an error: folders with non-date names are silently
/// excluded from the index.
pub fn parse_folder_date(name: &str) -> Option<NaiveDate> {
    let normalised = name.replace(['.', '/'], "-");
    let mut parts = normalised.split('-');

    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None; // More than three components.
    }

    NaiveDate::from_ymd_opt(year, month, day)
}
