use chrono::{DateTime, SecondsFormat, Utc};

pub const EXPORT_FILE_PREFIX: &str = "clinic-outcomes";

/// `clinic-outcomes-2026-10-19T08-05-09.png` for an export at `at`.
///
/// The ISO-8601 timestamp has `:` and `.` replaced by `-` and is cut at
/// whole seconds.
#[must_use]
pub fn export_filename(at: DateTime<Utc>) -> String {
    let stamp: String = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .take(19)
        .collect();
    format!("{EXPORT_FILE_PREFIX}-{stamp}.png")
}
