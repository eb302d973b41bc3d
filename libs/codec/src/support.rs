//! Shared encode/decode helpers.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone};

use arogya_fhir::ContactPoint;

/// `Some` only when the field is present and non-empty.
pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Value of the first telecom entry with the given system tag.
///
/// Entries may arrive in any order and may include systems written by other
/// systems; selection is by tag, never by position.
pub(crate) fn telecom_value<'a>(telecom: &'a [ContactPoint], system: &str) -> Option<&'a str> {
    telecom
        .iter()
        .find(|point| point.system.as_deref() == Some(system))
        .and_then(|point| point.value.as_deref())
}

/// Combine a civil date and time into an instant in the local timezone.
///
/// Returns `None` for wall-clock times that do not exist locally (DST gaps).
pub(crate) fn local_instant(date: NaiveDate, time: NaiveTime) -> Option<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|instant| instant.fixed_offset())
}

/// Decompose an instant into local civil date and time parts.
pub(crate) fn split_local_instant(instant: &DateTime<FixedOffset>) -> (NaiveDate, NaiveTime) {
    let local = instant.with_timezone(&Local).naive_local();
    (local.date(), local.time())
}
