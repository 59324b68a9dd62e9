#![forbid(unsafe_code)]

use serde::Serializer;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

pub const MS_PER_MINUTE: i64 = 60 * 1000;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

pub fn now_ms_i64() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    let ms = nanos / 1_000_000i128;
    if ms <= 0 {
        0
    } else if ms >= i64::MAX as i128 {
        i64::MAX
    } else {
        ms as i64
    }
}

pub fn ts_ms_to_rfc3339(ts_ms: i64) -> String {
    let nanos = (ts_ms as i128) * 1_000_000i128;
    let dt = OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    dt.format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// Start of the UTC calendar day containing `ts_ms`.
pub fn day_start_ms(ts_ms: i64) -> i64 {
    ts_ms.div_euclid(MS_PER_DAY) * MS_PER_DAY
}

/// `YYYY-MM-DD` for the UTC calendar day containing `ts_ms`.
pub fn ts_ms_to_date(ts_ms: i64) -> String {
    let nanos = (day_start_ms(ts_ms) as i128) * 1_000_000i128;
    let date = OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
        .date();
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "1970-01-01".to_string())
}

pub fn serialize_rfc3339<S: Serializer>(ts_ms: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts_ms_to_rfc3339(*ts_ms))
}

pub fn serialize_date<S: Serializer>(ts_ms: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts_ms_to_date(*ts_ms))
}
