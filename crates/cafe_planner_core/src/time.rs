//! Reference-day clock helpers.
//!
//! The planner evaluates "today" at a fixed UTC+8 offset regardless of the
//! host timezone, so board visibility, history grouping and exported
//! timestamps agree across devices.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use once_cell::sync::Lazy;

/// Reference offset east of UTC, in seconds.
pub const REFERENCE_OFFSET_SECS: i32 = 8 * 60 * 60;
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

const REFERENCE_OFFSET_MS: i64 = REFERENCE_OFFSET_SECS as i64 * 1000;

static REFERENCE_OFFSET: Lazy<FixedOffset> = Lazy::new(|| {
    FixedOffset::east_opt(REFERENCE_OFFSET_SECS).expect("UTC+8 is a valid fixed offset")
});

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn reference_offset() -> FixedOffset {
    *REFERENCE_OFFSET
}

/// Epoch ms of 00:00 UTC+8 on the reference day containing `epoch_ms`.
///
/// Saturates at the ends of the `i64` range instead of overflowing.
pub fn reference_day_start(epoch_ms: i64) -> i64 {
    epoch_ms
        .saturating_add(REFERENCE_OFFSET_MS)
        .div_euclid(DAY_MS)
        .saturating_mul(DAY_MS)
        .saturating_sub(REFERENCE_OFFSET_MS)
}

/// Whether `epoch_ms` maps to a calendar date-time.
pub fn is_representable(epoch_ms: i64) -> bool {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms).is_some()
}

/// `epoch_ms` as a UTC+8 date-time. Unrepresentable values clamp to the
/// epoch; validated records never carry them.
pub fn to_reference_datetime(epoch_ms: i64) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .unwrap_or_default()
        .with_timezone(&reference_offset())
}

/// Calendar date of `epoch_ms` in the reference offset.
pub fn reference_date(epoch_ms: i64) -> NaiveDate {
    to_reference_datetime(epoch_ms).date_naive()
}
