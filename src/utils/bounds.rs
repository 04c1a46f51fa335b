//! Saturating arithmetic for time claims

/// Apply the time margin to a timestamp, saturating at the `i64` bounds
///
/// A saturated result only occurs when the exact value lies outside the
/// `i64` range, so comparisons against an in-range `now` stay exact.
pub(crate) fn apply_margin(timestamp: i64, margin_seconds: u64, add: bool) -> i64 {
    let margin = i64::try_from(margin_seconds).unwrap_or(i64::MAX);
    if add {
        timestamp.saturating_add(margin)
    } else {
        timestamp.saturating_sub(margin)
    }
}
