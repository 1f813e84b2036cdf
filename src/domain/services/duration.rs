//! Track length formatting.

const SECONDS_PER_HOUR: u64 = 3600;

/// Formats seconds as `m:ss`, or `h:mm:ss` from one hour up.
///
/// Fractions are floored; negative and non-finite values format as `0:00`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = seconds.floor() as u64;
        whole
    } else {
        0
    };

    let hours = total / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Same as [`format_duration`] for a millisecond count.
#[must_use]
pub fn format_duration_ms(millis: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let seconds = (millis / 1000) as f64;
    format_duration(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, "0:00" ; "zero")]
    #[test_case(5.0, "0:05" ; "seconds_padded")]
    #[test_case(65.9, "1:05" ; "fraction_floored")]
    #[test_case(599.0, "9:59" ; "under_ten_minutes")]
    #[test_case(3599.0, "59:59" ; "just_under_hour")]
    #[test_case(3600.0, "1:00:00" ; "one_hour")]
    #[test_case(3725.0, "1:02:05" ; "hours_minutes_seconds")]
    #[test_case(-3.0, "0:00" ; "negative")]
    #[test_case(f64::NAN, "0:00" ; "nan")]
    #[test_case(f64::INFINITY, "0:00" ; "infinite")]
    fn test_format_duration(seconds: f64, expected: &str) {
        assert_eq!(format_duration(seconds), expected);
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(245_999), "4:05");
        assert_eq!(format_duration_ms(3_600_000), "1:00:00");
    }
}
