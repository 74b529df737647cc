//! Wall-clock time, used for seeds and high score timestamps.
//! The simulation itself never reads the clock.

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// A seed that differs from run to run
pub fn time_seed() -> u64 {
    now_ms() as u64
}

/// A seed the host asked for, or [`time_seed`] when it gave none
/// (or something that isn't a whole non-negative number)
pub fn seed_or_clock(seed: Option<f64>) -> u64 {
    match seed {
        Some(s) if s.is_finite() && s >= 0.0 && s.fract() == 0.0 => s as u64,
        _ => time_seed(),
    }
}

/// Format a timestamp relative to now
pub fn format_date(timestamp: f64) -> String {
    format_relative(timestamp, now_ms())
}

/// "Just now", "5 mins ago", "Yesterday", ... and m/d/yy past a week
pub fn format_relative(timestamp: f64, now: f64) -> String {
    let diff_mins = (now - timestamp) / 60_000.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else {
            short_date(timestamp)
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

/// m/d/yy in the browser's local time
#[cfg(target_arch = "wasm32")]
fn short_date(timestamp: f64) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp));
    format!(
        "{}/{}/{:02}",
        date.get_month() + 1,
        date.get_date(),
        date.get_full_year() % 100
    )
}

/// m/d/yy in UTC
#[cfg(not(target_arch = "wasm32"))]
fn short_date(timestamp: f64) -> String {
    let (year, month, day) = civil_from_days((timestamp / 86_400_000.0).floor() as i64);
    format!("{}/{}/{:02}", month, day, year % 100)
}

/// Days since 1970-01-01 to (year, month, day), proleptic Gregorian
#[cfg(not(target_arch = "wasm32"))]
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f64 = 60_000.0;
    const HOUR: f64 = 60.0 * MIN;
    const DAY: f64 = 24.0 * HOUR;

    #[test]
    fn test_relative_buckets() {
        let now = 1_700_000_000_000.0;
        assert_eq!(format_relative(now - 10_000.0, now), "Just now");
        assert_eq!(format_relative(now - MIN, now), "1 min ago");
        assert_eq!(format_relative(now - 5.0 * MIN, now), "5 mins ago");
        assert_eq!(format_relative(now - HOUR, now), "1 hour ago");
        assert_eq!(format_relative(now - 3.0 * HOUR, now), "3 hours ago");
        assert_eq!(format_relative(now - DAY, now), "Yesterday");
        assert_eq!(format_relative(now - 4.0 * DAY, now), "4 days ago");
    }

    #[test]
    fn test_old_dates_are_absolute() {
        // 2023-11-14T22:13:20Z
        let ts = 1_700_000_000_000.0;
        assert_eq!(format_relative(ts, ts + 30.0 * DAY), "11/14/23");
    }

    #[test]
    fn test_requested_seed_is_used() {
        assert_eq!(seed_or_clock(Some(42.0)), 42);
        assert_eq!(seed_or_clock(Some(0.0)), 0);
        // Falls back to the clock, which is well past these
        assert!(seed_or_clock(None) > 1_000);
        assert!(seed_or_clock(Some(f64::NAN)) > 1_000);
        assert!(seed_or_clock(Some(-3.0)) > 1_000);
    }

    #[test]
    fn test_short_date_pads_year() {
        // 2005-03-04T00:00:00Z
        assert_eq!(short_date(1_109_894_400_000.0), "3/4/05");
    }

    #[test]
    fn test_civil_from_days() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(19_723), (2024, 1, 1));
        assert_eq!(civil_from_days(19_782), (2024, 2, 29));
    }
}
