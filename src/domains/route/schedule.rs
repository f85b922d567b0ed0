use chrono::{DateTime, Duration, Utc};

/// Human readable countdown to a scheduled time, e.g. "1h 15m remaining".
pub fn time_remaining(scheduled: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if scheduled < now {
        return "Past due".to_string();
    }
    let left = scheduled - now;
    let hours = left.num_hours();
    let minutes = left.num_minutes() % 60;
    if hours > 0 {
        format!("{}h {}m remaining", hours, minutes)
    } else {
        format!("{}m remaining", minutes)
    }
}

pub fn is_same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

pub fn is_today(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    is_same_day(date, now)
}

pub fn is_tomorrow(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    is_same_day(date, now + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn countdown_formats() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(time_remaining(now + Duration::minutes(75), now), "1h 15m remaining");
        assert_eq!(time_remaining(now + Duration::minutes(9), now), "9m remaining");
        assert_eq!(time_remaining(now - Duration::minutes(1), now), "Past due");
    }

    #[test]
    fn day_checks() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 23, 0, 0).unwrap();
        assert!(is_today(now - Duration::hours(22), now));
        assert!(is_tomorrow(now + Duration::hours(2), now));
        assert!(!is_today(now + Duration::hours(2), now));
    }
}
