use crate::datetime::is_valid_time;
use chrono::prelude::*;
use chrono_tz::Tz;

/// A wall-clock (date, time) pair local to some time zone, formatted exactly
/// like the values reminders are stored with so that due-time matching can be
/// plain string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStamp {
    /// Local calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Local clock time, `HH:MM`, 24 hour
    pub time: String,
}

impl LocalStamp {
    /// Converts an instant into the wall-clock frame of the given zone,
    /// honoring its standard/daylight rules rather than a fixed offset.
    pub fn resolve(now: DateTime<Utc>, tz: Tz) -> Self {
        let local = now.with_timezone(&tz);
        Self {
            date: format!(
                "{:04}-{:02}-{:02}",
                local.year(),
                local.month(),
                local.day()
            ),
            time: format!("{:02}:{:02}", local.hour(), local.minute()),
        }
    }
}

/// Resolves an IANA zone name. Unknown or empty names fall back to UTC so
/// that one bad registry row can never fail a whole dispatch run.
pub fn resolve_timezone(name: &str) -> Tz {
    name.parse().unwrap_or(chrono_tz::UTC)
}

/// Adds minutes to a `HH:MM` clock time, wrapping around midnight within the
/// same day.
pub fn add_minutes_to_time(timestr: &str, minutes_to_add: i64) -> anyhow::Result<String> {
    let (hours, minutes) = is_valid_time(timestr)?;
    let total = (i64::from(hours) * 60 + i64::from(minutes) + minutes_to_add).rem_euclid(24 * 60);
    Ok(format!("{:02}:{:02}", total / 60, total % 60))
}

#[cfg(test)]
mod test {
    use super::*;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().expect("Valid RFC3339 timestamp")
    }

    #[test]
    fn it_resolves_utc_with_zero_padding() {
        let stamp = LocalStamp::resolve(instant("2024-07-03T06:05:59Z"), chrono_tz::UTC);
        assert_eq!(stamp.date, "2024-07-03");
        assert_eq!(stamp.time, "06:05");
    }

    #[test]
    fn it_resolves_positive_offsets_across_midnight() {
        // 23:30 UTC is already the next day in Oslo (UTC+1 in winter)
        let stamp = LocalStamp::resolve(instant("2021-02-21T23:30:00Z"), chrono_tz::Europe::Oslo);
        assert_eq!(stamp.date, "2021-02-22");
        assert_eq!(stamp.time, "00:30");
    }

    #[test]
    fn it_resolves_negative_offsets_across_midnight() {
        let stamp = LocalStamp::resolve(
            instant("2021-02-22T02:00:00Z"),
            chrono_tz::America::New_York,
        );
        assert_eq!(stamp.date, "2021-02-21");
        assert_eq!(stamp.time, "21:00");
    }

    #[test]
    fn it_tracks_daylight_saving_rules() {
        // Eastern time is UTC-5 before the 2024-03-10 spring-forward and
        // UTC-4 after it
        let before = LocalStamp::resolve(
            instant("2024-03-10T06:30:00Z"),
            chrono_tz::America::New_York,
        );
        assert_eq!(before.time, "01:30");

        let after = LocalStamp::resolve(
            instant("2024-03-10T07:30:00Z"),
            chrono_tz::America::New_York,
        );
        assert_eq!(after.time, "03:30");
    }

    #[test]
    fn spring_forward_skips_the_missing_hour() {
        // 2024-03-10 02:XX does not exist in America/New_York. Walk the whole
        // day in one minute steps and make sure the resolver never emits it.
        let mut now = instant("2024-03-10T00:00:00Z");
        let end = instant("2024-03-11T00:00:00Z");
        while now < end {
            let stamp = LocalStamp::resolve(now, chrono_tz::America::New_York);
            if stamp.date == "2024-03-10" {
                assert!(
                    !stamp.time.starts_with("02:"),
                    "nonexistent local time {} produced for {}",
                    stamp.time,
                    now
                );
            }
            now = now + chrono::Duration::minutes(1);
        }
    }

    #[test]
    fn it_falls_back_to_utc_for_unknown_zones() {
        assert_eq!(resolve_timezone("America/New_York"), chrono_tz::America::New_York);
        assert_eq!(resolve_timezone(""), chrono_tz::UTC);
        assert_eq!(resolve_timezone("Mars/Olympus_Mons"), chrono_tz::UTC);
    }

    #[test]
    fn it_adds_minutes_to_clock_times() {
        assert_eq!(add_minutes_to_time("08:00", 5).unwrap(), "08:05");
        assert_eq!(add_minutes_to_time("08:58", 5).unwrap(), "09:03");
        assert_eq!(add_minutes_to_time("23:58", 5).unwrap(), "00:03");
        assert_eq!(add_minutes_to_time("00:00", -5).unwrap(), "23:55");
    }

    #[test]
    fn it_rejects_malformed_clock_times() {
        assert!(add_minutes_to_time("8:00", 5).is_err());
        assert!(add_minutes_to_time("25:00", 5).is_err());
    }
}
