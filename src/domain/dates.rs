use chrono::{Datelike, Local, Months, NaiveDate};

/// Granularity used when measuring the distance between two calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
    Month,
}

/// Format accepted from date-picker inputs.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the signed distance from `start` to `end` in `unit`.
///
/// An absent `end` means the period is still ongoing and is measured up to
/// `today`, so an open-ended employment only grows as time advances.
pub fn elapsed_between(
    unit: TimeUnit,
    start: NaiveDate,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> i64 {
    let end = end.unwrap_or(today);
    match unit {
        TimeUnit::Day => (end - start).num_days(),
        TimeUnit::Month => {
            if end >= start {
                whole_months(start, end)
            } else {
                -whole_months(end, start)
            }
        }
    }
}

/// Same as [`elapsed_between`], evaluated against the local calendar date.
pub fn elapsed(unit: TimeUnit, start: NaiveDate, end: Option<NaiveDate>) -> i64 {
    elapsed_between(unit, start, end, Local::now().date_naive())
}

/// Parses a raw date-picker value. Empty or malformed input is treated as unset.
pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, INPUT_DATE_FORMAT).ok()
}

// Whole calendar months from `start` to `end`, `start <= end`. Adding months
// clamps to the end of shorter months, so Jan 31 -> Feb 28 counts as one.
fn whole_months(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = i64::from(end.year() - start.year()) * 12
        + (i64::from(end.month()) - i64::from(start.month()));
    while months > 0 && add_months(start, months).is_none_or(|anchor| anchor > end) {
        months -= 1;
    }
    months
}

fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let months = u32::try_from(months).ok()?;
    date.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_elapsed_days_closed_period() {
        let days = elapsed_between(
            TimeUnit::Day,
            date(2023, 3, 21),
            Some(date(2023, 8, 21)),
            date(2030, 1, 1),
        );
        assert_eq!(days, 153);

        let days = elapsed_between(
            TimeUnit::Day,
            date(2018, 3, 21),
            Some(date(2023, 3, 21)),
            date(2030, 1, 1),
        );
        assert_eq!(days, 1826);
    }

    #[test]
    fn test_elapsed_days_open_period_uses_today() {
        let start = date(2020, 1, 1);
        let days = elapsed_between(TimeUnit::Day, start, None, date(2020, 1, 31));
        assert_eq!(days, 30);
    }

    #[test]
    fn test_open_period_never_shrinks() {
        let start = date(2021, 6, 15);
        let mut previous = i64::MIN;
        for offset in 0..400 {
            let today = start + chrono::Duration::days(offset);
            let days = elapsed_between(TimeUnit::Day, start, None, today);
            assert!(days >= previous);
            previous = days;
        }
    }

    #[test]
    fn test_elapsed_is_signed() {
        let days = elapsed_between(
            TimeUnit::Day,
            date(2023, 8, 21),
            Some(date(2023, 3, 21)),
            date(2030, 1, 1),
        );
        assert_eq!(days, -153);
    }

    #[test]
    fn test_elapsed_months() {
        let today = date(2030, 1, 1);
        assert_eq!(
            elapsed_between(TimeUnit::Month, date(2023, 3, 21), Some(date(2023, 8, 21)), today),
            5
        );
        assert_eq!(
            elapsed_between(TimeUnit::Month, date(2023, 3, 21), Some(date(2023, 8, 20)), today),
            4
        );
        assert_eq!(
            elapsed_between(TimeUnit::Month, date(2023, 1, 31), Some(date(2023, 2, 28)), today),
            1
        );
        assert_eq!(
            elapsed_between(TimeUnit::Month, date(2023, 8, 21), Some(date(2023, 3, 21)), today),
            -5
        );
    }

    #[test]
    fn test_elapsed_against_system_clock() {
        let start = Local::now().date_naive() - chrono::Duration::days(10);
        assert!(elapsed(TimeUnit::Day, start, None) >= 10);
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input("2018-03-21"), Some(date(2018, 3, 21)));
        assert_eq!(parse_date_input("  2018-03-21 "), Some(date(2018, 3, 21)));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("2018-02-30"), None);
        assert_eq!(parse_date_input("21/03/2018"), None);
    }
}
