use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::models::ScoreDimension;

/// Period boundaries derived from one reference instant, in a fixed local offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodWindows {
    pub now: DateTime<Utc>,
    pub day_start: DateTime<Utc>,
    /// ISO week start (Monday).
    pub week_start: DateTime<Utc>,
    pub month_start: DateTime<Utc>,
    pub next_month_start: DateTime<Utc>,
    pub year_start: DateTime<Utc>,
}

impl PeriodWindows {
    pub fn at(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let today = now.with_timezone(&offset).date_naive();

        let week_first = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        let month_first = today.with_day(1).unwrap_or(today);
        let next_month_first = month_first
            .checked_add_months(Months::new(1))
            .unwrap_or(month_first);
        let year_first = today.with_ordinal(1).unwrap_or(today);

        Self {
            now,
            day_start: local_midnight(today, offset),
            week_start: local_midnight(week_first, offset),
            month_start: local_midnight(month_first, offset),
            next_month_start: local_midnight(next_month_first, offset),
            year_start: local_midnight(year_first, offset),
        }
    }

    pub fn start_of(&self, dimension: ScoreDimension) -> DateTime<Utc> {
        match dimension {
            ScoreDimension::Day => self.day_start,
            ScoreDimension::Week => self.week_start,
            ScoreDimension::Month => self.month_start,
            ScoreDimension::Year => self.year_start,
        }
    }

    /// Earliest boundary in use; the data source is queried from here.
    pub fn earliest(&self) -> DateTime<Utc> {
        self.year_start.min(self.week_start)
    }

    /// Whether `ts` lies in `[month_start, next_month_start)`.
    pub fn in_current_month(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.month_start && ts < self.next_month_start
    }
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN)
        - Duration::seconds(i64::from(offset.local_minus_utc()));
    Utc.from_utc_datetime(&naive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_windows_in_utc() {
        // 2026-10-21 is a Wednesday
        let w = PeriodWindows::at(utc(2026, 10, 21, 15, 30), FixedOffset::east_opt(0).unwrap());
        assert_eq!(w.day_start, utc(2026, 10, 21, 0, 0));
        assert_eq!(w.week_start, utc(2026, 10, 19, 0, 0));
        assert_eq!(w.month_start, utc(2026, 10, 1, 0, 0));
        assert_eq!(w.next_month_start, utc(2026, 11, 1, 0, 0));
        assert_eq!(w.year_start, utc(2026, 1, 1, 0, 0));
    }

    #[test]
    fn test_windows_respect_local_offset() {
        // 01:00 UTC on Nov 1st is still Oct 31st at UTC-3
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let w = PeriodWindows::at(utc(2026, 11, 1, 1, 0), offset);
        assert_eq!(w.day_start, utc(2026, 10, 31, 3, 0));
        assert_eq!(w.month_start, utc(2026, 10, 1, 3, 0));
        assert_eq!(w.next_month_start, utc(2026, 11, 1, 3, 0));
    }

    #[test]
    fn test_earliest_covers_week_crossing_new_year() {
        // 2027-01-01 is a Friday; its ISO week started in December
        let w = PeriodWindows::at(utc(2027, 1, 1, 12, 0), FixedOffset::east_opt(0).unwrap());
        assert_eq!(w.week_start, utc(2026, 12, 28, 0, 0));
        assert_eq!(w.earliest(), w.week_start);
    }

    #[test]
    fn test_december_rolls_to_next_year() {
        let w = PeriodWindows::at(utc(2026, 12, 15, 8, 0), FixedOffset::east_opt(0).unwrap());
        assert_eq!(w.next_month_start, utc(2027, 1, 1, 0, 0));
        assert!(w.in_current_month(utc(2026, 12, 31, 23, 59)));
        assert!(!w.in_current_month(utc(2027, 1, 1, 0, 0)));
    }
}
