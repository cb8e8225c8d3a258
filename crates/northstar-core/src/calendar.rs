//! Calendar helpers shared by the mission resolver and the check-in logic.
//!
//! Everything here works on local wall-clock values. Comparing wall-clock
//! times is the same as adding the offset difference of two instants to
//! their raw UTC delta, so a DST switch between 1 January and "today"
//! never shifts the day count.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Milliseconds in one calendar day.
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Ordinal day of `date` within its local year, in `[1, 366]`.
///
/// Counted as whole days elapsed since local midnight of the last day of
/// the previous year, so 1 January is day 1 at any time of day.
pub fn day_of_year<Tz: TimeZone>(date: &DateTime<Tz>) -> u32 {
    let local = date.naive_local();
    let day_zero = NaiveDate::from_ymd_opt(local.year(), 1, 1)
        .and_then(|jan_first| jan_first.pred_opt())
        .map(|eve| eve.and_time(NaiveTime::MIN));

    match day_zero {
        Some(start) => {
            let elapsed_ms = (local - start).num_milliseconds();
            elapsed_ms.div_euclid(MS_PER_DAY) as u32
        }
        None => local.ordinal(),
    }
}

/// Whether `a` falls on the same calendar date as `now`, judged in the
/// timezone of `now`. Time-of-day is ignored.
pub fn is_same_local_day<A: TimeZone, Tz: TimeZone>(
    a: &DateTime<A>,
    now: &DateTime<Tz>,
) -> bool {
    a.with_timezone(&now.timezone()).date_naive() == now.date_naive()
}

/// Whole days left until `cycle_end`, rounded up and never below 1.
///
/// On or after the cycle end this returns 1, which keeps the finance
/// pacing division well-defined.
pub fn days_remaining<A: TimeZone, Tz: TimeZone>(
    now: &DateTime<A>,
    cycle_end: &DateTime<Tz>,
) -> i64 {
    let delta_ms = cycle_end.timestamp_millis() - now.timestamp_millis();
    if delta_ms <= 0 {
        return 1;
    }
    ((delta_ms + MS_PER_DAY - 1) / MS_PER_DAY).max(1)
}

/// The last second of `year` (31 December, 23:59:59) in `tz`.
///
/// Returns `None` only for years chrono cannot represent.
pub fn cycle_end<Tz: TimeZone>(year: i32, tz: &Tz) -> Option<DateTime<Tz>> {
    let naive = NaiveDate::from_ymd_opt(year, 12, 31)?.and_hms_opt(23, 59, 59)?;
    Some(from_wall_clock(tz, &naive))
}

/// Place a wall-clock time in `tz`.
///
/// Ambiguous times resolve to the later instant; a time that does not
/// exist locally is read as UTC.
pub fn from_wall_clock<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, latest) => latest,
        LocalResult::None => tz.from_utc_datetime(naive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    fn at(offset_hours: i32, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    #[test]
    fn first_of_january_is_day_one() {
        assert_eq!(day_of_year(&at(0, 2026, 1, 1, 0, 0)), 1);
        assert_eq!(day_of_year(&at(0, 2026, 1, 1, 23, 59)), 1);
    }

    #[test]
    fn mid_february_ordinal() {
        assert_eq!(day_of_year(&at(-3, 2026, 2, 16, 8, 30)), 47);
    }

    #[test]
    fn leap_year_ends_on_day_366() {
        assert_eq!(day_of_year(&at(0, 2024, 12, 31, 23, 0)), 366);
        assert_eq!(day_of_year(&at(0, 2026, 12, 31, 23, 0)), 365);
    }

    #[test]
    fn day_of_year_uses_local_wall_clock() {
        // Same instant, different local dates.
        let utc = Utc.with_ymd_and_hms(2026, 3, 1, 1, 0, 0).unwrap();
        let sao_paulo = utc.with_timezone(&FixedOffset::west_opt(3 * 3600).unwrap());
        assert_eq!(day_of_year(&utc), 60);
        assert_eq!(day_of_year(&sao_paulo), 59);
    }

    #[test]
    fn day_of_year_matches_chrono_ordinal_for_every_day() {
        let mut day = at(2, 2026, 1, 1, 12, 0);
        for expected in 1..=365 {
            assert_eq!(day_of_year(&day), expected);
            day = day + Duration::days(1);
        }
    }

    #[test]
    fn same_local_day_ignores_time_of_day() {
        let morning = at(-3, 2026, 10, 18, 0, 1);
        let night = at(-3, 2026, 10, 18, 23, 59);
        assert!(is_same_local_day(&morning, &night));
    }

    #[test]
    fn same_local_day_rejects_yesterday() {
        let yesterday_late = at(-3, 2026, 10, 17, 23, 59);
        let today_early = at(-3, 2026, 10, 18, 0, 0);
        assert!(!is_same_local_day(&yesterday_late, &today_early));
    }

    #[test]
    fn same_local_day_is_judged_in_the_zone_of_now() {
        // 02:00 UTC on the 18th is still the 17th in UTC-3.
        let stored = Utc.with_ymd_and_hms(2026, 10, 18, 2, 0, 0).unwrap();
        let now = at(-3, 2026, 10, 17, 23, 30);
        assert!(is_same_local_day(&stored, &now));
        let next_morning = at(-3, 2026, 10, 18, 9, 0);
        assert!(!is_same_local_day(&stored, &next_morning));
    }

    #[test]
    fn days_remaining_counts_whole_days() {
        let end = at(0, 2026, 12, 31, 23, 59);
        assert_eq!(days_remaining(&(end - Duration::days(100)), &end), 100);
    }

    #[test]
    fn days_remaining_rounds_partial_days_up() {
        let end = at(0, 2026, 12, 31, 23, 59);
        let now = end - Duration::days(99) - Duration::hours(12);
        assert_eq!(days_remaining(&now, &end), 100);
        assert_eq!(days_remaining(&(end - Duration::minutes(1)), &end), 1);
    }

    #[test]
    fn days_remaining_never_drops_below_one() {
        let end = at(0, 2026, 12, 31, 23, 59);
        assert_eq!(days_remaining(&end, &end), 1);
        assert_eq!(days_remaining(&(end + Duration::days(30)), &end), 1);
    }

    #[test]
    fn cycle_end_is_last_second_of_year() {
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let end = cycle_end(2026, &tz).unwrap();
        assert_eq!(end, at(-3, 2026, 12, 31, 23, 59) + Duration::seconds(59));
    }

    #[test]
    fn day_of_year_is_stable_across_dst_switches() {
        let ny = chrono_tz::America::New_York;
        let local = |m, d, h, min| ny.with_ymd_and_hms(2026, m, d, h, min, 0).unwrap();

        // Spring forward on 8 March: 02:00 EST jumps to 03:00 EDT.
        assert_eq!(day_of_year(&local(3, 8, 0, 30)), 67);
        assert_eq!(day_of_year(&local(3, 8, 3, 30)), 67);
        assert_eq!(day_of_year(&local(3, 9, 0, 30)), 68);

        // Fall back on 1 November: 02:00 EDT returns to 01:00 EST.
        assert_eq!(day_of_year(&local(11, 1, 0, 30)), 305);
        assert_eq!(day_of_year(&local(11, 1, 23, 30)), 305);
        assert_eq!(day_of_year(&local(11, 2, 0, 30)), 306);
    }

    #[test]
    fn day_of_year_matches_ordinal_through_a_dst_year() {
        // Sao Paulo still observed DST in 2018, switching at local midnight.
        let sao_paulo = chrono_tz::America::Sao_Paulo;
        let ny = chrono_tz::America::New_York;
        let mut utc = Utc.with_ymd_and_hms(2018, 1, 1, 12, 0, 0).unwrap();
        while utc.year() == 2018 {
            let in_ny = utc.with_timezone(&ny);
            let in_sp = utc.with_timezone(&sao_paulo);
            assert_eq!(day_of_year(&in_ny), in_ny.ordinal());
            assert_eq!(day_of_year(&in_sp), in_sp.ordinal());
            utc = utc + Duration::hours(5);
        }
    }

    #[test]
    fn ambiguous_wall_clock_takes_later_instant() {
        let ny = chrono_tz::America::New_York;
        let naive = NaiveDate::from_ymd_opt(2026, 11, 1)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let resolved = from_wall_clock(&ny, &naive);
        // 01:30 EST is 06:30 UTC; the earlier 01:30 EDT would be 05:30.
        assert_eq!(
            resolved.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 11, 1, 6, 30, 0).unwrap()
        );
    }

    #[test]
    fn skipped_wall_clock_is_read_as_utc() {
        let ny = chrono_tz::America::New_York;
        let naive = NaiveDate::from_ymd_opt(2026, 3, 8)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let resolved = from_wall_clock(&ny, &naive);
        assert_eq!(
            resolved.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 3, 8, 2, 30, 0).unwrap()
        );
    }

    #[test]
    fn cycle_end_in_dst_zone_is_local_new_years_eve() {
        let end = cycle_end(2026, &chrono_tz::America::New_York).unwrap();
        assert_eq!(
            end.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2027, 1, 1, 4, 59, 59).unwrap()
        );
    }
}
