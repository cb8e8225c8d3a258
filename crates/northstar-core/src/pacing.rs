//! Linear pacing toward the cycle end.
//!
//! Finance goals advance by whatever amount keeps the user on a straight
//! line to the target; consistency goals advance one day at a time.

use chrono::{DateTime, TimeZone};

use crate::calendar::days_remaining;
use crate::goal::{Goal, GoalPlan};

/// Increment for consistency goals: one day of follow-through.
pub const CONSISTENCY_INCREMENT: f64 = 1.0;

/// Amount needed per remaining day to land exactly on `target`.
///
/// Not floored at zero: a goal already past its target yields a negative
/// pace.
pub fn pace(target: f64, current: f64, days_remaining: i64) -> f64 {
    (target - current) / days_remaining.max(1) as f64
}

/// Finance daily need at `now` for a cycle ending at `cycle_end`.
pub fn daily_need<Tz: TimeZone>(goal: &Goal, now: &DateTime<Tz>, cycle_end: &DateTime<Tz>) -> f64 {
    pace(
        goal.target_value,
        goal.current_value,
        days_remaining(now, cycle_end),
    )
}

/// Progress added by one check-in.
pub fn daily_increment<Tz: TimeZone>(
    goal: &Goal,
    now: &DateTime<Tz>,
    cycle_end: &DateTime<Tz>,
) -> f64 {
    match goal.plan {
        GoalPlan::Finance => daily_need(goal, now, cycle_end),
        _ => CONSISTENCY_INCREMENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{finance_goal, body_goal};
    use chrono::{Duration, Utc};

    #[test]
    fn pace_divides_remaining_amount() {
        assert_eq!(pace(50_000.0, 1_500.0, 100), 485.0);
    }

    #[test]
    fn pace_guards_against_zero_days() {
        assert_eq!(pace(100.0, 0.0, 0), 100.0);
    }

    #[test]
    fn pace_goes_negative_past_target() {
        assert_eq!(pace(1_000.0, 1_200.0, 10), -20.0);
    }

    #[test]
    fn finance_increment_matches_daily_need() {
        let end = Utc::now() + Duration::days(100);
        let now = end - Duration::days(100);
        let goal = finance_goal(50_000.0, 1_500.0);
        assert_eq!(daily_increment(&goal, &now, &end), 485.0);
        assert_eq!(daily_increment(&goal, &now, &end), daily_need(&goal, &now, &end));
    }

    #[test]
    fn consistency_increment_is_one() {
        let now = Utc::now();
        let goal = body_goal("muscle", 42.0);
        assert_eq!(daily_increment(&goal, &now, &(now + Duration::days(3))), 1.0);
    }
}
