//! Daily mission resolution.
//!
//! The mission is a pure function of the goal, the calendar day and the
//! content table. Body and mind missions depend only on
//! `(focus_area, day_of_year)`, never on account age, so the same list
//! position comes back on the same date every year.

use chrono::{DateTime, TimeZone};

use crate::calendar::day_of_year;
use crate::content::MissionContentTable;
use crate::goal::{Goal, GoalPlan};
use crate::pacing::daily_need;

/// Shown when a body/mind focus area is not in the content table.
pub const FOCUS_FALLBACK: &str = "Stay focused on the goal.";
/// Shown when a custom goal has no action text.
pub const CUSTOM_FALLBACK: &str = "Daily action not defined.";
/// Shown for categories this build does not recognise.
pub const GENERIC_FALLBACK: &str = "Advance 1% today.";

/// Instruction text for a finance daily need.
pub fn finance_mission(daily_need: f64, currency_symbol: &str) -> String {
    format!("Save or earn {currency_symbol} {daily_need:.2}")
}

/// Content-table mission for `focus_area` on `day`, or the generic focus text.
pub fn focus_mission(content: &MissionContentTable, focus_area: &str, day: u32) -> String {
    match content.mission_for_day(focus_area, day) {
        Some(mission) => mission.to_string(),
        None => {
            tracing::warn!(focus_area, "focus area not in content table, using fallback");
            FOCUS_FALLBACK.to_string()
        }
    }
}

/// The user's own action, verbatim.
pub fn custom_mission(custom_action: &str) -> String {
    if custom_action.is_empty() {
        CUSTOM_FALLBACK.to_string()
    } else {
        custom_action.to_string()
    }
}

/// Today's mission text for `goal`.
pub fn resolve_mission<Tz: TimeZone>(
    goal: &Goal,
    today: &DateTime<Tz>,
    cycle_end: &DateTime<Tz>,
    content: &MissionContentTable,
    currency_symbol: &str,
) -> String {
    match &goal.plan {
        GoalPlan::Finance => finance_mission(daily_need(goal, today, cycle_end), currency_symbol),
        GoalPlan::Body { focus_area } | GoalPlan::Mind { focus_area } => {
            focus_mission(content, focus_area, day_of_year(today))
        }
        GoalPlan::Custom { custom_action } => custom_mission(custom_action),
        GoalPlan::Unknown { raw_category } => {
            tracing::warn!(category = %raw_category, "unrecognised goal category, using fallback");
            GENERIC_FALLBACK.to_string()
        }
    }
}
