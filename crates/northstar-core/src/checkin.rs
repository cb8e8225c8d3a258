//! Once-per-day check-in state machine.
//!
//! The state is never stored. It is derived from `last_completed_at`
//! against the caller's local "now", so it resets to `Pending` at local
//! midnight on its own. `Pending -> CompletedToday` is the only transition.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::is_same_local_day;
use crate::goal::Goal;
use crate::pacing::daily_increment;

/// Whether today's mission has been done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInState {
    Pending,
    CompletedToday,
}

/// Progress fields produced by an accepted check-in.
///
/// The two `new_*` values must be persisted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub goal_id: String,
    pub previous_value: f64,
    pub increment: f64,
    pub new_current_value: f64,
    pub new_last_completed_at: DateTime<Utc>,
}

/// Why a check-in was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckInError {
    #[error("today's mission was already completed at {completed_at}")]
    AlreadyCompletedToday { completed_at: DateTime<Utc> },
    #[error("a check-in is already being saved")]
    InFlight,
}

/// `CompletedToday` iff the last check-in falls on the same local date as `now`.
pub fn derive_state<Tz: TimeZone>(goal: &Goal, now: &DateTime<Tz>) -> CheckInState {
    match &goal.last_completed_at {
        Some(last) if is_same_local_day(last, now) => CheckInState::CompletedToday,
        _ => CheckInState::Pending,
    }
}

/// Validate and compute a check-in at `now`.
///
/// Does not touch `goal`; apply the returned update with [`Goal::apply`]
/// once it has been stored.
///
/// # Errors
/// [`CheckInError::AlreadyCompletedToday`] if the goal was already checked
/// in on this local date.
pub fn check_in<Tz: TimeZone>(
    goal: &Goal,
    now: &DateTime<Tz>,
    cycle_end: &DateTime<Tz>,
) -> Result<ProgressUpdate, CheckInError> {
    if let (CheckInState::CompletedToday, Some(completed_at)) =
        (derive_state(goal, now), goal.last_completed_at)
    {
        return Err(CheckInError::AlreadyCompletedToday { completed_at });
    }

    let increment = daily_increment(goal, now, cycle_end);
    Ok(ProgressUpdate {
        goal_id: goal.id.clone(),
        previous_value: goal.current_value,
        increment,
        new_current_value: goal.current_value + increment,
        new_last_completed_at: now.with_timezone(&Utc),
    })
}
