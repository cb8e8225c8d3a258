//! Dashboard model with optimistic check-in.
//!
//! The dashboard flips to `CompletedToday` as soon as the user checks in,
//! before the store write finishes. While that write is in flight further
//! check-ins are refused. If the write fails the previous goal and view
//! are restored.

use chrono::{DateTime, TimeZone};

use crate::checkin::{CheckInError, CheckInState, ProgressUpdate};
use crate::engine::{DailyView, ProgressEngine};
use crate::goal::Goal;

/// A check-in applied locally but not yet confirmed by the store.
#[derive(Debug)]
#[must_use = "a pending check-in must be committed or rolled back"]
pub struct PendingCheckIn {
    update: ProgressUpdate,
    previous_goal: Goal,
    previous_view: DailyView,
}

impl PendingCheckIn {
    pub fn update(&self) -> &ProgressUpdate {
        &self.update
    }
}

/// The goal and its view for the current day.
#[derive(Debug, Clone)]
pub struct Dashboard {
    goal: Goal,
    view: DailyView,
    in_flight: bool,
}

impl Dashboard {
    pub fn new<Tz: TimeZone>(engine: &ProgressEngine, goal: Goal, now: &DateTime<Tz>) -> Self {
        let view = engine.daily_view(&goal, now);
        Self {
            goal,
            view,
            in_flight: false,
        }
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn view(&self) -> &DailyView {
        &self.view
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Recompute the view, e.g. after local midnight.
    pub fn refresh<Tz: TimeZone>(&mut self, engine: &ProgressEngine, now: &DateTime<Tz>) {
        self.view = engine.daily_view(&self.goal, now);
    }

    /// Apply a check-in locally and lock further check-ins.
    ///
    /// # Errors
    /// [`CheckInError::InFlight`] while a previous check-in is unresolved,
    /// or [`CheckInError::AlreadyCompletedToday`].
    pub fn begin_check_in<Tz: TimeZone>(
        &mut self,
        engine: &ProgressEngine,
        now: &DateTime<Tz>,
    ) -> Result<PendingCheckIn, CheckInError> {
        if self.in_flight {
            return Err(CheckInError::InFlight);
        }
        let update = engine.check_in(&self.goal, now)?;

        let pending = PendingCheckIn {
            update,
            previous_goal: self.goal.clone(),
            previous_view: self.view.clone(),
        };

        self.goal.apply(&pending.update);
        self.view.check_in_state = CheckInState::CompletedToday;
        self.view.current_value = self.goal.current_value;
        self.view.last_completed_at = self.goal.last_completed_at;
        self.view.percent = engine.project_percent(&self.goal);
        self.in_flight = true;

        Ok(pending)
    }

    /// The store accepted the write.
    pub fn commit(&mut self, pending: PendingCheckIn) -> ProgressUpdate {
        self.in_flight = false;
        pending.update
    }

    /// The store write failed; restore the state from before the check-in.
    pub fn rollback(&mut self, pending: PendingCheckIn) {
        tracing::warn!(goal_id = %self.goal.id, "rolling back optimistic check-in");
        self.goal = pending.previous_goal;
        self.view = pending.previous_view;
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_goal, finance_goal};
    use chrono::{Duration, FixedOffset};

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 18, 10, 0, 0)
            .unwrap()
    }

    #[test]
    fn begin_marks_completed_and_recomputes_percent() {
        let engine = ProgressEngine::new();
        let mut dashboard = Dashboard::new(&engine, body_goal("muscle", 72.0), &now());
        assert_eq!(dashboard.view().check_in_state, CheckInState::Pending);

        let pending = dashboard.begin_check_in(&engine, &now()).unwrap();
        assert!(dashboard.is_in_flight());
        assert_eq!(dashboard.view().check_in_state, CheckInState::CompletedToday);
        assert_eq!(dashboard.view().current_value, 73.0);
        assert_eq!(dashboard.view().percent, 20.0);

        let update = dashboard.commit(pending);
        assert!(!dashboard.is_in_flight());
        assert_eq!(update.new_current_value, 73.0);
    }

    #[test]
    fn repeat_while_in_flight_is_refused() {
        let engine = ProgressEngine::new();
        let mut dashboard = Dashboard::new(&engine, body_goal("muscle", 0.0), &now());
        let pending = dashboard.begin_check_in(&engine, &now()).unwrap();
        assert_eq!(
            dashboard.begin_check_in(&engine, &now()).unwrap_err(),
            CheckInError::InFlight
        );
        dashboard.rollback(pending);
    }

    #[test]
    fn rollback_restores_pending_state() {
        let engine = ProgressEngine::new();
        let mut dashboard = Dashboard::new(&engine, finance_goal(50_000.0, 1_500.0), &now());
        let before = dashboard.view().clone();

        let pending = dashboard.begin_check_in(&engine, &now()).unwrap();
        dashboard.rollback(pending);

        assert_eq!(dashboard.view(), &before);
        assert_eq!(dashboard.goal().current_value, 1_500.0);
        assert!(dashboard.goal().last_completed_at.is_none());
        assert!(!dashboard.is_in_flight());
        assert!(dashboard.begin_check_in(&engine, &now()).is_ok());
    }

    #[test]
    fn committed_check_in_blocks_rest_of_day() {
        let engine = ProgressEngine::new();
        let mut dashboard = Dashboard::new(&engine, body_goal("muscle", 0.0), &now());
        let pending = dashboard.begin_check_in(&engine, &now()).unwrap();
        dashboard.commit(pending);

        let later = now() + Duration::hours(8);
        assert!(matches!(
            dashboard.begin_check_in(&engine, &later),
            Err(CheckInError::AlreadyCompletedToday { .. })
        ));
    }

    #[test]
    fn refresh_after_midnight_resets_to_pending() {
        let engine = ProgressEngine::new();
        let mut dashboard = Dashboard::new(&engine, body_goal("muscle", 0.0), &now());
        let pending = dashboard.begin_check_in(&engine, &now()).unwrap();
        dashboard.commit(pending);

        let tomorrow = now() + Duration::days(1);
        dashboard.refresh(&engine, &tomorrow);
        assert_eq!(dashboard.view().check_in_state, CheckInState::Pending);
    }
}
