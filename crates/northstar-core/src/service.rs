//! Goal lifecycle on top of a [`GoalStore`].
//!
//! Onboarding validates before touching the store. Check-ins are applied
//! to the dashboard first and rolled back if the store write fails.

use chrono::{DateTime, TimeZone, Utc};

use crate::dashboard::Dashboard;
use crate::engine::ProgressEngine;
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::goal::{Goal, NewGoal};
use crate::storage::GoalStore;

pub struct GoalService<S: GoalStore> {
    store: S,
    engine: ProgressEngine,
}

impl<S: GoalStore> GoalService<S> {
    pub fn new(store: S, engine: ProgressEngine) -> Self {
        Self { store, engine }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn engine(&self) -> &ProgressEngine {
        &self.engine
    }

    /// Create the user's goal.
    ///
    /// # Errors
    /// Validation errors are returned before the store is consulted.
    /// [`CoreError::GoalExists`] if the user already has a goal.
    pub fn onboard(
        &self,
        user_id: &str,
        new_goal: &NewGoal,
        now: DateTime<Utc>,
    ) -> Result<(Goal, Event)> {
        let draft = new_goal.validate(self.engine.content())?;
        if self.store.fetch_goal(user_id)?.is_some() {
            return Err(CoreError::GoalExists {
                user_id: user_id.to_string(),
            });
        }
        let goal = self.store.insert_goal(user_id, &draft, now)?;
        tracing::info!(
            user_id,
            goal_id = %goal.id,
            category = goal.plan.category_str(),
            "goal created"
        );
        let event = Event::goal_created(&goal);
        Ok((goal, event))
    }

    /// The dashboard for `user_id`, or `None` if onboarding is still due.
    ///
    /// # Errors
    /// Returns an error if the store read fails.
    pub fn load_dashboard<Tz: TimeZone>(
        &self,
        user_id: &str,
        now: &DateTime<Tz>,
    ) -> Result<Option<Dashboard>> {
        let goal = self.store.fetch_goal(user_id)?;
        Ok(goal.map(|goal| Dashboard::new(&self.engine, goal, now)))
    }

    /// Complete today's mission and persist it.
    ///
    /// # Errors
    /// [`CoreError::CheckIn`] if the check-in is refused, or
    /// [`CoreError::Transient`] if the store write failed. In the latter
    /// case the dashboard is back in its previous state and the user may
    /// retry.
    pub fn check_in<Tz: TimeZone>(
        &self,
        dashboard: &mut Dashboard,
        now: &DateTime<Tz>,
    ) -> Result<Event> {
        let pending = dashboard.begin_check_in(&self.engine, now)?;
        match self.store.update_progress(pending.update()) {
            Ok(()) => {
                let update = dashboard.commit(pending);
                tracing::info!(
                    goal_id = %update.goal_id,
                    current_value = update.new_current_value,
                    "check-in stored"
                );
                Ok(Event::check_in_completed(&update, dashboard.view().percent))
            }
            Err(e) => {
                dashboard.rollback(pending);
                tracing::warn!(error = %e, "check-in could not be stored");
                Err(CoreError::Transient {
                    message: "could not store check-in, try again".to_string(),
                    source: Some(Box::new(e)),
                })
            }
        }
    }
}
